use std::fmt;
use std::fmt::Formatter;

/// Syntax errors collected during one parse, in the order they were found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrors(pub Vec<String>);

impl fmt::Display for ParseErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} parser error(s)", self.0.len())?;
        for msg in &self.0 {
            write!(f, "\n    {}", msg)?;
        }
        Ok(())
    }
}

/// Failures at the host boundary. Evaluation errors are not among them:
/// they are ordinary `Object::Error` values.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Parse(ParseErrors),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
