use std::io::{BufRead, BufReader, Read, Write};
use std::rc::Rc;
use log::{debug, warn};
use crate::ast::Program;
use crate::config::Config;
use crate::environment::{Env, Environment};
use crate::error::{Error, ParseErrors, Result};
use crate::evaluator;
use crate::lexer::Lexer;
use crate::object::Object;
use crate::parser;

const MONKEY_FACE: &str =
r#"
            __,__
   .--.  .-"     "-.  .--.
  / .. \/  .-. .-.  \/ .. \
 | |  '|  /   Y   \  |'  | |
 | \   \  \ 0 | 0 /  /   / |
  \ '- ,\.-"""""""-./, -' /
   ''-' /_   ^ ^   _\ '-''
       |  \._   _./  |
       \   \ '~' /   /
        '._ '-=-' _.'
           '-----'
"#;

/// Lexes and parses `source`, failing if any syntax error was reported.
pub fn parse_source(source: &str) -> Result<Program> {
    let (program, errors) = parser::parse(Lexer::new(source));
    if !errors.is_empty() {
        warn!("{} parser error(s)", errors.len());
        return Err(Error::Parse(ParseErrors(errors)));
    }
    debug!("parsed {} statement(s)", program.statements.len());
    Ok(program)
}

/// Parses and evaluates `source` in `env`. Runtime errors come back as
/// `Ok(Object::Error(..))`.
pub fn eval_source(source: &str, env: Env) -> Result<Object> {
    let program = parse_source(source)?;
    let result = evaluator::eval(&program, env);
    debug!("evaluated to {}", result.object_type());
    Ok(result)
}

/// Evaluates `source` in a fresh root environment.
pub fn run(source: &str) -> Result<Object> {
    eval_source(source, Environment::new_root())
}

/// Reads lines from `reader` until end of input, printing each result to `writer`.
pub fn start<R: Read, W: Write>(reader: R, mut writer: W, config: &Config) -> Result<()> {
    let session_env = Environment::new_root();
    let mut reader = BufReader::new(reader);
    loop {
        write!(writer, "{}", config.prompt)?;
        writer.flush()?;
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            writeln!(writer)?;
            return Ok(());
        }
        if line.trim().is_empty() {
            continue;
        }

        let env = if config.persist_env {
            Rc::clone(&session_env)
        } else {
            Environment::new_root()
        };

        match eval_source(&line, env) {
            Ok(obj) => writeln!(writer, "{}", obj)?,
            Err(Error::Parse(errs)) => print_parser_errors(&mut writer, &errs, config)?,
            Err(err) => return Err(err),
        }
    }
}

fn print_parser_errors<W: Write>(writer: &mut W, errs: &ParseErrors, config: &Config) -> Result<()> {
    if config.show_banner {
        write!(writer, "{}", MONKEY_FACE)?;
    }
    writeln!(writer, "Woops! We ran into some monkey business here!")?;
    writeln!(writer, " parser errors:")?;
    for msg in &errs.0 {
        writeln!(writer, "    {}", msg)?;
    }
    writer.flush()?;
    Ok(())
}
