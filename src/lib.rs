//! A tree-walking interpreter for the Monkey language: lexer, Pratt parser,
//! runtime object model and evaluator with lexically scoped closures.

pub mod token;
pub mod lexer;
pub mod ast;
pub mod parser;
pub mod object;
pub mod environment;
pub mod evaluator;
pub mod builtin;
pub mod config;
pub mod error;
pub mod interpreter;

pub use config::Config;
pub use environment::{Env, Environment};
pub use error::{Error, ParseErrors};
pub use evaluator::{eval, Evaluator};
pub use lexer::Lexer;
pub use object::Object;
pub use parser::{parse, Parser};
