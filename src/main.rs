use std::io::{stdin, stdout};
use std::path::PathBuf;
use std::process::ExitCode;
use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use monkey_interpreter::{interpreter, Config, Error, Object};

#[derive(Parser, Debug)]
#[command(name = "monkey")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Monkey language interpreter", long_about = None)]
struct Args {
    /// Script to run instead of starting the REPL
    #[arg(value_name = "FILE", conflicts_with = "eval")]
    file: Option<PathBuf>,

    /// Evaluate CODE and print the result
    #[arg(short, long, value_name = "CODE")]
    eval: Option<String>,

    #[arg(long, value_name = "PROMPT", default_value = ">> ")]
    prompt: String,

    /// Start every REPL line in an empty environment
    #[arg(long = "fresh-env")]
    fresh_env: bool,

    #[arg(long = "no-banner")]
    no_banner: bool,

    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            prompt: self.prompt.clone(),
            persist_env: !self.fresh_env,
            show_banner: !self.no_banner,
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    let level = if args.verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let source = match (&args.file, &args.eval) {
        (Some(path), _) => Some(std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?),
        (None, Some(code)) => Some(code.clone()),
        (None, None) => None,
    };

    match source {
        Some(source) => run_once(&source),
        None => {
            interpreter::start(stdin(), stdout(), &args.config())?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_once(source: &str) -> anyhow::Result<ExitCode> {
    match interpreter::run(source) {
        Ok(Object::Error(msg)) => {
            eprintln!("ERROR: {}", msg);
            Ok(ExitCode::FAILURE)
        }
        Ok(obj) => {
            println!("{}", obj);
            Ok(ExitCode::SUCCESS)
        }
        Err(Error::Parse(errs)) => {
            for msg in &errs.0 {
                eprintln!("{}", msg);
            }
            Ok(ExitCode::FAILURE)
        }
        Err(err) => Err(err.into()),
    }
}
