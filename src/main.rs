//! Prints the token stream of a source file, stdin, or a built-in demo line.

use std::{
    fs::File,
    io::{self, Read},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::Parser;
use scrap::{
    errors::errors::{Error, ErrorTip},
    lexer::lexer::Lexer,
};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEMO_SOURCE: &str = "    +3 - / = == A 6 6a A5 ~ \n *";

#[derive(Parser, Debug)]
#[command(name = "scrap")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Print the tokens of a source file", long_about = None)]
struct Cli {
    /// Source file to lex, `-` for stdin. Lexes a demo line when omitted.
    path: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, env = "SCRAP_VERBOSE")]
    verbose: bool,

    /// Disable color output
    #[arg(long, env = "SCRAP_NO_COLOR")]
    no_color: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.no_color)?;

    let (name, reader) = open_input(cli.path.as_ref())?;
    info!(input = %name, "lexing");

    let mut lexer = Lexer::new(reader);
    let mut count = 0usize;
    let mut errors = 0usize;

    loop {
        match lexer.next_token() {
            Ok(Some(token)) => {
                if token.is_error() {
                    errors += 1;
                }
                count += 1;
                println!("{}", token);
            }
            Ok(None) => break,
            Err(error) => {
                display_error(&error, &name);
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    info!(tokens = count, errors, "done");
    Ok(ExitCode::SUCCESS)
}

fn init_logging(verbose: bool, no_color: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));

    let subscriber = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(!no_color)
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}

fn open_input(path: Option<&PathBuf>) -> Result<(String, Box<dyn Read>)> {
    match path {
        None => Ok((String::from("<demo>"), Box::new(DEMO_SOURCE.as_bytes()))),
        Some(path) if path.as_os_str() == "-" => Ok((String::from("<stdin>"), Box::new(io::stdin()))),
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            Ok((path.display().to_string(), Box::new(file)))
        }
    }
}

fn display_error(error: &Error, name: &str) {
    /*
        Error: Io (tip)
        -> input.scrap:3:14
           failed to read input: ...
    */

    if let ErrorTip::None = error.get_tip() {
        eprintln!("Error: {}", error.get_error_name());
    } else {
        eprintln!("Error: {} ({})", error.get_error_name(), error.get_tip());
    }

    let position = error.get_position();
    eprintln!("-> {}:{}:{}", name, position.line, position.column);
    eprintln!("   {}", error.get_error());
}
