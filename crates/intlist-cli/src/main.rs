use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::process::ExitCode;

use clap::Parser as _;
use intlist::{Parser, Scanner, ScannerOptions, SourceMap, Token, Value};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(clap::Parser, Debug)]
#[command(name = "intlist", version, about = "Read a nested list of integers and print its tree")]
struct Args {
    /// Input file path. Omit or use '-' to read from stdin.
    input: Option<String>,

    /// Print the scanned tokens instead of the tree.
    #[arg(long, conflicts_with_all = ["json", "compact"])]
    tokens: bool,

    /// Print the tree as JSON.
    #[arg(long, conflicts_with = "compact")]
    json: bool,

    /// Print the tree without spaces after commas.
    #[arg(long)]
    compact: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Parse(#[from] intlist::Error),
}

impl CliError {
    fn exit_code(&self) -> ExitCode {
        match self {
            CliError::Parse(_) => ExitCode::from(1),
            CliError::Io(_) => ExitCode::from(2),
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            err.exit_code()
        }
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let reader = open_input(args.input.as_deref())?;
    let (tokens, map) = scan_lines(reader)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.tokens {
        writeln!(out, "{}", render_tokens(&tokens))?;
        return Ok(());
    }

    let root = Parser::new()
        .parse(tokens)
        .map_err(|err| intlist::Error::from(err.locate(&map)))?;
    writeln!(out, "{}", render_tree(&root, args))?;
    Ok(())
}

fn open_input(path: Option<&str>) -> io::Result<Box<dyn BufRead>> {
    match path {
        None | Some("-") => Ok(Box::new(BufReader::new(io::stdin()))),
        Some(path) => Ok(Box::new(BufReader::new(File::open(path)?))),
    }
}

/// Hands the input to the scanner one line at a time, line terminator
/// included, so positions in diagnostics follow the file. Bytes that are not
/// UTF-8 become U+FFFD and are reported as unexpected symbols.
fn scan_lines(mut reader: impl BufRead) -> Result<(Vec<Token>, SourceMap), CliError> {
    let mut scanner = Scanner::new(ScannerOptions::default());
    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        scanner
            .consume(&String::from_utf8_lossy(&line))
            .map_err(intlist::Error::from)?;
    }
    tracing::debug!(tokens = scanner.tokens().len(), "input scanned");
    Ok(scanner.finish_with_map().map_err(intlist::Error::from)?)
}

fn render_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// The compact bracket form is also the JSON form: integers and arrays only.
fn render_tree(root: &Value, args: &Args) -> String {
    if args.json || args.compact {
        format!("{root:#}")
    } else {
        root.to_string()
    }
}
