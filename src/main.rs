use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use clap::Subcommand;
use env_logger::Builder;
use log::{debug, info};
use memmap2::Mmap;

use loxrs::ast_printer::AstPrinter;
use loxrs::interpreter::Interpreter;
use loxrs::parser::Parser;
use loxrs::run::{self, RunOutcome};
use loxrs::scanner::Scanner;
use loxrs::token::Token;

#[derive(ClapParser, Debug)]
#[command(version, about = "Tree-walking interpreter for the Lox subset", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    commands: Commands,

    /// Enable debug logging to app.log
    #[arg(long, global = true)]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan a file and print each token
    Tokenize {
        filename: PathBuf,

        /// Emit the token stream as a JSON array instead of one per line
        #[arg(long)]
        json: bool,
    },

    /// Parse a file and print each statement in prefix form
    Parse { filename: PathBuf },

    /// Execute a file, or start the interactive prompt if none is given
    Run { filename: Option<PathBuf> },
}

/// Map a script file into memory; the scanner borrows the bytes directly.
fn map_file(filename: &PathBuf) -> Result<Mmap> {
    info!("Mapping file: {:?}", filename);

    let file = File::open(filename).context(format!("Failed to open file {:?}", filename))?;

    // SAFETY: the mapping is read-only and lives only for this run.
    let mmap = unsafe { Mmap::map(&file) }
        .context(format!("Failed to map file {:?}", filename))?;

    info!("Mapped {} bytes from {:?}", mmap.len(), filename);

    Ok(mmap)
}

fn init_logger() -> Result<()> {
    let log_file = File::create("app.log").context("Failed to create app.log")?;

    // Write records to app.log with module path and source line.
    Builder::new()
        .format(|buf, record| {
            let module = record
                .module_path()
                .unwrap_or("<unnamed>")
                .strip_prefix("loxrs::")
                .unwrap_or(record.module_path().unwrap_or("<unnamed>"));
            writeln!(
                buf,
                "[{}:{}] - {}",
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug)
        .init();

    info!("Logger initialized, writing to app.log");
    Ok(())
}

fn tokenize(source: &[u8], json: bool) -> Result<i32> {
    let mut tokens: Vec<Token<'_>> = Vec::new();
    let mut clean = true;

    for item in Scanner::new(source) {
        match item {
            Ok(token) => {
                debug!("Scanned token: {}", token);

                if !json {
                    println!("{}", token);
                }

                tokens.push(token);
            }

            Err(e) => {
                clean = false;

                eprintln!("{}", e);
            }
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&tokens)?);
    }

    Ok(if clean { 0 } else { 65 })
}

fn parse(source: &[u8]) -> i32 {
    let mut tokens: Vec<Token<'_>> = Vec::new();
    let mut clean = true;

    for item in Scanner::new(source) {
        match item {
            Ok(token) => tokens.push(token),

            Err(e) => {
                clean = false;

                eprintln!("{}", e);
            }
        }
    }

    match Parser::new(&tokens).parse() {
        Ok(statements) if clean => {
            for stmt in &statements {
                println!("{}", AstPrinter::print_stmt(stmt));
            }

            0
        }

        Ok(_) => 65,

        Err(errors) => {
            for e in errors {
                eprintln!("{}", e);
            }

            65
        }
    }
}

fn run_file(filename: &PathBuf) -> Result<i32> {
    let mmap = map_file(filename)?;

    let stdout = io::stdout();
    let mut interpreter = Interpreter::new(stdout.lock());

    let outcome: RunOutcome = run::run(&mmap, &mut interpreter);
    outcome.report(&mut io::stderr())?;

    Ok(outcome.exit_code())
}

/// Interactive prompt: one run per line against a shared global
/// environment. Static and runtime errors are reported and the prompt
/// continues; error state does not carry across lines.
fn run_prompt() -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    // One interpreter for the whole session so bindings persist across
    // lines; error state does not.
    let mut interpreter = Interpreter::new(io::stdout());

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }

        let outcome: RunOutcome = run::run(line.as_bytes(), &mut interpreter);
        outcome.report(&mut io::stderr())?;
    }

    Ok(())
}

fn main() -> Result<ExitCode> {
    let args: Cli = Cli::parse();

    if args.log {
        init_logger()?;
    } else {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .init();
    }

    info!("CLI arguments: {:?}", args);

    let code: i32 = match args.commands {
        Commands::Tokenize { filename, json } => {
            let mmap = map_file(&filename)?;

            tokenize(&mmap, json)?
        }

        Commands::Parse { filename } => {
            let mmap = map_file(&filename)?;

            parse(&mmap)
        }

        Commands::Run { filename } => match filename {
            Some(filename) => run_file(&filename)?,

            None => {
                run_prompt()?;

                0
            }
        },
    };

    Ok(ExitCode::from(code as u8))
}
