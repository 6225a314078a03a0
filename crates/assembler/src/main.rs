//! CLI entry point for the UVM assembler binary.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use uvm_assembler::listing::{format_listing, format_words};
use uvm_assembler::{encode_program, Assembler, AssemblyError};

/// Assemble UVM source into a binary image.
#[derive(Debug, Parser, PartialEq, Eq)]
#[command(name = "uvm-asm", version, about)]
struct Cli {
    /// Assembly source file (UTF-8).
    input: PathBuf,
    /// Output binary file.
    output: PathBuf,
    /// Print the intermediate representation and word dump before writing.
    #[arg(long)]
    test: bool,
    /// Enable debug logging (overridden by `RUST_LOG`).
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Assembly(#[from] AssemblyError),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_source(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let source = read_source(&cli.input)?;
    debug!(input = %cli.input.display(), bytes = source.len(), "source loaded");

    let mut assembler = Assembler::new();
    let program = assembler.assemble(&source)?;
    let binary = encode_program(&program).map_err(AssemblyError::from)?;

    if cli.test {
        let listing = format_listing(&program).map_err(AssemblyError::from)?;
        println!("=== INTERMEDIATE REPRESENTATION ===");
        println!("{listing}");
        let labels = assembler.labels().sorted();
        if !labels.is_empty() {
            println!("=== LABELS ===");
            for (name, address) in labels {
                println!("{name} = {address}");
            }
            println!();
        }
        println!("=== BINARY (hex) ===");
        if !binary.is_empty() {
            println!("{}", format_words(&binary));
        }
    }

    fs::write(&cli.output, &binary).map_err(|source| CliError::Write {
        path: cli.output.clone(),
        source,
    })?;
    info!(output = %cli.output.display(), bytes = binary.len(), "binary written");

    println!(
        "Assembled {} instructions into {}",
        program.len(),
        cli.output.display()
    );
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}
