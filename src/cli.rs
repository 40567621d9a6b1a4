use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::engine::Engine;
use crate::errors::EngineResult;
use crate::io;

/// Batch driver for the matching engine.
#[derive(Parser)]
#[command(name = "order-match-engine")]
#[command(author, version, about = "A continuous limit order matching engine")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process one or more input CSV files to completion, each writing
    /// its own output CSV.
    Run {
        /// Input identifiers: a path, or a bare stem resolved to `<stem>.csv`.
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Directory to write `<stem>.output.csv` files into; defaults
        /// to each input's own directory.
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

pub fn run_cli() -> EngineResult<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Run { inputs, out_dir } => {
            for input in inputs {
                run_one(&input, out_dir.as_deref())?;
            }
        }
    }
    Ok(())
}

fn run_one(input: &str, out_dir: Option<&Path>) -> EngineResult<()> {
    let input_path = resolve_input_path(input);
    tracing::info!(input = %input_path.display(), "processing input");

    let file = std::fs::File::open(&input_path)?;
    let rows = io::read_orders(file)?;

    let events = Engine::new().run_rows(&rows)?;

    let output_path = resolve_output_path(&input_path, out_dir);
    let out_file = std::fs::File::create(&output_path)?;
    io::write_events(out_file, &events)?;

    tracing::info!(output = %output_path.display(), events = events.len(), "wrote output");
    Ok(())
}

fn resolve_input_path(input: &str) -> PathBuf {
    let path = PathBuf::from(input);
    if path.extension().is_some() || path.exists() {
        path
    } else {
        path.with_extension("csv")
    }
}

fn resolve_output_path(input_path: &Path, out_dir: Option<&Path>) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let mut file_name = stem.to_os_string();
    file_name.push(".output.csv");
    match out_dir {
        Some(dir) => dir.join(file_name),
        None => input_path.with_file_name(file_name),
    }
}
