//! Tetris sequence simulator (default binary).
//!
//! Serves the JSON adapter by default; `eval` and `sequences` run the
//! simulation locally and print the results.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tetris_sim::adapter::{load_sequences, run_server, ServerConfig};
use tetris_sim::core::Game;

/// Simulates falling-block placement sequences.
#[derive(Parser)]
#[command(name = "tetris-sim")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the line-delimited JSON adapter over TCP.
    Serve(ServeArgs),
    /// Evaluate sequences and print their final heights.
    Eval {
        /// Sequences such as "Q0,I4,T2" (quote them in the shell).
        #[arg(required = true)]
        sequences: Vec<String>,
        /// Print every move record, not just the final height.
        #[arg(long)]
        steps: bool,
    },
    /// List the example sequences with their expected heights.
    Sequences {
        /// Example file; defaults to TETRIS_SIM_SEQUENCES or input.txt.
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

#[derive(clap::Args, Default)]
struct ServeArgs {
    /// Bind address (overrides TETRIS_SIM_HOST).
    #[arg(long)]
    host: Option<String>,
    /// Port (overrides TETRIS_SIM_PORT).
    #[arg(long)]
    port: Option<u16>,
    /// Example sequence file (overrides TETRIS_SIM_SEQUENCES).
    #[arg(long)]
    sequences: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Command::Serve(args)) => serve(args),
        Some(Command::Eval { sequences, steps }) => eval(&sequences, steps),
        Some(Command::Sequences { file }) => list_sequences(file),
        // default: serve with environment configuration
        None => serve(ServeArgs::default()),
    }
}

fn serve(args: ServeArgs) -> Result<()> {
    let mut config = ServerConfig::from_env();
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(path) = args.sequences {
        config.sequences_path = path;
    }

    let rt = tokio::runtime::Runtime::new().context("failed to create tokio runtime")?;
    rt.block_on(run_server(config, None))
}

fn eval(sequences: &[String], steps: bool) -> Result<()> {
    for sequence in sequences {
        let mut game = Game::new(sequence.as_str());
        if steps {
            while let Some(record) = game
                .step()
                .with_context(|| format!("sequence {sequence:?} failed"))?
            {
                println!(
                    "{}{} -> height {} cleared {:?}",
                    record.kind, record.column, record.height_after, record.rows_cleared
                );
            }
        }
        let height = game
            .run_to_end()
            .with_context(|| format!("sequence {sequence:?} failed"))?;
        println!("{sequence}\t{height}");
    }
    Ok(())
}

fn list_sequences(file: Option<PathBuf>) -> Result<()> {
    let path = file.unwrap_or_else(|| ServerConfig::from_env().sequences_path);
    let list = load_sequences(&path)
        .with_context(|| format!("failed to load example sequences from {}", path.display()))?;

    for info in &list {
        println!(
            "{}\theight={}\tpieces={}",
            info.sequence, info.expected_height, info.piece_count
        );
    }
    Ok(())
}
