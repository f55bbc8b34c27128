//! multidrill CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;
mod console;

#[derive(Parser)]
#[command(name = "multidrill", version, about = "Adaptive multiplication drill for the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an interactive practice session
    Practice {
        /// Username owning the record log (prompted when omitted)
        #[arg(long)]
        user: Option<String>,

        /// Directory holding per-user record logs
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Trials per round
        #[arg(long)]
        trials: Option<usize>,

        /// Smallest factor drilled
        #[arg(long)]
        min_factor: Option<u8>,

        /// Largest factor drilled
        #[arg(long)]
        max_factor: Option<u8>,

        /// Fraction of slowest answers fed back into selection
        #[arg(long)]
        percentile: Option<f64>,

        /// Ask after every round instead of auto-repeating imperfect ones
        #[arg(long)]
        always_prompt: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Summarize a user's history, weakest problems first
    Stats {
        /// Username whose record log to read
        #[arg(long)]
        user: String,

        /// Directory holding per-user record logs
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("multidrill=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Practice {
            user,
            data_dir,
            trials,
            min_factor,
            max_factor,
            percentile,
            always_prompt,
            config,
        } => commands::practice::execute(
            user,
            data_dir,
            trials,
            min_factor,
            max_factor,
            percentile,
            always_prompt,
            config,
        ),
        Commands::Stats {
            user,
            data_dir,
            json,
            config,
        } => commands::stats::execute(user, data_dir, json, config),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
