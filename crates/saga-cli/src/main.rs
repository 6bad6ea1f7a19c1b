//! Command-line tools for Transfer Saga scripts.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "saga",
    about = "Transfer Saga: check, inspect and play story scripts",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a script and report broken references
    Check {
        /// Script file
        #[arg(default_value = "assets/script")]
        script: PathBuf,
    },

    /// List branches with their stat effects and choices
    Branches {
        /// Script file
        #[arg(default_value = "assets/script")]
        script: PathBuf,
    },

    /// Print the parsed story as JSON
    Dump {
        /// Script file
        #[arg(default_value = "assets/script")]
        script: PathBuf,
    },

    /// Play a script in the terminal
    Play {
        /// Script file
        #[arg(default_value = "assets/script")]
        script: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { script } => commands::check::run(&script),
        Commands::Branches { script } => commands::branches::run(&script),
        Commands::Dump { script } => commands::dump::run(&script),
        Commands::Play { script } => commands::play::run(&script),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
