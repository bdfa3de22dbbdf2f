//! txkv CLI
//!
//! Command-line driver for the txkv transactional store.
//!
//! # Commands
//!
//! - `demo` - Run the reference walkthrough and print each read
//! - `script` - Execute store commands from a file or stdin
//! - `version` - Show version information

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// txkv in-memory transactional store driver.
#[derive(Parser)]
#[command(name = "txkv")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the reference walkthrough against a fresh store
    Demo {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Execute commands (get, put, begin, commit, rollback) line by line
    Script {
        /// Script file to read; stdin if omitted
        file: Option<PathBuf>,

        /// Stop at the first rejected or unparseable command
        #[arg(short, long)]
        strict: bool,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries results only.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Demo { format } => {
            commands::demo::run(&format)?;
        }
        Commands::Script { file, strict } => {
            commands::script::run(file.as_deref(), strict)?;
        }
        Commands::Version => {
            println!("txkv CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("txkv Core v{}", txkv_core::VERSION);
        }
    }

    Ok(())
}
