//! Ressa CLI entry point.
//!
//! Commands:
//! - `ask`      Run one question through the reasoning loop
//! - `chat`     Interactive session
//! - `tools`    List available tools
//! - `ingest`   Chunk documents and report chunk counts
//! - `config`   Show the effective configuration

use clap::{Parser, Subcommand};
use ressa_config::AppConfig;
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "ressa",
    about = "Ressa, a tool-using research assistant",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask a single question
    Ask {
        /// The question
        query: String,

        /// Do not read or write conversation memory
        #[arg(long)]
        no_memory: bool,

        /// Documents to index for the document_retriever tool
        #[arg(long, num_args = 1..)]
        docs: Vec<PathBuf>,
    },

    /// Start an interactive session
    Chat {
        /// Documents to index for the document_retriever tool
        #[arg(long, num_args = 1..)]
        docs: Vec<PathBuf>,

        /// Plain chat without tools
        #[arg(long)]
        simple: bool,
    },

    /// List available tools
    Tools,

    /// Chunk documents and report how many chunks each produces
    Ingest {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Show configuration
    Config {
        /// Print the config file path instead
        #[arg(long)]
        path: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { config.log_level.as_str() };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Ask { query, no_memory, docs } => {
            commands::ask::run(&config, &query, !no_memory, &docs).await?
        }
        Commands::Chat { docs, simple } => commands::chat::run(&config, &docs, simple).await?,
        Commands::Tools => commands::tools::run(&config)?,
        Commands::Ingest { files } => commands::ingest::run(&config, &files).await?,
        Commands::Config { path } => {
            if path {
                commands::config_cmd::path()
            } else {
                commands::config_cmd::show(&config)?
            }
        }
    }

    Ok(())
}
