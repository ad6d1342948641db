//! LoreSeek CLI — the main entry point.
//!
//! Commands:
//! - `onboard` — Initialize the config file
//! - `chat`    — Interactive research session or single-question mode
//! - `domains` — List available research domains
//! - `doctor`  — Diagnose configuration and connectivity

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "loreseek",
    about = "LoreSeek — conversational research assistant",
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
    /// Initialize the configuration file
    Onboard,

    /// Start a research session
    Chat {
        /// Ask a single question instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,

        /// Start in a specific research domain
        #[arg(short, long)]
        domain: Option<String>,
    },

    /// List available research domains
    Domains,

    /// Diagnose configuration and connectivity
    Doctor,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Chat { message, domain } => commands::chat::run(message, domain).await?,
        Commands::Domains => commands::domains::run(),
        Commands::Doctor => commands::doctor::run().await?,
    }

    Ok(())
}
