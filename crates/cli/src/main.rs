//! Fund FAQ CLI
//!
//! Main entry point for the fundfaq command-line tool.
//! Answers factual mutual-fund questions from persisted scheme records.

mod commands;

use clap::{Parser, Subcommand};
use commands::{AskCommand, ChatCommand, SchemesCommand, StatsCommand};
use faq_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// Fund FAQ CLI - citation-backed answers over collected scheme records
#[derive(Parser, Debug)]
#[command(name = "fundfaq")]
#[command(about = "Citation-backed mutual fund FAQ answers", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the persisted scheme records (JSON)
    #[arg(short, long, global = true, env = "FAQ_DATA")]
    data: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "FAQ_CONFIG")]
    config: Option<PathBuf>,

    /// Rephrasing LLM provider (gemini, ollama, none)
    #[arg(short, long, global = true, env = "FAQ_PROVIDER")]
    provider: Option<String>,

    /// Model identifier for the rephrasing provider
    #[arg(short, long, global = true, env = "FAQ_MODEL")]
    model: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Answer a single question
    Ask(AskCommand),

    /// Interactive question loop with cross-turn scheme context
    Chat(ChatCommand),

    /// List the schemes in the fact store
    Schemes(SchemesCommand),

    /// Show fact store statistics
    Stats(StatsCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load base configuration from environment
    let config = AppConfig::load()?;

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.data,
        cli.config,
        cli.provider,
        cli.model,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("Fund FAQ CLI starting");
    tracing::debug!("Data file: {:?}", config.data_file);
    tracing::debug!("Provider: {}", config.provider);

    config.validate()?;

    // Emit command span
    let command_name = match &cli.command {
        Commands::Ask(_) => "ask",
        Commands::Chat(_) => "chat",
        Commands::Schemes(_) => "schemes",
        Commands::Stats(_) => "stats",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    // Route to command handlers
    let result = match cli.command {
        Commands::Ask(cmd) => cmd.execute(&config).await,
        Commands::Chat(cmd) => cmd.execute(&config).await,
        Commands::Schemes(cmd) => cmd.execute(&config).await,
        Commands::Stats(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
