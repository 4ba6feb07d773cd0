//! LDE CLI
//!
//! Command-line front end for the LDE entitlement engine.
//!
//! # Usage
//!
//! ```bash
//! lde status
//! lde tier set battery
//! lde contribute 18
//! lde ask "what is python" --style detailed
//! lde workspace history --format json
//! ```

use clap::{Parser, Subcommand};
use lde_entitlement::{EntitlementEngine, PersistScope, DEFAULT_HISTORY_DAYS};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod output;
mod services;

#[derive(Parser)]
#[command(name = "lde")]
#[command(author = "LDE")]
#[command(version)]
#[command(about = "LDE entitlement and usage accounting", long_about = None)]
struct Cli {
    /// State file path
    #[arg(long, env = "LDE_STATE_FILE", global = true)]
    state_file: Option<PathBuf>,

    /// Persisted part of the account: ledger or full
    #[arg(long, env = "LDE_PERSIST_SCOPE", global = true)]
    persist_scope: Option<PersistScope>,

    /// Output format
    #[arg(long, short, global = true)]
    format: Option<output::OutputFormat>,

    /// Profile name from config file
    #[arg(long, short, global = true)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show tier, resources, usage and credits
    Status,
    /// Inspect or change the tier
    Tier {
        #[command(subcommand)]
        action: TierCommands,
    },
    /// Consume one unit of the daily cap
    Consume,
    /// Record a battery contribution for today
    Contribute {
        /// Share of battery contributed, in percent
        percent: u32,
    },
    /// Workspace I/O accounting
    Workspace {
        #[command(subcommand)]
        action: WorkspaceCommands,
    },
    /// Credit ledger
    Credits {
        #[command(subcommand)]
        action: CreditCommands,
    },
    /// Ask the learning explainer
    Ask {
        question: String,
        /// simple, detailed or compare
        #[arg(long, short, default_value = "simple")]
        style: String,
    },
    /// Run the mock data processing service
    ProcessData,
    /// Run the CPU stress loop
    Stress {
        #[arg(long, default_value_t = 100_000)]
        iterations: u64,
        #[arg(long, default_value_t = 5)]
        steps: u32,
    },
    /// Process a file in fixed-size chunks
    Chunk {
        path: PathBuf,
        #[arg(long, default_value_t = services::chunker::DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,
    },
    /// Run the parallel compute demo
    Compute {
        #[arg(long, default_value_t = services::parallel::MAX_UNITS)]
        units: usize,
    },
    /// Scripted walkthrough of the engine
    Demo,
    /// Configure CLI
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum TierCommands {
    /// Show the effective tier and its resources
    Get,
    /// Set the tier (free, battery, pro)
    Set { tier: String },
}

#[derive(Subcommand)]
enum WorkspaceCommands {
    /// Record bytes written today
    Write { bytes: u64 },
    /// Record bytes read today
    Read { bytes: u64 },
    /// Show today's I/O in MB
    Today,
    /// Show archived daily I/O, most recent first
    History {
        #[arg(long, default_value_t = DEFAULT_HISTORY_DAYS)]
        days: usize,
    },
}

#[derive(Subcommand)]
enum CreditCommands {
    /// Show the credit balance
    Show,
    /// Add credits (negative amounts deduct)
    Add {
        #[arg(allow_hyphen_values = true)]
        amount: i64,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Set configuration value
    Set { key: String, value: String },
    /// Get configuration value
    Get { key: String },
    /// List all configuration
    List,
    /// Initialize configuration
    Init,
}

fn setup_logging() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() {
    setup_logging();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let profile = cli.profile.as_deref();
    let config = config::Config::load(profile).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Config unreadable, using defaults");
        config::Config::default()
    });
    let format = cli
        .format
        .or_else(|| config.format())
        .unwrap_or(output::OutputFormat::Table);

    let command = match cli.command {
        Commands::Config { action } => return commands::config::handle(action, profile),
        command => command,
    };

    let engine = EntitlementEngine::open(&config.engine_config(cli.state_file, cli.persist_scope));

    match command {
        Commands::Status => commands::account::status(&engine, format),
        Commands::Tier { action } => commands::account::tier(action, &engine, format),
        Commands::Consume => commands::account::consume(&engine, format),
        Commands::Contribute { percent } => commands::account::contribute(percent, &engine, format),
        Commands::Credits { action } => commands::account::credits(action, &engine, format),
        Commands::Workspace { action } => commands::workspace::handle(action, &engine, format),
        Commands::Ask { question, style } => {
            commands::services::ask(&question, &style, &engine, format)
        }
        Commands::ProcessData => commands::services::process_data(&engine, format),
        Commands::Stress { iterations, steps } => {
            commands::services::stress(iterations, steps, &engine, format)
        }
        Commands::Chunk { path, chunk_size } => {
            commands::services::chunk(&path, chunk_size, &engine, format)
        }
        Commands::Compute { units } => commands::services::compute(units, engine, format).await,
        Commands::Demo => commands::demo::run(&engine, format),
        Commands::Config { .. } => unreachable!("config handled before opening the engine"),
    }
}
