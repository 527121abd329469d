//! Casework CLI
//!
//! Command-line view of the casework admin console dashboard.
//!
//! # Usage
//!
//! ```bash
//! casework --store-url https://store.example/v1 summary
//! casework --snapshot export.json agents
//! casework top --limit 5 --format json
//! casework trend --metric applications
//! casework config set store_url https://store.example/v1
//! ```

use std::path::PathBuf;

use anyhow::Result;
use casework_dashboard::{DashboardConfig, DashboardService, MetricType};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod output;

use commands::SourceSpec;
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "casework")]
#[command(author = "Casework Team")]
#[command(version)]
#[command(about = "Casework dashboard command line interface", long_about = None)]
struct Cli {
    /// Document store endpoint URL
    #[arg(long, env = "CASEWORK_STORE_URL")]
    store_url: Option<String>,

    /// API key for the document store
    #[arg(long, env = "CASEWORK_API_KEY")]
    api_key: Option<String>,

    /// Read collections from a JSON export instead of the store
    #[arg(long, value_name = "FILE")]
    snapshot: Option<PathBuf>,

    /// Output format
    #[arg(long, short)]
    format: Option<OutputFormat>,

    /// Profile name from config file
    #[arg(long, short)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Daily counters, completion ratios, load and top agents
    Summary {
        /// Day to count activity for (UTC), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Per-agent caseload and completion ratios
    Agents,
    /// Average and maximum load per agent
    Load,
    /// Agents with the most assigned clients
    Top {
        #[arg(long, short = 'n')]
        limit: Option<usize>,
    },
    /// Records per day for one metric
    Trend {
        #[arg(long, default_value = "clients")]
        metric: MetricType,
    },
    /// Configure CLI
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
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

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let profile = cli.profile.as_deref();
    let config = config::Config::load(profile)?;
    let format = OutputFormat::resolve(cli.format, config.default_format.as_deref());

    let mut dashboard_config = DashboardConfig::default();
    if let Some(n) = config.top_n {
        dashboard_config.top_n = n;
    }
    if let Commands::Top { limit: Some(n) } = cli.command {
        dashboard_config.top_n = n;
    }

    let service = || -> Result<DashboardService> {
        let source = SourceSpec::choose(
            cli.snapshot.clone().or_else(|| config.snapshot_path.clone()),
            cli.store_url.clone().or_else(|| config.store_url.clone()),
            cli.api_key.clone().or_else(|| config.api_key.clone()),
        )?;
        Ok(DashboardService::new(source.open(), dashboard_config.clone()))
    };

    match cli.command {
        Commands::Summary { date } => {
            let date = date.unwrap_or_else(|| Utc::now().date_naive());
            commands::dashboard::summary(&service()?, date, format).await
        }
        Commands::Agents => commands::dashboard::agents(&service()?, format).await,
        Commands::Load => commands::dashboard::load(&service()?, format).await,
        Commands::Top { .. } => commands::dashboard::top(&service()?, format).await,
        Commands::Trend { metric } => commands::dashboard::trend(&service()?, metric, format).await,
        Commands::Config { action } => commands::config::handle(action, profile),
    }
}
