use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use sonar::{JsonDirStore, JsonlWarehouse, SurveyService};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::Command;
use config::Config;

/// Build survey creatives and read their brand-lift results.
#[derive(Debug, Parser)]
#[command(name = "sonar", version)]
struct Cli {
    /// Data directory holding `surveys/` and `responses.jsonl`.
    /// Defaults to `SONAR_DATA_DIR`, then `./data`.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Endpoint creatives send responses to. Defaults to `RECEIVER_URL`.
    #[arg(long, global = true)]
    receiver_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

fn main() -> anyhow::Result<()> {
    let _ = dotenv::dotenv();
    init_logging();

    let cli = Cli::parse();
    let config = Config::from_env(cli.data_dir, cli.receiver_url);
    debug!(?config, "resolved configuration");

    let store = JsonDirStore::open(config.surveys_dir())
        .with_context(|| format!("opening {}", config.surveys_dir().display()))?;
    let warehouse = JsonlWarehouse::open(config.responses_file());
    let service = SurveyService::new(store, warehouse).with_receiver_url(config.receiver_url);

    let today = chrono::Local::now().date_naive();
    commands::run(&service, cli.command, today, &mut io::stdout().lock())
}

fn init_logging() {
    let default_level = "info";
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .try_init();
}
