//! `zoo` — administrative command line for the zoo records store.
//!
//! Reads `zoo.toml` (or the path given with `--config`), opens the SQLite
//! store, and runs one command against it.
//!
//! # Usage
//!
//! ```
//! zoo init
//! zoo login admin --password admin
//! zoo add country Colombia
//! zoo add city Bogotá --country 1
//! zoo add zoo Zoo1 --city 1 --area 5000 --budget 100000.50
//! zoo report --from 2024-01-01 --until 2024-12-31
//! ```

mod cli;
mod commands;
mod settings;

use anyhow::Context as _;
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use zoo_store_sqlite::SqliteStore;

use cli::Cli;
use settings::{Settings, expand_tilde};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Logs go to stderr; stdout carries the JSON results.
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let settings = Settings::load(&cli.config)?;

  let database = expand_tilde(cli.database.as_ref().unwrap_or(&settings.database_path));
  let store = SqliteStore::open_with(&database, settings.hasher()?)
    .await
    .with_context(|| format!("failed to open store at {database:?}"))?;

  let version = store.schema_version().await?;
  tracing::info!(version, path = %database.display(), "store ready");

  let mut stdout = std::io::stdout().lock();
  commands::execute(&store, cli.command, &mut stdout).await
}
