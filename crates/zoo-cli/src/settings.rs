//! Runtime configuration, layered from an optional TOML file and `ZOO_*`
//! environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;
use zoo_store_sqlite::CredentialHasher;

// argon2's own defaults, used to fill whichever cost setting is missing.
const DEFAULT_ARGON2_MEMORY_KIB: u32 = 19 * 1024;
const DEFAULT_ARGON2_ITERATIONS: u32 = 2;

/// Settings deserialised from `zoo.toml` / the environment.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  #[serde(default = "default_database_path")]
  pub database_path:     PathBuf,
  /// argon2 memory cost in KiB for newly hashed passwords.
  pub argon2_memory_kib: Option<u32>,
  pub argon2_iterations: Option<u32>,
}

fn default_database_path() -> PathBuf { PathBuf::from("zoo_db.db") }

impl Settings {
  pub fn load(file: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(file).required(false))
      .add_source(config::Environment::with_prefix("ZOO"))
      .build()
      .with_context(|| format!("failed to read config file {}", file.display()))?;

    settings
      .try_deserialize()
      .context("failed to deserialise settings")
  }

  /// Hasher honouring the configured cost; argon2 defaults otherwise.
  pub fn hasher(&self) -> anyhow::Result<CredentialHasher> {
    match (self.argon2_memory_kib, self.argon2_iterations) {
      (None, None) => Ok(CredentialHasher::default()),
      (memory, iterations) => CredentialHasher::with_cost(
        memory.unwrap_or(DEFAULT_ARGON2_MEMORY_KIB),
        iterations.unwrap_or(DEFAULT_ARGON2_ITERATIONS),
      )
      .context("invalid argon2 cost settings"),
    }
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
