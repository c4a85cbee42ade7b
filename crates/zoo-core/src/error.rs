//! Error types for `zoo-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid sex code: {0:?} (expected 'M' or 'F')")]
  InvalidSex(String),

  #[error("invalid amount: {0:?}")]
  InvalidMoney(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
