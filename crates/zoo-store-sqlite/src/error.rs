//! Error type for `zoo-store-sqlite`.

use rusqlite::{ErrorCode, ffi};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] zoo_core::Error),

  /// A `UNIQUE` key already holds this value. Nothing was written.
  #[error("uniqueness violated: {0}")]
  UniqueViolation(String),

  /// A referenced row does not exist, or a restricted parent still has
  /// children. Nothing was written.
  #[error("foreign key violated: {0}")]
  ForeignKeyViolation(String),

  /// Any other constraint class (`CHECK`, `NOT NULL`).
  #[error("constraint violated: {0}")]
  Constraint(String),

  #[error("database error: {0}")]
  Database(tokio_rusqlite::Error),

  #[error("password hashing error: {0}")]
  PasswordHash(String),

  #[error("database schema version {found} is newer than supported version {supported}")]
  SchemaTooNew { found: i32, supported: i32 },
}

impl Error {
  pub fn is_constraint_violation(&self) -> bool {
    matches!(
      self,
      Error::UniqueViolation(_) | Error::ForeignKeyViolation(_) | Error::Constraint(_)
    )
  }
}

impl From<tokio_rusqlite::Error> for Error {
  fn from(err: tokio_rusqlite::Error) -> Self {
    match err {
      tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(code, msg))
        if code.code == ErrorCode::ConstraintViolation =>
      {
        let msg = msg.unwrap_or_else(|| code.to_string());
        match code.extended_code {
          ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
            Error::UniqueViolation(msg)
          }
          ffi::SQLITE_CONSTRAINT_FOREIGNKEY => Error::ForeignKeyViolation(msg),
          // `ON DELETE RESTRICT` fires through SQLite's internal FK trigger.
          ffi::SQLITE_CONSTRAINT_TRIGGER if msg.starts_with("FOREIGN KEY") => {
            Error::ForeignKeyViolation(msg)
          }
          _ => Error::Constraint(msg),
        }
      }
      other => Error::Database(other),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
