//! SQLite backend for the zoo records store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on the connection's
//! own thread without blocking the async runtime.

mod encode;
mod record;
mod schema;
mod store;

pub mod credentials;
pub mod error;

pub use credentials::CredentialHasher;
pub use error::{Error, Result};
pub use schema::SCHEMA_VERSION;
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
