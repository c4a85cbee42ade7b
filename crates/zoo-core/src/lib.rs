//! Core types and trait definitions for the zoo records store.
//!
//! This crate is deliberately free of database dependencies. Storage backends
//! implement [`store::ZooStore`]; consumers depend on the trait.

pub mod account;
pub mod animal;
pub mod error;
pub mod geo;
pub mod id;
pub mod money;
pub mod report;
pub mod species;
pub mod store;
pub mod zoo;

pub use error::{Error, Result};
