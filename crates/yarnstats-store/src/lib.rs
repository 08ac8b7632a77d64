//! Persistence layer for yarnstats
//!
//! Provides:
//! - The `StateStore` trait
//! - A JSON state file with atomic replacement on save
//! - An in-memory store for tests
//! - Section-by-section decoding, so one damaged section does not discard
//!   the others

mod json_file;
mod memory;
mod sections;
mod traits;

pub use json_file::*;
pub use memory::*;
pub use sections::*;
pub use traits::*;

use std::path::PathBuf;
use thiserror::Error;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("State file not found: {0}")]
    Missing(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed state: {0}")]
    Malformed(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    /// Whether the error means "no state yet" rather than "bad state"
    pub fn is_missing(&self) -> bool {
        matches!(self, StoreError::Missing(_))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
