//! Error types for the statistics core

use thiserror::Error;
use yarnstats_api::RecordError;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid record: {0}")]
    InvalidRecord(#[from] RecordError),

    #[error("Invalid path: no node '{segment}' at depth {depth}")]
    InvalidPath { segment: String, depth: usize },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Variable '{key}' does not hold an integer: {value:?}")]
    NotAnInteger { key: String, value: String },
}

impl CoreError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
