//! Resource manager REST client for yarnstats
//!
//! This crate provides:
//! - The `ResourceManager` trait the commands are written against
//! - A reqwest-based client for the cluster REST API
//! - Strict extraction of the application list from a cluster-apps reply
//! - Flattening of arbitrary REST resources into dotted item keys
//! - A mock resource manager for tests

mod client;
mod flatten;
mod mock;
mod shape;
mod traits;

pub use client::*;
pub use flatten::*;
pub use mock::*;
pub use shape::*;
pub use traits::*;

use thiserror::Error;

/// Ways the resource manager can fail to deliver.
///
/// Every variant is fatal for the invocation that hit it.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Empty response from {0}")]
    EmptyBody(String),

    #[error("Response is not valid JSON: {0}")]
    MalformedJson(String),

    #[error("Unexpected response structure: {0}")]
    UnexpectedShape(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(e: reqwest::Error) -> Self {
        SourceError::Transport(e.to_string())
    }
}

pub type SourceResult<T> = Result<T, SourceError>;
