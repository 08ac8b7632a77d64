//! Statistics core for yarnstats
//!
//! This crate provides:
//! - The ordered rule table that classifies an application outcome
//! - Per-queue outcome counters
//! - The deduplicating application history ledger
//! - Scalar variables kept between invocations
//! - The state container and the query navigator over its tree
//! - The poll engine tying them together

mod classifier;
mod engine;
mod error;
mod history;
mod local_vars;
mod query;
mod queues;
mod state;

pub use classifier::*;
pub use engine::*;
pub use error::*;
pub use history::*;
pub use local_vars::*;
pub use query::*;
pub use queues::*;
pub use state::*;
