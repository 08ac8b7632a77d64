//! Shared utilities for yarnstats
//!
//! This crate provides:
//! - Wall-clock helpers (mockable "now", epoch seconds)
//! - Default paths for the config file and the state file

mod paths;
mod time;

pub use paths::*;
pub use time::*;
