//! Shared types for yarnstats
//!
//! This crate defines the vocabulary shared between the resource-manager
//! client, the statistics core and the command-line front end:
//! - Application records as reported by the resource manager
//! - The fixed set of per-queue counter buckets
//! - Key names of the persisted state tree
//! - Sentinel tokens understood by the monitoring agent

mod buckets;
mod keys;
mod types;

pub use buckets::*;
pub use keys::*;
pub use types::*;
