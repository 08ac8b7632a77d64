//! Validated settings

use crate::schema::RawConfig;
use std::path::PathBuf;
use std::time::Duration;

/// Request timeout used when the config does not set one
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Validated settings ready for use by the commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Resource manager base URL without a trailing slash
    pub base_url: String,

    /// State file location
    pub state_path: PathBuf,

    /// Retention horizon for the application history
    pub keep_history: Duration,

    /// Upper bound on the resource manager request
    pub request_timeout: Duration,
}

impl Settings {
    /// Convert from raw config (after validation)
    pub fn from_raw(raw: RawConfig) -> Self {
        let global = raw.global;

        let base_url = global
            .baseurl
            .unwrap_or_default()
            .trim_end_matches('/')
            .to_string();

        let state_path = global
            .state_filename
            .unwrap_or_else(yarnstats_util::default_state_path);

        let request_timeout = global
            .request_timeout_seconds
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT);

        Self {
            base_url,
            state_path,
            keep_history: Duration::from_secs(global.keep_history.unwrap_or_default()),
            request_timeout,
        }
    }

    /// Epoch seconds before which finished applications are forgotten
    pub fn horizon_at(&self, now_secs: i64) -> i64 {
        let keep = i64::try_from(self.keep_history.as_secs()).unwrap_or(i64::MAX);
        now_secs.saturating_sub(keep)
    }
}
