//! Raw configuration schema (as parsed from TOML)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration as parsed from TOML
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawConfig {
    /// Config schema version
    pub config_version: u32,

    /// Settings shared by every command
    #[serde(default)]
    pub global: RawGlobalConfig,
}

/// The `[global]` table
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawGlobalConfig {
    /// Resource manager base URL, e.g. `http://rm.example.com:8088`
    pub baseurl: Option<String>,

    /// Where the accumulated state is kept (default: data dir)
    pub state_filename: Option<PathBuf>,

    /// How long finished applications stay in the history, in seconds
    pub keep_history: Option<u64>,

    /// Upper bound on the resource manager request, in seconds
    pub request_timeout_seconds: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_global_table() {
        let toml_str = r#"
            config_version = 1

            [global]
            baseurl = "http://localhost:8088"
            state_filename = "/var/lib/yarnstats/state.json"
            keep_history = 86400
        "#;

        let config: RawConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.global.baseurl.as_deref(), Some("http://localhost:8088"));
        assert_eq!(config.global.keep_history, Some(86400));
        assert!(config.global.request_timeout_seconds.is_none());
    }

    #[test]
    fn parse_without_global_table() {
        let config: RawConfig = toml::from_str("config_version = 1").unwrap();
        assert!(config.global.baseurl.is_none());
        assert!(config.global.state_filename.is_none());
    }
}
