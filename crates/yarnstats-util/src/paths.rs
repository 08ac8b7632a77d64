//! Default paths for yarnstats components
//!
//! Paths are user-writable by default (no root required):
//! - Config: `$XDG_CONFIG_HOME/yarnstats/config.toml` or `~/.config/yarnstats/config.toml`
//! - State: `$XDG_DATA_HOME/yarnstats/state.json` or `~/.local/share/yarnstats/state.json`

use std::path::PathBuf;

/// Environment variable for overriding the config file path
pub const YARNSTATS_CONFIG_ENV: &str = "YARNSTATS_CONFIG";

/// Environment variable for overriding the data directory
pub const YARNSTATS_DATA_DIR_ENV: &str = "YARNSTATS_DATA_DIR";

/// Application subdirectory name
const APP_DIR: &str = "yarnstats";

const CONFIG_FILENAME: &str = "config.toml";
const STATE_FILENAME: &str = "state.json";

/// Get the default config file path.
///
/// Order of precedence:
/// 1. `$YARNSTATS_CONFIG` environment variable (if set)
/// 2. `$XDG_CONFIG_HOME/yarnstats/config.toml` (if XDG_CONFIG_HOME is set)
/// 3. `~/.config/yarnstats/config.toml` (fallback)
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(YARNSTATS_CONFIG_ENV) {
        return PathBuf::from(path);
    }

    config_dir_without_env().join(CONFIG_FILENAME)
}

fn config_dir_without_env() -> PathBuf {
    xdg_dir("XDG_CONFIG_HOME", &[".config"]).unwrap_or_else(|| PathBuf::from("/etc").join(APP_DIR))
}

/// `$<xdg_var>/yarnstats`, else `$HOME/<home_relative...>/yarnstats`
fn xdg_dir(xdg_var: &str, home_relative: &[&str]) -> Option<PathBuf> {
    if let Some(base) = std::env::var_os(xdg_var).filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(base).join(APP_DIR));
    }

    let home = std::env::var_os("HOME").filter(|v| !v.is_empty())?;
    let mut dir = PathBuf::from(home);
    dir.extend(home_relative);
    Some(dir.join(APP_DIR))
}

/// Get the default data directory.
///
/// Order of precedence:
/// 1. `$YARNSTATS_DATA_DIR` environment variable (if set)
/// 2. `$XDG_DATA_HOME/yarnstats` (if XDG_DATA_HOME is set)
/// 3. `~/.local/share/yarnstats` (fallback)
pub fn default_data_dir() -> PathBuf {
    if let Ok(path) = std::env::var(YARNSTATS_DATA_DIR_ENV) {
        return PathBuf::from(path);
    }

    data_dir_without_env()
}

/// Get the data directory without checking YARNSTATS_DATA_DIR env var.
pub fn data_dir_without_env() -> PathBuf {
    xdg_dir("XDG_DATA_HOME", &[".local", "share"])
        .unwrap_or_else(|| std::env::temp_dir().join(APP_DIR))
}

/// Get the default state file path inside the data directory.
pub fn default_state_path() -> PathBuf {
    default_data_dir().join(STATE_FILENAME)
}
