//! Check a yarnstats config file before pointing the poll job at it.
//!
//! Exit status: 0 valid, 1 invalid or unreadable, 2 usage error.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use yarnstats_config::{CURRENT_CONFIG_VERSION, ConfigError, Settings, load_config};
use yarnstats_util::default_config_path;

fn usage() -> ExitCode {
    eprintln!("Usage: validate-config [--default | <config-file>]");
    eprintln!();
    eprintln!("  --default   check {}", default_config_path().display());
    ExitCode::from(2)
}

fn report_valid(path: &Path, settings: &Settings) {
    println!("{}: OK", path.display());
    println!("  baseurl          {}", settings.base_url);
    println!("  state file       {}", settings.state_path.display());
    println!("  keep_history     {}s", settings.keep_history.as_secs());
    println!("  request timeout  {}s", settings.request_timeout.as_secs());
}

fn report_invalid(path: &Path, err: &ConfigError) {
    eprintln!("{}: INVALID", path.display());
    match err {
        ConfigError::ValidationFailed { errors } => {
            for error in errors {
                eprintln!("  {}", error);
            }
        }
        ConfigError::UnsupportedVersion(found) => {
            eprintln!("  config_version = {} (this build reads {})", found, CURRENT_CONFIG_VERSION);
        }
        other => eprintln!("  {}", other),
    }
}

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);

    let path = match (args.next(), args.next()) {
        (Some(flag), None) if flag == "--default" => default_config_path(),
        (Some(path), None) if !path.starts_with('-') => PathBuf::from(path),
        _ => return usage(),
    };

    match load_config(&path) {
        Ok(settings) => {
            report_valid(&path, &settings);
            ExitCode::SUCCESS
        }
        Err(e) => {
            report_invalid(&path, &e);
            ExitCode::from(1)
        }
    }
}
