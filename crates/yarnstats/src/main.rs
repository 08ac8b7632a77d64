//! yarnappstats - per-queue application statistics for a monitoring agent
//!
//! Three modes:
//! - `poll`: fetch completed applications from the resource manager, fold
//!   them into the saved statistics and write the state file back
//! - `print <path...>`: print one scalar from the state tree, or the
//!   unsupported sentinel
//! - `dump <path...>`: pretty-print any node of the state tree
//!
//! Invocations must not overlap; run `poll` from a single scheduled job.

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use yarnstats::{DUMP_HEADER, EXIT_UNSUPPORTED, QueryOutcome, init_logging, run_dump, run_poll, run_print};
use yarnstats_api::UNSUPPORTED_SENTINEL;
use yarnstats_config::{Settings, load_config};
use yarnstats_rm::RmClient;
use yarnstats_store::JsonFileStore;
use yarnstats_util::{default_config_path, now_epoch_secs};

/// yarnappstats - resource manager application statistics
#[derive(Parser, Debug)]
#[command(name = "yarnappstats")]
#[command(about = "Per-queue application statistics from the resource manager REST API", long_about = None)]
struct Args {
    /// Configuration file path (default: ~/.config/yarnstats/config.toml)
    #[arg(short, long, default_value_os_t = default_config_path())]
    config: PathBuf,

    /// State file override (or set YARNSTATS_STATE_FILE env var)
    #[arg(short, long, env = "YARNSTATS_STATE_FILE")]
    state_file: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch completed applications and update the statistics
    Poll,

    /// Print one value for the monitoring agent
    Print {
        /// Keys leading from the root of the state tree to the value
        #[arg(allow_hyphen_values = true, trailing_var_arg = true)]
        path: Vec<String>,
    },

    /// Pretty-print any part of the state tree
    Dump {
        /// Keys leading from the root of the state tree to the node
        #[arg(allow_hyphen_values = true, trailing_var_arg = true)]
        path: Vec<String>,
    },
}

fn load_settings(args: &Args) -> Result<Settings> {
    let mut settings = load_config(&args.config)
        .with_context(|| format!("Failed to load config from {:?}", args.config))?;

    if let Some(state_file) = &args.state_file {
        settings.state_path = state_file.clone();
    }

    Ok(settings)
}

async fn poll(settings: &Settings) -> Result<()> {
    let rm = RmClient::new(settings.base_url.clone(), settings.request_timeout)
        .context("Failed to build HTTP client")?;
    let store = JsonFileStore::new(&settings.state_path);

    let now = now_epoch_secs();
    let summary = run_poll(&rm, &store, settings.horizon_at(now), now).await?;

    info!(
        added = summary.promoted,
        removed = summary.removed,
        state = %settings.state_path.display(),
        "Poll complete"
    );
    Ok(())
}

fn print(settings: Result<Settings>, path: &[String]) -> ExitCode {
    let outcome = match settings {
        Ok(settings) => run_print(&JsonFileStore::new(&settings.state_path), path, now_epoch_secs()),
        Err(e) => {
            error!(error = %format!("{e:#}"), "Cannot answer query");
            QueryOutcome::Unsupported
        }
    };

    match outcome {
        QueryOutcome::Value(value) => {
            println!("{}", value);
            ExitCode::SUCCESS
        }
        QueryOutcome::Unsupported => {
            println!("{}", UNSUPPORTED_SENTINEL);
            ExitCode::from(EXIT_UNSUPPORTED)
        }
    }
}

fn dump(settings: &Settings, path: &[String]) -> Result<()> {
    let store = JsonFileStore::new(&settings.state_path);
    let text = run_dump(&store, path, now_epoch_secs())?;

    println!("{}", DUMP_HEADER);
    println!("{}", text);
    Ok(())
}

/// A `print` command line that cannot be parsed still answers with the
/// sentinel; everything else gets clap's usual report.
fn parse_failure(e: clap::Error) -> ExitCode {
    let is_print = std::env::args_os().skip(1).any(|arg| arg.to_str() == Some("print"));
    let informational = matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion);

    if !is_print || informational {
        e.exit();
    }

    let _ = e.print();
    println!("{}", UNSUPPORTED_SENTINEL);
    ExitCode::from(EXIT_UNSUPPORTED)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => return parse_failure(e),
    };
    init_logging(&args.log_level);

    let settings = load_settings(&args);

    let result = match &args.command {
        Command::Print { path } => return print(settings, path),
        Command::Poll => match settings {
            Ok(settings) => poll(&settings).await,
            Err(e) => Err(e),
        },
        Command::Dump { path } => settings.and_then(|settings| dump(&settings, path)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %format!("{e:#}"), "Command failed");
            ExitCode::FAILURE
        }
    }
}
