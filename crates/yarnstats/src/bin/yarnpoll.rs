//! yarnpoll - look up one item of a resource manager REST resource
//!
//! Intended as a monitoring-agent user parameter:
//!
//! ```bash
//! yarnpoll cluster/metrics yarn.clusterMetrics.appsCompleted
//! yarnpoll cluster/metrics -a     # list every available item key
//! ```
//!
//! Without `-d`, every failure prints the not-supported sentinel so the agent
//! only ever sees a value or the sentinel.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use yarnstats::{EXIT_UNSUPPORTED, fetch_items, find_item, init_logging};
use yarnstats_api::NOT_SUPPORTED_SENTINEL;
use yarnstats_config::{DEFAULT_REQUEST_TIMEOUT, check_base_url, load_config};
use yarnstats_rm::{RmClient, item_text};
use yarnstats_util::default_config_path;

/// yarnpoll - single REST item lookup
#[derive(Parser, Debug)]
#[command(name = "yarnpoll")]
#[command(about = "Print one item of a resource manager REST resource", long_about = None)]
struct Args {
    /// Resource below /ws/v1/, e.g. cluster/metrics
    resource_path: Option<String>,

    /// Flattened item key, e.g. yarn.clusterMetrics.appsFailed
    item_key: Option<String>,

    /// Print diagnostics instead of the sentinel on failure
    #[arg(short, long)]
    debug: bool,

    /// List every available item key (implies --debug)
    #[arg(short = 'a', long = "all")]
    all: bool,

    /// Resource manager base URL (default: taken from the config file)
    #[arg(long, env = "YARNSTATS_BASEURL")]
    baseurl: Option<String>,

    /// Configuration file path (default: ~/.config/yarnstats/config.toml)
    #[arg(short, long, default_value_os_t = default_config_path())]
    config: PathBuf,
}

fn client(args: &Args) -> Result<RmClient> {
    let (base_url, timeout) = match &args.baseurl {
        Some(url) => {
            if let Err(message) = check_base_url(url) {
                bail!("Invalid base URL '{}': {}", url, message);
            }
            (url.clone(), DEFAULT_REQUEST_TIMEOUT)
        }
        None => {
            let settings = load_config(&args.config)
                .with_context(|| format!("Failed to load config from {:?}", args.config))?;
            (settings.base_url, settings.request_timeout)
        }
    };

    RmClient::new(base_url, timeout).context("Failed to build HTTP client")
}

/// Returns what to print on success
async fn run(args: &Args) -> Result<String> {
    let Some(resource_path) = &args.resource_path else {
        bail!("Missing <resourcepath> argument");
    };
    if args.item_key.is_none() && !args.all {
        bail!("Missing <itemkey> argument");
    }

    let rm = client(args)?;
    let items = fetch_items(&rm, resource_path)
        .await
        .with_context(|| format!("Failed to query {}", rm.resource_url(resource_path)))?;

    if args.all {
        let listing: Vec<String> = items
            .iter()
            .map(|(key, value)| format!("{} : {}", key, item_text(value)))
            .collect();
        return Ok(listing.join("\n"));
    }

    let item_key = args.item_key.as_deref().unwrap_or_default();
    match find_item(&items, item_key) {
        Some(value) => Ok(value),
        None => bail!("Item key not found: {}", item_key),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    let debug = args.debug || args.all;
    init_logging(if debug { "debug" } else { "off" });

    match run(&args).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            if debug {
                println!("{:#}", e);
            } else {
                println!("{}", NOT_SUPPORTED_SENTINEL);
            }
            ExitCode::from(EXIT_UNSUPPORTED)
        }
    }
}
