//! staffkit - validate user fields and fetch sorted employee records
//!
//! # Commands
//!
//! - `check <KIND> <VALUE>` - validate a username, email, phone or national ID
//! - `fetch` - fetch the employee records and print them sorted by `id`
//!
//! Logging goes to stderr through `env_logger`; set `RUST_LOG=debug` for detail.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use staffkit::{FieldKind, RecordRepository, RecordSource, RepositoryConfig};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

/// Environment variable consulted for the endpoint when `--url` is absent
const ENDPOINT_ENV: &str = "STAFFKIT_ENDPOINT";

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a value against a field format
    Check {
        /// username, email, phone or national-id
        kind: FieldKind,
        value: String,
    },
    /// Fetch employee records sorted by id
    Fetch {
        /// Endpoint URL (overrides STAFFKIT_ENDPOINT and the config file)
        #[arg(short, long)]
        url: Option<String>,

        /// Request timeout in seconds
        #[arg(short, long)]
        timeout: Option<u64>,

        /// Config file to read instead of the default location
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    match args.command {
        Command::Check { kind, value } => {
            let valid = kind.validate(Some(&value));
            println!("{}", if valid { "valid" } else { "invalid" });
            Ok(if valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Fetch {
            url,
            timeout,
            config,
        } => {
            let repository = build_repository(url, timeout, config)?;
            print_records(&repository).await
        }
    }
}

fn build_repository(
    url: Option<String>,
    timeout: Option<u64>,
    config_path: Option<PathBuf>,
) -> Result<RecordRepository> {
    let mut config = match config_path {
        Some(path) => RepositoryConfig::load_from(&path)?,
        None => RepositoryConfig::load()?,
    };

    if let Some(endpoint) = url.or_else(|| env::var(ENDPOINT_ENV).ok()) {
        config.endpoint = Some(endpoint);
    }
    if let Some(secs) = timeout {
        config.timeout_secs = secs;
    }

    log::debug!(
        "Using endpoint {:?} with a {:?} timeout",
        config.endpoint,
        Duration::from_secs(config.timeout_secs)
    );

    RecordRepository::from_config(&config)
        .with_context(|| format!("Pass --url or set {}", ENDPOINT_ENV))
}

async fn print_records(source: &dyn RecordSource) -> Result<ExitCode> {
    match source.fetch_sorted().await {
        Some(records) => {
            println!("{}", serde_json::to_string_pretty(&records)?);
            Ok(ExitCode::SUCCESS)
        }
        None => {
            eprintln!("no result");
            Ok(ExitCode::FAILURE)
        }
    }
}
