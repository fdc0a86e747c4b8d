//! Write a batch of files concurrently, then empty the output directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use fanout::config::{ConfigOverrides, apply_overrides, load_config};
use fanout::{logging, run};
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "fanout",
    version,
    about = "Write files concurrently with injected failures, then flush them"
)]
struct Cli {
    /// TOML config file. Missing file means defaults.
    #[arg(short, long, default_value = "fanout.toml")]
    config: PathBuf,

    /// Parent of the `out` directory (defaults to the working directory).
    #[arg(long)]
    base_dir: Option<PathBuf>,

    /// Number of concurrent write tasks.
    #[arg(long)]
    count: Option<usize>,

    /// Chance in [0, 1] that a completed write reports a simulated failure.
    #[arg(long)]
    failure_probability: Option<f64>,

    /// Also write a debug log file per run into this directory.
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            base_dir: self.base_dir.clone(),
            count: self.count,
            failure_probability: self.failure_probability,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(err) = execute().await {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

async fn execute() -> Result<()> {
    let cli = Cli::parse();
    let log_path = logging::init(cli.log_dir.as_deref())?;
    if let Some(path) = &log_path {
        debug!(path = %path.display(), "logging to file");
    }

    let config = load_config(&cli.config)?;
    let config = apply_overrides(config, &cli.overrides())?;
    debug!(?config, "config loaded");

    run::run(&config).await.context("file operations")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_defaults() {
        let cli = Cli::parse_from(["fanout"]);
        assert_eq!(cli.config, PathBuf::from("fanout.toml"));
        assert!(cli.base_dir.is_none());
        assert!(cli.count.is_none());
        assert!(cli.failure_probability.is_none());
        assert!(cli.log_dir.is_none());
    }

    #[test]
    fn parse_overrides() {
        let cli = Cli::parse_from([
            "fanout",
            "--base-dir",
            "/tmp/x",
            "--count",
            "4",
            "--failure-probability",
            "1.0",
        ]);
        let overrides = cli.overrides();
        assert_eq!(overrides.base_dir, Some(PathBuf::from("/tmp/x")));
        assert_eq!(overrides.count, Some(4));
        assert_eq!(overrides.failure_probability, Some(1.0));
    }

    #[test]
    fn rejects_non_numeric_count() {
        assert!(Cli::try_parse_from(["fanout", "--count", "many"]).is_err());
    }
}
