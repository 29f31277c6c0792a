//! Command-line driver: config loading, logging setup and report output.

use std::fs;
use std::io::{self, Write};

use anyhow::{anyhow, bail, Context, Result};
use nft_sim_core::runner::{run_many, SimulationConfig, SimulationRunner};
use tracing::info;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::args::{Args, LogFormat};

/// Initialize tracing/logging on stderr.
pub fn init_tracing(format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .context("Failed to parse log filter")?;

    let registry = tracing_subscriber::registry().with(filter);
    let result = match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(io::stderr))
            .try_init(),
        LogFormat::Compact => registry
            .with(fmt::layer().compact().with_writer(io::stderr))
            .try_init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().pretty().with_writer(io::stderr))
            .try_init(),
    };
    result.map_err(|e| anyhow!("Failed to initialize tracing: {}", e))
}

/// Resolve the effective config: file (or defaults), then flag overrides.
pub fn build_config(args: &Args) -> Result<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::from_json_file(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(blocks) = args.blocks {
        config.num_blocks = blocks;
    }
    if let Some(block_size) = args.block_size {
        config.block_size = block_size;
    }
    if let Some(accounts) = args.accounts {
        config.num_accounts = accounts;
    }
    if args.fail_fast {
        config.fail_fast = true;
    }
    config.validate().context("invalid simulation config")?;
    Ok(config)
}

pub fn run(args: &Args) -> Result<()> {
    if args.runs == 0 {
        bail!("--runs must be at least 1");
    }
    if args.runs > 1 && args.state_out.is_some() {
        bail!("--state-out is only valid with a single run");
    }
    let config = build_config(args)?;

    let json = if args.runs == 1 {
        let run = SimulationRunner::new(config)?.run()?;
        if let Some(path) = &args.state_out {
            run.ledger.snapshot().save_json(path)?;
            info!(path = %path.display(), "wrote ledger snapshot");
        }
        serde_json::to_string_pretty(&run.report).context("serialize report")?
    } else {
        let seeds: Vec<u64> = (0..args.runs)
            .map(|i| config.seed.wrapping_add(i))
            .collect();
        let reports = run_many(&config, &seeds)?;
        serde_json::to_string_pretty(&reports).context("serialize reports")?
    };

    match &args.report {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("write report to {}", path.display()))?;
            info!(path = %path.display(), "wrote report");
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", json).context("write report to stdout")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"seed": 1, "num_blocks": 9, "num_accounts": 3}"#).unwrap();

        let args = Args::parse_from([
            "nft-sim",
            "--config",
            path.to_str().unwrap(),
            "--seed",
            "5",
            "--fail-fast",
        ]);
        let config = build_config(&args).unwrap();
        assert_eq!(config.seed, 5);
        assert_eq!(config.num_blocks, 9);
        assert_eq!(config.num_accounts, 3);
        assert!(config.fail_fast);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let args = Args::parse_from(["nft-sim", "--accounts", "0"]);
        assert!(build_config(&args).is_err());
    }

    #[test]
    fn test_state_out_needs_single_run() {
        let args = Args::parse_from(["nft-sim", "--runs", "2", "--state-out", "x.json"]);
        let err = run(&args).unwrap_err();
        assert!(err.to_string().contains("--state-out"));
    }
}
