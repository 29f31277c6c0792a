use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Multi-line human readable output.
    Pretty,
    /// One line per event.
    Compact,
    /// Newline-delimited JSON.
    Json,
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// JSON simulation config. Flags below override its fields.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Seed for the random source (first seed when `--runs` > 1).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of blocks to simulate.
    #[arg(long, value_name = "N")]
    pub blocks: Option<u64>,

    /// Operations invoked per block.
    #[arg(long, value_name = "N")]
    pub block_size: Option<u64>,

    /// Number of simulation accounts.
    #[arg(long, value_name = "N")]
    pub accounts: Option<usize>,

    /// Run N independent simulations in parallel with seeds seed..seed+N.
    #[arg(long, value_name = "N", default_value_t = 1)]
    pub runs: u64,

    /// Stop a run at its first failed operation.
    #[arg(long, default_value_t = false)]
    pub fail_fast: bool,

    /// Write the JSON report to a file instead of stdout.
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Write the final ledger state as a JSON snapshot. Only valid with a single run.
    #[arg(long, value_name = "PATH")]
    pub state_out: Option<PathBuf>,

    /// Log output format (logs go to stderr; filter with RUST_LOG).
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}
