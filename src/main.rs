//! Seeded NFT operation simulator.
//!
//! **Modes**
//! - Single run: `nft-sim --seed 7 --blocks 100 [--state-out state.json]`
//! - Multi-seed: `nft-sim --seed 7 --runs 8` runs seeds 7..15 in parallel and
//!   prints one report per seed.
//!
//! Reports are JSON on stdout (or `--report`); logs go to stderr.
use anyhow::Result;
use clap::Parser;

use nft_sim::args::Args;
use nft_sim::cli;

fn main() -> Result<()> {
    let args = Args::parse();
    cli::init_tracing(args.log_format)?;
    cli::run(&args)
}
