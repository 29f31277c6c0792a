//! NFT Sim Core
//!
//! Randomized operation generation for an NFT ledger.
//!
//! This crate produces valid, randomized NFT requests (mint, burn, transfer,
//! edit metadata) against a live ledger, submits them as signed transactions
//! and classifies what happened. It is meant to be driven by a larger
//! simulation loop that calls each operation many times with a seeded random
//! source.
//!
//! # Features
//!
//! - **State sampling**: Pick existing NFTs and accounts from the ledger
//! - **Fee resolution**: Random fees bounded by the actor's spendable balance
//! - **Submission**: Sign and deliver one request per transaction
//! - **Reference ledger**: In-memory ledger with ante checks and JSON snapshots
//! - **Runner**: Multi-block weighted simulation with a JSON report
//!
//! # Core Modules
//!
//! - [`simulation`]: Operation pipeline, ledger contract and reference ledger
//! - [`runner`]: Multi-block loop, run configuration and reports
//!
//! # Example
//!
//! ```
//! use nft_sim_core::runner::{SimulationConfig, SimulationRunner};
//!
//! let config = SimulationConfig {
//!     num_blocks: 2,
//!     block_size: 5,
//!     ..Default::default()
//! };
//! let run = SimulationRunner::new(config)?.run()?;
//! assert_eq!(run.report.operations, 10);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod runner;
pub mod simulation;
