//! Multi-block simulation loop.
//!
//! Seeds one `StdRng`, builds accounts and a random genesis from it, then
//! invokes weighted operations block by block, advancing logical time between
//! blocks. Invocations are serialized, so each one sees the effects of the one
//! before it.

pub mod config;
pub mod report;

use std::time::Instant;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::simulation::{
    random_accounts, random_genesis, select_operation, weighted_operations, InMemoryLedger,
    SimAccount,
};

pub use config::SimulationConfig;
pub use report::{FailureGroup, InterestingCase, KindSummary, SimulationReport};

use report::{ReportBuilder, RunMeta};

/// Report plus the final ledger and accounts of a finished run.
pub struct SimulationRun {
    pub report: SimulationReport,
    pub ledger: InMemoryLedger,
    pub accounts: Vec<SimAccount>,
}

pub struct SimulationRunner {
    config: SimulationConfig,
}

impl SimulationRunner {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate().context("invalid simulation config")?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn run(&self) -> Result<SimulationRun> {
        let config = &self.config;
        let run_id = uuid::Uuid::new_v4().to_string();
        let started_at = chrono::Utc::now().to_rfc3339();
        let start = Instant::now();

        info!(
            run_id = %run_id,
            seed = config.seed,
            blocks = config.num_blocks,
            block_size = config.block_size,
            "starting simulation"
        );

        let mut rng = StdRng::seed_from_u64(config.seed);
        let accounts = random_accounts(&mut rng, config.num_accounts);
        let mut ledger = random_genesis(&mut rng, &accounts, &config.chain_id, &config.genesis);
        let ops = weighted_operations(&config.weights);

        let mut builder = ReportBuilder::new();
        let mut completed_blocks = 0u64;
        let mut halted = false;

        'blocks: for block in 0..config.num_blocks {
            ledger.advance_block_time(config.block_time_step_secs);
            for step in 0..config.block_size {
                let Some(kind) = select_operation(&mut rng, &ops) else {
                    break 'blocks;
                };
                let outcome = kind.invoke(&mut rng, &mut ledger, &accounts, &config.chain_id);
                builder.record(block, step, kind, &outcome);

                if config.fail_fast {
                    if let Some(error) = outcome.error() {
                        info!(block, step, op = kind.name(), error = %error, "halting on failure");
                        halted = true;
                        break 'blocks;
                    }
                }
            }
            completed_blocks = block + 1;
            debug!(block, nfts = ledger.total_supply(), "block complete");
        }

        let report = builder.finish(RunMeta {
            run_id,
            seed: config.seed,
            chain_id: config.chain_id.clone(),
            started_at,
            elapsed_ms: start.elapsed().as_millis() as u64,
            total_blocks: config.num_blocks,
            completed_blocks,
            halted,
            final_nft_supply: ledger.total_supply(),
        });

        info!(
            run_id = %report.run_id,
            ok = report.total_ok(),
            noop = report.total_noop(),
            failed = report.total_failed(),
            elapsed_ms = report.elapsed_ms,
            "simulation finished"
        );

        Ok(SimulationRun {
            report,
            ledger,
            accounts,
        })
    }
}

/// Run one independent simulation per seed, in parallel.
///
/// Each run owns its ledger; reports come back in `seeds` order.
pub fn run_many(config: &SimulationConfig, seeds: &[u64]) -> Result<Vec<SimulationReport>> {
    config.validate().context("invalid simulation config")?;
    seeds
        .par_iter()
        .map(|seed| {
            let runner = SimulationRunner::new(SimulationConfig {
                seed: *seed,
                ..config.clone()
            })?;
            runner
                .run()
                .map(|run| run.report)
                .with_context(|| format!("simulation with seed {} failed", seed))
        })
        .collect()
}
