//! Simulation run configuration.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::simulation::{GenesisConfig, OperationWeights};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed for the single random source driving the run.
    pub seed: u64,
    pub num_blocks: u64,
    /// Operations invoked per block.
    pub block_size: u64,
    /// Logical seconds between blocks.
    pub block_time_step_secs: u64,
    pub chain_id: String,
    pub num_accounts: usize,
    pub genesis: GenesisConfig,
    pub weights: OperationWeights,
    /// Stop at the first failed operation.
    pub fail_fast: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            num_blocks: 50,
            block_size: 20,
            block_time_step_secs: 5,
            chain_id: "nft-sim-1".to_string(),
            num_accounts: 10,
            genesis: GenesisConfig::default(),
            weights: OperationWeights::default(),
            fail_fast: false,
        }
    }
}

impl SimulationConfig {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let config: SimulationConfig = serde_json::from_str(&raw)
            .with_context(|| format!("parse config {}", path.display()))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.chain_id.trim().is_empty() {
            bail!("chain_id must not be empty");
        }
        if self.num_accounts == 0 {
            bail!("num_accounts must be at least 1");
        }
        if self.weights.total() == 0 {
            bail!("at least one operation weight must be non-zero");
        }
        let g = &self.genesis;
        if g.min_balance > g.max_balance {
            bail!(
                "genesis.min_balance ({}) exceeds genesis.max_balance ({})",
                g.min_balance,
                g.max_balance
            );
        }
        for (name, p) in [
            ("zero_balance_probability", g.zero_balance_probability),
            ("vesting_probability", g.vesting_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                bail!("genesis.{} must be within [0, 1], got {}", name, p);
            }
        }
        if g.genesis_time.checked_add(g.vesting_duration_secs).is_none() {
            bail!(
                "genesis.genesis_time ({}) + genesis.vesting_duration_secs ({}) overflows",
                g.genesis_time,
                g.vesting_duration_secs
            );
        }
        if g.fee_denom.trim().is_empty() {
            bail!("genesis.fee_denom must not be empty");
        }
        Ok(())
    }
}
