//! Random initial ledger state.

use nft_sim_types::{Coins, DEFAULT_DENOM};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::account::{random_acc, SimAccount};
use super::ledger::{InMemoryLedger, VestingLock};
use super::rand_util::{rand_string_of_length, DENOM_LENGTH, NFT_ID_LENGTH, TOKEN_URI_LENGTH};

/// Default genesis time (2024-01-01 00:00:00 UTC).
pub const DEFAULT_GENESIS_TIME: u64 = 1_704_067_200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenesisConfig {
    /// Denomination of every account balance.
    pub fee_denom: String,
    /// Inclusive balance range for funded accounts.
    pub min_balance: u64,
    pub max_balance: u64,
    /// Chance an account starts with nothing.
    pub zero_balance_probability: f64,
    /// Chance part of a balance is locked by vesting.
    pub vesting_probability: f64,
    pub vesting_duration_secs: u64,
    /// NFTs minted at genesis.
    pub initial_nfts: usize,
    /// Distinct collections those NFTs are spread over.
    pub denom_pool_size: usize,
    pub genesis_time: u64,
}

impl Default for GenesisConfig {
    fn default() -> Self {
        Self {
            fee_denom: DEFAULT_DENOM.to_string(),
            min_balance: 1_000,
            max_balance: 1_000_000,
            zero_balance_probability: 0.05,
            vesting_probability: 0.1,
            vesting_duration_secs: 3_600,
            initial_nfts: 20,
            denom_pool_size: 3,
            genesis_time: DEFAULT_GENESIS_TIME,
        }
    }
}

fn chance<R: Rng + ?Sized>(rng: &mut R, p: f64) -> bool {
    rng.gen_bool(p.clamp(0.0, 1.0))
}

/// Build a ledger holding `accounts` and a random NFT population.
pub fn random_genesis<R: Rng + ?Sized>(
    rng: &mut R,
    accounts: &[SimAccount],
    chain_id: &str,
    config: &GenesisConfig,
) -> InMemoryLedger {
    let mut ledger = InMemoryLedger::new(chain_id, config.genesis_time);

    for account in accounts {
        if chance(rng, config.zero_balance_probability) {
            ledger.add_account(account.address, Coins::empty());
            continue;
        }
        let balance = if config.max_balance <= config.min_balance {
            config.min_balance
        } else {
            rng.gen_range(config.min_balance..=config.max_balance)
        };
        let vesting = if balance > 0 && chance(rng, config.vesting_probability) {
            Some(VestingLock {
                locked: Coins::single(config.fee_denom.clone(), rng.gen_range(1..=balance)),
                end_time: config
                    .genesis_time
                    .saturating_add(config.vesting_duration_secs),
            })
        } else {
            None
        };
        ledger.add_account_with_vesting(
            account.address,
            Coins::single(config.fee_denom.clone(), balance),
            vesting,
        );
    }

    let denoms: Vec<String> = (0..config.denom_pool_size.max(1))
        .map(|_| rand_string_of_length(rng, DENOM_LENGTH))
        .collect();
    let mut minted = 0usize;
    for _ in 0..config.initial_nfts {
        let Some((owner, _)) = random_acc(rng, accounts) else {
            break;
        };
        let denom = &denoms[rng.gen_range(0..denoms.len())];
        let id = rand_string_of_length(rng, NFT_ID_LENGTH);
        let token_uri = rand_string_of_length(rng, TOKEN_URI_LENGTH);
        if ledger.insert_nft(owner.address, denom, &id, token_uri).is_ok() {
            minted += 1;
        }
    }

    debug!(
        accounts = accounts.len(),
        nfts = minted,
        collections = denoms.len(),
        "genesis built"
    );
    ledger
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::account::random_accounts;
    use crate::simulation::ledger::LedgerHandle;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_genesis_populates_accounts_and_nfts() {
        let mut rng = StdRng::seed_from_u64(10);
        let accounts = random_accounts(&mut rng, 5);
        let config = GenesisConfig {
            zero_balance_probability: 0.0,
            ..Default::default()
        };
        let ledger = random_genesis(&mut rng, &accounts, "g", &config);
        for account in &accounts {
            let state = ledger.account(&account.address).unwrap();
            let amount = state.coins.amount_of(DEFAULT_DENOM);
            assert!((config.min_balance..=config.max_balance).contains(&amount));
        }
        assert_eq!(ledger.total_supply(), config.initial_nfts);
        assert!(ledger
            .owned_nfts()
            .iter()
            .all(|n| accounts.iter().any(|a| a.address == n.owner)));
    }

    #[test]
    fn test_genesis_without_accounts_has_no_nfts() {
        let mut rng = StdRng::seed_from_u64(10);
        let ledger = random_genesis(&mut rng, &[], "g", &GenesisConfig::default());
        assert_eq!(ledger.total_supply(), 0);
    }

    #[test]
    fn test_genesis_reproducible() {
        let build = || {
            let mut rng = StdRng::seed_from_u64(3);
            let accounts = random_accounts(&mut rng, 4);
            random_genesis(&mut rng, &accounts, "g", &GenesisConfig::default()).owned_nfts()
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn test_zero_balance_probability_one() {
        let mut rng = StdRng::seed_from_u64(4);
        let accounts = random_accounts(&mut rng, 3);
        let config = GenesisConfig {
            zero_balance_probability: 1.0,
            ..Default::default()
        };
        let ledger = random_genesis(&mut rng, &accounts, "g", &config);
        assert!(ledger.accounts().all(|a| a.coins.is_empty()));
    }
}
