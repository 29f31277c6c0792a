//! Ledger and account fixtures.

use nft_sim_core::simulation::{InMemoryLedger, SimAccount};
use nft_sim_types::Coins;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub const CHAIN_ID: &str = "nft-sim-test";

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Accounts with fixed secrets `[1; 32]`, `[2; 32]`, ...
pub fn fixed_accounts(n: u8) -> Vec<SimAccount> {
    (1..=n).map(|i| SimAccount::from_secret([i; 32])).collect()
}

/// A ledger where every account holds `balance` stake and no NFTs exist.
pub fn funded_ledger(accounts: &[SimAccount], balance: u64) -> InMemoryLedger {
    let mut ledger = InMemoryLedger::new(CHAIN_ID, 1_000);
    for account in accounts {
        let coins = if balance == 0 {
            Coins::empty()
        } else {
            Coins::single("stake", balance)
        };
        ledger.add_account(account.address, coins);
    }
    ledger
}

/// Accounts `[A, B]` where A owns `collectible/001` and both hold 1000 stake.
pub fn collectible_fixture() -> (InMemoryLedger, Vec<SimAccount>) {
    let accounts = fixed_accounts(2);
    let mut ledger = funded_ledger(&accounts, 1_000);
    ledger
        .insert_nft(accounts[0].address, "collectible", "001", "ipfs://original")
        .expect("seed nft");
    (ledger, accounts)
}
