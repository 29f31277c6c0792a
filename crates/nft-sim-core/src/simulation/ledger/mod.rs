//! The ledger contract the generator consumes.
//!
//! [`LedgerHandle`] is the only view the generator has of ledger state: it
//! resolves accounts, lists owned NFTs, reports logical time and executes
//! signed transactions. Handles are passed explicitly so that independent
//! simulations never share state.
//!
//! - [`memory`]: [`InMemoryLedger`], the reference implementation
//! - [`snapshot`]: serialisable export/import of ledger state

pub mod memory;
pub mod snapshot;

use std::sync::Arc;

use nft_sim_types::{Address, Coins, NftRef, SignedTransaction};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

pub use memory::{InMemoryLedger, Nft};
pub use snapshot::{LedgerSnapshot, SnapshotMetadata};

/// Ledger result codes.
pub mod codes {
    pub const OK: u32 = 0;
    pub const UNAUTHORIZED: u32 = 2;
    pub const INSUFFICIENT_FEE_FUNDS: u32 = 4;
    pub const UNKNOWN_ADDRESS: u32 = 5;
    pub const INVALID_REQUEST: u32 = 7;
    pub const NFT_NOT_FOUND: u32 = 8;
    pub const NFT_ALREADY_EXISTS: u32 = 9;
    pub const NOT_OWNER: u32 = 10;
}

/// Read/execute access to a ledger.
pub trait LedgerHandle {
    /// Current account record for `address`.
    fn account(&self, address: &Address) -> Option<AccountState>;

    /// Every owned NFT, ordered by owner, denom, then id.
    fn owned_nfts(&self) -> Vec<NftRef>;

    /// Current logical time in unix seconds.
    fn block_time(&self) -> u64;

    /// Apply a signed transaction.
    fn execute(&mut self, tx: &SignedTransaction) -> DeliverResult;
}

/// Coins locked until `end_time` (delayed vesting).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VestingLock {
    pub locked: Coins,
    pub end_time: u64,
}

/// An account as the ledger sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountState {
    pub address: Address,
    pub account_number: u64,
    pub sequence: u64,
    pub coins: Coins,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vesting: Option<VestingLock>,
}

impl AccountState {
    /// Balance usable for fees at `time`.
    pub fn spendable_coins(&self, time: u64) -> Coins {
        match &self.vesting {
            Some(lock) if time < lock.end_time => self.coins.saturating_sub(&lock.locked),
            _ => self.coins.clone(),
        }
    }
}

/// Raw outcome of [`LedgerHandle::execute`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliverResult {
    pub code: u32,
    pub log: String,
}

impl DeliverResult {
    pub fn ok(log: impl Into<String>) -> Self {
        Self {
            code: codes::OK,
            log: log.into(),
        }
    }

    pub fn err(code: u32, log: impl Into<String>) -> Self {
        Self {
            code,
            log: log.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.code == codes::OK
    }
}

/// A ledger shared between harness threads.
///
/// Each call takes the lock for its own duration only, so a sample taken in
/// one call can be stale by the time a later `execute` runs. Harnesses that
/// need a consistent view must serialize invocations themselves.
#[derive(Clone)]
pub struct SharedLedger(Arc<Mutex<InMemoryLedger>>);

impl SharedLedger {
    pub fn new(ledger: InMemoryLedger) -> Self {
        Self(Arc::new(Mutex::new(ledger)))
    }

    /// Run `f` with exclusive access to the underlying ledger.
    pub fn with<T>(&self, f: impl FnOnce(&mut InMemoryLedger) -> T) -> T {
        f(&mut self.0.lock())
    }
}

impl LedgerHandle for SharedLedger {
    fn account(&self, address: &Address) -> Option<AccountState> {
        self.0.lock().account(address)
    }

    fn owned_nfts(&self) -> Vec<NftRef> {
        self.0.lock().owned_nfts()
    }

    fn block_time(&self) -> u64 {
        self.0.lock().block_time()
    }

    fn execute(&mut self, tx: &SignedTransaction) -> DeliverResult {
        self.0.lock().execute(tx)
    }
}
