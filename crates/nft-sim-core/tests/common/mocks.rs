//! Ledger wrappers for observing or overriding execution.

use nft_sim_core::simulation::{AccountState, DeliverResult, InMemoryLedger, LedgerHandle};
use nft_sim_types::{Address, Coins, NftRef, SignedTransaction};

/// Forwards to an [`InMemoryLedger`] and records every submission.
pub struct RecordingLedger {
    pub inner: InMemoryLedger,
    /// `(fee, signer spendable balance at submission)` per execute call.
    pub submissions: Vec<(Coins, Coins)>,
}

impl RecordingLedger {
    pub fn new(inner: InMemoryLedger) -> Self {
        Self {
            inner,
            submissions: Vec::new(),
        }
    }

    pub fn execute_calls(&self) -> usize {
        self.submissions.len()
    }
}

impl LedgerHandle for RecordingLedger {
    fn account(&self, address: &Address) -> Option<AccountState> {
        self.inner.account(address)
    }

    fn owned_nfts(&self) -> Vec<NftRef> {
        self.inner.owned_nfts()
    }

    fn block_time(&self) -> u64 {
        self.inner.block_time()
    }

    fn execute(&mut self, tx: &SignedTransaction) -> DeliverResult {
        let spendable = tx
            .msgs
            .first()
            .and_then(|m| self.inner.account(m.signer()))
            .map(|a| a.spendable_coins(self.inner.block_time()))
            .unwrap_or_default();
        self.submissions.push((tx.fee.amount.clone(), spendable));
        self.inner.execute(tx)
    }
}

/// Serves reads from an inner ledger but rejects every transaction.
pub struct RejectingLedger {
    pub inner: InMemoryLedger,
    pub code: u32,
    pub log: String,
}

impl LedgerHandle for RejectingLedger {
    fn account(&self, address: &Address) -> Option<AccountState> {
        self.inner.account(address)
    }

    fn owned_nfts(&self) -> Vec<NftRef> {
        self.inner.owned_nfts()
    }

    fn block_time(&self) -> u64 {
        self.inner.block_time()
    }

    fn execute(&mut self, _tx: &SignedTransaction) -> DeliverResult {
        DeliverResult::err(self.code, self.log.clone())
    }
}
