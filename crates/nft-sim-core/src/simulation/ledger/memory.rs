//! In-memory reference ledger.
//!
//! Holds accounts and NFT collections and applies signed transactions in two
//! stages:
//!
//! 1. **Ante**: signer, chain id, account number, sequence and fee checks.
//!    A failure here leaves state untouched. On success the fee is deducted
//!    and the sequence advanced, and both persist even if a handler fails.
//! 2. **Handlers**: the NFT messages, applied all-or-nothing against a staged
//!    copy of the collections.

use std::collections::BTreeMap;

use anyhow::{bail, Result};
use nft_sim_types::{Address, Coins, NftRef, Request, SignedTransaction};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::{codes, AccountState, DeliverResult, LedgerHandle, VestingLock};

/// A stored NFT.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nft {
    pub id: String,
    pub owner: Address,
    pub token_uri: String,
}

type Collections = BTreeMap<String, BTreeMap<String, Nft>>;

#[derive(Debug, Clone)]
pub struct InMemoryLedger {
    chain_id: String,
    block_time: u64,
    next_account_number: u64,
    accounts: BTreeMap<Address, AccountState>,
    collections: Collections,
    delivered_tx_count: u64,
}

impl InMemoryLedger {
    pub fn new(chain_id: impl Into<String>, block_time: u64) -> Self {
        Self {
            chain_id: chain_id.into(),
            block_time,
            next_account_number: 0,
            accounts: BTreeMap::new(),
            collections: BTreeMap::new(),
            delivered_tx_count: 0,
        }
    }

    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    /// Register an account, returning its account number.
    pub fn add_account(&mut self, address: Address, coins: Coins) -> u64 {
        self.add_account_with_vesting(address, coins, None)
    }

    pub fn add_account_with_vesting(
        &mut self,
        address: Address,
        coins: Coins,
        vesting: Option<VestingLock>,
    ) -> u64 {
        if let Some(existing) = self.accounts.get_mut(&address) {
            existing.coins = existing.coins.add(&coins);
            if vesting.is_some() {
                existing.vesting = vesting;
            }
            return existing.account_number;
        }
        let account_number = self.next_account_number;
        self.next_account_number += 1;
        self.accounts.insert(
            address,
            AccountState {
                address,
                account_number,
                sequence: 0,
                coins,
                vesting,
            },
        );
        account_number
    }

    /// Re-insert an account exactly as recorded (snapshot import).
    pub(crate) fn restore_account(&mut self, state: AccountState) -> Result<()> {
        let Some(next) = state.account_number.checked_add(1) else {
            bail!(
                "account {} has out-of-range account number {}",
                state.address,
                state.account_number
            );
        };
        if self.accounts.contains_key(&state.address) {
            bail!("duplicate account {}", state.address);
        }
        if let Some(other) = self
            .accounts
            .values()
            .find(|a| a.account_number == state.account_number)
        {
            bail!(
                "account number {} used by both {} and {}",
                state.account_number,
                other.address,
                state.address
            );
        }
        self.next_account_number = self.next_account_number.max(next);
        self.accounts.insert(state.address, state);
        Ok(())
    }

    pub fn accounts(&self) -> impl Iterator<Item = &AccountState> {
        self.accounts.values()
    }

    pub fn set_block_time(&mut self, time: u64) {
        self.block_time = time;
    }

    pub fn advance_block_time(&mut self, secs: u64) {
        self.block_time = self.block_time.saturating_add(secs);
    }

    /// Seed an NFT directly (genesis and tests).
    pub fn insert_nft(
        &mut self,
        owner: Address,
        denom: &str,
        id: &str,
        token_uri: impl Into<String>,
    ) -> Result<()> {
        if denom.trim().is_empty() || id.trim().is_empty() {
            bail!("nft denom and id must be non-empty");
        }
        let collection = self.collections.entry(denom.to_string()).or_default();
        if collection.contains_key(id) {
            bail!("nft {}/{} already exists", denom, id);
        }
        collection.insert(
            id.to_string(),
            Nft {
                id: id.to_string(),
                owner,
                token_uri: token_uri.into(),
            },
        );
        Ok(())
    }

    pub fn nft(&self, denom: &str, id: &str) -> Option<&Nft> {
        self.collections.get(denom).and_then(|c| c.get(id))
    }

    pub fn owner_of(&self, denom: &str, id: &str) -> Option<Address> {
        self.nft(denom, id).map(|n| n.owner)
    }

    pub fn collection_supply(&self, denom: &str) -> usize {
        self.collections.get(denom).map(|c| c.len()).unwrap_or(0)
    }

    pub fn total_supply(&self) -> usize {
        self.collections.values().map(|c| c.len()).sum()
    }

    pub(crate) fn collections(&self) -> &BTreeMap<String, BTreeMap<String, Nft>> {
        &self.collections
    }

    /// Number of transactions handed to [`LedgerHandle::execute`].
    pub fn delivered_tx_count(&self) -> u64 {
        self.delivered_tx_count
    }

    fn ante(&mut self, tx: &SignedTransaction) -> Result<(), DeliverResult> {
        let first = tx.msgs.first().ok_or_else(|| {
            DeliverResult::err(
                codes::INVALID_REQUEST,
                "invalid request: transaction must contain at least one message",
            )
        })?;

        let signer = *first.signer();
        if tx.msgs.iter().any(|m| m.signer() != &signer) {
            return Err(DeliverResult::err(
                codes::UNAUTHORIZED,
                "unauthorized: all messages must share one signer",
            ));
        }
        let signature = match tx.signatures.as_slice() {
            [sig] => sig,
            sigs => {
                return Err(DeliverResult::err(
                    codes::UNAUTHORIZED,
                    format!(
                        "unauthorized: wrong number of signers; expected 1, got {}",
                        sigs.len()
                    ),
                ))
            }
        };
        if signature.signer_address() != signer {
            return Err(DeliverResult::err(
                codes::UNAUTHORIZED,
                format!("unauthorized: pubkey does not match signer address {}", signer),
            ));
        }

        let account = self.accounts.get(&signer).ok_or_else(|| {
            DeliverResult::err(
                codes::UNKNOWN_ADDRESS,
                format!("unknown address: account {} does not exist", signer),
            )
        })?;

        let sign_bytes = tx
            .sign_doc(&self.chain_id, account.account_number, account.sequence)
            .sign_bytes()
            .map_err(|e| DeliverResult::err(codes::INVALID_REQUEST, e.to_string()))?;
        if !signature.verify(&sign_bytes) {
            return Err(DeliverResult::err(
                codes::UNAUTHORIZED,
                format!(
                    "unauthorized: signature verification failed; verify correct account number ({}), sequence ({}) and chain-id ({})",
                    account.account_number, account.sequence, self.chain_id
                ),
            ));
        }

        let spendable = account.spendable_coins(self.block_time);
        if !spendable.is_all_gte(&tx.fee.amount) {
            return Err(DeliverResult::err(
                codes::INSUFFICIENT_FEE_FUNDS,
                format!(
                    "insufficient funds: insufficient funds to pay for fees; {} < {}",
                    spendable, tx.fee.amount
                ),
            ));
        }
        let remaining = account.coins.checked_sub(&tx.fee.amount).ok_or_else(|| {
            DeliverResult::err(
                codes::INSUFFICIENT_FEE_FUNDS,
                format!("insufficient funds: cannot deduct fee {}", tx.fee.amount),
            )
        })?;

        if let Some(account) = self.accounts.get_mut(&signer) {
            account.coins = remaining;
            account.sequence += 1;
        }
        Ok(())
    }
}

fn owned_nft<'a>(
    collections: &'a mut Collections,
    denom: &str,
    id: &str,
    owner: &Address,
) -> Result<&'a mut Nft, DeliverResult> {
    let nft = collections
        .get_mut(denom)
        .and_then(|c| c.get_mut(id))
        .ok_or_else(|| {
            DeliverResult::err(
                codes::NFT_NOT_FOUND,
                format!("unknown nft: nft {} of collection {} not found", id, denom),
            )
        })?;
    if &nft.owner != owner {
        return Err(DeliverResult::err(
            codes::NOT_OWNER,
            format!(
                "unauthorized: {} is not the owner of nft {}/{}",
                owner, denom, id
            ),
        ));
    }
    Ok(nft)
}

fn handle_request(collections: &mut Collections, request: &Request) -> Result<(), DeliverResult> {
    request
        .validate_basic()
        .map_err(|e| DeliverResult::err(codes::INVALID_REQUEST, e.to_string()))?;
    match request {
        Request::TransferNft(msg) => {
            let nft = owned_nft(collections, &msg.denom, &msg.id, &msg.sender)?;
            nft.owner = msg.recipient;
        }
        Request::EditNftMetadata(msg) => {
            let nft = owned_nft(collections, &msg.denom, &msg.id, &msg.owner)?;
            nft.token_uri = msg.token_uri.clone();
        }
        Request::MintNft(msg) => {
            let collection = collections.entry(msg.denom.clone()).or_default();
            if collection.contains_key(&msg.id) {
                return Err(DeliverResult::err(
                    codes::NFT_ALREADY_EXISTS,
                    format!(
                        "nft already exists: nft {} of collection {} already exists",
                        msg.id, msg.denom
                    ),
                ));
            }
            collection.insert(
                msg.id.clone(),
                Nft {
                    id: msg.id.clone(),
                    owner: msg.recipient,
                    token_uri: msg.token_uri.clone(),
                },
            );
        }
        Request::BurnNft(msg) => {
            owned_nft(collections, &msg.denom, &msg.id, &msg.owner)?;
            if let Some(collection) = collections.get_mut(&msg.denom) {
                collection.remove(&msg.id);
                if collection.is_empty() {
                    collections.remove(&msg.denom);
                }
            }
        }
    }
    Ok(())
}

impl LedgerHandle for InMemoryLedger {
    fn account(&self, address: &Address) -> Option<AccountState> {
        self.accounts.get(address).cloned()
    }

    fn owned_nfts(&self) -> Vec<NftRef> {
        let mut nfts: Vec<NftRef> = self
            .collections
            .iter()
            .flat_map(|(denom, collection)| {
                collection
                    .values()
                    .map(move |nft| NftRef::new(nft.owner, denom.clone(), nft.id.clone()))
            })
            .collect();
        nfts.sort();
        nfts
    }

    fn block_time(&self) -> u64 {
        self.block_time
    }

    fn execute(&mut self, tx: &SignedTransaction) -> DeliverResult {
        self.delivered_tx_count += 1;

        if let Err(rejection) = self.ante(tx) {
            debug!(code = rejection.code, log = %rejection.log, "ante rejected transaction");
            return rejection;
        }

        let mut staged = self.collections.clone();
        for request in &tx.msgs {
            if let Err(rejection) = handle_request(&mut staged, request) {
                debug!(
                    code = rejection.code,
                    msg = request.type_name(),
                    log = %rejection.log,
                    "handler rejected message"
                );
                return rejection;
            }
        }
        self.collections = staged;

        let names: Vec<&str> = tx.msgs.iter().map(|m| m.type_name()).collect();
        trace!(msgs = ?names, "transaction delivered");
        DeliverResult::ok(format!("executed {}", names.join(",")))
    }
}
