//! Serialisable ledger state for save/load.

use std::path::Path;

use anyhow::{bail, Context, Result};
use nft_sim_types::Address;
use serde::{Deserialize, Serialize};

use super::memory::InMemoryLedger;
use super::{AccountState, LedgerHandle};

/// One NFT in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotNft {
    pub denom: String,
    pub id: String,
    pub owner: Address,
    pub token_uri: String,
}

/// Complete ledger state that can be written to and read from a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Version of the snapshot format.
    pub version: u32,
    pub chain_id: String,
    pub block_time: u64,
    pub accounts: Vec<AccountState>,
    pub nfts: Vec<SnapshotNft>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SnapshotMetadata>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SnapshotMetadata {
    /// When the snapshot was taken (RFC 3339).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl LedgerSnapshot {
    pub const CURRENT_VERSION: u32 = 1;

    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("serialize ledger snapshot")?;
        std::fs::write(path, json)
            .with_context(|| format!("write ledger snapshot to {}", path.display()))
    }

    pub fn load_json(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read ledger snapshot from {}", path.display()))?;
        let snapshot: LedgerSnapshot = serde_json::from_str(&raw)
            .with_context(|| format!("parse ledger snapshot {}", path.display()))?;
        Ok(snapshot)
    }
}

impl InMemoryLedger {
    pub fn snapshot(&self) -> LedgerSnapshot {
        let nfts = self
            .collections()
            .iter()
            .flat_map(|(denom, collection)| {
                collection.values().map(move |nft| SnapshotNft {
                    denom: denom.clone(),
                    id: nft.id.clone(),
                    owner: nft.owner,
                    token_uri: nft.token_uri.clone(),
                })
            })
            .collect();
        LedgerSnapshot {
            version: LedgerSnapshot::CURRENT_VERSION,
            chain_id: self.chain_id().to_string(),
            block_time: self.block_time(),
            accounts: self.accounts().cloned().collect(),
            nfts,
            metadata: Some(SnapshotMetadata {
                created_at: Some(chrono::Utc::now().to_rfc3339()),
                description: None,
            }),
        }
    }

    pub fn from_snapshot(snapshot: &LedgerSnapshot) -> Result<Self> {
        if snapshot.version > LedgerSnapshot::CURRENT_VERSION {
            bail!(
                "unsupported snapshot version {} (max {})",
                snapshot.version,
                LedgerSnapshot::CURRENT_VERSION
            );
        }
        let mut ledger = InMemoryLedger::new(snapshot.chain_id.clone(), snapshot.block_time);
        for account in &snapshot.accounts {
            ledger
                .restore_account(account.clone())
                .with_context(|| format!("restore account {}", account.address))?;
        }
        for nft in &snapshot.nfts {
            ledger
                .insert_nft(nft.owner, &nft.denom, &nft.id, nft.token_uri.clone())
                .with_context(|| format!("restore nft {}/{}", nft.denom, nft.id))?;
        }
        Ok(ledger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nft_sim_types::Coins;

    fn ledger() -> InMemoryLedger {
        let mut ledger = InMemoryLedger::new("snap", 77);
        let a: Address = "0xa".parse().unwrap();
        let b: Address = "0xb".parse().unwrap();
        ledger.add_account(a, Coins::single("stake", 5));
        ledger.add_account(b, Coins::empty());
        ledger.insert_nft(a, "art", "1", "uri-1").unwrap();
        ledger.insert_nft(b, "art", "2", "uri-2").unwrap();
        ledger
    }

    #[test]
    fn test_snapshot_restores_state() {
        let original = ledger();
        let snapshot = original.snapshot();
        let restored = InMemoryLedger::from_snapshot(&snapshot).unwrap();
        assert_eq!(restored.owned_nfts(), original.owned_nfts());
        assert_eq!(restored.block_time(), 77);
        assert_eq!(restored.chain_id(), "snap");
        let b: Address = "0xb".parse().unwrap();
        assert_eq!(restored.account(&b), original.account(&b));
    }

    #[test]
    fn test_restored_ledger_continues_account_numbers() {
        let mut restored = InMemoryLedger::from_snapshot(&ledger().snapshot()).unwrap();
        let c: Address = "0xc".parse().unwrap();
        assert_eq!(restored.add_account(c, Coins::empty()), 2);
    }

    #[test]
    fn test_save_and_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let snapshot = ledger().snapshot();
        snapshot.save_json(&path).unwrap();
        let loaded = LedgerSnapshot::load_json(&path).unwrap();
        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn test_rejects_max_account_number() {
        let mut snapshot = ledger().snapshot();
        snapshot.accounts[0].account_number = u64::MAX;
        let err = InMemoryLedger::from_snapshot(&snapshot).unwrap_err();
        assert!(format!("{:#}", err).contains("out-of-range account number"));
    }

    #[test]
    fn test_rejects_duplicate_address() {
        let mut snapshot = ledger().snapshot();
        let mut dup = snapshot.accounts[0].clone();
        dup.account_number = 9;
        snapshot.accounts.push(dup);
        let err = InMemoryLedger::from_snapshot(&snapshot).unwrap_err();
        assert!(format!("{:#}", err).contains("duplicate account"));
    }

    #[test]
    fn test_rejects_duplicate_account_number() {
        let mut snapshot = ledger().snapshot();
        snapshot.accounts[1].account_number = snapshot.accounts[0].account_number;
        let err = InMemoryLedger::from_snapshot(&snapshot).unwrap_err();
        assert!(format!("{:#}", err).contains("account number"));
    }

    #[test]
    fn test_rejects_future_version() {
        let mut snapshot = ledger().snapshot();
        snapshot.version = LedgerSnapshot::CURRENT_VERSION + 1;
        assert!(InMemoryLedger::from_snapshot(&snapshot).is_err());
    }
}
