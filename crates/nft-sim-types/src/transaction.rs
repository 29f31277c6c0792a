//! Signed transactions and the simulated signature scheme.
//!
//! Signatures here are a deterministic digest over the canonical (BCS) sign
//! bytes, bound to the signer's public key. They are enough for the ledger to
//! reject mismatched signers, sequences and chain ids; they are not meant to
//! resist forgery.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::address::Address;
use crate::coins::Coins;
use crate::msg::Request;

/// Gas limit attached to generated transactions.
pub const DEFAULT_GEN_TX_GAS: u64 = 1_000_000;

const SIGNATURE_DOMAIN: &[u8] = b"nft-sim/sig/v1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fee {
    pub amount: Coins,
    pub gas: u64,
}

impl Fee {
    pub fn new(amount: Coins, gas: u64) -> Self {
        Self { amount, gas }
    }
}

/// The document a signer commits to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignDoc {
    pub chain_id: String,
    pub account_number: u64,
    pub sequence: u64,
    pub fee: Fee,
    pub msgs: Vec<Request>,
    pub memo: String,
}

impl SignDoc {
    /// Canonical bytes (BCS) of this document.
    pub fn sign_bytes(&self) -> Result<Vec<u8>, bcs::Error> {
        bcs::to_bytes(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub public_key: [u8; 32],
    pub signature: [u8; 32],
}

impl Signature {
    pub fn signer_address(&self) -> Address {
        Address::from_public_key(&self.public_key)
    }

    /// Check this signature against `sign_bytes`.
    pub fn verify(&self, sign_bytes: &[u8]) -> bool {
        signature_digest(&self.public_key, sign_bytes) == self.signature
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    pub msgs: Vec<Request>,
    pub fee: Fee,
    pub memo: String,
    pub signatures: Vec<Signature>,
}

impl SignedTransaction {
    /// Rebuild the sign document for verification against ledger state.
    pub fn sign_doc(&self, chain_id: &str, account_number: u64, sequence: u64) -> SignDoc {
        SignDoc {
            chain_id: chain_id.to_string(),
            account_number,
            sequence,
            fee: self.fee.clone(),
            msgs: self.msgs.clone(),
            memo: self.memo.clone(),
        }
    }

    /// Hex SHA-256 over the BCS encoding of the whole transaction.
    pub fn digest(&self) -> Result<String, bcs::Error> {
        let bytes = bcs::to_bytes(self)?;
        Ok(hex::encode(Sha256::digest(&bytes)))
    }
}

/// Public key for a signing secret.
pub fn public_key_from_secret(secret: &[u8; 32]) -> [u8; 32] {
    Sha256::digest(secret).into()
}

/// Sign `sign_bytes` with `secret`.
pub fn sign(secret: &[u8; 32], sign_bytes: &[u8]) -> Signature {
    let public_key = public_key_from_secret(secret);
    Signature {
        public_key,
        signature: signature_digest(&public_key, sign_bytes),
    }
}

fn signature_digest(public_key: &[u8; 32], sign_bytes: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(SIGNATURE_DOMAIN);
    hasher.update(public_key);
    hasher.update(sign_bytes);
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msg::MsgBurnNft;

    fn doc(sequence: u64) -> SignDoc {
        SignDoc {
            chain_id: "nft-sim".into(),
            account_number: 0,
            sequence,
            fee: Fee::new(Coins::single("stake", 5), DEFAULT_GEN_TX_GAS),
            msgs: vec![Request::BurnNft(MsgBurnNft {
                owner: Address::default(),
                id: "a".into(),
                denom: "b".into(),
            })],
            memo: String::new(),
        }
    }

    #[test]
    fn test_sign_and_verify() {
        let secret = [3u8; 32];
        let bytes = doc(0).sign_bytes().unwrap();
        let sig = sign(&secret, &bytes);
        assert!(sig.verify(&bytes));
        assert_eq!(
            sig.signer_address(),
            Address::from_public_key(&public_key_from_secret(&secret))
        );
    }

    #[test]
    fn test_signature_binds_sequence() {
        let secret = [3u8; 32];
        let sig = sign(&secret, &doc(0).sign_bytes().unwrap());
        assert!(!sig.verify(&doc(1).sign_bytes().unwrap()));
    }
}
