//! Simulation accounts: the addresses and keys the generator signs with.

use std::fmt;

use nft_sim_types::{public_key_from_secret, sign, Address, Signature};
use rand::Rng;

/// An account the harness owns and the generator may act as.
///
/// Sequence numbers live in the ledger, not here; the generator reads them at
/// resolution time.
#[derive(Clone, PartialEq, Eq)]
pub struct SimAccount {
    pub address: Address,
    secret: [u8; 32],
    pub public_key: [u8; 32],
}

impl SimAccount {
    pub fn from_secret(secret: [u8; 32]) -> Self {
        let public_key = public_key_from_secret(&secret);
        Self {
            address: Address::from_public_key(&public_key),
            secret,
            public_key,
        }
    }

    pub fn sign(&self, sign_bytes: &[u8]) -> Signature {
        sign(&self.secret, sign_bytes)
    }
}

impl fmt::Debug for SimAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimAccount")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Generate `n` accounts with secrets drawn from `rng`.
pub fn random_accounts<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Vec<SimAccount> {
    (0..n)
        .map(|_| {
            let mut secret = [0u8; 32];
            rng.fill(&mut secret[..]);
            SimAccount::from_secret(secret)
        })
        .collect()
}

/// Pick an account uniformly, returning it with its index.
pub fn random_acc<'a, R: Rng + ?Sized>(
    rng: &mut R,
    accounts: &'a [SimAccount],
) -> Option<(&'a SimAccount, usize)> {
    if accounts.is_empty() {
        return None;
    }
    let idx = rng.gen_range(0..accounts.len());
    Some((&accounts[idx], idx))
}

pub fn find_account<'a>(accounts: &'a [SimAccount], address: &Address) -> Option<&'a SimAccount> {
    accounts.iter().find(|a| &a.address == address)
}
