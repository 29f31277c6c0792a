//! Picks ledger state that satisfies an operation's preconditions.
//!
//! Ownership is read fresh from the ledger on every call; nothing is cached
//! between invocations.

use std::collections::BTreeMap;

use nft_sim_types::{Address, NftRef};
use rand::Rng;

use super::{OperationKind, Subject};
use crate::simulation::account::{random_acc, SimAccount};
use crate::simulation::ledger::LedgerHandle;

/// Pick a random owner, then one of that owner's NFTs, both uniformly.
///
/// Returns `None` when the ledger holds no NFTs.
pub fn random_nft_from_owner<R, L>(rng: &mut R, ledger: &L) -> Option<NftRef>
where
    R: Rng + ?Sized,
    L: LedgerHandle + ?Sized,
{
    let mut by_owner: BTreeMap<Address, Vec<NftRef>> = BTreeMap::new();
    for nft in ledger.owned_nfts() {
        by_owner.entry(nft.owner).or_default().push(nft);
    }
    if by_owner.is_empty() {
        return None;
    }

    let owner_idx = rng.gen_range(0..by_owner.len());
    let mut owned = by_owner.into_values().nth(owner_idx)?;
    let nft_idx = rng.gen_range(0..owned.len());
    Some(owned.swap_remove(nft_idx))
}

/// Sample the subject for `kind`, or `None` if nothing is eligible.
pub fn sample_subject<R, L>(
    kind: OperationKind,
    rng: &mut R,
    ledger: &L,
    accounts: &[SimAccount],
) -> Option<Subject>
where
    R: Rng + ?Sized,
    L: LedgerHandle + ?Sized,
{
    match kind {
        OperationKind::TransferNft => {
            let nft = random_nft_from_owner(rng, ledger)?;
            let (recipient, _) = random_acc(rng, accounts)?;
            Some(Subject::Transfer {
                nft,
                recipient: recipient.address,
            })
        }
        OperationKind::EditNftMetadata => {
            random_nft_from_owner(rng, ledger).map(Subject::EditMetadata)
        }
        OperationKind::MintNft => {
            let (sender, _) = random_acc(rng, accounts)?;
            let (recipient, _) = random_acc(rng, accounts)?;
            Some(Subject::Mint {
                sender: sender.address,
                recipient: recipient.address,
            })
        }
        OperationKind::BurnNft => random_nft_from_owner(rng, ledger).map(Subject::Burn),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::ledger::InMemoryLedger;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn addr(s: &str) -> Address {
        s.parse().unwrap()
    }

    #[test]
    fn test_empty_ledger_yields_none() {
        let ledger = InMemoryLedger::new("c", 0);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(random_nft_from_owner(&mut rng, &ledger).is_none());
    }

    #[test]
    fn test_single_nft_always_sampled() {
        let mut ledger = InMemoryLedger::new("c", 0);
        ledger.insert_nft(addr("0xa"), "collectible", "001", "").unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            let nft = random_nft_from_owner(&mut rng, &ledger).unwrap();
            assert_eq!(nft, NftRef::new(addr("0xa"), "collectible", "001"));
        }
    }

    #[test]
    fn test_owners_sampled_uniformly_not_by_holdings() {
        let mut ledger = InMemoryLedger::new("c", 0);
        for i in 0..9 {
            ledger
                .insert_nft(addr("0xa"), "art", &format!("a{}", i), "")
                .unwrap();
        }
        ledger.insert_nft(addr("0xb"), "art", "b0", "").unwrap();

        let mut rng = StdRng::seed_from_u64(2024);
        let mut b_hits = 0;
        for _ in 0..1000 {
            if random_nft_from_owner(&mut rng, &ledger).unwrap().owner == addr("0xb") {
                b_hits += 1;
            }
        }
        assert!(
            (350..650).contains(&b_hits),
            "owner with one NFT picked {} of 1000 times",
            b_hits
        );
    }

    #[test]
    fn test_mint_without_accounts_is_none() {
        let ledger = InMemoryLedger::new("c", 0);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(sample_subject(OperationKind::MintNft, &mut rng, &ledger, &[]).is_none());
    }
}
