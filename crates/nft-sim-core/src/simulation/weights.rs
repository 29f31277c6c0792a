//! Weighted selection of operation kinds.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::operations::OperationKind;

/// Relative frequency of each operation kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperationWeights {
    pub transfer_nft: u32,
    pub edit_nft_metadata: u32,
    pub mint_nft: u32,
    pub burn_nft: u32,
}

impl Default for OperationWeights {
    fn default() -> Self {
        Self {
            transfer_nft: 33,
            edit_nft_metadata: 5,
            mint_nft: 10,
            burn_nft: 5,
        }
    }
}

impl OperationWeights {
    pub fn weight_of(&self, kind: OperationKind) -> u32 {
        match kind {
            OperationKind::TransferNft => self.transfer_nft,
            OperationKind::EditNftMetadata => self.edit_nft_metadata,
            OperationKind::MintNft => self.mint_nft,
            OperationKind::BurnNft => self.burn_nft,
        }
    }

    pub fn total(&self) -> u64 {
        OperationKind::ALL
            .iter()
            .map(|k| u64::from(self.weight_of(*k)))
            .sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightedOperation {
    pub weight: u32,
    pub kind: OperationKind,
}

/// All kinds with a non-zero weight, in [`OperationKind::ALL`] order.
pub fn weighted_operations(weights: &OperationWeights) -> Vec<WeightedOperation> {
    OperationKind::ALL
        .iter()
        .map(|kind| WeightedOperation {
            weight: weights.weight_of(*kind),
            kind: *kind,
        })
        .filter(|op| op.weight > 0)
        .collect()
}

/// Pick a kind with probability proportional to its weight.
pub fn select_operation<R: Rng + ?Sized>(
    rng: &mut R,
    ops: &[WeightedOperation],
) -> Option<OperationKind> {
    let total: u64 = ops.iter().map(|op| u64::from(op.weight)).sum();
    if total == 0 {
        return None;
    }
    let mut pick = rng.gen_range(0..total);
    for op in ops {
        let weight = u64::from(op.weight);
        if pick < weight {
            return Some(op.kind);
        }
        pick -= weight;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_zero_weights_filtered() {
        let weights = OperationWeights {
            transfer_nft: 0,
            edit_nft_metadata: 0,
            mint_nft: 1,
            burn_nft: 0,
        };
        let ops = weighted_operations(&weights);
        assert_eq!(ops.len(), 1);
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..10 {
            assert_eq!(select_operation(&mut rng, &ops), Some(OperationKind::MintNft));
        }
    }

    #[test]
    fn test_empty_selection() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(select_operation(&mut rng, &[]), None);
    }

    #[test]
    fn test_selection_follows_weights() {
        let ops = weighted_operations(&OperationWeights::default());
        let mut rng = StdRng::seed_from_u64(17);
        let mut transfers = 0;
        for _ in 0..5300 {
            if select_operation(&mut rng, &ops) == Some(OperationKind::TransferNft) {
                transfers += 1;
            }
        }
        // expected 3300 of 5300
        assert!((3000..3600).contains(&transfers), "got {}", transfers);
    }

    #[test]
    fn test_weights_deserialize_with_defaults() {
        let weights: OperationWeights = serde_json::from_str(r#"{"burn_nft": 0}"#).unwrap();
        assert_eq!(weights.burn_nft, 0);
        assert_eq!(weights.transfer_nft, 33);
        assert_eq!(weights.total(), 48);
    }
}
