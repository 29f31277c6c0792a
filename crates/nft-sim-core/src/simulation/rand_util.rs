//! Random helpers shared by the sampler, the request builder and genesis.
//!
//! Every function takes the random source explicitly so that a whole run is
//! reproducible from one seed.

use nft_sim_types::Coins;
use rand::Rng;

use super::errors::FeeError;

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Length of generated NFT ids.
pub const NFT_ID_LENGTH: usize = 10;
/// Length of generated collection denoms.
pub const DENOM_LENGTH: usize = 10;
/// Length of generated token URIs.
pub const TOKEN_URI_LENGTH: usize = 45;

/// Random ASCII-letter string of exactly `n` characters.
pub fn rand_string_of_length<R: Rng + ?Sized>(rng: &mut R, n: usize) -> String {
    (0..n)
        .map(|_| LETTERS[rng.gen_range(0..LETTERS.len())] as char)
        .collect()
}

/// Random integer in `[min, max)`; returns `min` when the range is empty.
pub fn rand_int_between<R: Rng + ?Sized>(rng: &mut R, min: u64, max: u64) -> u64 {
    if max <= min {
        return min;
    }
    rng.gen_range(min..max)
}

/// Random amount in `[1, max]`, or `None` for `max == 0`.
pub fn rand_positive_amount<R: Rng + ?Sized>(rng: &mut R, max: u64) -> Option<u64> {
    if max == 0 {
        return None;
    }
    Some(rng.gen_range(1..=max))
}

/// Pick a random fee payable from `spendable`.
///
/// A denom is chosen uniformly among the non-zero balances, then an amount
/// uniformly in `[1, balance]`. The fee never exceeds what is spendable.
pub fn random_fees<R: Rng + ?Sized>(rng: &mut R, spendable: &Coins) -> Result<Coins, FeeError> {
    let insufficient = || FeeError::InsufficientFunds {
        spendable: spendable.clone(),
    };
    if spendable.is_empty() {
        return Err(insufficient());
    }
    let idx = rng.gen_range(0..spendable.len());
    let coin = spendable.get(idx).ok_or_else(insufficient)?;
    let amount = rand_positive_amount(rng, coin.amount).ok_or_else(insufficient)?;
    Ok(Coins::single(coin.denom.clone(), amount))
}
