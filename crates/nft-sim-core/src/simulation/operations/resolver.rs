//! Resolves the acting address to its account and an affordable fee.

use nft_sim_types::{Address, Coins};
use rand::Rng;

use crate::simulation::account::{find_account, SimAccount};
use crate::simulation::errors::OperationError;
use crate::simulation::ledger::{AccountState, LedgerHandle};
use crate::simulation::rand_util::random_fees;

/// Everything the submission driver needs about the actor.
#[derive(Debug, Clone)]
pub struct ResolvedActor<'a> {
    pub account: &'a SimAccount,
    pub state: AccountState,
    pub fee: Coins,
}

pub fn resolve_actor<'a, R, L>(
    rng: &mut R,
    ledger: &L,
    accounts: &'a [SimAccount],
    address: &Address,
) -> Result<ResolvedActor<'a>, OperationError>
where
    R: Rng + ?Sized,
    L: LedgerHandle + ?Sized,
{
    let not_found = || OperationError::AccountNotFound { address: *address };
    let account = find_account(accounts, address).ok_or_else(not_found)?;
    let state = ledger.account(address).ok_or_else(not_found)?;

    let spendable = state.spendable_coins(ledger.block_time());
    let fee = random_fees(rng, &spendable).map_err(|e| OperationError::InsufficientFunds {
        address: *address,
        detail: e.to_string(),
    })?;

    Ok(ResolvedActor {
        account,
        state,
        fee,
    })
}
