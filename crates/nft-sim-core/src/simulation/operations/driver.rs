//! Signs a request, executes it and classifies the result.

use nft_sim_types::Request;
use tracing::debug;

use super::resolver::ResolvedActor;
use super::OperationOutcome;
use crate::simulation::errors::OperationError;
use crate::simulation::ledger::LedgerHandle;
use crate::simulation::tx::gen_tx;

/// Submit `request` as `actor` and classify what the ledger returned.
///
/// A rejected transaction carries the engine's log verbatim. Post-state is
/// never predicted here; callers must re-read the ledger.
pub fn submit<L>(
    ledger: &mut L,
    request: Request,
    actor: &ResolvedActor<'_>,
    chain_id: &str,
) -> OperationOutcome
where
    L: LedgerHandle + ?Sized,
{
    let tx = match gen_tx(
        vec![request.clone()],
        actor.fee.clone(),
        chain_id,
        actor.state.account_number,
        actor.state.sequence,
        actor.account,
    ) {
        Ok(tx) => tx,
        Err(e) => {
            return OperationOutcome::Failure(OperationError::Encoding {
                message: e.to_string(),
            })
        }
    };

    let result = ledger.execute(&tx);
    if result.is_ok() {
        debug!(
            msg = request.type_name(),
            signer = %actor.account.address,
            fee = %actor.fee,
            "operation succeeded"
        );
        OperationOutcome::Success(request)
    } else {
        debug!(
            msg = request.type_name(),
            signer = %actor.account.address,
            code = result.code,
            log = %result.log,
            "operation rejected"
        );
        OperationOutcome::Failure(OperationError::Rejected {
            code: result.code,
            log: result.log,
        })
    }
}
