//! Randomized NFT operations.
//!
//! All four operation kinds run the same pipeline and differ only in how they
//! sample a subject and which request they build from it:
//!
//! 1. **Sample** ([`sampler`]): nothing eligible ends the invocation as
//!    [`OperationOutcome::NoOp`].
//! 2. **Resolve** ([`resolver`]): find the actor's account and a random
//!    affordable fee. Failure ends the invocation as a `Failure`.
//! 3. **Build** ([`builder`]): assemble the request.
//! 4. **Submit** ([`driver`]): sign, execute, classify.
//!
//! Each invocation makes at most one submission and never retries.

pub mod builder;
pub mod driver;
pub mod resolver;
pub mod sampler;

use nft_sim_types::{Address, NftRef, Request};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::account::SimAccount;
use super::errors::OperationError;
use super::ledger::LedgerHandle;

/// The four operation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    TransferNft,
    EditNftMetadata,
    MintNft,
    BurnNft,
}

impl OperationKind {
    pub const ALL: [OperationKind; 4] = [
        OperationKind::TransferNft,
        OperationKind::EditNftMetadata,
        OperationKind::MintNft,
        OperationKind::BurnNft,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            OperationKind::TransferNft => "transfer_nft",
            OperationKind::EditNftMetadata => "edit_nft_metadata",
            OperationKind::MintNft => "mint_nft",
            OperationKind::BurnNft => "burn_nft",
        }
    }

    /// Run one pass of the pipeline and report exactly one outcome.
    pub fn invoke<R, L>(
        &self,
        rng: &mut R,
        ledger: &mut L,
        accounts: &[SimAccount],
        chain_id: &str,
    ) -> OperationOutcome
    where
        R: Rng + ?Sized,
        L: LedgerHandle + ?Sized,
    {
        let Some(subject) = sampler::sample_subject(*self, rng, &*ledger, accounts) else {
            trace!(op = self.name(), "no eligible subject");
            return OperationOutcome::NoOp;
        };

        let actor = match resolver::resolve_actor(rng, &*ledger, accounts, subject.actor()) {
            Ok(actor) => actor,
            Err(e) => {
                trace!(op = self.name(), error = %e, "actor resolution failed");
                return OperationOutcome::Failure(e);
            }
        };

        let request = builder::build_request(rng, &subject);
        driver::submit(ledger, request, &actor, chain_id)
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// What an operation acts on, as chosen by the sampler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subject {
    Transfer { nft: NftRef, recipient: Address },
    EditMetadata(NftRef),
    Mint { sender: Address, recipient: Address },
    Burn(NftRef),
}

impl Subject {
    /// The address that pays and signs.
    pub fn actor(&self) -> &Address {
        match self {
            Subject::Transfer { nft, .. } => &nft.owner,
            Subject::EditMetadata(nft) | Subject::Burn(nft) => &nft.owner,
            Subject::Mint { sender, .. } => sender,
        }
    }
}

/// Result of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationOutcome {
    /// Nothing eligible to act on. Not an error.
    NoOp,
    /// The ledger accepted the request.
    Success(Request),
    /// Resolution failed or the ledger rejected the request.
    Failure(OperationError),
}

impl OperationOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, OperationOutcome::Success(_))
    }

    pub fn is_noop(&self) -> bool {
        matches!(self, OperationOutcome::NoOp)
    }

    pub fn request(&self) -> Option<&Request> {
        match self {
            OperationOutcome::Success(request) => Some(request),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&OperationError> {
        match self {
            OperationOutcome::Failure(e) => Some(e),
            _ => None,
        }
    }

    /// Flatten into a serialisable descriptor for logs and reports.
    pub fn to_operation_msg(&self, kind: OperationKind) -> OperationMsg {
        let (ok, comment) = match self {
            OperationOutcome::NoOp => (false, "no-operation".to_string()),
            OperationOutcome::Success(_) => (true, String::new()),
            OperationOutcome::Failure(e) => (false, e.to_string()),
        };
        OperationMsg {
            route: nft_sim_types::ROUTE.to_string(),
            name: kind.name().to_string(),
            ok,
            comment,
            request: self.request().cloned(),
        }
    }
}

/// Serialisable summary of one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationMsg {
    pub route: String,
    pub name: String,
    pub ok: bool,
    pub comment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<Request>,
}
