//! # Randomized NFT operation generation
//!
//! Produces valid, plausible NFT requests against a live ledger, submits them
//! and reports what happened, without stopping on failure.
//!
//! ## Module Organization
//!
//! - [`operations`]: The operation pipeline (sample, resolve, build, submit)
//! - [`ledger`]: The ledger contract plus the in-memory reference ledger
//! - [`account`]: Simulation accounts and account selection
//! - [`rand_util`]: Random strings and fee selection
//! - [`tx`]: Transaction assembly and signing
//! - [`weights`]: Weighted choice between operation kinds
//! - [`genesis`]: Random initial state
//! - [`errors`]: Per-invocation error types
//!
//! ## Example Usage
//!
//! ```
//! use nft_sim_core::simulation::{
//!     random_accounts, random_genesis, GenesisConfig, OperationKind,
//! };
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let accounts = random_accounts(&mut rng, 4);
//! let mut ledger = random_genesis(&mut rng, &accounts, "nft-sim-1", &GenesisConfig::default());
//!
//! let outcome = OperationKind::TransferNft.invoke(&mut rng, &mut ledger, &accounts, "nft-sim-1");
//! println!("{:?}", outcome);
//! ```

pub mod account;
pub mod errors;
pub mod genesis;
pub mod ledger;
pub mod operations;
pub mod rand_util;
pub mod tx;
pub mod weights;

pub use account::{find_account, random_acc, random_accounts, SimAccount};
pub use errors::{FeeError, OperationError};
pub use genesis::{random_genesis, GenesisConfig, DEFAULT_GENESIS_TIME};
pub use ledger::{
    codes, AccountState, DeliverResult, InMemoryLedger, LedgerHandle, LedgerSnapshot,
    SharedLedger, VestingLock,
};
pub use operations::{OperationKind, OperationMsg, OperationOutcome, Subject};
pub use rand_util::{rand_string_of_length, random_fees};
pub use tx::gen_tx;
pub use weights::{select_operation, weighted_operations, OperationWeights, WeightedOperation};
