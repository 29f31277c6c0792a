//! NFT Sim
//!
//! Randomized NFT operation simulator:
//!
//! - **Operation generation**: Mint, burn, transfer and metadata edits built
//!   from live ledger state with random fees
//! - **Reference ledger**: In-memory accounts and NFT collections with
//!   snapshot save/load
//! - **Runner**: Seeded multi-block simulations with JSON reports
//!
//! See [`nft_sim_core::simulation`] for the operation pipeline and
//! [`nft_sim_core::runner`] for the simulation loop.

pub mod args;
pub mod cli;

pub use nft_sim_core::{runner, simulation};
pub use nft_sim_types as types;
