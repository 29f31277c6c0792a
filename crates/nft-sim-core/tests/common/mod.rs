#![allow(dead_code)]
//! Shared test utilities for integration tests.
//!
//! # Modules
//!
//! - `fixtures`: Ledger and account setup helpers
//! - `mocks`: Ledger wrappers that record or override execution

pub mod fixtures;
pub mod mocks;

pub use fixtures::{collectible_fixture, fixed_accounts, funded_ledger, seeded_rng, CHAIN_ID};
pub use mocks::{RecordingLedger, RejectingLedger};
