//! Shared types for the nft-sim workspace.
//!
//! This crate holds the serialisable data model used by the generator and the
//! reference ledger: addresses, coin balances, NFT references, the four NFT
//! requests and signed transactions.

pub mod address;
pub mod coins;
pub mod msg;
pub mod transaction;

pub use address::{Address, AddressParseError, ADDRESS_LENGTH};
pub use coins::{Coin, Coins, DEFAULT_DENOM};
pub use msg::{
    InvalidRequest, MsgBurnNft, MsgEditNftMetadata, MsgMintNft, MsgTransferNft, NftRef, Request,
    ROUTE,
};
pub use transaction::{
    public_key_from_secret, sign, Fee, SignDoc, Signature, SignedTransaction, DEFAULT_GEN_TX_GAS,
};
