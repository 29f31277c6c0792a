//! NFT references and the four state-transition requests.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::address::Address;

/// Message route shared by all NFT requests.
pub const ROUTE: &str = "nft";

/// One NFT and the address that currently owns it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NftRef {
    pub owner: Address,
    pub denom: String,
    pub id: String,
}

impl NftRef {
    pub fn new(owner: Address, denom: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            owner,
            denom: denom.into(),
            id: id.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgTransferNft {
    pub sender: Address,
    pub recipient: Address,
    pub denom: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgEditNftMetadata {
    pub owner: Address,
    pub id: String,
    pub denom: String,
    pub token_uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgMintNft {
    pub sender: Address,
    pub recipient: Address,
    pub id: String,
    pub denom: String,
    pub token_uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgBurnNft {
    pub owner: Address,
    pub id: String,
    pub denom: String,
}

/// A state-transition request against the NFT ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    TransferNft(MsgTransferNft),
    EditNftMetadata(MsgEditNftMetadata),
    MintNft(MsgMintNft),
    BurnNft(MsgBurnNft),
}

/// Stateless rejection of a malformed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidRequest {
    EmptyDenom,
    EmptyId,
}

impl fmt::Display for InvalidRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidRequest::EmptyDenom => write!(f, "invalid denom: denom cannot be blank"),
            InvalidRequest::EmptyId => write!(f, "invalid id: id cannot be blank"),
        }
    }
}

impl std::error::Error for InvalidRequest {}

impl Request {
    pub fn route(&self) -> &'static str {
        ROUTE
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Request::TransferNft(_) => "transfer_nft",
            Request::EditNftMetadata(_) => "edit_nft_metadata",
            Request::MintNft(_) => "mint_nft",
            Request::BurnNft(_) => "burn_nft",
        }
    }

    /// The address that must sign this request.
    pub fn signer(&self) -> &Address {
        match self {
            Request::TransferNft(m) => &m.sender,
            Request::EditNftMetadata(m) => &m.owner,
            Request::MintNft(m) => &m.sender,
            Request::BurnNft(m) => &m.owner,
        }
    }

    pub fn denom(&self) -> &str {
        match self {
            Request::TransferNft(m) => &m.denom,
            Request::EditNftMetadata(m) => &m.denom,
            Request::MintNft(m) => &m.denom,
            Request::BurnNft(m) => &m.denom,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Request::TransferNft(m) => &m.id,
            Request::EditNftMetadata(m) => &m.id,
            Request::MintNft(m) => &m.id,
            Request::BurnNft(m) => &m.id,
        }
    }

    /// Stateless checks run by the ledger before any handler.
    pub fn validate_basic(&self) -> Result<(), InvalidRequest> {
        if self.denom().trim().is_empty() {
            return Err(InvalidRequest::EmptyDenom);
        }
        if self.id().trim().is_empty() {
            return Err(InvalidRequest::EmptyId);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(n: u8) -> Address {
        let mut bytes = [0u8; 20];
        bytes[19] = n;
        Address::new(bytes)
    }

    #[test]
    fn test_signer_per_variant() {
        let transfer = Request::TransferNft(MsgTransferNft {
            sender: addr(1),
            recipient: addr(2),
            denom: "d".into(),
            id: "i".into(),
        });
        assert_eq!(transfer.signer(), &addr(1));
        assert_eq!(transfer.type_name(), "transfer_nft");

        let burn = Request::BurnNft(MsgBurnNft {
            owner: addr(3),
            id: "i".into(),
            denom: "d".into(),
        });
        assert_eq!(burn.signer(), &addr(3));
        assert_eq!(burn.route(), ROUTE);
    }

    #[test]
    fn test_validate_basic_rejects_blank_fields() {
        let mint = Request::MintNft(MsgMintNft {
            sender: addr(1),
            recipient: addr(1),
            id: "  ".into(),
            denom: "d".into(),
            token_uri: String::new(),
        });
        assert_eq!(mint.validate_basic(), Err(InvalidRequest::EmptyId));

        let edit = Request::EditNftMetadata(MsgEditNftMetadata {
            owner: addr(1),
            id: "x".into(),
            denom: "".into(),
            token_uri: "uri".into(),
        });
        assert_eq!(edit.validate_basic(), Err(InvalidRequest::EmptyDenom));
    }

    #[test]
    fn test_request_json_is_tagged() {
        let burn = Request::BurnNft(MsgBurnNft {
            owner: addr(9),
            id: "001".into(),
            denom: "collectible".into(),
        });
        let json = serde_json::to_value(&burn).unwrap();
        assert_eq!(json["type"], "burn_nft");
        assert_eq!(json["id"], "001");
    }
}
