//! Account address type and hex normalization.
//!
//! Addresses are 20-byte values derived from a public key. They're rendered
//! as lowercase `0x`-prefixed hex with all 40 digits, but parsing also
//! accepts the short form (`0x2`) and input without the prefix.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

/// Length of an address in bytes.
pub const ADDRESS_LENGTH: usize = 20;

/// A ledger account address.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address([u8; ADDRESS_LENGTH]);

/// Error returned when a string is not a valid hex address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressParseError {
    /// More hex digits than fit in an address.
    TooLong { digits: usize },
    /// Non-hex characters in the input.
    InvalidHex { input: String },
}

impl fmt::Display for AddressParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressParseError::TooLong { digits } => write!(
                f,
                "address has {} hex digits, at most {} allowed",
                digits,
                ADDRESS_LENGTH * 2
            ),
            AddressParseError::InvalidHex { input } => {
                write!(f, "invalid hex address: {}", input)
            }
        }
    }
}

impl std::error::Error for AddressParseError {}

impl Address {
    pub const fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Derive the address owning `public_key`: the first 20 bytes of its SHA-256.
    pub fn from_public_key(public_key: &[u8; 32]) -> Self {
        let digest = Sha256::digest(public_key);
        let mut bytes = [0u8; ADDRESS_LENGTH];
        bytes.copy_from_slice(&digest[..ADDRESS_LENGTH]);
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    /// Full-form hex literal (`0x` + 40 digits).
    pub fn to_hex_literal(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Short form with leading zeros trimmed, for display.
    pub fn to_short_string(&self) -> String {
        let full = hex::encode(self.0);
        let trimmed = full.trim_start_matches('0');
        if trimmed.is_empty() {
            "0x0".to_string()
        } else {
            format!("0x{}", trimmed)
        }
    }
}

/// Normalize an address string to lowercase, `0x`-prefixed, 40 hex digits.
///
/// ```
/// use nft_sim_types::address::normalize_address;
///
/// assert_eq!(
///     normalize_address("0x2").unwrap(),
///     "0x0000000000000000000000000000000000000002"
/// );
/// assert!(normalize_address("not-hex").is_err());
/// ```
pub fn normalize_address(addr: &str) -> Result<String, AddressParseError> {
    let parsed: Address = addr.parse()?;
    Ok(parsed.to_hex_literal())
}

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        if digits.len() > ADDRESS_LENGTH * 2 {
            return Err(AddressParseError::TooLong {
                digits: digits.len(),
            });
        }
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(AddressParseError::InvalidHex {
                input: s.to_string(),
            });
        }
        let padded = format!("{:0>40}", digits.to_lowercase());
        let mut bytes = [0u8; ADDRESS_LENGTH];
        hex::decode_to_slice(&padded, &mut bytes).map_err(|_| AddressParseError::InvalidHex {
            input: s.to_string(),
        })?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex_literal())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_short_string())
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex_literal())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
