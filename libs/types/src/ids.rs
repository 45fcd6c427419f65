//! Identifier types for funding entities
//!
//! Projects are numbered by the on-chain grant registry, donors are wallet
//! identities, and rounds use UUID v7 so they sort by creation time.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::errors::InvalidInput;

/// Project identifier assigned by the grant registry (`nextId` counter)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(u64);

impl ProjectId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for ProjectId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Donor identity
///
/// Usually a wallet address. Hex addresses (`0x...`) are normalised to
/// lowercase so checksummed and plain forms aggregate as one donor.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DonorId(String);

impl DonorId {
    /// Create a new DonorId
    ///
    /// # Panics
    /// Panics if the identity is empty or only whitespace
    pub fn new(identity: impl Into<String>) -> Self {
        match Self::try_new(identity) {
            Ok(id) => id,
            Err(err) => panic!("DonorId must not be empty: {err}"),
        }
    }

    /// Try to create a DonorId, rejecting blank identities
    pub fn try_new(identity: impl Into<String>) -> Result<Self, InvalidInput> {
        let raw = identity.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(InvalidInput::InvalidDonorId { value: raw });
        }
        let normalised = if trimmed.starts_with("0x") || trimmed.starts_with("0X") {
            trimmed.to_ascii_lowercase()
        } else {
            trimmed.to_string()
        };
        Ok(Self(normalised))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DonorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for DonorId {
    type Error = InvalidInput;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<DonorId> for String {
    fn from(id: DonorId) -> Self {
        id.0
    }
}

impl From<&str> for DonorId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Unique identifier for a matching round
///
/// Uses UUID v7 for time-based sorting of rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoundId(Uuid);

impl RoundId {
    /// Create a new RoundId with current timestamp
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create from existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RoundId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
