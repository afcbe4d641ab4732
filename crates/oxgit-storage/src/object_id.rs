//! Object identifiers for content-addressed storage.
//!
//! Objects are named by the SHA-1 digest of their canonical serialized form,
//! the same scheme git uses for loose objects. The digest is held as raw bytes
//! and rendered as 40 lowercase hex characters on disk and on the command line.

use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use std::fmt;
use std::str::FromStr;

/// Length of object IDs in bytes (SHA-1 = 20 bytes)
pub const HASH_LEN: usize = 20;

/// Length of the hex rendering of an object ID.
pub const HEX_LEN: usize = HASH_LEN * 2;

/// Content-addressed object identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId([u8; HASH_LEN]);

impl ObjectId {
    /// Create an ObjectId from raw bytes.
    pub fn from_bytes(bytes: [u8; HASH_LEN]) -> Self {
        Self(bytes)
    }

    /// Create an ObjectId from a hex string.
    ///
    /// Accepts upper or lower case digits; the canonical rendering is always
    /// lowercase.
    pub fn from_hex(hex: &str) -> Result<Self, ObjectIdError> {
        if hex.len() != HEX_LEN {
            return Err(ObjectIdError::InvalidHexLength {
                expected: HEX_LEN,
                actual: hex.len(),
            });
        }
        let mut bytes = [0u8; HASH_LEN];
        hex::decode_to_slice(hex, &mut bytes).map_err(|_| ObjectIdError::InvalidHexCharacter)?;
        Ok(Self(bytes))
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8; HASH_LEN] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Hash data to produce an ObjectId.
    ///
    /// Callers hash the canonical serialized form, never bare content.
    pub fn hash(data: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(data);
        let result = hasher.finalize();
        let mut bytes = [0u8; HASH_LEN];
        bytes.copy_from_slice(&result);
        Self(bytes)
    }
}

impl FromStr for ObjectId {
    type Err = ObjectIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", &self.to_hex()[..12])
    }
}

/// Error type for ObjectId parsing.
#[derive(Debug, thiserror::Error)]
pub enum ObjectIdError {
    #[error("invalid hex length: expected {expected}, got {actual}")]
    InvalidHexLength { expected: usize, actual: usize },

    #[error("invalid hex character")]
    InvalidHexCharacter,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_produces_consistent_results() {
        let id1 = ObjectId::hash(b"hello, oxgit!");
        let id2 = ObjectId::hash(b"hello, oxgit!");
        assert_eq!(id1, id2);
    }

    #[test]
    fn test_different_data_produces_different_hashes() {
        let id1 = ObjectId::hash(b"hello");
        let id2 = ObjectId::hash(b"world");
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_known_sha1_vectors() {
        assert_eq!(
            ObjectId::hash(b"").to_hex(),
            "da39a3ee5e6b4b0d3255bfef95601890afd80709"
        );
        assert_eq!(
            ObjectId::hash(b"abc").to_hex(),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
    }

    #[test]
    fn test_hex_is_lowercase_and_40_chars() {
        let hex = ObjectId::hash(b"test data").to_hex();
        assert_eq!(hex.len(), HEX_LEN);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_hex_roundtrip() {
        let original = ObjectId::hash(b"test data");
        let parsed: ObjectId = original.to_hex().parse().unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_from_hex_accepts_uppercase() {
        let lower = "0a5159e4fd9efdc3530c880fa15b672f08d47421";
        let upper = lower.to_ascii_uppercase();
        assert_eq!(
            ObjectId::from_hex(lower).unwrap(),
            ObjectId::from_hex(&upper).unwrap()
        );
    }

    #[test]
    fn test_from_hex_invalid_length() {
        let result = ObjectId::from_hex("0123");
        assert!(matches!(
            result,
            Err(ObjectIdError::InvalidHexLength {
                expected: 40,
                actual: 4
            })
        ));
    }

    #[test]
    fn test_from_hex_invalid_character() {
        let invalid = "g".repeat(HEX_LEN);
        let result = ObjectId::from_hex(&invalid);
        assert!(matches!(result, Err(ObjectIdError::InvalidHexCharacter)));
    }

    #[test]
    fn test_serde_roundtrip() {
        let id = ObjectId::hash(b"serde");
        let json = serde_json::to_string(&id).unwrap();
        let parsed: ObjectId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }
}
