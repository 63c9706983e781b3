//! The strongly-typed identifier used across the domain.

use core::fmt;
use core::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Length of the canonical string form (`RAW_LEN` bytes, hex-encoded).
pub const ENCODED_LEN: usize = 24;

const RAW_LEN: usize = 12;

/// Identifier of a stored resource (an identity or a product).
///
/// Twelve bytes rendered as 24 lowercase hex characters: a 4-byte big-endian
/// unix-seconds timestamp followed by 8 random bytes. Ids therefore sort
/// roughly by creation time.
///
/// Parsing is strict (exactly 24 hex characters, either case); rendering is
/// always lowercase. Serializes as the canonical string.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceId([u8; RAW_LEN]);

/// Error returned when a string is not a valid [`ResourceId`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("invalid identifier: expected a 24-character hex string")]
pub struct ParseIdError;

impl ResourceId {
    /// Mint a fresh identifier stamped with the current time.
    ///
    /// Prefer [`ResourceId::from_bytes`] in tests for determinism.
    pub fn generate() -> Self {
        let secs = chrono::Utc::now().timestamp() as u32;
        let mut raw = [0u8; RAW_LEN];
        raw[..4].copy_from_slice(&secs.to_be_bytes());
        rand::thread_rng().fill(&mut raw[4..]);
        Self(raw)
    }

    pub fn from_bytes(raw: [u8; RAW_LEN]) -> Self {
        Self(raw)
    }

    pub fn as_bytes(&self) -> &[u8; RAW_LEN] {
        &self.0
    }

    /// Seconds-precision creation timestamp embedded in the id.
    pub fn timestamp_secs(&self) -> u32 {
        u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for ResourceId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != ENCODED_LEN {
            return Err(ParseIdError);
        }
        let mut raw = [0u8; RAW_LEN];
        hex::decode_to_slice(s, &mut raw).map_err(|_| ParseIdError)?;
        Ok(Self(raw))
    }
}

impl TryFrom<String> for ResourceId {
    type Error = ParseIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ResourceId> for String {
    fn from(id: ResourceId) -> Self {
        hex::encode(id.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_form_and_roundtrips() {
        let id: ResourceId = "5ab8dbcc6539f91c2288b0c1".parse().unwrap();
        assert_eq!(id.to_string(), "5ab8dbcc6539f91c2288b0c1");
    }

    #[test]
    fn parsing_accepts_uppercase_but_renders_lowercase() {
        let id: ResourceId = "5AB8DBCC6539F91C2288B0C1".parse().unwrap();
        assert_eq!(id.to_string(), "5ab8dbcc6539f91c2288b0c1");
    }

    #[test]
    fn rejects_wrong_length() {
        assert_eq!("123".parse::<ResourceId>(), Err(ParseIdError));
        assert_eq!(
            "5ab8dbcc6539f91c2288b0c".parse::<ResourceId>(),
            Err(ParseIdError)
        );
        assert_eq!(
            "5ab8dbcc6539f91c2288b0c12".parse::<ResourceId>(),
            Err(ParseIdError)
        );
        assert_eq!("".parse::<ResourceId>(), Err(ParseIdError));
    }

    #[test]
    fn rejects_non_hex_characters() {
        assert_eq!(
            "zzb8dbcc6539f91c2288b0c1".parse::<ResourceId>(),
            Err(ParseIdError)
        );
        assert_eq!(
            "5ab8dbcc6539f91c2288b0g1".parse::<ResourceId>(),
            Err(ParseIdError)
        );
    }

    #[test]
    fn generated_ids_are_canonical_and_unique() {
        let a = ResourceId::generate();
        let b = ResourceId::generate();
        assert_eq!(a.to_string().len(), ENCODED_LEN);
        assert!(a.to_string().chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
        assert_eq!(a.to_string().parse::<ResourceId>(), Ok(a));
    }

    #[test]
    fn generated_ids_embed_the_current_time() {
        let before = chrono::Utc::now().timestamp() as u32;
        let id = ResourceId::generate();
        let after = chrono::Utc::now().timestamp() as u32;
        assert!(id.timestamp_secs() >= before);
        assert!(id.timestamp_secs() <= after);
    }

    #[test]
    fn ordering_follows_the_timestamp_prefix() {
        let older = ResourceId::from_bytes([0, 0, 0, 1, 9, 9, 9, 9, 9, 9, 9, 9]);
        let newer = ResourceId::from_bytes([0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert!(older < newer);
    }

    #[test]
    fn serializes_as_the_canonical_string() {
        let id: ResourceId = "5ab8dbcc6539f91c2288b0c1".parse().unwrap();
        let value = serde_json::to_value(id).unwrap();
        assert_eq!(value, serde_json::json!("5ab8dbcc6539f91c2288b0c1"));
        let back: ResourceId = serde_json::from_value(value).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn deserialization_rejects_invalid_strings() {
        let result: Result<ResourceId, _> = serde_json::from_value(serde_json::json!("nope"));
        assert!(result.is_err());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn any_24_hex_string_roundtrips(s in "[0-9a-f]{24}") {
                let id: ResourceId = s.parse().unwrap();
                prop_assert_eq!(id.to_string(), s);
            }

            #[test]
            fn any_other_length_is_rejected(s in "[0-9a-f]{0,23}") {
                prop_assert_eq!(s.parse::<ResourceId>(), Err(ParseIdError));
            }

            #[test]
            fn raw_bytes_roundtrip_through_the_string_form(raw in any::<[u8; 12]>()) {
                let id = ResourceId::from_bytes(raw);
                let reparsed: ResourceId = id.to_string().parse().unwrap();
                prop_assert_eq!(reparsed.as_bytes(), &raw);
            }
        }
    }
}
