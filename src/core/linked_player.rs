//! Linked Java account carried inside an identity record.
//!
//! Serialized as a single `;`-separated token that never contains a null
//! byte, so it fits into one field of the identity payload:
//!
//! ```text
//! <javaUsername>;<javaUniqueId>;<bedrockId>
//! ```
//!
//! The literal `null` stands for "no linked player".

use crate::error::{constants, BridgeError, Result};
use std::fmt;
use uuid::Uuid;

/// Token written in place of an absent linked player
pub const ABSENT_TOKEN: &str = "null";

const SEPARATOR: char = ';';
const EXPECTED_PARTS: usize = 3;

/// A Java Edition account linked to a proxied Bedrock session
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LinkedPlayer {
    java_username: String,
    java_unique_id: Uuid,
    bedrock_id: Uuid,
}

impl LinkedPlayer {
    /// Build a linked player.
    ///
    /// # Errors
    /// Returns [`BridgeError::LinkedPlayer`] when the name contains `;` or a
    /// null byte, since it could not be decoded back from the token.
    pub fn new(
        java_username: impl Into<String>,
        java_unique_id: Uuid,
        bedrock_id: Uuid,
    ) -> Result<Self> {
        let java_username = java_username.into();
        if java_username.contains([SEPARATOR, '\0']) {
            return Err(BridgeError::LinkedPlayer(format!(
                "{}: {java_username:?}",
                constants::ERR_LINKED_NAME
            )));
        }

        Ok(Self {
            java_username,
            java_unique_id,
            bedrock_id,
        })
    }

    pub fn java_username(&self) -> &str {
        &self.java_username
    }

    /// Unique id of the linked Java account
    pub fn java_unique_id(&self) -> Uuid {
        self.java_unique_id
    }

    pub fn bedrock_id(&self) -> Uuid {
        self.bedrock_id
    }

    /// Decode a linked-player token.
    ///
    /// `null`, and any token without exactly three parts, decode to `None`.
    ///
    /// # Errors
    /// Returns [`BridgeError::LinkedPlayer`] when a three-part token carries an
    /// id that is not a UUID.
    pub fn decode(token: &str) -> Result<Option<Self>> {
        if token == ABSENT_TOKEN {
            return Ok(None);
        }

        let parts: Vec<&str> = token.split(SEPARATOR).collect();
        if parts.len() != EXPECTED_PARTS {
            return Ok(None);
        }

        let java_unique_id = Uuid::parse_str(parts[1]).map_err(|e| {
            BridgeError::LinkedPlayer(format!("{}: {e}", constants::ERR_LINKED_JAVA_ID))
        })?;
        let bedrock_id = Uuid::parse_str(parts[2]).map_err(|e| {
            BridgeError::LinkedPlayer(format!("{}: {e}", constants::ERR_LINKED_BEDROCK_ID))
        })?;

        // Neither separator can survive the split
        Ok(Some(Self {
            java_username: parts[0].to_string(),
            java_unique_id,
            bedrock_id,
        }))
    }

    /// Encode an optional linked player as a payload field
    pub fn encode_optional(player: Option<&Self>) -> String {
        player.map_or_else(|| ABSENT_TOKEN.to_string(), ToString::to_string)
    }
}

impl fmt::Display for LinkedPlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{SEPARATOR}{}{SEPARATOR}{}",
            self.java_username,
            self.java_unique_id.hyphenated(),
            self.bedrock_id.hyphenated()
        )
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    fn sample() -> LinkedPlayer {
        LinkedPlayer::new(
            "Notch",
            Uuid::parse_str("069a79f4-44e9-4726-a5be-fca90e38aaf5").unwrap(),
            Uuid::from_u64_pair(0, 2_535_428_650_797_285),
        )
        .unwrap()
    }

    #[test]
    fn test_null_is_absent() {
        assert_eq!(LinkedPlayer::decode("null").unwrap(), None);
        assert_eq!(LinkedPlayer::encode_optional(None), "null");
    }

    #[test]
    fn test_token_roundtrip() {
        let player = sample();
        let token = player.to_string();
        assert!(!token.contains('\0'));
        assert_eq!(
            token,
            "Notch;069a79f4-44e9-4726-a5be-fca90e38aaf5;00000000-0000-0000-0009-01f57c1588e5"
        );
        assert_eq!(LinkedPlayer::decode(&token).unwrap(), Some(player));
    }

    #[test]
    fn test_wrong_arity_is_absent() {
        assert_eq!(LinkedPlayer::decode("Notch;abc").unwrap(), None);
        assert_eq!(LinkedPlayer::decode("").unwrap(), None);
    }

    #[test]
    fn test_name_with_separator_rejected() {
        let id = Uuid::from_u64_pair(0, 1);
        assert!(matches!(
            LinkedPlayer::new("a;b", id, id),
            Err(BridgeError::LinkedPlayer(_))
        ));
        assert!(matches!(
            LinkedPlayer::new("a\0b", id, id),
            Err(BridgeError::LinkedPlayer(_))
        ));
    }

    #[test]
    fn test_bad_uuid_is_error() {
        let err = LinkedPlayer::decode("Notch;not-a-uuid;also-not").unwrap_err();
        assert!(matches!(err, BridgeError::LinkedPlayer(_)));
    }
}
