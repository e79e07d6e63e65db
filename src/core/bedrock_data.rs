//! # Identity Payload Codec
//!
//! Fixed-arity, null-delimited serialization of the identity record a proxy
//! embeds in the handshake hostname.
//!
//! ## Wire Format
//! Twelve fields joined by a single `0x00` byte, in this order:
//!
//! ```text
//! version \0 username \0 xuid \0 deviceOs \0 languageCode \0 uiProfile \0
//! inputMode \0 ip \0 linkedPlayer \0 fromProxy \0 subscribeId \0 verifyCode
//! ```
//!
//! - numeric fields are base-10 ASCII
//! - `linkedPlayer` is a [`LinkedPlayer`] token or the literal `null`
//! - `fromProxy` is `1` or `0`
//!
//! ## Malformed Input
//! A payload that does not split into exactly twelve fields decodes to
//! [`DecodedPayload::Invalid`] carrying the observed count. It never returns
//! an error, so a forged payload degrades to "no identity" instead of
//! failing the connection. A structurally valid payload with a non-numeric
//! numeric field is a [`BridgeError::NumericField`] error.

use crate::core::linked_player::LinkedPlayer;
use crate::error::{BridgeError, Result};
use std::fmt;

/// Field separator of the decrypted payload
pub const FIELD_SEPARATOR: char = '\0';

/// Identity of a proxied player, as sent by the proxy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityRecord {
    version: String,
    username: String,
    xuid: String,
    device_os: i32,
    language_code: String,
    ui_profile: i32,
    input_mode: i32,
    ip: String,
    linked_player: Option<LinkedPlayer>,
    from_proxy: bool,
    subscribe_id: i32,
    verify_code: String,
}

impl IdentityRecord {
    /// Number of fields in the serialized form
    pub const EXPECTED_FIELDS: usize = 12;

    #[allow(clippy::too_many_arguments)]
    pub fn new(
        version: impl Into<String>,
        username: impl Into<String>,
        xuid: impl Into<String>,
        device_os: i32,
        language_code: impl Into<String>,
        ui_profile: i32,
        input_mode: i32,
        ip: impl Into<String>,
        linked_player: Option<LinkedPlayer>,
        from_proxy: bool,
        subscribe_id: i32,
        verify_code: impl Into<String>,
    ) -> Self {
        Self {
            version: version.into(),
            username: username.into(),
            xuid: xuid.into(),
            device_os,
            language_code: language_code.into(),
            ui_profile,
            input_mode,
            ip: ip.into(),
            linked_player,
            from_proxy,
            subscribe_id,
            verify_code: verify_code.into(),
        }
    }

    /// Record without a linked player that did not pass through another proxy.
    ///
    /// Takes `ui_profile` and `input_mode` in the same order as [`Self::new`].
    #[allow(clippy::too_many_arguments)]
    pub fn unlinked(
        version: impl Into<String>,
        username: impl Into<String>,
        xuid: impl Into<String>,
        device_os: i32,
        language_code: impl Into<String>,
        ui_profile: i32,
        input_mode: i32,
        ip: impl Into<String>,
        subscribe_id: i32,
        verify_code: impl Into<String>,
    ) -> Self {
        Self::new(
            version,
            username,
            xuid,
            device_os,
            language_code,
            ui_profile,
            input_mode,
            ip,
            None,
            false,
            subscribe_id,
            verify_code,
        )
    }

    /// Serialize into the null-delimited wire form
    pub fn encode(&self) -> String {
        self.to_string()
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Platform account id (Xbox user id)
    pub fn xuid(&self) -> &str {
        &self.xuid
    }

    pub fn device_os(&self) -> i32 {
        self.device_os
    }

    pub fn language_code(&self) -> &str {
        &self.language_code
    }

    pub fn ui_profile(&self) -> i32 {
        self.ui_profile
    }

    pub fn input_mode(&self) -> i32 {
        self.input_mode
    }

    /// Real address of the player as seen by the proxy
    pub fn ip(&self) -> &str {
        &self.ip
    }

    pub fn linked_player(&self) -> Option<&LinkedPlayer> {
        self.linked_player.as_ref()
    }

    pub fn has_player_link(&self) -> bool {
        self.linked_player.is_some()
    }

    pub fn is_from_proxy(&self) -> bool {
        self.from_proxy
    }

    pub fn subscribe_id(&self) -> i32 {
        self.subscribe_id
    }

    pub fn verify_code(&self) -> &str {
        &self.verify_code
    }
}

impl fmt::Display for IdentityRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const S: char = FIELD_SEPARATOR;
        write!(
            f,
            "{}{S}{}{S}{}{S}{}{S}{}{S}{}{S}{}{S}{}{S}{}{S}{}{S}{}{S}{}",
            self.version,
            self.username,
            self.xuid,
            self.device_os,
            self.language_code,
            self.ui_profile,
            self.input_mode,
            self.ip,
            LinkedPlayer::encode_optional(self.linked_player.as_ref()),
            if self.from_proxy { "1" } else { "0" },
            self.subscribe_id,
            self.verify_code,
        )
    }
}

/// Result of decoding a decrypted payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedPayload {
    /// All twelve fields were present and parsed
    Valid(IdentityRecord),
    /// The payload split into the wrong number of fields
    Invalid { observed_fields: usize },
}

impl DecodedPayload {
    /// Decode a null-delimited payload.
    ///
    /// # Errors
    /// Returns [`BridgeError::NumericField`] when a twelve-field payload has a
    /// non-numeric numeric field, and [`BridgeError::LinkedPlayer`] when the
    /// linked-player token carries an invalid id.
    pub fn decode(raw: &str) -> Result<Self> {
        let fields: Vec<&str> = raw.split(FIELD_SEPARATOR).collect();
        let [version, username, xuid, device_os, language_code, ui_profile, input_mode, ip, linked, from_proxy, subscribe_id, verify_code] =
            fields[..]
        else {
            return Ok(DecodedPayload::Invalid {
                observed_fields: fields.len(),
            });
        };

        Ok(DecodedPayload::Valid(IdentityRecord {
            version: version.to_string(),
            username: username.to_string(),
            xuid: xuid.to_string(),
            device_os: parse_numeric("device_os", device_os)?,
            language_code: language_code.to_string(),
            ui_profile: parse_numeric("ui_profile", ui_profile)?,
            input_mode: parse_numeric("input_mode", input_mode)?,
            ip: ip.to_string(),
            linked_player: LinkedPlayer::decode(linked)?,
            from_proxy: from_proxy == "1",
            subscribe_id: parse_numeric("subscribe_id", subscribe_id)?,
            verify_code: verify_code.to_string(),
        }))
    }

    /// Number of fields observed while decoding
    pub fn field_count(&self) -> usize {
        match self {
            DecodedPayload::Valid(_) => IdentityRecord::EXPECTED_FIELDS,
            DecodedPayload::Invalid { observed_fields } => *observed_fields,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, DecodedPayload::Valid(_))
    }

    /// Account id, present only on a valid record
    pub fn xuid(&self) -> Option<&str> {
        self.record().map(IdentityRecord::xuid)
    }

    pub fn record(&self) -> Option<&IdentityRecord> {
        match self {
            DecodedPayload::Valid(record) => Some(record),
            DecodedPayload::Invalid { .. } => None,
        }
    }

    pub fn into_record(self) -> Option<IdentityRecord> {
        match self {
            DecodedPayload::Valid(record) => Some(record),
            DecodedPayload::Invalid { .. } => None,
        }
    }
}

fn parse_numeric(field: &'static str, value: &str) -> Result<i32> {
    value.parse::<i32>().map_err(|_| BridgeError::NumericField {
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use uuid::Uuid;

    fn sample() -> IdentityRecord {
        IdentityRecord::new(
            "2.2.0-SNAPSHOT",
            "Steve",
            "2535428650797285",
            7,
            "en_US",
            0,
            2,
            "203.0.113.7",
            None,
            false,
            0,
            "123456",
        )
    }

    #[test]
    fn test_encode_layout() {
        let encoded = sample().encode();
        assert_eq!(
            encoded,
            "2.2.0-SNAPSHOT\0Steve\02535428650797285\07\0en_US\00\02\0203.0.113.7\0null\00\00\0123456"
        );
        assert_eq!(encoded.split('\0').count(), IdentityRecord::EXPECTED_FIELDS);
    }

    #[test]
    fn test_decode_valid() {
        let decoded = DecodedPayload::decode(&sample().encode()).unwrap();
        assert!(decoded.is_valid());
        assert_eq!(decoded.field_count(), 12);
        assert_eq!(decoded.xuid(), Some("2535428650797285"));
        assert_eq!(decoded.into_record(), Some(sample()));
    }

    #[test]
    fn test_roundtrip_with_link() {
        let record = IdentityRecord::new(
            "2.2.0",
            "Alex",
            "42",
            1,
            "de_DE",
            1,
            3,
            "198.51.100.2",
            Some(LinkedPlayer::new(
                "AlexJava",
                Uuid::from_u64_pair(7, 9),
                Uuid::from_u64_pair(0, 42),
            )
            .unwrap()),
            true,
            -5,
            "",
        );
        let decoded = DecodedPayload::decode(&record.encode()).unwrap();
        assert_eq!(decoded, DecodedPayload::Valid(record));
    }

    #[test]
    fn test_unlinked_keeps_field_order() {
        let record = IdentityRecord::unlinked("v", "n", "1", 0, "en", 4, 5, "ip", 0, "c");
        assert_eq!(record.ui_profile(), 4);
        assert_eq!(record.input_mode(), 5);
        assert!(!record.has_player_link());
        assert!(!record.is_from_proxy());
    }

    #[test]
    fn test_wrong_field_count() {
        let decoded = DecodedPayload::decode("a\0b\0c").unwrap();
        assert_eq!(decoded, DecodedPayload::Invalid { observed_fields: 3 });
        assert_eq!(decoded.field_count(), 3);
        assert_eq!(decoded.xuid(), None);
        assert!(decoded.record().is_none());
    }

    #[test]
    fn test_empty_input_is_one_field() {
        let decoded = DecodedPayload::decode("").unwrap();
        assert_eq!(decoded.field_count(), 1);
        assert!(!decoded.is_valid());
    }

    #[test]
    fn test_thirteen_fields_invalid() {
        let raw = format!("{}\0extra", sample().encode());
        let decoded = DecodedPayload::decode(&raw).unwrap();
        assert_eq!(decoded.field_count(), 13);
    }

    #[test]
    fn test_non_numeric_field_is_error() {
        let raw = sample().encode().replacen("\07\0", "\0seven\0", 1);
        match DecodedPayload::decode(&raw) {
            Err(BridgeError::NumericField { field, value }) => {
                assert_eq!(field, "device_os");
                assert_eq!(value, "seven");
            }
            other => panic!("Unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_from_proxy_only_on_literal_one() {
        let mut fields: Vec<String> = sample().encode().split('\0').map(String::from).collect();
        fields[9] = "true".into();
        let decoded = DecodedPayload::decode(&fields.join("\0")).unwrap();
        assert!(!decoded.record().unwrap().is_from_proxy());

        fields[9] = "1".into();
        let decoded = DecodedPayload::decode(&fields.join("\0")).unwrap();
        assert!(decoded.record().unwrap().is_from_proxy());
    }
}
