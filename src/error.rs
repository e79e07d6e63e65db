//! # Error Types
//!
//! Error handling for the handshake bridge.
//!
//! This module defines every error variant that can surface while loading key
//! material, decrypting an embedded payload, or decoding an identity record.
//!
//! ## Error Categories
//! - **I/O Errors**: key file and configuration file failures
//! - **Cryptographic Errors**: header mismatch, bad Base64, failed AEAD open
//! - **Format Errors**: non-numeric numeric fields, broken linked-player tokens
//!
//! Malformed field counts are *not* errors: they decode to
//! [`DecodedPayload::Invalid`](crate::core::bedrock_data::DecodedPayload::Invalid).
//! Nothing in this taxonomy is allowed to escape
//! [`HandshakeFilter`](crate::protocol::filter::HandshakeFilter); the filter
//! downgrades every variant to a pass-through.
//!
//! ## Example Usage
//! ```rust
//! use floodgate_bridge::error::{BridgeError, Result};
//! use tracing::{info, error};
//!
//! fn read_key(path: &str) -> Result<Vec<u8>> {
//!     std::fs::read(path).map_err(BridgeError::Io)
//! }
//!
//! fn main() {
//!     match read_key("key.pem") {
//!         Ok(key) => info!(len = key.len(), "Loaded key"),
//!         Err(e) => error!(error=%e, "Error reading key"),
//!     }
//! }
//! ```

use std::io;
use thiserror::Error;

/// Error message constants to reduce allocations in error paths.
pub mod constants {
    /// Cryptographic errors
    pub const ERR_DECRYPTION_FAILED: &str = "Decryption failed";
    pub const ERR_ENCRYPTION_FAILED: &str = "Encryption failed";
    pub const ERR_MISSING_SEPARATOR: &str = "Payload is missing the IV separator";
    pub const ERR_SHORT_IV: &str = "Payload IV has an unexpected length";

    /// Key material errors
    pub const ERR_KEY_LENGTH: &str = "Key must be 16 or 32 bytes";
    pub const ERR_KEY_EMPTY: &str = "Key file is empty";

    /// Linked-player errors
    pub const ERR_LINKED_JAVA_ID: &str = "Invalid java unique id in linked player";
    pub const ERR_LINKED_BEDROCK_ID: &str = "Invalid bedrock id in linked player";
    pub const ERR_LINKED_NAME: &str = "Linked player name may not contain ';' or null bytes";
}

/// BridgeError is the primary error type for all bridge operations
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Key material error: {0}")]
    KeyMaterial(String),

    #[error("Invalid payload header")]
    InvalidHeader,

    #[error("Unsupported payload version: {0}")]
    UnsupportedVersion(u8),

    #[error("Decryption failed: {0}")]
    DecryptionFailure(String),

    #[error("Encryption failed: {0}")]
    EncryptionFailure(String),

    #[error("Base64 error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Field '{field}' is not a base-10 integer: {value:?}")]
    NumericField { field: &'static str, value: String },

    #[error("Linked player error: {0}")]
    LinkedPlayer(String),
}

impl BridgeError {
    /// Whether this error originated in the cipher layer
    pub fn is_crypto(&self) -> bool {
        matches!(
            self,
            BridgeError::InvalidHeader
                | BridgeError::UnsupportedVersion(_)
                | BridgeError::DecryptionFailure(_)
                | BridgeError::EncryptionFailure(_)
                | BridgeError::Base64(_)
                | BridgeError::Utf8(_)
        )
    }
}

/// Type alias for Results using BridgeError
pub type Result<T> = std::result::Result<T, BridgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crypto_classification() {
        assert!(BridgeError::InvalidHeader.is_crypto());
        assert!(BridgeError::UnsupportedVersion(3).is_crypto());
        assert!(BridgeError::DecryptionFailure("tag".into()).is_crypto());
        assert!(BridgeError::EncryptionFailure(constants::ERR_ENCRYPTION_FAILED.into()).is_crypto());
        assert!(!BridgeError::NumericField {
            field: "device_os",
            value: "x".into()
        }
        .is_crypto());
        assert!(!BridgeError::ConfigError("bad".into()).is_crypto());
    }

    #[test]
    fn test_numeric_field_message() {
        let err = BridgeError::NumericField {
            field: "subscribe_id",
            value: "abc".into(),
        };
        assert_eq!(
            err.to_string(),
            "Field 'subscribe_id' is not a base-10 integer: \"abc\""
        );
    }
}
