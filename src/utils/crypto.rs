//! Payload cipher.
//!
//! The proxy encrypts the identity record with AES-GCM under a pre-shared key
//! and frames it as text so it survives inside a hostname:
//!
//! ```text
//! [Header(12)] [Base64(IV)] ['!'] [Base64(Ciphertext || Tag)]
//! ```
//!
//! Key material is the raw key file contents, 16 bytes for AES-128 or 32 bytes
//! for AES-256. The cipher is immutable after construction and can be shared
//! across connection handlers behind an `Arc`.

use crate::core::header::{self, HEADER, HEADER_LENGTH, IDENTIFIER};
use crate::error::{constants, BridgeError, Result};
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes128Gcm, Aes256Gcm, Nonce};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::RngCore;
use std::fmt;
use std::path::Path;
use tracing::{debug, instrument};
use zeroize::Zeroize;

/// IV length used by the proxy
pub const IV_LENGTH: usize = 12;

/// Separator between the encoded IV and the encoded ciphertext
pub const IV_SEPARATOR: u8 = b'!';

/// Decrypts payloads embedded in handshake hostnames
pub trait PayloadCipher: Send + Sync {
    /// Decrypt a full payload, header included
    fn decrypt(&self, payload: &[u8]) -> Result<Vec<u8>>;

    /// Encrypt plaintext into a full payload, header included
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>>;

    /// Decrypt a payload and interpret the plaintext as UTF-8
    fn decrypt_to_string(&self, payload: &[u8]) -> Result<String> {
        Ok(String::from_utf8(self.decrypt(payload)?)?)
    }
}

enum AesKey {
    Aes128(Box<Aes128Gcm>),
    Aes256(Box<Aes256Gcm>),
}

/// AES-GCM payload cipher with Base64 framing
pub struct AesCipher {
    key: AesKey,
}

impl fmt::Debug for AesCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bits = match self.key {
            AesKey::Aes128(_) => 128,
            AesKey::Aes256(_) => 256,
        };
        f.debug_struct("AesCipher").field("key_bits", &bits).finish()
    }
}

impl AesCipher {
    /// Build a cipher from raw key bytes.
    ///
    /// # Errors
    /// Returns [`BridgeError::KeyMaterial`] unless the key is 16 or 32 bytes.
    pub fn new(key: &[u8]) -> Result<Self> {
        let key = match key.len() {
            16 => Aes128Gcm::new_from_slice(key).map(|c| AesKey::Aes128(Box::new(c))),
            32 => Aes256Gcm::new_from_slice(key).map(|c| AesKey::Aes256(Box::new(c))),
            0 => return Err(BridgeError::KeyMaterial(constants::ERR_KEY_EMPTY.into())),
            n => {
                return Err(BridgeError::KeyMaterial(format!(
                    "{} (got {n})",
                    constants::ERR_KEY_LENGTH
                )))
            }
        }
        .map_err(|e| BridgeError::KeyMaterial(e.to_string()))?;

        Ok(Self { key })
    }

    /// Load the raw key from disk.
    ///
    /// The file contents are zeroized once the cipher is built.
    #[instrument(level = "debug", skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_key_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut bytes = std::fs::read(path.as_ref()).map_err(|e| {
            BridgeError::KeyMaterial(format!(
                "Failed to read key file {}: {e}",
                path.as_ref().display()
            ))
        })?;
        let cipher = Self::new(&bytes);
        bytes.zeroize();

        if cipher.is_ok() {
            debug!("Loaded payload key");
        }
        cipher
    }

    /// Generate a fresh random AES-128 key, as written by the proxy on first start
    pub fn generate_key() -> [u8; 16] {
        let mut key = [0u8; 16];
        rand::rng().fill_bytes(&mut key);
        key
    }

    fn open(&self, iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
        let nonce = Nonce::from_slice(iv);
        let opened = match &self.key {
            AesKey::Aes128(c) => c.decrypt(nonce, ciphertext),
            AesKey::Aes256(c) => c.decrypt(nonce, ciphertext),
        };
        opened.map_err(|_| BridgeError::DecryptionFailure(constants::ERR_DECRYPTION_FAILED.into()))
    }

    fn seal(&self, iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
        let nonce = Nonce::from_slice(iv);
        let sealed = match &self.key {
            AesKey::Aes128(c) => c.encrypt(nonce, plaintext),
            AesKey::Aes256(c) => c.encrypt(nonce, plaintext),
        };
        sealed.map_err(|_| BridgeError::EncryptionFailure(constants::ERR_ENCRYPTION_FAILED.into()))
    }
}

/// Verify the payload header and return the bytes that follow it
fn check_header(payload: &[u8]) -> Result<&[u8]> {
    if payload.len() < HEADER_LENGTH || !payload.starts_with(IDENTIFIER) {
        return Err(BridgeError::InvalidHeader);
    }
    match header::header_version_bytes(payload) {
        Some(header::CURRENT_VERSION) => Ok(&payload[HEADER_LENGTH..]),
        Some(other) => Err(BridgeError::UnsupportedVersion(other)),
        None => Err(BridgeError::InvalidHeader),
    }
}

impl PayloadCipher for AesCipher {
    fn decrypt(&self, payload: &[u8]) -> Result<Vec<u8>> {
        let body = check_header(payload)?;

        let separator = body
            .iter()
            .position(|&b| b == IV_SEPARATOR)
            .ok_or_else(|| BridgeError::DecryptionFailure(constants::ERR_MISSING_SEPARATOR.into()))?;
        let (iv, rest) = body.split_at(separator);

        let iv = STANDARD.decode(iv)?;
        if iv.len() != IV_LENGTH {
            return Err(BridgeError::DecryptionFailure(format!(
                "{} ({} bytes)",
                constants::ERR_SHORT_IV,
                iv.len()
            )));
        }
        let ciphertext = STANDARD.decode(&rest[1..])?;

        self.open(&iv, &ciphertext)
    }

    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let mut iv = [0u8; IV_LENGTH];
        rand::rng().fill_bytes(&mut iv);

        let ciphertext = self.seal(&iv, plaintext)?;

        let encoded_iv = STANDARD.encode(iv);
        let encoded_ciphertext = STANDARD.encode(ciphertext);

        let mut out =
            Vec::with_capacity(HEADER_LENGTH + encoded_iv.len() + 1 + encoded_ciphertext.len());
        out.extend_from_slice(&HEADER);
        out.extend_from_slice(encoded_iv.as_bytes());
        out.push(IV_SEPARATOR);
        out.extend_from_slice(encoded_ciphertext.as_bytes());
        Ok(out)
    }
}
