//! # Handshake Filter
//!
//! Recovers the real identity of a proxied player from the handshake hostname
//! and rewrites the hostname so the backend sees the player's real address
//! and unique id.
//!
//! ## Flow
//! 1. [`separate`] the hostname into payload and remainder
//! 2. decrypt the payload with the shared [`PayloadCipher`]
//! 3. decode it into an [`IdentityRecord`]
//! 4. resolve the unique id (linked Java account, else derived from the xuid)
//! 5. splice ip and id into remainder fields 1 and 2, appending `[]` when the
//!    remainder has exactly three fields
//!
//! ## Failure Policy
//! Every failure degrades to [`FilterOutcome::PassThrough`]: the connection
//! proceeds with the hostname it arrived with. Nothing here returns an error
//! or panics on untrusted input.
//!
//! The filter is stateless per call; the cipher and metrics are shared
//! read-only (atomics for metrics) and can be used from any number of
//! connection handlers at once.

use crate::core::bedrock_data::{DecodedPayload, IdentityRecord};
use crate::error::Result;
use crate::protocol::handshake::Handshake;
use crate::protocol::hostname::{separate, HOSTNAME_SEPARATOR};
use crate::utils::crypto::{AesCipher, PayloadCipher};
use crate::utils::identity::{derive_unique_id_str, to_hostname_form};
use crate::utils::metrics::Metrics;
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// Remainder fields required before ip and id can be substituted
pub const MIN_REWRITE_FIELDS: usize = 3;

/// Placeholder appended when the remainder carries no extra properties
pub const EMPTY_PROPERTIES: &str = "[]";

/// Why a hostname was left untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassThroughReason {
    /// No field carried a payload header
    NoPayload,
    /// The payload did not decrypt under the shared key
    DecryptFailed,
    /// The decrypted payload had the wrong number of fields
    InvalidPayload { observed_fields: usize },
    /// A numeric, linked-player, or xuid field was corrupt
    DecodeFailed,
}

/// Identity recovered from an embedded payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIdentity {
    pub username: String,
    pub xuid: String,
    pub ip: String,
    pub unique_id: Uuid,
    pub linked: bool,
}

impl ResolvedIdentity {
    /// Pick the unique id for a record.
    ///
    /// A linked Java account wins; otherwise the id is derived from the xuid.
    ///
    /// # Errors
    /// Returns [`BridgeError::NumericField`](crate::error::BridgeError::NumericField)
    /// when an unlinked record has a non-numeric xuid.
    pub fn resolve(record: &IdentityRecord) -> Result<Self> {
        let (unique_id, linked) = match record.linked_player() {
            Some(player) => (player.java_unique_id(), true),
            None => (derive_unique_id_str(record.xuid())?, false),
        };

        Ok(Self {
            username: record.username().to_string(),
            xuid: record.xuid().to_string(),
            ip: record.ip().to_string(),
            unique_id,
            linked,
        })
    }
}

/// What the filter decided for one hostname
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOutcome {
    /// Keep the original hostname
    PassThrough(PassThroughReason),
    /// Payload removed, but the remainder was too short to substitute into
    Stripped {
        hostname: String,
        identity: ResolvedIdentity,
    },
    /// Payload removed and ip/id substituted
    Rewritten {
        hostname: String,
        identity: ResolvedIdentity,
    },
}

impl FilterOutcome {
    pub fn is_pass_through(&self) -> bool {
        matches!(self, FilterOutcome::PassThrough(_))
    }

    pub fn identity(&self) -> Option<&ResolvedIdentity> {
        match self {
            FilterOutcome::PassThrough(_) => None,
            FilterOutcome::Stripped { identity, .. } | FilterOutcome::Rewritten { identity, .. } => {
                Some(identity)
            }
        }
    }

    /// The hostname to hand back to the host, given the one that came in
    pub fn into_hostname(self, original: &str) -> String {
        match self {
            FilterOutcome::PassThrough(_) => original.to_string(),
            FilterOutcome::Stripped { hostname, .. } | FilterOutcome::Rewritten { hostname, .. } => {
                hostname
            }
        }
    }
}

/// Substitute ip and id into a payload-free hostname.
///
/// Field 1 becomes `ip`, field 2 becomes the hyphenless id. A three-field
/// result gets an extra `[]` field. Returns `None` when there are fewer than
/// [`MIN_REWRITE_FIELDS`] fields.
pub fn rewrite_remainder(remainder: &str, ip: &str, unique_id: &Uuid) -> Option<String> {
    let id = to_hostname_form(unique_id);
    let mut fields: Vec<&str> = remainder.split(HOSTNAME_SEPARATOR).collect();
    if fields.len() < MIN_REWRITE_FIELDS {
        return None;
    }

    fields[1] = ip;
    fields[2] = &id;
    if fields.len() == MIN_REWRITE_FIELDS {
        fields.push(EMPTY_PROPERTIES);
    }

    let mut out = String::with_capacity(remainder.len() + ip.len() + id.len());
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(HOSTNAME_SEPARATOR);
        }
        out.push_str(field);
    }
    Some(out)
}

/// Rewrites handshake hostnames carrying an embedded identity payload
pub struct HandshakeFilter<C = AesCipher> {
    cipher: Arc<C>,
    metrics: Arc<Metrics>,
}

impl<C> Clone for HandshakeFilter<C> {
    fn clone(&self) -> Self {
        Self {
            cipher: Arc::clone(&self.cipher),
            metrics: Arc::clone(&self.metrics),
        }
    }
}

impl<C: PayloadCipher> HandshakeFilter<C> {
    pub fn new(cipher: C) -> Self {
        Self::from_shared(Arc::new(cipher), Arc::new(Metrics::new()))
    }

    /// Build a filter around an already shared cipher and metrics sink
    pub fn from_shared(cipher: Arc<C>, metrics: Arc<Metrics>) -> Self {
        Self { cipher, metrics }
    }

    pub fn cipher(&self) -> &C {
        &self.cipher
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    /// Inspect and rewrite one handshake hostname
    #[instrument(level = "debug", skip_all, fields(len = hostname.len()))]
    pub fn rewrite_hostname(&self, hostname: &str) -> FilterOutcome {
        self.metrics.handshake_seen();

        let outcome = self.evaluate(hostname);
        if outcome.is_pass_through() {
            self.metrics.passed_through();
        } else {
            self.metrics.rewritten();
        }
        outcome
    }

    /// The hostname the handshake should continue with
    pub fn resolve_hostname(&self, hostname: &str) -> String {
        self.rewrite_hostname(hostname).into_hostname(hostname)
    }

    /// Replacement handshake, or `None` when the original should be kept
    pub fn filter_handshake(&self, handshake: &Handshake) -> Option<Handshake> {
        match self.rewrite_hostname(&handshake.server_address) {
            FilterOutcome::PassThrough(_) => None,
            FilterOutcome::Stripped { hostname, .. } | FilterOutcome::Rewritten { hostname, .. } => {
                Some(handshake.with_server_address(hostname))
            }
        }
    }

    fn evaluate(&self, hostname: &str) -> FilterOutcome {
        let separation = separate(hostname);
        let Some(payload) = separation.payload() else {
            return FilterOutcome::PassThrough(PassThroughReason::NoPayload);
        };
        self.metrics.payload_detected();

        let decrypted = match self.cipher.decrypt_to_string(payload.as_bytes()) {
            Ok(text) => text,
            Err(e) => {
                warn!(
                    error = %e,
                    header_version = separation.header_version_raw(),
                    "Failed to decrypt embedded payload, passing handshake through"
                );
                self.metrics.decrypt_failed();
                return FilterOutcome::PassThrough(PassThroughReason::DecryptFailed);
            }
        };

        let record = match DecodedPayload::decode(&decrypted) {
            Ok(DecodedPayload::Valid(record)) => record,
            Ok(DecodedPayload::Invalid { observed_fields }) => {
                debug!(
                    observed_fields,
                    expected = IdentityRecord::EXPECTED_FIELDS,
                    "Embedded payload has wrong field count"
                );
                self.metrics.invalid_payload();
                return FilterOutcome::PassThrough(PassThroughReason::InvalidPayload {
                    observed_fields,
                });
            }
            Err(e) => {
                warn!(error = %e, "Failed to decode embedded payload");
                self.metrics.decode_failed();
                return FilterOutcome::PassThrough(PassThroughReason::DecodeFailed);
            }
        };

        let identity = match ResolvedIdentity::resolve(&record) {
            Ok(identity) => identity,
            Err(e) => {
                warn!(error = %e, "Failed to resolve unique id");
                self.metrics.decode_failed();
                return FilterOutcome::PassThrough(PassThroughReason::DecodeFailed);
            }
        };

        let remainder = separation.into_remainder();
        match rewrite_remainder(&remainder, &identity.ip, &identity.unique_id) {
            Some(hostname) => {
                debug!(
                    username = %identity.username,
                    unique_id = %identity.unique_id,
                    linked = identity.linked,
                    "Rewrote handshake hostname"
                );
                FilterOutcome::Rewritten { hostname, identity }
            }
            None => {
                debug!(
                    username = %identity.username,
                    "Hostname remainder too short to substitute, stripping payload only"
                );
                self.metrics.short_remainder();
                FilterOutcome::Stripped {
                    hostname: remainder,
                    identity,
                }
            }
        }
    }
}
