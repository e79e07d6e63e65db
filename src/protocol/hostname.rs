//! Hostname separation.
//!
//! A handshake hostname is a list of null-delimited fields. A proxy may place
//! its encrypted payload in any one of them; this module pulls the first
//! payload field out and hands back the remaining fields untouched.

use crate::core::header::header_version;

/// Field separator of the handshake hostname
pub const HOSTNAME_SEPARATOR: char = '\0';

const HOSTNAME_SEPARATOR_STR: &str = "\0";

/// Result of scanning a hostname for an embedded payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostnameSeparation<'a> {
    payload: Option<&'a str>,
    header_version: Option<u8>,
    remainder: String,
}

impl<'a> HostnameSeparation<'a> {
    /// The first field carrying a payload header, header included
    pub fn payload(&self) -> Option<&'a str> {
        self.payload
    }

    pub fn header_version(&self) -> Option<u8> {
        self.header_version
    }

    /// Header version as an integer, `-1` when no payload was found
    pub fn header_version_raw(&self) -> i32 {
        self.header_version.map_or(-1, i32::from)
    }

    /// Every other field, in original order
    pub fn remainder(&self) -> &str {
        &self.remainder
    }

    pub fn into_remainder(self) -> String {
        self.remainder
    }

    pub fn has_payload(&self) -> bool {
        self.payload.is_some()
    }
}

/// Split a hostname into its embedded payload and the remaining fields.
///
/// Only the first field with a valid header is taken; later look-alikes stay
/// in the remainder as ordinary fields. Without a payload the remainder equals
/// the input.
pub fn separate(hostname: &str) -> HostnameSeparation<'_> {
    let mut payload = None;
    let mut version = None;
    let mut kept: Vec<&str> = Vec::new();

    for field in hostname.split(HOSTNAME_SEPARATOR) {
        if payload.is_none() {
            if let Some(v) = header_version(field) {
                payload = Some(field);
                version = Some(v);
                continue;
            }
        }
        kept.push(field);
    }

    let remainder = if payload.is_some() {
        kept.join(HOSTNAME_SEPARATOR_STR)
    } else {
        hostname.to_string()
    };

    HostnameSeparation {
        payload,
        header_version: version,
        remainder,
    }
}
