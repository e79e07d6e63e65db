//! Payload header detection.
//!
//! An embedded payload starts with the 11-byte ASCII identifier `^Floodgate^`
//! followed by one marker byte equal to `0x3E + version`.
//!
//! ```text
//! [Identifier(11)] [Marker(1)] [Ciphertext(N)]
//! ```

/// Identifier that opens every embedded payload
pub const IDENTIFIER: &[u8; 11] = b"^Floodgate^";

/// Offset added to the version to form the marker byte
pub const VERSION_OFFSET: u8 = 0x3E;

/// Payload version produced by current proxies
pub const CURRENT_VERSION: u8 = 0;

/// Identifier plus marker byte
pub const HEADER_LENGTH: usize = IDENTIFIER.len() + 1;

/// Full header for [`CURRENT_VERSION`]
pub const HEADER: [u8; HEADER_LENGTH] = header_for(CURRENT_VERSION);

/// Build the header bytes for a given version
pub const fn header_for(version: u8) -> [u8; HEADER_LENGTH] {
    let mut header = [0u8; HEADER_LENGTH];
    let mut i = 0;
    while i < IDENTIFIER.len() {
        header[i] = IDENTIFIER[i];
        i += 1;
    }
    header[IDENTIFIER.len()] = VERSION_OFFSET.wrapping_add(version);
    header
}

/// Detect the payload version of a hostname field.
///
/// Returns `None` when the field is too short to carry a payload, does not
/// start with [`IDENTIFIER`], or carries a marker byte below
/// [`VERSION_OFFSET`].
pub fn header_version(data: &str) -> Option<u8> {
    header_version_bytes(data.as_bytes())
}

/// Byte-level variant of [`header_version`]
pub fn header_version_bytes(data: &[u8]) -> Option<u8> {
    if data.len() <= HEADER_LENGTH {
        return None;
    }
    if !data.starts_with(IDENTIFIER) {
        return None;
    }
    data[IDENTIFIER.len()].checked_sub(VERSION_OFFSET)
}

/// Integer view of [`header_version`], `-1` when absent
pub fn header_version_raw(data: &str) -> i32 {
    header_version(data).map_or(-1, i32::from)
}
