//! # Handshake Protocol
//!
//! Hostname separation, the handshake boundary type, and the filter that
//! ties payload decryption and decoding together.
//!
//! ## Hostname Layout
//! ```text
//! [host] \0 [field1] \0 [field2] \0 ... \0 [^Floodgate^<marker><ciphertext>]
//! ```
//! The payload field may sit at any position.

pub mod filter;
pub mod handshake;
pub mod hostname;
