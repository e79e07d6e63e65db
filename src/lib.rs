//! # Floodgate Bridge
//!
//! Recovers the identity of players who join a Java Edition backend through a
//! Bedrock translation proxy.
//!
//! The proxy embeds an encrypted identity record in one null-delimited field
//! of the handshake hostname. This crate finds that field, decrypts and
//! decodes it, and rewrites the remaining hostname so the backend sees the
//! player's real IP and a stable unique id.
//!
//! ## Modules
//! - [`core`]: identity record codec and payload header detection
//! - [`protocol`]: hostname separation and the handshake filter
//! - [`utils`]: cipher, identifier derivation, logging, metrics
//! - [`config`]: TOML / environment configuration
//! - [`error`]: error taxonomy
//!
//! ## Example
//! ```rust,no_run
//! use floodgate_bridge::config::BridgeConfig;
//!
//! # fn main() -> floodgate_bridge::error::Result<()> {
//! let config = BridgeConfig::from_file("floodgate-bridge.toml")?;
//! let filter = config.build_filter()?;
//!
//! let rewritten = filter.resolve_hostname("play.example.com");
//! assert_eq!(rewritten, "play.example.com");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod protocol;
pub mod utils;

pub use crate::core::bedrock_data::{DecodedPayload, IdentityRecord};
pub use crate::core::linked_player::LinkedPlayer;
pub use crate::error::{BridgeError, Result};
pub use crate::protocol::filter::{FilterOutcome, HandshakeFilter, ResolvedIdentity};
pub use crate::protocol::handshake::Handshake;
