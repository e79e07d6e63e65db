//! # Core Payload Components
//!
//! The identity record carried by the proxy and the header that marks it.
//!
//! This module is pure data transformation: no I/O, no cryptography.
//!
//! ## Components
//! - **Header**: `^Floodgate^` identifier and version marker detection
//! - **BedrockData**: twelve-field null-delimited identity record codec
//! - **LinkedPlayer**: `;`-separated linked Java account token
//!
//! ## Wire Format
//! ```text
//! [Identifier(11)] [Marker(1)] [Encrypted record(N)]
//! ```

pub mod bedrock_data;
pub mod header;
pub mod linked_player;
