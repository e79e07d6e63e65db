//! # Utility Modules
//!
//! Supporting utilities for cryptography, identifier derivation, logging, and
//! metrics.
//!
//! ## Components
//! - **Crypto**: AES-GCM payload cipher with Base64 framing
//! - **Identity**: Zero-extended identifiers for unlinked players
//! - **Logging**: Structured logging configuration
//! - **Metrics**: Thread-safe filter counters
//!
//! ## Security
//! - Key material is zeroized after the cipher is built (zeroize crate)
//! - Random IVs from the thread-local CSPRNG (rand)

pub mod crypto;
pub mod identity;
pub mod logging;
pub mod metrics;

pub use crypto::{AesCipher, PayloadCipher};
pub use metrics::{Metrics, MetricsSnapshot};
