//! Derived player identifiers.
//!
//! A proxied player without a linked Java account gets a deterministic UUID
//! built from their numeric platform id: the id is zero-extended into 128
//! bits, so the most significant 64 bits are always zero and the least
//! significant 64 bits hold the id's two's-complement value.
//!
//! The zero upper half is a compatibility contract. Downstream plugins tell
//! derived ids apart from random (version 4) ids by checking it, so it must
//! not change.

use crate::error::{BridgeError, Result};
use uuid::Uuid;

/// Pack a 64-bit platform id into a 128-bit identifier with a zero upper half
pub fn derive_unique_id(xuid: i64) -> Uuid {
    Uuid::from_u64_pair(0, xuid as u64)
}

/// Parse a decimal platform id and derive its identifier.
///
/// # Errors
/// Returns [`BridgeError::NumericField`] when `xuid` is not a base-10 `i64`.
pub fn derive_unique_id_str(xuid: &str) -> Result<Uuid> {
    xuid.parse::<i64>()
        .map(derive_unique_id)
        .map_err(|_| BridgeError::NumericField {
            field: "xuid",
            value: xuid.to_string(),
        })
}

/// Whether an identifier was produced by [`derive_unique_id`]
pub fn is_derived(id: &Uuid) -> bool {
    id.as_u64_pair().0 == 0
}

/// Render an identifier the way it is spliced into the hostname
pub fn to_hostname_form(id: &Uuid) -> String {
    id.simple().to_string()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_zero_extension() {
        let id = derive_unique_id(42);
        assert_eq!(id.as_u64_pair(), (0, 42));
        assert_eq!(to_hostname_form(&id), "0000000000000000000000000000002a");
        assert!(is_derived(&id));
    }

    #[test]
    fn test_from_string() {
        let id = derive_unique_id_str("123456789").unwrap();
        assert_eq!(to_hostname_form(&id), "000000000000000000000000075bcd15");
    }

    #[test]
    fn test_negative_id_keeps_bits() {
        let id = derive_unique_id(-1);
        assert_eq!(id.as_u64_pair(), (0, u64::MAX));
        assert!(is_derived(&id));
    }

    #[test]
    fn test_non_numeric_rejected() {
        assert!(matches!(
            derive_unique_id_str("steve"),
            Err(BridgeError::NumericField { field: "xuid", .. })
        ));
        assert!(derive_unique_id_str("").is_err());
    }

    #[test]
    fn test_random_id_not_derived() {
        // Version 4 ids always carry the version nibble in the upper half
        let random = Uuid::new_v4();
        assert!(!is_derived(&random));
    }
}
