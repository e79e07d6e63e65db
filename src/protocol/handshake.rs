//! Handshake boundary type.
//!
//! The host server owns the real packet. The filter only sees an immutable
//! [`Handshake`] value and, when it rewrites the hostname, returns a new one
//! with every other field copied over unchanged.

use serde::{Deserialize, Serialize};

/// State the client asks to enter after the handshake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NextState {
    Status,
    Login,
    Transfer,
    /// Any id this crate does not know, kept as-is
    Other(i32),
}

impl NextState {
    pub fn from_id(id: i32) -> Self {
        match id {
            1 => NextState::Status,
            2 => NextState::Login,
            3 => NextState::Transfer,
            other => NextState::Other(other),
        }
    }

    pub fn id(self) -> i32 {
        match self {
            NextState::Status => 1,
            NextState::Login => 2,
            NextState::Transfer => 3,
            NextState::Other(id) => id,
        }
    }
}

/// Serverbound handshake as seen by the filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Handshake {
    pub protocol_version: i32,
    pub server_address: String,
    pub server_port: u16,
    pub next_state: NextState,
}

impl Handshake {
    pub fn new(
        protocol_version: i32,
        server_address: impl Into<String>,
        server_port: u16,
        next_state: NextState,
    ) -> Self {
        Self {
            protocol_version,
            server_address: server_address.into(),
            server_port,
            next_state,
        }
    }

    /// Copy of this handshake with a different server address
    pub fn with_server_address(&self, server_address: impl Into<String>) -> Self {
        Self {
            server_address: server_address.into(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_state_ids() {
        for id in [1, 2, 3, 9] {
            assert_eq!(NextState::from_id(id).id(), id);
        }
        assert_eq!(NextState::from_id(2), NextState::Login);
    }

    #[test]
    fn test_with_server_address_keeps_fields() {
        let original = Handshake::new(765, "play.example.com", 25565, NextState::Login);
        let replaced = original.with_server_address("backend");
        assert_eq!(replaced.server_address, "backend");
        assert_eq!(replaced.protocol_version, 765);
        assert_eq!(replaced.server_port, 25565);
        assert_eq!(replaced.next_state, NextState::Login);
        assert_eq!(original.server_address, "play.example.com");
    }
}
