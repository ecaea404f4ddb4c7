//! Identifier newtypes shared across the service.

use std::fmt;

/// Identifier for a connected client.
///
/// This is intentionally opaque; we just guarantee uniqueness over the
/// lifetime of the process. The server allocates one at accept time and
/// it doubles as the key into the outbound mailbox directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientId(pub u64);

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for a game.
///
/// Allocated randomly (with collision retry) when the game is created,
/// and valid until both players have left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameId(pub u32);

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
