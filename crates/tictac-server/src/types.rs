//! Shared types for the game TCP server.
//!
//! This module defines:
//! - the outbound delivery unit (single line vs atomic chain)
//! - channel aliases between connection handlers and writer tasks

use tokio::sync::mpsc;

use tictac_protocol::ServerMessage;

pub use tictac_core::ClientId;

/// One unit of outbound delivery for a client.
///
/// A `Chain` travels the channel as a single value, so the writer task
/// emits its lines (bracketed by the chain markers) back to back; no
/// other send to the same client can land in between.
#[derive(Debug, Clone)]
pub enum Outbound {
    Line(ServerMessage),
    Chain(Vec<ServerMessage>),
}

/// Sender half of a client's mailbox.
pub type OutboundTx = mpsc::UnboundedSender<Outbound>;
/// Receiver half, owned by the client's writer task.
pub type OutboundRx = mpsc::UnboundedReceiver<Outbound>;
