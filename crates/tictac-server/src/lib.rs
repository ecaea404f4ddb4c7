//! tictac-server
//!
//! Multi-client async TCP server for the board-game service.

pub mod config;
pub mod mailbox;
pub mod server;
pub mod types;

// internal module, not re-exported
mod connection;
