//! tictac-protocol
//!
//! Wire-level encoding/decoding for the board-game service.
//!
//! The protocol is UTF-8 text, one message per newline-terminated line.
//! This crate turns those lines into typed values and back:
//!
//! - [`command`]    : client→server command lines
//! - [`message`]    : server→client tagged messages
//! - [`line_codec`] : parse/format functions and payload delimiters

pub mod command;
pub mod line_codec;
pub mod message;

pub use command::{parse_command_line, ClientCommand, CommandError};
pub use line_codec::{
    format_command_line, format_server_line, parse_server_line, GAME_LIST_DELIMITER,
    TABLE_ROW_DELIMITER,
};
pub use message::ServerMessage;
