//! Line-level encoding/decoding.
//!
//! One message per line: the tag keyword, a space, then the payload.
//! Multi-entry payloads pack into the single line with an internal
//! delimiter: game-list entries with `¦`, board rows with `/`.

use crate::command::ClientCommand;
use crate::message::ServerMessage;

/// Separator between entries in a `GAME_LIST` payload.
pub const GAME_LIST_DELIMITER: &str = "¦";

/// Separator between board rows in a `GAME_TABLE` payload.
pub const TABLE_ROW_DELIMITER: &str = "/";

/// Format a server message as its wire line (without the newline).
pub fn format_server_line(message: &ServerMessage) -> String {
    let keyword = message.keyword();
    match message {
        ServerMessage::GameList(entries) => {
            format!("{} {}", keyword, entries.join(GAME_LIST_DELIMITER))
        }
        ServerMessage::GameTable(rows) => {
            format!("{} {}", keyword, rows.join(TABLE_ROW_DELIMITER))
        }
        ServerMessage::FirstOfChain | ServerMessage::LastOfChain => keyword.to_string(),
        ServerMessage::InitGame(text)
        | ServerMessage::WaitOpponent(text)
        | ServerMessage::StandardMessage(text)
        | ServerMessage::ConfirmQuitGame(text)
        | ServerMessage::Invalid(text)
        | ServerMessage::EndgameMessage(text) => format!("{} {}", keyword, text),
    }
}

/// Parse a server line back into a message (client side).
///
/// Returns `None` for lines with an unrecognized tag.
pub fn parse_server_line(line: &str) -> Option<ServerMessage> {
    let line = line.trim_end_matches(['\r', '\n']);
    let (keyword, payload) = match line.split_once(' ') {
        Some((keyword, payload)) => (keyword, payload),
        None => (line, ""),
    };

    let message = match keyword {
        "GAME_LIST" => ServerMessage::GameList(
            payload.split(GAME_LIST_DELIMITER).map(str::to_string).collect(),
        ),
        "GAME_TABLE" => ServerMessage::GameTable(
            payload.split(TABLE_ROW_DELIMITER).map(str::to_string).collect(),
        ),
        "INIT_GAME" => ServerMessage::InitGame(payload.to_string()),
        "WAIT_OPPONENT" => ServerMessage::WaitOpponent(payload.to_string()),
        "STANDARD_MESSAGE" => ServerMessage::StandardMessage(payload.to_string()),
        "CONFIRMQUITGAME" => ServerMessage::ConfirmQuitGame(payload.to_string()),
        "INVALID" => ServerMessage::Invalid(payload.to_string()),
        "FIRSTOFCHAIN" => ServerMessage::FirstOfChain,
        "LASTOFCHAIN" => ServerMessage::LastOfChain,
        "ENDGAME_MESSAGE" => ServerMessage::EndgameMessage(payload.to_string()),
        _ => return None,
    };
    Some(message)
}

/// Format a command as its wire line (client side, without the newline).
pub fn format_command_line(command: &ClientCommand) -> String {
    match command {
        ClientCommand::List => "LIST".to_string(),
        ClientCommand::Join { game_id } => format!("JOIN {}", game_id),
        ClientCommand::Create { grid_size } => format!("CREATE {}", grid_size),
        ClientCommand::Place { row, col } => {
            format!("PLACE {} {}", row.to_ascii_uppercase(), col)
        }
        ClientCommand::QuitGame => "QUITGAME".to_string(),
    }
}
