//! Client→server commands.
//!
//! Five commands exist. In the lobby: `LIST`, `JOIN <gameId>`,
//! `CREATE <gridSize>`. In a game: `PLACE <rowLetter> <colNumber>`,
//! `QUITGAME`. Keywords are case-insensitive; which commands a given
//! connection may use is the connection session's business, not the
//! parser's.

use std::error::Error;
use std::fmt;

/// A parsed client command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCommand {
    /// Ask for the joinable-game list.
    List,
    /// Join the game with the given id.
    Join { game_id: u32 },
    /// Create a game with the given grid side length.
    Create { grid_size: usize },
    /// Place a mark at a letter row and 1-based column.
    Place { row: char, col: u32 },
    /// Leave the current game.
    QuitGame,
}

/// Why a command line failed to parse.
///
/// The `Display` texts are the reasons sent back in `INVALID` replies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Empty,
    Unknown(String),
    MissingGameId,
    MissingGridSize,
    MissingPosition,
    BadGameId,
    BadGridSize,
    BadPosition,
    TrailingInput,
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            CommandError::Empty => "Empty command. Please try again.",
            CommandError::Unknown(_) => "Unknown command. Please try again.",
            CommandError::MissingGameId => "Missing <game id> parameter. Please try again.",
            CommandError::MissingGridSize => "Missing <grid size> parameter. Please try again.",
            CommandError::MissingPosition => {
                "Missing <row> <column> parameters. Please try again."
            }
            CommandError::BadGameId => {
                "The <game id> parameter must be a number. Please try again."
            }
            CommandError::BadGridSize => {
                "The <grid size> parameter must be a number. Please try again."
            }
            CommandError::BadPosition => {
                "The position must be a row letter and a column number. Please try again."
            }
            CommandError::TrailingInput => "Too many parameters. Please try again.",
        };
        f.write_str(text)
    }
}

impl Error for CommandError {}

/// Parse one command line.
///
/// Tokens are whitespace-separated; the keyword is matched
/// case-insensitively and arity is exact.
pub fn parse_command_line(line: &str) -> Result<ClientCommand, CommandError> {
    let mut tokens = line.split_whitespace();
    let keyword = tokens.next().ok_or(CommandError::Empty)?;

    let command = match keyword.to_ascii_uppercase().as_str() {
        "LIST" => ClientCommand::List,
        "JOIN" => {
            let arg = tokens.next().ok_or(CommandError::MissingGameId)?;
            let game_id = arg.parse::<u32>().map_err(|_| CommandError::BadGameId)?;
            ClientCommand::Join { game_id }
        }
        "CREATE" => {
            let arg = tokens.next().ok_or(CommandError::MissingGridSize)?;
            let grid_size = arg.parse::<usize>().map_err(|_| CommandError::BadGridSize)?;
            ClientCommand::Create { grid_size }
        }
        "PLACE" => {
            let row_token = tokens.next().ok_or(CommandError::MissingPosition)?;
            let col_token = tokens.next().ok_or(CommandError::MissingPosition)?;

            let mut chars = row_token.chars();
            let row = chars.next().ok_or(CommandError::BadPosition)?;
            if chars.next().is_some() || !row.is_ascii_alphabetic() {
                return Err(CommandError::BadPosition);
            }
            let col = col_token.parse::<u32>().map_err(|_| CommandError::BadPosition)?;
            ClientCommand::Place { row, col }
        }
        "QUITGAME" => ClientCommand::QuitGame,
        _ => return Err(CommandError::Unknown(keyword.to_string())),
    };

    if tokens.next().is_some() {
        return Err(CommandError::TrailingInput);
    }
    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_command() {
        assert_eq!(parse_command_line("LIST"), Ok(ClientCommand::List));
        assert_eq!(
            parse_command_line("JOIN 42"),
            Ok(ClientCommand::Join { game_id: 42 })
        );
        assert_eq!(
            parse_command_line("CREATE 5"),
            Ok(ClientCommand::Create { grid_size: 5 })
        );
        assert_eq!(
            parse_command_line("PLACE B 3"),
            Ok(ClientCommand::Place { row: 'B', col: 3 })
        );
        assert_eq!(parse_command_line("QUITGAME"), Ok(ClientCommand::QuitGame));
    }

    #[test]
    fn keywords_are_case_insensitive() {
        assert_eq!(parse_command_line("list"), Ok(ClientCommand::List));
        assert_eq!(
            parse_command_line("Join 7"),
            Ok(ClientCommand::Join { game_id: 7 })
        );
        assert_eq!(
            parse_command_line("place a 1"),
            Ok(ClientCommand::Place { row: 'a', col: 1 })
        );
    }

    #[test]
    fn missing_arguments_are_reported() {
        assert_eq!(parse_command_line("JOIN"), Err(CommandError::MissingGameId));
        assert_eq!(
            parse_command_line("CREATE"),
            Err(CommandError::MissingGridSize)
        );
        assert_eq!(
            parse_command_line("PLACE"),
            Err(CommandError::MissingPosition)
        );
        assert_eq!(
            parse_command_line("PLACE A"),
            Err(CommandError::MissingPosition)
        );
    }

    #[test]
    fn non_numeric_arguments_are_reported() {
        assert_eq!(parse_command_line("JOIN abc"), Err(CommandError::BadGameId));
        assert_eq!(
            parse_command_line("CREATE big"),
            Err(CommandError::BadGridSize)
        );
        assert_eq!(
            parse_command_line("PLACE A x"),
            Err(CommandError::BadPosition)
        );
        assert_eq!(
            parse_command_line("PLACE 12 3"),
            Err(CommandError::BadPosition)
        );
        assert_eq!(
            parse_command_line("PLACE AB 3"),
            Err(CommandError::BadPosition)
        );
    }

    #[test]
    fn unknown_and_empty_lines_are_reported() {
        assert!(matches!(
            parse_command_line("FROBNICATE"),
            Err(CommandError::Unknown(_))
        ));
        assert_eq!(parse_command_line(""), Err(CommandError::Empty));
        assert_eq!(parse_command_line("   "), Err(CommandError::Empty));
    }

    #[test]
    fn trailing_tokens_are_rejected() {
        assert_eq!(
            parse_command_line("LIST now"),
            Err(CommandError::TrailingInput)
        );
        assert_eq!(
            parse_command_line("JOIN 4 5"),
            Err(CommandError::TrailingInput)
        );
        assert_eq!(
            parse_command_line("PLACE A 1 2"),
            Err(CommandError::TrailingInput)
        );
    }
}
