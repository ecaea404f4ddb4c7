//! Error types for game creation, joining, and placement.
//!
//! The `Display` texts double as the human-readable reasons sent back to
//! clients in `INVALID` replies, so they are phrased for the player at
//! the keyboard rather than for a log file.

use std::error::Error;
use std::fmt;

/// Why a placement was rejected.
///
/// None of these mutate the board: a rejected placement leaves the
/// session exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceError {
    /// The game already ended with a win, draw, or forfeit.
    GameAlreadyFinished,
    /// The second player has not joined yet.
    WaitingForOpponent,
    /// It is the other player's turn.
    NotYourTurn,
    /// Row letter or column number outside the grid.
    OutOfBounds,
    /// The target cell already holds a mark.
    CellOccupied,
}

impl fmt::Display for PlaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            PlaceError::GameAlreadyFinished => "The game is already over. Use QUITGAME to leave.",
            PlaceError::WaitingForOpponent => "No opponent has joined yet. Please wait.",
            PlaceError::NotYourTurn => "It is not your turn. Please wait for your opponent.",
            PlaceError::OutOfBounds => "That position is outside the board. Please try again.",
            PlaceError::CellOccupied => "That cell is already taken. Please try again.",
        };
        f.write_str(text)
    }
}

impl Error for PlaceError {}

/// Why a game could not be created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateError {
    /// The requested grid size is not in the allow-list.
    InvalidGridSize(usize),
}

impl fmt::Display for CreateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreateError::InvalidGridSize(_) => f.write_str(
                "Invalid <grid size> parameter. Please try again. Available grid sizes: 3, 5, 7, 9",
            ),
        }
    }
}

impl Error for CreateError {}

/// Why a game could not be joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinError {
    /// No live game with that id.
    NotFound,
    /// The second seat is already taken.
    NotJoinable,
}

impl fmt::Display for JoinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            JoinError::NotFound => "no game with that id",
            JoinError::NotJoinable => "game is already full",
        };
        f.write_str(text)
    }
}

impl Error for JoinError {}
