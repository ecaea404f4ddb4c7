//! tictac-core
//!
//! Pure game logic for the board-game service:
//! - marks (X / O)
//! - square board with N-in-a-row win detection
//! - per-game session state machine (players, turn, lifecycle)
//! - concurrent registry of live games

pub mod board;
pub mod error;
pub mod mark;
pub mod registry;
pub mod session;
pub mod types;

pub use board::Board;
pub use error::{CreateError, JoinError, PlaceError};
pub use mark::Mark;
pub use registry::{GameRegistry, SharedSession, ALLOWED_GRID_SIZES};
pub use session::{GameSession, PlaceOutcome, QuitOutcome};
pub use types::{ClientId, GameId};
