//! Per-game session: players, turn, and lifecycle.
//!
//! A session moves through three phases: waiting for the second player,
//! in progress, and finished (win, draw, or forfeit). Exactly two
//! connection workers may call into the same session concurrently, so
//! the registry hands sessions out behind a per-game lock; every method
//! here assumes the caller holds it.

use crate::board::Board;
use crate::error::{JoinError, PlaceError};
use crate::mark::Mark;
use crate::types::{ClientId, GameId};

/// Result of an accepted placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceOutcome {
    /// Game continues; the opponent moves next.
    Continue,
    /// The placement completed a full line; the mover wins.
    Win,
    /// The board filled up with no winner.
    Draw,
}

/// What happened when a player left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuitOutcome {
    /// The other player's id, if still seated (the caller notifies them).
    pub opponent: Option<ClientId>,
    /// True when the quit ended a game that was still in progress; the
    /// remaining player wins by forfeit. A quit after a natural win or
    /// draw is a plain exit.
    pub forfeit: bool,
}

/// One game's full state.
#[derive(Debug)]
pub struct GameSession {
    id: GameId,
    board: Board,
    player1: Option<ClientId>,
    player2: Option<ClientId>,
    turn: Mark,
    finished: bool,
    joinable: bool,
}

impl GameSession {
    /// New session with the creator seated as player 1 (mark X, first
    /// move) and the second seat open.
    pub fn new(id: GameId, grid_size: usize, creator: ClientId) -> Self {
        GameSession {
            id,
            board: Board::new(grid_size),
            player1: Some(creator),
            player2: None,
            turn: Mark::X,
            finished: false,
            joinable: true,
        }
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn grid_size(&self) -> usize {
        self.board.size()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// True while the second seat is open.
    pub fn is_joinable(&self) -> bool {
        self.joinable
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// True once both seats are empty; the registry entry can be dropped.
    pub fn is_empty(&self) -> bool {
        self.player1.is_none() && self.player2.is_none()
    }

    /// Seat the second player.
    ///
    /// Check-and-set: the caller holds the session lock, so a concurrent
    /// join cannot slip between the check and the write. `joinable`
    /// flips to false exactly once, here.
    pub fn join(&mut self, joiner: ClientId) -> Result<(), JoinError> {
        if !self.joinable {
            return Err(JoinError::NotJoinable);
        }
        self.player2 = Some(joiner);
        self.joinable = false;
        Ok(())
    }

    /// The mark a seated player writes, or `None` for strangers.
    pub fn mark_of(&self, player: ClientId) -> Option<Mark> {
        if self.player1 == Some(player) {
            Some(Mark::X)
        } else if self.player2 == Some(player) {
            Some(Mark::O)
        } else {
            None
        }
    }

    /// The other player's id, or `None` if either seat is empty.
    pub fn opponent_of(&self, player: ClientId) -> Option<ClientId> {
        match (self.player1, self.player2) {
            (Some(p1), Some(p2)) if p1 == player => Some(p2),
            (Some(p1), Some(p2)) if p2 == player => Some(p1),
            _ => None,
        }
    }

    /// Attempt a placement at a letter row ('A' = first row, any case)
    /// and 1-based column.
    ///
    /// Checks run in a fixed order: game over, opponent present, turn,
    /// bounds, occupancy. On success the mark is written, the turn
    /// flips, and the outcome reports whether the game continues, was
    /// won, or ended in a draw.
    pub fn place(
        &mut self,
        row_label: char,
        col_number: u32,
        player: ClientId,
    ) -> Result<PlaceOutcome, PlaceError> {
        if self.finished {
            return Err(PlaceError::GameAlreadyFinished);
        }
        if self.player1.is_none() || self.player2.is_none() {
            return Err(PlaceError::WaitingForOpponent);
        }
        // A caller that is not seated at all is a wiring bug upstream;
        // answer as if it were simply not their turn.
        let mark = self.mark_of(player).ok_or(PlaceError::NotYourTurn)?;
        if mark != self.turn {
            return Err(PlaceError::NotYourTurn);
        }

        let (row, col) = self.translate(row_label, col_number)?;
        if !self.board.place(row, col, mark) {
            return Err(PlaceError::CellOccupied);
        }
        self.turn = self.turn.other();

        if self.board.wins_line_through(row, col) {
            self.finished = true;
            return Ok(PlaceOutcome::Win);
        }
        if self.board.is_full() {
            self.finished = true;
            return Ok(PlaceOutcome::Draw);
        }
        Ok(PlaceOutcome::Continue)
    }

    /// Translate a letter row and 1-based column to zero-based indices.
    fn translate(&self, row_label: char, col_number: u32) -> Result<(usize, usize), PlaceError> {
        let size = self.board.size();
        let upper = row_label.to_ascii_uppercase();
        if !upper.is_ascii_uppercase() {
            return Err(PlaceError::OutOfBounds);
        }
        let row = (upper as usize) - ('A' as usize);
        let col = (col_number as usize)
            .checked_sub(1)
            .ok_or(PlaceError::OutOfBounds)?;
        if row >= size || col >= size {
            return Err(PlaceError::OutOfBounds);
        }
        Ok((row, col))
    }

    /// Vacate `player`'s seat.
    ///
    /// Reports the remaining opponent (if any) so the caller can notify
    /// them, and whether the quit forfeits a game still in progress.
    /// Either way the session stops accepting placements and joins.
    pub fn quit(&mut self, player: ClientId) -> QuitOutcome {
        let opponent = self.opponent_of(player);
        let forfeit = opponent.is_some() && !self.finished;

        if self.player1 == Some(player) {
            self.player1 = None;
        } else if self.player2 == Some(player) {
            self.player2 = None;
        }
        self.joinable = false;
        self.finished = true;

        QuitOutcome { opponent, forfeit }
    }

    /// Canonical board rendering; pure read, no mutation.
    pub fn render_rows(&self) -> Vec<String> {
        self.board.render_rows()
    }
}
