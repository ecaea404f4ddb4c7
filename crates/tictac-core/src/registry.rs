//! Concurrent directory of live games.
//!
//! The registry owns every live [`GameSession`] behind its own lock, so
//! two different games never block each other; the registry-level map
//! lock only guards insert/lookup/remove. Constructed once at server
//! start and shared by handle, never ambient global state.

use std::collections::HashMap;
use std::sync::Arc;

use rand::Rng;
use tokio::sync::{Mutex, RwLock};

use crate::error::{CreateError, JoinError};
use crate::session::GameSession;
use crate::types::{ClientId, GameId};

/// Grid sizes accepted by [`GameRegistry::create_game`].
pub const ALLOWED_GRID_SIZES: [usize; 4] = [3, 5, 7, 9];

/// Shared handle to one game's state.
pub type SharedSession = Arc<Mutex<GameSession>>;

/// Directory of live games, keyed by [`GameId`].
#[derive(Debug, Default)]
pub struct GameRegistry {
    games: RwLock<HashMap<GameId, SharedSession>>,
}

impl GameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a game with the given creator seated as player 1.
    ///
    /// Validates the grid size against [`ALLOWED_GRID_SIZES`] and
    /// allocates a random id, retrying on collision with a live game.
    pub async fn create_game(
        &self,
        grid_size: usize,
        creator: ClientId,
    ) -> Result<GameId, CreateError> {
        if !ALLOWED_GRID_SIZES.contains(&grid_size) {
            return Err(CreateError::InvalidGridSize(grid_size));
        }

        let mut games = self.games.write().await;
        let id = loop {
            let candidate = GameId(rand::thread_rng().gen_range(1..=9999));
            if !games.contains_key(&candidate) {
                break candidate;
            }
        };
        let session = GameSession::new(id, grid_size, creator);
        games.insert(id, Arc::new(Mutex::new(session)));
        Ok(id)
    }

    /// Snapshot of games whose second seat is still open, sorted by id
    /// so a given snapshot always lists in the same order.
    pub async fn list_joinable(&self) -> Vec<(GameId, usize)> {
        let games = self.games.read().await;
        let mut open = Vec::new();
        for (id, session) in games.iter() {
            let session = session.lock().await;
            if session.is_joinable() {
                open.push((*id, session.grid_size()));
            }
        }
        drop(games);
        open.sort_by_key(|(id, _)| id.0);
        open
    }

    /// Look up a live game by id.
    pub async fn get(&self, id: GameId) -> Option<SharedSession> {
        self.games.read().await.get(&id).cloned()
    }

    /// Seat `joiner` as the second player of game `id`.
    ///
    /// The joinability check and the seat write happen atomically under
    /// the game's own lock; a losing racer gets `NotJoinable`, never a
    /// silent overwrite.
    pub async fn join(&self, id: GameId, joiner: ClientId) -> Result<SharedSession, JoinError> {
        let session = self.get(id).await.ok_or(JoinError::NotFound)?;
        session.lock().await.join(joiner)?;
        Ok(session)
    }

    /// Drop the registry entry. Called once both players have left.
    pub async fn remove(&self, id: GameId) {
        self.games.write().await.remove(&id);
    }
}
