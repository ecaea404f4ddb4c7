//! Per-connection protocol state machine.
//!
//! One `ConnectionSession` runs per accepted socket. It owns the read
//! side of the connection and its own mode (lobby vs in a game); every
//! reply and every push to the opponent goes through the mailbox
//! directory, so this task never touches a socket write half directly.
//!
//! Malformed input is answered with `INVALID` and changes nothing; EOF
//! or a read error is a normal disconnect and runs the same leave logic
//! as QUITGAME.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tracing::{debug, info, warn};

use tictac_core::{
    ClientId, GameId, GameRegistry, JoinError, PlaceOutcome,
};
use tictac_protocol::{parse_command_line, ClientCommand, ServerMessage};

use crate::mailbox::MailboxDirectory;

/// Connection mode: browsing the lobby, or seated in a game.
#[derive(Debug, Clone, Copy)]
enum Mode {
    Lobby,
    InGame { game_id: GameId },
}

pub struct ConnectionSession {
    client_id: ClientId,
    registry: Arc<GameRegistry>,
    mailboxes: Arc<MailboxDirectory>,
    mode: Mode,
}

impl ConnectionSession {
    pub fn new(
        client_id: ClientId,
        registry: Arc<GameRegistry>,
        mailboxes: Arc<MailboxDirectory>,
    ) -> Self {
        ConnectionSession {
            client_id,
            registry,
            mailboxes,
            mode: Mode::Lobby,
        }
    }

    /// Read and handle commands until EOF or a read error, then clean up
    /// this client's game seat and mailbox entry.
    pub async fn run<R>(mut self, reader: R)
    where
        R: AsyncRead + Unpin,
    {
        let mut lines = BufReader::new(reader).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => self.handle_line(&line).await,
                Ok(None) => {
                    info!(client = self.client_id.0, "client disconnected");
                    break;
                }
                Err(e) => {
                    warn!(client = self.client_id.0, error = %e, "read failed, closing");
                    break;
                }
            }
        }
        self.cleanup().await;
    }

    async fn handle_line(&mut self, line: &str) {
        let command = match parse_command_line(line) {
            Ok(command) => command,
            Err(e) => {
                debug!(client = self.client_id.0, line, "rejected command line");
                self.reply_invalid(e.to_string()).await;
                return;
            }
        };

        match self.mode {
            Mode::Lobby => self.handle_lobby(command).await,
            Mode::InGame { game_id } => self.handle_in_game(command, game_id).await,
        }
    }

    // -------------------------------------------------------------------------
    // Lobby commands
    // -------------------------------------------------------------------------

    async fn handle_lobby(&mut self, command: ClientCommand) {
        match command {
            ClientCommand::List => self.handle_list().await,
            ClientCommand::Join { game_id } => self.handle_join(GameId(game_id)).await,
            ClientCommand::Create { grid_size } => self.handle_create(grid_size).await,
            ClientCommand::Place { .. } | ClientCommand::QuitGame => {
                self.reply_invalid("You are not in a game. Available commands: LIST, JOIN, CREATE.")
                    .await;
            }
        }
    }

    async fn handle_list(&self) {
        let open = self.registry.list_joinable().await;
        let entries = if open.is_empty() {
            vec!["No games available to join.".to_string()]
        } else {
            open.into_iter()
                .map(|(id, size)| format!("Game {} : {}x{} grid", id, size, size))
                .collect()
        };
        self.mailboxes
            .send(self.client_id, ServerMessage::GameList(entries))
            .await;
    }

    async fn handle_create(&mut self, grid_size: usize) {
        match self.registry.create_game(grid_size, self.client_id).await {
            Ok(game_id) => {
                info!(
                    client = self.client_id.0,
                    game = game_id.0,
                    grid_size,
                    "game created"
                );
                self.mode = Mode::InGame { game_id };
                self.mailboxes
                    .send(
                        self.client_id,
                        ServerMessage::WaitOpponent(format!(
                            "Game {} created. Waiting for an opponent to join...",
                            game_id
                        )),
                    )
                    .await;
            }
            Err(e) => self.reply_invalid(e.to_string()).await,
        }
    }

    async fn handle_join(&mut self, game_id: GameId) {
        match self.registry.join(game_id, self.client_id).await {
            Ok(session) => {
                let (creator, rows) = {
                    let game = session.lock().await;
                    (game.opponent_of(self.client_id), game.render_rows())
                };
                info!(client = self.client_id.0, game = game_id.0, "game joined");
                self.mode = Mode::InGame { game_id };

                self.mailboxes
                    .send_chain(
                        self.client_id,
                        vec![
                            ServerMessage::InitGame(format!(
                                "Joined game {}. You play O.",
                                game_id
                            )),
                            ServerMessage::StandardMessage(
                                "X moves first. Waiting for your opponent's move.".to_string(),
                            ),
                            ServerMessage::GameTable(rows.clone()),
                        ],
                    )
                    .await;

                if let Some(creator) = creator {
                    self.mailboxes
                        .send_chain(
                            creator,
                            vec![
                                ServerMessage::InitGame(format!(
                                    "An opponent joined game {}. You play X.",
                                    game_id
                                )),
                                ServerMessage::StandardMessage(
                                    "You move first. Place with PLACE <row> <column>.".to_string(),
                                ),
                                ServerMessage::GameTable(rows),
                            ],
                        )
                        .await;
                }
            }
            Err(JoinError::NotFound) => {
                self.reply_invalid(format!("No game with id {}. Please try again.", game_id))
                    .await;
            }
            Err(JoinError::NotJoinable) => {
                self.reply_invalid(format!("Game {} is already full. Please try again.", game_id))
                    .await;
            }
        }
    }

    // -------------------------------------------------------------------------
    // In-game commands
    // -------------------------------------------------------------------------

    async fn handle_in_game(&mut self, command: ClientCommand, game_id: GameId) {
        match command {
            ClientCommand::Place { row, col } => self.handle_place(game_id, row, col).await,
            ClientCommand::QuitGame => self.handle_quit(game_id).await,
            ClientCommand::List | ClientCommand::Join { .. } | ClientCommand::Create { .. } => {
                self.reply_invalid("You are in a game. Available commands: PLACE, QUITGAME.")
                    .await;
            }
        }
    }

    async fn handle_place(&mut self, game_id: GameId, row: char, col: u32) {
        let Some(session) = self.registry.get(game_id).await else {
            // The registry no longer knows this game; answer like any
            // other rule violation rather than crashing the session.
            self.reply_invalid("The game no longer exists. Use QUITGAME to leave.")
                .await;
            return;
        };

        let (outcome, opponent, rows) = {
            let mut game = session.lock().await;
            match game.place(row, col, self.client_id) {
                Ok(outcome) => (
                    outcome,
                    game.opponent_of(self.client_id),
                    game.render_rows(),
                ),
                Err(e) => {
                    drop(game);
                    self.reply_invalid(e.to_string()).await;
                    return;
                }
            }
        };

        let position = format!("{}{}", row.to_ascii_uppercase(), col);
        debug!(
            client = self.client_id.0,
            game = game_id.0,
            %position,
            ?outcome,
            "placement accepted"
        );

        match outcome {
            PlaceOutcome::Continue => {
                self.mailboxes
                    .send(self.client_id, ServerMessage::GameTable(rows.clone()))
                    .await;
                if let Some(opponent) = opponent {
                    self.mailboxes
                        .send_chain(
                            opponent,
                            vec![
                                ServerMessage::StandardMessage(format!(
                                    "Your opponent placed at {}. It is your turn.",
                                    position
                                )),
                                ServerMessage::GameTable(rows),
                            ],
                        )
                        .await;
                }
            }
            PlaceOutcome::Win => {
                info!(client = self.client_id.0, game = game_id.0, "game won");
                self.mailboxes
                    .send_chain(
                        self.client_id,
                        vec![
                            ServerMessage::GameTable(rows.clone()),
                            ServerMessage::EndgameMessage("You win!".to_string()),
                        ],
                    )
                    .await;
                if let Some(opponent) = opponent {
                    self.mailboxes
                        .send_chain(
                            opponent,
                            vec![
                                ServerMessage::StandardMessage(format!(
                                    "Your opponent placed at {}.",
                                    position
                                )),
                                ServerMessage::GameTable(rows),
                                ServerMessage::EndgameMessage("You lose.".to_string()),
                            ],
                        )
                        .await;
                }
            }
            PlaceOutcome::Draw => {
                info!(client = self.client_id.0, game = game_id.0, "game drawn");
                self.mailboxes
                    .send_chain(
                        self.client_id,
                        vec![
                            ServerMessage::GameTable(rows.clone()),
                            ServerMessage::EndgameMessage("It is a draw.".to_string()),
                        ],
                    )
                    .await;
                if let Some(opponent) = opponent {
                    self.mailboxes
                        .send_chain(
                            opponent,
                            vec![
                                ServerMessage::StandardMessage(format!(
                                    "Your opponent placed at {}.",
                                    position
                                )),
                                ServerMessage::GameTable(rows),
                                ServerMessage::EndgameMessage("It is a draw.".to_string()),
                            ],
                        )
                        .await;
                }
            }
        }
    }

    async fn handle_quit(&mut self, game_id: GameId) {
        self.leave_game(game_id).await;
        self.mode = Mode::Lobby;
        self.mailboxes
            .send(
                self.client_id,
                ServerMessage::ConfirmQuitGame("You left the game.".to_string()),
            )
            .await;
    }

    // -------------------------------------------------------------------------
    // Teardown
    // -------------------------------------------------------------------------

    /// Vacate this client's seat. Shared by QUITGAME and the disconnect
    /// path; notifies a remaining opponent and drops the registry entry
    /// once the game is empty.
    async fn leave_game(&self, game_id: GameId) {
        let Some(session) = self.registry.get(game_id).await else {
            return;
        };

        let (quit, empty) = {
            let mut game = session.lock().await;
            let quit = game.quit(self.client_id);
            (quit, game.is_empty())
        };

        if let Some(opponent) = quit.opponent {
            if quit.forfeit {
                self.mailboxes
                    .send_chain(
                        opponent,
                        vec![
                            ServerMessage::StandardMessage(
                                "Your opponent left the game.".to_string(),
                            ),
                            ServerMessage::EndgameMessage("You win by forfeit!".to_string()),
                        ],
                    )
                    .await;
            } else {
                self.mailboxes
                    .send(
                        opponent,
                        ServerMessage::StandardMessage("Your opponent left the game.".to_string()),
                    )
                    .await;
            }
        }

        if empty {
            self.registry.remove(game_id).await;
            debug!(game = game_id.0, "removed empty game");
        }
    }

    async fn cleanup(&mut self) {
        if let Mode::InGame { game_id } = self.mode {
            self.leave_game(game_id).await;
        }
        self.mailboxes.unregister(self.client_id).await;
    }

    async fn reply_invalid(&self, reason: impl Into<String>) {
        self.mailboxes
            .send(self.client_id, ServerMessage::Invalid(reason.into()))
            .await;
    }
}
