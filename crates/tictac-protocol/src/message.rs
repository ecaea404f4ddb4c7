//! Server→client messages.
//!
//! Every server line starts with a tag keyword; the payload (if any)
//! follows after a single space. `FIRSTOFCHAIN` / `LASTOFCHAIN` carry no
//! payload: they bracket an atomic multi-line push so the client can
//! treat the group as one unit.

/// A tagged server-to-client message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerMessage {
    /// Joinable games, one preformatted entry per element.
    GameList(Vec<String>),
    /// Game start notice, sent once to each side on a successful join.
    InitGame(String),
    /// Sent to the creator right after CREATE.
    WaitOpponent(String),
    /// Informational free text (turn notice, forfeit notice, ...).
    StandardMessage(String),
    /// Board rendering, one visual line per element.
    GameTable(Vec<String>),
    /// Acknowledges QUITGAME.
    ConfirmQuitGame(String),
    /// Rejected command or placement, with the reason.
    Invalid(String),
    /// Opens an atomic multi-line push.
    FirstOfChain,
    /// Closes an atomic multi-line push.
    LastOfChain,
    /// Win / lose / draw banner, sent once to each side at game end.
    EndgameMessage(String),
}

impl ServerMessage {
    /// The leading keyword on the wire.
    pub fn keyword(&self) -> &'static str {
        match self {
            ServerMessage::GameList(_) => "GAME_LIST",
            ServerMessage::InitGame(_) => "INIT_GAME",
            ServerMessage::WaitOpponent(_) => "WAIT_OPPONENT",
            ServerMessage::StandardMessage(_) => "STANDARD_MESSAGE",
            ServerMessage::GameTable(_) => "GAME_TABLE",
            ServerMessage::ConfirmQuitGame(_) => "CONFIRMQUITGAME",
            ServerMessage::Invalid(_) => "INVALID",
            ServerMessage::FirstOfChain => "FIRSTOFCHAIN",
            ServerMessage::LastOfChain => "LASTOFCHAIN",
            ServerMessage::EndgameMessage(_) => "ENDGAME_MESSAGE",
        }
    }
}
