//! Plain terminal client for the board-game service.
//!
//! Two concurrent loops: a printer task renders server lines as they
//! arrive (including unsolicited chains pushed on the opponent's moves),
//! while the main loop reads stdin commands and writes them to the
//! socket. `HELP` and `QUIT` are handled locally; everything else is
//! parsed and sent as a protocol line.

use std::env;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

use tictac_protocol::{format_command_line, parse_command_line, parse_server_line, ServerMessage};

const ANSI_RED: &str = "\u{1b}[31m";
const ANSI_RESET: &str = "\u{1b}[0m";

#[tokio::main]
async fn main() -> Result<()> {
    let addr = env::var("TICTAC_SERVER_ADDR").unwrap_or_else(|_| "127.0.0.1:6433".to_string());

    println!("Connecting to {}...", addr);
    let stream = TcpStream::connect(&addr).await?;
    println!("Connected.");
    print_lobby_help();

    let (read_half, mut write_half) = stream.into_split();

    // Set by the printer task so HELP knows which command set applies.
    let in_game = Arc::new(AtomicBool::new(false));

    let printer_in_game = in_game.clone();
    tokio::spawn(async move {
        let mut lines = BufReader::new(read_half).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            match parse_server_line(&line) {
                Some(message) => print_server_message(&message, &printer_in_game),
                None => println!("{}", line),
            }
        }
        println!("{}Server unexpectedly closed.{}", ANSI_RED, ANSI_RESET);
        std::process::exit(0);
    });

    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = stdin.next_line().await? {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let keyword = trimmed
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_ascii_uppercase();
        match keyword.as_str() {
            "QUIT" => break,
            "HELP" => {
                if in_game.load(Ordering::Relaxed) {
                    print_in_game_help();
                } else {
                    print_lobby_help();
                }
                continue;
            }
            _ => {}
        }

        match parse_command_line(trimmed) {
            Ok(command) => {
                let wire = format_command_line(&command);
                write_half.write_all(wire.as_bytes()).await?;
                write_half.write_all(b"\n").await?;
                write_half.flush().await?;
            }
            Err(e) => {
                println!("{}{}{}", ANSI_RED, e, ANSI_RESET);
            }
        }
    }

    println!("Closing connection and quitting...");
    Ok(())
}

fn print_server_message(message: &ServerMessage, in_game: &AtomicBool) {
    match message {
        ServerMessage::GameList(entries) => {
            for entry in entries {
                println!("{}", entry);
            }
        }
        ServerMessage::GameTable(rows) => {
            for row in rows {
                println!("{}", row);
            }
        }
        ServerMessage::InitGame(text) | ServerMessage::WaitOpponent(text) => {
            in_game.store(true, Ordering::Relaxed);
            println!("{}", text);
        }
        ServerMessage::ConfirmQuitGame(text) => {
            in_game.store(false, Ordering::Relaxed);
            println!("{}", text);
        }
        ServerMessage::StandardMessage(text) => println!("{}", text),
        ServerMessage::EndgameMessage(text) => println!("=== {} ===", text),
        ServerMessage::Invalid(reason) => {
            println!("{}{}{}", ANSI_RED, reason, ANSI_RESET);
        }
        // Chain markers frame pushes for the state machine; nothing to
        // show the human.
        ServerMessage::FirstOfChain | ServerMessage::LastOfChain => {}
    }
}

fn print_lobby_help() {
    println!("Usage:");
    println!(" LIST - Display the list of available games.");
    println!(" JOIN <game id> - Join the game with the given id.");
    println!(" CREATE <grid size> - Create a new game with the given grid size.");
    println!(" QUIT - Close the connection to the server.");
    println!(" HELP - Display this help message.");
}

fn print_in_game_help() {
    println!("Usage:");
    println!(" PLACE <row> <column> - Place a marker at the specified position.");
    println!(" QUITGAME - Quit the current game.");
    println!(" HELP - Display this help message.");
}
