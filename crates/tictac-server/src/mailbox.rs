//! Per-client outbound mailboxes.
//!
//! Every connected client gets one unbounded channel and one writer task
//! that owns the socket's write half. All replies and pushes go through
//! the directory, never straight to the socket: the writer drains the
//! channel sequentially, and a chain travels the channel as a single
//! value, so a `FIRSTOFCHAIN`..`LASTOFCHAIN` group is never split by a
//! concurrent send to the same client.
//!
//! Sends are fire-and-forget: an unknown or disconnected client is a
//! silent no-op and the caller never blocks on delivery.

use std::collections::HashMap;

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::RwLock;
use tracing::debug;

use tictac_protocol::{format_server_line, ServerMessage};

use crate::types::{ClientId, Outbound, OutboundRx, OutboundTx};

/// Directory of connected clients' mailboxes.
///
/// Entries are added on connect and removed on disconnect; everything
/// else is sending.
#[derive(Debug, Default)]
pub struct MailboxDirectory {
    clients: RwLock<HashMap<ClientId, OutboundTx>>,
}

impl MailboxDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn register(&self, client_id: ClientId, tx: OutboundTx) {
        self.clients.write().await.insert(client_id, tx);
    }

    pub async fn unregister(&self, client_id: ClientId) {
        self.clients.write().await.remove(&client_id);
    }

    /// Number of currently registered clients.
    pub async fn client_count(&self) -> usize {
        self.clients.read().await.len()
    }

    /// Queue one line for `client_id`.
    pub async fn send(&self, client_id: ClientId, message: ServerMessage) {
        self.dispatch(client_id, Outbound::Line(message)).await;
    }

    /// Queue an atomic group of lines for `client_id`. The writer task
    /// brackets them with the chain markers on the wire.
    pub async fn send_chain(&self, client_id: ClientId, messages: Vec<ServerMessage>) {
        self.dispatch(client_id, Outbound::Chain(messages)).await;
    }

    async fn dispatch(&self, client_id: ClientId, outbound: Outbound) {
        let tx = self.clients.read().await.get(&client_id).cloned();
        if let Some(tx) = tx {
            if tx.send(outbound).is_err() {
                // Writer task already gone; the disconnect path cleans up.
                debug!(client = client_id.0, "dropping message for closed mailbox");
            }
        }
    }
}

/// Drain a client's mailbox onto the socket write half.
///
/// Runs until the channel closes (client unregistered and all senders
/// dropped) or a write fails because the peer vanished; the read side
/// notices the disconnect and does the cleanup.
pub async fn run_writer<W>(client_id: ClientId, mut writer: W, mut rx: OutboundRx)
where
    W: AsyncWrite + Unpin,
{
    while let Some(outbound) = rx.recv().await {
        let result = match outbound {
            Outbound::Line(message) => write_line(&mut writer, &message).await,
            Outbound::Chain(messages) => write_chain(&mut writer, &messages).await,
        };
        if let Err(e) = result {
            debug!(client = client_id.0, error = %e, "write failed, stopping writer");
            break;
        }
    }
}

async fn write_line<W>(writer: &mut W, message: &ServerMessage) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let line = format_server_line(message);
    writer.write_all(line.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await
}

async fn write_chain<W>(writer: &mut W, messages: &[ServerMessage]) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    write_line(writer, &ServerMessage::FirstOfChain).await?;
    for message in messages {
        write_line(writer, message).await?;
    }
    write_line(writer, &ServerMessage::LastOfChain).await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::io::{AsyncBufReadExt, BufReader};
    use tokio::sync::mpsc;

    use super::*;

    #[tokio::test]
    async fn send_to_unknown_client_is_a_silent_noop() {
        let directory = MailboxDirectory::new();
        directory
            .send(ClientId(404), ServerMessage::StandardMessage("hello".into()))
            .await;
        assert_eq!(directory.client_count().await, 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn chains_are_never_split_by_concurrent_sends() {
        let directory = Arc::new(MailboxDirectory::new());
        let client = ClientId(7);

        let (tx, rx) = mpsc::unbounded_channel();
        directory.register(client, tx).await;

        let (server_io, client_io) = tokio::io::duplex(512 * 1024);
        let writer = tokio::spawn(run_writer(client, server_io, rx));

        // Half the tasks push chains, half push direct lines, all at the
        // same client.
        let mut tasks = Vec::new();
        for task in 0..8u32 {
            let directory = directory.clone();
            tasks.push(tokio::spawn(async move {
                for i in 0..25u32 {
                    if task % 2 == 0 {
                        directory
                            .send_chain(
                                client,
                                vec![
                                    ServerMessage::StandardMessage(format!(
                                        "chain {} {} first",
                                        task, i
                                    )),
                                    ServerMessage::StandardMessage(format!(
                                        "chain {} {} second",
                                        task, i
                                    )),
                                ],
                            )
                            .await;
                    } else {
                        directory
                            .send(
                                client,
                                ServerMessage::StandardMessage(format!("direct {} {}", task, i)),
                            )
                            .await;
                    }
                }
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        // Dropping the directory entry closes the channel; the writer
        // drains what is queued and exits, which ends the stream.
        directory.unregister(client).await;
        writer.await.unwrap();

        let mut lines = BufReader::new(client_io).lines();
        let mut in_chain = false;
        let mut chain_lines = 0;
        let mut direct_lines = 0;
        while let Some(line) = lines.next_line().await.unwrap() {
            match line.as_str() {
                "FIRSTOFCHAIN" => {
                    assert!(!in_chain, "nested FIRSTOFCHAIN");
                    in_chain = true;
                }
                "LASTOFCHAIN" => {
                    assert!(in_chain, "LASTOFCHAIN without FIRSTOFCHAIN");
                    in_chain = false;
                }
                other => {
                    let payload = other
                        .strip_prefix("STANDARD_MESSAGE ")
                        .expect("unexpected line");
                    if in_chain {
                        assert!(payload.starts_with("chain"), "chain split by: {}", payload);
                        chain_lines += 1;
                    } else {
                        assert!(payload.starts_with("direct"), "stray line in open stream");
                        direct_lines += 1;
                    }
                }
            }
        }
        assert!(!in_chain, "unterminated chain");
        assert_eq!(chain_lines, 4 * 25 * 2);
        assert_eq!(direct_lines, 4 * 25);
    }

    #[tokio::test]
    async fn chain_lines_keep_their_order() {
        let directory = MailboxDirectory::new();
        let client = ClientId(1);
        let (tx, rx) = mpsc::unbounded_channel();
        directory.register(client, tx).await;

        let (server_io, client_io) = tokio::io::duplex(4096);
        let writer = tokio::spawn(run_writer(client, server_io, rx));

        directory
            .send_chain(
                client,
                vec![
                    ServerMessage::InitGame("one".into()),
                    ServerMessage::StandardMessage("two".into()),
                    ServerMessage::GameTable(vec!["three".into()]),
                ],
            )
            .await;
        directory.unregister(client).await;
        writer.await.unwrap();

        let mut lines = BufReader::new(client_io).lines();
        let mut got = Vec::new();
        while let Some(line) = lines.next_line().await.unwrap() {
            got.push(line);
        }
        assert_eq!(
            got,
            vec![
                "FIRSTOFCHAIN",
                "INIT_GAME one",
                "STANDARD_MESSAGE two",
                "GAME_TABLE three",
                "LASTOFCHAIN",
            ]
        );
    }
}
