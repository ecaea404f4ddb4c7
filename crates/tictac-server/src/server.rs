//! TCP listener and top-level server wiring.
//!
//! This module:
//! - Listens on the configured address/port.
//! - Accepts new TCP connections, enforcing the client limit.
//! - Assigns each connection a `ClientId`.
//! - Spawns, per connection:
//!   - a writer task that owns the write half and drains the mailbox,
//!   - a connection task that owns the read half and the protocol state.
//!
//! The game registry and the mailbox directory are built once here and
//! passed to every connection by handle.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::{info, warn};

use tictac_core::{ClientId, GameRegistry};

use crate::config::Config;
use crate::connection::ConnectionSession;
use crate::mailbox::{self, MailboxDirectory};
use crate::types::{OutboundRx, OutboundTx};

/// Counter for assigning unique `ClientId`s over the process lifetime.
static NEXT_CLIENT_ID: AtomicU64 = AtomicU64::new(1);

fn next_client_id() -> ClientId {
    ClientId(NEXT_CLIENT_ID.fetch_add(1, Ordering::Relaxed))
}

/// Bind per the configuration and serve until the process exits.
pub async fn run(config: Config) -> Result<()> {
    let addr = config.socket_addr_string();
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, max_clients = config.max_clients, "listening");
    serve(listener, config.max_clients).await
}

/// Accept connections on an existing listener.
///
/// Split from [`run`] so tests can bind an ephemeral port themselves.
pub async fn serve(listener: TcpListener, max_clients: usize) -> Result<()> {
    let registry = Arc::new(GameRegistry::new());
    let mailboxes = Arc::new(MailboxDirectory::new());

    loop {
        let (stream, peer_addr) = listener.accept().await?;

        if mailboxes.client_count().await >= max_clients {
            warn!(%peer_addr, max_clients, "rejecting connection: client limit reached");
            // Just drop the stream; the peer sees the connection close.
            continue;
        }

        let client_id = next_client_id();
        info!(%peer_addr, client = client_id.0, "new client connected");

        let (out_tx, out_rx): (OutboundTx, OutboundRx) = mpsc::unbounded_channel();
        mailboxes.register(client_id, out_tx).await;

        let (read_half, write_half) = stream.into_split();
        tokio::spawn(mailbox::run_writer(client_id, write_half, out_rx));

        let session = ConnectionSession::new(client_id, registry.clone(), mailboxes.clone());
        tokio::spawn(session.run(read_half));
    }
}
