//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! The telnet session host

use crate::connection::{SessionContext, serve};
use crate::types::ConnectionEntry;
use crate::{
    ConnectionId, ConnectionInfo, GameSessionFactory, Result, ServerConfig, ServerMetrics,
    ServerSnapshot, SessionAdmission, TelnetError,
};
use bytes::BytesMut;
use dashmap::DashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;
use storyhost_terminal::echo;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{Instrument, debug, info, warn};

type Registry = DashMap<ConnectionId, Arc<ConnectionEntry>>;

/// Telnet session host
///
/// Accepts connections, admits as many as there are session slots and runs
/// one task per admitted connection. Connections beyond capacity get the
/// busy message and are closed without negotiation.
///
/// # Example
///
/// ```no_run
/// use storyhost_service::{ConnectionId, GameSession, ServerConfig, TelnetGameServer};
/// use tokio_util::sync::CancellationToken;
///
/// # fn story() -> Box<dyn GameSession> { unimplemented!() }
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let server = TelnetGameServer::bind(
///         "127.0.0.1:2323".parse()?,
///         ServerConfig::default(),
///         |_id: ConnectionId| story(),
///     )
///     .await?;
///
///     let shutdown = CancellationToken::new();
///     server.run(shutdown).await?;
///     Ok(())
/// }
/// ```
pub struct TelnetGameServer {
    config: Arc<ServerConfig>,
    factory: Arc<dyn GameSessionFactory>,
    listener: Mutex<Option<TcpListener>>,
    local_addr: SocketAddr,
    admission: SessionAdmission,
    metrics: Arc<ServerMetrics>,
    connections: Arc<Registry>,
    next_id: AtomicU64,
    running: AtomicBool,
    tracker: TaskTracker,
}

impl TelnetGameServer {
    /// Validate the configuration and bind the listener
    ///
    /// Connections are not accepted until [`run`](Self::run) is called.
    pub async fn bind<F>(addr: SocketAddr, config: ServerConfig, factory: F) -> Result<Self>
    where
        F: GameSessionFactory,
    {
        config.validate().map_err(TelnetError::InvalidConfig)?;

        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;

        info!(%local_addr, max_sessions = config.max_sessions, "Telnet server bound");

        Ok(Self {
            admission: SessionAdmission::new(config.max_sessions),
            config: Arc::new(config),
            factory: Arc::new(factory),
            listener: Mutex::new(Some(listener)),
            local_addr,
            metrics: Arc::new(ServerMetrics::new()),
            connections: Arc::new(DashMap::new()),
            next_id: AtomicU64::new(1),
            running: AtomicBool::new(false),
            tracker: TaskTracker::new(),
        })
    }

    /// Accept connections until `shutdown` is cancelled
    ///
    /// Cancelling closes the listener and ends every running session.
    /// Returns once all connection tasks have finished.
    pub async fn run(&self, shutdown: CancellationToken) -> Result<()> {
        let Some(listener) = self.listener.lock().await.take() else {
            return Err(if self.is_running() {
                TelnetError::AlreadyRunning
            } else {
                TelnetError::ServerShuttingDown
            });
        };
        self.running.store(true, Ordering::SeqCst);
        info!(local_addr = %self.local_addr, "Accepting connections");

        loop {
            let accepted = tokio::select! {
                _ = shutdown.cancelled() => break,
                accepted = listener.accept() => accepted,
            };

            match accepted {
                Ok((socket, peer_addr)) => self.admit(socket, peer_addr, &shutdown),
                Err(err) => {
                    warn!(error = %err, "Failed to accept connection");
                    // Back off on errors to avoid tight loop
                    tokio::time::sleep(Duration::from_millis(100)).await;
                }
            }
        }

        drop(listener);
        info!(
            active_sessions = self.connection_count(),
            "Listener closed, waiting for sessions"
        );

        self.tracker.close();
        self.tracker.wait().await;
        self.running.store(false, Ordering::SeqCst);

        info!("Telnet server stopped");
        Ok(())
    }

    fn admit(&self, socket: TcpStream, peer_addr: SocketAddr, shutdown: &CancellationToken) {
        let Some(slot) = self.admission.try_acquire() else {
            self.metrics.session_rejected();
            warn!(%peer_addr, max_sessions = self.config.max_sessions, "rejected");
            let message = self.config.busy_message.clone();
            self.tracker
                .spawn(reject(socket, peer_addr, message).in_current_span());
            return;
        };

        if let Err(err) = socket.set_nodelay(true) {
            debug!(%peer_addr, error = %err, "Failed to disable Nagle");
        }

        let id = ConnectionId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let entry = Arc::new(ConnectionEntry::new(peer_addr));
        self.connections.insert(id, entry.clone());
        self.metrics.session_accepted();
        info!(connection_id = %id, %peer_addr, "accepted");

        let session = self.factory.create(id);
        let context = SessionContext {
            config: self.config.clone(),
            metrics: self.metrics.clone(),
            shutdown: shutdown.clone(),
        };
        let registered = Registered {
            connections: self.connections.clone(),
            id,
        };

        self.tracker.spawn(
            async move {
                let _registered = registered;
                serve(id, peer_addr, socket, slot, session, entry, context).await
            }
            .in_current_span(),
        );
    }

    /// Check if the server is accepting connections
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Get the address the listener is bound to
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Get the number of admitted sessions still running
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// List the sessions still running
    pub fn connections(&self) -> Vec<ConnectionInfo> {
        let mut infos: Vec<ConnectionInfo> = self
            .connections
            .iter()
            .map(|item| item.value().info(*item.key()))
            .collect();
        infos.sort_by_key(|info| info.id);
        infos
    }

    /// Get the server metrics
    pub fn metrics(&self) -> Arc<ServerMetrics> {
        self.metrics.clone()
    }

    /// Get a snapshot of the server metrics
    pub fn snapshot(&self) -> ServerSnapshot {
        self.metrics.snapshot()
    }

    /// Get the server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

impl std::fmt::Debug for TelnetGameServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelnetGameServer")
            .field("local_addr", &self.local_addr)
            .field("running", &self.is_running())
            .field("connection_count", &self.connection_count())
            .field("available_slots", &self.admission.available())
            .finish()
    }
}

/// Removes a connection from the registry when its task ends, even by panic
struct Registered {
    connections: Arc<Registry>,
    id: ConnectionId,
}

impl Drop for Registered {
    fn drop(&mut self) {
        self.connections.remove(&self.id);
    }
}

async fn reject(mut socket: TcpStream, peer_addr: SocketAddr, message: String) {
    let mut bytes = BytesMut::with_capacity(message.len() + 2);
    echo::normalize_newlines(&mut bytes, &message);
    bytes.extend_from_slice(b"\r\n");

    let written = async {
        socket.write_all(&bytes).await?;
        socket.shutdown().await
    }
    .await;
    if let Err(err) = written {
        debug!(%peer_addr, error = %err, "Failed to write busy message");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameSession, SessionResponse};
    use async_trait::async_trait;
    use tokio::io::AsyncReadExt;
    use tracing_test::traced_test;

    struct Silent;

    #[async_trait]
    impl GameSession for Silent {
        fn render_intro(&self) -> String {
            String::new()
        }

        async fn handle_input(&mut self, _input: &str) -> Result<SessionResponse> {
            Ok(SessionResponse::empty())
        }
    }

    fn silent(_id: ConnectionId) -> Box<dyn GameSession> {
        Box::new(Silent)
    }

    #[tokio::test]
    async fn test_bind_rejects_invalid_config() {
        let config = ServerConfig::default().with_max_sessions(0);
        let err = TelnetGameServer::bind("127.0.0.1:0".parse().unwrap(), config, silent)
            .await
            .unwrap_err();
        assert!(matches!(err, TelnetError::InvalidConfig(_)));
    }

    #[tokio::test]
    async fn test_server_lifecycle() {
        let server = Arc::new(
            TelnetGameServer::bind("127.0.0.1:0".parse().unwrap(), ServerConfig::default(), silent)
                .await
                .unwrap(),
        );
        assert_ne!(server.local_addr().port(), 0);
        assert!(!server.is_running());

        let shutdown = CancellationToken::new();
        let handle = tokio::spawn({
            let server = server.clone();
            let shutdown = shutdown.clone();
            async move { server.run(shutdown).await }
        });

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(server.is_running());
        assert!(matches!(
            server.run(CancellationToken::new()).await,
            Err(TelnetError::AlreadyRunning)
        ));

        shutdown.cancel();
        handle.await.unwrap().unwrap();
        assert!(!server.is_running());
        assert!(matches!(
            server.run(CancellationToken::new()).await,
            Err(TelnetError::ServerShuttingDown)
        ));
    }

    #[tokio::test]
    async fn test_debug_output() {
        let server =
            TelnetGameServer::bind("127.0.0.1:0".parse().unwrap(), ServerConfig::default(), silent)
                .await
                .unwrap();
        let debug = format!("{server:?}");
        assert!(debug.contains("TelnetGameServer"));
        assert!(debug.contains("available_slots: 100"));
    }

    async fn read_until(stream: &mut TcpStream, needle: &[u8]) -> Vec<u8> {
        let mut seen = Vec::new();
        let mut buf = [0u8; 256];
        while !seen.windows(needle.len()).any(|w| w == needle) {
            let n = stream.read(&mut buf).await.unwrap();
            assert_ne!(n, 0, "stream closed before {needle:?}");
            seen.extend_from_slice(&buf[..n]);
        }
        seen
    }

    #[tokio::test]
    #[traced_test]
    async fn test_lifecycle_logs() {
        let config = ServerConfig::default()
            .with_max_sessions(1)
            .with_negotiation_delay(Duration::ZERO);
        let server = TelnetGameServer::bind("127.0.0.1:0".parse().unwrap(), config, silent)
            .await
            .unwrap();
        let addr = server.local_addr();
        let shutdown = CancellationToken::new();

        let client = async {
            let mut first = TcpStream::connect(addr).await.unwrap();
            read_until(&mut first, b"> ").await;
            assert_eq!(server.connections().len(), 1);

            let mut second = TcpStream::connect(addr).await.unwrap();
            let mut busy = Vec::new();
            second.read_to_end(&mut busy).await.unwrap();
            assert_eq!(busy, b"Server is busy. Please try again later.\r\n");

            first.write_all(b"quit\r\n").await.unwrap();
            let mut rest = Vec::new();
            first.read_to_end(&mut rest).await.unwrap();

            shutdown.cancel();
        };

        let (result, ()) = tokio::join!(server.run(shutdown.clone()), client);
        result.unwrap();

        let snapshot = server.snapshot();
        assert_eq!(snapshot.total_sessions, 1);
        assert_eq!(snapshot.rejected_sessions, 1);
        assert_eq!(snapshot.completed_sessions, 1);
        assert!(server.connections().is_empty());

        assert!(logs_contain("accepted"));
        assert!(logs_contain("rejected"));
        assert!(logs_contain("ended"));
        assert!(logs_contain("reason=client_quit"));
        assert!(logs_contain("faulted=false"));
    }
}
