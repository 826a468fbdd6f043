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

//! Core types for the session host

use std::fmt;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::{Duration, Instant};

/// Unique identifier for a connection (monotonically increasing, never reused)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Create a new connection ID
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the underlying u64 value
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Where a connection is in its lifecycle (stored as atomic u8)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ConnectionState {
    /// Telnet options are being announced and the intro written
    Negotiating = 0,
    /// Waiting for the client to submit a line
    Reading = 1,
    /// A submitted line is being handled by the game session
    Dispatching = 2,
    /// The session is over and the socket is being closed
    Ended = 3,
}

impl ConnectionState {
    /// Convert from u8 (for atomic operations)
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Negotiating,
            1 => Self::Reading,
            2 => Self::Dispatching,
            _ => Self::Ended,
        }
    }

    /// Convert to u8 (for atomic operations)
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Check if the connection has ended
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Ended)
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Negotiating => write!(f, "negotiating"),
            Self::Reading => write!(f, "reading"),
            Self::Dispatching => write!(f, "dispatching"),
            Self::Ended => write!(f, "ended"),
        }
    }
}

/// Registry entry shared between a connection task and the server
#[derive(Debug)]
pub(crate) struct ConnectionEntry {
    peer_addr: SocketAddr,
    started_at: Instant,
    state: AtomicU8,
}

impl ConnectionEntry {
    pub(crate) fn new(peer_addr: SocketAddr) -> Self {
        Self {
            peer_addr,
            started_at: Instant::now(),
            state: AtomicU8::new(ConnectionState::Negotiating.as_u8()),
        }
    }

    pub(crate) fn state(&self) -> ConnectionState {
        ConnectionState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub(crate) fn set_state(&self, state: ConnectionState) {
        self.state.store(state.as_u8(), Ordering::Release);
    }

    pub(crate) fn info(&self, id: ConnectionId) -> ConnectionInfo {
        ConnectionInfo {
            id,
            peer_addr: self.peer_addr,
            state: self.state(),
            started_at: self.started_at,
        }
    }
}

/// Connection information snapshot (for non-blocking queries)
#[derive(Debug, Clone)]
pub struct ConnectionInfo {
    /// Connection ID
    pub id: ConnectionId,
    /// Peer address
    pub peer_addr: SocketAddr,
    /// State when the snapshot was taken
    pub state: ConnectionState,
    /// When the connection was admitted
    pub started_at: Instant,
}

impl ConnectionInfo {
    /// Get the connection duration
    pub fn duration(&self) -> Duration {
        self.started_at.elapsed()
    }
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The client typed the quit keyword
    ClientQuit,
    /// The client closed the connection
    PeerClosed,
    /// The game session asked to disconnect
    SessionRequested,
    /// No line was submitted within the idle timeout
    IdleTimeout,
    /// The session lifetime elapsed
    LifetimeExceeded,
    /// The server was shut down while the session was running
    Shutdown,
    /// Reading from or writing to the socket failed
    TransportFailure,
    /// The game session or line editor failed
    Fault,
}

impl SessionEnd {
    /// True for ends that are recorded as faulted
    ///
    /// Policy ends count as faulted even though they are expected.
    pub fn is_faulted(self) -> bool {
        matches!(
            self,
            Self::IdleTimeout
                | Self::LifetimeExceeded
                | Self::Shutdown
                | Self::TransportFailure
                | Self::Fault
        )
    }

    /// Short label used in logs
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ClientQuit => "client_quit",
            Self::PeerClosed => "peer_closed",
            Self::SessionRequested => "session_requested",
            Self::IdleTimeout => "idle_timeout",
            Self::LifetimeExceeded => "lifetime_exceeded",
            Self::Shutdown => "shutdown",
            Self::TransportFailure => "transport_failure",
            Self::Fault => "fault",
        }
    }
}

impl fmt::Display for SessionEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
