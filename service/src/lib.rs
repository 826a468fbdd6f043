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

//! # Storyhost Service
//!
//! Hosts interactive story sessions over raw telnet. Each admitted
//! connection gets server side line editing, so players on clients without a
//! line mode still edit with arrows, backspace and delete, and every
//! submitted line is handed to a [`GameSession`].
//!
//! # Architecture
//!
//! ```text
//! TelnetGameServer        accept loop, SessionAdmission, registry, metrics
//!     ↓
//! connection task         prompt, race read against timers, dispatch
//!     ↓
//! TelnetInputProcessor    cancel safe line reads and writes
//!     ↓
//! LineCodec<AnsiCodec<TelnetCodec>>
//! ```
//!
//! # Session timers
//!
//! While waiting for a line, three timers run: the idle timer and the
//! heartbeat restart for every line, the lifetime timer spans the whole
//! connection. Set any of them to `Duration::ZERO` to disable it.

mod admission;
mod config;
mod connection;
mod error;
mod metrics;
mod processor;
mod server;
mod session;
mod types;

pub use admission::{SessionAdmission, SessionSlot};
pub use config::{HOST_ENV, HostSettings, PORT_ENV, ServerConfig};
pub use error::{Result, TelnetError};
pub use metrics::{ServerMetrics, ServerSnapshot};
pub use processor::TelnetInputProcessor;
pub use server::TelnetGameServer;
pub use session::{GameSession, GameSessionFactory, SessionResponse};
pub use types::{ConnectionId, ConnectionInfo, ConnectionState, SessionEnd};
