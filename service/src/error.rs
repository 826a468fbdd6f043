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

//! Error types for the session host

use storyhost_terminal::TerminalError;
use thiserror::Error;

/// Result type for session host operations
pub type Result<T> = std::result::Result<T, TelnetError>;

/// Session host error types
#[derive(Debug, Error)]
pub enum TelnetError {
    /// I/O error from the underlying TCP stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from the line editing layer
    #[error("Terminal error: {0}")]
    Terminal(#[from] TerminalError),

    /// The game session failed to handle input
    #[error("Session error: {0}")]
    Session(String),

    /// Server is shutting down
    #[error("Server is shutting down")]
    ServerShuttingDown,

    /// Server is already accepting connections
    #[error("Server already running")]
    AlreadyRunning,

    /// Configuration was rejected
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl TelnetError {
    /// Check if the error came from the transport
    ///
    /// Transport failures end a connection quietly since nothing more can
    /// be written to it.
    pub fn is_transport(&self) -> bool {
        match self {
            TelnetError::Io(_) => true,
            TelnetError::Terminal(err) => err.is_io(),
            _ => false,
        }
    }
}
