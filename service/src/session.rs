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

//! Game session collaborator traits
//!
//! The host knows nothing about the story being told. Each admitted
//! connection gets a fresh [`GameSession`] from the server's
//! [`GameSessionFactory`]; the host writes its intro, then hands it every
//! submitted line and writes back whatever it answers.
//!
//! # Example
//!
//! ```
//! use storyhost_service::{GameSession, Result, SessionResponse};
//! use async_trait::async_trait;
//!
//! struct Echo;
//!
//! #[async_trait]
//! impl GameSession for Echo {
//!     fn render_intro(&self) -> String {
//!         "Say something.".to_string()
//!     }
//!
//!     async fn handle_input(&mut self, input: &str) -> Result<SessionResponse> {
//!         Ok(SessionResponse::line(format!("You said: {input}")))
//!     }
//! }
//! ```

use crate::{ConnectionId, Result};
use async_trait::async_trait;

/// What a game session answers to one line of input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionResponse {
    /// Lines written back to the client, each terminated with CRLF
    pub lines: Vec<String>,
    /// End the connection after the lines are written
    pub should_disconnect: bool,
}

impl SessionResponse {
    /// A response with no output
    pub fn empty() -> Self {
        Self::default()
    }

    /// A single line response
    pub fn line(line: impl Into<String>) -> Self {
        Self {
            lines: vec![line.into()],
            should_disconnect: false,
        }
    }

    /// A multi line response
    pub fn lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            should_disconnect: false,
        }
    }

    /// Ask the host to close the connection after writing this response
    pub fn disconnect(mut self) -> Self {
        self.should_disconnect = true;
        self
    }
}

/// One player's game state, driven by the lines they submit
#[async_trait]
pub trait GameSession: Send + 'static {
    /// Text written once after negotiation, before the first prompt
    fn render_intro(&self) -> String;

    /// Handle one trimmed line of input
    ///
    /// An error ends the connection and is recorded as a command error.
    async fn handle_input(&mut self, input: &str) -> Result<SessionResponse>;
}

/// Builds a fresh [`GameSession`] for every admitted connection
pub trait GameSessionFactory: Send + Sync + 'static {
    /// Create the session for connection `id`
    fn create(&self, id: ConnectionId) -> Box<dyn GameSession>;
}

impl<F> GameSessionFactory for F
where
    F: Fn(ConnectionId) -> Box<dyn GameSession> + Send + Sync + 'static,
{
    fn create(&self, id: ConnectionId) -> Box<dyn GameSession> {
        self(id)
    }
}
