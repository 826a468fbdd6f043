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

//! Session host configuration
//!
//! [`ServerConfig`] carries the per connection policy of the host: how many
//! sessions may run at once, the three connection timers and the messages
//! written when a policy ends a session. [`HostSettings`] carries the listen
//! address, loaded from the environment by the server binary.
//!
//! # Example
//!
//! ```
//! use storyhost_service::ServerConfig;
//! use std::time::Duration;
//!
//! let config = ServerConfig::default()
//!     .with_max_sessions(8)
//!     .with_idle_timeout(Duration::from_secs(120))
//!     .with_heartbeat_interval(Duration::ZERO);
//! assert!(config.validate().is_ok());
//! ```

use crate::{Result, TelnetError};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Environment variable holding the listen host.
pub const HOST_ENV: &str = "TELNET__HOST";

/// Environment variable holding the listen port.
pub const PORT_ENV: &str = "TELNET__PORT";

/// Session host configuration
///
/// A timer set to [`Duration::ZERO`] is disabled.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Maximum number of sessions admitted at the same time
    pub max_sessions: usize,

    /// Time without a submitted line before the session is closed
    pub idle_timeout: Duration,

    /// Interval between heartbeat messages while waiting for input
    pub heartbeat_interval: Duration,

    /// Maximum duration of a session regardless of activity
    pub session_lifetime: Duration,

    /// Written to a connection refused for lack of capacity
    ///
    /// Sent as a single line: bare `\n` become `\r\n` and a closing `\r\n`
    /// is appended, like every other message.
    pub busy_message: String,

    /// Written when the idle timer ends a session
    pub inactivity_message: String,

    /// Written every heartbeat interval
    pub heartbeat_message: String,

    /// Written when the lifetime timer ends a session
    pub lifetime_message: String,

    /// Written before each line is read
    pub prompt: String,

    /// Input that ends the session without being dispatched
    pub quit_keyword: String,

    /// Written when the client quits
    pub farewell_message: String,

    /// Pause after the negotiation preamble so clients settle before text
    pub negotiation_delay: Duration,

    /// Echo accepted keystrokes back to the client
    pub echo: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_sessions: 100,
            idle_timeout: Duration::from_secs(5 * 60),
            heartbeat_interval: Duration::from_secs(45),
            session_lifetime: Duration::from_secs(30 * 60),
            busy_message: "Server is busy. Please try again later.".to_string(),
            inactivity_message: "Session timed out due to inactivity.".to_string(),
            heartbeat_message: "[heartbeat]".to_string(),
            lifetime_message: "Session reached the maximum allowed duration.".to_string(),
            prompt: "> ".to_string(),
            quit_keyword: "quit".to_string(),
            farewell_message: "Farewell, until we meet again.".to_string(),
            negotiation_delay: Duration::from_millis(50),
            echo: true,
        }
    }
}

impl ServerConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of concurrent sessions
    pub fn with_max_sessions(mut self, max: usize) -> Self {
        self.max_sessions = max;
        self
    }

    /// Set the idle timeout, `Duration::ZERO` disables it
    pub fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    /// Set the heartbeat interval, `Duration::ZERO` disables it
    pub fn with_heartbeat_interval(mut self, interval: Duration) -> Self {
        self.heartbeat_interval = interval;
        self
    }

    /// Set the session lifetime, `Duration::ZERO` disables it
    pub fn with_session_lifetime(mut self, lifetime: Duration) -> Self {
        self.session_lifetime = lifetime;
        self
    }

    /// Set the busy message
    pub fn with_busy_message(mut self, message: impl Into<String>) -> Self {
        self.busy_message = message.into();
        self
    }

    /// Set the inactivity message
    pub fn with_inactivity_message(mut self, message: impl Into<String>) -> Self {
        self.inactivity_message = message.into();
        self
    }

    /// Set the heartbeat message
    pub fn with_heartbeat_message(mut self, message: impl Into<String>) -> Self {
        self.heartbeat_message = message.into();
        self
    }

    /// Set the lifetime exceeded message
    pub fn with_lifetime_message(mut self, message: impl Into<String>) -> Self {
        self.lifetime_message = message.into();
        self
    }

    /// Set the prompt
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Set the quit keyword
    pub fn with_quit_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.quit_keyword = keyword.into();
        self
    }

    /// Set the farewell message
    pub fn with_farewell_message(mut self, message: impl Into<String>) -> Self {
        self.farewell_message = message.into();
        self
    }

    /// Set the delay after the negotiation preamble
    pub fn with_negotiation_delay(mut self, delay: Duration) -> Self {
        self.negotiation_delay = delay;
        self
    }

    /// Enable or disable keystroke echo
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Validate the configuration
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.max_sessions == 0 {
            return Err("max_sessions must be greater than 0".to_string());
        }

        if self.quit_keyword.trim().is_empty() {
            return Err("quit_keyword must not be empty".to_string());
        }

        Ok(())
    }

    /// True if the trimmed input matches the quit keyword, ignoring case
    pub fn is_quit(&self, input: &str) -> bool {
        input.trim().eq_ignore_ascii_case(self.quit_keyword.trim())
    }
}

/// Listen address of the session host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostSettings {
    /// Host name or address to listen on
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl Default for HostSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 2323,
        }
    }
}

impl HostSettings {
    /// Create host settings for the given host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Load settings from `TELNET__HOST` and `TELNET__PORT`
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(host) = lookup(HOST_ENV) {
            settings.host = host.trim().to_string();
        }

        if let Some(port) = lookup(PORT_ENV) {
            settings.port = port.trim().parse().map_err(|_| {
                TelnetError::InvalidConfig(format!("{PORT_ENV} is not a valid port: {port:?}"))
            })?;
        }

        Ok(settings)
    }

    /// Resolve the socket address to bind
    ///
    /// A host that is not an IP address binds every interface.
    pub fn socket_addr(&self) -> SocketAddr {
        let ip = self
            .host
            .parse::<IpAddr>()
            .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        SocketAddr::new(ip, self.port)
    }
}
