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

//! Per connection session task
//!
//! A connection negotiates, writes the session intro, then loops: prompt,
//! wait for the next line while sending heartbeats, dispatch the line, write
//! the response. Every await, writes included, is raced against server
//! shutdown and the idle and lifetime deadlines, so a peer that stops reading
//! cannot hold the task open. Whatever ends the loop, the teardown in
//! [`serve`] runs exactly once.

use crate::types::ConnectionEntry;
use crate::{
    ConnectionId, ConnectionState, GameSession, Result, ServerConfig, ServerMetrics, SessionEnd,
    SessionSlot, TelnetInputProcessor,
};
use std::net::SocketAddr;
use std::ops::ControlFlow;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::time::{Instant, Sleep, sleep, timeout};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, trace};

/// Upper bound on writing a closing notice and shutting the stream down
const CLOSING_GRACE: Duration = Duration::from_secs(1);

/// Shared state every connection task needs
#[derive(Debug, Clone)]
pub(crate) struct SessionContext {
    pub(crate) config: Arc<ServerConfig>,
    pub(crate) metrics: Arc<ServerMetrics>,
    pub(crate) shutdown: CancellationToken,
}

struct Deadlines {
    lifetime: Pin<Box<Sleep>>,
    idle: Pin<Box<Sleep>>,
}

impl Deadlines {
    fn new(config: &ServerConfig) -> Self {
        Self {
            lifetime: Box::pin(sleep(config.session_lifetime)),
            idle: Box::pin(sleep(config.idle_timeout)),
        }
    }

    fn touch(&mut self, idle_timeout: Duration) {
        self.idle.as_mut().reset(Instant::now() + idle_timeout);
    }
}

enum Input {
    Line(String),
    Closed,
    Quiet,
}

struct Connection<S> {
    processor: TelnetInputProcessor<S>,
    session: Box<dyn GameSession>,
    entry: Arc<ConnectionEntry>,
    context: SessionContext,
    deadlines: Deadlines,
}

/// Run `task` unless shutdown or a deadline comes first
async fn bounded<F, T>(
    deadlines: &mut Deadlines,
    context: &SessionContext,
    task: F,
) -> Result<ControlFlow<SessionEnd, T>>
where
    F: Future<Output = Result<T>>,
{
    let config = &context.config;
    tokio::select! {
        _ = context.shutdown.cancelled() => {
            debug!("server shutting down");
            Ok(ControlFlow::Break(SessionEnd::Shutdown))
        }
        _ = deadlines.lifetime.as_mut(), if !config.session_lifetime.is_zero() => {
            context.metrics.lifetime_enforced();
            Ok(ControlFlow::Break(SessionEnd::LifetimeExceeded))
        }
        _ = deadlines.idle.as_mut(), if !config.idle_timeout.is_zero() => {
            context.metrics.inactivity_timeout();
            Ok(ControlFlow::Break(SessionEnd::IdleTimeout))
        }
        result = task => result.map(ControlFlow::Continue),
    }
}

/// Wait for the next line, or for `heartbeat` to pass without one
async fn next_input<S>(
    processor: &mut TelnetInputProcessor<S>,
    heartbeat: Duration,
) -> Result<Input>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let quiet = async {
        if heartbeat.is_zero() {
            std::future::pending::<()>().await
        } else {
            sleep(heartbeat).await
        }
    };
    tokio::select! {
        line = processor.read_line() => Ok(match line? {
            Some(line) => Input::Line(line),
            None => Input::Closed,
        }),
        _ = quiet => Ok(Input::Quiet),
    }
}

macro_rules! bounded {
    ($connection:ident, $task:expr) => {
        match bounded(&mut $connection.deadlines, &$connection.context, $task).await? {
            ControlFlow::Continue(value) => value,
            ControlFlow::Break(end) => return Ok(end),
        }
    };
}

/// Run an admitted connection to completion and tear it down
///
/// The slot is released when this returns, on every path.
#[instrument(name = "session", skip_all, fields(connection_id = %id, peer_addr = %peer_addr))]
pub(crate) async fn serve<S>(
    id: ConnectionId,
    peer_addr: SocketAddr,
    stream: S,
    slot: SessionSlot,
    session: Box<dyn GameSession>,
    entry: Arc<ConnectionEntry>,
    context: SessionContext,
) -> SessionEnd
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    let started_at = Instant::now();
    let mut connection = Connection {
        processor: TelnetInputProcessor::new(stream, context.config.echo),
        session,
        entry,
        deadlines: Deadlines::new(&context.config),
        context,
    };

    let end = connection.run().await;

    connection.entry.set_state(ConnectionState::Ended);
    match timeout(CLOSING_GRACE, connection.processor.shutdown()).await {
        Ok(Ok(())) => {}
        Ok(Err(err)) => trace!(error = %err, "socket already closed"),
        Err(_) => trace!("socket shutdown timed out"),
    }
    let metrics = connection.context.metrics.clone();
    drop(connection);
    drop(slot);

    let duration = started_at.elapsed();
    metrics.session_ended(end, duration);
    info!(
        reason = %end,
        faulted = end.is_faulted(),
        duration_ms = duration.as_millis() as u64,
        "ended"
    );
    end
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    async fn run(&mut self) -> SessionEnd {
        let end = match self.drive().await {
            Ok(end) => end,
            Err(err) if err.is_transport() => {
                debug!(error = %err, "transport failure");
                self.context.metrics.session_error();
                SessionEnd::TransportFailure
            }
            Err(err) => {
                error!(error = %err, "session fault");
                self.context.metrics.session_error();
                SessionEnd::Fault
            }
        };

        let config = self.context.config.clone();
        match end {
            SessionEnd::IdleTimeout => self.notify(&config.inactivity_message).await,
            SessionEnd::LifetimeExceeded => self.notify(&config.lifetime_message).await,
            _ => {}
        }
        end
    }

    /// Best effort closing notice, given up on shutdown or after [`CLOSING_GRACE`]
    async fn notify(&mut self, message: &str) {
        let sent = tokio::select! {
            _ = self.context.shutdown.cancelled() => return,
            sent = timeout(CLOSING_GRACE, self.processor.write_line(message)) => sent,
        };
        match sent {
            Ok(Ok(())) => {}
            Ok(Err(err)) => debug!(error = %err, "failed to send closing notice"),
            Err(_) => debug!("peer is not reading, closing notice dropped"),
        }
    }

    async fn drive(&mut self) -> Result<SessionEnd> {
        let config = self.context.config.clone();
        let metrics = self.context.metrics.clone();

        self.entry.set_state(ConnectionState::Negotiating);
        bounded!(self, self.processor.negotiate(config.negotiation_delay));
        let intro = self.session.render_intro();
        bounded!(self, self.processor.write_line(&intro));

        loop {
            self.entry.set_state(ConnectionState::Reading);
            bounded!(self, self.processor.write_text(&config.prompt));
            self.deadlines.touch(config.idle_timeout);

            let line = loop {
                match bounded!(self, next_input(&mut self.processor, config.heartbeat_interval)) {
                    Input::Line(line) => break line,
                    Input::Closed => return Ok(SessionEnd::PeerClosed),
                    Input::Quiet => {
                        trace!("heartbeat");
                        bounded!(self, self.processor.write_line(&config.heartbeat_message));
                    }
                }
            };
            self.deadlines.touch(config.idle_timeout);
            let input = line.trim();

            if config.is_quit(input) {
                bounded!(self, self.processor.write_line(&config.farewell_message));
                return Ok(SessionEnd::ClientQuit);
            }

            self.entry.set_state(ConnectionState::Dispatching);
            let dispatched_at = Instant::now();
            let handled = bounded(
                &mut self.deadlines,
                &self.context,
                self.session.handle_input(input),
            )
            .await;
            let response = match handled {
                Ok(ControlFlow::Continue(response)) => response,
                Ok(ControlFlow::Break(end)) => return Ok(end),
                Err(err) => {
                    metrics.command_error();
                    return Err(err);
                }
            };
            metrics.command_handled(dispatched_at.elapsed());

            for line in &response.lines {
                bounded!(self, self.processor.write_line(line));
            }
            if response.should_disconnect {
                return Ok(SessionEnd::SessionRequested);
            }
        }
    }
}
