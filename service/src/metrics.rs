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

//! Lock-free metrics for the session host
//!
//! Every recording updates an atomic counter read by
//! [`ServerMetrics::snapshot`] and forwards to the `metrics` facade so an
//! installed exporter sees the same numbers.

use crate::SessionEnd;
use metrics::{counter, gauge, histogram};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Lock-free session host metrics
///
/// Connection tasks only increment; readers take a [`ServerSnapshot`].
#[derive(Debug)]
pub struct ServerMetrics {
    // Sessions
    total_sessions: AtomicU64,
    active_sessions: AtomicU64,
    completed_sessions: AtomicU64,
    rejected_sessions: AtomicU64,
    faulted_sessions: AtomicU64,

    // Policy ends
    inactivity_timeouts: AtomicU64,
    lifetime_enforcements: AtomicU64,

    // Commands
    total_commands: AtomicU64,

    // Errors
    session_errors: AtomicU64,
    command_errors: AtomicU64,

    started_at: Instant,
}

impl Default for ServerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerMetrics {
    /// Create a new metrics instance
    pub fn new() -> Self {
        Self {
            total_sessions: AtomicU64::new(0),
            active_sessions: AtomicU64::new(0),
            completed_sessions: AtomicU64::new(0),
            rejected_sessions: AtomicU64::new(0),
            faulted_sessions: AtomicU64::new(0),
            inactivity_timeouts: AtomicU64::new(0),
            lifetime_enforcements: AtomicU64::new(0),
            total_commands: AtomicU64::new(0),
            session_errors: AtomicU64::new(0),
            command_errors: AtomicU64::new(0),
            started_at: Instant::now(),
        }
    }

    // Session tracking

    /// Record a connection admitted to a session slot
    pub fn session_accepted(&self) {
        self.total_sessions.fetch_add(1, Ordering::Relaxed);
        self.active_sessions.fetch_add(1, Ordering::Relaxed);
        counter!("storyhost.sessions.accepted").increment(1);
        gauge!("storyhost.sessions.active").increment(1.0);
    }

    /// Record a connection refused for lack of capacity
    pub fn session_rejected(&self) {
        self.rejected_sessions.fetch_add(1, Ordering::Relaxed);
        counter!("storyhost.sessions.rejected").increment(1);
    }

    /// Record the end of an admitted session
    pub fn session_ended(&self, end: SessionEnd, duration: Duration) {
        self.active_sessions.fetch_sub(1, Ordering::Relaxed);
        self.completed_sessions.fetch_add(1, Ordering::Relaxed);
        if end.is_faulted() {
            self.faulted_sessions.fetch_add(1, Ordering::Relaxed);
        }
        counter!("storyhost.sessions.ended", "reason" => end.as_str()).increment(1);
        gauge!("storyhost.sessions.active").decrement(1.0);
        histogram!("storyhost.session.duration").record(duration.as_secs_f64());
    }

    /// Record a session closed by the idle timer
    pub fn inactivity_timeout(&self) {
        self.inactivity_timeouts.fetch_add(1, Ordering::Relaxed);
        counter!("storyhost.sessions.inactive_timeouts").increment(1);
    }

    /// Record a session closed by the lifetime timer
    pub fn lifetime_enforced(&self) {
        self.lifetime_enforcements.fetch_add(1, Ordering::Relaxed);
        counter!("storyhost.sessions.lifetime_ended").increment(1);
    }

    /// Record a line handled by a game session
    pub fn command_handled(&self, latency: Duration) {
        self.total_commands.fetch_add(1, Ordering::Relaxed);
        counter!("storyhost.commands.total").increment(1);
        histogram!("storyhost.command.latency").record(latency.as_secs_f64());
    }

    // Error tracking

    /// Record a game session failing to handle a line
    pub fn command_error(&self) {
        self.command_errors.fetch_add(1, Ordering::Relaxed);
        counter!("storyhost.commands.errors").increment(1);
    }

    /// Record a session ended by a transport failure or fault
    pub fn session_error(&self) {
        self.session_errors.fetch_add(1, Ordering::Relaxed);
        counter!("storyhost.sessions.errors").increment(1);
    }

    /// Get the current number of active sessions
    pub fn active_sessions(&self) -> u64 {
        self.active_sessions.load(Ordering::Relaxed)
    }

    /// Get the total number of admitted sessions
    pub fn total_sessions(&self) -> u64 {
        self.total_sessions.load(Ordering::Relaxed)
    }

    // Snapshot

    /// Get a point-in-time view of all counters
    ///
    /// Counters are loaded one by one, so a snapshot taken while sessions
    /// are changing may be off by the updates racing the read.
    pub fn snapshot(&self) -> ServerSnapshot {
        ServerSnapshot {
            total_sessions: self.total_sessions.load(Ordering::Relaxed),
            active_sessions: self.active_sessions.load(Ordering::Relaxed),
            completed_sessions: self.completed_sessions.load(Ordering::Relaxed),
            rejected_sessions: self.rejected_sessions.load(Ordering::Relaxed),
            faulted_sessions: self.faulted_sessions.load(Ordering::Relaxed),
            inactivity_timeouts: self.inactivity_timeouts.load(Ordering::Relaxed),
            lifetime_enforcements: self.lifetime_enforcements.load(Ordering::Relaxed),
            total_commands: self.total_commands.load(Ordering::Relaxed),
            session_errors: self.session_errors.load(Ordering::Relaxed),
            command_errors: self.command_errors.load(Ordering::Relaxed),
            uptime: self.started_at.elapsed(),
        }
    }
}

/// A snapshot of session host metrics at a point in time
#[derive(Debug, Clone, PartialEq)]
pub struct ServerSnapshot {
    /// Sessions admitted since start
    pub total_sessions: u64,
    /// Sessions currently running
    pub active_sessions: u64,
    /// Sessions that have ended
    pub completed_sessions: u64,
    /// Connections refused for lack of capacity
    pub rejected_sessions: u64,
    /// Sessions whose end was recorded as faulted
    pub faulted_sessions: u64,
    /// Sessions closed by the idle timer
    pub inactivity_timeouts: u64,
    /// Sessions closed by the lifetime timer
    pub lifetime_enforcements: u64,
    /// Lines handled by game sessions
    pub total_commands: u64,
    /// Sessions ended by a transport failure or fault
    pub session_errors: u64,
    /// Lines a game session failed to handle
    pub command_errors: u64,
    /// Time since the metrics were created
    pub uptime: Duration,
}

impl ServerSnapshot {
    /// Admitted sessions per minute of uptime
    pub fn sessions_per_minute(&self) -> f64 {
        if self.uptime.is_zero() {
            return 0.0;
        }
        self.total_sessions as f64 / (self.uptime.as_secs_f64() / 60.0)
    }

    /// Calculate total error count
    pub fn total_errors(&self) -> u64 {
        self.session_errors + self.command_errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_session_tracking() {
        let metrics = ServerMetrics::new();
        assert_eq!(metrics.active_sessions(), 0);

        metrics.session_accepted();
        metrics.session_accepted();
        assert_eq!(metrics.active_sessions(), 2);
        assert_eq!(metrics.total_sessions(), 2);

        metrics.session_ended(SessionEnd::ClientQuit, Duration::from_secs(3));
        metrics.session_ended(SessionEnd::IdleTimeout, Duration::from_secs(3));

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.active_sessions, 0);
        assert_eq!(snapshot.total_sessions, 2);
        assert_eq!(snapshot.completed_sessions, 2);
        assert_eq!(snapshot.faulted_sessions, 1);
    }

    #[test]
    fn test_policy_and_error_tracking() {
        let metrics = ServerMetrics::new();

        metrics.session_rejected();
        metrics.inactivity_timeout();
        metrics.lifetime_enforced();
        metrics.command_handled(Duration::from_millis(2));
        metrics.command_error();
        metrics.session_error();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.rejected_sessions, 1);
        assert_eq!(snapshot.inactivity_timeouts, 1);
        assert_eq!(snapshot.lifetime_enforcements, 1);
        assert_eq!(snapshot.total_commands, 1);
        assert_eq!(snapshot.total_errors(), 2);
    }

    #[test]
    fn test_sessions_per_minute() {
        let mut snapshot = ServerMetrics::new().snapshot();
        snapshot.total_sessions = 30;
        snapshot.uptime = Duration::from_secs(120);
        assert!((snapshot.sessions_per_minute() - 15.0).abs() < f64::EPSILON);

        snapshot.uptime = Duration::ZERO;
        assert_eq!(snapshot.sessions_per_minute(), 0.0);
    }

    #[test]
    fn test_concurrent_updates() {
        let metrics = std::sync::Arc::new(ServerMetrics::new());
        let mut handles = vec![];

        for _ in 0..10 {
            let metrics = metrics.clone();
            handles.push(thread::spawn(move || {
                for _ in 0..100 {
                    metrics.session_accepted();
                    metrics.command_handled(Duration::from_micros(5));
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.total_sessions, 1000);
        assert_eq!(snapshot.active_sessions, 1000);
        assert_eq!(snapshot.total_commands, 1000);
    }
}
