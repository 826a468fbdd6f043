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

//! Storyhost telnet server
//!
//! Listens on `TELNET__HOST:TELNET__PORT` (default `127.0.0.1:2323`) and
//! serves the prototype story session until Ctrl-C. Log verbosity follows
//! `RUST_LOG`, defaulting to `info`.

mod prototype;

use prototype::PrototypeSession;
use storyhost_service::{
    ConnectionId, GameSession, HostSettings, Result, ServerConfig, TelnetGameServer,
};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let settings = HostSettings::from_env()?;
    let server = TelnetGameServer::bind(
        settings.socket_addr(),
        ServerConfig::default(),
        |_id: ConnectionId| Box::new(PrototypeSession::new()) as Box<dyn GameSession>,
    )
    .await?;
    info!(host = %settings.host, port = settings.port, "starting storyhost");

    let shutdown = CancellationToken::new();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            if let Err(err) = tokio::signal::ctrl_c().await {
                warn!(error = %err, "failed to listen for ctrl-c");
                return;
            }
            info!("shutdown signal received");
            shutdown.cancel();
        }
    });

    server.run(shutdown).await?;

    let snapshot = server.snapshot();
    info!(
        sessions = snapshot.total_sessions,
        rejected = snapshot.rejected_sessions,
        commands = snapshot.total_commands,
        errors = snapshot.total_errors(),
        "storyhost stopped"
    );
    Ok(())
}
