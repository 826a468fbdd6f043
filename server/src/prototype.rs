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

//! Placeholder story used until a story engine is plugged in.

use async_trait::async_trait;
use storyhost_service::{GameSession, Result, SessionResponse};

const INTRO: &str = "Welcome to the interactive story prototype.\n\
Type 'help' for prototype commands. Type 'quit' to disconnect.\n";

/// Answers `help` and acknowledges everything else
#[derive(Debug, Default)]
pub struct PrototypeSession;

impl PrototypeSession {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl GameSession for PrototypeSession {
    fn render_intro(&self) -> String {
        INTRO.to_string()
    }

    async fn handle_input(&mut self, input: &str) -> Result<SessionResponse> {
        if input.is_empty() {
            return Ok(SessionResponse::line(
                "[WIP] Nothing to do yet. Type 'help' or 'quit'.",
            ));
        }
        if input.eq_ignore_ascii_case("help") {
            return Ok(SessionResponse::lines([
                "Prototype commands: help, quit.",
                "Story interaction is coming soon.",
            ]));
        }
        Ok(SessionResponse::line(format!(
            "[WIP] Received command: {input}. The story is still being written."
        )))
    }
}
