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

use crate::AnsiKey;
use crate::consts::{CSI_OPEN, ESC, FINAL_BYTES, MAX_SEQUENCE_LENGTH};
use tracing::trace;

/// Where the parser is inside an escape sequence.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum AnsiEscapeState {
    /// Not inside a sequence.
    #[default]
    None,
    /// Saw `ESC`, waiting for `[`.
    Escape,
    /// Saw `ESC [`, no parameter bytes yet.
    Bracket,
    /// Collecting parameter bytes until a final byte arrives.
    Collecting,
}

/// Outcome of feeding one byte to an [`AnsiParser`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AnsiStep {
    /// The byte is not part of an escape sequence and should be treated as data.
    Passthrough(u8),
    /// The byte was absorbed into a sequence that is still open.
    Pending,
    /// The byte completed a recognized key.
    Key(AnsiKey),
    /// The byte closed or broke a sequence that carries no key.
    Discarded,
}

/// A bounded parser for the CSI cursor keys a telnet client sends.
///
/// Bytes after `ESC` are held in a fixed buffer. A sequence that reaches
/// [`MAX_SEQUENCE_LENGTH`] without a final byte is dropped and the parser returns
/// to [`AnsiEscapeState::None`], so malformed input can neither grow memory nor
/// wedge the parser.
#[derive(Clone, Debug, Default)]
pub struct AnsiParser {
    buffer: [u8; MAX_SEQUENCE_LENGTH],
    len: usize,
    state: AnsiEscapeState,
}

impl AnsiParser {
    /// Creates a parser outside of any sequence.
    pub fn new() -> AnsiParser {
        AnsiParser::default()
    }

    /// Current state.
    pub fn state(&self) -> AnsiEscapeState {
        self.state
    }

    /// Returns `true` while a sequence is open.
    pub fn is_active(&self) -> bool {
        self.state != AnsiEscapeState::None
    }

    /// Drops any partial sequence.
    pub fn reset(&mut self) {
        self.state = AnsiEscapeState::None;
        self.len = 0;
    }

    /// Feeds one byte.
    ///
    /// `ESC` always opens a fresh sequence, abandoning one already in progress.
    /// After `ESC` anything other than `[` is discarded along with the escape.
    pub fn next(&mut self, byte: u8) -> AnsiStep {
        if byte == ESC {
            self.reset();
            self.state = AnsiEscapeState::Escape;
            return AnsiStep::Pending;
        }
        match self.state {
            AnsiEscapeState::None => AnsiStep::Passthrough(byte),
            AnsiEscapeState::Escape => {
                if byte == CSI_OPEN {
                    self.push(byte);
                    self.state = AnsiEscapeState::Bracket;
                    AnsiStep::Pending
                } else {
                    trace!(byte, "dropping unsupported escape");
                    self.reset();
                    AnsiStep::Discarded
                }
            }
            AnsiEscapeState::Bracket | AnsiEscapeState::Collecting => {
                if FINAL_BYTES.contains(&byte) {
                    let key = AnsiKey::from_sequence(&self.buffer[1..self.len], byte);
                    if key.is_none() {
                        trace!(
                            sequence = ?&self.buffer[..self.len],
                            final_byte = byte,
                            "ignoring control sequence"
                        );
                    }
                    self.reset();
                    key.map_or(AnsiStep::Discarded, AnsiStep::Key)
                } else if self.len == MAX_SEQUENCE_LENGTH {
                    trace!(length = self.len, "abandoning over-long control sequence");
                    self.reset();
                    AnsiStep::Discarded
                } else {
                    self.push(byte);
                    self.state = AnsiEscapeState::Collecting;
                    AnsiStep::Pending
                }
            }
        }
    }

    fn push(&mut self, byte: u8) {
        self.buffer[self.len] = byte;
        self.len += 1;
    }
}
