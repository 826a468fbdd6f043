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

use tracing::trace;

/// Incremental UTF-8 decoder fed one byte at a time.
///
/// Invalid or truncated sequences become U+FFFD. A byte that interrupts a
/// sequence yields the replacement character and is then decoded on its own,
/// so a single push can produce two characters.
#[derive(Clone, Debug, Default)]
pub struct Utf8Decoder {
    buffer: [u8; 4],
    len: usize,
    expected: usize,
}

impl Utf8Decoder {
    /// Creates a decoder with no partial sequence.
    pub fn new() -> Utf8Decoder {
        Utf8Decoder::default()
    }

    /// Returns `true` while a multi-byte sequence is incomplete.
    pub fn is_pending(&self) -> bool {
        self.len > 0
    }

    /// Drops any partial sequence.
    pub fn reset(&mut self) {
        self.len = 0;
        self.expected = 0;
    }

    /// Feeds one byte and returns the characters it completes.
    pub fn push(&mut self, byte: u8) -> impl Iterator<Item = char> + use<> {
        let decoded = if self.len == 0 {
            [self.start(byte), None]
        } else if byte & 0xC0 == 0x80 {
            [self.continue_with(byte), None]
        } else {
            trace!(byte, "utf-8 sequence interrupted");
            self.reset();
            [Some(char::REPLACEMENT_CHARACTER), self.start(byte)]
        };
        decoded.into_iter().flatten()
    }

    fn start(&mut self, byte: u8) -> Option<char> {
        let expected = match byte {
            0x00..=0x7F => return Some(char::from(byte)),
            0xC2..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF4 => 4,
            _ => {
                trace!(byte, "invalid utf-8 lead byte");
                return Some(char::REPLACEMENT_CHARACTER);
            }
        };
        self.buffer[0] = byte;
        self.len = 1;
        self.expected = expected;
        None
    }

    fn continue_with(&mut self, byte: u8) -> Option<char> {
        self.buffer[self.len] = byte;
        self.len += 1;
        match std::str::from_utf8(&self.buffer[..self.len]) {
            Ok(text) => {
                let ch = text.chars().next();
                self.reset();
                ch
            }
            Err(err) if err.error_len().is_some() => {
                trace!(sequence = ?&self.buffer[..self.len], "invalid utf-8 sequence");
                self.reset();
                Some(char::REPLACEMENT_CHARACTER)
            }
            Err(_) if self.len == self.expected => {
                self.reset();
                Some(char::REPLACEMENT_CHARACTER)
            }
            Err(_) => None,
        }
    }
}
