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

//! Keys recognized on input and the few control sequences written back out.

use bytes::BufMut;

/// Editing keys a terminal reports as CSI sequences.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum AnsiKey {
    /// `ESC [ A`
    CursorUp,
    /// `ESC [ B`
    CursorDown,
    /// `ESC [ C`
    CursorForward,
    /// `ESC [ D`
    CursorBack,
    /// `ESC [ H` or `ESC [ 1 ~`
    Home,
    /// `ESC [ F` or `ESC [ 4 ~`
    End,
    /// `ESC [ 3 ~`
    Delete,
}

impl AnsiKey {
    /// Maps the parameter bytes and final byte of a CSI sequence to a key.
    ///
    /// `params` excludes the leading `[`. Returns `None` for sequences that are
    /// well formed but carry no editing meaning, such as a cursor position report.
    pub fn from_sequence(params: &[u8], final_byte: u8) -> Option<AnsiKey> {
        match (params, final_byte) {
            ([], b'A') => Some(AnsiKey::CursorUp),
            ([], b'B') => Some(AnsiKey::CursorDown),
            ([], b'C') => Some(AnsiKey::CursorForward),
            ([], b'D') => Some(AnsiKey::CursorBack),
            ([], b'H') | ([b'1'], b'~') => Some(AnsiKey::Home),
            ([], b'F') | ([b'4'], b'~') => Some(AnsiKey::End),
            ([b'3'], b'~') => Some(AnsiKey::Delete),
            _ => None,
        }
    }
}

impl std::fmt::Display for AnsiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnsiKey::CursorUp => write!(f, "Up"),
            AnsiKey::CursorDown => write!(f, "Down"),
            AnsiKey::CursorForward => write!(f, "Right"),
            AnsiKey::CursorBack => write!(f, "Left"),
            AnsiKey::Home => write!(f, "Home"),
            AnsiKey::End => write!(f, "End"),
            AnsiKey::Delete => write!(f, "Delete"),
        }
    }
}

/// Control sequences the line editor writes to move the client cursor.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AnsiControlSequenceIntroducer {
    /// `ESC [ n C`
    CursorForward(usize),
}

impl AnsiControlSequenceIntroducer {
    /// Appends the encoded sequence to `dst` and returns the number of bytes written.
    pub fn encode<T: BufMut>(&self, dst: &mut T) -> usize {
        let (count, final_byte) = match self {
            AnsiControlSequenceIntroducer::CursorForward(n) => (*n, b'C'),
        };
        let digits = count.to_string();
        dst.put_u8(crate::consts::ESC);
        dst.put_u8(crate::consts::CSI_OPEN);
        dst.put_slice(digits.as_bytes());
        dst.put_u8(final_byte);
        3 + digits.len()
    }
}

impl std::fmt::Display for AnsiControlSequenceIntroducer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnsiControlSequenceIntroducer::CursorForward(n) => write!(f, "\x1b[{}C", n),
        }
    }
}
