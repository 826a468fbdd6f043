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

//! Byte sequences that keep the client's screen in step with the line buffer.
//!
//! Telnet clients have no "move left by N" primitive that works everywhere, so
//! leftward motion is written as backspaces and rightward motion as `ESC [ n C`.

use storyhost_ansicodec::AnsiControlSequenceIntroducer;
use tokio_util::bytes::{BufMut, BytesMut};

const BACKSPACE: u8 = 0x08;

fn repeat(dst: &mut BytesMut, byte: u8, count: usize) {
    dst.put_bytes(byte, count);
}

/// Moves the client cursor `width` columns left.
pub fn cursor_back(dst: &mut BytesMut, width: usize) {
    repeat(dst, BACKSPACE, width);
}

/// Moves the client cursor `width` columns right.
pub fn cursor_forward(dst: &mut BytesMut, width: usize) {
    if width > 0 {
        AnsiControlSequenceIntroducer::CursorForward(width).encode(dst);
    }
}

/// Echo for a code point inserted at the cursor.
///
/// When text follows the cursor it is rewritten after the new character, two
/// trailing cells are blanked and the cursor is walked back to the edit point.
pub fn insert(dst: &mut BytesMut, ch: char, text_after: &str, width_after: usize) {
    let mut encoded = [0; 4];
    dst.put_slice(ch.encode_utf8(&mut encoded).as_bytes());
    if !text_after.is_empty() {
        dst.put_slice(text_after.as_bytes());
        repeat(dst, b' ', 2);
        cursor_back(dst, width_after + 2);
    }
}

/// Echo for a cluster of `width` columns removed before the cursor.
pub fn backspace(dst: &mut BytesMut, width: usize, text_after: &str, width_after: usize) {
    cursor_back(dst, width);
    if text_after.is_empty() {
        repeat(dst, b' ', width);
        cursor_back(dst, width);
    } else {
        dst.put_slice(text_after.as_bytes());
        repeat(dst, b' ', width);
        cursor_back(dst, width_after + width);
    }
}

/// Echo for a cluster of `width` columns removed at the cursor. `text_after`
/// is what follows the cursor once the cluster is gone.
pub fn delete(dst: &mut BytesMut, width: usize, text_after: &str, width_after: usize) {
    dst.put_slice(text_after.as_bytes());
    repeat(dst, b' ', width);
    cursor_back(dst, width_after + width);
}

/// Echo for a submitted line.
pub fn line_end(dst: &mut BytesMut) {
    dst.put_slice(b"\r\n");
}

/// Copies `text` into `dst`, turning every bare `\n` into `\r\n`.
pub fn normalize_newlines(dst: &mut BytesMut, text: &str) {
    dst.reserve(text.len());
    let mut previous = None;
    for ch in text.chars() {
        if ch == '\n' && previous != Some('\r') {
            dst.put_u8(b'\r');
        }
        let mut encoded = [0; 4];
        dst.put_slice(ch.encode_utf8(&mut encoded).as_bytes());
        previous = Some(ch);
    }
}
