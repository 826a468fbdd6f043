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

/// Escape, first byte of every ANSI sequence.
pub const ESC: u8 = 0x1B;

/// Second byte of a Control Sequence Introducer (`ESC [`).
pub const CSI_OPEN: u8 = b'[';

/// Bytes held after `ESC` before an unterminated sequence is abandoned.
///
/// Cursor keys never need more than four, the cap only exists so garbage after
/// an `ESC [` cannot hold the parser open forever.
pub const MAX_SEQUENCE_LENGTH: usize = 10;

/// Range of bytes that terminate a CSI sequence.
pub const FINAL_BYTES: std::ops::RangeInclusive<u8> = 0x40..=0x7E;
