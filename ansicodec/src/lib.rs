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

//! # Storyhost ANSI Codec
//!
//! Lifts the cursor and editing keys a terminal sends as CSI sequences out of
//! a telnet data stream, and encodes the cursor motions the line editor echoes
//! back.

pub mod ansi;
mod codec;
mod consts;
mod parser;
mod result;

pub use self::ansi::{AnsiControlSequenceIntroducer, AnsiKey};
pub use self::codec::{AnsiCodec, AnsiSequence};
pub use self::consts::{ESC, MAX_SEQUENCE_LENGTH};
pub use self::parser::{AnsiEscapeState, AnsiParser, AnsiStep};
pub use self::result::{AnsiError, AnsiResult};
pub use storyhost_telnetcodec::{
    CodecError as TelnetCodecError, CodecResult as TelnetCodecResult, TelnetCodec, TelnetEvent,
    TelnetFrame, TelnetOption,
};
