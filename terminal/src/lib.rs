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

//! # Storyhost Terminal
//!
//! Server side line editing for telnet clients. [`LineCodec`] sits on top of
//! [`AnsiCodec`] and [`TelnetCodec`], feeds decoded code points into a
//! [`GraphemeBuffer`] and produces the echo a client needs to show insertions,
//! deletions and cursor moves anywhere in the line, including double width and
//! multi code point clusters.

mod codec;
pub mod echo;
mod grapheme;
mod result;
mod utf8;
pub mod width;

pub use self::codec::LineCodec;
pub use self::grapheme::{GraphemeBuffer, GraphemeCluster};
pub use self::result::{TerminalError, TerminalResult};
pub use self::utf8::Utf8Decoder;
pub use storyhost_ansicodec::{AnsiCodec, AnsiKey, TelnetCodec, TelnetFrame, TelnetOption};
