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

use crate::TelnetOption;

///
/// Frames the server writes to the wire. Only single data bytes and the four
/// negotiation verbs are ever produced; every other command is consumed by the
/// decoder without a reply.
///
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TelnetFrame {
    /// Telnet Data Byte, `IAC` is escaped on the wire.
    Data(u8),
    /// Ask the peer to perform an option.
    Do(TelnetOption),
    /// Ask the peer to stop performing an option.
    Dont(TelnetOption),
    /// Offer to perform an option.
    Will(TelnetOption),
    /// Refuse to perform an option.
    Wont(TelnetOption),
}

impl TelnetFrame {
    /// Number of bytes this frame occupies once encoded.
    pub fn encoded_len(&self) -> usize {
        match self {
            TelnetFrame::Data(crate::consts::IAC) => 2,
            TelnetFrame::Data(_) => 1,
            _ => 3,
        }
    }

    /// Option carried by a negotiation frame.
    pub fn option(&self) -> Option<TelnetOption> {
        match self {
            TelnetFrame::Data(_) => None,
            TelnetFrame::Do(option)
            | TelnetFrame::Dont(option)
            | TelnetFrame::Will(option)
            | TelnetFrame::Wont(option) => Some(*option),
        }
    }
}

impl std::fmt::Display for TelnetFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TelnetFrame::Data(byte) => write!(f, "Data(0x{byte:02X})"),
            TelnetFrame::Do(option) => write!(f, "DO {option}"),
            TelnetFrame::Dont(option) => write!(f, "DONT {option}"),
            TelnetFrame::Will(option) => write!(f, "WILL {option}"),
            TelnetFrame::Wont(option) => write!(f, "WONT {option}"),
        }
    }
}
