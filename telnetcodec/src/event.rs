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

use crate::TelnetFrame;

///
/// `TelnetEvent` is what the decoder hands upward after stripping the control
/// layer out of the byte stream.
///
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TelnetEvent {
    /// Telnet Data Byte, including a literal `0xFF` sent as `IAC IAC`.
    Data(u8),
    /// The peer sent a negotiation verb. `reply` is what the server answers
    /// with and must be written back without waiting for the next line.
    Negotiate {
        /// Verb and option exactly as received.
        request: TelnetFrame,
        /// Answer chosen by [`crate::reply_to`], `None` when no answer is due.
        reply: Option<TelnetFrame>,
    },
}
