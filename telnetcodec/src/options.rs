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

use crate::consts::option;

///
/// Telnet options this server recognizes by name. Every other code is carried
/// through as [`TelnetOption::Unknown`] so that it can still be refused.
///
/// [Telnet Options](https://www.iana.org/assignments/telnet-options/telnet-options.xhtml)
///
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TelnetOption {
    /// [`option::BINARY`] Telnet Binary Transmission [RFC856](https://tools.ietf.org/html/rfc856)
    TransmitBinary,
    /// [`option::ECHO`] Telnet Echo Option [RFC857](https://tools.ietf.org/html/rfc857)
    Echo,
    /// [`option::SGA`] Suppress Go Ahead [RFC858](https://tools.ietf.org/html/rfc858)
    SuppressGoAhead,
    /// [`option::TTYPE`] Terminal Type [RFC1091](https://tools.ietf.org/html/rfc1091)
    TerminalType,
    /// [`option::NAWS`] Negotiate About Window Size [RFC1073](https://tools.ietf.org/html/rfc1073)
    NAWS,
    /// [`option::LINEMODE`] Linemode [RFC1184](https://tools.ietf.org/html/rfc1184)
    Linemode,
    /// Unknown Option
    Unknown(u8),
}

impl TelnetOption {
    /// Returns the option code sent on the wire.
    pub fn to_u8(&self) -> u8 {
        match self {
            TelnetOption::TransmitBinary => option::BINARY,
            TelnetOption::Echo => option::ECHO,
            TelnetOption::SuppressGoAhead => option::SGA,
            TelnetOption::TerminalType => option::TTYPE,
            TelnetOption::NAWS => option::NAWS,
            TelnetOption::Linemode => option::LINEMODE,
            TelnetOption::Unknown(byte) => *byte,
        }
    }

    /// Maps an option code received on the wire. Codes without a named variant
    /// become `TelnetOption::Unknown(byte)`.
    pub fn from_u8(byte: u8) -> Self {
        match byte {
            option::BINARY => TelnetOption::TransmitBinary,
            option::ECHO => TelnetOption::Echo,
            option::SGA => TelnetOption::SuppressGoAhead,
            option::TTYPE => TelnetOption::TerminalType,
            option::NAWS => TelnetOption::NAWS,
            option::LINEMODE => TelnetOption::Linemode,
            byte => TelnetOption::Unknown(byte),
        }
    }
}

impl std::fmt::Display for TelnetOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TelnetOption::TransmitBinary => write!(f, "TransmitBinary"),
            TelnetOption::Echo => write!(f, "Echo"),
            TelnetOption::SuppressGoAhead => write!(f, "SuppressGoAhead"),
            TelnetOption::TerminalType => write!(f, "TerminalType"),
            TelnetOption::NAWS => write!(f, "NAWS"),
            TelnetOption::Linemode => write!(f, "Linemode"),
            TelnetOption::Unknown(option) => write!(f, "Unknown({option})"),
        }
    }
}

impl From<u8> for TelnetOption {
    fn from(byte: u8) -> Self {
        TelnetOption::from_u8(byte)
    }
}

impl From<TelnetOption> for u8 {
    fn from(option: TelnetOption) -> Self {
        option.to_u8()
    }
}
