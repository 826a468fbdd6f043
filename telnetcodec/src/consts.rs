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

//! Telnet byte constants (RFC 854, RFC 855).

/// Carriage Return
pub const CR: u8 = 0x0D;
/// Line Feed
pub const LF: u8 = 0x0A;
/// Null
pub const NUL: u8 = 0x00;

/// End of Subnegotiation
pub const SE: u8 = 0xF0;
/// No Operation
pub const NOP: u8 = 0xF1;
/// Data Mark
pub const DM: u8 = 0xF2;
/// Break
pub const BRK: u8 = 0xF3;
/// Interrupt Process
pub const IP: u8 = 0xF4;
/// Abort Output
pub const AO: u8 = 0xF5;
/// Are You There
pub const AYT: u8 = 0xF6;
/// Erase Character
pub const EC: u8 = 0xF7;
/// Erase Line
pub const EL: u8 = 0xF8;
/// Go Ahead
pub const GA: u8 = 0xF9;
/// Begin Subnegotiation
pub const SB: u8 = 0xFA;
/// Sender wants to enable an option locally
pub const WILL: u8 = 0xFB;
/// Sender refuses to enable an option locally
pub const WONT: u8 = 0xFC;
/// Sender asks the receiver to enable an option
pub const DO: u8 = 0xFD;
/// Sender asks the receiver not to enable an option
pub const DONT: u8 = 0xFE;
/// Interpret As Command
pub const IAC: u8 = 0xFF;

/// Option codes referenced by the negotiation policy.
pub mod option {
    /// Binary Transmission (RFC 856)
    pub const BINARY: u8 = 0x00;
    /// Echo (RFC 857)
    pub const ECHO: u8 = 0x01;
    /// Suppress Go Ahead (RFC 858)
    pub const SGA: u8 = 0x03;
    /// Terminal Type (RFC 1091)
    pub const TTYPE: u8 = 0x18;
    /// Negotiate About Window Size (RFC 1073)
    pub const NAWS: u8 = 0x1F;
    /// Linemode (RFC 1184)
    pub const LINEMODE: u8 = 0x22;
}
