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

//! # Storyhost Telnet Protocol Codec
//!
//! Strips the telnet control layer (RFC 854) out of an inbound byte stream and
//! answers option negotiation with a fixed server policy, without ever waiting
//! on the peer.
//!
//! ## Overview
//!
//! - **Data**: plain bytes pass through, `IAC IAC` becomes a literal `0xFF`.
//! - **Negotiation**: `DO`, `DONT`, `WILL` and `WONT` are answered by [`reply_to`].
//! - **Subnegotiation**: `IAC SB … IAC SE` is consumed and its payload discarded.
//! - **Other commands**: `NOP`, `GA`, `AYT` and the rest are consumed silently.
//!
//! On admission the server sends [`NEGOTIATION_PREAMBLE`], which turns on
//! server side echo and go-ahead suppression and refuses client line mode.
//!
//! ## Usage Example
//!
//! ```rust
//! use storyhost_telnetcodec::{TelnetCodec, TelnetEvent, TelnetFrame, TelnetOption};
//! use tokio_util::codec::{Decoder, Encoder};
//! use bytes::BytesMut;
//!
//! let mut codec = TelnetCodec::new();
//! let mut input = BytesMut::from(&b"hi\xFF\xFD\x01"[..]);
//! let mut output = BytesMut::new();
//! while let Some(event) = codec.decode(&mut input).unwrap() {
//!     match event {
//!         TelnetEvent::Data(byte) => println!("Received: {}", byte as char),
//!         TelnetEvent::Negotiate { reply: Some(reply), .. } => {
//!             codec.encode(reply, &mut output).unwrap();
//!         }
//!         TelnetEvent::Negotiate { .. } => {}
//!     }
//! }
//! assert_eq!(&output[..], &[0xFF, 0xFB, 0x01]);
//! ```
//!
//! ## Related RFCs
//!
//! - RFC 854: Telnet Protocol Specification
//! - RFC 855: Telnet Option Specifications
//! - RFC 857: Telnet Echo Option
//! - RFC 858: Telnet Suppress Go Ahead Option
//! - RFC 1184: Telnet Linemode Option

#![warn(
    clippy::cargo,
    missing_docs,
    clippy::pedantic,
    future_incompatible,
    rust_2018_idioms
)]
#![allow(
    clippy::option_if_let_else,
    clippy::module_name_repetitions,
    clippy::missing_errors_doc
)]

mod codec;
pub mod consts;
mod event;
mod frame;
mod options;
mod result;

pub use self::codec::{NEGOTIATION_PREAMBLE, TelnetCodec, TelnetCommandState, reply_to};
pub use self::event::TelnetEvent;
pub use self::frame::TelnetFrame;
pub use self::options::TelnetOption;
pub use self::result::{CodecError, CodecResult};
