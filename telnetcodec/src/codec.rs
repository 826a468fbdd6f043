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

use super::{CodecError, TelnetEvent, TelnetFrame, TelnetOption, consts};
use bytes::{Buf, BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};
use tracing::trace;

/// Frames sent, in order, as soon as a session is admitted. The server takes
/// over echo and go-ahead suppression and turns client line buffering off.
pub const NEGOTIATION_PREAMBLE: [TelnetFrame; 5] = [
    TelnetFrame::Will(TelnetOption::Echo),
    TelnetFrame::Will(TelnetOption::SuppressGoAhead),
    TelnetFrame::Wont(TelnetOption::Linemode),
    TelnetFrame::Do(TelnetOption::SuppressGoAhead),
    TelnetFrame::Dont(TelnetOption::Echo),
];

/// Answers a negotiation request from the peer.
///
/// | Peer sends            | Reply        |
/// |-----------------------|--------------|
/// | `DO ECHO` / `DO SGA`  | `WILL` same  |
/// | `DO` other            | `WONT` same  |
/// | `DONT` any            | `WONT` same  |
/// | `WILL SGA`            | `DO` same    |
/// | `WILL` other          | `DONT` same  |
/// | `WONT` any            | none         |
pub fn reply_to(request: TelnetFrame) -> Option<TelnetFrame> {
    match request {
        TelnetFrame::Do(option @ (TelnetOption::Echo | TelnetOption::SuppressGoAhead)) => {
            Some(TelnetFrame::Will(option))
        }
        TelnetFrame::Do(option) => Some(TelnetFrame::Wont(option)),
        TelnetFrame::Dont(option) => Some(TelnetFrame::Wont(option)),
        TelnetFrame::Will(option @ TelnetOption::SuppressGoAhead) => Some(TelnetFrame::Do(option)),
        TelnetFrame::Will(option) => Some(TelnetFrame::Dont(option)),
        TelnetFrame::Wont(_) | TelnetFrame::Data(_) => None,
    }
}

/// Decoder position inside the telnet control layer.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum TelnetCommandState {
    /// Plain data bytes.
    #[default]
    Data,
    /// Saw `IAC`, waiting for the command byte.
    Command,
    /// Saw `IAC <verb>`, waiting for the option byte.
    Option(u8),
    /// Inside `IAC SB`, discarding payload.
    SubNegotiation,
    /// Saw `IAC` inside a sub-negotiation, waiting for `SE`.
    SubNegotiationEnd,
}

/// A codec that strips the telnet control layer from an inbound byte stream and
/// answers option negotiation with a fixed policy.
///
/// Decoding yields one [`TelnetEvent`] at a time. Sub-negotiation payloads and
/// single byte commands (`NOP`, `GA`, `AYT` and friends) are consumed silently.
#[derive(Debug, Default)]
pub struct TelnetCodec {
    state: TelnetCommandState,
}

impl TelnetCodec {
    /// Creates a codec in data state.
    ///
    /// # Example
    /// ```
    /// use storyhost_telnetcodec::{TelnetCodec, TelnetCommandState};
    ///
    /// let codec = TelnetCodec::new();
    /// assert_eq!(codec.state(), TelnetCommandState::Data);
    /// ```
    pub fn new() -> TelnetCodec {
        TelnetCodec::default()
    }

    /// Current control layer state.
    pub fn state(&self) -> TelnetCommandState {
        self.state
    }

    /// Writes [`NEGOTIATION_PREAMBLE`] into `dst`.
    pub fn encode_preamble(&mut self, dst: &mut BytesMut) -> Result<(), CodecError> {
        for frame in NEGOTIATION_PREAMBLE {
            self.encode(frame, dst)?;
        }
        Ok(())
    }

    /// Advances the state machine by one byte and returns the event it completes, if any.
    pub fn next_event(&mut self, byte: u8) -> Option<TelnetEvent> {
        match (self.state, byte) {
            (TelnetCommandState::Data, consts::IAC) => {
                self.state = TelnetCommandState::Command;
                None
            }
            (TelnetCommandState::Data, _) => Some(TelnetEvent::Data(byte)),
            (TelnetCommandState::Command, consts::IAC) => {
                self.state = TelnetCommandState::Data;
                Some(TelnetEvent::Data(consts::IAC))
            }
            (TelnetCommandState::Command, verb @ (consts::DO | consts::DONT | consts::WILL | consts::WONT)) => {
                self.state = TelnetCommandState::Option(verb);
                None
            }
            (TelnetCommandState::Command, consts::SB) => {
                self.state = TelnetCommandState::SubNegotiation;
                None
            }
            (TelnetCommandState::Command, command) => {
                trace!(command = format_args!("0x{command:02X}"), "ignoring telnet command");
                self.state = TelnetCommandState::Data;
                None
            }
            (TelnetCommandState::Option(verb), code) => {
                self.state = TelnetCommandState::Data;
                let option = TelnetOption::from_u8(code);
                let request = match verb {
                    consts::DO => TelnetFrame::Do(option),
                    consts::DONT => TelnetFrame::Dont(option),
                    consts::WILL => TelnetFrame::Will(option),
                    _ => TelnetFrame::Wont(option),
                };
                let reply = reply_to(request);
                trace!(%request, ?reply, "telnet negotiation");
                Some(TelnetEvent::Negotiate { request, reply })
            }
            (TelnetCommandState::SubNegotiation, consts::IAC) => {
                self.state = TelnetCommandState::SubNegotiationEnd;
                None
            }
            (TelnetCommandState::SubNegotiation, _) => None,
            (TelnetCommandState::SubNegotiationEnd, consts::SE) => {
                self.state = TelnetCommandState::Data;
                None
            }
            (TelnetCommandState::SubNegotiationEnd, _) => {
                self.state = TelnetCommandState::SubNegotiation;
                None
            }
        }
    }
}

impl Decoder for TelnetCodec {
    type Item = TelnetEvent;
    type Error = CodecError;

    /// Consumes bytes from `src` until one event is complete. Bytes belonging to
    /// an unfinished control sequence are consumed and remembered in the codec
    /// state, so `src` never has to be rewound.
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<TelnetEvent>, Self::Error> {
        while src.has_remaining() {
            let byte = src.get_u8();
            if let Some(event) = self.next_event(byte) {
                return Ok(Some(event));
            }
        }
        Ok(None)
    }
}

impl Encoder<TelnetFrame> for TelnetCodec {
    type Error = CodecError;

    /// Encodes a frame, doubling a literal `IAC` data byte.
    fn encode(&mut self, item: TelnetFrame, dst: &mut BytesMut) -> Result<(), Self::Error> {
        dst.reserve(item.encoded_len());
        match item {
            TelnetFrame::Data(byte) => {
                if byte == consts::IAC {
                    dst.put_u8(consts::IAC);
                }
                dst.put_u8(byte);
            }
            TelnetFrame::Do(option) => dst.put_slice(&[consts::IAC, consts::DO, option.to_u8()]),
            TelnetFrame::Dont(option) => {
                dst.put_slice(&[consts::IAC, consts::DONT, option.to_u8()])
            }
            TelnetFrame::Will(option) => {
                dst.put_slice(&[consts::IAC, consts::WILL, option.to_u8()])
            }
            TelnetFrame::Wont(option) => {
                dst.put_slice(&[consts::IAC, consts::WONT, option.to_u8()])
            }
        }
        Ok(())
    }
}
