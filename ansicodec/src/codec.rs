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

use crate::{AnsiError, AnsiKey, AnsiParser, AnsiResult, AnsiStep};
use storyhost_telnetcodec::{TelnetEvent, TelnetFrame};
use tokio_util::bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};
use tracing::instrument;

/// Input decoded from a telnet stream with cursor keys lifted out.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AnsiSequence {
    /// A data byte that is not part of an escape sequence.
    Data(u8),
    /// A completed cursor or editing key.
    Key(AnsiKey),
    /// A telnet negotiation request, passed through from the inner codec.
    Negotiate {
        /// Verb and option as received.
        request: TelnetFrame,
        /// Reply the server owes, if any.
        reply: Option<TelnetFrame>,
    },
}

/// ANSI codec layered over a telnet codec.
///
/// Data bytes from the inner decoder run through an [`AnsiParser`]; bytes that
/// belong to an escape sequence are swallowed until it completes.
#[derive(Debug, Default)]
pub struct AnsiCodec<I> {
    parser: AnsiParser,
    inner: I,
}

impl<I> AnsiCodec<I> {
    /// Creates a new ANSI codec wrapping `codec`.
    pub fn new(codec: I) -> Self {
        Self {
            inner: codec,
            parser: AnsiParser::new(),
        }
    }

    /// Get a reference to the inner codec
    pub fn inner(&self) -> &I {
        &self.inner
    }

    /// Get a mutable reference to the inner codec
    pub fn inner_mut(&mut self) -> &mut I {
        &mut self.inner
    }

    /// Get a reference to the escape parser
    pub fn parser(&self) -> &AnsiParser {
        &self.parser
    }
}

impl<I> Decoder for AnsiCodec<I>
where
    I: Decoder<Item = TelnetEvent>,
    AnsiError: From<I::Error>,
{
    type Item = AnsiSequence;
    type Error = AnsiError;

    #[instrument(skip_all)]
    fn decode(&mut self, src: &mut BytesMut) -> AnsiResult<Option<Self::Item>> {
        while let Some(event) = self.inner.decode(src)? {
            match event {
                TelnetEvent::Data(byte) => match self.parser.next(byte) {
                    AnsiStep::Passthrough(byte) => return Ok(Some(AnsiSequence::Data(byte))),
                    AnsiStep::Key(key) => return Ok(Some(AnsiSequence::Key(key))),
                    AnsiStep::Pending | AnsiStep::Discarded => {}
                },
                TelnetEvent::Negotiate { request, reply } => {
                    return Ok(Some(AnsiSequence::Negotiate { request, reply }));
                }
            }
        }
        Ok(None)
    }
}

impl<I> Encoder<TelnetFrame> for AnsiCodec<I>
where
    I: Encoder<TelnetFrame>,
    AnsiError: From<I::Error>,
{
    type Error = AnsiError;

    fn encode(&mut self, item: TelnetFrame, dst: &mut BytesMut) -> Result<(), Self::Error> {
        Ok(self.inner.encode(item, dst)?)
    }
}
