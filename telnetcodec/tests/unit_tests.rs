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

//! Unit tests for telnetcodec components

use bytes::BytesMut;
use storyhost_telnetcodec::{
    NEGOTIATION_PREAMBLE, TelnetCodec, TelnetCommandState, TelnetEvent, TelnetFrame,
    TelnetOption, consts,
};
use tokio_util::codec::{Decoder, Encoder};

// ============================================================================
// Helper Functions
// ============================================================================

fn encode_frame(codec: &mut TelnetCodec, frame: TelnetFrame) -> BytesMut {
    let mut buffer = BytesMut::new();
    codec.encode(frame, &mut buffer).unwrap();
    buffer
}

fn decode_all(codec: &mut TelnetCodec, buffer: &mut BytesMut) -> Vec<TelnetEvent> {
    let mut events = Vec::new();
    while let Some(event) = codec.decode(buffer).unwrap() {
        events.push(event);
    }
    events
}

fn data_bytes(events: &[TelnetEvent]) -> Vec<u8> {
    events
        .iter()
        .filter_map(|event| match event {
            TelnetEvent::Data(byte) => Some(*byte),
            TelnetEvent::Negotiate { .. } => None,
        })
        .collect()
}

// ============================================================================
// TelnetOption Tests
// ============================================================================

#[test]
fn telnet_option_from_u8() {
    assert_eq!(TelnetOption::from(0), TelnetOption::TransmitBinary);
    assert_eq!(TelnetOption::from(1), TelnetOption::Echo);
    assert_eq!(TelnetOption::from(3), TelnetOption::SuppressGoAhead);
    assert_eq!(TelnetOption::from(34), TelnetOption::Linemode);
    assert_eq!(TelnetOption::from(255), TelnetOption::Unknown(255));
}

#[test]
fn telnet_option_to_u8() {
    assert_eq!(u8::from(TelnetOption::TransmitBinary), 0);
    assert_eq!(u8::from(TelnetOption::Echo), 1);
    assert_eq!(u8::from(TelnetOption::SuppressGoAhead), 3);
    assert_eq!(u8::from(TelnetOption::Unknown(255)), 255);
}

#[test]
fn telnet_option_display() {
    assert_eq!(format!("{}", TelnetOption::Echo), "Echo");
    assert_eq!(format!("{}", TelnetOption::Unknown(99)), "Unknown(99)");
    assert_eq!(
        format!("{}", TelnetFrame::Wont(TelnetOption::Linemode)),
        "WONT Linemode"
    );
}

// ============================================================================
// Encoding Tests
// ============================================================================

#[test]
fn encode_negotiation_frames() {
    let mut codec = TelnetCodec::new();
    assert_eq!(
        &encode_frame(&mut codec, TelnetFrame::Will(TelnetOption::Echo))[..],
        &[consts::IAC, consts::WILL, consts::option::ECHO]
    );
    assert_eq!(
        &encode_frame(&mut codec, TelnetFrame::Dont(TelnetOption::Unknown(0x99)))[..],
        &[consts::IAC, consts::DONT, 0x99]
    );
}

#[test]
fn preamble_is_one_batch_in_order() {
    let mut codec = TelnetCodec::new();
    let mut buffer = BytesMut::new();
    codec.encode_preamble(&mut buffer).unwrap();
    assert_eq!(buffer.len(), NEGOTIATION_PREAMBLE.len() * 3);
    assert_eq!(
        &buffer[..],
        &[
            0xFF, 0xFB, 0x01, 0xFF, 0xFB, 0x03, 0xFF, 0xFC, 0x22, 0xFF, 0xFD, 0x03, 0xFF, 0xFE, 0x01
        ]
    );
}

// ============================================================================
// Decoding Tests
// ============================================================================

#[test]
fn unknown_option_is_refused_and_not_data() {
    let mut codec = TelnetCodec::new();
    let mut buffer = BytesMut::from(&[b'a', consts::IAC, consts::DO, 0x99, b'b'][..]);
    let events = decode_all(&mut codec, &mut buffer);
    assert_eq!(data_bytes(&events), b"ab");
    assert!(events.contains(&TelnetEvent::Negotiate {
        request: TelnetFrame::Do(TelnetOption::Unknown(0x99)),
        reply: Some(TelnetFrame::Wont(TelnetOption::Unknown(0x99))),
    }));

    let reply = match events[1] {
        TelnetEvent::Negotiate {
            reply: Some(reply), ..
        } => reply,
        other => panic!("expected negotiation, got {other:?}"),
    };
    assert_eq!(&encode_frame(&mut codec, reply)[..], &[0xFF, 0xFC, 0x99]);
}

#[test]
fn byte_at_a_time_matches_bulk_decode() {
    let input = [
        b'h',
        consts::IAC,
        consts::SB,
        consts::option::TTYPE,
        0x00,
        b'x',
        consts::IAC,
        consts::SE,
        consts::IAC,
        consts::WILL,
        consts::option::NAWS,
        consts::IAC,
        consts::IAC,
        b'i',
    ];

    let mut bulk_codec = TelnetCodec::new();
    let bulk = decode_all(&mut bulk_codec, &mut BytesMut::from(&input[..]));

    let mut codec = TelnetCodec::new();
    let mut split = Vec::new();
    for byte in input {
        split.extend(decode_all(&mut codec, &mut BytesMut::from(&[byte][..])));
    }

    assert_eq!(bulk, split);
    assert_eq!(data_bytes(&split), vec![b'h', 0xFF, b'i']);
    assert_eq!(codec.state(), TelnetCommandState::Data);
}

#[test]
fn unterminated_sub_negotiation_holds_state() {
    let mut codec = TelnetCodec::new();
    let mut buffer = BytesMut::from(&[consts::IAC, consts::SB, 0x18, b'a', b'b'][..]);
    assert!(decode_all(&mut codec, &mut buffer).is_empty());
    assert_eq!(codec.state(), TelnetCommandState::SubNegotiation);

    let mut buffer = BytesMut::from(&[consts::IAC, b'q', b'r', consts::IAC, consts::SE, b'!'][..]);
    let events = decode_all(&mut codec, &mut buffer);
    assert_eq!(events, vec![TelnetEvent::Data(b'!')]);
}

#[test]
fn wont_gets_no_reply() {
    let mut codec = TelnetCodec::new();
    let mut buffer = BytesMut::from(&[consts::IAC, consts::WONT, consts::option::ECHO][..]);
    assert_eq!(
        decode_all(&mut codec, &mut buffer),
        vec![TelnetEvent::Negotiate {
            request: TelnetFrame::Wont(TelnetOption::Echo),
            reply: None,
        }]
    );
}
