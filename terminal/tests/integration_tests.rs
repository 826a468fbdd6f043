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

//! Line editing scenarios checked byte for byte against the echo a client sees.

use storyhost_terminal::{AnsiCodec, LineCodec, TelnetCodec};
use tokio_util::bytes::BytesMut;
use tokio_util::codec::Decoder;

fn create_codec() -> LineCodec<AnsiCodec<TelnetCodec>> {
    LineCodec::telnet()
}

fn feed(codec: &mut LineCodec<AnsiCodec<TelnetCodec>>, bytes: &[u8]) -> Vec<String> {
    let mut src = BytesMut::from(bytes);
    let mut lines = Vec::new();
    while let Some(line) = codec.decode(&mut src).unwrap() {
        lines.push(line);
    }
    lines
}

fn echo_of(codec: &mut LineCodec<AnsiCodec<TelnetCodec>>, bytes: &[u8]) -> Vec<u8> {
    codec.take_output();
    feed(codec, bytes);
    codec.take_output().to_vec()
}

#[test]
fn typing_echoes_each_character() {
    let mut codec = create_codec();
    assert_eq!(echo_of(&mut codec, "hi中".as_bytes()), "hi中".as_bytes());
}

#[test]
fn backspace_at_end_of_line() {
    let mut codec = create_codec();
    feed(&mut codec, "a中".as_bytes());
    assert_eq!(echo_of(&mut codec, b"\x7f"), b"\x08\x08  \x08\x08");
    assert_eq!(echo_of(&mut codec, b"\x08"), b"\x08 \x08");
    assert!(echo_of(&mut codec, b"\x08").is_empty());
    assert_eq!(feed(&mut codec, b"\r"), vec![""]);
}

#[test]
fn insert_in_middle_redraws_rest_of_line() {
    let mut codec = create_codec();
    feed(&mut codec, b"acd");
    assert_eq!(echo_of(&mut codec, b"\x1b[D\x1b[D"), b"\x08\x08");
    assert_eq!(echo_of(&mut codec, b"b"), b"bcd  \x08\x08\x08\x08");
    assert_eq!(feed(&mut codec, b"\r\n"), vec!["abcd"]);
}

#[test]
fn backspace_in_middle_redraws_rest_of_line() {
    let mut codec = create_codec();
    feed(&mut codec, "x中yz".as_bytes());
    feed(&mut codec, b"\x1b[D\x1b[D");
    assert_eq!(
        echo_of(&mut codec, b"\x08"),
        b"\x08\x08yz  \x08\x08\x08\x08"
    );
    assert_eq!(feed(&mut codec, b"\r"), vec!["xyz"]);
}

#[test]
fn forward_delete_in_middle() {
    let mut codec = create_codec();
    feed(&mut codec, b"abc");
    feed(&mut codec, b"\x1b[H");
    assert_eq!(echo_of(&mut codec, b"\x1b[3~"), b"bc \x08\x08\x08");
    assert_eq!(feed(&mut codec, b"\r"), vec!["bc"]);
}

#[test]
fn home_and_end_move_by_total_width() {
    let mut codec = create_codec();
    feed(&mut codec, "a中b".as_bytes());
    assert_eq!(echo_of(&mut codec, b"\x1b[1~"), b"\x08\x08\x08\x08");
    assert_eq!(echo_of(&mut codec, b"\x1b[4~"), b"\x1b[4C");
    assert_eq!(echo_of(&mut codec, b"\x1b[A"), b"\x08\x08\x08\x08");
    assert_eq!(echo_of(&mut codec, b"\x1b[C"), b"\x1b[1C");
    assert_eq!(echo_of(&mut codec, b"\x1b[C"), b"\x1b[2C");
    assert_eq!(echo_of(&mut codec, b"\x1b[B"), b"\x1b[1C");
    assert!(echo_of(&mut codec, b"\x1b[F").is_empty());
}

#[test]
fn arrows_at_line_edges_echo_nothing() {
    let mut codec = create_codec();
    assert!(echo_of(&mut codec, b"\x1b[D\x1b[C\x1b[H\x1b[F").is_empty());
}

#[test]
fn combining_mark_echoes_without_moving() {
    let mut codec = create_codec();
    feed(&mut codec, b"e");
    assert_eq!(echo_of(&mut codec, "\u{0301}".as_bytes()), "\u{0301}".as_bytes());
    assert_eq!(codec.buffer().len(), 1);
    assert_eq!(echo_of(&mut codec, b"\x7f"), b"\x08 \x08");
}

#[test]
fn line_end_echo_and_leftover_bytes() {
    let mut codec = create_codec();
    let mut src = BytesMut::from(&b"one\r\ntwo"[..]);
    assert_eq!(codec.decode(&mut src).unwrap().as_deref(), Some("one"));
    assert_eq!(codec.decode(&mut src).unwrap(), None);
    assert_eq!(codec.take_output().as_ref(), b"one\r\ntwo");
    assert_eq!(codec.buffer().to_string(), "two");
}

#[test]
fn invalid_utf8_becomes_replacement_character() {
    let mut codec = create_codec();
    assert_eq!(feed(&mut codec, b"a\xc3b\r"), vec!["a\u{FFFD}b"]);
}

#[test]
fn telnet_noise_never_reaches_the_line() {
    let mut codec = create_codec().with_echo(false);
    let lines = feed(
        &mut codec,
        b"\xff\xfa\x18\x00xterm\xff\xf0go\xff\xf1\xff\xfb\x1f north\r\n",
    );
    assert_eq!(lines, vec!["go north"]);
    assert_eq!(codec.take_output().as_ref(), b"\xff\xfe\x1f");
}
