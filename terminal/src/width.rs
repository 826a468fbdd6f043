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

//! Column width and cluster joining rules for single code points.

use unicode_normalization::char::is_combining_mark;
use unicode_width::UnicodeWidthChar;

/// Zero width joiner.
pub const ZERO_WIDTH_JOINER: char = '\u{200D}';

/// General category `Cf` ranges.
const FORMAT_RANGES: &[(u32, u32)] = &[
    (0x00AD, 0x00AD),
    (0x0600, 0x0605),
    (0x061C, 0x061C),
    (0x06DD, 0x06DD),
    (0x070F, 0x070F),
    (0x0890, 0x0891),
    (0x08E2, 0x08E2),
    (0x180E, 0x180E),
    (0x200B, 0x200F),
    (0x202A, 0x202E),
    (0x2060, 0x2064),
    (0x2066, 0x206F),
    (0xFEFF, 0xFEFF),
    (0xFFF9, 0xFFFB),
    (0x110BD, 0x110BD),
    (0x110CD, 0x110CD),
    (0x13430, 0x1343F),
    (0x1BCA0, 0x1BCA3),
    (0x1D173, 0x1D17A),
    (0xE0001, 0xE0001),
    (0xE0020, 0xE007F),
];

fn in_ranges(ch: char, ranges: &[(u32, u32)]) -> bool {
    let value = u32::from(ch);
    ranges
        .iter()
        .any(|(start, end)| (*start..=*end).contains(&value))
}

/// Returns `true` for format characters (general category `Cf`).
pub fn is_format(ch: char) -> bool {
    in_ranges(ch, FORMAT_RANGES)
}

/// Returns `true` for variation selectors, both the basic block and the supplement.
pub fn is_variation_selector(ch: char) -> bool {
    matches!(ch, '\u{FE00}'..='\u{FE0F}' | '\u{E0100}'..='\u{E01EF}')
}

/// Returns `true` for the Fitzpatrick emoji skin tone modifiers.
pub fn is_skin_tone_modifier(ch: char) -> bool {
    matches!(ch, '\u{1F3FB}'..='\u{1F3FF}')
}

/// Returns `true` when `ch` attaches to the preceding cluster instead of
/// starting a new one: combining and enclosing marks, format characters
/// (the joiner included), variation selectors and skin tone modifiers.
pub fn is_joining(ch: char) -> bool {
    is_combining_mark(ch) || is_format(ch) || is_variation_selector(ch) || is_skin_tone_modifier(ch)
}

/// Terminal columns occupied by `ch` on its own.
///
/// Marks, format characters, variation selectors, skin tone modifiers and
/// control characters are zero width. Everything else takes its East Asian
/// width, so CJK ideographs and most emoji are 2.
pub fn char_width(ch: char) -> usize {
    if is_combining_mark(ch)
        || is_format(ch)
        || is_variation_selector(ch)
        || is_skin_tone_modifier(ch)
        || ch.is_control()
    {
        return 0;
    }
    ch.width().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths() {
        assert_eq!(char_width('a'), 1);
        assert_eq!(char_width('中'), 2);
        assert_eq!(char_width('가'), 2);
        assert_eq!(char_width('\u{1F44D}'), 2);
        assert_eq!(char_width('\u{0301}'), 0);
        assert_eq!(char_width('\u{1F3FD}'), 0);
        assert_eq!(char_width(ZERO_WIDTH_JOINER), 0);
        assert_eq!(char_width('\u{FE0F}'), 0);
        assert_eq!(char_width('\u{7}'), 0);
    }

    #[test]
    fn joining() {
        assert!(is_joining('\u{0301}'));
        assert!(is_joining('\u{20DD}'));
        assert!(is_joining(ZERO_WIDTH_JOINER));
        assert!(is_joining('\u{FE0F}'));
        assert!(is_joining('\u{E0100}'));
        assert!(is_joining('\u{1F3FB}'));
        assert!(!is_joining('a'));
        assert!(!is_joining('中'));
        assert!(!is_joining('\u{1F44D}'));
    }
}
