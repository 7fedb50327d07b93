/*
 * Copyright © 2020-present Peter M. Stahl pemistahl@gmail.com
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 * http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either expressed or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

//! Character folding and Vietnamese diacritic reassembly (spec.md §4.1).

use crate::unicode_block::{classify, BlockAction};

/// The sentinel marker emitted at text boundaries, after whitespace, and for
/// any character that folds away (punctuation, digits, control characters).
pub const SPACE_MARKER: char = ' ';

/// Vietnamese base letters that combine with one of the five tone-mark
/// diacritics below into a single precomposed character. Order defines the
/// column index shared with each `NORMALIZED_*` table. Limited to the plain
/// lowercase vowels; letters that already carry a circumflex/horn/breve
/// (â, ê, ô, ơ, ư, ă) would need a second composition step and are left for
/// the Unicode-normal-form pass a caller runs before handing text to this
/// crate.
const BASES: &str = "aeiouy";

// Combining grave (0300), acute (0301), tilde (0303), hook above (0309),
// dot below (0323).
const DMARKS: [char; 5] = ['\u{0300}', '\u{0301}', '\u{0303}', '\u{0309}', '\u{0323}'];

const NORMALIZED_0300: &str = "\u{00E0}\u{00E8}\u{00EC}\u{00F2}\u{00F9}\u{1EF3}"; // à è ì ò ù ỳ
const NORMALIZED_0301: &str = "\u{00E1}\u{00E9}\u{00ED}\u{00F3}\u{00FA}\u{00FD}"; // á é í ó ú ý
const NORMALIZED_0303: &str = "\u{00E3}\u{1EBD}\u{0129}\u{00F5}\u{0169}\u{1EF9}"; // ã ẽ ĩ õ ũ ỹ
const NORMALIZED_0309: &str = "\u{1EA3}\u{1EBB}\u{1EC9}\u{1ECF}\u{1EE7}\u{1EF7}"; // ả ẻ ỉ ỏ ủ ỷ
const NORMALIZED_0323: &str = "\u{1EA1}\u{1EB9}\u{1ECB}\u{1ECD}\u{1EE5}\u{1EF5}"; // ạ ẹ ị ọ ụ ỵ

fn normalized_table(dmark_index: usize) -> &'static str {
    match dmark_index {
        0 => NORMALIZED_0300,
        1 => NORMALIZED_0301,
        2 => NORMALIZED_0303,
        3 => NORMALIZED_0309,
        4 => NORMALIZED_0323,
        _ => unreachable!("dmark_index is always produced by DMARKS.iter().position"),
    }
}

/// Fold a single code point to its canonical form, per the block table in
/// `unicode_block`. Total: every `char` maps to some output `char`.
pub fn fold(c: char) -> char {
    match classify(c) {
        BlockAction::Keep => c,
        BlockAction::Space => SPACE_MARKER,
        BlockAction::Fold(f) => f(c),
    }
}

/// Reorder/compose a Vietnamese base letter immediately followed by a
/// combining tone mark into its precomposed form. Applied once, before any
/// other normalization (spec.md §4.1). Idempotent: the output contains no
/// more base+combining-mark pairs for a second pass to find.
pub fn normalize_vietnamese(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if let Some(&next) = chars.peek() {
            let base_index = BASES.chars().position(|b| b == c);
            let dmark_index = DMARKS.iter().position(|&d| d == next);

            if let (Some(bi), Some(di)) = (base_index, dmark_index) {
                if let Some(composed) = normalized_table(di).chars().nth(bi) {
                    result.push(composed);
                    chars.next();
                    continue;
                }
            }
        }
        result.push(c);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_ascii_letters_to_lowercase() {
        assert_eq!(fold('A'), 'a');
        assert_eq!(fold('z'), 'z');
    }

    #[test]
    fn folds_digits_and_punctuation_to_space() {
        assert_eq!(fold('0'), ' ');
        assert_eq!(fold('!'), ' ');
        assert_eq!(fold('\u{2019}'), ' ');
    }

    #[test]
    fn keeps_cjk_and_hangul() {
        assert_eq!(fold('\u{4E2D}'), '\u{4E2D}');
        assert_eq!(fold('\u{AC00}'), '\u{AC00}');
    }

    #[test]
    fn keeps_diacritic_bearing_latin1_letters() {
        assert_eq!(fold('\u{00E9}'), '\u{00E9}'); // é
    }

    #[test]
    fn composes_base_and_tone_mark() {
        assert_eq!(normalize_vietnamese("a\u{0301}"), "\u{00E1}"); // a + acute -> á
        assert_eq!(normalize_vietnamese("u\u{0323}"), "\u{1EE5}"); // u + dot below -> ụ
        assert_eq!(normalize_vietnamese("y\u{0300}"), "\u{1EF3}"); // y + grave -> ỳ
    }

    #[test]
    fn leaves_unrelated_text_untouched() {
        assert_eq!(normalize_vietnamese(""), "");
        assert_eq!(normalize_vietnamese("hello"), "hello");
        assert_eq!(normalize_vietnamese("日本語"), "日本語");
    }

    #[test]
    fn is_idempotent() {
        let once = normalize_vietnamese("ti\u{0301}ng vi\u{0323}e\u{0323}t");
        let twice = normalize_vietnamese(&once);
        assert_eq!(once, twice);
    }
}
