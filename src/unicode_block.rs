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

//! The canonical Unicode-block-to-behavior table that `char_normalizer`
//! folds code points through. Kept as a flat, sorted range table rather than
//! per-character branches so the mapping from block to action is a single
//! data structure a test can walk (spec.md §4.1, §9).

/// What a code point in a given block should become under folding.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BlockAction {
    /// Keep the character unchanged; the block carries high signal.
    Keep,
    /// Collapse to the space marker.
    Space,
    /// Apply the block-specific fold function.
    Fold(fn(char) -> char),
}

struct BlockRange {
    start: u32,
    end: u32,
    action: BlockAction,
}

fn fold_basic_latin(c: char) -> char {
    let lower = c.to_ascii_lowercase();
    if lower.is_ascii_lowercase() {
        lower
    } else {
        ' '
    }
}

fn fold_latin1_supplement(c: char) -> char {
    // C1 controls and symbol-only code points collapse; diacritic-bearing
    // letters (e.g. À-ÿ) are kept, since they carry European-language signal.
    match c {
        '\u{0080}'..='\u{009F}' => ' ',
        '\u{00A0}'..='\u{00BF}' => ' ',
        '\u{00D7}' | '\u{00F7}' => ' ',
        _ => c,
    }
}

fn fold_general_punctuation(_c: char) -> char {
    ' '
}

// Ranges must stay sorted by `start` for `classify`'s binary search.
static BLOCKS: &[BlockRange] = &[
    BlockRange {
        start: 0x0000,
        end: 0x007F,
        action: BlockAction::Fold(fold_basic_latin),
    },
    BlockRange {
        start: 0x0080,
        end: 0x00FF,
        action: BlockAction::Fold(fold_latin1_supplement),
    },
    BlockRange {
        start: 0x0100,
        end: 0x017F, // Latin Extended-A
        action: BlockAction::Keep,
    },
    BlockRange {
        start: 0x0180,
        end: 0x024F, // Latin Extended-B
        action: BlockAction::Keep,
    },
    BlockRange {
        start: 0x0370,
        end: 0x03FF, // Greek and Coptic
        action: BlockAction::Keep,
    },
    BlockRange {
        start: 0x0400,
        end: 0x04FF, // Cyrillic
        action: BlockAction::Keep,
    },
    BlockRange {
        start: 0x0530,
        end: 0x058F, // Armenian
        action: BlockAction::Keep,
    },
    BlockRange {
        start: 0x0590,
        end: 0x05FF, // Hebrew
        action: BlockAction::Keep,
    },
    BlockRange {
        start: 0x0600,
        end: 0x06FF, // Arabic
        action: BlockAction::Keep,
    },
    BlockRange {
        start: 0x0900,
        end: 0x097F, // Devanagari
        action: BlockAction::Keep,
    },
    BlockRange {
        start: 0x0980,
        end: 0x09FF, // Bengali
        action: BlockAction::Keep,
    },
    BlockRange {
        start: 0x0A00,
        end: 0x0A7F, // Gurmukhi
        action: BlockAction::Keep,
    },
    BlockRange {
        start: 0x0A80,
        end: 0x0AFF, // Gujarati
        action: BlockAction::Keep,
    },
    BlockRange {
        start: 0x0B80,
        end: 0x0BFF, // Tamil
        action: BlockAction::Keep,
    },
    BlockRange {
        start: 0x0C00,
        end: 0x0C7F, // Telugu
        action: BlockAction::Keep,
    },
    BlockRange {
        start: 0x0C80,
        end: 0x0CFF, // Kannada
        action: BlockAction::Keep,
    },
    BlockRange {
        start: 0x0D00,
        end: 0x0D7F, // Malayalam
        action: BlockAction::Keep,
    },
    BlockRange {
        start: 0x0E00,
        end: 0x0E7F, // Thai
        action: BlockAction::Keep,
    },
    BlockRange {
        start: 0x10A0,
        end: 0x10FF, // Georgian
        action: BlockAction::Keep,
    },
    BlockRange {
        start: 0x1E00,
        end: 0x1EFF, // Latin Extended Additional (Vietnamese precomposed)
        action: BlockAction::Keep,
    },
    BlockRange {
        start: 0x2000,
        end: 0x206F, // General Punctuation
        action: BlockAction::Fold(fold_general_punctuation),
    },
    BlockRange {
        start: 0x3040,
        end: 0x309F, // Hiragana
        action: BlockAction::Keep,
    },
    BlockRange {
        start: 0x30A0,
        end: 0x30FF, // Katakana
        action: BlockAction::Keep,
    },
    BlockRange {
        start: 0x4E00,
        end: 0x9FFF, // CJK Unified Ideographs
        action: BlockAction::Keep,
    },
    BlockRange {
        start: 0xAC00,
        end: 0xD7A3, // Hangul Syllables
        action: BlockAction::Keep,
    },
];

/// Classify a code point's block action. Unassigned/unlisted blocks collapse
/// to the space marker, per spec.md §4.1 ("Unassigned ... collapse to the
/// space marker").
pub fn classify(c: char) -> BlockAction {
    let point = c as u32;
    match BLOCKS.binary_search_by(|range| {
        if point < range.start {
            std::cmp::Ordering::Greater
        } else if point > range.end {
            std::cmp::Ordering::Less
        } else {
            std::cmp::Ordering::Equal
        }
    }) {
        Ok(index) => BLOCKS[index].action,
        Err(_) => BlockAction::Space,
    }
}
