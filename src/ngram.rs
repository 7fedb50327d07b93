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

//! `Ngram`, the wire-format token type, and `NgramGenerator`, the streaming
//! 1..3-gram producer over normalized characters (spec.md §4.2).

use crate::char_normalizer::{fold, SPACE_MARKER};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Display;

/// The maximum n-gram order this crate scores against.
pub const MAX_NGRAM_LENGTH: usize = 3;

/// A non-empty string of 1 to 3 code points, possibly including the space
/// marker at a word boundary (spec.md §3).
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ngram(String);

impl Ngram {
    pub fn new(value: &str) -> Self {
        let length = value.chars().count();
        assert!(
            (1..=MAX_NGRAM_LENGTH).contains(&length),
            "ngram '{value}' length {length} is not in range 1..={MAX_NGRAM_LENGTH}"
        );
        Self(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if this token is nothing but the space marker (possibly
    /// repeated) — not a signal-bearing n-gram (spec.md §3, §4.2).
    pub fn is_marker_only(&self) -> bool {
        self.0.chars().all(|c| c == SPACE_MARKER)
    }
}

impl Display for Ngram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Streaming producer of 1-, 2-, and 3-grams over a normalized character
/// stream. Holds a fixed 3-slot ring buffer of the most recently pushed
/// normalized characters rather than a growable string, so `push` is O(1).
pub struct NgramGenerator {
    buffer: [char; MAX_NGRAM_LENGTH],
    filled: usize,
    write_cursor: usize,
    previous_was_marker: bool,
    previous_was_upper: bool,
    /// Suppresses n-grams spanning a run of capitalized Latin letters
    /// (acronym/proper-noun noise), mirroring the grounding implementation's
    /// `capitalword` flag. Not named in spec.md §4.2 but kept as a
    /// supplemental edge case (see DESIGN.md Open Question 2).
    capital_word: bool,
}

impl Default for NgramGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl NgramGenerator {
    pub fn new() -> Self {
        let mut generator = NgramGenerator {
            buffer: [SPACE_MARKER; MAX_NGRAM_LENGTH],
            filled: 0,
            write_cursor: 0,
            previous_was_marker: true,
            previous_was_upper: false,
            capital_word: false,
        };
        // An implicit leading space marker lets word-initial 2-grams form.
        generator.push_folded(SPACE_MARKER);
        generator
    }

    /// Accept one raw code point (spec.md §4.2 `push`).
    pub fn push(&mut self, c: char) {
        let was_upper = c.is_uppercase();
        let folded = fold(c);

        if folded == SPACE_MARKER && self.previous_was_marker {
            // Consecutive whitespace/punctuation collapses to one marker.
            return;
        }

        self.push_folded(folded);
        self.previous_was_marker = folded == SPACE_MARKER;

        if folded == SPACE_MARKER {
            self.capital_word = false;
            self.previous_was_upper = false;
        } else {
            self.capital_word = was_upper && self.previous_was_upper;
            self.previous_was_upper = was_upper;
        }
    }

    fn push_folded(&mut self, c: char) {
        self.buffer[self.write_cursor] = c;
        self.write_cursor = (self.write_cursor + 1) % MAX_NGRAM_LENGTH;
        self.filled = (self.filled + 1).min(MAX_NGRAM_LENGTH);
    }

    /// Return the n-gram ending at the current buffer head, or `None` if
    /// fewer than `n` meaningful characters have accumulated yet, or the
    /// result is a marker-only string (spec.md §4.2 `get`).
    pub fn get(&self, n: usize) -> Option<Ngram> {
        if !(1..=MAX_NGRAM_LENGTH).contains(&n) || self.filled < n || self.capital_word {
            return None;
        }

        let mut chars = Vec::with_capacity(n);
        for offset in (0..n).rev() {
            let index = (self.write_cursor + MAX_NGRAM_LENGTH - 1 - offset) % MAX_NGRAM_LENGTH;
            chars.push(self.buffer[index]);
        }

        let value: String = chars.into_iter().collect();
        let ngram = Ngram::new(&value);
        if ngram.is_marker_only() {
            None
        } else {
            Some(ngram)
        }
    }
}
