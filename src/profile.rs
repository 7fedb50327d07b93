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

//! A single language's n-gram frequency profile (spec.md §4.3, wire format
//! §6).

use crate::ngram::{NgramGenerator, MAX_NGRAM_LENGTH};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Frequency counts for one language's 1-, 2- and 3-grams, plus the total
/// number of n-grams of each order the counts were collected over. A passive
/// input artifact (spec.md §3): the crate consumes already-built profiles,
/// deserialized from the wire format documented in spec.md §6
/// (`{"name": .., "n_words": [.., .., ..], "freq": {..}}`), via
/// `ProfileStore::build`. Training new profiles from raw corpora is an
/// external collaborator's job (spec.md §1 Non-goals) — the counting helpers
/// below exist only to build small synthetic profiles for this crate's own
/// tests and are not part of the public API.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LangProfile {
    pub name: String,
    pub n_words: [usize; MAX_NGRAM_LENGTH],
    pub freq: HashMap<String, usize>,
}

impl LangProfile {
    /// An empty profile for the given language code.
    pub fn new(name: impl Into<String>) -> Self {
        LangProfile {
            name: name.into(),
            n_words: [0; MAX_NGRAM_LENGTH],
            freq: HashMap::new(),
        }
    }

    /// Count every 1-, 2- and 3-gram `text` yields through the same
    /// `NgramGenerator` the detector scores with, so training and detection
    /// always agree on what counts as an n-gram. Test-only fixture builder
    /// (see SPEC_FULL.md §8's `setup_factory`-style synthetic profiles) —
    /// not reachable from outside this crate, and not compiled at all
    /// outside test builds, since training from raw corpora is out of scope
    /// for the shipped API (spec.md §1).
    #[cfg(test)]
    pub(crate) fn update(&mut self, text: &str) {
        let mut generator = NgramGenerator::new();
        for c in text.chars() {
            generator.push(c);
            for n in 1..=MAX_NGRAM_LENGTH {
                if let Some(ngram) = generator.get(n) {
                    self.add(ngram.as_str(), 1);
                }
            }
        }
    }

    /// Add `count` occurrences of `ngram`, keeping `n_words` in sync.
    /// Test-only, see `update`.
    #[cfg(test)]
    pub(crate) fn add(&mut self, ngram: &str, count: usize) {
        let length = ngram.chars().count();
        if !(1..=MAX_NGRAM_LENGTH).contains(&length) {
            return;
        }
        *self.freq.entry(ngram.to_string()).or_insert(0) += count;
        self.n_words[length - 1] += count;
    }

    /// Drop n-grams occurring only once, the way training corpora are
    /// pruned before shipping a profile (grounding: LdDl
    /// `LangProfile::omit_less_freq`). Does not touch `n_words`, since the
    /// detector only ever divides by it, never sums `freq` against it.
    /// Test-only, see `update`.
    #[cfg(test)]
    pub(crate) fn omit_less_freq(&mut self) {
        self.freq.retain(|_, &mut count| count > 1);
    }
}
