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

//! The immutable, shared table of per-n-gram language probability vectors
//! the detector scores against (spec.md §4.3, §5).

use crate::error::ConfigurationError;
use crate::ngram::Ngram;
use crate::profile::LangProfile;
use std::collections::HashMap;

/// A language identification corpus reduced to its scoring form: for every
/// n-gram seen in any profile, the fraction of that n-gram's order each
/// language accounts for. Built once via [`ProfileStore::build`] and then
/// shared read-only across detection calls — see spec.md §5.
#[derive(Debug)]
pub struct ProfileStore {
    langs: Vec<String>,
    ngram_prob: HashMap<Ngram, Vec<f64>>,
}

impl ProfileStore {
    /// Reduce `profiles` into a scoring table.
    ///
    /// For each language `i` and each `(ngram, count)` in that language's
    /// frequency map, ensure a zero-initialized probability vector of length
    /// `profiles.len()` exists for `ngram`, then set its `i`-th coordinate to
    /// `count / n_words[ngram.len() - 1]` (spec.md §4.3).
    ///
    /// Rejects an empty profile list or any language code repeated across
    /// profiles, so a built store is never partially usable.
    pub fn build(profiles: Vec<LangProfile>) -> Result<Self, ConfigurationError> {
        if profiles.is_empty() {
            return Err(ConfigurationError::NoProfiles);
        }

        let mut langs = Vec::with_capacity(profiles.len());
        for profile in &profiles {
            if langs.contains(&profile.name) {
                return Err(ConfigurationError::DuplicateLanguage(profile.name.clone()));
            }
            langs.push(profile.name.clone());
        }

        let mut ngram_prob: HashMap<Ngram, Vec<f64>> = HashMap::new();

        for (index, profile) in profiles.iter().enumerate() {
            let mut contributed = 0usize;
            for (raw, &count) in &profile.freq {
                let length = raw.chars().count();
                if length == 0 || length > crate::ngram::MAX_NGRAM_LENGTH {
                    continue;
                }
                let denominator = profile.n_words[length - 1];
                if denominator == 0 {
                    continue;
                }

                let ngram = Ngram::new(raw);
                let vector = ngram_prob
                    .entry(ngram)
                    .or_insert_with(|| vec![0.0; langs.len()]);
                vector[index] = count as f64 / denominator as f64;
                contributed += 1;
            }
            if contributed == 0 {
                log::warn!("profile '{}' contributed zero in-vocabulary n-grams", profile.name);
            }
        }

        log::info!(
            "built profile store with {} languages and {} distinct n-grams",
            langs.len(),
            ngram_prob.len()
        );

        Ok(ProfileStore { langs, ngram_prob })
    }

    /// The language codes this store was built from, in profile order —
    /// the index a probability vector's coordinates line up with.
    pub fn languages(&self) -> &[String] {
        &self.langs
    }

    /// The per-language probability vector recorded for `ngram`, if any
    /// profile contained it.
    pub fn probabilities(&self, ngram: &Ngram) -> Option<&[f64]> {
        self.ngram_prob.get(ngram).map(Vec::as_slice)
    }

    pub fn language_count(&self) -> usize {
        self.langs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use rstest::rstest;

    fn profile(name: &str, unigrams: &[(&str, usize)], n_words: usize) -> LangProfile {
        let mut p = LangProfile::new(name);
        for &(ng, count) in unigrams {
            p.add(ng, count);
        }
        p.n_words[0] = n_words;
        p
    }

    #[test]
    fn rejects_empty_profile_list() {
        let result = ProfileStore::build(vec![]);
        assert!(matches!(result, Err(ConfigurationError::NoProfiles)));
    }

    #[test]
    fn rejects_duplicate_language_codes() {
        let profiles = vec![
            profile("en", &[("a", 1)], 1),
            profile("en", &[("b", 1)], 1),
        ];
        let result = ProfileStore::build(profiles);
        assert!(matches!(
            result,
            Err(ConfigurationError::DuplicateLanguage(code)) if code == "en"
        ));
    }

    #[test]
    fn builds_probability_vectors_indexed_by_profile_order() {
        let profiles = vec![
            profile("en", &[("a", 3)], 10),
            profile("fr", &[("a", 1)], 10),
        ];
        let store = ProfileStore::build(profiles).unwrap();
        assert_eq!(store.languages(), &["en".to_string(), "fr".to_string()]);

        let probs = store.probabilities(&Ngram::new("a")).unwrap();
        assert_eq!(probs.len(), 2);
        assert!((probs[0] - 0.3).abs() < 1e-9);
        assert!((probs[1] - 0.1).abs() < 1e-9);
    }

    #[test]
    fn unknown_ngram_has_no_probability_vector() {
        let profiles = vec![profile("en", &[("a", 1)], 1)];
        let store = ProfileStore::build(profiles).unwrap();
        assert!(store.probabilities(&Ngram::new("z")).is_none());
    }

    #[rstest(
        count,
        n_words,
        expected_ratio,
        case::full_share(10, 10, 1.0),
        case::half_share(5, 10, 0.5),
        case::tenth_share(1, 10, 0.1),
        case::repeated_observation(20, 100, 0.2)
    )]
    fn probability_ratio_matches_count_over_n_words(count: usize, n_words: usize, expected_ratio: f64) {
        let profiles = vec![profile("en", &[("a", count)], n_words)];
        let store = ProfileStore::build(profiles).unwrap();
        let probs = store.probabilities(&Ngram::new("a")).unwrap();
        assert!(approx_eq!(f64, probs[0], expected_ratio, epsilon = 1e-9));
    }
}
