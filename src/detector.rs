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

//! The Monte-Carlo naive-Bayes inference loop (spec.md §4.4) and its
//! builder, in the teacher's `LanguageDetectorBuilder` idiom.

use crate::char_normalizer::normalize_vietnamese;
use crate::constant::{
    ALPHA_DEFAULT, ALPHA_WIDTH, BASE_FREQ, CONV_THRESHOLD, ITERATION_LIMIT, NUMBER_OF_TRIALS,
    PROB_THRESHOLD, RNG_SEED,
};
use crate::error::{ConfigurationError, DetectionError};
use crate::language_map::LanguageMap;
use crate::ngram::{Ngram, NgramGenerator, MAX_NGRAM_LENGTH};
use crate::profile_store::ProfileStore;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use regex::Regex;
use std::sync::Arc;

/// One ranked language identification outcome: a display code paired with
/// its averaged posterior probability.
#[derive(Clone, Debug, PartialEq)]
pub struct LanguageResult {
    pub language: String,
    pub probability: f64,
}

/// Configures and produces a [`Detector`]. Every `with_*`-equivalent setter
/// consumes and returns `Self`; `build` is terminal and infallible — the
/// only fallible step is compiling the admission `pattern`, which returns
/// immediately rather than deferring to `build`.
pub struct DetectorBuilder {
    store: Arc<ProfileStore>,
    number_of_trials: usize,
    alpha: f64,
    alpha_width: f64,
    iteration_limit: usize,
    prob_threshold: f64,
    conv_threshold: f64,
    base_freq: f64,
    pattern: Option<Regex>,
    max: Option<usize>,
    language_map: LanguageMap,
}

impl DetectorBuilder {
    pub fn new(store: Arc<ProfileStore>) -> Self {
        DetectorBuilder {
            store,
            number_of_trials: NUMBER_OF_TRIALS,
            alpha: ALPHA_DEFAULT,
            alpha_width: ALPHA_WIDTH,
            iteration_limit: ITERATION_LIMIT,
            prob_threshold: PROB_THRESHOLD,
            conv_threshold: CONV_THRESHOLD,
            base_freq: BASE_FREQ,
            pattern: None,
            max: None,
            language_map: LanguageMap::default(),
        }
    }

    pub fn number_of_trials(mut self, t: usize) -> Self {
        self.number_of_trials = t;
        self
    }

    pub fn alpha(mut self, a: f64) -> Self {
        self.alpha = a;
        self
    }

    pub fn alpha_width(mut self, w: f64) -> Self {
        self.alpha_width = w;
        self
    }

    pub fn iteration_limit(mut self, n: usize) -> Self {
        self.iteration_limit = n;
        self
    }

    pub fn prob_threshold(mut self, p: f64) -> Self {
        self.prob_threshold = p;
        self
    }

    pub fn conv_threshold(mut self, c: f64) -> Self {
        self.conv_threshold = c;
        self
    }

    pub fn base_freq(mut self, f: f64) -> Self {
        self.base_freq = f;
        self
    }

    /// Compile `re` as the admission regex, rejecting non-matching inputs
    /// before any n-gram work happens. Compiled once, here, not per call.
    pub fn pattern(mut self, re: &str) -> Result<Self, ConfigurationError> {
        self.pattern = Some(Regex::new(re)?);
        Ok(self)
    }

    pub fn max(mut self, n: usize) -> Self {
        self.max = Some(n);
        self
    }

    pub fn language_map(mut self, map: LanguageMap) -> Self {
        self.language_map = map;
        self
    }

    pub fn build(self) -> Detector {
        Detector {
            store: self.store,
            number_of_trials: self.number_of_trials,
            alpha: self.alpha,
            alpha_width: self.alpha_width,
            iteration_limit: self.iteration_limit,
            prob_threshold: self.prob_threshold,
            conv_threshold: self.conv_threshold,
            base_freq: self.base_freq,
            pattern: self.pattern,
            max: self.max,
            language_map: self.language_map,
        }
    }
}

/// A configured Monte-Carlo naive-Bayes language detector, holding a shared,
/// immutable [`ProfileStore`]. Cheap to clone-by-reference and safe to use
/// concurrently across threads (spec.md §5).
pub struct Detector {
    store: Arc<ProfileStore>,
    number_of_trials: usize,
    alpha: f64,
    alpha_width: f64,
    iteration_limit: usize,
    prob_threshold: f64,
    conv_threshold: f64,
    base_freq: f64,
    pattern: Option<Regex>,
    max: Option<usize>,
    language_map: LanguageMap,
}

const RENORMALIZE_EVERY: usize = 5;

impl Detector {
    /// Collect the in-vocabulary n-grams admitted by `text`: apply
    /// Vietnamese composition, gate on the admission pattern, feed the
    /// normalized stream through `NgramGenerator`, and keep only n-grams
    /// present in the store (spec.md §4.4 steps 1-4).
    fn admitted_ngrams(&self, text: &str) -> Vec<Ngram> {
        let normalized = normalize_vietnamese(text);

        if let Some(pattern) = &self.pattern {
            if !pattern.is_match(&normalized) {
                return Vec::new();
            }
        }

        let mut generator = NgramGenerator::new();
        let mut seen = Vec::new();
        for c in normalized.chars() {
            generator.push(c);
            for n in 1..=MAX_NGRAM_LENGTH {
                if let Some(ngram) = generator.get(n) {
                    if self.store.probabilities(&ngram).is_some() {
                        seen.push(ngram);
                    }
                }
            }
        }
        seen
    }

    /// Run one Monte-Carlo trial over `g`, returning the converged posterior
    /// over `self.store.language_count()` languages (spec.md §4.4 step 5).
    fn run_trial(&self, g: &[Ngram], rng: &mut StdRng) -> Result<Vec<f64>, DetectionError> {
        let l = self.store.language_count();
        let mut pi = vec![1.0 / l as f64; l];

        let normal = Normal::new(self.alpha, self.alpha_width)
            .expect("alpha_width must be a finite, non-negative standard deviation");
        let alpha = normal.sample(rng);
        let w = alpha / self.base_freq;

        let mut i: usize = 0;
        loop {
            let ngram = &g[rng.gen_range(0..g.len())];
            let v = self.store.probabilities(ngram).ok_or(DetectionError::VectorLengthMismatch {
                expected: l,
                actual: 0,
            })?;
            if v.len() != l {
                return Err(DetectionError::VectorLengthMismatch {
                    expected: l,
                    actual: v.len(),
                });
            }
            for j in 0..l {
                pi[j] *= w + v[j];
            }

            if i % RENORMALIZE_EVERY == 0 {
                let sum: f64 = pi.iter().sum();
                if sum > 0.0 {
                    for p in pi.iter_mut() {
                        *p /= sum;
                    }
                }
                let m = pi.iter().cloned().fold(f64::MIN, f64::max);
                if m > self.conv_threshold || i >= self.iteration_limit {
                    log::trace!("trial converged after {i} iterations (max component {m})");
                    break;
                }
            }
            i += 1;
        }

        Ok(pi)
    }

    /// The Monte-Carlo entry point (spec.md §4.4).
    pub fn detect_all(&self, text: &str) -> Result<Vec<LanguageResult>, DetectionError> {
        let g = self.admitted_ngrams(text);
        log::debug!("{} in-vocabulary n-grams admitted", g.len());
        if g.is_empty() {
            return Ok(Vec::new());
        }

        let l = self.store.language_count();
        let mut rng = StdRng::seed_from_u64(RNG_SEED);
        let mut total = vec![0.0; l];

        for _ in 0..self.number_of_trials {
            let pi = self.run_trial(&g, &mut rng)?;
            for j in 0..l {
                total[j] += pi[j] / self.number_of_trials as f64;
            }
        }

        Ok(self.rank(total))
    }

    /// Exhaustive variant: iterates `G` deterministically once instead of
    /// Monte-Carlo sampling, for callers that want a non-randomized
    /// posterior over short inputs (DESIGN.md Open Question 1). A
    /// compositional wrapper around the same scoring primitives, not a
    /// branch inside `detect_all`'s loop.
    pub fn detect_all_exhaustive(&self, text: &str) -> Result<Vec<LanguageResult>, DetectionError> {
        let g = self.admitted_ngrams(text);
        if g.is_empty() {
            return Ok(Vec::new());
        }

        let l = self.store.language_count();
        let mut pi = vec![1.0 / l as f64; l];
        let w = self.alpha / self.base_freq;

        for (i, ngram) in g.iter().enumerate() {
            let v = self.store.probabilities(ngram).ok_or(DetectionError::VectorLengthMismatch {
                expected: l,
                actual: 0,
            })?;
            if v.len() != l {
                return Err(DetectionError::VectorLengthMismatch {
                    expected: l,
                    actual: v.len(),
                });
            }
            for j in 0..l {
                pi[j] *= w + v[j];
            }
            if i % RENORMALIZE_EVERY == 0 {
                let sum: f64 = pi.iter().sum();
                if sum > 0.0 {
                    for p in pi.iter_mut() {
                        *p /= sum;
                    }
                }
            }
        }

        Ok(self.rank(pi))
    }

    /// Filter by `prob_threshold`, remap codes via `language_map`, sort
    /// descending, and truncate to `max` (spec.md §4.4 steps 6-8).
    fn rank(&self, probabilities: Vec<f64>) -> Vec<LanguageResult> {
        let mut results: Vec<LanguageResult> = self
            .store
            .languages()
            .iter()
            .zip(probabilities)
            .filter(|(_, p)| *p > self.prob_threshold)
            .map(|(code, p)| LanguageResult {
                language: self.language_map.get(code).to_string(),
                probability: p,
            })
            .collect();

        results.sort_by(|a, b| b.probability.partial_cmp(&a.probability).unwrap());

        if let Some(max) = self.max {
            results.truncate(max);
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::LangProfile;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn profile_store_and_detector_are_send_sync() {
        assert_send_sync::<ProfileStore>();
        assert_send_sync::<Detector>();
    }

    fn trained(name: &str, samples: &[&str]) -> LangProfile {
        let mut p = LangProfile::new(name);
        for s in samples {
            p.update(s);
        }
        p
    }

    const EN_SAMPLES: [&str; 3] = [
        "the quick brown fox jumps over the lazy dog",
        "hello world this is english text",
        "the weather today is quite nice",
    ];

    const FR_SAMPLES: [&str; 3] = [
        "le renard brun rapide saute par dessus le chien",
        "bonjour le monde ceci est un texte francais",
        "le temps aujourd'hui est plutot agreable",
    ];

    // CJK training text, so at least one profile exercises Keep-block,
    // multi-byte-script n-grams through the detector rather than only the
    // Latin-script fold path.
    const JA_SAMPLES: [&str; 3] = [
        "今日は天気がとても良いです",
        "これは日本語のテキストです",
        "世界中のことばを学ぶのは楽しい",
    ];

    fn english_vs_french_store() -> Arc<ProfileStore> {
        let en = trained("en", &EN_SAMPLES);
        let fr = trained("fr", &FR_SAMPLES);
        Arc::new(ProfileStore::build(vec![en, fr]).unwrap())
    }

    fn english_french_japanese_store() -> Arc<ProfileStore> {
        let en = trained("en", &EN_SAMPLES);
        let fr = trained("fr", &FR_SAMPLES);
        let ja = trained("ja", &JA_SAMPLES);
        Arc::new(ProfileStore::build(vec![en, fr, ja]).unwrap())
    }

    #[test]
    fn detects_dominant_language() {
        let store = english_vs_french_store();
        let detector = DetectorBuilder::new(store).build();
        let results = detector.detect_all("hello, world! the weather today is nice").unwrap();
        assert!(!results.is_empty());
        assert_eq!(results[0].language, "en");
    }

    #[test]
    fn detects_japanese_among_three_languages() {
        let store = english_french_japanese_store();
        let detector = DetectorBuilder::new(store).build();
        let results = detector.detect_all("今日はとても良い天気です").unwrap();
        assert!(!results.is_empty());
        assert_eq!(results[0].language, "ja");
    }

    #[test]
    fn own_training_text_scores_near_certainty() {
        let store = english_vs_french_store();
        let detector = DetectorBuilder::new(store).build();
        for sample in EN_SAMPLES {
            let results = detector.detect_all(sample).unwrap();
            assert_eq!(results[0].language, "en");
            assert!(
                results[0].probability >= 0.99,
                "expected >= 0.99 for {sample:?}, got {}",
                results[0].probability
            );
        }
    }

    #[test]
    fn returns_empty_for_empty_input() {
        let store = english_vs_french_store();
        let detector = DetectorBuilder::new(store).build();
        assert_eq!(detector.detect_all("").unwrap(), Vec::new());
    }

    #[test]
    fn returns_empty_for_digits_and_punctuation_only() {
        let store = english_vs_french_store();
        let detector = DetectorBuilder::new(store).build();
        assert_eq!(detector.detect_all("1234 !!! ???").unwrap(), Vec::new());
    }

    #[test]
    fn pattern_rejection_yields_empty_result() {
        let store = english_vs_french_store();
        let detector = DetectorBuilder::new(store)
            .pattern(r"^[0-9]+$")
            .unwrap()
            .build();
        let results = detector.detect_all("hello world").unwrap();
        assert_eq!(results, Vec::new());
    }

    #[test]
    fn invalid_pattern_is_rejected_at_build_time() {
        let store = english_vs_french_store();
        let result = DetectorBuilder::new(store).pattern("(unclosed");
        assert!(matches!(result, Err(ConfigurationError::InvalidPattern(_))));
    }

    #[test]
    fn repeated_calls_are_deterministic() {
        let store = english_vs_french_store();
        let detector = DetectorBuilder::new(store).build();
        let first = detector.detect_all("hello world the weather is nice").unwrap();
        let second = detector.detect_all("hello world the weather is nice").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn max_truncates_ranked_results() {
        let store = english_vs_french_store();
        let detector = DetectorBuilder::new(store).max(1).prob_threshold(0.0).build();
        let results = detector
            .detect_all("hello world the weather today is nice and the temps aujourdhui")
            .unwrap();
        assert!(results.len() <= 1);
    }

    #[test]
    fn language_map_rewrites_reported_codes() {
        let store = english_vs_french_store();
        let detector = DetectorBuilder::new(store)
            .language_map(LanguageMap::from_pairs([("en", "eng")]))
            .build();
        let results = detector.detect_all("hello world the weather today is nice").unwrap();
        assert_eq!(results[0].language, "eng");
    }

    #[test]
    fn exhaustive_variant_agrees_on_dominant_language() {
        let store = english_vs_french_store();
        let detector = DetectorBuilder::new(store).build();
        let results = detector
            .detect_all_exhaustive("hello world the weather today is nice")
            .unwrap();
        assert!(!results.is_empty());
        assert_eq!(results[0].language, "en");
    }
}
