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

//! A statistical, Monte-Carlo naive-Bayes language identification core
//! operating over character n-gram profiles.
//!
//! Build a [`ProfileStore`] from a set of [`LangProfile`]s, configure a
//! [`Detector`] with [`DetectorBuilder`], and call [`Detector::detect_all`]
//! to get a ranked list of language codes with their posterior
//! probabilities.

#![allow(dead_code)]

mod char_normalizer;
mod constant;
mod detector;
mod error;
mod language_map;
mod ngram;
mod profile;
mod profile_store;
mod unicode_block;

pub use detector::{Detector, DetectorBuilder, LanguageResult};
pub use error::{ConfigurationError, DetectionError};
pub use language_map::LanguageMap;
pub use ngram::{Ngram, NgramGenerator, MAX_NGRAM_LENGTH};
pub use profile::LangProfile;
pub use profile_store::ProfileStore;
