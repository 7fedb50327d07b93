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

//! Error kinds named in spec.md §7.

use thiserror::Error;

/// Raised at construction time; the store or detector is never left
/// partially usable (spec.md §7).
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("duplicate language profile: {0}")]
    DuplicateLanguage(String),

    #[error("at least one language profile is required")]
    NoProfiles,

    #[error("invalid admission pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Reserved for algorithmic invariant violations; should be unreachable if
/// construction invariants hold (spec.md §7). Aborts the single call only.
#[derive(Debug, Error)]
pub enum DetectionError {
    #[error(
        "n-gram probability vector length {actual} does not match language count {expected}"
    )]
    VectorLengthMismatch { expected: usize, actual: usize },
}
