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

//! Numeric defaults for the Monte-Carlo detector (spec.md §6).

/// Smoothing weight applied to a sampled n-gram's probability vector.
pub const ALPHA_DEFAULT: f64 = 0.5;

/// Half-width of the Gaussian jitter added to `ALPHA_DEFAULT` per trial.
pub const ALPHA_WIDTH: f64 = 0.05;

/// Upper bound on sampling iterations within a single trial.
pub const ITERATION_LIMIT: usize = 10_000;

/// A sampled n-gram contributes nothing if its profile-wide frequency falls
/// below this fraction of the most frequent n-gram in the same profile.
pub const PROB_THRESHOLD: f64 = 0.1;

/// A trial exits early once the leading candidate's posterior exceeds this.
pub const CONV_THRESHOLD: f64 = 0.99999;

/// Denominator normalizing a raw n-gram count into `w = alpha / BASE_FREQ`.
pub const BASE_FREQ: f64 = 10_000.0;

/// Number of independent Monte-Carlo trials averaged per `detect_all` call.
pub const NUMBER_OF_TRIALS: usize = 7;

/// Fixed seed for the trial RNG, so repeated calls against the same store
/// and input are deterministic (spec.md §5 concurrency model).
pub const RNG_SEED: u64 = 0;
