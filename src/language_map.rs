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

//! Optional caller-facing rewriting of raw profile language codes into
//! display codes (spec.md §4.5), e.g. collapsing `zh-cn`/`zh-tw` profiles
//! down to a single reported `zh`.

use std::collections::HashMap;

/// A pass-through-on-miss rewrite from a profile's stored language code to
/// the code a caller wants reported back.
#[derive(Clone, Debug)]
pub struct LanguageMap {
    mapping: HashMap<String, String>,
}

impl Default for LanguageMap {
    /// The identity mapping: every code is reported unchanged.
    fn default() -> Self {
        LanguageMap {
            mapping: HashMap::new(),
        }
    }
}

impl LanguageMap {
    /// Build a map from `(profile_code, display_code)` pairs. Codes absent
    /// from `pairs` still resolve, unchanged, through `get`.
    pub fn from_pairs<I, S1, S2>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S1, S2)>,
        S1: Into<String>,
        S2: Into<String>,
    {
        LanguageMap {
            mapping: pairs
                .into_iter()
                .map(|(from, to)| (from.into(), to.into()))
                .collect(),
        }
    }

    /// Resolve `code` to its display form, falling back to `code` itself.
    pub fn get<'a>(&'a self, code: &'a str) -> &'a str {
        self.mapping
            .get(code)
            .map(String::as_str)
            .unwrap_or(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_identity() {
        let map = LanguageMap::default();
        assert_eq!(map.get("zh-cn"), "zh-cn");
    }

    #[test]
    fn from_pairs_rewrites_known_codes() {
        let map = LanguageMap::from_pairs([("zh-cn", "zh"), ("zh-tw", "zh")]);
        assert_eq!(map.get("zh-cn"), "zh");
        assert_eq!(map.get("zh-tw"), "zh");
        assert_eq!(map.get("en"), "en");
    }
}
