// SPDX-License-Identifier: PMPL-1.0-or-later

//! Plural-form selection for numerus messages
//!
//! Each rule maps a count to the index of the `<numerusform>` to use. The
//! tables follow the ones Qt Linguist ships, so form order matches what
//! translators see in Linguist.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PluralRule {
    /// No grammatical number (Japanese, Chinese, ...)
    Single,
    /// `1` vs everything else (English, German, ...)
    OneOther,
    /// `0` and `1` vs everything else
    French,
    /// one / few / many by the last two digits (Ukrainian, Russian, ...)
    EastSlavic,
    /// `1` / few / many
    Polish,
    /// `1` / `2..=4` / everything else
    Czech,
}

impl PluralRule {
    /// Rule for an ISO 639-1 code; `territory` only matters for pt_BR.
    /// Unknown languages get [`PluralRule::OneOther`].
    pub fn for_language(language: &str, territory: Option<&str>) -> PluralRule {
        match language {
            "ja" | "zh" | "ko" | "vi" | "th" | "id" | "ms" | "tr" | "ka" | "lo" | "my" => {
                PluralRule::Single
            }
            "fr" | "ff" | "kab" => PluralRule::French,
            "pt" if territory == Some("BR") => PluralRule::French,
            "uk" | "ru" | "be" | "sr" | "hr" | "bs" => PluralRule::EastSlavic,
            "pl" => PluralRule::Polish,
            "cs" | "sk" => PluralRule::Czech,
            _ => PluralRule::OneOther,
        }
    }

    /// Number of `<numerusform>` entries a complete translation carries
    pub fn form_count(&self) -> usize {
        match self {
            PluralRule::Single => 1,
            PluralRule::OneOther | PluralRule::French => 2,
            PluralRule::EastSlavic | PluralRule::Polish | PluralRule::Czech => 3,
        }
    }

    /// Index of the plural form for `n`; the sign of `n` is ignored
    pub fn form_index(&self, n: i64) -> usize {
        let n = n.unsigned_abs();
        let last = n % 10;
        let last_two = n % 100;
        match self {
            PluralRule::Single => 0,
            PluralRule::OneOther => usize::from(n != 1),
            PluralRule::French => usize::from(n > 1),
            PluralRule::EastSlavic => {
                if last == 1 && last_two != 11 {
                    0
                } else if (2..=4).contains(&last) && !(12..=14).contains(&last_two) {
                    1
                } else {
                    2
                }
            }
            PluralRule::Polish => {
                if n == 1 {
                    0
                } else if (2..=4).contains(&last) && !(12..=14).contains(&last_two) {
                    1
                } else {
                    2
                }
            }
            PluralRule::Czech => match n {
                1 => 0,
                2..=4 => 1,
                _ => 2,
            },
        }
    }
}

impl std::fmt::Display for PluralRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PluralRule::Single => "single",
            PluralRule::OneOther => "one-other",
            PluralRule::French => "french",
            PluralRule::EastSlavic => "east-slavic",
            PluralRule::Polish => "polish",
            PluralRule::Czech => "czech",
        };
        write!(f, "{}", name)
    }
}
