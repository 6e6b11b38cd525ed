// SPDX-License-Identifier: PMPL-1.0-or-later

//! Language tags as written by Qt tools (`fr`, `fr_FR`, `uk-UA`)

use super::iso639::{is_valid_iso639_1, language_name, native_name};
use super::plural::PluralRule;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LanguageTag {
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub territory: Option<String>,
}

impl LanguageTag {
    /// Split on `_` or `-`. The language part is lowercased and the
    /// territory uppercased; returns `None` for an empty tag.
    pub fn parse(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        let mut parts = tag.split(['_', '-']);
        let language = parts.next()?.to_ascii_lowercase();
        if language.is_empty() {
            return None;
        }
        let territory = parts
            .next()
            .filter(|t| !t.is_empty())
            .map(str::to_ascii_uppercase);
        Some(Self {
            language,
            territory,
        })
    }

    pub fn is_valid(&self) -> bool {
        is_valid_iso639_1(&self.language)
    }

    pub fn plural_rule(&self) -> PluralRule {
        PluralRule::for_language(&self.language, self.territory.as_deref())
    }

    /// English display name, falling back to the raw code
    pub fn display_name(&self) -> &str {
        language_name(&self.language).unwrap_or(&self.language)
    }

    pub fn native_name(&self) -> Option<&'static str> {
        native_name(&self.language)
    }

    /// Whether two tags name the same language, ignoring territory
    /// (`fr_FR` and `fr`). Unparseable tags never match.
    pub fn same_language(a: &str, b: &str) -> bool {
        match (Self::parse(a), Self::parse(b)) {
            (Some(a), Some(b)) => a.language == b.language,
            _ => false,
        }
    }
}

impl std::fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.territory {
            Some(territory) => write!(f, "{}_{}", self.language, territory),
            None => write!(f, "{}", self.language),
        }
    }
}
