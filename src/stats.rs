// SPDX-License-Identifier: PMPL-1.0-or-later

//! Translation coverage per catalog and per context

use crate::i18n::{language_name, LanguageTag};
use crate::ts;
use crate::types::{Catalog, Message};
use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Message tallies. `finished` counts usable translations only; a finished
/// entry with no text is counted as unfinished.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    pub total: usize,
    pub finished: usize,
    pub unfinished: usize,
    /// Obsolete and vanished entries
    pub obsolete: usize,
    pub numerus: usize,
}

impl Counts {
    fn add(&mut self, message: &Message) {
        self.total += 1;
        if message.numerus {
            self.numerus += 1;
        }
        if !message.translation.state.is_active() {
            self.obsolete += 1;
        } else if message.is_usable() {
            self.finished += 1;
        } else {
            self.unfinished += 1;
        }
    }

    fn merge(&mut self, other: &Counts) {
        self.total += other.total;
        self.finished += other.finished;
        self.unfinished += other.unfinished;
        self.obsolete += other.obsolete;
        self.numerus += other.numerus;
    }

    /// Messages still present in the sources
    pub fn active(&self) -> usize {
        self.finished + self.unfinished
    }

    /// Percentage of active messages with a usable translation. A catalog
    /// with nothing to translate is complete.
    pub fn completion(&self) -> f64 {
        let active = self.active();
        if active == 0 {
            100.0
        } else {
            self.finished as f64 * 100.0 / active as f64
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextStats {
    pub name: String,
    pub counts: Counts,
    pub completion: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogStats {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_name: Option<String>,
    pub version: String,
    /// blake3 of the raw file bytes, when loaded from disk
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
    pub contexts: usize,
    pub counts: Counts,
    pub completion: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub by_context: Vec<ContextStats>,
}

pub fn collect(catalog: &Catalog) -> CatalogStats {
    let mut counts = Counts::default();
    let by_context: Vec<ContextStats> = catalog
        .contexts
        .iter()
        .map(|ctx| {
            let mut ctx_counts = Counts::default();
            for message in &ctx.messages {
                ctx_counts.add(message);
            }
            counts.merge(&ctx_counts);
            ContextStats {
                name: ctx.name.clone(),
                counts: ctx_counts,
                completion: ctx_counts.completion(),
            }
        })
        .collect();

    let display_name = catalog
        .language
        .as_deref()
        .and_then(LanguageTag::parse)
        .and_then(|tag| language_name(&tag.language))
        .map(str::to_string);

    CatalogStats {
        path: None,
        language: catalog.language.clone(),
        language_name: display_name,
        version: catalog.version.clone(),
        fingerprint: None,
        contexts: catalog.contexts.len(),
        counts,
        completion: counts.completion(),
        by_context,
    }
}

/// Load `path` and collect its statistics, fingerprinting the raw bytes
pub fn collect_file(path: &Path) -> Result<CatalogStats> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let catalog =
        ts::from_bytes(&bytes).with_context(|| format!("parsing {}", path.display()))?;
    let mut stats = collect(&catalog);
    stats.path = Some(path.to_path_buf());
    stats.fingerprint = Some(blake3::hash(&bytes).to_hex().to_string());
    Ok(stats)
}

impl CatalogStats {
    /// Drop the per-context breakdown
    pub fn summary_only(mut self) -> Self {
        self.by_context.clear();
        self
    }

    /// Contexts ordered from least to most complete
    pub fn weakest_contexts(&self, limit: usize) -> Vec<&ContextStats> {
        let mut contexts: Vec<&ContextStats> = self
            .by_context
            .iter()
            .filter(|ctx| ctx.counts.active() > 0)
            .collect();
        contexts.sort_by(|a, b| {
            a.completion
                .partial_cmp(&b.completion)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.name.cmp(&b.name))
        });
        contexts.truncate(limit);
        contexts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Translation, TranslationState};

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new(Some("fr".into()));
        catalog.push("A", Message::new("one", Translation::finished("un")));
        catalog.push("A", Message::new("two", Translation::unfinished()));
        catalog.push("A", Message::new("blank", Translation::finished("")));
        catalog.push(
            "B",
            Message::new(
                "gone",
                Translation {
                    state: TranslationState::Obsolete,
                    ..Translation::finished("parti")
                },
            ),
        );
        let mut numerus = Message::new(
            "%n coins",
            Translation::plural(TranslationState::Finished, vec!["%n pièce".into(), "%n pièces".into()]),
        );
        numerus.numerus = true;
        catalog.push("B", numerus);
        catalog
    }

    #[test]
    fn counts_by_state() {
        let stats = collect(&catalog());
        assert_eq!(stats.contexts, 2);
        assert_eq!(
            stats.counts,
            Counts {
                total: 5,
                finished: 2,
                unfinished: 2,
                obsolete: 1,
                numerus: 1,
            }
        );
        assert!((stats.completion - 50.0).abs() < f64::EPSILON);
        assert_eq!(stats.language_name.as_deref(), Some("French"));
    }

    #[test]
    fn per_context_breakdown() {
        let stats = collect(&catalog());
        let a = &stats.by_context[0];
        assert_eq!(a.name, "A");
        assert_eq!(a.counts.finished, 1);
        assert_eq!(a.counts.unfinished, 2);
        let b = &stats.by_context[1];
        assert!((b.completion - 100.0).abs() < f64::EPSILON);
        assert_eq!(stats.weakest_contexts(1)[0].name, "A");
    }

    #[test]
    fn empty_catalog_is_complete() {
        let stats = collect(&Catalog::new(None));
        assert_eq!(stats.counts.total, 0);
        assert!((stats.completion - 100.0).abs() < f64::EPSILON);
        assert!(stats.summary_only().by_context.is_empty());
    }
}
