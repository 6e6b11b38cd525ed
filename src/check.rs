// SPDX-License-Identifier: PMPL-1.0-or-later

//! Consistency checks over a loaded catalog
//!
//! Each rule inspects messages in isolation (plus the per-context duplicate
//! scan) and produces [`Finding`]s. Unfinished messages are only checked for
//! duplication: their text is expected to be incomplete.

use crate::i18n::{LanguageTag, PluralRule};
use crate::types::{Catalog, Context, Message, TranslationState, TranslationText};
use chrono::Utc;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::sync::OnceLock;

static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "INFO"),
            Severity::Warning => write!(f, "WARN"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    DuplicateMessage,
    PlaceholderMismatch,
    WhitespaceMismatch,
    NumerusFormCount,
    EmptyFinished,
    UnknownLanguage,
}

impl FindingKind {
    pub fn severity(&self) -> Severity {
        match self {
            FindingKind::DuplicateMessage => Severity::Info,
            FindingKind::WhitespaceMismatch
            | FindingKind::NumerusFormCount
            | FindingKind::UnknownLanguage => Severity::Warning,
            FindingKind::PlaceholderMismatch | FindingKind::EmptyFinished => Severity::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub kind: FindingKind,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub detail: String,
}

impl Finding {
    fn catalog(kind: FindingKind, detail: String) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            context: None,
            source: None,
            location: None,
            detail,
        }
    }

    fn message(kind: FindingKind, context: &Context, message: &Message, detail: String) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            context: Some(context.name.clone()),
            source: Some(message.source.clone()),
            location: message.locations.first().map(|loc| loc.to_string()),
            detail,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub messages_checked: usize,
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
    pub findings: Vec<Finding>,
}

impl CheckReport {
    /// Whether the catalog should fail a check run
    pub fn fails(&self, strict: bool) -> bool {
        self.errors > 0 || (strict && self.warnings > 0)
    }

    pub fn of_kind(&self, kind: FindingKind) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.kind == kind)
    }
}

pub fn run(catalog: &Catalog) -> CheckReport {
    let tag = catalog.language.as_deref().and_then(LanguageTag::parse);
    let rule = tag
        .as_ref()
        .map(LanguageTag::plural_rule)
        .unwrap_or(PluralRule::OneOther);

    let mut findings = Vec::new();
    match (&catalog.language, &tag) {
        (Some(code), Some(tag)) if !tag.is_valid() => findings.push(Finding::catalog(
            FindingKind::UnknownLanguage,
            format!("\"{}\" is not an ISO 639-1 language code", code),
        )),
        (Some(code), None) => findings.push(Finding::catalog(
            FindingKind::UnknownLanguage,
            format!("\"{}\" is not a language tag", code),
        )),
        _ => {}
    }

    for context in &catalog.contexts {
        check_duplicates(context, &mut findings);
        for message in &context.messages {
            check_message(context, message, rule, &mut findings);
        }
    }

    let count = |severity| findings.iter().filter(|f| f.severity == severity).count();
    let (errors, warnings, infos) = (
        count(Severity::Error),
        count(Severity::Warning),
        count(Severity::Info),
    );
    let report = CheckReport {
        created_at: Utc::now().to_rfc3339(),
        language: catalog.language.clone(),
        messages_checked: catalog.message_count(),
        errors,
        warnings,
        infos,
        findings,
    };
    tracing::info!(
        errors = report.errors,
        warnings = report.warnings,
        infos = report.infos,
        "catalog checked"
    );
    report
}

fn check_duplicates(context: &Context, findings: &mut Vec<Finding>) {
    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    for message in &context.messages {
        if !seen.insert((message.source.as_str(), message.disambiguation())) {
            findings.push(Finding::message(
                FindingKind::DuplicateMessage,
                context,
                message,
                "same source and disambiguation already appear in this context".to_string(),
            ));
        }
    }
}

fn check_message(
    context: &Context,
    message: &Message,
    rule: PluralRule,
    findings: &mut Vec<Finding>,
) {
    if message.translation.state != TranslationState::Finished {
        return;
    }

    if message.translation.is_empty() {
        if !message.source.is_empty() {
            findings.push(Finding::message(
                FindingKind::EmptyFinished,
                context,
                message,
                "marked finished but has no text".to_string(),
            ));
        }
        return;
    }

    let expected = placeholders(&message.source);
    match &message.translation.text {
        TranslationText::Single(text) => {
            let found = placeholders(text);
            if found != expected {
                findings.push(Finding::message(
                    FindingKind::PlaceholderMismatch,
                    context,
                    message,
                    format!("source uses {:?}, translation uses {:?}", expected, found),
                ));
            }
            if let Some(detail) = whitespace_difference(&message.source, text) {
                findings.push(Finding::message(
                    FindingKind::WhitespaceMismatch,
                    context,
                    message,
                    detail,
                ));
            }
        }
        TranslationText::Plural(forms) => {
            // A form may drop %n ("one coin"), but must not invent placeholders.
            for (index, form) in forms.iter().enumerate() {
                let extra: Vec<&str> = placeholders(form).difference(&expected).copied().collect();
                if !extra.is_empty() {
                    findings.push(Finding::message(
                        FindingKind::PlaceholderMismatch,
                        context,
                        message,
                        format!("form {} uses {:?} not present in source", index, extra),
                    ));
                }
            }
        }
    }

    if message.numerus {
        let forms = message.translation.form_count();
        if forms != rule.form_count() {
            findings.push(Finding::message(
                FindingKind::NumerusFormCount,
                context,
                message,
                format!(
                    "{} plural forms, {} rule expects {}",
                    forms,
                    rule,
                    rule.form_count()
                ),
            ));
        }
    }
}

/// `%1`..`%99` and `%n` / `%Ln` markers
fn placeholders(text: &str) -> BTreeSet<&str> {
    let re = PLACEHOLDER.get_or_init(|| Regex::new(r"%(?:L?n|\d{1,2})").expect("valid regex"));
    re.find_iter(text)
        .map(|m| m.as_str().trim_start_matches("%L").trim_start_matches('%'))
        .collect()
}

fn whitespace_difference(source: &str, translation: &str) -> Option<String> {
    let lead = |s: &str| s.len() - s.trim_start().len();
    let trail = |s: &str| s.len() - s.trim_end().len();

    let source_lead = &source[..lead(source)];
    let source_trail = &source[source.len() - trail(source)..];
    let text_lead = &translation[..lead(translation)];
    let text_trail = &translation[translation.len() - trail(translation)..];

    if source_lead != text_lead {
        Some(format!(
            "leading whitespace {:?} in source, {:?} in translation",
            source_lead, text_lead
        ))
    } else if source_trail != text_trail {
        Some(format!(
            "trailing whitespace {:?} in source, {:?} in translation",
            source_trail, text_trail
        ))
    } else {
        None
    }
}
