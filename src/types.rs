// SPDX-License-Identifier: PMPL-1.0-or-later

//! Core type definitions for translation catalogs
//!
//! A [`Catalog`] mirrors one Qt Linguist `.ts` document: a target language,
//! a format version and an ordered list of [`Context`]s, each holding the
//! [`Message`]s of one UI component. Document order is kept everywhere so a
//! catalog can be written back out unchanged.

use serde::{Deserialize, Serialize};

/// One translation source document for a single target language
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_language: Option<String>,
    pub contexts: Vec<Context>,
}

impl Catalog {
    pub fn new(language: Option<String>) -> Self {
        Self {
            version: "2.1".to_string(),
            language,
            source_language: None,
            contexts: Vec::new(),
        }
    }

    pub fn context(&self, name: &str) -> Option<&Context> {
        self.contexts.iter().find(|ctx| ctx.name == name)
    }

    /// Total number of messages across every context
    pub fn message_count(&self) -> usize {
        self.contexts.iter().map(|ctx| ctx.messages.len()).sum()
    }

    /// Iterate `(context, message)` pairs in document order
    pub fn messages(&self) -> impl Iterator<Item = (&Context, &Message)> {
        self.contexts
            .iter()
            .flat_map(|ctx| ctx.messages.iter().map(move |msg| (ctx, msg)))
    }

    /// Append a message, creating the context on first use
    pub fn push(&mut self, context: &str, message: Message) {
        match self.contexts.iter_mut().find(|ctx| ctx.name == context) {
            Some(ctx) => ctx.messages.push(message),
            None => {
                let mut ctx = Context::new(context);
                ctx.messages.push(message);
                self.contexts.push(ctx);
            }
        }
    }
}

/// Messages grouped by the UI component they originate from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub messages: Vec<Message>,
}

impl Context {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            comment: None,
            messages: Vec::new(),
        }
    }
}

/// One translatable unit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub source: String,
    /// Disambiguation text; part of the lookup key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translator_comment: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub numerus: bool,
    pub translation: Translation,
}

impl Message {
    pub fn new(source: impl Into<String>, translation: Translation) -> Self {
        Self {
            source: source.into(),
            translation,
            ..Default::default()
        }
    }

    pub fn with_location(mut self, filename: &str, line: u32) -> Self {
        self.locations.push(Location {
            filename: Some(filename.to_string()),
            line: Some(line.to_string()),
        });
        self
    }

    /// Empty disambiguation is the same as none
    pub fn disambiguation(&self) -> &str {
        self.comment.as_deref().unwrap_or("")
    }

    /// Finished and carrying text for at least one form
    pub fn is_usable(&self) -> bool {
        self.translation.state == TranslationState::Finished && !self.translation.is_empty()
    }
}

/// Where a message was extracted from. Both fields are kept verbatim since
/// lupdate may write relative lines such as `+3`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<String>,
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.filename, &self.line) {
            (Some(file), Some(line)) => write!(f, "{}:{}", file, line),
            (Some(file), None) => write!(f, "{}", file),
            (None, Some(line)) => write!(f, "line {}", line),
            (None, None) => write!(f, "<unknown>"),
        }
    }
}

/// Value of the `type` attribute on `<translation>`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationState {
    #[default]
    Finished,
    Unfinished,
    Obsolete,
    Vanished,
}

impl TranslationState {
    /// Attribute value as written in the file; `None` for finished
    pub fn attribute(&self) -> Option<&'static str> {
        match self {
            TranslationState::Finished => None,
            TranslationState::Unfinished => Some("unfinished"),
            TranslationState::Obsolete => Some("obsolete"),
            TranslationState::Vanished => Some("vanished"),
        }
    }

    pub fn from_attribute(value: &str) -> Option<Self> {
        match value {
            "unfinished" => Some(TranslationState::Unfinished),
            "obsolete" => Some(TranslationState::Obsolete),
            "vanished" => Some(TranslationState::Vanished),
            _ => None,
        }
    }

    /// Obsolete and vanished entries no longer exist in the sources
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            TranslationState::Finished | TranslationState::Unfinished
        )
    }
}

/// Translated payload of a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TranslationText {
    Single(String),
    /// One entry per `<numerusform>`, in plural-form order
    Plural(Vec<String>),
}

impl Default for TranslationText {
    fn default() -> Self {
        TranslationText::Single(String::new())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub state: TranslationState,
    pub text: TranslationText,
}

impl Translation {
    pub fn finished(text: impl Into<String>) -> Self {
        Self {
            state: TranslationState::Finished,
            text: TranslationText::Single(text.into()),
        }
    }

    pub fn unfinished() -> Self {
        Self {
            state: TranslationState::Unfinished,
            text: TranslationText::default(),
        }
    }

    pub fn plural(state: TranslationState, forms: Vec<String>) -> Self {
        Self {
            state,
            text: TranslationText::Plural(forms),
        }
    }

    /// True when no form carries any text
    pub fn is_empty(&self) -> bool {
        match &self.text {
            TranslationText::Single(text) => text.is_empty(),
            TranslationText::Plural(forms) => forms.iter().all(String::is_empty),
        }
    }

    /// The singular text, or the first form of a plural payload
    pub fn primary(&self) -> &str {
        match &self.text {
            TranslationText::Single(text) => text,
            TranslationText::Plural(forms) => forms.first().map(String::as_str).unwrap_or(""),
        }
    }

    /// Text for plural form `index`, clamped to the last available form
    pub fn form(&self, index: usize) -> &str {
        match &self.text {
            TranslationText::Single(text) => text,
            TranslationText::Plural(forms) => {
                let clamped = index.min(forms.len().saturating_sub(1));
                forms.get(clamped).map(String::as_str).unwrap_or("")
            }
        }
    }

    pub fn form_count(&self) -> usize {
        match &self.text {
            TranslationText::Single(_) => 1,
            TranslationText::Plural(forms) => forms.len(),
        }
    }
}
