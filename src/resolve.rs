// SPDX-License-Identifier: PMPL-1.0-or-later

//! Translation lookup with source-string fallback
//!
//! Resolution never fails. A message that is missing, unfinished, obsolete
//! or has an empty chosen form yields the source text, so callers can pass
//! every UI string through unconditionally:
//!
//! ```
//! use ts_catalog::resolve::Resolver;
//! use ts_catalog::types::{Catalog, Message, Translation};
//!
//! let mut catalog = Catalog::new(Some("uk".into()));
//! catalog.push("YearEdit", Message::new("BC", Translation::finished("До н. е.")));
//! let resolver = Resolver::new(&catalog);
//!
//! assert_eq!(resolver.translate("YearEdit", "BC"), "До н. е.");
//! assert_eq!(resolver.translate("YearEdit", "AD"), "AD");
//! ```

use crate::i18n::{LanguageTag, PluralRule};
use crate::types::{Catalog, Message, TranslationState};
use std::borrow::Cow;
use std::collections::HashMap;

/// `(context, source, disambiguation)`
type Key<'c> = (&'c str, &'c str, &'c str);

/// Index over a single catalog
#[derive(Debug, Clone)]
pub struct Resolver<'c> {
    catalog: &'c Catalog,
    rule: PluralRule,
    index: HashMap<Key<'c>, &'c Message>,
}

impl<'c> Resolver<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        let rule = catalog
            .language
            .as_deref()
            .and_then(LanguageTag::parse)
            .map(|tag| tag.plural_rule())
            .unwrap_or(PluralRule::OneOther);

        let mut index: HashMap<Key<'c>, &'c Message> =
            HashMap::with_capacity(catalog.message_count());
        let mut duplicates = 0usize;
        for (context, message) in catalog.messages() {
            let key = (
                context.name.as_str(),
                message.source.as_str(),
                message.disambiguation(),
            );
            match index.get(&key).copied() {
                None => {
                    index.insert(key, message);
                }
                Some(existing) => {
                    duplicates += 1;
                    // First usable occurrence wins.
                    if !existing.is_usable() && message.is_usable() {
                        index.insert(key, message);
                    }
                }
            }
        }

        tracing::debug!(
            language = catalog.language.as_deref().unwrap_or("-"),
            rule = %rule,
            entries = index.len(),
            duplicates,
            "built resolver index"
        );

        Self {
            catalog,
            rule,
            index,
        }
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    pub fn language(&self) -> Option<&'c str> {
        self.catalog.language.as_deref()
    }

    pub fn plural_rule(&self) -> PluralRule {
        self.rule
    }

    /// Distinct `(context, source, disambiguation)` keys
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Raw record for a key. A disambiguation that matches nothing retries
    /// without one.
    pub fn lookup(
        &self,
        context: &str,
        source: &str,
        disambiguation: Option<&str>,
    ) -> Option<&'c Message> {
        let comment = disambiguation.unwrap_or("");
        self.entry((context, source, comment)).or_else(|| {
            if comment.is_empty() {
                None
            } else {
                self.entry((context, source, ""))
            }
        })
    }

    fn entry(&self, key: Key<'_>) -> Option<&'c Message> {
        // Keys borrow the catalog; narrow them to the query's lifetime.
        let index: &HashMap<Key<'_>, &'c Message> = &self.index;
        index.get(&key).copied()
    }

    /// Finished, non-empty text for a key, before `%n` substitution
    pub fn find(
        &self,
        context: &str,
        source: &str,
        disambiguation: Option<&str>,
        n: Option<i64>,
    ) -> Option<&'c str> {
        let message = self.lookup(context, source, disambiguation)?;
        if message.translation.state != TranslationState::Finished {
            return None;
        }
        let text = match n {
            Some(n) if message.numerus => message.translation.form(self.rule.form_index(n)),
            _ => message.translation.primary(),
        };
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    pub fn translate<'q>(&'q self, context: &str, source: &'q str) -> Cow<'q, str> {
        self.translate_with(context, source, None, None)
    }

    /// Full lookup: disambiguation, plural count, `%n` substitution
    pub fn translate_with<'q>(
        &'q self,
        context: &str,
        source: &'q str,
        disambiguation: Option<&str>,
        n: Option<i64>,
    ) -> Cow<'q, str> {
        let text = self
            .find(context, source, disambiguation, n)
            .unwrap_or(source);
        substitute_count(text, n)
    }
}

/// Replace `%n` with the count, when one was given
pub fn substitute_count(text: &str, n: Option<i64>) -> Cow<'_, str> {
    match n {
        Some(n) if text.contains("%n") => Cow::Owned(text.replace("%n", &n.to_string())),
        _ => Cow::Borrowed(text),
    }
}

/// Stack of installed catalogs; the most recently installed is asked first
#[derive(Debug, Clone, Default)]
pub struct Translator<'c> {
    resolvers: Vec<Resolver<'c>>,
}

impl<'c> Translator<'c> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn install(&mut self, catalog: &'c Catalog) {
        tracing::info!(
            language = catalog.language.as_deref().unwrap_or("-"),
            messages = catalog.message_count(),
            "installing catalog"
        );
        self.resolvers.insert(0, Resolver::new(catalog));
    }

    /// Remove every catalog for `language`; returns whether any was removed
    pub fn remove(&mut self, language: &str) -> bool {
        let before = self.resolvers.len();
        self.resolvers
            .retain(|resolver| resolver.language() != Some(language));
        before != self.resolvers.len()
    }

    /// Installed languages in lookup order
    pub fn languages(&self) -> Vec<&'c str> {
        self.resolvers
            .iter()
            .filter_map(|resolver| resolver.language())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }

    pub fn translate<'q>(&'q self, context: &str, source: &'q str) -> Cow<'q, str> {
        self.translate_with(context, source, None, None)
    }

    pub fn translate_with<'q>(
        &'q self,
        context: &str,
        source: &'q str,
        disambiguation: Option<&str>,
        n: Option<i64>,
    ) -> Cow<'q, str> {
        let text = self
            .resolvers
            .iter()
            .find_map(|resolver| resolver.find(context, source, disambiguation, n))
            .unwrap_or(source);
        substitute_count(text, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Translation, TranslationState};

    fn french() -> Catalog {
        let mut catalog = Catalog::new(Some("fr".into()));
        catalog.push(
            "AllReferenceDialog",
            Message::new("Reference", Translation::finished("Référence ")),
        );
        catalog.push("YearEdit", Message::new("BC", Translation::unfinished()));
        let mut selected = Message::new(
            "%n coin(s) selected",
            Translation::plural(
                TranslationState::Finished,
                vec!["%n pièce sélectionnée".into(), "%n pièces sélectionnées".into()],
            ),
        );
        selected.numerus = true;
        catalog.push("ListView", selected);
        let mut remove = Message::new(
            "Are you sure to remove a %n coin(s)?",
            Translation::plural(TranslationState::Unfinished, vec![String::new(); 2]),
        );
        remove.numerus = true;
        catalog.push("ListView", remove);
        let mut open = Message::new("Open", Translation::finished("Ouvrir"));
        open.comment = Some("verb".into());
        catalog.push("MainWindow", open);
        catalog
    }

    #[test]
    fn finished_translation_is_returned() {
        let catalog = french();
        let resolver = Resolver::new(&catalog);
        assert_eq!(resolver.translate("AllReferenceDialog", "Reference"), "Référence ");
    }

    #[test]
    fn unfinished_and_absent_fall_back() {
        let catalog = french();
        let resolver = Resolver::new(&catalog);
        assert_eq!(resolver.translate("YearEdit", "BC"), "BC");
        assert_eq!(resolver.translate("YearEdit", "AD"), "AD");
        assert_eq!(resolver.translate("NoSuchContext", "Reference"), "Reference");
    }

    #[test]
    fn plural_form_follows_language_rule() {
        let catalog = french();
        let resolver = Resolver::new(&catalog);
        let pick = |n| {
            resolver
                .translate_with("ListView", "%n coin(s) selected", None, Some(n))
                .into_owned()
        };
        assert_eq!(pick(0), "0 pièce sélectionnée");
        assert_eq!(pick(1), "1 pièce sélectionnée");
        assert_eq!(pick(3), "3 pièces sélectionnées");
    }

    #[test]
    fn empty_plural_forms_fall_back_with_count() {
        let catalog = french();
        let resolver = Resolver::new(&catalog);
        assert_eq!(
            resolver.translate_with("ListView", "Are you sure to remove a %n coin(s)?", None, Some(4)),
            "Are you sure to remove a 4 coin(s)?"
        );
    }

    #[test]
    fn disambiguation_retries_without_comment() {
        let mut catalog = french();
        catalog.push("MainWindow", Message::new("Close", Translation::finished("Fermer")));
        let resolver = Resolver::new(&catalog);
        assert_eq!(
            resolver.translate_with("MainWindow", "Open", Some("verb"), None),
            "Ouvrir"
        );
        assert_eq!(
            resolver.translate_with("MainWindow", "Close", Some("window"), None),
            "Fermer"
        );
        // A disambiguated entry is not reachable without its comment.
        assert_eq!(resolver.translate("MainWindow", "Open"), "Open");
    }

    #[test]
    fn first_usable_duplicate_wins() {
        let mut catalog = Catalog::new(Some("uk".into()));
        catalog.push("Settings", Message::new("Reference", Translation::unfinished()));
        catalog.push("Settings", Message::new("Reference", Translation::finished("Довідник")));
        catalog.push("Settings", Message::new("Reference", Translation::finished("Інше")));
        let resolver = Resolver::new(&catalog);
        assert_eq!(resolver.len(), 1);
        assert_eq!(resolver.translate("Settings", "Reference"), "Довідник");
    }

    #[test]
    fn translator_prefers_latest_install() {
        let fr = french();
        let mut uk = Catalog::new(Some("uk".into()));
        uk.push("YearEdit", Message::new("BC", Translation::finished("До н. е.")));
        uk.push(
            "AllReferenceDialog",
            Message::new("Reference", Translation::finished("Довідники")),
        );

        let mut translator = Translator::new();
        translator.install(&uk);
        translator.install(&fr);
        assert_eq!(translator.languages(), vec!["fr", "uk"]);

        assert_eq!(translator.translate("AllReferenceDialog", "Reference"), "Référence ");
        // fr is unfinished here, so the uk catalog behind it answers.
        assert_eq!(translator.translate("YearEdit", "BC"), "До н. е.");
        assert_eq!(translator.translate("YearEdit", "AD"), "AD");

        assert!(translator.remove("fr"));
        assert!(!translator.remove("fr"));
        assert_eq!(translator.translate("AllReferenceDialog", "Reference"), "Довідники");
    }

    #[test]
    fn empty_translator_returns_source() {
        let translator = Translator::new();
        assert!(translator.is_empty());
        assert_eq!(
            translator.translate_with("ListView", "%n coin(s) selected", None, Some(2)),
            "2 coin(s) selected"
        );
    }
}
