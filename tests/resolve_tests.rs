// SPDX-License-Identifier: PMPL-1.0-or-later

//! Lookup behaviour against the shipped French and Ukrainian catalogs

use pretty_assertions::assert_eq;
use ts_catalog::resolve::{Resolver, Translator};
use ts_catalog::ts;
use ts_catalog::types::{Catalog, TranslationState};

fn fixture(name: &str) -> Catalog {
    let path = format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name);
    ts::load(std::path::Path::new(&path)).expect("fixture should load")
}

#[test]
fn test_reference_differs_per_language() {
    let fr = fixture("lang_fr.ts");
    let uk = fixture("lang_uk.ts");
    let fr = Resolver::new(&fr);
    let uk = Resolver::new(&uk);

    assert_eq!(fr.translate("AllReferenceDialog", "Reference"), "Référence ");
    assert_eq!(uk.translate("AllReferenceDialog", "Reference"), "Довідники");
    assert_eq!(uk.translate("MainSettingsPage", "Reference"), "Довідник");
    assert_eq!(fr.translate("MainSettingsPage", "Reference"), "Référence");
}

#[test]
fn test_unfinished_returns_source() {
    let fr = fixture("lang_fr.ts");
    let uk = fixture("lang_uk.ts");

    assert_eq!(Resolver::new(&fr).translate("YearEdit", "BC"), "BC");
    assert_eq!(Resolver::new(&uk).translate("YearEdit", "BC"), "До н. е.");
}

#[test]
fn test_unknown_keys_return_source() {
    let fr = fixture("lang_fr.ts");
    let resolver = Resolver::new(&fr);

    assert_eq!(resolver.translate("NoSuchContext", "Reference"), "Reference");
    assert_eq!(resolver.translate("YearEdit", "Not in catalog"), "Not in catalog");
    assert_eq!(resolver.translate("", ""), "");
}

#[test]
fn test_entities_are_decoded() {
    let fr = fixture("lang_fr.ts");
    assert_eq!(Resolver::new(&fr).translate("MainWindow", "E&xit"), "S&ortir");
}

#[test]
fn test_every_finished_message_resolves_to_its_text() {
    for name in ["lang_fr.ts", "lang_uk.ts"] {
        let catalog = fixture(name);
        let resolver = Resolver::new(&catalog);
        let mut checked = 0;
        for (context, message) in catalog.messages() {
            let expected = if message.is_usable() && !message.numerus {
                message.translation.primary()
            } else {
                message.source.as_str()
            };
            let found = resolver.translate_with(
                &context.name,
                &message.source,
                message.comment.as_deref(),
                None,
            );
            assert_eq!(found, expected, "{} {}::{:?}", name, context.name, message.source);
            checked += 1;
        }
        assert_eq!(checked, catalog.message_count());
    }
}

#[test]
fn test_unfinished_plural_falls_back_with_count() {
    let uk = fixture("lang_uk.ts");
    let resolver = Resolver::new(&uk);
    let message = resolver
        .lookup("BaseTableView", "%n coin(s) selected", None)
        .expect("numerus message present");
    assert!(message.numerus);
    assert_eq!(message.translation.state, TranslationState::Unfinished);
    assert_eq!(
        resolver.translate_with("BaseTableView", "%n coin(s) selected", None, Some(3)),
        "3 coin(s) selected"
    );
}

#[test]
fn test_translator_falls_back_to_next_catalog() {
    let fr = fixture("lang_fr.ts");
    let uk = fixture("lang_uk.ts");
    let mut translator = Translator::new();
    translator.install(&uk);
    translator.install(&fr);

    assert_eq!(translator.languages(), vec!["fr", "uk"]);
    assert_eq!(translator.translate("AllReferenceDialog", "Reference"), "Référence ");
    assert_eq!(translator.translate("YearEdit", "BC"), "До н. е.");

    assert!(translator.remove("fr"));
    assert_eq!(translator.translate("AllReferenceDialog", "Reference"), "Довідники");
    assert!(!translator.remove("fr"));
}

#[test]
fn test_crlf_checkout_resolves_like_lf() {
    let path = format!("{}/tests/fixtures/lang_fr.ts", env!("CARGO_MANIFEST_DIR"));
    let lf_text = std::fs::read_to_string(&path).unwrap();
    let crlf_text = lf_text.replace('\n', "\r\n");

    let lf = ts::from_str(&lf_text).unwrap();
    let crlf = ts::from_str(&crlf_text).unwrap();
    assert_eq!(crlf, lf);

    let resolver = Resolver::new(&crlf);
    assert_eq!(
        resolver.translate("Reference", "Can't open reference:\n%s\nCreated new one"),
        "Impossible d'ouvrir la référence\n%s\nCréation d'une nouvelle"
    );
    assert_eq!(
        resolver.translate("TabView", "Can't close latest opened page.\nAdd a new one first."),
        "Impossible de fermer la dernière page ouverte. En ajouter une nouvelle d'abord."
    );
}
