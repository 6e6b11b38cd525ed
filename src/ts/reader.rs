// SPDX-License-Identifier: PMPL-1.0-or-later

//! Pull parser for Qt Linguist `.ts` documents
//!
//! Walks quick-xml events and builds a [`Catalog`] directly, without an
//! intermediate DOM. Elements the catalog has no use for (`defaultcodec`,
//! `dependencies`, `oldsource`, `userdata`, `extra-*` ...) are skipped as
//! whole subtrees so unknown extensions never fail a load.

use super::error::{TsError, TsResult};
use crate::types::{
    Catalog, Context, Location, Message, Translation, TranslationState, TranslationText,
};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

pub(crate) struct Parser<'a> {
    reader: Reader<&'a [u8]>,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        let mut reader = Reader::from_str(text);
        // Leading and trailing spaces inside <source>/<translation> are content.
        reader.trim_text(false);
        Self { reader }
    }

    fn position(&self) -> usize {
        self.reader.buffer_position()
    }

    fn xml_error(&self, source: quick_xml::Error) -> TsError {
        TsError::Xml {
            position: self.position(),
            source,
        }
    }

    fn next(&mut self) -> TsResult<Event<'a>> {
        match self.reader.read_event() {
            Ok(event) => Ok(event),
            Err(err) => Err(self.xml_error(err)),
        }
    }

    fn unexpected_eof(&self, inside: &str) -> TsError {
        self.xml_error(quick_xml::Error::UnexpectedEof(inside.to_string()))
    }

    fn attribute(&self, start: &BytesStart<'_>, key: &[u8]) -> TsResult<Option<String>> {
        for attr in start.attributes() {
            let attr = attr.map_err(|err| self.xml_error(err.into()))?;
            if attr.key.as_ref() == key {
                let value = attr.unescape_value().map_err(|err| self.xml_error(err))?;
                return Ok(Some(value.into_owned()));
            }
        }
        Ok(None)
    }

    pub(crate) fn document(mut self) -> TsResult<Catalog> {
        loop {
            match self.next()? {
                Event::Start(start) if start.name().as_ref() == b"TS" => {
                    let mut catalog = self.catalog_header(&start)?;
                    self.catalog_body(&mut catalog)?;
                    return Ok(catalog);
                }
                Event::Empty(start) if start.name().as_ref() == b"TS" => {
                    return self.catalog_header(&start);
                }
                Event::Start(other) | Event::Empty(other) => {
                    return Err(TsError::UnexpectedRoot(
                        String::from_utf8_lossy(other.name().as_ref()).into_owned(),
                    ));
                }
                Event::Eof => return Err(TsError::MissingRoot),
                _ => {}
            }
        }
    }

    fn catalog_header(&self, start: &BytesStart<'_>) -> TsResult<Catalog> {
        Ok(Catalog {
            version: self.attribute(start, b"version")?.unwrap_or_default(),
            language: self.attribute(start, b"language")?,
            source_language: self.attribute(start, b"sourcelanguage")?,
            contexts: Vec::new(),
        })
    }

    fn catalog_body(&mut self, catalog: &mut Catalog) -> TsResult<()> {
        loop {
            match self.next()? {
                Event::Start(start) if start.name().as_ref() == b"context" => {
                    let context = self.context()?;
                    catalog.contexts.push(context);
                }
                Event::Start(_) => self.skip()?,
                Event::End(_) => return Ok(()),
                Event::Eof => return Err(self.unexpected_eof("TS")),
                _ => {}
            }
        }
    }

    fn context(&mut self) -> TsResult<Context> {
        let opened_at = self.position();
        let mut name = None;
        let mut comment = None;
        let mut messages = Vec::new();

        loop {
            match self.next()? {
                Event::Start(start) => match start.name().as_ref() {
                    b"name" => name = Some(self.text()?),
                    b"comment" => comment = Some(self.text()?),
                    b"message" => messages.push(self.message(&start)?),
                    _ => self.skip()?,
                },
                Event::Empty(start) => match start.name().as_ref() {
                    b"name" => name = Some(String::new()),
                    b"comment" => comment = Some(String::new()),
                    _ => {}
                },
                Event::End(_) => break,
                Event::Eof => return Err(self.unexpected_eof("context")),
                _ => {}
            }
        }

        let name = name.ok_or(TsError::MissingElement {
            element: "name",
            parent: "context",
            position: opened_at,
        })?;
        Ok(Context {
            name,
            comment,
            messages,
        })
    }

    fn message(&mut self, start: &BytesStart<'_>) -> TsResult<Message> {
        let opened_at = self.position();
        let id = self.attribute(start, b"id")?;
        let numerus = matches!(
            self.attribute(start, b"numerus")?.as_deref(),
            Some("yes") | Some("true")
        );

        let mut source = None;
        let mut message = Message {
            id,
            numerus,
            ..Default::default()
        };

        loop {
            match self.next()? {
                Event::Empty(child) => match child.name().as_ref() {
                    b"location" => message.locations.push(self.location(&child)?),
                    b"source" => source = Some(String::new()),
                    b"comment" => message.comment = Some(String::new()),
                    b"translation" => {
                        message.translation = self.empty_translation(&child, numerus)?
                    }
                    _ => {}
                },
                Event::Start(child) => match child.name().as_ref() {
                    b"location" => {
                        message.locations.push(self.location(&child)?);
                        self.skip()?;
                    }
                    b"source" => source = Some(self.text()?),
                    b"comment" => message.comment = Some(self.text()?),
                    b"extracomment" => message.extra_comment = Some(self.text()?),
                    b"translatorcomment" => message.translator_comment = Some(self.text()?),
                    b"translation" => message.translation = self.translation(&child, numerus)?,
                    _ => self.skip()?,
                },
                Event::End(_) => break,
                Event::Eof => return Err(self.unexpected_eof("message")),
                _ => {}
            }
        }

        message.source = source.ok_or(TsError::MissingElement {
            element: "source",
            parent: "message",
            position: opened_at,
        })?;
        Ok(message)
    }

    fn location(&self, start: &BytesStart<'_>) -> TsResult<Location> {
        Ok(Location {
            filename: self.attribute(start, b"filename")?,
            line: self.attribute(start, b"line")?,
        })
    }

    fn translation_state(&self, start: &BytesStart<'_>) -> TsResult<TranslationState> {
        match self.attribute(start, b"type")? {
            None => Ok(TranslationState::Finished),
            Some(value) => TranslationState::from_attribute(&value).ok_or_else(|| {
                TsError::UnknownTranslationType {
                    value,
                    position: self.position(),
                }
            }),
        }
    }

    fn empty_translation(&self, start: &BytesStart<'_>, numerus: bool) -> TsResult<Translation> {
        let state = self.translation_state(start)?;
        let text = if numerus {
            TranslationText::Plural(Vec::new())
        } else {
            TranslationText::default()
        };
        Ok(Translation { state, text })
    }

    fn translation(&mut self, start: &BytesStart<'_>, numerus: bool) -> TsResult<Translation> {
        let state = self.translation_state(start)?;
        let mut text = String::new();
        let mut variant: Option<String> = None;
        let mut forms: Vec<String> = Vec::new();

        loop {
            match self.next()? {
                // Text between <lengthvariant> siblings is layout, not content.
                Event::Text(_) | Event::CData(_) if variant.is_some() => {}
                Event::Text(chunk) => {
                    let chunk = chunk.unescape().map_err(|err| self.xml_error(err))?;
                    text.push_str(&chunk);
                }
                Event::CData(chunk) => text.push_str(&String::from_utf8_lossy(chunk.as_ref())),
                Event::Start(child) => match child.name().as_ref() {
                    b"numerusform" => forms.push(self.text()?),
                    // Only the first (longest) length variant is kept.
                    b"lengthvariant" => {
                        let kept = self.text()?;
                        if variant.is_none() {
                            variant = Some(kept);
                        }
                    }
                    _ => self.skip()?,
                },
                Event::Empty(child) => match child.name().as_ref() {
                    b"numerusform" => forms.push(String::new()),
                    b"byte" => text.push(self.byte(&child)?),
                    _ => {}
                },
                Event::End(_) => break,
                Event::Eof => return Err(self.unexpected_eof("translation")),
                _ => {}
            }
        }

        let text = variant.unwrap_or(text);
        let text = if !forms.is_empty() {
            TranslationText::Plural(forms)
        } else if numerus {
            // A plural message translated without <numerusform> keeps its
            // text as the only form.
            if text.trim().is_empty() {
                TranslationText::Plural(Vec::new())
            } else {
                TranslationText::Plural(vec![text])
            }
        } else {
            TranslationText::Single(text)
        };
        Ok(Translation { state, text })
    }

    /// Character content of the element just opened, up to its end tag
    fn text(&mut self) -> TsResult<String> {
        let mut out = String::new();
        let mut variant: Option<String> = None;
        loop {
            match self.next()? {
                Event::Text(_) | Event::CData(_) if variant.is_some() => {}
                Event::Text(chunk) => {
                    let chunk = chunk.unescape().map_err(|err| self.xml_error(err))?;
                    out.push_str(&chunk);
                }
                Event::CData(chunk) => out.push_str(&String::from_utf8_lossy(chunk.as_ref())),
                Event::Empty(child) if child.name().as_ref() == b"byte" => {
                    out.push(self.byte(&child)?)
                }
                Event::Start(child) if child.name().as_ref() == b"lengthvariant" => {
                    let kept = self.text()?;
                    if variant.is_none() {
                        variant = Some(kept);
                    }
                }
                Event::Start(_) => self.skip()?,
                Event::End(_) => return Ok(variant.unwrap_or(out)),
                Event::Eof => return Err(self.unexpected_eof("text")),
                _ => {}
            }
        }
    }

    /// `<byte value="x9"/>` carries a character XML cannot hold literally
    fn byte(&self, start: &BytesStart<'_>) -> TsResult<char> {
        let value = self
            .attribute(start, b"value")?
            .ok_or_else(|| TsError::InvalidByte(String::new()))?;
        decode_byte(&value).ok_or(TsError::InvalidByte(value))
    }

    /// Consume events up to the end tag of the element just opened
    fn skip(&mut self) -> TsResult<()> {
        let mut depth = 1usize;
        while depth > 0 {
            match self.next()? {
                Event::Start(_) => depth += 1,
                Event::End(_) => depth -= 1,
                Event::Eof => return Err(self.unexpected_eof("element")),
                _ => {}
            }
        }
        Ok(())
    }
}

pub(crate) fn decode_byte(value: &str) -> Option<char> {
    let (digits, radix) = if let Some(hex) = value.strip_prefix("0x") {
        (hex, 16)
    } else if let Some(hex) = value.strip_prefix('x') {
        (hex, 16)
    } else {
        (value, 10)
    };
    u32::from_str_radix(digits, radix)
        .ok()
        .and_then(char::from_u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> TsResult<Catalog> {
        Parser::new(text).document()
    }

    const SAMPLE: &str = r#"<?xml version="1.0" ?><!DOCTYPE TS><TS language="fr" version="2.0">
<context>
    <name>AllReferenceDialog</name>
    <message>
        <location filename="ReferenceDialog.py" line="363"/>
        <source>Reference</source>
        <translation>Référence </translation>
    </message>
    <message>
        <location filename="ReferenceDialog.py" line="395"/>
        <source>Something went wrong when saving. Please restart</source>
        <translation>Quelque chose s&apos;est mal passé</translation>
    </message>
</context>
<context>
    <name>ListView</name>
    <message numerus="yes">
        <location filename="ListView.py" line="156"/>
        <source>%n coin(s) selected</source>
        <translation type="unfinished"><numerusform></numerusform><numerusform></numerusform></translation>
    </message>
    <message>
        <source>E&amp;xit</source>
        <translation type="unfinished"/>
    </message>
</context>
</TS>"#;

    #[test]
    fn parses_header_and_contexts() {
        let catalog = parse(SAMPLE).expect("sample parses");
        assert_eq!(catalog.version, "2.0");
        assert_eq!(catalog.language.as_deref(), Some("fr"));
        assert_eq!(catalog.source_language, None);
        assert_eq!(catalog.contexts.len(), 2);
        assert_eq!(catalog.message_count(), 4);
    }

    #[test]
    fn keeps_significant_whitespace_and_entities() {
        let catalog = parse(SAMPLE).expect("sample parses");
        let ctx = catalog.context("AllReferenceDialog").expect("context exists");
        assert_eq!(ctx.messages[0].translation.primary(), "Référence ");
        assert_eq!(
            ctx.messages[1].translation.primary(),
            "Quelque chose s'est mal passé"
        );
        let exit = &catalog.context("ListView").expect("context").messages[1];
        assert_eq!(exit.source, "E&xit");
        assert_eq!(exit.translation.state, TranslationState::Unfinished);
    }

    #[test]
    fn numerus_forms_are_collected() {
        let catalog = parse(SAMPLE).expect("sample parses");
        let msg = &catalog.context("ListView").expect("context").messages[0];
        assert!(msg.numerus);
        assert_eq!(
            msg.translation.text,
            TranslationText::Plural(vec![String::new(), String::new()])
        );
        assert_eq!(msg.locations[0].line.as_deref(), Some("156"));
    }

    #[test]
    fn wrong_root_is_rejected() {
        let err = parse("<xliff version=\"1.2\"></xliff>").unwrap_err();
        assert!(matches!(err, TsError::UnexpectedRoot(name) if name == "xliff"));
    }

    #[test]
    fn empty_document_has_no_root() {
        assert!(matches!(
            parse("<?xml version=\"1.0\"?>").unwrap_err(),
            TsError::MissingRoot
        ));
    }

    #[test]
    fn context_without_name_fails() {
        let err = parse("<TS><context><message><source>a</source></message></context></TS>")
            .unwrap_err();
        assert!(matches!(
            err,
            TsError::MissingElement {
                element: "name",
                ..
            }
        ));
    }

    #[test]
    fn message_without_source_fails() {
        let err = parse("<TS><context><name>A</name><message><translation>x</translation></message></context></TS>")
            .unwrap_err();
        assert!(matches!(
            err,
            TsError::MissingElement {
                element: "source",
                ..
            }
        ));
    }

    #[test]
    fn unknown_translation_type_fails() {
        let err = parse(
            "<TS><context><name>A</name><message><source>a</source><translation type=\"draft\">b</translation></message></context></TS>",
        )
        .unwrap_err();
        assert!(matches!(err, TsError::UnknownTranslationType { value, .. } if value == "draft"));
    }

    #[test]
    fn mismatched_tags_are_malformed() {
        let err = parse("<TS><context><name>A</context></TS>").unwrap_err();
        assert!(matches!(err, TsError::Xml { .. }));
    }

    #[test]
    fn unknown_elements_are_skipped() {
        let text = "<TS version=\"2.1\"><defaultcodec>UTF-8</defaultcodec>\
            <context><name>A</name><message><source>a</source>\
            <oldsource>old</oldsource><userdata><x>1</x></userdata>\
            <extracomment>note</extracomment>\
            <translation>b</translation></message></context></TS>";
        let catalog = parse(text).expect("parses");
        let msg = &catalog.contexts[0].messages[0];
        assert_eq!(msg.extra_comment.as_deref(), Some("note"));
        assert_eq!(msg.translation.primary(), "b");
    }

    #[test]
    fn byte_elements_decode() {
        let text = "<TS><context><name>A</name><message><source>a<byte value=\"x9\"/>b</source>\
            <translation>c</translation></message></context></TS>";
        let catalog = parse(text).expect("parses");
        assert_eq!(catalog.contexts[0].messages[0].source, "a\tb");
        assert_eq!(decode_byte("10"), Some('\n'));
        assert_eq!(decode_byte("0x1b"), Some('\u{1b}'));
        assert_eq!(decode_byte("zz"), None);
    }

    #[test]
    fn length_variants_keep_first_without_layout() {
        let text = "<TS><context><name>A</name><message><source>Open file</source>
        <translation variants=\"yes\">
            <lengthvariant>Ouvrir le fichier</lengthvariant>
            <lengthvariant>Ouvrir</lengthvariant>
        </translation>
    </message></context></TS>";
        let catalog = parse(text).expect("parses");
        assert_eq!(
            catalog.contexts[0].messages[0].translation.text,
            TranslationText::Single("Ouvrir le fichier".to_string())
        );
    }

    #[test]
    fn numerus_form_length_variants() {
        let text = "<TS><context><name>A</name><message numerus=\"yes\"><source>%n files</source>
        <translation><numerusform variants=\"yes\">
            <lengthvariant>%n fichier</lengthvariant>
            <lengthvariant>%n f.</lengthvariant>
        </numerusform><numerusform>%n fichiers</numerusform></translation>
    </message></context></TS>";
        let catalog = parse(text).expect("parses");
        assert_eq!(
            catalog.contexts[0].messages[0].translation.text,
            TranslationText::Plural(vec!["%n fichier".to_string(), "%n fichiers".to_string()])
        );
    }

    #[test]
    fn numerus_without_forms_keeps_plain_text() {
        let text = "<TS><context><name>A</name><message numerus=\"yes\">\
            <source>%n coin(s)</source><translation>%n pièce(s)</translation>\
            </message></context></TS>";
        let catalog = parse(text).expect("parses");
        let translation = &catalog.contexts[0].messages[0].translation;
        assert_eq!(translation.state, TranslationState::Finished);
        assert_eq!(
            translation.text,
            TranslationText::Plural(vec!["%n pièce(s)".to_string()])
        );
    }

    #[test]
    fn disambiguation_comment_is_read() {
        let text = "<TS><context><name>A</name><message><source>Open</source>\
            <comment>verb</comment><translation>Ouvrir</translation></message></context></TS>";
        let catalog = parse(text).expect("parses");
        assert_eq!(catalog.contexts[0].messages[0].disambiguation(), "verb");
    }
}
