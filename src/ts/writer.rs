// SPDX-License-Identifier: PMPL-1.0-or-later

//! Serializer producing the layout lupdate writes
//!
//! Contexts start at column zero, messages are indented four spaces and
//! their children eight. Numerus forms stay on the `<translation>` line.

use crate::types::{Catalog, Context, Location, Message, Translation, TranslationText};
use quick_xml::escape::escape;
use std::fmt::Write;

pub(crate) fn write_catalog(catalog: &Catalog) -> String {
    let mut out = String::with_capacity(catalog.message_count() * 160 + 128);
    out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    out.push_str("<!DOCTYPE TS>\n");
    out.push_str("<TS");
    push_attr(&mut out, "version", non_empty(&catalog.version));
    push_attr(&mut out, "language", catalog.language.as_deref());
    push_attr(&mut out, "sourcelanguage", catalog.source_language.as_deref());
    out.push_str(">\n");

    for context in &catalog.contexts {
        write_context(&mut out, context);
    }

    out.push_str("</TS>\n");
    out
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn write_context(out: &mut String, context: &Context) {
    out.push_str("<context>\n");
    push_element(out, 4, "name", &context.name);
    if let Some(comment) = &context.comment {
        push_element(out, 4, "comment", comment);
    }
    for message in &context.messages {
        write_message(out, message);
    }
    out.push_str("</context>\n");
}

fn write_message(out: &mut String, message: &Message) {
    out.push_str("    <message");
    push_attr(out, "id", message.id.as_deref());
    if message.numerus {
        push_attr(out, "numerus", Some("yes"));
    }
    out.push_str(">\n");

    for location in &message.locations {
        write_location(out, location);
    }
    push_element(out, 8, "source", &message.source);
    if let Some(comment) = &message.comment {
        push_element(out, 8, "comment", comment);
    }
    if let Some(note) = &message.extra_comment {
        push_element(out, 8, "extracomment", note);
    }
    if let Some(note) = &message.translator_comment {
        push_element(out, 8, "translatorcomment", note);
    }
    write_translation(out, &message.translation);
    out.push_str("    </message>\n");
}

fn write_location(out: &mut String, location: &Location) {
    out.push_str("        <location");
    push_attr(out, "filename", location.filename.as_deref());
    push_attr(out, "line", location.line.as_deref());
    out.push_str("/>\n");
}

fn write_translation(out: &mut String, translation: &Translation) {
    out.push_str("        <translation");
    push_attr(out, "type", translation.state.attribute());

    match &translation.text {
        TranslationText::Single(text) if text.is_empty() && translation.state.attribute().is_some() => {
            out.push_str("/>\n");
        }
        TranslationText::Plural(forms) if forms.is_empty() => {
            out.push_str("/>\n");
        }
        TranslationText::Single(text) => {
            out.push('>');
            push_text(out, text);
            out.push_str("</translation>\n");
        }
        TranslationText::Plural(forms) => {
            out.push('>');
            for form in forms {
                out.push_str("<numerusform>");
                push_text(out, form);
                out.push_str("</numerusform>");
            }
            out.push_str("</translation>\n");
        }
    }
}

fn push_element(out: &mut String, indent: usize, tag: &str, text: &str) {
    let _ = write!(out, "{:indent$}<{}>", "", tag, indent = indent);
    push_text(out, text);
    let _ = writeln!(out, "</{}>", tag);
}

fn push_attr(out: &mut String, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        let _ = write!(out, " {}=\"{}\"", key, escape(value));
    }
}

/// Escape character data; control characters XML 1.0 forbids become
/// `<byte>` elements
fn push_text(out: &mut String, text: &str) {
    let mut start = 0;
    for (idx, ch) in text.char_indices() {
        if ch == '\r' {
            // A literal CR would be folded into a line break on reading.
            out.push_str(&escape(&text[start..idx]));
            out.push_str("&#xd;");
            start = idx + 1;
        } else if is_forbidden(ch) {
            out.push_str(&escape(&text[start..idx]));
            let _ = write!(out, "<byte value=\"x{:x}\"/>", ch as u32);
            start = idx + ch.len_utf8();
        }
    }
    out.push_str(&escape(&text[start..]));
}

fn is_forbidden(ch: char) -> bool {
    (ch as u32) < 0x20 && !matches!(ch, '\t' | '\n' | '\r')
}
