// SPDX-License-Identifier: PMPL-1.0-or-later

//! Byte-level decoding of catalog files
//!
//! Order of precedence: byte order mark, then the `encoding` label of the
//! XML declaration, then UTF-8. Malformed input is rejected rather than
//! patched with replacement characters, since a silently mangled source
//! string would no longer match at lookup time.

use super::error::{TsError, TsResult};
use encoding_rs::{Encoding, UTF_8};
use regex::bytes::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

static ENCODING_DECL: OnceLock<Regex> = OnceLock::new();

/// Only the head of the file is searched for the declaration
const DECL_WINDOW: usize = 256;

pub fn decode(bytes: &[u8]) -> TsResult<Cow<'_, str>> {
    let (encoding, bom_len) = match Encoding::for_bom(bytes) {
        Some((encoding, len)) => (encoding, len),
        None => (declared_encoding(bytes).unwrap_or(UTF_8), 0),
    };

    let body = &bytes[bom_len..];
    let (text, had_errors) = encoding.decode_without_bom_handling(body);
    if had_errors {
        return Err(TsError::Encoding {
            encoding: encoding.name(),
        });
    }
    tracing::trace!(encoding = encoding.name(), bytes = bytes.len(), "decoded catalog");
    Ok(text)
}

fn declared_encoding(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(DECL_WINDOW)];
    if !head.starts_with(b"<?xml") {
        return None;
    }
    let decl_end = head.windows(2).position(|w| w == b"?>")?;
    let re = ENCODING_DECL.get_or_init(|| {
        Regex::new(r#"encoding\s*=\s*["']([A-Za-z0-9._-]+)["']"#).expect("valid regex")
    });
    let label = re.captures(&head[..decl_end])?.get(1)?;
    // The declaration was just read as ASCII, so a UTF-16 label cannot be
    // right; output_encoding maps it to UTF-8.
    Encoding::for_label(label.as_bytes()).map(|encoding| encoding.output_encoding())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_utf8_without_declaration() {
        let text = decode("<TS>Довідники</TS>".as_bytes()).expect("utf-8 decodes");
        assert_eq!(text, "<TS>Довідники</TS>");
    }

    #[test]
    fn bom_is_stripped() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(b"<TS/>");
        assert_eq!(decode(&bytes).expect("decodes"), "<TS/>");
    }

    #[test]
    fn utf16le_with_bom() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "<TS>é</TS>".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(decode(&bytes).expect("decodes"), "<TS>é</TS>");
    }

    #[test]
    fn declared_latin1() {
        let mut bytes = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?><TS>R".to_vec();
        bytes.push(0xE9);
        bytes.extend_from_slice(b"f</TS>");
        let text = decode(&bytes).expect("latin-1 decodes");
        assert!(text.ends_with("<TS>Réf</TS>"));
    }

    #[test]
    fn ascii_declaration_of_utf16_reads_as_utf8() {
        let bytes = "<?xml version=\"1.0\" encoding=\"UTF-16\"?><TS>Довідник</TS>".as_bytes();
        let text = decode(bytes).expect("decodes");
        assert!(text.ends_with("<TS>Довідник</TS>"));
        assert!(crate::ts::from_bytes(bytes).is_ok());
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        let err = decode(&[b'<', 0xC3, 0x28, b'>']).unwrap_err();
        assert!(matches!(err, TsError::Encoding { encoding: "UTF-8" }));
    }
}
