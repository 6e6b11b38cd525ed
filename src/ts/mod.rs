// SPDX-License-Identifier: PMPL-1.0-or-later

//! Qt Linguist `.ts` file format
//!
//! ```text
//! <TS version="2.1" language="fr">
//!   <context>
//!     <name>YearEdit</name>
//!     <message numerus="yes">?
//!       <location filename=".." line=".."/>*
//!       <source>..</source>
//!       <comment>..</comment>?
//!       <translation type="unfinished|obsolete|vanished"?>
//!         text | <numerusform>..</numerusform>*
//!       </translation>
//!     </message>*
//!   </context>*
//! </TS>
//! ```

mod encoding;
mod error;
mod reader;
mod writer;

pub use encoding::decode;
pub use error::{TsError, TsResult};

use crate::types::Catalog;
use std::borrow::Cow;
use std::fs;
use std::path::Path;

/// Parse a catalog from already-decoded text
pub fn from_str(text: &str) -> TsResult<Catalog> {
    let text = normalize_line_endings(text);
    let catalog = reader::Parser::new(&text).document()?;
    tracing::debug!(
        language = catalog.language.as_deref().unwrap_or("-"),
        contexts = catalog.contexts.len(),
        messages = catalog.message_count(),
        "parsed catalog"
    );
    Ok(catalog)
}

/// Parse a catalog from raw file bytes, detecting the encoding
pub fn from_bytes(bytes: &[u8]) -> TsResult<Catalog> {
    let text = decode(bytes)?;
    from_str(&text)
}

/// XML end-of-line handling: `\r\n` and lone `\r` read as `\n`. Character
/// references such as `&#xd;` are expanded later and survive.
fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if !text.contains('\r') {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
}

pub fn load(path: &Path) -> TsResult<Catalog> {
    let bytes = fs::read(path).map_err(|err| TsError::io(path, err))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "loading catalog");
    from_bytes(&bytes)
}

/// Serialize in the layout lupdate produces
pub fn to_string(catalog: &Catalog) -> String {
    writer::write_catalog(catalog)
}

pub fn save(path: &Path, catalog: &Catalog) -> TsResult<()> {
    fs::write(path, to_string(catalog)).map_err(|err| TsError::io(path, err))?;
    tracing::info!(path = %path.display(), messages = catalog.message_count(), "saved catalog");
    Ok(())
}
