// SPDX-License-Identifier: PMPL-1.0-or-later

//! Errors raised while reading or writing `.ts` documents

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TsError {
    #[error("malformed XML at byte {position}: {source}")]
    Xml {
        position: usize,
        #[source]
        source: quick_xml::Error,
    },

    #[error("expected <TS> root element, found <{0}>")]
    UnexpectedRoot(String),

    #[error("document has no <TS> root element")]
    MissingRoot,

    #[error("<{parent}> at byte {position} has no <{element}>")]
    MissingElement {
        element: &'static str,
        parent: &'static str,
        position: usize,
    },

    #[error("unknown translation type \"{value}\" at byte {position}")]
    UnknownTranslationType { value: String, position: usize },

    #[error("invalid <byte> value \"{0}\"")]
    InvalidByte(String),

    #[error("cannot decode catalog as {encoding}")]
    Encoding { encoding: &'static str },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TsError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type TsResult<T> = Result<T, TsError>;
