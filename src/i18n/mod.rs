// SPDX-License-Identifier: PMPL-1.0-or-later

//! Language metadata for catalogs.
//!
//! A catalog's `language` attribute decides two things: whether the code is
//! a real ISO 639-1 language (checked by `check`) and which plural rule picks
//! the `<numerusform>` for a count (used by `resolve`).
//!
//! ## Plural rules
//!
//! | Rule          | Forms | Languages                  |
//! |---------------|-------|----------------------------|
//! | `single`      | 1     | ja, zh, ko, vi, th, tr ... |
//! | `one-other`   | 2     | en, de, es, it, nl ...     |
//! | `french`      | 2     | fr, pt_BR                  |
//! | `east-slavic` | 3     | uk, ru, be, sr, hr, bs     |
//! | `polish`      | 3     | pl                         |
//! | `czech`       | 3     | cs, sk                     |

mod iso639;
mod plural;
mod tag;

pub use iso639::{is_valid_iso639_1, language_name, native_name};
pub use plural::PluralRule;
pub use tag::LanguageTag;
