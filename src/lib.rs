// SPDX-License-Identifier: PMPL-1.0-or-later

//! ts-catalog: Qt Linguist `.ts` translation catalogs.
//!
//! Loads `.ts` files into an in-memory [`types::Catalog`] and answers
//! translation lookups against it the way a Qt application's installed
//! translators would: context + source + optional disambiguation, with
//! plural forms chosen by the catalog language's rule and the source text
//! returned whenever no usable translation exists.
//!
//! Around that core sit the maintenance tools behind the `tscat` binary:
//! completion statistics, consistency checks, re-serialization, structured
//! export and directory scans.
//!
//! ```
//! use ts_catalog::resolve::Resolver;
//!
//! let catalog = ts_catalog::ts::from_str(r#"<TS version="2.1" language="fr">
//!   <context><name>MainWindow</name>
//!     <message><source>Open</source><translation>Ouvrir</translation></message>
//!   </context></TS>"#).unwrap();
//! let resolver = Resolver::new(&catalog);
//! assert_eq!(resolver.translate("MainWindow", "Open"), "Ouvrir");
//! assert_eq!(resolver.translate("MainWindow", "Quit"), "Quit");
//! ```

pub mod check;
pub mod config;
pub mod diagnostics;
pub mod i18n;
pub mod logging;
pub mod report;
pub mod resolve;
pub mod scan;
pub mod stats;
pub mod ts;
pub mod types;
