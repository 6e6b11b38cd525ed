// SPDX-License-Identifier: PMPL-1.0-or-later

//! Report rendering: colored text for terminals, JSON/YAML for tooling

pub mod formatter;
pub mod output;

pub use formatter::ReportFormatter;
pub use output::ReportOutputFormat;
