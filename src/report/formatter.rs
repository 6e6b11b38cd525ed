// SPDX-License-Identifier: PMPL-1.0-or-later

//! Human-readable rendering of stats, check and scan reports

use crate::check::{CheckReport, Severity};
use crate::scan::ScanReport;
use crate::stats::{CatalogStats, Counts};
use colored::*;
use std::fmt::Write;

/// Contexts listed in the "weakest" section of a stats report
const WEAKEST_LIMIT: usize = 5;

pub struct ReportFormatter {
    by_context: bool,
}

impl ReportFormatter {
    pub fn new() -> Self {
        Self { by_context: false }
    }

    /// List every context instead of only the weakest few
    pub fn by_context(mut self, enabled: bool) -> Self {
        self.by_context = enabled;
        self
    }

    pub fn print_stats(&self, stats: &CatalogStats) {
        print!("{}", self.render_stats(stats));
    }

    pub fn print_check(&self, report: &CheckReport) {
        print!("{}", self.render_check(report));
    }

    pub fn print_scan(&self, report: &ScanReport) {
        print!("{}", self.render_scan(report));
    }

    pub fn render_stats(&self, stats: &CatalogStats) -> String {
        let mut out = String::new();
        let title = match &stats.path {
            Some(path) => format!("=== {} ===", path.display()),
            None => "=== CATALOG ===".to_string(),
        };
        let _ = writeln!(out, "{}", title.bold().cyan());

        let language = match (&stats.language, &stats.language_name) {
            (Some(code), Some(name)) => format!("{} ({})", code, name),
            (Some(code), None) => code.clone(),
            (None, _) => "unspecified".to_string(),
        };
        let _ = writeln!(out, "  Language: {}", language);
        let _ = writeln!(out, "  Format version: {}", stats.version);
        if let Some(fingerprint) = &stats.fingerprint {
            let _ = writeln!(out, "  Fingerprint: {}", fingerprint.dimmed());
        }
        let _ = writeln!(out, "  Contexts: {}", stats.contexts);
        write_counts(&mut out, &stats.counts);
        let _ = writeln!(
            out,
            "  Completion: {}",
            completion_label(stats.completion).bold()
        );

        if self.by_context {
            let _ = writeln!(out);
            let _ = writeln!(out, "{}", "CONTEXTS".bold().yellow());
            for ctx in &stats.by_context {
                let _ = writeln!(
                    out,
                    "  {:<40} {:>4}/{:<4} {}",
                    ctx.name,
                    ctx.counts.finished,
                    ctx.counts.active(),
                    completion_label(ctx.completion)
                );
            }
        } else {
            let weakest: Vec<_> = stats
                .weakest_contexts(WEAKEST_LIMIT)
                .into_iter()
                .filter(|ctx| ctx.counts.unfinished > 0)
                .collect();
            if !weakest.is_empty() {
                let _ = writeln!(out);
                let _ = writeln!(out, "{}", "LEAST COMPLETE CONTEXTS".bold().yellow());
                for ctx in weakest {
                    let _ = writeln!(
                        out,
                        "  {} ({} unfinished, {})",
                        ctx.name,
                        ctx.counts.unfinished,
                        completion_label(ctx.completion)
                    );
                }
            }
        }
        out
    }

    pub fn render_check(&self, report: &CheckReport) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", "=== CATALOG CHECK ===".bold().cyan());
        if let Some(language) = &report.language {
            let _ = writeln!(out, "  Language: {}", language);
        }
        let _ = writeln!(out, "  Messages checked: {}", report.messages_checked);

        if report.findings.is_empty() {
            let _ = writeln!(out, "  {}", "No problems found".green());
            return out;
        }

        let _ = writeln!(out);
        for finding in &report.findings {
            let severity = match finding.severity {
                Severity::Error => finding.severity.to_string().red().bold(),
                Severity::Warning => finding.severity.to_string().yellow(),
                Severity::Info => finding.severity.to_string().blue(),
            };
            let mut subject = String::new();
            if let Some(context) = &finding.context {
                subject.push_str(context);
            }
            if let Some(source) = &finding.source {
                let _ = write!(subject, " {:?}", source);
            }
            let _ = writeln!(out, "  [{}] {} {}", severity, subject.trim_start().bold(), finding.detail);
            if let Some(location) = &finding.location {
                let _ = writeln!(out, "        at {}", location.dimmed());
            }
        }

        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "  {} error(s), {} warning(s), {} info",
            report.errors, report.warnings, report.infos
        );
        out
    }

    pub fn render_scan(&self, report: &ScanReport) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{}",
            format!("=== SCAN {} ===", report.directory.display()).bold().cyan()
        );
        let _ = writeln!(
            out,
            "  Files: {} ({} failed)",
            report.files_scanned, report.files_failed
        );
        let _ = writeln!(
            out,
            "  Messages: {} ({} unfinished)",
            report.total_messages, report.total_unfinished
        );
        let _ = writeln!(out);

        for result in &report.results {
            match (&result.stats, &result.error) {
                (Some(stats), _) => {
                    let language = stats.language.as_deref().unwrap_or("?");
                    let _ = writeln!(
                        out,
                        "  {:<8} {:>8}  {}",
                        language,
                        completion_label(stats.completion),
                        result.path.display()
                    );
                }
                (None, Some(error)) => {
                    let _ = writeln!(
                        out,
                        "  {:<8} {:>8}  {}\n           {}",
                        "-",
                        "FAILED".red().bold(),
                        result.path.display(),
                        error.dimmed()
                    );
                }
                (None, None) => {}
            }
        }
        out
    }
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn write_counts(out: &mut String, counts: &Counts) {
    let _ = writeln!(out, "  Messages: {}", counts.total);
    let _ = writeln!(out, "    Finished: {}", counts.finished.to_string().green());
    let _ = writeln!(out, "    Unfinished: {}", counts.unfinished.to_string().yellow());
    if counts.obsolete > 0 {
        let _ = writeln!(out, "    Obsolete: {}", counts.obsolete.to_string().dimmed());
    }
    if counts.numerus > 0 {
        let _ = writeln!(out, "    Plural: {}", counts.numerus);
    }
}

fn completion_label(completion: f64) -> ColoredString {
    let label = format!("{:.1}%", completion);
    if completion >= 90.0 {
        label.green()
    } else if completion >= 50.0 {
        label.yellow()
    } else {
        label.red()
    }
}
