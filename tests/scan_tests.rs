// SPDX-License-Identifier: PMPL-1.0-or-later

//! Tests for the scan subcommand (batch catalog statistics)

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use ts_catalog::report::{ReportFormatter, ReportOutputFormat};
use ts_catalog::scan::{self, ScanConfig};

fn copy_fixture(dir: &Path, name: &str) {
    let source = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    fs::copy(source, dir.join(name)).unwrap();
}

fn config(dir: &TempDir) -> ScanConfig {
    ScanConfig {
        directory: dir.path().to_path_buf(),
        recursive: false,
        below: None,
    }
}

#[test]
fn test_scan_empty_directory() {
    let dir = TempDir::new().unwrap();
    let report = scan::run(&config(&dir)).expect("scan should succeed on empty dir");
    assert_eq!(report.files_scanned, 0);
    assert_eq!(report.total_messages, 0);
    assert!(report.results.is_empty());
}

#[test]
fn test_scan_orders_by_completion_with_failures_first() {
    let dir = TempDir::new().unwrap();
    copy_fixture(dir.path(), "lang_fr.ts");
    copy_fixture(dir.path(), "lang_uk.ts");
    fs::write(dir.path().join("lang_de.ts"), "<TS version=\"2.1\"><context>").unwrap();

    let report = scan::run(&config(&dir)).expect("scan should succeed");
    assert_eq!(report.files_scanned, 3);
    assert_eq!(report.files_failed, 1);
    assert_eq!(report.total_messages, 572 + 641);
    assert_eq!(report.total_unfinished, 178 + 168);

    let languages: Vec<Option<&str>> = report
        .results
        .iter()
        .map(|r| r.stats.as_ref().and_then(|s| s.language.as_deref()))
        .collect();
    // fr is 68.9% complete, uk 73.8%
    assert_eq!(languages, vec![None, Some("fr"), Some("uk")]);
    assert!(report.results[0].path.ends_with("lang_de.ts"));
}

#[test]
fn test_scan_report_renders() {
    let dir = TempDir::new().unwrap();
    copy_fixture(dir.path(), "lang_uk.ts");
    let report = scan::run(&config(&dir)).unwrap();

    let yaml = ReportOutputFormat::Yaml.serialize(&report).unwrap();
    assert!(yaml.contains("files_scanned: 1"));
    assert!(yaml.contains("language: uk"));

    colored::control::set_override(false);
    let text = ReportFormatter::new().render_scan(&report);
    assert!(text.contains("Files: 1 (0 failed)"));
    assert!(text.contains("73.8%"));
}
