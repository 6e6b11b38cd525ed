// SPDX-License-Identifier: PMPL-1.0-or-later

//! Scan: batch statistics across a translations directory
//!
//! Walks a directory for `*.ts` files, loads them in parallel and produces
//! a summary ordered from least to most complete. A file that fails to
//! load is reported with its error and does not abort the scan.

use crate::stats::{self, CatalogStats};
use anyhow::Result;
use chrono::Utc;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Configuration for a scan run
pub struct ScanConfig {
    /// Directory searched for catalogs
    pub directory: PathBuf,
    /// Descend into subdirectories
    pub recursive: bool,
    /// Only keep catalogs below this completion percentage
    pub below: Option<f64>,
}

/// Results from loading a single catalog file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileResult {
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<CatalogStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileResult {
    fn completion(&self) -> Option<f64> {
        self.stats.as_ref().map(|s| s.completion)
    }
}

/// Complete scan report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub created_at: String,
    pub directory: PathBuf,
    pub files_scanned: usize,
    pub files_failed: usize,
    pub total_messages: usize,
    pub total_unfinished: usize,
    pub results: Vec<FileResult>,
}

/// Find catalog files under the given directory
fn discover(directory: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    if !directory.is_dir() {
        anyhow::bail!("Not a directory: {}", directory.display());
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut files: Vec<PathBuf> = WalkDir::new(directory)
        .max_depth(max_depth)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("ts"))
                .unwrap_or(false)
        })
        .collect();

    files.sort();
    Ok(files)
}

/// Run a scan over every catalog in a directory
pub fn run(config: &ScanConfig) -> Result<ScanReport> {
    let files = discover(&config.directory, config.recursive)?;
    tracing::info!(
        directory = %config.directory.display(),
        files = files.len(),
        "scanning catalogs"
    );

    let mut results: Vec<FileResult> = files
        .par_iter()
        .map(|path| match stats::collect_file(path) {
            Ok(stats) => FileResult {
                path: path.clone(),
                stats: Some(stats.summary_only()),
                error: None,
            },
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "catalog failed to load");
                FileResult {
                    path: path.clone(),
                    stats: None,
                    error: Some(format!("{:#}", err)),
                }
            }
        })
        .collect();

    let files_scanned = results.len();
    let files_failed = results.iter().filter(|r| r.error.is_some()).count();

    if let Some(threshold) = config.below {
        results.retain(|r| r.completion().map(|c| c < threshold).unwrap_or(true));
    }

    // Failed files first, then least complete.
    results.sort_by(|a, b| match (a.completion(), b.completion()) {
        (None, None) => a.path.cmp(&b.path),
        (None, Some(_)) => std::cmp::Ordering::Less,
        (Some(_), None) => std::cmp::Ordering::Greater,
        (Some(x), Some(y)) => x
            .partial_cmp(&y)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.path.cmp(&b.path)),
    });

    let (total_messages, total_unfinished) = results
        .iter()
        .filter_map(|r| r.stats.as_ref())
        .fold((0, 0), |(total, unfinished), s| {
            (total + s.counts.total, unfinished + s.counts.unfinished)
        });

    Ok(ScanReport {
        created_at: Utc::now().to_rfc3339(),
        directory: config.directory.clone(),
        files_scanned,
        files_failed,
        total_messages,
        total_unfinished,
        results,
    })
}
