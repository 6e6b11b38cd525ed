// SPDX-License-Identifier: PMPL-1.0-or-later

//! `tscat doctor`: checks that the configured catalogs are where the
//! configuration says and that they load.

use crate::config::Config;
use crate::logging::LOG_ENV;
use crate::stats;
use anyhow::{anyhow, Result};
use std::env;
use std::path::Path;

pub fn run_self_diagnostics(config: &Config, config_path: Option<&Path>) -> Result<()> {
    println!("tscat self-diagnostics");

    let checks = collect(config, config_path);

    println!();
    for entry in &checks {
        entry.print();
    }

    if checks.iter().any(|entry| entry.level == Level::Error) {
        Err(anyhow!("self-diagnostics reported issues"))
    } else {
        Ok(())
    }
}

pub fn collect(config: &Config, config_path: Option<&Path>) -> Vec<Diagnostic> {
    let mut checks = Vec::new();
    checks.push(Diagnostic::ok(
        "version",
        format!("tscat {}", env!("CARGO_PKG_VERSION")),
    ));
    checks.push(match config_path {
        Some(path) => Diagnostic::ok("config", format!("{} loaded", path.display())),
        None => Diagnostic::warning("config", "no tscat.yaml found, using defaults".to_string()),
    });

    let dir = check_directory("catalog directory", &config.catalog_dir);
    let dir_ok = dir.level == Level::Ok;
    checks.push(dir);

    if config.languages.is_empty() {
        checks.push(Diagnostic::warning(
            "languages",
            "none configured (list them under `languages:`)".to_string(),
        ));
    } else if dir_ok {
        for language in &config.languages {
            checks.push(check_catalog(config, language));
        }
    }

    for language in &config.fallback {
        let path = config.catalog_path(language);
        if !path.is_file() {
            checks.push(Diagnostic::error(
                format!("fallback {}", language),
                format!("{} missing", path.display()),
            ));
        }
    }

    checks.push(check_log_env());
    checks
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Ok,
    Warn,
    Error,
}

impl Level {
    fn tag(&self) -> &'static str {
        match self {
            Level::Ok => "OK",
            Level::Warn => "WARN",
            Level::Error => "ERR",
        }
    }
}

#[derive(Debug)]
pub struct Diagnostic {
    pub label: String,
    pub level: Level,
    pub detail: String,
}

impl Diagnostic {
    fn new(label: impl Into<String>, level: Level, detail: String) -> Self {
        Self {
            label: label.into(),
            level,
            detail,
        }
    }

    fn ok(label: impl Into<String>, detail: String) -> Self {
        Self::new(label, Level::Ok, detail)
    }

    fn warning(label: impl Into<String>, detail: String) -> Self {
        Self::new(label, Level::Warn, detail)
    }

    fn error(label: impl Into<String>, detail: String) -> Self {
        Self::new(label, Level::Error, detail)
    }

    fn print(&self) {
        println!("  [{}] {:22} {}", self.level.tag(), self.label, self.detail);
    }
}

fn check_directory(label: &'static str, path: &Path) -> Diagnostic {
    if path.is_dir() {
        Diagnostic::ok(label, format!("{} exists", path.display()))
    } else if path.exists() {
        Diagnostic::error(
            label,
            format!("{} exists but is not a directory", path.display()),
        )
    } else {
        Diagnostic::error(label, format!("{} missing", path.display()))
    }
}

fn check_catalog(config: &Config, language: &str) -> Diagnostic {
    let label = format!("catalog {}", language);
    let path = config.catalog_path(language);
    if !path.is_file() {
        return Diagnostic::error(label, format!("{} missing", path.display()));
    }

    match stats::collect_file(&path) {
        Ok(stats) if stats.completion < config.min_completion => Diagnostic::warning(
            label,
            format!(
                "{:.1}% complete, below the configured {:.1}%",
                stats.completion, config.min_completion
            ),
        ),
        Ok(stats) => Diagnostic::ok(
            label,
            format!(
                "{} messages, {:.1}% complete",
                stats.counts.total, stats.completion
            ),
        ),
        Err(err) => Diagnostic::error(label, format!("{:#}", err)),
    }
}

fn check_log_env() -> Diagnostic {
    match env::var(LOG_ENV) {
        Ok(value) if !value.trim().is_empty() => {
            Diagnostic::ok("log filter", format!("{}={}", LOG_ENV, value))
        }
        _ => Diagnostic::ok("log filter", format!("{} unset, using config level", LOG_ENV)),
    }
}
