// SPDX-License-Identifier: PMPL-1.0-or-later

//! Project configuration (`tscat.yaml`)
//!
//! Lookup order: `--config PATH`, then `$TSCAT_CONFIG`, then `./tscat.yaml`.
//! An explicitly named file must exist; the default file is optional and
//! its absence means built-in defaults. Every field may be omitted.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "TSCAT_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "tscat.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory holding `lang_<code>.ts` files
    pub catalog_dir: PathBuf,
    /// Languages the project ships catalogs for
    pub languages: Vec<String>,
    /// Languages consulted, in order, after the primary catalog
    pub fallback: Vec<String>,
    /// Default tracing filter when `TSCAT_LOG` is unset
    pub log_level: String,
    /// Completion percentage below which `doctor` warns
    pub min_completion: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_dir: PathBuf::from("translations"),
            languages: Vec::new(),
            fallback: Vec::new(),
            log_level: "warn".to_string(),
            min_completion: 0.0,
        }
    }
}

impl Config {
    pub fn from_yaml(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=100.0).contains(&self.min_completion) {
            bail!(
                "min_completion must be between 0 and 100, got {}",
                self.min_completion
            );
        }
        Ok(())
    }

    /// Resolve and load the configuration, returning the file it came from
    pub fn load(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        let named = explicit
            .map(Path::to_path_buf)
            .or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from));

        let path = match named {
            Some(path) => path,
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.is_file() {
                    return Ok((Self::default(), None));
                }
                default
            }
        };

        let text = fs::read_to_string(&path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = Self::from_yaml(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok((config, Some(path)))
    }

    /// Conventional catalog file for a language code
    pub fn catalog_path(&self, language: &str) -> PathBuf {
        self.catalog_dir.join(format!("lang_{}.ts", language))
    }
}
