// SPDX-License-Identifier: PMPL-1.0-or-later

//! Serialization helpers for printed/exported reports

use anyhow::{bail, Result};
use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportOutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

impl ReportOutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "text" | "txt" => Some(ReportOutputFormat::Text),
            "json" => Some(ReportOutputFormat::Json),
            "yaml" | "yml" => Some(ReportOutputFormat::Yaml),
            _ => None,
        }
    }

    /// Pick a format from an output file name, if its extension is known
    pub fn from_path(path: &std::path::Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::parse)
    }

    /// Machine-readable rendering. Text output goes through the formatter.
    pub fn serialize<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            ReportOutputFormat::Json => {
                let mut json = serde_json::to_string_pretty(value)?;
                json.push('\n');
                Ok(json)
            }
            ReportOutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            ReportOutputFormat::Text => bail!("text output has no serialized form"),
        }
    }
}
