// SPDX-License-Identifier: PMPL-1.0-or-later

//! tscat: inspect, check and query Qt Linguist `.ts` translation catalogs

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use ts_catalog::config::Config;
use ts_catalog::i18n::LanguageTag;
use ts_catalog::report::{ReportFormatter, ReportOutputFormat};
use ts_catalog::resolve::Translator;
use ts_catalog::scan::{self, ScanConfig};
use ts_catalog::types::Catalog;
use ts_catalog::{check, diagnostics, logging, stats, ts};

#[derive(Parser)]
#[command(name = "tscat")]
#[command(version)]
#[command(about = "Inspect, check and query Qt Linguist translation catalogs")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file (default: $TSCAT_CONFIG, then ./tscat.yaml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate one source string the way an application would
    Lookup {
        /// Catalog file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Context (usually the class name)
        #[arg(value_name = "CONTEXT")]
        context: String,

        /// Source text
        #[arg(value_name = "SOURCE")]
        source: String,

        /// Disambiguation comment
        #[arg(short, long)]
        disambiguation: Option<String>,

        /// Count for plural messages; also replaces %n
        #[arg(short = 'n', long = "count", allow_negative_numbers = true)]
        count: Option<i64>,
    },

    /// Completion statistics for a catalog
    Stats {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Show every context
        #[arg(long)]
        by_context: bool,

        #[arg(short, long, value_enum, default_value = "text")]
        format: ReportOutputFormat,
    },

    /// Consistency checks (placeholders, whitespace, plural forms)
    Check {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[arg(short, long, value_enum, default_value = "text")]
        format: ReportOutputFormat,

        /// Fail on warnings as well as errors
        #[arg(long)]
        strict: bool,
    },

    /// Rewrite a catalog in canonical layout
    Normalize {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export a catalog as JSON or YAML
    Export {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormatArg,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Statistics for every catalog in a directory
    Scan {
        /// Directory to scan (default: the configured catalog_dir)
        #[arg(value_name = "DIR")]
        directory: Option<PathBuf>,

        /// Descend into subdirectories
        #[arg(short, long)]
        recursive: bool,

        /// Only list catalogs below this completion percentage
        #[arg(long, value_name = "PERCENT")]
        below: Option<f64>,

        #[arg(short, long, value_enum, default_value = "text")]
        format: ReportOutputFormat,
    },

    /// Check configuration and configured catalogs
    Doctor,
}

// CLI argument types
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum ExportFormatArg {
    Json,
    Yaml,
}

impl From<ExportFormatArg> for ReportOutputFormat {
    fn from(arg: ExportFormatArg) -> Self {
        match arg {
            ExportFormatArg::Json => ReportOutputFormat::Json,
            ExportFormatArg::Yaml => ReportOutputFormat::Yaml,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let (config, config_path) = Config::load(cli.config.as_deref())?;
    logging::init(&config.log_level, cli.verbose)?;
    if let Some(path) = &config_path {
        tracing::debug!(path = %path.display(), "configuration loaded");
    }

    match cli.command {
        Commands::Lookup {
            file,
            context,
            source,
            disambiguation,
            count,
        } => {
            let primary = load(&file)?;
            let fallbacks = load_fallbacks(&config, &primary);

            let mut translator = Translator::new();
            for catalog in fallbacks.iter().rev() {
                translator.install(catalog);
            }
            translator.install(&primary);

            let text =
                translator.translate_with(&context, &source, disambiguation.as_deref(), count);
            println!("{}", text);
        }

        Commands::Stats {
            file,
            by_context,
            format,
        } => {
            let stats = stats::collect_file(&file)?;
            match format {
                ReportOutputFormat::Text => {
                    ReportFormatter::new().by_context(by_context).print_stats(&stats)
                }
                _ => {
                    let stats = if by_context { stats } else { stats.summary_only() };
                    print!("{}", format.serialize(&stats)?);
                }
            }
        }

        Commands::Check {
            file,
            format,
            strict,
        } => {
            let catalog = load(&file)?;
            let report = check::run(&catalog);
            match format {
                ReportOutputFormat::Text => ReportFormatter::new().print_check(&report),
                _ => print!("{}", format.serialize(&report)?),
            }
            if report.fails(strict) {
                bail!(
                    "{}: {} error(s), {} warning(s)",
                    file.display(),
                    report.errors,
                    report.warnings
                );
            }
        }

        Commands::Normalize { file, output } => {
            let catalog = load(&file)?;
            match output {
                Some(path) => {
                    ts::save(&path, &catalog)?;
                    println!("Catalog written to: {}", path.display());
                }
                None => print!("{}", ts::to_string(&catalog)),
            }
        }

        Commands::Export {
            file,
            format,
            output,
        } => {
            let catalog = load(&file)?;
            let format: ReportOutputFormat = output
                .as_deref()
                .and_then(ReportOutputFormat::from_path)
                .filter(|f| *f != ReportOutputFormat::Text)
                .unwrap_or_else(|| format.into());
            let text = format.serialize(&catalog)?;
            match output {
                Some(path) => {
                    fs::write(&path, text)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("Export saved to: {}", path.display());
                }
                None => print!("{}", text),
            }
        }

        Commands::Scan {
            directory,
            recursive,
            below,
            format,
        } => {
            let report = scan::run(&ScanConfig {
                directory: directory.unwrap_or_else(|| config.catalog_dir.clone()),
                recursive,
                below,
            })?;
            match format {
                ReportOutputFormat::Text => ReportFormatter::new().print_scan(&report),
                _ => print!("{}", format.serialize(&report)?),
            }
        }

        Commands::Doctor => {
            diagnostics::run_self_diagnostics(&config, config_path.as_deref())?;
        }
    }

    Ok(())
}

fn load(path: &Path) -> Result<Catalog> {
    ts::load(path).with_context(|| format!("loading {}", path.display()))
}

/// Catalogs for the configured fallback languages, skipping the primary's
/// own language and any that fail to load
fn load_fallbacks(config: &Config, primary: &Catalog) -> Vec<Catalog> {
    config
        .fallback
        .iter()
        .filter(|language| {
            !primary
                .language
                .as_deref()
                .map(|own| LanguageTag::same_language(own, language))
                .unwrap_or(false)
        })
        .filter_map(|language| {
            let path = config.catalog_path(language);
            match ts::load(&path) {
                Ok(catalog) => Some(catalog),
                Err(err) => {
                    tracing::warn!(language = %language, error = %err, "fallback catalog skipped");
                    None
                }
            }
        })
        .collect()
}
