use clap::ValueEnum;
use color_eyre::Result;
use comfy_table::Table;
use serde_json::json;
use shelfmark_config::{Config, PathManager};
use shelfmark_import::{generic, goodreads, storygraph, ImportReport, UnresolvedPolicy};
use shelfmark_models::{CanonicalStatus, LibraryEntry};
use std::path::PathBuf;
use tracing::info;

use crate::output::{Output, OutputFormat};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ImportFormat {
    Goodreads,
    Storygraph,
    Generic,
}

pub fn run_import(
    file: PathBuf,
    format: ImportFormat,
    fallback_status: Option<CanonicalStatus>,
    keep_unresolved: bool,
    out: Option<PathBuf>,
    output: &Output,
) -> Result<()> {
    let path_manager =
        PathManager::new().map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
    let config = Config::load_or_default(&path_manager.config_file())
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config: {}", e))?;
    config
        .validate()
        .map_err(|e| color_eyre::eyre::eyre!("Invalid config: {}", e))?;

    // CLI flags take precedence over the configured policy
    let policy = if let Some(status) = fallback_status {
        UnresolvedPolicy::Fallback(status)
    } else if keep_unresolved {
        UnresolvedPolicy::Keep
    } else {
        UnresolvedPolicy::from_config(&config.import)
    };

    info!(file = %file.display(), format = ?format, policy = ?policy, "Starting import");

    let (entries, report) = match format {
        ImportFormat::Goodreads => goodreads::parse_export(&file, policy),
        ImportFormat::Storygraph => storygraph::parse_export(&file, policy),
        ImportFormat::Generic => generic::parse_csv(
            &file,
            &config.import.columns,
            &config.import.date_format,
            policy,
        ),
    }
    .map_err(|e| color_eyre::eyre::eyre!("Failed to import {}: {}", file.display(), e))?;

    if let Some(out_path) = &out {
        write_entries(out_path, &entries)?;
        output.success(format!(
            "Wrote {} entries to {}",
            entries.len(),
            out_path.display()
        ));
    }

    match output.format() {
        OutputFormat::Human => print_report(&report, output),
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "report": report,
                "entries": entries,
            }));
        }
    }

    Ok(())
}

fn write_entries(path: &PathBuf, entries: &[LibraryEntry]) -> Result<()> {
    let content = serde_json::to_string_pretty(entries)?;
    std::fs::write(path, content)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to write {}: {}", path.display(), e))?;
    Ok(())
}

fn print_report(report: &ImportReport, output: &Output) {
    let mut table = Table::new();
    table.set_header(vec!["Rows", "Imported", "Skipped", "Exact", "Fuzzy", "Unresolved"]);
    table.add_row(vec![
        report.total_rows.to_string(),
        report.imported.to_string(),
        report.skipped.to_string(),
        report.exact.to_string(),
        report.fuzzy.to_string(),
        report.unresolved.len().to_string(),
    ]);
    output.println(table.to_string());

    for row in &report.unresolved {
        output.warn(format!(
            "Row {}: '{}' has unresolved status '{}'",
            row.row, row.title, row.raw_status
        ));
    }

    if report.has_unresolved() {
        output.println(
            "Unresolved rows follow the policy from --fallback-status, --keep-unresolved, or the config file (default: skip).",
        );
    } else {
        output.success(format!("Imported {} entries", report.imported));
    }
}
