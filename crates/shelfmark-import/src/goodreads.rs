use anyhow::{anyhow, Result};
use chrono::{NaiveDate, Utc};
use csv::Reader;
use shelfmark_models::{BookIds, LibraryEntry};
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use tracing::debug;

use crate::policy::{resolve_status_cell, UnresolvedPolicy};
use crate::report::ImportReport;

/// Parse a Goodreads library export CSV
pub fn parse_export<P: AsRef<Path>>(
    path: P,
    policy: UnresolvedPolicy,
) -> Result<(Vec<LibraryEntry>, ImportReport)> {
    let file = File::open(path)?;
    let mut reader = Reader::from_reader(file);
    let mut entries = Vec::new();
    let mut report = ImportReport::default();

    // Read header
    let headers = reader.headers()?.clone();
    let header_map: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.to_string(), i))
        .collect();

    let available_columns: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    debug!("Available CSV columns: {:?}", available_columns);

    // Required columns (IDs and dates are optional)
    let required = ["Title", "Author", "Exclusive Shelf"];
    for col in &required {
        if !header_map.contains_key(*col) {
            return Err(anyhow!(
                "Missing required column: {}. Available columns: {:?}",
                col,
                available_columns
            ));
        }
    }

    let mut row_count = 0;
    for result in reader.records() {
        let record = result?;
        row_count += 1;
        report.total_rows += 1;

        let title = record.get(header_map["Title"]).unwrap_or("").trim().to_string();
        if title.is_empty() {
            debug!(row = row_count, "Skipping row with empty title");
            report.skipped += 1;
            continue;
        }
        let author = record.get(header_map["Author"]).unwrap_or("").trim().to_string();
        let shelf = record.get(header_map["Exclusive Shelf"]).unwrap_or("");

        let status = match resolve_status_cell(Some(shelf), row_count, &title, policy, &mut report)
        {
            Some(status) => status,
            None => {
                report.skipped += 1;
                continue;
            }
        };

        let mut ids = BookIds::new();
        if let Some(&idx) = header_map.get("Book Id") {
            ids.goodreads_id = record.get(idx).and_then(|v| v.trim().parse::<u64>().ok());
        }
        if let Some(&idx) = header_map.get("ISBN") {
            ids.isbn10 = record.get(idx).and_then(unwrap_isbn);
        }
        if let Some(&idx) = header_map.get("ISBN13") {
            ids.isbn13 = record.get(idx).and_then(unwrap_isbn);
        }

        // Parse date: YYYY/MM/DD -> DateTime<Utc>, current time when missing
        let date_added = header_map
            .get("Date Added")
            .and_then(|&idx| record.get(idx))
            .and_then(|raw| parse_export_date(raw))
            .unwrap_or_else(|| {
                debug!(row = row_count, "No parseable Date Added, using current time");
                Utc::now()
            });

        entries.push(LibraryEntry {
            title,
            author,
            ids: if ids.is_empty() { None } else { Some(ids) },
            date_added,
            source: "goodreads".to_string(),
            status,
        });
        report.imported += 1;

        // Debug first few items added
        if entries.len() <= 3 {
            debug!(
                row = row_count,
                title = %entries.last().unwrap().title,
                status = ?entries.last().unwrap().status,
                "Added Goodreads entry"
            );
        }
    }

    debug!(
        total = report.total_rows,
        imported = report.imported,
        "Parsed Goodreads export"
    );
    Ok((entries, report))
}

/// Goodreads wraps ISBN cells as ="0316769487" so spreadsheets don't
/// mangle them; unwrap and drop empty cells.
fn unwrap_isbn(raw: &str) -> Option<String> {
    let cleaned = raw.trim();
    let cleaned = cleaned
        .strip_prefix("=\"")
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(cleaned);
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

pub(crate) fn parse_export_date(raw: &str) -> Option<chrono::DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y/%m/%d")
        .ok()?
        .and_hms_opt(0, 0, 0)?
        .and_local_timezone(Utc)
        .earliest()
}
