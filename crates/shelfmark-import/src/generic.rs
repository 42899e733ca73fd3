use anyhow::{anyhow, Result};
use chrono::{NaiveDate, Utc};
use csv::Reader;
use shelfmark_config::ColumnMapping;
use shelfmark_models::{BookIds, LibraryEntry};
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use tracing::debug;

use crate::policy::{resolve_status_cell, UnresolvedPolicy};
use crate::report::ImportReport;

/// Parse an arbitrary library CSV using a configured column mapping
pub fn parse_csv<P: AsRef<Path>>(
    path: P,
    columns: &ColumnMapping,
    date_format: &str,
    policy: UnresolvedPolicy,
) -> Result<(Vec<LibraryEntry>, ImportReport)> {
    let file = File::open(path)?;
    let mut reader = Reader::from_reader(file);
    let mut entries = Vec::new();
    let mut report = ImportReport::default();

    let headers = reader.headers()?.clone();
    let header_map: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.to_string(), i))
        .collect();

    let available_columns: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    debug!("Available CSV columns: {:?}", available_columns);

    for col in [&columns.title, &columns.author, &columns.status] {
        if !header_map.contains_key(col) {
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

        let title = record
            .get(header_map[&columns.title])
            .unwrap_or("")
            .trim()
            .to_string();
        if title.is_empty() {
            debug!(row = row_count, "Skipping row with empty title");
            report.skipped += 1;
            continue;
        }
        let author = record
            .get(header_map[&columns.author])
            .unwrap_or("")
            .trim()
            .to_string();
        let raw_status = record.get(header_map[&columns.status]).unwrap_or("");

        let status =
            match resolve_status_cell(Some(raw_status), row_count, &title, policy, &mut report) {
                Some(status) => status,
                None => {
                    report.skipped += 1;
                    continue;
                }
            };

        let ids = columns
            .isbn
            .as_ref()
            .and_then(|name| header_map.get(name))
            .and_then(|&idx| record.get(idx))
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|isbn| {
                let mut ids = BookIds::new();
                if isbn.len() == 13 {
                    ids.isbn13 = Some(isbn.to_string());
                } else {
                    ids.isbn10 = Some(isbn.to_string());
                }
                ids
            });

        let date_added = columns
            .date_added
            .as_ref()
            .and_then(|name| header_map.get(name))
            .and_then(|&idx| record.get(idx))
            .and_then(|raw| {
                NaiveDate::parse_from_str(raw.trim(), date_format)
                    .ok()?
                    .and_hms_opt(0, 0, 0)?
                    .and_local_timezone(Utc)
                    .earliest()
            })
            .unwrap_or_else(|| {
                debug!(row = row_count, "No parseable date, using current time");
                Utc::now()
            });

        entries.push(LibraryEntry {
            title,
            author,
            ids,
            date_added,
            source: "generic".to_string(),
            status,
        });
        report.imported += 1;
    }

    debug!(
        total = report.total_rows,
        imported = report.imported,
        "Parsed generic CSV"
    );
    Ok((entries, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelfmark_config::default_column_mapping;
    use shelfmark_models::CanonicalStatus;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_with_default_mapping() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Title,Author,Status").unwrap();
        writeln!(file, "Dune,Frank Herbert,finished").unwrap();
        writeln!(file, "Hyperion,Dan Simmons,tbr").unwrap();

        let columns = default_column_mapping();
        let (entries, report) =
            parse_csv(file.path(), &columns, "%Y-%m-%d", UnresolvedPolicy::Skip).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].status, Some(CanonicalStatus::Read));
        assert_eq!(entries[1].status, Some(CanonicalStatus::ToRead));
        assert_eq!(report.exact, 2);
    }

    #[test]
    fn test_parse_with_custom_mapping_and_date() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "name,by,shelf,added,isbn").unwrap();
        writeln!(file, "Middlemarch,George Eliot,on hold,2019-11-30,9780140436617").unwrap();

        let columns = ColumnMapping {
            title: "name".to_string(),
            author: "by".to_string(),
            status: "shelf".to_string(),
            isbn: Some("isbn".to_string()),
            date_added: Some("added".to_string()),
        };
        let (entries, _) =
            parse_csv(file.path(), &columns, "%Y-%m-%d", UnresolvedPolicy::Skip).unwrap();

        assert_eq!(entries[0].title, "Middlemarch");
        assert_eq!(entries[0].status, Some(CanonicalStatus::OnHold));
        assert_eq!(
            entries[0].ids.as_ref().unwrap().isbn13,
            Some("9780140436617".to_string())
        );
        assert_eq!(
            entries[0].date_added.format("%Y-%m-%d").to_string(),
            "2019-11-30"
        );
    }

    #[test]
    fn test_missing_mapped_column() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Title,Author").unwrap();
        writeln!(file, "Dune,Frank Herbert").unwrap();

        let columns = default_column_mapping();
        let err = parse_csv(file.path(), &columns, "%Y-%m-%d", UnresolvedPolicy::Skip).unwrap_err();
        assert!(err.to_string().contains("Missing required column: Status"));
    }
}
