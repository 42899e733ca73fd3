use anyhow::{anyhow, Result};
use chrono::Utc;
use csv::Reader;
use shelfmark_models::{BookIds, LibraryEntry};
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use tracing::debug;

use crate::goodreads::parse_export_date;
use crate::policy::{resolve_status_cell, UnresolvedPolicy};
use crate::report::ImportReport;

/// Parse a StoryGraph library export CSV
pub fn parse_export<P: AsRef<Path>>(
    path: P,
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

    let required = ["Title", "Authors", "Read Status"];
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
        let author = record.get(header_map["Authors"]).unwrap_or("").trim().to_string();
        let raw_status = record.get(header_map["Read Status"]).unwrap_or("");

        let status =
            match resolve_status_cell(Some(raw_status), row_count, &title, policy, &mut report) {
                Some(status) => status,
                None => {
                    report.skipped += 1;
                    continue;
                }
            };

        let ids = header_map
            .get("ISBN/UID")
            .and_then(|&idx| record.get(idx))
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(classify_isbn_or_uid);

        let date_added = header_map
            .get("Date Added")
            .and_then(|&idx| record.get(idx))
            .and_then(parse_export_date)
            .unwrap_or_else(|| {
                debug!(row = row_count, "No parseable Date Added, using current time");
                Utc::now()
            });

        entries.push(LibraryEntry {
            title,
            author,
            ids,
            date_added,
            source: "storygraph".to_string(),
            status,
        });
        report.imported += 1;

        if entries.len() <= 3 {
            debug!(
                row = row_count,
                title = %entries.last().unwrap().title,
                status = ?entries.last().unwrap().status,
                "Added StoryGraph entry"
            );
        }
    }

    debug!(
        total = report.total_rows,
        imported = report.imported,
        "Parsed StoryGraph export"
    );
    Ok((entries, report))
}

/// The ISBN/UID column carries either a real ISBN or an opaque StoryGraph
/// identifier for editions without one.
fn classify_isbn_or_uid(value: &str) -> BookIds {
    let mut ids = BookIds::new();
    let digits_only = value.chars().all(|c| c.is_ascii_digit() || c == 'X');
    match value.len() {
        13 if digits_only => ids.isbn13 = Some(value.to_string()),
        10 if digits_only => ids.isbn10 = Some(value.to_string()),
        _ => ids.storygraph_id = Some(value.to_string()),
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelfmark_models::CanonicalStatus;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_export_csv() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Title,Authors,ISBN/UID,Read Status,Date Added").unwrap();
        writeln!(
            file,
            "The Fifth Season,N.K. Jemisin,9780316229296,read,2021/06/01"
        )
        .unwrap();
        writeln!(
            file,
            "The Hobbit,J.R.R. Tolkien,0345339681,currently-reading,2021/07/12"
        )
        .unwrap();
        writeln!(
            file,
            "Project Hail Mary,Andy Weir,sg-edition-991,did-not-finish,2021/08/20"
        )
        .unwrap();
        file
    }

    #[test]
    fn test_parse_export() {
        let file = create_export_csv();
        let (entries, report) = parse_export(file.path(), UnresolvedPolicy::Skip).unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(report.imported, 3);

        assert_eq!(entries[0].status, Some(CanonicalStatus::Read));
        assert_eq!(
            entries[0].ids.as_ref().unwrap().isbn13,
            Some("9780316229296".to_string())
        );
        assert_eq!(entries[0].source, "storygraph");

        assert_eq!(entries[1].status, Some(CanonicalStatus::Reading));
        assert_eq!(
            entries[1].ids.as_ref().unwrap().isbn10,
            Some("0345339681".to_string())
        );

        // "did-not-finish" is distance 2 from "did not finish"
        assert_eq!(entries[2].status, Some(CanonicalStatus::DidNotFinish));
        assert_eq!(
            entries[2].ids.as_ref().unwrap().storygraph_id,
            Some("sg-edition-991".to_string())
        );
        assert_eq!(report.fuzzy, 1);
        assert_eq!(report.exact, 2);
    }

    #[test]
    fn test_missing_required_column() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Title,Authors").unwrap();
        writeln!(file, "Some Book,Somebody").unwrap();

        let err = parse_export(file.path(), UnresolvedPolicy::Skip).unwrap_err();
        assert!(err.to_string().contains("Read Status"));
    }

    #[test]
    fn test_missing_date_column_falls_back_to_now() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Title,Authors,Read Status").unwrap();
        writeln!(file, "Some Book,Somebody,read").unwrap();

        let before = Utc::now();
        let (entries, _) = parse_export(file.path(), UnresolvedPolicy::Skip).unwrap();
        assert!(entries[0].date_added >= before);
        assert!(entries[0].ids.is_none());
    }
}
