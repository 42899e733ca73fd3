use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::book_ids::BookIds;
use crate::status::CanonicalStatus;

/// One library entry produced by an importer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LibraryEntry {
    pub title: String,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<BookIds>,
    pub date_added: DateTime<Utc>,
    pub source: String, // Which importer this entry came from
    pub status: Option<CanonicalStatus>, // None when the raw status didn't resolve and the policy keeps the row
}
