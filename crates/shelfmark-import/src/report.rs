use serde::{Deserialize, Serialize};

/// A row whose status cell did not resolve to a canonical status
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UnresolvedRow {
    /// 1-based data row number (header row not counted)
    pub row: usize,
    pub title: String,
    pub raw_status: String,
}

/// What happened during one file import.
///
/// `imported + skipped == total_rows`; rows kept under the Keep or
/// Fallback policy count as imported. `unresolved` records every row whose
/// status cell failed to resolve, whatever the policy did with it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportReport {
    pub total_rows: usize,
    pub imported: usize,
    pub skipped: usize,
    pub exact: usize,
    pub fuzzy: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unresolved: Vec<UnresolvedRow>,
}

impl ImportReport {
    pub fn has_unresolved(&self) -> bool {
        !self.unresolved.is_empty()
    }
}
