use serde::{Deserialize, Serialize};

/// Normalized book identifiers from all import sources
///
/// Aggregates IDs from the supported export formats (Goodreads, StoryGraph)
/// so entries from different files can be matched and deduplicated.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookIds {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn10: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn13: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goodreads_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storygraph_id: Option<String>,
}

impl BookIds {
    /// Create an empty BookIds struct
    pub fn new() -> Self {
        Self::default()
    }

    /// True if no identifier is set
    pub fn is_empty(&self) -> bool {
        self.isbn10.is_none()
            && self.isbn13.is_none()
            && self.goodreads_id.is_none()
            && self.storygraph_id.is_none()
    }

    /// Get the primary identifier (prefer isbn13, fallback to others)
    ///
    /// Returns a string representation of the best available ID for grouping and display.
    pub fn primary_id(&self) -> Option<String> {
        self.isbn13
            .clone()
            .or_else(|| self.isbn10.clone())
            .or_else(|| self.goodreads_id.map(|id| format!("goodreads:{}", id)))
            .or_else(|| self.storygraph_id.as_ref().map(|id| format!("storygraph:{}", id)))
    }

    /// Merge IDs from another source, only filling in None values.
    /// Existing values are not overwritten.
    pub fn merge(&mut self, other: &BookIds) {
        if self.isbn10.is_none() {
            self.isbn10 = other.isbn10.clone();
        }
        if self.isbn13.is_none() {
            self.isbn13 = other.isbn13.clone();
        }
        if self.goodreads_id.is_none() {
            self.goodreads_id = other.goodreads_id;
        }
        if self.storygraph_id.is_none() {
            self.storygraph_id = other.storygraph_id.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_id_prefers_isbn13() {
        let ids = BookIds {
            isbn10: Some("0316769487".to_string()),
            isbn13: Some("9780316769488".to_string()),
            goodreads_id: Some(5107),
            storygraph_id: None,
        };
        assert_eq!(ids.primary_id(), Some("9780316769488".to_string()));
    }

    #[test]
    fn test_primary_id_falls_back_to_service_ids() {
        let ids = BookIds {
            goodreads_id: Some(5107),
            ..BookIds::new()
        };
        assert_eq!(ids.primary_id(), Some("goodreads:5107".to_string()));
        assert!(BookIds::new().primary_id().is_none());
    }

    #[test]
    fn test_merge_fills_only_missing_ids() {
        let mut ids = BookIds {
            isbn10: Some("0316769487".to_string()),
            ..BookIds::new()
        };
        let other = BookIds {
            isbn10: Some("different".to_string()),
            isbn13: Some("9780316769488".to_string()),
            ..BookIds::new()
        };
        ids.merge(&other);
        assert_eq!(ids.isbn10, Some("0316769487".to_string()));
        assert_eq!(ids.isbn13, Some("9780316769488".to_string()));
    }
}
