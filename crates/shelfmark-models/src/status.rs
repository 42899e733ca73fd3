use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Canonical reading-status values used across all import sources during resolution
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CanonicalStatus {
    /// Wants the book but doesn't own it yet ("want to read" on Goodreads, "to-read" shelf)
    Wishlist,
    /// Owned but not started ("tbr", "on shelf" in most CSV exports)
    ToRead,
    /// Currently reading ("currently-reading" on Goodreads, "in progress" on StoryGraph)
    Reading,
    /// Finished reading ("read" on Goodreads, "finished" on StoryGraph)
    Read,
    /// Paused with intent to resume (no native equivalent on Goodreads)
    OnHold,
    /// Abandoned ("dnf", "did-not-finish" on StoryGraph)
    DidNotFinish,
}

impl CanonicalStatus {
    /// All statuses in declaration order
    pub const ALL: [CanonicalStatus; 6] = [
        CanonicalStatus::Wishlist,
        CanonicalStatus::ToRead,
        CanonicalStatus::Reading,
        CanonicalStatus::Read,
        CanonicalStatus::OnHold,
        CanonicalStatus::DidNotFinish,
    ];

    /// Stable label used in CLI output and JSON reports
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalStatus::Wishlist => "wishlist",
            CanonicalStatus::ToRead => "to-read",
            CanonicalStatus::Reading => "reading",
            CanonicalStatus::Read => "read",
            CanonicalStatus::OnHold => "on-hold",
            CanonicalStatus::DidNotFinish => "did-not-finish",
        }
    }
}

impl std::fmt::Display for CanonicalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("not a canonical status: '{0}'")]
pub struct ParseStatusError(pub String);

/// Strict parser for config values and CLI flags.
///
/// Accepts only the canonical names (case-insensitive, hyphens optional).
/// Synonyms like "finished" are rejected here; tolerant matching is the
/// resolver's job, not the model's.
impl FromStr for CanonicalStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wishlist" => Ok(CanonicalStatus::Wishlist),
            "to-read" | "toread" => Ok(CanonicalStatus::ToRead),
            "reading" => Ok(CanonicalStatus::Reading),
            "read" => Ok(CanonicalStatus::Read),
            "on-hold" | "onhold" => Ok(CanonicalStatus::OnHold),
            "did-not-finish" | "didnotfinish" | "dnf" => Ok(CanonicalStatus::DidNotFinish),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_canonical_names() {
        assert_eq!("wishlist".parse(), Ok(CanonicalStatus::Wishlist));
        assert_eq!("to-read".parse(), Ok(CanonicalStatus::ToRead));
        assert_eq!("reading".parse(), Ok(CanonicalStatus::Reading));
        assert_eq!("read".parse(), Ok(CanonicalStatus::Read));
        assert_eq!("on-hold".parse(), Ok(CanonicalStatus::OnHold));
        assert_eq!("did-not-finish".parse(), Ok(CanonicalStatus::DidNotFinish));
    }

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!("Reading".parse(), Ok(CanonicalStatus::Reading));
        assert_eq!("DNF".parse(), Ok(CanonicalStatus::DidNotFinish));
        assert_eq!("  On-Hold  ".parse(), Ok(CanonicalStatus::OnHold));
    }

    #[test]
    fn test_from_str_rejects_synonyms() {
        // Synonyms resolve through the fuzzy engine, not the strict parser
        assert!("finished".parse::<CanonicalStatus>().is_err());
        assert!("want to read".parse::<CanonicalStatus>().is_err());
        assert!("".parse::<CanonicalStatus>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for status in CanonicalStatus::ALL {
            assert_eq!(status.as_str().parse(), Ok(status));
        }
    }
}
