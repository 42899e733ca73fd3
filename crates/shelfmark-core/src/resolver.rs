use std::collections::HashMap;
use std::sync::OnceLock;

use shelfmark_models::CanonicalStatus;
use tracing::debug;

use crate::distance::levenshtein;

/// Maximum edit distance at which a fuzzy match is still accepted
pub const MAX_FUZZY_DISTANCE: usize = 2;

/// Synonym table in declaration order.
///
/// Every key is pre-normalized (lowercase, trimmed). The fuzzy scan walks
/// this slice front to back and replaces the running best only on a
/// strictly smaller distance, so equal-distance ties resolve to the
/// earliest declared key.
const SYNONYMS: &[(&str, CanonicalStatus)] = &[
    ("wishlist", CanonicalStatus::Wishlist),
    ("want to read", CanonicalStatus::Wishlist),
    ("to-read", CanonicalStatus::Wishlist),
    ("want", CanonicalStatus::Wishlist),
    ("planned", CanonicalStatus::Wishlist),
    ("to read", CanonicalStatus::ToRead),
    ("owned", CanonicalStatus::ToRead),
    ("unread", CanonicalStatus::ToRead),
    ("not started", CanonicalStatus::ToRead),
    ("tbr", CanonicalStatus::ToRead),
    ("to-be-read", CanonicalStatus::ToRead),
    ("on shelf", CanonicalStatus::ToRead),
    ("reading", CanonicalStatus::Reading),
    ("currently reading", CanonicalStatus::Reading),
    ("in progress", CanonicalStatus::Reading),
    ("started", CanonicalStatus::Reading),
    ("current", CanonicalStatus::Reading),
    ("currently-reading", CanonicalStatus::Reading),
    ("read", CanonicalStatus::Read),
    ("finished", CanonicalStatus::Read),
    ("completed", CanonicalStatus::Read),
    ("done", CanonicalStatus::Read),
    ("on hold", CanonicalStatus::OnHold),
    ("on-hold", CanonicalStatus::OnHold),
    ("paused", CanonicalStatus::OnHold),
    ("suspended", CanonicalStatus::OnHold),
    ("dnf", CanonicalStatus::DidNotFinish),
    ("did not finish", CanonicalStatus::DidNotFinish),
    ("abandoned", CanonicalStatus::DidNotFinish),
    ("quit", CanonicalStatus::DidNotFinish),
    ("stopped", CanonicalStatus::DidNotFinish),
];

fn synonym_map() -> &'static HashMap<&'static str, CanonicalStatus> {
    static MAP: OnceLock<HashMap<&'static str, CanonicalStatus>> = OnceLock::new();
    MAP.get_or_init(|| SYNONYMS.iter().copied().collect())
}

/// Iterate the synonym table in declaration order
pub fn synonym_entries() -> impl Iterator<Item = (&'static str, CanonicalStatus)> {
    SYNONYMS.iter().copied()
}

/// How a resolved status was matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Normalized input was present verbatim as a synonym key
    Exact,
    /// Nearest synonym key was within the edit-distance threshold
    Fuzzy(usize),
}

/// Outcome of resolving one raw status string.
///
/// `Unresolved` is a normal value, not an error: the caller decides the
/// fallback policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    Resolved {
        status: CanonicalStatus,
        kind: MatchKind,
    },
    Unresolved,
}

impl MatchResult {
    pub fn status(&self) -> Option<CanonicalStatus> {
        match self {
            MatchResult::Resolved { status, .. } => Some(*status),
            MatchResult::Unresolved => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, MatchResult::Resolved { .. })
    }
}

/// Resolve a raw status string to a canonical status.
///
/// Trims and ASCII-lowercases the input, tries an O(1) exact lookup, then
/// falls back to a Levenshtein scan over every synonym key, accepting the
/// minimum distance when it is at most [`MAX_FUZZY_DISTANCE`].
pub fn resolve(input: Option<&str>) -> MatchResult {
    let Some(raw) = input else {
        return MatchResult::Unresolved;
    };

    let normalized = raw.trim().to_ascii_lowercase();
    if normalized.is_empty() {
        return MatchResult::Unresolved;
    }

    if let Some(&status) = synonym_map().get(normalized.as_str()) {
        return MatchResult::Resolved {
            status,
            kind: MatchKind::Exact,
        };
    }

    let mut best: Option<(usize, CanonicalStatus)> = None;
    for &(key, status) in SYNONYMS {
        let dist = levenshtein(&normalized, key);
        if best.map_or(true, |(best_dist, _)| dist < best_dist) {
            best = Some((dist, status));
        }
    }

    match best {
        Some((dist, status)) if dist <= MAX_FUZZY_DISTANCE => {
            debug!(input = %normalized, distance = dist, status = %status, "Fuzzy status match");
            MatchResult::Resolved {
                status,
                kind: MatchKind::Fuzzy(dist),
            }
        }
        _ => MatchResult::Unresolved,
    }
}
