use shelfmark_config::ImportConfig;
use shelfmark_core::{resolve, MatchKind, MatchResult};
use shelfmark_models::CanonicalStatus;
use tracing::warn;

use crate::report::{ImportReport, UnresolvedRow};

/// What to do with a row whose status cell does not resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnresolvedPolicy {
    /// Drop the row and record it in the report
    #[default]
    Skip,
    /// Keep the row with no status
    Keep,
    /// Keep the row with the given status
    Fallback(CanonicalStatus),
}

impl UnresolvedPolicy {
    /// Derive the policy from import configuration.
    ///
    /// A configured fallback status takes precedence over `keep_unresolved`.
    pub fn from_config(config: &ImportConfig) -> Self {
        match (config.fallback_status, config.keep_unresolved) {
            (Some(status), _) => UnresolvedPolicy::Fallback(status),
            (None, true) => UnresolvedPolicy::Keep,
            (None, false) => UnresolvedPolicy::Skip,
        }
    }
}

/// Run one status cell through the resolver, updating report counters.
///
/// Returns `None` when the policy drops the row, otherwise the status to
/// store on the entry.
pub(crate) fn resolve_status_cell(
    raw: Option<&str>,
    row: usize,
    title: &str,
    policy: UnresolvedPolicy,
    report: &mut ImportReport,
) -> Option<Option<CanonicalStatus>> {
    match resolve(raw) {
        MatchResult::Resolved { status, kind } => {
            match kind {
                MatchKind::Exact => report.exact += 1,
                MatchKind::Fuzzy(_) => report.fuzzy += 1,
            }
            Some(Some(status))
        }
        MatchResult::Unresolved => {
            report.unresolved.push(UnresolvedRow {
                row,
                title: title.to_string(),
                raw_status: raw.unwrap_or("").to_string(),
            });
            match policy {
                UnresolvedPolicy::Skip => {
                    warn!(row, title = %title, raw_status = ?raw, "Unresolved status, skipping row");
                    None
                }
                UnresolvedPolicy::Keep => Some(None),
                UnresolvedPolicy::Fallback(status) => {
                    warn!(row, title = %title, raw_status = ?raw, fallback = %status, "Unresolved status, using fallback");
                    Some(Some(status))
                }
            }
        }
    }
}
