use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::types::ScouterName;

/// One audit-trail entry describing a validation or consistency issue.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Human-readable issue description, including the field path when known.
    pub message: String,
    /// Scouter the issue is attributed to; `None` for dataset-wide issues.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scouter: Option<ScouterName>,
}

/// Append-only diagnostic log plus the per-scouter leaderboards accumulated
/// across one cleaning pass.
///
/// Leaderboard maps keep first-seen insertion order; counts are finalized when
/// the pass ends. The log is never truncated within a run.
#[derive(Debug, Default)]
pub struct CleaningLog {
    diagnostics: Vec<Diagnostic>,
    error_counts: IndexMap<ScouterName, usize>,
    participation: IndexMap<ScouterName, usize>,
}

impl CleaningLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic, attributing it to `scouter` when known.
    pub fn warn(&mut self, message: impl Into<String>, scouter: Option<&str>) {
        let message = message.into();
        warn!(scouter = scouter.unwrap_or("-"), "{message}");
        if let Some(name) = scouter {
            *self.error_counts.entry(name.to_string()).or_insert(0) += 1;
        }
        self.diagnostics.push(Diagnostic {
            message,
            scouter: scouter.map(str::to_string),
        });
    }

    /// Count one submitted record for `scouter`.
    pub fn note_participation(&mut self, scouter: &str) {
        *self.participation.entry(scouter.to_string()).or_insert(0) += 1;
    }

    /// The ordered audit trail.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Diagnostics raised since index `start`, for callers that need the slice
    /// attributable to one validation call.
    pub fn diagnostics_since(&self, start: usize) -> &[Diagnostic] {
        &self.diagnostics[start..]
    }

    /// Per-scouter count of attributed diagnostics.
    pub fn error_counts(&self) -> &IndexMap<ScouterName, usize> {
        &self.error_counts
    }

    /// Per-scouter count of submitted records.
    pub fn participation(&self) -> &IndexMap<ScouterName, usize> {
        &self.participation
    }

    /// Total number of diagnostics raised so far.
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// True when no diagnostics were raised.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}
