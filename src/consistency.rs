use std::collections::{BTreeMap, BTreeSet};

use crate::diagnostics::CleaningLog;
use crate::record::{RecordMeta, RobotPosition};
use crate::types::{MatchNumber, TeamNumber};

/// Cross-record counters populated incrementally while records are cleaned.
///
/// The analyzer itself runs once, after the full cleaning pass; it only reads
/// these counters and never touches the records.
#[derive(Debug, Default)]
pub struct ConsistencyCounters {
    team_match_counts: BTreeMap<TeamNumber, usize>,
    match_positions: BTreeMap<MatchNumber, BTreeSet<String>>,
}

impl ConsistencyCounters {
    /// Create empty counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one cleaned record's metadata into the counters.
    ///
    /// Position labels are recorded verbatim (including the `"unknown"`
    /// sentinel), so a repaired record still counts as an observation for its
    /// match without claiming any of the six legal slots.
    pub fn observe(&mut self, meta: &RecordMeta) {
        if let Some(team) = meta.team {
            *self.team_match_counts.entry(team).or_insert(0) += 1;
        }
        if let (Some(number), Some(label)) = (meta.match_number, meta.position_label.as_ref()) {
            self.match_positions
                .entry(number)
                .or_default()
                .insert(label.clone());
        }
    }

    /// Emit dataset-wide diagnostics after the full cleaning pass.
    ///
    /// - one diagnostic when teams disagree on match count, listing the teams
    ///   behind each distinct count;
    /// - one diagnostic per match whose observed positions do not cover all
    ///   six legal slots, naming the missing ones.
    pub fn analyze(&self, log: &mut CleaningLog) {
        let mut by_count: BTreeMap<usize, Vec<TeamNumber>> = BTreeMap::new();
        for (team, count) in &self.team_match_counts {
            by_count.entry(*count).or_default().push(*team);
        }
        if by_count.len() > 1 {
            let lines: Vec<String> = by_count
                .iter()
                .map(|(count, teams)| format!("  teams with {count} matches: {teams:?}"))
                .collect();
            log.warn(
                format!("inconsistent match counts detected:\n{}", lines.join("\n")),
                None,
            );
        }
        for (number, seen) in &self.match_positions {
            let missing: Vec<&str> = RobotPosition::ALL
                .iter()
                .map(|position| position.as_str())
                .filter(|position| !seen.contains(*position))
                .collect();
            if !missing.is_empty() {
                log.warn(
                    format!("match {number} is missing positions: {}", missing.join(", ")),
                    None,
                );
            }
        }
    }

    /// Per-team match counts accumulated so far.
    pub fn team_match_counts(&self) -> &BTreeMap<TeamNumber, usize> {
        &self.team_match_counts
    }

    /// Per-match observed position labels accumulated so far.
    pub fn match_positions(&self) -> &BTreeMap<MatchNumber, BTreeSet<String>> {
        &self.match_positions
    }
}
