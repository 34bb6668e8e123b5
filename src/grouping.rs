use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::record::RecordMeta;
use crate::types::TeamNumber;

/// One team's ordered match collection, as persisted between stages.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamMatches {
    /// Cleaned records for this team, in original input order.
    pub matches: Vec<Value>,
}

/// Partition cleaned records by the team named in their own metadata.
///
/// Single pass: a record for team T appends to T's collection, creating the
/// key on first occurrence, so teams appear in first-seen order and records
/// keep input order within each team. Records whose team number is unreadable
/// cannot be attributed and are skipped.
pub fn group_by_team(records: &[Value]) -> IndexMap<TeamNumber, Vec<Value>> {
    let mut teams: IndexMap<TeamNumber, Vec<Value>> = IndexMap::new();
    for record in records {
        let Some(team) = RecordMeta::of(record).team else {
            debug!("skipping record without a readable team number");
            continue;
        };
        teams.entry(team).or_default().push(record.clone());
    }
    teams
}
