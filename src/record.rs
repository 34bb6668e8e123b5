use serde_json::Value;

use crate::constants::metadata;
use crate::types::{MatchNumber, ScouterName, TeamNumber};

/// The six legal robot starting positions on the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RobotPosition {
    /// Red alliance, station 1.
    Red1,
    /// Red alliance, station 2.
    Red2,
    /// Red alliance, station 3.
    Red3,
    /// Blue alliance, station 1.
    Blue1,
    /// Blue alliance, station 2.
    Blue2,
    /// Blue alliance, station 3.
    Blue3,
}

impl RobotPosition {
    /// All positions in canonical field order.
    pub const ALL: [RobotPosition; 6] = [
        RobotPosition::Red1,
        RobotPosition::Red2,
        RobotPosition::Red3,
        RobotPosition::Blue1,
        RobotPosition::Blue2,
        RobotPosition::Blue3,
    ];

    /// Wire name as scouters record it.
    pub fn as_str(self) -> &'static str {
        match self {
            RobotPosition::Red1 => "red_1",
            RobotPosition::Red2 => "red_2",
            RobotPosition::Red3 => "red_3",
            RobotPosition::Blue1 => "blue_1",
            RobotPosition::Blue2 => "blue_2",
            RobotPosition::Blue3 => "blue_3",
        }
    }

    /// Parse a wire name; `None` for anything outside the six legal values.
    pub fn parse(text: &str) -> Option<Self> {
        RobotPosition::ALL
            .into_iter()
            .find(|position| position.as_str() == text)
    }
}

/// Metadata fields extracted from one record, where readable.
///
/// Extraction is best-effort by design: raw records carry no guarantees, and
/// cleaned records may have dropped unrecoverable metadata fields.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordMeta {
    /// Scouter name, when present and textual.
    pub scouter: Option<ScouterName>,
    /// Match number, when present and integral.
    pub match_number: Option<MatchNumber>,
    /// Team number, when present and integral.
    pub team: Option<TeamNumber>,
    /// Raw position label, when present and textual (may be out-of-enum).
    pub position_label: Option<String>,
}

impl RecordMeta {
    /// Extract metadata from `record`; unreadable fields come back as `None`.
    pub fn of(record: &Value) -> Self {
        let meta = record.get(metadata::METADATA_KEY);
        let field = |key: &str| meta.and_then(|meta| meta.get(key));
        Self {
            scouter: field(metadata::SCOUTER_KEY)
                .and_then(Value::as_str)
                .map(str::to_string),
            match_number: field(metadata::MATCH_KEY).and_then(Value::as_i64),
            team: field(metadata::TEAM_KEY).and_then(Value::as_i64),
            position_label: field(metadata::POSITION_KEY)
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }

    /// The position as one of the six legal values, when it is one.
    pub fn position(&self) -> Option<RobotPosition> {
        self.position_label
            .as_deref()
            .and_then(RobotPosition::parse)
    }

    /// Scouter name used for attribution, defaulting to the shared bucket for
    /// records whose scouter is unreadable.
    pub fn scouter_or_unknown(&self) -> ScouterName {
        self.scouter
            .clone()
            .unwrap_or_else(|| metadata::UNKNOWN_SCOUTER.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_round_trips_all_positions() {
        for position in RobotPosition::ALL {
            assert_eq!(RobotPosition::parse(position.as_str()), Some(position));
        }
        assert_eq!(RobotPosition::parse("blue_9"), None);
        assert_eq!(RobotPosition::parse("unknown"), None);
    }

    #[test]
    fn extracts_metadata_best_effort() {
        let record = json!({
            "metadata": {
                "scouterName": "Alice",
                "matchNumber": 12,
                "robotTeam": 254,
                "robotPosition": "red_2",
            }
        });
        let meta = RecordMeta::of(&record);
        assert_eq!(meta.scouter.as_deref(), Some("Alice"));
        assert_eq!(meta.match_number, Some(12));
        assert_eq!(meta.team, Some(254));
        assert_eq!(meta.position(), Some(RobotPosition::Red2));
    }

    #[test]
    fn unreadable_scouter_falls_back_to_unknown() {
        let meta = RecordMeta::of(&json!({ "metadata": { "scouterName": 7 } }));
        assert_eq!(meta.scouter, None);
        assert_eq!(meta.scouter_or_unknown(), "Unknown");
        assert_eq!(RecordMeta::of(&json!("not a record")).scouter_or_unknown(), "Unknown");
    }
}
