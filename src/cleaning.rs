use serde_json::Value;
use tracing::info;

use crate::consistency::ConsistencyCounters;
use crate::diagnostics::CleaningLog;
use crate::errors::PipelineError;
use crate::record::RecordMeta;
use crate::schema::Schema;
use crate::validate::validate_record;

/// Everything produced by one cleaning pass.
#[derive(Debug)]
pub struct CleaningOutcome {
    /// Cleaned records, in input order.
    pub records: Vec<Value>,
    /// Audit trail plus scouter error/participation leaderboards.
    pub log: CleaningLog,
    /// Cross-record counters, already analyzed.
    pub counters: ConsistencyCounters,
}

/// Run the full cleaning pass over `raw`.
///
/// Every record is validated in input order; participation is attributed to
/// the record's scouter (or the shared unknown bucket) before validation, so
/// participation counts always sum to the number of input records. After the
/// pass the consistency analyzer runs once over the accumulated counters.
///
/// Fails fast with a structural error when `raw` is not an array.
pub fn clean(raw: &Value, schema: &Schema) -> Result<CleaningOutcome, PipelineError> {
    let entries = raw.as_array().ok_or_else(|| {
        PipelineError::Structure("raw match data must be an array of records".to_string())
    })?;
    let mut log = CleaningLog::new();
    let mut counters = ConsistencyCounters::new();
    let mut records = Vec::with_capacity(entries.len());
    for entry in entries {
        let scouter = RecordMeta::of(entry).scouter_or_unknown();
        log.note_participation(&scouter);
        let cleaned = validate_record(entry, schema, &scouter, &mut log);
        counters.observe(&RecordMeta::of(&cleaned));
        records.push(cleaned);
    }
    counters.analyze(&mut log);
    info!(
        records = records.len(),
        diagnostics = log.len(),
        "cleaning pass complete"
    );
    Ok(CleaningOutcome {
        records,
        log,
        counters,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_array_input_is_a_structural_error() {
        let err = clean(&json!({ "not": "an array" }), &Schema::default_match_schema())
            .expect_err("structural error");
        assert!(matches!(err, PipelineError::Structure(_)));
    }

    #[test]
    fn empty_input_yields_empty_outcome() {
        let outcome = clean(&json!([]), &Schema::default_match_schema()).expect("clean");
        assert!(outcome.records.is_empty());
        assert!(outcome.log.is_empty());
        assert!(outcome.log.participation().is_empty());
    }

    #[test]
    fn output_order_matches_input_order() {
        let raw = json!([
            { "metadata": { "scouterName": "A", "matchNumber": 1, "robotTeam": 1, "robotPosition": "red_1" } },
            { "metadata": { "scouterName": "B", "matchNumber": 1, "robotTeam": 2, "robotPosition": "red_2" } },
        ]);
        let outcome = clean(&raw, &Schema::default_match_schema()).expect("clean");
        assert_eq!(outcome.records.len(), 2);
        assert_eq!(
            outcome.records[0].pointer("/metadata/scouterName"),
            Some(&json!("A"))
        );
        assert_eq!(
            outcome.records[1].pointer("/metadata/scouterName"),
            Some(&json!("B"))
        );
    }

    #[test]
    fn unreadable_scouter_participates_as_unknown() {
        let raw = json!([{ "var1": 3 }]);
        let outcome = clean(&raw, &Schema::default_match_schema()).expect("clean");
        assert_eq!(outcome.log.participation().get("Unknown"), Some(&1));
    }

    #[test]
    fn counters_reflect_cleaned_metadata() {
        let raw = json!([
            {
                "metadata": { "scouterName": "A", "matchNumber": 4, "robotTeam": 100, "robotPosition": "blue_9" },
                "var1": 1, "var2": "x", "var3": false,
            },
        ]);
        let outcome = clean(&raw, &Schema::default_match_schema()).expect("clean");
        assert_eq!(outcome.counters.team_match_counts().get(&100), Some(&1));
        // The repaired label is observed, not the raw out-of-enum one.
        assert!(outcome.counters.match_positions()[&4].contains("unknown"));
    }
}
