use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::stats as columns;
use crate::types::{FieldPath, StatKey, TeamNumber};

/// One statistics cell: an integral count, a scalar, or a categorical
/// value-count map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    /// Integral statistic (`number_of_matches`).
    Count(u64),
    /// Scalar statistic (averages, extrema, deviations, percentages).
    Number(f64),
    /// Distinct-value occurrence counts for a categorical field.
    ValueCounts(IndexMap<String, u64>),
}

impl StatValue {
    /// The cell as a scalar, when it is one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            StatValue::Count(count) => Some(*count as f64),
            StatValue::Number(number) => Some(*number),
            StatValue::ValueCounts(_) => None,
        }
    }
}

/// Per-team statistics row, keyed by derived column name.
pub type TeamStats = IndexMap<StatKey, StatValue>;

/// Full statistics table, one row per team, in grouping order.
pub type StatsTable = IndexMap<TeamNumber, TeamStats>;

/// A leaf cell classified at read time.
#[derive(Clone, Debug, PartialEq)]
enum Cell {
    Numeric(f64),
    Boolean(bool),
    Text(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CellKind {
    Numeric,
    Boolean,
    Text,
}

/// Compute the statistics row for one team's match collection.
///
/// Always emits `number_of_matches`. Every leaf field observed across the
/// collection (nested objects flatten to dotted paths) contributes columns
/// keyed by its representative value kind:
///
/// - numeric: `_average`, `_min`, `_max`, `_std_dev` (sample deviation,
///   defined as 0 for a single observation),
/// - boolean: `_percent_true`,
/// - text: `_value_counts`.
///
/// When malformed inputs mix kinds within one field, the majority kind wins;
/// ties break Numeric over Boolean over Text. An empty collection yields only
/// `number_of_matches = 0`.
pub fn summarize(matches: &[Value]) -> TeamStats {
    let mut row = TeamStats::new();
    row.insert(
        columns::MATCH_COUNT_KEY.to_string(),
        StatValue::Count(matches.len() as u64),
    );
    let mut fields: IndexMap<FieldPath, Vec<Cell>> = IndexMap::new();
    for record in matches {
        collect_leaf_cells(record, "", &mut fields);
    }
    for (path, cells) in &fields {
        match representative_kind(cells) {
            CellKind::Numeric => summarize_numeric(&mut row, path, cells),
            CellKind::Boolean => summarize_boolean(&mut row, path, cells),
            CellKind::Text => summarize_text(&mut row, path, cells),
        }
    }
    row
}

/// Compute the full statistics table, one row per team in grouping order.
pub fn summarize_teams(teams: &IndexMap<TeamNumber, Vec<Value>>) -> StatsTable {
    teams
        .iter()
        .map(|(team, matches)| (*team, summarize(matches)))
        .collect()
}

fn collect_leaf_cells(value: &Value, prefix: &str, out: &mut IndexMap<FieldPath, Vec<Cell>>) {
    match value {
        Value::Object(map) => {
            for (key, value) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                collect_leaf_cells(value, &path, out);
            }
        }
        Value::Number(number) => {
            if let Some(number) = number.as_f64() {
                out.entry(prefix.to_string())
                    .or_default()
                    .push(Cell::Numeric(number));
            }
        }
        Value::Bool(flag) => {
            out.entry(prefix.to_string())
                .or_default()
                .push(Cell::Boolean(*flag));
        }
        Value::String(text) => {
            out.entry(prefix.to_string())
                .or_default()
                .push(Cell::Text(text.clone()));
        }
        // Cleaned records carry no arrays or nulls at leaves.
        Value::Array(_) | Value::Null => {}
    }
}

fn representative_kind(cells: &[Cell]) -> CellKind {
    let mut numeric = 0usize;
    let mut boolean = 0usize;
    let mut text = 0usize;
    for cell in cells {
        match cell {
            Cell::Numeric(_) => numeric += 1,
            Cell::Boolean(_) => boolean += 1,
            Cell::Text(_) => text += 1,
        }
    }
    if numeric >= boolean && numeric >= text {
        CellKind::Numeric
    } else if boolean >= text {
        CellKind::Boolean
    } else {
        CellKind::Text
    }
}

fn summarize_numeric(row: &mut TeamStats, path: &str, cells: &[Cell]) {
    let values: Vec<f64> = cells
        .iter()
        .filter_map(|cell| match cell {
            Cell::Numeric(number) => Some(*number),
            _ => None,
        })
        .collect();
    if values.is_empty() {
        return;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    row.insert(
        format!("{path}{}", columns::SUFFIX_AVERAGE),
        StatValue::Number(mean),
    );
    row.insert(
        format!("{path}{}", columns::SUFFIX_MIN),
        StatValue::Number(min),
    );
    row.insert(
        format!("{path}{}", columns::SUFFIX_MAX),
        StatValue::Number(max),
    );
    row.insert(
        format!("{path}{}", columns::SUFFIX_STD_DEV),
        StatValue::Number(sample_std_dev(&values, mean)),
    );
}

fn summarize_boolean(row: &mut TeamStats, path: &str, cells: &[Cell]) {
    let flags: Vec<bool> = cells
        .iter()
        .filter_map(|cell| match cell {
            Cell::Boolean(flag) => Some(*flag),
            _ => None,
        })
        .collect();
    if flags.is_empty() {
        return;
    }
    let truthy = flags.iter().filter(|flag| **flag).count();
    row.insert(
        format!("{path}{}", columns::SUFFIX_PERCENT_TRUE),
        StatValue::Number(100.0 * truthy as f64 / flags.len() as f64),
    );
}

fn summarize_text(row: &mut TeamStats, path: &str, cells: &[Cell]) {
    let mut counts: IndexMap<String, u64> = IndexMap::new();
    for cell in cells {
        if let Cell::Text(text) = cell {
            *counts.entry(text.clone()).or_insert(0) += 1;
        }
    }
    if counts.is_empty() {
        return;
    }
    row.insert(
        format!("{path}{}", columns::SUFFIX_VALUE_COUNTS),
        StatValue::ValueCounts(counts),
    );
}

/// Sample standard deviation; 0.0 for fewer than two observations.
fn sample_std_dev(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let variance = values
        .iter()
        .map(|value| (value - mean).powi(2))
        .sum::<f64>()
        / (values.len() - 1) as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn close(left: f64, right: f64) -> bool {
        (left - right).abs() < 1e-9
    }

    #[test]
    fn empty_collection_emits_only_the_match_count() {
        let row = summarize(&[]);
        assert_eq!(row.len(), 1);
        assert_eq!(row[columns::MATCH_COUNT_KEY], StatValue::Count(0));
    }

    #[test]
    fn numeric_fields_get_four_statistics() {
        let matches = vec![json!({ "score": 4 }), json!({ "score": 8 })];
        let row = summarize(&matches);
        assert_eq!(row["number_of_matches"], StatValue::Count(2));
        assert_eq!(row["score_average"], StatValue::Number(6.0));
        assert_eq!(row["score_min"], StatValue::Number(4.0));
        assert_eq!(row["score_max"], StatValue::Number(8.0));
        let std_dev = row["score_std_dev"].as_number().expect("scalar std dev");
        // Sample deviation of {4, 8}.
        assert!(close(std_dev, 8.0_f64.sqrt()));
    }

    #[test]
    fn single_observation_has_zero_deviation() {
        let row = summarize(&[json!({ "score": 4 })]);
        assert_eq!(row["score_std_dev"], StatValue::Number(0.0));
    }

    #[test]
    fn boolean_fields_report_percent_true() {
        let matches = vec![
            json!({ "climbed": true }),
            json!({ "climbed": false }),
            json!({ "climbed": true }),
            json!({ "climbed": true }),
        ];
        let row = summarize(&matches);
        assert_eq!(row["climbed_percent_true"], StatValue::Number(75.0));
    }

    #[test]
    fn text_fields_report_value_counts_in_first_seen_order() {
        let matches = vec![
            json!({ "strategy": "defense" }),
            json!({ "strategy": "cycle" }),
            json!({ "strategy": "defense" }),
        ];
        let row = summarize(&matches);
        let StatValue::ValueCounts(counts) = &row["strategy_value_counts"] else {
            panic!("value counts expected");
        };
        let entries: Vec<(&str, u64)> = counts
            .iter()
            .map(|(value, count)| (value.as_str(), *count))
            .collect();
        assert_eq!(entries, [("defense", 2), ("cycle", 1)]);
    }

    #[test]
    fn nested_objects_flatten_to_dotted_paths() {
        let matches = vec![json!({ "metadata": { "robotTeam": 100, "robotPosition": "red_1" } })];
        let row = summarize(&matches);
        assert_eq!(row["metadata.robotTeam_average"], StatValue::Number(100.0));
        assert!(row.contains_key("metadata.robotPosition_value_counts"));
    }

    #[test]
    fn mixed_kinds_resolve_to_the_majority() {
        let matches = vec![
            json!({ "flaky": 1 }),
            json!({ "flaky": 2 }),
            json!({ "flaky": "broken" }),
        ];
        let row = summarize(&matches);
        // Two numeric cells against one text cell: numeric wins, the text
        // observation is excluded from the statistics.
        assert_eq!(row["flaky_average"], StatValue::Number(1.5));
        assert!(!row.contains_key("flaky_value_counts"));
    }

    #[test]
    fn fields_missing_from_some_records_still_summarize() {
        let matches = vec![json!({ "score": 10 }), json!({})];
        let row = summarize(&matches);
        assert_eq!(row["number_of_matches"], StatValue::Count(2));
        assert_eq!(row["score_average"], StatValue::Number(10.0));
    }

    #[test]
    fn table_rows_follow_grouping_order() {
        let mut teams: IndexMap<TeamNumber, Vec<Value>> = IndexMap::new();
        teams.insert(300, vec![json!({ "score": 1 })]);
        teams.insert(100, vec![]);
        let table = summarize_teams(&teams);
        let order: Vec<TeamNumber> = table.keys().copied().collect();
        assert_eq!(order, [300, 100]);
        assert_eq!(table[&100][columns::MATCH_COUNT_KEY], StatValue::Count(0));
    }
}
