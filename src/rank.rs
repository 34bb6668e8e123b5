use std::cmp::Ordering;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::rank as metrics;
use crate::constants::stats as columns;
use crate::errors::PipelineError;
use crate::stats::{StatValue, StatsTable};
use crate::types::{MetricName, StatKey, TeamNumber};

/// Scalar metric column: one value per team, in statistics-table row order.
pub type MetricColumn = IndexMap<TeamNumber, f64>;

/// Closure computing a metric column from the full statistics table.
pub type MetricFn = Box<dyn Fn(&StatsTable) -> Result<MetricColumn, PipelineError>>;

/// One configured ranking metric: a pure function over the statistics table
/// plus an ordering direction.
pub struct MetricSpec {
    /// Registry name, also used in reports and artifact names.
    pub name: MetricName,
    /// True when smaller values should rank first.
    pub ascending: bool,
    compute: MetricFn,
}

impl MetricSpec {
    /// Wrap a custom metric closure.
    pub fn new(name: impl Into<MetricName>, ascending: bool, compute: MetricFn) -> Self {
        Self {
            name: name.into(),
            ascending,
            compute,
        }
    }

    /// Metric that ranks directly on an existing scalar statistics column.
    ///
    /// Fails (and is skipped at ranking time) when any team's row lacks the
    /// column or holds a categorical cell there.
    pub fn column(column: impl Into<StatKey>, ascending: bool) -> Self {
        let column = column.into();
        let lookup = column.clone();
        Self::new(
            column,
            ascending,
            Box::new(move |table: &StatsTable| {
                let mut out = MetricColumn::new();
                for (team, row) in table {
                    let value = row
                        .get(&lookup)
                        .ok_or_else(|| {
                            PipelineError::Metric(
                                lookup.clone(),
                                format!("team {team} is missing the column"),
                            )
                        })?
                        .as_number()
                        .ok_or_else(|| {
                            PipelineError::Metric(
                                lookup.clone(),
                                format!("column is categorical for team {team}"),
                            )
                        })?;
                    out.insert(*team, value);
                }
                Ok(out)
            }),
        )
    }

    /// Built-in consistency metric: each team's mean z-score across every
    /// `*_std_dev` column. Lower means the team performs more consistently,
    /// so the metric ranks ascending.
    pub fn consistency() -> Self {
        Self::new(
            metrics::CONSISTENCY_METRIC,
            true,
            Box::new(|table: &StatsTable| {
                let mut deviation_columns: IndexMap<StatKey, MetricColumn> = IndexMap::new();
                for (team, row) in table {
                    for (key, value) in row {
                        if !key.ends_with(columns::SUFFIX_STD_DEV) {
                            continue;
                        }
                        if let Some(number) = value.as_number() {
                            deviation_columns
                                .entry(key.clone())
                                .or_default()
                                .insert(*team, number);
                        }
                    }
                }
                if deviation_columns.is_empty() {
                    return Err(PipelineError::Metric(
                        metrics::CONSISTENCY_METRIC.to_string(),
                        "statistics table has no std-dev columns".to_string(),
                    ));
                }
                let mut sums: IndexMap<TeamNumber, (f64, usize)> = IndexMap::new();
                for column in deviation_columns.values() {
                    let len = column.len() as f64;
                    let mean = column.values().sum::<f64>() / len;
                    let variance =
                        column.values().map(|v| (v - mean).powi(2)).sum::<f64>() / len;
                    let std = variance.sqrt();
                    for (team, value) in column {
                        let z = if std == 0.0 { 0.0 } else { (value - mean) / std };
                        let entry = sums.entry(*team).or_insert((0.0, 0));
                        entry.0 += z;
                        entry.1 += 1;
                    }
                }
                Ok(sums
                    .into_iter()
                    .map(|(team, (sum, count))| (team, sum / count as f64))
                    .collect())
            }),
        )
    }

    /// Apply the metric to the statistics table.
    pub fn compute(&self, table: &StatsTable) -> Result<MetricColumn, PipelineError> {
        (self.compute)(table)
    }
}

/// Ordered metric registry, resolved at configuration-load time.
///
/// Each entry is computed and fault-isolated independently: a metric that
/// fails is reported and skipped without affecting the others.
#[derive(Default)]
pub struct MetricRegistry {
    specs: Vec<MetricSpec>,
}

impl MetricRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a metric; registration order is ranking order.
    pub fn register(&mut self, spec: MetricSpec) -> &mut Self {
        self.specs.push(spec);
        self
    }

    /// Builder-style registration.
    pub fn with(mut self, spec: MetricSpec) -> Self {
        self.specs.push(spec);
        self
    }

    /// Number of registered metrics.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// True when no metrics are registered.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Compute and rank every registered metric over `table`.
    ///
    /// Failed metrics are logged and skipped; the returned tables keep
    /// registration order.
    pub fn rank_all(&self, table: &StatsTable) -> Vec<RankedTable> {
        let mut ranked = Vec::new();
        for spec in &self.specs {
            match spec.compute(table) {
                Ok(column) => {
                    ranked.push(RankedTable::build(spec.name.clone(), spec.ascending, &column));
                }
                Err(err) => warn!(metric = %spec.name, "skipping metric: {err}"),
            }
        }
        ranked
    }
}

/// One team's entry in a ranked table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RankedRow {
    /// Ranked team.
    pub team: TeamNumber,
    /// The team's metric value.
    pub value: f64,
    /// 1-based position in the sorted order.
    pub rank: usize,
}

/// The full sorted table for one metric.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RankedTable {
    /// Metric the table is sorted by.
    pub metric: MetricName,
    /// Ordering direction the sort used.
    pub ascending: bool,
    /// Rows in rank order.
    pub rows: Vec<RankedRow>,
}

impl RankedTable {
    /// Sort `column` in the configured direction and assign 1-based ranks.
    ///
    /// The sort is stable, so ties keep the column's (statistics-table) row
    /// order.
    pub fn build(metric: MetricName, ascending: bool, column: &MetricColumn) -> Self {
        let mut rows: Vec<RankedRow> = column
            .iter()
            .map(|(team, value)| RankedRow {
                team: *team,
                value: *value,
                rank: 0,
            })
            .collect();
        rows.sort_by(|left, right| {
            let order = left
                .value
                .partial_cmp(&right.value)
                .unwrap_or(Ordering::Equal);
            if ascending {
                order
            } else {
                order.reverse()
            }
        });
        for (index, row) in rows.iter_mut().enumerate() {
            row.rank = index + 1;
        }
        Self {
            metric,
            ascending,
            rows,
        }
    }

    /// Chart-renderer hand-off: the top `n` teams with their metric values,
    /// in rank order.
    pub fn top_n(&self, n: usize) -> IndexMap<TeamNumber, f64> {
        self.rows
            .iter()
            .take(n)
            .map(|row| (row.team, row.value))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::TeamStats;

    fn table_with_column(column: &str, values: &[(TeamNumber, f64)]) -> StatsTable {
        values
            .iter()
            .map(|(team, value)| {
                let mut row = TeamStats::new();
                row.insert(column.to_string(), StatValue::Number(*value));
                (*team, row)
            })
            .collect()
    }

    #[test]
    fn descending_rank_one_is_the_maximum() {
        let table = table_with_column("score_average", &[(1, 3.0), (2, 9.0), (3, 6.0)]);
        let ranked = MetricSpec::column("score_average", false)
            .compute(&table)
            .map(|column| RankedTable::build("score_average".into(), false, &column))
            .expect("ranked");
        assert_eq!(ranked.rows[0].team, 2);
        assert_eq!(ranked.rows[0].rank, 1);
        assert_eq!(ranked.rows[2].team, 1);
        assert_eq!(ranked.rows[2].rank, 3);
    }

    #[test]
    fn ascending_rank_one_is_the_minimum() {
        let table = table_with_column("score_std_dev", &[(1, 3.0), (2, 9.0)]);
        let column = MetricSpec::column("score_std_dev", true)
            .compute(&table)
            .expect("column");
        let ranked = RankedTable::build("score_std_dev".into(), true, &column);
        assert_eq!(ranked.rows[0].team, 1);
    }

    #[test]
    fn ties_keep_table_row_order() {
        let table = table_with_column("score_average", &[(7, 5.0), (3, 5.0), (9, 5.0)]);
        let column = MetricSpec::column("score_average", false)
            .compute(&table)
            .expect("column");
        let ranked = RankedTable::build("score_average".into(), false, &column);
        let teams: Vec<TeamNumber> = ranked.rows.iter().map(|row| row.team).collect();
        assert_eq!(teams, [7, 3, 9]);
        let ranks: Vec<usize> = ranked.rows.iter().map(|row| row.rank).collect();
        assert_eq!(ranks, [1, 2, 3]);
    }

    #[test]
    fn missing_column_fails_that_metric_only() {
        let table = table_with_column("score_average", &[(1, 3.0)]);
        let registry = MetricRegistry::new()
            .with(MetricSpec::column("unheard_of", false))
            .with(MetricSpec::column("score_average", false));
        let ranked = registry.rank_all(&table);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].metric, "score_average");
    }

    #[test]
    fn consistency_averages_z_scores_across_deviation_columns() {
        let mut table = StatsTable::new();
        for (team, a, b) in [(1, 1.0, 2.0), (2, 3.0, 4.0), (3, 5.0, 6.0)] {
            let mut row = TeamStats::new();
            row.insert("a_std_dev".to_string(), StatValue::Number(a));
            row.insert("b_std_dev".to_string(), StatValue::Number(b));
            row.insert("a_average".to_string(), StatValue::Number(99.0));
            table.insert(team, row);
        }
        let column = MetricSpec::consistency().compute(&table).expect("column");
        // Team 2 sits at the mean of both columns.
        assert!((column[&2]).abs() < 1e-9);
        assert!(column[&1] < column[&2] && column[&2] < column[&3]);
        let ranked = RankedTable::build("consistency".into(), true, &column);
        assert_eq!(ranked.rows[0].team, 1);
    }

    #[test]
    fn consistency_fails_without_deviation_columns() {
        let table = table_with_column("score_average", &[(1, 3.0)]);
        let err = MetricSpec::consistency().compute(&table).unwrap_err();
        assert!(matches!(err, PipelineError::Metric(_, _)));
    }

    #[test]
    fn top_n_slices_in_rank_order() {
        let table = table_with_column("score_average", &[(1, 1.0), (2, 2.0), (3, 3.0)]);
        let column = MetricSpec::column("score_average", false)
            .compute(&table)
            .expect("column");
        let ranked = RankedTable::build("score_average".into(), false, &column);
        let top = ranked.top_n(2);
        let teams: Vec<TeamNumber> = top.keys().copied().collect();
        assert_eq!(teams, [3, 2]);
    }
}
