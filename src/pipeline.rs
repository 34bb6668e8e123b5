//! Stage runners: each function reads the previous stage's artifact from the
//! workspace, runs one pipeline stage, and persists its output for the next
//! stage and for external tooling.

use indexmap::IndexMap;
use serde_json::Value;
use tracing::info;

use crate::cleaning::{clean, CleaningOutcome};
use crate::errors::PipelineError;
use crate::grouping::{group_by_team, TeamMatches};
use crate::rank::{MetricRegistry, RankedTable};
use crate::report;
use crate::schema::Schema;
use crate::stats::{summarize_teams, StatsTable};
use crate::store;
use crate::types::TeamNumber;
use crate::workspace::WorkspaceLayout;

/// Cleaning stage: validate and repair the raw snapshot, persist the cleaned
/// records, and write the scouter leaderboard report.
pub fn run_clean(
    layout: &WorkspaceLayout,
    schema: &Schema,
) -> Result<CleaningOutcome, PipelineError> {
    info!(path = %layout.raw_match_data().display(), "loading raw match data");
    let raw = store::read_json(&layout.raw_match_data())?;
    let outcome = clean(&raw, schema)?;
    store::write_json(&layout.cleaned_match_data(), &outcome.records)?;
    store::write_text(
        &layout.scouter_leaderboard(),
        &report::leaderboard_report(&outcome.log),
    )?;
    Ok(outcome)
}

/// Grouping stage: partition cleaned records by team and persist the per-team
/// collections.
pub fn run_group(
    layout: &WorkspaceLayout,
) -> Result<IndexMap<TeamNumber, TeamMatches>, PipelineError> {
    let cleaned = store::read_json(&layout.cleaned_match_data())?;
    let records = cleaned.as_array().ok_or_else(|| {
        PipelineError::Structure("cleaned match data must be an array of records".to_string())
    })?;
    let grouped: IndexMap<TeamNumber, TeamMatches> = group_by_team(records)
        .into_iter()
        .map(|(team, matches)| (team, TeamMatches { matches }))
        .collect();
    info!(teams = grouped.len(), "grouped records by team");
    store::write_json(&layout.team_match_data(), &grouped)?;
    Ok(grouped)
}

/// Statistics stage: compute and persist the per-team statistics table.
pub fn run_stats(layout: &WorkspaceLayout) -> Result<StatsTable, PipelineError> {
    let grouped: IndexMap<TeamNumber, TeamMatches> =
        store::read_json_as(&layout.team_match_data())?;
    let collections: IndexMap<TeamNumber, Vec<Value>> = grouped
        .into_iter()
        .map(|(team, team_matches)| (team, team_matches.matches))
        .collect();
    let table = summarize_teams(&collections);
    store::write_json(&layout.team_statistics(), &table)?;
    Ok(table)
}

/// Ranking stage: compute every registered metric over the statistics table,
/// persist the ranked tables and the comparison report, and write one top-N
/// chart hand-off slice per metric.
pub fn run_rank(
    layout: &WorkspaceLayout,
    registry: &MetricRegistry,
    top_n: usize,
) -> Result<Vec<RankedTable>, PipelineError> {
    let table: StatsTable = store::read_json_as(&layout.team_statistics())?;
    let ranked = registry.rank_all(&table);
    info!(
        metrics = ranked.len(),
        configured = registry.len(),
        "ranking complete"
    );
    store::write_json(&layout.ranked_tables(), &ranked)?;
    store::write_text(&layout.ranking_report(), &report::ranking_report(&ranked))?;
    for table in &ranked {
        store::write_json(&layout.chart_slice(&table.metric), &table.top_n(top_n))?;
    }
    Ok(ranked)
}

/// Run every stage in order over `layout`, resetting the workspace first.
pub fn run_all(
    layout: &WorkspaceLayout,
    schema: &Schema,
    registry: &MetricRegistry,
    top_n: usize,
) -> Result<(), PipelineError> {
    layout.reset()?;
    run_clean(layout, schema)?;
    run_group(layout)?;
    run_stats(layout)?;
    run_rank(layout, registry, top_n)?;
    Ok(())
}
