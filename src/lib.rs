#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Cleaning-stage orchestration over raw record snapshots.
pub mod cleaning;
/// Cross-record consistency counters and checks.
pub mod consistency;
/// Centralized constants for metadata keys, column suffixes, and workspace layout.
pub mod constants;
/// Append-only diagnostic log and scouter leaderboards.
pub mod diagnostics;
mod errors;
/// Team grouping over cleaned records.
pub mod grouping;
/// Stage runners wiring the pipeline to a workspace on disk.
pub mod pipeline;
/// Metric registry and per-metric ranking tables.
pub mod rank;
/// Record metadata extraction and robot field positions.
pub mod record;
/// Text report rendering for leaderboards and rankings.
pub mod report;
/// Declarative expected-shape descriptors for raw records.
pub mod schema;
/// Per-team descriptive statistics.
pub mod stats;
/// JSON artifact persistence helpers.
pub mod store;
/// Shared type aliases.
pub mod types;
/// Recursive schema validation and repair.
pub mod validate;
/// Workspace directory layout and housekeeping.
pub mod workspace;

pub use cleaning::{clean, CleaningOutcome};
pub use consistency::ConsistencyCounters;
pub use diagnostics::{CleaningLog, Diagnostic};
pub use errors::PipelineError;
pub use grouping::{group_by_team, TeamMatches};
pub use rank::{MetricColumn, MetricRegistry, MetricSpec, RankedRow, RankedTable};
pub use record::{RecordMeta, RobotPosition};
pub use schema::{FieldKind, Schema, SchemaNode};
pub use stats::{summarize, summarize_teams, StatValue, StatsTable, TeamStats};
pub use types::{FieldPath, MatchNumber, MetricName, ScouterName, StatKey, TeamNumber};
pub use validate::validate_record;
pub use workspace::WorkspaceLayout;
