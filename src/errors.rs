use std::io;

use thiserror::Error;

use crate::types::MetricName;

/// Error type for structural input failures, IO, and configuration problems.
///
/// Field-level validation issues are never represented here; they become
/// [`crate::Diagnostic`] entries and processing continues.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input artifact exists but does not have the expected container shape,
    /// or a required input could not be read at all.
    #[error("structural input error: {0}")]
    Structure(String),
    /// A configured ranking metric could not be computed over the statistics
    /// table. Non-fatal to the run; the metric is skipped.
    #[error("metric '{0}' failed: {1}")]
    Metric(MetricName, String),
    /// Schema descriptor or stage configuration is unusable.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// Filesystem failure while persisting or clearing artifacts.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// An artifact could not be parsed or serialized as JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
