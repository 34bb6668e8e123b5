use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::constants::workspace as layout;
use crate::errors::PipelineError;
use crate::types::MetricName;

/// Conventional directory layout for one competition's data snapshot.
///
/// ```text
/// <root>/data/raw/raw_match_data.json            (input, never cleared)
/// <root>/data/processed/cleaned_match_data.json
/// <root>/data/processed/team_based_match_data.json
/// <root>/outputs/team_data/team_performance_data.json
/// <root>/outputs/team_data/team_rankings.json
/// <root>/outputs/statistics/*.txt
/// <root>/outputs/visualizations/top_teams_<metric>.json
/// ```
#[derive(Clone, Debug)]
pub struct WorkspaceLayout {
    root: PathBuf,
}

impl WorkspaceLayout {
    /// Layout rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Workspace root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Raw snapshot path (input to the cleaning stage).
    pub fn raw_match_data(&self) -> PathBuf {
        self.data_dir(layout::RAW_SUBDIR).join(layout::RAW_MATCH_DATA)
    }

    /// Cleaned record sequence path.
    pub fn cleaned_match_data(&self) -> PathBuf {
        self.data_dir(layout::PROCESSED_SUBDIR)
            .join(layout::CLEANED_MATCH_DATA)
    }

    /// Team-grouped collection path.
    pub fn team_match_data(&self) -> PathBuf {
        self.data_dir(layout::PROCESSED_SUBDIR)
            .join(layout::TEAM_MATCH_DATA)
    }

    /// Per-team statistics table path.
    pub fn team_statistics(&self) -> PathBuf {
        self.outputs_dir(layout::TEAM_DATA_SUBDIR)
            .join(layout::TEAM_STATISTICS)
    }

    /// Ranked tables path.
    pub fn ranked_tables(&self) -> PathBuf {
        self.outputs_dir(layout::TEAM_DATA_SUBDIR)
            .join(layout::RANKED_TABLES)
    }

    /// Scouter leaderboard report path.
    pub fn scouter_leaderboard(&self) -> PathBuf {
        self.outputs_dir(layout::STATISTICS_SUBDIR)
            .join(layout::SCOUTER_LEADERBOARD)
    }

    /// Team comparison report path.
    pub fn ranking_report(&self) -> PathBuf {
        self.outputs_dir(layout::STATISTICS_SUBDIR)
            .join(layout::RANKING_REPORT)
    }

    /// Chart hand-off slice path for one metric.
    pub fn chart_slice(&self, metric: &MetricName) -> PathBuf {
        self.outputs_dir(layout::VISUALIZATIONS_SUBDIR)
            .join(format!("top_teams_{metric}.json"))
    }

    /// Create any missing folders and clear stale artifacts from earlier
    /// runs: raw data is untouched, the processed/output subfolders are kept
    /// but emptied, anything unexpected under `data/` or `outputs/` is
    /// deleted.
    pub fn reset(&self) -> Result<(), PipelineError> {
        clear_dir_with_exceptions(
            &self.root.join(layout::DATA_DIR),
            &[layout::RAW_SUBDIR],
            &[layout::PROCESSED_SUBDIR],
        )?;
        clear_dir_with_exceptions(
            &self.root.join(layout::OUTPUTS_DIR),
            &[],
            &[
                layout::STATISTICS_SUBDIR,
                layout::TEAM_DATA_SUBDIR,
                layout::VISUALIZATIONS_SUBDIR,
            ],
        )?;
        info!(root = %self.root.display(), "workspace reset");
        Ok(())
    }

    fn data_dir(&self, sub: &str) -> PathBuf {
        self.root.join(layout::DATA_DIR).join(sub)
    }

    fn outputs_dir(&self, sub: &str) -> PathBuf {
        self.root.join(layout::OUTPUTS_DIR).join(sub)
    }
}

/// Create `dir` (and parents) when missing.
pub fn ensure_dir(dir: &Path) -> Result<(), PipelineError> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
        debug!(path = %dir.display(), "created folder");
    }
    Ok(())
}

/// Clear `root`'s contents, leaving `untouched` subfolders alone and keeping
/// `preserved` subfolders present but empty. Folders named in either list are
/// created when missing.
pub fn clear_dir_with_exceptions(
    root: &Path,
    untouched: &[&str],
    preserved: &[&str],
) -> Result<(), PipelineError> {
    ensure_dir(root)?;
    for name in untouched.iter().chain(preserved) {
        ensure_dir(&root.join(name))?;
    }
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if untouched.iter().any(|folder| *folder == name) {
            continue;
        }
        if preserved.iter().any(|folder| *folder == name) {
            for child in fs::read_dir(entry.path())? {
                remove_entry(&child?.path())?;
            }
            continue;
        }
        remove_entry(&entry.path())?;
    }
    Ok(())
}

fn remove_entry(path: &Path) -> Result<(), PipelineError> {
    if path.is_dir() {
        for file in WalkDir::new(path)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
        {
            debug!(path = %file.path().display(), "removing stale file");
        }
        fs::remove_dir_all(path)?;
    } else {
        fs::remove_file(path)?;
        debug!(path = %path.display(), "removed stale file");
    }
    Ok(())
}
