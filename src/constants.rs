/// Constants used by record metadata extraction and repair.
pub mod metadata {
    /// Key of the metadata sub-object inside every record.
    pub const METADATA_KEY: &str = "metadata";
    /// Metadata key naming the scouter who produced the record.
    pub const SCOUTER_KEY: &str = "scouterName";
    /// Metadata key holding the qualification match number.
    pub const MATCH_KEY: &str = "matchNumber";
    /// Metadata key holding the scouted team's number.
    pub const TEAM_KEY: &str = "robotTeam";
    /// Metadata key holding the robot's field position.
    pub const POSITION_KEY: &str = "robotPosition";
    /// Attribution bucket for records whose scouter name is unreadable.
    pub const UNKNOWN_SCOUTER: &str = "Unknown";
    /// Sentinel substituted for out-of-enum robot positions.
    pub const UNKNOWN_POSITION: &str = "unknown";
}

/// Constants used by statistics column naming.
pub mod stats {
    /// Column holding the number of matches in a team's collection.
    pub const MATCH_COUNT_KEY: &str = "number_of_matches";
    /// Suffix for the mean of a numeric field.
    pub const SUFFIX_AVERAGE: &str = "_average";
    /// Suffix for the minimum of a numeric field.
    pub const SUFFIX_MIN: &str = "_min";
    /// Suffix for the maximum of a numeric field.
    pub const SUFFIX_MAX: &str = "_max";
    /// Suffix for the sample standard deviation of a numeric field.
    pub const SUFFIX_STD_DEV: &str = "_std_dev";
    /// Suffix for the true-percentage of a boolean field.
    pub const SUFFIX_PERCENT_TRUE: &str = "_percent_true";
    /// Suffix for the categorical value-count map of a text field.
    pub const SUFFIX_VALUE_COUNTS: &str = "_value_counts";
}

/// Constants used by ranking and the chart hand-off.
pub mod rank {
    /// Name of the built-in consistency metric.
    pub const CONSISTENCY_METRIC: &str = "consistency";
    /// Default number of teams in a chart hand-off slice.
    pub const DEFAULT_TOP_N: usize = 10;
}

/// Constants used by text report rendering.
pub mod report {
    /// Horizontal rule separating report headers from their body.
    pub const SECTION_RULE: &str =
        "================================================================================";
    /// Timestamp format used in report headers.
    pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";
}

/// Constants naming workspace folders and persisted artifacts.
pub mod workspace {
    /// Root folder for raw and processed scouting data.
    pub const DATA_DIR: &str = "data";
    /// Root folder for results, statistics, and chart hand-offs.
    pub const OUTPUTS_DIR: &str = "outputs";
    /// Data subfolder holding the raw snapshot (never cleared).
    pub const RAW_SUBDIR: &str = "raw";
    /// Data subfolder holding cleaned records (cleared between runs).
    pub const PROCESSED_SUBDIR: &str = "processed";
    /// Outputs subfolder holding text reports.
    pub const STATISTICS_SUBDIR: &str = "statistics";
    /// Outputs subfolder holding per-team JSON artifacts.
    pub const TEAM_DATA_SUBDIR: &str = "team_data";
    /// Outputs subfolder holding chart hand-off slices.
    pub const VISUALIZATIONS_SUBDIR: &str = "visualizations";
    /// Raw snapshot filename.
    pub const RAW_MATCH_DATA: &str = "raw_match_data.json";
    /// Cleaned record sequence filename.
    pub const CLEANED_MATCH_DATA: &str = "cleaned_match_data.json";
    /// Team-grouped collection filename.
    pub const TEAM_MATCH_DATA: &str = "team_based_match_data.json";
    /// Per-team statistics table filename.
    pub const TEAM_STATISTICS: &str = "team_performance_data.json";
    /// Ranked tables filename.
    pub const RANKED_TABLES: &str = "team_rankings.json";
    /// Scouter leaderboard report filename.
    pub const SCOUTER_LEADERBOARD: &str = "scouter_leaderboard.txt";
    /// Team comparison report filename.
    pub const RANKING_REPORT: &str = "team_comparison_stats.txt";
}
