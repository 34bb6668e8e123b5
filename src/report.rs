use chrono::Utc;

use crate::constants::report::{SECTION_RULE, TIMESTAMP_FORMAT};
use crate::diagnostics::CleaningLog;
use crate::rank::RankedTable;

/// Render the two-section scouter leaderboard report: scouters by descending
/// diagnostic count, then by descending participation count. Ties keep
/// first-seen scouter order.
pub fn leaderboard_report(log: &CleaningLog) -> String {
    let mut out = String::new();
    out.push_str("Scouter Leaderboard\n");
    out.push_str(SECTION_RULE);
    out.push_str(&format!(
        "\nGenerated: {}\n\n",
        Utc::now().format(TIMESTAMP_FORMAT)
    ));

    out.push_str("Scouter Error Leaderboard:\n");
    for (scouter, count) in sorted_desc(log.error_counts()) {
        out.push_str(&format!("{scouter}: {count} errors/warnings\n"));
    }

    out.push_str("\nScouter Leaderboard:\n");
    for (scouter, count) in sorted_desc(log.participation()) {
        out.push_str(&format!("{scouter}: {count} matches\n"));
    }
    out
}

/// Render the ranking report: one section per metric, each team's value and
/// rank in rank order.
pub fn ranking_report(tables: &[RankedTable]) -> String {
    let mut out = String::new();
    out.push_str("Team Rankings by Custom Metrics\n");
    out.push_str(SECTION_RULE);
    out.push_str(&format!(
        "\nGenerated: {}\n",
        Utc::now().format(TIMESTAMP_FORMAT)
    ));
    for table in tables {
        let direction = if table.ascending {
            "ascending"
        } else {
            "descending"
        };
        out.push_str(&format!("\nRankings by {} ({direction}):\n", table.metric));
        for row in &table.rows {
            out.push_str(&format!(
                "{:>4}. team {:<6} {:>14.4}\n",
                row.rank, row.team, row.value
            ));
        }
    }
    out
}

fn sorted_desc(counts: &indexmap::IndexMap<String, usize>) -> Vec<(&String, usize)> {
    let mut entries: Vec<(&String, usize)> = counts
        .iter()
        .map(|(scouter, count)| (scouter, *count))
        .collect();
    entries.sort_by(|left, right| right.1.cmp(&left.1));
    entries
}
