/// Competition team number as recorded in a record's metadata.
/// Examples: `100`, `254`
pub type TeamNumber = i64;
/// Qualification match number within one competition.
/// Examples: `1`, `42`
pub type MatchNumber = i64;
/// Name of the human scouter who produced a record.
/// Examples: `Alice`, `Unknown`
pub type ScouterName = String;
/// Dotted path to a field inside a (possibly nested) record.
/// Examples: `var1`, `metadata.robotPosition`
pub type FieldPath = String;
/// Derived statistics column key.
/// Examples: `var1_average`, `metadata.robotTeam_min`, `var2_value_counts`
pub type StatKey = String;
/// Name of a registered ranking metric.
/// Examples: `consistency`, `var1_average`
pub type MetricName = String;
