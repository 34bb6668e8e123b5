use serde_json::{json, Value};

use scoutbook::{clean, group_by_team, validate_record, CleaningLog, Schema};

fn record(scouter: &str, number: i64, team: i64, position: &str) -> Value {
    json!({
        "metadata": {
            "scouterName": scouter,
            "matchNumber": number,
            "robotTeam": team,
            "robotPosition": position,
        },
        "var1": 3,
        "var2": "cycle",
        "var3": true,
    })
}

#[test]
fn cleaned_shape_is_always_within_the_descriptor() {
    let schema = Schema::default_match_schema();
    let malformed = [
        json!({}),
        json!({ "var1": "nope", "surprise": 1 }),
        json!({ "metadata": 42, "var1": -3, "var3": "yes" }),
        json!([1, 2]),
        record("A", 1, 100, "blue_9"),
    ];
    for raw in malformed {
        let mut log = CleaningLog::new();
        let cleaned = validate_record(&raw, &schema, "A", &mut log);
        assert!(
            schema.matches_shape(&cleaned),
            "shape violated for input {raw}"
        );
    }
}

#[test]
fn revalidation_is_a_fixed_point() {
    let schema = Schema::default_match_schema();
    let mut raw = record("A", 1, 100, "blue_9");
    raw["var1"] = json!(-5);
    raw["extra"] = json!("field");
    let mut log = CleaningLog::new();
    let once = validate_record(&raw, &schema, "A", &mut log);
    let first_pass_count = log.len();
    let twice = validate_record(&once, &schema, "A", &mut log);
    assert_eq!(once, twice);
    // Repairs do not re-trigger; only the still-absent key is reported again.
    let second_pass: Vec<&str> = log
        .diagnostics_since(first_pass_count)
        .iter()
        .map(|diag| diag.message.as_str())
        .collect();
    assert!(second_pass.iter().all(|msg| msg.starts_with("missing key")));
}

#[test]
fn fully_valid_record_revalidates_without_diagnostics() {
    let schema = Schema::default_match_schema();
    let mut log = CleaningLog::new();
    let cleaned = validate_record(&record("A", 1, 100, "red_1"), &schema, "A", &mut log);
    assert!(log.is_empty());
    let again = validate_record(&cleaned, &schema, "A", &mut log);
    assert!(log.is_empty());
    assert_eq!(cleaned, again);
}

#[test]
fn leaderboard_counts_sum_to_records_and_attributed_diagnostics() {
    let schema = Schema::default_match_schema();
    let raw = json!([
        record("A", 1, 100, "red_1"),
        record("A", 2, 100, "bad_spot"),
        { "metadata": { "scouterName": "B" }, "var1": -1 },
        { "var1": 1 },
    ]);
    let outcome = clean(&raw, &schema).expect("clean");

    let participation: usize = outcome.log.participation().values().sum();
    assert_eq!(participation, raw.as_array().unwrap().len());

    let attributed = outcome
        .log
        .diagnostics()
        .iter()
        .filter(|diag| diag.scouter.is_some())
        .count();
    let error_total: usize = outcome.log.error_counts().values().sum();
    assert_eq!(error_total, attributed);
}

#[test]
fn grouping_partitions_the_cleaned_set() {
    let schema = Schema::default_match_schema();
    let raw = json!([
        record("A", 1, 100, "red_1"),
        record("B", 1, 200, "red_2"),
        record("A", 2, 100, "red_1"),
    ]);
    let outcome = clean(&raw, &schema).expect("clean");
    let grouped = group_by_team(&outcome.records);

    let regrouped: Vec<&Value> = grouped.values().flatten().collect();
    assert_eq!(regrouped.len(), outcome.records.len());
    for record in &outcome.records {
        let owners = grouped
            .iter()
            .filter(|(_, matches)| matches.contains(record))
            .count();
        assert_eq!(owners, 1, "record must belong to exactly one team");
    }
    assert_eq!(grouped[&100].len(), 2);
    assert_eq!(grouped[&200].len(), 1);
}
