use serde_json::{Map, Value};

use crate::constants::metadata;
use crate::diagnostics::CleaningLog;
use crate::record::RobotPosition;
use crate::schema::{Schema, SchemaNode};

/// Validate `record` against `schema`, repairing what can be repaired.
///
/// Returns a new record whose keys are a subset of the descriptor's, in
/// descriptor order, with every kept value type-correct. Each issue found on
/// the way is appended to `log` and attributed to `scouter`:
///
/// - a key the descriptor declares but the record lacks is dropped,
/// - a value of the wrong runtime kind is dropped,
/// - an out-of-enum robot position is replaced by `"unknown"`,
/// - a negative numeric value is replaced by zero,
/// - keys the descriptor does not declare are removed.
///
/// Validation is deterministic: descriptor order governs, and extra-key
/// diagnostics are emitted in sorted key order.
pub fn validate_record(
    record: &Value,
    schema: &Schema,
    scouter: &str,
    log: &mut CleaningLog,
) -> Value {
    validate_object(record, schema, scouter, "", log)
}

fn validate_object(
    source: &Value,
    schema: &Schema,
    scouter: &str,
    path: &str,
    log: &mut CleaningLog,
) -> Value {
    let map = source.as_object();
    let mut out = Map::new();
    for (key, node) in schema.fields() {
        let full = join_path(path, key);
        let Some(value) = map.and_then(|map| map.get(key)) else {
            log.warn(format!("missing key `{full}`"), Some(scouter));
            continue;
        };
        match node {
            SchemaNode::Object(nested) => {
                if value.is_object() {
                    out.insert(
                        key.clone(),
                        validate_object(value, nested, scouter, &full, log),
                    );
                } else {
                    log.warn(
                        format!(
                            "incorrect type at `{full}`: expected object, got {}",
                            value_kind(value)
                        ),
                        Some(scouter),
                    );
                }
            }
            SchemaNode::Leaf(kind) => {
                if kind.admits(value) {
                    out.insert(key.clone(), repair_leaf(key, value, &full, scouter, log));
                } else {
                    log.warn(
                        format!(
                            "incorrect type at `{full}`: expected {}, got {}",
                            kind.name(),
                            value_kind(value)
                        ),
                        Some(scouter),
                    );
                }
            }
        }
    }
    if let Some(map) = map {
        let mut extras: Vec<&String> = map.keys().filter(|key| !schema.contains(key)).collect();
        extras.sort();
        for key in extras {
            log.warn(
                format!("extra key `{}` found and removed", join_path(path, key)),
                Some(scouter),
            );
        }
    }
    Value::Object(out)
}

/// Domain repairs for type-correct leaves: out-of-enum positions and negative
/// numbers.
fn repair_leaf(key: &str, value: &Value, path: &str, scouter: &str, log: &mut CleaningLog) -> Value {
    if key == metadata::POSITION_KEY {
        if let Some(text) = value.as_str() {
            // The sentinel is already-repaired data, not a fresh violation.
            if RobotPosition::parse(text).is_none() && text != metadata::UNKNOWN_POSITION {
                log.warn(
                    format!(
                        "invalid robot position '{text}' at `{path}`, defaulting to '{}'",
                        metadata::UNKNOWN_POSITION
                    ),
                    Some(scouter),
                );
                return Value::from(metadata::UNKNOWN_POSITION);
            }
        }
    }
    if let Some(number) = value.as_f64() {
        if number < 0.0 {
            log.warn(
                format!("negative value '{value}' at `{path}`, defaulting to 0"),
                Some(scouter),
            );
            return if value.is_i64() {
                Value::from(0)
            } else {
                Value::from(0.0)
            };
        }
    }
    value.clone()
}

fn join_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(number) if number.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
