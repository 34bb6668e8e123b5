use indexmap::IndexMap;
use serde_json::Value;

use crate::constants::metadata;
use crate::errors::PipelineError;

/// Primitive value kinds allowed at descriptor leaves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// JSON integer.
    Integer,
    /// Any JSON number (integers promote).
    Float,
    /// JSON string.
    Text,
    /// JSON boolean.
    Boolean,
}

impl FieldKind {
    /// True when `value`'s runtime kind satisfies this leaf kind.
    pub fn admits(self, value: &Value) -> bool {
        match self {
            FieldKind::Integer => value.as_i64().is_some() || value.as_u64().is_some(),
            FieldKind::Float => value.is_number(),
            FieldKind::Text => value.is_string(),
            FieldKind::Boolean => value.is_boolean(),
        }
    }

    /// Canonical tag used in descriptor files and diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            FieldKind::Integer => "int",
            FieldKind::Float => "float",
            FieldKind::Text => "string",
            FieldKind::Boolean => "bool",
        }
    }

    fn parse(tag: &str) -> Option<Self> {
        match tag {
            "int" | "integer" => Some(FieldKind::Integer),
            "float" | "number" => Some(FieldKind::Float),
            "string" | "str" | "text" => Some(FieldKind::Text),
            "bool" | "boolean" => Some(FieldKind::Boolean),
            _ => None,
        }
    }
}

/// One node of the expected-shape descriptor: a primitive leaf or a nested
/// object descriptor.
#[derive(Clone, Debug, PartialEq)]
pub enum SchemaNode {
    /// Leaf field of a primitive kind.
    Leaf(FieldKind),
    /// Nested object with its own descriptor.
    Object(Schema),
}

impl SchemaNode {
    fn from_json(value: &Value) -> Result<Self, PipelineError> {
        match value {
            Value::String(tag) => FieldKind::parse(tag).map(SchemaNode::Leaf).ok_or_else(|| {
                PipelineError::Configuration(format!("unknown field kind tag '{tag}'"))
            }),
            Value::Object(_) => Ok(SchemaNode::Object(Schema::from_json(value)?)),
            other => Err(PipelineError::Configuration(format!(
                "descriptor values must be kind tags or nested objects, got {other}"
            ))),
        }
    }
}

/// Declarative expected shape for one raw record.
///
/// Field iteration order is declaration order; validation walks fields in this
/// order, so diagnostics never depend on how a record's own keys are ordered.
/// The descriptor is immutable for the duration of a run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Schema {
    fields: IndexMap<String, SchemaNode>,
}

impl Schema {
    /// Build a descriptor from field pairs, keeping their order.
    pub fn from_fields(fields: impl IntoIterator<Item = (String, SchemaNode)>) -> Self {
        Self {
            fields: fields.into_iter().collect(),
        }
    }

    /// Parse a descriptor from its JSON form.
    ///
    /// Leaves are kind tags (`"int"`, `"float"`, `"string"`, `"bool"`); nested
    /// objects are nested descriptors.
    pub fn from_json(value: &Value) -> Result<Self, PipelineError> {
        let map = value.as_object().ok_or_else(|| {
            PipelineError::Configuration("schema descriptor must be a JSON object".to_string())
        })?;
        let mut fields = IndexMap::new();
        for (key, value) in map {
            fields.insert(key.clone(), SchemaNode::from_json(value)?);
        }
        Ok(Self { fields })
    }

    /// The stock match schema used when no external descriptor is supplied.
    ///
    /// `var1`/`var2`/`var3` stand in for a team's custom game-specific fields.
    pub fn default_match_schema() -> Self {
        let meta = Schema::from_fields([
            (
                metadata::SCOUTER_KEY.to_string(),
                SchemaNode::Leaf(FieldKind::Text),
            ),
            (
                metadata::MATCH_KEY.to_string(),
                SchemaNode::Leaf(FieldKind::Integer),
            ),
            (
                metadata::TEAM_KEY.to_string(),
                SchemaNode::Leaf(FieldKind::Integer),
            ),
            (
                metadata::POSITION_KEY.to_string(),
                SchemaNode::Leaf(FieldKind::Text),
            ),
        ]);
        Schema::from_fields([
            (metadata::METADATA_KEY.to_string(), SchemaNode::Object(meta)),
            ("var1".to_string(), SchemaNode::Leaf(FieldKind::Integer)),
            ("var2".to_string(), SchemaNode::Leaf(FieldKind::Text)),
            ("var3".to_string(), SchemaNode::Leaf(FieldKind::Boolean)),
        ])
    }

    /// Iterate fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&String, &SchemaNode)> {
        self.fields.iter()
    }

    /// Look up one field's node.
    pub fn get(&self, key: &str) -> Option<&SchemaNode> {
        self.fields.get(key)
    }

    /// True when the descriptor declares `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Number of declared fields at this level.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when no fields are declared at this level.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// True when `record` carries no keys outside this descriptor and every
    /// present value has the declared kind, recursively.
    ///
    /// Missing keys are allowed: validation drops unrecoverable fields, so a
    /// cleaned record's shape is a key-subset of the descriptor.
    pub fn matches_shape(&self, record: &Value) -> bool {
        let Some(map) = record.as_object() else {
            return false;
        };
        map.iter().all(|(key, value)| match self.fields.get(key) {
            Some(SchemaNode::Leaf(kind)) => kind.admits(value),
            Some(SchemaNode::Object(nested)) => nested.matches_shape(value),
            None => false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_nested_descriptor_in_declaration_order() {
        let schema = Schema::from_json(&json!({
            "metadata": { "scouterName": "string", "matchNumber": "int" },
            "score": "float",
            "climbed": "bool",
        }))
        .expect("schema");
        let keys: Vec<&String> = schema.fields().map(|(key, _)| key).collect();
        assert_eq!(keys, ["metadata", "score", "climbed"]);
        assert!(matches!(
            schema.get("score"),
            Some(SchemaNode::Leaf(FieldKind::Float))
        ));
        assert!(matches!(schema.get("metadata"), Some(SchemaNode::Object(_))));
    }

    #[test]
    fn rejects_unknown_kind_tags() {
        let err = Schema::from_json(&json!({ "score": "decimal" })).unwrap_err();
        assert!(err.to_string().contains("decimal"));
    }

    #[test]
    fn integer_leaves_reject_floats_and_bools() {
        assert!(FieldKind::Integer.admits(&json!(7)));
        assert!(!FieldKind::Integer.admits(&json!(7.5)));
        assert!(!FieldKind::Integer.admits(&json!(true)));
        assert!(FieldKind::Float.admits(&json!(7)));
        assert!(FieldKind::Float.admits(&json!(7.5)));
    }

    #[test]
    fn matches_shape_allows_missing_but_not_extra_keys() {
        let schema = Schema::default_match_schema();
        assert!(schema.matches_shape(&json!({ "var1": 3 })));
        assert!(!schema.matches_shape(&json!({ "var1": 3, "bonus": 1 })));
        assert!(!schema.matches_shape(&json!({ "var1": "three" })));
    }
}
