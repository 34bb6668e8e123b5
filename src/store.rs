use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::errors::PipelineError;
use crate::workspace::ensure_dir;

/// Read a JSON artifact from `path`.
///
/// A missing or unreadable file is a structural input error: the calling
/// stage has no input and must abort.
pub fn read_json(path: &Path) -> Result<Value, PipelineError> {
    let text = fs::read_to_string(path).map_err(|err| {
        PipelineError::Structure(format!("cannot read '{}': {err}", path.display()))
    })?;
    Ok(serde_json::from_str(&text)?)
}

/// Read and deserialize a typed JSON artifact from `path`.
pub fn read_json_as<T: DeserializeOwned>(path: &Path) -> Result<T, PipelineError> {
    let text = fs::read_to_string(path).map_err(|err| {
        PipelineError::Structure(format!("cannot read '{}': {err}", path.display()))
    })?;
    Ok(serde_json::from_str(&text)?)
}

/// Serialize `value` as pretty-printed JSON at `path`, creating parent
/// directories on demand.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), PipelineError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(value)?)?;
    info!(path = %path.display(), "wrote artifact");
    Ok(())
}

/// Write a plain-text report at `path`, creating parent directories on
/// demand.
pub fn write_text(path: &Path, text: &str) -> Result<(), PipelineError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    fs::write(path, text)?;
    info!(path = %path.display(), "wrote report");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn write_then_read_round_trips() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nested/dir/artifact.json");
        write_json(&path, &json!({ "teams": [100, 200] })).unwrap();
        let value = read_json(&path).unwrap();
        assert_eq!(value["teams"][1], json!(200));
    }

    #[test]
    fn missing_file_is_a_structural_error() {
        let temp = tempdir().unwrap();
        let err = read_json(&temp.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, PipelineError::Structure(_)));
    }
}
