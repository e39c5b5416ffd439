//! Reading the application document
//!
//! Parsing goes through simd-json first; when that rejects the input,
//! serde_json gets a second look and supplies the line/column diagnostic.

use crate::error::EopenError;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::Path;

/// Load the application document at `path`
pub fn load_document(path: &Path) -> Result<Value, EopenError> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => EopenError::InputNotFound {
            path: path.to_path_buf(),
        },
        _ => EopenError::Io(e),
    })?;

    let document = parse_document(&bytes)?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "loaded application document");
    Ok(document)
}

/// Parse an application document from raw bytes. The root must be an object.
pub fn parse_document(bytes: &[u8]) -> Result<Value, EopenError> {
    let mut scratch = bytes.to_vec();
    let value = match simd_json::serde::from_slice::<Value>(&mut scratch) {
        Ok(value) => value,
        Err(_) => serde_json::from_slice(bytes)
            .map_err(|e| EopenError::malformed(format!("invalid JSON: {e}")))?,
    };

    if !value.is_object() {
        return Err(EopenError::malformed(format!(
            "expected an object at the document root, found {}",
            kind(&value)
        )));
    }
    Ok(value)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_parse_object() {
        let doc = parse_document(r#"{"applicationId": 42, "data": {"thFirstName": "สมชาย"}}"#.as_bytes()).unwrap();
        assert_eq!(doc["applicationId"], json!(42));
        assert_eq!(doc["data"]["thFirstName"], json!("สมชาย"));
    }

    #[test]
    fn test_malformed_json() {
        let err = parse_document(br#"{"applicationId": 42,"#).unwrap_err();
        assert!(matches!(err, EopenError::InputMalformed { .. }));
        assert!(err.to_string().contains("invalid JSON"));
    }

    #[test]
    fn test_non_object_root() {
        let err = parse_document(b"[1, 2, 3]").unwrap_err();
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_document(&dir.path().join("data.json")).unwrap_err();
        assert!(matches!(err, EopenError::InputNotFound { .. }));
        assert_eq!(err.exit_code(), 66);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"applicationId": 7, "types": ["EQUITY"]}"#).unwrap();

        let doc = load_document(file.path()).unwrap();
        assert_eq!(doc["types"], json!(["EQUITY"]));
    }
}
