use serde_json::{Map, Value};
use thiserror::Error;

/// A decoded hook event: field name to arbitrary JSON value
pub type EventRecord = Map<String, Value>;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("No input received")]
    Empty,
    #[error("Invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid hook input: expected a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// Decode raw stdin text into an event record
pub fn parse_record(raw: &str) -> Result<EventRecord, InputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }

    match serde_json::from_str::<Value>(trimmed)? {
        Value::Object(map) => Ok(map),
        other => Err(InputError::NotAnObject(json_type_name(&other))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
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

    #[test]
    fn test_parse_object() {
        let record = parse_record(r#"{"hook":"Stop","session_id":"abc"}"#).unwrap();
        assert_eq!(record.get("session_id"), Some(&Value::from("abc")));
    }

    #[test]
    fn test_parse_ignores_surrounding_whitespace() {
        let record = parse_record("\n  {\"hook\":\"Stop\"}\n\n").unwrap();
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(parse_record(""), Err(InputError::Empty)));
        assert!(matches!(parse_record(" \n\t"), Err(InputError::Empty)));
    }

    #[test]
    fn test_truncated_json() {
        let err = parse_record(r#"{"hook": "Stop", "sess"#).unwrap_err();
        assert!(matches!(err, InputError::Json(_)));
        assert!(err.to_string().starts_with("Invalid JSON input"));
    }

    #[test]
    fn test_non_object_rejected() {
        let err = parse_record("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, InputError::NotAnObject("an array")));

        let err = parse_record(r#""Stop""#).unwrap_err();
        assert!(matches!(err, InputError::NotAnObject("a string")));
    }
}
