use serde_json::Value;

use crate::input::EventRecord;

/// Hook event types, resolved from the `hook` / `hook_event_name` field.
///
/// The snake_case and PascalCase families are matched independently and
/// case-sensitively. Anything else lands in `Unknown` with the raw value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    ToolUseStarted,
    ToolUseCompleted,
    ToolUseBlocked,
    PromptIntercepted,
    PromptSubmitted,
    ResponseStarted,
    ResponseChunk,
    ResponseCompleted,
    Error,
    SessionStart,
    Stop,
    UserPromptSubmit,
    PreToolUse,
    PostToolUse,
    Notification,
    SubagentStart,
    SubagentStop,
    /// Type present but not recognized
    Unknown(String),
    /// Neither `hook` nor `hook_event_name` carried a value
    Missing,
}

impl EventKind {
    /// Resolve the event type of a record.
    ///
    /// `hook` wins; `hook_event_name` is consulted when `hook` is absent
    /// or falsy (null, false, 0, or an empty string, array or object).
    pub fn of(record: &EventRecord) -> Self {
        let raw = ["hook", "hook_event_name"]
            .iter()
            .filter_map(|key| record.get(*key))
            .find(|value| !is_blank(value));

        match raw {
            Some(Value::String(name)) => Self::from_name(name),
            Some(other) => Self::Unknown(other.to_string()),
            None => Self::Missing,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "tool_use_started" => Self::ToolUseStarted,
            "tool_use_completed" => Self::ToolUseCompleted,
            "tool_use_blocked" => Self::ToolUseBlocked,
            "prompt_intercepted" => Self::PromptIntercepted,
            "prompt_submitted" => Self::PromptSubmitted,
            "response_started" => Self::ResponseStarted,
            "response_chunk" => Self::ResponseChunk,
            "response_completed" => Self::ResponseCompleted,
            "error" => Self::Error,
            // Start is the older name for SessionStart
            "Start" | "SessionStart" => Self::SessionStart,
            "Stop" => Self::Stop,
            "UserPromptSubmit" => Self::UserPromptSubmit,
            "PreToolUse" => Self::PreToolUse,
            "PostToolUse" => Self::PostToolUse,
            "Notification" => Self::Notification,
            "SubagentStart" => Self::SubagentStart,
            "SubagentStop" => Self::SubagentStop,
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// Empty or falsy values don't count as a type
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> EventRecord {
        match value {
            Value::Object(map) => map,
            _ => panic!("test record must be an object"),
        }
    }

    #[test]
    fn test_hook_field_resolves() {
        let r = record(json!({"hook": "tool_use_started"}));
        assert_eq!(EventKind::of(&r), EventKind::ToolUseStarted);
    }

    #[test]
    fn test_hook_event_name_fallback() {
        let r = record(json!({"hook_event_name": "Stop", "session_id": "abc"}));
        assert_eq!(EventKind::of(&r), EventKind::Stop);
    }

    #[test]
    fn test_hook_takes_precedence() {
        let r = record(json!({"hook": "PreToolUse", "hook_event_name": "Stop"}));
        assert_eq!(EventKind::of(&r), EventKind::PreToolUse);
    }

    #[test]
    fn test_empty_hook_falls_back() {
        let r = record(json!({"hook": "", "hook_event_name": "Notification"}));
        assert_eq!(EventKind::of(&r), EventKind::Notification);

        let r = record(json!({"hook": null, "hook_event_name": "Notification"}));
        assert_eq!(EventKind::of(&r), EventKind::Notification);
    }

    #[test]
    fn test_falsy_hook_falls_back() {
        let r = record(json!({"hook": false, "hook_event_name": "Stop"}));
        assert_eq!(EventKind::of(&r), EventKind::Stop);

        let r = record(json!({"hook": 0, "hook_event_name": "Stop"}));
        assert_eq!(EventKind::of(&r), EventKind::Stop);

        let r = record(json!({"hook": [], "hook_event_name": "Stop"}));
        assert_eq!(EventKind::of(&r), EventKind::Stop);
    }

    #[test]
    fn test_falsy_hook_alone_is_missing() {
        let r = record(json!({"hook": false}));
        assert_eq!(EventKind::of(&r), EventKind::Missing);
    }

    #[test]
    fn test_missing_type() {
        let r = record(json!({"session_id": "abc"}));
        assert_eq!(EventKind::of(&r), EventKind::Missing);
    }

    #[test]
    fn test_unknown_type_keeps_raw_value() {
        let r = record(json!({"hook": "something_else"}));
        assert_eq!(
            EventKind::of(&r),
            EventKind::Unknown("something_else".to_string())
        );
    }

    #[test]
    fn test_non_string_type_is_unknown() {
        let r = record(json!({"hook": 42}));
        assert_eq!(EventKind::of(&r), EventKind::Unknown("42".to_string()));
    }

    #[test]
    fn test_no_case_folding_between_families() {
        assert_eq!(
            EventKind::from_name("stop"),
            EventKind::Unknown("stop".to_string())
        );
        assert_eq!(
            EventKind::from_name("Tool_Use_Started"),
            EventKind::Unknown("Tool_Use_Started".to_string())
        );
    }

    #[test]
    fn test_start_aliases_session_start() {
        assert_eq!(EventKind::from_name("Start"), EventKind::SessionStart);
        assert_eq!(EventKind::from_name("SessionStart"), EventKind::SessionStart);
    }
}
