//! Turns one hook event record into one timestamped line of plain English.

use chrono::NaiveDateTime;
use serde_json::Value;

use crate::event::EventKind;
use crate::input::EventRecord;

/// strftime pattern for every timestamp this tool prints
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const ELLIPSIS: &str = "...";

/// Knobs for the translator; see `config` for where they come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateOptions {
    pub placeholder: String,
    pub prompt_limit: usize,
    pub chunk_limit: usize,
    pub subagent_id_fields: Vec<String>,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            placeholder: "unknown".to_string(),
            prompt_limit: 100,
            chunk_limit: 50,
            subagent_id_fields: ["agent_id", "subagent_id", "session_id"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Describe a hook event, prefixed with `[now]`.
pub fn translate(record: &EventRecord, now: NaiveDateTime, options: &TranslateOptions) -> String {
    let description = describe(record, &EventKind::of(record), options);
    format!("[{}] {}", now.format(TIMESTAMP_FORMAT), description)
}

fn describe(record: &EventRecord, kind: &EventKind, options: &TranslateOptions) -> String {
    let fields = Fields { record, options };

    match kind {
        EventKind::ToolUseStarted => format!(
            "Tool '{}' started (request_id: {})",
            fields.or_placeholder("tool_name"),
            fields.or_placeholder("request_id")
        ),
        EventKind::ToolUseCompleted => {
            let name = fields.or_placeholder("tool_name");
            let request_id = fields.or_placeholder("request_id");
            match fields.tool_error(&["result"]) {
                Some(error) => format!(
                    "Tool '{}' failed with error: {} (request_id: {})",
                    name, error, request_id
                ),
                None => format!(
                    "Tool '{}' completed successfully (request_id: {})",
                    name, request_id
                ),
            }
        }
        EventKind::ToolUseBlocked => format!(
            "Tool '{}' blocked: {} (request_id: {})",
            fields.or_placeholder("tool_name"),
            fields.or("reason", "No reason provided"),
            fields.or_placeholder("request_id")
        ),
        EventKind::PromptIntercepted => format!(
            "User prompt intercepted: \"{}\"",
            fields.preview(&["prompt"], options.prompt_limit)
        ),
        EventKind::PromptSubmitted | EventKind::UserPromptSubmit => format!(
            "User prompt submitted: \"{}\"",
            fields.preview(&["prompt"], options.prompt_limit)
        ),
        EventKind::ResponseStarted => "Claude started generating a response".to_string(),
        EventKind::ResponseChunk => format!(
            "Response chunk received: \"{}\"",
            fields.preview(&["chunk", "text"], options.chunk_limit)
        ),
        EventKind::ResponseCompleted => "Claude completed response generation".to_string(),
        EventKind::Error => {
            let message = fields
                .first(&["message", "error"])
                .unwrap_or_else(|| options.placeholder.clone());
            match fields.get("error_type") {
                Some(error_type) => format!("Error occurred ({}): {}", error_type, message),
                None => format!("Error occurred: {}", message),
            }
        }
        EventKind::SessionStart => {
            let started = format!(
                "Session started (session_id: {})",
                fields.or_placeholder("session_id")
            );
            match fields.get("source").filter(|s| !s.is_empty()) {
                Some(source) => format!("{} via {}", started, source),
                None => started,
            }
        }
        EventKind::Stop => format!(
            "Session stopped (session_id: {})",
            fields.or_placeholder("session_id")
        ),
        EventKind::PreToolUse => {
            format!("About to use tool '{}'", fields.or_placeholder("tool_name"))
        }
        EventKind::PostToolUse => {
            let name = fields.or_placeholder("tool_name");
            match fields.tool_error(&["result", "tool_response"]) {
                Some(error) => format!("Tool '{}' failed with error: {}", name, error),
                None => format!("Tool '{}' completed successfully", name),
            }
        }
        EventKind::Notification => {
            format!("Notification: {}", fields.or_placeholder("message"))
        }
        EventKind::SubagentStart => with_subagent_id("Subagent started", &fields),
        EventKind::SubagentStop => with_subagent_id("Subagent stopped", &fields),
        EventKind::Unknown(raw) => format!("Unknown hook type: {}", single_line(raw)),
        EventKind::Missing => format!("Unknown hook type: {}", options.placeholder),
    }
}

fn with_subagent_id(prefix: &str, fields: &Fields) -> String {
    match fields.first(fields.options.subagent_id_fields.as_slice()) {
        Some(id) => format!("{} (id: {})", prefix, id),
        None => prefix.to_string(),
    }
}

/// Optional-field reads over one record, all rendered single-line.
struct Fields<'a> {
    record: &'a EventRecord,
    options: &'a TranslateOptions,
}

impl Fields<'_> {
    fn get(&self, key: &str) -> Option<String> {
        self.record
            .get(key)
            .and_then(value_text)
            .map(|s| single_line(&s))
    }

    /// First present field among `keys`
    fn first<S: AsRef<str>>(&self, keys: &[S]) -> Option<String> {
        keys.iter().find_map(|key| self.get(key.as_ref()))
    }

    fn or(&self, key: &str, fallback: &str) -> String {
        self.get(key).unwrap_or_else(|| fallback.to_string())
    }

    fn or_placeholder(&self, key: &str) -> String {
        self.or(key, &self.options.placeholder)
    }

    /// Truncated preview of the first present field, empty when absent.
    fn preview(&self, keys: &[&str], limit: usize) -> String {
        let text = keys
            .iter()
            .find_map(|key| self.record.get(*key).and_then(value_text))
            .unwrap_or_default();
        single_line(&truncate(&text, limit))
    }

    /// Error message if any of the `containers` objects reports `is_error: true`.
    fn tool_error(&self, containers: &[&str]) -> Option<String> {
        let failed = containers
            .iter()
            .filter_map(|key| self.record.get(*key).and_then(Value::as_object))
            .find(|obj| obj.get("is_error") == Some(&Value::Bool(true)))?;

        Some(
            failed
                .get("error")
                .and_then(value_text)
                .map(|s| single_line(&s))
                .unwrap_or_else(|| "Unknown error".to_string()),
        )
    }
}

/// Field value as display text; null counts as absent.
fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Cut `text` to `limit` characters plus an ellipsis, if it is longer.
pub fn truncate(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}

fn single_line(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\n', '\r'], " ")
}
