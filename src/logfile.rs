use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use serde_json::{Map, Value};
use std::fmt::Write as _;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use tracing::debug;

use crate::input::EventRecord;
use crate::translate::TIMESTAMP_FORMAT;

/// Number of `=` after the timestamp in a block header
const SEPARATOR_WIDTH: usize = 34;

/// How the Raw Input section of a log block is rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogOptions {
    /// Pretty-print the decoded JSON instead of copying stdin verbatim
    pub pretty: bool,
    /// List multiline string fields with their lines unfolded
    pub human_readable: bool,
}

/// Render one log block. The result always ends with a newline.
pub fn render_entry(
    raw: &str,
    record: &EventRecord,
    output: &str,
    now: NaiveDateTime,
    options: &LogOptions,
) -> Result<String> {
    let mut entry = format!(
        "=== [{}] {}\nRaw Input:\n",
        now.format(TIMESTAMP_FORMAT),
        "=".repeat(SEPARATOR_WIDTH)
    );

    if options.pretty {
        let pretty = serde_json::to_string_pretty(record).context("Failed to format raw input")?;
        entry.push_str(&pretty);
    } else {
        entry.push_str(raw);
    }
    if !entry.ends_with('\n') {
        entry.push('\n');
    }

    if options.human_readable {
        let fields = multiline_fields(record, "");
        if !fields.is_empty() {
            entry.push_str("Human-readable format:\n");
            for (key, value) in fields {
                let _ = writeln!(entry, "  {}:", key);
                for line in value.split('\n') {
                    let _ = writeln!(entry, "    {}", line);
                }
            }
        }
    }

    let _ = writeln!(entry, "Output:\n{}", output.trim_end());
    Ok(entry)
}

/// String fields containing a newline, keyed by dotted path, nested objects included
fn multiline_fields<'a>(obj: &'a Map<String, Value>, prefix: &str) -> Vec<(String, &'a str)> {
    let mut found = Vec::new();

    for (key, value) in obj {
        let full_key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            Value::String(s) if s.contains('\n') => found.push((full_key, s.as_str())),
            Value::Object(nested) => found.extend(multiline_fields(nested, &full_key)),
            _ => {}
        }
    }

    found
}

/// Append a rendered block to the log file, creating it (and its directory) if needed.
pub fn append_entry(path: &Path, entry: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    file.write_all(entry.as_bytes())
        .and_then(|()| file.flush())
        .with_context(|| format!("Failed to write log file: {}", path.display()))?;

    debug!(path = %path.display(), bytes = entry.len(), "appended log entry");
    Ok(())
}
