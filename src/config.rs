use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::logfile::LogOptions;
use crate::translate::TranslateOptions;

const CONFIG_FILENAME: &str = "config.yaml";

/// Log rendering section of the config file
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct LogConfigRaw {
    pretty: Option<bool>,
    human_readable: Option<bool>,
}

/// Raw configuration structure (as parsed from YAML)
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigRaw {
    /// Substitute text for absent fields
    placeholder: Option<String>,
    /// Max characters of a prompt preview
    prompt_limit: Option<usize>,
    /// Max characters of a response chunk preview
    chunk_limit: Option<usize>,
    /// Fields tried, in order, for the subagent identifier
    subagent_id_fields: Option<Vec<String>>,
    log: Option<LogConfigRaw>,
}

/// Resolved configuration (defaults filled in)
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub translate: TranslateOptions,
    pub log: LogOptions,
}

/// Get the default config path: $XDG_CONFIG_HOME/hookmaster/config.yaml
pub fn default_config_path() -> PathBuf {
    config_path_from(
        std::env::var("XDG_CONFIG_HOME").ok(),
        std::env::var("HOME").ok(),
    )
}

/// Empty variables count as unset
fn config_path_from(xdg_config_home: Option<String>, home: Option<String>) -> PathBuf {
    let xdg_config = xdg_config_home
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let home = home
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| ".".to_string());
            PathBuf::from(home).join(".config")
        });

    xdg_config.join("hookmaster").join(CONFIG_FILENAME)
}

fn validate(raw: &ConfigRaw, config_path: &Path) -> Result<()> {
    if raw.placeholder.as_deref() == Some("") {
        bail!(
            "Invalid config at {}: 'placeholder' must not be empty",
            config_path.display()
        );
    }
    if raw.prompt_limit == Some(0) {
        bail!(
            "Invalid config at {}: 'prompt_limit' must be at least 1",
            config_path.display()
        );
    }
    if raw.chunk_limit == Some(0) {
        bail!(
            "Invalid config at {}: 'chunk_limit' must be at least 1",
            config_path.display()
        );
    }
    if let Some(fields) = &raw.subagent_id_fields {
        if fields.is_empty() || fields.iter().any(|f| f.is_empty()) {
            bail!(
                "Invalid config at {}: 'subagent_id_fields' must list at least one non-empty field name",
                config_path.display()
            );
        }
    }
    Ok(())
}

/// Loads and validates a config file, filling unset keys with defaults.
pub fn load_config(config_path: &Path) -> Result<Config> {
    let content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config: {}", config_path.display()))?;

    // An empty file is valid and means "all defaults"
    let raw: ConfigRaw = if content.trim().is_empty() {
        ConfigRaw::default()
    } else {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", config_path.display()))?
    };

    validate(&raw, config_path)?;

    let defaults = Config::default();
    let log = raw.log.unwrap_or_default();

    Ok(Config {
        translate: TranslateOptions {
            placeholder: raw.placeholder.unwrap_or(defaults.translate.placeholder),
            prompt_limit: raw.prompt_limit.unwrap_or(defaults.translate.prompt_limit),
            chunk_limit: raw.chunk_limit.unwrap_or(defaults.translate.chunk_limit),
            subagent_id_fields: raw
                .subagent_id_fields
                .unwrap_or(defaults.translate.subagent_id_fields),
        },
        log: LogOptions {
            pretty: log.pretty.unwrap_or(defaults.log.pretty),
            human_readable: log.human_readable.unwrap_or(defaults.log.human_readable),
        },
    })
}

/// Load the config named on the command line, or the default one if it exists.
///
/// An explicit path must exist. A missing default file means built-in defaults.
pub fn resolve_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        debug!(path = %path.display(), "loading config");
        return load_config(path);
    }

    let path = default_config_path();
    if path.exists() {
        debug!(path = %path.display(), "loading default config");
        load_config(&path)
    } else {
        Ok(Config::default())
    }
}
