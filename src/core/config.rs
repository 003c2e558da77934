//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.ragchat/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RagchatConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServiceConfig {
    pub endpoint: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UiConfig {
    pub placeholder: Option<String>,
    pub bot_label: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/api/chat";
pub const DEFAULT_PLACEHOLDER: &str = "Type your message...";
pub const DEFAULT_BOT_LABEL: &str = "bot";
pub const ENDPOINT_ENV_VAR: &str = "RAGCHAT_ENDPOINT";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub endpoint: String,
    pub placeholder: String,
    pub bot_label: String,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.ragchat/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".ragchat").join("config.toml"))
}

/// Load config from `~/.ragchat/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `RagchatConfig::default()`.
pub fn load_config() -> Result<RagchatConfig, ConfigError> {
    let Some(path) = config_path() else {
        warn!("Could not determine home directory, using default config");
        return Ok(RagchatConfig::default());
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<RagchatConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(RagchatConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: RagchatConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# ragchat configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [service]
# endpoint = "http://localhost:8000/api/chat"   # Or set RAGCHAT_ENDPOINT

# [ui]
# placeholder = "Type your message..."
# bot_label = "bot"
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &RagchatConfig, cli_endpoint: Option<&str>) -> ResolvedConfig {
    resolve_with_env(config, cli_endpoint, std::env::var(ENDPOINT_ENV_VAR).ok())
}

fn resolve_with_env(
    config: &RagchatConfig,
    cli_endpoint: Option<&str>,
    env_endpoint: Option<String>,
) -> ResolvedConfig {
    let endpoint = cli_endpoint
        .map(str::to_string)
        .or(env_endpoint)
        .or_else(|| config.service.endpoint.clone())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

    ResolvedConfig {
        endpoint,
        placeholder: config
            .ui
            .placeholder
            .clone()
            .unwrap_or_else(|| DEFAULT_PLACEHOLDER.to_string()),
        bot_label: config
            .ui
            .bot_label
            .clone()
            .unwrap_or_else(|| DEFAULT_BOT_LABEL.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with_env(&RagchatConfig::default(), None, None);
        assert_eq!(resolved.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(resolved.placeholder, DEFAULT_PLACEHOLDER);
        assert_eq!(resolved.bot_label, DEFAULT_BOT_LABEL);
    }

    #[test]
    fn test_resolve_precedence() {
        let config = RagchatConfig {
            service: ServiceConfig {
                endpoint: Some("http://file".to_string()),
            },
            ..Default::default()
        };

        let from_file = resolve_with_env(&config, None, None);
        assert_eq!(from_file.endpoint, "http://file");

        let from_env = resolve_with_env(&config, None, Some("http://env".to_string()));
        assert_eq!(from_env.endpoint, "http://env");

        let from_cli = resolve_with_env(&config, Some("http://cli"), Some("http://env".to_string()));
        assert_eq!(from_cli.endpoint, "http://cli");
    }

    #[test]
    fn test_sparse_toml_parses() {
        let toml_str = r#"
[ui]
bot_label = "rag"
"#;
        let config: RagchatConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.ui.bot_label.as_deref(), Some("rag"));
        assert!(config.ui.placeholder.is_none());
        assert!(config.service.endpoint.is_none());
    }

    #[test]
    fn test_full_toml_parses() {
        let toml_str = r#"
[service]
endpoint = "https://rag.internal/api/chat"

[ui]
placeholder = "Ask the docs..."
bot_label = "docs"
"#;
        let config: RagchatConfig = toml::from_str(toml_str).unwrap();
        let resolved = resolve_with_env(&config, None, None);
        assert_eq!(resolved.endpoint, "https://rag.internal/api/chat");
        assert_eq!(resolved.placeholder, "Ask the docs...");
        assert_eq!(resolved.bot_label, "docs");
    }

    #[test]
    fn test_missing_file_generates_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = load_config_from(&path).unwrap();
        assert!(config.service.endpoint.is_none());
        assert!(path.exists(), "default config should be written");

        // The generated file is all comments, so it loads back as defaults.
        let reloaded = load_config_from(&path).unwrap();
        assert!(reloaded.service.endpoint.is_none());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[service\nendpoint = ").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("config parse error"));
    }
}
