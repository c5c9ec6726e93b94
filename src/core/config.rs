//! # Configuration
//!
//! Settings resolve through a fixed override chain:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.chatview/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use crate::core::transcript::Capabilities;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ChatviewConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub chat: ChatConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub backend_url: Option<String>,
    pub log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ChatConfig {
    pub allow_reload: Option<bool>,
    pub allow_stop: Option<bool>,
    pub allow_append: Option<bool>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
pub const DEFAULT_LOG_LEVEL: &str = "debug";
pub const BACKEND_URL_ENV: &str = "CHATVIEW_BACKEND_URL";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Backend origin, never ending in `/`.
    pub backend_url: String,
    pub log_level: log::LevelFilter,
    pub capabilities: Capabilities,
}

/// Overrides taken from command-line flags. `None`/`false` = not specified.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub backend_url: Option<String>,
    pub no_reload: bool,
    pub no_stop: bool,
    pub no_append: bool,
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

/// Returns the path to `~/.chatview/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".chatview").join("config.toml"))
}

/// Load config from `~/.chatview/config.toml`.
pub fn load_config() -> Result<ChatviewConfig, ConfigError> {
    let Some(path) = config_path() else {
        warn!("Could not determine home directory, using default config");
        return Ok(ChatviewConfig::default());
    };
    load_config_from(&path)
}

/// Load config from an explicit path.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ChatviewConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config_from(path: &Path) -> Result<ChatviewConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(ChatviewConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ChatviewConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# chatview configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# backend_url = "http://localhost:8000"   # Or set CHATVIEW_BACKEND_URL
# log_level = "debug"                      # "error", "warn", "info", "debug", "trace", "off"

# [chat]
# allow_reload = true
# allow_stop = true
# allow_append = true                      # false also hides starter questions
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
pub fn resolve(config: &ChatviewConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Backend: CLI → env → config → default
    let backend_url = cli
        .backend_url
        .clone()
        .or_else(|| std::env::var(BACKEND_URL_ENV).ok())
        .or_else(|| config.general.backend_url.clone())
        .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

    let log_level = config
        .general
        .log_level
        .as_deref()
        .unwrap_or(DEFAULT_LOG_LEVEL)
        .parse()
        .unwrap_or_else(|_| {
            warn!("Unknown log level in config, falling back to {}", DEFAULT_LOG_LEVEL);
            log::LevelFilter::Debug
        });

    let capabilities = Capabilities {
        reload: !cli.no_reload && config.chat.allow_reload.unwrap_or(true),
        stop: !cli.no_stop && config.chat.allow_stop.unwrap_or(true),
        append: !cli.no_append && config.chat.allow_append.unwrap_or(true),
    };

    ResolvedConfig {
        backend_url: normalize_backend(&backend_url),
        log_level,
        capabilities,
    }
}

/// Strips trailing slashes so endpoint paths can be appended directly.
pub fn normalize_backend(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
