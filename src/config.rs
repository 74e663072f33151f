/// Service configuration.
///
/// Loaded from `flopred.toml` in the working directory. Every section is
/// optional: a missing file or a missing key falls back to the defaults
/// below, so a bare checkout runs with no configuration at all. A present
/// but malformed file is an error — silently ignoring a typo'd config is
/// worse than refusing to start.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::loader::DEFAULT_ARTIFACT_DIR;

/// Default configuration file path, relative to the working directory.
pub const CONFIG_FILE: &str = "flopred.toml";

// ---------------------------------------------------------------------------
// Configuration schema
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub artifacts: ArtifactsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ArtifactsConfig {
    /// Directory holding the four artifact files.
    pub dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Minimum level: "debug", "info", "warn", or "error".
    pub level: String,
    /// Optional log file; console-only when absent.
    pub file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig::default(),
            artifacts: ArtifactsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind_address: "127.0.0.1".to_string(),
            port: 8401,
        }
    }
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        ArtifactsConfig {
            dir: PathBuf::from(DEFAULT_ARTIFACT_DIR),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl ServerConfig {
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Loads the configuration from the default path.
pub fn load_config() -> Result<Config, String> {
    load_config_from(Path::new(CONFIG_FILE))
}

/// Loads the configuration from `path`, falling back to defaults when the
/// file does not exist.
pub fn load_config_from(path: &Path) -> Result<Config, String> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(Config::default());
        }
        Err(e) => return Err(format!("cannot read {}: {}", path.display(), e)),
    };
    parse_config(&text).map_err(|e| format!("cannot parse {}: {}", path.display(), e))
}

fn parse_config(text: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(text)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
