use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::manifest::http::DEFAULT_MANIFEST_URL;
use crate::output::OutputMode;
use crate::output::rewrite::DEFAULT_FIELD;
use crate::selector::{Selection, SelectionCriteria, VersionOrdering};

// =============================================================================
// Selection defaults
// =============================================================================

/// Product codes exercised by the plugin verifier (IDEA Community and Ultimate)
pub const DEFAULT_ALLOWED_CODES: &[&str] = &["IIC", "IIU"];

/// Oldest supported major version; mirrors `pluginSinceBuild` in gradle.properties
pub const DEFAULT_MIN_MAJOR: u32 = 213;

/// Gradle version catalog read by the `runPluginVerifier` task
pub const DEFAULT_VERSIONS_FILE: &str = "./gradle/test-intellij.versions.toml";

/// Property holding the plugin's lowest supported build
const SINCE_BUILD_PROPERTY: &str = "pluginSinceBuild";

/// Tool configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub manifest_url: String,
    pub allowed_codes: Vec<String>,
    pub min_major: u32,
    pub ordering: VersionOrdering,
    pub selection: Selection,
    pub output: OutputConfig,
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            manifest_url: DEFAULT_MANIFEST_URL.to_string(),
            allowed_codes: DEFAULT_ALLOWED_CODES.iter().map(|c| c.to_string()).collect(),
            min_major: DEFAULT_MIN_MAJOR,
            ordering: VersionOrdering::default(),
            selection: Selection::default(),
            output: OutputConfig::default(),
            log: LogConfig::default(),
        }
    }
}

/// Output-related configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct OutputConfig {
    pub mode: OutputMode,
    pub versions_file: PathBuf,
    pub field: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            mode: OutputMode::default(),
            versions_file: PathBuf::from(DEFAULT_VERSIONS_FILE),
            field: DEFAULT_FIELD.to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    pub format: LogFormat,
    /// Also append logs to this file
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// Values given on the command line; `None`/`false` leaves the config as is
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub manifest_url: Option<String>,
    pub allowed_codes: Vec<String>,
    pub min_major: Option<u32>,
    pub since_build_from: Option<PathBuf>,
    pub numeric_order: bool,
    pub all: bool,
    pub print: bool,
    pub versions_file: Option<PathBuf>,
    pub field: Option<String>,
    pub log_format: Option<LogFormat>,
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Loads the config from a JSON file, defaulting missing keys
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies command-line overrides on top of this config.
    ///
    /// An explicit `min_major` wins over one derived from `since_build_from`.
    pub fn apply(mut self, overrides: Overrides) -> Result<Self, ConfigError> {
        if let Some(url) = overrides.manifest_url {
            self.manifest_url = url;
        }
        if !overrides.allowed_codes.is_empty() {
            self.allowed_codes = overrides.allowed_codes;
        }
        if let Some(path) = overrides.since_build_from {
            let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
                path: path.clone(),
                source,
            })?;
            self.min_major = since_build_major(&content)?;
        }
        if let Some(min_major) = overrides.min_major {
            self.min_major = min_major;
        }
        if overrides.numeric_order {
            self.ordering = VersionOrdering::Numeric;
        }
        if overrides.all {
            self.selection = Selection::All;
        }
        if overrides.print {
            self.output.mode = OutputMode::Print;
        }
        if let Some(path) = overrides.versions_file {
            self.output.versions_file = path;
        }
        if let Some(field) = overrides.field {
            self.output.field = field;
        }
        if let Some(format) = overrides.log_format {
            self.log.format = format;
        }
        if overrides.log_file.is_some() {
            self.log.file = overrides.log_file;
        }
        Ok(self)
    }

    pub fn criteria(&self) -> SelectionCriteria {
        SelectionCriteria {
            allowed_codes: self.allowed_codes.clone(),
            min_major: self.min_major,
            ordering: self.ordering,
        }
    }
}

/// Extracts the major version from the `pluginSinceBuild` entry of a
/// gradle.properties file (e.g., `pluginSinceBuild = 213` or `213.*`).
pub fn since_build_major(properties: &str) -> Result<u32, ConfigError> {
    let value = properties
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#') && !line.starts_with('!'))
        .filter_map(|line| line.split_once(['=', ':']))
        .find(|(key, _)| key.trim() == SINCE_BUILD_PROPERTY)
        .map(|(_, value)| value.trim())
        .ok_or_else(|| ConfigError::SinceBuild(format!("'{}' not found", SINCE_BUILD_PROPERTY)))?;

    let leading = value.split('.').next().unwrap_or(value);
    leading.parse().map_err(|_| {
        ConfigError::SinceBuild(format!(
            "'{}' has a non-numeric major version: '{}'",
            SINCE_BUILD_PROPERTY, value
        ))
    })
}
