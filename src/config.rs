use crate::discovery::DEFAULT_MARKER;
use crate::error::{ChartVersionError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the configuration file looked up in the current directory.
pub const CONFIG_FILE_NAME: &str = "chartversion.toml";

/// Represents the complete configuration for chart-version.
///
/// Every field has a default, so an empty file (or no file at all) reproduces
/// the plain `git rev-list` + `version:` line behaviour.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_marker")]
    pub marker: String,

    #[serde(default)]
    pub git: GitConfig,

    #[serde(default)]
    pub manifest: ManifestConfig,
}

fn default_marker() -> String {
    DEFAULT_MARKER.to_string()
}

fn default_git_binary() -> String {
    "git".to_string()
}

fn default_field() -> String {
    "version".to_string()
}

fn default_sed_binary() -> String {
    "sed".to_string()
}

/// How commit counts are obtained.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CountBackend {
    /// `git rev-list --count HEAD` in a subprocess
    #[default]
    Cli,
    /// In-process revwalk through libgit2
    Libgit2,
}

/// Configuration for commit counting.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitConfig {
    #[serde(default)]
    pub backend: CountBackend,

    #[serde(default = "default_git_binary")]
    pub binary: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        GitConfig {
            backend: CountBackend::default(),
            binary: default_git_binary(),
        }
    }
}

/// How the manifest is rewritten.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PatcherKind {
    /// Regex rewrite inside this process
    #[default]
    Inplace,
    /// `sed -i` in a subprocess
    Sed,
}

/// Configuration for the manifest rewrite.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ManifestConfig {
    #[serde(default = "default_field")]
    pub field: String,

    #[serde(default)]
    pub patcher: PatcherKind,

    #[serde(default = "default_sed_binary")]
    pub sed_binary: String,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        ManifestConfig {
            field: default_field(),
            patcher: PatcherKind::default(),
            sed_binary: default_sed_binary(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            marker: default_marker(),
            git: GitConfig::default(),
            manifest: ManifestConfig::default(),
        }
    }
}

impl Config {
    /// Parses and validates configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(text).map_err(|e| ChartVersionError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values that would break discovery or the substitution pattern.
    pub fn validate(&self) -> Result<()> {
        if self.marker.is_empty() || self.marker.contains(['/', '\\']) {
            return Err(ChartVersionError::config(format!(
                "marker must be a single non-empty file name, got '{}'",
                self.marker
            )));
        }

        let field_ok = !self.manifest.field.is_empty()
            && self
                .manifest
                .field
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'));
        if !field_ok {
            return Err(ChartVersionError::config(format!(
                "manifest field may only contain letters, digits, '_', '.' and '-', got '{}'",
                self.manifest.field
            )));
        }

        if self.git.binary.trim().is_empty() {
            return Err(ChartVersionError::config("git binary must not be empty"));
        }

        if self.manifest.sed_binary.trim().is_empty() {
            return Err(ChartVersionError::config("sed binary must not be empty"));
        }

        Ok(())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `chartversion.toml` in current directory
/// 3. `.chartversion.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read, parsed or validated
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        read_config_file(path)?
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        read_config_file(Path::new(CONFIG_FILE_NAME))?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if config_path.exists() {
            read_config_file(&config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    Config::from_toml(&config_str)
}

fn read_config_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        ChartVersionError::config(format!("cannot read {}: {}", path.display(), e))
    })
}
