//! Configuration management for prsieve
//!
//! Supports feature-specific configuration sections:
//! - [cleanse] - diff cleansing settings
//! - [review] - AI review settings
//! - [log] - logging settings

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Current configuration version
pub const CURRENT_CONFIG_VERSION: &str = "1";

/// Supported configuration versions
pub const SUPPORTED_CONFIG_VERSIONS: &[&str] = &["1"];

/// File name of the per-repository configuration
pub const REPO_CONFIG_FILE: &str = ".prsieve.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Root configuration structure supporting multiple features
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Configuration version for tracking schema changes
    #[serde(default = "default_config_version")]
    pub version: String,

    #[serde(default)]
    pub cleanse: Option<CleanseConfig>,

    #[serde(default)]
    pub review: Option<ReviewConfig>,

    #[serde(default)]
    pub log: Option<LogConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_config_version(),
            cleanse: None,
            review: None,
            log: None,
        }
    }
}

/// Configuration for diff cleansing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanseConfig {
    /// Ignore file read from the repository root
    #[serde(default = "default_ignore_file")]
    pub ignore_file: String,

    /// Additional ignore patterns appended after the ignore file's entries
    #[serde(default)]
    pub extra_patterns: Vec<String>,
}

impl Default for CleanseConfig {
    fn default() -> Self {
        Self {
            ignore_file: default_ignore_file(),
            extra_patterns: Vec::new(),
        }
    }
}

/// Configuration for the AI review poster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewConfig {
    #[serde(default = "default_model")]
    pub model: String,

    /// Diff characters forwarded to the model before truncation
    #[serde(default = "default_max_diff_chars")]
    pub max_diff_chars: usize,

    #[serde(default = "default_github_api_base")]
    pub github_api_base: String,

    #[serde(default = "default_openai_api_base")]
    pub openai_api_base: String,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_diff_chars: default_max_diff_chars(),
            github_api_base: default_github_api_base(),
            openai_api_base: default_openai_api_base(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Optional log file; stderr logging stays enabled either way
    #[serde(default)]
    pub file: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_config_version() -> String {
    CURRENT_CONFIG_VERSION.to_string()
}

fn default_ignore_file() -> String {
    ".gitignore".to_string()
}

fn default_model() -> String {
    "gpt-4.1".to_string()
}

fn default_max_diff_chars() -> usize {
    120_000
}

fn default_github_api_base() -> String {
    "https://api.github.com".to_string()
}

fn default_openai_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Check if the configuration version is supported
    pub fn is_version_supported(&self) -> bool {
        SUPPORTED_CONFIG_VERSIONS.contains(&self.version.as_str())
    }

    /// Get a warning message for unsupported versions
    pub fn version_warning(&self) -> Option<String> {
        if self.is_version_supported() {
            return None;
        }
        Some(format!(
            "Configuration version '{}' is not supported. Supported versions: {}. Using defaults where needed.",
            self.version,
            SUPPORTED_CONFIG_VERSIONS.join(", ")
        ))
    }

    /// Load configuration from file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(warning) = config.version_warning() {
            warn!("{}", warning);
        }

        if config.version.is_empty() {
            config.version = CURRENT_CONFIG_VERSION.to_string();
        }

        Ok(config)
    }

    /// Get the default config directory path
    pub fn get_config_dir() -> Option<PathBuf> {
        crate::get_config_home().map(|h| h.join("prsieve"))
    }

    /// Load configuration with priority:
    /// 1. Defaults
    /// 2. Global config (`$XDG_CONFIG_HOME/prsieve/config.toml`)
    /// 3. Repo config (`<repo_root>/.prsieve.toml`)
    pub fn load(repo_root: &Path) -> Self {
        let mut config = Self::default();

        if let Some(config_dir) = Self::get_config_dir() {
            config = config.merge_file(&config_dir.join("config.toml"));
        }
        config.merge_file(&repo_root.join(REPO_CONFIG_FILE))
    }

    fn merge_file(self, path: &Path) -> Self {
        if !path.exists() {
            return self;
        }
        match Self::load_from_file(path) {
            Ok(loaded) => self.merge(loaded),
            Err(e) => {
                warn!("skipping config: {}", e);
                self
            }
        }
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(mut self, other: Config) -> Self {
        if !other.version.is_empty() {
            self.version = other.version;
        }
        if other.cleanse.is_some() {
            self.cleanse = other.cleanse;
        }
        if other.review.is_some() {
            self.review = other.review;
        }
        if other.log.is_some() {
            self.log = other.log;
        }
        self
    }

    pub fn cleanse_or_default(&self) -> CleanseConfig {
        self.cleanse.clone().unwrap_or_default()
    }

    pub fn review_or_default(&self) -> ReviewConfig {
        self.review.clone().unwrap_or_default()
    }

    pub fn log_or_default(&self) -> LogConfig {
        self.log.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.version, "1");
        assert!(config.cleanse.is_none());
        assert!(config.review.is_none());
        assert!(config.log.is_none());
    }

    #[test]
    fn test_config_version_validation() {
        let config = Config::default();
        assert!(config.is_version_supported());
        assert!(config.version_warning().is_none());

        let unsupported_config = Config {
            version: "999".to_string(),
            ..Config::default()
        };
        assert!(!unsupported_config.is_version_supported());
        assert!(unsupported_config.version_warning().is_some());
    }

    #[test]
    fn test_parse_config_with_sections() {
        let toml_str = r#"
version = "1"

[cleanse]
ignore_file = ".reviewignore"
extra_patterns = ["*.snap", "fixtures/"]

[review]
model = "gpt-4o"
max_diff_chars = 5000
"#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert!(config.is_version_supported());

        let cleanse = config.cleanse.unwrap();
        assert_eq!(cleanse.ignore_file, ".reviewignore");
        assert_eq!(cleanse.extra_patterns, vec!["*.snap", "fixtures/"]);

        let review = config.review.unwrap();
        assert_eq!(review.model, "gpt-4o");
        assert_eq!(review.max_diff_chars, 5000);
        assert_eq!(review.github_api_base, "https://api.github.com");
    }

    #[test]
    fn test_section_defaults() {
        let cleanse = CleanseConfig::default();
        assert_eq!(cleanse.ignore_file, ".gitignore");
        assert!(cleanse.extra_patterns.is_empty());

        let review = ReviewConfig::default();
        assert_eq!(review.model, "gpt-4.1");
        assert_eq!(review.max_diff_chars, 120_000);
        assert_eq!(review.openai_api_base, "https://api.openai.com/v1");

        assert_eq!(LogConfig::default().level, "info");
    }

    #[test]
    fn test_merge_prefers_other_sections() {
        let base = Config {
            cleanse: Some(CleanseConfig::default()),
            ..Config::default()
        };
        let other = Config {
            review: Some(ReviewConfig {
                model: "o3".to_string(),
                ..ReviewConfig::default()
            }),
            ..Config::default()
        };

        let merged = base.merge(other);
        assert!(merged.cleanse.is_some());
        assert_eq!(merged.review_or_default().model, "o3");
    }

    #[test]
    fn test_load_reads_repo_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(REPO_CONFIG_FILE),
            "[cleanse]\nextra_patterns = [\"docs/\"]\n",
        )
        .unwrap();

        let config = Config::load(dir.path());
        assert_eq!(config.cleanse_or_default().extra_patterns, vec!["docs/"]);
    }

    #[test]
    fn test_load_from_file_reports_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[cleanse\n").unwrap();

        let err = Config::load_from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
