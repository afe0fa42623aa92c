//! # prsieve-core
//!
//! Shared configuration and logging setup for the prsieve crates.
//!
//! - `config`: layered TOML configuration (`[cleanse]`, `[review]`, `[log]`)
//! - `logging`: tracing subscriber initialisation

pub mod config;
pub mod logging;

pub use config::{CleanseConfig, Config, ConfigError, LogConfig, ReviewConfig};
pub use logging::init_logging;

use std::env;
use std::path::PathBuf;

/// Resolve the configuration home directory.
///
/// Respects `XDG_CONFIG_HOME` when it is set to a non-empty value and falls
/// back to `~/.config` otherwise.
pub fn get_config_home() -> Option<PathBuf> {
    match env::var_os("XDG_CONFIG_HOME") {
        Some(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => dirs::home_dir().map(|h| h.join(".config")),
    }
}
