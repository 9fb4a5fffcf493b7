//! Configuration file support.
//!
//! The optional file `~/.config/codeshine/config.toml` seeds the shared
//! defaults:
//!
//! ```toml
//! [highlight]
//! language = "javascript"
//! engine = "hljs"
//! wrapLines = "line"
//! autolink = true
//! ```

mod schema;

pub use schema::Config;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::options::defaults;

/// Returns the config directory path.
///
/// Checks `CODESHINE_CONFIG_DIR` environment variable first, then falls back
/// to the system default (~/.config/codeshine on Linux).
pub fn config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("CODESHINE_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    dirs::config_dir().map(|p| p.join("codeshine"))
}

/// Returns the default config file path (~/.config/codeshine/config.toml)
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join("config.toml"))
}

/// Load configuration from the default path or return defaults
pub fn load_config() -> Result<Config> {
    if let Some(path) = config_path() {
        if path.exists() {
            return load_config_from(&path);
        }
    }
    Ok(Config::default())
}

/// Load configuration from a specific path
pub fn load_config_from(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    Ok(config)
}

/// Replace the shared defaults with the configured settings.
///
/// [`Defaults::reset`](crate::Defaults::reset) still restores the built-in
/// values, not these.
pub fn apply_config(config: &Config) {
    defaults().load(config.highlight.clone());
}
