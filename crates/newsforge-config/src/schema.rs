//! Configuration schema definitions.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::loader::ConfigLoader;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub extraction: ExtractionConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Get the `~/.newsforge` directory path.
pub fn newsforge_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".newsforge"))
        .unwrap_or_else(|| PathBuf::from(".newsforge"))
}

fn expand(path: &std::path::Path) -> PathBuf {
    PathBuf::from(ConfigLoader::expand_path(&path.to_string_lossy()))
}

/// Browser (Chrome DevTools Protocol) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    #[serde(default = "default_debug_port")]
    pub debug_port: u16,

    #[serde(default = "default_headless")]
    pub headless: bool,

    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,

    #[serde(default = "default_viewport_height")]
    pub viewport_height: u32,

    /// Explicit Chrome/Chromium executable; auto-detected when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chrome_path: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_dir: Option<PathBuf>,

    /// How long to wait for a launched Chrome to expose its debug endpoint.
    #[serde(default = "default_launch_timeout_ms")]
    pub launch_timeout_ms: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            debug_port: default_debug_port(),
            headless: default_headless(),
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
            chrome_path: None,
            profile_dir: None,
            launch_timeout_ms: default_launch_timeout_ms(),
        }
    }
}

impl BrowserConfig {
    /// Profile directory with `~` expanded, defaulting to `~/.newsforge/browser-profile`.
    pub fn profile_dir(&self) -> PathBuf {
        self.profile_dir
            .as_deref()
            .map(expand)
            .unwrap_or_else(|| newsforge_dir().join("browser-profile"))
    }
}

fn default_debug_port() -> u16 {
    9222
}

fn default_headless() -> bool {
    true
}

fn default_viewport_width() -> u32 {
    1280
}

fn default_viewport_height() -> u32 {
    800
}

fn default_launch_timeout_ms() -> u64 {
    6000
}

/// Extraction orchestration configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Navigation timeout per extraction.
    #[serde(default = "default_extraction_timeout")]
    pub timeout_ms: u64,

    /// Upper bound on extractions holding a page at the same time.
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_extraction_timeout(),
            max_concurrent: default_max_concurrent(),
        }
    }
}

fn default_extraction_timeout() -> u64 {
    30_000
}

fn default_max_concurrent() -> usize {
    4
}

/// Template storage configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templates_dir: Option<PathBuf>,
}

impl StorageConfig {
    /// Templates directory with `~` expanded, defaulting to `~/.newsforge/templates`.
    pub fn templates_dir(&self) -> PathBuf {
        self.templates_dir
            .as_deref()
            .map(expand)
            .unwrap_or_else(|| newsforge_dir().join("templates"))
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dir: None,
        }
    }
}

impl LoggingConfig {
    /// Log directory with `~` expanded, defaulting to `~/.newsforge/logs`.
    pub fn dir(&self) -> PathBuf {
        self.dir
            .as_deref()
            .map(expand)
            .unwrap_or_else(|| newsforge_dir().join("logs"))
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
