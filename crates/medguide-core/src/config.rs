//! Guide configuration.
//!
//! Values the core hands to its collaborators: where the data document
//! lives, how long the presentation should wait before re-running a search,
//! and which assets the offline cache keeps.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed config: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Runtime configuration; every field has a default.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GuideConfig {
    /// Relative path of the medication data document
    pub data_path: String,
    /// Quiet period after the last keystroke before searching
    pub search_debounce_ms: u64,
    /// Offline cache name
    pub cache_name: String,
    /// Assets pre-cached for offline use
    pub precache_assets: Vec<String>,
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            data_path: "medicamentos.json".into(),
            search_debounce_ms: 300,
            cache_name: "medapp".into(),
            precache_assets: [
                "./",
                "./index.html",
                "./style.css",
                "./app.js",
                "./medicamentos.json",
                "./manifest.webmanifest",
                "./icon-512.png",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

impl GuideConfig {
    /// Parse a (possibly partial) JSON config.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON config file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}
