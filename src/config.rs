// File: src/config.rs
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Settings for a [`Registry`](crate::registry::Registry).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    /// Directory holding one `<id>.bc` file per classifier.
    pub data_dir: PathBuf,
    /// Abort startup on the first unreadable model file instead of skipping it.
    pub strict_discovery: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            strict_discovery: false,
        }
    }
}

impl RegistryConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict_discovery = strict;
        self
    }

    /// Reads a JSON config file; missing fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let file = std::fs::read(path)?;
        let config = serde_json::from_slice(&file)?;
        Ok(config)
    }
}
