/// Generator configuration loaded from RON.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::assemble::DuplicatePolicy;
use crate::core::select::DistanceBuckets;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Run settings. Every field has a default, so an empty `()` file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// City named by `{city}`, e.g. "downtown Austin".
    pub city: String,
    /// Base seed for choosing between paragraph alternatives.
    pub seed: u64,
    pub duplicate_policy: DuplicatePolicy,
    pub buckets: DistanceBuckets,
    /// Template file merged over the built-in templates.
    pub templates: Option<PathBuf>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            city: "Austin".to_string(),
            seed: 0,
            duplicate_policy: DuplicatePolicy::default(),
            buckets: DistanceBuckets::default(),
            templates: None,
        }
    }
}

impl GeneratorConfig {
    /// Load a config file. A relative `templates` path is resolved against
    /// the config file's directory.
    pub fn load_from_ron(path: &Path) -> Result<GeneratorConfig, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse_ron(&contents)?;
        if let Some(dir) = path.parent() {
            config.templates = config.templates.take().map(|templates| {
                if templates.is_relative() {
                    dir.join(templates)
                } else {
                    templates
                }
            });
        }
        Ok(config)
    }

    pub fn parse_ron(input: &str) -> Result<GeneratorConfig, ConfigError> {
        Ok(ron::from_str(input)?)
    }
}
