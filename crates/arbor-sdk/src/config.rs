//! Configuration types for DecisionEngine

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Tree definition file path(s)
    #[serde(default)]
    pub tree_files: Vec<PathBuf>,

    /// Tree definitions as (source name, YAML content) - alternative to file paths
    #[serde(skip)]
    pub tree_contents: Vec<(String, String)>,

    /// Log every decision's audit trail at info level
    #[serde(default)]
    pub enable_tracing: bool,

    /// Entries placed in front of every audit trail
    #[serde(default)]
    pub audit_seed: Vec<String>,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration from YAML
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load configuration from a YAML file
    ///
    /// Relative `tree_files` entries are resolved against the directory
    /// containing the configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = Self::from_yaml(&std::fs::read_to_string(path)?)?;

        if let Some(base) = path.parent() {
            for file in &mut config.tree_files {
                if file.is_relative() {
                    *file = base.join(&*file);
                }
            }
        }

        Ok(config)
    }

    /// Add a tree file
    pub fn with_tree_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.tree_files.push(path.into());
        self
    }

    /// Add tree content directly
    pub fn with_tree_content(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.tree_contents.push((name.into(), content.into()));
        self
    }

    /// Set the audit seed
    pub fn with_audit_seed<I, S>(mut self, seed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.audit_seed = seed.into_iter().map(Into::into).collect();
        self
    }

    /// Enable tracing
    pub fn enable_tracing(mut self, enable: bool) -> Self {
        self.enable_tracing = enable;
        self
    }
}
