//! Builder pattern for DecisionEngine

use crate::config::EngineConfig;
use crate::decision_engine::DecisionEngine;
use crate::error::Result;
use arbor_core::Node;
use std::path::PathBuf;
use std::sync::Arc;

/// Builder for DecisionEngine
///
/// # Example
///
/// ```rust
/// use arbor_sdk::{DecisionEngineBuilder, DecisionRequest, Facts, Value};
///
/// let engine = DecisionEngineBuilder::new()
///     .add_tree_content(
///         "inline",
///         "tree:\n  id: limits\n  root:\n    rules:\n      - when: \"amount > 100\"\n        result: { review: true }\n",
///     )
///     .build()?;
///
/// let mut facts = Facts::new();
/// facts.insert("amount".to_string(), Value::Int(250));
/// let response = engine.decide(DecisionRequest::new("limits", facts))?;
/// assert_eq!(response.audit(), ["amount > 100", "review:true"]);
/// # Ok::<(), arbor_sdk::SdkError>(())
/// ```
pub struct DecisionEngineBuilder {
    config: EngineConfig,
    trees: Vec<(String, Arc<Node>)>,
}

impl DecisionEngineBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: EngineConfig::new(),
            trees: Vec::new(),
        }
    }

    /// Start from an existing configuration
    pub fn from_config(config: EngineConfig) -> Self {
        Self {
            config,
            trees: Vec::new(),
        }
    }

    /// Add a tree definition file
    pub fn add_tree_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.tree_files.push(path.into());
        self
    }

    /// Add multiple tree definition files
    pub fn add_tree_files(mut self, paths: Vec<PathBuf>) -> Self {
        self.config.tree_files.extend(paths);
        self
    }

    /// Add tree definition content directly (alternative to file path)
    ///
    /// # Arguments
    /// * `name` - Label used in log output for this source
    /// * `content` - YAML content of the definition document
    pub fn add_tree_content(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.config.tree_contents.push((name.into(), content.into()));
        self
    }

    /// Register a tree built in code under `id`
    pub fn add_tree(mut self, id: impl Into<String>, root: Arc<Node>) -> Self {
        self.trees.push((id.into(), root));
        self
    }

    /// Entries placed in front of every audit trail
    pub fn with_audit_seed<I, S>(mut self, seed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config = self.config.with_audit_seed(seed);
        self
    }

    /// Enable tracing
    pub fn enable_tracing(mut self, enable: bool) -> Self {
        self.config.enable_tracing = enable;
        self
    }

    /// Build the decision engine
    pub fn build(self) -> Result<DecisionEngine> {
        DecisionEngine::with_trees(self.config, self.trees)
    }
}

impl Default for DecisionEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_new() {
        let builder = DecisionEngineBuilder::new();
        assert!(builder.config.tree_files.is_empty());
        assert!(builder.trees.is_empty());
        assert!(!builder.config.enable_tracing);
    }

    #[test]
    fn test_builder_collects_sources() {
        let builder = DecisionEngineBuilder::new()
            .add_tree_file("a.yaml")
            .add_tree_files(vec![PathBuf::from("b.yaml"), PathBuf::from("c.json")])
            .add_tree_content("inline", "tree: {}")
            .add_tree("manual", Arc::new(Node::new()))
            .with_audit_seed(["v2"])
            .enable_tracing(true);

        assert_eq!(builder.config.tree_files.len(), 3);
        assert_eq!(builder.config.tree_contents.len(), 1);
        assert_eq!(builder.trees[0].0, "manual");
        assert_eq!(builder.config.audit_seed, vec!["v2"]);
        assert!(builder.config.enable_tracing);
    }

    #[test]
    fn test_build_with_programmatic_tree() {
        let engine = DecisionEngineBuilder::new()
            .add_tree("empty", Arc::new(Node::new()))
            .build()
            .unwrap();
        assert_eq!(engine.tree_ids(), vec!["empty"]);
    }

    #[test]
    fn test_build_rejects_duplicate_programmatic_tree() {
        let result = DecisionEngineBuilder::new()
            .add_tree("same", Arc::new(Node::new()))
            .add_tree("same", Arc::new(Node::new()))
            .build();
        assert!(matches!(result, Err(crate::SdkError::DuplicateTree(_))));
    }
}
