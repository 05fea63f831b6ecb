//! Decision engine implementation

use super::types::{DecisionRequest, DecisionResponse};
use crate::compiler::TreeCompiler;
use crate::config::EngineConfig;
use crate::definition::TreeDocument;
use crate::error::{Result, SdkError};
use arbor_core::Node;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

/// Holds frozen trees by id and evaluates requests against them
///
/// Trees are immutable once loaded, so one engine can serve concurrent
/// `decide` calls from many threads.
pub struct DecisionEngine {
    /// Compiled trees by id
    trees: HashMap<String, Arc<Node>>,

    /// Configuration
    config: EngineConfig,
}

/// Largest random suffix; six hex digits
const REQUEST_SUFFIX_MAX: u32 = 0xFF_FFFF;

impl DecisionEngine {
    /// Generate a unique request ID
    /// Format: req_YYYYMMDDHHmmss_xxxxxx
    fn generate_request_id() -> String {
        use chrono::Utc;
        use rand::Rng;

        let datetime_str = Utc::now().format("%Y%m%d%H%M%S").to_string();
        let random: u32 = rand::thread_rng().gen_range(0..=REQUEST_SUFFIX_MAX);

        Self::format_request_id(&datetime_str, random)
    }

    fn format_request_id(datetime_str: &str, suffix: u32) -> String {
        format!("req_{}_{:06x}", datetime_str, suffix)
    }

    /// Create an engine from configuration
    pub fn new(config: EngineConfig) -> Result<Self> {
        Self::with_trees(config, Vec::new())
    }

    /// Create an engine from configuration plus trees built in code
    pub(crate) fn with_trees(config: EngineConfig, extra: Vec<(String, Arc<Node>)>) -> Result<Self> {
        let mut trees = HashMap::new();

        for path in &config.tree_files {
            let document = TreeDocument::from_file(path).map_err(|err| match err {
                SdkError::IoError(io) => SdkError::ConfigError(format!(
                    "cannot read tree file {}: {}",
                    path.display(),
                    io
                )),
                other => other,
            })?;
            let root = TreeCompiler::compile(&document.tree)?;
            tracing::info!(tree = %document.tree.id, file = %path.display(), "loaded tree");
            insert_tree(&mut trees, document.tree.id, root)?;
        }

        for (source, content) in &config.tree_contents {
            let document = TreeDocument::from_yaml(content)?;
            let root = TreeCompiler::compile(&document.tree)?;
            tracing::info!(tree = %document.tree.id, source = %source, "loaded tree");
            insert_tree(&mut trees, document.tree.id, root)?;
        }

        for (id, root) in extra {
            tracing::info!(tree = %id, "registered tree");
            insert_tree(&mut trees, id, root)?;
        }

        tracing::info!(trees = trees.len(), "decision engine ready");
        Ok(Self { trees, config })
    }

    /// Evaluate a request against the tree it names
    pub fn decide(&self, mut request: DecisionRequest) -> Result<DecisionResponse> {
        let start = Instant::now();

        let request_id = match request.metadata.get("request_id") {
            Some(existing_id) => existing_id.clone(),
            None => {
                let new_id = Self::generate_request_id();
                request
                    .metadata
                    .insert("request_id".to_string(), new_id.clone());
                tracing::debug!("Generated new request_id: {}", new_id);
                new_id
            }
        };

        let tree = self
            .trees
            .get(&request.tree_id)
            .ok_or_else(|| SdkError::TreeNotFound(request.tree_id.clone()))?;

        let seed = Some(self.config.audit_seed.clone());
        let outcome = tree.eval(&request.facts, seed).map_err(|err| {
            tracing::debug!(request_id = %request_id, tree = %request.tree_id, error = %err, "decision failed");
            SdkError::from(err)
        })?;

        let processing_time_ms = start.elapsed().as_millis() as u64;

        match &outcome {
            Some(decision) if self.config.enable_tracing || request.options.enable_trace => {
                tracing::info!(
                    request_id = %request_id,
                    tree = %request.tree_id,
                    audit = ?decision.audit,
                    "decision reached"
                );
            }
            Some(decision) => {
                tracing::debug!(request_id = %request_id, tree = %request.tree_id, steps = decision.audit.len(), "decision reached");
            }
            None => {
                tracing::debug!(request_id = %request_id, tree = %request.tree_id, "no decision");
            }
        }

        Ok(DecisionResponse {
            request_id,
            tree_id: request.tree_id,
            outcome,
            processing_time_ms,
            metadata: request.metadata,
        })
    }

    /// Ids of the loaded trees, sorted
    pub fn tree_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.trees.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Root node of a loaded tree
    pub fn tree(&self, id: &str) -> Option<&Arc<Node>> {
        self.trees.get(id)
    }

    /// Get configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

fn insert_tree(trees: &mut HashMap<String, Arc<Node>>, id: String, root: Arc<Node>) -> Result<()> {
    if trees.contains_key(&id) {
        return Err(SdkError::DuplicateTree(id));
    }
    trees.insert(id, root);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision_engine::DecisionRequest;
    use arbor_core::{Facts, Value};

    const TIERS: &str = r#"
tree:
  id: tiers
  root:
    rules:
      - when: "tier == 'gold'"
        result: { discount: 20 }
      - when: "tier == 'silver'"
        then: {}
"#;

    fn facts(tier: &str) -> Facts {
        let mut facts = Facts::new();
        facts.insert("tier".to_string(), Value::from(tier));
        facts
    }

    #[test]
    fn test_generate_request_id_format() {
        let id = DecisionEngine::generate_request_id();
        assert!(id.starts_with("req_"));
        assert_eq!(id.len(), "req_".len() + 14 + 1 + 6);
    }

    #[test]
    fn test_request_id_suffix_covers_six_hex_digits() {
        assert_eq!(
            DecisionEngine::format_request_id("20240501120000", REQUEST_SUFFIX_MAX),
            "req_20240501120000_ffffff"
        );
        assert_eq!(
            DecisionEngine::format_request_id("20240501120000", 0),
            "req_20240501120000_000000"
        );
    }

    #[test]
    fn test_decide_from_content() {
        let config = EngineConfig::new().with_tree_content("tiers", TIERS);
        let engine = DecisionEngine::new(config).unwrap();

        let response = engine
            .decide(DecisionRequest::new("tiers", facts("gold")))
            .unwrap();
        assert_eq!(response.tree_id, "tiers");
        assert!(response.request_id.starts_with("req_"));
        assert_eq!(response.metadata.get("request_id"), Some(&response.request_id));
        assert_eq!(response.audit(), ["tier == 'gold'", "discount:20"]);
    }

    #[test]
    fn test_audit_seed_is_prepended() {
        let config = EngineConfig::new()
            .with_tree_content("tiers", TIERS)
            .with_audit_seed(["tenant:acme"]);
        let engine = DecisionEngine::new(config).unwrap();

        let response = engine
            .decide(DecisionRequest::new("tiers", facts("gold")))
            .unwrap();
        assert_eq!(response.audit(), ["tenant:acme", "tier == 'gold'", "discount:20"]);
    }

    #[test]
    fn test_no_decision_is_not_an_error() {
        let engine =
            DecisionEngine::new(EngineConfig::new().with_tree_content("tiers", TIERS)).unwrap();

        let response = engine
            .decide(DecisionRequest::new("tiers", facts("silver")))
            .unwrap();
        assert!(!response.is_decided());
    }

    #[test]
    fn test_unknown_tree() {
        let engine = DecisionEngine::new(EngineConfig::new()).unwrap();
        let err = engine
            .decide(DecisionRequest::new("nope", Facts::new()))
            .unwrap_err();
        assert!(matches!(err, SdkError::TreeNotFound(id) if id == "nope"));
    }

    #[test]
    fn test_duplicate_tree_ids() {
        let config = EngineConfig::new()
            .with_tree_content("first", TIERS)
            .with_tree_content("second", TIERS);
        let err = DecisionEngine::new(config).err().unwrap();
        assert!(matches!(err, SdkError::DuplicateTree(id) if id == "tiers"));
    }

    #[test]
    fn test_missing_tree_file() {
        let config = EngineConfig::new().with_tree_file("/definitely/not/here.yaml");
        let err = DecisionEngine::new(config).err().unwrap();
        assert!(matches!(err, SdkError::ConfigError(_)));
    }
}
