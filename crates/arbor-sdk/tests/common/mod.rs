//! Common test utilities for SDK integration tests

#![allow(dead_code)]

use arbor_sdk::{DecisionEngine, DecisionEngineBuilder, DecisionRequest, DecisionResponse, Facts, Value};
use std::path::PathBuf;

/// Path of a file under `tests/fixtures`
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Build a fact set from name/value pairs
pub fn facts(pairs: &[(&str, Value)]) -> Facts {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}

/// Facts describing one diamond
pub fn diamond(color: &str, clarity: &str, cut: &str, weight: impl Into<Value>) -> Facts {
    facts(&[
        ("color", Value::from(color)),
        ("clarity", Value::from(clarity)),
        ("cut", Value::from(cut)),
        ("weight", weight.into()),
    ])
}

/// Test helper to create a DecisionEngine from inline YAML definitions
pub struct TestEngine {
    builder: DecisionEngineBuilder,
    sources: usize,
}

impl TestEngine {
    pub fn new() -> Self {
        Self {
            builder: DecisionEngineBuilder::new(),
            sources: 0,
        }
    }

    /// Load a tree definition from a YAML string
    pub fn with_tree(mut self, yaml: &str) -> Self {
        self.sources += 1;
        let name = format!("inline-{}", self.sources);
        self.builder = self.builder.add_tree_content(name, yaml.trim());
        self
    }

    /// Load the diamond pricing fixture
    pub fn with_diamond(mut self) -> Self {
        self.builder = self.builder.add_tree_file(fixture("diamond.yaml"));
        self
    }

    pub fn build(self) -> DecisionEngine {
        self.try_build().expect("Failed to build engine")
    }

    pub fn try_build(self) -> arbor_sdk::Result<DecisionEngine> {
        self.builder.build()
    }
}

/// Run one request and fail the test on error
pub fn decide(engine: &DecisionEngine, tree_id: &str, facts: Facts) -> DecisionResponse {
    engine
        .decide(DecisionRequest::new(tree_id, facts))
        .expect("Failed to execute decision")
}
