//! Request/Response types for DecisionEngine

use arbor_core::{Decision, Facts, Results};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Decision request options
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecisionOptions {
    /// Log this request's audit trail at info level
    #[serde(default)]
    pub enable_trace: bool,
}

/// Decision request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionRequest {
    /// Tree to evaluate
    pub tree_id: String,

    /// Facts handed to every predicate
    pub facts: Facts,

    /// Request metadata; a `request_id` entry is used as the request id
    #[serde(default)]
    pub metadata: HashMap<String, String>,

    /// Request options
    #[serde(default)]
    pub options: DecisionOptions,
}

impl DecisionRequest {
    /// Create a new decision request
    pub fn new(tree_id: impl Into<String>, facts: Facts) -> Self {
        Self {
            tree_id: tree_id.into(),
            facts,
            metadata: HashMap::new(),
            options: DecisionOptions::default(),
        }
    }

    /// Enable audit trail logging for this request
    pub fn with_trace(mut self) -> Self {
        self.options.enable_trace = true;
        self
    }

    /// Add metadata
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Use a caller-provided request id
    pub fn with_request_id(self, request_id: impl Into<String>) -> Self {
        self.with_metadata("request_id", request_id)
    }
}

/// Decision response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionResponse {
    /// Request ID (for tracking and correlation)
    pub request_id: String,

    /// Tree that was evaluated
    pub tree_id: String,

    /// Terminal result and audit trail, `None` when some level had no matching rule
    pub outcome: Option<Decision>,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,

    /// Request metadata (echoed back)
    pub metadata: HashMap<String, String>,
}

impl DecisionResponse {
    /// Returns true if a terminal rule was reached
    pub fn is_decided(&self) -> bool {
        self.outcome.is_some()
    }

    /// Results of the terminal rule, if any
    pub fn results(&self) -> Option<&Results> {
        self.outcome.as_ref().map(|decision| &decision.results)
    }

    /// Audit trail, empty when there is no decision
    pub fn audit(&self) -> &[String] {
        self.outcome
            .as_ref()
            .map(|decision| decision.audit.as_slice())
            .unwrap_or_default()
    }
}
