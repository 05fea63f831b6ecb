//! Arbor Decision Engine SDK
//!
//! High-level API for loading decision trees from YAML or JSON definitions,
//! registering trees built in code, and evaluating requests against them.

pub mod builder;
pub mod compiler;
pub mod config;
pub mod decision_engine;
pub mod definition;
pub mod error;

// Re-export main types
pub use builder::DecisionEngineBuilder;
pub use compiler::TreeCompiler;
pub use config::EngineConfig;
pub use decision_engine::{DecisionEngine, DecisionOptions, DecisionRequest, DecisionResponse};
pub use definition::{ChildDefinition, NodeDefinition, NodeRef, RuleDefinition, TreeDefinition, TreeDocument};
pub use error::{Result, SdkError};

// Re-export commonly used types from dependencies
pub use arbor_core::{Decision, Facts, Node, Results, Value};
pub use arbor_expr::Expression;
