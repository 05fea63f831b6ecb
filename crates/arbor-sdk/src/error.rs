//! SDK error types

use arbor_core::{PredicateError, ValidationError};
use arbor_expr::ExprError;
use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Structurally invalid tree definition
    #[error("Invalid tree definition '{tree}' at {location}: {message}")]
    DefinitionError {
        tree: String,
        location: String,
        message: String,
    },

    /// A `when` clause failed to parse
    #[error("Invalid expression in tree '{tree}' at {location}: {source}")]
    ExpressionError {
        tree: String,
        location: String,
        #[source]
        source: ExprError,
    },

    /// A `ref` names a node the tree does not define
    #[error("Unknown node reference '{name}' in tree '{tree}' at {location}")]
    UnknownReference {
        tree: String,
        name: String,
        location: String,
    },

    /// Named nodes reference each other in a loop
    #[error("Reference cycle in tree '{tree}': {path}")]
    CyclicReference { tree: String, path: String },

    /// Two sources define the same tree id
    #[error("Duplicate tree id: {0}")]
    DuplicateTree(String),

    /// No tree with the requested id is loaded
    #[error("Tree not found: {0}")]
    TreeNotFound(String),

    /// Node builder rejected a rule
    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationError),

    /// A predicate failed during evaluation
    #[error("Evaluation error: {0}")]
    EvaluationError(#[from] PredicateError),

    /// YAML error
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;
