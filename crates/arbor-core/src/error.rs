//! Error types for Arbor Core

use thiserror::Error;

/// Build-time error raised when a rule is appended with a missing argument
///
/// The node's rule list is left untouched whenever one of these is returned.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("predicate is nil")]
    MissingPredicate,

    #[error("next is nil")]
    MissingChild,

    #[error("result is nil")]
    MissingResult,
}

/// Evaluation-time error reported by a predicate
///
/// The wrapped error is whatever the predicate produced; the tree passes it
/// back to the caller unchanged, so it can be downcast to the concrete type.
#[derive(Error, Debug)]
#[error(transparent)]
pub struct PredicateError(anyhow::Error);

impl PredicateError {
    /// Wrap an error raised while evaluating a predicate
    pub fn new<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self(anyhow::Error::new(error))
    }

    /// Create an error from a plain message
    pub fn msg(message: impl std::fmt::Display + std::fmt::Debug + Send + Sync + 'static) -> Self {
        Self(anyhow::Error::msg(message))
    }

    /// Borrow the underlying error as a concrete type
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: std::fmt::Display + std::fmt::Debug + Send + Sync + 'static,
    {
        self.0.downcast_ref::<E>()
    }

    /// Unwrap into the underlying `anyhow::Error`
    pub fn into_inner(self) -> anyhow::Error {
        self.0
    }
}

impl From<anyhow::Error> for PredicateError {
    fn from(error: anyhow::Error) -> Self {
        Self(error)
    }
}
