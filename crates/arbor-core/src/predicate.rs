//! Predicate contract
//!
//! A predicate decides whether a rule matches a set of facts. It reports a
//! [`Verdict`] (match flag plus a description used verbatim in the audit
//! trail) or a [`PredicateError`]. The tree never looks inside a predicate;
//! expression languages and hand-written checks plug in through this trait.

use crate::error::PredicateError;
use crate::types::Facts;
use std::sync::Arc;

/// Outcome of a successful predicate evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// Whether the rule matched the facts
    pub matched: bool,
    /// Human-readable description recorded in the audit trail on a match
    pub description: String,
}

impl Verdict {
    /// Create a verdict
    pub fn new(matched: bool, description: impl Into<String>) -> Self {
        Self {
            matched,
            description: description.into(),
        }
    }

    /// A matching verdict
    pub fn matched(description: impl Into<String>) -> Self {
        Self::new(true, description)
    }

    /// A non-matching verdict
    pub fn unmatched(description: impl Into<String>) -> Self {
        Self::new(false, description)
    }
}

/// Rule guard evaluated against the facts
///
/// Implementations must be `Send + Sync` so a frozen tree can be evaluated
/// from several threads at once.
pub trait Predicate: Send + Sync {
    /// Test the facts
    fn evaluate(&self, facts: &Facts) -> Result<Verdict, PredicateError>;

    /// Box this predicate for attaching to a rule
    fn shared(self) -> SharedPredicate
    where
        Self: Sized + 'static,
    {
        Arc::new(self)
    }
}

/// Reference-counted predicate as stored on a rule
pub type SharedPredicate = Arc<dyn Predicate>;

impl<F> Predicate for F
where
    F: Fn(&Facts) -> Result<Verdict, PredicateError> + Send + Sync,
{
    fn evaluate(&self, facts: &Facts) -> Result<Verdict, PredicateError> {
        self(facts)
    }
}

/// Build a shared predicate from a closure
pub fn from_fn<F>(f: F) -> SharedPredicate
where
    F: Fn(&Facts) -> Result<Verdict, PredicateError> + Send + Sync + 'static,
{
    Arc::new(f)
}
