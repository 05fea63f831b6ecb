//! Arbor Core - Decision tree data model and evaluation
//!
//! This crate provides the pieces every Arbor tree is made of:
//! - Value types for facts and results
//! - The predicate contract rules are guarded by
//! - Nodes and rules, with their builder methods
//! - First-match, depth-first evaluation with an audit trail
//!
//! # Example
//!
//! ```rust
//! use arbor_core::{predicate, Facts, Node, Results, Value, Verdict};
//! use std::sync::Arc;
//!
//! let is_gold = predicate::from_fn(|facts: &Facts| {
//!     Ok(Verdict::new(facts.get("tier") == Some(&Value::from("gold")), "tier == 'gold'"))
//! });
//!
//! let mut pricing = Node::new();
//! let mut discount = Results::new();
//! discount.insert("discount".to_string(), Value::Int(20));
//! pricing.append_result_rule(is_gold.clone(), discount).unwrap();
//!
//! let mut root = Node::new();
//! root.append_decision_rule(is_gold, Arc::new(pricing)).unwrap();
//!
//! let mut facts = Facts::new();
//! facts.insert("tier".to_string(), Value::from("gold"));
//!
//! let decision = root.decide(&facts).unwrap().expect("gold tier matches");
//! assert_eq!(decision.audit, vec!["tier == 'gold'", "tier == 'gold'", "discount:20"]);
//! ```

pub mod audit;
pub mod error;
pub mod predicate;
pub mod tree;
pub mod types;

// Re-export commonly used types
pub use audit::canonical_results;
pub use error::{PredicateError, ValidationError};
pub use predicate::{Predicate, SharedPredicate, Verdict};
pub use tree::{Decision, Node, Outcome, Rule};
pub use types::{Facts, Results, Value};
