//! Type system for Arbor
//!
//! Facts and results are plain string-keyed maps of [`Value`]s. The tree
//! treats both as opaque: facts are handed to predicates untouched and
//! results are returned exactly as they were attached to a rule.

pub mod value;

use std::collections::HashMap;

pub use value::Value;

/// Named input values consulted by predicates
pub type Facts = HashMap<String, Value>;

/// Terminal output attached to a result rule
pub type Results = HashMap<String, Value>;
