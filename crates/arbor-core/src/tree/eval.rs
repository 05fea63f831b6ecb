//! Tree evaluation
//!
//! Evaluation starts at a node and tests its rules in append order. The
//! first rule whose predicate matches wins the level: its description is
//! recorded, then either its result ends the walk or its child node becomes
//! the next level. Rules after the winner are never evaluated.
//!
//! There is no partial success. A level with no matching rule yields
//! `Ok(None)` and a predicate error yields `Err`; in both cases every audit
//! entry gathered so far, including ones from levels that did match, is
//! dropped.

use super::node::{Node, Outcome};
use crate::audit::canonical_results;
use crate::error::PredicateError;
use crate::types::{Facts, Results};
use serde::{Deserialize, Serialize};

/// A terminal result together with the path that led to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    /// Result map of the terminal rule that matched
    pub results: Results,
    /// Matched rule descriptions from the root down, then the canonical result encoding
    pub audit: Vec<String>,
}

impl Node {
    /// Evaluate the tree rooted at this node
    ///
    /// `audit` seeds the trail; `None` starts from an empty one. Returns
    /// `Ok(Some(decision))` when a terminal rule is reached, `Ok(None)` when
    /// some level has no matching rule, and the predicate's own error,
    /// unchanged, when any predicate fails.
    ///
    /// The walk is a loop rather than recursion, so tree height does not
    /// consume call stack.
    pub fn eval(
        &self,
        facts: &Facts,
        audit: Option<Vec<String>>,
    ) -> Result<Option<Decision>, PredicateError> {
        let mut audit = audit.unwrap_or_default();
        let mut node = self;
        let mut depth = 0usize;

        'levels: loop {
            for (index, rule) in node.rules.iter().enumerate() {
                tracing::trace!(depth, index, "testing rule");

                let verdict = match rule.predicate.evaluate(facts) {
                    Ok(verdict) => verdict,
                    Err(err) => {
                        tracing::debug!(depth, index, error = %err, "predicate failed, aborting evaluation");
                        return Err(err);
                    }
                };

                if !verdict.matched {
                    continue;
                }

                tracing::debug!(depth, index, description = %verdict.description, "rule matched");
                audit.push(verdict.description);

                match &rule.outcome {
                    Outcome::Child(child) => {
                        node = child.as_ref();
                        depth += 1;
                        continue 'levels;
                    }
                    Outcome::Result(results) => {
                        audit.push(canonical_results(results));
                        return Ok(Some(Decision {
                            results: results.clone(),
                            audit,
                        }));
                    }
                }
            }

            tracing::debug!(depth, rules = node.rules.len(), "no rule matched");
            return Ok(None);
        }
    }

    /// Evaluate with an empty audit trail
    pub fn decide(&self, facts: &Facts) -> Result<Option<Decision>, PredicateError> {
        self.eval(facts, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::{from_fn, SharedPredicate, Verdict};
    use crate::types::Value;
    use std::sync::Arc;

    fn matching(description: &'static str) -> SharedPredicate {
        from_fn(move |_: &Facts| Ok(Verdict::matched(description)))
    }

    fn failing() -> SharedPredicate {
        from_fn(|_: &Facts| Err(PredicateError::msg("TEST")))
    }

    #[test]
    fn test_empty_node_is_no_decision() {
        let node = Node::new();
        assert!(node.decide(&Facts::new()).unwrap().is_none());
    }

    #[test]
    fn test_seed_is_kept_in_front() {
        let mut result = Results::new();
        result.insert("k".to_string(), Value::Int(1));
        let mut node = Node::new();
        node.append_result_rule(matching("hit"), result).unwrap();

        let decision = node
            .eval(&Facts::new(), Some(vec!["seed".to_string()]))
            .unwrap()
            .unwrap();
        assert_eq!(decision.audit, vec!["seed", "hit", "k:1"]);
    }

    #[test]
    fn test_seed_is_dropped_on_no_match() {
        let mut node = Node::new();
        node.append_decision_rule(matching("hit"), Arc::new(Node::new()))
            .unwrap();

        let outcome = node
            .eval(&Facts::new(), Some(vec!["seed".to_string()]))
            .unwrap();
        assert!(outcome.is_none());
    }

    #[test]
    fn test_error_after_deep_match() {
        let mut leaf = Node::new();
        leaf.append_result_rule(failing(), Results::new()).unwrap();

        let mut root = Node::new();
        root.append_decision_rule(matching("hit"), Arc::new(leaf))
            .unwrap();

        let err = root.decide(&Facts::new()).unwrap_err();
        assert_eq!(err.to_string(), "TEST");
    }

    #[test]
    fn test_decision_serde_keeps_timestamps() {
        use chrono::{TimeZone, Utc};

        let mut results = Results::new();
        results.insert(
            "expires".to_string(),
            Value::Timestamp(Utc.with_ymd_and_hms(2014, 1, 1, 0, 0, 0).unwrap()),
        );
        results.insert("tier".to_string(), Value::from("gold"));
        let decision = Decision {
            results,
            audit: vec!["hit".to_string()],
        };

        let json = serde_json::to_string(&decision).unwrap();
        let restored: Decision = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, decision);
    }

    #[test]
    fn test_deep_tree_does_not_recurse() {
        let mut result = Results::new();
        result.insert("depth".to_string(), Value::Int(50_000));
        let mut node = Node::new();
        node.append_result_rule(matching("leaf"), result).unwrap();

        for _ in 0..50_000 {
            let mut parent = Node::new();
            parent
                .append_decision_rule(matching("level"), Arc::new(node))
                .unwrap();
            node = parent;
        }

        let decision = node.decide(&Facts::new()).unwrap().unwrap();
        assert_eq!(decision.audit.len(), 50_002);
        assert_eq!(decision.audit.last().map(String::as_str), Some("depth:50000"));

        // Dropping a deep Arc chain recurses; hand it off to a thread with room
        std::thread::Builder::new()
            .stack_size(128 * 1024 * 1024)
            .spawn(move || drop(node))
            .unwrap()
            .join()
            .unwrap();
    }
}
