//! Node and rule definitions

use crate::error::ValidationError;
use crate::predicate::SharedPredicate;
use crate::types::Results;
use std::fmt;
use std::sync::Arc;

/// What a rule does when its predicate matches
#[derive(Clone)]
pub enum Outcome {
    /// Continue evaluation in a child node
    Child(Arc<Node>),
    /// Stop with a fixed result map
    Result(Results),
}

/// One entry of a node's ordered rule list
#[derive(Clone)]
pub struct Rule {
    pub(crate) predicate: SharedPredicate,
    pub(crate) outcome: Outcome,
}

impl Rule {
    /// The guard tested against the facts
    pub fn predicate(&self) -> &SharedPredicate {
        &self.predicate
    }

    /// What happens on a match
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Returns true for rules that descend into a child node
    pub fn is_decision(&self) -> bool {
        matches!(self.outcome, Outcome::Child(_))
    }

    /// Returns true for terminal rules
    pub fn is_result(&self) -> bool {
        matches!(self.outcome, Outcome::Result(_))
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Outcome::Child(child) => f
                .debug_struct("Rule")
                .field("child_rules", &child.len())
                .finish_non_exhaustive(),
            Outcome::Result(results) => f
                .debug_struct("Rule")
                .field("result", results)
                .finish_non_exhaustive(),
        }
    }
}

/// Tree vertex: rules tried in the order they were appended
#[derive(Debug, Clone, Default)]
pub struct Node {
    pub(crate) rules: Vec<Rule>,
}

impl Node {
    /// Create an empty node
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule that hands evaluation to `child` when `predicate` matches
    ///
    /// The rule is tried after every rule already on this node. On error the
    /// rule list is left unchanged.
    pub fn append_decision_rule(
        &mut self,
        predicate: impl Into<Option<SharedPredicate>>,
        child: impl Into<Option<Arc<Node>>>,
    ) -> Result<(), ValidationError> {
        let predicate = predicate.into().ok_or(ValidationError::MissingPredicate)?;
        let child = child.into().ok_or(ValidationError::MissingChild)?;

        self.rules.push(Rule {
            predicate,
            outcome: Outcome::Child(child),
        });
        Ok(())
    }

    /// Append a terminal rule that yields `result` when `predicate` matches
    ///
    /// An empty result map is valid. On error the rule list is left unchanged.
    pub fn append_result_rule(
        &mut self,
        predicate: impl Into<Option<SharedPredicate>>,
        result: impl Into<Option<Results>>,
    ) -> Result<(), ValidationError> {
        let predicate = predicate.into().ok_or(ValidationError::MissingPredicate)?;
        let result = result.into().ok_or(ValidationError::MissingResult)?;

        self.rules.push(Rule {
            predicate,
            outcome: Outcome::Result(result),
        });
        Ok(())
    }

    /// Rules in evaluation order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Number of rules on this node
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the node has no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Number of nodes on the longest path from this node down, counting itself
    pub fn height(&self) -> usize {
        let mut height = 1;
        let mut stack: Vec<(&Node, usize)> = vec![(self, 1)];

        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            for rule in &node.rules {
                if let Outcome::Child(child) = &rule.outcome {
                    stack.push((child.as_ref(), depth + 1));
                }
            }
        }

        height
    }

    /// Number of node references reachable from here, counting itself
    ///
    /// A subtree attached under several parents is counted once per attachment.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&Node> = vec![self];

        while let Some(node) = stack.pop() {
            count += 1;
            for rule in &node.rules {
                if let Outcome::Child(child) = &rule.outcome {
                    stack.push(child.as_ref());
                }
            }
        }

        count
    }
}
