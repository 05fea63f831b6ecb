//! Compiled expressions usable as tree predicates

use crate::ast::Expr;
use crate::error::{ExprError, Result};
use crate::operators::evaluate;
use crate::parser::parse;
use arbor_core::{Facts, Predicate, PredicateError, Value, Verdict};
use std::fmt;
use std::str::FromStr;

/// A parsed expression together with its source text
///
/// As a [`Predicate`] it matches when the expression evaluates to `true`,
/// and its source text is the description recorded in the audit trail.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    source: String,
    ast: Expr,
}

impl Expression {
    /// Parse an expression
    pub fn new(source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let ast = parse(&source)?;
        tracing::trace!(expression = %source, "parsed expression");
        Ok(Self { source, ast })
    }

    /// Source text as written
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Parsed syntax tree
    pub fn ast(&self) -> &Expr {
        &self.ast
    }

    /// Facts read by this expression
    pub fn facts(&self) -> Vec<String> {
        self.ast.facts()
    }

    /// Evaluate to a value of any kind
    pub fn eval(&self, facts: &Facts) -> Result<Value> {
        evaluate(&self.ast, facts)
    }

    /// Evaluate and require a boolean result
    pub fn eval_bool(&self, facts: &Facts) -> Result<bool> {
        match self.eval(facts)? {
            Value::Bool(b) => Ok(b),
            other => Err(ExprError::NonBoolean(other)),
        }
    }
}

impl Predicate for Expression {
    fn evaluate(&self, facts: &Facts) -> std::result::Result<Verdict, PredicateError> {
        let matched = self.eval_bool(facts).map_err(PredicateError::new)?;
        Ok(Verdict::new(matched, self.source.clone()))
    }
}

impl FromStr for Expression {
    type Err = ExprError;

    fn from_str(source: &str) -> Result<Self> {
        Self::new(source)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_is_kept_verbatim() {
        let expr = Expression::new("  weight >= 9 ").unwrap();
        assert_eq!(expr.source(), "  weight >= 9 ");
        assert_eq!(expr.to_string(), "  weight >= 9 ");
        assert_eq!(expr.facts(), vec!["weight"]);
    }

    #[test]
    fn test_predicate_description_is_source() {
        let expr: Expression = "color == 'Z'".parse().unwrap();
        let mut facts = Facts::new();
        facts.insert("color".to_string(), Value::from("Z"));

        let verdict = expr.evaluate(&facts).unwrap();
        assert!(verdict.matched);
        assert_eq!(verdict.description, "color == 'Z'");
    }

    #[test]
    fn test_predicate_unmatched_keeps_description() {
        let expr = Expression::new("color == 'D'").unwrap();
        let mut facts = Facts::new();
        facts.insert("color".to_string(), Value::from("Z"));

        let verdict = expr.evaluate(&facts).unwrap();
        assert!(!verdict.matched);
        assert_eq!(verdict.description, "color == 'D'");
    }

    #[test]
    fn test_non_bool_is_predicate_error() {
        let expr = Expression::new("1 + 1").unwrap();
        let err = expr.evaluate(&Facts::new()).unwrap_err();

        assert_eq!(err.to_string(), "expression returned non-bool result: 2");
        assert_eq!(
            err.downcast_ref::<ExprError>(),
            Some(&ExprError::NonBoolean(Value::Int(2)))
        );
    }

    #[test]
    fn test_eval_returns_any_value() {
        let expr = Expression::new("2 * 3").unwrap();
        assert_eq!(expr.eval(&Facts::new()).unwrap(), Value::Int(6));
    }
}
