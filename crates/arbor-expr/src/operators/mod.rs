//! Expression evaluation against a fact set

mod binary;
mod comparison;
mod unary;

use crate::ast::{Expr, Operator};
use crate::error::{ExprError, Result};
use arbor_core::{Facts, Value};

/// Evaluate an expression tree
pub(crate) fn evaluate(expr: &Expr, facts: &Facts) -> Result<Value> {
    match expr {
        Expr::Literal(value) => Ok(value.clone()),
        Expr::Fact(path) => lookup(facts, path).cloned(),
        Expr::List(items) => items
            .iter()
            .map(|item| evaluate(item, facts))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        Expr::Unary { op, operand } => {
            let value = evaluate(operand, facts)?;
            unary::execute_unary_op(*op, &value)
        }
        Expr::Binary { left, op, right } if op.is_logical() => {
            evaluate_logical(left, *op, right, facts)
        }
        Expr::Binary { left, op, right } => {
            let left = evaluate(left, facts)?;
            let right = evaluate(right, facts)?;
            if op.is_comparison() {
                comparison::execute_compare(&left, *op, &right).map(Value::Bool)
            } else {
                binary::execute_binary_op(&left, *op, &right)
            }
        }
    }
}

/// `&&` and `||` only evaluate the right side when it can change the result
fn evaluate_logical(left: &Expr, op: Operator, right: &Expr, facts: &Facts) -> Result<Value> {
    let lhs = evaluate(left, facts)?;
    let short_circuit = match (op, &lhs) {
        (Operator::And, Value::Bool(false)) => Some(false),
        (Operator::Or, Value::Bool(true)) => Some(true),
        _ => None,
    };
    if let Some(value) = short_circuit {
        return Ok(Value::Bool(value));
    }

    let rhs = evaluate(right, facts)?;
    match (&lhs, &rhs) {
        (Value::Bool(_), Value::Bool(r)) => Ok(Value::Bool(*r)),
        _ => Err(ExprError::InvalidOperation {
            op: op.to_string(),
            left: lhs.type_name(),
            right: rhs.type_name(),
        }),
    }
}

/// Resolve a dotted fact path, descending into objects
fn lookup<'a>(facts: &'a Facts, path: &[String]) -> Result<&'a Value> {
    let missing = || ExprError::UnknownFact(path.join("."));

    let (first, rest) = path.split_first().ok_or_else(missing)?;
    let mut current = facts.get(first).ok_or_else(missing)?;

    for segment in rest {
        current = match current {
            Value::Object(map) => map.get(segment).ok_or_else(missing)?,
            _ => return Err(missing()),
        };
    }
    Ok(current)
}
