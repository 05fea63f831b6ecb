//! Unary operator execution

use crate::ast::UnaryOperator;
use crate::error::{ExprError, Result};
use arbor_core::Value;

/// Execute a unary operation
pub(crate) fn execute_unary_op(op: UnaryOperator, operand: &Value) -> Result<Value> {
    match (op, operand) {
        (UnaryOperator::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
        (UnaryOperator::Negate, Value::Int(i)) => i
            .checked_neg()
            .map(Value::Int)
            .ok_or_else(|| ExprError::Overflow(op.to_string())),
        (UnaryOperator::Negate, Value::Float(f)) => Ok(Value::Float(-f)),
        _ => Err(ExprError::InvalidUnary {
            op: op.to_string(),
            operand: operand.type_name(),
        }),
    }
}
