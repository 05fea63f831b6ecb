//! Arithmetic, string and membership operator execution

use super::comparison::values_equal;
use crate::ast::Operator;
use crate::error::{ExprError, Result};
use arbor_core::Value;

/// Execute a non-comparison, non-logical binary operation
pub(crate) fn execute_binary_op(left: &Value, op: Operator, right: &Value) -> Result<Value> {
    match (left, op, right) {
        // Integer arithmetic stays integral except for division
        (Value::Int(l), Operator::Add, Value::Int(r)) => checked(l.checked_add(*r), op),
        (Value::Int(l), Operator::Sub, Value::Int(r)) => checked(l.checked_sub(*r), op),
        (Value::Int(l), Operator::Mul, Value::Int(r)) => checked(l.checked_mul(*r), op),
        (Value::Int(_), Operator::Mod, Value::Int(0)) => Err(ExprError::DivisionByZero),
        (Value::Int(l), Operator::Mod, Value::Int(r)) => checked(l.checked_rem(*r), op),

        (Value::String(l), Operator::Add, Value::String(r)) => {
            Ok(Value::String(format!("{}{}", l, r)))
        }

        // String operations
        (Value::String(l), Operator::Contains, Value::String(r)) => {
            Ok(Value::Bool(l.contains(r.as_str())))
        }
        (Value::String(l), Operator::StartsWith, Value::String(r)) => {
            Ok(Value::Bool(l.starts_with(r.as_str())))
        }
        (Value::String(l), Operator::EndsWith, Value::String(r)) => {
            Ok(Value::Bool(l.ends_with(r.as_str())))
        }

        // Array operations
        (Value::Array(items), Operator::Contains, needle) => {
            Ok(Value::Bool(items.iter().any(|item| values_equal(item, needle))))
        }
        (needle, Operator::In, Value::Array(items)) => {
            Ok(Value::Bool(items.iter().any(|item| values_equal(item, needle))))
        }
        (needle, Operator::NotIn, Value::Array(items)) => {
            Ok(Value::Bool(!items.iter().any(|item| values_equal(item, needle))))
        }

        (l, Operator::Add | Operator::Sub | Operator::Mul | Operator::Div | Operator::Mod, r)
            if l.is_number() && r.is_number() =>
        {
            float_op(l, op, r)
        }

        _ => Err(ExprError::InvalidOperation {
            op: op.to_string(),
            left: left.type_name(),
            right: right.type_name(),
        }),
    }
}

fn checked(result: Option<i64>, op: Operator) -> Result<Value> {
    result
        .map(Value::Int)
        .ok_or_else(|| ExprError::Overflow(op.to_string()))
}

fn float_op(left: &Value, op: Operator, right: &Value) -> Result<Value> {
    let (l, r) = match (left.as_f64(), right.as_f64()) {
        (Some(l), Some(r)) => (l, r),
        _ => {
            return Err(ExprError::InvalidOperation {
                op: op.to_string(),
                left: left.type_name(),
                right: right.type_name(),
            })
        }
    };

    let value = match op {
        Operator::Add => l + r,
        Operator::Sub => l - r,
        Operator::Mul => l * r,
        Operator::Div if r == 0.0 => return Err(ExprError::DivisionByZero),
        Operator::Div => l / r,
        Operator::Mod if r == 0.0 => return Err(ExprError::DivisionByZero),
        Operator::Mod => l % r,
        _ => {
            return Err(ExprError::InvalidOperation {
                op: op.to_string(),
                left: left.type_name(),
                right: right.type_name(),
            })
        }
    };
    Ok(Value::Float(value))
}
