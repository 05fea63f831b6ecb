//! Comparison operator execution

use crate::ast::Operator;
use crate::error::{ExprError, Result};
use arbor_core::Value;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::cmp::Ordering;

const NANOS_PER_SECOND: i128 = 1_000_000_000;

/// Execute a comparison operation
pub(crate) fn execute_compare(left: &Value, op: Operator, right: &Value) -> Result<bool> {
    match op {
        Operator::Eq => Ok(values_equal(left, right)),
        Operator::Ne => Ok(!values_equal(left, right)),
        Operator::Gt | Operator::Ge | Operator::Lt | Operator::Le => {
            let ordering = order(left, right).ok_or_else(|| invalid(left, op, right))?;
            Ok(match op {
                Operator::Gt => ordering == Ordering::Greater,
                Operator::Ge => ordering != Ordering::Less,
                Operator::Lt => ordering == Ordering::Less,
                _ => ordering != Ordering::Greater,
            })
        }
        _ => Err(invalid(left, op, right)),
    }
}

fn invalid(left: &Value, op: Operator, right: &Value) -> ExprError {
    ExprError::InvalidOperation {
        op: op.to_string(),
        left: left.type_name(),
        right: right.type_name(),
    }
}

/// Loose equality: numbers compare by value across `Int` and `Float`,
/// timestamps accept date strings and unix seconds, mismatched kinds are unequal
pub(crate) fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(l), Value::Bool(r)) => l == r,
        (Value::Int(l), Value::Int(r)) => l == r,
        (Value::String(l), Value::String(r)) => l == r,
        (Value::Timestamp(l), Value::Timestamp(r)) => l == r,
        _ if is_temporal_pair(left, right) => match (instant(left), instant(right)) {
            (Some(l), Some(r)) => l == r,
            _ => false,
        },
        (Value::Array(l), Value::Array(r)) => {
            l.len() == r.len() && l.iter().zip(r).all(|(a, b)| values_equal(a, b))
        }
        (Value::Object(l), Value::Object(r)) => {
            l.len() == r.len()
                && l.iter()
                    .all(|(key, a)| r.get(key).is_some_and(|b| values_equal(a, b)))
        }
        _ => match (left.as_f64(), right.as_f64()) {
            (Some(l), Some(r)) => l == r,
            _ => false,
        },
    }
}

fn order(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Int(l), Value::Int(r)) => Some(l.cmp(r)),
        (Value::String(l), Value::String(r)) => Some(l.cmp(r)),
        (Value::Timestamp(l), Value::Timestamp(r)) => Some(l.cmp(r)),
        _ if is_temporal_pair(left, right) => Some(instant(left)?.cmp(&instant(right)?)),
        _ => left.as_f64()?.partial_cmp(&right.as_f64()?),
    }
}

/// A timestamp against anything, or a date string against a number
fn is_temporal_pair(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Timestamp(_), _) | (_, Value::Timestamp(_)) => true,
        (Value::String(_), r) => r.is_number(),
        (l, Value::String(_)) => l.is_number(),
        _ => false,
    }
}

/// Nanoseconds since the unix epoch for values that can stand for a point in time
fn instant(value: &Value) -> Option<i128> {
    let nanos = |ts: &DateTime<Utc>| {
        i128::from(ts.timestamp()) * NANOS_PER_SECOND + i128::from(ts.timestamp_subsec_nanos())
    };

    match value {
        Value::Timestamp(ts) => Some(nanos(ts)),
        Value::String(s) => parse_timestamp(s).as_ref().map(nanos),
        Value::Int(seconds) => Some(i128::from(*seconds) * NANOS_PER_SECOND),
        Value::Float(seconds) if seconds.is_finite() => {
            Some((seconds * NANOS_PER_SECOND as f64).round() as i128)
        }
        _ => None,
    }
}

/// Parse `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DD` or RFC 3339 text as a UTC instant
pub(crate) fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}
