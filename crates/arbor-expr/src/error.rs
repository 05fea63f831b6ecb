//! Expression error types

use arbor_core::Value;
use thiserror::Error;

/// Errors raised while parsing or evaluating an expression
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExprError {
    /// Input was empty or only whitespace
    #[error("Empty expression")]
    Empty,

    /// Input exceeded the size limit
    #[error("Expression exceeds size limit: {actual} bytes (max {max})")]
    TooLarge { max: usize, actual: usize },

    /// Input exceeded the nesting limit
    #[error("Expression nesting exceeds limit of {max} at {position}")]
    TooDeep { max: usize, position: usize },

    /// Unexpected token during parsing
    #[error("Unexpected token `{found}` at {position}, expected {expected}")]
    UnexpectedToken {
        expected: &'static str,
        found: String,
        position: usize,
    },

    /// A string literal was never closed
    #[error("Unterminated string starting at {position}")]
    UnterminatedString { position: usize },

    /// Numeric literal could not be parsed
    #[error("Invalid number `{raw}` at {position}")]
    InvalidNumber { raw: String, position: usize },

    /// A fact referenced by the expression is not present
    #[error("No fact '{0}' found")]
    UnknownFact(String),

    /// Operator applied to operands it does not support
    #[error("Cannot apply {op} to {left} and {right}")]
    InvalidOperation {
        op: String,
        left: &'static str,
        right: &'static str,
    },

    /// Unary operator applied to an operand it does not support
    #[error("Cannot apply {op} to {operand}")]
    InvalidUnary { op: String, operand: &'static str },

    /// Division or modulo by zero
    #[error("Division by zero")]
    DivisionByZero,

    /// Integer arithmetic overflowed
    #[error("Integer overflow in {0}")]
    Overflow(String),

    /// Expression was used as a predicate but did not produce a boolean
    #[error("expression returned non-bool result: {0}")]
    NonBoolean(Value),
}

/// Result type for expression operations
pub type Result<T> = std::result::Result<T, ExprError>;
