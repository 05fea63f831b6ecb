//! Arbor expression language
//!
//! A small boolean expression language for tree predicates. Expressions
//! read named facts, compare and combine them, and as a
//! [`Predicate`](arbor_core::Predicate) report their own source text as the
//! audit description.
//!
//! ```
//! use arbor_core::{Facts, Node, Predicate, Results, Value};
//! use arbor_expr::Expression;
//!
//! let mut root = Node::new();
//! root.append_result_rule(
//!     Expression::new("amount > 1000 && country IN ('NG', 'RU')")?.shared(),
//!     [("action".to_string(), Value::from("review"))].into_iter().collect::<Results>(),
//! )?;
//!
//! let mut facts = Facts::new();
//! facts.insert("amount".to_string(), Value::Int(2500));
//! facts.insert("country".to_string(), Value::from("NG"));
//!
//! let decision = root.decide(&facts)?.expect("rule matches");
//! assert_eq!(
//!     decision.audit,
//!     vec!["amount > 1000 && country IN ('NG', 'RU')", "action:review"]
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod ast;
pub mod error;
pub mod expression;
pub mod parser;

mod lexer;
mod operators;

pub use ast::{Expr, Operator, UnaryOperator};
pub use error::{ExprError, Result};
pub use expression::Expression;
pub use parser::{parse, MAX_EXPRESSION_BYTES, MAX_EXPRESSION_NESTING};
