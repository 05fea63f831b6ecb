//! DecisionEngine - Main API for evaluating decision trees
//!
//! The module is organized into:
//! - `types`: Request/Response types (DecisionRequest, DecisionResponse, DecisionOptions)
//! - `engine`: Core DecisionEngine implementation and tree loading

mod engine;
mod types;

pub use engine::DecisionEngine;
pub use types::{DecisionOptions, DecisionRequest, DecisionResponse};
