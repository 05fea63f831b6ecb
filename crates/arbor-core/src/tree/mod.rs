//! Decision trees
//!
//! A tree is a root [`Node`] whose rules either end evaluation with a
//! result map or hand it to a child node. Trees are assembled bottom-up,
//! leaves first, then frozen by wrapping nodes in `Arc` as they are attached
//! to a parent.
//!
//! A frozen tree is read-only: once a node sits behind an `Arc` there is no
//! way to append to it, so concurrent evaluation with independent facts is
//! safe without locking. For the same reason a node can never be its own
//! ancestor, although the same `Arc<Node>` may be attached under several
//! parents.

mod eval;
mod node;

pub use eval::Decision;
pub use node::{Node, Outcome, Rule};
