//! Traversal module - interactive walking of a validated story graph.
//!
//! A session consists of:
//! - **Position**: the node currently presented, or the ended state
//! - **History**: the ordered stack of visited node ids for backtracking
//! - **Discovered**: the monotonically growing set of revealed evidence

mod engine;

pub use engine::*;
