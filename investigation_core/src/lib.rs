//! # Investigation Core
//!
//! The engine of the case investigation system. This crate consumes the data
//! model from `case_model`, turns raw story payloads into validated graphs,
//! and walks them interactively on behalf of a UI or test harness.
//!
//! ## Core Components
//!
//! - **normalize**: Converts heterogeneous payload shapes (scenes, memories,
//!   exhibits) into one canonical `StoryGraph`
//! - **traversal**: `StoryGraphEngine` - current position, history stack,
//!   discovered evidence, and prerequisite gating
//!
//! ## Design Philosophy
//!
//! - **Normalize once**: All payload optionality and shape variance is
//!   resolved before traversal, so the engine assumes totality
//! - **Errors are values**: Every failure is a typed, recoverable error and
//!   leaves the engine in its pre-call state
//! - **No I/O**: Fetching payloads and persisting sessions belong to callers

pub mod normalize;
pub mod traversal;

pub use normalize::*;
pub use traversal::*;
