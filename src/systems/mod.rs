//! Application systems
//!
//! Host-side systems that drive the projection core without a window.

mod animation;

pub use animation::{AnimationError, AnimationSummary, AnimationSystem, SnapshotError};
