//! Core of the hyperview 4D projection engine
//!
//! This crate turns 4D shape definitions into renderable 3D coordinates:
//!
//! - [`ShapeRegistry`] - Immutable geometry for every supported [`ShapeKey`]
//! - [`RotationEngine`] - Advances and applies the YZ/XW rotation
//! - [`Projector`] - Perspective projection along w, per-shape [`WPolicy`]
//! - [`ProjectionPipeline`] - Produces one flat coordinate buffer per tick

mod error;
mod shape;
pub mod shapes;
mod registry;
mod rotation;
mod projection;
mod pipeline;

pub use error::{ShapeError, ProjectionError};
pub use shape::{Edge, RenderKind, ShapeDefinition, ShapeKey, ShapeStyle};
pub use shapes::GlomeParams;
pub use registry::ShapeRegistry;
pub use rotation::{FrameRotation, RotationEngine, RotationRates, RotationState};
pub use projection::{Projector, WPolicy, DEFAULT_VIEWER_DISTANCE};
pub use pipeline::{Frame, FrameSnapshot, PipelineState, ProjectionPipeline};

// Re-export math types used in this crate's public API
pub use hyperview_math::{Vec3, Vec4};
