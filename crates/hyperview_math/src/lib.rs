//! 4D Mathematics Library
//!
//! This crate provides the value types shared by the hyperview projection pipeline.
//!
//! ## Core Types
//!
//! - [`Vec4`] - 4D point with x, y, z, w components
//! - [`Vec3`] - Projected 3D point, laid out for direct buffer upload
//! - [`PlaneRotation`] - A rotation in one of the six [`RotationPlane`]s

mod vec3;
mod vec4;
pub mod plane_rotation;

pub use vec3::Vec3;
pub use vec4::Vec4;
pub use plane_rotation::{PlaneRotation, RotationPlane};
