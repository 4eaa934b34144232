//! Planar rotations in 4D space
//!
//! In 4D, rotations happen in planes rather than around axes.
//! There are 6 rotation planes: XY, XZ, XW, YZ, YW, ZW. A rotation in
//! one plane mixes its two axes and leaves the other two untouched.

use serde::{Serialize, Deserialize};
use crate::Vec4;

/// The 6 rotation planes in 4D space
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationPlane {
    XY,
    XZ,
    /// YZ plane - standard roll (rotation around X axis in 3D)
    YZ,
    /// XW plane - ana-kata rotation affecting X
    XW,
    YW,
    ZW,
}

impl RotationPlane {
    /// Component indices (x=0, y=1, z=2, w=3) of the two axes spanning the plane
    ///
    /// The order fixes the rotation direction: a positive angle turns the
    /// first axis toward the second.
    #[inline]
    pub const fn axes(self) -> (usize, usize) {
        match self {
            RotationPlane::XY => (0, 1),
            RotationPlane::XZ => (0, 2),
            RotationPlane::XW => (0, 3),
            RotationPlane::YZ => (1, 2),
            RotationPlane::YW => (1, 3),
            RotationPlane::ZW => (2, 3),
        }
    }
}

/// A rotation by a fixed angle in a single plane
///
/// Sine and cosine are evaluated once at construction so the same rotation
/// can be applied to thousands of points per frame without trigonometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneRotation {
    pub plane: RotationPlane,
    cos: f32,
    sin: f32,
}

impl PlaneRotation {
    /// Create a rotation by `angle` radians in `plane`
    pub fn new(plane: RotationPlane, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self { plane, cos, sin }
    }

    /// The rotation by the negated angle in the same plane
    #[inline]
    pub fn inverse(self) -> Self {
        Self { plane: self.plane, cos: self.cos, sin: -self.sin }
    }

    /// Rotate a point: a' = a·cos − b·sin, b' = a·sin + b·cos
    #[inline]
    pub fn apply(&self, v: Vec4) -> Vec4 {
        let (i, j) = self.plane.axes();
        let mut c = v.to_array();
        let a = c[i];
        let b = c[j];
        c[i] = a * self.cos - b * self.sin;
        c[j] = a * self.sin + b * self.cos;
        Vec4::from_array(c)
    }
}
