//! Perspective projection from 4D to 3D
//!
//! The viewer sits at distance `D` along the w axis. A point with effective
//! 4th coordinate `w` is scaled by `D / (D - w)`: points pushed toward the
//! viewer grow, points pushed away shrink.

use serde::{Serialize, Deserialize};
use hyperview_math::{Vec3, Vec4};

use crate::error::ProjectionError;

/// Viewer distance along w used when none is configured
pub const DEFAULT_VIEWER_DISTANCE: f32 = 2.0;

/// How a shape derives the w value that drives perspective
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WPolicy {
    /// `w * intensity`: intensity 0 collapses the shape to its 3D cross-section
    Scaled,
    /// `w` as-is; the shape's w levels already encode its nesting
    Unscaled,
    /// `(z + x) * intensity * 0.5`; the point's own w is ignored
    SphereBlend,
}

impl WPolicy {
    /// The w value fed to the perspective divide
    #[inline]
    pub fn effective_w(self, point: Vec4, intensity: f32) -> f32 {
        match self {
            WPolicy::Scaled => point.w * intensity,
            WPolicy::Unscaled => point.w,
            WPolicy::SphereBlend => point.z * intensity * 0.5 + point.x * intensity * 0.5,
        }
    }
}

/// Perspective projector with a fixed viewer distance
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projector {
    viewer_distance: f32,
}

impl Default for Projector {
    fn default() -> Self {
        Self { viewer_distance: DEFAULT_VIEWER_DISTANCE }
    }
}

impl Projector {
    /// Returned in place of a point whose perspective scale is not finite
    ///
    /// Far enough away to fall outside any sane view volume.
    pub const SENTINEL: Vec3 = Vec3::new(9999.0, 9999.0, 9999.0);

    /// Create a projector with a custom viewer distance
    pub fn new(viewer_distance: f32) -> Result<Self, ProjectionError> {
        if !viewer_distance.is_finite() || viewer_distance <= 0.0 {
            return Err(ProjectionError::InvalidViewerDistance(viewer_distance));
        }
        Ok(Self { viewer_distance })
    }

    #[inline]
    pub fn viewer_distance(&self) -> f32 {
        self.viewer_distance
    }

    /// Project an already-rotated point into 3D
    ///
    /// Never returns a non-finite triple: a degenerate divide yields [`Self::SENTINEL`].
    #[inline]
    pub fn project(&self, point: Vec4, policy: WPolicy, intensity: f32) -> Vec3 {
        let w = policy.effective_w(point, intensity);
        let scale = self.viewer_distance / (self.viewer_distance - w);
        if !scale.is_finite() {
            return Self::SENTINEL;
        }
        Vec3::new(point.x * scale, point.y * scale, point.z * scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_zero_w_is_identity() {
        let p = Projector::default();
        let v = Vec4::new(1.25, -0.5, 3.0, 0.0);
        assert_eq!(p.project(v, WPolicy::Scaled, 1.0), Vec3::new(1.25, -0.5, 3.0));
    }

    #[test]
    fn test_zero_intensity_collapses_w() {
        let p = Projector::default();
        let v = Vec4::new(1.0, 1.0, 1.0, 1.0);
        assert_eq!(p.project(v, WPolicy::Scaled, 0.0), Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_scaled_policy_perspective() {
        let p = Projector::default();
        // w = 1 * 1 => scale = 2 / (2 - 1) = 2
        let out = p.project(Vec4::new(1.0, -1.0, 0.5, 1.0), WPolicy::Scaled, 1.0);
        assert_eq!(out, Vec3::new(2.0, -2.0, 1.0));
    }

    #[test]
    fn test_unscaled_policy_ignores_intensity() {
        let p = Projector::default();
        let v = Vec4::new(1.0, 1.0, 1.0, -1.0);
        let a = p.project(v, WPolicy::Unscaled, 0.0);
        let b = p.project(v, WPolicy::Unscaled, 0.7);
        assert_eq!(a, b);
        assert!((a.x - 2.0 / 3.0).abs() < EPSILON);
    }

    #[test]
    fn test_sphere_blend_ignores_native_w() {
        let v = Vec4::new(1.8, 0.0, 0.0, 5.0);
        assert!((WPolicy::SphereBlend.effective_w(v, 1.0) - 0.9).abs() < EPSILON);
        let v = Vec4::new(0.4, 0.0, 0.6, 0.0);
        assert!((WPolicy::SphereBlend.effective_w(v, 0.5) - 0.25).abs() < EPSILON);
    }

    #[test]
    fn test_w_at_viewer_distance_returns_sentinel() {
        let p = Projector::default();
        let out = p.project(Vec4::new(1.0, 1.0, 1.0, 2.0), WPolicy::Scaled, 1.0);
        assert_eq!(out, Projector::SENTINEL);
        assert!(out.is_finite());
    }

    #[test]
    fn test_beyond_viewer_distance_stays_finite() {
        let p = Projector::default();
        let out = p.project(Vec4::new(1.0, 0.0, 0.0, 3.0), WPolicy::Unscaled, 1.0);
        // scale = 2 / (2 - 3) = -2, mirrored behind the viewer
        assert_eq!(out, Vec3::new(-2.0, 0.0, 0.0));
    }

    #[test]
    fn test_custom_distance() {
        let p = Projector::new(4.0).unwrap();
        let out = p.project(Vec4::new(1.0, 0.0, 0.0, 2.0), WPolicy::Unscaled, 1.0);
        assert_eq!(out, Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_invalid_distance_rejected() {
        assert_eq!(Projector::new(0.0), Err(ProjectionError::InvalidViewerDistance(0.0)));
        assert!(Projector::new(-2.0).is_err());
        assert!(Projector::new(f32::NAN).is_err());
        assert!(Projector::new(f32::INFINITY).is_err());
    }
}
