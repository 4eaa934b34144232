//! Two-plane 4D rotation
//!
//! Each tick the shape turns in the YZ plane and then in the XW plane.
//! The two angles advance at different, incommensurate rates so the
//! combined motion never settles into a short repeating cycle.

use serde::{Serialize, Deserialize};
use hyperview_math::{PlaneRotation, RotationPlane, Vec4};

/// Angle advanced per tick at full intensity, in radians
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RotationRates {
    pub yz: f32,
    pub xw: f32,
}

impl Default for RotationRates {
    fn default() -> Self {
        Self { yz: 0.005, xw: 0.0031 }
    }
}

/// Current rotation angles, in radians
///
/// Angles are unbounded; periodicity of sin/cos takes care of wrapping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RotationState {
    pub angle_yz: f32,
    pub angle_xw: f32,
}

impl RotationState {
    pub const ZERO: Self = Self { angle_yz: 0.0, angle_xw: 0.0 };

    pub const fn new(angle_yz: f32, angle_xw: f32) -> Self {
        Self { angle_yz, angle_xw }
    }
}

/// Advances and applies [`RotationState`]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RotationEngine {
    rates: RotationRates,
}

impl RotationEngine {
    pub fn new(rates: RotationRates) -> Self {
        Self { rates }
    }

    #[inline]
    pub fn rates(&self) -> RotationRates {
        self.rates
    }

    /// Return `state` moved forward by one tick at the given intensity
    pub fn advance(&self, state: RotationState, intensity: f32) -> RotationState {
        RotationState {
            angle_yz: state.angle_yz + self.rates.yz * intensity,
            angle_xw: state.angle_xw + self.rates.xw * intensity,
        }
    }

    /// Rotate a single point: YZ by `angle_yz`, then XW by `angle_xw`
    pub fn apply(point: Vec4, angle_yz: f32, angle_xw: f32) -> Vec4 {
        Self::frame(RotationState::new(angle_yz, angle_xw)).apply(point)
    }

    /// Precompute the rotation for a whole frame
    pub fn frame(state: RotationState) -> FrameRotation {
        FrameRotation {
            yz: PlaneRotation::new(RotationPlane::YZ, state.angle_yz),
            xw: PlaneRotation::new(RotationPlane::XW, state.angle_xw),
        }
    }
}

/// Both plane rotations of one frame, with sine and cosine already evaluated
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameRotation {
    yz: PlaneRotation,
    xw: PlaneRotation,
}

impl FrameRotation {
    /// YZ first, then XW on the result. The order is fixed.
    #[inline]
    pub fn apply(&self, point: Vec4) -> Vec4 {
        self.xw.apply(self.yz.apply(point))
    }

    /// Undo [`Self::apply`]: negated angles in reverse plane order
    #[inline]
    pub fn invert(&self, point: Vec4) -> Vec4 {
        self.yz.inverse().apply(self.xw.inverse().apply(point))
    }
}
