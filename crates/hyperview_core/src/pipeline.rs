//! Per-tick projection pipeline
//!
//! The pipeline owns the rotation state, the active shape and its output
//! buffer. Each tick it advances the rotation, then rotates and projects
//! every emitted point into a flat `[x, y, z, x, y, z, ...]` buffer.
//!
//! # Example
//! ```
//! use hyperview_core::{ProjectionPipeline, ShapeRegistry};
//!
//! let mut pipeline = ProjectionPipeline::new(ShapeRegistry::with_seed(7));
//! pipeline.switch_shape("tesseract").unwrap();
//! let frame = pipeline.tick(0.5).unwrap();
//! assert_eq!(frame.positions.len(), 32 * 2 * 3);
//! ```

use std::sync::Arc;

use serde::{Serialize, Deserialize};
use hyperview_math::{Vec3, Vec4};

use crate::error::ShapeError;
use crate::projection::{Projector, WPolicy};
use crate::registry::ShapeRegistry;
use crate::rotation::{FrameRotation, RotationEngine, RotationState};
use crate::shape::{RenderKind, ShapeDefinition, ShapeKey};

/// Lifecycle of the pipeline
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineState {
    /// No shape selected yet
    Uninitialized,
    /// A shape is selected and frames are produced
    Active,
}

/// The selected shape together with its output buffer
struct ActiveShape {
    shape: Arc<ShapeDefinition>,
    positions: Vec<f32>,
}

/// A borrowed view of the most recent output
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    /// Flat xyz coordinates, three floats per point
    pub positions: &'a [f32],
    /// Geometry and styling of the shape these positions belong to
    pub shape: &'a ShapeDefinition,
    /// Changes on every shape switch; a renderer reallocates when it differs
    pub generation: u64,
    /// Rotation the positions were computed with
    pub rotation: RotationState,
}

impl<'a> Frame<'a> {
    #[inline]
    pub fn point_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Positions viewed as points
    pub fn points(&self) -> &'a [Vec3] {
        bytemuck::cast_slice(self.positions)
    }

    /// Raw bytes for vertex buffer upload
    pub fn as_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.positions)
    }
}

/// Serializable copy of a frame
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub shape: ShapeKey,
    pub kind: String,
    pub generation: u64,
    pub rotation: RotationState,
    pub positions: Vec<[f32; 3]>,
}

impl FrameSnapshot {
    /// Render as pretty-printed RON
    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }
}

/// Drives shape selection, rotation and projection
pub struct ProjectionPipeline {
    registry: ShapeRegistry,
    engine: RotationEngine,
    projector: Projector,
    rotation: RotationState,
    active: Option<ActiveShape>,
    generation: u64,
    intensity: f32,
}

impl ProjectionPipeline {
    /// Create an uninitialized pipeline with default rates and viewer distance
    pub fn new(registry: ShapeRegistry) -> Self {
        Self {
            registry,
            engine: RotationEngine::default(),
            projector: Projector::default(),
            rotation: RotationState::ZERO,
            active: None,
            generation: 0,
            intensity: 0.0,
        }
    }

    /// Use a custom rotation engine
    pub fn with_engine(mut self, engine: RotationEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Use a custom projector
    pub fn with_projector(mut self, projector: Projector) -> Self {
        self.projector = projector;
        self
    }

    pub fn state(&self) -> PipelineState {
        match self.active {
            Some(_) => PipelineState::Active,
            None => PipelineState::Uninitialized,
        }
    }

    #[inline]
    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    /// Replace the rotation state, e.g. to replay a known sequence
    pub fn set_rotation(&mut self, rotation: RotationState) {
        self.rotation = rotation;
    }

    /// The currently selected shape
    pub fn active_shape(&self) -> Option<&ShapeDefinition> {
        self.active.as_ref().map(|a| a.shape.as_ref())
    }

    pub fn registry(&self) -> &ShapeRegistry {
        &self.registry
    }

    /// Select a shape by string key
    ///
    /// On error nothing changes: the previous shape and buffer stay active.
    pub fn switch_shape(&mut self, name: &str) -> Result<(), ShapeError> {
        let shape = self.registry.lookup(name).map_err(|e| {
            log::warn!("Rejected shape switch: {}", e);
            e
        })?;
        self.activate(shape);
        Ok(())
    }

    /// Select a shape by key
    pub fn switch_to(&mut self, key: ShapeKey) {
        let shape = self.registry.get(key);
        self.activate(shape);
    }

    /// Rebuild a shape's geometry; re-activates it if it is the current one
    pub fn regenerate(&mut self, key: ShapeKey) {
        let shape = self.registry.regenerate(key);
        if self.active_shape().map(|s| s.key()) == Some(key) {
            self.activate(shape);
        }
    }

    fn activate(&mut self, shape: Arc<ShapeDefinition>) {
        // Release the old buffer before allocating the new one
        self.active = None;
        let positions = vec![0.0; shape.buffer_len()];
        self.generation += 1;
        log::info!(
            "Active shape: {} ({}, {} points)",
            shape.key(),
            shape.kind().name(),
            shape.point_count()
        );
        self.active = Some(ActiveShape { shape, positions });
        // The new buffer holds real geometry before the next tick arrives
        self.project_active();
    }

    /// Advance one tick and regenerate the output buffer
    ///
    /// Rotation advances even when no shape is selected; the frame is
    /// `None` until one is.
    pub fn tick(&mut self, intensity: f32) -> Option<Frame<'_>> {
        let intensity = sanitize_intensity(intensity);
        self.intensity = intensity;
        self.rotation = self.engine.advance(self.rotation, intensity);
        self.project_active();
        self.frame()
    }

    /// Intensity sampled by the most recent tick, 0 before the first one
    #[inline]
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Rewrite the active buffer at the current rotation and intensity
    fn project_active(&mut self) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        let rotation = RotationEngine::frame(self.rotation);
        let intensity = self.intensity;
        let shape = active.shape.as_ref();
        let vertices = shape.vertices();
        let policy = shape.policy();

        match shape.kind() {
            RenderKind::LineSegments { edges } => {
                let endpoints = edges.iter().flat_map(|e| e.indices).map(|i| vertices[i]);
                fill(&mut active.positions, endpoints, &rotation, &self.projector, policy, intensity);
            }
            RenderKind::PointCloud => {
                fill(&mut active.positions, vertices.iter().copied(), &rotation, &self.projector, policy, intensity);
            }
        }
    }

    /// The most recent output without advancing
    pub fn frame(&self) -> Option<Frame<'_>> {
        self.active.as_ref().map(|a| Frame {
            positions: &a.positions,
            shape: &a.shape,
            generation: self.generation,
            rotation: self.rotation,
        })
    }

    /// Owned copy of the most recent output
    pub fn snapshot(&self) -> Option<FrameSnapshot> {
        self.frame().map(|frame| FrameSnapshot {
            shape: frame.shape.key(),
            kind: frame.shape.kind().name().to_string(),
            generation: frame.generation,
            rotation: frame.rotation,
            positions: frame.points().iter().map(|p| p.to_array()).collect(),
        })
    }
}

fn sanitize_intensity(intensity: f32) -> f32 {
    if !intensity.is_finite() {
        log::warn!("Non-finite intensity {}, using 0", intensity);
        return 0.0;
    }
    let clamped = intensity.clamp(0.0, 1.0);
    if clamped != intensity {
        log::debug!("Intensity {} clamped to {}", intensity, clamped);
    }
    clamped
}

fn fill(
    positions: &mut [f32],
    points: impl Iterator<Item = Vec4>,
    rotation: &FrameRotation,
    projector: &Projector,
    policy: WPolicy,
    intensity: f32,
) {
    for (slot, point) in positions.chunks_exact_mut(3).zip(points) {
        let projected = projector.project(rotation.apply(point), policy, intensity);
        slot.copy_from_slice(&projected.to_array());
    }
}
