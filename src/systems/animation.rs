//! Headless animation system
//!
//! Plays the role of a display loop: issues one tick per frame at the
//! configured intensity and tracks what the renderer would receive.

use std::path::Path;

use hyperview_core::{
    Frame, ProjectionError, ProjectionPipeline, Projector, RotationState, ShapeError,
    ShapeRegistry, Vec3,
};

use crate::config::AppConfig;

/// What the last run produced
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationSummary {
    /// Ticks issued during the run
    pub ticks: u64,
    /// Points in the final frame
    pub point_count: usize,
    /// Points of the final frame replaced by the far sentinel
    pub sentinel_points: usize,
    /// Bounds of the final frame, sentinels excluded
    pub bounds_min: Vec3,
    pub bounds_max: Vec3,
    /// Rotation after the last tick
    pub rotation: RotationState,
}

impl AnimationSummary {
    fn from_frame(ticks: u64, frame: &Frame<'_>) -> Self {
        let mut min = Vec3::new(f32::INFINITY, f32::INFINITY, f32::INFINITY);
        let mut max = Vec3::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY);
        let mut sentinel_points = 0;

        for &p in frame.points() {
            if p == Projector::SENTINEL {
                sentinel_points += 1;
                continue;
            }
            min = min.min_components(p);
            max = max.max_components(p);
        }

        if sentinel_points == frame.point_count() {
            min = Vec3::ZERO;
            max = Vec3::ZERO;
        }

        Self {
            ticks,
            point_count: frame.point_count(),
            sentinel_points,
            bounds_min: min,
            bounds_max: max,
            rotation: frame.rotation,
        }
    }
}

/// Error building an animation system from configuration
#[derive(Debug)]
pub enum AnimationError {
    Shape(ShapeError),
    Projection(ProjectionError),
}

impl std::fmt::Display for AnimationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnimationError::Shape(e) => write!(f, "Animation setup failed: {}", e),
            AnimationError::Projection(e) => write!(f, "Animation setup failed: {}", e),
        }
    }
}

impl std::error::Error for AnimationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnimationError::Shape(e) => Some(e),
            AnimationError::Projection(e) => Some(e),
        }
    }
}

impl From<ShapeError> for AnimationError {
    fn from(e: ShapeError) -> Self {
        AnimationError::Shape(e)
    }
}

impl From<ProjectionError> for AnimationError {
    fn from(e: ProjectionError) -> Self {
        AnimationError::Projection(e)
    }
}

/// Error writing a frame snapshot
#[derive(Debug)]
pub enum SnapshotError {
    /// No shape is active, so there is no frame to write
    NoFrame,
    Serialize(ron::Error),
    Io(std::io::Error),
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotError::NoFrame => write!(f, "Snapshot failed: no active shape"),
            SnapshotError::Serialize(e) => write!(f, "Snapshot serialization failed: {}", e),
            SnapshotError::Io(e) => write!(f, "Snapshot write failed: {}", e),
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotError::NoFrame => None,
            SnapshotError::Serialize(e) => Some(e),
            SnapshotError::Io(e) => Some(e),
        }
    }
}

impl From<ron::Error> for SnapshotError {
    fn from(e: ron::Error) -> Self {
        SnapshotError::Serialize(e)
    }
}

impl From<std::io::Error> for SnapshotError {
    fn from(e: std::io::Error) -> Self {
        SnapshotError::Io(e)
    }
}

/// Drives a [`ProjectionPipeline`] at a fixed intensity
pub struct AnimationSystem {
    pipeline: ProjectionPipeline,
    intensity: f32,
    ticks: u64,
}

impl AnimationSystem {
    /// Wrap an existing pipeline
    pub fn new(pipeline: ProjectionPipeline, intensity: f32) -> Self {
        Self { pipeline, intensity, ticks: 0 }
    }

    /// Build registry, pipeline and initial shape from configuration
    pub fn from_config(config: &AppConfig) -> Result<Self, AnimationError> {
        let registry = ShapeRegistry::with_params(config.shape.glome_seed, config.shape.glome_params());

        let mut pipeline = ProjectionPipeline::new(registry)
            .with_engine(config.animation.to_engine())
            .with_projector(config.projection.to_projector()?);
        pipeline.switch_shape(&config.shape.initial)?;

        Ok(Self::new(pipeline, config.animation.intensity))
    }

    pub fn pipeline(&self) -> &ProjectionPipeline {
        &self.pipeline
    }

    pub fn pipeline_mut(&mut self) -> &mut ProjectionPipeline {
        &mut self.pipeline
    }

    #[inline]
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Change the intensity used from the next tick on
    pub fn set_intensity(&mut self, intensity: f32) {
        self.intensity = intensity;
    }

    /// Issue one tick
    pub fn update(&mut self) -> Option<Frame<'_>> {
        self.ticks += 1;
        self.pipeline.tick(self.intensity)
    }

    /// Issue `ticks` ticks and summarize the final frame
    pub fn run(&mut self, ticks: u64) -> Option<AnimationSummary> {
        for _ in 0..ticks {
            self.update();
        }
        let total = self.ticks;
        self.pipeline.frame().map(|frame| AnimationSummary::from_frame(total, &frame))
    }

    /// Write the current frame to `path` as RON
    pub fn write_snapshot(&self, path: &Path) -> Result<(), SnapshotError> {
        let snapshot = self.pipeline.snapshot().ok_or(SnapshotError::NoFrame)?;
        let ron = snapshot.to_ron()?;
        std::fs::write(path, ron)?;
        Ok(())
    }
}
