//! Shape registry
//!
//! Builds every supported shape once and hands out shared, immutable
//! definitions. Glome sampling draws from a seedable generator owned by
//! the registry so a fixed seed reproduces the same point cloud.

use std::collections::HashMap;
use std::sync::Arc;

use rand::{rngs::StdRng, SeedableRng};

use crate::error::ShapeError;
use crate::shape::{ShapeDefinition, ShapeKey};
use crate::shapes::{self, GlomeParams};

/// Owner of the built-in shape definitions
pub struct ShapeRegistry {
    shapes: HashMap<ShapeKey, Arc<ShapeDefinition>>,
    glome: GlomeParams,
    rng: StdRng,
}

impl Default for ShapeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeRegistry {
    /// Create a registry whose glome samples are seeded from OS entropy
    pub fn new() -> Self {
        Self::with_params(None, GlomeParams::default())
    }

    /// Create a registry with reproducible glome samples
    pub fn with_seed(seed: u64) -> Self {
        Self::with_params(Some(seed), GlomeParams::default())
    }

    /// Create a registry from an optional seed and glome parameters
    ///
    /// Without a seed the generator is seeded from OS entropy.
    pub fn with_params(seed: Option<u64>, glome: GlomeParams) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::from_rng(rng, glome)
    }

    /// Create a registry from an explicit generator and glome parameters
    pub fn from_rng(rng: StdRng, glome: GlomeParams) -> Self {
        let mut registry = Self {
            shapes: HashMap::with_capacity(ShapeKey::ALL.len()),
            glome,
            rng,
        };
        for key in ShapeKey::ALL {
            let shape = registry.build(key);
            registry.shapes.insert(key, Arc::new(shape));
        }
        log::info!(
            "Shape registry ready: {} shapes, glome {} samples at radius {}",
            registry.shapes.len(),
            glome.samples,
            glome.radius
        );
        registry
    }

    fn build(&mut self, key: ShapeKey) -> ShapeDefinition {
        match key {
            ShapeKey::Tesseract => shapes::tesseract(),
            ShapeKey::FramedCube => shapes::framed_cube(),
            ShapeKey::Pentachoron => shapes::pentachoron(),
            ShapeKey::Hexadecachoron => shapes::hexadecachoron(),
            ShapeKey::Glome => shapes::glome(&mut self.rng, self.glome),
        }
    }

    /// Get the current definition for a key
    pub fn get(&self, key: ShapeKey) -> Arc<ShapeDefinition> {
        // Every key is inserted by the constructor and only ever replaced
        Arc::clone(&self.shapes[&key])
    }

    /// Look up a shape by its string key
    pub fn lookup(&self, name: &str) -> Result<Arc<ShapeDefinition>, ShapeError> {
        let key: ShapeKey = name.parse()?;
        Ok(self.get(key))
    }

    /// Build a fresh definition for `key` and make it the current one
    ///
    /// Holders of the previous `Arc` keep seeing the old geometry.
    pub fn regenerate(&mut self, key: ShapeKey) -> Arc<ShapeDefinition> {
        let shape = Arc::new(self.build(key));
        log::debug!("Regenerated {} ({} vertices)", key, shape.vertices().len());
        self.shapes.insert(key, Arc::clone(&shape));
        shape
    }

    /// Glome sampling parameters in use
    pub fn glome_params(&self) -> GlomeParams {
        self.glome
    }

    /// All registered keys, in a fixed order
    pub fn keys(&self) -> impl Iterator<Item = ShapeKey> {
        ShapeKey::ALL.into_iter()
    }
}
