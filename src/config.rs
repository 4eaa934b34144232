//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`HV_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::{Path, PathBuf};

use hyperview_core::{
    GlomeParams, ProjectionError, Projector, RotationEngine, RotationRates,
    DEFAULT_VIEWER_DISTANCE,
};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Shape selection and generation
    #[serde(default)]
    pub shape: ShapeConfig,
    /// Rotation speed and tick driving
    #[serde(default)]
    pub animation: AnimationConfig,
    /// Perspective projection
    #[serde(default)]
    pub projection: ProjectionConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`HV_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // HV_SHAPE__INITIAL=glome -> shape.initial = "glome"
        figment = figment.merge(Env::prefixed("HV_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Shape configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeConfig {
    /// Key of the shape selected at startup
    pub initial: String,
    /// Seed for glome sampling; entropy when unset
    pub glome_seed: Option<u64>,
    /// Number of glome sample points
    pub glome_samples: usize,
    /// Glome sphere radius
    pub glome_radius: f32,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        let glome = GlomeParams::default();
        Self {
            initial: "tesseract".to_string(),
            glome_seed: None,
            glome_samples: glome.samples,
            glome_radius: glome.radius,
        }
    }
}

impl ShapeConfig {
    pub fn glome_params(&self) -> GlomeParams {
        GlomeParams { samples: self.glome_samples, radius: self.glome_radius }
    }
}

/// Animation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Intensity factor fed to every tick, 0 to 1
    pub intensity: f32,
    /// Number of ticks the headless driver runs
    pub ticks: u64,
    /// YZ angle advanced per tick at full intensity (radians)
    pub rate_yz: f32,
    /// XW angle advanced per tick at full intensity (radians)
    pub rate_xw: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        let rates = RotationRates::default();
        Self {
            intensity: 1.0,
            ticks: 600,
            rate_yz: rates.yz,
            rate_xw: rates.xw,
        }
    }
}

impl AnimationConfig {
    pub fn to_engine(&self) -> RotationEngine {
        RotationEngine::new(RotationRates { yz: self.rate_yz, xw: self.rate_xw })
    }
}

/// Projection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Viewer distance along w
    pub viewer_distance: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self { viewer_distance: DEFAULT_VIEWER_DISTANCE }
    }
}

impl ProjectionConfig {
    pub fn to_projector(&self) -> Result<Projector, ProjectionError> {
        Projector::new(self.viewer_distance)
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Write the last frame as RON to this path
    pub dump_path: Option<PathBuf>,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            dump_path: None,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.shape.initial, "tesseract");
        assert_eq!(config.shape.glome_samples, 3000);
        assert_eq!(config.animation.rate_yz, 0.005);
        assert_eq!(config.projection.viewer_distance, 2.0);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("initial"));
        assert!(toml.contains("viewer_distance"));
    }

    #[test]
    fn test_partial_section_uses_defaults() {
        let config: AppConfig = toml::from_str("[animation]\nintensity = 0.25\n").unwrap();
        assert_eq!(config.animation.intensity, 0.25);
        assert_eq!(config.animation.ticks, 600);
        assert_eq!(config.shape.initial, "tesseract");
    }

    #[test]
    fn test_bad_viewer_distance_rejected() {
        let projection = ProjectionConfig { viewer_distance: 0.0 };
        assert!(projection.to_projector().is_err());
    }

    #[test]
    fn test_missing_dir_falls_back_to_defaults() {
        let config = AppConfig::load_from("does/not/exist").unwrap();
        assert_eq!(config.debug.log_level, "info");
    }
}
