//! Typed run configuration.
//!
//! The TOML layout mirrors one table per pipeline stage:
//!
//! ```toml
//! [maze]
//! width = 20
//! height = 15
//!
//! [generator]
//! type = "dfs"
//! loop_probability = 0.1
//!
//! [surface]
//! type = "perlin_noise"
//! height_range = 10
//!
//! [solver]
//! type = "johnson"
//!
//! [costfunc]
//! type = "non_linear"
//! penalty_treshold = 2
//!
//! [visuals]
//! console = true
//! image = false
//! cell_size = 20
//! filename = "maze.png"
//! ```
//!
//! Every table and key is optional and falls back to [`Settings::default`].
//! Values are validated once, after parsing, and never clamped.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cost::CostFunctionKind;
use crate::error::ConfigError;
use crate::generator::GeneratorKind;
use crate::heightfield::HeightProviderKind;
use crate::solver::SolverKind;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub maze: MazeSettings,
    pub generator: GeneratorSettings,
    pub surface: SurfaceSettings,
    pub solver: SolverSettings,
    #[serde(rename = "costfunc", alias = "cost")]
    pub cost: CostSettings,
    pub perlin: PerlinSettings,
    pub visuals: VisualsSettings,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MazeSettings {
    pub width: usize,
    pub height: usize,
}

impl Default for MazeSettings {
    fn default() -> Self {
        Self { width: 20, height: 15 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorSettings {
    #[serde(rename = "type")]
    pub kind: GeneratorKind,
    pub loop_probability: f64,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self { kind: GeneratorKind::Dfs, loop_probability: 0.1 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SurfaceSettings {
    #[serde(rename = "type")]
    pub kind: HeightProviderKind,
    pub height_range: u32,
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        Self { kind: HeightProviderKind::PerlinNoise, height_range: 10 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverSettings {
    #[serde(rename = "type")]
    pub kind: SolverKind,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self { kind: SolverKind::Johnson }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CostSettings {
    #[serde(rename = "type")]
    pub kind: CostFunctionKind,
    #[serde(alias = "penalty_treshold")]
    pub penalty_threshold: u32,
}

impl Default for CostSettings {
    fn default() -> Self {
        Self { kind: CostFunctionKind::NonLinear, penalty_threshold: 2 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PerlinSettings {
    pub scale: f64,
    pub octaves: u32,
    pub persistence: f64,
    pub lacunarity: f64,
}

impl Default for PerlinSettings {
    fn default() -> Self {
        Self { scale: 10.0, octaves: 4, persistence: 0.5, lacunarity: 2.0 }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VisualsSettings {
    pub console: bool,
    pub json: bool,
    /// Write a PNG heat map of the solved maze to `filename`.
    pub image: bool,
    /// Pixels per cell side in the heat map.
    pub cell_size: u32,
    pub filename: String,
}

pub const MIN_CELL_SIZE: u32 = 10;

impl Default for VisualsSettings {
    fn default() -> Self {
        Self {
            console: true,
            json: false,
            image: false,
            cell_size: 20,
            filename: "maze.png".to_string(),
        }
    }
}

impl Settings {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(source)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        let settings = Self::from_toml_str(&source)?;
        tracing::info!(
            target: "heightmaze::config",
            path = %path.display(),
            "config.loaded=file"
        );
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.maze.width == 0 {
            return Err(ConfigError::invalid("maze.width", "must be positive"));
        }
        if self.maze.height == 0 {
            return Err(ConfigError::invalid("maze.height", "must be positive"));
        }
        let loop_probability = self.generator.loop_probability;
        if !(0.0..=1.0).contains(&loop_probability) {
            return Err(ConfigError::invalid(
                "generator.loop_probability",
                format!("{loop_probability} is not in [0, 1]"),
            ));
        }
        if self.surface.height_range == 0 {
            return Err(ConfigError::invalid("surface.height_range", "must be positive"));
        }
        if self.cost.penalty_threshold == 0 {
            return Err(ConfigError::invalid("costfunc.penalty_threshold", "must be positive"));
        }
        self.perlin.validate()?;
        self.visuals.validate()
    }
}

impl VisualsSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size < MIN_CELL_SIZE {
            return Err(ConfigError::invalid(
                "visuals.cell_size",
                format!("{} is below {MIN_CELL_SIZE}", self.cell_size),
            ));
        }
        if self.filename.trim().is_empty() {
            return Err(ConfigError::invalid("visuals.filename", "must not be empty"));
        }
        Ok(())
    }
}

impl PerlinSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(ConfigError::invalid(
                "perlin.scale",
                format!("{} must be positive", self.scale),
            ));
        }
        if self.octaves == 0 {
            return Err(ConfigError::invalid("perlin.octaves", "must be greater than zero"));
        }
        if !(self.persistence > 0.0 && self.persistence <= 1.0) {
            return Err(ConfigError::invalid(
                "perlin.persistence",
                format!("{} is not in (0, 1]", self.persistence),
            ));
        }
        if !(self.lacunarity.is_finite() && self.lacunarity > 1.0) {
            return Err(ConfigError::invalid(
                "perlin.lacunarity",
                format!("{} must be greater than 1", self.lacunarity),
            ));
        }
        Ok(())
    }
}

/// Lower-cases a variant name and folds `-`/spaces to `_` so `PERLIN_NOISE`,
/// `perlin-noise` and `perlin_noise` all match.
pub(crate) fn normalize_variant(value: &str) -> String {
    value
        .trim()
        .chars()
        .map(|c| if c == '-' || c == ' ' { '_' } else { c.to_ascii_lowercase() })
        .collect()
}
