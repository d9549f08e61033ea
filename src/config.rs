//! # Engine Configuration
//!
//! This module defines the complete configuration surface of the voxel engine:
//! world/streaming parameters, terrain noise shaping, biome threshold bands,
//! vegetation density, and the actor physics constants.
//!
//! Configuration is plain data. Every section has a fully specified `Default`
//! so the engine runs without any file present, and every section can be
//! overridden piecemeal from a JSON document (`#[serde(default)]` on each
//! struct means a file only needs the keys it wants to change).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::generation::noise_field::FractalSettings;

/// Errors produced while loading or validating an [`EngineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid JSON or has wrong field types.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration parsed but violates an engine invariant.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level engine configuration, grouping one section per subsystem.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// World layout and chunk streaming parameters.
    pub world: WorldConfig,
    /// Terrain noise shaping parameters.
    pub terrain: TerrainConfig,
    /// Biome classification threshold bands.
    pub biomes: BiomeConfig,
    /// Vegetation decoration parameters.
    pub vegetation: VegetationConfig,
    /// Actor movement and collision constants.
    pub physics: PhysicsConfig,
}

impl EngineConfig {
    /// Loads a configuration from a JSON file and validates it.
    ///
    /// # Arguments
    /// * `path` - Path to the JSON configuration file
    ///
    /// # Errors
    /// Returns a [`ConfigError`] if the file cannot be read, parsed, or
    /// fails validation.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config: EngineConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the cross-field invariants that serde cannot express.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] describing the first violation found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world.chunk_size == 0 || self.world.chunk_height == 0 {
            return Err(ConfigError::Invalid(
                "chunk_size and chunk_height must be nonzero".to_string(),
            ));
        }
        if self.world.unload_radius <= self.world.load_radius {
            return Err(ConfigError::Invalid(format!(
                "unload_radius ({}) must exceed load_radius ({}) for streaming hysteresis",
                self.world.unload_radius, self.world.load_radius
            )));
        }
        if self.world.mesh_budget_per_tick == 0 {
            return Err(ConfigError::Invalid(
                "mesh_budget_per_tick must be at least 1".to_string(),
            ));
        }
        if self.terrain.min_height >= self.terrain.max_height {
            return Err(ConfigError::Invalid(
                "terrain min_height must be below max_height".to_string(),
            ));
        }
        if !(self.biomes.arid_max < self.biomes.forest_min
            && self.biomes.forest_min < self.biomes.snow_min)
        {
            return Err(ConfigError::Invalid(
                "biome thresholds must be ordered arid_max < forest_min < snow_min".to_string(),
            ));
        }
        if self.vegetation.forest_trees_min > self.vegetation.forest_trees_max {
            return Err(ConfigError::Invalid(format!(
                "forest_trees_min ({}) must not exceed forest_trees_max ({})",
                self.vegetation.forest_trees_min, self.vegetation.forest_trees_max
            )));
        }
        if self.terrain.cave_surface_margin <= 6.0 {
            return Err(ConfigError::Invalid(
                "cave_surface_margin must exceed 6 so carving cannot breach the surface"
                    .to_string(),
            ));
        }
        Ok(())
    }
}

/// World layout and chunk streaming parameters.
///
/// The unload radius must exceed the load radius; the gap is the streaming
/// hysteresis band that keeps an observer oscillating at a chunk boundary
/// from thrashing load/unload cycles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Opaque world seed; all noise channels and decoration RNGs derive from it.
    pub seed: String,
    /// Horizontal chunk dimension in blocks (the `S` in the `S × H × S` grid).
    pub chunk_size: usize,
    /// Vertical chunk dimension in blocks (`H`); the world has no vertical chunking.
    pub chunk_height: usize,
    /// Chebyshev radius (in chunks) inside which chunks are created.
    pub load_radius: i32,
    /// Chebyshev radius (in chunks) beyond which chunks are destroyed.
    pub unload_radius: i32,
    /// Maximum number of chunk meshes rebuilt per streaming tick.
    pub mesh_budget_per_tick: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            seed: "seed".to_string(),
            chunk_size: 16,
            chunk_height: 64,
            load_radius: 4,
            unload_radius: 6,
            mesh_budget_per_tick: 2,
        }
    }
}

/// Terrain noise shaping parameters.
///
/// The height field is `base_height + continents * continent_amplitude +
/// |ridged| * (ridge_amplitude + ridge_erosion_amplitude * max(0, erosion))`,
/// clamped to `[min_height, max_height]`. The density field subtracts a cave
/// perturbation that only bites where the cave channel exceeds
/// `cave_threshold`, faded out within `cave_surface_margin` blocks of the
/// surface so caves never decapitate the surface column.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Mean column height around which the noise terms oscillate.
    pub base_height: f64,
    /// Lower clamp for the height field.
    pub min_height: f64,
    /// Upper clamp for the height field.
    pub max_height: f64,
    /// Broad continental fractal (low frequency, several octaves).
    pub continents: FractalSettings,
    /// Amplitude applied to the continental channel.
    pub continent_amplitude: f64,
    /// Ridged fractal used for mountain crests.
    pub ridges: FractalSettings,
    /// Base amplitude of the ridged term.
    pub ridge_amplitude: f64,
    /// Additional ridged amplitude scaled by the positive part of the erosion channel.
    pub ridge_erosion_amplitude: f64,
    /// Base frequency of the single-octave erosion channel.
    pub erosion_scale: f64,
    /// Base frequency of the 3-D cave channel.
    pub cave_scale: f64,
    /// Cave channel value above which rock is carved away.
    pub cave_threshold: f64,
    /// Depth (in blocks below the height field) over which cave carving fades
    /// in. Must exceed 6, the slope of the solid-support term, so the faded
    /// carve can never flip the surface voxel to air.
    pub cave_surface_margin: f64,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        TerrainConfig {
            base_height: 24.0,
            min_height: 4.0,
            max_height: 62.0,
            continents: FractalSettings {
                scale: 0.0018,
                octaves: 3,
                lacunarity: 2.2,
                gain: 0.5,
            },
            continent_amplitude: 18.0,
            ridges: FractalSettings {
                scale: 0.008,
                octaves: 2,
                lacunarity: 2.3,
                gain: 0.6,
            },
            ridge_amplitude: 6.0,
            ridge_erosion_amplitude: 6.0,
            erosion_scale: 0.003,
            cave_scale: 0.05,
            cave_threshold: 0.3,
            cave_surface_margin: 8.0,
        }
    }
}

/// Biome classification threshold bands over the terrain height field.
///
/// Ordering `arid_max < forest_min < snow_min` is enforced by
/// [`EngineConfig::validate`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BiomeConfig {
    /// Columns at or below this height are desert.
    pub arid_max: f64,
    /// Temperate columns at or above this height (and below `snow_min`) are forest.
    pub forest_min: f64,
    /// Columns at or above this height are snowy.
    pub snow_min: f64,
}

impl Default for BiomeConfig {
    fn default() -> Self {
        BiomeConfig {
            arid_max: 18.0,
            forest_min: 34.0,
            snow_min: 42.0,
        }
    }
}

/// Vegetation decoration parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VegetationConfig {
    /// Maximum trees placed per plains chunk (drawn uniformly from `0..=max`).
    pub plains_trees_max: u32,
    /// Minimum trees placed per forest chunk.
    pub forest_trees_min: u32,
    /// Maximum trees placed per forest chunk.
    pub forest_trees_max: u32,
    /// Maximum surface-height difference (in blocks) between a tree candidate
    /// column and its four cardinal neighbors; steeper sites are rejected.
    pub slope_limit: i32,
    /// Per-column probability of a short plant sprouting on temperate grass.
    pub short_plant_chance: f32,
}

impl Default for VegetationConfig {
    fn default() -> Self {
        VegetationConfig {
            plains_trees_max: 2,
            forest_trees_min: 3,
            forest_trees_max: 6,
            slope_limit: 2,
            short_plant_chance: 0.03,
        }
    }
}

/// Actor movement and collision constants consumed by the physics integrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Actor bounding-box width along X, in blocks.
    pub width: f32,
    /// Actor bounding-box depth along Z, in blocks.
    pub depth: f32,
    /// Actor bounding-box height along Y, in blocks.
    pub height: f32,
    /// Eye height above the actor's feet, used as the aim-ray origin.
    pub eye_height: f32,
    /// Horizontal acceleration applied by movement input, blocks/s².
    pub speed: f32,
    /// Upward velocity applied by a jump, blocks/s.
    pub jump_speed: f32,
    /// Downward acceleration, blocks/s².
    pub gravity: f32,
    /// Exponential horizontal damping coefficient (`v *= e^(-damping·dt)`).
    pub damping: f32,
    /// Acceleration multiplier while sprinting.
    pub sprint_multiplier: f32,
    /// Upper clamp on a single physics step, seconds; bounds the work done
    /// during frame hitches.
    pub max_step_dt: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        PhysicsConfig {
            width: 0.6,
            depth: 0.6,
            height: 1.8,
            eye_height: 1.62,
            speed: 36.0,
            jump_speed: 9.0,
            gravity: 24.0,
            damping: 10.0,
            sprint_multiplier: 1.3,
            max_step_dt: 0.05,
        }
    }
}
