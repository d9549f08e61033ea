//! # Terrain Pipeline Module
//!
//! Combines the [`NoiseField`](crate::generation::noise_field::NoiseField)
//! channels into the two scalar fields everything else builds on:
//!
//! ## Height Field
//! `terrain_height(x, z)` blends a broad continental fractal with a ridged
//! mountain term whose amplitude is modulated by an erosion channel. The
//! result is clamped to the configured column range and is continuous across
//! chunk boundaries, so neighbor chunks agree along their shared edge.
//!
//! ## Density Field
//! `density(x, y, z)` converts the height field into a signed solid/air
//! decision and carves caves where a 3-D channel exceeds a threshold. Cave
//! carving fades out near the surface so the topmost solid voxel of a column
//! stays intact.

use crate::config::TerrainConfig;
use crate::generation::noise_field::{Channel2, NoiseField};

/// Small positive bias keeping the voxel at `floor(height)` solid even when
/// the height field lands exactly on an integer.
const SURFACE_BIAS: f64 = 1e-6;

/// Derives the world height and density fields from a seeded noise field.
pub struct TerrainPipeline {
    noise: NoiseField,
    config: TerrainConfig,
}

impl TerrainPipeline {
    /// Creates a pipeline over an already seeded noise field.
    pub fn new(noise: NoiseField, config: TerrainConfig) -> Self {
        TerrainPipeline { noise, config }
    }

    /// Read access to the terrain parameters this pipeline was built with.
    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// Continuous column height at the given world position.
    ///
    /// # Returns
    /// A height in `[min_height, max_height]`.
    pub fn terrain_height(&self, x: f64, z: f64) -> f64 {
        let cfg = &self.config;
        let continents = self.noise.fbm2(Channel2::Continents, x, z, &cfg.continents);
        let ridged = self.noise.ridged2(Channel2::Ridges, x, z, &cfg.ridges);
        let erosion = self.noise.sample2(Channel2::Erosion, x, z, cfg.erosion_scale);
        let ridge_amplitude =
            cfg.ridge_amplitude + cfg.ridge_erosion_amplitude * erosion.max(0.0);
        let height = cfg.base_height
            + continents * cfg.continent_amplitude
            + ridged.abs() * ridge_amplitude;
        height.clamp(cfg.min_height, cfg.max_height)
    }

    /// Signed density at a world voxel position. Positive means solid.
    pub fn density(&self, x: f64, y: f64, z: f64) -> f64 {
        self.density_with_height(self.terrain_height(x, z), x, y, z)
    }

    /// Density against a precomputed column height. Lets per-column loops
    /// evaluate the 2-D channels once instead of once per voxel.
    pub fn density_with_height(&self, height: f64, x: f64, y: f64, z: f64) -> f64 {
        let cfg = &self.config;
        let support = (height - y + SURFACE_BIAS) / 6.0;
        let cheese = self.noise.sample3(x, y, z, cfg.cave_scale);
        let carve = cheese - cfg.cave_threshold;
        // Carving fades linearly to zero at the surface. With a margin above
        // six blocks the faded carve term stays strictly below the support
        // slope, so the column from the surface voxel down to the margin is
        // always solid and caves only open below it.
        let fade = ((height - y) / cfg.cave_surface_margin).clamp(0.0, 1.0);
        support - carve * fade
    }

    /// Authoritative ground level of a column: the highest `y` in `[0, max_y)`
    /// that is solid with two air voxels above it.
    ///
    /// # Returns
    /// `None` when the scan finds no such voxel (a fully carved column).
    pub fn surface_y(&self, x: i32, z: i32, max_y: i32) -> Option<i32> {
        let height = self.terrain_height(f64::from(x), f64::from(z));
        let fx = f64::from(x);
        let fz = f64::from(z);
        let mut above1 = false;
        let mut above2 = false;
        for y in (0..max_y).rev() {
            let solid = self.density_with_height(height, fx, f64::from(y), fz) > 0.0;
            if solid && !above1 && !above2 {
                return Some(y);
            }
            above2 = above1;
            above1 = solid;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TerrainConfig;
    use crate::generation::noise_field::NoiseField;

    fn pipeline(seed: &str) -> TerrainPipeline {
        TerrainPipeline::new(NoiseField::new(seed), TerrainConfig::default())
    }

    #[test]
    fn height_is_deterministic() {
        let a = pipeline("seed");
        let b = pipeline("seed");
        for i in -16..16 {
            let x = f64::from(i) * 9.4;
            let z = f64::from(i) * -3.2;
            assert_eq!(a.terrain_height(x, z), b.terrain_height(x, z));
            assert_eq!(a.density(x, 20.0, z), b.density(x, 20.0, z));
        }
    }

    #[test]
    fn height_respects_clamp() {
        let pipeline = pipeline("clamp");
        let cfg = pipeline.config().clone();
        for i in -64..64 {
            let h = pipeline.terrain_height(f64::from(i) * 17.0, f64::from(i) * 5.0);
            assert!(h >= cfg.min_height && h <= cfg.max_height);
        }
    }

    #[test]
    fn height_matches_across_chunk_edge() {
        // Two pipelines built independently from the same seed must agree on
        // every boundary column, so chunks meshed at different times still
        // line up along their shared edge.
        let a = pipeline("seed");
        let b = pipeline("seed");
        for z in -32..32 {
            assert_eq!(
                a.terrain_height(16.0, f64::from(z)),
                b.terrain_height(16.0, f64::from(z))
            );
        }
    }

    #[test]
    fn surface_voxel_sits_at_floored_height() {
        // The topmost solid voxel of a column is exactly the floored height
        // field, including at the noise lattice origin where the channels
        // return exact values.
        let pipeline = pipeline("seed");
        for (x, z) in [(0, 0), (3, -9), (127, 40), (-55, 18)] {
            let height = pipeline.terrain_height(f64::from(x), f64::from(z));
            let expected = height.floor() as i32;
            assert_eq!(pipeline.surface_y(x, z, 64), Some(expected));
            assert!(pipeline.density(f64::from(x), f64::from(expected), f64::from(z)) > 0.0);
        }
    }

    #[test]
    fn surface_stays_solid_under_caves() {
        let pipeline = pipeline("seed");
        for i in -24..24 {
            let x = i * 7;
            let z = i * 11;
            if let Some(surface) = pipeline.surface_y(x, z, 64) {
                let d = pipeline.density(f64::from(x), f64::from(surface), f64::from(z));
                assert!(d > 0.0);
                let above =
                    pipeline.density(f64::from(x), f64::from(surface + 1), f64::from(z));
                assert!(above <= 0.0);
            }
        }
    }
}
