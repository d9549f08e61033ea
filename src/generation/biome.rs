//! # Biome Classification Module
//!
//! Maps a world column to a biome tag using threshold bands over the terrain
//! height field. The classification is a pure function of the height, so two
//! chunks always agree about the biome of a shared-edge column.
//!
//! Each biome carries a surface profile (surface block, topsoil block and
//! depth) and a vegetation profile (tree count range, tree species, short
//! plant chance) consumed by chunk population and decoration.

use crate::config::{BiomeConfig, VegetationConfig};
use crate::voxels::block::BlockType;

/// Biome tag for a world column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Biome {
    /// Low arid land; sand surface, no trees.
    Desert,
    /// Temperate grassland; sparse trees and short plants.
    Plains,
    /// Higher temperate land; dense dark-wood trees.
    Forest,
    /// Cold high ground; snow surface, no trees.
    Snowy,
}

/// Trunk and canopy blocks for a tree placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeSpecies {
    /// Block used for the vertical trunk.
    pub trunk: BlockType,
    /// Block used for the canopy.
    pub canopy: BlockType,
}

/// Classifies columns into biomes and answers per-biome profile queries.
pub struct BiomeClassifier {
    thresholds: BiomeConfig,
    vegetation: VegetationConfig,
}

impl BiomeClassifier {
    /// Creates a classifier over the configured threshold bands.
    pub fn new(thresholds: BiomeConfig, vegetation: VegetationConfig) -> Self {
        BiomeClassifier {
            thresholds,
            vegetation,
        }
    }

    /// Classifies a column by its terrain height.
    pub fn classify(&self, terrain_height: f64) -> Biome {
        if terrain_height <= self.thresholds.arid_max {
            Biome::Desert
        } else if terrain_height >= self.thresholds.snow_min {
            Biome::Snowy
        } else if terrain_height >= self.thresholds.forest_min {
            Biome::Forest
        } else {
            Biome::Plains
        }
    }

    /// Block placed at the surface voxel of a column.
    pub fn surface_block(&self, biome: Biome) -> BlockType {
        match biome {
            Biome::Desert => BlockType::Sand,
            Biome::Plains | Biome::Forest => BlockType::Grass,
            Biome::Snowy => BlockType::Snow,
        }
    }

    /// Block filling the topsoil band directly below the surface voxel.
    pub fn topsoil_block(&self, biome: Biome) -> BlockType {
        match biome {
            Biome::Desert => BlockType::Sand,
            Biome::Plains | Biome::Forest | Biome::Snowy => BlockType::Dirt,
        }
    }

    /// Depth of the topsoil band, in blocks below the surface voxel.
    pub fn topsoil_depth(&self, biome: Biome) -> i32 {
        match biome {
            Biome::Desert => 4,
            Biome::Plains | Biome::Forest | Biome::Snowy => 3,
        }
    }

    /// Inclusive range of trees to plant per chunk of this biome.
    pub fn tree_count_range(&self, biome: Biome) -> (u32, u32) {
        match biome {
            Biome::Desert | Biome::Snowy => (0, 0),
            Biome::Plains => (0, self.vegetation.plains_trees_max),
            Biome::Forest => (
                self.vegetation.forest_trees_min,
                self.vegetation.forest_trees_max,
            ),
        }
    }

    /// Tree species planted in this biome, if any.
    pub fn tree_species(&self, biome: Biome) -> Option<TreeSpecies> {
        match biome {
            Biome::Desert | Biome::Snowy => None,
            Biome::Plains => Some(TreeSpecies {
                trunk: BlockType::Log,
                canopy: BlockType::Leaves,
            }),
            Biome::Forest => Some(TreeSpecies {
                trunk: BlockType::DarkLog,
                canopy: BlockType::DarkLeaves,
            }),
        }
    }

    /// Inclusive range of trunk heights for trees in this biome.
    pub fn trunk_height_range(&self, biome: Biome) -> (i32, i32) {
        match biome {
            Biome::Forest => (5, 8),
            _ => (4, 6),
        }
    }

    /// Per-column chance of a short plant on the surface of this biome.
    pub fn short_plant_chance(&self, biome: Biome) -> f32 {
        match biome {
            Biome::Plains | Biome::Forest => self.vegetation.short_plant_chance,
            Biome::Desert | Biome::Snowy => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> BiomeClassifier {
        BiomeClassifier::new(BiomeConfig::default(), VegetationConfig::default())
    }

    #[test]
    fn threshold_bands_cover_the_height_range() {
        let c = classifier();
        assert_eq!(c.classify(4.0), Biome::Desert);
        assert_eq!(c.classify(18.0), Biome::Desert);
        assert_eq!(c.classify(18.5), Biome::Plains);
        assert_eq!(c.classify(33.9), Biome::Plains);
        assert_eq!(c.classify(34.0), Biome::Forest);
        assert_eq!(c.classify(41.9), Biome::Forest);
        assert_eq!(c.classify(42.0), Biome::Snowy);
        assert_eq!(c.classify(62.0), Biome::Snowy);
    }

    #[test]
    fn surface_blocks_match_biome() {
        let c = classifier();
        assert_eq!(c.surface_block(Biome::Desert), BlockType::Sand);
        assert_eq!(c.surface_block(Biome::Plains), BlockType::Grass);
        assert_eq!(c.surface_block(Biome::Forest), BlockType::Grass);
        assert_eq!(c.surface_block(Biome::Snowy), BlockType::Snow);
    }

    #[test]
    fn cold_and_arid_biomes_are_treeless() {
        let c = classifier();
        assert_eq!(c.tree_count_range(Biome::Desert), (0, 0));
        assert_eq!(c.tree_count_range(Biome::Snowy), (0, 0));
        assert!(c.tree_species(Biome::Desert).is_none());
        let forest = c.tree_species(Biome::Forest).unwrap();
        assert_eq!(forest.trunk, BlockType::DarkLog);
        assert_eq!(forest.canopy, BlockType::DarkLeaves);
    }
}
