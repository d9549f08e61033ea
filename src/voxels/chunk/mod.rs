//! # Chunk Module
//!
//! This module provides the `Chunk` struct and related functionality for
//! managing a vertical column of voxel data. A chunk is an `S × H × S` dense
//! block grid addressed by a horizontal [`ChunkCoord`]; the world has no
//! vertical chunking.
//!
//! ## Storage
//!
//! Blocks are stored as a flat `Vec<BlockType>` in `y`-major order
//! (`y * S * S + z * S + x`), so a full horizontal plane is contiguous in
//! memory and column scans stride predictably.
//!
//! Local accessors are total: reads outside the grid return air and writes
//! outside it are no-ops, so callers never need to pre-clamp coordinates.

use cgmath::Point3;

use crate::generation::biome::BiomeClassifier;
use crate::generation::terrain::TerrainPipeline;

use super::block::BlockType;
use super::mesh::ChunkMesh;

pub mod mesher;

/// Horizontal chunk coordinate (chunk units, not blocks).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChunkCoord {
    /// Chunk index along world X.
    pub x: i32,
    /// Chunk index along world Z.
    pub z: i32,
}

impl ChunkCoord {
    /// The chunk containing the given world block column.
    ///
    /// Uses euclidean division so negative coordinates map correctly
    /// (block -1 belongs to chunk -1, not chunk 0).
    pub fn containing(x: i32, z: i32, chunk_size: usize) -> Self {
        let size = chunk_size as i32;
        ChunkCoord {
            x: x.div_euclid(size),
            z: z.div_euclid(size),
        }
    }

    /// Chebyshev (chessboard) distance to another chunk coordinate.
    pub fn chebyshev_distance(self, other: ChunkCoord) -> i32 {
        (self.x - other.x).abs().max((self.z - other.z).abs())
    }

    /// World-space position of this chunk's minimum corner.
    pub fn origin(self, chunk_size: usize) -> Point3<f32> {
        let size = chunk_size as i32;
        Point3::new((self.x * size) as f32, 0.0, (self.z * size) as f32)
    }
}

/// The dimensions of a chunk's block grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ChunkExtent {
    /// Horizontal dimension `S`, in blocks.
    pub size: usize,
    /// Vertical dimension `H`, in blocks.
    pub height: usize,
}

impl ChunkExtent {
    /// Flat storage index of an in-range local coordinate.
    fn index(self, x: usize, y: usize, z: usize) -> usize {
        y * self.size * self.size + z * self.size + x
    }

    /// Whether a signed local coordinate lies inside the grid.
    fn contains(self, x: i32, y: i32, z: i32) -> bool {
        x >= 0
            && y >= 0
            && z >= 0
            && (x as usize) < self.size
            && (y as usize) < self.height
            && (z as usize) < self.size
    }
}

/// A vertical column of voxel blocks plus its derived render geometry.
///
/// The chunk owns its block data exclusively; all cross-chunk reads go
/// through the owning world's accessors, never through direct references
/// to neighbor chunks.
pub struct Chunk {
    /// This chunk's position in chunk coordinates.
    pub coord: ChunkCoord,
    extent: ChunkExtent,
    data: Vec<BlockType>,
    /// Set whenever block data changes; cleared when a mesh is installed.
    pub is_dirty: bool,
    mesh: Option<ChunkMesh>,
}

impl Chunk {
    /// Creates an all-air chunk of the given extent.
    pub fn empty(coord: ChunkCoord, extent: ChunkExtent) -> Self {
        Chunk {
            coord,
            extent,
            data: vec![BlockType::Air; extent.size * extent.size * extent.height],
            is_dirty: true,
            mesh: None,
        }
    }

    /// Creates a chunk and fills it from the terrain and biome fields.
    pub fn generate(
        coord: ChunkCoord,
        extent: ChunkExtent,
        terrain: &TerrainPipeline,
        biomes: &BiomeClassifier,
    ) -> Self {
        let mut chunk = Chunk::empty(coord, extent);
        chunk.populate(terrain, biomes);
        chunk
    }

    /// The dimensions of this chunk's block grid.
    pub fn extent(&self) -> ChunkExtent {
        self.extent
    }

    /// Reads a block at a local coordinate.
    ///
    /// # Returns
    /// The stored block, or [`BlockType::Air`] for any out-of-range
    /// coordinate.
    pub fn block_local(&self, x: i32, y: i32, z: i32) -> BlockType {
        if !self.extent.contains(x, y, z) {
            return BlockType::Air;
        }
        self.data[self.extent.index(x as usize, y as usize, z as usize)]
    }

    /// Writes a block at a local coordinate and marks the chunk dirty.
    ///
    /// Out-of-range writes are no-ops and leave the dirty flag untouched.
    pub fn set_block_local(&mut self, x: i32, y: i32, z: i32, block: BlockType) {
        if !self.extent.contains(x, y, z) {
            return;
        }
        self.data[self.extent.index(x as usize, y as usize, z as usize)] = block;
        self.is_dirty = true;
    }

    /// The most recently built mesh, if any.
    pub fn mesh(&self) -> Option<&ChunkMesh> {
        self.mesh.as_ref()
    }

    /// Installs a freshly built mesh and clears the dirty flag.
    pub fn set_mesh(&mut self, mesh: ChunkMesh) {
        self.mesh = Some(mesh);
        self.is_dirty = false;
    }

    /// Whether the chunk has a mesh installed.
    pub fn has_mesh(&self) -> bool {
        self.mesh.is_some()
    }

    /// Fills the block grid from the density field, laying down the biome's
    /// surface and topsoil bands over bulk stone.
    ///
    /// Each column evaluates the 2-D height channels once, then resolves
    /// every voxel against the precomputed height. When the surface scan
    /// finds no qualifying voxel (a fully carved column), block resolution
    /// falls back to an air-directly-above heuristic plus a short upward
    /// scan to separate topsoil from stone.
    pub fn populate(&mut self, terrain: &TerrainPipeline, biomes: &BiomeClassifier) {
        let size = self.extent.size as i32;
        let height = self.extent.height as i32;
        for x in 0..size {
            for z in 0..size {
                let world_x = self.coord.x * size + x;
                let world_z = self.coord.z * size + z;
                let fx = f64::from(world_x);
                let fz = f64::from(world_z);
                let column_height = terrain.terrain_height(fx, fz);
                let biome = biomes.classify(column_height);
                let surface = terrain.surface_y(world_x, world_z, height);
                let topsoil_depth = biomes.topsoil_depth(biome);
                for y in 0..height {
                    let density = terrain.density_with_height(column_height, fx, f64::from(y), fz);
                    if density <= 0.0 {
                        continue;
                    }
                    let block = match surface {
                        Some(s) if y == s => biomes.surface_block(biome),
                        Some(s) if y < s && s - y <= topsoil_depth => biomes.topsoil_block(biome),
                        Some(_) => BlockType::Stone,
                        None => {
                            let above = terrain
                                .density_with_height(column_height, fx, f64::from(y + 1), fz);
                            if above <= 0.0 {
                                biomes.surface_block(biome)
                            } else if (2..=topsoil_depth + 1).any(|k| {
                                terrain.density_with_height(
                                    column_height,
                                    fx,
                                    f64::from(y + k),
                                    fz,
                                ) <= 0.0
                            }) {
                                biomes.topsoil_block(biome)
                            } else {
                                BlockType::Stone
                            }
                        }
                    };
                    let index = self.extent.index(x as usize, y as usize, z as usize);
                    self.data[index] = block;
                }
            }
        }
        self.is_dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BiomeConfig, TerrainConfig, VegetationConfig};
    use crate::generation::noise_field::NoiseField;

    fn extent() -> ChunkExtent {
        ChunkExtent {
            size: 16,
            height: 64,
        }
    }

    #[test]
    fn containing_handles_negative_coordinates() {
        assert_eq!(ChunkCoord::containing(0, 0, 16), ChunkCoord { x: 0, z: 0 });
        assert_eq!(ChunkCoord::containing(15, 15, 16), ChunkCoord { x: 0, z: 0 });
        assert_eq!(ChunkCoord::containing(16, 0, 16), ChunkCoord { x: 1, z: 0 });
        assert_eq!(
            ChunkCoord::containing(-1, -16, 16),
            ChunkCoord { x: -1, z: -1 }
        );
        assert_eq!(
            ChunkCoord::containing(-17, -1, 16),
            ChunkCoord { x: -2, z: -1 }
        );
    }

    #[test]
    fn out_of_range_reads_are_air() {
        let chunk = Chunk::empty(ChunkCoord { x: 0, z: 0 }, extent());
        assert_eq!(chunk.block_local(-1, 5, 5), BlockType::Air);
        assert_eq!(chunk.block_local(16, 5, 5), BlockType::Air);
        assert_eq!(chunk.block_local(5, -1, 5), BlockType::Air);
        assert_eq!(chunk.block_local(5, 64, 5), BlockType::Air);
        assert_eq!(chunk.block_local(5, 5, -1), BlockType::Air);
        assert_eq!(chunk.block_local(5, 5, 16), BlockType::Air);
    }

    #[test]
    fn out_of_range_writes_are_no_ops() {
        let mut chunk = Chunk::empty(ChunkCoord { x: 0, z: 0 }, extent());
        chunk.is_dirty = false;
        chunk.set_block_local(-1, 5, 5, BlockType::Stone);
        chunk.set_block_local(5, 64, 5, BlockType::Stone);
        assert!(!chunk.is_dirty);
        chunk.set_block_local(5, 5, 5, BlockType::Stone);
        assert!(chunk.is_dirty);
        assert_eq!(chunk.block_local(5, 5, 5), BlockType::Stone);
    }

    #[test]
    fn populated_chunk_has_surface_over_stone() {
        let terrain = TerrainPipeline::new(NoiseField::new("seed"), TerrainConfig::default());
        let biomes = BiomeClassifier::new(BiomeConfig::default(), VegetationConfig::default());
        let chunk = Chunk::generate(ChunkCoord { x: 0, z: 0 }, extent(), &terrain, &biomes);
        let mut found_surface = false;
        for x in 0..16 {
            for z in 0..16 {
                for y in (0..64).rev() {
                    let block = chunk.block_local(x, y, z);
                    if block != BlockType::Air {
                        assert_ne!(block, BlockType::Stone, "stone exposed at surface");
                        found_surface = true;
                        break;
                    }
                }
            }
        }
        assert!(found_surface);
    }
}
