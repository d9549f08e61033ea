//! # Voxels Module
//!
//! This module groups the voxel data model: block types and faces, chunk
//! storage and meshing, geometry buffers, and the world that owns and
//! streams chunks.

pub mod block;
pub mod chunk;
pub mod mesh;
pub mod world;

use block::BlockType;

/// Read access to world-space voxel data.
///
/// The single seam through which meshing, raycasting, and collision observe
/// block state. Implementations are total: any coordinate outside loaded
/// storage reads as [`BlockType::Air`].
pub trait BlockQuery {
    /// The block at a world-space voxel coordinate.
    fn block_at(&self, x: i32, y: i32, z: i32) -> BlockType;
}
