//! # Block Module
//!
//! This module provides the core block-related functionality for the voxel
//! world. It includes block type definitions, block face handling, and the
//! per-face texture tile tables.

pub mod block_side;
pub mod block_type;

pub use block_side::BlockSide;
pub use block_type::{BlockType, RenderKind};

/// The underlying integer type used to represent block types in memory.
/// This is used for efficient storage of chunk block data.
pub type BlockId = u8;

/// Maps each block type to its texture tile indices for each face.
///
/// The outer array is indexed by `BlockType` as a `usize`.
/// The inner array contains 6 tile indices, one for each face in the order:
/// [Right, Left, Top, Bottom, Front, Back]
pub static BLOCK_TYPE_TO_TILE_INDICES: [[usize; 6]; 11] = [
    [0, 0, 0, 0, 0, 0],       // Air (never rendered)
    [2, 2, 0, 1, 2, 2],       // Grass (top: 0, bottom: dirt, sides: 2)
    [1, 1, 1, 1, 1, 1],       // Dirt
    [3, 3, 3, 3, 3, 3],       // Stone
    [4, 4, 4, 4, 4, 4],       // Sand
    [5, 5, 5, 5, 5, 5],       // Snow
    [6, 6, 7, 7, 6, 6],       // Log (bark sides, ring caps)
    [10, 10, 10, 10, 10, 10], // Leaves
    [8, 8, 9, 9, 8, 8],       // DarkLog (bark sides, ring caps)
    [11, 11, 11, 11, 11, 11], // DarkLeaves
    [12, 12, 12, 12, 12, 12], // ShortGrass (cross quads)
];
