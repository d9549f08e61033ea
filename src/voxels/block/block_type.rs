//! # Block Type Module
//!
//! This module defines the different types of blocks in the voxel world,
//! their solidity and render classification, and per-face texture tile
//! selection.

use num_derive::FromPrimitive;

use super::{BlockId, BLOCK_TYPE_TO_TILE_INDICES};
use crate::voxels::block::block_side::BlockSide;

/// How a block type is turned into geometry.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RenderKind {
    /// No geometry at all.
    Invisible,
    /// Six-face cube in the opaque pass.
    Cube,
    /// Six-face cube in the alpha-tested cutout pass (leaves).
    CutoutCube,
    /// Two intersecting vertical quads in the cutout pass (short plants).
    Cross,
}

/// Enumerates all possible block types in the voxel world.
///
/// Each variant represents a distinct type of block. The discriminant doubles
/// as the compact storage id, and the `FromPrimitive` derive allows the
/// reverse conversion from stored ids.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
#[repr(u8)]
pub enum BlockType {
    /// Empty space; non-solid and invisible.
    Air = 0,

    /// A grass block with a green top, grassy sides, and a dirt bottom.
    Grass,

    /// Plain dirt, the common topsoil filler.
    Dirt,

    /// Bulk stone below the topsoil band.
    Stone,

    /// Desert surface and topsoil material.
    Sand,

    /// Snow-covered surface block of cold biomes.
    Snow,

    /// Tree trunk with bark sides and ring-patterned caps.
    Log,

    /// Tree canopy; alpha-tested so gaps show through.
    Leaves,

    /// Trunk of the dark forest tree variant.
    DarkLog,

    /// Canopy of the dark forest tree variant.
    DarkLeaves,

    /// A short grass plant rendered as two crossed quads.
    ShortGrass,
}

impl BlockType {
    /// Converts a stored [`BlockId`] back to a `BlockType`.
    ///
    /// # Arguments
    /// * `id` - The block type as a `BlockId`
    ///
    /// # Returns
    /// The corresponding `BlockType`; ids outside the known range decode as
    /// [`BlockType::Air`], so foreign data can never panic a chunk.
    pub fn from_id(id: BlockId) -> Self {
        num::FromPrimitive::from_u8(id).unwrap_or(BlockType::Air)
    }

    /// Whether the block occupies its cell for collision and raycasting.
    pub fn is_solid(self) -> bool {
        !matches!(self, BlockType::Air | BlockType::ShortGrass)
    }

    /// Whether the block fully hides any face it touches.
    ///
    /// Only opaque cubes occlude; cutout and cross blocks let their
    /// neighbors' faces stay visible through the transparent texels.
    pub fn is_opaque(self) -> bool {
        self.render_kind() == RenderKind::Cube
    }

    /// The geometry class the mesher emits for this block.
    pub fn render_kind(self) -> RenderKind {
        match self {
            BlockType::Air => RenderKind::Invisible,
            BlockType::ShortGrass => RenderKind::Cross,
            BlockType::Leaves | BlockType::DarkLeaves => RenderKind::CutoutCube,
            _ => RenderKind::Cube,
        }
    }

    /// Texture tile index for one face of this block.
    ///
    /// # Arguments
    /// * `side` - Which face is being textured
    ///
    /// # Returns
    /// An index into the texture atlas row, from the per-face tables in the
    /// parent module.
    pub fn tile_index(self, side: BlockSide) -> usize {
        BLOCK_TYPE_TO_TILE_INDICES[self as usize][side as usize]
    }
}
