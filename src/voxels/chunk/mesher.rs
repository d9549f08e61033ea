//! # Chunk Mesher Module
//!
//! Converts a chunk's block grid into renderable geometry using hidden-face
//! culling with per-corner ambient occlusion.
//!
//! ## Face Culling
//! A cube face is emitted only when the neighbor voxel in that direction is
//! not opaque. Neighbor lookups at chunk boundaries go through the owning
//! world's [`BlockQuery`], so the rule holds across chunk seams without
//! reading neighbor chunk arrays directly.
//!
//! ## Ambient Occlusion
//! Each quad corner probes the two face-adjacent side voxels and the
//! diagonal corner voxel next to it. The occlusion level is
//! `3 - (side1 + side2 + corner)`, forced to 0 when both sides are solid so
//! light never leaks through a closed corner. The level indexes a fixed
//! brightness table baked into the vertex tint.
//!
//! ## Buckets
//! Opaque cube faces and alpha-tested geometry (leaves, cross plants) go to
//! disjoint buffers because they need different render passes. Cross blocks
//! emit two intersecting vertical quads, each duplicated back-to-back so
//! both sides render without disabling backface culling.

use cgmath::Vector3;

use crate::voxels::block::{BlockSide, BlockType, RenderKind};
use crate::voxels::mesh::{ChunkMesh, MeshBuffer};
use crate::voxels::BlockQuery;

use super::Chunk;

/// Brightness applied per ambient-occlusion level, darkest to brightest.
pub const AO_BRIGHTNESS: [f32; 4] = [0.35, 0.6, 0.8, 1.0];

/// Number of tile columns in the texture atlas row.
pub const ATLAS_COLUMNS: usize = 13;

/// Normalized atlas rectangle of a tile: `(u0, v0, u1, v1)`.
fn tile_uv(tile: usize) -> (f32, f32, f32, f32) {
    let width = 1.0 / ATLAS_COLUMNS as f32;
    let u0 = tile as f32 * width;
    (u0, 0.0, u0 + width, 1.0)
}

/// The two vertical quads of a cross-shaped plant, as corner offsets from
/// the voxel's minimum corner. Each runs along one diagonal of the cell.
const CROSS_PLANES: [[[f32; 3]; 4]; 2] = [
    [
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 1.0],
        [1.0, 1.0, 1.0],
        [0.0, 1.0, 0.0],
    ],
    [
        [1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0],
        [0.0, 1.0, 1.0],
        [1.0, 1.0, 0.0],
    ],
];

/// Builds the render geometry for one chunk from its current block data.
///
/// # Arguments
/// * `chunk` - The chunk to mesh
/// * `world` - World-space block access for cross-chunk neighbor lookups
///
/// # Returns
/// A [`ChunkMesh`] with chunk-local vertex positions and the chunk's
/// world-space origin as placement offset. Buckets that received no quads
/// are omitted.
pub fn build_chunk_mesh(chunk: &Chunk, world: &impl BlockQuery) -> ChunkMesh {
    let extent = chunk.extent();
    let size = extent.size as i32;
    let height = extent.height as i32;
    let base_x = chunk.coord.x * size;
    let base_z = chunk.coord.z * size;

    let mut opaque = MeshBuffer::new();
    let mut cutout = MeshBuffer::new();

    for x in 0..size {
        for y in 0..height {
            for z in 0..size {
                let block = chunk.block_local(x, y, z);
                let kind = block.render_kind();
                if kind == RenderKind::Invisible {
                    continue;
                }
                let world_pos = Vector3::new(base_x + x, y, base_z + z);
                let local = [x as f32, y as f32, z as f32];
                match kind {
                    RenderKind::Cross => emit_cross(&mut cutout, block, local),
                    RenderKind::Cube => {
                        emit_cube_faces(&mut opaque, world, block, world_pos, local)
                    }
                    RenderKind::CutoutCube => {
                        emit_cube_faces(&mut cutout, world, block, world_pos, local)
                    }
                    RenderKind::Invisible => unreachable!(),
                }
            }
        }
    }

    ChunkMesh {
        opaque: opaque.into_non_empty(),
        cutout: cutout.into_non_empty(),
        origin: chunk.coord.origin(extent.size),
    }
}

/// Emits all non-occluded faces of one cube voxel.
fn emit_cube_faces(
    buffer: &mut MeshBuffer,
    world: &impl BlockQuery,
    block: BlockType,
    world_pos: Vector3<i32>,
    local: [f32; 3],
) {
    for side in BlockSide::all() {
        let neighbor_pos = world_pos + side.dir();
        let neighbor = world.block_at(neighbor_pos.x, neighbor_pos.y, neighbor_pos.z);
        if neighbor.is_opaque() {
            continue;
        }

        let (u0, v0, u1, v1) = tile_uv(block.tile_index(side));
        let uv_order = [[u0, v0], [u1, v0], [u1, v1], [u0, v1]];
        let template = side.corners();

        let mut corners = [[0.0f32; 3]; 4];
        let mut tints = [[0.0f32; 3]; 4];
        for (i, corner) in template.iter().enumerate() {
            corners[i] = [
                local[0] + corner[0],
                local[1] + corner[1],
                local[2] + corner[2],
            ];
            let brightness = AO_BRIGHTNESS[corner_occlusion(world, side, neighbor_pos, corner)];
            tints[i] = [brightness, brightness, brightness];
        }

        let normal = side.normal();
        buffer.push_quad(corners, [normal.x, normal.y, normal.z], uv_order, tints);
    }
}

/// Ambient-occlusion level (0..=3) for one corner of a face quad.
///
/// Probes the two side voxels and the diagonal corner voxel in the face
/// plane, one step outward from the face. Both sides solid forces level 0
/// regardless of the corner voxel.
fn corner_occlusion(
    world: &impl BlockQuery,
    side: BlockSide,
    face_pos: Vector3<i32>,
    corner: &[f32; 3],
) -> usize {
    let u_sign = if corner[side.u_component()] == 1.0 { 1 } else { -1 };
    let v_sign = if corner[side.v_component()] == 1.0 { 1 } else { -1 };
    let u_step = side.u_axis() * u_sign;
    let v_step = side.v_axis() * v_sign;

    let probe = |offset: Vector3<i32>| {
        let p = face_pos + offset;
        usize::from(world.block_at(p.x, p.y, p.z).is_solid())
    };
    let side1 = probe(u_step);
    let side2 = probe(v_step);
    let corner_solid = probe(u_step + v_step);

    if side1 == 1 && side2 == 1 {
        0
    } else {
        3 - (side1 + side2 + corner_solid)
    }
}

/// Emits the four quads of a cross-shaped plant (two planes, each
/// duplicated with reversed winding).
fn emit_cross(buffer: &mut MeshBuffer, block: BlockType, local: [f32; 3]) {
    let (u0, v0, u1, v1) = tile_uv(block.tile_index(BlockSide::FRONT));
    let uv_order = [[u0, v1], [u1, v1], [u1, v0], [u0, v0]];
    let normal = [0.0, 1.0, 0.0];
    let white = [[1.0, 1.0, 1.0]; 4];

    for plane in CROSS_PLANES {
        let mut corners = [[0.0f32; 3]; 4];
        for (i, corner) in plane.iter().enumerate() {
            corners[i] = [
                local[0] + corner[0],
                local[1] + corner[1],
                local[2] + corner[2],
            ];
        }
        buffer.push_quad(corners, normal, uv_order, white);

        // Back side: same quad, reversed winding and mirrored UVs.
        let flipped = [corners[3], corners[2], corners[1], corners[0]];
        let flipped_uvs = [uv_order[3], uv_order[2], uv_order[1], uv_order[0]];
        buffer.push_quad(flipped, normal, flipped_uvs, white);
    }
}
