//! # Vegetation Module
//!
//! Chunk decoration: tree structures and short plants placed once at chunk
//! creation. All randomness comes from a generator seeded from the world
//! seed and the chunk coordinate, so decorating the same chunk of the same
//! world always produces the same writes regardless of load order.
//!
//! Decoration writes go through a [`BlockSink`] rather than into the chunk
//! directly, because canopies can spill across chunk borders; the sink
//! decides whether to apply such writes immediately or defer them until
//! the neighbor chunk exists.

use fastrand::Rng;

use crate::config::VegetationConfig;
use crate::generation::biome::BiomeClassifier;
use crate::generation::noise_field::hash_seed;
use crate::generation::terrain::TerrainPipeline;
use crate::voxels::block::BlockType;
use crate::voxels::chunk::{ChunkCoord, ChunkExtent};

/// Write access for decoration output.
///
/// Coordinates are world-space; implementations must accept writes outside
/// the chunk currently being decorated.
pub trait BlockSink {
    /// Places a block at a world-space voxel coordinate.
    fn place_block(&mut self, x: i32, y: i32, z: i32, block: BlockType);
}

/// Decorates one chunk with biome-appropriate vegetation.
///
/// Short plants are sprinkled first, then trees; trunks overwrite any plant
/// occupying their column. A tree candidate is rejected when its column has
/// no resolvable surface or when any of the four cardinal neighbor columns'
/// surface differs by more than the configured slope limit.
pub fn decorate_chunk(
    coord: ChunkCoord,
    extent: ChunkExtent,
    terrain: &TerrainPipeline,
    biomes: &BiomeClassifier,
    vegetation: &VegetationConfig,
    seed: &str,
    sink: &mut impl BlockSink,
) {
    let mut rng = Rng::with_seed(decoration_seed(seed, coord));
    let size = extent.size as i32;
    let height = extent.height as i32;
    let base_x = coord.x * size;
    let base_z = coord.z * size;

    sprinkle_short_plants(
        &mut rng, extent, base_x, base_z, terrain, biomes, sink,
    );

    // Chunk-level tree budget from the biome at the chunk center.
    let center_height = terrain.terrain_height(
        f64::from(base_x + size / 2),
        f64::from(base_z + size / 2),
    );
    let chunk_biome = biomes.classify(center_height);
    let (min_trees, max_trees) = biomes.tree_count_range(chunk_biome);
    // Trees keep one column of margin, so chunks narrower than three
    // columns have nowhere to put one.
    if max_trees == 0 || size < 3 {
        return;
    }
    let count = rng.u32(min_trees..=max_trees);

    for _ in 0..count {
        let lx = rng.i32(1..size - 1);
        let lz = rng.i32(1..size - 1);
        let world_x = base_x + lx;
        let world_z = base_z + lz;

        let Some(surface) = terrain.surface_y(world_x, world_z, height) else {
            continue;
        };
        if exceeds_slope_limit(
            terrain,
            world_x,
            world_z,
            surface,
            height,
            vegetation.slope_limit,
        ) {
            continue;
        }

        let column_height = terrain.terrain_height(f64::from(world_x), f64::from(world_z));
        let column_biome = biomes.classify(column_height);
        let Some(species) = biomes.tree_species(column_biome) else {
            continue;
        };
        let (trunk_min, trunk_max) = biomes.trunk_height_range(column_biome);
        let trunk_height = rng.i32(trunk_min..=trunk_max);

        place_tree(
            &mut rng,
            world_x,
            surface + 1,
            world_z,
            trunk_height,
            species.trunk,
            species.canopy,
            sink,
        );
    }
}

/// Stable per-chunk decoration seed derived from the world seed.
fn decoration_seed(seed: &str, coord: ChunkCoord) -> u64 {
    let base = u64::from(hash_seed(seed));
    let cx = coord.x as u64;
    let cz = coord.z as u64;
    base ^ cx.wrapping_mul(0x9e37_79b9_7f4a_7c15) ^ cz.wrapping_mul(0xc2b2_ae3d_27d4_eb4f)
}

/// Whether any cardinal neighbor column's surface deviates past the limit.
fn exceeds_slope_limit(
    terrain: &TerrainPipeline,
    x: i32,
    z: i32,
    surface: i32,
    max_y: i32,
    limit: i32,
) -> bool {
    [(1, 0), (-1, 0), (0, 1), (0, -1)].into_iter().any(|(dx, dz)| {
        match terrain.surface_y(x + dx, z + dz, max_y) {
            Some(neighbor) => (neighbor - surface).abs() > limit,
            None => true,
        }
    })
}

/// Sprinkles cross-quad plants on temperate grass columns.
fn sprinkle_short_plants(
    rng: &mut Rng,
    extent: ChunkExtent,
    base_x: i32,
    base_z: i32,
    terrain: &TerrainPipeline,
    biomes: &BiomeClassifier,
    sink: &mut impl BlockSink,
) {
    let size = extent.size as i32;
    let height = extent.height as i32;
    for lx in 0..size {
        for lz in 0..size {
            let world_x = base_x + lx;
            let world_z = base_z + lz;
            let column_height =
                terrain.terrain_height(f64::from(world_x), f64::from(world_z));
            let biome = biomes.classify(column_height);
            let chance = biomes.short_plant_chance(biome);
            // The roll is unconditional so the random sequence does not
            // depend on biome layout within the chunk.
            let roll = rng.f32();
            if chance <= 0.0 || roll >= chance {
                continue;
            }
            if biomes.surface_block(biome) != BlockType::Grass {
                continue;
            }
            if let Some(surface) = terrain.surface_y(world_x, world_z, height) {
                sink.place_block(world_x, surface + 1, world_z, BlockType::ShortGrass);
            }
        }
    }
}

/// Writes one tree: a vertical trunk capped by a layered canopy with a
/// random top extension.
#[allow(clippy::too_many_arguments)]
fn place_tree(
    rng: &mut Rng,
    x: i32,
    y: i32,
    z: i32,
    trunk_height: i32,
    trunk: BlockType,
    canopy: BlockType,
    sink: &mut impl BlockSink,
) {
    for dy in 0..trunk_height {
        sink.place_block(x, y + dy, z, trunk);
    }

    let radius = rng.i32(2..=3);
    let cap = rng.i32(1..=2);
    let canopy_y = y + trunk_height - 1;
    for dy in -1..=cap {
        let r = radius - dy.abs();
        if r < 0 {
            continue;
        }
        for dx in -r..=r {
            for dz in -r..=r {
                if dx * dx + dz * dz > r * r + 1 {
                    continue;
                }
                // Keep the trunk visible through the lower canopy layers.
                if dx == 0 && dz == 0 && dy <= 0 {
                    continue;
                }
                sink.place_block(x + dx, canopy_y + dy, z + dz, canopy);
            }
        }
    }
}
