//! # World Module
//!
//! This module provides the `World` struct which owns the set of loaded
//! chunks and coordinates streaming around a moving observer. It serves as
//! the single entry and exit point for block reads and writes.
//!
//! ## Streaming
//!
//! Each call to [`World::update_streaming`] unloads chunks beyond the unload
//! radius, creates missing chunks within the load radius in expanding ring
//! order (nearest first), and drains a bounded number of dirty chunks
//! through the mesh builder. The unload radius exceeds the load radius so an
//! observer oscillating at a boundary never thrashes load/unload cycles.
//!
//! ## Deferred decoration writes
//!
//! Tree canopies can spill past the chunk being decorated. Writes that land
//! in a loaded chunk apply immediately and queue that chunk for remeshing;
//! writes into unloaded space are buffered per target chunk and flushed when
//! that chunk is created.

use std::collections::{HashMap, VecDeque};

use cgmath::Point3;
use log::{debug, trace};

use crate::config::EngineConfig;
use crate::generation::biome::BiomeClassifier;
use crate::generation::noise_field::NoiseField;
use crate::generation::terrain::TerrainPipeline;
use crate::generation::vegetation::{decorate_chunk, BlockSink};
use crate::voxels::block::BlockType;
use crate::voxels::chunk::mesher::build_chunk_mesh;
use crate::voxels::chunk::{Chunk, ChunkCoord, ChunkExtent};
use crate::voxels::mesh::ChunkMesh;
use crate::voxels::BlockQuery;

/// A decoration write buffered until its target chunk exists.
type PendingWrite = (i32, i32, i32, BlockType);

/// Collects decoration writes so they can be routed through the world after
/// the generation borrow ends.
#[derive(Default)]
struct WriteBuffer {
    writes: Vec<PendingWrite>,
}

impl BlockSink for WriteBuffer {
    fn place_block(&mut self, x: i32, y: i32, z: i32, block: BlockType) {
        self.writes.push((x, y, z, block));
    }
}

/// The voxel world: loaded chunks, the generation pipeline that fills them,
/// and the streaming state machine that decides which chunks exist.
pub struct World {
    config: EngineConfig,
    extent: ChunkExtent,
    terrain: TerrainPipeline,
    biomes: BiomeClassifier,
    chunks: HashMap<ChunkCoord, Chunk>,
    build_queue: VecDeque<ChunkCoord>,
    pending_writes: HashMap<ChunkCoord, Vec<PendingWrite>>,
}

impl World {
    /// Creates an empty world whose generation derives from the configured
    /// seed. No chunks are loaded until the first streaming tick.
    pub fn new(config: EngineConfig) -> Self {
        let extent = ChunkExtent {
            size: config.world.chunk_size,
            height: config.world.chunk_height,
        };
        let terrain = TerrainPipeline::new(
            NoiseField::new(&config.world.seed),
            config.terrain.clone(),
        );
        let biomes = BiomeClassifier::new(config.biomes.clone(), config.vegetation.clone());
        World {
            config,
            extent,
            terrain,
            biomes,
            chunks: HashMap::new(),
            build_queue: VecDeque::new(),
            pending_writes: HashMap::new(),
        }
    }

    /// The terrain pipeline this world generates from.
    pub fn terrain(&self) -> &TerrainPipeline {
        &self.terrain
    }

    /// The biome classifier this world generates from.
    pub fn biomes(&self) -> &BiomeClassifier {
        &self.biomes
    }

    /// The block grid dimensions shared by every chunk.
    pub fn extent(&self) -> ChunkExtent {
        self.extent
    }

    /// The configuration this world was created with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Number of currently loaded chunks.
    pub fn loaded_chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Number of chunks waiting for a mesh rebuild.
    pub fn queued_chunk_count(&self) -> usize {
        self.build_queue.len()
    }

    /// Coordinates of all loaded chunks, in arbitrary order.
    pub fn loaded_coords(&self) -> Vec<ChunkCoord> {
        self.chunks.keys().copied().collect()
    }

    /// The built mesh of a loaded chunk, if it has one.
    pub fn chunk_mesh(&self, coord: ChunkCoord) -> Option<&ChunkMesh> {
        self.chunks.get(&coord).and_then(Chunk::mesh)
    }

    /// Advances streaming by one tick around the observer position.
    ///
    /// Must be called exactly once per simulation tick. Unloads far chunks,
    /// ensures near chunks exist (nearest rings first), and rebuilds at most
    /// `mesh_budget_per_tick` queued chunk meshes.
    pub fn update_streaming(&mut self, observer: Point3<f32>) {
        let center = ChunkCoord::containing(
            observer.x.floor() as i32,
            observer.z.floor() as i32,
            self.extent.size,
        );

        let unload_radius = self.config.world.unload_radius;
        let before = self.chunks.len();
        self.chunks
            .retain(|coord, _| coord.chebyshev_distance(center) <= unload_radius);
        let unloaded = before - self.chunks.len();
        if unloaded > 0 {
            debug!("unloaded {unloaded} chunks beyond radius {unload_radius}");
        }
        // Buffered decoration writes follow the same retention rule as the
        // chunks themselves; a revisit regenerates them deterministically.
        self.pending_writes
            .retain(|coord, _| coord.chebyshev_distance(center) <= unload_radius);

        for radius in 0..=self.config.world.load_radius {
            for coord in ring_coords(center, radius) {
                self.ensure_chunk(coord);
                let chunk = &self.chunks[&coord];
                if chunk.is_dirty && !chunk.has_mesh() {
                    self.queue_for_remesh(coord);
                }
            }
        }

        let mut builds = 0;
        while builds < self.config.world.mesh_budget_per_tick {
            let Some(coord) = self.build_queue.pop_front() else {
                break;
            };
            // Stale entries: the chunk may have been unloaded or already
            // remeshed since it was queued.
            let needs_build = self.chunks.get(&coord).is_some_and(|c| c.is_dirty);
            if !needs_build {
                continue;
            }
            self.remesh_now(coord);
            builds += 1;
        }
        trace!(
            "streaming tick: {} loaded, {} queued",
            self.chunks.len(),
            self.build_queue.len()
        );
    }

    /// Reads the block at a world coordinate.
    ///
    /// # Returns
    /// The stored block, or [`BlockType::Air`] when the coordinate is
    /// vertically out of bounds or its chunk is not loaded.
    pub fn get_block(&self, x: i32, y: i32, z: i32) -> BlockType {
        let coord = ChunkCoord::containing(x, z, self.extent.size);
        let Some(chunk) = self.chunks.get(&coord) else {
            return BlockType::Air;
        };
        let size = self.extent.size as i32;
        chunk.block_local(x - coord.x * size, y, z - coord.z * size)
    }

    /// Writes the block at a world coordinate and synchronously remeshes the
    /// owning chunk, so interactive edits are visually instantaneous.
    ///
    /// No-op when the coordinate is out of bounds or its chunk is unloaded.
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, block: BlockType) {
        if y < 0 || y >= self.extent.height as i32 {
            return;
        }
        let coord = ChunkCoord::containing(x, z, self.extent.size);
        let size = self.extent.size as i32;
        let Some(chunk) = self.chunks.get_mut(&coord) else {
            return;
        };
        chunk.set_block_local(x - coord.x * size, y, z - coord.z * size, block);
        self.remesh_now(coord);
    }

    /// Creates, populates, and decorates the chunk at `coord` if missing.
    fn ensure_chunk(&mut self, coord: ChunkCoord) {
        if self.chunks.contains_key(&coord) {
            return;
        }
        let mut chunk = Chunk::generate(coord, self.extent, &self.terrain, &self.biomes);

        // Writes from neighbors decorated earlier land before first meshing.
        if let Some(pending) = self.pending_writes.remove(&coord) {
            let size = self.extent.size as i32;
            for (x, y, z, block) in pending {
                chunk.set_block_local(x - coord.x * size, y, z - coord.z * size, block);
            }
        }
        self.chunks.insert(coord, chunk);

        let mut sink = WriteBuffer::default();
        decorate_chunk(
            coord,
            self.extent,
            &self.terrain,
            &self.biomes,
            &self.config.vegetation,
            &self.config.world.seed,
            &mut sink,
        );
        for (x, y, z, block) in sink.writes {
            self.place_deferred(x, y, z, block);
        }
        self.queue_for_remesh(coord);
        trace!("created chunk ({}, {})", coord.x, coord.z);
    }

    /// Routes a decoration write to its owning chunk: applied and queued for
    /// remesh when loaded, buffered until creation otherwise.
    fn place_deferred(&mut self, x: i32, y: i32, z: i32, block: BlockType) {
        if y < 0 || y >= self.extent.height as i32 {
            return;
        }
        let coord = ChunkCoord::containing(x, z, self.extent.size);
        let size = self.extent.size as i32;
        if let Some(chunk) = self.chunks.get_mut(&coord) {
            chunk.set_block_local(x - coord.x * size, y, z - coord.z * size, block);
            self.queue_for_remesh(coord);
        } else {
            // Re-decorating a revisited chunk replays the same writes; keep
            // the buffer free of duplicates.
            let entry = self.pending_writes.entry(coord).or_default();
            if !entry.contains(&(x, y, z, block)) {
                entry.push((x, y, z, block));
            }
        }
    }

    /// Queues a chunk for a budgeted mesh rebuild, without duplicates.
    fn queue_for_remesh(&mut self, coord: ChunkCoord) {
        if !self.build_queue.contains(&coord) {
            self.build_queue.push_back(coord);
        }
    }

    /// Rebuilds one chunk's mesh immediately from its current block data.
    fn remesh_now(&mut self, coord: ChunkCoord) {
        let mesh = {
            let Some(chunk) = self.chunks.get(&coord) else {
                return;
            };
            build_chunk_mesh(chunk, self)
        };
        if let Some(chunk) = self.chunks.get_mut(&coord) {
            chunk.set_mesh(mesh);
        }
    }
}

impl BlockQuery for World {
    fn block_at(&self, x: i32, y: i32, z: i32) -> BlockType {
        self.get_block(x, y, z)
    }
}

/// The chunk coordinates at exactly Chebyshev distance `radius` from
/// `center`; just the center itself for radius 0.
fn ring_coords(center: ChunkCoord, radius: i32) -> Vec<ChunkCoord> {
    if radius == 0 {
        return vec![center];
    }
    let mut coords = Vec::with_capacity((radius as usize) * 8);
    for dx in -radius..=radius {
        coords.push(ChunkCoord {
            x: center.x + dx,
            z: center.z - radius,
        });
        coords.push(ChunkCoord {
            x: center.x + dx,
            z: center.z + radius,
        });
    }
    for dz in (-radius + 1)..radius {
        coords.push(ChunkCoord {
            x: center.x - radius,
            z: center.z + dz,
        });
        coords.push(ChunkCoord {
            x: center.x + radius,
            z: center.z + dz,
        });
    }
    coords
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> World {
        World::new(EngineConfig::default())
    }

    fn drain(world: &mut World, observer: Point3<f32>) {
        // Enough ticks for the mesh budget to clear the whole queue.
        for _ in 0..512 {
            world.update_streaming(observer);
            if world.queued_chunk_count() == 0 {
                break;
            }
        }
    }

    #[test]
    fn ring_order_visits_near_chunks_first() {
        let center = ChunkCoord { x: 0, z: 0 };
        assert_eq!(ring_coords(center, 0), vec![center]);
        let ring1 = ring_coords(center, 1);
        assert_eq!(ring1.len(), 8);
        for coord in ring1 {
            assert_eq!(coord.chebyshev_distance(center), 1);
        }
        let ring3 = ring_coords(center, 3);
        assert_eq!(ring3.len(), 24);
    }

    #[test]
    fn streaming_loads_the_full_neighborhood() {
        let mut world = world();
        drain(&mut world, Point3::new(0.0, 32.0, 0.0));
        let load_radius = world.config().world.load_radius;
        let expected = ((2 * load_radius + 1) * (2 * load_radius + 1)) as usize;
        assert!(world.loaded_chunk_count() >= expected);
        // Every chunk inside the load radius is meshed once the queue drains.
        for radius in 0..=load_radius {
            for coord in ring_coords(ChunkCoord { x: 0, z: 0 }, radius) {
                assert!(
                    world.chunk_mesh(coord).is_some(),
                    "chunk ({}, {}) missing mesh",
                    coord.x,
                    coord.z
                );
            }
        }
    }

    #[test]
    fn surface_block_matches_biome_at_origin() {
        let mut world = world();
        drain(&mut world, Point3::new(0.0, 32.0, 0.0));
        let height = world.terrain().terrain_height(0.0, 0.0);
        let biome = world.biomes().classify(height);
        let expected = world.biomes().surface_block(biome);
        let surface = world.get_block(0, height.floor() as i32, 0);
        assert_eq!(surface, expected);
        assert_ne!(surface, BlockType::Air);
        assert_ne!(surface, BlockType::Stone);
    }

    #[test]
    fn streaming_hysteresis_keeps_boundary_chunks() {
        let mut world = world();
        let size = world.extent().size as f32;
        drain(&mut world, Point3::new(0.0, 32.0, 0.0));

        // Stepping one chunk east creates (5, 0), at distance 5 from the
        // origin chunk. Stepping back leaves it between the load radius (4)
        // and the unload radius (6), inside the hysteresis band.
        drain(&mut world, Point3::new(size, 32.0, 0.0));
        let far = ChunkCoord { x: 5, z: 0 };
        assert!(world.chunks.contains_key(&far));

        drain(&mut world, Point3::new(0.0, 32.0, 0.0));
        assert!(world.chunks.contains_key(&far), "hysteresis band chunk unloaded");
    }

    #[test]
    fn far_chunks_unload() {
        let mut world = world();
        drain(&mut world, Point3::new(0.0, 32.0, 0.0));
        assert!(world.chunks.contains_key(&ChunkCoord { x: 0, z: 0 }));
        let size = world.extent().size as f32;
        drain(&mut world, Point3::new(100.0 * size, 32.0, 0.0));
        assert!(!world.chunks.contains_key(&ChunkCoord { x: 0, z: 0 }));
    }

    #[test]
    fn set_block_remeshes_synchronously() {
        let mut world = world();
        drain(&mut world, Point3::new(0.0, 32.0, 0.0));
        let coord = ChunkCoord { x: 0, z: 0 };
        let vertices_before = world.chunk_mesh(coord).map(ChunkMesh::vertex_count);

        // A floating block high above the terrain adds visible faces.
        world.set_block(4, 60, 4, BlockType::Stone);
        assert_eq!(world.get_block(4, 60, 4), BlockType::Stone);
        let vertices_after = world.chunk_mesh(coord).map(ChunkMesh::vertex_count);
        assert!(vertices_after > vertices_before);
    }

    #[test]
    fn writes_outside_loaded_chunks_are_ignored() {
        let mut world = world();
        world.set_block(10_000, 10, 10_000, BlockType::Stone);
        assert_eq!(world.get_block(10_000, 10, 10_000), BlockType::Air);
        assert_eq!(world.get_block(0, -1, 0), BlockType::Air);
        assert_eq!(world.get_block(0, 64, 0), BlockType::Air);
    }

    #[test]
    fn pending_write_buffer_stays_bounded() {
        let mut world = world();
        let home = Point3::new(0.0, 32.0, 0.0);
        drain(&mut world, home);
        let baseline: usize = world.pending_writes.values().map(Vec::len).sum();

        // Round trips between the origin and a far position regenerate the
        // same decoration spill each visit.
        let away = Point3::new(3200.0, 32.0, 0.0);
        for _ in 0..4 {
            drain(&mut world, away);
            drain(&mut world, home);
        }
        let after: usize = world.pending_writes.values().map(Vec::len).sum();
        assert_eq!(after, baseline);

        // Nothing buffered survives outside the retention radius.
        let center = ChunkCoord { x: 0, z: 0 };
        let unload_radius = world.config().world.unload_radius;
        for coord in world.pending_writes.keys() {
            assert!(coord.chebyshev_distance(center) <= unload_radius);
        }
    }

    #[test]
    fn deferred_writes_flush_at_chunk_creation() {
        let mut world = world();
        // Buffer a write into a chunk that does not exist yet; deep rock so
        // decoration of the new chunk can never touch the same voxel.
        world.place_deferred(200, 2, 200, BlockType::Log);
        assert_eq!(world.get_block(200, 2, 200), BlockType::Air);

        drain(&mut world, Point3::new(200.0, 32.0, 200.0));
        assert_eq!(world.get_block(200, 2, 200), BlockType::Log);
    }
}
