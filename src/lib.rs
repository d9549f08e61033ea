#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel World
//!
//! A real-time, chunk-based voxel world engine: procedural terrain
//! generation, mutable block storage, surface-geometry meshing with ambient
//! occlusion, streaming around a moving observer, block-level interaction,
//! and physical movement through the voxel volume.
//!
//! The crate is the simulation core only. Rendering backends consume the
//! [`ChunkMesh`](voxels::mesh::ChunkMesh) buffers it produces; input capture
//! and UI live with the caller.
//!
//! ## Key Modules
//!
//! * `config` - Engine configuration, loadable from JSON
//! * `generation` - Seeded noise, terrain fields, biomes, and vegetation
//! * `voxels` - Block model, chunks, meshing, and the streaming world
//! * `raycast` - Grid-traversal picking against the block grid
//! * `physics` - Axis-separated AABB collision and actor movement
//!
//! ## Usage
//!
//! ```no_run
//! use cgmath::Point3;
//! use voxel_world::config::EngineConfig;
//! use voxel_world::voxels::world::World;
//!
//! let mut world = World::new(EngineConfig::default());
//! // Call once per simulation tick.
//! world.update_streaming(Point3::new(0.0, 32.0, 0.0));
//! ```
//!
//! ## Determinism
//!
//! All generation derives from the configured seed string. The same seed
//! produces bit-identical terrain, biomes, and vegetation across runs;
//! there is no ambient random state.

pub mod config;
pub mod generation;
pub mod physics;
pub mod raycast;
pub mod voxels;

pub use config::EngineConfig;
pub use physics::{ActorState, CollisionIntegrator, MoveInput};
pub use raycast::RaycastHit;
pub use voxels::block::BlockType;
pub use voxels::world::World;
pub use voxels::BlockQuery;
