//! # Headless Simulation Entry Point
//!
//! Runs the engine core without a renderer: streams chunks around a moving
//! actor, integrates its physics, and aims a ray at whatever is in front of
//! it, logging progress along the way. Useful for profiling generation and
//! for exercising the whole stack from the command line.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release [config.json]
//! ```

use std::path::Path;
use std::process::ExitCode;

use cgmath::{EuclideanSpace, Point3, Vector3};
use log::{error, info};

use voxel_world::config::EngineConfig;
use voxel_world::physics::{ActorState, CollisionIntegrator, MoveInput};
use voxel_world::raycast;
use voxel_world::voxels::world::World;

/// Simulated ticks to run.
const TICKS: u32 = 600;
/// Fixed tick length in seconds.
const TICK_DT: f32 = 1.0 / 60.0;

fn main() -> ExitCode {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => match EngineConfig::from_file(Path::new(&path)) {
            Ok(config) => config,
            Err(err) => {
                error!("failed to load {path}: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => EngineConfig::default(),
    };

    let physics = CollisionIntegrator::new(config.physics.clone(), config.world.chunk_height);
    let eye_height = config.physics.eye_height;
    let mut world = World::new(config);

    // Drop the actor a little above the terrain at the origin.
    let spawn_height = world.terrain().terrain_height(0.0, 0.0) as f32 + 3.0;
    let mut actor = ActorState::at(Point3::new(0.5, spawn_height, 0.5));
    info!("spawning at {:?}", actor.position);

    let input = MoveInput {
        wish_dir: Vector3::new(0.0, 0.0, 1.0),
        ..MoveInput::default()
    };
    for tick in 0..TICKS {
        world.update_streaming(actor.position);
        actor = physics.step(actor, input, TICK_DT, &world);

        if tick % 120 == 0 {
            let aim = raycast::cast_from_eyes(
                actor.position,
                eye_height,
                Vector3::new(0.0, -0.3, 1.0),
                8.0,
                &world,
            );
            match aim {
                Some(hit) => info!(
                    "tick {tick}: {} loaded chunks, aiming at {:?} ({:?})",
                    world.loaded_chunk_count(),
                    hit.voxel,
                    hit.block
                ),
                None => info!(
                    "tick {tick}: {} loaded chunks, aiming at nothing",
                    world.loaded_chunk_count()
                ),
            }
        }
    }

    let total_vertices: usize = world
        .loaded_coords()
        .iter()
        .filter_map(|coord| world.chunk_mesh(*coord))
        .map(|mesh| mesh.vertex_count())
        .sum();
    info!(
        "finished at {:?}: {} chunks loaded, {} mesh vertices",
        actor.position.to_vec(),
        world.loaded_chunk_count(),
        total_vertices
    );
    ExitCode::SUCCESS
}
