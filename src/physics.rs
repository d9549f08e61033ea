//! # Physics Module
//!
//! Actor movement through the voxel volume: input acceleration, gravity,
//! jumping, exponential damping, and axis-separated AABB collision against
//! solid blocks.
//!
//! ## Collision model
//! Each step moves the actor's box along X, then Z, then Y independently.
//! If the box overlaps any solid voxel after moving on an axis, that axis'
//! movement is reverted and its velocity zeroed. A reverted downward Y move
//! sets the grounded flag; a reverted upward move is a head bump. Per-axis
//! resolution is an approximation rather than a swept solve, but it cannot
//! tunnel through single-voxel walls at the speeds the movement constants
//! allow.

use cgmath::{InnerSpace, Point3, Vector3, Zero};

use crate::config::PhysicsConfig;
use crate::voxels::BlockQuery;

/// Mutable state of a physically simulated actor.
///
/// The position is the center of the actor's feet; the bounding box extends
/// half the configured width and depth horizontally and the full height up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorState {
    /// Feet-center position in world space.
    pub position: Point3<f32>,
    /// Velocity in blocks per second.
    pub velocity: Vector3<f32>,
    /// Whether the actor ended the last step standing on solid ground.
    pub on_ground: bool,
}

impl ActorState {
    /// Creates a resting actor at the given feet position.
    pub fn at(position: Point3<f32>) -> Self {
        ActorState {
            position,
            velocity: Vector3::zero(),
            on_ground: false,
        }
    }
}

/// Movement intent for one physics step.
#[derive(Debug, Clone, Copy)]
pub struct MoveInput {
    /// Desired horizontal movement direction; zero means no input. Need not
    /// be normalized.
    pub wish_dir: Vector3<f32>,
    /// Whether a jump is requested this step.
    pub jump: bool,
    /// Whether sprint is held, scaling horizontal acceleration.
    pub sprint: bool,
}

impl Default for MoveInput {
    fn default() -> Self {
        MoveInput {
            wish_dir: Vector3::zero(),
            jump: false,
            sprint: false,
        }
    }
}

/// Integrates actor motion against the voxel world.
pub struct CollisionIntegrator {
    config: PhysicsConfig,
    /// Vertical world extent `H` in blocks; everything above it reads as
    /// air, so ascent past it is clamped rather than collided.
    world_height: f32,
}

impl CollisionIntegrator {
    /// Creates an integrator with the given movement constants, bounded
    /// vertically by the world's chunk height.
    pub fn new(config: PhysicsConfig, world_height: usize) -> Self {
        CollisionIntegrator {
            config,
            world_height: world_height as f32,
        }
    }

    /// The movement constants in use.
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Advances one actor by one physics step.
    ///
    /// The time delta is clamped to `max_step_dt` so a frame hitch cannot
    /// integrate a step long enough to tunnel.
    ///
    /// # Arguments
    /// * `state` - The actor state produced by the previous step
    /// * `input` - Movement intent for this step
    /// * `dt` - Elapsed seconds since the previous step
    /// * `world` - Solidity queries for every voxel the box may touch
    ///
    /// # Returns
    /// The actor state after integration and collision resolution.
    pub fn step(
        &self,
        state: ActorState,
        input: MoveInput,
        dt: f32,
        world: &impl BlockQuery,
    ) -> ActorState {
        let cfg = &self.config;
        let dt = dt.min(cfg.max_step_dt);
        let mut velocity = state.velocity;
        let mut position = state.position;

        let mut wish = Vector3::new(input.wish_dir.x, 0.0, input.wish_dir.z);
        if wish.magnitude2() > 0.0 {
            wish = wish.normalize();
            let accel = if input.sprint {
                cfg.speed * cfg.sprint_multiplier
            } else {
                cfg.speed
            };
            velocity.x += wish.x * accel * dt;
            velocity.z += wish.z * accel * dt;
        }

        if input.jump && state.on_ground {
            velocity.y = cfg.jump_speed;
        }
        velocity.y -= cfg.gravity * dt;

        let damping = (-cfg.damping * dt).exp();
        velocity.x *= damping;
        velocity.z *= damping;

        let mut on_ground = false;

        // X axis.
        position.x += velocity.x * dt;
        if self.intersects_solid(position, world) {
            position.x = state.position.x;
            velocity.x = 0.0;
        }

        // Z axis.
        position.z += velocity.z * dt;
        if self.intersects_solid(position, world) {
            position.z = state.position.z;
            velocity.z = 0.0;
        }

        // Y axis; a reverted fall grounds the actor, a reverted rise is a
        // head bump.
        let falling = velocity.y < 0.0;
        let y_before = position.y;
        position.y += velocity.y * dt;
        if self.intersects_solid(position, world) {
            position.y = y_before;
            velocity.y = 0.0;
            if falling {
                on_ground = true;
            }
        }

        // No blocks exist above the world, so the ceiling is enforced by
        // clamping rather than collision.
        let ceiling = self.world_height - cfg.height - 0.001;
        if position.y > ceiling {
            position.y = ceiling;
            velocity.y = velocity.y.min(0.0);
        }

        ActorState {
            position,
            velocity,
            on_ground,
        }
    }

    /// Whether the actor's AABB at `position` overlaps any solid voxel.
    ///
    /// Scans every voxel cell the box touches; the cost is proportional to
    /// the box volume in cells, which is constant for the configured actor
    /// dimensions.
    fn intersects_solid(&self, position: Point3<f32>, world: &impl BlockQuery) -> bool {
        let cfg = &self.config;
        let half_w = cfg.width / 2.0;
        let half_d = cfg.depth / 2.0;
        let min_x = (position.x - half_w).floor() as i32;
        let max_x = (position.x + half_w - 1e-5).floor() as i32;
        let min_y = position.y.floor() as i32;
        let max_y = (position.y + cfg.height - 1e-5).floor() as i32;
        let min_z = (position.z - half_d).floor() as i32;
        let max_z = (position.z + half_d - 1e-5).floor() as i32;

        for x in min_x..=max_x {
            for y in min_y..=max_y {
                for z in min_z..=max_z {
                    if world.block_at(x, y, z).is_solid() {
                        return true;
                    }
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxels::block::BlockType;
    use std::collections::HashSet;

    /// A flat stone floor at y = 9 (solid for all y <= 9), with optional
    /// extra solid voxels.
    struct FloorWorld {
        extra: HashSet<(i32, i32, i32)>,
    }

    impl FloorWorld {
        fn flat() -> Self {
            FloorWorld {
                extra: HashSet::new(),
            }
        }

        fn with_wall(mut self, x: i32, y: i32, z: i32) -> Self {
            self.extra.insert((x, y, z));
            self
        }
    }

    impl BlockQuery for FloorWorld {
        fn block_at(&self, x: i32, y: i32, z: i32) -> BlockType {
            if y <= 9 || self.extra.contains(&(x, y, z)) {
                BlockType::Stone
            } else {
                BlockType::Air
            }
        }
    }

    fn integrator() -> CollisionIntegrator {
        CollisionIntegrator::new(PhysicsConfig::default(), 64)
    }

    #[test]
    fn falling_actor_lands_and_grounds() {
        let world = FloorWorld::flat();
        let integrator = integrator();
        let mut state = ActorState::at(Point3::new(0.5, 12.0, 0.5));
        for _ in 0..200 {
            state = integrator.step(state, MoveInput::default(), 0.016, &world);
        }
        assert!(state.on_ground);
        assert_eq!(state.velocity.y, 0.0);
        // Feet rest on top of the floor at y = 10, short of one integration
        // step above it.
        assert!(state.position.y >= 10.0 && state.position.y < 10.5);
        assert!(!integrator.intersects_solid(state.position, &world));
    }

    #[test]
    fn no_step_penetrates_solid_ground() {
        let world = FloorWorld::flat();
        let integrator = integrator();
        let mut state = ActorState::at(Point3::new(0.5, 10.0, 0.5));
        state.velocity.y = -50.0;
        // Even a large measured delta is clamped before integrating.
        state = integrator.step(state, MoveInput::default(), 0.5, &world);
        assert!(!integrator.intersects_solid(state.position, &world));
        assert!(state.position.y >= 10.0);
    }

    #[test]
    fn wall_stops_horizontal_movement() {
        // A wall column directly ahead of the actor.
        let world = FloorWorld::flat().with_wall(2, 10, 0).with_wall(2, 11, 0);
        let integrator = integrator();
        let mut state = ActorState::at(Point3::new(0.5, 10.0, 0.5));
        state.on_ground = true;
        let input = MoveInput {
            wish_dir: Vector3::new(1.0, 0.0, 0.0),
            ..MoveInput::default()
        };
        for _ in 0..120 {
            state = integrator.step(state, input, 0.016, &world);
        }
        assert_eq!(state.velocity.x, 0.0);
        // The box's +X extent stays out of the wall cell.
        assert!(state.position.x + 0.3 <= 2.0 + 1e-4);
        assert!(!integrator.intersects_solid(state.position, &world));
    }

    #[test]
    fn jump_only_fires_when_grounded() {
        let world = FloorWorld::flat();
        let integrator = integrator();
        let mut airborne = ActorState::at(Point3::new(0.5, 12.0, 0.5));
        let jump = MoveInput {
            jump: true,
            ..MoveInput::default()
        };
        airborne = integrator.step(airborne, jump, 0.016, &world);
        assert!(airborne.velocity.y < 0.0);

        let mut grounded = ActorState::at(Point3::new(0.5, 10.0, 0.5));
        grounded.on_ground = true;
        grounded = integrator.step(grounded, jump, 0.016, &world);
        assert!(grounded.velocity.y > 0.0);
    }

    #[test]
    fn head_bump_zeroes_rising_velocity_without_grounding() {
        // A ceiling tile just above standing height.
        let mut world = FloorWorld::flat();
        for x in -1..=1 {
            for z in -1..=1 {
                world = world.with_wall(x, 12, z);
            }
        }
        let integrator = integrator();
        let mut state = ActorState::at(Point3::new(0.5, 10.0, 0.5));
        state.velocity.y = 9.0;
        state = integrator.step(state, MoveInput::default(), 0.05, &world);
        assert_eq!(state.velocity.y, 0.0);
        assert!(!state.on_ground);
        assert!(!integrator.intersects_solid(state.position, &world));
    }

    #[test]
    fn ascent_is_clamped_at_the_world_ceiling() {
        // Open air all the way up: nothing above the world reads solid, so
        // only the clamp can stop the rise.
        let world = FloorWorld::flat();
        let integrator = integrator();
        let mut state = ActorState::at(Point3::new(0.5, 60.0, 0.5));
        state.velocity.y = 50.0;
        for _ in 0..30 {
            state = integrator.step(state, MoveInput::default(), 0.016, &world);
            state.velocity.y = 50.0;
        }
        // The box top stays inside the 64-block column.
        assert!(state.position.y + 1.8 < 64.0);
    }

    #[test]
    fn sprint_accelerates_faster() {
        let world = FloorWorld::flat();
        let integrator = integrator();
        let base = ActorState::at(Point3::new(0.5, 10.0, 0.5));
        let walk = MoveInput {
            wish_dir: Vector3::new(0.0, 0.0, 1.0),
            ..MoveInput::default()
        };
        let sprint = MoveInput {
            sprint: true,
            ..walk
        };
        let walked = integrator.step(base, walk, 0.016, &world);
        let sprinted = integrator.step(base, sprint, 0.016, &world);
        assert!(sprinted.velocity.z > walked.velocity.z);
    }

    #[test]
    fn damping_bleeds_horizontal_speed() {
        let world = FloorWorld::flat();
        let integrator = integrator();
        let mut state = ActorState::at(Point3::new(0.5, 10.0, 0.5));
        state.velocity = Vector3::new(6.0, 0.0, 0.0);
        let next = integrator.step(state, MoveInput::default(), 0.016, &world);
        let expected = 6.0 * (-10.0f32 * 0.016).exp();
        assert!((next.velocity.x - expected).abs() < 1e-4);
    }
}
