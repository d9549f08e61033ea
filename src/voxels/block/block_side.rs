//! # Block Side Module
//!
//! This module defines the six faces of a voxel block together with the
//! geometry tables the mesher needs per face: the neighbor offset used for
//! hidden-face culling, the outward normal, the four quad corners in
//! counter-clockwise winding, and the in-plane axes used for UV unwrapping
//! and ambient-occlusion probing.

use cgmath::Vector3;

/// The six faces of a voxel block.
///
/// The order is: [RIGHT, LEFT, TOP, BOTTOM, FRONT, BACK], matching the
/// per-face texture index tables in the parent module.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The right face (facing positive X)
    RIGHT = 0,

    /// The left face (facing negative X)
    LEFT = 1,

    /// The top face (facing positive Y)
    TOP = 2,

    /// The bottom face (facing negative Y)
    BOTTOM = 3,

    /// The front face (facing positive Z)
    FRONT = 4,

    /// The back face (facing negative Z)
    BACK = 5,
}

impl BlockSide {
    /// Returns all six faces in a consistent order.
    ///
    /// The order is: [RIGHT, LEFT, TOP, BOTTOM, FRONT, BACK]
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::RIGHT,
            BlockSide::LEFT,
            BlockSide::TOP,
            BlockSide::BOTTOM,
            BlockSide::FRONT,
            BlockSide::BACK,
        ]
    }

    /// Integer offset from a voxel to the neighbor this face looks at.
    pub fn dir(self) -> Vector3<i32> {
        match self {
            BlockSide::RIGHT => Vector3::new(1, 0, 0),
            BlockSide::LEFT => Vector3::new(-1, 0, 0),
            BlockSide::TOP => Vector3::new(0, 1, 0),
            BlockSide::BOTTOM => Vector3::new(0, -1, 0),
            BlockSide::FRONT => Vector3::new(0, 0, 1),
            BlockSide::BACK => Vector3::new(0, 0, -1),
        }
    }

    /// Outward unit normal of this face.
    pub fn normal(self) -> Vector3<f32> {
        let d = self.dir();
        Vector3::new(d.x as f32, d.y as f32, d.z as f32)
    }

    /// The four corners of this face's quad, as offsets in `{0, 1}³` from the
    /// voxel's minimum corner, wound counter-clockwise when viewed from
    /// outside the block.
    pub fn corners(self) -> [[f32; 3]; 4] {
        match self {
            BlockSide::RIGHT => [
                [1.0, 0.0, 0.0],
                [1.0, 1.0, 0.0],
                [1.0, 1.0, 1.0],
                [1.0, 0.0, 1.0],
            ],
            BlockSide::LEFT => [
                [0.0, 0.0, 1.0],
                [0.0, 1.0, 1.0],
                [0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0],
            ],
            BlockSide::TOP => [
                [0.0, 1.0, 1.0],
                [1.0, 1.0, 1.0],
                [1.0, 1.0, 0.0],
                [0.0, 1.0, 0.0],
            ],
            BlockSide::BOTTOM => [
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [1.0, 0.0, 1.0],
                [0.0, 0.0, 1.0],
            ],
            BlockSide::FRONT => [
                [0.0, 0.0, 1.0],
                [1.0, 0.0, 1.0],
                [1.0, 1.0, 1.0],
                [0.0, 1.0, 1.0],
            ],
            BlockSide::BACK => [
                [0.0, 1.0, 0.0],
                [1.0, 1.0, 0.0],
                [1.0, 0.0, 0.0],
                [0.0, 0.0, 0.0],
            ],
        }
    }

    /// In-plane axis along which the texture `u` coordinate runs.
    ///
    /// X-facing quads run `u` along Y instead of a horizontal axis; this
    /// rotates the unwrap so vertically authored textures (bark) stay
    /// upright on those faces.
    pub fn u_axis(self) -> Vector3<i32> {
        match self {
            BlockSide::RIGHT | BlockSide::LEFT => Vector3::new(0, 1, 0),
            _ => Vector3::new(1, 0, 0),
        }
    }

    /// In-plane axis along which the texture `v` coordinate runs.
    pub fn v_axis(self) -> Vector3<i32> {
        match self {
            BlockSide::FRONT | BlockSide::BACK => Vector3::new(0, 1, 0),
            _ => Vector3::new(0, 0, 1),
        }
    }

    /// Component of a corner triple (0 = x, 1 = y, 2 = z) that varies along `u_axis`.
    pub fn u_component(self) -> usize {
        match self {
            BlockSide::RIGHT | BlockSide::LEFT => 1,
            _ => 0,
        }
    }

    /// Component of a corner triple (0 = x, 1 = y, 2 = z) that varies along `v_axis`.
    pub fn v_component(self) -> usize {
        match self {
            BlockSide::FRONT | BlockSide::BACK => 1,
            _ => 2,
        }
    }
}
