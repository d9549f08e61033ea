//! # Mesh Buffer Module
//!
//! Geometry containers produced by chunk meshing and consumed by the
//! rendering collaborator. A [`MeshBuffer`] holds parallel per-vertex
//! attribute arrays plus a triangle index list; a [`ChunkMesh`] pairs an
//! opaque buffer with an alpha-tested cutout buffer and records the chunk's
//! world-space placement offset.
//!
//! The buffers are plain CPU-side data. Byte-view accessors are provided so
//! a GPU backend can upload them without copying.

use cgmath::Point3;

/// A growable triangle mesh with parallel per-vertex attribute arrays.
///
/// The arrays are index-aligned: entry `i` of `positions`, `normals`, `uvs`
/// and `tints` all describe vertex `i`. Indices address vertices in groups
/// of three, counter-clockwise.
#[derive(Debug, Default, Clone)]
pub struct MeshBuffer {
    /// Vertex positions, chunk-local (add the chunk origin for world space).
    pub positions: Vec<[f32; 3]>,
    /// Per-vertex outward normals.
    pub normals: Vec<[f32; 3]>,
    /// Per-vertex atlas texture coordinates.
    pub uvs: Vec<[f32; 2]>,
    /// Per-vertex RGB tint, carrying the ambient-occlusion brightness.
    pub tints: Vec<[f32; 3]>,
    /// Triangle indices into the attribute arrays.
    pub indices: Vec<u32>,
}

impl MeshBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        MeshBuffer::default()
    }

    /// Appends one quad as four vertices and two triangles.
    ///
    /// # Arguments
    /// * `corners` - The four corner positions, wound counter-clockwise
    /// * `normal` - Shared outward normal for all four vertices
    /// * `uvs` - Texture coordinates per corner
    /// * `tints` - RGB tint per corner
    pub fn push_quad(
        &mut self,
        corners: [[f32; 3]; 4],
        normal: [f32; 3],
        uvs: [[f32; 2]; 4],
        tints: [[f32; 3]; 4],
    ) {
        let base = self.positions.len() as u32;
        self.positions.extend_from_slice(&corners);
        self.normals.extend_from_slice(&[normal; 4]);
        self.uvs.extend_from_slice(&uvs);
        self.tints.extend_from_slice(&tints);
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    /// Number of vertices in the buffer.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles in the buffer.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Whether the buffer holds no geometry.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Raw bytes of the position array, for direct GPU upload.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Raw bytes of the normal array.
    pub fn normal_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normals)
    }

    /// Raw bytes of the texture coordinate array.
    pub fn uv_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.uvs)
    }

    /// Raw bytes of the tint array.
    pub fn tint_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.tints)
    }

    /// Raw bytes of the index array.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Consumes the buffer, returning `None` if it holds no geometry so
    /// empty render objects are never created.
    pub fn into_non_empty(self) -> Option<MeshBuffer> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

/// The renderable output of meshing one chunk.
///
/// Opaque and cutout geometry are disjoint buffers because they need
/// different render passes; a bucket with zero quads is omitted entirely.
#[derive(Debug, Clone)]
pub struct ChunkMesh {
    /// Fully opaque cube faces.
    pub opaque: Option<MeshBuffer>,
    /// Alpha-tested faces (leaves and cross plants).
    pub cutout: Option<MeshBuffer>,
    /// World-space placement offset of the chunk's minimum corner.
    pub origin: Point3<f32>,
}

impl Default for ChunkMesh {
    fn default() -> Self {
        ChunkMesh {
            opaque: None,
            cutout: None,
            origin: Point3::new(0.0, 0.0, 0.0),
        }
    }
}

impl ChunkMesh {
    /// Total vertex count across both buckets.
    pub fn vertex_count(&self) -> usize {
        self.opaque.as_ref().map_or(0, MeshBuffer::vertex_count)
            + self.cutout.as_ref().map_or(0, MeshBuffer::vertex_count)
    }

    /// Whether neither bucket holds geometry.
    pub fn is_empty(&self) -> bool {
        self.opaque.is_none() && self.cutout.is_none()
    }
}
