//! Mesh buffers produced for one chunk and one visibility class.
//!
//! Geometry is kept as parallel buffers, four vertices and six indices per
//! quad, which is the shape a host engine's procedural mesh API consumes.
//! [`ChunkMeshData::to_vertices`] interleaves them for GPU upload instead.

use cgmath::{InnerSpace, Vector3, Zero};

use crate::voxels::block::{Block, BlockType, NO_TEXTURE};

use super::{face::Mask, MeshPass};
use crate::meshing::vertex::MeshVertex;

/// Triangle mesh of one chunk for either the land or the liquid pass.
///
/// Invariant: `vertices`, `normals`, `uvs` and `colors` hold `4 * quad_count`
/// entries, `triangles` holds `6 * quad_count` and `quad_types` one per quad.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChunkMeshData {
    /// Quad corners in world units relative to the chunk origin
    pub vertices: Vec<Vector3<f32>>,
    /// Two triangles per quad, indexing `vertices`
    pub triangles: Vec<u32>,
    /// Per-vertex face normal
    pub normals: Vec<Vector3<f32>>,
    /// Per-vertex texture coordinates in blocks
    pub uvs: Vec<[f32; 2]>,
    /// Per-vertex color; alpha carries the atlas tile index
    pub colors: Vec<[u8; 4]>,
    /// Block type that produced each quad
    pub quad_types: Vec<BlockType>,
}

impl ChunkMeshData {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of quads in the mesh.
    pub fn quad_count(&self) -> usize {
        self.quad_types.len()
    }

    /// Whether the mesh has no geometry.
    pub fn is_empty(&self) -> bool {
        self.quad_types.is_empty()
    }

    /// Drops all geometry, keeping the allocations.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.triangles.clear();
        self.normals.clear();
        self.uvs.clear();
        self.colors.clear();
        self.quad_types.clear();
    }

    /// Atlas tile of the quad at `quad`, read back from the color alpha.
    pub fn texture_index(&self, quad: usize) -> Option<u8> {
        self.colors.get(quad * 4).map(|color| color[3])
    }

    /// Appends one quad lying in the plane `origin[axis]`.
    ///
    /// # Arguments
    /// * `mask` - Type and normal sign of the face; must hold a face
    /// * `axis` - Sweep axis the quad is perpendicular to
    /// * `origin` - Grid corner of the quad with the smallest coordinates
    /// * `width` - Extent along `(axis + 1) % 3`
    /// * `height` - Extent along `(axis + 2) % 3`
    /// * `scale` - World units per block
    ///
    /// # Winding
    /// The index order flips with the normal sign, so for every emitted
    /// triangle `(a, b, c)` the cross product `(c - a) x (b - a)` points along
    /// the face normal (clockwise when viewed from the front).
    pub fn push_quad(
        &mut self,
        mask: Mask,
        axis: usize,
        origin: [i32; 3],
        width: i32,
        height: i32,
        scale: f32,
    ) {
        let axis1 = (axis + 1) % 3;
        let axis2 = (axis + 2) % 3;
        let mut du = [0; 3];
        du[axis1] = width;
        let mut dv = [0; 3];
        dv[axis2] = height;

        let corner = |a: [i32; 3], b: [i32; 3]| {
            Vector3::new(
                (origin[0] + a[0] + b[0]) as f32,
                (origin[1] + a[1] + b[1]) as f32,
                (origin[2] + a[2] + b[2]) as f32,
            ) * scale
        };
        let base = self.vertices.len() as i32;
        let sign = mask.normal as i32;

        self.vertices.extend([
            corner([0; 3], [0; 3]),
            corner(du, [0; 3]),
            corner([0; 3], dv),
            corner(du, dv),
        ]);
        self.triangles.extend(
            [0, 2 + sign, 2 - sign, 3, 1 - sign, 1 + sign]
                .into_iter()
                .map(|offset| (base + offset) as u32),
        );

        let mut normal = Vector3::zero();
        normal[axis] = sign as f32;
        self.normals.extend([normal; 4]);

        let (w, h) = (width as f32, height as f32);
        if axis == 0 {
            self.uvs.extend([[w, h], [0.0, h], [w, 0.0], [0.0, 0.0]]);
        } else {
            self.uvs.extend([[h, w], [h, 0.0], [0.0, w], [0.0, 0.0]]);
        }

        let texture = mask
            .side(axis)
            .map(|side| Block::texture_index(mask.block_type, side))
            .unwrap_or(NO_TEXTURE);
        self.colors.extend([[0, 0, 0, texture]; 4]);
        self.quad_types.push(mask.block_type);
    }

    /// Interleaves the parallel buffers into upload-ready vertices.
    pub fn to_vertices(&self) -> Vec<MeshVertex> {
        self.vertices
            .iter()
            .zip(&self.normals)
            .zip(&self.uvs)
            .zip(&self.colors)
            .map(|(((position, normal), uv), color)| {
                MeshVertex::new((*position).into(), (*normal).into(), *uv, color[3] as u32)
            })
            .collect()
    }

    /// The interleaved vertices as raw bytes.
    pub fn vertex_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.to_vertices()).to_vec()
    }

    /// The index buffer as raw bytes.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.triangles)
    }

    /// Total face area covered by the mesh, in blocks.
    pub fn face_area(&self, scale: f32) -> f32 {
        self.vertices
            .chunks_exact(4)
            .map(|quad| (quad[1] - quad[0]).cross(quad[2] - quad[0]).magnitude() / (scale * scale))
            .sum()
    }
}

/// The land and liquid meshes of one chunk.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChunkMeshes {
    /// Opaque geometry
    pub land: ChunkMeshData,
    /// Water geometry
    pub liquid: ChunkMeshData,
}

impl ChunkMeshes {
    /// The mesh a pass builds.
    pub fn get(&self, pass: MeshPass) -> &ChunkMeshData {
        match pass {
            MeshPass::Land => &self.land,
            MeshPass::Liquid => &self.liquid,
        }
    }

    /// Mutable access to the mesh a pass builds.
    pub fn get_mut(&mut self, pass: MeshPass) -> &mut ChunkMeshData {
        match pass {
            MeshPass::Land => &mut self.land,
            MeshPass::Liquid => &mut self.liquid,
        }
    }

    /// Quads across both meshes.
    pub fn quad_count(&self) -> usize {
        self.land.quad_count() + self.liquid.quad_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask(block_type: BlockType, normal: i8) -> Mask {
        Mask { block_type, normal }
    }

    #[test]
    fn quad_buffers_stay_in_step() {
        let mut mesh = ChunkMeshData::new();
        mesh.push_quad(mask(BlockType::Stone, 1), 2, [0, 0, 1], 8, 8, 100.0);
        mesh.push_quad(mask(BlockType::Stone, -1), 0, [0, 0, 0], 8, 1, 100.0);

        assert_eq!(mesh.quad_count(), 2);
        assert_eq!(mesh.vertices.len(), 8);
        assert_eq!(mesh.normals.len(), 8);
        assert_eq!(mesh.uvs.len(), 8);
        assert_eq!(mesh.colors.len(), 8);
        assert_eq!(mesh.triangles.len(), 12);
        assert_eq!(&mesh.triangles[..6], &[0, 3, 1, 3, 0, 2]);
        assert_eq!(&mesh.triangles[6..], &[4, 5, 7, 7, 6, 4]);
        assert_eq!(mesh.vertices[3], Vector3::new(800.0, 800.0, 100.0));
        assert_eq!(mesh.face_area(100.0), 72.0);

        mesh.clear();
        assert!(mesh.is_empty());
        assert!(mesh.triangles.is_empty());
    }

    #[test]
    fn uvs_swap_off_the_x_axis() {
        let mut mesh = ChunkMeshData::new();
        mesh.push_quad(mask(BlockType::Dirt, 1), 0, [1, 0, 0], 3, 2, 1.0);
        mesh.push_quad(mask(BlockType::Dirt, 1), 1, [0, 1, 0], 3, 2, 1.0);
        assert_eq!(mesh.uvs[0], [3.0, 2.0]);
        assert_eq!(mesh.uvs[4], [2.0, 3.0]);
    }

    #[test]
    fn grass_top_texture_rides_in_alpha() {
        let mut mesh = ChunkMeshData::new();
        mesh.push_quad(mask(BlockType::Grass, 1), 2, [0, 0, 1], 1, 1, 1.0);
        mesh.push_quad(mask(BlockType::Grass, 1), 0, [1, 0, 0], 1, 1, 1.0);
        assert_eq!(mesh.texture_index(0), Some(0));
        assert_eq!(mesh.texture_index(1), Some(1));
        assert_eq!(mesh.texture_index(2), None);
    }

    #[test]
    fn interleaved_vertices_match_buffers() {
        let mut mesh = ChunkMeshData::new();
        mesh.push_quad(mask(BlockType::Stone, -1), 1, [0, 0, 0], 2, 2, 1.0);
        let vertices = mesh.to_vertices();
        assert_eq!(vertices.len(), 4);
        assert_eq!(vertices[0].normal, [0.0, -1.0, 0.0]);
        assert_eq!(vertices[0].texture_index, 3);
        assert_eq!(mesh.vertex_bytes().len(), 4 * MeshVertex::STRIDE);
        assert_eq!(mesh.index_bytes().len(), 6 * 4);
    }
}
