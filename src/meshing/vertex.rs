//! Interleaved vertex format for handing chunk meshes to a renderer.

/// A vertex as a host renderer uploads it.
///
/// # Memory Layout
/// - Position: [f32; 3] (12 bytes)
/// - Normal: [f32; 3] (12 bytes)
/// - Texture Coordinates: [f32; 2] (8 bytes)
/// - Texture Index: u32 (4 bytes)
///
/// Total size: 36 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    /// Position in chunk-local world units
    pub position: [f32; 3],
    /// Outward face normal
    pub normal: [f32; 3],
    /// Texture coordinates, in blocks, so tiles repeat across merged quads
    pub uv: [f32; 2],
    /// Atlas tile index
    pub texture_index: u32,
}

impl MeshVertex {
    /// Size in bytes of one vertex in an upload buffer.
    pub const STRIDE: usize = std::mem::size_of::<MeshVertex>();

    /// Creates a new vertex.
    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2], texture_index: u32) -> Self {
        MeshVertex {
            position,
            normal,
            uv,
            texture_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_has_no_padding() {
        assert_eq!(MeshVertex::STRIDE, 36);
        let vertex = MeshVertex::new([1.0, 2.0, 3.0], [0.0, 0.0, 1.0], [4.0, 5.0], 7);
        let bytes: &[u8] = bytemuck::bytes_of(&vertex);
        assert_eq!(bytes.len(), 36);
        assert_eq!(&bytes[32..36], &7u32.to_ne_bytes());
    }
}
