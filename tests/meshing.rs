use cgmath::{InnerSpace, Point3};
use voxel_terrain::{
    build_mesh,
    meshing::mesh::{culled_mesh, ChunkMeshData, GreedyMesher, MeshPass},
    BlockType, TerrainConfig, TerrainGenerator, VoxelGrid,
};

fn fill(grid: &mut VoxelGrid, min: Point3<i32>, max: Point3<i32>, block_type: BlockType) {
    for z in min.z..max.z {
        for y in min.y..max.y {
            for x in min.x..max.x {
                grid.set_block_type(Point3::new(x, y, z), block_type);
            }
        }
    }
}

fn assert_buffer_invariants(mesh: &ChunkMeshData) {
    let quads = mesh.quad_count();
    assert_eq!(mesh.vertices.len(), 4 * quads);
    assert_eq!(mesh.normals.len(), 4 * quads);
    assert_eq!(mesh.uvs.len(), 4 * quads);
    assert_eq!(mesh.colors.len(), 4 * quads);
    assert_eq!(mesh.triangles.len(), 6 * quads);
    assert!(mesh.triangles.iter().all(|&index| (index as usize) < mesh.vertices.len()));
}

fn generated_chunk() -> VoxelGrid {
    TerrainGenerator::new(TerrainConfig {
        chunk_size: 16,
        seed: 7,
        ..TerrainConfig::default()
    })
    .generate_chunk(Point3::new(0, 0, 0))
}

#[test]
fn floor_slab_is_six_quads() {
    let mut grid = VoxelGrid::new(8, Point3::new(0, 0, 0));
    fill(&mut grid, Point3::new(0, 0, 0), Point3::new(8, 8, 1), BlockType::Stone);

    let mesh = build_mesh(&grid, true);
    assert_eq!(mesh.quad_count(), 6);
    assert_eq!(mesh.vertices.len(), 24);
    assert_eq!(mesh.triangles.len(), 36);
    assert_buffer_invariants(&mesh);
    assert!(build_mesh(&grid, false).is_empty());
}

#[test]
fn slab_top_is_one_merged_quad() {
    let mut grid = VoxelGrid::new(8, Point3::new(0, 0, 0));
    fill(&mut grid, Point3::new(2, 1, 3), Point3::new(5, 6, 4), BlockType::Dirt);

    let mesh = GreedyMesher::new(1.0).build_mesh(&grid, MeshPass::Land);
    assert_eq!(mesh.quad_count(), 6);

    let top: Vec<usize> = (0..mesh.quad_count())
        .filter(|&quad| mesh.normals[quad * 4].z > 0.0)
        .collect();
    assert_eq!(top.len(), 1);

    let corners = &mesh.vertices[top[0] * 4..top[0] * 4 + 4];
    let extent = |axis: usize| {
        let max = corners.iter().map(|v| v[axis]).fold(f32::MIN, f32::max);
        let min = corners.iter().map(|v| v[axis]).fold(f32::MAX, f32::min);
        max - min
    };
    assert_eq!(extent(0), 3.0);
    assert_eq!(extent(1), 5.0);
    assert!(corners.iter().all(|v| v.z == 4.0));
}

#[test]
fn every_triangle_faces_along_its_normal() {
    let grid = generated_chunk();
    for pass in MeshPass::all() {
        let mesh = GreedyMesher::default().build_mesh(&grid, pass);
        assert_buffer_invariants(&mesh);
        for triangle in mesh.triangles.chunks_exact(3) {
            let [a, b, c] = [triangle[0], triangle[1], triangle[2]].map(|i| mesh.vertices[i as usize]);
            let facing = (c - a).cross(b - a).normalize();
            let normal = mesh.normals[triangle[0] as usize];
            assert!(facing.dot(normal) > 0.99, "{:?} vs {:?}", facing, normal);
        }
    }
}

#[test]
fn land_and_water_never_mix() {
    let grid = generated_chunk();
    let land = build_mesh(&grid, true);
    let water = build_mesh(&grid, false);

    assert!(land.quad_types.iter().all(|block_type| !block_type.is_liquid() && !block_type.is_air()));
    assert!(water.quad_types.iter().all(|block_type| block_type.is_liquid()));
}

#[test]
fn greedy_never_emits_more_than_culled() {
    let grid = generated_chunk();
    let mesher = GreedyMesher::new(1.0);
    for pass in MeshPass::all() {
        let greedy = mesher.build_mesh(&grid, pass);
        let culled = culled_mesh(&grid, pass, 1.0);
        assert!(greedy.quad_count() <= culled.quad_count());
        assert!((greedy.face_area(1.0) - culled.face_area(1.0)).abs() < 1e-2);
    }
}

#[test]
fn upload_buffers_match_geometry() {
    let mut grid = VoxelGrid::new(4, Point3::new(0, 0, 0));
    grid.set_block_type(Point3::new(1, 1, 1), BlockType::Grass);

    let mesh = build_mesh(&grid, true);
    let vertices = mesh.to_vertices();
    assert_eq!(vertices.len(), mesh.vertices.len());
    assert_eq!(mesh.vertex_bytes().len(), vertices.len() * std::mem::size_of_val(&vertices[0]));
    assert_eq!(mesh.index_bytes().len(), mesh.triangles.len() * 4);

    let top = (0..mesh.quad_count())
        .find(|&quad| mesh.normals[quad * 4].z > 0.0)
        .and_then(|quad| mesh.texture_index(quad));
    let side = (0..mesh.quad_count())
        .find(|&quad| mesh.normals[quad * 4].x > 0.0)
        .and_then(|quad| mesh.texture_index(quad));
    assert_ne!(top, side);
}

#[test]
fn checkerboard_cannot_merge() {
    let grid = TerrainGenerator::new(TerrainConfig {
        chunk_size: 4,
        generation_mode: voxel_terrain::GenerationMode::Checkerboard,
        ..TerrainConfig::default()
    })
    .generate_chunk(Point3::new(0, 0, 0));

    let mesh = GreedyMesher::new(1.0).build_mesh(&grid, MeshPass::Land);
    assert_eq!(mesh.quad_count(), grid.count(BlockType::Stone) * 6);
    assert_eq!(mesh.quad_count(), culled_mesh(&grid, MeshPass::Land, 1.0).quad_count());
}
