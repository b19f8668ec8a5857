use surfview::mesh::{grid_indices, grid_positions, vertex_normals};

#[test]
fn vertex_and_index_counts() {
    for n in [2usize, 4, 128] {
        let positions = grid_positions(n);
        let indices = grid_indices(n);
        assert_eq!(positions.len(), n * n * 3);
        assert_eq!(indices.len(), (n - 1) * (n - 1) * 6);
        let max = (n * n) as u32;
        assert!(indices.iter().all(|&i| i < max));
    }
}

#[test]
fn grid_is_centered_on_the_origin() {
    let n = 4;
    let positions = grid_positions(n);
    // Vertex (i, j) sits at index i * n + j.
    assert_eq!(&positions[0..3], &[-1.5, -1.5, 0.0]);
    let last = (n * n - 1) * 3;
    assert_eq!(&positions[last..last + 3], &[1.5, 1.5, 0.0]);
    let idx = (2 * n + 1) * 3; // (i=2, j=1)
    assert_eq!(&positions[idx..idx + 3], &[0.5, -0.5, 0.0]);

    let sum_x: f32 = positions.chunks_exact(3).map(|v| v[0]).sum();
    let sum_y: f32 = positions.chunks_exact(3).map(|v| v[1]).sum();
    assert!(sum_x.abs() < 1e-4 && sum_y.abs() < 1e-4);
}

#[test]
fn first_cell_triangulation() {
    let n = 4u32;
    let indices = grid_indices(n as usize);
    // Cell (0,0): v1=(0,0) v2=(0,1) v3=(1,1) v4=(1,0) as linear indices.
    assert_eq!(&indices[0..6], &[0, 1, n + 1, n + 1, n, 0]);
}

fn triangle_z(positions: &[f32], tri: &[u32]) -> f32 {
    let p = |v: u32| {
        let b = v as usize * 3;
        [positions[b], positions[b + 1], positions[b + 2]]
    };
    let (a, b, c) = (p(tri[0]), p(tri[1]), p(tri[2]));
    let e1 = [b[0] - a[0], b[1] - a[1]];
    let e2 = [c[0] - a[0], c[1] - a[1]];
    e1[0] * e2[1] - e1[1] * e2[0]
}

#[test]
fn winding_is_consistent_across_all_triangles() {
    let n = 8;
    let positions = grid_positions(n);
    let indices = grid_indices(n);
    let signs: Vec<bool> = indices
        .chunks_exact(3)
        .map(|tri| triangle_z(&positions, tri) > 0.0)
        .collect();
    assert!(signs.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn flat_grid_normals_are_unit_and_uniform() {
    let n = 8;
    let positions = grid_positions(n);
    let indices = grid_indices(n);
    let normals = vertex_normals(&positions, &indices);
    assert_eq!(normals.len(), positions.len());
    for v in normals.chunks_exact(3) {
        let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
        assert!((len - 1.0).abs() < 1e-5);
        assert!(v[0].abs() < 1e-5 && v[1].abs() < 1e-5);
        assert!((v[2].abs() - 1.0).abs() < 1e-5);
    }
    // All vertices agree on the facing direction.
    let first_z = normals[2];
    assert!(normals.chunks_exact(3).all(|v| v[2] * first_z > 0.0));
}
