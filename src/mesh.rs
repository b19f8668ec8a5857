//! Static grid topology for the surface mesh.
//!
//! The grid is a regular n×n lattice centered on the origin in the XY
//! plane; heights displace vertices along +Z. Positions, indices and
//! normals are generated exactly once at startup. Per-frame updates only
//! rewrite the z component of the position buffer (see `surface.rs`),
//! so the topology and normals here are immutable for the process
//! lifetime.

/// Flat position buffer for an n×n grid: 3 floats per vertex.
///
/// Vertex (i, j) lives at linear index `i * n + j`, at
/// x = i − (n−1)/2, y = j − (n−1)/2, z = 0.
pub fn grid_positions(n: usize) -> Vec<f32> {
    let offset = (n as f32 - 1.0) / 2.0;
    let mut positions = Vec::with_capacity(n * n * 3);
    for i in 0..n {
        for j in 0..n {
            positions.push(i as f32 - offset);
            positions.push(j as f32 - offset);
            positions.push(0.0);
        }
    }
    positions
}

/// Triangle-list index buffer for an n×n grid: 6 indices per cell,
/// cells in row-major order, both triangles wound the same way.
pub fn grid_indices(n: usize) -> Vec<u32> {
    assert!(n >= 2, "grid needs at least one cell");
    let n32 = n as u32;
    let mut indices = Vec::with_capacity((n - 1) * (n - 1) * 6);
    for i in 0..n32 - 1 {
        for j in 0..n32 - 1 {
            let v1 = i * n32 + j;
            let v2 = v1 + 1;
            let v3 = v1 + n32 + 1;
            let v4 = v1 + n32;
            indices.extend_from_slice(&[v1, v2, v3]);
            indices.extend_from_slice(&[v3, v4, v1]);
        }
    }
    indices
}

/// Per-vertex normals by area-weighted accumulation of triangle normals.
///
/// Run once against the initial flat topology; lighting stays static
/// across frames rather than tracking per-frame slope changes.
pub fn vertex_normals(positions: &[f32], indices: &[u32]) -> Vec<f32> {
    let mut normals = vec![0.0f32; positions.len()];
    for tri in indices.chunks_exact(3) {
        let (a, b, c) = (tri[0] as usize * 3, tri[1] as usize * 3, tri[2] as usize * 3);
        let e1 = [
            positions[b] - positions[a],
            positions[b + 1] - positions[a + 1],
            positions[b + 2] - positions[a + 2],
        ];
        let e2 = [
            positions[c] - positions[a],
            positions[c + 1] - positions[a + 1],
            positions[c + 2] - positions[a + 2],
        ];
        // Cross product magnitude carries the triangle area weighting.
        let face = [
            e1[1] * e2[2] - e1[2] * e2[1],
            e1[2] * e2[0] - e1[0] * e2[2],
            e1[0] * e2[1] - e1[1] * e2[0],
        ];
        for &base in &[a, b, c] {
            normals[base] += face[0];
            normals[base + 1] += face[1];
            normals[base + 2] += face[2];
        }
    }
    for v in normals.chunks_exact_mut(3) {
        let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
        if len > 0.0 {
            v[0] /= len;
            v[1] /= len;
            v[2] /= len;
        }
    }
    normals
}
