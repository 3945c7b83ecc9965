//! Shared shell geometry: one icosphere reused by both planet shells.
//!
//! The surface and atmosphere shells draw the same vertex/index data; the
//! atmosphere's larger radius comes from a uniform scale in its model
//! matrix, never from a second mesh.

use glam::Vec3;
use std::collections::HashMap;

/// Unit-radius sphere mesh with outward normals and equirectangular UVs.
pub struct ShellMesh {
    /// Vertex positions on the unit sphere.
    pub positions: Vec<Vec3>,
    /// Outward unit normals (equal to the positions on a unit sphere).
    pub normals: Vec<Vec3>,
    /// Equirectangular UV coordinates. Vertices duplicated across the wrap
    /// seam carry u in (1.0, 1.5); the sampler must repeat in u.
    pub uvs: Vec<[f32; 2]>,
    /// Counter-clockwise triangle indices.
    pub indices: Vec<u32>,
}

impl ShellMesh {
    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Generate the shell icosphere with the given number of subdivisions.
///
/// Subdivision 4 (~5k triangles) is plenty for a single stylized planet;
/// each further level quadruples the triangle count.
pub fn generate_shell_sphere(subdivisions: u32) -> ShellMesh {
    let phi = (1.0 + 5.0_f32.sqrt()) / 2.0;

    let mut positions: Vec<Vec3> = [
        (-1.0, phi, 0.0),
        (1.0, phi, 0.0),
        (-1.0, -phi, 0.0),
        (1.0, -phi, 0.0),
        (0.0, -1.0, phi),
        (0.0, 1.0, phi),
        (0.0, -1.0, -phi),
        (0.0, 1.0, -phi),
        (phi, 0.0, -1.0),
        (phi, 0.0, 1.0),
        (-phi, 0.0, -1.0),
        (-phi, 0.0, 1.0),
    ]
    .iter()
    .map(|&(x, y, z)| Vec3::new(x, y, z).normalize())
    .collect();

    let mut indices: Vec<u32> = vec![
        0, 11, 5, 0, 5, 1, 0, 1, 7, 0, 7, 10, 0, 10, 11, 1, 5, 9, 5, 11, 4, 11, 10, 2, 10, 7, 6, 7,
        1, 8, 3, 9, 4, 3, 4, 2, 3, 2, 6, 3, 6, 8, 3, 8, 9, 4, 9, 5, 2, 4, 11, 6, 2, 10, 8, 6, 7, 9,
        8, 1,
    ];

    for _ in 0..subdivisions {
        split_triangles(&mut positions, &mut indices);
    }

    let normals = positions.clone();
    let uvs = positions.iter().map(|p| equirectangular_uv(*p)).collect();

    let mut mesh = ShellMesh {
        positions,
        normals,
        uvs,
        indices,
    };
    split_wrap_seam(&mut mesh);
    fan_pole_vertices(&mut mesh);
    mesh
}

/// Map a unit-sphere point to equirectangular UV.
fn equirectangular_uv(p: Vec3) -> [f32; 2] {
    let u = 0.5 + p.z.atan2(p.x) / std::f32::consts::TAU;
    let v = 0.5 - p.y.asin() / std::f32::consts::PI;
    [u, v]
}

/// Duplicate vertices on the wrapped side of the u = 0 meridian. Without
/// this, a triangle straddling the seam interpolates u from near 1 back to
/// near 0 and smears most of the texture across one band of longitude. The
/// duplicates carry u + 1 and rely on the sampler repeating in u.
fn split_wrap_seam(mesh: &mut ShellMesh) {
    let mut shifted: HashMap<u32, u32> = HashMap::new();

    for t in 0..mesh.indices.len() / 3 {
        let base = t * 3;
        let u_at = |k: usize| mesh.uvs[mesh.indices[base + k] as usize][0];
        let span = u_at(0).max(u_at(1)).max(u_at(2)) - u_at(0).min(u_at(1)).min(u_at(2));
        if span <= 0.5 {
            continue;
        }
        for k in 0..3 {
            let i = mesh.indices[base + k];
            if mesh.uvs[i as usize][0] >= 0.5 {
                continue;
            }
            let j = match shifted.get(&i) {
                Some(&j) => j,
                None => {
                    let j = mesh.positions.len() as u32;
                    mesh.positions.push(mesh.positions[i as usize]);
                    mesh.normals.push(mesh.normals[i as usize]);
                    let [u, v] = mesh.uvs[i as usize];
                    mesh.uvs.push([u + 1.0, v]);
                    shifted.insert(i, j);
                    j
                }
            };
            mesh.indices[base + k] = j;
        }
    }
}

/// atan2 is undefined at the poles, so one shared pole vertex cannot carry a
/// u that suits its whole triangle fan. Give each pole-touching triangle its
/// own copy of the pole with u centered between the other two corners.
fn fan_pole_vertices(mesh: &mut ShellMesh) {
    for t in 0..mesh.indices.len() / 3 {
        let base = t * 3;
        for k in 0..3 {
            let i = mesh.indices[base + k] as usize;
            if mesh.positions[i].y.abs() < 1.0 - 1e-6 {
                continue;
            }
            let a = mesh.indices[base + (k + 1) % 3] as usize;
            let b = mesh.indices[base + (k + 2) % 3] as usize;
            let u = (mesh.uvs[a][0] + mesh.uvs[b][0]) * 0.5;
            let j = mesh.positions.len() as u32;
            mesh.positions.push(mesh.positions[i]);
            mesh.normals.push(mesh.normals[i]);
            mesh.uvs.push([u, mesh.uvs[i][1]]);
            mesh.indices[base + k] = j;
        }
    }
}

/// Split every triangle into four, reprojecting edge midpoints onto the
/// sphere. Midpoints are cached per edge so shared edges stay welded.
fn split_triangles(positions: &mut Vec<Vec3>, indices: &mut Vec<u32>) {
    let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();
    let mut next = Vec::with_capacity(indices.len() * 4);

    let mut midpoint = |a: u32, b: u32, positions: &mut Vec<Vec3>| -> u32 {
        let key = if a < b { (a, b) } else { (b, a) };
        *midpoints.entry(key).or_insert_with(|| {
            let mid = (positions[a as usize] + positions[b as usize]).normalize();
            positions.push(mid);
            (positions.len() - 1) as u32
        })
    };

    for tri in indices.chunks(3) {
        let (a, b, c) = (tri[0], tri[1], tri[2]);
        let ab = midpoint(a, b, positions);
        let bc = midpoint(b, c, positions);
        let ca = midpoint(c, a, positions);
        next.extend_from_slice(&[a, ab, ca, b, bc, ab, c, ca, bc, ab, bc, ca]);
    }

    *indices = next;
}
