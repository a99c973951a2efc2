//! Indexed triangle meshes and the binary STL reader that produces them.

mod builder;
mod stl;

use std::collections::HashMap;
use std::fmt::{self, Write as _};

use glam::Vec3;

pub use builder::MeshBuilder;
pub use stl::{decode_stl, parse_stl, parse_stl_with, StlOptions, STL_HEADER_LEN, STL_RECORD_LEN};

/// A finished indexed mesh.
///
/// Produced by [`MeshBuilder::calculate_normals`]; read-only from then on.
/// `vertex_normals` is indexed like `vertices`, `face_normals` like
/// `triangles`.
#[derive(Debug, Clone)]
pub struct Mesh {
    vertices: Vec<Vec3>,
    vertex_normals: Vec<Vec3>,
    face_normals: Vec<Vec3>,
    triangles: Vec<[u32; 3]>,
    neighbors: HashMap<u32, Vec<u32>>,
}

impl Mesh {
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn vertex_normals(&self) -> &[Vec3] {
        &self.vertex_normals
    }

    pub fn face_normals(&self) -> &[Vec3] {
        &self.face_normals
    }

    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Triangles incident to `vertex`, in insertion order.
    pub fn neighbors(&self, vertex: u32) -> Option<&[u32]> {
        self.neighbors.get(&vertex).map(Vec::as_slice)
    }

    // ── upload views ──────────────────────────────────────────────────────

    /// Positions as packed `x, y, z` floats.
    pub fn vertex_data(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Vertex normals as packed `x, y, z` floats.
    pub fn normal_data(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertex_normals)
    }

    /// Triangle list index buffer.
    pub fn indices(&self) -> &[u32] {
        bytemuck::cast_slice(&self.triangles)
    }

    // ── diagnostics ───────────────────────────────────────────────────────

    pub fn stats(&self) -> MeshStats {
        let (min, max) = self
            .vertices
            .iter()
            .fold((Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        let bounds = (!self.vertices.is_empty()).then_some((min, max));
        MeshStats {
            vertices: self.vertices.len(),
            triangles: self.triangles.len(),
            bounds,
        }
    }

    pub fn describe_vertices(&self) -> String {
        let mut out = String::new();
        for (i, (p, n)) in self.vertices.iter().zip(&self.vertex_normals).enumerate() {
            let _ = writeln!(out, "{i:>6}: {p}  n={n}");
        }
        out
    }

    pub fn describe_triangles(&self) -> String {
        let mut out = String::new();
        for (i, ([a, b, c], n)) in self.triangles.iter().zip(&self.face_normals).enumerate() {
            let _ = writeln!(out, "{i:>6}: [{a}, {b}, {c}]  n={n}");
        }
        out
    }

    /// Adjacency listing in vertex order.
    pub fn describe_neighbors(&self) -> String {
        let mut out = String::new();
        for vertex in 0..self.vertices.len() as u32 {
            let incident = self.neighbors(vertex).unwrap_or_default();
            let list = incident.iter().map(u32::to_string).collect::<Vec<_>>().join(", ");
            let _ = writeln!(out, "{vertex:>6}: {list}");
        }
        out
    }
}

/// Size and extent of a [`Mesh`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MeshStats {
    pub vertices: usize,
    pub triangles: usize,
    /// Axis-aligned `(min, max)`; `None` for an empty mesh.
    pub bounds: Option<(Vec3, Vec3)>,
}

impl fmt::Display for MeshStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} vertices, {} triangles", self.vertices, self.triangles)?;
        if let Some((min, max)) = self.bounds {
            write!(f, ", bounds {min} .. {max}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> Mesh {
        let mut b = MeshBuilder::new();
        b.add_triangle(Vec3::ZERO, Vec3::X, Vec3::new(1.0, 1.0, 0.0));
        b.add_triangle(Vec3::ZERO, Vec3::new(1.0, 1.0, 0.0), Vec3::Y);
        b.calculate_normals().unwrap()
    }

    #[test]
    fn upload_views_are_flat() {
        let mesh = quad();
        assert_eq!(mesh.indices(), &[0, 1, 2, 0, 2, 3]);
        assert_eq!(mesh.vertex_data().len(), 12);
        assert_eq!(&mesh.vertex_data()[3..6], &[1.0, 0.0, 0.0]);
        assert_eq!(&mesh.normal_data()[0..3], &[0.0, 0.0, 1.0]);
    }

    #[test]
    fn stats_report_counts_and_bounds() {
        let stats = quad().stats();
        assert_eq!(stats.vertices, 4);
        assert_eq!(stats.triangles, 2);
        assert_eq!(stats.bounds, Some((Vec3::ZERO, Vec3::new(1.0, 1.0, 0.0))));
        assert!(stats.to_string().starts_with("4 vertices, 2 triangles, bounds"));
    }

    #[test]
    fn empty_mesh_has_no_bounds() {
        let stats = MeshBuilder::new().calculate_normals().unwrap().stats();
        assert_eq!(stats.bounds, None);
        assert_eq!(stats.to_string(), "0 vertices, 0 triangles");
    }

    #[test]
    fn describe_listings_have_one_line_per_entry() {
        let mesh = quad();
        assert_eq!(mesh.describe_vertices().lines().count(), 4);
        assert_eq!(mesh.describe_triangles().lines().count(), 2);

        let neighbors = mesh.describe_neighbors();
        let lines: Vec<_> = neighbors.lines().collect();
        assert_eq!(lines[0].trim(), "0: 0, 1");
        assert_eq!(lines[3].trim(), "3: 1");
    }
}
