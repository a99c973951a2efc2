use std::collections::HashMap;

use glam::Vec3;

use crate::error::{error, ErrorKind, Result};

use super::Mesh;

/// Exact-equality lookup key for a vertex position.
///
/// Bit patterns of the coordinates, with `-0.0` folded into `0.0` so the key
/// agrees with `==`.
type VertexKey = [u32; 3];

fn vertex_key(p: Vec3) -> Option<VertexKey> {
    // NaN never compares equal, so NaN corners are never shared.
    if p.is_nan() {
        return None;
    }
    let bits = |x: f32| if x == 0.0 { 0.0f32.to_bits() } else { x.to_bits() };
    Some([bits(p.x), bits(p.y), bits(p.z)])
}

/// Accumulates triangles into an indexed mesh.
///
/// Corners with exactly equal positions share one vertex. For every
/// triangle the builder stores its face normal and records the triangle as
/// incident to each of its three vertices; [`calculate_normals`] averages
/// those face normals per vertex and yields the finished [`Mesh`].
///
/// [`calculate_normals`]: MeshBuilder::calculate_normals
#[derive(Debug, Default, Clone)]
pub struct MeshBuilder {
    vertices: Vec<Vec3>,
    face_normals: Vec<Vec3>,
    triangles: Vec<[u32; 3]>,
    neighbors: HashMap<u32, Vec<u32>>,
    lookup: HashMap<VertexKey, u32>,
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-sizes for `triangles` triangles (vertex count is a guess).
    pub fn with_capacity(triangles: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(triangles / 2 + 3),
            face_normals: Vec::with_capacity(triangles),
            triangles: Vec::with_capacity(triangles),
            neighbors: HashMap::with_capacity(triangles / 2 + 3),
            lookup: HashMap::with_capacity(triangles / 2 + 3),
        }
    }

    /// Adds triangle `a, b, c` and returns its index.
    ///
    /// The face normal is `normalize((b - a) × (c - a))`, so counter-clockwise
    /// winding faces the viewer. Degenerate triangles get a zero normal.
    pub fn add_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3) -> u32 {
        let corners = [self.vertex_index(a), self.vertex_index(b), self.vertex_index(c)];

        let triangle = self.triangles.len() as u32;
        self.triangles.push(corners);
        self.face_normals.push((b - a).cross(c - a).normalize_or_zero());
        for vertex in corners {
            self.neighbors.entry(vertex).or_default().push(triangle);
        }
        triangle
    }

    fn vertex_index(&mut self, p: Vec3) -> u32 {
        let next = self.vertices.len() as u32;
        let index = match vertex_key(p) {
            Some(key) => *self.lookup.entry(key).or_insert(next),
            None => next,
        };
        if index == next {
            self.vertices.push(p);
        }
        index
    }

    /// Translates all vertices so their mean position is the origin.
    ///
    /// Triangles, face normals and adjacency are unaffected.
    pub fn centralize(&mut self) {
        if self.vertices.is_empty() {
            return;
        }
        let center = self.vertices.iter().copied().sum::<Vec3>() / self.vertices.len() as f32;
        for v in &mut self.vertices {
            *v -= center;
        }

        // Keep dedup working for triangles added after recentring.
        self.lookup.clear();
        for (i, &v) in self.vertices.iter().enumerate() {
            if let Some(key) = vertex_key(v) {
                self.lookup.entry(key).or_insert(i as u32);
            }
        }
        log::debug!("centralized {} vertices around {center}", self.vertices.len());
    }

    /// Averages incident face normals per vertex and finalizes the mesh.
    ///
    /// Fails with `InternalInconsistency` if some vertex has no incident triangle.
    pub fn calculate_normals(self) -> Result<Mesh> {
        let mut vertex_normals = Vec::with_capacity(self.vertices.len());
        for vertex in 0..self.vertices.len() as u32 {
            let incident = self.neighbors.get(&vertex).map_or(&[][..], Vec::as_slice);
            if incident.is_empty() {
                return Err(error!(
                    ErrorKind::InternalInconsistency,
                    "vertex {vertex} has no incident triangle"
                ));
            }
            let sum: Vec3 = incident
                .iter()
                .map(|&t| self.face_normals[t as usize])
                .sum();
            vertex_normals.push(sum / incident.len() as f32);
        }

        Ok(Mesh {
            vertices: self.vertices,
            vertex_normals,
            face_normals: self.face_normals,
            triangles: self.triangles,
            neighbors: self.neighbors,
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    pub fn face_normals(&self) -> &[Vec3] {
        &self.face_normals
    }

    /// Triangles incident to `vertex`, in insertion order.
    pub fn neighbors(&self, vertex: u32) -> Option<&[u32]> {
        self.neighbors.get(&vertex).map(Vec::as_slice)
    }

    #[cfg(test)]
    pub(crate) fn push_isolated_vertex(&mut self, p: Vec3) {
        self.vertices.push(p);
    }
}
