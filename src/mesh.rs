//! Indexed triangle mesh with edge adjacency.
//!
//! A [`Mesh`] keeps positions, normals and texture coordinates in separate
//! arrays; each triangle corner picks one of each by index. The undirected
//! edge list is derived once at construction and never changes, so contour
//! renderers can classify silhouette edges without re-walking the triangles.

use std::collections::HashMap;

use crate::error::MeshError;
use crate::math::{Bounds3, Vec2, Vec3};

/// One triangle corner: indices into the mesh's attribute arrays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Corner {
    pub vertex: usize,
    pub normal: Option<usize>,
    pub texcoord: Option<usize>,
}

impl Corner {
    pub const fn new(vertex: usize, normal: Option<usize>, texcoord: Option<usize>) -> Self {
        Self {
            vertex,
            normal,
            texcoord,
        }
    }

    /// Corner with a position only.
    pub const fn vertex(vertex: usize) -> Self {
        Self::new(vertex, None, None)
    }
}

/// Three corners in counter-clockwise order when seen from the front.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Triangle {
    pub corners: [Corner; 3],
}

impl Triangle {
    pub const fn new(corners: [Corner; 3]) -> Self {
        Self { corners }
    }

    /// Triangle referencing positions only.
    pub const fn from_vertices(a: usize, b: usize, c: usize) -> Self {
        Self::new([Corner::vertex(a), Corner::vertex(b), Corner::vertex(c)])
    }

    pub fn vertex_indices(&self) -> [usize; 3] {
        self.corners.map(|c| c.vertex)
    }
}

/// An undirected edge and the triangles sharing it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edge {
    /// Vertex indices, smaller first.
    pub vertices: [usize; 2],
    /// Adjacent triangle ids, each listed once.
    pub triangles: Vec<usize>,
}

impl Edge {
    /// Edge of an open surface.
    pub fn is_boundary(&self) -> bool {
        self.triangles.len() == 1
    }

    /// Shared by more than two triangles.
    pub fn is_non_manifold(&self) -> bool {
        self.triangles.len() > 2
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    name: String,
    vertices: Vec<Vec3>,
    normals: Vec<Vec3>,
    texcoords: Vec<Vec2>,
    triangles: Vec<Triangle>,
    edges: Vec<Edge>,
}

impl Mesh {
    /// Build a mesh, validating every corner index and deriving the edge list.
    pub fn new(
        vertices: Vec<Vec3>,
        normals: Vec<Vec3>,
        texcoords: Vec<Vec2>,
        triangles: Vec<Triangle>,
    ) -> Result<Self, MeshError> {
        for (t, triangle) in triangles.iter().enumerate() {
            for corner in &triangle.corners {
                check_index(corner.vertex, vertices.len(), |index, count| {
                    MeshError::VertexOutOfRange {
                        triangle: t,
                        index,
                        count,
                    }
                })?;
                if let Some(n) = corner.normal {
                    check_index(n, normals.len(), |index, count| MeshError::NormalOutOfRange {
                        triangle: t,
                        index,
                        count,
                    })?;
                }
                if let Some(uv) = corner.texcoord {
                    check_index(uv, texcoords.len(), |index, count| {
                        MeshError::TexcoordOutOfRange {
                            triangle: t,
                            index,
                            count,
                        }
                    })?;
                }
            }
        }

        let edges = build_edges(&triangles);
        Ok(Self {
            name: String::new(),
            vertices,
            normals,
            texcoords,
            triangles,
            edges,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Copy of the mesh with one freshly computed face normal per corner.
    ///
    /// Every triangle gets three normals of its own, so shading is faceted.
    /// Positions, texture coordinates and the edge list are unchanged.
    pub fn with_flat_normals(&self) -> Self {
        let mut normals = Vec::with_capacity(self.triangles.len() * 3);
        let triangles = self
            .triangles
            .iter()
            .map(|triangle| {
                let [p0, p1, p2] = self.triangle_positions(triangle);
                let face_normal = (p0 - p1).cross(p0 - p2).normalize();
                let base = normals.len();
                normals.extend([face_normal; 3]);

                let mut flat = *triangle;
                for (k, corner) in flat.corners.iter_mut().enumerate() {
                    corner.normal = Some(base + k);
                }
                flat
            })
            .collect();

        Self {
            name: self.name.clone(),
            vertices: self.vertices.clone(),
            normals,
            texcoords: self.texcoords.clone(),
            triangles,
            edges: self.edges.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn texcoords(&self) -> &[Vec2] {
        &self.texcoords
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn vertex(&self, index: usize) -> Vec3 {
        self.vertices[index]
    }

    /// Normal at `index`, or zero for a corner without one.
    pub fn normal(&self, index: Option<usize>) -> Vec3 {
        index.map_or(Vec3::ZERO, |i| self.normals[i])
    }

    /// Texture coordinate at `index`, or zero for a corner without one.
    pub fn texcoord(&self, index: Option<usize>) -> Vec2 {
        index.map_or(Vec2::ZERO, |i| self.texcoords[i])
    }

    pub fn triangle_positions(&self, triangle: &Triangle) -> [Vec3; 3] {
        triangle.corners.map(|c| self.vertices[c.vertex])
    }

    pub fn bounds(&self) -> Bounds3 {
        Bounds3::from_points(&self.vertices)
    }

    // =========================================================================
    // Primitives
    // =========================================================================

    /// Closed cube spanning `[-1, 1]` on every axis, outward-facing.
    ///
    /// Each face maps the full `[0, 1]` texture square. No normals; call
    /// [`with_flat_normals`](Self::with_flat_normals) for lighting.
    pub fn cube() -> Self {
        const VERTICES: [Vec3; 8] = [
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(-1.0, 1.0, -1.0),
            Vec3::new(1.0, 1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(1.0, -1.0, 1.0),
            Vec3::new(-1.0, 1.0, 1.0),
            Vec3::new(-1.0, -1.0, 1.0),
        ];
        // Each face as a counter-clockwise quad a, b, c, d.
        const FACES: [[usize; 4]; 6] = [
            [0, 1, 2, 3], // front (-Z)
            [7, 5, 4, 6], // back (+Z)
            [3, 2, 4, 5], // right (+X)
            [0, 7, 6, 1], // left (-X)
            [1, 6, 4, 2], // top (+Y)
            [0, 3, 5, 7], // bottom (-Y)
        ];
        let texcoords = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 0.0),
        ];

        let corner = |v: usize, uv: usize| Corner::new(v, None, Some(uv));
        let triangles = FACES
            .iter()
            .flat_map(|&[a, b, c, d]| {
                [
                    Triangle::new([corner(a, 0), corner(b, 1), corner(c, 2)]),
                    Triangle::new([corner(a, 0), corner(c, 2), corner(d, 3)]),
                ]
            })
            .collect();

        Self::from_valid_parts("cube", VERTICES.to_vec(), Vec::new(), texcoords, triangles)
    }

    /// Unit quad in the XY plane facing +Z, spanning `[-1, 1]`.
    pub fn quad() -> Self {
        let vertices = vec![
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(-1.0, 1.0, 0.0),
        ];
        let texcoords = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        let corner = |i: usize| Corner::new(i, Some(0), Some(i));
        let triangles = vec![
            Triangle::new([corner(0), corner(1), corner(2)]),
            Triangle::new([corner(0), corner(2), corner(3)]),
        ];

        Self::from_valid_parts("quad", vertices, vec![Vec3::Z], texcoords, triangles)
    }

    /// Constructor for built-in primitives whose indices are known to be valid.
    fn from_valid_parts(
        name: &str,
        vertices: Vec<Vec3>,
        normals: Vec<Vec3>,
        texcoords: Vec<Vec2>,
        triangles: Vec<Triangle>,
    ) -> Self {
        let edges = build_edges(&triangles);
        Self {
            name: name.to_string(),
            vertices,
            normals,
            texcoords,
            triangles,
            edges,
        }
    }
}

fn check_index(
    index: usize,
    count: usize,
    error: impl FnOnce(usize, usize) -> MeshError,
) -> Result<(), MeshError> {
    if index < count {
        Ok(())
    } else {
        Err(error(index, count))
    }
}

/// Undirected edges in first-seen order, each with its adjacent triangles.
fn build_edges(triangles: &[Triangle]) -> Vec<Edge> {
    let mut edges: Vec<Edge> = Vec::with_capacity(triangles.len() * 3 / 2);
    let mut lookup: HashMap<(usize, usize), usize> = HashMap::with_capacity(edges.capacity());

    for (t, triangle) in triangles.iter().enumerate() {
        let [a, b, c] = triangle.vertex_indices();
        for (u, v) in [(a, b), (b, c), (c, a)] {
            let key = (u.min(v), u.max(v));
            let edge_index = *lookup.entry(key).or_insert_with(|| {
                edges.push(Edge {
                    vertices: [key.0, key.1],
                    triangles: Vec::with_capacity(2),
                });
                edges.len() - 1
            });

            let adjacent = &mut edges[edge_index].triangles;
            if !adjacent.contains(&t) {
                adjacent.push(t);
            }
        }
    }

    edges
}
