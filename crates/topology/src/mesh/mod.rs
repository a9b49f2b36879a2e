//! Input mesh for watertight analysis
//!
//! Holds the raw arrays a host hands over (positions, edges, face loops,
//! face normals, hidden flags) after checking the invariants the analysis
//! relies on. The mesh is immutable once built; a host that edits geometry
//! builds a new one before the next check.

mod construction;
mod types;

use glam::Vec3;

pub use types::{EdgeId, FaceId, MeshError, ProblemElement, VertexId};

pub(crate) use construction::loop_pairs;
pub(crate) use types::edge_key;

/// Polygon mesh with explicit edges
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub(crate) vertices: Vec<Vec3>,
    /// Unordered vertex pairs
    pub(crate) edges: Vec<[u32; 2]>,
    /// Vertex loops, one per face
    pub(crate) faces: Vec<Vec<u32>>,
    /// One per face; zero for degenerate faces
    pub(crate) face_normals: Vec<Vec3>,
    /// One per vertex
    pub(crate) hidden: Vec<bool>,
    /// Object's local-space origin, the source of the orientation ray
    pub(crate) origin: Vec3,
}

impl Mesh {
    /// Mesh with no elements
    pub fn empty() -> Self {
        Self {
            vertices: Vec::new(),
            edges: Vec::new(),
            faces: Vec::new(),
            face_normals: Vec::new(),
            hidden: Vec::new(),
            origin: Vec3::ZERO,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.edges.is_empty() && self.faces.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn position(&self, id: VertexId) -> Option<Vec3> {
        self.vertices.get(id.index()).copied()
    }

    pub fn edges(&self) -> &[[u32; 2]] {
        &self.edges
    }

    pub fn edge(&self, id: EdgeId) -> Option<[u32; 2]> {
        self.edges.get(id.index()).copied()
    }

    pub fn faces(&self) -> &[Vec<u32>] {
        &self.faces
    }

    /// Vertex loop of a face
    pub fn face(&self, id: FaceId) -> Option<&[u32]> {
        self.faces.get(id.index()).map(Vec::as_slice)
    }

    pub fn face_normal(&self, id: FaceId) -> Option<Vec3> {
        self.face_normals.get(id.index()).copied()
    }

    pub fn face_normals(&self) -> &[Vec3] {
        &self.face_normals
    }

    /// Hidden vertices never count as loose
    pub fn is_hidden(&self, id: VertexId) -> bool {
        self.hidden.get(id.index()).copied().unwrap_or(false)
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Whether an element index still fits this mesh
    pub fn contains(&self, element: ProblemElement) -> bool {
        match element {
            ProblemElement::Vertex(v) => v.index() < self.vertex_count(),
            ProblemElement::Edge(e) => e.index() < self.edge_count(),
            ProblemElement::Face(f) => f.index() < self.face_count(),
        }
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::empty()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_cube_counts() {
        let mesh = cube();
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.edge_count(), 12);
        assert_eq!(mesh.face_count(), 6);
        assert!(!mesh.is_empty());
    }

    #[test]
    fn test_contains_element() {
        let mesh = single_triangle();
        assert!(mesh.contains(ProblemElement::Vertex(VertexId(2))));
        assert!(!mesh.contains(ProblemElement::Vertex(VertexId(3))));
        assert!(mesh.contains(ProblemElement::Edge(EdgeId(2))));
        assert!(!mesh.contains(ProblemElement::Face(FaceId(1))));
    }

    #[test]
    fn test_empty_mesh() {
        let mesh = Mesh::default();
        assert!(mesh.is_empty());
        assert_eq!(mesh.position(VertexId(0)), None);
        assert!(!mesh.is_hidden(VertexId(0)));
    }
}
