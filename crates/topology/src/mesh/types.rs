//! Element identifiers and mesh construction errors.

use serde::{Deserialize, Serialize};

/// Type-safe vertex identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VertexId(pub u32);

/// Type-safe edge identifier (index into the mesh edge list)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub u32);

/// Type-safe face identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FaceId(pub u32);

impl VertexId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl EdgeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl FaceId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One mesh element handed to stores, cursors and selection sinks
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProblemElement {
    Vertex(VertexId),
    Edge(EdgeId),
    Face(FaceId),
}

impl std::fmt::Display for ProblemElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vertex(v) => write!(f, "vertex {}", v.0),
            Self::Edge(e) => write!(f, "edge {}", e.0),
            Self::Face(face) => write!(f, "face {}", face.0),
        }
    }
}

/// Order-independent key for an edge between two vertices
#[inline]
pub(crate) fn edge_key(a: u32, b: u32) -> (u32, u32) {
    if a < b { (a, b) } else { (b, a) }
}

/// Errors raised while building a [`super::Mesh`] from host data
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    #[error("vertex index {index} out of range (mesh has {vertex_count} vertices)")]
    VertexOutOfRange { index: u32, vertex_count: usize },
    #[error("edge {edge} connects vertex {vertex} to itself")]
    DegenerateEdge { edge: usize, vertex: u32 },
    #[error("face {face} uses edge ({a}, {b}) which is missing from the edge list")]
    MissingEdge { face: usize, a: u32, b: u32 },
    #[error("expected {expected} face normals, got {actual}")]
    NormalCount { expected: usize, actual: usize },
}
