//! Incidence maps for one analysis pass.
//!
//! Built from scratch for every check and dropped afterwards. The host may
//! have edited the mesh between checks, so nothing here is cached or updated
//! in place.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::mesh::{edge_key, loop_pairs, EdgeId, FaceId, Mesh, VertexId};

/// Edge→face, vertex→edge and vertex→face incidence of a mesh
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjacencyIndex {
    /// Faces using each edge, in face order, each face at most once
    edge_faces: Vec<Vec<FaceId>>,
    /// Edges touching each vertex, in edge order
    vertex_edges: Vec<Vec<EdgeId>>,
    /// Faces whose loop contains each vertex, in face order
    vertex_faces: Vec<Vec<FaceId>>,
}

impl AdjacencyIndex {
    /// Build the incidence maps.
    ///
    /// Runs in time proportional to the edge count plus the total length of
    /// all face loops. When the edge list holds the same vertex pair twice,
    /// faces attach to the first entry only.
    pub fn build(mesh: &Mesh) -> Self {
        let mut lookup: HashMap<(u32, u32), EdgeId> = HashMap::with_capacity(mesh.edge_count());
        let mut vertex_edges: Vec<Vec<EdgeId>> = vec![Vec::new(); mesh.vertex_count()];

        for (edge_idx, &[a, b]) in mesh.edges().iter().enumerate() {
            let edge = EdgeId(edge_idx as u32);
            lookup.entry(edge_key(a, b)).or_insert(edge);
            for v in [a, b] {
                if let Some(edges) = vertex_edges.get_mut(v as usize) {
                    edges.push(edge);
                }
            }
        }

        let mut edge_faces: Vec<Vec<FaceId>> = vec![Vec::new(); mesh.edge_count()];
        let mut vertex_faces: Vec<Vec<FaceId>> = vec![Vec::new(); mesh.vertex_count()];

        for (face_idx, face_loop) in mesh.faces().iter().enumerate() {
            let face = FaceId(face_idx as u32);

            // Only this face is pushed while walking its loop, so a repeat
            // can only ever be the last entry.
            for &v in face_loop {
                if let Some(faces) = vertex_faces.get_mut(v as usize) {
                    if faces.last() != Some(&face) {
                        faces.push(face);
                    }
                }
            }

            for (a, b) in loop_pairs(face_loop) {
                let Some(&edge) = lookup.get(&edge_key(a, b)) else {
                    trace!("face {} uses unknown edge ({}, {})", face_idx, a, b);
                    continue;
                };
                let faces = &mut edge_faces[edge.index()];
                if faces.last() != Some(&face) {
                    faces.push(face);
                }
            }
        }

        debug!(
            "Adjacency built: {} vertices, {} edges, {} faces",
            vertex_edges.len(),
            edge_faces.len(),
            mesh.face_count()
        );

        Self {
            edge_faces,
            vertex_edges,
            vertex_faces,
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn edge_count(&self) -> usize {
        self.edge_faces.len()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_edges.len()
    }

    /// Faces incident to an edge (empty for unknown edges)
    pub fn edge_faces(&self, edge: EdgeId) -> &[FaceId] {
        self.edge_faces.get(edge.index()).map_or(&[], Vec::as_slice)
    }

    pub fn edge_face_count(&self, edge: EdgeId) -> usize {
        self.edge_faces(edge).len()
    }

    /// Edges incident to a vertex (empty for unknown vertices)
    pub fn vertex_edges(&self, vertex: VertexId) -> &[EdgeId] {
        self.vertex_edges.get(vertex.index()).map_or(&[], Vec::as_slice)
    }

    pub fn vertex_edge_count(&self, vertex: VertexId) -> usize {
        self.vertex_edges(vertex).len()
    }

    /// Faces whose loop contains a vertex
    pub fn vertex_faces(&self, vertex: VertexId) -> &[FaceId] {
        self.vertex_faces.get(vertex.index()).map_or(&[], Vec::as_slice)
    }

    /// All edge ids with their incident face counts
    pub fn edge_face_counts(&self) -> impl Iterator<Item = (EdgeId, usize)> + '_ {
        self.edge_faces
            .iter()
            .enumerate()
            .map(|(i, faces)| (EdgeId(i as u32), faces.len()))
    }
}
