//! Construction methods for Mesh.

use glam::Vec3;
use std::collections::HashSet;

use super::types::{edge_key, MeshError};
use super::Mesh;

impl Mesh {
    /// Build a mesh from explicit edges and face loops.
    ///
    /// Face normals are computed with Newell's method; use
    /// [`Mesh::with_face_normals`] to supply the host's own. Faces with fewer
    /// than three vertices are kept (they still count for adjacency) and get a
    /// zero normal.
    pub fn new(
        vertices: Vec<Vec3>,
        edges: Vec<[u32; 2]>,
        faces: Vec<Vec<u32>>,
    ) -> Result<Self, MeshError> {
        let vertex_count = vertices.len();

        for (edge_idx, &[a, b]) in edges.iter().enumerate() {
            check_vertex(a, vertex_count)?;
            check_vertex(b, vertex_count)?;
            if a == b {
                return Err(MeshError::DegenerateEdge {
                    edge: edge_idx,
                    vertex: a,
                });
            }
        }

        let known: HashSet<(u32, u32)> = edges.iter().map(|&[a, b]| edge_key(a, b)).collect();
        for (face_idx, face) in faces.iter().enumerate() {
            for &v in face {
                check_vertex(v, vertex_count)?;
            }
            for (a, b) in loop_pairs(face) {
                if !known.contains(&edge_key(a, b)) {
                    return Err(MeshError::MissingEdge {
                        face: face_idx,
                        a,
                        b,
                    });
                }
            }
        }

        let face_normals = faces
            .iter()
            .map(|face| newell_normal(&vertices, face))
            .collect();

        Ok(Self {
            hidden: vec![false; vertex_count],
            vertices,
            edges,
            faces,
            face_normals,
            origin: Vec3::ZERO,
        })
    }

    /// Build a mesh from face loops alone, deriving the edge list.
    ///
    /// Edges are numbered in the order they are first met while walking the
    /// faces; an edge shared by several faces appears once.
    pub fn from_polygons(vertices: Vec<Vec3>, faces: Vec<Vec<u32>>) -> Result<Self, MeshError> {
        let vertex_count = vertices.len();
        let mut seen = HashSet::new();
        let mut edges = Vec::new();

        for face in &faces {
            for &v in face {
                check_vertex(v, vertex_count)?;
            }
            for (a, b) in loop_pairs(face) {
                if seen.insert(edge_key(a, b)) {
                    edges.push([a, b]);
                }
            }
        }

        Self::new(vertices, edges, faces)
    }

    /// Replace the computed face normals with host-provided ones.
    pub fn with_face_normals(mut self, normals: Vec<Vec3>) -> Result<Self, MeshError> {
        if normals.len() != self.faces.len() {
            return Err(MeshError::NormalCount {
                expected: self.faces.len(),
                actual: normals.len(),
            });
        }
        self.face_normals = normals;
        Ok(self)
    }

    /// Append edges that no face uses (wire edges).
    ///
    /// Pairs already present are still appended; the duplicate entry never
    /// receives faces and is reported as non-manifold.
    pub fn with_loose_edges(
        mut self,
        edges: impl IntoIterator<Item = [u32; 2]>,
    ) -> Result<Self, MeshError> {
        let vertex_count = self.vertices.len();
        for [a, b] in edges {
            check_vertex(a, vertex_count)?;
            check_vertex(b, vertex_count)?;
            if a == b {
                return Err(MeshError::DegenerateEdge {
                    edge: self.edges.len(),
                    vertex: a,
                });
            }
            self.edges.push([a, b]);
        }
        Ok(self)
    }

    /// Mark vertices hidden in the host editor.
    pub fn with_hidden(mut self, hidden: impl IntoIterator<Item = u32>) -> Result<Self, MeshError> {
        let vertex_count = self.vertices.len();
        for v in hidden {
            check_vertex(v, vertex_count)?;
            self.hidden[v as usize] = true;
        }
        Ok(self)
    }

    /// Set the object's local-space origin.
    pub fn with_origin(mut self, origin: Vec3) -> Self {
        self.origin = origin;
        self
    }
}

fn check_vertex(index: u32, vertex_count: usize) -> Result<(), MeshError> {
    if (index as usize) < vertex_count {
        Ok(())
    } else {
        Err(MeshError::VertexOutOfRange {
            index,
            vertex_count,
        })
    }
}

/// Consecutive vertex pairs of a loop, wrapping, skipping repeated vertices.
pub(crate) fn loop_pairs(face: &[u32]) -> impl Iterator<Item = (u32, u32)> + '_ {
    let n = face.len();
    (0..n)
        .map(move |i| (face[i], face[(i + 1) % n]))
        .filter(|(a, b)| a != b)
}

/// Newell's method: robust for non-planar and concave polygons.
fn newell_normal(positions: &[Vec3], face: &[u32]) -> Vec3 {
    if face.len() < crate::constants::MIN_FACE_VERTICES {
        return Vec3::ZERO;
    }

    let mut normal = Vec3::ZERO;
    for i in 0..face.len() {
        let current = positions[face[i] as usize];
        let next = positions[face[(i + 1) % face.len()] as usize];
        normal.x += (current.y - next.y) * (current.z + next.z);
        normal.y += (current.z - next.z) * (current.x + next.x);
        normal.z += (current.x - next.x) * (current.y + next.y);
    }
    normal.normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::super::{EdgeId, FaceId, VertexId};
    use super::*;

    #[test]
    fn test_from_polygons_derives_shared_edges_once() {
        let mesh = cube();
        assert_eq!(mesh.edge_count(), 12);
        // First face walks 0-3, 3-2, 2-1, 1-0
        assert_eq!(mesh.edge(EdgeId(0)), Some([0, 3]));
        assert_eq!(mesh.edge(EdgeId(3)), Some([1, 0]));
    }

    #[test]
    fn test_computed_normals_point_outward_on_cube() {
        let mesh = cube();
        assert!((mesh.face_normal(FaceId(0)).unwrap() - Vec3::NEG_Z).length() < 1e-6);
        assert!((mesh.face_normal(FaceId(1)).unwrap() - Vec3::Z).length() < 1e-6);
        assert!((mesh.face_normal(FaceId(4)).unwrap() - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn test_missing_edge_rejected() {
        let result = Mesh::new(
            vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            vec![[0, 1], [1, 2]],
            vec![vec![0, 1, 2]],
        );
        assert_eq!(
            result,
            Err(MeshError::MissingEdge {
                face: 0,
                a: 2,
                b: 0
            })
        );
    }

    #[test]
    fn test_vertex_out_of_range_rejected() {
        let result = Mesh::from_polygons(vec![Vec3::ZERO, Vec3::X], vec![vec![0, 1, 5]]);
        assert!(matches!(
            result,
            Err(MeshError::VertexOutOfRange { index: 5, .. })
        ));
    }

    #[test]
    fn test_degenerate_edge_rejected() {
        let result = Mesh::new(vec![Vec3::ZERO], vec![[0, 0]], vec![]);
        assert!(matches!(result, Err(MeshError::DegenerateEdge { .. })));
    }

    #[test]
    fn test_normal_count_mismatch() {
        let result = single_triangle().with_face_normals(vec![]);
        assert_eq!(
            result,
            Err(MeshError::NormalCount {
                expected: 1,
                actual: 0
            })
        );
    }

    #[test]
    fn test_degenerate_face_gets_zero_normal() {
        let mesh = Mesh::from_polygons(vec![Vec3::ZERO, Vec3::X], vec![vec![0, 1]]).unwrap();
        assert_eq!(mesh.edge_count(), 1);
        assert_eq!(mesh.face_normal(FaceId(0)), Some(Vec3::ZERO));
    }

    #[test]
    fn test_hidden_and_loose_edges() {
        let mesh = single_triangle()
            .with_hidden([1])
            .unwrap()
            .with_loose_edges([[0, 1]])
            .unwrap();
        assert!(mesh.is_hidden(VertexId(1)));
        assert!(!mesh.is_hidden(VertexId(0)));
        assert_eq!(mesh.edge_count(), 4);
        assert!(single_triangle().with_hidden([7]).is_err());
    }

    #[test]
    fn test_loop_pairs_skip_repeats() {
        let pairs: Vec<_> = loop_pairs(&[0, 0, 1]).collect();
        assert_eq!(pairs, vec![(0, 1), (1, 0)]);
    }
}
