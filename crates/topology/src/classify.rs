//! Defect classification.
//!
//! Four independent scans over an [`AdjacencyIndex`]:
//! - Boundary edges (exactly one incident face)
//! - Loose vertices (fewer than two incident edges, hidden vertices excluded)
//! - Non-manifold edges and vertices
//! - Inverted faces (centroid-ray orientation heuristic)
//!
//! Scans never fail. Malformed faces are skipped by the orientation scan only.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::adjacency::AdjacencyIndex;
use crate::category::{CategorySet, ProblemCategory};
use crate::constants::{DEGENERATE_NORMAL_EPSILON, MIN_FACE_VERTICES, MIN_VERTEX_EDGES};
use crate::mesh::{EdgeId, FaceId, Mesh, ProblemElement, VertexId};
use watertight_config::CheckerConfig;

/// Defect lists of one analyzed object, each sorted ascending
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefectSet {
    pub boundary_edges: Vec<EdgeId>,
    pub loose_vertices: Vec<VertexId>,
    pub inverted_faces: Vec<FaceId>,
    pub non_manifold_edges: Vec<EdgeId>,
    pub non_manifold_vertices: Vec<VertexId>,
}

impl DefectSet {
    /// Watertight iff all four categories are empty
    pub fn is_watertight(&self) -> bool {
        ProblemCategory::ALL.into_iter().all(|c| !self.has(c))
    }

    pub fn has(&self, category: ProblemCategory) -> bool {
        match category {
            ProblemCategory::Boundary => !self.boundary_edges.is_empty(),
            ProblemCategory::Loose => !self.loose_vertices.is_empty(),
            ProblemCategory::NonManifold => {
                !self.non_manifold_edges.is_empty() || !self.non_manifold_vertices.is_empty()
            }
            ProblemCategory::Normals => !self.inverted_faces.is_empty(),
        }
    }

    /// Elements of one category; non-manifold lists edges before vertices
    pub fn elements(&self, category: ProblemCategory) -> Vec<ProblemElement> {
        match category {
            ProblemCategory::Boundary => edges(&self.boundary_edges).collect(),
            ProblemCategory::Loose => vertices(&self.loose_vertices).collect(),
            ProblemCategory::NonManifold => edges(&self.non_manifold_edges)
                .chain(vertices(&self.non_manifold_vertices))
                .collect(),
            ProblemCategory::Normals => self
                .inverted_faces
                .iter()
                .map(|&f| ProblemElement::Face(f))
                .collect(),
        }
    }

    /// Every problem element, categories in report order, duplicates removed
    pub fn all_elements(&self) -> Vec<ProblemElement> {
        let mut all: Vec<ProblemElement> = ProblemCategory::ALL
            .into_iter()
            .flat_map(|c| self.elements(c))
            .collect();
        let mut seen = HashSet::new();
        all.retain(|e| seen.insert(*e));
        all
    }

    /// Number of elements in one category
    pub fn count(&self, category: ProblemCategory) -> usize {
        match category {
            ProblemCategory::Boundary => self.boundary_edges.len(),
            ProblemCategory::Loose => self.loose_vertices.len(),
            ProblemCategory::NonManifold => {
                self.non_manifold_edges.len() + self.non_manifold_vertices.len()
            }
            ProblemCategory::Normals => self.inverted_faces.len(),
        }
    }

    /// Categories with at least one element
    pub fn categories(&self) -> CategorySet {
        ProblemCategory::ALL
            .into_iter()
            .filter(|&c| self.has(c))
            .collect()
    }
}

fn edges(list: &[EdgeId]) -> impl Iterator<Item = ProblemElement> + '_ {
    list.iter().map(|&e| ProblemElement::Edge(e))
}

fn vertices(list: &[VertexId]) -> impl Iterator<Item = ProblemElement> + '_ {
    list.iter().map(|&v| ProblemElement::Vertex(v))
}

/// Runs the defect scans for one mesh
pub struct DefectClassifier<'a> {
    mesh: &'a Mesh,
    adjacency: &'a AdjacencyIndex,
    config: &'a CheckerConfig,
}

impl<'a> DefectClassifier<'a> {
    pub fn new(mesh: &'a Mesh, adjacency: &'a AdjacencyIndex, config: &'a CheckerConfig) -> Self {
        Self {
            mesh,
            adjacency,
            config,
        }
    }

    /// Run every enabled scan
    pub fn classify(&self) -> DefectSet {
        let checks = self.config.checks;
        let defects = DefectSet {
            boundary_edges: if checks.boundary {
                self.boundary_edges()
            } else {
                Vec::new()
            },
            loose_vertices: if checks.loose {
                self.loose_vertices()
            } else {
                Vec::new()
            },
            inverted_faces: if checks.normals {
                self.inverted_faces()
            } else {
                Vec::new()
            },
            non_manifold_edges: if checks.non_manifold {
                self.non_manifold_edges()
            } else {
                Vec::new()
            },
            non_manifold_vertices: if checks.non_manifold {
                self.non_manifold_vertices()
            } else {
                Vec::new()
            },
        };

        debug!(
            "Classified: {} boundary, {} loose, {} inverted, {} non-manifold edges, {} non-manifold vertices",
            defects.boundary_edges.len(),
            defects.loose_vertices.len(),
            defects.inverted_faces.len(),
            defects.non_manifold_edges.len(),
            defects.non_manifold_vertices.len()
        );

        defects
    }

    /// Edges with exactly one incident face.
    ///
    /// Face-less edges are not boundary; they are reported as non-manifold.
    pub fn boundary_edges(&self) -> Vec<EdgeId> {
        self.adjacency
            .edge_face_counts()
            .filter(|&(_, count)| count == 1)
            .map(|(edge, _)| edge)
            .collect()
    }

    /// Visible vertices with fewer than two incident edges
    pub fn loose_vertices(&self) -> Vec<VertexId> {
        (0..self.mesh.vertex_count() as u32)
            .map(VertexId)
            .filter(|&v| {
                self.adjacency.vertex_edge_count(v) < MIN_VERTEX_EDGES && !self.mesh.is_hidden(v)
            })
            .collect()
    }

    /// Edges whose incident face count is neither 1 nor 2.
    ///
    /// With `boundary_is_non_manifold` set, single-face edges are included.
    pub fn non_manifold_edges(&self) -> Vec<EdgeId> {
        let include_boundary = self.config.boundary_is_non_manifold;
        self.adjacency
            .edge_face_counts()
            .filter(|&(_, count)| match count {
                1 => include_boundary,
                2 => false,
                _ => true,
            })
            .map(|(edge, _)| edge)
            .collect()
    }

    /// Vertices whose surroundings are not a single fan.
    ///
    /// A vertex with edges is non-manifold when one of its edges has no face
    /// or more than two, or when its faces split into several fans. Faces
    /// belong to one fan when a chain of two-face edges at the vertex links
    /// them.
    pub fn non_manifold_vertices(&self) -> Vec<VertexId> {
        (0..self.mesh.vertex_count() as u32)
            .map(VertexId)
            .filter(|&v| self.is_non_manifold_vertex(v))
            .collect()
    }

    fn is_non_manifold_vertex(&self, vertex: VertexId) -> bool {
        let edges = self.adjacency.vertex_edges(vertex);
        if edges.is_empty() {
            return false;
        }

        let bad_edge = edges.iter().any(|&e| {
            let count = self.adjacency.edge_face_count(e);
            count == 0 || count > 2
        });
        if bad_edge {
            return true;
        }

        self.fan_count(vertex) > 1
    }

    /// Number of face fans around a vertex
    fn fan_count(&self, vertex: VertexId) -> usize {
        let faces = self.adjacency.vertex_faces(vertex);
        if faces.len() < 2 {
            return faces.len();
        }

        let mut parent: Vec<usize> = (0..faces.len()).collect();
        // vertex_faces is sorted by face id
        let local = |face: FaceId| faces.binary_search(&face).ok();

        for &edge in self.adjacency.vertex_edges(vertex) {
            let [a, b] = match self.adjacency.edge_faces(edge) {
                &[a, b] => [a, b],
                _ => continue,
            };
            if let (Some(i), Some(j)) = (local(a), local(b)) {
                let (ri, rj) = (find(&mut parent, i), find(&mut parent, j));
                if ri != rj {
                    parent[ri] = rj;
                }
            }
        }

        (0..faces.len()).filter(|&i| find(&mut parent, i) == i).count()
    }

    /// Faces whose normal points toward the object's origin.
    ///
    /// Compares the normal with the ray from the origin to the face centroid.
    /// Only reliable for convex meshes centered on their origin.
    pub fn inverted_faces(&self) -> Vec<FaceId> {
        let origin = self.mesh.origin();
        let tolerance = self.config.orientation_tolerance;

        self.mesh
            .faces()
            .iter()
            .enumerate()
            .filter_map(|(face_idx, face_loop)| {
                let face = FaceId(face_idx as u32);
                if face_loop.len() < MIN_FACE_VERTICES {
                    return None;
                }
                let normal = self.mesh.face_normal(face)?;
                if normal.length_squared() < DEGENERATE_NORMAL_EPSILON {
                    return None;
                }

                let sum: glam::Vec3 = face_loop
                    .iter()
                    .filter_map(|&v| self.mesh.position(VertexId(v)))
                    .sum();
                let centroid = sum / face_loop.len() as f32;

                ((centroid - origin).dot(normal) < -tolerance).then_some(face)
            })
            .collect()
    }
}

fn find(parent: &mut [usize], mut i: usize) -> usize {
    while parent[i] != i {
        parent[i] = parent[parent[i]];
        i = parent[i];
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::fixtures::*;
    use glam::Vec3;

    fn classify(mesh: &Mesh) -> DefectSet {
        classify_with(mesh, &CheckerConfig::default())
    }

    fn classify_with(mesh: &Mesh, config: &CheckerConfig) -> DefectSet {
        let adjacency = AdjacencyIndex::build(mesh);
        DefectClassifier::new(mesh, &adjacency, config).classify()
    }

    #[test]
    fn test_closed_cube_is_watertight() {
        let defects = classify(&cube());
        assert!(defects.is_watertight());
        assert_eq!(defects, DefectSet::default());
    }

    #[test]
    fn test_closed_tetrahedron_is_watertight() {
        assert!(classify(&tetrahedron()).is_watertight());
    }

    #[test]
    fn test_single_triangle_all_boundary() {
        let defects = classify(&single_triangle());
        assert_eq!(defects.boundary_edges, vec![EdgeId(0), EdgeId(1), EdgeId(2)]);
        assert!(defects.loose_vertices.is_empty());
        assert!(defects.non_manifold_edges.is_empty());
        assert!(defects.non_manifold_vertices.is_empty());
        assert!(defects.inverted_faces.is_empty());
        assert_eq!(
            defects.categories().iter().collect::<Vec<_>>(),
            vec![ProblemCategory::Boundary]
        );
    }

    #[test]
    fn test_flipped_normal_only_that_face() {
        let defects = classify(&cube_with_flipped_normal(3));
        assert_eq!(defects.inverted_faces, vec![FaceId(3)]);
        assert!(defects.boundary_edges.is_empty());
        assert!(defects.loose_vertices.is_empty());
        assert!(defects.non_manifold_edges.is_empty());
        assert!(defects.non_manifold_vertices.is_empty());
        assert_eq!(
            defects.categories().iter().collect::<Vec<_>>(),
            vec![ProblemCategory::Normals]
        );
        assert!(!defects.is_watertight());
    }

    #[test]
    fn test_high_valence_fan_is_one_fan() {
        // Closed cone: apex 0 shared by every side, rim closed by a cap
        // around center vertex 1
        let sides = 2000u32;
        let mut positions = vec![Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 0.0, -1.0)];
        for i in 0..sides {
            let angle = i as f32 / sides as f32 * std::f32::consts::TAU;
            positions.push(Vec3::new(angle.cos(), angle.sin(), 0.0));
        }
        let rim = |i: u32| 2 + i % sides;
        let mut faces = Vec::new();
        for i in 0..sides {
            faces.push(vec![0, rim(i), rim(i + 1)]);
            faces.push(vec![1, rim(i + 1), rim(i)]);
        }
        let mesh = Mesh::from_polygons(positions, faces).unwrap();

        let adjacency = AdjacencyIndex::build(&mesh);
        assert_eq!(adjacency.vertex_faces(VertexId(0)).len(), sides as usize);
        let defects = classify(&mesh);
        assert!(defects.non_manifold_vertices.is_empty());
        assert!(defects.non_manifold_edges.is_empty());
        assert!(defects.boundary_edges.is_empty());
        assert!(defects.inverted_faces.is_empty());
    }

    #[test]
    fn test_two_cones_sharing_apex_are_two_fans() {
        // Two closed tetrahedra joined only at vertex 0
        let mesh = Mesh::from_polygons(
            vec![
                Vec3::ZERO,
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(1.0, 0.0, 1.0),
                Vec3::new(-1.0, 0.0, 0.0),
                Vec3::new(-1.0, 1.0, 0.0),
                Vec3::new(-1.0, 0.0, 1.0),
            ],
            vec![
                vec![0, 2, 1],
                vec![0, 1, 3],
                vec![0, 3, 2],
                vec![1, 2, 3],
                vec![0, 4, 5],
                vec![0, 6, 4],
                vec![0, 5, 6],
                vec![4, 6, 5],
            ],
        )
        .unwrap();
        let defects = classify(&mesh);
        assert_eq!(defects.non_manifold_vertices, vec![VertexId(0)]);
        assert!(defects.non_manifold_edges.is_empty());
        assert!(defects.boundary_edges.is_empty());
    }

    #[test]
    fn test_three_face_edge_is_non_manifold_not_boundary() {
        let defects = classify(&cube_with_duplicate_face());
        assert!(defects.non_manifold_edges.contains(&EdgeId(3)));
        assert_eq!(defects.non_manifold_edges.len(), 4);
        assert!(defects.boundary_edges.is_empty());
        // Corners of the duplicated face touch three-face edges
        assert_eq!(
            defects.non_manifold_vertices,
            vec![VertexId(0), VertexId(1), VertexId(2), VertexId(3)]
        );
    }

    #[test]
    fn test_bowtie_vertex() {
        let defects = classify(&bowtie());
        assert_eq!(defects.non_manifold_vertices, vec![VertexId(0)]);
        assert!(defects.non_manifold_edges.is_empty());
        assert_eq!(defects.boundary_edges.len(), 6);
    }

    #[test]
    fn test_open_fan_vertex_is_manifold() {
        // Three triangles around vertex 0, open on one side
        let mesh = Mesh::from_polygons(
            vec![
                Vec3::ZERO,
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
                Vec3::new(-1.0, 0.0, 0.0),
                Vec3::new(0.0, -1.0, 0.0),
            ],
            vec![vec![0, 1, 2], vec![0, 2, 3], vec![0, 3, 4]],
        )
        .unwrap();
        let defects = classify(&mesh);
        assert!(defects.non_manifold_vertices.is_empty());
        assert_eq!(defects.boundary_edges.len(), 5);
    }

    #[test]
    fn test_loose_vertex_and_hidden_exclusion() {
        let mut positions = cube_positions();
        positions.push(Vec3::new(5.0, 5.0, 5.0));
        positions.push(Vec3::new(6.0, 6.0, 6.0));
        let mesh = Mesh::from_polygons(positions, cube_faces())
            .unwrap()
            .with_hidden([9])
            .unwrap();

        let defects = classify(&mesh);
        assert_eq!(defects.loose_vertices, vec![VertexId(8)]);
        // A vertex without edges is loose, not non-manifold
        assert!(defects.non_manifold_vertices.is_empty());
    }

    #[test]
    fn test_wire_edge_is_non_manifold_only() {
        let mut positions = cube_positions();
        positions.push(Vec3::new(3.0, 0.0, 0.0));
        let mesh = Mesh::from_polygons(positions, cube_faces())
            .unwrap()
            .with_loose_edges([[1, 8]])
            .unwrap();

        let defects = classify(&mesh);
        assert_eq!(defects.non_manifold_edges, vec![EdgeId(12)]);
        assert!(defects.boundary_edges.is_empty());
        assert_eq!(defects.loose_vertices, vec![VertexId(8)]);
        assert_eq!(defects.non_manifold_vertices, vec![VertexId(1), VertexId(8)]);
    }

    #[test]
    fn test_boundary_policy_includes_open_edges() {
        let mut config = CheckerConfig::default();
        config.boundary_is_non_manifold = true;
        let defects = classify_with(&single_triangle(), &config);
        assert_eq!(defects.non_manifold_edges.len(), 3);
        assert_eq!(defects.boundary_edges.len(), 3);
    }

    #[test]
    fn test_disabled_scan_yields_empty_list() {
        let mut config = CheckerConfig::default();
        config.checks.boundary = false;
        let defects = classify_with(&single_triangle(), &config);
        assert!(defects.boundary_edges.is_empty());
        assert!(defects.is_watertight());
    }

    #[test]
    fn test_orientation_skips_degenerate_faces() {
        let mesh = Mesh::from_polygons(vec![Vec3::X, Vec3::Y], vec![vec![0, 1]]).unwrap();
        assert!(classify(&mesh).inverted_faces.is_empty());

        let zero = single_triangle().with_face_normals(vec![Vec3::ZERO]).unwrap();
        assert!(classify(&zero).inverted_faces.is_empty());
    }

    #[test]
    fn test_off_center_origin_changes_verdict() {
        // The heuristic depends on the origin; pushing it outside the cube
        // makes the near face look inverted
        let mesh = cube().with_origin(Vec3::new(0.0, 0.0, 5.0));
        let defects = classify(&mesh);
        assert!(defects.inverted_faces.contains(&FaceId(1)));
    }

    #[test]
    fn test_idempotent() {
        let mesh = cube_with_duplicate_face();
        assert_eq!(classify(&mesh), classify(&mesh));
    }

    #[test]
    fn test_elements_order_and_dedup() {
        let defects = DefectSet {
            boundary_edges: vec![EdgeId(1)],
            non_manifold_edges: vec![EdgeId(1), EdgeId(4)],
            non_manifold_vertices: vec![VertexId(2)],
            ..Default::default()
        };
        assert_eq!(
            defects.elements(ProblemCategory::NonManifold),
            vec![
                ProblemElement::Edge(EdgeId(1)),
                ProblemElement::Edge(EdgeId(4)),
                ProblemElement::Vertex(VertexId(2)),
            ]
        );
        assert_eq!(defects.all_elements().len(), 3);
        assert_eq!(defects.count(ProblemCategory::NonManifold), 3);
    }
}
