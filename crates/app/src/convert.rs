//! Mapping between wire types and the analysis core.

use glam::Vec3;
use topology::{Mesh, MeshError, ProblemCategory, ProblemElement, SceneObject};
use tracing::warn;
use watertight_ipc::{ElementRef, ObjectData, ProblemKind};

/// Object kind given to meshes whose data failed validation
pub const INVALID_MESH_KIND: &str = "INVALID_MESH";

pub fn category(kind: ProblemKind) -> ProblemCategory {
    match kind {
        ProblemKind::Boundary => ProblemCategory::Boundary,
        ProblemKind::Loose => ProblemCategory::Loose,
        ProblemKind::NonManifold => ProblemCategory::NonManifold,
        ProblemKind::Normals => ProblemCategory::Normals,
    }
}

pub fn problem_kind(category: ProblemCategory) -> ProblemKind {
    match category {
        ProblemCategory::Boundary => ProblemKind::Boundary,
        ProblemCategory::Loose => ProblemKind::Loose,
        ProblemCategory::NonManifold => ProblemKind::NonManifold,
        ProblemCategory::Normals => ProblemKind::Normals,
    }
}

pub fn direction(direction: watertight_ipc::StepDirection) -> topology::StepDirection {
    match direction {
        watertight_ipc::StepDirection::Next => topology::StepDirection::Next,
        watertight_ipc::StepDirection::Previous => topology::StepDirection::Previous,
    }
}

pub fn element_ref(element: ProblemElement) -> ElementRef {
    match element {
        ProblemElement::Vertex(v) => ElementRef::Vertex(v.0),
        ProblemElement::Edge(e) => ElementRef::Edge(e.0),
        ProblemElement::Face(f) => ElementRef::Face(f.0),
    }
}

/// Build a validated mesh from scene data
pub fn build_mesh(data: &ObjectData) -> Result<Mesh, MeshError> {
    let vertices: Vec<Vec3> = data.vertices.iter().copied().map(Vec3::from).collect();
    let faces = data.faces.clone();

    let mut mesh = match &data.edges {
        Some(edges) => Mesh::new(vertices, edges.clone(), faces)?,
        None => Mesh::from_polygons(vertices, faces)?,
    };
    if let Some(normals) = &data.normals {
        mesh = mesh.with_face_normals(normals.iter().copied().map(Vec3::from).collect())?;
    }

    Ok(mesh
        .with_hidden(data.hidden.iter().copied())?
        .with_origin(Vec3::from(data.origin)))
}

/// Turn scene data into a check item.
///
/// A mesh that fails validation is logged and handed over as a non-mesh
/// item, so the check reports it as skipped.
pub fn scene_object(data: &ObjectData) -> SceneObject {
    if !data.is_mesh() {
        return SceneObject::other(&data.id, &data.name, &data.object_type);
    }
    match build_mesh(data) {
        Ok(mesh) => SceneObject::mesh(&data.id, &data.name, mesh),
        Err(e) => {
            warn!("Skipping {}: invalid mesh data: {}", data.name, e);
            SceneObject::other(&data.id, &data.name, INVALID_MESH_KIND)
        }
    }
}
