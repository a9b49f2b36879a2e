//! Scene file format read by checker hosts.

use serde::{Deserialize, Serialize};

/// Object type tag of a mesh.
pub const MESH_OBJECT_TYPE: &str = "MESH";

fn mesh_object_type() -> String {
    MESH_OBJECT_TYPE.to_string()
}

/// A scene: the objects a check may run over.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneFile {
    pub objects: Vec<ObjectData>,
}

impl SceneFile {
    pub fn object(&self, id: &str) -> Option<&ObjectData> {
        self.objects.iter().find(|o| o.id == id)
    }
}

/// One scene object with its raw topology.
///
/// Non-mesh objects only need `id`, `name` and `object_type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectData {
    pub id: String,
    pub name: String,
    #[serde(default = "mesh_object_type")]
    pub object_type: String,
    /// Local-space origin
    #[serde(default)]
    pub origin: [f32; 3],
    #[serde(default)]
    pub vertices: Vec<[f32; 3]>,
    /// Explicit edge list; derived from the faces when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edges: Option<Vec<[u32; 2]>>,
    #[serde(default)]
    pub faces: Vec<Vec<u32>>,
    /// One per face; computed when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normals: Option<Vec<[f32; 3]>>,
    /// Indices of vertices hidden in the editor
    #[serde(default)]
    pub hidden: Vec<u32>,
}

impl ObjectData {
    pub fn is_mesh(&self) -> bool {
        self.object_type.eq_ignore_ascii_case(MESH_OBJECT_TYPE)
    }
}
