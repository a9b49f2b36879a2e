//! Host-side persistence of defect indices.
//!
//! The checker writes every category of an analyzed object after each run
//! and the cursor reads them back later, possibly after the host has edited
//! the mesh. Readers treat a missing entry as an empty list.

use std::collections::HashMap;

use crate::category::ProblemCategory;
use crate::mesh::ProblemElement;

/// Storage for defect lists keyed by object and category
pub trait DefectStore {
    /// Replace the list stored for one object and category
    fn put(&mut self, object_id: &str, category: ProblemCategory, elements: &[ProblemElement]);

    /// Stored list, empty when nothing was stored
    fn get(&self, object_id: &str, category: ProblemCategory) -> Vec<ProblemElement>;

    /// Drop every list stored for an object
    fn clear_object(&mut self, object_id: &str);

    /// Objects with at least one stored list
    fn object_ids(&self) -> Vec<String>;
}

/// In-memory [`DefectStore`]
#[derive(Debug, Clone, Default)]
pub struct MemoryDefectStore {
    entries: HashMap<String, HashMap<ProblemCategory, Vec<ProblemElement>>>,
}

impl MemoryDefectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains_object(&self, object_id: &str) -> bool {
        self.entries.contains_key(object_id)
    }
}

impl DefectStore for MemoryDefectStore {
    fn put(&mut self, object_id: &str, category: ProblemCategory, elements: &[ProblemElement]) {
        self.entries
            .entry(object_id.to_string())
            .or_default()
            .insert(category, elements.to_vec());
    }

    fn get(&self, object_id: &str, category: ProblemCategory) -> Vec<ProblemElement> {
        self.entries
            .get(object_id)
            .and_then(|categories| categories.get(&category))
            .cloned()
            .unwrap_or_default()
    }

    fn clear_object(&mut self, object_id: &str) {
        self.entries.remove(object_id);
    }

    fn object_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.entries.keys().cloned().collect();
        ids.sort();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{EdgeId, VertexId};

    #[test]
    fn test_missing_entries_read_empty() {
        let store = MemoryDefectStore::new();
        assert!(store.get("Cube", ProblemCategory::Boundary).is_empty());
        assert!(store.object_ids().is_empty());
    }

    #[test]
    fn test_put_replaces_and_clear_drops() {
        let mut store = MemoryDefectStore::new();
        store.put(
            "Cube",
            ProblemCategory::Boundary,
            &[ProblemElement::Edge(EdgeId(1))],
        );
        store.put(
            "Cube",
            ProblemCategory::Boundary,
            &[ProblemElement::Edge(EdgeId(4))],
        );
        store.put(
            "Cone",
            ProblemCategory::Loose,
            &[ProblemElement::Vertex(VertexId(0))],
        );

        assert_eq!(
            store.get("Cube", ProblemCategory::Boundary),
            vec![ProblemElement::Edge(EdgeId(4))]
        );
        assert_eq!(store.object_ids(), vec!["Cone".to_string(), "Cube".to_string()]);

        store.clear_object("Cube");
        assert!(!store.contains_object("Cube"));
        assert!(store.contains_object("Cone"));
    }
}
