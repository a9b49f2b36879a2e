//! Per-object element selection held by the command line host.

use std::collections::{BTreeSet, HashMap};

use topology::{ProblemElement, SelectionSink};
use tracing::trace;

/// Stand-in for an editor's vertex/edge/face selection
#[derive(Debug, Default)]
pub struct EditorSelection {
    selected: HashMap<String, BTreeSet<ProblemElement>>,
}

impl EditorSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected elements of an object, sorted
    #[cfg(test)]
    pub fn selected(&self, object_id: &str) -> Vec<ProblemElement> {
        self.selected
            .get(object_id)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn count(&self, object_id: &str) -> usize {
        self.selected.get(object_id).map_or(0, BTreeSet::len)
    }
}

impl SelectionSink for EditorSelection {
    fn deselect_all(&mut self, object_id: &str) {
        trace!("Deselect all on {}", object_id);
        self.selected.remove(object_id);
    }

    fn select(&mut self, object_id: &str, elements: &[ProblemElement]) {
        trace!("Select {} elements on {}", elements.len(), object_id);
        self.selected
            .entry(object_id.to_string())
            .or_default()
            .extend(elements.iter().copied());
    }
}
