//! Pushing problem elements into the host's editor selection.

use tracing::warn;

use crate::error::Notice;
use crate::mesh::{Mesh, ProblemElement};

/// Host editor selection
pub trait SelectionSink {
    /// Clear the object's vertex, edge and face selection
    fn deselect_all(&mut self, object_id: &str);

    /// Add elements to the object's selection
    fn select(&mut self, object_id: &str, elements: &[ProblemElement]);
}

/// Elements that still fit a mesh, plus how many did not
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Retained {
    pub elements: Vec<ProblemElement>,
    pub dropped: usize,
}

/// Drop element indices that no longer fit the mesh.
///
/// Stored indices outlive the analysis that produced them; the host may
/// have edited the mesh in between.
pub fn retain_in_range(mesh: &Mesh, elements: &[ProblemElement]) -> Retained {
    let kept: Vec<ProblemElement> = elements
        .iter()
        .copied()
        .filter(|&e| mesh.contains(e))
        .collect();
    Retained {
        dropped: elements.len() - kept.len(),
        elements: kept,
    }
}

/// Replace the object's selection with the in-range subset of `elements`.
///
/// Returns a [`Notice::StaleIndex`] when anything was dropped.
pub fn apply_selection(
    sink: &mut dyn SelectionSink,
    object_id: &str,
    mesh: &Mesh,
    elements: &[ProblemElement],
) -> Option<Notice> {
    let retained = retain_in_range(mesh, elements);
    sink.deselect_all(object_id);
    if !retained.elements.is_empty() {
        sink.select(object_id, &retained.elements);
    }

    if retained.dropped == 0 {
        return None;
    }
    warn!(
        "Dropped {} stale indices selecting problems on {}",
        retained.dropped, object_id
    );
    Some(Notice::StaleIndex {
        object_id: object_id.to_string(),
        dropped: retained.dropped,
    })
}

/// Sink that records calls, for tests
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingSink {
    pub calls: Vec<(String, Option<Vec<ProblemElement>>)>,
}

#[cfg(test)]
impl SelectionSink for RecordingSink {
    fn deselect_all(&mut self, object_id: &str) {
        self.calls.push((object_id.to_string(), None));
    }

    fn select(&mut self, object_id: &str, elements: &[ProblemElement]) {
        self.calls.push((object_id.to_string(), Some(elements.to_vec())));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::fixtures::single_triangle;
    use crate::mesh::{EdgeId, FaceId, VertexId};

    #[test]
    fn test_retain_drops_out_of_range() {
        let mesh = single_triangle();
        let retained = retain_in_range(
            &mesh,
            &[
                ProblemElement::Edge(EdgeId(2)),
                ProblemElement::Edge(EdgeId(9)),
                ProblemElement::Face(FaceId(0)),
                ProblemElement::Vertex(VertexId(3)),
            ],
        );
        assert_eq!(
            retained.elements,
            vec![
                ProblemElement::Edge(EdgeId(2)),
                ProblemElement::Face(FaceId(0))
            ]
        );
        assert_eq!(retained.dropped, 2);
    }

    #[test]
    fn test_apply_selection_reports_stale() {
        let mesh = single_triangle();
        let mut sink = RecordingSink::default();
        let notice = apply_selection(
            &mut sink,
            "Tri",
            &mesh,
            &[
                ProblemElement::Vertex(VertexId(0)),
                ProblemElement::Vertex(VertexId(5)),
            ],
        );

        assert_eq!(
            notice,
            Some(Notice::StaleIndex {
                object_id: "Tri".into(),
                dropped: 1
            })
        );
        assert_eq!(sink.calls.len(), 2);
        assert_eq!(sink.calls[0], ("Tri".to_string(), None));
        assert_eq!(
            sink.calls[1].1,
            Some(vec![ProblemElement::Vertex(VertexId(0))])
        );
    }

    #[test]
    fn test_all_stale_only_deselects() {
        let mesh = single_triangle();
        let mut sink = RecordingSink::default();
        apply_selection(&mut sink, "Tri", &mesh, &[ProblemElement::Face(FaceId(3))]);
        assert_eq!(sink.calls, vec![("Tri".to_string(), None)]);
    }
}
