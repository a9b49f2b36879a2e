//! User-facing wording of the report.

use crate::category::ProblemCategory;
use crate::classify::DefectSet;

/// Source of every user-visible string in a report.
///
/// Hosts with their own translation tables implement this; the checker
/// never formats words itself.
pub trait ReportText {
    /// Status line for one object
    fn status(&self, object_name: &str, watertight: bool) -> String;

    /// Count line for one non-empty category
    fn defect_line(&self, category: ProblemCategory, defects: &DefectSet) -> String;

    /// Remediation hints printed under a defect line
    fn remedies(&self, category: ProblemCategory) -> Vec<String>;

    /// Notice shown when a check had nothing to analyze
    fn nothing_to_check(&self) -> String;
}

/// English wording
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishText;

impl ReportText for EnglishText {
    fn status(&self, object_name: &str, watertight: bool) -> String {
        if watertight {
            format!("{}: WATERTIGHT", object_name)
        } else {
            format!("{}: NOT WATERTIGHT", object_name)
        }
    }

    fn defect_line(&self, category: ProblemCategory, defects: &DefectSet) -> String {
        match category {
            ProblemCategory::Boundary => {
                format!("Open boundaries: {} edges", defects.boundary_edges.len())
            }
            ProblemCategory::Loose => {
                format!("Loose vertices: {} vertices", defects.loose_vertices.len())
            }
            ProblemCategory::NonManifold => format!(
                "Non-manifold: {} edges, {} vertices",
                defects.non_manifold_edges.len(),
                defects.non_manifold_vertices.len()
            ),
            ProblemCategory::Normals => {
                format!("Inverted normals: {} faces", defects.inverted_faces.len())
            }
        }
    }

    fn remedies(&self, category: ProblemCategory) -> Vec<String> {
        let hints: &[&str] = match category {
            ProblemCategory::Boundary => &["Fill holes", "Bridge edge loops"],
            ProblemCategory::Loose => &["Delete loose geometry", "Merge vertices by distance"],
            ProblemCategory::NonManifold => &[
                "Merge vertices by distance",
                "Delete interior or duplicate faces",
                "Separate bowtie vertices",
            ],
            ProblemCategory::Normals => &[
                "Recalculate normals outside",
                "Flip the listed faces",
                "Orientation check assumes a convex mesh centered on its origin",
            ],
        };
        hints.iter().map(|h| h.to_string()).collect()
    }

    fn nothing_to_check(&self) -> String {
        "Nothing to check: no mesh objects".to_string()
    }
}
