//! Informational conditions raised while checking and navigating defects.
//!
//! None of these abort a run. Mesh construction failures live in
//! [`crate::mesh::MeshError`].

use serde::{Deserialize, Serialize};

use crate::category::ProblemCategory;

/// Errors returned by [`crate::cursor::ProblemCursor::step`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CursorError {
    #[error("No problem category selected")]
    NoActiveCategory,

    #[error("No {0} problems to step through")]
    EmptyCategory(ProblemCategory),
}

/// Notices collected during a check run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notice {
    /// The batch held no objects
    EmptyInput,
    /// A non-mesh item was left out of the report
    Skipped { name: String },
    /// Stored indices no longer fit the object's mesh and were not selected
    StaleIndex { object_id: String, dropped: usize },
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::EmptyInput => f.write_str("No objects to check"),
            Notice::Skipped { name } => write!(f, "Skipped {}: not a mesh", name),
            Notice::StaleIndex { object_id, dropped } => write!(
                f,
                "Dropped {} stale problem indices for {}",
                dropped, object_id
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            CursorError::EmptyCategory(ProblemCategory::Loose).to_string(),
            "No LOOSE problems to step through"
        );
        assert_eq!(
            Notice::Skipped {
                name: "Camera".into()
            }
            .to_string(),
            "Skipped Camera: not a mesh"
        );
    }
}
