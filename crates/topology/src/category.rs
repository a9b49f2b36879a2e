//! Defect categories and the per-run set of categories that fired.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The four kinds of defect that break watertightness
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProblemCategory {
    /// Edges with exactly one incident face (holes)
    Boundary,
    /// Visible vertices with fewer than two incident edges
    Loose,
    /// Non-manifold edges and vertices
    NonManifold,
    /// Faces failing the orientation heuristic
    Normals,
}

impl ProblemCategory {
    /// All categories in report order
    pub const ALL: [ProblemCategory; 4] = [
        ProblemCategory::Boundary,
        ProblemCategory::Loose,
        ProblemCategory::NonManifold,
        ProblemCategory::Normals,
    ];

    /// Stable upper-case name, used in logs and wire formats
    pub fn name(self) -> &'static str {
        match self {
            Self::Boundary => "BOUNDARY",
            Self::Loose => "LOOSE",
            Self::NonManifold => "NON_MANIFOLD",
            Self::Normals => "NORMALS",
        }
    }

    /// Parse a category name, case-insensitive
    pub fn from_name(name: &str) -> Option<Self> {
        let upper = name.trim().to_ascii_uppercase().replace('-', "_");
        Self::ALL.into_iter().find(|c| c.name() == upper)
    }
}

impl std::fmt::Display for ProblemCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Union of the categories that occurred at least once in a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySet(BTreeSet<ProblemCategory>);

impl CategorySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: ProblemCategory) -> bool {
        self.0.insert(category)
    }

    pub fn contains(&self, category: ProblemCategory) -> bool {
        self.0.contains(&category)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Categories in report order
    pub fn iter(&self) -> impl Iterator<Item = ProblemCategory> + '_ {
        self.0.iter().copied()
    }

    pub fn union_with(&mut self, other: &CategorySet) {
        self.0.extend(other.iter());
    }
}

impl FromIterator<ProblemCategory> for CategorySet {
    fn from_iter<I: IntoIterator<Item = ProblemCategory>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<ProblemCategory> for CategorySet {
    fn extend<I: IntoIterator<Item = ProblemCategory>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}
