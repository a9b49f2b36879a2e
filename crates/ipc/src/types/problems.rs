//! Problem categories and element references as they travel over the wire.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::IpcError;

/// Problem category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProblemKind {
    Boundary,
    Loose,
    NonManifold,
    Normals,
}

impl ProblemKind {
    pub const ALL: [ProblemKind; 4] = [
        ProblemKind::Boundary,
        ProblemKind::Loose,
        ProblemKind::NonManifold,
        ProblemKind::Normals,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Boundary => "BOUNDARY",
            Self::Loose => "LOOSE",
            Self::NonManifold => "NON_MANIFOLD",
            Self::Normals => "NORMALS",
        }
    }
}

impl FromStr for ProblemKind {
    type Err = IpcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == upper)
            .ok_or_else(|| IpcError::UnknownProblemKind(s.to_string()))
    }
}

impl std::fmt::Display for ProblemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction for stepping through problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepDirection {
    #[default]
    Next,
    Previous,
}

impl FromStr for StepDirection {
    type Err = IpcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "next" | "n" => Ok(Self::Next),
            "previous" | "prev" | "p" => Ok(Self::Previous),
            _ => Err(IpcError::UnknownDirection(s.to_string())),
        }
    }
}

/// A single mesh element by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "index")]
pub enum ElementRef {
    Vertex(u32),
    Edge(u32),
    Face(u32),
}

impl std::fmt::Display for ElementRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vertex(i) => write!(f, "vertex {}", i),
            Self::Edge(i) => write!(f, "edge {}", i),
            Self::Face(i) => write!(f, "face {}", i),
        }
    }
}
