//! Shared configuration for the watertight checker
//!
//! This crate is the single source of truth for which topology scans run,
//! how borderline cases are classified, and whether problems are pushed to
//! the host's selection after a check. Both the analysis core and the hosts
//! (command line, editor integration) read the same `CheckerConfig`.

use serde::{Deserialize, Serialize};

#[cfg(feature = "bevy")]
use bevy::prelude::Resource;

/// Select problem elements in the host after each check
pub const DEFAULT_SELECT_PROBLEMS: bool = true;

/// Open edges are reported as boundary only, not also as non-manifold
pub const DEFAULT_BOUNDARY_IS_NON_MANIFOLD: bool = false;

/// Dot products above `-tolerance` count as outward facing
pub const DEFAULT_ORIENTATION_TOLERANCE: f32 = 1e-6;

/// Environment variable overriding [`CheckerConfig::select_problems`]
pub const ENV_SELECT_PROBLEMS: &str = "WATERTIGHT_SELECT_PROBLEMS";

/// Environment variable overriding [`CheckerConfig::boundary_is_non_manifold`]
pub const ENV_BOUNDARY_NON_MANIFOLD: &str = "WATERTIGHT_BOUNDARY_NON_MANIFOLD";

/// Which of the four defect scans run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnabledChecks {
    /// Edges with exactly one incident face
    pub boundary: bool,
    /// Visible vertices with fewer than two incident edges
    pub loose: bool,
    /// Non-manifold edges and vertices
    pub non_manifold: bool,
    /// Centroid-ray orientation heuristic
    pub normals: bool,
}

impl Default for EnabledChecks {
    fn default() -> Self {
        Self {
            boundary: true,
            loose: true,
            non_manifold: true,
            normals: true,
        }
    }
}

/// Checker configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[cfg_attr(feature = "bevy", derive(Resource))]
pub struct CheckerConfig {
    /// Push every problem element to the host selection after a check
    pub select_problems: bool,
    /// Also list edges with a single incident face as non-manifold.
    ///
    /// Mirrors editors whose built-in manifold predicate rejects open edges.
    /// The edges stay in the boundary list either way.
    pub boundary_is_non_manifold: bool,
    /// Tolerance for the orientation heuristic
    pub orientation_tolerance: f32,
    /// Enabled scans
    pub checks: EnabledChecks,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            select_problems: DEFAULT_SELECT_PROBLEMS,
            boundary_is_non_manifold: DEFAULT_BOUNDARY_IS_NON_MANIFOLD,
            orientation_tolerance: DEFAULT_ORIENTATION_TOLERANCE,
            checks: EnabledChecks::default(),
        }
    }
}

impl CheckerConfig {
    /// Default config with environment overrides applied
    pub fn from_env() -> Self {
        Self::default().with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a key lookup (environment or anything shaped like it).
    ///
    /// Unparseable values are ignored and the current value is kept.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(value) = lookup(ENV_SELECT_PROBLEMS).as_deref().and_then(parse_flag) {
            self.select_problems = value;
        }
        if let Some(value) = lookup(ENV_BOUNDARY_NON_MANIFOLD)
            .as_deref()
            .and_then(parse_flag)
        {
            self.boundary_is_non_manifold = value;
        }
        self
    }

    /// True when at least one scan is enabled
    pub fn any_check_enabled(&self) -> bool {
        let c = self.checks;
        c.boundary || c.loose || c.non_manifold || c.normals
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
