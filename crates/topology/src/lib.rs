//! Watertight analysis for polygon meshes
//!
//! This crate reads mesh topology and reports why a mesh is not a closed,
//! manifold surface. It never edits geometry.
//!
//! - [`mesh`] - Validated input mesh and element identifiers
//! - [`adjacency`] - Edge/vertex/face incidence built once per analysis
//! - [`classify`] - The four defect scans producing a [`DefectSet`]
//! - [`report`] - Human readable report lines and the set of present categories
//! - [`cursor`] - Select-all and step-through over one category of problems
//! - [`store`] - Host-side persistence of defect indices
//! - [`selection`] - Host selection interface and stale index filtering
//! - [`checker`] - Batch driver tying the pipeline together

pub mod adjacency;
pub mod category;
pub mod checker;
pub mod classify;
pub mod constants;
pub mod cursor;
pub mod error;
pub mod mesh;
pub mod report;
pub mod selection;
pub mod store;

pub use adjacency::*;
pub use category::*;
pub use checker::*;
pub use classify::*;
pub use constants::*;
pub use cursor::*;
pub use error::*;
pub use mesh::*;
pub use report::*;
pub use selection::*;
pub use store::*;

pub use watertight_config::CheckerConfig;
