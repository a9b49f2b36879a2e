//! Type definitions for protocol messages.

mod problems;
mod scene;

pub use problems::*;
pub use scene::*;
