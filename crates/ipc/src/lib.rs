//! Message protocol for the watertight checker
//!
//! Defines the messages a problems panel exchanges with a checker host, and
//! the JSON scene format hosts read their objects from. Messages use the
//! adjacently tagged layout `{"type": ..., "data": ...}`.

mod error;
mod messages;
mod types;

pub use error::*;
pub use messages::*;
pub use types::*;

use serde::{de::DeserializeOwned, Serialize};

/// Serialize a message to JSON.
pub fn encode<T: Serialize>(message: &T) -> Result<String, IpcError> {
    Ok(serde_json::to_string(message)?)
}

/// Deserialize a message from JSON.
pub fn decode<T: DeserializeOwned>(json: &str) -> Result<T, IpcError> {
    Ok(serde_json::from_str(json)?)
}

/// Parse a scene file.
///
/// Object ids must be non-empty and unique.
pub fn parse_scene(json: &str) -> Result<SceneFile, IpcError> {
    let scene: SceneFile = serde_json::from_str(json)?;

    let mut seen = std::collections::HashSet::new();
    for object in &scene.objects {
        if object.id.is_empty() {
            return Err(IpcError::InvalidScene(format!(
                "object '{}' has an empty id",
                object.name
            )));
        }
        if !seen.insert(object.id.as_str()) {
            return Err(IpcError::InvalidScene(format!(
                "duplicate object id '{}'",
                object.id
            )));
        }
    }

    Ok(scene)
}
