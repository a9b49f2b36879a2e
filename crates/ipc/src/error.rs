//! Error types for the checker protocol.

/// Errors raised while reading or writing protocol data.
#[derive(Debug, thiserror::Error)]
pub enum IpcError {
    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid scene file: {0}")]
    InvalidScene(String),

    #[error("Unknown problem kind: {0}")]
    UnknownProblemKind(String),

    #[error("Unknown step direction: {0}")]
    UnknownDirection(String),
}
