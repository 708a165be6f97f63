//! Error type shared by the Contour crates.

use crate::id::TaskId;
use crate::sphere::SphereId;

/// Result alias for core operations.
pub type Result<T> = std::result::Result<T, ContourError>;

/// Errors reported by the engine and the data model.
///
/// Every variant is recoverable: the operation that produced it leaves the
/// engine state exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ContourError {
    /// A task or lookup referenced a sphere that does not exist
    #[error("unknown sphere: {0}")]
    UnknownSphere(String),

    /// A toggle referenced a task id that does not exist
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// A persisted blob failed shape validation on restore
    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(String),

    /// The connection graph is inconsistent with the sphere set
    #[error("invalid connection {from} -> {to}: {reason}")]
    InvalidConnection {
        /// Edge source
        from: SphereId,
        /// Edge target
        to: SphereId,
        /// What is wrong with the edge
        reason: String,
    },

    /// No task id is left after the last assigned one
    #[error("task id space exhausted after {0}")]
    TaskIdsExhausted(TaskId),

    /// Task text was empty after trimming
    #[error("task text is empty")]
    EmptyTaskText,
}

impl From<serde_json::Error> for ContourError {
    fn from(err: serde_json::Error) -> Self {
        ContourError::MalformedSnapshot(err.to_string())
    }
}
