//! Error types for scene document handling.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for scene document operations.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// Failed to load a scene document.
    #[error("Failed to load scene document '{path}': {message}")]
    DocumentLoad {
        /// Path to the file that failed to load.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// A node references an index outside the document's node list.
    #[error("Node index {index} out of range ({count} nodes)")]
    NodeIndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of nodes in the document.
        count: usize,
    },

    /// A node is referenced more than once, which would alias or cycle the
    /// hierarchy.
    #[error("Node {0} is referenced more than once")]
    NodeReused(usize),

    /// JSON parse or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
}

/// Result type alias for scene document operations.
pub type ResourceResult<T> = Result<T, ResourceError>;
