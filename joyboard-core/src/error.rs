//! Error types for the joyboard engine.

use thiserror::Error;

/// Errors that can occur in joyboard operations.
///
/// Fetch errors are recovered per source by the sync orchestrator and only
/// surface as report entries. `NotFound` is returned to the caller when a
/// CRUD operation targets a missing identifier. Storage I/O and
/// serialization failures are fatal to the current operation.
#[derive(Error, Debug)]
pub enum JoyboardError {
    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("Fetch timed out after {0}s")]
    FetchTimeout(u64),

    #[error("Feed returned HTTP {0}")]
    FetchStatus(u16),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for joyboard operations.
pub type JoyboardResult<T> = Result<T, JoyboardError>;
