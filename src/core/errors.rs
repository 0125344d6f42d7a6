//! Error types for the I/O boundary.
//!
//! The analysis core itself never fails: empty sections are skipped and
//! malformed records are dropped per-record. These variants cover reading
//! input snapshots, configuration, and report writing.

/// Error type for the application boundary
#[derive(Debug, thiserror::Error)]
pub enum PipewatchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias
pub type PipewatchResult<T> = Result<T, PipewatchError>;
