//! Error types for copyguard
//!
//! Provides unified error handling across the crate. None of these errors
//! ever reaches the host as a finding: the analyzer boundary degrades
//! every one of them to "cannot verify".

use thiserror::Error;

/// Main error type for copyguard operations
#[derive(Debug, Error)]
pub enum CopyguardError {
    /// The host requested cancellation
    #[error("Analysis cancelled")]
    Cancelled,

    /// A traversal exceeded the configured type depth
    #[error("Type graph deeper than {limit} levels at '{type_name}'")]
    DepthExceeded { limit: usize, type_name: String },

    /// Graph references that do not line up (dangling id, missing root)
    #[error("Inconsistent type graph: {0}")]
    InconsistentGraph(String),

    /// Source could not be parsed by a front end
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Findings could not be exported
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CopyguardError {
    /// Create a parse error
    pub fn parse_error(msg: impl Into<String>) -> Self {
        CopyguardError::Parse(msg.into())
    }

    /// Create an inconsistent-graph error
    pub fn inconsistent(msg: impl Into<String>) -> Self {
        CopyguardError::InconsistentGraph(msg.into())
    }

    pub fn depth_exceeded(limit: usize, type_name: impl Into<String>) -> Self {
        CopyguardError::DepthExceeded {
            limit,
            type_name: type_name.into(),
        }
    }
}

/// Result type alias for copyguard operations
pub type Result<T> = std::result::Result<T, CopyguardError>;
