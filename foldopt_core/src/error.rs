//! Error types for foldopt
//!
//! Adapters forward failures of the wrapped accelerator node unchanged, so most
//! variants carry the message produced by the collaborator that raised it.

use thiserror::Error;

/// Main error type for foldopt operations
#[derive(Debug, Error)]
pub enum FoldoptError {
    /// A latency or resource estimator of a wrapped node failed
    #[error("Estimation error: {0}")]
    Estimation(String),

    /// Reading or writing a node attribute failed
    #[error("Attribute error: {0}")]
    Attribute(String),

    /// A folding parameter the caller asked for is not carried by the node
    #[error("Node '{node}' has no '{parameter}' parameter")]
    MissingParameter { node: String, parameter: String },

    /// Folding factors do not fit the node's channel counts
    #[error("Invalid folding for node '{node}': {reason}")]
    InvalidFolding { node: String, reason: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience type alias for foldopt results
pub type FoldoptResult<T> = Result<T, FoldoptError>;

impl FoldoptError {
    pub fn config(msg: impl Into<String>) -> Self {
        FoldoptError::Config(msg.into())
    }

    pub fn estimation(msg: impl Into<String>) -> Self {
        FoldoptError::Estimation(msg.into())
    }

    pub fn attribute(msg: impl Into<String>) -> Self {
        FoldoptError::Attribute(msg.into())
    }
}
