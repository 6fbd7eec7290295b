//! Error taxonomy for the render pipeline
//!
//! Every failure is terminal for the current render attempt; nothing in this
//! crate retries.

use thiserror::Error;

/// Errors that can occur while loading a dataset or rendering a graph
#[derive(Debug, Error)]
pub enum GraphError {
    /// The requested visualization kind is not one this crate knows about
    #[error("unrecognized visualization option: {0}")]
    UnrecognizedKind(String),

    /// The requested visualization kind is declared but not built
    #[error("visualization not implemented: {0}")]
    NotImplemented(String),

    /// The dataset resource could not be read
    #[error("failed to read dataset {resource}: {source}")]
    Read {
        resource: String,
        #[source]
        source: std::io::Error,
    },

    /// The dataset resource was not valid JSON of the expected shape
    #[error("failed to parse dataset {resource}: {source}")]
    Parse {
        resource: String,
        #[source]
        source: serde_json::Error,
    },

    /// The dataset root has no children, so there is nothing to draw
    #[error("dataset root has no children")]
    EmptyDataset,

    /// A node carries a field the layout cannot work with
    #[error("invalid node {acc}: {reason}")]
    InvalidNode { acc: String, reason: String },
}

/// Type alias for Results using GraphError
pub type Result<T> = std::result::Result<T, GraphError>;
