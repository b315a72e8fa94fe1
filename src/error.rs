use std::{fmt::Debug, io, path::PathBuf};

use thiserror::Error;

/// Errors reported by graph mutation, queries, algorithms and persistence.
///
/// Vertex ids are carried in their `Debug` rendering so that the error type
/// does not depend on the graph's id type.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GraphError {
    /// An algorithm was invoked on a graph with no vertices.
    #[error("graph is empty")]
    EmptyGraph,
    /// A referenced vertex is not in the graph.
    #[error("vertex {0} not found")]
    VertexNotFound(String),
    /// `add_vertex` was called with an id that is already present.
    #[error("vertex {0} already exists")]
    DuplicateVertex(String),
    /// A referenced edge does not exist.
    #[error("edge {from} -> {to} not found")]
    EdgeNotFound { from: String, to: String },
    /// `add_edge` was called for a pair that is already connected.
    #[error("edge {from} -> {to} already exists")]
    DuplicateEdge { from: String, to: String },
    /// `add_edge` was called with identical endpoints.
    #[error("self loop on vertex {0} is not allowed")]
    SelfLoop(String),
    /// Dijkstra's algorithm found an edge with a negative weight.
    #[error("edge {from} -> {to} has a negative weight")]
    NegativeWeight { from: String, to: String },
    /// A file could not be opened, read or written.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A JSON document could not be encoded or decoded.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A JSON document parsed but does not describe a valid graph.
    #[error("malformed graph document: {0}")]
    Malformed(String),
}

pub type GraphResult<T> = Result<T, GraphError>;

impl GraphError {
    pub(crate) fn vertex_not_found(id: &impl Debug) -> Self {
        GraphError::VertexNotFound(format!("{id:?}"))
    }

    pub(crate) fn duplicate_vertex(id: &impl Debug) -> Self {
        GraphError::DuplicateVertex(format!("{id:?}"))
    }

    pub(crate) fn edge_not_found(from: &impl Debug, to: &impl Debug) -> Self {
        GraphError::EdgeNotFound {
            from: format!("{from:?}"),
            to: format!("{to:?}"),
        }
    }

    pub(crate) fn duplicate_edge(from: &impl Debug, to: &impl Debug) -> Self {
        GraphError::DuplicateEdge {
            from: format!("{from:?}"),
            to: format!("{to:?}"),
        }
    }

    pub(crate) fn self_loop(id: &impl Debug) -> Self {
        GraphError::SelfLoop(format!("{id:?}"))
    }

    pub(crate) fn negative_weight(from: &impl Debug, to: &impl Debug) -> Self {
        GraphError::NegativeWeight {
            from: format!("{from:?}"),
            to: format!("{to:?}"),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        GraphError::Io {
            path: path.into(),
            source,
        }
    }
}
