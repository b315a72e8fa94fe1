//! Saving and loading graphs as JSON.
//!
//! ```json
//! {
//!   "vertex_count": 3,
//!   "vertices": [{"id": 0}, {"id": 1}, {"id": 2}],
//!   "edges": [{"from": 0, "to": 1, "weight": 10}]
//! }
//! ```
//!
//! Each undirected edge is listed once, oriented `from < to`.  Resources and
//! traversal state are not part of the document.
use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::{
    Graph,
    error::{GraphError, GraphResult},
    id::{VertexId, Weight},
    sink::LogSink,
};

/// Name under which [`Graph::record_parameters`] records the graph.
pub const GRAPH_PARAMETERS: &str = "graph_parameters";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VertexEntry<V> {
    pub id: V,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeEntry<V, W> {
    pub from: V,
    pub to: V,
    pub weight: W,
}

/// The serialized form of a graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument<V, W> {
    pub vertex_count: usize,
    pub vertices: Vec<VertexEntry<V>>,
    pub edges: Vec<EdgeEntry<V, W>>,
}

impl<V, R, W> Graph<V, R, W>
where
    V: VertexId,
    W: Weight,
{
    /// Builds the serialized form of the graph, with vertices and edges
    /// sorted by id.
    pub fn to_document(&self) -> GraphDocument<V, W> {
        let mut vertices: Vec<_> = self
            .vertex_ids()
            .cloned()
            .map(|id| VertexEntry { id })
            .collect();
        vertices.sort_by(|a, b| a.id.cmp(&b.id));
        let mut edges: Vec<_> = self
            .edges()
            .map(|edge| EdgeEntry {
                from: edge.from().clone(),
                to: edge.to().clone(),
                weight: *edge.weight(),
            })
            .collect();
        edges.sort_by(|a, b| (&a.from, &a.to).cmp(&(&b.from, &b.to)));
        GraphDocument {
            vertex_count: self.vertex_count(),
            vertices,
            edges,
        }
    }

    /// Builds a graph from its serialized form.  Fails if the vertex count
    /// disagrees with the vertex list or if any vertex or edge violates the
    /// mutation rules.
    pub fn from_document(document: GraphDocument<V, W>) -> GraphResult<Self> {
        if document.vertex_count != document.vertices.len() {
            return Err(GraphError::Malformed(format!(
                "vertex_count is {} but {} vertices are listed",
                document.vertex_count,
                document.vertices.len()
            )));
        }
        let mut graph = Self::new();
        for VertexEntry { id } in document.vertices {
            graph.add_vertex(id)?;
        }
        for EdgeEntry { from, to, weight } in document.edges {
            graph.add_edge(from, to, weight)?;
        }
        Ok(graph)
    }

    pub fn to_json(&self) -> GraphResult<Value> {
        Ok(serde_json::to_value(self.to_document())?)
    }

    pub fn to_json_string(&self) -> GraphResult<String> {
        Ok(serde_json::to_string_pretty(&self.to_document())?)
    }

    /// Parses a graph from a JSON string.
    pub fn from_json_str(text: &str) -> GraphResult<Self> {
        let document: GraphDocument<V, W> = serde_json::from_str(text)?;
        Self::from_document(document)
    }

    pub fn save_to_json(&self, path: impl AsRef<Path>) -> GraphResult<()> {
        let path = path.as_ref();
        let text = self.to_json_string()?;
        fs::write(path, text).map_err(|e| GraphError::io(path, e))?;
        debug!(path = %path.display(), vertices = self.vertex_count(), "saved graph");
        Ok(())
    }

    /// Replaces the contents of the graph with the graph stored at `path`.
    /// On failure the graph is left unchanged.
    pub fn load_from_json(&mut self, path: impl AsRef<Path>) -> GraphResult<()> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| GraphError::io(path, e))?;
        let loaded = Self::from_json_str(&text)?;
        debug!(path = %path.display(), vertices = loaded.vertex_count(), "loaded graph");
        *self = loaded;
        Ok(())
    }

    /// Records the serialized graph under [`GRAPH_PARAMETERS`], the document
    /// the visualization scripts read alongside every algorithm record.
    pub fn record_parameters(&self, sink: &mut dyn LogSink) -> GraphResult<()> {
        sink.record(GRAPH_PARAMETERS, &self.to_json()?)
    }
}
