//! Names and shapes of the documents the algorithms record.  The field names
//! are read by external visualization scripts and must stay stable.
use std::collections::BTreeMap;

use serde::Serialize;

use crate::{error::GraphResult, id::VertexId, sink::LogSink};

pub const BFS_PARAMETERS: &str = "bfs_parameters";
pub const BFS_RESULTS: &str = "bfs_results";
pub const DFS_PARAMETERS: &str = "dfs_parameters";
pub const DFS_RESULTS: &str = "dfs_results";
pub const DIJKSTRA_PARAMETERS: &str = "dijkstra_parameters";
pub const DIJKSTRA_RESULTS: &str = "dijkstra_results";
pub const UNWEIGHTED_PARAMETERS: &str = "shortest_paths_unweighted_parameters";
pub const UNWEIGHTED_RESULTS: &str = "shortest_paths_unweighted";
pub const COMPONENTS: &str = "components";
pub const COLORING_PARAMETERS: &str = "greedy_coloring_parameters";
pub const COLORING_RESULTS: &str = "greedy_coloring_results";

/// Inputs of a single-source algorithm run.
#[derive(Serialize)]
pub(crate) struct Parameters<'a, V> {
    pub vertex_count: usize,
    pub start_vertex: &'a V,
}

#[derive(Serialize)]
pub(crate) struct ComponentEntry<'a, V> {
    pub vertices: &'a [V],
}

#[derive(Serialize)]
pub(crate) struct ComponentsDocument<'a, V> {
    pub components_count: usize,
    pub components: Vec<ComponentEntry<'a, V>>,
}

/// Distances and paths keyed by vertex id.  `D` is the distance type, which
/// is a weight for Dijkstra and a signed hop count for the unweighted
/// search.
#[derive(Serialize)]
pub(crate) struct PathsDocument<'a, V: Ord, D> {
    pub distances: BTreeMap<&'a V, D>,
    pub paths: BTreeMap<&'a V, &'a [V]>,
}

#[derive(Serialize)]
pub(crate) struct ColoringDocument<'a, V: Ord> {
    pub coloring: &'a BTreeMap<V, usize>,
}

/// Serializes `document` and records it under `name`.
pub(crate) fn record<T: Serialize>(
    sink: &mut dyn LogSink,
    name: &str,
    document: &T,
) -> GraphResult<()> {
    let value = serde_json::to_value(document)?;
    sink.record(name, &value)
}

pub(crate) fn record_parameters<V: VertexId>(
    sink: &mut dyn LogSink,
    name: &str,
    vertex_count: usize,
    start_vertex: &V,
) -> GraphResult<()> {
    record(
        sink,
        name,
        &Parameters {
            vertex_count,
            start_vertex,
        },
    )
}
