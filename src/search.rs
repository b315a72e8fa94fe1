//! Breadth-first and depth-first search, connected components, and lazy
//! read-only traversal iterators.
//!
//! The stateful searches leave their marks on the vertices: after a run
//! every reachable vertex is black with a discovery and a finish time, and
//! every other vertex is white.  Timestamps come from a counter that starts
//! at zero on each call.
use std::collections::{BTreeMap, HashSet, VecDeque};

use serde::Serialize;
use tracing::{debug, info_span};

use crate::{
    Graph,
    documents::{self, ComponentEntry, ComponentsDocument},
    error::{GraphError, GraphResult},
    id::VertexId,
    sink::LogSink,
    vertex::Color,
};

const DEFAULT_HASH_SET_CAPACITY: usize = 64;

/// The outcome of a breadth-first or depth-first search.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Traversal<V: Ord> {
    /// Vertices in the order they were discovered.
    pub order: Vec<V>,
    pub discovery_time: BTreeMap<V, usize>,
    pub finish_time: BTreeMap<V, usize>,
}

impl<V: VertexId> Traversal<V> {
    fn from_graph<R, W>(graph: &Graph<V, R, W>, order: Vec<V>) -> Self {
        let mut discovery_time = BTreeMap::new();
        let mut finish_time = BTreeMap::new();
        for vertex in graph.vertices() {
            if let Some(time) = vertex.discovery_time() {
                discovery_time.insert(vertex.id().clone(), time);
            }
            if let Some(time) = vertex.finish_time() {
                finish_time.insert(vertex.id().clone(), time);
            }
        }
        Self {
            order,
            discovery_time,
            finish_time,
        }
    }

    /// Returns true if the vertex was reached.
    pub fn reached(&self, id: &V) -> bool {
        self.discovery_time.contains_key(id)
    }
}

impl<V, R, W> Graph<V, R, W>
where
    V: VertexId,
{
    /// Checks the preconditions shared by the single-source algorithms.
    pub(crate) fn check_start(&self, start: &V) -> GraphResult<()> {
        if self.is_empty() {
            return Err(GraphError::EmptyGraph);
        }
        if !self.has_vertex(start) {
            return Err(GraphError::vertex_not_found(start));
        }
        Ok(())
    }

    /// Runs a breadth-first search from `start`.
    ///
    /// The start vertex is discovered at time 0.  Each dequeued vertex
    /// discovers its white neighbors and is then finished, so a vertex's
    /// finish time is always after the discovery times of the neighbors it
    /// enqueued.
    pub fn breadth_first_search(
        &mut self,
        start: V,
        sink: &mut dyn LogSink,
    ) -> GraphResult<Traversal<V>> {
        self.check_start(&start)?;
        let _span = info_span!(
            "breadth_first_search",
            vertex_count = self.vertex_count(),
            start = ?start
        )
        .entered();
        documents::record_parameters(
            sink,
            documents::BFS_PARAMETERS,
            self.vertex_count(),
            &start,
        )?;
        self.reset_parameters();

        let mut time = 0;
        self.get_vertex_mut(&start)?.discover(time);
        time += 1;
        let mut order = vec![start.clone()];
        let mut queue = VecDeque::from([start]);
        while let Some(current) = queue.pop_front() {
            for neighbor in self.neighbor_ids(&current)? {
                let vertex = self.get_vertex_mut(&neighbor)?;
                if vertex.color() == Color::White {
                    vertex.discover(time);
                    time += 1;
                    order.push(neighbor.clone());
                    queue.push_back(neighbor);
                }
            }
            self.get_vertex_mut(&current)?.finish(time);
            time += 1;
        }

        let traversal = Traversal::from_graph(self, order);
        debug!(reached = traversal.order.len(), "bfs finished");
        documents::record(sink, documents::BFS_RESULTS, &traversal)?;
        Ok(traversal)
    }

    /// Runs a depth-first search from `start` with an explicit stack.
    ///
    /// Timestamps nest: for any two reached vertices, their
    /// `[discovery, finish]` intervals are either disjoint or one contains
    /// the other.
    pub fn depth_first_search(
        &mut self,
        start: V,
        sink: &mut dyn LogSink,
    ) -> GraphResult<Traversal<V>> {
        self.check_start(&start)?;
        let _span = info_span!(
            "depth_first_search",
            vertex_count = self.vertex_count(),
            start = ?start
        )
        .entered();
        documents::record_parameters(
            sink,
            documents::DFS_PARAMETERS,
            self.vertex_count(),
            &start,
        )?;
        self.reset_parameters();

        let mut time = 0;
        self.get_vertex_mut(&start)?.discover(time);
        time += 1;
        let mut order = vec![start.clone()];
        let mut stack = vec![start];
        while let Some(current) = stack.last().cloned() {
            if self.get_vertex(&current)?.color() == Color::Black {
                stack.pop();
                continue;
            }
            match self.first_white_neighbor(&current)? {
                Some(next) => {
                    self.get_vertex_mut(&next)?.discover(time);
                    time += 1;
                    order.push(next.clone());
                    stack.push(next);
                }
                None => {
                    stack.pop();
                    self.get_vertex_mut(&current)?.finish(time);
                    time += 1;
                }
            }
        }

        let traversal = Traversal::from_graph(self, order);
        debug!(reached = traversal.order.len(), "dfs finished");
        documents::record(sink, documents::DFS_RESULTS, &traversal)?;
        Ok(traversal)
    }

    fn first_white_neighbor(&self, id: &V) -> GraphResult<Option<V>> {
        for (neighbor, _) in self.neighbors(id)? {
            if self.get_vertex(neighbor)?.color() == Color::White {
                return Ok(Some(neighbor.clone()));
            }
        }
        Ok(None)
    }

    /// Partitions the vertices into connected components.  Each component
    /// lists its vertices in discovery order; the order of the components is
    /// unspecified.  Every vertex is black afterwards.
    pub fn connected_components(&mut self, sink: &mut dyn LogSink) -> GraphResult<Vec<Vec<V>>> {
        if self.is_empty() {
            return Err(GraphError::EmptyGraph);
        }
        let _span = info_span!("connected_components", vertex_count = self.vertex_count()).entered();
        self.reset_parameters();

        let ids: Vec<V> = self.vertex_ids().cloned().collect();
        let mut components = Vec::new();
        for id in ids {
            if self.get_vertex(&id)?.color() != Color::White {
                continue;
            }
            self.get_vertex_mut(&id)?.set_color(Color::Gray);
            let mut component = vec![id.clone()];
            let mut stack = vec![id];
            while let Some(current) = stack.pop() {
                for neighbor in self.neighbor_ids(&current)? {
                    let vertex = self.get_vertex_mut(&neighbor)?;
                    if vertex.color() == Color::White {
                        vertex.set_color(Color::Gray);
                        component.push(neighbor.clone());
                        stack.push(neighbor);
                    }
                }
                self.get_vertex_mut(&current)?.set_color(Color::Black);
            }
            components.push(component);
        }

        debug!(count = components.len(), "components found");
        let document = ComponentsDocument {
            components_count: components.len(),
            components: components
                .iter()
                .map(|vertices| ComponentEntry {
                    vertices: vertices.as_slice(),
                })
                .collect(),
        };
        documents::record(sink, documents::COMPONENTS, &document)?;
        Ok(components)
    }

    /// Gets a lazy breadth-first iterator over the vertices reachable from
    /// `start`.  Vertex state is not touched.
    pub fn bfs_iter(&self, start: V) -> GraphResult<BfsIter<'_, V, R, W>> {
        if !self.has_vertex(&start) {
            return Err(GraphError::vertex_not_found(&start));
        }
        Ok(BfsIter {
            graph: self,
            visited: HashSet::with_capacity(DEFAULT_HASH_SET_CAPACITY),
            queue: VecDeque::from([start]),
        })
    }

    /// Gets a lazy depth-first (preorder) iterator over the vertices
    /// reachable from `start`.  Vertex state is not touched.
    pub fn dfs_iter(&self, start: V) -> GraphResult<DfsIter<'_, V, R, W>> {
        if !self.has_vertex(&start) {
            return Err(GraphError::vertex_not_found(&start));
        }
        Ok(DfsIter {
            graph: self,
            visited: HashSet::with_capacity(DEFAULT_HASH_SET_CAPACITY),
            stack: vec![start],
        })
    }
}

pub struct BfsIter<'g, V, R, W> {
    graph: &'g Graph<V, R, W>,
    visited: HashSet<V>,
    queue: VecDeque<V>,
}

impl<V, R, W> Iterator for BfsIter<'_, V, R, W>
where
    V: VertexId,
{
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.queue.pop_front() {
            if !self.visited.insert(id.clone()) {
                continue;
            }
            if let Ok(neighbors) = self.graph.neighbors(&id) {
                for (neighbor, _) in neighbors {
                    if !self.visited.contains(neighbor) {
                        self.queue.push_back(neighbor.clone());
                    }
                }
            }
            return Some(id);
        }
        None
    }
}

pub struct DfsIter<'g, V, R, W> {
    graph: &'g Graph<V, R, W>,
    visited: HashSet<V>,
    stack: Vec<V>,
}

impl<V, R, W> Iterator for DfsIter<'_, V, R, W>
where
    V: VertexId,
{
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            if self.visited.insert(id.clone()) {
                if let Ok(neighbors) = self.graph.neighbors(&id) {
                    let mut successors: Vec<_> = neighbors
                        .map(|(neighbor, _)| neighbor)
                        .filter(|neighbor| !self.visited.contains(*neighbor))
                        .cloned()
                        .collect();
                    successors.reverse();
                    self.stack.extend(successors);
                }
                return Some(id);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::sink::{MemorySink, NullSink};

    type TestGraph = Graph<i32, (), i32>;

    // 0 - 1 - 3, 0 - 2, and 4 on its own.
    fn create_simple_graph() -> TestGraph {
        let mut graph = TestGraph::with_size(5);
        graph.add_edge(0, 1, 1).unwrap();
        graph.add_edge(0, 2, 1).unwrap();
        graph.add_edge(1, 3, 1).unwrap();
        graph
    }

    fn create_cyclic_graph() -> TestGraph {
        let mut graph = TestGraph::with_size(3);
        graph.add_edge(0, 1, 1).unwrap();
        graph.add_edge(1, 2, 1).unwrap();
        graph.add_edge(2, 0, 1).unwrap();
        graph
    }

    #[test]
    fn test_bfs_simple_graph() {
        let mut graph = create_simple_graph();
        let traversal = graph.breadth_first_search(0, &mut NullSink).unwrap();
        let order = &traversal.order;
        assert_eq!(order.len(), 4);
        assert_eq!(order[0], 0);
        assert!(order[1..3].contains(&1) && order[1..3].contains(&2));
        assert_eq!(order[3], 3);
        assert_eq!(traversal.discovery_time[&0], 0);
        assert!(!traversal.reached(&4));
    }

    #[test]
    fn test_bfs_colors() {
        let mut graph = create_simple_graph();
        graph.breadth_first_search(0, &mut NullSink).unwrap();
        for id in 0..4 {
            assert_eq!(graph.get_vertex(&id).unwrap().color(), Color::Black);
        }
        let isolated = graph.get_vertex(&4).unwrap();
        assert_eq!(isolated.color(), Color::White);
        assert_eq!(isolated.discovery_time(), None);
        assert_eq!(isolated.finish_time(), None);
    }

    #[test]
    fn test_bfs_single_vertex() {
        let mut graph = TestGraph::with_size(1);
        let traversal = graph.breadth_first_search(0, &mut NullSink).unwrap();
        assert_eq!(traversal.order, vec![0]);
        assert_eq!(traversal.discovery_time[&0], 0);
        assert_eq!(traversal.finish_time[&0], 1);
    }

    #[test]
    fn test_bfs_records_documents() {
        let mut graph = create_simple_graph();
        let mut sink = MemorySink::new();
        graph.breadth_first_search(1, &mut sink).unwrap();
        assert_eq!(
            sink.get(documents::BFS_PARAMETERS).unwrap(),
            &json!({"vertex_count": 5, "start_vertex": 1})
        );
        let results = sink.get(documents::BFS_RESULTS).unwrap();
        assert_eq!(results["order"][0], 1);
        assert_eq!(results["discovery_time"]["1"], 0);
        assert!(results["discovery_time"].get("4").is_none());
    }

    #[test]
    fn test_bfs_preconditions() {
        let mut sink = MemorySink::new();
        assert!(matches!(
            TestGraph::new().breadth_first_search(0, &mut sink),
            Err(GraphError::EmptyGraph)
        ));
        assert!(matches!(
            create_simple_graph().breadth_first_search(9, &mut sink),
            Err(GraphError::VertexNotFound(_))
        ));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_rerun_resets_state() {
        let mut graph = create_simple_graph();
        graph.breadth_first_search(0, &mut NullSink).unwrap();
        let traversal = graph.breadth_first_search(4, &mut NullSink).unwrap();
        assert_eq!(traversal.order, vec![4]);
        assert_eq!(graph.get_vertex(&0).unwrap().color(), Color::White);
    }

    #[test]
    fn test_dfs_path_timestamps() {
        let mut graph = TestGraph::with_size(3);
        graph.add_edge(0, 1, 1).unwrap();
        graph.add_edge(1, 2, 1).unwrap();
        let traversal = graph.depth_first_search(0, &mut NullSink).unwrap();
        assert_eq!(traversal.order, vec![0, 1, 2]);
        assert_eq!(traversal.discovery_time, BTreeMap::from([(0, 0), (1, 1), (2, 2)]));
        assert_eq!(traversal.finish_time, BTreeMap::from([(0, 5), (1, 4), (2, 3)]));
    }

    #[test]
    fn test_dfs_handles_cycles() {
        let mut graph = create_cyclic_graph();
        let traversal = graph.depth_first_search(2, &mut NullSink).unwrap();
        assert_eq!(traversal.order.len(), 3);
        assert_eq!(traversal.finish_time[&2], 5);
    }

    #[test]
    fn test_dfs_records_documents() {
        let mut graph = create_simple_graph();
        let mut sink = MemorySink::new();
        graph.depth_first_search(0, &mut sink).unwrap();
        assert_eq!(sink.get(documents::DFS_PARAMETERS).unwrap()["start_vertex"], 0);
        assert_eq!(
            sink.get(documents::DFS_RESULTS).unwrap()["order"]
                .as_array()
                .unwrap()
                .len(),
            4
        );
    }

    #[test]
    fn test_components() {
        let mut graph = create_simple_graph();
        let mut sink = MemorySink::new();
        let mut components = graph.connected_components(&mut sink).unwrap();
        for component in &mut components {
            component.sort();
        }
        components.sort();
        assert_eq!(components, vec![vec![0, 1, 2, 3], vec![4]]);
        assert!(graph.vertices().all(|v| v.color() == Color::Black));
        assert_eq!(sink.get(documents::COMPONENTS).unwrap()["components_count"], 2);
    }

    #[test]
    fn test_components_empty_graph() {
        assert!(matches!(
            TestGraph::new().connected_components(&mut NullSink),
            Err(GraphError::EmptyGraph)
        ));
    }

    #[test]
    fn test_bfs_iter_visits_all_reachable() {
        let graph = create_simple_graph();
        let visited: HashSet<_> = graph.bfs_iter(0).unwrap().collect();
        assert_eq!(visited, HashSet::from([0, 1, 2, 3]));
        assert!(graph.vertices().all(|v| v.color() == Color::White));
    }

    #[test]
    fn test_bfs_iter_order() {
        let graph = create_simple_graph();
        let visited: Vec<_> = graph.bfs_iter(0).unwrap().collect();
        assert_eq!(visited[0], 0);
        assert_eq!(visited[3], 3);
    }

    #[test]
    fn test_dfs_iter_handles_cycles() {
        let graph = create_cyclic_graph();
        let visited: Vec<_> = graph.dfs_iter(0).unwrap().collect();
        assert_eq!(visited.len(), 3);
        assert_eq!(visited[0], 0);
    }

    #[test]
    fn test_iter_unknown_start() {
        let graph = create_simple_graph();
        assert!(graph.bfs_iter(7).is_err());
        assert!(graph.dfs_iter(7).is_err());
    }

    #[test]
    fn test_bfs_dfs_iter_visit_same_nodes() {
        let graph = create_simple_graph();
        let bfs: HashSet<_> = graph.bfs_iter(1).unwrap().collect();
        let dfs: HashSet<_> = graph.dfs_iter(1).unwrap().collect();
        assert_eq!(bfs, dfs);
    }
}
