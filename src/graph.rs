//! [`Graph`] is an undirected graph keyed by caller-chosen vertex ids.  Each
//! vertex may own a resource of type `R` and each edge carries a weight of
//! type `W`.
//!
//! Edges are stored as two directional [`Edge`] records in a map of maps
//! keyed by the `from` vertex:
//!
//! ```text
//! adjacency[from][to] == Edge(from, to, w)
//! adjacency[to][from] == Edge(to, from, w)
//! ```
//!
//! Every mutation keeps both records present, absent, and weighted together,
//! so `has_edge(a, b) == has_edge(b, a)` and `edge_count()` is half the sum
//! of the degrees.
use std::collections::HashMap;
use std::fmt::Debug;

use derivative::Derivative;
use tracing::trace;

use crate::{
    edge::Edge,
    error::{GraphError, GraphResult},
    id::{IndexedId, VertexId},
    vertex::Vertex,
};

#[derive(Derivative)]
#[derivative(
    Default(bound = ""),
    Clone(bound = "V: Clone, R: Clone, W: Clone"),
    Debug(bound = "V: Debug, R: Debug, W: Debug"),
    PartialEq(bound = "V: VertexId, R: PartialEq, W: PartialEq")
)]
pub struct Graph<V, R = (), W = i64> {
    vertices: HashMap<V, Vertex<V, R>>,
    // Invariant: adjacency has exactly the keys of vertices, and
    // adjacency[a][b] exists iff adjacency[b][a] exists with the same weight.
    adjacency: HashMap<V, HashMap<V, Edge<V, W>>>,
    vertex_count: usize,
}

impl<V, R, W> Graph<V, R, W>
where
    V: VertexId,
{
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            vertices: HashMap::new(),
            adjacency: HashMap::new(),
            vertex_count: 0,
        }
    }

    /// Creates a graph with vertices `0..n` and no edges.
    pub fn with_size(n: usize) -> Self
    where
        V: IndexedId,
    {
        let mut graph = Self::new();
        graph.populate(n);
        graph
    }

    /// Discards all vertices and edges and repopulates the graph with
    /// vertices `0..n`.
    pub fn resize(&mut self, n: usize)
    where
        V: IndexedId,
    {
        self.clear();
        self.populate(n);
    }

    fn populate(&mut self, n: usize)
    where
        V: IndexedId,
    {
        self.vertices.reserve(n);
        self.adjacency.reserve(n);
        for index in 0..n {
            let id = V::from_index(index);
            self.adjacency.insert(id.clone(), HashMap::new());
            self.vertices.insert(id.clone(), Vertex::new(id));
        }
        self.vertex_count = n;
    }

    /// Removes all vertices and edges.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.adjacency.clear();
        self.vertex_count = 0;
    }

    /// Moves the contents out of the graph, leaving it empty.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    /// Resets every vertex to white with unset timestamps.  Topology is not
    /// touched.
    pub fn reset_parameters(&mut self) {
        for vertex in self.vertices.values_mut() {
            vertex.reset();
        }
    }

    // Vertices

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn is_empty(&self) -> bool {
        self.vertex_count == 0
    }

    pub fn has_vertex(&self, id: &V) -> bool {
        self.vertices.contains_key(id)
    }

    /// Gets an iterator over all vertex ids, in unspecified order.
    pub fn vertex_ids(&self) -> impl Iterator<Item = &V> + '_ {
        self.vertices.keys()
    }

    /// Gets an iterator over all vertices, in unspecified order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex<V, R>> + '_ {
        self.vertices.values()
    }

    pub fn get_vertex(&self, id: &V) -> GraphResult<&Vertex<V, R>> {
        self.vertices
            .get(id)
            .ok_or_else(|| GraphError::vertex_not_found(id))
    }

    /// Gets mutable access to a vertex's resource and traversal state.  The
    /// id cannot be changed through the returned reference.
    pub fn get_vertex_mut(&mut self, id: &V) -> GraphResult<&mut Vertex<V, R>> {
        self.vertices
            .get_mut(id)
            .ok_or_else(|| GraphError::vertex_not_found(id))
    }

    /// Adds a vertex without a resource.
    pub fn add_vertex(&mut self, id: V) -> GraphResult<()> {
        self.insert_vertex(Vertex::new(id))
    }

    /// Adds a vertex that owns the given resource.
    pub fn add_vertex_with(&mut self, id: V, resource: R) -> GraphResult<()> {
        self.insert_vertex(Vertex::with_resource(id, resource))
    }

    fn insert_vertex(&mut self, vertex: Vertex<V, R>) -> GraphResult<()> {
        let id = vertex.id().clone();
        if self.vertices.contains_key(&id) {
            return Err(GraphError::duplicate_vertex(&id));
        }
        trace!(vertex = ?id, "add_vertex");
        self.adjacency.insert(id.clone(), HashMap::new());
        self.vertices.insert(id, vertex);
        self.vertex_count += 1;
        Ok(())
    }

    /// Removes a vertex and every edge incident to it, returning the
    /// vertex.  Other vertex ids are unchanged.
    pub fn remove_vertex(&mut self, id: &V) -> GraphResult<Vertex<V, R>> {
        let vertex = self
            .vertices
            .remove(id)
            .ok_or_else(|| GraphError::vertex_not_found(id))?;
        if let Some(neighbors) = self.adjacency.remove(id) {
            for neighbor in neighbors.keys() {
                if let Some(back) = self.adjacency.get_mut(neighbor) {
                    back.remove(id);
                }
            }
        }
        self.vertex_count -= 1;
        trace!(vertex = ?id, "remove_vertex");
        Ok(vertex)
    }

    // Edges

    /// Returns true if the edge exists.  Unknown vertices yield `false`
    /// rather than an error.
    pub fn has_edge(&self, from: &V, to: &V) -> bool {
        self.adjacency
            .get(from)
            .is_some_and(|neighbors| neighbors.contains_key(to))
    }

    /// Gets the `from -> to` record of an edge.
    pub fn get_edge(&self, from: &V, to: &V) -> GraphResult<&Edge<V, W>> {
        self.adjacency
            .get(from)
            .ok_or_else(|| GraphError::vertex_not_found(from))?
            .get(to)
            .ok_or_else(|| GraphError::edge_not_found(from, to))
    }

    /// Adds an undirected edge, storing a record for each direction.
    pub fn add_edge(&mut self, from: V, to: V, weight: W) -> GraphResult<()>
    where
        W: Clone,
    {
        if !self.has_vertex(&from) {
            return Err(GraphError::vertex_not_found(&from));
        }
        if !self.has_vertex(&to) {
            return Err(GraphError::vertex_not_found(&to));
        }
        if from == to {
            return Err(GraphError::self_loop(&from));
        }
        if self.has_edge(&from, &to) || self.has_edge(&to, &from) {
            return Err(GraphError::duplicate_edge(&from, &to));
        }
        trace!(from = ?from, to = ?to, "add_edge");
        let forward = Edge::new(from.clone(), to.clone(), weight);
        let backward = forward.reversed();
        self.neighbors_entry(&from).insert(to.clone(), forward);
        self.neighbors_entry(&to).insert(from, backward);
        Ok(())
    }

    /// Removes an edge in both directions, returning the `from -> to`
    /// record.
    pub fn remove_edge(&mut self, from: &V, to: &V) -> GraphResult<Edge<V, W>> {
        if !self.has_edge(from, to) {
            return Err(GraphError::edge_not_found(from, to));
        }
        trace!(from = ?from, to = ?to, "remove_edge");
        if let Some(back) = self.adjacency.get_mut(to) {
            back.remove(from);
        }
        self.adjacency
            .get_mut(from)
            .and_then(|neighbors| neighbors.remove(to))
            .ok_or_else(|| GraphError::edge_not_found(from, to))
    }

    /// Changes the weight of an edge in both directions.
    pub fn set_edge_weight(&mut self, from: &V, to: &V, weight: W) -> GraphResult<()>
    where
        W: Clone,
    {
        if !self.has_edge(from, to) || !self.has_edge(to, from) {
            return Err(GraphError::edge_not_found(from, to));
        }
        for (a, b) in [(from, to), (to, from)] {
            if let Some(edge) = self
                .adjacency
                .get_mut(a)
                .and_then(|neighbors| neighbors.get_mut(b))
            {
                edge.set_weight(weight.clone());
            }
        }
        Ok(())
    }

    fn neighbors_entry(&mut self, id: &V) -> &mut HashMap<V, Edge<V, W>> {
        self.adjacency.entry(id.clone()).or_default()
    }

    /// Gets an iterator over the neighbors of a vertex and the records of the
    /// edges leading to them.  The order is unspecified but stable as long
    /// as the graph is not mutated.
    pub fn neighbors<'a>(
        &'a self,
        id: &V,
    ) -> GraphResult<impl Iterator<Item = (&'a V, &'a Edge<V, W>)> + use<'a, V, R, W>> {
        self.adjacency
            .get(id)
            .map(|neighbors| neighbors.iter())
            .ok_or_else(|| GraphError::vertex_not_found(id))
    }

    /// Gets the ids of the neighbors of a vertex, in the same order as
    /// [`Self::neighbors`].
    pub fn neighbor_ids(&self, id: &V) -> GraphResult<Vec<V>> {
        Ok(self.neighbors(id)?.map(|(n, _)| n.clone()).collect())
    }

    pub fn get_degree(&self, id: &V) -> GraphResult<usize> {
        self.adjacency
            .get(id)
            .map(HashMap::len)
            .ok_or_else(|| GraphError::vertex_not_found(id))
    }

    /// Gets the number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(HashMap::len).sum::<usize>() / 2
    }

    /// Gets an iterator over the edges, yielding each undirected edge once
    /// through its `from < to` record.
    pub fn edges(&self) -> impl Iterator<Item = &Edge<V, W>> + '_ {
        self.adjacency
            .values()
            .flat_map(|neighbors| neighbors.values())
            .filter(|edge| edge.from() < edge.to())
    }

    /// Compares vertex ids and weighted edges, ignoring resources and the
    /// traversal state left behind by algorithms.
    pub fn structurally_eq(&self, other: &Self) -> bool
    where
        W: PartialEq,
    {
        self.vertex_count == other.vertex_count
            && self.vertices.keys().all(|id| other.has_vertex(id))
            && self.edge_count() == other.edge_count()
            && self.edges().all(|edge| {
                other
                    .get_edge(edge.from(), edge.to())
                    .is_ok_and(|theirs| theirs.weight() == edge.weight())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vertex::Color;

    type TestGraph = Graph<i32, &'static str, i32>;

    fn triangle() -> TestGraph {
        let mut graph = TestGraph::with_size(3);
        graph.add_edge(0, 1, 10).unwrap();
        graph.add_edge(1, 2, 20).unwrap();
        graph.add_edge(2, 0, 30).unwrap();
        graph
    }

    #[test]
    fn test_new_graph_is_empty() {
        let graph = TestGraph::new();
        assert!(graph.is_empty());
        assert_eq!(graph.vertex_count(), 0);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_with_size() {
        let graph = TestGraph::with_size(5);
        assert_eq!(graph.vertex_count(), 5);
        for id in 0..5 {
            assert!(graph.has_vertex(&id));
            assert_eq!(graph.get_degree(&id).unwrap(), 0);
            assert_eq!(graph.get_vertex(&id).unwrap().resource(), None);
        }
        assert!(!graph.has_vertex(&5));
    }

    #[test]
    fn test_add_vertex_with_resource() {
        let mut graph = TestGraph::new();
        graph.add_vertex_with(7, "depot").unwrap();
        assert_eq!(graph.get_vertex(&7).unwrap().resource(), Some(&"depot"));
        assert!(matches!(
            graph.add_vertex(7),
            Err(GraphError::DuplicateVertex(_))
        ));
        assert_eq!(graph.vertex_count(), 1);
    }

    #[test]
    fn test_add_edge_is_symmetric() {
        let graph = triangle();
        assert!(graph.has_edge(&0, &1));
        assert!(graph.has_edge(&1, &0));
        assert_eq!(*graph.get_edge(&1, &0).unwrap().weight(), 10);
        assert_eq!(*graph.get_edge(&1, &0).unwrap().from(), 1);
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn test_add_edge_errors() {
        let mut graph = TestGraph::with_size(2);
        assert!(matches!(
            graph.add_edge(0, 0, 1),
            Err(GraphError::SelfLoop(_))
        ));
        assert!(matches!(
            graph.add_edge(0, 5, 1),
            Err(GraphError::VertexNotFound(_))
        ));
        graph.add_edge(0, 1, 1).unwrap();
        assert!(matches!(
            graph.add_edge(1, 0, 2),
            Err(GraphError::DuplicateEdge { .. })
        ));
        assert_eq!(*graph.get_edge(&0, &1).unwrap().weight(), 1);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_remove_edge() {
        let mut graph = triangle();
        let removed = graph.remove_edge(&1, &0).unwrap();
        assert_eq!(removed, Edge::new(1, 0, 10));
        assert!(!graph.has_edge(&0, &1));
        assert!(!graph.has_edge(&1, &0));
        assert_eq!(graph.edge_count(), 2);
        assert!(matches!(
            graph.remove_edge(&0, &1),
            Err(GraphError::EdgeNotFound { .. })
        ));
    }

    #[test]
    fn test_remove_vertex_severs_edges() {
        let mut graph = triangle();
        graph.get_vertex_mut(&1).unwrap().set_color(Color::Gray);
        let removed = graph.remove_vertex(&1).unwrap();
        assert_eq!(*removed.id(), 1);
        assert_eq!(removed.color(), Color::Gray);
        assert_eq!(graph.vertex_count(), 2);
        assert!(!graph.has_edge(&0, &1));
        assert!(!graph.has_edge(&2, &1));
        assert!(graph.has_edge(&0, &2));
        assert_eq!(graph.get_degree(&0).unwrap(), 1);
        assert!(matches!(
            graph.remove_vertex(&1),
            Err(GraphError::VertexNotFound(_))
        ));
    }

    #[test]
    fn test_remove_vertex_keeps_other_ids() {
        let mut graph = TestGraph::with_size(4);
        graph.remove_vertex(&1).unwrap();
        let mut ids: Vec<_> = graph.vertex_ids().copied().collect();
        ids.sort();
        assert_eq!(ids, vec![0, 2, 3]);
    }

    #[test]
    fn test_set_edge_weight_updates_both_records() {
        let mut graph = triangle();
        graph.set_edge_weight(&2, &1, 99).unwrap();
        assert_eq!(*graph.get_edge(&1, &2).unwrap().weight(), 99);
        assert_eq!(*graph.get_edge(&2, &1).unwrap().weight(), 99);
        assert!(matches!(
            graph.set_edge_weight(&0, &7, 1),
            Err(GraphError::EdgeNotFound { .. })
        ));
    }

    #[test]
    fn test_has_edge_with_unknown_vertex() {
        let graph = triangle();
        assert!(!graph.has_edge(&42, &0));
        assert!(matches!(
            graph.get_edge(&42, &0),
            Err(GraphError::VertexNotFound(_))
        ));
        assert!(matches!(
            graph.get_degree(&42),
            Err(GraphError::VertexNotFound(_))
        ));
    }

    #[test]
    fn test_neighbors() {
        let graph = triangle();
        let mut neighbors = graph.neighbor_ids(&0).unwrap();
        neighbors.sort();
        assert_eq!(neighbors, vec![1, 2]);
        for (neighbor, edge) in graph.neighbors(&0).unwrap() {
            assert_eq!(edge.to(), neighbor);
            assert_eq!(*edge.from(), 0);
        }
    }

    #[test]
    fn test_edges_yields_each_pair_once() {
        let graph = triangle();
        let mut edges: Vec<_> = graph
            .edges()
            .map(|e| (*e.from(), *e.to(), *e.weight()))
            .collect();
        edges.sort();
        assert_eq!(edges, vec![(0, 1, 10), (0, 2, 30), (1, 2, 20)]);
    }

    #[test]
    fn test_clear_and_resize() {
        let mut graph = triangle();
        graph.clear();
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
        graph.resize(4);
        assert_eq!(graph.vertex_count(), 4);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_clone_is_deep() {
        let graph = triangle();
        let mut copy = graph.clone();
        assert_eq!(graph, copy);
        copy.set_edge_weight(&0, &1, 1).unwrap();
        assert_eq!(*graph.get_edge(&0, &1).unwrap().weight(), 10);
        assert_ne!(graph, copy);
    }

    #[test]
    fn test_take_empties_source() {
        let mut graph = triangle();
        let moved = graph.take();
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(moved.vertex_count(), 3);
        assert_eq!(moved.edge_count(), 3);
    }

    #[test]
    fn test_reset_parameters() {
        let mut graph = triangle();
        let pristine = graph.clone();
        for id in 0..3 {
            let vertex = graph.get_vertex_mut(&id).unwrap();
            vertex.set_color(Color::Black);
            vertex.set_discovery_time(Some(1));
            vertex.set_finish_time(Some(2));
        }
        assert_ne!(graph, pristine);
        assert!(graph.structurally_eq(&pristine));
        graph.reset_parameters();
        assert_eq!(graph, pristine);
    }

    #[test]
    fn test_structurally_eq_compares_weights() {
        let a = triangle();
        let mut b = triangle();
        assert!(a.structurally_eq(&b));
        b.set_edge_weight(&0, &2, 31).unwrap();
        assert!(!a.structurally_eq(&b));
        b.remove_edge(&0, &2).unwrap();
        assert!(!a.structurally_eq(&b));
    }
}
