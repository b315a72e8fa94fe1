//! Single-source shortest paths: Dijkstra over edge weights and a
//! breadth-first search over hop counts.
use std::{
    cmp::Ordering,
    collections::{BTreeMap, BinaryHeap, HashMap, VecDeque},
};

use pathfinding::prelude::build_path;
use tracing::{debug, info_span, trace};

use crate::{
    Graph,
    documents::{self, PathsDocument},
    error::{GraphError, GraphResult},
    id::{VertexId, Weight},
    sink::LogSink,
    vertex::Color,
};

/// Distances and paths from a start vertex.  Only reachable vertices have
/// entries; the start vertex is at distance zero with the path `[start]`.
#[derive(Clone, Debug, PartialEq)]
pub struct ShortestPaths<V: Ord, D> {
    start: V,
    distances: BTreeMap<V, D>,
    paths: BTreeMap<V, Vec<V>>,
}

impl<V: VertexId, D: Copy> ShortestPaths<V, D> {
    fn from_parents(start: V, distances: HashMap<V, D>, parents: &HashMap<V, (V, D)>) -> Self {
        let paths = distances
            .keys()
            .map(|id| (id.clone(), build_path(id, parents)))
            .collect();
        Self {
            start,
            distances: distances.into_iter().collect(),
            paths,
        }
    }

    pub fn start(&self) -> &V {
        &self.start
    }

    /// Gets the distance to a vertex, or `None` if it is unreachable.
    pub fn distance(&self, id: &V) -> Option<D> {
        self.distances.get(id).copied()
    }

    /// Gets the vertices of a shortest path from the start to `id`,
    /// inclusive of both ends.
    pub fn path(&self, id: &V) -> Option<&[V]> {
        self.paths.get(id).map(Vec::as_slice)
    }

    pub fn is_reachable(&self, id: &V) -> bool {
        self.distances.contains_key(id)
    }

    pub fn distances(&self) -> &BTreeMap<V, D> {
        &self.distances
    }

    pub fn paths(&self) -> &BTreeMap<V, Vec<V>> {
        &self.paths
    }

    fn paths_by_ref(&self) -> BTreeMap<&V, &[V]> {
        self.paths
            .iter()
            .map(|(id, path)| (id, path.as_slice()))
            .collect()
    }
}

/// A heap entry ordered so that `BinaryHeap` pops the smallest distance
/// first.  Incomparable distances compare as equal.
struct Candidate<V, W> {
    distance: W,
    id: V,
}

impl<V: Ord, W: PartialOrd> Ord for Candidate<V, W> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .partial_cmp(&self.distance)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl<V: Ord, W: PartialOrd> PartialOrd for Candidate<V, W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<V: Ord, W: PartialOrd> PartialEq for Candidate<V, W> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<V: Ord, W: PartialOrd> Eq for Candidate<V, W> {}

impl<V, R, W> Graph<V, R, W>
where
    V: VertexId,
    W: Weight,
{
    /// Gets the first edge with a negative weight, if any.
    fn find_negative_edge(&self) -> Option<(&V, &V)> {
        self.edges()
            .find(|edge| edge.weight().is_negative())
            .map(|edge| (edge.from(), edge.to()))
    }

    /// Computes weighted shortest paths from `start` with Dijkstra's
    /// algorithm.
    ///
    /// Fails with [`GraphError::NegativeWeight`] before touching any state
    /// if an edge has a negative weight.  A vertex is discovered when it is
    /// first reached and finished when it is settled, so the unreachable
    /// vertices end white.  A relaxation whose sum overflows `W` is skipped,
    /// so a vertex reachable only through such sums is unreachable.
    pub fn dijkstra(
        &mut self,
        start: V,
        sink: &mut dyn LogSink,
    ) -> GraphResult<ShortestPaths<V, W>> {
        self.check_start(&start)?;
        if let Some((from, to)) = self.find_negative_edge() {
            return Err(GraphError::negative_weight(from, to));
        }
        let _span = info_span!(
            "dijkstra",
            vertex_count = self.vertex_count(),
            start = ?start
        )
        .entered();
        documents::record_parameters(
            sink,
            documents::DIJKSTRA_PARAMETERS,
            self.vertex_count(),
            &start,
        )?;
        self.reset_parameters();

        let mut time = 0;
        let mut distances: HashMap<V, W> = HashMap::from([(start.clone(), W::zero())]);
        let mut parents: HashMap<V, (V, W)> = HashMap::new();
        let mut heap = BinaryHeap::from([Candidate {
            distance: W::zero(),
            id: start.clone(),
        }]);
        self.get_vertex_mut(&start)?.discover(time);
        time += 1;

        while let Some(Candidate { distance, id }) = heap.pop() {
            if self.get_vertex(&id)?.color() == Color::Black {
                continue;
            }
            if distances.get(&id).is_some_and(|best| *best < distance) {
                continue;
            }
            self.get_vertex_mut(&id)?.finish(time);
            time += 1;
            trace!(vertex = ?id, distance = ?distance, "settled");

            let edges: Vec<(V, W)> = self
                .neighbors(&id)?
                .map(|(neighbor, edge)| (neighbor.clone(), *edge.weight()))
                .collect();
            for (neighbor, weight) in edges {
                let vertex = self.get_vertex_mut(&neighbor)?;
                if vertex.color() == Color::Black {
                    continue;
                }
                let Some(candidate) = distance.checked_add(weight) else {
                    trace!(vertex = ?neighbor, "relaxation overflows, skipped");
                    continue;
                };
                if distances
                    .get(&neighbor)
                    .is_none_or(|best| candidate < *best)
                {
                    if vertex.color() == Color::White {
                        vertex.discover(time);
                        time += 1;
                    }
                    distances.insert(neighbor.clone(), candidate);
                    parents.insert(neighbor.clone(), (id.clone(), candidate));
                    heap.push(Candidate {
                        distance: candidate,
                        id: neighbor,
                    });
                }
            }
        }

        let result = ShortestPaths::from_parents(start, distances, &parents);
        debug!(reachable = result.distances.len(), "dijkstra finished");
        let document = PathsDocument {
            distances: result.distances.iter().collect(),
            paths: result.paths_by_ref(),
        };
        documents::record(sink, documents::DIJKSTRA_RESULTS, &document)?;
        Ok(result)
    }
}

impl<V, R, W> Graph<V, R, W>
where
    V: VertexId,
{
    /// Computes hop-count shortest paths from `start` with a breadth-first
    /// search, ignoring edge weights.
    ///
    /// The recorded document lists every vertex, with a distance of `-1` and
    /// no path for the unreached ones.
    pub fn shortest_paths_unweighted(
        &mut self,
        start: V,
        sink: &mut dyn LogSink,
    ) -> GraphResult<ShortestPaths<V, usize>> {
        self.check_start(&start)?;
        let _span = info_span!(
            "shortest_paths_unweighted",
            vertex_count = self.vertex_count(),
            start = ?start
        )
        .entered();
        documents::record_parameters(
            sink,
            documents::UNWEIGHTED_PARAMETERS,
            self.vertex_count(),
            &start,
        )?;
        self.reset_parameters();

        let mut time = 0;
        let mut distances: HashMap<V, usize> = HashMap::from([(start.clone(), 0)]);
        let mut parents: HashMap<V, (V, usize)> = HashMap::new();
        self.get_vertex_mut(&start)?.discover(time);
        time += 1;
        let mut queue = VecDeque::from([(start.clone(), 0)]);
        while let Some((current, hops)) = queue.pop_front() {
            for neighbor in self.neighbor_ids(&current)? {
                let vertex = self.get_vertex_mut(&neighbor)?;
                if vertex.color() == Color::White {
                    vertex.discover(time);
                    time += 1;
                    distances.insert(neighbor.clone(), hops + 1);
                    parents.insert(neighbor.clone(), (current.clone(), hops + 1));
                    queue.push_back((neighbor, hops + 1));
                }
            }
            self.get_vertex_mut(&current)?.finish(time);
            time += 1;
        }

        let result = ShortestPaths::from_parents(start, distances, &parents);
        debug!(reachable = result.distances.len(), "unweighted search finished");
        let document = PathsDocument {
            distances: self
                .vertex_ids()
                .map(|id| {
                    let hops = result
                        .distance(id)
                        .map_or(-1, |hops| i64::try_from(hops).unwrap_or(i64::MAX));
                    (id, hops)
                })
                .collect(),
            paths: result.paths_by_ref(),
        };
        documents::record(sink, documents::UNWEIGHTED_RESULTS, &document)?;
        Ok(result)
    }
}
