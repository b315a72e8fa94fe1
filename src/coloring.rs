use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info_span};

use crate::{
    Graph,
    documents::{self, ColoringDocument},
    error::GraphResult,
    id::VertexId,
    sink::LogSink,
    vertex::Color,
};

/// An assignment of color indices to vertices such that no two adjacent
/// vertices share an index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Coloring<V: Ord> {
    colors: BTreeMap<V, usize>,
}

impl<V: VertexId> Coloring<V> {
    pub fn color_of(&self, id: &V) -> Option<usize> {
        self.colors.get(id).copied()
    }

    /// The number of distinct colors used.
    pub fn color_count(&self) -> usize {
        self.colors.values().collect::<BTreeSet<_>>().len()
    }

    pub fn colors(&self) -> &BTreeMap<V, usize> {
        &self.colors
    }

    /// Returns true if no edge of `graph` joins two vertices of the same
    /// color and every vertex of `graph` is colored.
    pub fn is_valid_for<R, W>(&self, graph: &Graph<V, R, W>) -> bool {
        graph.vertex_ids().all(|id| self.colors.contains_key(id))
            && graph
                .edges()
                .all(|edge| self.color_of(edge.from()) != self.color_of(edge.to()))
    }
}

impl<V, R, W> Graph<V, R, W>
where
    V: VertexId,
{
    /// Colors the graph greedily.
    ///
    /// Vertices are visited `start` first and then by descending degree, with
    /// ties broken by ascending id.  Each takes the smallest index not used
    /// by an already colored neighbor.  The result is valid but not
    /// necessarily minimal.  Every vertex is black afterwards.
    pub fn greedy_coloring(
        &mut self,
        start: V,
        sink: &mut dyn LogSink,
    ) -> GraphResult<Coloring<V>> {
        self.check_start(&start)?;
        let _span = info_span!(
            "greedy_coloring",
            vertex_count = self.vertex_count(),
            start = ?start
        )
        .entered();
        documents::record_parameters(
            sink,
            documents::COLORING_PARAMETERS,
            self.vertex_count(),
            &start,
        )?;
        self.reset_parameters();

        let mut rest = Vec::with_capacity(self.vertex_count());
        for id in self.vertex_ids() {
            if *id != start {
                rest.push((self.get_degree(id)?, id.clone()));
            }
        }
        rest.sort_by(|(da, a), (db, b)| db.cmp(da).then_with(|| a.cmp(b)));
        let order = std::iter::once(start).chain(rest.into_iter().map(|(_, id)| id));

        let mut colors = BTreeMap::new();
        for id in order {
            let taken: BTreeSet<usize> = self
                .neighbors(&id)?
                .filter_map(|(neighbor, _)| colors.get(neighbor).copied())
                .collect();
            let mut color = 0;
            while taken.contains(&color) {
                color += 1;
            }
            colors.insert(id.clone(), color);
            self.get_vertex_mut(&id)?.set_color(Color::Black);
        }

        let coloring = Coloring { colors };
        debug!(colors = coloring.color_count(), "coloring finished");
        documents::record(
            sink,
            documents::COLORING_RESULTS,
            &ColoringDocument {
                coloring: &coloring.colors,
            },
        )?;
        Ok(coloring)
    }
}
