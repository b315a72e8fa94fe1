use std::collections::HashSet;

use quickcheck::{Arbitrary, Gen};

use crate::Graph;

pub type ArbInner = Graph<u32, (), u32>;

/// A small random graph together with one of its vertices, or `0` when the
/// graph is empty.
#[derive(Debug, Clone)]
pub struct ArbGraph {
    pub graph: ArbInner,
    pub start: u32,
}

impl Arbitrary for ArbGraph {
    fn arbitrary(g: &mut Gen) -> Self {
        let num_vertices = usize::arbitrary(g) % 20; // Limit size for testing
        let num_edges = usize::arbitrary(g) % 50;

        let mut graph = ArbInner::with_size(num_vertices);
        for _ in 0..num_edges {
            if num_vertices < 2 {
                break;
            }
            let from = (usize::arbitrary(g) % num_vertices) as u32;
            let to = (usize::arbitrary(g) % num_vertices) as u32;
            // Self loops and repeated pairs are rejected and simply skipped.
            let _ = graph.add_edge(from, to, u32::from(u8::arbitrary(g)));
        }
        let start = match num_vertices {
            0 => 0,
            n => (usize::arbitrary(g) % n) as u32,
        };

        ArbGraph { graph, start }
    }
}

pub fn has_duplicates<T: Eq + std::hash::Hash>(items: impl IntoIterator<Item = T>) -> bool {
    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert(item) {
            return true;
        }
    }
    false
}

/// Checks the internal consistency of a graph.
pub fn check_graph_consistency(graph: &ArbInner) {
    assert_eq!(graph.vertex_ids().count(), graph.vertex_count());
    assert_eq!(graph.is_empty(), graph.vertex_count() == 0);

    let mut degree_sum = 0;
    for id in graph.vertex_ids() {
        let degree = graph.get_degree(id).unwrap();
        assert_eq!(graph.neighbors(id).unwrap().count(), degree);
        degree_sum += degree;

        for (neighbor, edge) in graph.neighbors(id).unwrap() {
            assert!(graph.has_vertex(neighbor));
            assert_ne!(neighbor, id);
            assert_eq!(edge.from(), id);
            assert_eq!(edge.to(), neighbor);
            let back = graph.get_edge(neighbor, id).unwrap();
            assert_eq!(back.weight(), edge.weight());
        }
    }
    assert_eq!(degree_sum, 2 * graph.edge_count());
    assert_eq!(graph.edges().count(), graph.edge_count());
    assert!(!has_duplicates(graph.edges().map(|e| (*e.from(), *e.to()))));
}
