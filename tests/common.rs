#![allow(dead_code)]

use resgraph::prelude::*;

pub type IntGraph = Graph<i32, (), i32>;

/// Vertices 0..4 where {0, 1, 2} form a weighted triangle and 3 is
/// isolated.
pub fn triangle_and_isolated() -> IntGraph {
    let mut graph = IntGraph::with_size(4);
    graph.add_edge(0, 1, 1).unwrap();
    graph.add_edge(1, 2, 2).unwrap();
    graph.add_edge(0, 2, 5).unwrap();
    graph
}

/// The path 0 - 1 - ... - (n - 1) with unit weights.
pub fn path(n: usize) -> IntGraph {
    let mut graph = IntGraph::new();
    graph.generate_path(n, 1).unwrap();
    graph
}

pub fn sorted<T: Ord>(mut items: Vec<T>) -> Vec<T> {
    items.sort();
    items
}
