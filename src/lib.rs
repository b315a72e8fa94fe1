//! An undirected graph whose vertices may own resources, with breadth-first
//! and depth-first search, shortest paths, connected components and greedy
//! coloring.  Algorithms mark their progress on the vertices and report
//! their parameters and results to a [`LogSink`] as JSON documents.
//!
//! ```
//! use resgraph::prelude::*;
//!
//! let mut graph: Graph<u32, (), i64> = Graph::with_size(3);
//! graph.add_edge(0, 1, 1).unwrap();
//! graph.add_edge(1, 2, 2).unwrap();
//! graph.add_edge(0, 2, 5).unwrap();
//!
//! let mut sink = MemorySink::new();
//! let paths = graph.dijkstra(0, &mut sink).unwrap();
//! assert_eq!(paths.distance(&2), Some(3));
//! assert_eq!(paths.path(&2), Some(&[0, 1, 2][..]));
//! assert!(sink.get("dijkstra_results").is_some());
//! ```
pub mod coloring;
pub mod documents;
pub mod edge;
pub mod error;
pub mod generators;
pub mod graph;
pub mod id;
pub mod persistence;
pub mod prelude;
pub mod search;
pub mod shortest_paths;
pub mod sink;
pub mod tracing_support;
pub mod vertex;

#[cfg(test)]
mod graph_test_support;

pub use crate::graph::Graph;
pub use crate::sink::LogSink;
