pub use crate::coloring::Coloring;
pub use crate::edge::Edge;
pub use crate::error::{GraphError, GraphResult};
pub use crate::graph::Graph;
pub use crate::id::{IndexedId, VertexId, Weight};
pub use crate::persistence::GraphDocument;
pub use crate::search::Traversal;
pub use crate::shortest_paths::ShortestPaths;
pub use crate::sink::{JsonFileSink, LogSink, MemorySink, NullSink};
pub use crate::vertex::{Color, Vertex};
