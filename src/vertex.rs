use serde::{Deserialize, Serialize};

/// Traversal state of a vertex.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Color {
    /// Not yet visited.
    #[default]
    White,
    /// Discovered but not fully explored.
    Gray,
    /// Fully explored.
    Black,
}

impl Color {
    /// The numeric encoding of the color: 0, 1 or 2.
    pub fn index(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Gray => 1,
            Color::Black => 2,
        }
    }
}

/// A vertex with an identifier, an optional owned resource, and scratch
/// state written by the traversal algorithms.
///
/// Equality includes the traversal state, so two vertices that differ only
/// in the color left behind by a search compare unequal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vertex<V, R> {
    id: V,
    resource: Option<R>,
    color: Color,
    discovery_time: Option<usize>,
    finish_time: Option<usize>,
}

impl<V, R> Vertex<V, R> {
    /// Creates a vertex without a resource.
    pub fn new(id: V) -> Self {
        Self {
            id,
            resource: None,
            color: Color::White,
            discovery_time: None,
            finish_time: None,
        }
    }

    /// Creates a vertex owning the given resource.
    pub fn with_resource(id: V, resource: R) -> Self {
        Self {
            resource: Some(resource),
            ..Self::new(id)
        }
    }

    pub fn id(&self) -> &V {
        &self.id
    }

    pub fn resource(&self) -> Option<&R> {
        self.resource.as_ref()
    }

    /// Takes the resource out of the vertex, leaving it without one.
    pub fn take_resource(&mut self) -> Option<R> {
        self.resource.take()
    }

    /// Consumes the vertex, returning its resource.
    pub fn into_resource(self) -> Option<R> {
        self.resource
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn discovery_time(&self) -> Option<usize> {
        self.discovery_time
    }

    pub fn finish_time(&self) -> Option<usize> {
        self.finish_time
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn set_discovery_time(&mut self, time: Option<usize>) {
        self.discovery_time = time;
    }

    pub fn set_finish_time(&mut self, time: Option<usize>) {
        self.finish_time = time;
    }

    /// Restores the traversal state of a freshly created vertex.
    pub fn reset(&mut self) {
        self.color = Color::White;
        self.discovery_time = None;
        self.finish_time = None;
    }

    /// Marks the vertex gray and stamps its discovery time.
    pub(crate) fn discover(&mut self, time: usize) {
        self.color = Color::Gray;
        self.discovery_time = Some(time);
    }

    /// Marks the vertex black and stamps its finish time.
    pub(crate) fn finish(&mut self, time: usize) {
        self.color = Color::Black;
        self.finish_time = Some(time);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Warehouse {
        name: &'static str,
        capacity: f64,
    }

    #[test]
    fn test_new_vertex_is_white_and_unset() {
        let v = Vertex::<i32, ()>::new(3);
        assert_eq!(*v.id(), 3);
        assert_eq!(v.resource(), None);
        assert_eq!(v.color(), Color::White);
        assert_eq!(v.discovery_time(), None);
        assert_eq!(v.finish_time(), None);
    }

    #[test]
    fn test_resource_is_owned() {
        let w = Warehouse {
            name: "north",
            capacity: 1000.0,
        };
        let mut v = Vertex::with_resource(0, w.clone());
        assert_eq!(v.resource(), Some(&w));
        assert_eq!(v.take_resource(), Some(w));
        assert_eq!(v.resource(), None);
    }

    #[test]
    fn test_color_encoding() {
        assert_eq!(Color::White.index(), 0);
        assert_eq!(Color::Gray.index(), 1);
        assert_eq!(Color::Black.index(), 2);
    }

    #[test]
    fn test_equality_includes_traversal_state() {
        let a = Vertex::<i32, ()>::new(1);
        let mut b = Vertex::<i32, ()>::new(1);
        assert_eq!(a, b);
        b.set_color(Color::Black);
        assert_ne!(a, b);
        b.reset();
        assert_eq!(a, b);
        b.set_discovery_time(Some(4));
        assert_ne!(a, b);
    }

    #[test]
    fn test_equality_compares_resources() {
        let a = Vertex::with_resource(1, "x");
        let b = Vertex::with_resource(1, "y");
        let c = Vertex::<i32, &str>::new(1);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(c, Vertex::new(1));
    }

    #[test]
    fn test_discover_and_finish() {
        let mut v = Vertex::<i32, ()>::new(0);
        v.discover(2);
        assert_eq!(v.color(), Color::Gray);
        assert_eq!(v.discovery_time(), Some(2));
        v.finish(5);
        assert_eq!(v.color(), Color::Black);
        assert_eq!(v.finish_time(), Some(5));
    }
}
