use std::{fmt::Debug, hash::Hash};

use pathfinding::num_traits::{CheckedAdd, Zero};
use serde::{Serialize, de::DeserializeOwned};

/// A trait representing a vertex identifier in a graph.
///
/// This trait has no methods but serves as a marker for the bounds every
/// vertex key must satisfy: it is hashed for adjacency lookups, ordered so
/// that each undirected pair has a canonical `from < to` orientation, and
/// serializable so that algorithm documents can name it.  Every type meeting
/// the bounds is a `VertexId`.
pub trait VertexId: Eq + Hash + Clone + Debug + Ord + Serialize + DeserializeOwned {}

impl<T> VertexId for T where T: Eq + Hash + Clone + Debug + Ord + Serialize + DeserializeOwned {}

/// A vertex identifier that can be built from a zero-based index.  Used by
/// [`Graph::with_size`](crate::Graph::with_size) and the generators, which
/// number their vertices `0..n`.
pub trait IndexedId: VertexId {
    /// Converts an index into an identifier.  Panics if the index does not
    /// fit in the identifier type.
    fn from_index(index: usize) -> Self;
}

macro_rules! impl_indexed_id {
    ($($t:ty),*) => {
        $(
            impl IndexedId for $t {
                fn from_index(index: usize) -> Self {
                    <$t>::try_from(index).expect("vertex index out of range for id type")
                }
            }
        )*
    };
}

impl_indexed_id!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

/// An edge weight.  Weights only need a partial order so that floating point
/// types can be used; comparisons between incomparable values (NaN) are
/// treated as equal by the shortest path search.
pub trait Weight: Copy + Debug + PartialOrd + Zero + Serialize + DeserializeOwned {
    /// Returns true if the weight is strictly below zero.
    fn is_negative(&self) -> bool {
        *self < Self::zero()
    }

    /// Adds two weights, or returns `None` if the sum does not fit in the
    /// type.  Floating point sums saturate to infinity and always succeed.
    fn checked_add(self, other: Self) -> Option<Self>;
}

macro_rules! impl_integer_weight {
    ($($t:ty),*) => {
        $(
            impl Weight for $t {
                fn checked_add(self, other: Self) -> Option<Self> {
                    CheckedAdd::checked_add(&self, &other)
                }
            }
        )*
    };
}

impl_integer_weight!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl Weight for f32 {
    fn checked_add(self, other: Self) -> Option<Self> {
        Some(self + other)
    }
}

impl Weight for f64 {
    fn checked_add(self, other: Self) -> Option<Self> {
        Some(self + other)
    }
}
