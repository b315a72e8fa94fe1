//! Generators for common graph families.
//!
//! Each generator replaces the contents of the graph with vertices `0..n`
//! and builds its edges through [`Graph::add_edge`], so every edge gets the
//! same `weight`.  The random generators take any [`Rng`] so tests can pass
//! a seeded one.
use rand::Rng;
use tracing::debug;

use crate::{Graph, error::GraphResult, id::IndexedId};

impl<V, R, W> Graph<V, R, W>
where
    V: IndexedId,
    W: Clone,
{
    fn connect(&mut self, a: usize, b: usize, weight: &W) -> GraphResult<()> {
        self.add_edge(V::from_index(a), V::from_index(b), weight.clone())
    }

    /// Builds the complete graph on `n` vertices.
    pub fn generate_complete(&mut self, n: usize, weight: W) -> GraphResult<()> {
        self.resize(n);
        for a in 0..n {
            for b in a + 1..n {
                self.connect(a, b, &weight)?;
            }
        }
        debug!(n, edges = self.edge_count(), "generated complete graph");
        Ok(())
    }

    /// Builds the path `0 - 1 - ... - (n - 1)`.
    pub fn generate_path(&mut self, n: usize, weight: W) -> GraphResult<()> {
        self.resize(n);
        for a in 1..n {
            self.connect(a - 1, a, &weight)?;
        }
        Ok(())
    }

    /// Builds a cycle on `n` vertices.  With fewer than three vertices the
    /// closing edge would be a self loop or a duplicate, so the result is a
    /// path.
    pub fn generate_cycle(&mut self, n: usize, weight: W) -> GraphResult<()> {
        self.generate_path(n, weight.clone())?;
        if n >= 3 {
            self.connect(n - 1, 0, &weight)?;
        }
        Ok(())
    }

    /// Builds a star with center `0` and leaves `1..n`.
    pub fn generate_star(&mut self, n: usize, weight: W) -> GraphResult<()> {
        self.resize(n);
        for leaf in 1..n {
            self.connect(0, leaf, &weight)?;
        }
        Ok(())
    }

    /// Builds a `rows` by `cols` grid.  The vertex in row `r` and column `c`
    /// is `r * cols + c`.
    pub fn generate_grid(&mut self, rows: usize, cols: usize, weight: W) -> GraphResult<()> {
        self.resize(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                let current = r * cols + c;
                if c + 1 < cols {
                    self.connect(current, current + 1, &weight)?;
                }
                if r + 1 < rows {
                    self.connect(current, current + cols, &weight)?;
                }
            }
        }
        Ok(())
    }

    /// Builds the hypercube of the given dimension: `2^dimension` vertices,
    /// two of them adjacent when their indices differ in exactly one bit.
    ///
    /// Panics if `2^dimension` does not fit in a `usize`.
    pub fn generate_hypercube(&mut self, dimension: u32, weight: W) -> GraphResult<()> {
        assert!(dimension < usize::BITS, "hypercube dimension too large");
        let n = 1usize << dimension;
        self.resize(n);
        for a in 0..n {
            for bit in 0..dimension {
                let b = a ^ (1 << bit);
                if a < b {
                    self.connect(a, b, &weight)?;
                }
            }
        }
        Ok(())
    }

    /// Builds a random recursive tree: every vertex `i > 0` is attached to
    /// a uniformly chosen vertex in `0..i`.
    pub fn generate_tree(&mut self, n: usize, weight: W, rng: &mut impl Rng) -> GraphResult<()> {
        self.resize(n);
        for child in 1..n {
            let parent = rng.random_range(0..child);
            self.connect(parent, child, &weight)?;
        }
        Ok(())
    }

    /// Builds the complete bipartite graph with sides `0..m` and
    /// `m..m + n`.
    pub fn generate_complete_bipartite(&mut self, m: usize, n: usize, weight: W) -> GraphResult<()> {
        self.resize(m + n);
        for a in 0..m {
            for b in m..m + n {
                self.connect(a, b, &weight)?;
            }
        }
        Ok(())
    }

    /// Builds a random bipartite graph with sides `0..m` and `m..m + n`,
    /// keeping each cross pair independently with probability `p`.
    ///
    /// Panics if `p` is not within `[0, 1]`.
    pub fn generate_bipartite(
        &mut self,
        m: usize,
        n: usize,
        p: f64,
        weight: W,
        rng: &mut impl Rng,
    ) -> GraphResult<()> {
        assert!((0.0..=1.0).contains(&p), "edge probability must be in [0, 1]");
        self.resize(m + n);
        for a in 0..m {
            for b in m..m + n {
                if rng.random_bool(p) {
                    self.connect(a, b, &weight)?;
                }
            }
        }
        debug!(m, n, p, edges = self.edge_count(), "generated bipartite graph");
        Ok(())
    }
}
