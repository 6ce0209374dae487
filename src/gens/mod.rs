/*!
# Graph Generators

Builders for random weighted graphs and helpers to add deterministic substructures
(paths, cycles, cliques) to existing graphs. Mostly used to produce test instances.

Generators follow the *Builder* / *Setter* pattern:

1. Create a generator instance (e.g., `Gnp::new()`).
2. Set parameters (e.g., `.nodes(n).prob(p).integral_weights(1, 10)`).
3. Produce edges via `stream()` or a whole graph via `generate()`.

All random generators take the random number generator as an argument, so seeding it
(e.g. with `rand_pcg::Pcg64::seed_from_u64`) makes the output reproducible.
*/

use std::ops::Range;

use rand::Rng;

use crate::{prelude::*, utils::*};

mod gnp;
mod substructures;

pub use gnp::*;
pub use substructures::*;

/// Trait for generators that allow setting the number of nodes.
pub trait NumNodesGen: Sized {
    /// Sets the number of nodes in the graph generator.
    fn set_nodes(&mut self, n: NumNodes);

    /// Sets the number of nodes in the graph generator.
    fn nodes(mut self, n: NumNodes) -> Self {
        self.set_nodes(n);
        self
    }
}

/// Trait for generators that allow choosing between directed and undirected edges.
pub trait DirectionGen: Sized {
    /// Sets the direction of the generated graph.
    fn set_direction(&mut self, direction: Direction);

    /// Sets the direction of the generated graph.
    fn direction(mut self, direction: Direction) -> Self {
        self.set_direction(direction);
        self
    }
}

/// How edge weights are drawn
#[derive(Debug, Clone, Default, PartialEq)]
pub enum WeightRange {
    /// Every edge gets weight `1`
    #[default]
    Unit,
    /// Uniformly from the half-open real interval
    Uniform(Range<Weight>),
    /// Uniformly from the closed integer interval `lo..=hi`
    Integral(i64, i64),
}

impl WeightRange {
    /// Draws a single weight
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Weight {
        match self {
            WeightRange::Unit => 1.0,
            WeightRange::Uniform(range) => rng.random_range(range.clone()),
            WeightRange::Integral(lo, hi) => rng.random_range(*lo..=*hi) as Weight,
        }
    }
}

/// Trait for generators producing weighted edges.
pub trait WeightsGen: Sized {
    /// Sets the weight distribution of generated edges.
    fn set_weight_range(&mut self, weights: WeightRange);

    /// Draw weights uniformly from `range`.
    /// ** Panics if the range is empty or not finite **
    fn weights(mut self, range: Range<Weight>) -> Self {
        assert!(
            range.start.is_finite() && range.end.is_finite() && range.start < range.end,
            "invalid weight range {range:?}"
        );
        self.set_weight_range(WeightRange::Uniform(range));
        self
    }

    /// Draw integral weights uniformly from `lo..=hi`.
    /// ** Panics if `lo > hi` **
    fn integral_weights(mut self, lo: i64, hi: i64) -> Self {
        assert!(lo <= hi, "invalid weight range {lo}..={hi}");
        self.set_weight_range(WeightRange::Integral(lo, hi));
        self
    }
}

/// General trait for a configurable random edge generator.
pub trait GraphGenerator {
    /// Creates a lazy iterator (stream) over generated edges.
    fn stream<'a, R>(&'a self, rng: &'a mut R) -> impl Iterator<Item = WeightedEdge> + 'a
    where
        R: Rng;

    /// Generates a list of random edges.
    fn generate_edges<R>(&self, rng: &mut R) -> Vec<WeightedEdge>
    where
        R: Rng,
    {
        self.stream(rng).collect()
    }
}
