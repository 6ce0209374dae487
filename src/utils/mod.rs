/*!
# Utilities

Helper structures shared by several algorithms:
- [`UnionFind`]: a disjoint-set forest over the nodes of a graph,
- [`Probability`]: validation helper for generator parameters.
*/

pub mod union_find;

pub use union_find::UnionFind;

/// Helper trait for probalities
pub trait Probability {
    /// Returns *true* if the probality is valid (ie. between `0` and `1`)
    fn is_valid_probility(&self) -> bool;
}

impl Probability for f64 {
    fn is_valid_probility(&self) -> bool {
        (0.0..=1.0).contains(self)
    }
}
