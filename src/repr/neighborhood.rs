use std::{
    iter::{Copied, Zip},
    slice::Iter,
};

use super::*;

/// Sorted neighborhood of a single node with one weight per neighbor.
///
/// Neighbors and weights are kept in two aligned vectors so that iterating neighbors alone
/// stays a plain slice iteration. Lookups are binary searches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightedNeighborhood {
    neighbors: Vec<Node>,
    weights: Vec<Weight>,
}

pub type NeighborhoodIter<'a> = Copied<Iter<'a, Node>>;
pub type WeightedNeighborhoodIter<'a> = Zip<Copied<Iter<'a, Node>>, Copied<Iter<'a, Weight>>>;

impl WeightedNeighborhood {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of neighbors in the Neighborhood
    pub fn num_of_neighbors(&self) -> NumNodes {
        self.neighbors.len() as NumNodes
    }

    /// Returns an iterator over all neighbors in ascending order
    pub fn neighbors(&self) -> NeighborhoodIter<'_> {
        self.neighbors.iter().copied()
    }

    /// Returns an iterator over all `(neighbor, weight)` pairs in ascending order of neighbors
    pub fn weighted_neighbors(&self) -> WeightedNeighborhoodIter<'_> {
        self.neighbors
            .iter()
            .copied()
            .zip(self.weights.iter().copied())
    }

    /// Returns the weight of the edge to `v` if `v` is a neighbor
    pub fn weight_of(&self, v: Node) -> Option<Weight> {
        self.neighbors
            .binary_search(&v)
            .ok()
            .map(|i| self.weights[i])
    }

    /// Inserts `v` with weight `w` or overwrites the weight if `v` was already present.
    /// Returns the previous weight.
    pub fn insert(&mut self, v: Node, w: Weight) -> Option<Weight> {
        match self.neighbors.binary_search(&v) {
            Ok(i) => Some(std::mem::replace(&mut self.weights[i], w)),
            Err(i) => {
                self.neighbors.insert(i, v);
                self.weights.insert(i, w);
                None
            }
        }
    }

    /// Removes `v` and returns the weight of the removed edge
    pub fn remove(&mut self, v: Node) -> Option<Weight> {
        let i = self.neighbors.binary_search(&v).ok()?;
        self.neighbors.remove(i);
        Some(self.weights.remove(i))
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    #[test]
    fn sorted_insert_and_overwrite() {
        let mut nb = WeightedNeighborhood::new();
        assert_eq!(nb.insert(5, 1.0), None);
        assert_eq!(nb.insert(2, 3.0), None);
        assert_eq!(nb.insert(9, 0.5), None);
        assert_eq!(nb.insert(5, 7.0), Some(1.0));

        assert_eq!(nb.neighbors().collect_vec(), vec![2, 5, 9]);
        assert_eq!(
            nb.weighted_neighbors().collect_vec(),
            vec![(2, 3.0), (5, 7.0), (9, 0.5)]
        );
        assert_eq!(nb.num_of_neighbors(), 3);
        assert_eq!(nb.weight_of(9), Some(0.5));
        assert_eq!(nb.weight_of(4), None);
    }

    #[test]
    fn remove() {
        let mut nb = WeightedNeighborhood::new();
        nb.insert(1, 1.0);
        nb.insert(3, 2.0);
        assert_eq!(nb.remove(1), Some(1.0));
        assert_eq!(nb.remove(1), None);
        assert_eq!(nb.weight_of(1), None);
        assert_eq!(nb.weighted_neighbors().collect_vec(), vec![(3, 2.0)]);

        assert_eq!(nb.remove(3), Some(2.0));
        assert_eq!(nb.num_of_neighbors(), 0);
    }
}
