/*!
# Minimum Spanning Trees

Kruskal's algorithm over an undirected graph: edges are considered in ascending order of weight
(ties broken by the normalized endpoints) and accepted iff they connect two different
components of a [`UnionFind`]. The scan stops once `n - 1` edges have been accepted.

On disconnected graphs, [`SpanningTrees::kruskal`] returns a minimum spanning *forest*
whereas [`SpanningTrees::minimum_spanning_tree`] reports [`GraphError::DisconnectedGraph`].
*/

use std::cmp::Ordering;

use super::*;

/// Edges of a minimum spanning forest together with their total weight
#[derive(Debug, Clone, PartialEq)]
pub struct SpanningForest {
    total_weight: Weight,
    edges: Vec<WeightedEdge>,
    number_of_trees: NumNodes,
}

impl SpanningForest {
    /// Sum of the weights of all selected edges
    pub fn total_weight(&self) -> Weight {
        self.total_weight
    }

    /// Selected edges in the order they were accepted (non-decreasing weight).
    /// Each edge is normalized, i.e. `origin <= destination`.
    pub fn edges(&self) -> &[WeightedEdge] {
        &self.edges
    }

    pub fn number_of_edges(&self) -> NumEdges {
        self.edges.len() as NumEdges
    }

    /// Number of trees in the forest, i.e. the number of connected components of the graph
    pub fn number_of_trees(&self) -> NumNodes {
        self.number_of_trees
    }

    /// Returns *true* if the forest is a single tree spanning all nodes
    pub fn is_spanning_tree(&self) -> bool {
        self.number_of_trees <= 1
    }

    pub fn into_edges(self) -> Vec<WeightedEdge> {
        self.edges
    }
}

/// Ascending by weight, then by endpoints
fn kruskal_order(a: &WeightedEdge, b: &WeightedEdge) -> Ordering {
    a.weight
        .total_cmp(&b.weight)
        .then_with(|| a.origin.cmp(&b.origin))
        .then_with(|| a.destination.cmp(&b.destination))
}

pub trait SpanningTrees: AdjacencyList + GraphType + Sized {
    /// Computes a minimum spanning forest with Kruskal's algorithm.
    /// Self-loops are never selected.
    ///
    /// # Errors
    /// [`GraphError::UnsupportedDirection`] if the graph is directed
    ///
    /// # Examples
    /// ```
    /// use wgraphs::{prelude::*, algo::*};
    ///
    /// let g = WeightedGraph::from_edges(
    ///     4,
    ///     Direction::Undirected,
    ///     [(0, 1, 1.0), (1, 2, 2.0), (0, 2, 2.5), (2, 3, 1.0)],
    /// ).unwrap();
    ///
    /// let mst = g.kruskal().unwrap();
    /// assert_eq!(mst.total_weight(), 4.0);
    /// assert_eq!(mst.number_of_edges(), 3);
    /// ```
    fn kruskal(&self) -> Result<SpanningForest> {
        require_direction!(self, Direction::Undirected, "minimum spanning tree");

        let mut candidates = self
            .weighted_edges(true)
            .filter(|e| !e.is_loop())
            .collect::<Vec<_>>();
        candidates.sort_unstable_by(kruskal_order);

        let n = self.number_of_nodes();
        let target = n.saturating_sub(1) as usize;

        let mut components = UnionFind::new(n);
        let mut edges = Vec::with_capacity(target);
        let mut total_weight = 0.0;

        for e in candidates {
            if edges.len() == target {
                break;
            }
            if components.union(e.origin, e.destination) {
                trace!(origin = e.origin, destination = e.destination, weight = e.weight, "accept");
                total_weight += e.weight;
                edges.push(e);
            }
        }

        let forest = SpanningForest {
            total_weight,
            edges,
            number_of_trees: components.number_of_sets(),
        };
        debug!(
            n,
            total_weight = forest.total_weight,
            trees = forest.number_of_trees,
            "kruskal finished"
        );
        Ok(forest)
    }

    /// Same as [`SpanningTrees::kruskal`] but requires the result to be a single tree.
    ///
    /// # Errors
    /// - [`GraphError::UnsupportedDirection`] if the graph is directed
    /// - [`GraphError::DisconnectedGraph`] if the graph has more than one connected component
    fn minimum_spanning_tree(&self) -> Result<SpanningForest> {
        let forest = self.kruskal()?;
        if forest.is_spanning_tree() {
            Ok(forest)
        } else {
            Err(GraphError::DisconnectedGraph {
                components: forest.number_of_trees,
            })
        }
    }
}

impl<G> SpanningTrees for G where G: AdjacencyList + GraphType + Sized {}
