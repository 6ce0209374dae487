/*!
# Substructure Generators

Adds common motifs (paths, cycles and cliques) with a fixed weight to an already existing graph.

# Example

```rust
use wgraphs::{prelude::*, gens::*};

let mut g = WeightedGraph::new_directed(5);
g.connect_path([0, 1, 2], 1.0);
g.connect_cycle([2, 3, 4], 2.0);

assert_eq!(
    g.edges(false).collect::<Vec<Edge>>(),
    vec![Edge(0, 1), Edge(1, 2), Edge(2, 3), Edge(3, 4), Edge(4, 2)]
);
assert_eq!(g.weight(4, 2), 2.0);
```
*/

use itertools::Itertools;

use super::*;

/// Trait for creating additional **substructures** (paths, cycles, cliques)
/// inside an already existing graph. Existing edges are overwritten with the new weight.
///
/// ** All methods panic if a node is out of range or `weight` is not finite **
pub trait GeneratorSubstructures {
    /// Connects the given nodes in order with a **simple path**.
    fn connect_path<P>(&mut self, nodes_on_path: P, weight: Weight)
    where
        P: IntoIterator<Item = Node>;

    /// Connects consecutive nodes and additionally the last node back to the first.
    /// A single node yields a self-loop.
    fn connect_cycle<C>(&mut self, nodes_in_cycle: C, weight: Weight)
    where
        C: IntoIterator<Item = Node>;

    /// Connects all pairs of distinct given nodes.
    /// In directed graphs both orientations are added.
    fn connect_clique<C>(&mut self, nodes: C, weight: Weight)
    where
        C: IntoIterator<Item = Node>;
}

impl<G> GeneratorSubstructures for G
where
    G: GraphEdgeEditing + GraphType,
{
    fn connect_path<P>(&mut self, nodes_on_path: P, weight: Weight)
    where
        P: IntoIterator<Item = Node>,
    {
        for (u, v) in nodes_on_path.into_iter().tuple_windows() {
            self.add_edge(u, v, weight);
        }
    }

    fn connect_cycle<C>(&mut self, nodes_in_cycle: C, weight: Weight)
    where
        C: IntoIterator<Item = Node>,
    {
        let mut iter = nodes_in_cycle.into_iter();

        // walk once without cloning the iterator
        if let Some(first) = iter.next() {
            let mut prev = first;
            for cur in iter {
                self.add_edge(prev, cur, weight);
                prev = cur;
            }

            self.add_edge(prev, first, weight);
        }
    }

    fn connect_clique<C>(&mut self, nodes: C, weight: Weight)
    where
        C: IntoIterator<Item = Node>,
    {
        let nodes = nodes.into_iter().collect_vec();
        for (&u, &v) in nodes.iter().tuple_combinations() {
            if u == v {
                continue;
            }
            self.add_edge(u, v, weight);
            if self.is_directed() {
                self.add_edge(v, u, weight);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_path() {
        {
            let mut g = WeightedGraph::new_directed(6);
            g.connect_path([], 1.0);
            assert_eq!(g.number_of_edges(), 0);
        }

        {
            let mut g = WeightedGraph::new_directed(6);
            g.connect_path([1], 1.0);
            assert_eq!(g.number_of_edges(), 0);
        }

        {
            let mut g = WeightedGraph::new_directed(6);
            g.connect_path([0, 3, 1, 4], 2.5);
            assert_eq!(
                g.edges(false).collect_vec(),
                vec![Edge(0, 3), Edge(1, 4), Edge(3, 1)]
            );
            assert!(g.weighted_edges(false).all(|e| e.weight == 2.5));
        }
    }

    #[test]
    fn test_connect_cycle() {
        {
            let mut g = WeightedGraph::new_directed(6);
            g.connect_cycle([], 1.0);
            assert_eq!(g.number_of_edges(), 0);
        }

        {
            let mut g = WeightedGraph::new_directed(6);
            g.connect_cycle([1], 1.0);
            assert_eq!(g.number_of_edges(), 1);
            assert!(g.has_self_loop(1));
        }

        {
            let mut g = WeightedGraph::new_undirected(6);
            g.connect_cycle([0, 3, 1, 4], 1.0);
            assert_eq!(
                g.edges(true).collect_vec(),
                vec![Edge(0, 3), Edge(0, 4), Edge(1, 3), Edge(1, 4)]
            );
        }
    }

    #[test]
    fn test_connect_clique() {
        for n in 0..8 {
            let mut g = WeightedGraph::new_undirected(n);
            g.connect_clique(0..n, 1.0);
            assert_eq!(g.number_of_edges(), n * n.saturating_sub(1) / 2);

            let mut g = WeightedGraph::new_directed(n);
            g.connect_clique(0..n, 1.0);
            assert_eq!(g.number_of_edges(), n * n.saturating_sub(1));
        }
    }

    #[test]
    #[should_panic]
    fn out_of_range() {
        let mut g = WeightedGraph::new_directed(3);
        g.connect_path([0, 1, 5], 1.0);
    }
}
