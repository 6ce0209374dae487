/*!
# Graph Representation

[`WeightedGraph`] is the graph store all algorithms of this crate operate on: a fixed number of
nodes `0..n`, a direction fixed at construction, one sorted [`WeightedNeighborhood`] per node
and optional display labels.

## Undirected graphs
Undirected edges are stored in both endpoint neighborhoods; symmetrization happens in
[`GraphEdgeEditing::try_add_edge`] and nowhere else. Inserting `{u, v}` a second time (in either
orientation) overwrites the weight, so the store never contains parallel edges and
`number_of_edges` counts unordered pairs. A self-loop `{u, u}` is stored once in `u`'s
neighborhood.

## Labels
Every node has a label. Unless explicitly set via [`WeightedGraph::set_label`] it is the decimal
representation of the node id.
*/

use std::borrow::Cow;

use fxhash::FxHashMap;

use crate::{error::*, prelude::*, testing::test_graph_ops};

mod neighborhood;

pub use neighborhood::*;

/// Adjacency-array graph with weighted edges and optional node labels.
#[derive(Debug, Clone)]
pub struct WeightedGraph {
    nbs: Vec<WeightedNeighborhood>,
    labels: FxHashMap<Node, String>,
    direction: Direction,
    num_edges: NumEdges,
}

impl WeightedGraph {
    /// Creates an empty directed graph with `n` nodes
    pub fn new_directed(n: NumNodes) -> Self {
        Self::new(n, Direction::Directed)
    }

    /// Creates an empty undirected graph with `n` nodes
    pub fn new_undirected(n: NumNodes) -> Self {
        Self::new(n, Direction::Undirected)
    }

    /// Sets the display label of `u`
    pub fn set_label<S: Into<String>>(&mut self, u: Node, label: S) -> Result<()> {
        self.check_node(u)?;
        self.labels.insert(u, label.into());
        Ok(())
    }

    /// Builder variant of [`WeightedGraph::set_label`]
    pub fn label_node<S: Into<String>>(mut self, u: Node, label: S) -> Result<Self> {
        self.set_label(u, label)?;
        Ok(self)
    }

    /// Returns the display label of `u`; defaults to the id itself
    pub fn label(&self, u: Node) -> Result<Cow<'_, str>> {
        self.check_node(u)?;
        Ok(self
            .labels
            .get(&u)
            .map_or_else(|| Cow::Owned(u.to_string()), |l| Cow::Borrowed(l.as_str())))
    }

    /// Returns *true* if `u` has an explicitly assigned label
    pub fn has_label(&self, u: Node) -> bool {
        self.labels.contains_key(&u)
    }

    /// Checked variant of [`AdjacencyList::degree_of`]
    pub fn try_degree_of(&self, u: Node) -> Result<NumNodes> {
        Ok(self.degree_of(self.check_node(u)?))
    }

    /// Checked variant of [`AdjacencyList::weighted_neighbors_of`]
    pub fn try_neighbors_of(&self, u: Node) -> Result<WeightedNeighborhoodIter<'_>> {
        Ok(self.weighted_neighbors_of(self.check_node(u)?))
    }

    /// Checked variant of [`AdjacencyTest::has_edge`]
    pub fn try_has_edge(&self, u: Node, v: Node) -> Result<bool> {
        Ok(self.has_edge(self.check_node(u)?, self.check_node(v)?))
    }

    /// Checked variant of [`AdjacencyTest::weight`]; returns [`UNREACHABLE`] if there is no edge
    pub fn try_weight(&self, u: Node, v: Node) -> Result<Weight> {
        Ok(self.weight(self.check_node(u)?, self.check_node(v)?))
    }

    /// Returns all edges of the graph in lexicographic order.
    /// Undirected edges are reported once, normalized.
    pub fn edge_list(&self) -> Vec<WeightedEdge> {
        self.weighted_edges(self.is_undirected()).collect()
    }
}

impl GraphType for WeightedGraph {
    fn direction(&self) -> Direction {
        self.direction
    }
}

impl GraphNodeOrder for WeightedGraph {
    fn number_of_nodes(&self) -> NumNodes {
        self.nbs.len() as NumNodes
    }
}

impl GraphEdgeOrder for WeightedGraph {
    fn number_of_edges(&self) -> NumEdges {
        self.num_edges
    }
}

impl AdjacencyList for WeightedGraph {
    type NeighborIter<'a> = NeighborhoodIter<'a>;
    type WeightedNeighborIter<'a> = WeightedNeighborhoodIter<'a>;

    fn neighbors_of(&self, u: Node) -> Self::NeighborIter<'_> {
        self.nbs[u as usize].neighbors()
    }

    fn weighted_neighbors_of(&self, u: Node) -> Self::WeightedNeighborIter<'_> {
        self.nbs[u as usize].weighted_neighbors()
    }

    fn degree_of(&self, u: Node) -> NumNodes {
        self.nbs[u as usize].num_of_neighbors()
    }
}

impl AdjacencyTest for WeightedGraph {
    fn edge_weight(&self, u: Node, v: Node) -> Option<Weight> {
        assert!(v < self.number_of_nodes());
        self.nbs[u as usize].weight_of(v)
    }
}

impl GraphNew for WeightedGraph {
    fn new(n: NumNodes, direction: Direction) -> Self {
        Self {
            nbs: vec![WeightedNeighborhood::new(); n as usize],
            labels: FxHashMap::default(),
            direction,
            num_edges: 0,
        }
    }
}

impl GraphEdgeEditing for WeightedGraph {
    fn try_add_edge(&mut self, u: Node, v: Node, weight: Weight) -> Result<Option<Weight>> {
        self.check_node(u)?;
        self.check_node(v)?;
        if !weight.is_finite() {
            return Err(GraphError::InvalidWeight {
                origin: u,
                destination: v,
                weight,
            });
        }

        let prev = self.nbs[u as usize].insert(v, weight);
        if self.is_undirected() && u != v {
            self.nbs[v as usize].insert(u, weight);
        }

        if prev.is_none() {
            self.num_edges += 1;
        }
        Ok(prev)
    }

    fn try_remove_edge(&mut self, u: Node, v: Node) -> Result<Option<Weight>> {
        self.check_node(u)?;
        self.check_node(v)?;

        let prev = self.nbs[u as usize].remove(v);
        if self.is_undirected() && u != v {
            self.nbs[v as usize].remove(u);
        }

        if prev.is_some() {
            self.num_edges -= 1;
        }
        Ok(prev)
    }
}

test_graph_ops!(
    test_directed,
    Directed,
    (GraphNew, AdjacencyList, AdjacencyTest, GraphEdgeEditing)
);
test_graph_ops!(
    test_undirected,
    Undirected,
    (GraphNew, AdjacencyList, AdjacencyTest, GraphEdgeEditing)
);

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    #[test]
    fn undirected_edges_are_symmetric_and_unique() {
        let mut graph = WeightedGraph::new_undirected(4);
        assert_eq!(graph.try_add_edge(0, 1, 2.0), Ok(None));
        assert_eq!(graph.try_add_edge(1, 0, 5.0), Ok(Some(2.0)));
        graph.try_add_edge(2, 2, 1.0).unwrap();

        assert_eq!(graph.number_of_edges(), 2);
        assert_eq!(graph.weight(0, 1), 5.0);
        assert_eq!(graph.weight(1, 0), 5.0);
        assert_eq!(graph.degree_of(2), 1);
        assert_eq!(
            graph.edge_list(),
            vec![WeightedEdge::new(0, 1, 5.0), WeightedEdge::new(2, 2, 1.0)]
        );

        assert_eq!(graph.try_remove_edge(1, 0), Ok(Some(5.0)));
        assert!(!graph.has_edge(0, 1));
        assert_eq!(graph.number_of_edges(), 1);
    }

    #[test]
    fn directed_edges() {
        let graph =
            WeightedGraph::from_edges(3, Direction::Directed, [(0, 1, 1.5), (1, 0, 2.0), (0, 2, 1.0)])
                .unwrap();
        assert_eq!(graph.number_of_edges(), 3);
        assert_eq!(graph.neighbors_of(0).collect_vec(), vec![1, 2]);
        assert_eq!(graph.weight(1, 0), 2.0);
        assert_eq!(graph.weight(2, 0), UNREACHABLE);
        assert_eq!(graph.max_degree(), 2);
    }

    #[test]
    fn out_of_range() {
        let mut graph = WeightedGraph::new_directed(2);
        let err = GraphError::OutOfRange {
            node: 2,
            number_of_nodes: 2,
        };
        assert_eq!(graph.try_add_edge(0, 2, 1.0), Err(err.clone()));
        assert_eq!(graph.try_degree_of(2), Err(err.clone()));
        assert_eq!(graph.try_weight(2, 0), Err(err.clone()));
        assert_eq!(graph.label(2).unwrap_err(), err);
        assert!(graph.try_neighbors_of(5).is_err());
        assert_eq!(graph.try_has_edge(0, 1), Ok(false));
    }

    #[test]
    fn non_finite_weights_are_rejected() {
        let mut graph = WeightedGraph::new_directed(2);
        assert!(matches!(
            graph.try_add_edge(0, 1, f64::NAN),
            Err(GraphError::InvalidWeight { .. })
        ));
        assert!(graph.try_add_edge(0, 1, f64::INFINITY).is_err());
        assert!(graph.try_add_edge(0, 1, -3.0).is_ok());
    }

    #[test]
    fn labels() {
        let graph = WeightedGraph::new_undirected(3)
            .label_node(1, "Berlin")
            .unwrap();
        assert_eq!(graph.label(1).unwrap(), "Berlin");
        assert_eq!(graph.label(2).unwrap(), "2");
        assert!(graph.has_label(1));
        assert!(!graph.has_label(0));
    }
}
