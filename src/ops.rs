/*!
# Graph Operations

Traits describing how algorithms may access a graph. Every algorithm in [`crate::algo`] is
implemented generically over these traits, so they work on any representation providing them.

Getters in these traits are *unchecked*: they panic on node ids `>= n`. Representations
additionally offer checked `try_*` variants reporting [`GraphError::OutOfRange`].
*/

use std::ops::Range;

use crate::{error::*, prelude::*};

/// Which kind of graph we are dealing with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Directed,
    Undirected,
}

impl Direction {
    pub fn is_directed(self) -> bool {
        self == Direction::Directed
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Directed => write!(f, "directed"),
            Direction::Undirected => write!(f, "undirected"),
        }
    }
}

/// Whether the edges of a graph are directed. Fixed at construction time.
pub trait GraphType {
    fn direction(&self) -> Direction;

    fn is_directed(&self) -> bool {
        self.direction().is_directed()
    }

    fn is_undirected(&self) -> bool {
        !self.is_directed()
    }
}

/// Provides getters pertaining to the node-size of a graph
pub trait GraphNodeOrder {
    /// Returns the number of nodes of the graph
    fn number_of_nodes(&self) -> NumNodes;

    /// Return the number of nodes as usize
    fn len(&self) -> usize {
        self.number_of_nodes() as usize
    }

    /// Returns the nodes `0..n` in ascending order.
    /// The range does not borrow `self`.
    fn vertices(&self) -> Range<Node> {
        0..self.number_of_nodes()
    }

    /// Returns empty bitset with one entry per node
    fn vertex_bitset_unset(&self) -> NodeBitSet {
        NodeBitSet::new(self.number_of_nodes())
    }

    /// Returns *true* if the graph has no nodes (and thus no edges)
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `u` if it is a node of the graph and [`GraphError::OutOfRange`] otherwise
    fn check_node(&self, u: Node) -> Result<Node> {
        if u < self.number_of_nodes() {
            Ok(u)
        } else {
            Err(GraphError::OutOfRange {
                node: u,
                number_of_nodes: self.number_of_nodes(),
            })
        }
    }
}

/// Provides getters pertaining to the edge-size of a graph
pub trait GraphEdgeOrder {
    /// Returns the number of edges of the graph.
    /// Undirected edges are counted once.
    fn number_of_edges(&self) -> NumEdges;

    /// Returns *true* if the graph has no edges
    fn has_no_edges(&self) -> bool {
        self.number_of_edges() == 0
    }
}

/// Traits pertaining getters for neighborhoods & edges.
///
/// Neighbors are always reported in ascending order of their id; many algorithms rely
/// on this to break ties deterministically.
pub trait AdjacencyList: GraphNodeOrder + Sized {
    type NeighborIter<'a>: Iterator<Item = Node> + Clone + 'a
    where
        Self: 'a;

    type WeightedNeighborIter<'a>: Iterator<Item = (Node, Weight)> + Clone + 'a
    where
        Self: 'a;

    /// Returns an iterator over the (out-)neighbors of a given vertex.
    /// For undirected graphs, a self-loop `{u, u}` lists `u` once.
    /// ** Panics if `u >= n` **
    fn neighbors_of(&self, u: Node) -> Self::NeighborIter<'_>;

    /// Returns an iterator over the (out-)neighbors of a given vertex together with the
    /// weight of the connecting edge.
    /// ** Panics if `u >= n` **
    fn weighted_neighbors_of(&self, u: Node) -> Self::WeightedNeighborIter<'_>;

    /// Returns the number of (outgoing) neighbors of `u`
    /// ** Panics if `u >= n` **
    fn degree_of(&self, u: Node) -> NumNodes;

    /// Returns an iterator over the degrees of all nodes
    fn degrees(&self) -> impl Iterator<Item = NumNodes> + '_ {
        self.vertices().map(|u| self.degree_of(u))
    }

    /// Returns an iterator to all vertices with non-zero degree
    fn vertices_with_neighbors(&self) -> impl Iterator<Item = Node> + '_ {
        self.vertices().filter(|&u| self.degree_of(u) > 0)
    }

    /// Returns the number of nodes with non-zero degree
    fn number_of_nodes_with_neighbors(&self) -> NumNodes {
        self.vertices_with_neighbors().count() as NumNodes
    }

    /// Returns the maximum degree in the graph
    fn max_degree(&self) -> NumNodes {
        self.degrees().max().unwrap_or(0)
    }

    /// Returns an iterator over outgoing edges of a given vertex.
    /// If `only_normalized`, then only edges `(u, v)` with `u <= v` are considered.
    /// ** Panics if `u >= n` **
    fn edges_of(&self, u: Node, only_normalized: bool) -> impl Iterator<Item = Edge> + '_ {
        self.neighbors_of(u)
            .map(move |v| Edge(u, v))
            .filter(move |e| !only_normalized || e.is_normalized())
    }

    /// Same as [`AdjacencyList::edges_of`] with weights attached.
    /// ** Panics if `u >= n` **
    fn weighted_edges_of(
        &self,
        u: Node,
        only_normalized: bool,
    ) -> impl Iterator<Item = WeightedEdge> + '_ {
        self.weighted_neighbors_of(u)
            .filter(move |&(v, _)| !only_normalized || u <= v)
            .map(move |(v, w)| WeightedEdge::new(u, v, w))
    }

    /// Returns an iterator over all edges in the graph in lexicographic order.
    /// If `only_normalized`, then only edges `(u, v)` with `u <= v` are considered.
    fn edges(&self, only_normalized: bool) -> impl Iterator<Item = Edge> + '_ {
        self.vertices()
            .flat_map(move |u| self.edges_of(u, only_normalized))
    }

    /// Same as [`AdjacencyList::edges`] with weights attached.
    fn weighted_edges(&self, only_normalized: bool) -> impl Iterator<Item = WeightedEdge> + '_ {
        self.vertices()
            .flat_map(move |u| self.weighted_edges_of(u, only_normalized))
    }
}

/// Trait to test existence of certain structures in a graph.
pub trait AdjacencyTest: GraphNodeOrder {
    /// Returns *true* if the egde (u,v) exists in the graph.
    /// ** Panics if `u >= n || v >= n` **
    fn has_edge(&self, u: Node, v: Node) -> bool {
        self.edge_weight(u, v).is_some()
    }

    /// Returns the weight of the edge (u,v) if it exists.
    /// ** Panics if `u >= n || v >= n` **
    fn edge_weight(&self, u: Node, v: Node) -> Option<Weight>;

    /// Returns the weight of the edge (u,v) or [`UNREACHABLE`] if there is no such edge.
    /// ** Panics if `u >= n || v >= n` **
    fn weight(&self, u: Node, v: Node) -> Weight {
        self.edge_weight(u, v).unwrap_or(UNREACHABLE)
    }

    /// Returns *true* if a self-loop (u,u) exists.
    /// ** Panics if `u >= n` **
    fn has_self_loop(&self, u: Node) -> bool {
        self.has_edge(u, u)
    }
}

/// Trait for creating a new empty graph
pub trait GraphNew {
    /// Creates an empty graph with n singleton nodes
    fn new(n: NumNodes, direction: Direction) -> Self;
}

/// Provides functions to insert/delete edges
pub trait GraphEdgeEditing: GraphNew {
    /// Adds the edge `(u, v)` with weight `weight` to the graph.
    /// For undirected graphs, `(v, u)` is added as well.
    /// If the edge was already present, its weight is overwritten and the previous weight returned.
    fn try_add_edge(&mut self, u: Node, v: Node, weight: Weight) -> Result<Option<Weight>>;

    /// Unchecked version of [`GraphEdgeEditing::try_add_edge`].
    /// ** Panics if `u >= n || v >= n` or `weight` is not finite **
    fn add_edge(&mut self, u: Node, v: Node, weight: Weight) -> Option<Weight> {
        match self.try_add_edge(u, v, weight) {
            Ok(prev) => prev,
            Err(err) => panic!("{err}"),
        }
    }

    /// Adds all edges in the collection; later duplicates overwrite earlier weights
    fn add_edges<I>(&mut self, edges: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<WeightedEdge>,
    {
        for e in edges {
            let WeightedEdge {
                origin,
                destination,
                weight,
            } = e.into();
            self.try_add_edge(origin, destination, weight)?;
        }
        Ok(())
    }

    /// Removes the edge `(u, v)` (and `(v, u)` for undirected graphs).
    /// Returns the weight of the removed edge or `None` if it did not exist.
    fn try_remove_edge(&mut self, u: Node, v: Node) -> Result<Option<Weight>>;
}

/// A super trait for creating a graph from scratch from a set of edges and a number of nodes
pub trait GraphFromScratch: Sized {
    /// Create a graph from a number of nodes and an iterator over (weighted) edges
    fn from_edges<I>(n: NumNodes, direction: Direction, edges: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<WeightedEdge>;
}

impl<G: GraphNew + GraphEdgeEditing> GraphFromScratch for G {
    fn from_edges<I>(n: NumNodes, direction: Direction, edges: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<WeightedEdge>,
    {
        let mut graph = Self::new(n, direction);
        graph.add_edges(edges)?;
        Ok(graph)
    }
}
