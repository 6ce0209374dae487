/*!
`wgraphs` is a graph data structure & algorithms library for **w**eighted graphs:
- Nodes are numbered `0` to `n - 1` and may carry a display label
- Edges carry a real-valued weight (unweighted inputs default to weight `1`)
- Graphs are either directed or undirected; the kind is fixed when the graph is created

# Representation

We represent **nodes** as `u32` in the range `0..n` where `n` is the number of nodes in the graph.
For **edges**, we use the tuple-struct `Edge(Node, Node)` and its weighted sibling [`WeightedEdge`](crate::edge::WeightedEdge).
Weights are `f64`; [`UNREACHABLE`](crate::edge::UNREACHABLE) (positive infinity) marks distances of unreachable nodes.

The only storage backend is [`WeightedGraph`](crate::repr::WeightedGraph): one sorted adjacency array per node.
Neighbors are therefore always reported in ascending order, which all algorithms use to break ties deterministically.

# Design

Algorithms are implemented generically over the access traits in [`ops`] and exposed as traits
implemented on the graph itself (`graph.dijkstra(s)`, `graph.kruskal()`, `graph.topological_order()`, ...).
Algorithms never mutate the graph they are run on; where one needs to consume edges
(e.g. Hierholzer's algorithm) it works on a private copy.

Configurable components (readers, writers, generators) follow the *Builder* / *Setter* pattern.

# Usage

- [`prelude`] includes definitions for nodes, edges, basic graph operations and the graph representation,
- [`algo`] includes the algorithm traits: traversals, shortest paths, spanning trees, Eulerian circuits,
  (strongly) connected components, topological sorting, maximum flow, bipartite matching and greedy coloring,
- [`gens`] includes deterministic substructures (paths/cycles/cliques) and seeded random weighted graphs,
- [`io`] reads and writes the Pajek-style text format,
- [`error`] defines [`GraphError`](crate::error::GraphError).

In most use-cases, `use wgraphs::{prelude::*, algo::*};` suffices for your needs.

```
use wgraphs::{prelude::*, algo::*};

let graph = WeightedGraph::from_edges(
    4,
    Direction::Directed,
    [(0, 1, 1.0), (1, 2, 2.0), (0, 2, 4.0), (2, 3, 1.0)],
).unwrap();

let paths = graph.dijkstra(0).unwrap();
assert_eq!(paths.distance_to(3), 4.0);
assert_eq!(paths.path_to(3), Some(vec![0, 1, 2, 3]));
```
*/

pub mod algo;
pub mod edge;
pub mod error;
pub mod gens;
pub mod io;
pub mod node;
pub mod ops;
pub mod repr;
pub(crate) mod testing;
pub mod utils;

/// `wgraphs::prelude` includes definitions for nodes and edges, all basic graph operation traits as well as the graph representation.
pub mod prelude {
    pub use super::{edge::*, error::GraphError, node::*, ops::*, repr::*};
}
