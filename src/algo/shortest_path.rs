/*!
# Shortest Paths

- [`ShortestPaths::dijkstra`]: single-source shortest paths for non-negative weights.
  The priority queue is a binary heap without decrease-key: improved nodes are pushed again
  and stale entries are skipped when popped.
- [`ShortestPaths::floyd_warshall`]: all-pairs shortest paths via dynamic programming over
  intermediate nodes. Negative weights are allowed; negative cycles can be detected afterwards
  with [`DistanceMatrix::has_negative_cycle`].

Distances of unreachable nodes are [`UNREACHABLE`]; no arithmetic is ever performed on it.
*/

use std::{cmp::Ordering, collections::BinaryHeap};

use super::*;

/// Shortest-path tree rooted at a source node as computed by [`ShortestPaths::dijkstra`]
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPathTree {
    source: Node,
    distances: Vec<Weight>,
    predecessors: Vec<Node>,
}

impl ShortestPathTree {
    pub fn source(&self) -> Node {
        self.source
    }

    /// Length of a shortest path from the source to `v` or [`UNREACHABLE`].
    /// ** Panics if `v >= n` **
    pub fn distance_to(&self, v: Node) -> Weight {
        self.distances[v as usize]
    }

    /// Distances of all nodes indexed by node
    pub fn distances(&self) -> &[Weight] {
        &self.distances
    }

    /// Predecessor of `v` on a shortest path from the source.
    /// `None` for the source itself and for unreachable nodes.
    /// ** Panics if `v >= n` **
    pub fn predecessor_of(&self, v: Node) -> Option<Node> {
        let p = self.predecessors[v as usize];
        (p != INVALID_NODE).then_some(p)
    }

    /// ** Panics if `v >= n` **
    pub fn is_reachable(&self, v: Node) -> bool {
        self.distance_to(v) != UNREACHABLE
    }

    /// Returns the nodes of a shortest path from the source to `v` (both inclusive)
    /// or `None` if `v` is unreachable.
    /// ** Panics if `v >= n` **
    pub fn path_to(&self, v: Node) -> Option<Vec<Node>> {
        if !self.is_reachable(v) {
            return None;
        }

        let mut path = vec![v];
        let mut u = v;
        while let Some(p) = self.predecessor_of(u) {
            path.push(p);
            u = p;
        }
        path.reverse();

        debug_assert_eq!(path[0], self.source);
        Some(path)
    }

    /// Iterates `(node, distance, predecessor)` for all nodes in ascending order
    pub fn iter(&self) -> impl Iterator<Item = (Node, Weight, Option<Node>)> + '_ {
        (0..self.distances.len() as Node).map(|v| (v, self.distance_to(v), self.predecessor_of(v)))
    }
}

/// Dense `n x n` matrix of shortest-path distances as computed by [`ShortestPaths::floyd_warshall`]
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    n: NumNodes,
    distances: Vec<Weight>,
    next_hop: Vec<Node>,
}

impl DistanceMatrix {
    fn idx(&self, u: Node, v: Node) -> usize {
        assert!(u < self.n && v < self.n);
        u as usize * self.n as usize + v as usize
    }

    pub fn number_of_nodes(&self) -> NumNodes {
        self.n
    }

    /// Length of a shortest path from `u` to `v` or [`UNREACHABLE`].
    /// ** Panics if `u >= n || v >= n` **
    pub fn get(&self, u: Node, v: Node) -> Weight {
        self.distances[self.idx(u, v)]
    }

    /// Distances from `u` to all nodes
    /// ** Panics if `u >= n` **
    pub fn row(&self, u: Node) -> &[Weight] {
        let start = self.idx(u, 0);
        &self.distances[start..start + self.n as usize]
    }

    /// Iterates all rows in ascending order of nodes
    pub fn rows(&self) -> impl Iterator<Item = &[Weight]> + '_ {
        self.distances.chunks(self.n.max(1) as usize)
    }

    /// Returns *true* if some node lies on a cycle of negative total weight.
    /// In this case the distances are not meaningful.
    pub fn has_negative_cycle(&self) -> bool {
        (0..self.n).any(|u| self.get(u, u) < 0.0)
    }

    /// Returns the nodes of a shortest path from `u` to `v` (both inclusive)
    /// or `None` if `v` is unreachable from `u`.
    /// ** Panics if `u >= n || v >= n` **
    pub fn path(&self, u: Node, v: Node) -> Option<Vec<Node>> {
        if self.get(u, v) == UNREACHABLE {
            return None;
        }

        let mut path = vec![u];
        let mut x = u;
        while x != v {
            x = self.next_hop[self.idx(x, v)];
            if x == INVALID_NODE || path.len() > self.n as usize {
                // only possible on negative cycles
                return None;
            }
            path.push(x);
        }
        Some(path)
    }
}

#[derive(Debug, Clone, Copy)]
struct HeapEntry {
    distance: Weight,
    node: Node,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Reversed such that the [`BinaryHeap`] pops the smallest distance (ties: smallest node) first
impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.node.cmp(&self.node))
    }
}

pub trait ShortestPaths: AdjacencyList + AdjacencyTest + Sized {
    /// Computes shortest paths from `source` to all nodes with Dijkstra's algorithm.
    ///
    /// Ties between equally short paths are resolved in favor of the path found first;
    /// relaxations only happen on strict improvements.
    ///
    /// # Errors
    /// - [`GraphError::OutOfRange`] if `source >= n`
    /// - [`GraphError::NegativeWeight`] if any edge of the graph has negative weight
    ///
    /// # Examples
    /// ```
    /// use wgraphs::{prelude::*, algo::*};
    ///
    /// let g = WeightedGraph::from_edges(
    ///     4,
    ///     Direction::Directed,
    ///     [(0, 1, 1.0), (0, 2, 4.0), (1, 2, 2.0), (2, 3, 1.0), (1, 3, 6.0)],
    /// ).unwrap();
    ///
    /// let tree = g.dijkstra(0).unwrap();
    /// assert_eq!(tree.distances(), &[0.0, 1.0, 3.0, 4.0]);
    /// assert_eq!(tree.predecessor_of(3), Some(2));
    /// ```
    fn dijkstra(&self, source: Node) -> Result<ShortestPathTree> {
        let source = self.check_node(source)?;
        if let Some(e) = self.weighted_edges(false).find(|e| e.weight < 0.0) {
            return Err(GraphError::NegativeWeight {
                origin: e.origin,
                destination: e.destination,
                weight: e.weight,
            });
        }

        let mut distances = vec![UNREACHABLE; self.len()];
        let mut predecessors = vec![INVALID_NODE; self.len()];
        let mut heap = BinaryHeap::new();

        distances[source as usize] = 0.0;
        heap.push(HeapEntry {
            distance: 0.0,
            node: source,
        });

        let mut settled: NumNodes = 0;
        while let Some(HeapEntry { distance, node: u }) = heap.pop() {
            if distance > distances[u as usize] {
                continue;
            }
            settled += 1;

            for (v, w) in self.weighted_neighbors_of(u) {
                let candidate = distance + w;
                if candidate < distances[v as usize] {
                    distances[v as usize] = candidate;
                    predecessors[v as usize] = u;
                    heap.push(HeapEntry {
                        distance: candidate,
                        node: v,
                    });
                }
            }
        }

        debug!(source, settled, "dijkstra finished");

        Ok(ShortestPathTree {
            source,
            distances,
            predecessors,
        })
    }

    /// Computes the lengths of shortest paths between all pairs of nodes with the
    /// Floyd–Warshall algorithm in `O(n^3)` time and `O(n^2)` space.
    ///
    /// The diagonal is initialized with `0` (self-loops are ignored); each edge `(u, v)`
    /// initializes entry `[u][v]` with its weight.
    ///
    /// # Examples
    /// ```
    /// use wgraphs::{prelude::*, algo::*};
    ///
    /// let g = WeightedGraph::from_edges(3, Direction::Directed, [(0, 1, 2.0), (1, 2, 3.0)]).unwrap();
    ///
    /// let d = g.floyd_warshall();
    /// assert_eq!(d.row(0), &[0.0, 2.0, 5.0]);
    /// assert_eq!(d.get(2, 0), UNREACHABLE);
    /// ```
    fn floyd_warshall(&self) -> DistanceMatrix {
        let n = self.number_of_nodes();
        let len = n as usize;

        let mut distances = vec![UNREACHABLE; len * len];
        let mut next_hop = vec![INVALID_NODE; len * len];

        for e in self.weighted_edges(false) {
            let idx = e.origin as usize * len + e.destination as usize;
            distances[idx] = e.weight;
            next_hop[idx] = e.destination;
        }
        for u in 0..len {
            distances[u * len + u] = 0.0;
            next_hop[u * len + u] = u as Node;
        }

        for k in 0..len {
            for i in 0..len {
                let d_ik = distances[i * len + k];
                if d_ik == UNREACHABLE {
                    continue;
                }

                for j in 0..len {
                    let d_kj = distances[k * len + j];
                    if d_kj == UNREACHABLE {
                        continue;
                    }

                    let candidate = d_ik + d_kj;
                    if candidate < distances[i * len + j] {
                        distances[i * len + j] = candidate;
                        next_hop[i * len + j] = next_hop[i * len + k];
                    }
                }
            }
        }

        debug!(n, "floyd-warshall finished");

        DistanceMatrix {
            n,
            distances,
            next_hop,
        }
    }
}

impl<G> ShortestPaths for G where G: AdjacencyList + AdjacencyTest + Sized {}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use super::*;
    use crate::gens::*;

    fn sample_graph(direction: Direction) -> WeightedGraph {
        WeightedGraph::from_edges(
            4,
            direction,
            [(0, 1, 1.0), (0, 2, 4.0), (1, 2, 2.0), (2, 3, 1.0), (1, 3, 6.0)],
        )
        .unwrap()
    }

    #[test]
    fn dijkstra_directed() {
        let graph = sample_graph(Direction::Directed);
        let tree = graph.dijkstra(0).unwrap();

        assert_eq!(tree.source(), 0);
        assert_eq!(tree.distances(), &[0.0, 1.0, 3.0, 4.0]);
        assert_eq!(
            tree.iter().map(|(_, _, p)| p).collect_vec(),
            vec![None, Some(0), Some(1), Some(2)]
        );
        assert_eq!(tree.path_to(3), Some(vec![0, 1, 2, 3]));
        assert_eq!(tree.path_to(0), Some(vec![0]));

        let tree = graph.dijkstra(3).unwrap();
        assert_eq!(tree.distances(), &[UNREACHABLE, UNREACHABLE, UNREACHABLE, 0.0]);
        assert!(!tree.is_reachable(0));
        assert_eq!(tree.path_to(0), None);
        assert_eq!(tree.predecessor_of(0), None);
    }

    #[test]
    fn dijkstra_undirected() {
        let graph = sample_graph(Direction::Undirected);
        let tree = graph.dijkstra(3).unwrap();
        assert_eq!(tree.distances(), &[4.0, 3.0, 1.0, 0.0]);
        assert_eq!(tree.path_to(0), Some(vec![3, 2, 1, 0]));
    }

    #[test]
    fn longer_direct_edge_loses() {
        // square 0-1-2-3 with a heavy chord 0-3
        let graph = WeightedGraph::from_edges(
            4,
            Direction::Undirected,
            [(0, 1, 1.0), (1, 2, 2.0), (2, 3, 1.0), (0, 3, 5.0)],
        )
        .unwrap();

        let tree = graph.dijkstra(0).unwrap();
        assert_eq!(tree.distances(), &[0.0, 1.0, 3.0, 4.0]);
        assert_eq!(tree.predecessor_of(0), None);
        assert_eq!(tree.predecessor_of(1), Some(0));
        assert_eq!(tree.predecessor_of(2), Some(1));
        assert_eq!(tree.predecessor_of(3), Some(2));
        assert_eq!(tree.path_to(3), Some(vec![0, 1, 2, 3]));

        assert_eq!(graph.floyd_warshall().row(0), tree.distances());
    }

    #[test]
    fn dijkstra_keeps_first_found_path_on_ties() {
        // 0 -> 1 -> 3 and 0 -> 2 -> 3 both have length 2
        let graph = WeightedGraph::from_edges(
            4,
            Direction::Directed,
            [(0, 1, 1.0), (0, 2, 1.0), (1, 3, 1.0), (2, 3, 1.0)],
        )
        .unwrap();
        let tree = graph.dijkstra(0).unwrap();
        assert_eq!(tree.distance_to(3), 2.0);
        assert_eq!(tree.predecessor_of(3), Some(1));
    }

    #[test]
    fn dijkstra_zero_weights_and_loops() {
        let graph = WeightedGraph::from_edges(
            3,
            Direction::Directed,
            [(0, 0, 5.0), (0, 1, 0.0), (1, 2, 0.0)],
        )
        .unwrap();
        let tree = graph.dijkstra(0).unwrap();
        assert_eq!(tree.distances(), &[0.0, 0.0, 0.0]);
        assert_eq!(tree.path_to(2), Some(vec![0, 1, 2]));
    }

    #[test]
    fn dijkstra_errors() {
        let graph = sample_graph(Direction::Directed);
        assert_eq!(
            graph.dijkstra(4).unwrap_err(),
            GraphError::OutOfRange {
                node: 4,
                number_of_nodes: 4
            }
        );

        let graph =
            WeightedGraph::from_edges(3, Direction::Directed, [(0, 1, 1.0), (2, 1, -1.0)]).unwrap();
        assert_eq!(
            graph.dijkstra(0).unwrap_err(),
            GraphError::NegativeWeight {
                origin: 2,
                destination: 1,
                weight: -1.0
            }
        );
    }

    #[test]
    fn floyd_warshall_sample() {
        let graph = sample_graph(Direction::Directed);
        let d = graph.floyd_warshall();

        assert_eq!(d.number_of_nodes(), 4);
        assert_eq!(d.row(0), &[0.0, 1.0, 3.0, 4.0]);
        assert_eq!(d.row(1), &[UNREACHABLE, 0.0, 2.0, 3.0]);
        assert_eq!(d.get(3, 0), UNREACHABLE);
        assert_eq!(d.path(0, 3), Some(vec![0, 1, 2, 3]));
        assert_eq!(d.path(3, 0), None);
        assert_eq!(d.path(2, 2), Some(vec![2]));
        assert!(!d.has_negative_cycle());
        assert_eq!(d.rows().count(), 4);
    }

    #[test]
    fn floyd_warshall_ignores_self_loops_and_handles_negative_weights() {
        let graph = WeightedGraph::from_edges(
            3,
            Direction::Directed,
            [(0, 0, 3.0), (0, 1, 4.0), (1, 2, -2.0), (0, 2, 3.0)],
        )
        .unwrap();
        let d = graph.floyd_warshall();
        assert_eq!(d.get(0, 0), 0.0);
        assert_eq!(d.get(0, 2), 2.0);
        assert!(!d.has_negative_cycle());

        let cyclic =
            WeightedGraph::from_edges(2, Direction::Directed, [(0, 1, 1.0), (1, 0, -2.0)]).unwrap();
        assert!(cyclic.floyd_warshall().has_negative_cycle());
    }

    #[test]
    fn floyd_warshall_empty_graph() {
        let graph = WeightedGraph::new_directed(0);
        let d = graph.floyd_warshall();
        assert_eq!(d.number_of_nodes(), 0);
        assert_eq!(d.rows().count(), 0);
    }

    #[test]
    fn dijkstra_agrees_with_floyd_warshall() {
        let rng = &mut Pcg64Mcg::seed_from_u64(1234);

        for direction in [Direction::Directed, Direction::Undirected] {
            for n in [5, 20, 40] {
                for p in [0.05, 0.2, 0.5] {
                    let graph: WeightedGraph = Gnp::new()
                        .nodes(n)
                        .prob(p)
                        .integral_weights(0, 10)
                        .direction(direction)
                        .generate(rng);

                    let all_pairs = graph.floyd_warshall();
                    for s in graph.vertices() {
                        let tree = graph.dijkstra(s).unwrap();
                        assert_eq!(tree.distances(), all_pairs.row(s));

                        for v in graph.vertices().filter(|&v| tree.is_reachable(v)) {
                            let path = tree.path_to(v).unwrap();
                            let length: Weight = path
                                .iter()
                                .tuple_windows()
                                .map(|(&a, &b)| graph.weight(a, b))
                                .sum();
                            assert_eq!(length, tree.distance_to(v));
                        }
                    }
                }
            }
        }
    }
}
