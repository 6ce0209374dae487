/*!
# Maximum Flow

Edmonds–Karp on a dense residual matrix: edge weights are interpreted as capacities, shortest
augmenting paths are found by BFS (vertices scanned in ascending order) and saturated one by one.
Undirected edges provide their capacity in both directions.

Besides the flow value, the result contains the nodes reachable from the source in the final
residual network, i.e. the source side of a minimum cut.
*/

use std::collections::VecDeque;

use super::*;

/// Result of a maximum flow computation
#[derive(Debug, Clone)]
pub struct MaxFlow {
    value: Weight,
    source_side: NodeBitSet,
}

impl MaxFlow {
    /// Value of the maximum flow (= capacity of a minimum cut)
    pub fn value(&self) -> Weight {
        self.value
    }

    /// Nodes reachable from the source in the final residual network
    pub fn source_side(&self) -> &NodeBitSet {
        &self.source_side
    }

    /// Returns *true* if `u` is on the source side of the minimum cut
    pub fn is_on_source_side(&self, u: Node) -> bool {
        self.source_side.get_bit(u)
    }

    /// Edges `(u, v)` of `graph` leaving the source side of the minimum cut.
    /// For the graph the flow was computed on, their weights sum up to [`MaxFlow::value`].
    pub fn cut_edges<G: AdjacencyList>(&self, graph: &G) -> Vec<WeightedEdge> {
        self.source_side
            .iter_set_bits()
            .flat_map(|u| graph.weighted_edges_of(u, false))
            .filter(|e| !self.is_on_source_side(e.destination))
            .collect()
    }
}

/// Dense `n x n` matrix of remaining capacities
struct ResidualMatrix {
    n: usize,
    capacity: Vec<Weight>,
}

impl ResidualMatrix {
    fn new<G: AdjacencyList>(graph: &G) -> Self {
        let n = graph.len();
        let mut capacity = vec![0.0; n * n];
        for e in graph.weighted_edges(false).filter(|e| !e.is_loop()) {
            capacity[e.origin as usize * n + e.destination as usize] += e.weight;
        }
        Self { n, capacity }
    }

    fn get(&self, u: Node, v: Node) -> Weight {
        self.capacity[u as usize * self.n + v as usize]
    }

    fn push(&mut self, u: Node, v: Node, amount: Weight) {
        self.capacity[u as usize * self.n + v as usize] -= amount;
        self.capacity[v as usize * self.n + u as usize] += amount;
    }

    /// BFS from `s` over edges with positive residual capacity. Returns the predecessor of
    /// every reached node (`INVALID_NODE` otherwise; `s` is its own predecessor).
    fn bfs_tree(&self, s: Node, t: Option<Node>) -> Vec<Node> {
        let mut predecessor = vec![INVALID_NODE; self.n];
        predecessor[s as usize] = s;

        let mut queue = VecDeque::from([s]);
        while let Some(u) = queue.pop_front() {
            if Some(u) == t {
                break;
            }
            for v in 0..self.n as Node {
                if predecessor[v as usize] == INVALID_NODE && self.get(u, v) > 0.0 {
                    predecessor[v as usize] = u;
                    queue.push_back(v);
                }
            }
        }

        predecessor
    }
}

pub trait NetworkFlow: AdjacencyList + Sized {
    /// Computes a maximum `s`-`t` flow with the Edmonds–Karp algorithm.
    /// If `s == t`, the flow value is `0`.
    ///
    /// # Errors
    /// - [`GraphError::OutOfRange`] if `s` or `t` are not nodes of the graph
    /// - [`GraphError::NegativeWeight`] if an edge has negative capacity
    ///
    /// # Examples
    /// ```
    /// use wgraphs::{prelude::*, algo::*};
    ///
    /// let g = WeightedGraph::from_edges(
    ///     4,
    ///     Direction::Directed,
    ///     [(0, 1, 3.0), (0, 2, 2.0), (1, 2, 1.0), (1, 3, 2.0), (2, 3, 3.0)],
    /// ).unwrap();
    ///
    /// let flow = g.max_flow(0, 3).unwrap();
    /// assert_eq!(flow.value(), 5.0);
    /// assert!(flow.is_on_source_side(0));
    /// assert!(!flow.is_on_source_side(3));
    /// ```
    fn max_flow(&self, s: Node, t: Node) -> Result<MaxFlow> {
        let s = self.check_node(s)?;
        let t = self.check_node(t)?;

        if let Some(e) = self.weighted_edges(false).find(|e| e.weight < 0.0) {
            return Err(GraphError::NegativeWeight {
                origin: e.origin,
                destination: e.destination,
                weight: e.weight,
            });
        }

        let mut residual = ResidualMatrix::new(self);
        let mut value = 0.0;
        let mut augmentations = 0usize;

        if s != t {
            loop {
                let predecessor = residual.bfs_tree(s, Some(t));
                if predecessor[t as usize] == INVALID_NODE {
                    break;
                }

                let mut bottleneck = UNREACHABLE;
                let mut v = t;
                while v != s {
                    let u = predecessor[v as usize];
                    bottleneck = bottleneck.min(residual.get(u, v));
                    v = u;
                }

                let mut v = t;
                while v != s {
                    let u = predecessor[v as usize];
                    residual.push(u, v, bottleneck);
                    v = u;
                }

                trace!(amount = bottleneck, "augment");
                value += bottleneck;
                augmentations += 1;
            }
        }

        let reached = residual.bfs_tree(s, None);
        let source_side = NodeBitSet::new_with_bits_set(
            self.number_of_nodes(),
            self.vertices().filter(|&u| reached[u as usize] != INVALID_NODE),
        );

        debug!(s, t, value, augmentations, "max flow");
        Ok(MaxFlow { value, source_side })
    }
}

impl<G> NetworkFlow for G where G: AdjacencyList + Sized {}
