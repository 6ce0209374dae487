/*!
# Bipartite Matching

Maximum cardinality matching in bipartite graphs with the Hopcroft–Karp algorithm. The caller
names one side `A` of the bipartition as a bitset; every other node belongs to side `B`. Only
edges from `A` to `B` are used, so the algorithm works on directed and undirected graphs alike.

Each phase computes BFS layers starting at all free `A`-nodes and then augments along a maximal
set of vertex-disjoint shortest augmenting paths. The augmenting DFS uses an explicit stack.
*/

use std::collections::VecDeque;

use super::*;

const FREE: Node = INVALID_NODE;
const UNLAYERED: NumNodes = NumNodes::MAX;

struct HopcroftKarp<'a, G: AdjacencyList> {
    graph: &'a G,
    left: &'a NodeBitSet,
    mate: Vec<Node>,
    dist: Vec<NumNodes>,
}

impl<'a, G: AdjacencyList> HopcroftKarp<'a, G> {
    fn new(graph: &'a G, left: &'a NodeBitSet) -> Self {
        Self {
            graph,
            left,
            mate: vec![FREE; graph.len()],
            dist: vec![UNLAYERED; graph.len()],
        }
    }

    fn is_left(&self, u: Node) -> bool {
        self.left.get_bit(u)
    }

    /// Layers `A`-nodes by their alternating distance to a free `A`-node.
    /// Returns *true* if some free `B`-node is reachable.
    fn layer(&mut self) -> bool {
        let mut queue = VecDeque::new();
        for a in self.left.iter_set_bits() {
            if self.mate[a as usize] == FREE {
                self.dist[a as usize] = 0;
                queue.push_back(a);
            } else {
                self.dist[a as usize] = UNLAYERED;
            }
        }

        let mut found_free = false;
        while let Some(a) = queue.pop_front() {
            for b in self.graph.neighbors_of(a) {
                if self.is_left(b) {
                    continue;
                }
                match self.mate[b as usize] {
                    FREE => found_free = true,
                    next if self.dist[next as usize] == UNLAYERED => {
                        self.dist[next as usize] = self.dist[a as usize] + 1;
                        queue.push_back(next);
                    }
                    _ => {}
                }
            }
        }

        found_free
    }

    /// Searches for an augmenting path from the free node `root` along the layering and flips it.
    /// Nodes that lead nowhere are removed from the layering.
    fn augment_from(&mut self, root: Node) -> bool {
        let mut stack = vec![(root, self.graph.neighbors_of(root))];
        let mut path = Vec::new();

        loop {
            let Some((a, neighbors)) = stack.last_mut() else {
                return false;
            };
            let a = *a;

            let mate = &self.mate;
            let dist = &self.dist;
            let left = self.left;
            let next = neighbors.find(|&b| {
                !left.get_bit(b)
                    && (mate[b as usize] == FREE
                        || dist[mate[b as usize] as usize] == dist[a as usize] + 1)
            });

            match next {
                Some(b) => {
                    path.push(b);
                    let next_a = self.mate[b as usize];
                    if next_a == FREE {
                        for (&(a, _), &b) in stack.iter().zip(&path) {
                            self.mate[a as usize] = b;
                            self.mate[b as usize] = a;
                        }
                        return true;
                    }
                    stack.push((next_a, self.graph.neighbors_of(next_a)));
                }
                None => {
                    self.dist[a as usize] = UNLAYERED;
                    stack.pop();
                    path.pop();
                }
            }
        }
    }

    fn run(mut self) -> Vec<(Node, Node)> {
        let mut phases = 0;
        while self.layer() {
            phases += 1;
            let free = self
                .left
                .iter_set_bits()
                .filter(|&a| self.mate[a as usize] == FREE)
                .collect::<Vec<_>>();

            let mut augmented = 0;
            for a in free {
                if self.augment_from(a) {
                    augmented += 1;
                }
            }
            trace!(phase = phases, augmented, "hopcroft-karp phase");

            if augmented == 0 {
                break;
            }
        }

        let pairs: Vec<_> = self
            .left
            .iter_set_bits()
            .filter(|&a| self.mate[a as usize] != FREE)
            .map(|a| (a, self.mate[a as usize]))
            .collect();
        debug!(phases, size = pairs.len(), "maximum bipartite matching");
        pairs
    }
}

pub trait Matching: AdjacencyList + Sized {
    /// Computes a maximum matching between the nodes in `left` (side `A`) and all other
    /// nodes (side `B`). Returns the matched pairs `(a, b)` sorted by `a`.
    ///
    /// # Errors
    /// [`GraphError::OutOfRange`] if `left` contains a node `>= n`
    ///
    /// # Examples
    /// ```
    /// use wgraphs::{prelude::*, algo::*};
    ///
    /// // left side {0, 1, 2}, right side {3, 4, 5}
    /// let g = WeightedGraph::from_edges(
    ///     6,
    ///     Direction::Undirected,
    ///     [(0, 3), (0, 4), (1, 3), (2, 3)],
    /// ).unwrap();
    /// let left = NodeBitSet::new_with_bits_set(6, [0, 1, 2]);
    ///
    /// let matching = g.maximum_bipartite_matching(&left).unwrap();
    /// assert_eq!(matching.len(), 2);
    /// ```
    fn maximum_bipartite_matching(&self, left: &NodeBitSet) -> Result<Vec<(Node, Node)>> {
        for a in left.iter_set_bits() {
            self.check_node(a)?;
        }
        Ok(HopcroftKarp::new(self, left).run())
    }
}

impl<G> Matching for G where G: AdjacencyList + Sized {}
