/*!
# Disjoint-Set

Union-find forest over the nodes `0..n` with path compression and union by rank.
Every element starts out as its own singleton set. An instance is meant to be short-lived:
algorithms create a fresh one per run.
*/

use crate::prelude::*;

#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<Node>,
    rank: Vec<u8>,
    number_of_sets: NumNodes,
}

impl UnionFind {
    /// Creates `n` singleton sets `{0}, {1}, ..., {n - 1}`
    pub fn new(n: NumNodes) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n as usize],
            number_of_sets: n,
        }
    }

    /// Returns the number of elements
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Returns the representative of the set containing `u`.
    /// Compresses the path from `u` to its root.
    /// ** Panics if `u >= n` **
    pub fn find(&mut self, u: Node) -> Node {
        let mut root = u;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }

        let mut x = u;
        while x != root {
            let next = self.parent[x as usize];
            self.parent[x as usize] = root;
            x = next;
        }

        root
    }

    /// Merges the sets containing `u` and `v`.
    /// Returns *false* if both were already in the same set.
    /// ** Panics if `u >= n || v >= n` **
    pub fn union(&mut self, u: Node, v: Node) -> bool {
        let ru = self.find(u);
        let rv = self.find(v);
        if ru == rv {
            return false;
        }

        let (rank_u, rank_v) = (self.rank[ru as usize], self.rank[rv as usize]);
        if rank_u < rank_v {
            self.parent[ru as usize] = rv;
        } else {
            self.parent[rv as usize] = ru;
            if rank_u == rank_v {
                self.rank[ru as usize] += 1;
            }
        }

        self.number_of_sets -= 1;
        true
    }

    /// Returns *true* if `u` and `v` are in the same set
    pub fn same_set(&mut self, u: Node, v: Node) -> bool {
        self.find(u) == self.find(v)
    }

    /// Returns the current number of disjoint sets
    pub fn number_of_sets(&self) -> NumNodes {
        self.number_of_sets
    }
}
