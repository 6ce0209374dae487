/*!
# Greedy Vertex Coloring

Welsh–Powell heuristic: nodes are colored in order of descending degree (ties: larger id first),
each receiving the smallest color not used by an already colored neighbor. The result is always
a proper coloring, but not necessarily one with the minimum number of colors.
*/

use std::cmp::Reverse;

use super::*;

/// Assignment of colors `0..k` to the nodes of a graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexColoring {
    colors: Vec<NumNodes>,
    number_of_colors: NumNodes,
}

impl VertexColoring {
    /// Number of distinct colors `k`
    pub fn number_of_colors(&self) -> NumNodes {
        self.number_of_colors
    }

    /// Color of node `u`
    /// ** Panics if `u >= n` **
    pub fn color_of(&self, u: Node) -> NumNodes {
        self.colors[u as usize]
    }

    /// Colors of all nodes indexed by node
    pub fn colors(&self) -> &[NumNodes] {
        &self.colors
    }

    /// Nodes grouped by color; class `i` contains all nodes of color `i` in ascending order
    pub fn color_classes(&self) -> Vec<Vec<Node>> {
        let mut classes = vec![Vec::new(); self.number_of_colors as usize];
        for (u, &c) in self.colors.iter().enumerate() {
            classes[c as usize].push(u as Node);
        }
        classes
    }

    /// Returns *true* if no edge (other than a self-loop) connects two nodes of the same color
    pub fn is_proper<G: AdjacencyList>(&self, graph: &G) -> bool {
        graph
            .edges(false)
            .all(|Edge(u, v)| u == v || self.color_of(u) != self.color_of(v))
    }
}

pub trait Coloring: AdjacencyList + GraphType + Sized {
    /// Colors the graph greedily in Welsh–Powell order. Self-loops are ignored.
    ///
    /// # Errors
    /// [`GraphError::UnsupportedDirection`] if the graph is directed
    ///
    /// # Examples
    /// ```
    /// use wgraphs::{prelude::*, algo::*};
    ///
    /// let triangle_with_tail = WeightedGraph::from_edges(
    ///     4,
    ///     Direction::Undirected,
    ///     [(0, 1), (1, 2), (2, 0), (2, 3)],
    /// ).unwrap();
    ///
    /// let coloring = triangle_with_tail.greedy_coloring().unwrap();
    /// assert_eq!(coloring.number_of_colors(), 3);
    /// assert_eq!(coloring.colors(), &[2, 1, 0, 1]);
    /// ```
    fn greedy_coloring(&self) -> Result<VertexColoring> {
        require_direction!(self, Direction::Undirected, "vertex coloring");

        let mut order = self.vertices().collect::<Vec<_>>();
        order.sort_unstable_by_key(|&u| (Reverse(self.degree_of(u)), Reverse(u)));

        const UNCOLORED: NumNodes = NumNodes::MAX;
        let mut colors = vec![UNCOLORED; self.len()];
        let mut taken = Vec::new();
        let mut number_of_colors = 0;

        for u in order {
            taken.clear();
            taken.resize(number_of_colors as usize + 1, false);
            for v in self.neighbors_of(u).filter(|&v| v != u) {
                let c = colors[v as usize];
                if c != UNCOLORED {
                    taken[c as usize] = true;
                }
            }

            let color = taken.iter().position(|&t| !t).unwrap_or(taken.len()) as NumNodes;
            colors[u as usize] = color;
            number_of_colors = number_of_colors.max(color + 1);
        }

        debug!(n = self.number_of_nodes(), number_of_colors, "greedy coloring");
        Ok(VertexColoring {
            colors,
            number_of_colors,
        })
    }
}

impl<G> Coloring for G where G: AdjacencyList + GraphType + Sized {}
