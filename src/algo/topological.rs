/*!
# Topological Sorting

Depth-first topological sort of directed graphs. Roots are tried in ascending order of ids and
the resulting order is the reverse DFS finishing order. Reaching a node that is still in progress
(a back edge, including self-loops) proves a directed cycle, in which case no order is produced.
*/

use super::*;

pub trait TopologicalSort: AdjacencyList + GraphType + Sized {
    /// Returns all nodes such that for every edge `(u, v)`, `u` appears strictly before `v`.
    ///
    /// # Errors
    /// - [`GraphError::CyclicGraph`] if the graph contains a directed cycle
    /// - [`GraphError::UnsupportedDirection`] if the graph is undirected
    ///
    /// # Examples
    /// ```
    /// use wgraphs::{prelude::*, algo::*, error::GraphError};
    ///
    /// let dag = WeightedGraph::from_edges(4, Direction::Directed, [(2, 1), (1, 0), (3, 1)]).unwrap();
    /// assert_eq!(dag.topological_order().unwrap(), vec![3, 2, 1, 0]);
    ///
    /// let cyclic = WeightedGraph::from_edges(2, Direction::Directed, [(0, 1), (1, 0)]).unwrap();
    /// assert_eq!(cyclic.topological_order(), Err(GraphError::CyclicGraph));
    /// ```
    fn topological_order(&self) -> Result<Vec<Node>> {
        require_direction!(self, Direction::Directed, "topological sort");

        let mut order = Vec::with_capacity(self.len());
        for event in self.depth_first_forest() {
            match event {
                DfsEvent::Finish(u) => order.push(u),
                DfsEvent::BackEdge(u, v) => {
                    debug!(origin = u, destination = v, "back edge; graph is cyclic");
                    return Err(GraphError::CyclicGraph);
                }
                DfsEvent::Discover(_) => {}
            }
        }

        order.reverse();
        Ok(order)
    }

    /// Returns *true* if the directed graph contains no cycle
    fn is_acyclic(&self) -> Result<bool> {
        match self.topological_order() {
            Ok(_) => Ok(true),
            Err(GraphError::CyclicGraph) => Ok(false),
            Err(err) => Err(err),
        }
    }
}

impl<G> TopologicalSort for G where G: AdjacencyList + GraphType + Sized {}
