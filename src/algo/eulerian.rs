/*!
# Eulerian Circuits

An undirected graph has an Eulerian circuit (a closed walk using every edge exactly once) iff
- every node has even degree, where a self-loop contributes `2` to the degree of its node, and
- all nodes with non-zero degree lie in a single connected component.

Graphs without edges have no circuit. The circuit itself is built with Hierholzer's algorithm
on a private copy of the adjacency lists.
*/

use super::*;

pub trait Eulerian: AdjacencyList + AdjacencyTest + GraphEdgeOrder + GraphType + Sized {
    /// Returns *true* if the graph has an Eulerian circuit.
    ///
    /// # Errors
    /// [`GraphError::UnsupportedDirection`] if the graph is directed
    fn has_eulerian_circuit(&self) -> Result<bool> {
        require_direction!(self, Direction::Undirected, "eulerian circuit");

        if self.has_no_edges() {
            return Ok(false);
        }

        if let Some(u) = self.vertices().find(|&u| loop_degree_of(self, u) % 2 == 1) {
            debug!(node = u, "odd degree; no eulerian circuit");
            return Ok(false);
        }

        let Some(start) = self.vertices_with_neighbors().next() else {
            return Ok(false);
        };

        let mut bfs = self.bfs(start);
        bfs.by_ref().for_each(drop);
        let connected = self
            .vertices_with_neighbors()
            .all(|u| bfs.did_visit_node(u));

        if !connected {
            debug!("edges span several components; no eulerian circuit");
        }
        Ok(connected)
    }

    /// Computes an Eulerian circuit starting (and implicitly ending) at the smallest node with
    /// non-zero degree. The returned sequence contains `m` nodes: the closing return to the start
    /// is not repeated. Returns `None` if the graph has no Eulerian circuit.
    ///
    /// Whenever there is a choice, the walk continues to the largest unused neighbor.
    ///
    /// # Errors
    /// [`GraphError::UnsupportedDirection`] if the graph is directed
    ///
    /// # Examples
    /// ```
    /// use wgraphs::{prelude::*, algo::*};
    ///
    /// let square = WeightedGraph::from_edges(
    ///     4,
    ///     Direction::Undirected,
    ///     [(0, 1), (1, 2), (2, 3), (3, 0)],
    /// ).unwrap();
    ///
    /// assert_eq!(square.eulerian_circuit().unwrap(), Some(vec![0, 3, 2, 1]));
    /// ```
    fn eulerian_circuit(&self) -> Result<Option<Vec<Node>>> {
        if !self.has_eulerian_circuit()? {
            return Ok(None);
        }

        let Some(start) = self.vertices_with_neighbors().next() else {
            return Ok(None);
        };

        let mut remaining: Vec<Vec<Node>> = self
            .vertices()
            .map(|u| self.neighbors_of(u).collect())
            .collect();

        let mut circuit = Vec::with_capacity(self.number_of_edges() as usize + 1);
        let mut stack = vec![start];

        while let Some(&u) = stack.last() {
            match remaining[u as usize].pop() {
                Some(v) => {
                    if v != u {
                        let reverse = &mut remaining[v as usize];
                        if let Ok(pos) = reverse.binary_search(&u) {
                            reverse.remove(pos);
                        }
                    }
                    stack.push(v);
                }
                None => {
                    circuit.push(u);
                    stack.pop();
                }
            }
        }

        circuit.reverse();
        circuit.pop();

        trace!(length = circuit.len(), "hierholzer finished");
        Ok(Some(circuit))
    }
}

impl<G> Eulerian for G where G: AdjacencyList + AdjacencyTest + GraphEdgeOrder + GraphType + Sized {}

/// Degree of `u` where a self-loop counts twice
fn loop_degree_of<G: AdjacencyList + AdjacencyTest>(graph: &G, u: Node) -> NumNodes {
    graph.degree_of(u) + graph.has_self_loop(u) as NumNodes
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use super::*;
    use crate::gens::*;

    fn undirected(n: NumNodes, edges: &[(Node, Node)]) -> WeightedGraph {
        WeightedGraph::from_edges(n, Direction::Undirected, edges.iter().copied()).unwrap()
    }

    /// Checks that `circuit` is a closed walk using every edge of `graph` exactly once
    fn assert_is_circuit(graph: &WeightedGraph, circuit: &[Node]) {
        assert_eq!(circuit.len(), graph.number_of_edges() as usize);

        let mut used = circuit
            .iter()
            .copied()
            .circular_tuple_windows()
            .map(|(u, v)| Edge(u, v).normalized())
            .collect_vec();
        used.sort_unstable();

        let mut expected = graph.edges(true).collect_vec();
        expected.sort_unstable();

        assert_eq!(used, expected);
    }

    #[test]
    fn square() {
        let graph = undirected(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]);
        assert!(graph.has_eulerian_circuit().unwrap());

        let circuit = graph.eulerian_circuit().unwrap().unwrap();
        assert_eq!(circuit, vec![0, 3, 2, 1]);
        assert_is_circuit(&graph, &circuit);
    }

    #[test]
    fn odd_degree() {
        let graph = undirected(4, &[(0, 1), (1, 2), (2, 3)]);
        assert!(!graph.has_eulerian_circuit().unwrap());
        assert_eq!(graph.eulerian_circuit().unwrap(), None);
    }

    #[test]
    fn two_triangles_sharing_a_node() {
        let graph = undirected(5, &[(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 2)]);
        let circuit = graph.eulerian_circuit().unwrap().unwrap();
        assert_eq!(circuit[0], 0);
        assert_is_circuit(&graph, &circuit);
    }

    #[test]
    fn disconnected_even_components() {
        let graph = undirected(6, &[(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)]);
        assert!(!graph.has_eulerian_circuit().unwrap());
        assert_eq!(graph.eulerian_circuit().unwrap(), None);
    }

    #[test]
    fn isolated_nodes_are_ignored() {
        let graph = undirected(6, &[(1, 2), (2, 4), (4, 1)]);
        let circuit = graph.eulerian_circuit().unwrap().unwrap();
        assert_eq!(circuit[0], 1);
        assert_is_circuit(&graph, &circuit);
    }

    #[test]
    fn self_loops_count_twice() {
        let graph = undirected(3, &[(0, 1), (1, 2), (2, 0), (1, 1)]);
        assert!(graph.has_eulerian_circuit().unwrap());

        let circuit = graph.eulerian_circuit().unwrap().unwrap();
        assert_eq!(circuit.len(), 4);
        assert_eq!(circuit.iter().filter(|&&u| u == 1).count(), 2);
    }

    #[test]
    fn edgeless_graphs_have_no_circuit() {
        assert!(!WeightedGraph::new_undirected(0).has_eulerian_circuit().unwrap());
        assert!(!WeightedGraph::new_undirected(4).has_eulerian_circuit().unwrap());
    }

    #[test]
    fn repeated_queries_see_the_same_graph() {
        let mut graph = WeightedGraph::new_undirected(7);
        graph.connect_cycle(0..7, 1.0);

        let first = graph.eulerian_circuit().unwrap();
        let second = graph.eulerian_circuit().unwrap();
        assert_eq!(first, second);
        assert_eq!(graph.number_of_edges(), 7);
    }

    #[test]
    fn complete_graphs() {
        for n in 3..9 {
            let mut graph = WeightedGraph::new_undirected(n);
            graph.connect_clique(0..n, 1.0);
            // K_n is Eulerian iff n is odd
            assert_eq!(graph.has_eulerian_circuit().unwrap(), n % 2 == 1);
            if let Some(circuit) = graph.eulerian_circuit().unwrap() {
                assert_is_circuit(&graph, &circuit);
            }
        }
    }

    #[test]
    fn random_graphs_agree_with_degree_criterion() {
        let rng = &mut Pcg64Mcg::seed_from_u64(7);

        for _ in 0..50 {
            let graph: WeightedGraph = Gnp::new()
                .nodes(12)
                .prob(0.4)
                .direction(Direction::Undirected)
                .generate(rng);

            match graph.eulerian_circuit().unwrap() {
                Some(circuit) => assert_is_circuit(&graph, &circuit),
                None => assert!(
                    graph.has_no_edges()
                        || graph.degrees().any(|d| d % 2 == 1)
                        || graph.bfs(graph.vertices_with_neighbors().next().unwrap()).count()
                            < graph.number_of_nodes_with_neighbors() as usize
                ),
            }
        }
    }

    #[test]
    fn directed_graphs_are_rejected() {
        let graph = WeightedGraph::from_edges(2, Direction::Directed, [(0, 1), (1, 0)]).unwrap();
        assert!(graph.has_eulerian_circuit().is_err());
        assert!(graph.eulerian_circuit().is_err());
    }
}
