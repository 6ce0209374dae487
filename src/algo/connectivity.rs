/*!
# Connectivity

- [`ConnectedComponents`]: components of an undirected graph via repeated BFS,
- [`StronglyConnectedComponents`]: Tarjan's algorithm for directed graphs as an iterator
  over components.

[`Connectivity::strongly_connected_components`] returns a deterministic partition: each component
is sorted ascending and components are ordered by their smallest node.
*/

use std::iter::FusedIterator;

use itertools::Itertools;

use super::*;

pub trait Connectivity: AdjacencyList + GraphType + Sized {
    /// Returns an iterator over the connected components of an undirected graph.
    /// Components are discovered in order of their smallest node; nodes within a
    /// component are in BFS order.
    ///
    /// # Errors
    /// [`GraphError::UnsupportedDirection`] if the graph is directed
    fn connected_components(&self) -> Result<ConnectedComponents<'_, Self>> {
        require_direction!(self, Direction::Undirected, "connected components");
        Ok(ConnectedComponents::new(self, false))
    }

    /// Same as [`Connectivity::connected_components`] but skips isolated nodes
    fn connected_components_no_singletons(&self) -> Result<ConnectedComponents<'_, Self>> {
        require_direction!(self, Direction::Undirected, "connected components");
        Ok(ConnectedComponents::new(self, true))
    }

    /// Returns *true* if the undirected graph has at most one connected component
    fn is_connected(&self) -> Result<bool> {
        Ok(self.connected_components()?.nth(1).is_none())
    }

    /// Returns an iterator over the strongly connected components in reverse topological order
    /// of the condensation. The order of nodes within a component is unspecified.
    ///
    /// # Errors
    /// [`GraphError::UnsupportedDirection`] if the graph is undirected
    fn strongly_connected_components_iter(&self) -> Result<StronglyConnectedComponents<'_, Self>> {
        require_direction!(self, Direction::Directed, "strongly connected components");
        Ok(StronglyConnectedComponents::new(self))
    }

    /// Partitions the nodes of a directed graph into strongly connected components.
    /// Two nodes share a component iff each is reachable from the other. Every node
    /// (also one without any cycle through it) belongs to exactly one component.
    ///
    /// # Errors
    /// [`GraphError::UnsupportedDirection`] if the graph is undirected
    ///
    /// # Examples
    /// ```
    /// use wgraphs::{prelude::*, algo::*};
    ///
    /// let g = WeightedGraph::from_edges(
    ///     5,
    ///     Direction::Directed,
    ///     [(0, 1), (1, 0), (1, 2), (3, 4), (4, 3)],
    /// ).unwrap();
    ///
    /// assert_eq!(
    ///     g.strongly_connected_components().unwrap(),
    ///     vec![vec![0, 1], vec![2], vec![3, 4]]
    /// );
    /// ```
    fn strongly_connected_components(&self) -> Result<Vec<Vec<Node>>> {
        let components = sort_components(self.strongly_connected_components_iter()?.collect_vec());
        debug!(
            n = self.number_of_nodes(),
            components = components.len(),
            "strongly connected components"
        );
        Ok(components)
    }

    /// Returns *true* if every node can reach every other node
    fn is_strongly_connected(&self) -> Result<bool> {
        Ok(self.strongly_connected_components_iter()?.nth(1).is_none())
    }
}

impl<G> Connectivity for G where G: AdjacencyList + GraphType + Sized {}

/// Iterator over the connected components of an undirected graph
pub struct ConnectedComponents<'a, G>
where
    G: AdjacencyList,
{
    graph: &'a G,
    bfs: BFS<'a, G>,
    skip_trivial: bool,
}

impl<'a, G> ConnectedComponents<'a, G>
where
    G: AdjacencyList,
{
    fn new(graph: &'a G, skip_trivial: bool) -> Self {
        Self {
            graph,
            bfs: BFS::empty(graph),
            skip_trivial,
        }
    }
}

impl<G> Iterator for ConnectedComponents<'_, G>
where
    G: AdjacencyList,
{
    type Item = Vec<Node>;

    fn next(&mut self) -> Option<Self::Item> {
        let graph = self.graph;
        let skip_trivial = self.skip_trivial;
        if !self
            .bfs
            .try_restart_at_unvisited_where(|u| !skip_trivial || graph.degree_of(u) > 0)
        {
            return None;
        }

        Some(self.bfs.by_ref().collect_vec())
    }
}

impl<G> FusedIterator for ConnectedComponents<'_, G> where G: AdjacencyList {}

/// Implementation of Tarjan's Algorithm for Strongly Connected Components.
/// It is designed as an iterator that emits the nodes of one strongly connected component at a
/// time. The components are emitted in reverse topological order of the condensation
/// (i.e. if each SCC were contracted into a single node).
pub struct StronglyConnectedComponents<'a, G>
where
    G: AdjacencyList + 'a,
{
    graph: &'a G,
    idx: Node,

    states: Vec<NodeState>,
    potentially_unvisited: usize,

    path_stack: Vec<Node>,
    call_stack: Vec<StackFrame<'a, G>>,
}

impl<'a, G> StronglyConnectedComponents<'a, G>
where
    G: AdjacencyList + 'a,
{
    /// Construct the iterator for some graph
    pub fn new(graph: &'a G) -> Self {
        Self {
            graph,
            idx: 0,
            states: vec![Default::default(); graph.len()],
            potentially_unvisited: 0,

            path_stack: Vec::with_capacity(32),
            call_stack: Vec::with_capacity(32),
        }
    }

    /// Each node has to be visited once. We start with node 0, cover everything reachable in
    /// `search` and afterwards continue with the smallest untouched node.
    fn next_unvisited_node(&mut self) -> Option<Node> {
        while self.potentially_unvisited < self.graph.len() {
            if !self.states[self.potentially_unvisited].visited {
                let v = self.potentially_unvisited as Node;
                self.push_node(v, None);
                return Some(v);
            }

            self.potentially_unvisited += 1;
        }
        None
    }

    /// Put a pristine stack frame on the call stack, i.e. "call" `search` for `node`
    fn push_node(&mut self, node: Node, parent: Option<Node>) {
        self.call_stack.push(StackFrame {
            node,
            parent: parent.unwrap_or(node),
            initial_stack_len: 0,
            first_call: true,
            neighbors: self.graph.neighbors_of(node),
        });
    }

    fn search(&mut self) -> Option<Vec<Node>> {
        /*
        Tarjan's algorithm is usually stated recursively. We simulate the recursion with the
        explicit call stack `self.call_stack` so that (a) we can pause after each component to
        implement `Iterator` and (b) deep graphs do not overflow the native stack.

        On first visit, a node receives the next DFS index and the same low_link. The low_link
        stores the smallest index known to be reachable from the node while it is on the path
        stack. All nodes of an SCC end up with the low_link of its root, which is the unique
        node with index == low_link.
        */

        'recurse: while let Some(frame) = self.call_stack.last_mut() {
            let v = frame.node;

            if frame.first_call {
                frame.first_call = false;
                frame.initial_stack_len = self.path_stack.len() as Node;

                self.states[v as usize].visit(self.idx);
                self.idx += 1;

                self.path_stack.push(v);
            }

            for w in frame.neighbors.by_ref() {
                let w_state = self.states[w as usize];

                if !w_state.visited {
                    self.push_node(w, Some(v));
                    continue 'recurse;
                } else if w_state.on_stack {
                    self.states[v as usize].try_lower_link(w_state.index);
                }
            }

            let Some(frame) = self.call_stack.pop() else {
                break;
            };
            let state = self.states[v as usize];

            self.states[frame.parent as usize].try_lower_link(state.low_link);

            if state.is_root() {
                let component = self.path_stack.split_off(frame.initial_stack_len as usize);
                for &w in &component {
                    self.states[w as usize].on_stack = false;
                }

                debug_assert_eq!(component.first(), Some(&v));
                trace!(root = v, size = component.len(), "scc");
                return Some(component);
            }
        }

        None
    }
}

impl<G> Iterator for StronglyConnectedComponents<'_, G>
where
    G: AdjacencyList,
{
    type Item = Vec<Node>;

    /// Returns either a vector of node ids that form an SCC or None if no further SCC was found
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(x) = self.search() {
                return Some(x);
            }

            self.next_unvisited_node()?;
        }
    }
}

impl<G> FusedIterator for StronglyConnectedComponents<'_, G> where G: AdjacencyList {}

struct StackFrame<'a, G>
where
    G: AdjacencyList + 'a,
{
    node: Node,
    parent: Node,
    initial_stack_len: Node,
    first_call: bool,
    neighbors: G::NeighborIter<'a>,
}

#[derive(Debug, Clone, Copy, Default)]
struct NodeState {
    visited: bool,
    on_stack: bool,
    index: Node,
    low_link: Node,
}

impl NodeState {
    fn visit(&mut self, idx: Node) {
        debug_assert!(!self.visited);
        self.index = idx;
        self.low_link = idx;
        self.visited = true;
        self.on_stack = true;
    }

    fn try_lower_link(&mut self, l: Node) {
        self.low_link = self.low_link.min(l);
    }

    fn is_root(&self) -> bool {
        self.index == self.low_link
    }
}

/// Sorts the nodes in each component increasingly and then the components by their smallest node.
pub fn sort_components(mut components: Vec<Vec<Node>>) -> Vec<Vec<Node>> {
    components.iter_mut().for_each(|comp| comp.sort_unstable());
    components.sort_by_key(|comp| comp.first().copied());
    components
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    use super::*;
    use crate::gens::*;

    fn directed(n: NumNodes, edges: &[(Node, Node)]) -> WeightedGraph {
        WeightedGraph::from_edges(n, Direction::Directed, edges.iter().copied()).unwrap()
    }

    #[test]
    fn connected_components() {
        let graph =
            WeightedGraph::from_edges(7, Direction::Undirected, [(1, 2), (2, 3), (4, 5)]).unwrap();

        let ccs = graph.connected_components().unwrap().collect_vec();
        assert_eq!(ccs, vec![vec![0], vec![1, 2, 3], vec![4, 5], vec![6]]);

        let ccs = graph.connected_components_no_singletons().unwrap().collect_vec();
        assert_eq!(sort_components(ccs), vec![vec![1, 2, 3], vec![4, 5]]);

        assert!(!graph.is_connected().unwrap());
        assert!(directed(3, &[]).connected_components().is_err());
    }

    #[test]
    fn empty_graph_has_no_components() {
        let graph = WeightedGraph::new_undirected(0);
        assert_eq!(graph.connected_components().unwrap().count(), 0);
        assert!(graph.is_connected().unwrap());

        let graph = WeightedGraph::new_directed(0);
        assert!(graph.strongly_connected_components().unwrap().is_empty());
    }

    #[test]
    fn scc() {
        let graph = directed(
            8,
            &[
                (0, 1),
                (1, 2),
                (1, 4),
                (1, 5),
                (2, 6),
                (2, 3),
                (3, 2),
                (3, 7),
                (4, 0),
                (4, 5),
                (5, 6),
                (6, 5),
                (7, 3),
                (7, 6),
            ],
        );

        let sccs = graph.strongly_connected_components_iter().unwrap().collect_vec();
        assert_eq!(sccs.len(), 3);
        // sink component first
        assert_eq!(sort_components(vec![sccs[0].clone()]), vec![vec![5, 6]]);

        let sccs = graph.strongly_connected_components().unwrap();
        assert_eq!(sccs, vec![vec![0, 1, 4], vec![2, 3, 7], vec![5, 6]]);
        assert!(!graph.is_strongly_connected().unwrap());
    }

    #[test]
    fn scc_singletons() {
        // {0,1} and {4,5} are scc pairs, 2 is a loop, 3 is a singleton
        let graph = directed(6, &[(0, 1), (1, 0), (2, 2), (4, 5), (5, 4)]);

        let sccs = graph.strongly_connected_components().unwrap();
        assert_eq!(sccs, vec![vec![0, 1], vec![2], vec![3], vec![4, 5]]);
    }

    #[test]
    fn scc_tree() {
        let graph = directed(7, &[(0, 1), (1, 2), (1, 3), (1, 4), (3, 5), (3, 6)]);

        let sccs = graph.strongly_connected_components().unwrap();
        // in a directed tree each vertex is a strongly connected component
        assert_eq!(sccs.len(), 7);
        for (i, scc) in sccs.iter().enumerate() {
            assert_eq!(scc, &vec![i as Node]);
        }
    }

    #[test]
    fn scc_gnp_is_partition() {
        let rng = &mut Pcg64::seed_from_u64(1234);

        for i in 0..10 {
            let n = 2000;
            let graph: WeightedGraph = Gnp::new()
                .nodes(n)
                .avg_deg(0.5 * i as f64)
                .generate(rng);

            let sccs = graph.strongly_connected_components().unwrap();
            let mut nodes = sccs.iter().flatten().copied().collect_vec();
            nodes.sort_unstable();
            assert_eq!(nodes, graph.vertices().collect_vec());

            // mutual reachability within components
            for scc in sccs.iter().filter(|c| c.len() > 1).take(3) {
                for &u in scc.iter().take(5) {
                    for &v in scc.iter().take(5) {
                        assert!(graph.is_reachable(u, v).unwrap());
                    }
                }
            }
        }
    }

    #[test]
    fn scc_long_cycle() {
        // assert that we can deal with very deep stacks
        let n: Node = 10_000;
        let mut graph = WeightedGraph::new_directed(n);
        graph.connect_cycle(0..n, 1.0);

        let sccs = graph.strongly_connected_components().unwrap();
        assert_eq!(sccs.len(), 1);
        assert_eq!(sccs[0].len(), n as usize);
        assert!(graph.is_strongly_connected().unwrap());
    }

    #[test]
    fn undirected_graphs_are_rejected() {
        let graph = WeightedGraph::new_undirected(3);
        assert!(matches!(
            graph.strongly_connected_components(),
            Err(GraphError::UnsupportedDirection {
                required: Direction::Directed,
                ..
            })
        ));
    }
}
