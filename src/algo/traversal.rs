/*!
Graph traversal algorithms and traversal-derived utilities.

This module provides:
- Generic breadth-first traversal iterators, with and without predecessor tracking.
- [`BfsLayers`]: the partition of all nodes reachable from a source into BFS levels.
- [`DepthFirstEvents`]: a depth-first search emitting discover/finish/back-edge events,
  driven by an explicit stack so that arbitrarily deep graphs do not overflow the call stack.
- A high-level [`Traversal`] trait that exposes traversal algorithms
  directly as methods on graph data structures.

All traversals follow out-neighbors in ascending order of their id.
*/

use std::{collections::VecDeque, marker::PhantomData, ops::ControlFlow};

use super::*;

/// Abstraction for items yielded by a traversal iterator.
///
/// A `SequencedItem` encodes both the **node currently visited**
/// and an **optional predecessor** that represents its parent
/// in the traversal tree.
pub trait SequencedItem: Clone + Copy {
    /// Constructs a new item with a predecessor.
    fn new_with_predecessor(predecessor: Node, item: Node) -> Self;

    /// Constructs a new item without predecessor information.
    fn new_without_predecessor(item: Node) -> Self;

    /// Returns the node represented by this item.
    fn item(&self) -> Node;

    /// Returns the predecessor of this node, if any.
    fn predecessor(&self) -> Option<Node>;

    /// Returns a pair `(predecessor, item)` where the predecessor
    /// may be `None` if not tracked.
    fn predecessor_with_item(&self) -> (Option<Node>, Node) {
        (self.predecessor(), self.item())
    }
}

impl SequencedItem for Node {
    fn new_with_predecessor(_: Node, item: Node) -> Self {
        item
    }
    fn new_without_predecessor(item: Node) -> Self {
        item
    }
    fn item(&self) -> Node {
        *self
    }
    fn predecessor(&self) -> Option<Node> {
        None
    }
}

/// Compact representation of `(predecessor, node)` used for
/// traversals with parent tracking.
///
/// Internally, the absence of a predecessor is encoded by
/// setting both tuple entries to the same node value.
pub type PredecessorOfNode = (Node, Node);

impl SequencedItem for PredecessorOfNode {
    fn new_with_predecessor(predecessor: Node, item: Node) -> Self {
        (predecessor, item)
    }
    fn new_without_predecessor(item: Node) -> Self {
        (item, item)
    }
    fn item(&self) -> Node {
        self.1
    }
    fn predecessor(&self) -> Option<Node> {
        if self.0 == self.1 { None } else { Some(self.0) }
    }
}

/// Abstraction for the traversal frontier data structure.
///
/// [`VecDeque`] gives queue semantics, i.e. **BFS**. Strict depth-first search is
/// provided separately by [`DepthFirstEvents`].
pub trait NodeSequencer<T> {
    /// Creates an empty sequencer
    fn empty() -> Self;

    /// Pushes a node into the frontier.
    fn push(&mut self, item: T);

    /// Removes and returns the next node from the frontier.
    fn pop(&mut self) -> Option<T>;

    /// Returns the number of items currently in the frontier.
    fn cardinality(&self) -> usize;
}

impl<T> NodeSequencer<T> for VecDeque<T> {
    fn empty() -> Self {
        VecDeque::new()
    }
    fn push(&mut self, u: T) {
        self.push_back(u)
    }
    fn pop(&mut self) -> Option<T> {
        self.pop_front()
    }
    fn cardinality(&self) -> usize {
        self.len()
    }
}

/// Generic traversal iterator over a frontier given by a [`NodeSequencer`].
///
/// Maintains an explicit frontier of nodes to visit
/// and a bitset of discovered nodes. Nodes are marked as discovered when they
/// enter the frontier, so every node is yielded at most once.
pub struct TraversalSearch<'a, G, S, I>
where
    G: AdjacencyList,
    S: NodeSequencer<I>,
    I: SequencedItem,
{
    graph: &'a G,
    visited: NodeBitSet,
    sequencer: S,
    stop_at: Option<Node>,
    _item: PhantomData<I>,
}

/// A BFS traversal iterator over the graph, visiting nodes in
/// breadth-first order from a given starting node.
pub type BFS<'a, G> = TraversalSearch<'a, G, VecDeque<Node>, Node>;

/// A BFS traversal iterator that records predecessor information,
/// producing a spanning tree of the search.
pub type BFSWithPredecessor<'a, G> =
    TraversalSearch<'a, G, VecDeque<PredecessorOfNode>, PredecessorOfNode>;

impl<G, S, I> Iterator for TraversalSearch<'_, G, S, I>
where
    G: AdjacencyList,
    S: NodeSequencer<I>,
    I: SequencedItem,
{
    type Item = I;

    fn next(&mut self) -> Option<Self::Item> {
        let popped = self.sequencer.pop()?;
        let u = popped.item();

        if self.stop_at == Some(u) {
            while self.sequencer.pop().is_some() {} // drop all
        } else {
            for v in self.graph.neighbors_of(u) {
                if !self.visited.set_bit(v) {
                    self.sequencer.push(I::new_with_predecessor(u, v));
                }
            }
        }

        Some(popped)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (
            self.sequencer.cardinality(),
            Some(self.graph.len() - self.visited.cardinality() as usize + self.sequencer.cardinality()),
        )
    }
}

impl<'a, G, S, I> TraversalSearch<'a, G, S, I>
where
    G: AdjacencyList,
    S: NodeSequencer<I>,
    I: SequencedItem,
{
    /// Creates a new traversal iterator starting from `start`.
    /// ** Panics if `start >= n` **
    pub fn new(graph: &'a G, start: Node) -> Self {
        let mut search = Self::empty(graph);
        search.visited.set_bit(start);
        search.sequencer.push(I::new_without_predecessor(start));
        search
    }

    /// Creates a traversal with an empty frontier. Nothing is yielded until the search is
    /// (re-)started with [`TraversalSearch::try_restart_at_unvisited_where`].
    pub fn empty(graph: &'a G) -> Self {
        Self {
            graph,
            visited: graph.vertex_bitset_unset(),
            sequencer: S::empty(),
            stop_at: None,
            _item: PhantomData,
        }
    }

    /// Returns *true* if `u` was discovered so far
    pub fn did_visit_node(&self, u: Node) -> bool {
        self.visited.get_bit(u)
    }

    /// Tries to restart the search at the smallest yet unvisited node fulfilling `predicate`
    /// and returns true iff successful. Requires that search came to a hold earlier,
    /// i.e. self.next() returned None
    pub fn try_restart_at_unvisited_where<P>(&mut self, mut predicate: P) -> bool
    where
        P: FnMut(Node) -> bool,
    {
        assert_eq!(self.sequencer.cardinality(), 0);
        let node = self
            .visited
            .iter_cleared_bits()
            .find(|&u| predicate(u));
        match node {
            None => false,
            Some(x) => {
                self.visited.set_bit(x);
                self.sequencer.push(I::new_without_predecessor(x));
                true
            }
        }
    }

    /// Sets a stopper node. If this node is reached, the iterator returns it and afterwards only None.
    pub fn set_stop_at(&mut self, stopper: Node) {
        self.stop_at = Some(stopper);
    }

    /// Consumes the traversal search and returns true iff the requested node can be visited, i.e.
    /// if there exists a directed path from the start node to u.
    pub fn is_node_reachable(mut self, u: Node) -> bool {
        self.set_stop_at(u);
        self.last().is_some_and(|v| v.item() == u)
    }
}

/// Nodes reachable from a source, grouped by their BFS level (hop distance).
///
/// Level `0` contains only the source; every level is sorted ascending; unreachable
/// nodes are not part of any level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BfsLayers {
    layers: Vec<Vec<Node>>,
    level_of: Vec<Node>,
}

impl BfsLayers {
    fn compute<G: AdjacencyList>(graph: &G, source: Node) -> Self {
        let mut level_of = vec![INVALID_NODE; graph.len()];
        let mut layers: Vec<Vec<Node>> = Vec::new();

        // BFS yields nodes in non-decreasing level, so layers are appended in order
        for (pred, u) in graph
            .bfs_with_predecessor(source)
            .map(|item| item.predecessor_with_item())
        {
            let level = pred.map_or(0, |p| level_of[p as usize] + 1);
            level_of[u as usize] = level;
            if layers.len() == level as usize {
                layers.push(Vec::new());
            }
            layers[level as usize].push(u);
        }

        for layer in &mut layers {
            layer.sort_unstable();
        }

        Self { layers, level_of }
    }

    /// Number of non-empty levels (the eccentricity of the source plus one)
    pub fn number_of_layers(&self) -> NumNodes {
        self.layers.len() as NumNodes
    }

    /// Nodes on level `i`; empty if there is no such level
    pub fn layer(&self, i: NumNodes) -> &[Node] {
        self.layers.get(i as usize).map_or(&[][..], Vec::as_slice)
    }

    pub fn layers(&self) -> &[Vec<Node>] {
        &self.layers
    }

    /// Returns the level of `u` or `None` if `u` is unreachable from the source
    pub fn level_of(&self, u: Node) -> Option<NumNodes> {
        self.level_of
            .get(u as usize)
            .copied()
            .filter(|&l| l != INVALID_NODE)
    }

    /// Iterates `(level, nodes)` in ascending order of levels
    pub fn iter(&self) -> impl Iterator<Item = (NumNodes, &[Node])> + '_ {
        self.layers
            .iter()
            .enumerate()
            .map(|(i, l)| (i as NumNodes, l.as_slice()))
    }

    /// Number of nodes reachable from the source (including the source)
    pub fn number_of_reached_nodes(&self) -> NumNodes {
        self.layers.iter().map(|l| l.len() as NumNodes).sum()
    }

    pub fn into_layers(self) -> Vec<Vec<Node>> {
        self.layers
    }
}

/// Events emitted by [`DepthFirstEvents`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DfsEvent {
    /// First time a node is reached (pre-order)
    Discover(Node),
    /// All out-neighbors of the node have been processed (post-order)
    Finish(Node),
    /// Edge `(u, v)` leads to a node `v` that is discovered but not yet finished.
    /// In directed graphs this witnesses a cycle. Note that in undirected graphs every
    /// tree edge is also reported in reverse direction.
    BackEdge(Node, Node),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Unvisited,
    InProgress,
    Finished,
}

/// Depth-first search with three-state node coloring and an explicit stack of
/// `(node, remaining out-neighbors)` frames.
///
/// Either explores from a single start node or (via [`Traversal::depth_first_forest`]) from
/// every yet unvisited node in ascending order until all nodes are finished.
pub struct DepthFirstEvents<'a, G>
where
    G: AdjacencyList + 'a,
{
    graph: &'a G,
    states: Vec<VisitState>,
    stack: Vec<(Node, G::NeighborIter<'a>)>,
    start: Option<Node>,
    next_root: Option<Node>,
}

impl<'a, G> DepthFirstEvents<'a, G>
where
    G: AdjacencyList + 'a,
{
    fn new(graph: &'a G, start: Option<Node>) -> Self {
        Self {
            graph,
            states: vec![VisitState::Unvisited; graph.len()],
            stack: Vec::with_capacity(32),
            start,
            next_root: start.is_none().then_some(0),
        }
    }

    fn next_unvisited_root(&mut self) -> Option<Node> {
        if let Some(s) = self.start.take() {
            return Some(s);
        }

        let root = self.next_root.as_mut()?;
        while *root < self.graph.number_of_nodes() {
            let u = *root;
            *root += 1;
            if self.states[u as usize] == VisitState::Unvisited {
                return Some(u);
            }
        }
        None
    }

    fn discover(&mut self, u: Node) -> DfsEvent {
        self.states[u as usize] = VisitState::InProgress;
        self.stack.push((u, self.graph.neighbors_of(u)));
        DfsEvent::Discover(u)
    }
}

impl<'a, G> Iterator for DepthFirstEvents<'a, G>
where
    G: AdjacencyList + 'a,
{
    type Item = DfsEvent;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let Some((u, neighbors)) = self.stack.last_mut() else {
                let root = self.next_unvisited_root()?;
                return Some(self.discover(root));
            };
            let u = *u;

            match neighbors.next() {
                Some(v) => match self.states[v as usize] {
                    VisitState::Unvisited => return Some(self.discover(v)),
                    VisitState::InProgress => return Some(DfsEvent::BackEdge(u, v)),
                    VisitState::Finished => continue,
                },
                None => {
                    self.stack.pop();
                    self.states[u as usize] = VisitState::Finished;
                    return Some(DfsEvent::Finish(u));
                }
            }
        }
    }
}

/// Provides convenient traversal methods (BFS, DFS, BFS levels, ...)
pub trait Traversal: AdjacencyList + Sized {
    /// Returns an iterator that traverses nodes reachable from `start`
    /// in **breadth-first search (BFS) order**.
    /// ** Panics if `start >= n` **
    ///
    /// # Examples
    /// ```
    /// use wgraphs::{prelude::*, algo::*};
    ///
    /// let g = WeightedGraph::from_edges(3, Direction::Undirected, [(0, 2), (2, 1)]).unwrap();
    ///
    /// let order: Vec<_> = g.bfs(1).collect();
    /// assert_eq!(order, vec![1, 2, 0]);
    /// ```
    fn bfs(&self, start: Node) -> BFS<'_, Self> {
        BFS::new(self, start)
    }

    /// Returns a BFS iterator starting from `start` that additionally
    /// yields the predecessor relation (edges traversed).
    /// ** Panics if `start >= n` **
    fn bfs_with_predecessor(&self, start: Node) -> BFSWithPredecessor<'_, Self> {
        BFSWithPredecessor::new(self, start)
    }

    /// Groups all nodes reachable from `source` by their BFS level.
    ///
    /// # Examples
    /// ```
    /// use wgraphs::{prelude::*, algo::*};
    ///
    /// let g = WeightedGraph::from_edges(5, Direction::Undirected, [(0, 2), (0, 1), (2, 3)]).unwrap();
    ///
    /// let layers = g.bfs_layers(0).unwrap();
    /// assert_eq!(layers.layers(), &[vec![0], vec![1, 2], vec![3]]);
    /// assert_eq!(layers.level_of(4), None);
    /// ```
    fn bfs_layers(&self, source: Node) -> Result<BfsLayers> {
        let source = self.check_node(source)?;
        let layers = BfsLayers::compute(self, source);
        debug!(
            source,
            layers = layers.number_of_layers(),
            reached = layers.number_of_reached_nodes(),
            "bfs layering"
        );
        Ok(layers)
    }

    /// Depth-first search from `start` only
    fn depth_first_events(&self, start: Node) -> Result<DepthFirstEvents<'_, Self>> {
        Ok(DepthFirstEvents::new(self, Some(self.check_node(start)?)))
    }

    /// Depth-first search covering all nodes: roots are chosen in ascending order of ids
    fn depth_first_forest(&self) -> DepthFirstEvents<'_, Self> {
        DepthFirstEvents::new(self, None)
    }

    /// Runs a depth-first search from `start` and passes every event to `visit`.
    /// The search stops early if `visit` returns [`ControlFlow::Break`].
    ///
    /// # Examples
    /// ```
    /// use std::ops::ControlFlow;
    /// use wgraphs::{prelude::*, algo::*};
    ///
    /// let g = WeightedGraph::from_edges(3, Direction::Directed, [(0, 1), (1, 2), (2, 0)]).unwrap();
    ///
    /// let mut first_back_edge = None;
    /// g.visit_depth_first(0, |event| match event {
    ///     DfsEvent::BackEdge(u, v) => {
    ///         first_back_edge = Some((u, v));
    ///         ControlFlow::Break(())
    ///     }
    ///     _ => ControlFlow::Continue(()),
    /// }).unwrap();
    /// assert_eq!(first_back_edge, Some((2, 0)));
    /// ```
    fn visit_depth_first<F>(&self, start: Node, mut visit: F) -> Result<()>
    where
        F: FnMut(DfsEvent) -> ControlFlow<()>,
    {
        for event in self.depth_first_events(start)? {
            if visit(event).is_break() {
                break;
            }
        }
        Ok(())
    }

    /// Nodes reachable from `start` in depth-first pre-order
    fn dfs_pre_order(&self, start: Node) -> Result<Vec<Node>> {
        Ok(self
            .depth_first_events(start)?
            .filter_map(|e| match e {
                DfsEvent::Discover(u) => Some(u),
                _ => None,
            })
            .collect())
    }

    /// Nodes reachable from `start` in depth-first post-order
    fn dfs_post_order(&self, start: Node) -> Result<Vec<Node>> {
        Ok(self
            .depth_first_events(start)?
            .filter_map(|e| match e {
                DfsEvent::Finish(u) => Some(u),
                _ => None,
            })
            .collect())
    }

    /// Returns *true* if there is a (directed) path from `u` to `v`
    fn is_reachable(&self, u: Node, v: Node) -> Result<bool> {
        let u = self.check_node(u)?;
        let v = self.check_node(v)?;
        Ok(self.bfs(u).is_node_reachable(v))
    }
}

impl<G> Traversal for G where G: AdjacencyList + Sized {}
