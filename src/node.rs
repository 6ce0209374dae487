/*!
# Node Representation

We choose `Node = u32` as almost all use-cases involve less than `2^32` nodes.
Nodes of a graph with `n` nodes are numbered densely from `0` to `n - 1`; any textual
identifiers (labels) live next to the graph, never inside the node type.
*/

use fixedbitset::FixedBitSet;

/// Nodes can be any unsigned integer from `0` to `Node::MAX - 1`
pub type Node = u32;

/// Node-Value that is considered invalid
pub const INVALID_NODE: Node = Node::MAX;

/// There can be at most `2^32 - 1` nodes in a graph!
pub type NumNodes = Node;

/// BitSet over the nodes `0..n` of a graph.
///
/// Thin wrapper around [`FixedBitSet`] that speaks in [`Node`]s instead of `usize`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NodeBitSet(FixedBitSet);

impl NodeBitSet {
    /// Creates a bitset over `n` nodes with no bit set
    pub fn new(n: NumNodes) -> Self {
        Self(FixedBitSet::with_capacity(n as usize))
    }

    /// Creates a bitset over `n` nodes with exactly the given bits set
    /// ** Panics if any `u >= n` **
    pub fn new_with_bits_set<I>(n: NumNodes, bits: I) -> Self
    where
        I: IntoIterator<Item = Node>,
    {
        let mut set = Self::new(n);
        set.set_bits(bits);
        set
    }

    /// Sets bit `u` and returns its previous value
    /// ** Panics if `u >= n` **
    pub fn set_bit(&mut self, u: Node) -> bool {
        self.0.put(u as usize)
    }

    /// Returns *true* if bit `u` is set. Bits out of range are never set.
    pub fn get_bit(&self, u: Node) -> bool {
        self.0.contains(u as usize)
    }

    /// Sets all given bits
    pub fn set_bits<I>(&mut self, bits: I)
    where
        I: IntoIterator<Item = Node>,
    {
        for u in bits {
            self.set_bit(u);
        }
    }

    /// Number of set bits
    pub fn cardinality(&self) -> NumNodes {
        self.0.count_ones(..) as NumNodes
    }

    /// Iterates all set bits in ascending order
    pub fn iter_set_bits(&self) -> impl Iterator<Item = Node> + '_ {
        self.0.ones().map(|u| u as Node)
    }

    /// Iterates all cleared bits in ascending order
    pub fn iter_cleared_bits(&self) -> impl Iterator<Item = Node> + '_ {
        self.0.zeroes().map(|u| u as Node)
    }
}
