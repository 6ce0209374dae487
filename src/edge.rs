use std::fmt::{Debug, Display};

use crate::node::Node;

/// An edge is defined by two nodes/endpoints.
/// Is is up to the user whether an Edge is directed or not.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge(pub Node, pub Node);

/// We limit the number of edges to `2^32 - 1`.
pub type NumEdges = u32;

/// Edge weights (and path lengths) are real numbers
pub type Weight = f64;

/// Distance of a node that cannot be reached
pub const UNREACHABLE: Weight = Weight::INFINITY;

impl Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.0, self.1)
    }
}

impl Debug for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

impl Edge {
    /// Normalizes the edge such that the endpoint with smaller value comes first
    pub fn normalized(&self) -> Self {
        Edge(self.0.min(self.1), self.0.max(self.1))
    }

    /// Returns true if the endpoint with smaller index comes first
    pub fn is_normalized(&self) -> bool {
        self.0 <= self.1
    }

    /// Returns true if both endpoints are equal
    pub fn is_loop(&self) -> bool {
        self.0 == self.1
    }

    /// Attaches a weight to the edge
    pub fn with_weight(self, weight: Weight) -> WeightedEdge {
        WeightedEdge {
            origin: self.0,
            destination: self.1,
            weight,
        }
    }
}

impl From<(Node, Node)> for Edge {
    fn from(value: (Node, Node)) -> Self {
        Edge(value.0, value.1)
    }
}

impl From<&(Node, Node)> for Edge {
    fn from(value: &(Node, Node)) -> Self {
        Edge(value.0, value.1)
    }
}

impl From<&Edge> for Edge {
    fn from(value: &Edge) -> Self {
        *value
    }
}

impl From<WeightedEdge> for Edge {
    fn from(value: WeightedEdge) -> Self {
        Edge(value.origin, value.destination)
    }
}

/// An edge together with its weight.
///
/// For undirected graphs `origin` and `destination` are interchangeable; graphs report
/// them normalized (`origin <= destination`).
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct WeightedEdge {
    pub origin: Node,
    pub destination: Node,
    pub weight: Weight,
}

impl WeightedEdge {
    pub fn new(origin: Node, destination: Node, weight: Weight) -> Self {
        Self {
            origin,
            destination,
            weight,
        }
    }

    /// Drops the weight
    pub fn edge(&self) -> Edge {
        Edge(self.origin, self.destination)
    }

    /// Normalizes the endpoints such that `origin <= destination`
    pub fn normalized(&self) -> Self {
        Self {
            origin: self.origin.min(self.destination),
            destination: self.origin.max(self.destination),
            weight: self.weight,
        }
    }

    /// Returns true if both endpoints are equal
    pub fn is_loop(&self) -> bool {
        self.origin == self.destination
    }
}

/// `origin-destination (weight)`
impl Display for WeightedEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-{} ({})",
            self.origin,
            self.destination,
            DisplayWeight(self.weight)
        )
    }
}

/// Unweighted edges default to weight `1`
impl From<Edge> for WeightedEdge {
    fn from(value: Edge) -> Self {
        value.with_weight(1.0)
    }
}

impl From<(Node, Node)> for WeightedEdge {
    fn from(value: (Node, Node)) -> Self {
        Edge::from(value).into()
    }
}

impl From<(Node, Node, Weight)> for WeightedEdge {
    fn from((origin, destination, weight): (Node, Node, Weight)) -> Self {
        Self::new(origin, destination, weight)
    }
}

impl From<&(Node, Node, Weight)> for WeightedEdge {
    fn from(value: &(Node, Node, Weight)) -> Self {
        (*value).into()
    }
}

/// Formats a [`Weight`] for human consumption:
/// - `inf` for [`UNREACHABLE`],
/// - integral values without decimals (`3.0` -> `3`),
/// - everything else with its shortest round-trip representation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DisplayWeight(pub Weight);

impl Display for DisplayWeight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let w = self.0;
        if w.is_infinite() {
            if w > 0.0 {
                write!(f, "inf")
            } else {
                write!(f, "-inf")
            }
        } else if w.fract() == 0.0 && w.abs() < 1e15 {
            write!(f, "{}", w as i64)
        } else {
            write!(f, "{w}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_display() {
        assert_eq!(DisplayWeight(3.0).to_string(), "3");
        assert_eq!(DisplayWeight(-2.0).to_string(), "-2");
        assert_eq!(DisplayWeight(2.5).to_string(), "2.5");
        assert_eq!(DisplayWeight(UNREACHABLE).to_string(), "inf");
        assert_eq!(DisplayWeight(0.0).to_string(), "0");
    }

    #[test]
    fn weighted_edge_display() {
        assert_eq!(WeightedEdge::new(1, 3, 4.0).to_string(), "1-3 (4)");
        assert_eq!(WeightedEdge::new(3, 1, 0.5).normalized().to_string(), "1-3 (0.5)");
    }

    #[test]
    fn conversions() {
        let e: WeightedEdge = (2, 1).into();
        assert_eq!(e.weight, 1.0);
        assert_eq!(e.edge(), Edge(2, 1));
        assert_eq!(Edge::from(e).normalized(), Edge(1, 2));
        assert!(Edge(4, 4).is_loop());
    }
}
