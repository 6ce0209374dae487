/*!
# Errors

All fallible graph operations report a [`GraphError`]. Parsing and file handling live in
[`crate::io`] and report `std::io::Error`s instead.

Note that "there is no Eulerian circuit" is a regular answer and not an error.
*/

use thiserror::Error;

use crate::prelude::*;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// A node id outside of `0..n` was passed
    #[error("node {node} is out of range for a graph with {number_of_nodes} nodes")]
    OutOfRange {
        node: Node,
        number_of_nodes: NumNodes,
    },

    /// A directed cycle prevents a topological order
    #[error("graph contains a directed cycle")]
    CyclicGraph,

    /// Negative edge weights are not supported by the requested algorithm
    #[error("edge {origin}-{destination} has negative weight {weight}")]
    NegativeWeight {
        origin: Node,
        destination: Node,
        weight: Weight,
    },

    /// Weights must be finite numbers
    #[error("edge {origin}-{destination} has non-finite weight {weight}")]
    InvalidWeight {
        origin: Node,
        destination: Node,
        weight: Weight,
    },

    /// A spanning tree was requested but the graph falls apart into several components
    #[error("graph is disconnected ({components} components); no spanning tree exists")]
    DisconnectedGraph { components: NumNodes },

    /// The algorithm is only defined for the other kind of graph
    #[error("{operation} is only defined for {required} graphs")]
    UnsupportedDirection {
        operation: &'static str,
        required: Direction,
    },
}

pub type Result<T, E = GraphError> = std::result::Result<T, E>;

/// Returns `Err(GraphError::UnsupportedDirection)` early unless the graph has the required direction
macro_rules! require_direction {
    ($graph:expr, $required:expr, $operation:literal) => {
        if $graph.direction() != $required {
            return Err($crate::error::GraphError::UnsupportedDirection {
                operation: $operation,
                required: $required,
            });
        }
    };
}

pub(crate) use require_direction;
