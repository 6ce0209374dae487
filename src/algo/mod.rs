/*!
# Graph Algorithms

This module provides a suite of **graph algorithms** built on top of the graph access traits in [`crate::ops`].
All algorithms are re-exported at the top level of this module, so you can simply do:
```rust
use wgraphs::algo::*;
```
and gain access to traversal, shortest paths, spanning trees, connectivity, topological sorting,
flow, matching and coloring routines.
If possible, algorithms are provided as **iterators**, making it easy to consume results lazily.

Algorithms never modify the graph they are run on. Inputs are validated before any work is done:
node ids out of range yield [`GraphError::OutOfRange`], running an algorithm on the wrong kind of
graph yields [`GraphError::UnsupportedDirection`].
*/

mod coloring;
mod connectivity;
mod eulerian;
mod matching;
mod network_flow;
mod shortest_path;
mod spanning_tree;
mod topological;
mod traversal;

use tracing::{debug, trace};

use crate::{error::*, prelude::*, utils::*};

pub use coloring::*;
pub use connectivity::*;
pub use eulerian::*;
pub use matching::*;
pub use network_flow::*;
pub use shortest_path::*;
pub use spanning_tree::*;
pub use topological::*;
pub use traversal::*;
