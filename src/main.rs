//! Command line front-end: loads a graph in Pajek format and prints the result of one algorithm.
//!
//! Vertex ids on the command line and in the output are 1-based like in the graph files.
//! Results go to stdout, logs to stderr.

use std::{
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, ensure};
use clap::{ArgAction, Parser, Subcommand};
use itertools::Itertools;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use wgraphs::{algo::*, io::*, prelude::*};

#[derive(Parser)]
#[command(name = "wgraphs")]
#[command(version, about = "Classical algorithms on weighted graphs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Treat the graph as directed regardless of its edge section
    #[arg(long, global = true, conflicts_with = "undirected")]
    directed: bool,

    /// Treat the graph as undirected regardless of its edge section
    #[arg(long, global = true)]
    undirected: bool,

    /// Increase log verbosity (-v: debug, -vv: trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Breadth-first layers from a source vertex
    Bfs {
        #[arg(value_name = "GRAPH_FILE")]
        graph: PathBuf,
        source: Node,
    },

    /// Shortest paths from a source vertex (non-negative weights)
    Dijkstra {
        #[arg(value_name = "GRAPH_FILE")]
        graph: PathBuf,
        source: Node,
    },

    /// Distance matrix of all pairs of vertices
    FloydWarshall {
        #[arg(value_name = "GRAPH_FILE")]
        graph: PathBuf,
    },

    /// Minimum spanning tree (undirected graphs)
    Kruskal {
        #[arg(value_name = "GRAPH_FILE")]
        graph: PathBuf,
    },

    /// Eulerian circuit (undirected graphs)
    Euler {
        #[arg(value_name = "GRAPH_FILE")]
        graph: PathBuf,
    },

    /// Strongly connected components (directed graphs)
    Scc {
        #[arg(value_name = "GRAPH_FILE")]
        graph: PathBuf,
    },

    /// Topological order by label (directed acyclic graphs)
    Topo {
        #[arg(value_name = "GRAPH_FILE")]
        graph: PathBuf,
    },

    /// Maximum flow between two vertices
    MaxFlow {
        #[arg(value_name = "GRAPH_FILE")]
        graph: PathBuf,
        source: Node,
        sink: Node,
    },

    /// Maximum matching between the first half of the vertices and the rest
    Matching {
        #[arg(value_name = "GRAPH_FILE")]
        graph: PathBuf,
    },

    /// Greedy vertex coloring (undirected graphs)
    Coloring {
        #[arg(value_name = "GRAPH_FILE")]
        graph: PathBuf,
    },

    /// Basic statistics of the graph
    Info {
        #[arg(value_name = "GRAPH_FILE")]
        graph: PathBuf,
    },
}

impl Command {
    fn graph_path(&self) -> &Path {
        match self {
            Command::Bfs { graph, .. }
            | Command::Dijkstra { graph, .. }
            | Command::FloydWarshall { graph }
            | Command::Kruskal { graph }
            | Command::Euler { graph }
            | Command::Scc { graph }
            | Command::Topo { graph }
            | Command::MaxFlow { graph, .. }
            | Command::Matching { graph }
            | Command::Coloring { graph }
            | Command::Info { graph } => graph,
        }
    }
}

impl Cli {
    fn direction(&self) -> Option<Direction> {
        if self.directed {
            Some(Direction::Directed)
        } else if self.undirected {
            Some(Direction::Undirected)
        } else {
            None
        }
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Converts a 1-based vertex from the command line into a node
fn to_node(graph: &WeightedGraph, vertex: Node) -> Result<Node> {
    let n = graph.number_of_nodes();
    ensure!(
        (1..=n).contains(&vertex),
        "vertex {vertex} is out of range 1..={n}"
    );
    Ok(vertex - 1)
}

fn one_based(nodes: &[Node], separator: &str) -> String {
    nodes.iter().map(|u| u + 1).join(separator)
}

fn run<W: Write>(command: &Command, graph: &WeightedGraph, out: &mut W) -> Result<()> {
    match *command {
        Command::Bfs { source, .. } => {
            let layers = graph.bfs_layers(to_node(graph, source)?)?;
            for (level, nodes) in layers.iter() {
                writeln!(out, "{level}: {}", one_based(nodes, ","))?;
            }
        }

        Command::Dijkstra { source, .. } => {
            let tree = graph.dijkstra(to_node(graph, source)?)?;
            for v in graph.vertices() {
                let path = tree.path_to(v).unwrap_or_else(|| vec![v]);
                writeln!(
                    out,
                    "{}: {}; d={}",
                    v + 1,
                    one_based(&path, ","),
                    DisplayWeight(tree.distance_to(v))
                )?;
            }
        }

        Command::FloydWarshall { .. } => {
            let matrix = graph.floyd_warshall();
            for (u, row) in graph.vertices().zip(matrix.rows()) {
                writeln!(out, "{}:{}", u + 1, row.iter().map(|&d| DisplayWeight(d)).join(","))?;
            }
        }

        Command::Kruskal { .. } => {
            let mst = graph.kruskal()?;
            writeln!(out, "total weight = {}", DisplayWeight(mst.total_weight()))?;
            writeln!(out, "edges:")?;
            for e in mst.edges() {
                writeln!(
                    out,
                    "{}-{} ({})",
                    e.origin + 1,
                    e.destination + 1,
                    DisplayWeight(e.weight)
                )?;
            }
        }

        Command::Euler { .. } => match graph.eulerian_circuit()? {
            Some(circuit) => {
                writeln!(out, "1")?;
                writeln!(out, "{}", one_based(&circuit, ","))?;
            }
            None => writeln!(out, "0")?,
        },

        Command::Scc { .. } => {
            for component in graph.strongly_connected_components()? {
                writeln!(out, "{}", one_based(&component, ","))?;
            }
        }

        Command::Topo { .. } => {
            let order = graph.topological_order()?;
            let labels = order
                .iter()
                .map(|&u| graph.label(u))
                .collect::<Result<Vec<_>, _>>()?;
            writeln!(out, "{}", labels.iter().join(" , "))?;
        }

        Command::MaxFlow { source, sink, .. } => {
            let flow = graph.max_flow(to_node(graph, source)?, to_node(graph, sink)?)?;
            // same shortest round-trip rendering as every other weight, not fixed to one decimal
            writeln!(out, "{}", DisplayWeight(flow.value()))?;
        }

        Command::Matching { .. } => {
            let half = graph.number_of_nodes() / 2;
            let left = NodeBitSet::new_with_bits_set(graph.number_of_nodes(), 0..half);
            let pairs = graph.maximum_bipartite_matching(&left)?;
            writeln!(out, "{}", pairs.len())?;
            writeln!(
                out,
                "{}",
                pairs
                    .iter()
                    .map(|&(a, b)| format!("{}-{}", a + 1, b + 1))
                    .join(", ")
            )?;
        }

        Command::Coloring { .. } => {
            let coloring = graph.greedy_coloring()?;
            writeln!(out, "{}", coloring.number_of_colors())?;
            writeln!(out, "{}", coloring.colors().iter().map(|c| c + 1).join(", "))?;
        }

        Command::Info { .. } => {
            writeln!(out, "direction: {}", graph.direction())?;
            writeln!(out, "vertices: {}", graph.number_of_nodes())?;
            writeln!(out, "edges: {}", graph.number_of_edges())?;
            writeln!(out, "max degree: {}", graph.max_degree())?;
            let components = if graph.is_directed() {
                graph.strongly_connected_components()?.len()
            } else {
                graph.connected_components()?.count()
            };
            writeln!(out, "components: {components}")?;
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let path = cli.command.graph_path();
    let graph: WeightedGraph = PajekReader::new()
        .direction(cli.direction())
        .try_read_graph_file(path)
        .with_context(|| format!("failed to load graph from {}", path.display()))?;
    debug!(
        n = graph.number_of_nodes(),
        m = graph.number_of_edges(),
        direction = %graph.direction(),
        "graph loaded"
    );

    let mut out = BufWriter::new(std::io::stdout().lock());
    run(&cli.command, &graph, &mut out)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn output(command: Command, data: &str) -> String {
        let graph: WeightedGraph = PajekReader::new()
            .try_read_graph(Cursor::new(data.as_bytes()))
            .unwrap();
        let mut out = Vec::new();
        run(&command, &graph, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    const TRIANGLE: &str = "*vertices 4\n*edges\n1 2 1\n2 3 2.5\n3 1 4\n";
    const DAG: &str = "*vertices 3\n1 shirt\n2 tie\n3 jacket\n*arcs\n1 2\n2 3\n1 3\n";

    fn path() -> PathBuf {
        PathBuf::from("graph.net")
    }

    #[test]
    fn bfs_and_dijkstra() {
        assert_eq!(
            output(Command::Bfs { graph: path(), source: 2 }, TRIANGLE),
            "0: 2\n1: 1,3\n"
        );
        assert_eq!(
            output(Command::Dijkstra { graph: path(), source: 1 }, TRIANGLE),
            "1: 1; d=0\n2: 1,2; d=1\n3: 1,2,3; d=3.5\n4: 4; d=inf\n"
        );
    }

    #[test]
    fn floyd_warshall() {
        assert_eq!(
            output(Command::FloydWarshall { graph: path() }, TRIANGLE),
            "1:0,1,3.5,inf\n2:1,0,2.5,inf\n3:3.5,2.5,0,inf\n4:inf,inf,inf,0\n"
        );
    }

    #[test]
    fn kruskal_and_euler() {
        assert_eq!(
            output(Command::Kruskal { graph: path() }, TRIANGLE),
            "total weight = 3.5\nedges:\n1-2 (1)\n2-3 (2.5)\n"
        );
        assert_eq!(
            output(Command::Euler { graph: path() }, TRIANGLE),
            "1\n1,3,2\n"
        );
    }

    #[test]
    fn directed_commands() {
        assert_eq!(output(Command::Scc { graph: path() }, DAG), "1\n2\n3\n");
        assert_eq!(
            output(Command::Topo { graph: path() }, DAG),
            "shirt , tie , jacket\n"
        );
        assert_eq!(
            output(Command::MaxFlow { graph: path(), source: 1, sink: 3 }, DAG),
            "2\n"
        );
        assert_eq!(
            output(
                Command::MaxFlow { graph: path(), source: 1, sink: 2 },
                "*vertices 3\n*arcs\n1 2 0.25\n1 3 1.125\n3 2 2\n"
            ),
            "1.375\n"
        );
    }

    #[test]
    fn matching_and_coloring() {
        let square = "*vertices 4\n*edges\n1 3\n1 4\n2 3\n";
        assert_eq!(
            output(Command::Matching { graph: path() }, square),
            "2\n1-4, 2-3\n"
        );
        assert_eq!(
            output(Command::Coloring { graph: path() }, TRIANGLE),
            "3\n3, 2, 1, 1\n"
        );
    }

    #[test]
    fn vertices_are_one_based() {
        let graph = WeightedGraph::new_undirected(3);
        assert_eq!(to_node(&graph, 3).unwrap(), 2);
        assert!(to_node(&graph, 0).is_err());
        assert!(to_node(&graph, 4).is_err());
    }

    #[test]
    fn cli_parses() {
        let cli = Cli::try_parse_from(["wgraphs", "--directed", "-vv", "max-flow", "g.net", "1", "4"])
            .unwrap();
        assert_eq!(cli.direction(), Some(Direction::Directed));
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Command::MaxFlow { source: 1, sink: 4, .. }));

        assert!(Cli::try_parse_from(["wgraphs", "--directed", "--undirected", "info", "g"]).is_err());
    }
}
