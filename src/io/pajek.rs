/*!
# Pajek

Readers and writers for a Pajek-style text format:

```text
*vertices 4
1 Lisbon
2 "New York"
*edges
1 2 3.5
2 3
3 4 1
```

- The header `*vertices n` declares nodes `1..=n`; it is followed by optional label lines
  `i label`. Surrounding double quotes are removed. Nodes without a label line are labeled with
  their (1-based) index. Headers above the reader's vertex limit are rejected.
- `*edges` starts a list of undirected edges, `*arcs` a list of directed ones. Each line is
  `u v [w]` with 1-based node ids; the weight defaults to `1`. Further tokens are an error.
- Keywords are case-insensitive. Blank lines and lines starting with the comment identifier
  (default: `"%"`) are ignored.

Internally, nodes are numbered `0..n`, so `u` in the file becomes node `u - 1`.

# Examples

```
use std::io::Cursor;
use wgraphs::{prelude::*, io::*};

let data = b"*Vertices 3\n1 \"a b\"\n*Arcs\n1 2 0.5\n2 3\n";
let g: WeightedGraph = PajekReader::new().try_read_graph(Cursor::new(&data[..])).unwrap();

assert!(g.is_directed());
assert_eq!(g.number_of_edges(), 2);
assert_eq!(g.weight(0, 1), 0.5);
assert_eq!(g.label(0).unwrap(), "a b");
assert_eq!(g.label(2).unwrap(), "3");
```
*/

use super::*;

/// A configurable reader for the Pajek format
#[derive(Debug, Clone)]
pub struct PajekReader {
    /// Overrides the direction declared by the edge section
    direction: Option<Direction>,
    /// Lines starting with `comment_identifier` are skipped when reading
    comment_identifier: String,
    /// Headers declaring more vertices are rejected before anything is allocated
    max_vertices: NumNodes,
}

impl Default for PajekReader {
    fn default() -> Self {
        Self {
            direction: None,
            comment_identifier: "%".to_string(),
            max_vertices: 1 << 26,
        }
    }
}

impl PajekReader {
    /// Creates a new [`PajekReader`] with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Forces the graph to be directed/undirected regardless of `*edges`/`*arcs`.
    /// `None` uses the section marker of the file (undirected if there is none).
    pub fn set_direction(&mut self, direction: Option<Direction>) {
        self.direction = direction;
    }

    /// Builder variant of [`PajekReader::set_direction`]
    pub fn direction(mut self, direction: Option<Direction>) -> Self {
        self.set_direction(direction);
        self
    }

    /// Updates the identifier used for detecting comment lines.
    ///
    /// Default is `"%"`.
    pub fn set_comment_identifier<S>(&mut self, c: S)
    where
        S: Into<String>,
    {
        self.comment_identifier = c.into();
    }

    /// Builder variant of [`PajekReader::set_comment_identifier`]
    pub fn comment_identifier<S>(mut self, c: S) -> Self
    where
        S: Into<String>,
    {
        self.set_comment_identifier(c);
        self
    }

    /// Updates the largest vertex count a `*vertices` header may declare.
    ///
    /// Default is `2^26`.
    pub fn set_max_vertices(&mut self, max_vertices: NumNodes) {
        self.max_vertices = max_vertices;
    }

    /// Builder variant of [`PajekReader::set_max_vertices`]
    pub fn max_vertices(mut self, max_vertices: NumNodes) -> Self {
        self.set_max_vertices(max_vertices);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Header,
    Vertices,
    Edges(Direction),
}

/// Splits off a `*keyword` and returns it in lowercase
fn section_keyword(line: &str) -> Option<String> {
    line.strip_prefix('*')
        .and_then(|rest| rest.split_whitespace().next())
        .map(str::to_lowercase)
}

fn strip_quotes(label: &str) -> &str {
    label
        .strip_prefix('"')
        .and_then(|l| l.strip_suffix('"'))
        .unwrap_or(label)
}

/// Converts a 1-based id from the file into a node
fn to_node(id: Node, n: NumNodes, line_no: usize) -> Result<Node> {
    raise_error_unless!(
        (1..=n).contains(&id),
        ErrorKind::InvalidData,
        format!("line {line_no}: vertex {id} is out of range 1..={n}")
    );
    Ok(id - 1)
}

impl GraphReader<WeightedGraph> for PajekReader {
    fn try_read_graph<R: BufRead>(&self, reader: R) -> Result<WeightedGraph> {
        let mut section = Section::Header;
        let mut n: NumNodes = 0;
        let mut labels: Vec<Option<String>> = Vec::new();
        let mut edges: Vec<WeightedEdge> = Vec::new();
        let mut declared: Option<Direction> = None;

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = i + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with(self.comment_identifier.as_str()) {
                continue;
            }

            if let Some(keyword) = section_keyword(line) {
                section = match (section, keyword.as_str()) {
                    (Section::Header, "vertices") => {
                        let mut parts = line.split_whitespace().skip(1);
                        n = parse_next_value!(parts, "number of vertices");
                        raise_error_unless!(
                            n <= self.max_vertices,
                            ErrorKind::InvalidData,
                            format!(
                                "line {line_no}: {n} vertices exceed the limit of {}",
                                self.max_vertices
                            )
                        );
                        labels = vec![None; n as usize];
                        Section::Vertices
                    }
                    (Section::Header, _) => {
                        return Err(io_error!(
                            ErrorKind::InvalidData,
                            format!("line {line_no}: expected *vertices header, found {line:?}")
                        ));
                    }
                    (_, "edges" | "arcs") => {
                        let direction = if keyword == "arcs" {
                            Direction::Directed
                        } else {
                            Direction::Undirected
                        };
                        raise_error_unless!(
                            declared.is_none_or(|d| d == direction),
                            ErrorKind::InvalidData,
                            format!("line {line_no}: mixing *edges and *arcs is not supported")
                        );
                        declared = Some(direction);
                        Section::Edges(direction)
                    }
                    (_, other) => {
                        return Err(io_error!(
                            ErrorKind::InvalidData,
                            format!("line {line_no}: unknown section *{other}")
                        ));
                    }
                };
                continue;
            }

            match section {
                Section::Header => {
                    return Err(io_error!(
                        ErrorKind::InvalidData,
                        format!("line {line_no}: expected *vertices header, found {line:?}")
                    ));
                }
                Section::Vertices => {
                    let (id, label) = line
                        .split_once(char::is_whitespace)
                        .map_or((line, ""), |(id, label)| (id, label.trim()));
                    let id = id.parse::<Node>().map_err(|_| {
                        io_error!(
                            ErrorKind::InvalidData,
                            format!("line {line_no}: cannot parse vertex id from {id:?}")
                        )
                    })?;
                    let u = to_node(id, n, line_no)?;
                    if !label.is_empty() {
                        labels[u as usize] = Some(strip_quotes(label).to_string());
                    }
                }
                Section::Edges(_) => {
                    let mut parts = line.split_whitespace();
                    let u = to_node(parse_next_value!(parts, "origin"), n, line_no)?;
                    let v = to_node(parse_next_value!(parts, "destination"), n, line_no)?;
                    let weight = match parts.next() {
                        None => 1.0,
                        Some(w) => w.parse::<Weight>().map_err(|_| {
                            io_error!(
                                ErrorKind::InvalidData,
                                format!("line {line_no}: cannot parse weight from {w:?}")
                            )
                        })?,
                    };
                    raise_error_unless!(
                        parts.next().is_none(),
                        ErrorKind::InvalidData,
                        format!("line {line_no}: unexpected tokens after weight in {line:?}")
                    );
                    edges.push(WeightedEdge::new(u, v, weight));
                }
            }
        }

        raise_error_unless!(
            section != Section::Header,
            ErrorKind::InvalidData,
            "missing *vertices header"
        );

        let direction = self
            .direction
            .or(declared)
            .unwrap_or(Direction::Undirected);
        let mut graph = WeightedGraph::from_edges(n, direction, edges)
            .map_err(|err| io_error!(ErrorKind::InvalidData, err))?;

        for (u, label) in labels.into_iter().enumerate() {
            let label = label.unwrap_or_else(|| (u + 1).to_string());
            graph
                .set_label(u as Node, label)
                .map_err(|err| io_error!(ErrorKind::InvalidData, err))?;
        }

        Ok(graph)
    }
}

/// Trait for reading graphs in the Pajek format with default [`PajekReader`] settings
pub trait PajekRead: Sized {
    /// Tries to read a graph from a given buffered reader in Pajek format.
    ///
    /// # Errors
    /// Returns an error if the input cannot be parsed as a valid Pajek graph.
    fn try_read_pajek<R>(reader: R) -> Result<Self>
    where
        R: BufRead;

    /// Tries to read a graph from a file on disk in Pajek format.
    ///
    /// # Errors
    /// Returns an error if the file does not exist or is not a valid Pajek file.
    fn try_read_pajek_file<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        Self::try_read_pajek(BufReader::new(File::open(path)?))
    }
}

impl PajekRead for WeightedGraph {
    fn try_read_pajek<R>(reader: R) -> Result<Self>
    where
        R: BufRead,
    {
        PajekReader::new().try_read_graph(reader)
    }
}

/// A configurable writer for the Pajek format
#[derive(Debug, Clone)]
pub struct PajekWriter {
    /// Write a label line for every node; unlabeled nodes get their 1-based index
    all_labels: bool,
}

impl Default for PajekWriter {
    fn default() -> Self {
        Self { all_labels: true }
    }
}

impl PajekWriter {
    /// Creates a new [`PajekWriter`] with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// If *false*, label lines are only written for explicitly labeled nodes
    pub fn set_all_labels(&mut self, all_labels: bool) {
        self.all_labels = all_labels;
    }

    /// Builder variant of [`PajekWriter::set_all_labels`]
    pub fn all_labels(mut self, all_labels: bool) -> Self {
        self.set_all_labels(all_labels);
        self
    }
}

fn quote_if_needed(label: &str) -> String {
    if label.is_empty() || label.contains(char::is_whitespace) {
        format!("\"{label}\"")
    } else {
        label.to_string()
    }
}

impl GraphWriter<WeightedGraph> for PajekWriter {
    fn try_write_graph<W: Write>(&self, graph: &WeightedGraph, mut writer: W) -> Result<()> {
        writeln!(writer, "*vertices {}", graph.number_of_nodes())?;
        for u in graph.vertices() {
            if graph.has_label(u) {
                let label = graph
                    .label(u)
                    .map_err(|err| io_error!(ErrorKind::InvalidInput, err))?;
                writeln!(writer, "{} {}", u + 1, quote_if_needed(&label))?;
            } else if self.all_labels {
                writeln!(writer, "{} {}", u + 1, u + 1)?;
            }
        }

        writeln!(
            writer,
            "{}",
            if graph.is_directed() { "*arcs" } else { "*edges" }
        )?;
        for e in graph.weighted_edges(graph.is_undirected()) {
            writeln!(
                writer,
                "{} {} {}",
                e.origin + 1,
                e.destination + 1,
                DisplayWeight(e.weight)
            )?;
        }

        Ok(())
    }
}

/// Trait for writing graphs in the Pajek format with default [`PajekWriter`] settings
pub trait PajekWrite {
    /// Writes the graph in Pajek format.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    fn try_write_pajek<W: Write>(&self, writer: W) -> Result<()>;

    /// Writes the graph in Pajek format into a file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or if writing fails.
    fn try_write_pajek_file<P: AsRef<Path>>(&self, path: P) -> Result<()>;
}

impl PajekWrite for WeightedGraph {
    fn try_write_pajek<W: Write>(&self, writer: W) -> Result<()> {
        PajekWriter::new().try_write_graph(self, writer)
    }

    fn try_write_pajek_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        PajekWriter::new().try_write_graph_file(self, path)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn read(data: &str) -> Result<WeightedGraph> {
        PajekReader::new().try_read_graph(Cursor::new(data.as_bytes()))
    }

    fn read_err(data: &str) -> String {
        let err = read(data).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
        err.to_string()
    }

    #[test]
    fn read_undirected() {
        let g = read(
            "% a comment\n*vertices 4\n1 Lisbon\n2 \"New York\"\n\n*edges\n1 2 3.5\n2 3\n3 4 1\n4 1 -2\n",
        )
        .unwrap();

        assert!(g.is_undirected());
        assert_eq!(g.number_of_nodes(), 4);
        assert_eq!(g.number_of_edges(), 4);
        assert_eq!(g.weight(1, 0), 3.5);
        assert_eq!(g.weight(1, 2), 1.0);
        assert_eq!(g.weight(0, 3), -2.0);
        assert_eq!(g.label(0).unwrap(), "Lisbon");
        assert_eq!(g.label(1).unwrap(), "New York");
        assert_eq!(g.label(3).unwrap(), "4");
    }

    #[test]
    fn read_arcs_case_insensitive() {
        let g = read("*VERTICES 3\n*Arcs\n1 2\n3 1 2\n").unwrap();
        assert!(g.is_directed());
        assert_eq!(
            g.edge_list(),
            vec![WeightedEdge::new(0, 1, 1.0), WeightedEdge::new(2, 0, 2.0)]
        );
    }

    #[test]
    fn direction_override_and_comment_identifier() {
        let g: WeightedGraph = PajekReader::new()
            .direction(Some(Direction::Directed))
            .comment_identifier("#")
            .try_read_graph(Cursor::new(&b"# c\n*vertices 2\n*edges\n1 2\n"[..]))
            .unwrap();
        assert!(g.is_directed());
        assert!(!g.has_edge(1, 0));
    }

    #[test]
    fn without_edge_section() {
        let g = read("*vertices 3\n1 a\n").unwrap();
        assert!(g.has_no_edges());
        assert!(g.is_undirected());
    }

    #[test]
    fn malformed_input() {
        assert!(read_err("").contains("missing *vertices"));
        assert!(read_err("1 2\n").contains("expected *vertices"));
        assert!(read_err("*vertices x\n").contains("number of vertices"));
        assert!(read_err("*vertices 2\n*edges\n1 3\n").contains("out of range"));
        assert!(read_err("*vertices 2\n*edges\n0 1\n").contains("out of range"));
        assert!(read_err("*vertices 2\n*edges\n1\n").contains("destination"));
        assert!(read_err("*vertices 2\n*edges\n1 2 heavy\n").contains("weight"));
        assert!(read_err("*vertices 2\n*edges\n1 2 inf\n").contains("non-finite"));
        assert!(read_err("*vertices 2\n*edges\n1 2\n*arcs\n2 1\n").contains("mixing"));
        assert!(read_err("*vertices 2\n*matrix\n").contains("unknown section"));
        assert!(read_err("*vertices 2\n7 x\n").contains("out of range"));
        assert!(read_err("*vertices 2\n*edges\n1 2 3 4\n").contains("unexpected tokens"));
        assert!(read_err("*vertices 2\n*arcs\n1 2 0.5 x\n").contains("unexpected tokens"));
    }

    #[test]
    fn vertex_limit() {
        assert!(read_err("*vertices 4000000000\n").contains("exceed the limit"));

        let reader = PajekReader::new().max_vertices(3);
        let err = reader
            .try_read_graph(Cursor::new(&b"*vertices 4\n"[..]))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
        let g = reader
            .try_read_graph(Cursor::new(&b"*vertices 3\n*edges\n1 3\n"[..]))
            .unwrap();
        assert_eq!(g.number_of_nodes(), 3);
    }

    #[test]
    fn write_then_read() {
        let mut g = WeightedGraph::from_edges(
            3,
            Direction::Undirected,
            [(0, 1, 2.0), (1, 2, 0.25), (2, 2, 1.0)],
        )
        .unwrap();
        g.set_label(0, "first node").unwrap();

        let mut buffer = Vec::new();
        g.try_write_pajek(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(
            text,
            "*vertices 3\n1 \"first node\"\n2 2\n3 3\n*edges\n1 2 2\n2 3 0.25\n3 3 1\n"
        );

        let h = read(&text).unwrap();
        assert_eq!(h.edge_list(), g.edge_list());
        assert_eq!(h.label(0).unwrap(), "first node");
    }

    #[test]
    fn write_only_explicit_labels() {
        let g = WeightedGraph::from_edges(2, Direction::Directed, [(1, 0, 1.5)])
            .unwrap()
            .label_node(1, "b")
            .unwrap();

        let mut buffer = Vec::new();
        PajekWriter::new()
            .all_labels(false)
            .try_write_graph(&g, &mut buffer)
            .unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "*vertices 2\n2 b\n*arcs\n2 1 1.5\n"
        );
    }
}
