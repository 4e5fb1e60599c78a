//! Input Loader
//!
//! Reads the whitespace-separated graph description:
//!
//! ```text
//! <nodeCount> <edgeCount>
//! <fromId> <toId>                      (edgeCount times)
//! <double> | v <id> | e <id> | min     (nodeCount times)
//! <double> | v <id> | e <id> | *       (edgeCount times)
//! ```
//!
//! Line breaks only matter for error positions.

use std::fs;
use std::io::Read;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{GraphError, Result};
use crate::eval::Formula;
use crate::graph::{CellRef, EdgeId, GraphStore, NodeId};

/// Token cursor that remembers which line each token came from.
struct Tokens<'a> {
    tokens: Vec<(usize, &'a str)>,
    pos: usize,
}

impl<'a> Tokens<'a> {
    fn new(input: &'a str) -> Self {
        let tokens = input
            .lines()
            .enumerate()
            .flat_map(|(i, line)| line.split_whitespace().map(move |token| (i + 1, token)))
            .collect();
        Self { tokens, pos: 0 }
    }

    /// Line of the most recently consumed token.
    fn line(&self) -> usize {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or(1, |&(line, _)| line)
    }

    fn remaining(&self) -> usize {
        self.tokens.len() - self.pos
    }

    fn next(&mut self, expected: &str) -> Result<&'a str> {
        match self.tokens.get(self.pos) {
            Some(&(_, token)) => {
                self.pos += 1;
                Ok(token)
            }
            None => Err(GraphError::malformed(
                self.line(),
                format!("expected {expected}, found end of input"),
            )),
        }
    }

    fn index(&mut self, expected: &str) -> Result<usize> {
        let token = self.next(expected)?;
        token.parse().map_err(|_| {
            GraphError::malformed(self.line(), format!("expected {expected}, found `{token}`"))
        })
    }
}

/// Parse a graph description held in memory.
pub fn parse_graph(input: &str) -> Result<GraphStore> {
    let mut tokens = Tokens::new(input);

    let node_count = tokens.index("node count")?;
    let edge_count = tokens.index("edge count")?;

    // Each edge needs two endpoint tokens and one attribute token, each
    // node one attribute token. Copies take one more, so this is a floor.
    let required = edge_count
        .checked_mul(3)
        .and_then(|edge_tokens| edge_tokens.checked_add(node_count));
    match required {
        Some(required) if required <= tokens.remaining() => {}
        Some(required) => {
            return Err(GraphError::malformed(
                tokens.line(),
                format!(
                    "expected at least {required} tokens for {node_count} nodes and {edge_count} edges, found {}",
                    tokens.remaining()
                ),
            ));
        }
        None => {
            return Err(GraphError::malformed(
                tokens.line(),
                format!("{node_count} nodes and {edge_count} edges exceed the addressable size"),
            ));
        }
    }

    let mut graph = GraphStore::with_capacity(node_count, edge_count);

    for i in 0..node_count {
        graph.add_node(NodeId::from(i))?;
    }

    for i in 0..edge_count {
        let from = tokens.index("edge source id")?;
        let to = tokens.index("edge target id")?;
        graph.add_edge(EdgeId::from(i), NodeId::from(from), NodeId::from(to))?;
    }

    for i in 0..node_count {
        let cell = CellRef::Node(NodeId::from(i));
        let formula = parse_formula(&mut tokens, cell)?;
        graph.set_formula(cell, formula)?;
    }

    for i in 0..edge_count {
        let cell = CellRef::Edge(EdgeId::from(i));
        let formula = parse_formula(&mut tokens, cell)?;
        graph.set_formula(cell, formula)?;
    }

    if tokens.remaining() > 0 {
        warn!(
            ignored = tokens.remaining(),
            line = tokens.line(),
            "trailing tokens after the last attribute"
        );
    }

    debug!(nodes = node_count, edges = edge_count, "graph loaded");
    Ok(graph)
}

/// Read and parse a graph description from any reader.
pub fn read_graph<R: Read>(mut reader: R) -> Result<GraphStore> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    parse_graph(&input)
}

/// Load a graph description from a file.
pub fn load_graph(path: impl AsRef<Path>) -> Result<GraphStore> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading graph description");
    parse_graph(&fs::read_to_string(path)?)
}

/// Parse one attribute entry for `cell`.
///
/// `min` is only valid for nodes and `*` only for edges; both refer to the
/// cell being defined.
fn parse_formula(tokens: &mut Tokens<'_>, cell: CellRef) -> Result<Formula> {
    let token = tokens.next("attribute")?;
    let formula = match (token, cell) {
        ("v", _) => Formula::CopyNode(NodeId::from(tokens.index("node id")?)),
        ("e", _) => Formula::CopyEdge(EdgeId::from(tokens.index("edge id")?)),
        ("min", CellRef::Node(id)) => Formula::MinIncoming(id),
        ("*", CellRef::Edge(id)) => Formula::ProductIncoming(id),
        (literal, _) => {
            let value = literal.parse::<f64>().map_err(|_| {
                let keyword = match cell {
                    CellRef::Node(_) => "min",
                    CellRef::Edge(_) => "*",
                };
                GraphError::malformed(
                    tokens.line(),
                    format!(
                        "expected a number, `v <id>`, `e <id>` or `{keyword}` for {cell}, found `{literal}`"
                    ),
                )
            })?;
            Formula::Literal(value)
        }
    };
    Ok(formula)
}
