//! Error types for loading and evaluating a metagraph.

use std::fmt;

use thiserror::Error;

use crate::graph::CellRef;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Which id space an out-of-range reference pointed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    Node,
    Edge,
}

impl fmt::Display for IdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdKind::Node => f.write_str("node"),
            IdKind::Edge => f.write_str("edge"),
        }
    }
}

/// Everything that can abort a batch run.
#[derive(Error, Debug)]
pub enum GraphError {
    /// The input description could not be parsed.
    #[error("malformed input at line {line}: {message}")]
    MalformedInput { line: usize, message: String },

    /// A node or edge id outside the populated range.
    #[error("unknown {kind} id {id} (graph has {count} {kind}s)")]
    UnknownId { kind: IdKind, id: usize, count: usize },

    /// Evaluation re-entered a cell that was still being computed.
    #[error("cyclic dependency: {}", format_path(.path))]
    CyclicDependency { path: Vec<CellRef> },

    /// A cell was evaluated before any formula was assigned to it.
    #[error("{cell} has no formula")]
    MissingFormula { cell: CellRef },

    /// IO error while reading input or writing output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GraphError {
    pub(crate) fn malformed(line: usize, message: impl Into<String>) -> Self {
        GraphError::MalformedInput {
            line,
            message: message.into(),
        }
    }

    pub(crate) fn unknown_node(id: usize, count: usize) -> Self {
        GraphError::UnknownId {
            kind: IdKind::Node,
            id,
            count,
        }
    }

    pub(crate) fn unknown_edge(id: usize, count: usize) -> Self {
        GraphError::UnknownId {
            kind: IdKind::Edge,
            id,
            count,
        }
    }
}

fn format_path(path: &[CellRef]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}
