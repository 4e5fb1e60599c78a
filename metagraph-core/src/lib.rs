//! Metagraph Core
//!
//! This crate computes derived numeric attributes for the nodes and edges of
//! a fixed directed graph. Each attribute is either a literal or a formula
//! over other attributes of the same graph. It implements:
//!
//! - A dense graph store with forward and reverse adjacency indices
//! - Lazy, memoizing evaluation of attribute formulas
//! - The text formats for graph descriptions and results
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - `graph`: Ids, nodes, edges and the graph store
//! - `eval`: Formulas, attribute cells and the evaluator
//! - `text`: Input loader and output writer
//!
//! # Example
//!
//! ```rust
//! use metagraph_core::text::{parse_graph, render_attributes};
//!
//! let mut graph = parse_graph("3 2\n0 1\n1 2\n1.0\n5.0\nmin\n2.0\n*\n")?;
//! let attributes = graph.evaluate_all()?;
//!
//! assert_eq!(render_attributes(&attributes), "1\n5\n10\n2\n10\n");
//! # Ok::<(), metagraph_core::GraphError>(())
//! ```

pub mod error;
pub mod eval;
pub mod graph;
pub mod text;

use std::path::Path;

use tracing::info;

pub use error::{GraphError, IdKind, Result};
pub use eval::{Attributes, EvalOptions, Evaluator, Formula, NanPolicy};
pub use graph::{CellRef, EdgeId, GraphStore, NodeId};

/// Run one batch: load `input`, evaluate every cell, write `output`.
///
/// Nothing is written unless every cell resolves.
pub fn run(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<Attributes> {
    let mut graph = text::load_graph(input)?;
    let attributes = graph.evaluate_all()?;
    text::save_attributes(output, &attributes)?;
    info!(
        nodes = attributes.nodes.len(),
        edges = attributes.edges.len(),
        "attributes computed"
    );
    Ok(attributes)
}
