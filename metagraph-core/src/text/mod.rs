//! Text Format
//!
//! Loader for the whitespace-separated graph description and writer for the
//! one-value-per-line result file.

mod emit;
mod parse;

pub use emit::{render_attributes, save_attributes, write_attributes};
pub use parse::{load_graph, parse_graph, read_graph};
