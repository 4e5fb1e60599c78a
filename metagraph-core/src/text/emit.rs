//! Output Writer
//!
//! One value per line: every node in id order, then every edge in id order.
//! Values use the shortest `f64` rendering that parses back to the same
//! number (`1`, `2.5`, `NaN`, `inf`).

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::eval::Attributes;

/// Write resolved attributes to any writer.
pub fn write_attributes<W: Write>(mut writer: W, attributes: &Attributes) -> Result<()> {
    for value in attributes.nodes.iter().chain(&attributes.edges) {
        writeln!(writer, "{value}")?;
    }
    writer.flush()?;
    Ok(())
}

/// Render resolved attributes as text.
pub fn render_attributes(attributes: &Attributes) -> String {
    attributes
        .nodes
        .iter()
        .chain(&attributes.edges)
        .map(|value| format!("{value}\n"))
        .collect()
}

/// Create (or truncate) `path` and write resolved attributes to it.
pub fn save_attributes(path: impl AsRef<Path>, attributes: &Attributes) -> Result<()> {
    let path = path.as_ref();
    debug!(
        path = %path.display(),
        values = attributes.nodes.len() + attributes.edges.len(),
        "writing attributes"
    );
    write_attributes(BufWriter::new(File::create(path)?), attributes)
}
