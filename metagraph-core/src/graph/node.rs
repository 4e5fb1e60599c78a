//! Graph Entities
//!
//! This module defines the ids, nodes and edges that live in the graph store.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::eval::AttributeCell;

/// Dense, 0-based identifier of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    /// Get the raw index.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for NodeId {
    fn from(id: usize) -> Self {
        Self(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Dense, 0-based identifier of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(usize);

impl EdgeId {
    /// Get the raw index.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for EdgeId {
    fn from(id: usize) -> Self {
        Self(id)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// Names one attribute cell, either a node's or an edge's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellRef {
    Node(NodeId),
    Edge(EdgeId),
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellRef::Node(id) => id.fmt(f),
            CellRef::Edge(id) => id.fmt(f),
        }
    }
}

impl From<NodeId> for CellRef {
    fn from(id: NodeId) -> Self {
        CellRef::Node(id)
    }
}

impl From<EdgeId> for CellRef {
    fn from(id: EdgeId) -> Self {
        CellRef::Edge(id)
    }
}

/// A node and its attribute.
#[derive(Debug)]
pub struct Node {
    id: NodeId,
    cell: AttributeCell,
}

impl Node {
    /// Create a node with an unresolved cell.
    pub(crate) fn new(id: NodeId) -> Self {
        Self {
            id,
            cell: AttributeCell::unresolved(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn cell(&self) -> &AttributeCell {
        &self.cell
    }

    pub(crate) fn cell_mut(&mut self) -> &mut AttributeCell {
        &mut self.cell
    }
}

/// A directed edge and its attribute.
#[derive(Debug)]
pub struct Edge {
    id: EdgeId,
    from: NodeId,
    to: NodeId,
    cell: AttributeCell,
}

impl Edge {
    /// Create an edge with an unresolved cell.
    pub(crate) fn new(id: EdgeId, from: NodeId, to: NodeId) -> Self {
        Self {
            id,
            from,
            to,
            cell: AttributeCell::unresolved(),
        }
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    /// Source node.
    pub fn from(&self) -> NodeId {
        self.from
    }

    /// Target node.
    pub fn to(&self) -> NodeId {
        self.to
    }

    pub fn cell(&self) -> &AttributeCell {
        &self.cell
    }

    pub(crate) fn cell_mut(&mut self) -> &mut AttributeCell {
        &mut self.cell
    }
}
