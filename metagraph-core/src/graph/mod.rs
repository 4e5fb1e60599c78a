//! Graph Representation
//!
//! This module holds the fixed directed graph whose nodes and edges carry
//! attribute cells.
//!
//! # Overview
//!
//! - Nodes and edges are identified by dense, 0-based ids.
//! - Each edge is indexed twice: in its source's outgoing list and in its
//!   target's incoming list, both in insertion order.
//! - Formulas and adjacency lists hold ids, never references, so the store
//!   stays the single owner of every entity.
//!
//! # Design Decisions
//!
//! 1. Entities live in `Vec`s rather than maps because ids are contiguous.
//!
//! 2. Every accessor returns `Result` and fails with `UnknownId` for an id
//!    outside the populated range; nothing is ever created on access.

mod node;
mod store;

pub use node::{CellRef, Edge, EdgeId, Node, NodeId};
pub use store::{EdgeList, GraphStore};
