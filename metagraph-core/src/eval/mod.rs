//! Attribute Evaluation
//!
//! This module implements lazy, memoized evaluation of node and edge
//! attributes.
//!
//! # Concepts
//!
//! ## Formulas
//!
//! A `Formula` is the rule a cell uses to compute its value: a literal, a copy
//! of another cell, the minimum over a node's incoming edges, or the product
//! of an edge's source node with that node's incoming edges.
//!
//! ## Cells
//!
//! An `AttributeCell` holds a formula and the memoized result. A cell is
//! computed the first time it is read and served from its cache afterwards.
//!
//! ## Evaluator
//!
//! The `Evaluator` is the explicit, side-effecting read operation. It borrows
//! the graph store mutably for its lifetime, so memoization writes never race
//! with anything.
//!
//! # NaN
//!
//! By default a NaN result is not cached: NaN also means "not computed yet",
//! so a cell whose formula yields NaN runs again on every read. Select
//! `NanPolicy::Memoize` to cache NaN like any other value.

mod cell;
mod evaluator;
mod formula;
mod options;

pub use cell::AttributeCell;
pub use evaluator::{Attributes, EvalStats, Evaluator};
pub use formula::Formula;
pub use options::{EvalOptions, NanPolicy};
