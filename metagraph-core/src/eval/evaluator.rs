//! Evaluator
//!
//! The evaluator resolves cells on demand. Reading a cell either returns its
//! memoized value or runs its formula, which reads the cells it depends on.
//!
//! # How Evaluation Works
//!
//! 1. If the cell holds a cached value, return it.
//!
//! 2. Otherwise mark the cell in progress and push a frame holding its
//!    formula and the cells the formula reads.
//!
//! 3. Read the top frame's next dependency. A cached dependency is folded
//!    into the frame right away; anything else gets a frame of its own.
//!
//! 4. Once a frame has folded every dependency, store the result in its cell,
//!    pop it and fold the result into the frame below.
//!
//! Frames live on a heap-allocated stack, so dependency chain length is
//! bounded by memory rather than by the thread's call stack.
//!
//! Reaching a cell that is already in progress means the formulas form a
//! cycle. With cycle detection on, the evaluator reports the stack slice
//! from that cell to the top as the cycle path.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use super::formula::Formula;
use super::options::EvalOptions;
use crate::error::{GraphError, Result};
use crate::graph::{CellRef, EdgeId, GraphStore, NodeId};

/// Counters for one evaluator's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvalStats {
    /// Formula invocations.
    pub invocations: u64,

    /// Reads answered from a cell's cache.
    pub cache_hits: u64,
}

/// Resolved values for every cell, in id order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attributes {
    pub nodes: Vec<f64>,
    pub edges: Vec<f64>,
}

/// One running formula.
#[derive(Debug)]
struct Frame {
    cell: CellRef,
    formula: Formula,

    /// Cells the formula reads, in evaluation order.
    deps: SmallVec<[CellRef; 4]>,

    /// Index of the next dependency to read.
    next: usize,

    /// Partial result over the dependencies read so far.
    acc: Option<f64>,
}

impl Frame {
    fn pending(&self) -> Option<CellRef> {
        self.deps.get(self.next).copied()
    }

    /// Fold one dependency value into the partial result.
    ///
    /// The minimum keeps the accumulator unless a value is strictly smaller,
    /// so NaN operands never displace a number and a leading NaN sticks.
    fn absorb(&mut self, value: f64) {
        self.next += 1;
        self.acc = Some(match (self.formula, self.acc) {
            (Formula::MinIncoming(_), Some(current)) if value < current => value,
            (Formula::MinIncoming(_), Some(current)) => current,
            (Formula::ProductIncoming(_), Some(product)) => product * value,
            _ => value,
        });
    }

    /// The formula's value once every dependency is folded in.
    ///
    /// A minimum over no edges is NaN.
    fn result(&self) -> f64 {
        match self.formula {
            Formula::Literal(value) => value,
            _ => self.acc.unwrap_or(f64::NAN),
        }
    }
}

/// Demand-driven, memoizing evaluator over a graph store.
pub struct Evaluator<'g> {
    graph: &'g mut GraphStore,
    options: EvalOptions,

    /// Formulas currently running, outermost first.
    stack: Vec<Frame>,

    stats: EvalStats,
}

impl<'g> Evaluator<'g> {
    /// Create an evaluator with default options.
    pub fn new(graph: &'g mut GraphStore) -> Self {
        Self::with_options(graph, EvalOptions::default())
    }

    /// Create an evaluator with the given options.
    pub fn with_options(graph: &'g mut GraphStore, options: EvalOptions) -> Self {
        Self {
            graph,
            options,
            stack: Vec::new(),
            stats: EvalStats::default(),
        }
    }

    /// The graph being evaluated.
    pub fn graph(&self) -> &GraphStore {
        &*self.graph
    }

    pub fn options(&self) -> EvalOptions {
        self.options
    }

    pub fn stats(&self) -> EvalStats {
        self.stats
    }

    /// Evaluate a node's attribute.
    pub fn node(&mut self, id: NodeId) -> Result<f64> {
        self.evaluate(CellRef::Node(id))
    }

    /// Evaluate an edge's attribute.
    pub fn edge(&mut self, id: EdgeId) -> Result<f64> {
        self.evaluate(CellRef::Edge(id))
    }

    /// Evaluate one cell, memoizing the result.
    pub fn evaluate(&mut self, cell: CellRef) -> Result<f64> {
        let base = self.stack.len();

        let result = match self.enter(cell) {
            Ok(Some(value)) => return Ok(value),
            Ok(None) => self.drive(base),
            Err(err) => Err(err),
        };

        if result.is_err() {
            for frame in self.stack.drain(base..) {
                if let Ok(slot) = self.graph.cell_mut(frame.cell) {
                    slot.abort();
                }
            }
        }
        result
    }

    /// Evaluate every node then every edge, in id order.
    pub fn evaluate_all(&mut self) -> Result<Attributes> {
        let nodes = (0..self.graph.node_count())
            .map(|i| self.node(NodeId::from(i)))
            .collect::<Result<Vec<_>>>()?;
        let edges = (0..self.graph.edge_count())
            .map(|i| self.edge(EdgeId::from(i)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Attributes { nodes, edges })
    }

    /// Return a cached value, or push a frame for the cell's formula.
    fn enter(&mut self, cell: CellRef) -> Result<Option<f64>> {
        let slot = self.graph.cell(cell)?;

        if let Some(value) = slot.lookup(self.options.nan_policy) {
            self.stats.cache_hits += 1;
            trace!(%cell, value, "cache hit");
            return Ok(Some(value));
        }

        if self.options.detect_cycles && slot.is_in_progress() {
            return Err(self.cycle_error(cell));
        }

        let formula = slot
            .formula()
            .ok_or(GraphError::MissingFormula { cell })?;
        let deps = formula.dependencies(&*self.graph)?;

        self.graph.cell_mut(cell)?.begin();
        self.stats.invocations += 1;
        self.stack.push(Frame {
            cell,
            formula,
            deps,
            next: 0,
            acc: None,
        });
        trace!(%cell, ?formula, depth = self.stack.len(), "invoking formula");
        Ok(None)
    }

    /// Run frames until the one at `base` resolves.
    fn drive(&mut self, base: usize) -> Result<f64> {
        loop {
            let top = self.stack.len() - 1;

            if let Some(dep) = self.stack[top].pending() {
                if let Some(value) = self.enter(dep)? {
                    self.stack[top].absorb(value);
                }
                continue;
            }

            let frame = self.stack.pop().expect("drive runs above its base frame");
            let value = frame.result();
            self.graph.cell_mut(frame.cell)?.finish(value);
            trace!(cell = %frame.cell, value, "resolved");

            if self.stack.len() == base {
                return Ok(value);
            }
            let below = self.stack.len() - 1;
            self.stack[below].absorb(value);
        }
    }

    fn cycle_error(&self, cell: CellRef) -> GraphError {
        let start = self
            .stack
            .iter()
            .position(|frame| frame.cell == cell)
            .unwrap_or(0);
        let mut path: Vec<CellRef> = self.stack[start..].iter().map(|frame| frame.cell).collect();
        path.push(cell);
        GraphError::CyclicDependency { path }
    }
}

impl GraphStore {
    /// Evaluate every cell with default options.
    pub fn evaluate_all(&mut self) -> Result<Attributes> {
        Evaluator::new(self).evaluate_all()
    }
}
