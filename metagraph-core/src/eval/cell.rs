//! Attribute Cells
//!
//! An `AttributeCell` is the lazily computed scalar attached to one node or
//! edge. It holds the formula that produces its value and, once evaluated,
//! the memoized result.
//!
//! # Cache State
//!
//! A stored value only counts as a cache hit when it is not NaN, unless the
//! evaluator runs with [`NanPolicy::Memoize`]. Under the default policy a NaN
//! result is indistinguishable from "never computed", so the formula runs
//! again on every read.

use super::formula::Formula;
use super::options::NanPolicy;

/// A single memoized attribute slot.
#[derive(Debug, Clone, Default)]
pub struct AttributeCell {
    /// The rule producing this cell's value (None until assigned).
    formula: Option<Formula>,

    /// Last stored value, possibly NaN.
    value: Option<f64>,

    /// Set while the formula is running; re-entry means a cycle.
    in_progress: bool,

    /// Number of times the formula has been invoked.
    invocations: u64,
}

impl AttributeCell {
    /// Create a cell with no formula and no value.
    pub fn unresolved() -> Self {
        Self::default()
    }

    /// Create a cell already resolved to a literal.
    pub fn literal(value: f64) -> Self {
        let mut cell = Self::default();
        cell.set_formula(Formula::Literal(value));
        cell
    }

    /// Get the cell's formula.
    pub fn formula(&self) -> Option<Formula> {
        self.formula
    }

    /// Install a formula, discarding any memoized value.
    ///
    /// A literal resolves the cell immediately.
    pub fn set_formula(&mut self, formula: Formula) {
        self.value = match formula {
            Formula::Literal(v) => Some(v),
            _ => None,
        };
        self.formula = Some(formula);
    }

    /// The raw stored value, NaN included.
    pub fn cached_value(&self) -> Option<f64> {
        self.value
    }

    /// The value to return without invoking the formula, if any.
    pub fn lookup(&self, policy: NanPolicy) -> Option<f64> {
        match (self.value, policy) {
            (Some(v), _) if !v.is_nan() => Some(v),
            (Some(v), NanPolicy::Memoize) => Some(v),
            _ => None,
        }
    }

    /// Check if the formula is currently running.
    pub fn is_in_progress(&self) -> bool {
        self.in_progress
    }

    /// How many times the formula has been invoked.
    pub fn invocations(&self) -> u64 {
        self.invocations
    }

    /// Mark the start of a formula invocation.
    pub(crate) fn begin(&mut self) {
        self.in_progress = true;
        self.invocations += 1;
    }

    /// Store a result and clear the in-progress flag.
    pub(crate) fn finish(&mut self, value: f64) {
        self.in_progress = false;
        self.value = Some(value);
    }

    /// Clear the in-progress flag after a failed invocation.
    pub(crate) fn abort(&mut self) {
        self.in_progress = false;
    }

    /// Forget computed values so the cell evaluates again.
    ///
    /// Literals stay resolved.
    pub fn reset(&mut self) {
        self.in_progress = false;
        self.invocations = 0;
        if let Some(formula) = self.formula {
            self.set_formula(formula);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeId;

    #[test]
    fn literal_cell_is_resolved() {
        let cell = AttributeCell::literal(2.5);
        assert_eq!(cell.lookup(NanPolicy::Reevaluate), Some(2.5));
        assert_eq!(cell.invocations(), 0);
    }

    #[test]
    fn nan_is_not_a_cache_hit_by_default() {
        let mut cell = AttributeCell::unresolved();
        cell.set_formula(Formula::MinIncoming(NodeId::from(0)));
        cell.begin();
        cell.finish(f64::NAN);

        assert!(cell.cached_value().is_some_and(f64::is_nan));
        assert_eq!(cell.lookup(NanPolicy::Reevaluate), None);
        assert!(cell.lookup(NanPolicy::Memoize).is_some_and(f64::is_nan));
    }

    #[test]
    fn in_progress_tracks_begin_and_finish() {
        let mut cell = AttributeCell::unresolved();
        cell.set_formula(Formula::CopyNode(NodeId::from(1)));

        cell.begin();
        assert!(cell.is_in_progress());
        assert_eq!(cell.invocations(), 1);

        cell.finish(4.0);
        assert!(!cell.is_in_progress());
        assert_eq!(cell.lookup(NanPolicy::Reevaluate), Some(4.0));
    }

    #[test]
    fn reset_keeps_literals_and_drops_results() {
        let mut literal = AttributeCell::literal(1.0);
        literal.reset();
        assert_eq!(literal.cached_value(), Some(1.0));

        let mut derived = AttributeCell::unresolved();
        derived.set_formula(Formula::CopyNode(NodeId::from(0)));
        derived.begin();
        derived.finish(3.0);
        derived.reset();
        assert_eq!(derived.cached_value(), None);
        assert_eq!(derived.invocations(), 0);
    }
}
