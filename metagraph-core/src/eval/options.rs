//! Evaluation options.

/// What a NaN result means for the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NanPolicy {
    /// NaN doubles as "not computed yet": the formula runs again on every
    /// read.
    #[default]
    Reevaluate,

    /// NaN is cached like any other value.
    Memoize,
}

/// Knobs for an [`Evaluator`](super::Evaluator) run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalOptions {
    pub nan_policy: NanPolicy,

    /// Fail with `CyclicDependency` instead of recursing forever.
    pub detect_cycles: bool,
}

impl EvalOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_nan_policy(mut self, nan_policy: NanPolicy) -> Self {
        self.nan_policy = nan_policy;
        self
    }

    pub fn with_cycle_detection(mut self, detect_cycles: bool) -> Self {
        self.detect_cycles = detect_cycles;
        self
    }
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self {
            nan_policy: NanPolicy::Reevaluate,
            detect_cycles: true,
        }
    }
}
