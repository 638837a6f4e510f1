//! Options for the rewrite pipeline and the reducer.

/// Whether clause fusion validates that every clause of a function has the
/// same number of argument patterns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ArityCheck {
    /// Fail with `ClauseArityMismatch` on the first clause that differs.
    #[default]
    Validate,
    /// Fuse anyway; the resulting `case` gets tuple patterns of different sizes.
    Unchecked,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PipelineOptions {
    pub arity_check: ArityCheck,
    /// Bind a non-trivial match fall-through that is needed in several places
    /// to a fresh variable instead of copying it.
    pub share_fallthrough: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        PipelineOptions {
            arity_check: ArityCheck::Validate,
            share_fallthrough: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ReductionMode {
    /// Stop once no step applies at the root.
    #[default]
    WeakHead,
    /// Afterwards reduce every argument of the head spine as well.
    Normal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ReductionOptions {
    pub mode: ReductionMode,
    /// Maximum number of steps; `None` runs until no step applies.
    pub step_limit: Option<usize>,
}

impl ReductionOptions {
    pub fn normal() -> Self {
        ReductionOptions {
            mode: ReductionMode::Normal,
            step_limit: None,
        }
    }

    pub fn with_step_limit(mut self, limit: usize) -> Self {
        self.step_limit = Some(limit);
        self
    }
}
