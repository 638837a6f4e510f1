use thiserror::Error;

/// Failures of the rewrite pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// A construct survived rewriting that the lambda calculus cannot express.
    #[error("too complex: {reason}: {term}")]
    TooComplex { term: String, reason: String },

    #[error("clauses of `{name}` disagree on arity: expected {expected} patterns, found {found}")]
    ClauseArityMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    /// A name without arguments defined by more than one clause.
    #[error("`{name}` is defined {clauses} times")]
    DuplicateDefinition { name: String, clauses: usize },
}

impl PipelineError {
    pub fn too_complex(term: impl ToString, reason: impl Into<String>) -> Self {
        PipelineError::TooComplex {
            term: term.to_string(),
            reason: reason.into(),
        }
    }
}

/// Failures of the bounded reducer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReductionError {
    #[error("reduction did not finish within {limit} steps")]
    StepLimitExceeded { limit: usize },
}
