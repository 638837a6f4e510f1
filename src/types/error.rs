//! # Type Error Definitions
//!
//! Errors of the type checking phase. They arise when:
//!
//! - a data declaration conflicts with the registry (`InconsistentDataDeclaration`)
//! - a constant has no resolvable type (`TypeNotFound`)
//! - two types cannot be unified (`CannotUnify`)
//! - a malformed selector admits no type at all (`IncorrectlyTyped`)
//!
//! ## Related Modules
//!
//! - [`crate::types::registry`] - Registration errors
//! - [`crate::types::infer`] - Type inference that produces these errors
//! - [`crate::types::unify`] - Unification errors converted to `TypeError`

use thiserror::Error;

use super::ty::Type;
use super::unify::UnifyError;

/// Type error encountered while registering data declarations or inferring
/// the type of a lambda term.
///
/// # Example Error Messages
///
/// ```text
/// Type error: inconsistent data declaration `List`: constructor `Nil` already belongs to `Maybe`
/// Type error: no type for constant `Cons`
/// Type error: cannot unify Int with Char (argument of `plus 'a'`)
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// A data declaration was rejected by the registry.
    #[error("Type error: inconsistent data declaration `{name}`: {reason}")]
    InconsistentDataDeclaration { name: String, reason: String },

    /// A constant whose type cannot be looked up, e.g. a constructor no
    /// registered declaration owns.
    #[error("Type error: no type for constant `{constant}`")]
    TypeNotFound { constant: String },

    /// Two types are structurally incompatible, or a variable would have to
    /// contain itself. In the latter case `expected` is the variable.
    #[error("Type error: cannot unify {expected} with {found} ({context})")]
    CannotUnify {
        expected: Type,
        found: Type,
        /// The term whose typing demanded the unification.
        context: String,
    },

    /// A constant with no sound type at all, such as a selector whose index
    /// lies outside its tuple (`sel_2_3`).
    #[error("Type error: `{term}` is incorrectly typed: {reason}")]
    IncorrectlyTyped { term: String, reason: String },
}

impl TypeError {
    pub fn inconsistent(name: impl Into<String>, reason: impl Into<String>) -> Self {
        TypeError::InconsistentDataDeclaration {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn not_found(constant: impl ToString) -> Self {
        TypeError::TypeNotFound {
            constant: constant.to_string(),
        }
    }

    pub fn incorrectly_typed(term: impl ToString, reason: impl Into<String>) -> Self {
        TypeError::IncorrectlyTyped {
            term: term.to_string(),
            reason: reason.into(),
        }
    }

    /// Convert a unification error to a type error.
    ///
    /// Both mismatches and occurs-check failures become `CannotUnify`; the
    /// `context` names the term being typed.
    pub fn from_unify_error(err: UnifyError, context: impl Into<String>) -> Self {
        let context = context.into();
        match err {
            UnifyError::Mismatch { expected, found } => TypeError::CannotUnify {
                expected,
                found,
                context,
            },
            UnifyError::OccursCheck { var, ty } => TypeError::CannotUnify {
                expected: Type::Var(var),
                found: ty,
                context,
            },
        }
    }
}
