//! # Patterns
//!
//! Patterns appear in function clauses, lambda parameters, `case` arms and
//! pattern declarations.
//!
//! - **Variable** patterns bind the matched value (`x`)
//! - **Wildcard** patterns match anything and bind nothing (`_`)
//! - **Literal** patterns match by equality (`0`, `'a'`, `true`)
//! - **Tuple** patterns destructure tuples (`(x, _, 3)`)
//! - **Constructor** patterns destructure data values (`Cons x xs`)
//!
//! ```text
//! len Nil         = 0
//! len (Cons _ xs) = plus 1 (len xs)
//! ```
//!
//! After clause fusion the two clauses above are matched as the tuple patterns
//! `(Nil)` and `(Cons _ xs)` against the tuple of fresh argument variables.

use super::{Ident, Literal};

#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    Variable(Ident),
    Wildcard,
    Literal(Literal),
    Tuple(Vec<Pattern>),
    Constructor(ConstructorPattern),
}

/// A data constructor applied to sub-patterns, `C p1 ... pn`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorPattern {
    pub name: Ident,
    pub args: Vec<Pattern>,
}

impl Pattern {
    pub fn var(name: impl Into<String>) -> Self {
        Pattern::Variable(Ident::new(name))
    }

    pub fn int(value: i64) -> Self {
        Pattern::Literal(Literal::Int(value))
    }

    pub fn char(value: char) -> Self {
        Pattern::Literal(Literal::Char(value))
    }

    pub fn bool(value: bool) -> Self {
        Pattern::Literal(Literal::Bool(value))
    }

    pub fn float(value: f64) -> Self {
        Pattern::Literal(Literal::Float(value))
    }

    pub fn tuple(elements: Vec<Pattern>) -> Self {
        Pattern::Tuple(elements)
    }

    pub fn constructor(name: impl Into<String>, args: Vec<Pattern>) -> Self {
        Pattern::Constructor(ConstructorPattern {
            name: Ident::new(name),
            args,
        })
    }

    pub fn as_variable(&self) -> Option<&Ident> {
        match self {
            Pattern::Variable(ident) => Some(ident),
            _ => None,
        }
    }

    /// Variables bound by this pattern, left to right.
    pub fn bound_variables(&self) -> Vec<Ident> {
        let mut out = Vec::new();
        self.collect_bound(&mut out);
        out
    }

    fn collect_bound(&self, out: &mut Vec<Ident>) {
        match self {
            Pattern::Variable(ident) => out.push(ident.clone()),
            Pattern::Wildcard | Pattern::Literal(_) => {}
            Pattern::Tuple(elements) => elements.iter().for_each(|p| p.collect_bound(out)),
            Pattern::Constructor(constructor) => {
                constructor.args.iter().for_each(|p| p.collect_bound(out))
            }
        }
    }

    pub fn binds(&self, name: &str) -> bool {
        match self {
            Pattern::Variable(ident) => ident.value == name,
            Pattern::Wildcard | Pattern::Literal(_) => false,
            Pattern::Tuple(elements) => elements.iter().any(|p| p.binds(name)),
            Pattern::Constructor(constructor) => constructor.args.iter().any(|p| p.binds(name)),
        }
    }

    /// Patterns built only from variables, wildcards and tuples.
    ///
    /// These can be bound lazily by projecting components, which is how
    /// tuple-pattern `let` bindings are flattened.
    pub fn is_irrefutable(&self) -> bool {
        match self {
            Pattern::Variable(_) | Pattern::Wildcard => true,
            Pattern::Tuple(elements) => elements.iter().all(Pattern::is_irrefutable),
            Pattern::Literal(_) | Pattern::Constructor(_) => false,
        }
    }
}
