//! # Lambda Terms
//!
//! The target of the pipeline: untyped lambda calculus whose constants are
//! literals, data constructors and primitive operators.
//!
//! ```text
//! t ::= x | \x -> t | t t | c
//! ```
//!
//! ## Substitution
//!
//! [`Term::substitute`] is capture avoiding. When the replacement mentions the
//! binder of an abstraction, the binder is renamed first:
//!
//! ```text
//! (\y -> x)[x := y]   =   \y0 -> y
//! ```
//!
//! The new binder keeps the old name's alphabetic stem and gets the smallest
//! numeric suffix not free in the replacement or the body.
//!
//! ## Spines
//!
//! A chain of applications `((h a1) a2) a3` is viewed as its head `h` and the
//! argument list `[a1, a2, a3]`. Delta rules dispatch on the head of the root
//! spine.

use std::collections::BTreeSet;

use crate::ast::Literal;
use crate::primitive::Primitive;

pub mod cast;
pub mod reduce;

/// Values a constant term can wrap.
#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    Literal(Literal),
    Constructor(String),
    Primitive(Primitive),
}

impl Constant {
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Constant::Literal(literal) => Some(literal),
            _ => None,
        }
    }

    pub fn as_primitive(&self) -> Option<&Primitive> {
        match self {
            Constant::Primitive(primitive) => Some(primitive),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    Variable(String),
    Abstraction(String, Box<Term>),
    Application(Box<Term>, Box<Term>),
    Constant(Constant),
}

impl Term {
    pub fn var(name: impl Into<String>) -> Self {
        Term::Variable(name.into())
    }

    pub fn abs(param: impl Into<String>, body: Term) -> Self {
        Term::Abstraction(param.into(), Box::new(body))
    }

    pub fn app(func: Term, arg: Term) -> Self {
        Term::Application(Box::new(func), Box::new(arg))
    }

    /// `head a1 ... an`, left associated.
    pub fn apply_all(head: Term, args: impl IntoIterator<Item = Term>) -> Self {
        args.into_iter().fold(head, Term::app)
    }

    pub fn constant(constant: Constant) -> Self {
        Term::Constant(constant)
    }

    pub fn literal(literal: Literal) -> Self {
        Term::Constant(Constant::Literal(literal))
    }

    pub fn int(value: i64) -> Self {
        Term::literal(Literal::Int(value))
    }

    pub fn float(value: f64) -> Self {
        Term::literal(Literal::Float(value))
    }

    pub fn char(value: char) -> Self {
        Term::literal(Literal::Char(value))
    }

    pub fn bool(value: bool) -> Self {
        Term::literal(Literal::Bool(value))
    }

    pub fn primitive(primitive: Primitive) -> Self {
        Term::Constant(Constant::Primitive(primitive))
    }

    pub fn constructor(name: impl Into<String>) -> Self {
        Term::Constant(Constant::Constructor(name.into()))
    }

    pub fn as_constant(&self) -> Option<&Constant> {
        match self {
            Term::Constant(constant) => Some(constant),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        self.as_constant().and_then(Constant::as_literal)
    }

    pub fn free_vars(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        self.collect_free(&mut Vec::new(), &mut out);
        out
    }

    fn collect_free<'a>(&'a self, bound: &mut Vec<&'a str>, out: &mut BTreeSet<String>) {
        match self {
            Term::Variable(name) => {
                if !bound.contains(&name.as_str()) {
                    out.insert(name.clone());
                }
            }
            Term::Abstraction(param, body) => {
                bound.push(param);
                body.collect_free(bound, out);
                bound.pop();
            }
            Term::Application(func, arg) => {
                func.collect_free(bound, out);
                arg.collect_free(bound, out);
            }
            Term::Constant(_) => {}
        }
    }

    pub fn is_closed(&self) -> bool {
        self.free_vars().is_empty()
    }

    /// `self[var := replacement]`, renaming binders that would capture.
    pub fn substitute(&self, var: &str, replacement: &Term) -> Term {
        let replacement_free = replacement.free_vars();
        self.substitute_with(var, replacement, &replacement_free)
    }

    fn substitute_with(
        &self,
        var: &str,
        replacement: &Term,
        replacement_free: &BTreeSet<String>,
    ) -> Term {
        match self {
            Term::Variable(name) if name == var => replacement.clone(),
            Term::Variable(_) | Term::Constant(_) => self.clone(),
            Term::Application(func, arg) => Term::app(
                func.substitute_with(var, replacement, replacement_free),
                arg.substitute_with(var, replacement, replacement_free),
            ),
            Term::Abstraction(param, _) if param == var => self.clone(),
            Term::Abstraction(param, body) if !replacement_free.contains(param) => Term::abs(
                param.clone(),
                body.substitute_with(var, replacement, replacement_free),
            ),
            Term::Abstraction(param, body) => {
                let mut avoid = body.free_vars();
                avoid.extend(replacement_free.iter().cloned());
                avoid.insert(var.to_string());
                let renamed = fresh_name(param, &avoid);
                let body = body.substitute(param, &Term::Variable(renamed.clone()));
                Term::abs(
                    renamed,
                    body.substitute_with(var, replacement, replacement_free),
                )
            }
        }
    }

    /// Head and arguments of the application chain rooted here.
    pub fn spine(&self) -> (&Term, Vec<&Term>) {
        let mut args = Vec::new();
        let mut head = self;
        while let Term::Application(func, arg) = head {
            args.push(arg.as_ref());
            head = func.as_ref();
        }
        args.reverse();
        (head, args)
    }

    pub fn into_spine(self) -> (Term, Vec<Term>) {
        let mut args = Vec::new();
        let mut head = self;
        loop {
            match head {
                Term::Application(func, arg) => {
                    args.push(*arg);
                    head = *func;
                }
                other => {
                    args.reverse();
                    return (other, args);
                }
            }
        }
    }
}

fn fresh_name(base: &str, avoid: &BTreeSet<String>) -> String {
    let stem = base.trim_end_matches(|c: char| c.is_ascii_digit());
    let stem = if stem.is_empty() { "v" } else { stem };
    (0..)
        .map(|i| format!("{stem}{i}"))
        .find(|candidate| !avoid.contains(candidate))
        .unwrap_or_else(|| format!("{stem}'"))
}
