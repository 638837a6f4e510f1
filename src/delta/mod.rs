//! # Delta Rules
//!
//! Delta rules give primitive constants their meaning. The reducer looks at the
//! head of the root spine; if it is a constant, every registered rule that
//! accepts that constant is tried in registration order with the first
//! `arity` arguments of the spine.
//!
//! A rule answers with a [`DeltaOutcome`]:
//!
//! - `Reduced(t)`: the head and its consumed arguments are replaced by `t`
//! - `Declined`: this rule does not apply, the next one is tried
//! - `NeedsArgument(i)`: the rule is strict in argument `i`, which is not a
//!   value yet; the reducer steps that argument in place
//!
//! ## Rule families
//!
//! | Rule | Constants | Arity |
//! |------|-----------|-------|
//! | [`BinaryOperators`] | `plus`, `eq`, `and`, ... | 2 |
//! | [`UnaryOperators`] | `not`, `negate` | 1 |
//! | [`Branch`] | `if` | 1 |
//! | [`Fixpoint`] | `fix` | 1 |
//! | [`TupleIntrospection`] | `isa_<n>-tuple`, `sel_<n>_<i>` | 1 |
//! | [`ConstructorIntrospection`] | `isa_constr_<C>`, `argof_<C>` | 1 |
//! | [`LiteralDiscriminators`] | `isa_int_<v>`, `isa_char_<c>`, ... | 1 |
//!
//! `bot` has no rule: a failed pattern match stays visible as `bot`.

use std::fmt;

use crate::ast::Literal;
use crate::lambda::{Constant, Term};
use crate::primitive::Primitive;

mod arith;
mod control;
mod introspect;

pub use arith::{BinaryOperators, UnaryOperators};
pub use control::{Branch, Fixpoint};
pub use introspect::{ConstructorIntrospection, LiteralDiscriminators, TupleIntrospection};

#[derive(Debug, Clone, PartialEq)]
pub enum DeltaOutcome {
    Reduced(Term),
    Declined,
    NeedsArgument(usize),
}

pub trait DeltaRule {
    fn name(&self) -> &'static str;

    /// Number of spine arguments the rule consumes.
    fn arity(&self) -> usize;

    fn accepts(&self, head: &Constant) -> bool;

    /// Whether every consumed argument must be closed before `apply` is called.
    fn requires_closed_arguments(&self) -> bool {
        true
    }

    fn apply(&self, head: &Constant, args: &[&Term]) -> DeltaOutcome;
}

/// An ordered set of delta rules.
#[derive(Default)]
pub struct DeltaRules {
    rules: Vec<Box<dyn DeltaRule>>,
}

impl DeltaRules {
    pub fn new() -> Self {
        DeltaRules::default()
    }

    /// Every rule family this crate ships.
    pub fn standard() -> Self {
        DeltaRules::new()
            .with(BinaryOperators)
            .with(UnaryOperators)
            .with(Branch)
            .with(Fixpoint)
            .with(TupleIntrospection)
            .with(ConstructorIntrospection)
            .with(LiteralDiscriminators)
    }

    pub fn with(mut self, rule: impl DeltaRule + 'static) -> Self {
        self.register(rule);
        self
    }

    pub fn register(&mut self, rule: impl DeltaRule + 'static) {
        self.rules.push(Box::new(rule));
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn DeltaRule> {
        self.rules.iter().map(|rule| rule.as_ref())
    }

    /// Rules accepting `head`, in registration order.
    pub fn for_head<'a>(&'a self, head: &'a Constant) -> impl Iterator<Item = &'a dyn DeltaRule> {
        self.iter().filter(move |rule| rule.accepts(head))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Debug for DeltaRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.rules.iter().map(|rule| rule.name()))
            .finish()
    }
}

/// How far an argument has been evaluated, as far as a strict rule cares.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape<'a> {
    Literal(&'a Literal),
    /// A saturated `tuple_<n>` application.
    Tuple(usize, Vec<&'a Term>),
    /// A data constructor applied to its fields.
    Data(&'a str, Vec<&'a Term>),
    /// An abstraction or an unsaturated primitive.
    Function,
    /// Anything that may still reduce, or is stuck.
    Pending,
}

pub fn shape(term: &Term) -> Shape<'_> {
    if let Term::Abstraction(..) = term {
        return Shape::Function;
    }
    let (head, args) = term.spine();
    let Term::Constant(constant) = head else {
        return Shape::Pending;
    };
    match constant {
        Constant::Literal(literal) if args.is_empty() => Shape::Literal(literal),
        Constant::Literal(_) => Shape::Pending,
        Constant::Constructor(name) => Shape::Data(name, args),
        Constant::Primitive(Primitive::Tuple(arity)) => {
            if args.len() == *arity {
                Shape::Tuple(*arity, args)
            } else if args.len() < *arity {
                Shape::Function
            } else {
                Shape::Pending
            }
        }
        Constant::Primitive(primitive) => match primitive.arity() {
            Some(arity) if args.len() < arity => Shape::Function,
            _ => Shape::Pending,
        },
    }
}

/// The literal value of argument `index`, or the outcome to report instead.
pub(crate) fn literal_argument<'a>(
    args: &[&'a Term],
    index: usize,
) -> Result<&'a Literal, DeltaOutcome> {
    let Some(arg) = args.get(index) else {
        return Err(DeltaOutcome::Declined);
    };
    match shape(arg) {
        Shape::Literal(literal) => Ok(literal),
        Shape::Pending => Err(DeltaOutcome::NeedsArgument(index)),
        _ => Err(DeltaOutcome::Declined),
    }
}
