use super::{literal_argument, DeltaOutcome, DeltaRule};
use crate::ast::Literal;
use crate::lambda::{Constant, Term};
use crate::primitive::Primitive;

/// `if c` reduces to a selector over the two branches that follow it:
///
/// ```text
/// if true  ==>  \x y -> x
/// if false ==>  \x y -> y
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Branch;

/// `fix t ==> t (fix t)`. The argument is never inspected, so it may be open.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fixpoint;

pub fn select_first() -> Term {
    Term::abs("x", Term::abs("y", Term::var("x")))
}

pub fn select_second() -> Term {
    Term::abs("x", Term::abs("y", Term::var("y")))
}

impl DeltaRule for Branch {
    fn name(&self) -> &'static str {
        "branch"
    }

    fn arity(&self) -> usize {
        1
    }

    fn accepts(&self, head: &Constant) -> bool {
        matches!(head, Constant::Primitive(Primitive::If))
    }

    fn apply(&self, _head: &Constant, args: &[&Term]) -> DeltaOutcome {
        match literal_argument(args, 0) {
            Ok(Literal::Bool(true)) => DeltaOutcome::Reduced(select_first()),
            Ok(Literal::Bool(false)) => DeltaOutcome::Reduced(select_second()),
            Ok(_) => DeltaOutcome::Declined,
            Err(outcome) => outcome,
        }
    }
}

impl DeltaRule for Fixpoint {
    fn name(&self) -> &'static str {
        "fixpoint"
    }

    fn arity(&self) -> usize {
        1
    }

    fn accepts(&self, head: &Constant) -> bool {
        matches!(head, Constant::Primitive(Primitive::Fix))
    }

    fn requires_closed_arguments(&self) -> bool {
        false
    }

    fn apply(&self, _head: &Constant, args: &[&Term]) -> DeltaOutcome {
        let Some(&function) = args.first() else {
            return DeltaOutcome::Declined;
        };
        let unfolded = Term::app(Term::primitive(Primitive::Fix), function.clone());
        DeltaOutcome::Reduced(Term::app(function.clone(), unfolded))
    }
}
