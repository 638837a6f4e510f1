//! # Weak Head Normal Order Reduction
//!
//! One step is either
//!
//! 1. a **beta** step on the leftmost outermost redex, searching the function
//!    position before the argument position and never entering an abstraction,
//!    or, when there is none,
//! 2. a **delta** step at the root spine: the first rule that accepts the head
//!    constant and does not decline rewrites the head and its first `arity`
//!    arguments. Remaining arguments are re-applied to the result.
//!
//! A rule answering `NeedsArgument(i)` makes the reducer step argument `i` in
//! place instead. If that argument cannot step either, the rule counts as
//! declined.
//!
//! ```text
//! mult (fix f 2) 3
//!   → mult (f (fix f) 2) 3       fix unfolds inside the forced operand
//! ```
//!
//! The plain driver has no fuel: `fix (\x -> x)` loops forever. [`Reducer`]
//! takes a step limit for callers that need a bound.

use super::Term;
use crate::config::{ReductionMode, ReductionOptions};
use crate::delta::{DeltaOutcome, DeltaRules};
use crate::error::ReductionError;

/// A single beta step, if any redex exists outside of abstractions.
pub fn beta_step(term: &Term) -> Option<Term> {
    match term {
        Term::Application(func, arg) => {
            if let Term::Abstraction(param, body) = func.as_ref() {
                return Some(body.substitute(param, arg));
            }
            if let Some(func) = beta_step(func) {
                return Some(Term::Application(Box::new(func), arg.clone()));
            }
            beta_step(arg).map(|arg| Term::Application(func.clone(), Box::new(arg)))
        }
        Term::Variable(_) | Term::Abstraction(..) | Term::Constant(_) => None,
    }
}

/// The result of a bounded reduction.
#[derive(Debug, Clone, PartialEq)]
pub struct Reduction {
    pub term: Term,
    pub steps: usize,
}

pub struct Reducer {
    rules: DeltaRules,
    options: ReductionOptions,
}

impl Reducer {
    pub fn new(rules: DeltaRules, options: ReductionOptions) -> Self {
        Reducer { rules, options }
    }

    /// The standard rules, weak head mode, no step limit.
    pub fn standard() -> Self {
        Reducer::new(DeltaRules::standard(), ReductionOptions::default())
    }

    pub fn step(&self, term: &Term) -> Option<Term> {
        step_with(term, &self.rules)
    }

    pub fn reduce(&self, term: Term) -> Result<Reduction, ReductionError> {
        let mut steps = 0;
        let term = self.reduce_counted(term, &mut steps)?;
        Ok(Reduction { term, steps })
    }

    fn reduce_counted(&self, mut term: Term, steps: &mut usize) -> Result<Term, ReductionError> {
        while let Some(next) = self.step(&term) {
            *steps += 1;
            if let Some(limit) = self.options.step_limit {
                if *steps > limit {
                    return Err(ReductionError::StepLimitExceeded { limit });
                }
            }
            term = next;
        }
        match self.options.mode {
            ReductionMode::WeakHead => Ok(term),
            ReductionMode::Normal => {
                let (head, args) = term.into_spine();
                let args = args
                    .into_iter()
                    .map(|arg| self.reduce_counted(arg, steps))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Term::apply_all(head, args))
            }
        }
    }
}

impl Default for Reducer {
    fn default() -> Self {
        Reducer::standard()
    }
}

fn step_with(term: &Term, rules: &DeltaRules) -> Option<Term> {
    beta_step(term).or_else(|| delta_step(term, rules))
}

fn delta_step(term: &Term, rules: &DeltaRules) -> Option<Term> {
    let (head, args) = term.spine();
    let Term::Constant(constant) = head else {
        return None;
    };
    for rule in rules.for_head(constant) {
        let arity = rule.arity();
        if args.len() < arity {
            continue;
        }
        let (consumed, rest) = args.split_at(arity);
        if rule.requires_closed_arguments() && !consumed.iter().all(|arg| arg.is_closed()) {
            continue;
        }
        match rule.apply(constant, consumed) {
            DeltaOutcome::Reduced(result) => {
                return Some(Term::apply_all(result, rest.iter().map(|arg| (*arg).clone())));
            }
            DeltaOutcome::Declined => {}
            DeltaOutcome::NeedsArgument(index) => {
                let Some(forced) = consumed.get(index).and_then(|arg| step_with(arg, rules)) else {
                    continue;
                };
                let args = args.iter().enumerate().map(|(i, arg)| {
                    if i == index {
                        forced.clone()
                    } else {
                        (*arg).clone()
                    }
                });
                return Some(Term::apply_all(head.clone(), args));
            }
        }
    }
    None
}

/// One reduction step, or `None` in weak head normal form.
pub fn whno_step(term: &Term, rules: &DeltaRules) -> Option<Term> {
    step_with(term, rules)
}

/// Steps until no beta or delta step applies. Does not terminate on divergent
/// terms.
pub fn whno_reduce(mut term: Term, rules: &DeltaRules) -> Term {
    while let Some(next) = step_with(&term, rules) {
        term = next;
    }
    term
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::{PrimOp, Primitive};

    fn prim(op: PrimOp) -> Term {
        Term::primitive(op.into())
    }

    #[test]
    fn test_beta_step_reduces_root_first() {
        let id = Term::abs("x", Term::var("x"));
        let term = Term::app(id.clone(), Term::app(id.clone(), Term::int(1)));
        assert_eq!(beta_step(&term), Some(Term::app(id, Term::int(1))));
    }

    #[test]
    fn test_beta_step_does_not_enter_abstractions() {
        let term = Term::abs("y", Term::app(Term::abs("x", Term::var("x")), Term::var("y")));
        assert_eq!(beta_step(&term), None);
    }

    #[test]
    fn test_beta_step_searches_argument_after_function() {
        let redex = Term::app(Term::abs("x", Term::var("x")), Term::int(2));
        let term = Term::apply_all(prim(PrimOp::Plus), [Term::int(1), redex]);
        assert_eq!(
            beta_step(&term),
            Some(Term::apply_all(prim(PrimOp::Plus), [Term::int(1), Term::int(2)]))
        );
    }

    #[test]
    fn test_fix_unfolds_exactly_once_per_step() {
        let rules = DeltaRules::standard();
        let term = Term::app(Term::primitive(Primitive::Fix), Term::var("f"));
        let expected = Term::app(
            Term::var("f"),
            Term::app(Term::primitive(Primitive::Fix), Term::var("f")),
        );
        assert_eq!(whno_step(&term, &rules), Some(expected));
    }

    #[test]
    fn test_extra_arguments_are_reapplied() {
        let rules = DeltaRules::standard();
        let term = Term::apply_all(
            Term::primitive(Primitive::If),
            [Term::bool(false), Term::int(1), Term::int(2)],
        );
        assert_eq!(whno_reduce(term, &rules), Term::int(2));
    }

    #[test]
    fn test_strict_operands_are_forced() {
        let rules = DeltaRules::standard();
        let inner = Term::apply_all(prim(PrimOp::Plus), [Term::int(2), Term::int(3)]);
        let term = Term::apply_all(prim(PrimOp::Mult), [inner, Term::int(4)]);
        let first = whno_step(&term, &rules);
        assert_eq!(
            first,
            Some(Term::apply_all(prim(PrimOp::Mult), [Term::int(5), Term::int(4)]))
        );
        assert_eq!(whno_reduce(term, &rules), Term::int(20));
    }

    #[test]
    fn test_open_arguments_block_delta() {
        let rules = DeltaRules::standard();
        let term = Term::apply_all(prim(PrimOp::Plus), [Term::var("x"), Term::int(1)]);
        assert_eq!(whno_step(&term, &rules), None);
    }

    #[test]
    fn test_bot_is_irreducible() {
        let rules = DeltaRules::standard();
        let term = Term::primitive(Primitive::Bot);
        assert_eq!(whno_step(&term, &rules), None);
    }

    #[test]
    fn test_step_limit() {
        let omega = Term::app(Term::primitive(Primitive::Fix), Term::abs("x", Term::var("x")));
        let reducer = Reducer::new(
            DeltaRules::standard(),
            ReductionOptions::default().with_step_limit(50),
        );
        assert_eq!(
            reducer.reduce(omega),
            Err(ReductionError::StepLimitExceeded { limit: 50 })
        );
    }

    #[test]
    fn test_normal_mode_reduces_spine_arguments() {
        let sum = Term::apply_all(prim(PrimOp::Plus), [Term::int(1), Term::int(1)]);
        let pair = Term::apply_all(Term::primitive(Primitive::Tuple(2)), [sum, Term::int(3)]);

        let weak = Reducer::standard().reduce(pair.clone()).map(|r| r.term);
        assert_eq!(weak, Ok(pair.clone()));

        let reducer = Reducer::new(DeltaRules::standard(), ReductionOptions::normal());
        let reduction = reducer.reduce(pair);
        assert_eq!(
            reduction,
            Ok(Reduction {
                term: Term::apply_all(
                    Term::primitive(Primitive::Tuple(2)),
                    [Term::int(2), Term::int(3)]
                ),
                steps: 1,
            })
        );
    }
}
