//! Desugaring - rewrite surface programs until they fit the core language
//!
//! The rewrites run in four passes, each to its own fixpoint:
//!
//! 1. clause fusion: multi-clause functions become lambdas over a `case`
//! 2. elaboration: currying, pattern lambdas, case elimination and
//!    irrefutable `let` patterns
//! 3. group nesting: `let` blocks become chains of single bindings
//! 4. reelaboration: pass 2 again, for the tuple bindings pass 3 introduced
//!
//! The result is lowered to [`CoreExpr`] and cast to a lambda [`Term`].

pub mod case;
pub mod clauses;
pub mod deps;
pub mod lambda;
pub mod let_tuple;
pub mod nesting;
pub mod rewrite;

use crate::ast::{DataDeclaration, Expression, Program};
use crate::config::PipelineOptions;
use crate::core::{lower, CoreExpr};
use crate::delta::DeltaRules;
use crate::error::PipelineError;
use crate::lambda::cast::cast;
use crate::lambda::reduce::whno_reduce;
use crate::lambda::Term;
use crate::names::VariableManager;
use crate::trace::{Pass, PassObserver, Silent};

pub use case::CaseElimination;
pub use clauses::ClauseFusion;
pub use deps::DependencyGraph;
pub use lambda::{Currying, PatternLambda};
pub use let_tuple::LetTupleFlattening;
pub use nesting::GroupNesting;
pub use rewrite::{Rewrite, RewriteContext};

/// Output of the pipeline, before any reduction.
#[derive(Debug, Clone, PartialEq)]
pub struct Desugared {
    pub term: Term,
    pub core: CoreExpr,
    /// Top-level data declarations, for the type checker.
    pub data_declarations: Vec<DataDeclaration>,
}

/// The rewrite pipeline from surface programs to lambda terms.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pipeline {
    pub options: PipelineOptions,
}

impl Pipeline {
    pub fn new(options: PipelineOptions) -> Self {
        Pipeline { options }
    }

    pub fn run(&self, program: &Program, expr: &Expression) -> Result<Desugared, PipelineError> {
        self.run_observed(program, expr, &mut Silent)
    }

    /// Runs every pass on `let <program> in <expr>`, then lowers and casts.
    pub fn run_observed(
        &self,
        program: &Program,
        expr: &Expression,
        observer: &mut dyn PassObserver,
    ) -> Result<Desugared, PipelineError> {
        let mut ctx = RewriteContext::new(VariableManager::scan(program, expr), self.options);

        let (data_declarations, declarations) = program.clone().partition();
        let mut tree = if declarations.is_empty() {
            expr.clone()
        } else {
            Expression::let_in(declarations, expr.clone())
        };

        for pass in Pass::ALL {
            observer.pass_started(pass);
            rewrite::run_to_fixpoint(rules(pass), &mut tree, &mut ctx, observer)?;
            observer.pass_finished(pass, &tree);
        }

        let core = lower(&tree)?;
        let term = cast(&core);
        Ok(Desugared {
            term,
            core,
            data_declarations,
        })
    }
}

/// The rules of a pass, in the order one full pass tries them.
fn rules(pass: Pass) -> &'static [&'static dyn Rewrite] {
    match pass {
        Pass::ClauseFusion => &[&ClauseFusion],
        Pass::Elaboration | Pass::Reelaboration => {
            &[&Currying, &PatternLambda, &CaseElimination, &LetTupleFlattening]
        }
        Pass::GroupNesting => &[&GroupNesting],
    }
}

/// Desugars `expr` in the context of `program` and reduces the result to weak
/// head normal form with the standard delta rules.
///
/// Reduction is unbounded; use [`Pipeline::run`] and a bounded
/// [`Reducer`](crate::lambda::reduce::Reducer) for programs that may diverge.
pub fn reduce_program_and_expression(
    program: &Program,
    expr: &Expression,
) -> Result<Term, PipelineError> {
    let desugared = Pipeline::default().run(program, expr)?;
    Ok(whno_reduce(desugared.term, &DeltaRules::standard()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Declaration, Pattern};
    use crate::trace::PassLog;

    fn program() -> Program {
        Program::new(vec![
            Declaration::function(
                "square",
                vec![Pattern::var("x")],
                Expression::apply(
                    Expression::var("mult"),
                    vec![Expression::var("x"), Expression::var("x")],
                ),
            ),
            Declaration::function(
                "fst",
                vec![Pattern::tuple(vec![Pattern::var("a"), Pattern::Wildcard])],
                Expression::var("a"),
            ),
        ])
    }

    #[test]
    fn test_every_pass_is_observed() {
        let mut log = PassLog::new();
        let expr = Expression::apply(Expression::var("square"), vec![Expression::int(3)]);
        Pipeline::default()
            .run_observed(&program(), &expr, &mut log)
            .unwrap();

        assert_eq!(log.snapshots.len(), 4);
        assert_eq!(log.count("clause-fusion"), 2);
        assert!(log.count("case-elimination") >= 2);
        let after_nesting = log.snapshot(Pass::GroupNesting).unwrap();
        assert!(!after_nesting.contains("case"));
    }

    #[test]
    fn test_elaboration_is_idempotent() {
        let mut tree = Expression::lambda(
            vec![
                Pattern::tuple(vec![Pattern::var("a"), Pattern::var("b")]),
                Pattern::int(0),
            ],
            Expression::var("a"),
        );
        let mut ctx = RewriteContext::new(VariableManager::new(), PipelineOptions::default());
        rewrite::run_to_fixpoint(rules(Pass::Elaboration), &mut tree, &mut ctx, &mut Silent)
            .unwrap();

        let settled = tree.clone();
        for rule in rules(Pass::Elaboration) {
            assert_eq!(rewrite::rewrite_first(*rule, &mut tree, &mut ctx), Ok(false));
        }
        assert_eq!(tree, settled);
        assert!(lower(&tree).is_ok());
    }

    #[test]
    fn test_tuple_argument_pattern() {
        let expr = Expression::apply(
            Expression::var("fst"),
            vec![Expression::tuple(vec![Expression::int(4), Expression::int(5)])],
        );
        assert_eq!(
            reduce_program_and_expression(&program(), &expr),
            Ok(Term::int(4))
        );
    }

    #[test]
    fn test_reduces_square() {
        let expr = Expression::apply(Expression::var("square"), vec![Expression::int(7)]);
        assert_eq!(
            reduce_program_and_expression(&program(), &expr),
            Ok(Term::int(49))
        );
    }

    #[test]
    fn test_empty_program_is_just_the_expression() {
        let expr = Expression::apply(
            Expression::var("plus"),
            vec![Expression::int(1), Expression::int(2)],
        );
        let desugared = Pipeline::default().run(&Program::default(), &expr).unwrap();
        assert_eq!(desugared.core.to_string(), "plus 1 2");
        assert!(desugared.data_declarations.is_empty());
    }
}
