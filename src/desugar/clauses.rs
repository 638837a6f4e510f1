//! Clause fusion
//!
//! ```text
//! fact 0 = 1                       fact = \x0 -> case (x0) of
//! fact x = mult (fact ...) x  ==>             (0) -> 1
//!                                             (x) -> mult (fact ...) x
//! ```

use super::rewrite::{Rewrite, RewriteContext};
use crate::ast::{Declaration, Expression, FunctionClause, Ident, Pattern};
use crate::config::ArityCheck;
use crate::error::PipelineError;

/// Fuses all clauses of the first function declared in a `let` into one
/// pattern declaration.
pub struct ClauseFusion;

impl Rewrite for ClauseFusion {
    fn name(&self) -> &'static str {
        "clause-fusion"
    }

    fn rewrite(
        &self,
        expr: &mut Expression,
        ctx: &mut RewriteContext,
    ) -> Result<bool, PipelineError> {
        let Expression::Let(let_expr) = expr else {
            return Ok(false);
        };
        let Some((position, name, expected)) =
            let_expr
                .declarations
                .iter()
                .enumerate()
                .find_map(|(index, decl)| match decl {
                    Declaration::Function(clause) => {
                        Some((index, clause.name.clone(), clause.patterns.len()))
                    }
                    _ => None,
                })
        else {
            return Ok(false);
        };

        if ctx.options.arity_check == ArityCheck::Validate {
            let mismatch = clauses_of(&let_expr.declarations, &name)
                .map(|clause| clause.patterns.len())
                .find(|&found| found != expected);
            if let Some(found) = mismatch {
                return Err(PipelineError::ClauseArityMismatch {
                    name: name.value,
                    expected,
                    found,
                });
            }
            let clauses = clauses_of(&let_expr.declarations, &name).count();
            if expected == 0 && clauses > 1 {
                return Err(PipelineError::DuplicateDefinition {
                    name: name.value,
                    clauses,
                });
            }
        }

        // pull the clauses out, remembering where the first one was
        let mut clauses = Vec::new();
        let mut kept = Vec::new();
        for declaration in std::mem::take(&mut let_expr.declarations) {
            match declaration {
                Declaration::Function(clause) if clause.name == name => clauses.push(clause),
                other => kept.push(other),
            }
        }

        let fused = fuse(name, clauses, ctx);
        kept.insert(position, fused);
        let_expr.declarations = kept;
        Ok(true)
    }
}

fn clauses_of<'a>(
    declarations: &'a [Declaration],
    name: &'a Ident,
) -> impl Iterator<Item = &'a FunctionClause> {
    declarations.iter().filter_map(move |decl| match decl {
        Declaration::Function(clause) if clause.name == *name => Some(clause),
        _ => None,
    })
}

/// Builds `name = \x_1 .. x_k -> case (x_1, ..., x_k) of { ... }`.
///
/// The arity is taken from the first clause. A function without arguments
/// binds the body of its first clause directly; later clauses only survive
/// validation with [`ArityCheck::Unchecked`] and are dropped.
fn fuse(name: Ident, clauses: Vec<FunctionClause>, ctx: &mut RewriteContext) -> Declaration {
    let arity = clauses.first().map_or(0, |clause| clause.patterns.len());

    let body = if arity == 0 {
        clauses
            .into_iter()
            .next()
            .map_or_else(Expression::bot, |clause| clause.body)
    } else {
        let params = ctx.names.fresh_variables(arity);
        let scrutinee =
            Expression::tuple(params.iter().cloned().map(Expression::Variable).collect());
        let arms = clauses
            .into_iter()
            .map(|clause| (Pattern::tuple(clause.patterns), clause.body))
            .collect();
        Expression::lambda(
            params.into_iter().map(Pattern::Variable).collect(),
            Expression::case(scrutinee, arms),
        )
    };

    Declaration::pattern(Pattern::Variable(name), body)
}
