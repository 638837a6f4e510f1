//! Irrefutable pattern bindings in `let`
//!
//! ```text
//! let (a, b) = e in body   ==>   let x0 = (\a -> (\b -> e) (sel_2_2 x0)) (sel_2_1 x0)
//!                                in (\a -> (\b -> body) (sel_2_2 x0)) (sel_2_1 x0)
//! let _ = e in body        ==>   body
//! ```
//!
//! The right-hand side sees the pattern's names too, since `let` is
//! recursive. Refutable patterns are left in place and rejected when lowering.

use super::case::bind_irrefutable;
use super::rewrite::{take, Rewrite, RewriteContext};
use crate::ast::{Declaration, Expression, Pattern};
use crate::error::PipelineError;

pub struct LetTupleFlattening;

impl Rewrite for LetTupleFlattening {
    fn name(&self) -> &'static str {
        "let-tuple-flattening"
    }

    fn rewrite(
        &self,
        expr: &mut Expression,
        ctx: &mut RewriteContext,
    ) -> Result<bool, PipelineError> {
        let Expression::Let(let_expr) = expr else {
            return Ok(false);
        };
        let [Declaration::Pattern(decl)] = let_expr.declarations.as_mut_slice() else {
            return Ok(false);
        };
        if decl.pattern.as_variable().is_some() || !decl.pattern.is_irrefutable() {
            return Ok(false);
        }

        if decl.pattern == Pattern::Wildcard {
            *expr = take(let_expr.body.as_mut());
            return Ok(true);
        }

        let variable = ctx.names.fresh_variable();
        let target = Expression::Variable(variable.clone());
        let value = bind_irrefutable(&decl.pattern, &target, take(&mut decl.body));
        let body = bind_irrefutable(&decl.pattern, &target, take(let_expr.body.as_mut()));

        let binding = Declaration::pattern(Pattern::Variable(variable), value);
        *expr = Expression::let_in(vec![binding], body);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineOptions;
    use crate::names::VariableManager;

    fn context() -> RewriteContext {
        RewriteContext::new(VariableManager::new(), PipelineOptions::default())
    }

    #[test]
    fn test_tuple_binding_is_projected() {
        let mut expr = Expression::let_in(
            vec![Declaration::pattern(
                Pattern::tuple(vec![Pattern::var("a"), Pattern::var("b")]),
                Expression::tuple(vec![Expression::int(1), Expression::var("a")]),
            )],
            Expression::var("b"),
        );
        assert_eq!(LetTupleFlattening.rewrite(&mut expr, &mut context()), Ok(true));
        assert_eq!(
            expr.to_string(),
            "let { x0 = (\\a -> (\\b -> (1, a)) (sel_2_2 x0)) (sel_2_1 x0) } \
             in (\\a -> (\\b -> b) (sel_2_2 x0)) (sel_2_1 x0)"
        );
        assert_eq!(LetTupleFlattening.rewrite(&mut expr, &mut context()), Ok(false));
    }

    #[test]
    fn test_joker_binding_is_dropped() {
        let mut expr = Expression::let_in(
            vec![Declaration::pattern(Pattern::Wildcard, Expression::var("loop"))],
            Expression::int(5),
        );
        assert_eq!(LetTupleFlattening.rewrite(&mut expr, &mut context()), Ok(true));
        assert_eq!(expr, Expression::int(5));
    }

    #[test]
    fn test_refutable_binding_is_left_alone() {
        let mut expr = Expression::let_in(
            vec![Declaration::pattern(
                Pattern::constructor("Just", vec![Pattern::var("a")]),
                Expression::var("m"),
            )],
            Expression::var("a"),
        );
        let before = expr.clone();
        assert_eq!(LetTupleFlattening.rewrite(&mut expr, &mut context()), Ok(false));
        assert_eq!(expr, before);
    }
}
