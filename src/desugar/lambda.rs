//! Lambda elaboration
//!
//! ```text
//! \p1 p2 p3 -> e   ==>   \p1 -> \p2 -> \p3 -> e
//! \(a, b) -> e     ==>   \x0 -> case x0 of { (a, b) -> e }
//! ```

use super::rewrite::{take, Rewrite, RewriteContext};
use crate::ast::{Expression, Pattern};
use crate::error::PipelineError;

/// Splits a lambda over several patterns into nested single-pattern lambdas.
pub struct Currying;

impl Rewrite for Currying {
    fn name(&self) -> &'static str {
        "currying"
    }

    fn rewrite(
        &self,
        expr: &mut Expression,
        _ctx: &mut RewriteContext,
    ) -> Result<bool, PipelineError> {
        let Expression::Lambda(lambda) = expr else {
            return Ok(false);
        };
        if lambda.params.len() < 2 {
            return Ok(false);
        }

        let params = std::mem::take(&mut lambda.params);
        let body = take(lambda.body.as_mut());
        *expr = params
            .into_iter()
            .rev()
            .fold(body, |body, param| Expression::lambda(vec![param], body));
        Ok(true)
    }
}

/// Moves a non-variable lambda parameter into a `case` over a fresh variable.
pub struct PatternLambda;

impl Rewrite for PatternLambda {
    fn name(&self) -> &'static str {
        "pattern-lambda"
    }

    fn rewrite(
        &self,
        expr: &mut Expression,
        ctx: &mut RewriteContext,
    ) -> Result<bool, PipelineError> {
        let Expression::Lambda(lambda) = expr else {
            return Ok(false);
        };
        let [param] = lambda.params.as_mut_slice() else {
            return Ok(false);
        };
        if param.as_variable().is_some() {
            return Ok(false);
        }

        let variable = ctx.names.fresh_variable();
        let pattern = std::mem::replace(param, Pattern::Variable(variable.clone()));
        let body = take(lambda.body.as_mut());
        *lambda.body = Expression::case(Expression::Variable(variable), vec![(pattern, body)]);
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
    fn test_currying() {
        let mut expr = Expression::lambda(
            vec![Pattern::var("a"), Pattern::Wildcard, Pattern::var("c")],
            Expression::var("a"),
        );
        assert_eq!(Currying.rewrite(&mut expr, &mut context()), Ok(true));
        assert_eq!(expr.to_string(), "\\a -> \\_ -> \\c -> a");
        assert_eq!(Currying.rewrite(&mut expr, &mut context()), Ok(false));
    }

    #[test]
    fn test_pattern_lambda() {
        let mut expr = Expression::lambda(
            vec![Pattern::tuple(vec![Pattern::var("a"), Pattern::var("b")])],
            Expression::var("b"),
        );
        assert_eq!(PatternLambda.rewrite(&mut expr, &mut context()), Ok(true));
        assert_eq!(
            expr,
            Expression::lambda(
                vec![Pattern::var("x0")],
                Expression::case(
                    Expression::var("x0"),
                    vec![(
                        Pattern::tuple(vec![Pattern::var("a"), Pattern::var("b")]),
                        Expression::var("b")
                    )],
                ),
            )
        );
    }

    #[test]
    fn test_variable_lambda_is_left_alone() {
        let mut expr = Expression::lambda(vec![Pattern::var("a")], Expression::var("a"));
        let before = expr.clone();
        assert_eq!(PatternLambda.rewrite(&mut expr, &mut context()), Ok(false));
        assert_eq!(Currying.rewrite(&mut expr, &mut context()), Ok(false));
        assert_eq!(expr, before);
    }
}
