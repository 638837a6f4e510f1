//! Case elimination and pattern matching on expressions.
//!
//! A `case` becomes a chain of matches folded from the last arm, with `bot`
//! as the final fall-through:
//!
//! ```text
//! case s of { p1 -> e1; p2 -> e2 }   ==>   match p1 s e1 (match p2 s e2 bot)
//! ```
//!
//! `match` itself is not a primitive. [`desugar_match`] expands it on the spot
//! into discriminators, selectors and `if`.

use super::rewrite::{take, Rewrite, RewriteContext};
use crate::ast::{CaseArm, Expression, Ident, Pattern};
use crate::error::PipelineError;
use crate::primitive::Primitive;

/// Replaces a `case` by nested matches.
pub struct CaseElimination;

impl Rewrite for CaseElimination {
    fn name(&self) -> &'static str {
        "case-elimination"
    }

    fn rewrite(
        &self,
        expr: &mut Expression,
        ctx: &mut RewriteContext,
    ) -> Result<bool, PipelineError> {
        let Expression::Case(case) = expr else {
            return Ok(false);
        };

        let scrutinee = take(case.scrutinee.as_mut());
        let arms = std::mem::take(&mut case.arms);

        let (target, binding) = if is_stable(&scrutinee, &arms) {
            (scrutinee, None)
        } else {
            let variable = ctx.names.fresh_variable();
            (Expression::Variable(variable.clone()), Some((variable, scrutinee)))
        };

        let chain = arms.into_iter().rev().fold(Expression::bot(), |fallthrough, arm| {
            desugar_match(&arm.pattern, &target, arm.body, fallthrough, ctx)
        });

        *expr = match binding {
            Some((variable, scrutinee)) => Expression::apply(
                Expression::lambda(vec![Pattern::Variable(variable)], chain),
                vec![scrutinee],
            ),
            None => chain,
        };
        Ok(true)
    }
}

/// Whether the scrutinee may be copied into every arm as is.
fn is_stable(scrutinee: &Expression, arms: &[CaseArm]) -> bool {
    let leaf = |expr: &Expression| match expr {
        Expression::Variable(name) => !arms.iter().any(|arm| arm.pattern.binds(&name.value)),
        other => other.is_constant(),
    };
    match scrutinee {
        Expression::Tuple(tuple) => tuple.elements.iter().all(leaf),
        other => leaf(other),
    }
}

/// Expands `match pattern scrutinee success failure`.
///
/// `scrutinee` is copied to every test and projection, so it has to be cheap
/// and must not mention variables bound by `pattern`. `failure` is bound to a
/// fresh variable when the pattern's binders would capture it, or when it is
/// needed more than once and sharing is enabled.
pub fn desugar_match(
    pattern: &Pattern,
    scrutinee: &Expression,
    success: Expression,
    failure: Expression,
    ctx: &mut RewriteContext,
) -> Expression {
    let uses = failure_uses(pattern, Some(scrutinee));
    if uses == 0 {
        return match_pattern(pattern, scrutinee, success, &failure);
    }

    let free = failure.free_variables();
    let captured = pattern
        .bound_variables()
        .iter()
        .any(|name| free.contains(&name.value));
    let shared = ctx.options.share_fallthrough && uses > 1 && !failure.is_trivial();

    if captured || shared {
        let variable = ctx.names.fresh_variable();
        let body = match_pattern(
            pattern,
            scrutinee,
            success,
            &Expression::Variable(variable.clone()),
        );
        return Expression::apply(
            Expression::lambda(vec![Pattern::Variable(variable)], body),
            vec![failure],
        );
    }

    match_pattern(pattern, scrutinee, success, &failure)
}

fn match_pattern(
    pattern: &Pattern,
    scrutinee: &Expression,
    success: Expression,
    failure: &Expression,
) -> Expression {
    match pattern {
        Pattern::Variable(name) => bind(name, scrutinee, success),
        Pattern::Wildcard => success,
        Pattern::Literal(literal) => Expression::if_then_else(
            test(Primitive::IsLiteral(*literal), scrutinee),
            success,
            failure.clone(),
        ),
        Pattern::Constructor(constructor) => {
            let name = &constructor.name.value;
            let argument = test(Primitive::ArgOf(name.clone()), scrutinee);
            let matched = match constructor.args.as_slice() {
                [] => success,
                [single] => match_pattern(single, &argument, success, failure),
                args => match_components(args, &selectors(args.len(), &argument), success, failure),
            };
            Expression::if_then_else(
                test(Primitive::IsConstructor(name.clone()), scrutinee),
                matched,
                failure.clone(),
            )
        }
        Pattern::Tuple(elements) => match (elements.as_slice(), scrutinee) {
            (_, Expression::Tuple(tuple)) if tuple.elements.len() == elements.len() => {
                match_components(elements, &tuple.elements, success, failure)
            }
            ([], _) => Expression::if_then_else(
                test(Primitive::IsTuple(0), scrutinee),
                success,
                failure.clone(),
            ),
            ([single], _) => match_pattern(single, scrutinee, success, failure),
            (elements, _) => Expression::if_then_else(
                test(Primitive::IsTuple(elements.len()), scrutinee),
                match_components(elements, &selectors(elements.len(), scrutinee), success, failure),
                failure.clone(),
            ),
        },
    }
}

/// Matches component patterns one after the other, the first one outermost.
fn match_components(
    patterns: &[Pattern],
    scrutinees: &[Expression],
    success: Expression,
    failure: &Expression,
) -> Expression {
    patterns
        .iter()
        .zip(scrutinees)
        .rev()
        .fold(success, |inner, (pattern, scrutinee)| {
            match_pattern(pattern, scrutinee, inner, failure)
        })
}

/// How often `failure` ends up in the expansion of a match.
fn failure_uses(pattern: &Pattern, scrutinee: Option<&Expression>) -> usize {
    match pattern {
        Pattern::Variable(_) | Pattern::Wildcard => 0,
        Pattern::Literal(_) => 1,
        Pattern::Constructor(constructor) => {
            1 + constructor
                .args
                .iter()
                .map(|arg| failure_uses(arg, None))
                .sum::<usize>()
        }
        Pattern::Tuple(elements) => match (elements.as_slice(), scrutinee) {
            (_, Some(Expression::Tuple(tuple))) if tuple.elements.len() == elements.len() => {
                elements
                    .iter()
                    .zip(&tuple.elements)
                    .map(|(element, component)| failure_uses(element, Some(component)))
                    .sum()
            }
            ([single], _) => failure_uses(single, scrutinee),
            (elements, _) => {
                1 + elements
                    .iter()
                    .map(|element| failure_uses(element, None))
                    .sum::<usize>()
            }
        },
    }
}

/// Binds the variables of an irrefutable pattern by projecting `scrutinee`.
///
/// No tuple discriminator is tested, so a recursive binding such as
/// `(a, b) = (1, a)` unfolds lazily. A refutable pattern falls back to an
/// ordinary match that fails into `bot`.
pub fn bind_irrefutable(pattern: &Pattern, scrutinee: &Expression, body: Expression) -> Expression {
    match pattern {
        Pattern::Variable(name) => bind(name, scrutinee, body),
        Pattern::Wildcard => body,
        Pattern::Tuple(elements) => match elements.as_slice() {
            [] => body,
            [single] => bind_irrefutable(single, scrutinee, body),
            elements => elements
                .iter()
                .zip(selectors(elements.len(), scrutinee))
                .rev()
                .fold(body, |inner, (element, component)| {
                    bind_irrefutable(element, &component, inner)
                }),
        },
        Pattern::Literal(_) | Pattern::Constructor(_) => {
            match_pattern(pattern, scrutinee, body, &Expression::bot())
        }
    }
}

/// `(\name -> body) scrutinee`, or just `body` if the scrutinee is `name`.
fn bind(name: &Ident, scrutinee: &Expression, body: Expression) -> Expression {
    if matches!(scrutinee, Expression::Variable(variable) if variable == name) {
        return body;
    }
    Expression::apply(
        Expression::lambda(vec![Pattern::Variable(name.clone())], body),
        vec![scrutinee.clone()],
    )
}

fn test(primitive: Primitive, scrutinee: &Expression) -> Expression {
    Expression::apply(Expression::primitive(primitive), vec![scrutinee.clone()])
}

fn selectors(arity: usize, scrutinee: &Expression) -> Vec<Expression> {
    (1..=arity)
        .map(|index| test(Primitive::Select { arity, index }, scrutinee))
        .collect()
}
