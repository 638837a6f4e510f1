//! Declaration group nesting
//!
//! A `let` with several pattern declarations is split into one `let` per
//! dependency group, dependencies outermost. Mutually recursive groups are
//! bound together as a tuple:
//!
//! ```text
//! let { a = b; b = a; c = 1 } in e   ==>   let { c = 1 } in let { (a, b) = (b, a) } in e
//! ```

use super::deps::DependencyGraph;
use super::rewrite::{take, Rewrite, RewriteContext};
use crate::ast::{Declaration, Expression, Pattern, PatternDeclaration};
use crate::error::PipelineError;

pub struct GroupNesting;

impl Rewrite for GroupNesting {
    fn name(&self) -> &'static str {
        "group-nesting"
    }

    fn rewrite(
        &self,
        expr: &mut Expression,
        _ctx: &mut RewriteContext,
    ) -> Result<bool, PipelineError> {
        let Expression::Let(let_expr) = expr else {
            return Ok(false);
        };
        if let_expr.declarations.len() < 2
            || !let_expr
                .declarations
                .iter()
                .all(|decl| matches!(decl, Declaration::Pattern(_)))
        {
            return Ok(false);
        }

        let declarations: Vec<PatternDeclaration> = std::mem::take(&mut let_expr.declarations)
            .into_iter()
            .filter_map(|decl| match decl {
                Declaration::Pattern(decl) => Some(decl),
                _ => None,
            })
            .collect();

        let groups = DependencyGraph::new(&declarations).ordered_groups();
        let mut slots: Vec<Option<PatternDeclaration>> =
            declarations.into_iter().map(Some).collect();
        let bindings: Vec<Declaration> = groups
            .into_iter()
            .map(|group| {
                fuse_group(
                    group
                        .into_iter()
                        .filter_map(|index| slots[index].take())
                        .collect(),
                )
            })
            .collect();

        let body = take(let_expr.body.as_mut());
        *expr = bindings
            .into_iter()
            .rev()
            .fold(body, |body, binding| Expression::let_in(vec![binding], body));
        Ok(true)
    }
}

/// `(p1, ..., pk) = (e1, ..., ek)` for a group of several declarations.
fn fuse_group(mut group: Vec<PatternDeclaration>) -> Declaration {
    if group.len() == 1 {
        if let Some(decl) = group.pop() {
            return Declaration::Pattern(decl);
        }
    }
    let (patterns, bodies): (Vec<Pattern>, Vec<Expression>) = group
        .into_iter()
        .map(|decl| (decl.pattern, decl.body))
        .unzip();
    Declaration::pattern(Pattern::tuple(patterns), Expression::tuple(bodies))
}
