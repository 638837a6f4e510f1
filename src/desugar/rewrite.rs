//! Rewrite rules and the fixpoint driver.

use crate::ast::Expression;
use crate::config::PipelineOptions;
use crate::error::PipelineError;
use crate::names::VariableManager;
use crate::trace::PassObserver;

/// State shared by every rule of one pipeline run.
#[derive(Debug, Clone)]
pub struct RewriteContext {
    pub names: VariableManager,
    pub options: PipelineOptions,
}

impl RewriteContext {
    pub fn new(names: VariableManager, options: PipelineOptions) -> Self {
        RewriteContext { names, options }
    }
}

/// A local tree transformation.
pub trait Rewrite {
    /// Name reported to the pass observer.
    fn name(&self) -> &'static str;

    /// Tries to rewrite `expr` itself, not its children.
    ///
    /// Returns `Ok(false)` and leaves `expr` untouched if the rule does not
    /// apply at this node.
    fn rewrite(
        &self,
        expr: &mut Expression,
        ctx: &mut RewriteContext,
    ) -> Result<bool, PipelineError>;
}

/// Applies `rule` at the first node (pre-order, depth-first) where it fires.
pub fn rewrite_first(
    rule: &dyn Rewrite,
    expr: &mut Expression,
    ctx: &mut RewriteContext,
) -> Result<bool, PipelineError> {
    if rule.rewrite(expr, ctx)? {
        return Ok(true);
    }
    for child in expr.children_mut() {
        if rewrite_first(rule, child, ctx)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Runs full passes over `expr` until none of `rules` fires anymore.
///
/// One pass tries every rule once, in order.
pub fn run_to_fixpoint(
    rules: &[&dyn Rewrite],
    expr: &mut Expression,
    ctx: &mut RewriteContext,
    observer: &mut dyn PassObserver,
) -> Result<(), PipelineError> {
    loop {
        let mut changed = false;
        for rule in rules {
            if rewrite_first(*rule, expr, ctx)? {
                observer.rule_fired(rule.name());
                changed = true;
            }
        }
        if !changed {
            return Ok(());
        }
    }
}

/// Moves the node out of `expr`, leaving a placeholder behind.
pub(crate) fn take(expr: &mut Expression) -> Expression {
    std::mem::replace(expr, Expression::bot())
}
