//! Variable computation over surface trees.
//!
//! [`Expression::variables`] reports every variable name mentioned anywhere,
//! binders included, and is what the variable manager scans before handing out
//! fresh names. [`Expression::free_variables`] respects scoping:
//!
//! - a lambda binds the variables of its parameter patterns in its body
//! - a `case` arm binds its pattern's variables in the arm body
//! - a `let` binds every declared name in all declaration bodies and in its body
//! - a function clause additionally binds its own argument patterns

use std::collections::BTreeSet;

use super::declaration::Declaration;
use super::expression::Expression;
use super::pattern::Pattern;
use super::Program;

impl Expression {
    /// All variable names occurring in the expression, bound or free.
    pub fn variables(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        collect_variables(self, &mut out);
        out
    }

    pub fn free_variables(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        collect_free(self, &mut BoundStack::default(), &mut out);
        out
    }
}

impl Declaration {
    /// Free variables of the right-hand side, minus clause parameters.
    ///
    /// Names bound by the declaration itself are *not* removed: dependency
    /// grouping needs to see self references.
    pub fn free_variables(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        let mut bound = BoundStack::default();
        match self {
            Declaration::Function(clause) => {
                bound.push_patterns(&clause.patterns);
                collect_free(&clause.body, &mut bound, &mut out);
            }
            Declaration::Pattern(decl) => collect_free(&decl.body, &mut bound, &mut out),
            Declaration::Data(_) => {}
        }
        out
    }
}

impl Program {
    /// All variable names in the program and in `expr`.
    pub fn variables_with(&self, expr: &Expression) -> BTreeSet<String> {
        let mut out = expr.variables();
        for declaration in &self.declarations {
            collect_declaration_variables(declaration, &mut out);
        }
        out
    }
}

fn collect_pattern_variables(pattern: &Pattern, out: &mut BTreeSet<String>) {
    out.extend(pattern.bound_variables().into_iter().map(|ident| ident.value));
}

fn collect_declaration_variables(declaration: &Declaration, out: &mut BTreeSet<String>) {
    match declaration {
        Declaration::Function(clause) => {
            out.insert(clause.name.value.clone());
            clause
                .patterns
                .iter()
                .for_each(|p| collect_pattern_variables(p, out));
            collect_variables(&clause.body, out);
        }
        Declaration::Pattern(decl) => {
            collect_pattern_variables(&decl.pattern, out);
            collect_variables(&decl.body, out);
        }
        Declaration::Data(_) => {}
    }
}

fn collect_variables(expr: &Expression, out: &mut BTreeSet<String>) {
    match expr {
        Expression::Variable(ident) => {
            out.insert(ident.value.clone());
        }
        Expression::Lambda(lambda) => {
            lambda
                .params
                .iter()
                .for_each(|p| collect_pattern_variables(p, out));
            collect_variables(&lambda.body, out);
        }
        Expression::Let(let_expr) => {
            for declaration in &let_expr.declarations {
                collect_declaration_variables(declaration, out);
            }
            collect_variables(&let_expr.body, out);
        }
        Expression::Case(case) => {
            collect_variables(&case.scrutinee, out);
            for arm in &case.arms {
                collect_pattern_variables(&arm.pattern, out);
                collect_variables(&arm.body, out);
            }
        }
        other => other
            .children()
            .into_iter()
            .for_each(|child| collect_variables(child, out)),
    }
}

/// Bound names in scope; truncating to a mark leaves a scope.
#[derive(Default)]
struct BoundStack {
    names: Vec<String>,
}

impl BoundStack {
    fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    fn mark(&self) -> usize {
        self.names.len()
    }

    fn reset(&mut self, mark: usize) {
        self.names.truncate(mark);
    }

    fn push_pattern(&mut self, pattern: &Pattern) {
        self.names
            .extend(pattern.bound_variables().into_iter().map(|ident| ident.value));
    }

    fn push_patterns(&mut self, patterns: &[Pattern]) {
        patterns.iter().for_each(|p| self.push_pattern(p));
    }
}

fn collect_free(expr: &Expression, bound: &mut BoundStack, out: &mut BTreeSet<String>) {
    match expr {
        Expression::Variable(ident) => {
            if !bound.contains(&ident.value) {
                out.insert(ident.value.clone());
            }
        }
        Expression::Lambda(lambda) => {
            let mark = bound.mark();
            bound.push_patterns(&lambda.params);
            collect_free(&lambda.body, bound, out);
            bound.reset(mark);
        }
        Expression::Let(let_expr) => {
            let mark = bound.mark();
            for declaration in &let_expr.declarations {
                bound
                    .names
                    .extend(declaration.bound_names().into_iter().map(|i| i.value));
            }
            for declaration in &let_expr.declarations {
                match declaration {
                    Declaration::Function(clause) => {
                        let inner = bound.mark();
                        bound.push_patterns(&clause.patterns);
                        collect_free(&clause.body, bound, out);
                        bound.reset(inner);
                    }
                    Declaration::Pattern(decl) => collect_free(&decl.body, bound, out),
                    Declaration::Data(_) => {}
                }
            }
            collect_free(&let_expr.body, bound, out);
            bound.reset(mark);
        }
        Expression::Case(case) => {
            collect_free(&case.scrutinee, bound, out);
            for arm in &case.arms {
                let mark = bound.mark();
                bound.push_pattern(&arm.pattern);
                collect_free(&arm.body, bound, out);
                bound.reset(mark);
            }
        }
        other => other
            .children()
            .into_iter()
            .for_each(|child| collect_free(child, bound, out)),
    }
}
