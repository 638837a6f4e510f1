use super::declaration::Declaration;
use super::pattern::Pattern;
use super::{Ident, Literal};
use crate::primitive::Primitive;

/// All surface expression forms.
///
/// `Primitive` never comes out of the parser: it is produced by the rewrite
/// rules and refers to a primitive operator directly, so user bindings can never
/// capture it.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Variable(Ident),
    Literal(Literal),
    Constructor(Ident),
    Primitive(Primitive),
    Application(Application),
    Tuple(Tuple),
    Lambda(Lambda),
    IfThenElse(IfThenElse),
    Let(Let),
    Case(Case),
}

/// N-ary application `f a1 ... an`.
#[derive(Debug, Clone, PartialEq)]
pub struct Application {
    pub func: Box<Expression>,
    pub args: Vec<Expression>,
}

/// N-ary tuple `(e1, ..., en)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Tuple {
    pub elements: Vec<Expression>,
}

/// N-ary lambda `\p1 ... pn -> body`.
#[derive(Debug, Clone, PartialEq)]
pub struct Lambda {
    pub params: Vec<Pattern>,
    pub body: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfThenElse {
    pub condition: Box<Expression>,
    pub then_expr: Box<Expression>,
    pub else_expr: Box<Expression>,
}

/// `let { d1; ...; dn } in body`. The declarations may be mutually recursive.
#[derive(Debug, Clone, PartialEq)]
pub struct Let {
    pub declarations: Vec<Declaration>,
    pub body: Box<Expression>,
}

/// `case scrutinee of { p1 -> e1; ...; pn -> en }`, arms tried in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Case {
    pub scrutinee: Box<Expression>,
    pub arms: Vec<CaseArm>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaseArm {
    pub pattern: Pattern,
    pub body: Expression,
}

impl Expression {
    pub fn var(name: impl Into<String>) -> Self {
        Expression::Variable(Ident::new(name))
    }

    pub fn int(value: i64) -> Self {
        Expression::Literal(Literal::Int(value))
    }

    pub fn float(value: f64) -> Self {
        Expression::Literal(Literal::Float(value))
    }

    pub fn char(value: char) -> Self {
        Expression::Literal(Literal::Char(value))
    }

    pub fn bool(value: bool) -> Self {
        Expression::Literal(Literal::Bool(value))
    }

    pub fn constructor(name: impl Into<String>) -> Self {
        Expression::Constructor(Ident::new(name))
    }

    pub fn primitive(primitive: Primitive) -> Self {
        Expression::Primitive(primitive)
    }

    /// The synthetic non-terminating placeholder `⟂`.
    pub fn bot() -> Self {
        Expression::Primitive(Primitive::Bot)
    }

    pub fn apply(func: Expression, args: Vec<Expression>) -> Self {
        Expression::Application(Application {
            func: Box::new(func),
            args,
        })
    }

    pub fn tuple(elements: Vec<Expression>) -> Self {
        Expression::Tuple(Tuple { elements })
    }

    pub fn lambda(params: Vec<Pattern>, body: Expression) -> Self {
        Expression::Lambda(Lambda {
            params,
            body: Box::new(body),
        })
    }

    pub fn if_then_else(
        condition: Expression,
        then_expr: Expression,
        else_expr: Expression,
    ) -> Self {
        Expression::IfThenElse(IfThenElse {
            condition: Box::new(condition),
            then_expr: Box::new(then_expr),
            else_expr: Box::new(else_expr),
        })
    }

    pub fn let_in(declarations: Vec<Declaration>, body: Expression) -> Self {
        Expression::Let(Let {
            declarations,
            body: Box::new(body),
        })
    }

    pub fn case(scrutinee: Expression, arms: Vec<(Pattern, Expression)>) -> Self {
        Expression::Case(Case {
            scrutinee: Box::new(scrutinee),
            arms: arms
                .into_iter()
                .map(|(pattern, body)| CaseArm { pattern, body })
                .collect(),
        })
    }

    /// Leaves that can be duplicated freely without changing evaluation cost.
    pub fn is_trivial(&self) -> bool {
        matches!(
            self,
            Expression::Variable(_)
                | Expression::Literal(_)
                | Expression::Constructor(_)
                | Expression::Primitive(_)
        )
    }

    /// Leaves without any free variable.
    pub fn is_constant(&self) -> bool {
        matches!(
            self,
            Expression::Literal(_) | Expression::Constructor(_) | Expression::Primitive(_)
        )
    }

    /// Mutable references to every direct child expression, left to right.
    ///
    /// Declaration bodies inside a `let` and arm bodies inside a `case` count
    /// as children; patterns do not.
    pub fn children_mut(&mut self) -> Vec<&mut Expression> {
        match self {
            Expression::Variable(_)
            | Expression::Literal(_)
            | Expression::Constructor(_)
            | Expression::Primitive(_) => Vec::new(),
            Expression::Application(app) => {
                let mut children = vec![app.func.as_mut()];
                children.extend(app.args.iter_mut());
                children
            }
            Expression::Tuple(tuple) => tuple.elements.iter_mut().collect(),
            Expression::Lambda(lambda) => vec![lambda.body.as_mut()],
            Expression::IfThenElse(ite) => vec![
                ite.condition.as_mut(),
                ite.then_expr.as_mut(),
                ite.else_expr.as_mut(),
            ],
            Expression::Let(let_expr) => {
                let mut children: Vec<&mut Expression> = let_expr
                    .declarations
                    .iter_mut()
                    .filter_map(Declaration::body_mut)
                    .collect();
                children.push(let_expr.body.as_mut());
                children
            }
            Expression::Case(case) => {
                let mut children = vec![case.scrutinee.as_mut()];
                children.extend(case.arms.iter_mut().map(|arm| &mut arm.body));
                children
            }
        }
    }

    /// Read-only counterpart of [`Expression::children_mut`].
    pub fn children(&self) -> Vec<&Expression> {
        match self {
            Expression::Variable(_)
            | Expression::Literal(_)
            | Expression::Constructor(_)
            | Expression::Primitive(_) => Vec::new(),
            Expression::Application(app) => {
                let mut children = vec![app.func.as_ref()];
                children.extend(app.args.iter());
                children
            }
            Expression::Tuple(tuple) => tuple.elements.iter().collect(),
            Expression::Lambda(lambda) => vec![lambda.body.as_ref()],
            Expression::IfThenElse(ite) => vec![
                ite.condition.as_ref(),
                ite.then_expr.as_ref(),
                ite.else_expr.as_ref(),
            ],
            Expression::Let(let_expr) => {
                let mut children: Vec<&Expression> = let_expr
                    .declarations
                    .iter()
                    .filter_map(Declaration::body)
                    .collect();
                children.push(let_expr.body.as_ref());
                children
            }
            Expression::Case(case) => {
                let mut children = vec![case.scrutinee.as_ref()];
                children.extend(case.arms.iter().map(|arm| &arm.body));
                children
            }
        }
    }
}
