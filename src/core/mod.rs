//! # Core AST - The Simple Language
//!
//! What is left of a surface program after every rewrite rule has reached its
//! fixpoint. The core language is small enough to map one to one onto lambda
//! terms.
//!
//! ## Pipeline Position
//!
//! ```text
//! Surface AST → Rewrite rules → [CORE AST] → Cast → Lambda terms
//! ```
//!
//! ## Surface AST vs Core AST
//!
//! | Feature | Surface AST | Core AST |
//! |---------|-------------|----------|
//! | Lambda parameters | Several patterns (`\(a, b) c -> e`) | One variable (`\x -> e`) |
//! | Application | N-ary (`f a b`) | Binary (`(f a) b`) |
//! | Pattern matching | `case`, clauses, pattern lambdas | `if` over discriminators |
//! | `let` | Mutually recursive blocks | One binding, nested |
//! | Data declarations | Anywhere | Gone (only constructors remain) |
//!
//! ## Key Invariants
//!
//! ### 1. Single-Variable Lambdas
//!
//! ```text
//! Surface: \(a, b) -> plus a b
//! Core:    \x0 -> (\a -> (\b -> plus a b) (sel_2_2 x0)) (sel_2_1 x0)
//! ```
//!
//! ### 2. Binary Application
//!
//! `f a b` is `(f a) b`.
//!
//! ### 3. One Binding per `let`
//!
//! A `let` binds one variable, and that variable may occur in its own value.
//! The cast turns the binding into a use of `fix`.
//!
//! ## Example Transformation
//!
//! ```text
//! fact 0 = 1
//! fact x = mult (fact (minus x 1)) x
//! ```
//!
//! becomes, roughly,
//!
//! ```text
//! let fact = \x0 -> if isa_int_0 x0
//!                   then 1
//!                   else (\x -> mult (fact (minus x 1)) x) x0
//! in ...
//! ```
//!
//! ## Related Modules
//!
//! - [`crate::desugar`] - the rewrites that produce the trees lowered here
//! - [`crate::lambda::cast`] - the final translation into lambda terms

use crate::lambda::Constant;

pub mod lower;

pub use lower::lower;

/// Core expression.
#[derive(Debug, Clone, PartialEq)]
pub enum CoreExpr {
    Variable(String),
    Constant(Constant),
    Application(CoreApplication),
    Tuple(Vec<CoreExpr>),
    IfThenElse(CoreIfThenElse),
    Lambda(CoreLambda),
    Let(CoreLet),
}

/// Application of a function to exactly one argument.
#[derive(Debug, Clone, PartialEq)]
pub struct CoreApplication {
    pub func: Box<CoreExpr>,
    pub arg: Box<CoreExpr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoreIfThenElse {
    pub condition: Box<CoreExpr>,
    pub then_expr: Box<CoreExpr>,
    pub else_expr: Box<CoreExpr>,
}

/// Lambda with exactly one variable parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct CoreLambda {
    pub param: String,
    pub body: Box<CoreExpr>,
}

/// `let name = value in body`, where `name` is in scope in `value`.
#[derive(Debug, Clone, PartialEq)]
pub struct CoreLet {
    pub name: String,
    pub value: Box<CoreExpr>,
    pub body: Box<CoreExpr>,
}

impl CoreExpr {
    pub fn var(name: impl Into<String>) -> Self {
        CoreExpr::Variable(name.into())
    }

    pub fn app(func: CoreExpr, arg: CoreExpr) -> Self {
        CoreExpr::Application(CoreApplication {
            func: Box::new(func),
            arg: Box::new(arg),
        })
    }

    pub fn lambda(param: impl Into<String>, body: CoreExpr) -> Self {
        CoreExpr::Lambda(CoreLambda {
            param: param.into(),
            body: Box::new(body),
        })
    }

    pub fn if_then_else(condition: CoreExpr, then_expr: CoreExpr, else_expr: CoreExpr) -> Self {
        CoreExpr::IfThenElse(CoreIfThenElse {
            condition: Box::new(condition),
            then_expr: Box::new(then_expr),
            else_expr: Box::new(else_expr),
        })
    }

    pub fn let_in(name: impl Into<String>, value: CoreExpr, body: CoreExpr) -> Self {
        CoreExpr::Let(CoreLet {
            name: name.into(),
            value: Box::new(value),
            body: Box::new(body),
        })
    }
}
