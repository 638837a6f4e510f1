//! Structural cast from the core language into lambda terms.
//!
//! ```text
//! if c then a else b      ==>  if c a b
//! (e1, ..., en), n >= 2   ==>  tuple_n e1 ... en
//! (e)                     ==>  e
//! ()                      ==>  tuple_0
//! let x = e in b          ==>  b[x := fix (\x -> e)]
//! ```
//!
//! A free variable whose name is a primitive name (`plus`, `sel_2_1`, ...)
//! becomes that primitive. A binding of the same name shadows it.

use super::{Constant, Term};
use crate::core::CoreExpr;
use crate::names;
use crate::primitive::Primitive;

pub fn cast(expr: &CoreExpr) -> Term {
    cast_scoped(expr, &mut Vec::new())
}

fn cast_scoped<'a>(expr: &'a CoreExpr, scope: &mut Vec<&'a str>) -> Term {
    match expr {
        CoreExpr::Variable(name) => {
            if scope.contains(&name.as_str()) {
                return Term::Variable(name.clone());
            }
            match names::decode(name) {
                Some(primitive) => Term::primitive(primitive),
                None => Term::Variable(name.clone()),
            }
        }
        CoreExpr::Constant(constant) => Term::Constant(constant.clone()),
        CoreExpr::Application(app) => Term::app(
            cast_scoped(&app.func, scope),
            cast_scoped(&app.arg, scope),
        ),
        CoreExpr::Tuple(elements) => match elements.as_slice() {
            [single] => cast_scoped(single, scope),
            _ => Term::apply_all(
                Term::primitive(Primitive::Tuple(elements.len())),
                elements.iter().map(|e| cast_scoped(e, scope)).collect::<Vec<_>>(),
            ),
        },
        CoreExpr::IfThenElse(ite) => Term::apply_all(
            Term::primitive(Primitive::If),
            [
                cast_scoped(&ite.condition, scope),
                cast_scoped(&ite.then_expr, scope),
                cast_scoped(&ite.else_expr, scope),
            ],
        ),
        CoreExpr::Lambda(lambda) => {
            scope.push(&lambda.param);
            let body = cast_scoped(&lambda.body, scope);
            scope.pop();
            Term::abs(lambda.param.clone(), body)
        }
        CoreExpr::Let(let_expr) => {
            scope.push(&let_expr.name);
            let value = cast_scoped(&let_expr.value, scope);
            let body = cast_scoped(&let_expr.body, scope);
            scope.pop();
            let recursive = Term::app(
                Term::Constant(Constant::Primitive(Primitive::Fix)),
                Term::abs(let_expr.name.clone(), value),
            );
            body.substitute(&let_expr.name, &recursive)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Literal;
    use crate::primitive::PrimOp;

    fn int(value: i64) -> CoreExpr {
        CoreExpr::Constant(Constant::Literal(Literal::Int(value)))
    }

    #[test]
    fn test_if_becomes_three_argument_application() {
        let expr = CoreExpr::if_then_else(CoreExpr::var("c"), int(1), int(2));
        assert_eq!(
            cast(&expr),
            Term::apply_all(
                Term::primitive(Primitive::If),
                [Term::var("c"), Term::int(1), Term::int(2)]
            )
        );
    }

    #[test]
    fn test_tuples() {
        assert_eq!(
            cast(&CoreExpr::Tuple(vec![int(1), int(2)])),
            Term::apply_all(Term::primitive(Primitive::Tuple(2)), [Term::int(1), Term::int(2)])
        );
        assert_eq!(cast(&CoreExpr::Tuple(vec![int(1)])), Term::int(1));
        assert_eq!(cast(&CoreExpr::Tuple(vec![])), Term::primitive(Primitive::Tuple(0)));
    }

    #[test]
    fn test_let_becomes_fixpoint_substitution() {
        let expr = CoreExpr::let_in(
            "a",
            int(1),
            CoreExpr::app(CoreExpr::var("f"), CoreExpr::var("a")),
        );
        let fixed = Term::app(Term::primitive(Primitive::Fix), Term::abs("a", Term::int(1)));
        assert_eq!(cast(&expr), Term::app(Term::var("f"), fixed));
    }

    #[test]
    fn test_free_primitive_names_are_decoded() {
        let expr = CoreExpr::app(CoreExpr::var("plus"), int(1));
        assert_eq!(
            cast(&expr),
            Term::app(Term::primitive(PrimOp::Plus.into()), Term::int(1))
        );
    }

    #[test]
    fn test_bound_names_shadow_primitives() {
        let expr = CoreExpr::lambda("plus", CoreExpr::var("plus"));
        assert_eq!(cast(&expr), Term::abs("plus", Term::var("plus")));
    }
}
