//! Pretty printer for the surface language.
//!
//! Output is a single line. It is used for `TooComplex` messages and pass
//! snapshots, so it favours being unambiguous over being pretty.

use std::fmt::{self, Display};

use super::Formatter;
use crate::ast::{
    DataDeclaration, Declaration, Expression, Literal, Pattern, Program, TypeExpr,
};

/// Context an expression is printed in.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Position {
    /// Anything goes.
    Open,
    /// Function position: binders that extend to the right need parentheses.
    Head,
    /// Argument position: applications need parentheses too.
    Argument,
}

impl Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(v) => write!(f, "{v}"),
            Literal::Float(v) => write!(f, "{v:?}"),
            Literal::Char(c) => write!(f, "{c:?}"),
            Literal::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut formatter = Formatter::new();
        format_expression(self, &mut formatter, Position::Open);
        f.write_str(&formatter.finish())
    }
}

impl Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut formatter = Formatter::new();
        format_pattern(self, &mut formatter, false);
        f.write_str(&formatter.finish())
    }
}

impl Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut formatter = Formatter::new();
        format_declaration(self, &mut formatter);
        f.write_str(&formatter.finish())
    }
}

impl Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut formatter = Formatter::new();
        format_type(self, &mut formatter, false);
        f.write_str(&formatter.finish())
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut formatter = Formatter::new();
        for (i, declaration) in self.declarations.iter().enumerate() {
            if i > 0 {
                formatter.write_newline();
            }
            format_declaration(declaration, &mut formatter);
        }
        f.write_str(&formatter.finish())
    }
}

fn format_expression(expr: &Expression, fmt: &mut Formatter, position: Position) {
    match expr {
        Expression::Variable(ident) => fmt.write_str(&ident.value),
        Expression::Constructor(ident) => fmt.write_str(&ident.value),
        Expression::Literal(literal) => fmt.write_display(literal),
        Expression::Primitive(primitive) => fmt.write_display(primitive),
        Expression::Tuple(tuple) => {
            fmt.write_str("(");
            for (i, element) in tuple.elements.iter().enumerate() {
                if i > 0 {
                    fmt.write_str(", ");
                }
                format_expression(element, fmt, Position::Open);
            }
            fmt.write_str(")");
        }
        Expression::Application(app) => {
            let parens = position >= Position::Argument;
            fmt.open_if(parens);
            format_expression(&app.func, fmt, Position::Head);
            for arg in &app.args {
                fmt.write_str(" ");
                format_expression(arg, fmt, Position::Argument);
            }
            fmt.close_if(parens);
        }
        Expression::Lambda(lambda) => {
            let parens = position >= Position::Head;
            fmt.open_if(parens);
            fmt.write_str("\\");
            for (i, param) in lambda.params.iter().enumerate() {
                if i > 0 {
                    fmt.write_str(" ");
                }
                format_pattern(param, fmt, true);
            }
            fmt.write_str(" -> ");
            format_expression(&lambda.body, fmt, Position::Open);
            fmt.close_if(parens);
        }
        Expression::IfThenElse(ite) => {
            let parens = position >= Position::Head;
            fmt.open_if(parens);
            fmt.write_str("if ");
            format_expression(&ite.condition, fmt, Position::Open);
            fmt.write_str(" then ");
            format_expression(&ite.then_expr, fmt, Position::Open);
            fmt.write_str(" else ");
            format_expression(&ite.else_expr, fmt, Position::Open);
            fmt.close_if(parens);
        }
        Expression::Let(let_expr) => {
            let parens = position >= Position::Head;
            fmt.open_if(parens);
            fmt.write_str("let { ");
            for (i, declaration) in let_expr.declarations.iter().enumerate() {
                if i > 0 {
                    fmt.write_str("; ");
                }
                format_declaration(declaration, fmt);
            }
            fmt.write_str(" } in ");
            format_expression(&let_expr.body, fmt, Position::Open);
            fmt.close_if(parens);
        }
        Expression::Case(case) => {
            let parens = position >= Position::Head;
            fmt.open_if(parens);
            fmt.write_str("case ");
            format_expression(&case.scrutinee, fmt, Position::Open);
            fmt.write_str(" of { ");
            for (i, arm) in case.arms.iter().enumerate() {
                if i > 0 {
                    fmt.write_str("; ");
                }
                format_pattern(&arm.pattern, fmt, false);
                fmt.write_str(" -> ");
                format_expression(&arm.body, fmt, Position::Open);
            }
            fmt.write_str(" }");
            fmt.close_if(parens);
        }
    }
}

fn format_pattern(pattern: &Pattern, fmt: &mut Formatter, nested: bool) {
    match pattern {
        Pattern::Variable(ident) => fmt.write_str(&ident.value),
        Pattern::Wildcard => fmt.write_str("_"),
        Pattern::Literal(literal) => fmt.write_display(literal),
        Pattern::Tuple(elements) => {
            fmt.write_str("(");
            for (i, element) in elements.iter().enumerate() {
                if i > 0 {
                    fmt.write_str(", ");
                }
                format_pattern(element, fmt, false);
            }
            fmt.write_str(")");
        }
        Pattern::Constructor(constructor) => {
            let parens = nested && !constructor.args.is_empty();
            fmt.open_if(parens);
            fmt.write_str(&constructor.name.value);
            for arg in &constructor.args {
                fmt.write_str(" ");
                format_pattern(arg, fmt, true);
            }
            fmt.close_if(parens);
        }
    }
}

fn format_declaration(declaration: &Declaration, fmt: &mut Formatter) {
    match declaration {
        Declaration::Function(clause) => {
            fmt.write_str(&clause.name.value);
            for pattern in &clause.patterns {
                fmt.write_str(" ");
                format_pattern(pattern, fmt, true);
            }
            fmt.write_str(" = ");
            format_expression(&clause.body, fmt, Position::Open);
        }
        Declaration::Pattern(decl) => {
            format_pattern(&decl.pattern, fmt, false);
            fmt.write_str(" = ");
            format_expression(&decl.body, fmt, Position::Open);
        }
        Declaration::Data(data) => format_data(data, fmt),
    }
}

fn format_data(data: &DataDeclaration, fmt: &mut Formatter) {
    fmt.write_str("data ");
    fmt.write_str(&data.name.value);
    for param in &data.params {
        fmt.write_str(" ");
        fmt.write_str(&param.value);
    }
    for (i, constructor) in data.constructors.iter().enumerate() {
        fmt.write_str(if i == 0 { " = " } else { " | " });
        fmt.write_str(&constructor.name.value);
        for field in &constructor.fields {
            fmt.write_str(" ");
            format_type(field, fmt, true);
        }
    }
}

fn format_type(ty: &TypeExpr, fmt: &mut Formatter, nested: bool) {
    match ty {
        TypeExpr::Var(ident) => fmt.write_str(&ident.value),
        TypeExpr::Con(name, args) => {
            let parens = nested && !args.is_empty();
            fmt.open_if(parens);
            fmt.write_str(&name.value);
            for arg in args {
                fmt.write_str(" ");
                format_type(arg, fmt, true);
            }
            fmt.close_if(parens);
        }
        TypeExpr::Tuple(elements) => {
            fmt.write_str("(");
            for (i, element) in elements.iter().enumerate() {
                if i > 0 {
                    fmt.write_str(", ");
                }
                format_type(element, fmt, false);
            }
            fmt.write_str(")");
        }
        TypeExpr::Func(from, to) => {
            fmt.open_if(nested);
            format_type(from, fmt, true);
            fmt.write_str(" -> ");
            format_type(to, fmt, false);
            fmt.close_if(nested);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ConstructorSignature;

    #[test]
    fn test_format_clauses() {
        let clause = Declaration::function(
            "len",
            vec![Pattern::constructor("Cons", vec![Pattern::Wildcard, Pattern::var("xs")])],
            Expression::apply(
                Expression::var("plus"),
                vec![
                    Expression::int(1),
                    Expression::apply(Expression::var("len"), vec![Expression::var("xs")]),
                ],
            ),
        );
        assert_eq!(clause.to_string(), "len (Cons _ xs) = plus 1 (len xs)");
    }

    #[test]
    fn test_format_case_and_lambda() {
        let expr = Expression::apply(
            Expression::lambda(
                vec![Pattern::var("x")],
                Expression::case(
                    Expression::var("x"),
                    vec![
                        (Pattern::int(0), Expression::char('z')),
                        (Pattern::Wildcard, Expression::bool(false)),
                    ],
                ),
            ),
            vec![Expression::float(1.5)],
        );
        assert_eq!(
            expr.to_string(),
            "(\\x -> case x of { 0 -> 'z'; _ -> false }) 1.5"
        );
    }

    #[test]
    fn test_format_let_and_tuple() {
        let expr = Expression::let_in(
            vec![Declaration::pattern(
                Pattern::tuple(vec![Pattern::var("a"), Pattern::var("b")]),
                Expression::tuple(vec![Expression::int(1), Expression::int(2)]),
            )],
            Expression::var("a"),
        );
        assert_eq!(expr.to_string(), "let { (a, b) = (1, 2) } in a");
    }

    #[test]
    fn test_format_data_declaration() {
        let data = Declaration::data(
            "List",
            vec!["a"],
            vec![
                ConstructorSignature::new("Nil", vec![]),
                ConstructorSignature::new(
                    "Cons",
                    vec![TypeExpr::var("a"), TypeExpr::con("List", vec![TypeExpr::var("a")])],
                ),
            ],
        );
        assert_eq!(data.to_string(), "data List a = Nil | Cons a (List a)");
    }
}
