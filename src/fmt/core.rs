//! Pretty printer for the core language.

use std::fmt::{self, Display};

use super::Formatter;
use crate::core::CoreExpr;

impl Display for CoreExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut formatter = Formatter::new();
        format_core(self, &mut formatter, 0);
        f.write_str(&formatter.finish())
    }
}

/// `level` 0 is open, 1 is function position, 2 is argument position.
fn format_core(expr: &CoreExpr, fmt: &mut Formatter, level: u8) {
    match expr {
        CoreExpr::Variable(name) => fmt.write_str(name),
        CoreExpr::Constant(constant) => fmt.write_display(constant),
        CoreExpr::Application(app) => {
            fmt.open_if(level >= 2);
            format_core(&app.func, fmt, 1);
            fmt.write_str(" ");
            format_core(&app.arg, fmt, 2);
            fmt.close_if(level >= 2);
        }
        CoreExpr::Tuple(elements) => {
            fmt.write_str("(");
            for (i, element) in elements.iter().enumerate() {
                if i > 0 {
                    fmt.write_str(", ");
                }
                format_core(element, fmt, 0);
            }
            fmt.write_str(")");
        }
        CoreExpr::IfThenElse(ite) => {
            fmt.open_if(level >= 1);
            fmt.write_str("if ");
            format_core(&ite.condition, fmt, 0);
            fmt.write_str(" then ");
            format_core(&ite.then_expr, fmt, 0);
            fmt.write_str(" else ");
            format_core(&ite.else_expr, fmt, 0);
            fmt.close_if(level >= 1);
        }
        CoreExpr::Lambda(lambda) => {
            fmt.open_if(level >= 1);
            fmt.write_str("\\");
            fmt.write_str(&lambda.param);
            fmt.write_str(" -> ");
            format_core(&lambda.body, fmt, 0);
            fmt.close_if(level >= 1);
        }
        CoreExpr::Let(let_expr) => {
            fmt.open_if(level >= 1);
            fmt.write_str("let ");
            fmt.write_str(&let_expr.name);
            fmt.write_str(" = ");
            format_core(&let_expr.value, fmt, 0);
            fmt.write_str(" in ");
            format_core(&let_expr.body, fmt, 0);
            fmt.close_if(level >= 1);
        }
    }
}
