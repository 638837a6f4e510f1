//! Pretty printer for lambda terms.

use std::fmt::{self, Display};

use super::Formatter;
use crate::lambda::{Constant, Term};

impl Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Literal(literal) => write!(f, "{literal}"),
            Constant::Constructor(name) => f.write_str(name),
            Constant::Primitive(primitive) => write!(f, "{primitive}"),
        }
    }
}

impl Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut formatter = Formatter::new();
        format_term(self, &mut formatter, false, false);
        f.write_str(&formatter.finish())
    }
}

fn format_term(term: &Term, fmt: &mut Formatter, head: bool, argument: bool) {
    match term {
        Term::Variable(name) => fmt.write_str(name),
        Term::Constant(constant) => fmt.write_display(constant),
        Term::Abstraction(param, body) => {
            let parens = head || argument;
            fmt.open_if(parens);
            fmt.write_str("\\");
            fmt.write_str(param);
            fmt.write_str(" -> ");
            format_term(body, fmt, false, false);
            fmt.close_if(parens);
        }
        Term::Application(func, arg) => {
            fmt.open_if(argument);
            format_term(func, fmt, true, false);
            fmt.write_str(" ");
            format_term(arg, fmt, false, true);
            fmt.close_if(argument);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::{PrimOp, Primitive};

    #[test]
    fn test_format_redex() {
        let term = Term::app(
            Term::abs("x", Term::app(Term::var("x"), Term::var("x"))),
            Term::app(Term::var("f"), Term::int(2)),
        );
        assert_eq!(term.to_string(), "(\\x -> x x) (f 2)");
    }

    #[test]
    fn test_format_constants() {
        let term = Term::apply_all(
            Term::primitive(Primitive::Select { arity: 2, index: 1 }),
            [Term::apply_all(
                Term::primitive(Primitive::Tuple(2)),
                [Term::char('a'), Term::float(1.0)],
            )],
        );
        assert_eq!(term.to_string(), "sel_2_1 (tuple_2 'a' 1.0)");
        assert_eq!(
            Term::app(Term::primitive(PrimOp::Not.into()), Term::bool(true)).to_string(),
            "not true"
        );
    }
}
