use super::{literal_argument, DeltaOutcome, DeltaRule};
use crate::ast::Literal;
use crate::lambda::{Constant, Term};
use crate::primitive::{PrimOp, Primitive};

/// Strict two-argument operators. `and` and `or` short-circuit on their first
/// argument.
///
/// Integer arithmetic wraps on overflow. Division or modulo by zero declines,
/// leaving the application stuck. Float operators follow IEEE semantics.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryOperators;

/// `not` on booleans and `negate` on integers.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnaryOperators;

fn operator(head: &Constant) -> Option<PrimOp> {
    match head {
        Constant::Primitive(Primitive::Op(op)) => Some(*op),
        _ => None,
    }
}

impl DeltaRule for BinaryOperators {
    fn name(&self) -> &'static str {
        "binary-operators"
    }

    fn arity(&self) -> usize {
        2
    }

    fn accepts(&self, head: &Constant) -> bool {
        operator(head).is_some_and(|op| op.arity() == 2)
    }

    fn apply(&self, head: &Constant, args: &[&Term]) -> DeltaOutcome {
        let Some(op) = operator(head) else {
            return DeltaOutcome::Declined;
        };
        let left = match literal_argument(args, 0) {
            Ok(literal) => *literal,
            Err(outcome) => return outcome,
        };
        match (op, left) {
            (PrimOp::And, Literal::Bool(false)) => return DeltaOutcome::Reduced(Term::bool(false)),
            (PrimOp::Or, Literal::Bool(true)) => return DeltaOutcome::Reduced(Term::bool(true)),
            _ => {}
        }
        let right = match literal_argument(args, 1) {
            Ok(literal) => *literal,
            Err(outcome) => return outcome,
        };
        match evaluate(op, left, right) {
            Some(result) => DeltaOutcome::Reduced(Term::literal(result)),
            None => DeltaOutcome::Declined,
        }
    }
}

impl DeltaRule for UnaryOperators {
    fn name(&self) -> &'static str {
        "unary-operators"
    }

    fn arity(&self) -> usize {
        1
    }

    fn accepts(&self, head: &Constant) -> bool {
        operator(head).is_some_and(|op| op.arity() == 1)
    }

    fn apply(&self, head: &Constant, args: &[&Term]) -> DeltaOutcome {
        let Some(op) = operator(head) else {
            return DeltaOutcome::Declined;
        };
        let operand = match literal_argument(args, 0) {
            Ok(literal) => *literal,
            Err(outcome) => return outcome,
        };
        match (op, operand) {
            (PrimOp::Not, Literal::Bool(b)) => DeltaOutcome::Reduced(Term::bool(!b)),
            (PrimOp::Negate, Literal::Int(v)) => DeltaOutcome::Reduced(Term::int(v.wrapping_neg())),
            _ => DeltaOutcome::Declined,
        }
    }
}

/// Computes a binary operator on two literal values.
///
/// Returns `None` when the operand kinds do not fit the operator or when
/// dividing by zero.
pub fn evaluate(op: PrimOp, left: Literal, right: Literal) -> Option<Literal> {
    use Literal::{Bool, Float, Int};

    let result = match (op, left, right) {
        (PrimOp::Plus, Int(a), Int(b)) => Int(a.wrapping_add(b)),
        (PrimOp::Minus, Int(a), Int(b)) => Int(a.wrapping_sub(b)),
        (PrimOp::Mult, Int(a), Int(b)) => Int(a.wrapping_mul(b)),
        (PrimOp::Div | PrimOp::Mod, Int(_), Int(0)) => return None,
        (PrimOp::Div, Int(a), Int(b)) => Int(a.wrapping_div(b)),
        (PrimOp::Mod, Int(a), Int(b)) => Int(a.wrapping_rem(b)),
        (PrimOp::FPlus, Float(a), Float(b)) => Float(a + b),
        (PrimOp::FMinus, Float(a), Float(b)) => Float(a - b),
        (PrimOp::FMult, Float(a), Float(b)) => Float(a * b),
        (PrimOp::FDiv, Float(a), Float(b)) => Float(a / b),
        (PrimOp::And, Bool(a), Bool(b)) => Bool(a && b),
        (PrimOp::Or, Bool(a), Bool(b)) => Bool(a || b),
        (PrimOp::Eq | PrimOp::Neq | PrimOp::Lt | PrimOp::Leq | PrimOp::Gt | PrimOp::Geq, a, b) => {
            Bool(compare(op, a, b)?)
        }
        _ => return None,
    };
    Some(result)
}

fn compare(op: PrimOp, left: Literal, right: Literal) -> Option<bool> {
    match (left, right) {
        (Literal::Int(a), Literal::Int(b)) => Some(relate(op, a, b)),
        (Literal::Float(a), Literal::Float(b)) => Some(relate(op, a, b)),
        (Literal::Char(a), Literal::Char(b)) => Some(relate(op, a, b)),
        (Literal::Bool(a), Literal::Bool(b)) => Some(relate(op, a, b)),
        _ => None,
    }
}

fn relate<T: PartialOrd>(op: PrimOp, a: T, b: T) -> bool {
    match op {
        PrimOp::Eq => a == b,
        PrimOp::Neq => a != b,
        PrimOp::Lt => a < b,
        PrimOp::Leq => a <= b,
        PrimOp::Gt => a > b,
        PrimOp::Geq => a >= b,
        _ => false,
    }
}
