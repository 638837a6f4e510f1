//! The closed set of primitive operators.
//!
//! Primitives are the constants the delta rules give meaning to. Every
//! primitive has exactly one textual name, produced and understood by
//! [`crate::names`].

use std::fmt;

use crate::ast::Literal;
use crate::names;

/// Strict arithmetic, comparison and boolean operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimOp {
    Plus,
    Minus,
    Mult,
    Div,
    Mod,
    FPlus,
    FMinus,
    FMult,
    FDiv,
    Eq,
    Neq,
    Lt,
    Leq,
    Gt,
    Geq,
    And,
    Or,
    Not,
    Negate,
}

impl PrimOp {
    pub const ALL: [PrimOp; 19] = [
        PrimOp::Plus,
        PrimOp::Minus,
        PrimOp::Mult,
        PrimOp::Div,
        PrimOp::Mod,
        PrimOp::FPlus,
        PrimOp::FMinus,
        PrimOp::FMult,
        PrimOp::FDiv,
        PrimOp::Eq,
        PrimOp::Neq,
        PrimOp::Lt,
        PrimOp::Leq,
        PrimOp::Gt,
        PrimOp::Geq,
        PrimOp::And,
        PrimOp::Or,
        PrimOp::Not,
        PrimOp::Negate,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PrimOp::Plus => "plus",
            PrimOp::Minus => "minus",
            PrimOp::Mult => "mult",
            PrimOp::Div => "div",
            PrimOp::Mod => "mod",
            PrimOp::FPlus => "fplus",
            PrimOp::FMinus => "fminus",
            PrimOp::FMult => "fmult",
            PrimOp::FDiv => "fdiv",
            PrimOp::Eq => "eq",
            PrimOp::Neq => "neq",
            PrimOp::Lt => "lt",
            PrimOp::Leq => "leq",
            PrimOp::Gt => "gt",
            PrimOp::Geq => "geq",
            PrimOp::And => "and",
            PrimOp::Or => "or",
            PrimOp::Not => "not",
            PrimOp::Negate => "negate",
        }
    }

    pub fn from_name(name: &str) -> Option<PrimOp> {
        PrimOp::ALL.into_iter().find(|op| op.name() == name)
    }

    pub fn arity(self) -> usize {
        match self {
            PrimOp::Not | PrimOp::Negate => 1,
            _ => 2,
        }
    }
}

/// Every operator a lambda term can mention as a constant.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Op(PrimOp),
    If,
    Fix,
    /// The failed-match placeholder `⟂`. No delta rule consumes it.
    Bot,
    /// `tuple_<n>`: the n-ary tuple constructor.
    Tuple(usize),
    /// `isa_<n>-tuple`
    IsTuple(usize),
    /// `sel_<arity>_<index>`, `index` counted from 1.
    Select { arity: usize, index: usize },
    /// `isa_constr_<C>`
    IsConstructor(String),
    /// `argof_<C>`
    ArgOf(String),
    /// `isa_int_<v>`, `isa_float_<v>`, `isa_char_<c>` and `isa_bool_<b>`.
    IsLiteral(Literal),
}

impl Primitive {
    pub fn name(&self) -> String {
        names::encode(self)
    }

    /// Number of arguments the delta rule for this primitive consumes.
    ///
    /// `None` for primitives no rule reduces: `bot` and tuple constructors,
    /// which act as data heads.
    pub fn arity(&self) -> Option<usize> {
        match self {
            Primitive::Op(op) => Some(op.arity()),
            Primitive::If
            | Primitive::Fix
            | Primitive::IsTuple(_)
            | Primitive::Select { .. }
            | Primitive::IsConstructor(_)
            | Primitive::ArgOf(_)
            | Primitive::IsLiteral(_) => Some(1),
            Primitive::Bot | Primitive::Tuple(_) => None,
        }
    }
}

impl From<PrimOp> for Primitive {
    fn from(op: PrimOp) -> Self {
        Primitive::Op(op)
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}
