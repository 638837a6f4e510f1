//! # Surface AST
//!
//! The surface language is what an external parser hands to the pipeline. It is
//! pattern rich: functions are defined by several clauses, lambdas bind patterns,
//! `case` dispatches on arbitrary nested patterns and `let` blocks may contain
//! mutually recursive declarations.
//!
//! ## Pipeline Position
//!
//! ```text
//! Parser (external) → [SURFACE AST] → Rewrite rules → Core AST → Lambda terms
//! ```
//!
//! ## Ownership
//!
//! Every tree is an owned, acyclic structure. Rewrite rules replace subtrees in
//! place through `&mut` access; no node is ever shared between two parents.
//! Names are plain values compared structurally.

use std::fmt;

pub mod declaration;
pub mod expression;
pub mod pattern;
pub mod vars;

pub use declaration::{
    ConstructorSignature, DataDeclaration, Declaration, FunctionClause, PatternDeclaration,
    TypeExpr,
};
pub use expression::{Application, Case, CaseArm, Expression, IfThenElse, Lambda, Let, Tuple};
pub use pattern::{ConstructorPattern, Pattern};

/// A variable, constructor or type name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ident {
    pub value: String,
}

impl Ident {
    pub fn new(value: impl Into<String>) -> Self {
        Ident {
            value: value.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl From<&str> for Ident {
    fn from(value: &str) -> Self {
        Ident::new(value)
    }
}

impl From<String> for Ident {
    fn from(value: String) -> Self {
        Ident { value }
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Primitive literal values shared by all three tree levels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Char(char),
    Bool(bool),
}

impl Literal {
    /// Name of the literal's kind as used in discriminator names.
    pub fn kind(&self) -> &'static str {
        match self {
            Literal::Int(_) => "int",
            Literal::Float(_) => "float",
            Literal::Char(_) => "char",
            Literal::Bool(_) => "bool",
        }
    }

    /// Equality as observed by pattern matching: same kind and same value.
    ///
    /// Floats compare with IEEE semantics, so `NaN` never matches.
    pub fn matches(&self, other: &Literal) -> bool {
        match (self, other) {
            (Literal::Int(a), Literal::Int(b)) => a == b,
            (Literal::Float(a), Literal::Float(b)) => a == b,
            (Literal::Char(a), Literal::Char(b)) => a == b,
            (Literal::Bool(a), Literal::Bool(b)) => a == b,
            _ => false,
        }
    }
}

/// A surface program: an ordered block of declarations.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub declarations: Vec<Declaration>,
}

impl Program {
    pub fn new(declarations: Vec<Declaration>) -> Self {
        Program { declarations }
    }

    /// Splits the program into its data declarations and everything else.
    pub fn partition(self) -> (Vec<DataDeclaration>, Vec<Declaration>) {
        let mut data = Vec::new();
        let mut rest = Vec::new();
        for declaration in self.declarations {
            match declaration {
                Declaration::Data(decl) => data.push(decl),
                other => rest.push(other),
            }
        }
        (data, rest)
    }
}
