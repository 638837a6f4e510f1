//! # Variable Manager and Primitive Names
//!
//! Rewrite rules introduce new binders (fresh argument variables, shared
//! scrutinees, fall-through continuations). Those must never collide with a name
//! the user wrote, otherwise the rewrite could capture a user variable.
//!
//! [`VariableManager`] hands out names of the form `x<i>`. It is seeded by
//! scanning every variable in the program and expression and starting one past
//! the largest `i` already used by an `x<i>`-shaped name.
//!
//! ## Primitive names
//!
//! Synthesized primitives are named after the structural fact they test or
//! extract:
//!
//! ```text
//! tuple_3         3-tuple constructor
//! isa_3-tuple     is the value a 3-tuple?
//! sel_3_2         second component of a 3-tuple
//! isa_constr_Cons is the value built with Cons?
//! argof_Cons      fields of a Cons value
//! isa_int_-4      is the value the integer -4?
//! isa_char_a      is the value the character 'a'?
//! ```
//!
//! [`encode`] and [`decode`] are exact inverses: a name decodes only if
//! re-encoding the result gives the name back, so `isa_int_007` or `sel_2_3`
//! are not primitive names.

use std::collections::BTreeSet;

use crate::ast::{Expression, Ident, Literal, Program};
use crate::primitive::{PrimOp, Primitive};

const FRESH_PREFIX: &str = "x";

/// Generator for fresh `x<i>` variables.
#[derive(Debug, Clone, Default)]
pub struct VariableManager {
    next: usize,
}

impl VariableManager {
    pub fn new() -> Self {
        VariableManager::default()
    }

    /// Seeds the counter past every `x<i>` in `names`.
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a String>) -> Self {
        let next = names
            .into_iter()
            .filter_map(|name| fresh_index(name))
            .max()
            .map_or(0, |max| max + 1);
        VariableManager { next }
    }

    /// Seeds the counter from everything mentioned in a program and expression.
    pub fn scan(program: &Program, expr: &Expression) -> Self {
        let names: BTreeSet<String> = program.variables_with(expr);
        VariableManager::from_names(&names)
    }

    pub fn fresh_variable(&mut self) -> Ident {
        let name = format!("{FRESH_PREFIX}{}", self.next);
        self.next += 1;
        Ident::new(name)
    }

    pub fn fresh_variables(&mut self, count: usize) -> Vec<Ident> {
        (0..count).map(|_| self.fresh_variable()).collect()
    }
}

fn fresh_index(name: &str) -> Option<usize> {
    let digits = name.strip_prefix(FRESH_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

pub fn tuple_constructor(arity: usize) -> String {
    format!("tuple_{arity}")
}

pub fn tuple_discriminator(arity: usize) -> String {
    format!("isa_{arity}-tuple")
}

pub fn selector(arity: usize, index: usize) -> String {
    format!("sel_{arity}_{index}")
}

pub fn constructor_discriminator(constructor: &str) -> String {
    format!("isa_constr_{constructor}")
}

pub fn argument_of(constructor: &str) -> String {
    format!("argof_{constructor}")
}

pub fn literal_discriminator(literal: &Literal) -> String {
    let value = match literal {
        Literal::Int(v) => v.to_string(),
        Literal::Float(v) => format!("{v:?}"),
        Literal::Char(c) => c.to_string(),
        Literal::Bool(b) => b.to_string(),
    };
    format!("isa_{}_{value}", literal.kind())
}

/// The canonical name of a primitive.
pub fn encode(primitive: &Primitive) -> String {
    match primitive {
        Primitive::Op(op) => op.name().to_string(),
        Primitive::If => "if".to_string(),
        Primitive::Fix => "fix".to_string(),
        Primitive::Bot => "bot".to_string(),
        Primitive::Tuple(arity) => tuple_constructor(*arity),
        Primitive::IsTuple(arity) => tuple_discriminator(*arity),
        Primitive::Select { arity, index } => selector(*arity, *index),
        Primitive::IsConstructor(name) => constructor_discriminator(name),
        Primitive::ArgOf(name) => argument_of(name),
        Primitive::IsLiteral(literal) => literal_discriminator(literal),
    }
}

/// Recovers the primitive a name was synthesized from.
pub fn decode(name: &str) -> Option<Primitive> {
    let primitive = decode_loose(name)?;
    (encode(&primitive) == name).then_some(primitive)
}

fn decode_loose(name: &str) -> Option<Primitive> {
    match name {
        "if" => return Some(Primitive::If),
        "fix" => return Some(Primitive::Fix),
        "bot" => return Some(Primitive::Bot),
        _ => {}
    }
    if let Some(op) = PrimOp::from_name(name) {
        return Some(Primitive::Op(op));
    }
    if let Some(rest) = name.strip_prefix("isa_constr_") {
        return (!rest.is_empty()).then(|| Primitive::IsConstructor(rest.to_string()));
    }
    if let Some(rest) = name.strip_prefix("argof_") {
        return (!rest.is_empty()).then(|| Primitive::ArgOf(rest.to_string()));
    }
    if let Some(rest) = name.strip_prefix("isa_int_") {
        return rest.parse().ok().map(|v| Primitive::IsLiteral(Literal::Int(v)));
    }
    if let Some(rest) = name.strip_prefix("isa_float_") {
        return rest
            .parse()
            .ok()
            .map(|v| Primitive::IsLiteral(Literal::Float(v)));
    }
    if let Some(rest) = name.strip_prefix("isa_char_") {
        let mut chars = rest.chars();
        return match (chars.next(), chars.next()) {
            (Some(c), None) => Some(Primitive::IsLiteral(Literal::Char(c))),
            _ => None,
        };
    }
    if let Some(rest) = name.strip_prefix("isa_bool_") {
        return rest
            .parse()
            .ok()
            .map(|v| Primitive::IsLiteral(Literal::Bool(v)));
    }
    if let Some(rest) = name.strip_prefix("isa_") {
        let arity = rest.strip_suffix("-tuple")?;
        return parse_index(arity).map(Primitive::IsTuple);
    }
    if let Some(rest) = name.strip_prefix("tuple_") {
        return parse_index(rest).map(Primitive::Tuple);
    }
    if let Some(rest) = name.strip_prefix("sel_") {
        let (arity, index) = rest.split_once('_')?;
        let arity = parse_index(arity)?;
        let index = parse_index(index)?;
        return (1..=arity)
            .contains(&index)
            .then_some(Primitive::Select { arity, index });
    }
    None
}

fn parse_index(digits: &str) -> Option<usize> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
