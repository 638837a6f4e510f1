//! # Data Declaration Registry
//!
//! The type checker's append-only list of data declarations. Each addition is
//! validated against itself and against everything registered before it:
//!
//! ```text
//! data List a = Nil | Cons a (List a)     ok
//! data Pair a a = Pair a a                duplicate type parameter
//! data Box = Box a                        undeclared type variable
//! data Bad = Bad (List)                   wrong number of type arguments
//! data Maybe a = Nothing | Cons a         `Cons` already belongs to `List`
//! ```
//!
//! A registry belongs to one typing session.

use std::collections::{HashMap, HashSet};

use super::error::TypeError;
use super::ty::{Type, TypeVar};
use crate::ast::{ConstructorSignature, DataDeclaration, Ident, TypeExpr};

const PRIMITIVE_TYPES: [&str; 4] = ["Int", "Float", "Char", "Bool"];

/// A constructor's type, with its declaration's parameters as quantified
/// variables: `Cons : forall a. a -> List a -> List a`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorType {
    pub vars: Vec<TypeVar>,
    pub fields: Vec<Type>,
    pub result: Type,
}

#[derive(Debug, Clone, Default)]
pub struct DataRegistry {
    declarations: Vec<DataDeclaration>,
    /// Constructor name to index into `declarations`.
    owners: HashMap<String, usize>,
}

impl DataRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, declaration: DataDeclaration) -> Result<(), TypeError> {
        if let Some(existing) = self.declaration(declaration.name.as_str()) {
            if *existing == declaration {
                return Ok(());
            }
            return Err(TypeError::inconsistent(
                declaration.name.as_str(),
                "type is already declared with a different definition",
            ));
        }

        self.validate(&declaration)?;

        let index = self.declarations.len();
        for constructor in &declaration.constructors {
            self.owners.insert(constructor.name.value.clone(), index);
        }
        self.declarations.push(declaration);
        Ok(())
    }

    pub fn declaration(&self, name: &str) -> Option<&DataDeclaration> {
        self.declarations.iter().find(|decl| decl.name.value == name)
    }

    /// The declaration owning `constructor`, and the constructor's signature.
    pub fn owner(&self, constructor: &str) -> Option<(&DataDeclaration, &ConstructorSignature)> {
        let declaration = self.declarations.get(*self.owners.get(constructor)?)?;
        let signature = declaration.constructor(constructor)?;
        Some((declaration, signature))
    }

    pub fn constructor_type(&self, constructor: &str) -> Option<ConstructorType> {
        let (declaration, signature) = self.owner(constructor)?;
        let vars: Vec<TypeVar> = declaration
            .params
            .iter()
            .enumerate()
            .map(|(index, param)| TypeVar::with_name(index, param.value.clone()))
            .collect();
        let fields = signature
            .fields
            .iter()
            .map(|field| convert(field, &declaration.params))
            .collect();
        let result = Type::App(
            declaration.name.value.clone(),
            vars.iter().cloned().map(Type::Var).collect(),
        );
        Some(ConstructorType {
            vars,
            fields,
            result,
        })
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    fn validate(&self, declaration: &DataDeclaration) -> Result<(), TypeError> {
        let name = declaration.name.as_str();
        let fail = |reason: String| Err(TypeError::inconsistent(name, reason));

        if PRIMITIVE_TYPES.contains(&name) {
            return fail("primitive types cannot be redeclared".to_string());
        }

        let mut params = HashSet::new();
        for param in &declaration.params {
            if !params.insert(param.as_str()) {
                return fail(format!("duplicate type parameter `{}`", param));
            }
        }

        let mut constructors = HashSet::new();
        for constructor in &declaration.constructors {
            let constructor_name = constructor.name.as_str();
            if !constructors.insert(constructor_name) {
                return fail(format!("constructor `{}` is declared twice", constructor_name));
            }
            if let Some((owner, _)) = self.owner(constructor_name) {
                return fail(format!(
                    "constructor `{}` already belongs to `{}`",
                    constructor_name, owner.name
                ));
            }
            for field in &constructor.fields {
                if let Err(reason) = self.check_field(field, declaration, &params) {
                    return fail(format!("constructor `{}`: {}", constructor_name, reason));
                }
            }
        }
        Ok(())
    }

    fn check_field(
        &self,
        field: &TypeExpr,
        declaration: &DataDeclaration,
        params: &HashSet<&str>,
    ) -> Result<(), String> {
        match field {
            TypeExpr::Var(var) => {
                if params.contains(var.as_str()) {
                    Ok(())
                } else {
                    Err(format!("undeclared type variable `{}`", var))
                }
            }
            TypeExpr::Con(con, args) => {
                let expected = if PRIMITIVE_TYPES.contains(&con.as_str()) {
                    0
                } else if *con == declaration.name {
                    declaration.params.len()
                } else {
                    match self.declaration(con.as_str()) {
                        Some(known) => known.params.len(),
                        None => return Err(format!("unknown type `{}`", con)),
                    }
                };
                if args.len() != expected {
                    return Err(format!(
                        "type `{}` expects {} arguments, found {}",
                        con,
                        expected,
                        args.len()
                    ));
                }
                args.iter()
                    .try_for_each(|arg| self.check_field(arg, declaration, params))
            }
            TypeExpr::Tuple(elements) => elements
                .iter()
                .try_for_each(|element| self.check_field(element, declaration, params)),
            TypeExpr::Func(from, to) => {
                self.check_field(from, declaration, params)?;
                self.check_field(to, declaration, params)
            }
        }
    }
}

/// Converts a validated field type. Parameters become the named variables of
/// [`DataRegistry::constructor_type`].
fn convert(expr: &TypeExpr, params: &[Ident]) -> Type {
    match expr {
        TypeExpr::Var(var) => match params.iter().position(|param| param == var) {
            Some(index) => Type::Var(TypeVar::with_name(index, var.value.clone())),
            None => Type::Var(TypeVar::with_name(params.len(), var.value.clone())),
        },
        TypeExpr::Con(con, args) => match con.as_str() {
            "Int" if args.is_empty() => Type::Int,
            "Float" if args.is_empty() => Type::Float,
            "Char" if args.is_empty() => Type::Char,
            "Bool" if args.is_empty() => Type::Bool,
            _ => Type::App(
                con.value.clone(),
                args.iter().map(|arg| convert(arg, params)).collect(),
            ),
        },
        TypeExpr::Tuple(elements) => {
            Type::Tuple(elements.iter().map(|element| convert(element, params)).collect())
        }
        TypeExpr::Func(from, to) => Type::func(convert(from, params), convert(to, params)),
    }
}
