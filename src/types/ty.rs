use std::collections::{HashMap, HashSet};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeVar {
    pub id: usize,
    pub name: Option<String>,
}

impl TypeVar {
    pub fn new(id: usize) -> Self {
        Self { id, name: None }
    }

    pub fn with_name(id: usize, name: String) -> Self {
        Self {
            id,
            name: Some(name),
        }
    }
}

impl fmt::Display for TypeVar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "'{}", name),
            None => write!(f, "'t{}", self.id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Int,
    Float,
    Char,
    Bool,
    Var(TypeVar),
    Tuple(Vec<Type>),
    Func(Box<Type>, Box<Type>),
    /// A data type applied to its arguments, e.g. `List Int`.
    App(String, Vec<Type>),
}

impl Type {
    pub fn func(t1: Type, t2: Type) -> Self {
        Type::Func(Box::new(t1), Box::new(t2))
    }

    pub fn var(id: usize) -> Self {
        Type::Var(TypeVar::new(id))
    }

    /// `p1 -> p2 -> ... -> result`
    pub fn arrows(params: Vec<Type>, result: Type) -> Self {
        params
            .into_iter()
            .rev()
            .fold(result, |acc, param| Type::func(param, acc))
    }

    pub fn free_type_vars(&self) -> HashSet<TypeVar> {
        self.vars_in_order().into_iter().collect()
    }

    /// Type variables in order of first appearance, left to right.
    pub fn vars_in_order(&self) -> Vec<TypeVar> {
        let mut out = Vec::new();
        self.collect_vars(&mut out);
        out
    }

    fn collect_vars(&self, out: &mut Vec<TypeVar>) {
        match self {
            Type::Int | Type::Float | Type::Char | Type::Bool => {}
            Type::Var(v) => {
                if !out.contains(v) {
                    out.push(v.clone());
                }
            }
            Type::Tuple(elements) | Type::App(_, elements) => {
                elements.iter().for_each(|t| t.collect_vars(out))
            }
            Type::Func(t1, t2) => {
                t1.collect_vars(out);
                t2.collect_vars(out);
            }
        }
    }

    /// Renames the type variables to `'t0`, `'t1`, ... in order of first
    /// appearance.
    pub fn normalized(&self) -> Type {
        let renaming: HashMap<TypeVar, usize> = self
            .vars_in_order()
            .into_iter()
            .enumerate()
            .map(|(index, var)| (var, index))
            .collect();
        self.rename(&renaming)
    }

    fn rename(&self, renaming: &HashMap<TypeVar, usize>) -> Type {
        match self {
            Type::Int | Type::Float | Type::Char | Type::Bool => self.clone(),
            Type::Var(v) => renaming.get(v).map_or_else(|| self.clone(), |&id| Type::var(id)),
            Type::Tuple(elements) => {
                Type::Tuple(elements.iter().map(|t| t.rename(renaming)).collect())
            }
            Type::App(name, args) => Type::App(
                name.clone(),
                args.iter().map(|t| t.rename(renaming)).collect(),
            ),
            Type::Func(t1, t2) => Type::func(t1.rename(renaming), t2.rename(renaming)),
        }
    }

    pub fn pretty(&self) -> String {
        match self {
            Type::Int => "Int".to_string(),
            Type::Float => "Float".to_string(),
            Type::Char => "Char".to_string(),
            Type::Bool => "Bool".to_string(),
            Type::Var(v) => v.to_string(),
            Type::Tuple(elements) => {
                let elements: Vec<_> = elements.iter().map(Type::pretty).collect();
                format!("({})", elements.join(", "))
            }
            Type::App(name, args) => {
                let mut out = name.clone();
                for arg in args {
                    out.push(' ');
                    let compound = matches!(arg, Type::Func(_, _))
                        || matches!(arg, Type::App(_, a) if !a.is_empty());
                    if compound {
                        out.push_str(&format!("({})", arg.pretty()));
                    } else {
                        out.push_str(&arg.pretty());
                    }
                }
                out
            }
            Type::Func(t1, t2) => {
                let t1_str = if matches!(**t1, Type::Func(_, _)) {
                    format!("({})", t1.pretty())
                } else {
                    t1.pretty()
                };
                format!("{} -> {}", t1_str, t2.pretty())
            }
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.pretty())
    }
}

/// A type quantified over `vars`; constant signatures are stored this way and
/// instantiated with fresh variables at every use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeScheme {
    pub vars: Vec<TypeVar>,
    pub ty: Type,
}

impl TypeScheme {
    pub fn monomorphic(ty: Type) -> Self {
        TypeScheme {
            vars: Vec::new(),
            ty,
        }
    }

    pub fn polymorphic(vars: Vec<TypeVar>, ty: Type) -> Self {
        TypeScheme { vars, ty }
    }

    /// Quantifies over every variable of `ty`.
    pub fn closed(ty: Type) -> Self {
        TypeScheme {
            vars: ty.vars_in_order(),
            ty,
        }
    }
}
