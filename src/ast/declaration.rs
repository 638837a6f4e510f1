use super::expression::Expression;
use super::pattern::Pattern;
use super::Ident;

/// A declaration inside a program or a `let` block.
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    /// One clause of a function defined by pattern matching, `f p1 ... pn = e`.
    Function(FunctionClause),
    /// A pattern binding, `p = e`.
    Pattern(PatternDeclaration),
    /// An algebraic data type, `data T a = C1 ... | C2 ...`.
    Data(DataDeclaration),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionClause {
    pub name: Ident,
    pub patterns: Vec<Pattern>,
    pub body: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PatternDeclaration {
    pub pattern: Pattern,
    pub body: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataDeclaration {
    pub name: Ident,
    pub params: Vec<Ident>,
    pub constructors: Vec<ConstructorSignature>,
}

/// A constructor together with the types of its fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorSignature {
    pub name: Ident,
    pub fields: Vec<TypeExpr>,
}

/// Field types as written in a data declaration.
///
/// The primitive types `Int`, `Float`, `Char` and `Bool` are nullary `Con`s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    Var(Ident),
    Con(Ident, Vec<TypeExpr>),
    Tuple(Vec<TypeExpr>),
    Func(Box<TypeExpr>, Box<TypeExpr>),
}

impl TypeExpr {
    pub fn var(name: impl Into<String>) -> Self {
        TypeExpr::Var(Ident::new(name))
    }

    pub fn con(name: impl Into<String>, args: Vec<TypeExpr>) -> Self {
        TypeExpr::Con(Ident::new(name), args)
    }

    pub fn func(from: TypeExpr, to: TypeExpr) -> Self {
        TypeExpr::Func(Box::new(from), Box::new(to))
    }
}

impl Declaration {
    pub fn function(name: impl Into<String>, patterns: Vec<Pattern>, body: Expression) -> Self {
        Declaration::Function(FunctionClause {
            name: Ident::new(name),
            patterns,
            body,
        })
    }

    pub fn pattern(pattern: Pattern, body: Expression) -> Self {
        Declaration::Pattern(PatternDeclaration { pattern, body })
    }

    /// `name = body`, the common case of a pattern declaration.
    pub fn value(name: impl Into<String>, body: Expression) -> Self {
        Declaration::pattern(Pattern::var(name), body)
    }

    pub fn data(
        name: impl Into<String>,
        params: Vec<&str>,
        constructors: Vec<ConstructorSignature>,
    ) -> Self {
        Declaration::Data(DataDeclaration::new(
            name,
            params.into_iter().map(Ident::from).collect(),
            constructors,
        ))
    }

    /// Names introduced into the enclosing scope by this declaration.
    ///
    /// Data declarations introduce constructors, which live in their own
    /// namespace and are not reported here.
    pub fn bound_names(&self) -> Vec<Ident> {
        match self {
            Declaration::Function(clause) => vec![clause.name.clone()],
            Declaration::Pattern(decl) => decl.pattern.bound_variables(),
            Declaration::Data(_) => Vec::new(),
        }
    }

    pub fn body(&self) -> Option<&Expression> {
        match self {
            Declaration::Function(clause) => Some(&clause.body),
            Declaration::Pattern(decl) => Some(&decl.body),
            Declaration::Data(_) => None,
        }
    }

    pub fn body_mut(&mut self) -> Option<&mut Expression> {
        match self {
            Declaration::Function(clause) => Some(&mut clause.body),
            Declaration::Pattern(decl) => Some(&mut decl.body),
            Declaration::Data(_) => None,
        }
    }
}

impl DataDeclaration {
    pub fn new(
        name: impl Into<String>,
        params: Vec<Ident>,
        constructors: Vec<ConstructorSignature>,
    ) -> Self {
        DataDeclaration {
            name: Ident::new(name),
            params,
            constructors,
        }
    }

    pub fn constructor(&self, name: &str) -> Option<&ConstructorSignature> {
        self.constructors.iter().find(|c| c.name.value == name)
    }
}

impl ConstructorSignature {
    pub fn new(name: impl Into<String>, fields: Vec<TypeExpr>) -> Self {
        ConstructorSignature {
            name: Ident::new(name),
            fields,
        }
    }

    pub fn arity(&self) -> usize {
        self.fields.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_declaration() -> DataDeclaration {
        DataDeclaration::new(
            "List",
            vec![Ident::new("a")],
            vec![
                ConstructorSignature::new("Nil", vec![]),
                ConstructorSignature::new(
                    "Cons",
                    vec![
                        TypeExpr::var("a"),
                        TypeExpr::con("List", vec![TypeExpr::var("a")]),
                    ],
                ),
            ],
        )
    }

    #[test]
    fn test_constructor_lookup() {
        let list = list_declaration();
        assert_eq!(list.constructor("Cons").map(|c| c.arity()), Some(2));
        assert_eq!(list.constructor("Nil").map(|c| c.arity()), Some(0));
        assert!(list.constructor("Leaf").is_none());
    }

    #[test]
    fn test_bound_names() {
        let clause = Declaration::function("f", vec![Pattern::var("x")], Expression::var("x"));
        assert_eq!(clause.bound_names(), vec![Ident::new("f")]);

        let tuple = Declaration::pattern(
            Pattern::tuple(vec![Pattern::var("a"), Pattern::Wildcard, Pattern::var("b")]),
            Expression::var("p"),
        );
        assert_eq!(tuple.bound_names(), vec![Ident::new("a"), Ident::new("b")]);

        assert!(Declaration::Data(list_declaration()).bound_names().is_empty());
    }
}
