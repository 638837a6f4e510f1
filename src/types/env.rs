use std::collections::HashMap;

use super::subst::Substitution;
use super::ty::Type;

/// Types of the lambda-bound variables in scope.
///
/// Lambda terms have no `let`, so every binding is monomorphic; polymorphism
/// only enters through constant signatures.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeEnv {
    bindings: HashMap<String, Type>,
}

impl TypeEnv {
    pub fn empty() -> Self {
        TypeEnv {
            bindings: HashMap::new(),
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&Type> {
        self.bindings.get(name)
    }

    pub fn extend(&self, name: String, ty: Type) -> TypeEnv {
        let mut new_bindings = self.bindings.clone();
        new_bindings.insert(name, ty);
        TypeEnv {
            bindings: new_bindings,
        }
    }

    pub fn apply_subst(&self, subst: &Substitution) -> TypeEnv {
        TypeEnv {
            bindings: self
                .bindings
                .iter()
                .map(|(name, ty)| (name.clone(), subst.apply(ty)))
                .collect(),
        }
    }
}
