use std::collections::HashMap;

use super::ty::{Type, TypeVar};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution(pub HashMap<TypeVar, Type>);

impl Substitution {
    pub fn empty() -> Self {
        Substitution(HashMap::new())
    }

    pub fn singleton(var: TypeVar, ty: Type) -> Self {
        let mut map = HashMap::new();
        map.insert(var, ty);
        Substitution(map)
    }

    pub fn apply(&self, ty: &Type) -> Type {
        match ty {
            Type::Int | Type::Float | Type::Char | Type::Bool => ty.clone(),
            Type::Var(v) => self.0.get(v).cloned().unwrap_or_else(|| ty.clone()),
            Type::Tuple(elements) => Type::Tuple(elements.iter().map(|t| self.apply(t)).collect()),
            Type::App(name, args) => {
                Type::App(name.clone(), args.iter().map(|t| self.apply(t)).collect())
            }
            Type::Func(t1, t2) => Type::func(self.apply(t1), self.apply(t2)),
        }
    }

    /// `self ∘ earlier`: applying the result equals applying `earlier`, then
    /// `self`.
    pub fn compose(&self, earlier: &Substitution) -> Substitution {
        let mut result: HashMap<TypeVar, Type> = earlier
            .0
            .iter()
            .map(|(var, ty)| (var.clone(), self.apply(ty)))
            .collect();

        for (var, ty) in &self.0 {
            if !result.contains_key(var) {
                result.insert(var.clone(), ty.clone());
            }
        }

        Substitution(result)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_substitution() {
        let subst = Substitution::empty();
        assert_eq!(subst.apply(&Type::Int), Type::Int);
    }

    #[test]
    fn test_apply_to_structures() {
        let var = TypeVar::new(0);
        let subst = Substitution::singleton(var.clone(), Type::Int);
        let ty = Type::func(
            Type::Var(var.clone()),
            Type::App("List".to_string(), vec![Type::Tuple(vec![Type::Var(var)])]),
        );
        assert_eq!(
            subst.apply(&ty),
            Type::func(
                Type::Int,
                Type::App("List".to_string(), vec![Type::Tuple(vec![Type::Int])])
            )
        );
    }

    #[test]
    fn test_apply_preserves_unbound_vars() {
        let subst = Substitution::singleton(TypeVar::new(0), Type::Int);
        assert_eq!(subst.apply(&Type::var(1)), Type::var(1));
    }

    #[test]
    fn test_compose_updates_earlier_bindings() {
        // earlier: t0 := t1, later: t1 := Int
        let earlier = Substitution::singleton(TypeVar::new(0), Type::var(1));
        let later = Substitution::singleton(TypeVar::new(1), Type::Int);

        let composed = later.compose(&earlier);
        assert_eq!(composed.apply(&Type::var(0)), Type::Int);
        assert_eq!(composed.apply(&Type::var(1)), Type::Int);
    }

    #[test]
    fn test_compose_order() {
        let var = TypeVar::new(0);
        let earlier = Substitution::singleton(var.clone(), Type::Int);
        let later = Substitution::singleton(var.clone(), Type::Char);

        // the earlier binding of t0 wins, exactly as applying one after the other
        let result = later.compose(&earlier);
        assert_eq!(result.apply(&Type::Var(var)), Type::Int);
    }

    #[test]
    fn test_composed_substitution_is_idempotent() {
        let earlier =
            Substitution::singleton(TypeVar::new(0), Type::func(Type::var(1), Type::var(2)));
        let later = Substitution::singleton(TypeVar::new(2), Type::Bool);
        let composed = later.compose(&earlier);

        let once = composed.apply(&Type::var(0));
        assert_eq!(composed.apply(&once), once);
    }
}
