use thiserror::Error;

use super::subst::Substitution;
use super::ty::{Type, TypeVar};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnifyError {
    #[error("type mismatch: expected {expected}, found {found}")]
    Mismatch { expected: Type, found: Type },
    #[error("cannot construct infinite type {var} = {ty}")]
    OccursCheck { var: TypeVar, ty: Type },
}

/// Check if a type variable occurs within a type (occurs check).
///
/// The occurs check prevents infinite types: a substitution like
/// `'t0 = 't0 -> Int` would unfold forever when applied.
///
/// ```text
/// occurs_in('t0, Int) = false
/// occurs_in('t0, 't0) = true
/// occurs_in('t0, List ('t0, Int)) = true
/// occurs_in('t0, 't1 -> 't2) = false
/// ```
fn occurs_in(var: &TypeVar, ty: &Type) -> bool {
    match ty {
        Type::Int | Type::Float | Type::Char | Type::Bool => false,
        Type::Var(v) => v == var,
        Type::Tuple(elements) | Type::App(_, elements) => {
            elements.iter().any(|element| occurs_in(var, element))
        }
        Type::Func(t1, t2) => occurs_in(var, t1) || occurs_in(var, t2),
    }
}

/// Unify two types, finding a substitution that makes them equal.
///
/// # Algorithm
///
/// Structural recursion on both types:
///
/// ```text
/// Unify(Int, Int) = ∅
/// Unify(Int, Char) = Error            // Type mismatch
/// Unify('t0, 't0) = ∅
/// Unify('t0, Int) = [t0 := Int]
/// Unify('t0, 't0 -> Int) = Error      // Occurs check fails!
/// ```
///
/// Function types, tuples and applied data types unify component by
/// component. Every substitution found so far is applied to the remaining
/// components before they are unified:
///
/// ```text
/// Unify('t0 -> 't0, Int -> 't1):
///   Step 1: Unify 't0 with Int → S1 = [t0 := Int]
///   Step 2: Apply S1: 't0 becomes Int
///   Step 3: Unify Int with 't1 → S2 = [t1 := Int]
///   Result: S2 ∘ S1 = [t0 := Int, t1 := Int]
/// ```
///
/// Tuples of different sizes and data types of different names or
/// argument counts are mismatches.
pub fn unify(t1: &Type, t2: &Type) -> Result<Substitution, UnifyError> {
    match (t1, t2) {
        (Type::Int, Type::Int)
        | (Type::Float, Type::Float)
        | (Type::Char, Type::Char)
        | (Type::Bool, Type::Bool) => Ok(Substitution::empty()),

        // Type variable unification
        (Type::Var(v1), Type::Var(v2)) if v1 == v2 => Ok(Substitution::empty()),
        (Type::Var(v), t) | (t, Type::Var(v)) => {
            if occurs_in(v, t) {
                Err(UnifyError::OccursCheck {
                    var: v.clone(),
                    ty: t.clone(),
                })
            } else {
                Ok(Substitution::singleton(v.clone(), t.clone()))
            }
        }

        // Function types
        (Type::Func(t1a, t1b), Type::Func(t2a, t2b)) => {
            let s1 = unify(t1a, t2a)?;
            let t1b_subst = s1.apply(t1b);
            let t2b_subst = s1.apply(t2b);
            let s2 = unify(&t1b_subst, &t2b_subst)?;
            Ok(s2.compose(&s1))
        }

        (Type::Tuple(left), Type::Tuple(right)) if left.len() == right.len() => {
            unify_pairwise(left, right)
        }

        (Type::App(n1, left), Type::App(n2, right)) if n1 == n2 && left.len() == right.len() => {
            unify_pairwise(left, right)
        }

        // Mismatches
        _ => Err(UnifyError::Mismatch {
            expected: t1.clone(),
            found: t2.clone(),
        }),
    }
}

fn unify_pairwise(left: &[Type], right: &[Type]) -> Result<Substitution, UnifyError> {
    left.iter()
        .zip(right)
        .try_fold(Substitution::empty(), |subst, (l, r)| {
            let next = unify(&subst.apply(l), &subst.apply(r))?;
            Ok(next.compose(&subst))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unify_identical_primitives() {
        for ty in [Type::Int, Type::Float, Type::Char, Type::Bool] {
            assert_eq!(unify(&ty, &ty), Ok(Substitution::empty()));
        }
    }

    #[test]
    fn test_unify_binds_variables_on_either_side() {
        let bound = Substitution::singleton(TypeVar::new(0), Type::Float);
        assert_eq!(unify(&Type::var(0), &Type::Float), Ok(bound.clone()));
        assert_eq!(unify(&Type::Float, &Type::var(0)), Ok(bound));
        assert_eq!(unify(&Type::var(3), &Type::var(3)), Ok(Substitution::empty()));
    }

    #[test]
    fn test_unify_occurs_check_nested() {
        let var = TypeVar::new(0);
        let ty = Type::App("List".to_string(), vec![Type::Var(var.clone())]);
        let result = unify(&Type::Var(var), &ty);
        assert!(matches!(result, Err(UnifyError::OccursCheck { .. })));
    }

    #[test]
    fn test_unify_threads_substitution_through_arrows() {
        // ('a -> 'a) ~ ('b -> Int)
        let t1 = Type::func(Type::var(0), Type::var(0));
        let t2 = Type::func(Type::var(1), Type::Int);

        let result = unify(&t1, &t2).unwrap();
        assert_eq!(result.apply(&Type::var(0)), Type::Int);
        assert_eq!(result.apply(&Type::var(1)), Type::Int);
    }

    #[test]
    fn test_unify_tuples_componentwise() {
        let t1 = Type::Tuple(vec![Type::var(0), Type::var(0), Type::var(1)]);
        let t2 = Type::Tuple(vec![Type::Char, Type::var(2), Type::var(2)]);

        let result = unify(&t1, &t2).unwrap();
        for id in 0..3 {
            assert_eq!(result.apply(&Type::var(id)), Type::Char);
        }
    }

    #[test]
    fn test_unify_tuple_size_mismatch() {
        let t1 = Type::Tuple(vec![Type::Int]);
        let t2 = Type::Tuple(vec![Type::Int, Type::Int]);
        assert!(matches!(unify(&t1, &t2), Err(UnifyError::Mismatch { .. })));
    }

    #[test]
    fn test_unify_data_types() {
        let list = |t: Type| Type::App("List".to_string(), vec![t]);
        let result = unify(&list(Type::var(0)), &list(Type::Bool)).unwrap();
        assert_eq!(result.apply(&Type::var(0)), Type::Bool);

        let maybe = Type::App("Maybe".to_string(), vec![Type::Bool]);
        assert!(matches!(
            unify(&list(Type::Bool), &maybe),
            Err(UnifyError::Mismatch { .. })
        ));
    }

    #[test]
    fn test_unify_mismatch_shape() {
        let ty_func = Type::func(Type::Int, Type::Int);
        let result = unify(&Type::Int, &ty_func);
        assert!(matches!(result, Err(UnifyError::Mismatch { .. })));
    }

    #[test]
    fn test_occurs_check_helper() {
        let var = TypeVar::new(0);
        assert!(occurs_in(&var, &Type::Var(var.clone())));
        assert!(!occurs_in(&var, &Type::var(1)));
        assert!(!occurs_in(&var, &Type::Int));

        let ty = Type::func(Type::Tuple(vec![Type::Var(var.clone())]), Type::Char);
        assert!(occurs_in(&var, &ty));
    }
}
