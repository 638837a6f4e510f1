use std::collections::HashMap;

use super::env::TypeEnv;
use super::error::TypeError;
use super::registry::DataRegistry;
use super::signature::signature;
use super::subst::Substitution;
use super::ty::{Type, TypeScheme, TypeVar};
use super::unify::unify;
use crate::lambda::Term;

/// Algorithm W over lambda terms.
///
/// Every rule returns the substitution it discovered together with the
/// inferred type; callers apply the substitution to everything they still
/// hold before inferring the next sub-term.
pub struct Infer<'r> {
    next_var: usize,
    registry: &'r DataRegistry,
}

impl<'r> Infer<'r> {
    pub fn new(registry: &'r DataRegistry) -> Self {
        Infer {
            next_var: 0,
            registry,
        }
    }

    pub fn fresh_var(&mut self) -> TypeVar {
        let id = self.next_var;
        self.next_var += 1;
        TypeVar::new(id)
    }

    fn instantiate(&mut self, scheme: &TypeScheme) -> Type {
        let subst: HashMap<_, _> = scheme
            .vars
            .iter()
            .map(|v| (v.clone(), Type::Var(self.fresh_var())))
            .collect();
        Substitution(subst).apply(&scheme.ty)
    }

    pub fn infer_term(
        &mut self,
        env: &TypeEnv,
        term: &Term,
    ) -> Result<(Substitution, Type), TypeError> {
        match term {
            Term::Variable(name) => match env.lookup(name) {
                Some(ty) => Ok((Substitution::empty(), ty.clone())),
                None => Ok((Substitution::empty(), Type::Var(self.fresh_var()))),
            },

            Term::Constant(constant) => {
                let scheme = signature(constant, self.registry)?;
                Ok((Substitution::empty(), self.instantiate(&scheme)))
            }

            Term::Abstraction(param, body) => self.infer_abstraction(env, param, body),

            Term::Application(func, arg) => self.infer_application(env, term, func, arg),
        }
    }

    fn infer_abstraction(
        &mut self,
        env: &TypeEnv,
        param: &str,
        body: &Term,
    ) -> Result<(Substitution, Type), TypeError> {
        let param_ty = Type::Var(self.fresh_var());
        let env1 = env.extend(param.to_string(), param_ty.clone());
        let (s, body_ty) = self.infer_term(&env1, body)?;
        let param_ty_subst = s.apply(&param_ty);
        Ok((s, Type::func(param_ty_subst, body_ty)))
    }

    fn infer_application(
        &mut self,
        env: &TypeEnv,
        term: &Term,
        func: &Term,
        arg: &Term,
    ) -> Result<(Substitution, Type), TypeError> {
        let (s1, func_ty) = self.infer_term(env, func)?;
        let env1 = env.apply_subst(&s1);
        let (s2, arg_ty) = self.infer_term(&env1, arg)?;

        let result_ty = Type::Var(self.fresh_var());
        let expected_func_ty = Type::func(arg_ty, result_ty.clone());

        let func_ty_subst = s2.apply(&func_ty);
        let s3 = unify(&func_ty_subst, &expected_func_ty)
            .map_err(|e| TypeError::from_unify_error(e, term.to_string()))?;

        let final_subst = s3.compose(&s2).compose(&s1);
        let final_ty = final_subst.apply(&result_ty);

        Ok((final_subst, final_ty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::{PrimOp, Primitive};

    fn infer(term: &Term) -> Result<Type, TypeError> {
        let registry = DataRegistry::new();
        let mut infer = Infer::new(&registry);
        let (s, ty) = infer.infer_term(&TypeEnv::empty(), term)?;
        Ok(s.apply(&ty).normalized())
    }

    fn op(op: PrimOp) -> Term {
        Term::primitive(Primitive::Op(op))
    }

    #[test]
    fn test_infer_literal() {
        assert_eq!(infer(&Term::float(1.5)), Ok(Type::Float));
    }

    #[test]
    fn test_infer_identity() {
        let id = Term::abs("x", Term::var("x"));
        assert_eq!(infer(&id), Ok(Type::func(Type::var(0), Type::var(0))));
    }

    #[test]
    fn test_infer_const_function() {
        let k = Term::abs("x", Term::abs("y", Term::var("x")));
        assert_eq!(infer(&k).unwrap().pretty(), "'t0 -> 't1 -> 't0");
    }

    #[test]
    fn test_infer_application_fixes_param_type() {
        let succ = Term::abs(
            "x",
            Term::apply_all(op(PrimOp::Plus), [Term::var("x"), Term::int(1)]),
        );
        assert_eq!(infer(&succ), Ok(Type::func(Type::Int, Type::Int)));
    }

    #[test]
    fn test_infer_polymorphic_constant_per_use() {
        // eq 'a' 'b' and eq 1 2 in the same term need separate instances
        let term = Term::apply_all(
            op(PrimOp::And),
            [
                Term::apply_all(op(PrimOp::Eq), [Term::char('a'), Term::char('b')]),
                Term::apply_all(op(PrimOp::Eq), [Term::int(1), Term::int(2)]),
            ],
        );
        assert_eq!(infer(&term), Ok(Type::Bool));
    }

    #[test]
    fn test_infer_mismatch() {
        let term = Term::apply_all(op(PrimOp::Plus), [Term::char('a'), Term::int(1)]);
        assert!(matches!(
            infer(&term),
            Err(TypeError::CannotUnify { .. })
        ));
    }

    #[test]
    fn test_self_application_is_infinite() {
        let omega = Term::abs("x", Term::app(Term::var("x"), Term::var("x")));
        let Err(TypeError::CannotUnify { expected, found, .. }) = infer(&omega) else {
            panic!("expected an occurs check failure");
        };
        let Type::Var(var) = expected else {
            panic!("expected a type variable, got {}", expected);
        };
        assert!(found.free_type_vars().contains(&var));
    }

    #[test]
    fn test_infer_fix() {
        // fix (\f -> \n -> if (eq n 0) 1 (mult n (f (minus n 1))))
        let body = Term::apply_all(
            Term::primitive(Primitive::If),
            [
                Term::apply_all(op(PrimOp::Eq), [Term::var("n"), Term::int(0)]),
                Term::int(1),
                Term::apply_all(
                    op(PrimOp::Mult),
                    [
                        Term::var("n"),
                        Term::app(
                            Term::var("f"),
                            Term::apply_all(op(PrimOp::Minus), [Term::var("n"), Term::int(1)]),
                        ),
                    ],
                ),
            ],
        );
        let fact = Term::app(
            Term::primitive(Primitive::Fix),
            Term::abs("f", Term::abs("n", body)),
        );
        assert_eq!(infer(&fact), Ok(Type::func(Type::Int, Type::Int)));
    }
}
