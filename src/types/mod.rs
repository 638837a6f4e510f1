//! # Type Checking
//!
//! Hindley-Milner inference over lambda terms, with the data declarations of
//! the program registered beforehand.
//!
//! ```text
//! DataDeclaration ──add_data_declaration──→ DataRegistry
//!                                               │
//! Term ──check_type──→ Infer (Algorithm W) ─────┴─→ constant signatures
//!                          │
//!                          └─→ unify ──→ Substitution
//! ```
//!
//! Free variables of the checked term are treated as unknowns: every
//! occurrence of the same name shares one type variable.

pub mod env;
pub mod error;
pub mod infer;
pub mod registry;
pub mod signature;
pub mod subst;
pub mod ty;
pub mod unify;

pub use env::TypeEnv;
pub use error::TypeError;
pub use infer::Infer;
pub use registry::DataRegistry;
pub use subst::Substitution;
pub use ty::{Type, TypeScheme, TypeVar};

use crate::ast::DataDeclaration;
use crate::lambda::Term;

#[derive(Debug, Clone, Default)]
pub struct TypeChecker {
    registry: DataRegistry,
}

impl TypeChecker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(&self) -> &DataRegistry {
        &self.registry
    }

    pub fn add_data_declaration(&mut self, declaration: DataDeclaration) -> Result<(), TypeError> {
        self.registry.add(declaration)
    }

    /// Infers the most general type of `term`, with variables numbered from
    /// `'t0` in order of appearance.
    pub fn check_type(&self, term: &Term) -> Result<Type, TypeError> {
        let mut infer = Infer::new(&self.registry);
        let env = term
            .free_vars()
            .into_iter()
            .fold(TypeEnv::empty(), |env, name| {
                let ty = Type::Var(infer.fresh_var());
                env.extend(name, ty)
            });

        let (subst, ty) = infer.infer_term(&env, term)?;
        Ok(subst.apply(&ty).normalized())
    }
}
