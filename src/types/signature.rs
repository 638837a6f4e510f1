//! Type signatures of constants.
//!
//! Literals and primitive operators have fixed signatures; the tuple family
//! is synthesized from the arity and index baked into the primitive, the
//! constructor family from the owning data declaration:
//!
//! ```text
//! plus          : Int -> Int -> Int
//! eq            : 'a -> 'a -> Bool
//! if            : Bool -> 'a -> 'a -> 'a
//! fix           : ('a -> 'a) -> 'a
//! tuple_2       : 'a -> 'b -> ('a, 'b)
//! sel_3_2       : ('a, 'b, 'c) -> 'b
//! Cons          : 'a -> List 'a -> List 'a
//! isa_constr_Nil: List 'a -> Bool
//! argof_Cons    : List 'a -> ('a, List 'a)
//! ```

use super::error::TypeError;
use super::registry::{ConstructorType, DataRegistry};
use super::ty::{Type, TypeScheme};
use crate::ast::Literal;
use crate::lambda::Constant;
use crate::primitive::{PrimOp, Primitive};

pub fn signature(constant: &Constant, registry: &DataRegistry) -> Result<TypeScheme, TypeError> {
    match constant {
        Constant::Literal(literal) => Ok(TypeScheme::monomorphic(literal_type(literal))),
        Constant::Constructor(name) => {
            let ConstructorType {
                vars,
                fields,
                result,
            } = constructor_type(name, registry)?;
            Ok(TypeScheme::polymorphic(vars, Type::arrows(fields, result)))
        }
        Constant::Primitive(primitive) => primitive_signature(primitive, registry),
    }
}

pub fn literal_type(literal: &Literal) -> Type {
    match literal {
        Literal::Int(_) => Type::Int,
        Literal::Float(_) => Type::Float,
        Literal::Char(_) => Type::Char,
        Literal::Bool(_) => Type::Bool,
    }
}

fn constructor_type(name: &str, registry: &DataRegistry) -> Result<ConstructorType, TypeError> {
    registry
        .constructor_type(name)
        .ok_or_else(|| TypeError::not_found(name))
}

fn op_type(op: PrimOp) -> Type {
    let binary = |ty: Type| Type::arrows(vec![ty.clone(), ty.clone()], ty);
    match op {
        PrimOp::Plus | PrimOp::Minus | PrimOp::Mult | PrimOp::Div | PrimOp::Mod => {
            binary(Type::Int)
        }
        PrimOp::FPlus | PrimOp::FMinus | PrimOp::FMult | PrimOp::FDiv => binary(Type::Float),
        PrimOp::Eq | PrimOp::Neq | PrimOp::Lt | PrimOp::Leq | PrimOp::Gt | PrimOp::Geq => {
            Type::arrows(vec![Type::var(0), Type::var(0)], Type::Bool)
        }
        PrimOp::And | PrimOp::Or => binary(Type::Bool),
        PrimOp::Not => Type::func(Type::Bool, Type::Bool),
        PrimOp::Negate => Type::func(Type::Int, Type::Int),
    }
}

fn primitive_signature(
    primitive: &Primitive,
    registry: &DataRegistry,
) -> Result<TypeScheme, TypeError> {
    let ty = match primitive {
        Primitive::Op(op) => op_type(*op),
        Primitive::If => Type::arrows(
            vec![Type::Bool, Type::var(0), Type::var(0)],
            Type::var(0),
        ),
        Primitive::Fix => Type::func(Type::func(Type::var(0), Type::var(0)), Type::var(0)),
        Primitive::Bot => Type::var(0),
        Primitive::Tuple(arity) => {
            let elements = elements(*arity);
            Type::arrows(elements.clone(), Type::Tuple(elements))
        }
        Primitive::IsTuple(arity) => Type::func(Type::Tuple(elements(*arity)), Type::Bool),
        Primitive::Select { arity, index } => {
            if *index == 0 || index > arity {
                return Err(TypeError::incorrectly_typed(
                    primitive,
                    format!("selector index {} outside of a {}-tuple", index, arity),
                ));
            }
            Type::func(Type::Tuple(elements(*arity)), Type::var(index - 1))
        }
        Primitive::IsConstructor(name) => {
            let ConstructorType { vars, result, .. } = constructor_type(name, registry)?;
            return Ok(TypeScheme::polymorphic(vars, Type::func(result, Type::Bool)));
        }
        Primitive::ArgOf(name) => {
            let ConstructorType {
                vars,
                mut fields,
                result,
            } = constructor_type(name, registry)?;
            let argument = if fields.len() == 1 {
                fields.remove(0)
            } else {
                Type::Tuple(fields)
            };
            return Ok(TypeScheme::polymorphic(vars, Type::func(result, argument)));
        }
        Primitive::IsLiteral(literal) => Type::func(literal_type(literal), Type::Bool),
    };
    Ok(TypeScheme::closed(ty))
}

fn elements(arity: usize) -> Vec<Type> {
    (0..arity).map(Type::var).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ConstructorSignature, DataDeclaration, Ident, TypeExpr};
    use crate::types::TypeVar;

    fn registry() -> DataRegistry {
        let mut registry = DataRegistry::new();
        registry
            .add(DataDeclaration::new(
                "Pair",
                vec![Ident::new("a"), Ident::new("b")],
                vec![ConstructorSignature::new(
                    "MkPair",
                    vec![TypeExpr::var("a"), TypeExpr::var("b")],
                )],
            ))
            .unwrap();
        registry
            .add(DataDeclaration::new(
                "Unit",
                vec![],
                vec![ConstructorSignature::new("Unit", vec![])],
            ))
            .unwrap();
        registry
    }

    fn primitive(primitive: Primitive) -> Type {
        signature(&Constant::Primitive(primitive), &registry())
            .unwrap()
            .ty
    }

    #[test]
    fn test_literals_and_operators() {
        let scheme = signature(&Constant::Literal(Literal::Char('x')), &registry()).unwrap();
        assert_eq!(scheme, TypeScheme::monomorphic(Type::Char));

        assert_eq!(primitive(PrimOp::FDiv.into()).pretty(), "Float -> Float -> Float");
        assert_eq!(primitive(PrimOp::Leq.into()).pretty(), "'t0 -> 't0 -> Bool");
        assert_eq!(primitive(PrimOp::Negate.into()).pretty(), "Int -> Int");
    }

    #[test]
    fn test_control_primitives() {
        assert_eq!(primitive(Primitive::If).pretty(), "Bool -> 't0 -> 't0 -> 't0");
        assert_eq!(primitive(Primitive::Fix).pretty(), "('t0 -> 't0) -> 't0");
        assert_eq!(primitive(Primitive::Bot).pretty(), "'t0");
    }

    #[test]
    fn test_tuple_family() {
        assert_eq!(primitive(Primitive::Tuple(2)).pretty(), "'t0 -> 't1 -> ('t0, 't1)");
        assert_eq!(primitive(Primitive::Tuple(0)).pretty(), "()");
        assert_eq!(primitive(Primitive::IsTuple(2)).pretty(), "('t0, 't1) -> Bool");
        assert_eq!(
            primitive(Primitive::Select { arity: 3, index: 2 }).pretty(),
            "('t0, 't1, 't2) -> 't1"
        );
        assert!(matches!(
            signature(
                &Constant::Primitive(Primitive::Select { arity: 2, index: 3 }),
                &registry()
            ),
            Err(TypeError::IncorrectlyTyped { .. })
        ));
    }

    #[test]
    fn test_constructor_family() {
        let scheme = signature(&Constant::Constructor("MkPair".to_string()), &registry()).unwrap();
        assert_eq!(scheme.vars, vec![
            TypeVar::with_name(0, "a".to_string()),
            TypeVar::with_name(1, "b".to_string()),
        ]);
        assert_eq!(scheme.ty.pretty(), "'a -> 'b -> Pair 'a 'b");

        assert_eq!(
            primitive(Primitive::ArgOf("MkPair".to_string())).pretty(),
            "Pair 'a 'b -> ('a, 'b)"
        );
        assert_eq!(primitive(Primitive::ArgOf("Unit".to_string())).pretty(), "Unit -> ()");
        assert_eq!(
            primitive(Primitive::IsConstructor("Unit".to_string())).pretty(),
            "Unit -> Bool"
        );
    }

    #[test]
    fn test_unknown_constructor() {
        assert_eq!(
            signature(&Constant::Constructor("Just".to_string()), &registry()),
            Err(TypeError::not_found("Just"))
        );
        assert_eq!(
            signature(
                &Constant::Primitive(Primitive::IsConstructor("Just".to_string())),
                &registry()
            ),
            Err(TypeError::not_found("Just"))
        );
    }
}
