use super::{shape, DeltaOutcome, DeltaRule, Shape};
use crate::lambda::{Constant, Term};
use crate::primitive::Primitive;

/// `isa_<n>-tuple` and `sel_<n>_<i>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TupleIntrospection;

/// `isa_constr_<C>` and `argof_<C>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstructorIntrospection;

/// `isa_int_<v>`, `isa_float_<v>`, `isa_char_<c>` and `isa_bool_<b>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiteralDiscriminators;

fn primitive(head: &Constant) -> Option<&Primitive> {
    head.as_primitive()
}

fn answer(value: bool) -> DeltaOutcome {
    DeltaOutcome::Reduced(Term::bool(value))
}

impl DeltaRule for TupleIntrospection {
    fn name(&self) -> &'static str {
        "tuple-introspection"
    }

    fn arity(&self) -> usize {
        1
    }

    fn accepts(&self, head: &Constant) -> bool {
        matches!(
            primitive(head),
            Some(Primitive::IsTuple(_) | Primitive::Select { .. })
        )
    }

    fn apply(&self, head: &Constant, args: &[&Term]) -> DeltaOutcome {
        let Some(&arg) = args.first() else {
            return DeltaOutcome::Declined;
        };
        match (primitive(head), shape(arg)) {
            (_, Shape::Pending) => DeltaOutcome::NeedsArgument(0),
            (Some(Primitive::IsTuple(expected)), Shape::Tuple(arity, _)) => {
                answer(arity == *expected)
            }
            (Some(Primitive::IsTuple(_)), _) => answer(false),
            (Some(Primitive::Select { arity, index }), Shape::Tuple(found, components))
                if found == *arity =>
            {
                match components.get(index.wrapping_sub(1)) {
                    Some(component) => DeltaOutcome::Reduced((*component).clone()),
                    None => DeltaOutcome::Declined,
                }
            }
            _ => DeltaOutcome::Declined,
        }
    }
}

impl DeltaRule for ConstructorIntrospection {
    fn name(&self) -> &'static str {
        "constructor-introspection"
    }

    fn arity(&self) -> usize {
        1
    }

    fn accepts(&self, head: &Constant) -> bool {
        matches!(
            primitive(head),
            Some(Primitive::IsConstructor(_) | Primitive::ArgOf(_))
        )
    }

    fn apply(&self, head: &Constant, args: &[&Term]) -> DeltaOutcome {
        let Some(&arg) = args.first() else {
            return DeltaOutcome::Declined;
        };
        match (primitive(head), shape(arg)) {
            (_, Shape::Pending) => DeltaOutcome::NeedsArgument(0),
            (Some(Primitive::IsConstructor(expected)), Shape::Data(name, _)) => {
                answer(name == expected)
            }
            (Some(Primitive::IsConstructor(_)), _) => answer(false),
            (Some(Primitive::ArgOf(expected)), Shape::Data(name, fields)) if name == expected => {
                DeltaOutcome::Reduced(pack_fields(fields))
            }
            _ => DeltaOutcome::Declined,
        }
    }
}

/// A single field as is, otherwise the tuple of all fields.
fn pack_fields(fields: Vec<&Term>) -> Term {
    if let [single] = fields.as_slice() {
        return (*single).clone();
    }
    let arity = fields.len();
    Term::apply_all(
        Term::primitive(Primitive::Tuple(arity)),
        fields.into_iter().cloned(),
    )
}

impl DeltaRule for LiteralDiscriminators {
    fn name(&self) -> &'static str {
        "literal-discriminators"
    }

    fn arity(&self) -> usize {
        1
    }

    fn accepts(&self, head: &Constant) -> bool {
        matches!(primitive(head), Some(Primitive::IsLiteral(_)))
    }

    fn apply(&self, head: &Constant, args: &[&Term]) -> DeltaOutcome {
        let Some(Primitive::IsLiteral(expected)) = primitive(head) else {
            return DeltaOutcome::Declined;
        };
        let Some(&arg) = args.first() else {
            return DeltaOutcome::Declined;
        };
        match shape(arg) {
            Shape::Literal(found) => answer(expected.matches(found)),
            Shape::Pending => DeltaOutcome::NeedsArgument(0),
            Shape::Tuple(..) | Shape::Data(..) | Shape::Function => answer(false),
        }
    }
}
