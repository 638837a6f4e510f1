//! Type checking of desugared programs and hand-built terms

use anyhow::Result;
use hsreduce::ast::{
    ConstructorSignature, DataDeclaration, Declaration, Expression, Ident, Pattern, Program,
    TypeExpr,
};
use hsreduce::lambda::Term;
use hsreduce::primitive::{PrimOp, Primitive};
use hsreduce::types::{Type, TypeError};
use hsreduce::{Pipeline, TypeChecker};

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

/// Desugars `expr` and type checks the result against the program's data
/// declarations.
fn type_of(program: &Program, expr: &Expression) -> Result<std::result::Result<Type, TypeError>> {
    let desugared = Pipeline::default().run(program, expr)?;
    let mut checker = TypeChecker::new();
    for declaration in desugared.data_declarations {
        checker.add_data_declaration(declaration)?;
    }
    Ok(checker.check_type(&desugared.term))
}

#[test]
fn plus_on_char_and_int_cannot_unify() {
    let term = Term::apply_all(
        Term::primitive(Primitive::Op(PrimOp::Plus)),
        [Term::char('a'), Term::int(1)],
    );
    let result = TypeChecker::new().check_type(&term);
    assert!(matches!(result, Err(TypeError::CannotUnify { .. })));
}

#[test]
fn list_length_is_int() -> Result<()> {
    let program = Program::new(vec![
        Declaration::Data(list_declaration()),
        Declaration::function(
            "len",
            vec![Pattern::constructor("Nil", vec![])],
            Expression::int(0),
        ),
        Declaration::function(
            "len",
            vec![Pattern::constructor(
                "Cons",
                vec![Pattern::Wildcard, Pattern::var("xs")],
            )],
            Expression::apply(
                Expression::var("plus"),
                vec![
                    Expression::int(1),
                    Expression::apply(Expression::var("len"), vec![Expression::var("xs")]),
                ],
            ),
        ),
    ]);

    let applied = Expression::apply(
        Expression::var("len"),
        vec![Expression::apply(
            Expression::constructor("Cons"),
            vec![Expression::char('c'), Expression::constructor("Nil")],
        )],
    );
    assert_eq!(type_of(&program, &applied)?, Ok(Type::Int));

    let function = type_of(&program, &Expression::var("len"))??;
    assert_eq!(function.pretty(), "List 't0 -> Int");
    Ok(())
}

#[test]
fn tuple_patterns_type_as_tuples() -> Result<()> {
    // swap (a, b) = (b, a)
    let program = Program::new(vec![Declaration::function(
        "swap",
        vec![Pattern::tuple(vec![Pattern::var("a"), Pattern::var("b")])],
        Expression::tuple(vec![Expression::var("b"), Expression::var("a")]),
    )]);
    let swapped = type_of(&program, &Expression::var("swap"))??;
    assert_eq!(swapped.pretty(), "('t0, 't1) -> ('t1, 't0)");
    Ok(())
}

#[test]
fn ill_typed_program_is_rejected() -> Result<()> {
    // f x = if x then 1 else 'z'
    let program = Program::new(vec![Declaration::function(
        "f",
        vec![Pattern::var("x")],
        Expression::if_then_else(Expression::var("x"), Expression::int(1), Expression::char('z')),
    )]);
    let result = type_of(&program, &Expression::var("f"))?;
    assert!(matches!(result, Err(TypeError::CannotUnify { .. })));
    Ok(())
}

#[test]
fn constructor_without_declaration_is_not_found() {
    let term = Term::app(Term::constructor("Just"), Term::int(1));
    assert_eq!(
        TypeChecker::new().check_type(&term),
        Err(TypeError::TypeNotFound {
            constant: "Just".to_string()
        })
    );
}

#[test]
fn registry_rejects_conflicting_declarations() -> Result<()> {
    let mut checker = TypeChecker::new();
    checker.add_data_declaration(list_declaration())?;
    checker.add_data_declaration(list_declaration())?;

    let conflicting = DataDeclaration::new(
        "Seq",
        vec![Ident::new("a")],
        vec![ConstructorSignature::new("Nil", vec![])],
    );
    assert!(matches!(
        checker.add_data_declaration(conflicting),
        Err(TypeError::InconsistentDataDeclaration { .. })
    ));
    assert_eq!(checker.registry().len(), 1);
    Ok(())
}

#[test]
fn selector_outside_its_tuple_is_incorrectly_typed() {
    let pair = Term::apply_all(
        Term::primitive(Primitive::Tuple(2)),
        [Term::int(1), Term::char('b')],
    );
    let second = Term::app(
        Term::primitive(Primitive::Select { arity: 2, index: 2 }),
        pair.clone(),
    );
    assert_eq!(TypeChecker::new().check_type(&second), Ok(Type::Char));

    let third = Term::app(
        Term::primitive(Primitive::Select { arity: 2, index: 3 }),
        pair,
    );
    let Err(TypeError::IncorrectlyTyped { term, reason }) =
        TypeChecker::new().check_type(&third)
    else {
        panic!("selector past the end of a pair must be rejected");
    };
    assert_eq!(term, "sel_2_3");
    assert!(reason.contains("2-tuple"));
}
