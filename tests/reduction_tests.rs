//! Reduction of hand-built lambda terms with the standard delta rules

use anyhow::Result;
use hsreduce::config::ReductionOptions;
use hsreduce::delta::DeltaRules;
use hsreduce::error::ReductionError;
use hsreduce::lambda::reduce::Reducer;
use hsreduce::lambda::Term;
use hsreduce::names;
use hsreduce::primitive::{PrimOp, Primitive};
use hsreduce::{whno_reduce, whno_step};

fn prim(name: &str) -> Term {
    Term::primitive(names::decode(name).unwrap_or_else(|| panic!("unknown primitive {}", name)))
}

fn op(op: PrimOp) -> Term {
    Term::primitive(Primitive::Op(op))
}

fn pair(first: Term, second: Term) -> Term {
    Term::apply_all(prim("tuple_2"), [first, second])
}

#[test]
fn tuple_selection_and_discrimination() {
    let rules = DeltaRules::standard();
    let pair = pair(Term::char('a'), Term::int(7));

    assert_eq!(
        whno_reduce(Term::app(prim("sel_2_2"), pair.clone()), &rules),
        Term::int(7)
    );
    assert_eq!(
        whno_reduce(Term::app(prim("isa_2-tuple"), pair.clone()), &rules),
        Term::bool(true)
    );
    assert_eq!(
        whno_reduce(Term::app(prim("isa_3-tuple"), pair), &rules),
        Term::bool(false)
    );
}

#[test]
fn fix_unfolds_exactly_once_per_step() {
    let rules = DeltaRules::standard();
    let fix_f = Term::app(prim("fix"), Term::var("f"));

    let stepped = whno_step(&fix_f, &rules);
    assert_eq!(stepped, Some(Term::app(Term::var("f"), fix_f.clone())));
}

#[test]
fn substitution_avoids_capture() {
    let term = Term::abs("y", Term::var("x"));
    let result = term.substitute("x", &Term::var("y"));
    assert_eq!(result, Term::abs("y0", Term::var("y")));
    assert_eq!(result.to_string(), "\\y0 -> y");
}

#[test]
fn strict_operators_force_their_arguments() {
    let rules = DeltaRules::standard();
    // mult (plus 1 2) ((\x -> x) 4)
    let term = Term::apply_all(
        op(PrimOp::Mult),
        [
            Term::apply_all(op(PrimOp::Plus), [Term::int(1), Term::int(2)]),
            Term::app(Term::abs("x", Term::var("x")), Term::int(4)),
        ],
    );
    assert_eq!(whno_reduce(term, &rules), Term::int(12));
}

#[test]
fn branch_selects_lazily() {
    let rules = DeltaRules::standard();
    let diverging = Term::app(prim("fix"), Term::abs("x", Term::var("x")));
    // if (lt 1 2) 'y' <diverging>
    let term = Term::apply_all(
        prim("if"),
        [
            Term::apply_all(op(PrimOp::Lt), [Term::int(1), Term::int(2)]),
            Term::char('y'),
            diverging,
        ],
    );
    assert_eq!(whno_reduce(term, &rules), Term::char('y'));
}

#[test]
fn division_by_zero_is_stuck() {
    let rules = DeltaRules::standard();
    let term = Term::apply_all(op(PrimOp::Div), [Term::int(1), Term::int(0)]);
    assert_eq!(whno_step(&term, &rules), None);
    assert_eq!(whno_reduce(term.clone(), &rules), term);
}

#[test]
fn constructor_introspection() {
    let rules = DeltaRules::standard();
    let value = Term::apply_all(
        Term::constructor("Cons"),
        [Term::int(1), Term::constructor("Nil")],
    );

    assert_eq!(
        whno_reduce(Term::app(prim("isa_constr_Cons"), value.clone()), &rules),
        Term::bool(true)
    );
    assert_eq!(
        whno_reduce(Term::app(prim("isa_constr_Nil"), value.clone()), &rules),
        Term::bool(false)
    );
    assert_eq!(
        whno_reduce(
            Term::app(prim("sel_2_1"), Term::app(prim("argof_Cons"), value)),
            &rules
        ),
        Term::int(1)
    );
}

#[test]
fn step_limit_stops_divergence() {
    let reducer = Reducer::new(
        DeltaRules::standard(),
        ReductionOptions::default().with_step_limit(50),
    );
    let omega = Term::app(prim("fix"), Term::abs("x", Term::var("x")));
    assert_eq!(
        reducer.reduce(omega),
        Err(ReductionError::StepLimitExceeded { limit: 50 })
    );
}

#[test]
fn normal_mode_reduces_under_the_head() -> Result<()> {
    let term = pair(
        Term::apply_all(op(PrimOp::Plus), [Term::int(1), Term::int(2)]),
        Term::int(3),
    );

    let weak = Reducer::standard().reduce(term.clone())?;
    assert_eq!(weak.term, term);
    assert_eq!(weak.steps, 0);

    let normal = Reducer::new(DeltaRules::standard(), ReductionOptions::normal()).reduce(term)?;
    assert_eq!(normal.term, pair(Term::int(3), Term::int(3)));
    assert_eq!(normal.steps, 1);
    Ok(())
}
