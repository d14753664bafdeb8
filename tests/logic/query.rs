//! Resolution search: chaining, freshness, ordering, and the depth bound.

use std::ops::ControlFlow;
use std::sync::Arc;

use lantern::foundation::Term;
use lantern::language::parse;
use lantern::logic::{
    resolve_fully, variables_in, Bindings, Fact, FactDatabase, Resolver, DEPTH_LIMIT,
};

fn database(clauses: &[&str]) -> FactDatabase {
    let mut db = FactDatabase::new();
    for clause in clauses {
        let relations = parse(clause).unwrap();
        db.add(Fact::from_relations(&relations).unwrap());
    }
    db
}

fn answers(db: &FactDatabase, query: &str) -> Vec<String> {
    let goals = parse(query).unwrap();
    let variables = variables_in(&goals);
    Resolver::new()
        .solutions(db, &goals)
        .iter()
        .map(|env| {
            variables
                .iter()
                .map(|name| format!("{}", resolve_fully(&Term::symbol(Arc::clone(name)), env)))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

#[test]
fn facts_chain_through_rules() {
    let db = database(&[
        "(parent abe homer)",
        "(parent homer bart)",
        "(grandparent ?a ?c) (parent ?a ?b) (parent ?b ?c)",
    ]);
    assert_eq!(answers(&db, "(grandparent abe ?who)"), ["bart"]);
}

#[test]
fn solutions_follow_fact_insertion_order() {
    let db = database(&[
        "(likes homer beer)",
        "(likes homer donuts)",
        "(likes homer tv)",
    ]);
    assert_eq!(answers(&db, "(likes homer ?what)"), ["beer", "donuts", "tv"]);
}

#[test]
fn one_rule_used_twice_gets_disjoint_variables() {
    // Proving (app (1 2) (3) ?what) applies the recursive clause twice; its
    // ?a/?r/?y/?z must not collide between applications.
    let db = database(&[
        "(app () ?x ?x)",
        "(app (?a . ?r) ?y (?a . ?z)) (app ?r ?y ?z)",
    ]);
    assert_eq!(answers(&db, "(app (1 2) (3) ?what)"), ["(1 2 3)"]);
    assert_eq!(
        answers(&db, "(app ?left ?right (1 2 3))"),
        ["() (1 2 3)", "(1) (2 3)", "(1 2) (3)", "(1 2 3) ()"]
    );
}

#[test]
fn self_referential_rule_fails_instead_of_looping() {
    let db = database(&["(loop ?x) (loop ?x)"]);
    assert!(answers(&db, "(loop a)").is_empty());
}

#[test]
fn the_default_depth_limit_is_twenty() {
    assert_eq!(DEPTH_LIMIT, 20);
}

#[test]
fn search_streams_until_told_to_stop() {
    let db = database(&["(n 1)", "(n 2)", "(n 3)"]);
    let goals = parse("(n ?i)").unwrap();
    let mut seen = Vec::new();
    let flow = Resolver::new().search(&db, &goals, &Bindings::root(), 0, &mut |env| {
        seen.push(format!("{}", resolve_fully(&Term::symbol("?i"), env)));
        if seen.len() == 2 {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });
    assert_eq!(flow, ControlFlow::Break(()));
    assert_eq!(seen, ["1", "2"]);
}

#[test]
fn conjunction_constrains_across_goals() {
    let db = database(&[
        "(parent abe homer)",
        "(parent abe herb)",
        "(parent homer bart)",
    ]);
    assert_eq!(answers(&db, "(parent abe ?p) (parent ?p ?c)"), ["homer bart"]);
}
