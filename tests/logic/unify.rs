//! Unification invariants exercised through the public API.

use lantern::foundation::Term;
use lantern::language::parse_one;
use lantern::logic::{resolve, resolve_fully, unify, Bindings};

use proptest::prelude::*;

fn term(source: &str) -> Term {
    parse_one(source).unwrap()
}

#[test]
fn unification_is_symmetric_on_structures() {
    let a = term("(likes ?x pie)");
    let b = term("(likes abe ?y)");

    let forward = Bindings::root();
    let backward = Bindings::root();
    assert!(unify(&a, &b, &forward));
    assert!(unify(&b, &a, &backward));

    for env in [&forward, &backward] {
        assert_eq!(resolve(&term("?x"), env), term("abe"));
        assert_eq!(resolve(&term("?y"), env), term("pie"));
    }
}

#[test]
fn unify_never_rewrites_an_existing_binding() {
    let env = Bindings::root();
    assert!(unify(&term("?x"), &term("pie"), &env));

    // A conflicting attempt fails and leaves ?x untouched.
    assert!(!unify(&term("(f ?x)"), &term("(f cake)"), &env));
    assert_eq!(resolve(&term("?x"), &env), term("pie"));

    // A compatible attempt also leaves it untouched.
    assert!(unify(&term("(f ?x ?new)"), &term("(f pie plum)"), &env));
    assert_eq!(resolve(&term("?x"), &env), term("pie"));
}

// The reference semantics have no occurs check: a variable may unify with a
// structure containing itself. The binding is created and shallow resolution
// is safe; fully resolving such a binding would not terminate, which is the
// documented hazard.
#[test]
fn no_occurs_check_binds_a_variable_into_itself() {
    let env = Bindings::root();
    assert!(unify(&term("?x"), &term("(f ?x)"), &env));
    let bound = resolve(&term("?x"), &env);
    assert_eq!(format!("{bound}"), "(f ?x)");
}

proptest! {
    /// Success and bindings agree whichever side the variable is on.
    #[test]
    fn variable_side_does_not_matter(name in "[a-z][a-z0-9]{0,6}") {
        let target = Term::symbol(name);
        let left = Bindings::root();
        let right = Bindings::root();
        prop_assert!(unify(&Term::symbol("?v"), &target, &left));
        prop_assert!(unify(&target, &Term::symbol("?v"), &right));
        prop_assert_eq!(
            resolve_fully(&Term::symbol("?v"), &left),
            resolve_fully(&Term::symbol("?v"), &right)
        );
    }
}
