//! Reader tests: source text to terms and back.

use lantern::foundation::Term;
use lantern::language::{parse, parse_one};

#[test]
fn reads_nested_structure() {
    let term = parse_one("(define (square x) (* x x))").unwrap();
    assert_eq!(format!("{term}"), "(define (square x) (* x x))");
}

#[test]
fn reads_dotted_pairs_and_quote_sugar() {
    assert_eq!(format!("{}", parse_one("(a . (b . ()))").unwrap()), "(a b)");
    assert_eq!(format!("{}", parse_one("'(1 . 2)").unwrap()), "(quote (1 . 2))");
}

#[test]
fn reads_logic_variables_as_plain_symbols() {
    let term = parse_one("(parent ?who bart)").unwrap();
    let elements = term.list_elements().unwrap();
    assert_eq!(elements[1], Term::symbol("?who"));
    assert!(elements[1].is_variable());
}

#[test]
fn comments_and_whitespace_are_ignored() {
    let forms = parse("; a header comment\n(a) ; inline\n\n  (b)\n").unwrap();
    assert_eq!(forms.len(), 2);
}

#[test]
fn parse_errors_carry_positions() {
    let error = parse("(a\n(b").unwrap_err();
    let message = format!("{error}");
    assert!(message.contains("parse error"), "got: {message}");
}

#[test]
fn display_is_reparseable() {
    for source in [
        "(fact (app (?a . ?r) ?y (?a . ?z)) (app ?r ?y ?z))",
        "(1 2.5 #t \"text\" sym)",
        "(a . b)",
    ] {
        let term = parse_one(source).unwrap();
        let reparsed = parse_one(&format!("{term}")).unwrap();
        assert_eq!(term, reparsed);
    }
}
