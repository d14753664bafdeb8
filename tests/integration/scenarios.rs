//! End-to-end scenarios through the session front end.

use std::fs;

use lantern::language::{parse, parse_one};
use lantern::runtime::{LineEditor, ReadResult, Repl, Response, Session};

/// Processes each form of `source` and returns everything it would print.
fn transcript(session: &mut Session, source: &str) -> Vec<String> {
    session
        .process_source(source)
        .unwrap()
        .iter()
        .filter_map(Response::render)
        .collect()
}

// =============================================================================
// Declarative scenarios
// =============================================================================

#[test]
fn grandparent_rule_finds_the_grandchild() {
    let mut session = Session::new();
    let output = transcript(
        &mut session,
        "(fact (parent abe homer))
         (fact (parent homer bart))
         (fact (grandparent ?a ?c) (parent ?a ?b) (parent ?b ?c))
         (query (grandparent abe ?who))",
    );
    assert_eq!(output, ["Success!\nwho: bart"]);
}

#[test]
fn unmatched_query_reports_failure_only() {
    let mut session = Session::new();
    let output = transcript(
        &mut session,
        "(fact (likes abe pie))
         (query (likes abe cake))",
    );
    assert_eq!(output, ["Failed."]);
}

#[test]
fn zero_goal_query_succeeds_immediately() {
    let mut session = Session::new();
    assert_eq!(transcript(&mut session, "(query)"), ["Success!\n"]);
}

// =============================================================================
// Expression scenarios
// =============================================================================

#[test]
fn factorial_evaluates_through_the_session() {
    let session = Session::new();
    session
        .eval(&parse_one("(define (fact n) (if (= n 0) 1 (* n (fact (- n 1)))))").unwrap())
        .unwrap();
    let value = session.eval(&parse_one("(fact 5)").unwrap()).unwrap();
    assert_eq!(format!("{value}"), "120");
}

#[test]
fn mu_tracks_the_caller_while_lambda_tracks_its_birthplace() {
    let session = Session::new();
    for source in [
        "(define x 1)",
        "(define lex (lambda () x))",
        "(define dyn (mu () x))",
        "(define (probe x) (list (lex) (dyn)))",
    ] {
        session.eval(&parse_one(source).unwrap()).unwrap();
    }
    let value = session.eval(&parse_one("(probe 2)").unwrap()).unwrap();
    assert_eq!(format!("{value}"), "(1 2)");
}

// =============================================================================
// Mixed flows
// =============================================================================

#[test]
fn facts_persist_across_inputs_and_loads() {
    let dir = std::env::temp_dir().join("lantern-scenario-load");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("ancestry.logic"),
        "(fact (parent abe homer))
         (fact (ancestor ?a ?b) (parent ?a ?b))
         (fact (ancestor ?a ?c) (parent ?a ?b) (ancestor ?b ?c))",
    )
    .unwrap();

    let mut session = Session::new();
    session.set_load_path(dir.clone());
    session.load("ancestry").unwrap();
    transcript(&mut session, "(fact (parent homer bart))");

    let output = transcript(&mut session, "(query (ancestor abe ?d))");
    assert_eq!(output, ["Success!\nd: homer\nd: bart"]);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn query_variables_render_in_first_appearance_order() {
    let mut session = Session::new();
    let output = transcript(
        &mut session,
        "(fact (edge a b))
         (fact (edge b c))
         (query (edge ?from ?to) (edge ?to ?next))",
    );
    assert_eq!(output, ["Success!\nfrom: a\tto: b\tnext: c"]);
}

// =============================================================================
// REPL front end
// =============================================================================

/// A scripted line editor for driving the REPL without a terminal.
struct ScriptedEditor {
    lines: Vec<String>,
    next: usize,
}

impl ScriptedEditor {
    fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(ToString::to_string).collect(),
            next: 0,
        }
    }
}

impl LineEditor for ScriptedEditor {
    fn read_line(&mut self, _prompt: &str) -> lantern::foundation::Result<ReadResult> {
        let Some(line) = self.lines.get(self.next) else {
            return Ok(ReadResult::Eof);
        };
        self.next += 1;
        Ok(ReadResult::Line(line.clone()))
    }

    fn add_history(&mut self, _line: &str) {}
}

#[test]
fn the_repl_survives_bad_input_and_keeps_state() {
    let mut repl = Repl::with_editor(ScriptedEditor::new(&[
        "(fact (parent abe homer))",
        "(fact incomplete",
        "  (parent homer bart)))",
        "(fact (parent homer bart))",
        "this is not a form (",
    ]))
    .without_banner();
    repl.run().unwrap();

    // The malformed inputs were reported, not fatal; the good facts stuck.
    assert_eq!(repl.session().database().len(), 2);
    let outcome = repl.respond("(query (parent ?p ?c))").unwrap();
    assert_eq!(
        outcome.as_deref(),
        Some("Success!\np: abe\tc: homer\np: homer\tc: bart")
    );
}

#[test]
fn repl_responses_match_the_session_renderings() {
    let mut repl = Repl::with_editor(ScriptedEditor::new(&[])).without_banner();
    assert_eq!(repl.respond("(fact (n 1))").unwrap(), None);
    assert_eq!(repl.respond("(? (n ?v))").unwrap().as_deref(), Some("Success!\nv: 1"));
    assert_eq!(
        repl.respond("(hello)").unwrap().as_deref(),
        Some("Please provide a fact or query.")
    );
}

#[test]
fn parse_round_trip_of_a_whole_program() {
    let source = "(fact (parent abe homer)) (query (parent ?x homer))";
    let forms = parse(source).unwrap();
    assert_eq!(forms.len(), 2);
}
