//! Evaluator tests: recursion, scoping, and tail-call behavior.

use lantern::language::{create_global_env, evaluate, parse, parse_one, Env};

fn run_all(env: &Env, source: &str) -> String {
    let mut last = String::new();
    for form in parse(source).unwrap() {
        last = format!("{}", evaluate(&form, env).unwrap());
    }
    last
}

fn run(env: &Env, source: &str) -> String {
    format!("{}", evaluate(&parse_one(source).unwrap(), env).unwrap())
}

#[test]
fn recursive_factorial() {
    let env = create_global_env();
    run_all(
        &env,
        "(define (fact n) (if (= n 0) 1 (* n (fact (- n 1)))))",
    );
    assert_eq!(run(&env, "(fact 5)"), "120");
}

#[test]
fn lexical_capture_versus_dynamic_lookup() {
    let env = create_global_env();
    run_all(
        &env,
        "(define x 1)
         (define lex (lambda () x))
         (define dyn (mu () x))
         (define (call-both x) (list (lex) (dyn)))",
    );
    // The lambda sees the x captured at definition time; the mu sees the
    // caller's x.
    assert_eq!(run(&env, "(call-both 2)"), "(1 2)");
    assert_eq!(run(&env, "(lex)"), "1");
    assert_eq!(run(&env, "(dyn)"), "1");
}

#[test]
fn running_total_over_deep_tail_recursion() {
    let env = create_global_env();
    run_all(
        &env,
        "(define (total n acc) (if (= n 0) acc (total (- n 1) (+ acc n))))",
    );
    // 1 + 2 + ... + 100000
    assert_eq!(run(&env, "(total 100000 0)"), "5000050000");
}

#[test]
fn mutual_tail_calls_alternate_without_growing_the_stack() {
    let env = create_global_env();
    run_all(
        &env,
        "(define (even-n? n) (if (= n 0) #t (odd-n? (- n 1))))
         (define (odd-n? n) (if (= n 0) #f (even-n? (- n 1))))",
    );
    assert_eq!(run(&env, "(even-n? 100001)"), "#f");
}

#[test]
fn higher_order_procedures_compose() {
    let env = create_global_env();
    run_all(
        &env,
        "(define (compose f g) (lambda (x) (f (g x))))
         (define (inc n) (+ n 1))
         (define (double n) (* n 2))",
    );
    assert_eq!(run(&env, "((compose inc double) 5)"), "11");
}

#[test]
fn quoted_structures_feed_the_list_natives() {
    let env = create_global_env();
    assert_eq!(run(&env, "(car (cdr '(a b c)))"), "b");
    assert_eq!(run(&env, "(length (append '(1 2) '(3 4)))"), "4");
}

#[test]
fn evaluation_errors_name_the_problem() {
    let env = create_global_env();
    let error = evaluate(&parse_one("(undefined-proc 1)").unwrap(), &env).unwrap_err();
    assert!(format!("{error}").contains("undefined-proc"));
}
