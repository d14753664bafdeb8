//! The trampolined evaluator.
//!
//! [`evaluate`] drives a loop that rewrites `(expression, environment)` pairs
//! in place instead of recursing, so tail calls consume no Rust stack. Special
//! forms and procedure applications that end in tail position hand the next
//! pair back to the loop; everything else produces a finished [`Value`].

use std::rc::Rc;
use std::sync::Arc;

use lantern_foundation::{Error, Result, Term};

use crate::value::{Env, LambdaProcedure, MuProcedure, NativeFn, Procedure, Value};

/// One turn of the trampoline: either a finished value or the next
/// expression/environment pair to evaluate in tail position.
enum Flow {
    Done(Value),
    Continue(Term, Env),
}

/// Evaluates an expression in the given environment.
///
/// Tail calls are eliminated: deep chains of tail-recursive applications and
/// tail-position special forms (`if`, `cond`, `begin`, `let`, `and`, `or`)
/// run in constant Rust stack space.
///
/// # Errors
///
/// Returns an error for unbound symbols, malformed special forms, arity
/// mismatches, and anything a native signals.
pub fn evaluate(expr: &Term, env: &Env) -> Result<Value> {
    let mut expr = expr.clone();
    let mut env = env.clone();
    loop {
        match step(&expr, &env)? {
            Flow::Done(value) => return Ok(value),
            Flow::Continue(next_expr, next_env) => {
                expr = next_expr;
                env = next_env;
            }
        }
    }
}

/// Evaluates one expression, stopping at the next tail position.
fn step(expr: &Term, env: &Env) -> Result<Flow> {
    match expr {
        Term::Symbol(name) => match env.lookup(name) {
            Some(value) => Ok(Flow::Done(value)),
            None => Err(Error::unbound_name(name.as_ref())),
        },
        Term::Bool(_) | Term::Number(_) | Term::Text(_) | Term::Empty => {
            Ok(Flow::Done(Value::Term(expr.clone())))
        }
        Term::Pair(pair) => {
            if !expr.is_proper_list() {
                return Err(Error::malformed(format!("{expr}")));
            }
            if let Some(name) = pair.first.as_symbol() {
                if let Some(flow) = eval_special_form(name, &pair.second, env)? {
                    return Ok(flow);
                }
            }
            eval_application(&pair.first, &pair.second, env)
        }
    }
}

/// Dispatches on special-form keywords; returns `None` when the head symbol
/// is an ordinary identifier.
fn eval_special_form(name: &str, rest: &Term, env: &Env) -> Result<Option<Flow>> {
    let flow = match name {
        "quote" => eval_quote(rest)?,
        "if" => eval_if(rest, env)?,
        "and" => eval_and(rest, env)?,
        "or" => eval_or(rest, env)?,
        "cond" => eval_cond(rest, env)?,
        "begin" => eval_begin(rest, env)?,
        "let" => eval_let(rest, env)?,
        "lambda" => Flow::Done(eval_lambda(rest, env)?),
        "mu" => Flow::Done(eval_mu(rest)?),
        "define" => Flow::Done(eval_define(rest, env)?),
        _ => return Ok(None),
    };
    Ok(Some(flow))
}

/// Evaluates operator and operands, then applies.
///
/// Calls to `lambda` and `mu` procedures continue in the trampoline; native
/// calls finish immediately.
fn eval_application(operator: &Term, operands: &Term, env: &Env) -> Result<Flow> {
    let procedure = match evaluate(operator, env)? {
        Value::Procedure(procedure) => procedure,
        other => return Err(Error::application(format!("{other} is not callable"))),
    };

    let mut args = Vec::new();
    for operand in operands.iter() {
        args.push(evaluate(operand, env)?);
    }

    match procedure {
        Procedure::Primitive(native) => {
            let result = match native.func {
                NativeFn::Plain(func) => func(&args),
                NativeFn::WithEnv(func) => func(&args, env),
            }?;
            Ok(Flow::Done(result))
        }
        Procedure::Lambda(lambda) => {
            check_arity(&lambda.formals, args.len(), "lambda")?;
            let frame = lambda.env.make_call_frame(&lambda.formals, args);
            Ok(Flow::Continue(lambda.body.clone(), frame))
        }
        Procedure::Mu(mu) => {
            check_arity(&mu.formals, args.len(), "mu")?;
            // Dynamic scope: the call frame chains from the caller, not from
            // any frame captured at creation.
            let frame = env.make_call_frame(&mu.formals, args);
            Ok(Flow::Continue(mu.body.clone(), frame))
        }
    }
}

/// Applies an already-evaluated procedure to already-evaluated arguments.
///
/// This is the non-tail entry point used by natives like `apply`; the body of
/// a closure still runs through the trampoline internally.
///
/// # Errors
///
/// Returns an error on arity mismatches and anything the body signals.
pub fn apply_procedure(procedure: &Procedure, args: Vec<Value>, env: &Env) -> Result<Value> {
    match procedure {
        Procedure::Primitive(native) => match native.func {
            NativeFn::Plain(func) => func(&args),
            NativeFn::WithEnv(func) => func(&args, env),
        },
        Procedure::Lambda(lambda) => {
            check_arity(&lambda.formals, args.len(), "lambda")?;
            let frame = lambda.env.make_call_frame(&lambda.formals, args);
            evaluate(&lambda.body, &frame)
        }
        Procedure::Mu(mu) => {
            check_arity(&mu.formals, args.len(), "mu")?;
            let frame = env.make_call_frame(&mu.formals, args);
            evaluate(&mu.body, &frame)
        }
    }
}

fn check_arity(formals: &[Arc<str>], got: usize, what: &str) -> Result<()> {
    if formals.len() == got {
        Ok(())
    } else {
        Err(Error::application(format!(
            "{what} expected {} arguments, got {got}",
            formals.len()
        )))
    }
}

/// `(quote x)` - returns the operand unevaluated.
fn eval_quote(rest: &Term) -> Result<Flow> {
    let [quoted] = expect_operands::<1>(rest, "quote")?;
    Ok(Flow::Done(Value::Term(quoted)))
}

/// `(if test consequent alternative)` - exactly three operands; the chosen
/// branch is in tail position.
fn eval_if(rest: &Term, env: &Env) -> Result<Flow> {
    let [test, consequent, alternative] = expect_operands::<3>(rest, "if")?;
    let chosen = if evaluate(&test, env)?.is_truthy() {
        consequent
    } else {
        alternative
    };
    Ok(Flow::Continue(chosen, env.clone()))
}

/// `(and e...)` - evaluates left to right, stopping at the first falsy value;
/// the last operand is in tail position. `(and)` is `#t`.
fn eval_and(rest: &Term, env: &Env) -> Result<Flow> {
    let mut current = rest;
    loop {
        match current {
            Term::Empty => return Ok(Flow::Done(Value::from(true))),
            Term::Pair(pair) => {
                if pair.second.is_empty_list() {
                    return Ok(Flow::Continue(pair.first.clone(), env.clone()));
                }
                let value = evaluate(&pair.first, env)?;
                if !value.is_truthy() {
                    return Ok(Flow::Done(value));
                }
                current = &pair.second;
            }
            _ => return Err(Error::malformed(format!("(and . {rest})"))),
        }
    }
}

/// `(or e...)` - evaluates left to right, stopping at the first truthy value;
/// the last operand is in tail position. `(or)` is `#f`.
fn eval_or(rest: &Term, env: &Env) -> Result<Flow> {
    let mut current = rest;
    loop {
        match current {
            Term::Empty => return Ok(Flow::Done(Value::from(false))),
            Term::Pair(pair) => {
                if pair.second.is_empty_list() {
                    return Ok(Flow::Continue(pair.first.clone(), env.clone()));
                }
                let value = evaluate(&pair.first, env)?;
                if value.is_truthy() {
                    return Ok(Flow::Done(value));
                }
                current = &pair.second;
            }
            _ => return Err(Error::malformed(format!("(or . {rest})"))),
        }
    }
}

/// `(cond (test body...)... [(else body...)])`.
///
/// The first clause with a truthy test wins; its body is in tail position. A
/// truthy test with an empty body yields the test's value. No matching clause
/// yields `()`.
fn eval_cond(rest: &Term, env: &Env) -> Result<Flow> {
    let clauses = rest
        .list_elements()
        .ok_or_else(|| Error::malformed(format!("(cond . {rest})")))?;
    let last = clauses.len().saturating_sub(1);
    for (index, clause) in clauses.iter().enumerate() {
        let parts = clause
            .list_elements()
            .ok_or_else(|| Error::malformed(format!("cond clause: {clause}")))?;
        let Some((test, body)) = parts.split_first() else {
            return Err(Error::malformed(format!("cond clause: {clause}")));
        };

        if test.as_symbol().is_some_and(|name| name.as_ref() == "else") {
            if index != last {
                return Err(Error::malformed("else clause must come last".to_string()));
            }
            if body.is_empty() {
                return Err(Error::malformed("else clause requires a body".to_string()));
            }
            return Ok(Flow::Continue(sequence_to_expr(body), env.clone()));
        }

        let value = evaluate(test, env)?;
        if value.is_truthy() {
            if body.is_empty() {
                return Ok(Flow::Done(value));
            }
            return Ok(Flow::Continue(sequence_to_expr(body), env.clone()));
        }
    }
    Ok(Flow::Done(Value::Term(Term::Empty)))
}

/// `(begin e e...)` - at least one operand, evaluated in order; the last
/// expression is in tail position.
fn eval_begin(rest: &Term, env: &Env) -> Result<Flow> {
    let mut current = rest;
    loop {
        match current {
            // Only reachable at entry: the loop returns before an empty tail.
            Term::Empty => {
                return Err(Error::malformed("begin requires at least one operand".to_string()));
            }
            Term::Pair(pair) => {
                if pair.second.is_empty_list() {
                    return Ok(Flow::Continue(pair.first.clone(), env.clone()));
                }
                evaluate(&pair.first, env)?;
                current = &pair.second;
            }
            _ => return Err(Error::malformed(format!("(begin . {rest})"))),
        }
    }
}

/// `(let ((name expr)...) body...)` - initializers are evaluated in the outer
/// environment, then the body runs in a fresh child frame, in tail position.
fn eval_let(rest: &Term, env: &Env) -> Result<Flow> {
    let operands = rest
        .list_elements()
        .ok_or_else(|| Error::malformed(format!("(let . {rest})")))?;
    let Some((bindings, body)) = operands.split_first() else {
        return Err(Error::malformed(format!("(let . {rest})")));
    };
    if body.is_empty() {
        return Err(Error::malformed("let requires a body".to_string()));
    }

    let binding_forms = bindings
        .list_elements()
        .ok_or_else(|| Error::malformed(format!("let bindings: {bindings}")))?;
    let frame = env.child();
    for form in &binding_forms {
        let parts = form.list_elements();
        let Some([name, init]) = parts.as_deref() else {
            return Err(Error::malformed(format!("let binding: {form}")));
        };
        let Some(name) = name.as_symbol() else {
            return Err(Error::malformed(format!("let binding: {form}")));
        };
        let value = evaluate(init, env)?;
        frame.define(Arc::clone(name), value);
    }
    Ok(Flow::Continue(sequence_to_expr(body), frame))
}

/// `(lambda (formals...) body...)` - captures the defining environment.
fn eval_lambda(rest: &Term, env: &Env) -> Result<Value> {
    let (formals, body) = parse_procedure_form(rest, "lambda")?;
    Ok(Value::Procedure(Procedure::Lambda(Rc::new(
        LambdaProcedure {
            formals,
            body,
            env: env.clone(),
        },
    ))))
}

/// `(mu (formals...) body...)` - captures nothing; the body will see the
/// caller's bindings.
fn eval_mu(rest: &Term) -> Result<Value> {
    let (formals, body) = parse_procedure_form(rest, "mu")?;
    Ok(Value::Procedure(Procedure::Mu(Rc::new(MuProcedure {
        formals,
        body,
    }))))
}

/// `(define name expr)` or the sugar `(define (name formals...) body...)`.
///
/// Yields the defined name as a symbol.
fn eval_define(rest: &Term, env: &Env) -> Result<Value> {
    let operands = rest
        .list_elements()
        .ok_or_else(|| Error::malformed(format!("(define . {rest})")))?;
    let Some((target, remainder)) = operands.split_first() else {
        return Err(Error::malformed(format!("(define . {rest})")));
    };

    match target {
        Term::Symbol(name) => {
            let [init] = remainder else {
                return Err(Error::malformed(format!("(define . {rest})")));
            };
            let value = evaluate(init, env)?;
            env.define(Arc::clone(name), value);
            Ok(Value::Term(Term::Symbol(Arc::clone(name))))
        }
        Term::Pair(signature) => {
            let Some(name) = signature.first.as_symbol() else {
                return Err(Error::malformed(format!("(define . {rest})")));
            };
            let lambda_form = Term::cons(signature.second.clone(), Term::list(remainder.to_vec()));
            let value = eval_lambda(&lambda_form, env)?;
            env.define(Arc::clone(name), value);
            Ok(Value::Term(Term::Symbol(Arc::clone(name))))
        }
        _ => Err(Error::malformed(format!("(define . {rest})"))),
    }
}

/// Parses `((formals...) body...)` shared by `lambda` and `mu`.
fn parse_procedure_form(rest: &Term, what: &str) -> Result<(Vec<Arc<str>>, Term)> {
    let operands = rest
        .list_elements()
        .ok_or_else(|| Error::malformed(format!("({what} . {rest})")))?;
    let Some((formals_term, body)) = operands.split_first() else {
        return Err(Error::malformed(format!("({what} . {rest})")));
    };
    if body.is_empty() {
        return Err(Error::malformed(format!("{what} requires a body")));
    }
    let formals = check_formals(formals_term)?;
    Ok((formals, sequence_to_expr(body)))
}

/// Validates a formal-parameter list: a proper list of distinct symbols.
fn check_formals(formals: &Term) -> Result<Vec<Arc<str>>> {
    let elements = formals
        .list_elements()
        .ok_or_else(|| Error::malformed(format!("formal parameters: {formals}")))?;
    let mut names: Vec<Arc<str>> = Vec::with_capacity(elements.len());
    for element in &elements {
        let Some(name) = element.as_symbol() else {
            return Err(Error::malformed(format!("formal parameter: {element}")));
        };
        if names.iter().any(|seen| seen == name) {
            return Err(Error::malformed(format!("duplicate formal: {name}")));
        }
        names.push(Arc::clone(name));
    }
    Ok(names)
}

/// Wraps a multi-expression body in `begin`; a single expression stays bare.
fn sequence_to_expr(body: &[Term]) -> Term {
    if let [single] = body {
        single.clone()
    } else {
        Term::cons(Term::symbol("begin"), Term::list(body.to_vec()))
    }
}

/// Fetches exactly `N` operands from an operand list.
fn expect_operands<const N: usize>(rest: &Term, what: &str) -> Result<[Term; N]> {
    let operands = rest
        .list_elements()
        .ok_or_else(|| Error::malformed(format!("({what} . {rest})")))?;
    operands
        .try_into()
        .map_err(|_| Error::malformed(format!("{what} takes {N} operand(s)")))
}
