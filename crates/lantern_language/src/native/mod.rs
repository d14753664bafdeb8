//! The native procedure library.
//!
//! Natives are plain Rust functions registered into the global frame by
//! [`create_global_env`]. Each submodule covers one area; this module holds
//! the registry plus the environment-passing natives (`eval`, `apply`).

use lantern_foundation::{Error, Result, Term};

use crate::eval::{apply_procedure, evaluate};
use crate::value::{Env, NativeFn, NativeProcedure, Procedure, Value};

mod arithmetic;
mod io;
mod lists;
mod predicates;

/// Creates a root environment populated with every native procedure.
#[must_use]
pub fn create_global_env() -> Env {
    let env = Env::root();
    let register = |name: &'static str, func: NativeFn| {
        env.define(
            name,
            Value::Procedure(Procedure::Primitive(NativeProcedure { name, func })),
        );
    };

    arithmetic::register_all(&register);
    lists::register_all(&register);
    predicates::register_all(&register);
    io::register_all(&register);

    register("eval", NativeFn::WithEnv(native_eval));
    register("apply", NativeFn::WithEnv(native_apply));

    env
}

/// `(eval expr)` - evaluates a quoted term in the caller's environment, so
/// local bindings at the call site are visible.
fn native_eval(args: &[Value], env: &Env) -> Result<Value> {
    let [expr] = args else {
        return Err(Error::application(format!(
            "eval expected 1 argument, got {}",
            args.len()
        )));
    };
    let Value::Term(term) = expr else {
        return Err(Error::application(format!("eval: not an expression: {expr}")));
    };
    evaluate(term, env)
}

/// `(apply proc arg-list)` - calls a procedure on a list of arguments.
fn native_apply(args: &[Value], env: &Env) -> Result<Value> {
    let [procedure, arg_list] = args else {
        return Err(Error::application(format!(
            "apply expected 2 arguments, got {}",
            args.len()
        )));
    };
    let Value::Procedure(procedure) = procedure else {
        return Err(Error::application(format!("{procedure} is not callable")));
    };
    let elements = term_arg("apply", arg_list)?
        .list_elements()
        .ok_or_else(|| Error::application(format!("apply: not a list: {arg_list}")))?;
    let values = elements.into_iter().map(Value::Term).collect();
    apply_procedure(procedure, values, env)
}

/// Extracts a plain term argument, rejecting procedures.
fn term_arg<'a>(name: &str, value: &'a Value) -> Result<&'a Term> {
    value
        .as_term()
        .ok_or_else(|| Error::application(format!("{name}: not a term: {value}")))
}

/// Extracts a numeric argument.
fn number_arg(name: &str, value: &Value) -> Result<f64> {
    value
        .as_number()
        .ok_or_else(|| Error::application(format!("{name}: not a number: {value}")))
}

/// Checks an exact argument count.
fn expect_args<const N: usize>(name: &str, args: &[Value]) -> Result<[Value; N]> {
    args.to_vec().try_into().map_err(|_| {
        Error::application(format!(
            "{name} expected {N} argument(s), got {}",
            args.len()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_one;

    fn run(env: &Env, source: &str) -> String {
        format!("{}", evaluate(&parse_one(source).unwrap(), env).unwrap())
    }

    #[test]
    fn eval_runs_in_the_calling_environment() {
        let env = create_global_env();
        assert_eq!(run(&env, "(eval '(+ 1 2))"), "3");
        assert_eq!(run(&env, "(eval ''x)"), "x");
        // A quoted expression evaluated inside a procedure body sees that
        // body's bindings.
        run(&env, "(define (plus-one y) (eval '(+ y 1)))");
        assert_eq!(run(&env, "(plus-one 4)"), "5");
        run(&env, "(define y 10)");
        assert_eq!(run(&env, "(plus-one 4)"), "5");
    }

    #[test]
    fn apply_spreads_a_list() {
        let env = create_global_env();
        assert_eq!(run(&env, "(apply + '(1 2 3))"), "6");
        assert_eq!(run(&env, "(apply cons '(a b))"), "(a . b)");
    }

    #[test]
    fn the_global_frame_is_well_stocked() {
        let env = create_global_env();
        for name in ["+", "car", "null?", "display", "eval", "apply", "equal?"] {
            assert!(env.lookup(name).is_some(), "missing native: {name}");
        }
    }
}
