//! Type tests, equality, and boolean natives.

use lantern_foundation::{Result, Term};

use crate::value::{NativeFn, Value};

use super::{expect_args, number_arg};

/// Registers the predicate natives.
pub fn register_all(register: &impl Fn(&'static str, NativeFn)) {
    register("null?", NativeFn::Plain(|args| type_test(args, "null?", |t| t.is_empty_list())));
    register("pair?", NativeFn::Plain(|args| type_test(args, "pair?", |t| t.as_pair().is_some())));
    register("list?", NativeFn::Plain(|args| type_test(args, "list?", Term::is_proper_list)));
    register("symbol?", NativeFn::Plain(|args| {
        type_test(args, "symbol?", |t| t.as_symbol().is_some())
    }));
    register("number?", NativeFn::Plain(|args| {
        type_test(args, "number?", |t| t.as_number().is_some())
    }));
    register("boolean?", NativeFn::Plain(|args| {
        type_test(args, "boolean?", |t| matches!(t, Term::Bool(_)))
    }));
    register("string?", NativeFn::Plain(|args| {
        type_test(args, "string?", |t| matches!(t, Term::Text(_)))
    }));
    register("procedure?", NativeFn::Plain(native_procedure_p));
    register("eq?", NativeFn::Plain(native_eq));
    register("equal?", NativeFn::Plain(native_equal));
    register("not", NativeFn::Plain(native_not));
    register("odd?", NativeFn::Plain(|args| parity_test(args, "odd?", 1.0)));
    register("even?", NativeFn::Plain(|args| parity_test(args, "even?", 0.0)));
    register("zero?", NativeFn::Plain(native_zero_p));
}

/// A one-argument test over terms; procedures fail the test.
fn type_test(args: &[Value], name: &str, test: fn(&Term) -> bool) -> Result<Value> {
    let [arg] = expect_args::<1>(name, args)?;
    Ok(arg.as_term().is_some_and(test).into())
}

fn native_procedure_p(args: &[Value]) -> Result<Value> {
    let [arg] = expect_args::<1>("procedure?", args)?;
    Ok(arg.as_procedure().is_some().into())
}

/// `(eq? a b)` - identity for pairs, value equality for atoms.
fn native_eq(args: &[Value]) -> Result<Value> {
    let [a, b] = expect_args::<2>("eq?", args)?;
    let same = match (&a, &b) {
        (Value::Term(Term::Pair(a)), Value::Term(Term::Pair(b))) => std::sync::Arc::ptr_eq(a, b),
        _ => a == b,
    };
    Ok(same.into())
}

/// `(equal? a b)` - structural equality.
fn native_equal(args: &[Value]) -> Result<Value> {
    let [a, b] = expect_args::<2>("equal?", args)?;
    Ok((a == b).into())
}

fn native_not(args: &[Value]) -> Result<Value> {
    let [arg] = expect_args::<1>("not", args)?;
    Ok((!arg.is_truthy()).into())
}

fn parity_test(args: &[Value], name: &str, remainder: f64) -> Result<Value> {
    let [arg] = expect_args::<1>(name, args)?;
    let n = number_arg(name, &arg)?;
    Ok((n.abs() % 2.0 == remainder).into())
}

fn native_zero_p(args: &[Value]) -> Result<Value> {
    let [arg] = expect_args::<1>("zero?", args)?;
    Ok((number_arg("zero?", &arg)? == 0.0).into())
}
