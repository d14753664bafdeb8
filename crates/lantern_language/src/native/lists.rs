//! Pair and list natives.

use lantern_foundation::{Error, Result, Term};

use crate::value::{NativeFn, Value};

use super::{expect_args, term_arg};

/// Registers the pair and list natives.
pub fn register_all(register: &impl Fn(&'static str, NativeFn)) {
    register("cons", NativeFn::Plain(native_cons));
    register("car", NativeFn::Plain(native_car));
    register("cdr", NativeFn::Plain(native_cdr));
    register("list", NativeFn::Plain(native_list));
    register("length", NativeFn::Plain(native_length));
    register("append", NativeFn::Plain(native_append));
}

fn native_cons(args: &[Value]) -> Result<Value> {
    let [first, second] = expect_args::<2>("cons", args)?;
    let first = term_arg("cons", &first)?.clone();
    let second = term_arg("cons", &second)?.clone();
    Ok(Term::cons(first, second).into())
}

fn native_car(args: &[Value]) -> Result<Value> {
    let [arg] = expect_args::<1>("car", args)?;
    let pair = term_arg("car", &arg)?
        .as_pair()
        .ok_or_else(|| Error::application(format!("car: not a pair: {arg}")))?;
    Ok(pair.first.clone().into())
}

fn native_cdr(args: &[Value]) -> Result<Value> {
    let [arg] = expect_args::<1>("cdr", args)?;
    let pair = term_arg("cdr", &arg)?
        .as_pair()
        .ok_or_else(|| Error::application(format!("cdr: not a pair: {arg}")))?;
    Ok(pair.second.clone().into())
}

fn native_list(args: &[Value]) -> Result<Value> {
    let elements: Result<Vec<Term>> = args
        .iter()
        .map(|arg| term_arg("list", arg).cloned())
        .collect();
    Ok(Term::list(elements?).into())
}

fn native_length(args: &[Value]) -> Result<Value> {
    let [arg] = expect_args::<1>("length", args)?;
    let elements = term_arg("length", &arg)?
        .list_elements()
        .ok_or_else(|| Error::application(format!("length: not a list: {arg}")))?;
    #[allow(clippy::cast_precision_loss)]
    Ok((elements.len() as f64).into())
}

/// `(append list...)` - concatenates proper lists; `(append)` is `()`.
fn native_append(args: &[Value]) -> Result<Value> {
    let mut elements = Vec::new();
    for arg in args {
        let list = term_arg("append", arg)?
            .list_elements()
            .ok_or_else(|| Error::application(format!("append: not a list: {arg}")))?;
        elements.extend(list);
    }
    Ok(Term::list(elements).into())
}
