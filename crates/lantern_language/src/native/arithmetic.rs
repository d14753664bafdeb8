//! Numeric natives.

use lantern_foundation::{Error, Result};

use crate::value::{NativeFn, Value};

use super::number_arg;

/// Registers the numeric natives.
pub fn register_all(register: &impl Fn(&'static str, NativeFn)) {
    register("+", NativeFn::Plain(native_add));
    register("-", NativeFn::Plain(native_subtract));
    register("*", NativeFn::Plain(native_multiply));
    register("/", NativeFn::Plain(native_divide));
    register("=", NativeFn::Plain(|args| compare(args, "=", |a, b| a == b)));
    register("<", NativeFn::Plain(|args| compare(args, "<", |a, b| a < b)));
    register(">", NativeFn::Plain(|args| compare(args, ">", |a, b| a > b)));
    register("<=", NativeFn::Plain(|args| compare(args, "<=", |a, b| a <= b)));
    register(">=", NativeFn::Plain(|args| compare(args, ">=", |a, b| a >= b)));
    register("abs", NativeFn::Plain(native_abs));
    register("min", NativeFn::Plain(native_min));
    register("max", NativeFn::Plain(native_max));
    register("modulo", NativeFn::Plain(native_modulo));
}

fn numbers(name: &str, args: &[Value]) -> Result<Vec<f64>> {
    args.iter().map(|arg| number_arg(name, arg)).collect()
}

/// `(+ n...)` - sums its arguments; `(+)` is 0.
fn native_add(args: &[Value]) -> Result<Value> {
    Ok(numbers("+", args)?.iter().sum::<f64>().into())
}

/// `(* n...)` - multiplies its arguments; `(*)` is 1.
fn native_multiply(args: &[Value]) -> Result<Value> {
    Ok(numbers("*", args)?.iter().product::<f64>().into())
}

/// `(- n n...)` - subtraction; with one argument, negation.
fn native_subtract(args: &[Value]) -> Result<Value> {
    let numbers = numbers("-", args)?;
    match numbers.split_first() {
        None => Err(Error::application("- expected at least 1 argument".to_string())),
        Some((first, [])) => Ok((-first).into()),
        Some((first, rest)) => Ok(rest.iter().fold(*first, |acc, n| acc - n).into()),
    }
}

/// `(/ n n...)` - division; with one argument, the reciprocal. Dividing by
/// zero is an error.
fn native_divide(args: &[Value]) -> Result<Value> {
    let numbers = numbers("/", args)?;
    let (first, rest) = match numbers.split_first() {
        None => return Err(Error::application("/ expected at least 1 argument".to_string())),
        Some((_, [])) => (1.0, &numbers[..]),
        Some((first, rest)) => (*first, rest),
    };
    let mut acc = first;
    for n in rest {
        if *n == 0.0 {
            return Err(Error::application("division by zero".to_string()));
        }
        acc /= n;
    }
    Ok(acc.into())
}

/// Chained comparison: true when every adjacent pair satisfies `op`.
fn compare(args: &[Value], name: &str, op: fn(f64, f64) -> bool) -> Result<Value> {
    let numbers = numbers(name, args)?;
    if numbers.len() < 2 {
        return Err(Error::application(format!(
            "{name} expected at least 2 arguments, got {}",
            numbers.len()
        )));
    }
    Ok(numbers.windows(2).all(|pair| op(pair[0], pair[1])).into())
}

fn native_abs(args: &[Value]) -> Result<Value> {
    let [n] = super::expect_args::<1>("abs", args)?;
    Ok(number_arg("abs", &n)?.abs().into())
}

fn native_min(args: &[Value]) -> Result<Value> {
    fold_extremum("min", args, f64::min)
}

fn native_max(args: &[Value]) -> Result<Value> {
    fold_extremum("max", args, f64::max)
}

fn fold_extremum(name: &str, args: &[Value], pick: fn(f64, f64) -> f64) -> Result<Value> {
    let numbers = numbers(name, args)?;
    match numbers.split_first() {
        None => Err(Error::application(format!(
            "{name} expected at least 1 argument"
        ))),
        Some((first, rest)) => Ok(rest.iter().fold(*first, |acc, n| pick(acc, *n)).into()),
    }
}

/// `(modulo a b)` - remainder with the sign of the divisor.
fn native_modulo(args: &[Value]) -> Result<Value> {
    let [a, b] = super::expect_args::<2>("modulo", args)?;
    let a = number_arg("modulo", &a)?;
    let b = number_arg("modulo", &b)?;
    if b == 0.0 {
        return Err(Error::application("division by zero".to_string()));
    }
    Ok((((a % b) + b) % b).into())
}
