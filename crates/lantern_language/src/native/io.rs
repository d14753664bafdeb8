//! Output natives.
//!
//! These write to stdout and yield `()` so the driver prints nothing extra.

use std::io::Write;

use lantern_foundation::{Error, Result, Term};

use crate::value::{NativeFn, Value};

use super::expect_args;

/// Registers the output natives.
pub fn register_all(register: &impl Fn(&'static str, NativeFn)) {
    register("display", NativeFn::Plain(native_display));
    register("newline", NativeFn::Plain(native_newline));
    register("print", NativeFn::Plain(native_print));
}

/// `(display x)` - writes a value without a newline; text appears without
/// quotes.
fn native_display(args: &[Value]) -> Result<Value> {
    let [arg] = expect_args::<1>("display", args)?;
    let rendered = match &arg {
        Value::Term(Term::Text(s)) => s.to_string(),
        other => format!("{other}"),
    };
    write_stdout(&rendered)?;
    Ok(Value::Term(Term::Empty))
}

/// `(newline)` - writes a line break.
fn native_newline(args: &[Value]) -> Result<Value> {
    expect_args::<0>("newline", args)?;
    write_stdout("\n")?;
    Ok(Value::Term(Term::Empty))
}

/// `(print x)` - writes a value in literal form followed by a newline.
fn native_print(args: &[Value]) -> Result<Value> {
    let [arg] = expect_args::<1>("print", args)?;
    write_stdout(&format!("{arg}\n"))?;
    Ok(Value::Term(Term::Empty))
}

fn write_stdout(text: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(text.as_bytes())
        .and_then(|()| stdout.flush())
        .map_err(|e| Error::application(format!("write failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::super::create_global_env;
    use crate::eval::evaluate;
    use crate::parser::parse_one;
    use crate::value::Env;

    fn run(env: &Env, source: &str) -> String {
        format!("{}", evaluate(&parse_one(source).unwrap(), env).unwrap())
    }

    #[test]
    fn output_natives_yield_the_empty_list() {
        let env = create_global_env();
        assert_eq!(run(&env, "(display 'hi)"), "()");
        assert_eq!(run(&env, "(newline)"), "()");
        assert_eq!(run(&env, "(print '(1 2))"), "()");
    }

    #[test]
    fn arity_is_checked() {
        let env = create_global_env();
        assert!(evaluate(&parse_one("(newline 1)").unwrap(), &env).is_err());
        assert!(evaluate(&parse_one("(display)").unwrap(), &env).is_err());
    }
}
