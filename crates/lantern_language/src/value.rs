//! Evaluated values and procedure variants.
//!
//! Evaluation produces either a plain [`Term`] or a [`Procedure`]. Procedures
//! come in three variants: natives, lexical closures (`lambda`), and
//! dynamically scoped procedures (`mu`).

use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use lantern_foundation::{Frame, Result, Term};

/// The environment chain used by the evaluator.
pub type Env = Frame<Value>;

/// The result of evaluating an expression.
#[derive(Clone)]
pub enum Value {
    /// A plain term.
    Term(Term),
    /// A callable procedure.
    Procedure(Procedure),
}

/// A callable procedure.
#[derive(Clone)]
pub enum Procedure {
    /// A native function implemented in Rust.
    Primitive(NativeProcedure),
    /// A lexically scoped closure created by `lambda` or the sugared
    /// `define` form.
    Lambda(Rc<LambdaProcedure>),
    /// A dynamically scoped procedure created by `mu`; its body runs in a
    /// frame chained from the caller's environment.
    Mu(Rc<MuProcedure>),
}

/// A native function callable from Lantern.
#[derive(Clone)]
pub struct NativeProcedure {
    /// Function name for display and error messages.
    pub name: &'static str,
    /// The underlying function.
    pub func: NativeFn,
}

/// The two calling conventions for natives.
///
/// Most natives only see their evaluated arguments; a few (`eval`, `apply`)
/// also need the live calling environment.
#[derive(Clone, Copy)]
pub enum NativeFn {
    /// `fn(args)` - plain native.
    Plain(fn(&[Value]) -> Result<Value>),
    /// `fn(args, env)` - environment-passing native.
    WithEnv(fn(&[Value], &Env) -> Result<Value>),
}

/// A lexical closure: formals, body, and the frame captured at creation.
pub struct LambdaProcedure {
    /// Formal parameter names, in order.
    pub formals: Vec<Arc<str>>,
    /// The body expression (multi-expression bodies are `begin`-wrapped at
    /// construction time).
    pub body: Term,
    /// The environment captured when the closure was created.
    pub env: Env,
}

/// A dynamically scoped procedure: formals and body, no captured frame.
pub struct MuProcedure {
    /// Formal parameter names, in order.
    pub formals: Vec<Arc<str>>,
    /// The body expression.
    pub body: Term,
}

impl Value {
    /// Returns true if this value is truthy. Only the term `#f` is falsy;
    /// procedures and all other terms are truthy.
    #[must_use]
    pub const fn is_truthy(&self) -> bool {
        match self {
            Self::Term(term) => term.is_truthy(),
            Self::Procedure(_) => true,
        }
    }

    /// Attempts to extract a plain term.
    #[must_use]
    pub const fn as_term(&self) -> Option<&Term> {
        match self {
            Self::Term(term) => Some(term),
            Self::Procedure(_) => None,
        }
    }

    /// Attempts to extract a numeric term.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Term(Term::Number(n)) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a procedure.
    #[must_use]
    pub const fn as_procedure(&self) -> Option<&Procedure> {
        match self {
            Self::Procedure(procedure) => Some(procedure),
            Self::Term(_) => None,
        }
    }
}

impl From<Term> for Value {
    fn from(term: Term) -> Self {
        Self::Term(term)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Term(Term::Bool(b))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Term(Term::Number(n))
    }
}

// Procedures compare by identity: two separately constructed closures are
// never equal, even when textually identical.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Term(a), Self::Term(b)) => a == b,
            (Self::Procedure(a), Self::Procedure(b)) => a == b,
            _ => false,
        }
    }
}

impl PartialEq for Procedure {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Primitive(a), Self::Primitive(b)) => a.name == b.name,
            (Self::Lambda(a), Self::Lambda(b)) => Rc::ptr_eq(a, b),
            (Self::Mu(a), Self::Mu(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Term(term) => write!(f, "{term}"),
            Self::Procedure(procedure) => write!(f, "{procedure}"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(native) => write!(f, "#[native {}]", native.name),
            Self::Lambda(lambda) => {
                write!(f, "(lambda {} {})", format_formals(&lambda.formals), lambda.body)
            }
            Self::Mu(mu) => write!(f, "(mu {} {})", format_formals(&mu.formals), mu.body),
        }
    }
}

impl fmt::Debug for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

fn format_formals(formals: &[Arc<str>]) -> String {
    let names: Vec<&str> = formals.iter().map(AsRef::as_ref).collect();
    format!("({})", names.join(" "))
}
