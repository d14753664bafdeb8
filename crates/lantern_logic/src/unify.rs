//! Non-destructive unification.
//!
//! Unification never rewrites a term: all progress is recorded as variable
//! bindings in a [`Bindings`] frame. Callers isolate an attempt by handing in
//! a fresh child frame; on failure they drop the child and the parent chain
//! is untouched.
//!
//! There is no occurs check. Renamed rule variables make the cyclic case
//! unreachable from well-formed programs, and the resolver's depth limit
//! bounds any remaining runaway.

use lantern_foundation::Term;

use crate::Bindings;

/// Follows variable bindings until reaching a non-variable term or an unbound
/// variable.
///
/// This is a shallow walk: it does not descend into pairs.
#[must_use]
pub fn resolve(term: &Term, env: &Bindings) -> Term {
    let mut current = term.clone();
    while let Term::Symbol(name) = &current {
        if !current.is_variable() {
            break;
        }
        match env.lookup(name) {
            Some(bound) => current = bound,
            None => break,
        }
    }
    current
}

/// Unifies two terms, recording new bindings in `env`.
///
/// Returns true on success. On failure `env` may hold bindings from the
/// partial attempt, which is why callers unify into a disposable child frame.
#[must_use]
pub fn unify(a: &Term, b: &Term, env: &Bindings) -> bool {
    let a = resolve(a, env);
    let b = resolve(b, env);

    if a == b {
        return true;
    }
    if let Some(name) = variable_name(&a) {
        env.define(name.clone(), b);
        return true;
    }
    if let Some(name) = variable_name(&b) {
        env.define(name.clone(), a);
        return true;
    }
    match (a.as_pair(), b.as_pair()) {
        (Some(a), Some(b)) => {
            unify(&a.first, &b.first, env) && unify(&a.second, &b.second, env)
        }
        _ => false,
    }
}

/// Substitutes every bound variable in a term, recursively.
///
/// Unbound variables are left in place.
#[must_use]
pub fn resolve_fully(term: &Term, env: &Bindings) -> Term {
    let resolved = resolve(term, env);
    match resolved.as_pair() {
        Some(pair) => Term::cons(
            resolve_fully(&pair.first, env),
            resolve_fully(&pair.second, env),
        ),
        None => resolved,
    }
}

fn variable_name(term: &Term) -> Option<&std::sync::Arc<str>> {
    if term.is_variable() {
        term.as_symbol()
    } else {
        None
    }
}
