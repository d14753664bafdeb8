//! Depth-limited resolution.
//!
//! [`Resolver::search`] proves a conjunction of goals against a
//! [`FactDatabase`] by trying facts in insertion order: rename the fact's
//! variables to fresh names, unify its head with the first goal in a child
//! frame, then prove the fact's hypotheses and the remaining goals. Solutions
//! are streamed to a callback; returning [`ControlFlow::Break`] stops the
//! search early.

use std::cell::Cell;
use std::ops::ControlFlow;
use std::sync::Arc;

use lantern_foundation::Term;

use crate::database::FactDatabase;
use crate::unify::unify;
use crate::Bindings;

/// The default bound on proof depth.
///
/// Resolution abandons any branch whose proof tree exceeds this depth, which
/// keeps searches over circular rule sets finite.
pub const DEPTH_LIMIT: usize = 20;

/// A resolution engine over a fact database.
///
/// The resolver carries a counter used to rename rule variables, so each
/// application of a fact sees fresh names and two uses of the same rule in
/// one proof cannot collide.
#[derive(Debug)]
pub struct Resolver {
    depth_limit: usize,
    counter: Cell<u64>,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver {
    /// Creates a resolver with the default depth limit.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_depth_limit(DEPTH_LIMIT)
    }

    /// Creates a resolver with a custom depth limit.
    #[must_use]
    pub const fn with_depth_limit(depth_limit: usize) -> Self {
        Self {
            depth_limit,
            counter: Cell::new(0),
        }
    }

    /// Proves `goals` in order, calling `emit` once per solution.
    ///
    /// `env` holds bindings accumulated so far; top-level queries pass a root
    /// frame and depth 0. An empty goal list is already proven and emits
    /// immediately, regardless of depth. `emit` may return
    /// [`ControlFlow::Break`] to stop after enough solutions.
    pub fn search(
        &self,
        db: &FactDatabase,
        goals: &[Term],
        env: &Bindings,
        depth: usize,
        emit: &mut dyn FnMut(&Bindings) -> ControlFlow<()>,
    ) -> ControlFlow<()> {
        let Some((goal, rest)) = goals.split_first() else {
            return emit(env);
        };
        if depth > self.depth_limit {
            return ControlFlow::Continue(());
        }

        for fact in db.facts() {
            let id = self.next_id();
            let head = rename_variables(&fact.head, id);
            let frame = env.child();
            if unify(&head, goal, &frame) {
                let hypotheses: Vec<Term> = fact
                    .hypotheses
                    .iter()
                    .map(|hypothesis| rename_variables(hypothesis, id))
                    .collect();
                self.search(db, &hypotheses, &frame, depth + 1, &mut |env_rule| {
                    self.search(db, rest, env_rule, depth + 1, &mut *emit)
                })?;
            }
        }
        ControlFlow::Continue(())
    }

    /// Collects every solution to `goals` as a bindings frame.
    ///
    /// The depth limit keeps this finite even for circular rule sets.
    #[must_use]
    pub fn solutions(&self, db: &FactDatabase, goals: &[Term]) -> Vec<Bindings> {
        let mut found = Vec::new();
        let root = Bindings::root();
        let _ = self.search(db, goals, &root, 0, &mut |env| {
            found.push(env.clone());
            ControlFlow::Continue(())
        });
        found
    }

    fn next_id(&self) -> u64 {
        let id = self.counter.get();
        self.counter.set(id + 1);
        id
    }
}

/// Rewrites every variable in a term with a per-application suffix, so
/// `?x` becomes `?x_7`.
fn rename_variables(term: &Term, id: u64) -> Term {
    match term {
        Term::Symbol(name) if term.is_variable() => Term::symbol(format!("{name}_{id}")),
        Term::Pair(pair) => Term::cons(
            rename_variables(&pair.first, id),
            rename_variables(&pair.second, id),
        ),
        _ => term.clone(),
    }
}

/// Collects the distinct variables of a goal list, in first-appearance order.
#[must_use]
pub fn variables_in(goals: &[Term]) -> Vec<Arc<str>> {
    let mut names: Vec<Arc<str>> = Vec::new();
    for goal in goals {
        collect_variables(goal, &mut names);
    }
    names
}

fn collect_variables(term: &Term, names: &mut Vec<Arc<str>>) {
    match term {
        Term::Symbol(name) if term.is_variable() => {
            if !names.iter().any(|seen| seen == name) {
                names.push(Arc::clone(name));
            }
        }
        Term::Pair(pair) => {
            collect_variables(&pair.first, names);
            collect_variables(&pair.second, names);
        }
        _ => {}
    }
}
