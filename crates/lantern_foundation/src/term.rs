//! The symbolic-expression term model.
//!
//! A [`Term`] is the uniform tree-shaped value manipulated by both the
//! evaluator and the logic layer: atoms (booleans, numbers, text, symbols),
//! binary pairs, and the empty-list sentinel. Terms are immutable and cheaply
//! cloneable; pairs share structure via `Arc`.

use std::fmt;
use std::sync::Arc;

/// The marker character that makes a symbol a logical variable.
pub const VARIABLE_MARKER: char = '?';

/// A symbolic-expression value.
///
/// Pairs are immutable once constructed. Structural sharing is permitted;
/// well-formed programs never construct a cycle.
#[derive(Clone)]
pub enum Term {
    /// Boolean atom (`#t` / `#f`).
    Bool(bool),
    /// Numeric atom (64-bit float).
    Number(f64),
    /// Text atom (double-quoted in source).
    Text(Arc<str>),
    /// Symbol atom (identifier).
    Symbol(Arc<str>),
    /// A cons pair.
    Pair(Arc<Pair>),
    /// The empty-list sentinel, `()`.
    Empty,
}

/// The two fields of a cons pair.
#[derive(Clone, PartialEq, Eq)]
pub struct Pair {
    /// The first element (car).
    pub first: Term,
    /// The rest (cdr).
    pub second: Term,
}

impl Term {
    /// Constructs a symbol atom.
    pub fn symbol(name: impl Into<Arc<str>>) -> Self {
        Self::Symbol(name.into())
    }

    /// Constructs a text atom.
    pub fn text(contents: impl Into<Arc<str>>) -> Self {
        Self::Text(contents.into())
    }

    /// Constructs a cons pair.
    #[must_use]
    pub fn cons(first: Term, second: Term) -> Self {
        Self::Pair(Arc::new(Pair { first, second }))
    }

    /// Constructs a proper list from the given elements.
    #[must_use]
    pub fn list(elements: impl IntoIterator<Item = Term, IntoIter: DoubleEndedIterator>) -> Self {
        elements
            .into_iter()
            .rev()
            .fold(Self::Empty, |tail, head| Self::cons(head, tail))
    }

    /// Returns true for the empty-list sentinel.
    #[must_use]
    pub const fn is_empty_list(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns true if this term is truthy.
    ///
    /// Only `#f` is falsy; every other term (including `()` and `0`) is truthy.
    #[must_use]
    pub const fn is_truthy(&self) -> bool {
        !matches!(self, Self::Bool(false))
    }

    /// Returns true if this term is a logical variable: a symbol whose name
    /// begins with [`VARIABLE_MARKER`]. The distinction is purely syntactic.
    #[must_use]
    pub fn is_variable(&self) -> bool {
        match self {
            Self::Symbol(name) => name.starts_with(VARIABLE_MARKER),
            _ => false,
        }
    }

    /// Attempts to extract a symbol name.
    #[must_use]
    pub const fn as_symbol(&self) -> Option<&Arc<str>> {
        match self {
            Self::Symbol(name) => Some(name),
            _ => None,
        }
    }

    /// Attempts to extract a numeric value.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a pair reference.
    #[must_use]
    pub fn as_pair(&self) -> Option<&Pair> {
        match self {
            Self::Pair(pair) => Some(pair),
            _ => None,
        }
    }

    /// Iterates the elements of a proper list.
    ///
    /// Iteration stops at the first non-pair tail, so an improper list yields
    /// only the elements before the dotted tail.
    #[must_use]
    pub const fn iter(&self) -> ListIter<'_> {
        ListIter { current: self }
    }

    /// Returns the elements of a proper list, or `None` if the term is not
    /// one (including dotted tails).
    #[must_use]
    pub fn list_elements(&self) -> Option<Vec<Term>> {
        let mut elements = Vec::new();
        let mut current = self;
        loop {
            match current {
                Self::Empty => return Some(elements),
                Self::Pair(pair) => {
                    elements.push(pair.first.clone());
                    current = &pair.second;
                }
                _ => return None,
            }
        }
    }

    /// Returns true if following `second` links reaches `()`.
    #[must_use]
    pub fn is_proper_list(&self) -> bool {
        let mut current = self;
        loop {
            match current {
                Self::Empty => return true,
                Self::Pair(pair) => current = &pair.second,
                _ => return false,
            }
        }
    }
}

/// Iterator over the elements of a proper list.
pub struct ListIter<'a> {
    current: &'a Term,
}

impl<'a> Iterator for ListIter<'a> {
    type Item = &'a Term;

    fn next(&mut self) -> Option<&'a Term> {
        match self.current {
            Term::Pair(pair) => {
                self.current = &pair.second;
                Some(&pair.first)
            }
            _ => None,
        }
    }
}

impl<'a> IntoIterator for &'a Term {
    type Item = &'a Term;
    type IntoIter = ListIter<'a>;

    fn into_iter(self) -> ListIter<'a> {
        self.iter()
    }
}

// Implement PartialEq manually to handle float comparison
impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a.to_bits() == b.to_bits(),
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Symbol(a), Self::Symbol(b)) => a == b,
            (Self::Pair(a), Self::Pair(b)) => Arc::ptr_eq(a, b) || a == b,
            (Self::Empty, Self::Empty) => true,
            _ => false,
        }
    }
}

impl Eq for Term {}

impl fmt::Debug for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(true) => write!(f, "#t"),
            Self::Bool(false) => write!(f, "#f"),
            Self::Number(n) => write_number(f, *n),
            Self::Text(s) => write!(f, "{s:?}"),
            Self::Symbol(s) => write!(f, "{s}"),
            Self::Empty => write!(f, "()"),
            Self::Pair(pair) => {
                write!(f, "({}", pair.first)?;
                let mut tail = &pair.second;
                loop {
                    match tail {
                        Self::Pair(next) => {
                            write!(f, " {}", next.first)?;
                            tail = &next.second;
                        }
                        Self::Empty => break,
                        other => {
                            write!(f, " . {other}")?;
                            break;
                        }
                    }
                }
                write!(f, ")")
            }
        }
    }
}

/// Writes a number, dropping the fractional part when it is integral.
#[allow(clippy::cast_possible_truncation)]
fn write_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        write!(f, "{}", n as i64)
    } else {
        write!(f, "{n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthiness() {
        assert!(Term::Bool(true).is_truthy());
        assert!(!Term::Bool(false).is_truthy());
        assert!(Term::Number(0.0).is_truthy());
        assert!(Term::Empty.is_truthy());
    }

    #[test]
    fn variables_are_marked_symbols() {
        assert!(Term::symbol("?x").is_variable());
        assert!(!Term::symbol("x").is_variable());
        assert!(!Term::text("?x").is_variable());
    }

    #[test]
    fn list_construction_and_iteration() {
        let list = Term::list([Term::symbol("a"), Term::symbol("b"), Term::symbol("c")]);
        let names: Vec<_> = list
            .iter()
            .map(|t| t.as_symbol().unwrap().to_string())
            .collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert!(list.is_proper_list());
    }

    #[test]
    fn dotted_pair_is_not_proper() {
        let dotted = Term::cons(Term::symbol("a"), Term::symbol("b"));
        assert!(!dotted.is_proper_list());
        assert!(dotted.list_elements().is_none());
    }

    #[test]
    fn display_literal_format() {
        let list = Term::list([
            Term::symbol("parent"),
            Term::symbol("abe"),
            Term::symbol("homer"),
        ]);
        assert_eq!(format!("{list}"), "(parent abe homer)");

        let dotted = Term::cons(Term::Number(1.0), Term::Number(2.0));
        assert_eq!(format!("{dotted}"), "(1 . 2)");

        assert_eq!(format!("{}", Term::Number(120.0)), "120");
        assert_eq!(format!("{}", Term::Number(2.5)), "2.5");
        assert_eq!(format!("{}", Term::Bool(true)), "#t");
        assert_eq!(format!("{}", Term::Empty), "()");
    }

    #[test]
    fn structural_equality_with_sharing() {
        let shared = Term::list([Term::symbol("x")]);
        let a = Term::cons(shared.clone(), Term::Empty);
        let b = Term::cons(shared, Term::Empty);
        assert_eq!(a, b);

        let c = Term::cons(Term::list([Term::symbol("x")]), Term::Empty);
        assert_eq!(a, c);
    }
}
