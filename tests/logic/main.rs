//! Integration tests for the declarative layer.
//!
//! Tests for unification invariants and resolution search.

mod query;
mod unify;
