//! The declarative (logic programming) layer.
//!
//! This crate provides:
//! - [`unify`] / [`resolve`] - Non-destructive unification over terms
//! - [`Fact`] / [`FactDatabase`] - The append-only clause store
//! - [`Resolver`] - Depth-limited resolution with fresh variable renaming
//!
//! Bindings live in a term-valued [`Frame`] chain so a failed unification can
//! be discarded by dropping its child frame.
//!
//! [`Frame`]: lantern_foundation::Frame

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod database;
pub mod query;
pub mod unify;

use lantern_foundation::{Frame, Term};

/// A substitution store mapping variable names to terms.
pub type Bindings = Frame<Term>;

pub use database::{Fact, FactDatabase};
pub use query::{variables_in, Resolver, DEPTH_LIMIT};
pub use unify::{resolve, resolve_fully, unify};
