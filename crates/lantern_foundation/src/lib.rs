//! Core types for Lantern.
//!
//! This crate provides:
//! - [`Term`] - The symbolic-expression value type shared by the evaluator
//!   and the logic layer
//! - [`Frame`] - Chained symbol-to-value mappings, used both as lexical
//!   environments and as unifier substitution stores
//! - [`Error`] - Error types for the whole system

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod frame;
mod term;

pub use error::{Error, ErrorKind, Result};
pub use frame::Frame;
pub use term::{Pair, Term, VARIABLE_MARKER};
