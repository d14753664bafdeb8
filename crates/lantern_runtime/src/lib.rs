//! REPL, CLI, and session state for Lantern.
//!
//! This crate provides:
//! - [`Session`] - Global frame, fact database, and top-level form dispatch
//! - [`Repl`] - Interactive read-eval-print loop over a swappable line editor

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod editor;
pub mod repl;
pub mod session;

pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use repl::Repl;
pub use session::{QueryOutcome, Response, Session};
