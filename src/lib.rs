//! Lantern - a symbolic-expression interpreter with a logic layer
//!
//! This crate re-exports all layers of the Lantern system for convenient
//! access. For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: lantern_runtime    — REPL, CLI, session state
//! Layer 2: lantern_logic      — Unification, fact database, resolution
//!          lantern_language   — Reader, environments, evaluator, natives
//! Layer 1: lantern_foundation — Core types (Term, Frame, Error)
//! ```

pub use lantern_foundation as foundation;
pub use lantern_language as language;
pub use lantern_logic as logic;
pub use lantern_runtime as runtime;
