//! Integration tests for the expression layer.
//!
//! Tests for the reader and the trampolined evaluator.

mod eval;
mod reader;
