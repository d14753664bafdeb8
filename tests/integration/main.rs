//! Cross-layer integration tests for Lantern.
//!
//! End-to-end flows through the session and REPL front end.

mod scenarios;
