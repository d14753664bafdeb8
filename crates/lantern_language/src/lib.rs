//! Reader and evaluator for the Lantern expression language.
//!
//! This crate provides:
//! - `Lexer` / [`parse`] - Tokenization and parsing of source text into terms
//! - [`Env`] - The lexical/dynamic environment (a term-valued [`Frame`] chain)
//! - [`Value`] / [`Procedure`] - Evaluated results and the procedure variants
//! - [`evaluate`] - The trampolined (tail-call-eliminating) eval/apply loop
//! - [`create_global_env`] - A root environment with the native library
//!
//! [`Frame`]: lantern_foundation::Frame

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod eval;
pub mod lexer;
pub mod native;
pub mod parser;
pub mod token;
pub mod value;

pub use eval::{apply_procedure, evaluate};
pub use lexer::Lexer;
pub use native::create_global_env;
pub use parser::{parse, parse_one};
pub use token::{Token, TokenKind};
pub use value::{Env, LambdaProcedure, MuProcedure, NativeFn, NativeProcedure, Procedure, Value};
