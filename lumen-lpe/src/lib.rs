//! Lumen Light Path Expression Compiler
//!
//! Compiles light path expressions - the small regex-like language used to
//! classify light transport paths (e.g. camera, diffuse bounces, light) -
//! into a nondeterministic automaton whose accept states carry rule
//! payloads.

pub mod ast;
pub mod compile;
pub mod error;

// Re-exports
pub use ast::{ExprKind, LpExp};
pub use compile::{Rule, StatePair};
pub use error::{LpeError, LpeResult};
