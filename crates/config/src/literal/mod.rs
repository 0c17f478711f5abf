//! Sandboxed evaluation of literal expressions.
//!
//! Responsibilities:
//! - Turn the right-hand side of a config line into a typed [`Value`].
//! - Accept strings, bytes, numbers, booleans, `None`, tuples, lists, sets and dicts.
//!
//! Does NOT handle:
//! - Names, attribute access, calls, operators or any other code. Those are
//!   rejected as errors; nothing is ever looked up or executed.
//! - Splitting config files into lines (see `loader/parse.rs`).
//!
//! Invariants:
//! - Evaluation is pure: the same text always yields the same value or error.
//! - Container nesting is bounded by [`MAX_DEPTH`].

mod error;
mod lexer;
mod parser;
mod value;

pub use error::{LiteralError, LiteralErrorKind};
pub use parser::MAX_DEPTH;
pub use value::Value;

/// Evaluates `expr` as a literal expression.
pub fn evaluate(expr: &str) -> Result<Value, LiteralError> {
    parser::parse(expr)
}
