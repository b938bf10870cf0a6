//! Errors returned by compilation and evaluation.

use thiserror::Error;

use crate::{ast::BinOp, parser::ParseError};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Malformed rule text.
    #[error("syntax error: {0}")]
    Syntax(#[from] ParseError),

    /// The record exposes no attribute under this name.
    #[error("attribute '{0}' not found")]
    AttributeNotFound(String),

    /// Field lookup on something that is not a record.
    #[error("cannot look up '{name}' on {found}: not a record")]
    NotARecord { name: String, found: &'static str },

    #[error("cannot index into {found}: not a sequence")]
    NotASequence { found: &'static str },

    #[error("index {index} out of range for sequence of length {len}")]
    IndexOutOfRange { index: f64, len: usize },

    /// An operand, or the final result, has the wrong kind.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("division by zero")]
    DivisionByZero,

    #[error("operator '{op}' is not supported on {operand} operands")]
    UnsupportedOperator { op: BinOp, operand: &'static str },

    #[error("unsupported function '{0}'")]
    UnsupportedFunction(String),

    #[error("function '{name}' takes {expected} arguments, found {found}")]
    WrongArity {
        name: String,
        expected: usize,
        found: usize,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
