//! CLI support for rulex
//!
//! Provides programmatic access to the `rulex` binary's functionality for
//! embedding in other tools.

mod check;
mod docs;

pub use check::{CheckOptions, CheckResult, Projection, execute_check};
pub use docs::{DocCategory, get_doc_category, get_docs_overview};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    /// Compilation or evaluation failed
    #[error(transparent)]
    Rule(#[from] crate::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("no input provided. Use --input or pipe JSON to stdin.")]
    NoInput,

    /// `null` has no rule value
    #[error("input is null; expected a JSON object")]
    NullInput,

    #[error("result is a {0} and cannot be printed as JSON")]
    UnprintableResult(&'static str),

    #[error("unknown category: '{0}'\nRun 'rulex docs' to see available categories.")]
    UnknownCategory(String),
}
