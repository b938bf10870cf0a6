//! # Rule Expression Language - Abstract Syntax Tree
//!
//! This module defines the tokens and the Abstract Syntax Tree (AST) for the
//! rule expression language: a small, side-effect-free sublanguage for
//! business conditions evaluated against a record.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[expressions]** - Expression nodes (literals, access, operations, calls)
//! - **[operators]** - Binary operators (arithmetic, comparison, logical)
//!
//! ## Quick Start
//!
//! ```text
//! amount > 100 && IN(tags, "vip")
//! ```
//!
//! ## Precedence
//!
//! From loosest to tightest binding, every level left-associative:
//!
//! ```text
//! ||
//! &&
//! == !=
//! < > <= >=
//! + -
//! * /
//! .field  [index]  (postfix)
//! ```
//!
//! There are no unary operators: `-amount` and `!flag` do not parse.
//!
//! ## Access
//!
//! - `order.customer.tier` - nested record fields, resolved left to right
//! - `scores[1]` - sequence element; the index may be any expression,
//!   e.g. `scores[total / count]`, and fractional indices truncate
//!
//! ## Examples
//!
//! ```text
//! a+b*b-a*b+(a+b)/(a-b)
//! a>b && b<5 || a>8 && b<9
//! xy.y[1]-xy.y[xy.abc.b/xy.x]
//! in(z, "abc")
//! ```
pub mod tokens;
pub mod expressions;
pub mod operators;

pub use tokens::Token;
pub use expressions::Expr;
pub use operators::BinOp;
