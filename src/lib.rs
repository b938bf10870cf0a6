//! A small embeddable rule-expression engine.
//!
//! Rules are short expressions such as `a+b < c*2` or `IN(tags, "vip")`,
//! compiled once and evaluated against host records:
//!
//! ```
//! use rulex::{record, Rule};
//!
//! struct Abc {
//!     a: i64,
//!     b: i64,
//! }
//! record!(Abc { a, b });
//!
//! let rule = Rule::compile("a>b && b<5 || a>8 && b<9").unwrap();
//! assert!(rule.as_bool(&Abc { a: 10, b: 8 }).unwrap());
//! assert_eq!(rulex::eval_int(&Abc { a: 10, b: 8 }, "a*b").unwrap(), 80);
//! ```
pub mod ast;
pub mod cli;
pub mod error;
pub mod evaluator;
pub mod json;
pub mod lexer;
pub mod parser;
pub mod record;
pub mod resolver;
pub mod rule;
pub mod value;

pub use ast::{BinOp, Expr, Token};
pub use error::{Error, Result};
pub use lexer::{LexError, Lexer, Position};
pub use parser::{ParseError, Parser};
pub use record::{FieldSpec, FieldTable, Record, ToValue};
pub use rule::{Rule, eval_bool, eval_float, eval_int};
pub use value::Value;
