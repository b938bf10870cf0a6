//! Compiled rules.
//!
//! A [`Rule`] is parsed once and evaluated any number of times, from any
//! number of threads. The projections ([`Rule::as_bool`], [`Rule::as_int`],
//! [`Rule::as_float`]) check the kind of the result.
//!
//! The empty rule (`""`) means "no condition configured": it is `true` as a
//! boolean and `0` as a number, whatever the record.

use std::{fmt, str::FromStr};

use crate::{
    ast::Expr,
    error::{Error, Result},
    evaluator::evaluate,
    parser,
    record::Record,
    value::Value,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    source: String,
    expr: Option<Expr>,
}

impl Rule {
    /// Parse `text` into a reusable rule.
    ///
    /// ```
    /// use rulex::{Error, Rule};
    ///
    /// assert!(Rule::compile("a + b < c * 2").is_ok());
    /// assert!(Rule::compile("").unwrap().is_empty());
    /// assert!(matches!(Rule::compile("a +"), Err(Error::Syntax(_))));
    /// ```
    pub fn compile(text: &str) -> Result<Rule> {
        if text.is_empty() {
            tracing::debug!("compiled empty rule");
            return Ok(Rule {
                source: String::new(),
                expr: None,
            });
        }

        let expr = parser::parse(text).inspect_err(|e| {
            tracing::debug!(rule = text, error = %e, "rule failed to compile");
        })?;
        tracing::debug!(rule = text, "compiled rule");
        Ok(Rule {
            source: text.to_string(),
            expr: Some(expr),
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// The parsed expression; `None` for the empty rule.
    pub fn expr(&self) -> Option<&Expr> {
        self.expr.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.expr.is_none()
    }

    /// Evaluate against an arbitrary context value.
    ///
    /// Identifiers resolve only when `context` is a [`Value::Record`]; other
    /// contexts fail with [`Error::NotARecord`] on the first lookup. Returns
    /// `None` for the empty rule.
    pub fn evaluate<'a>(&self, context: &Value<'a>) -> Result<Option<Value<'a>>> {
        let Some(expr) = &self.expr else {
            return Ok(None);
        };
        evaluate(expr, context).map(Some).inspect_err(|e| {
            tracing::trace!(rule = %self.source, error = %e, "rule evaluation failed");
        })
    }

    /// Evaluate against `record`; the result must be a boolean.
    pub fn as_bool(&self, record: &dyn Record) -> Result<bool> {
        self.bool_value(&Value::Record(record))
    }

    /// Evaluate against `record`; numbers truncate toward zero, integer
    /// fields pass through unchanged.
    pub fn as_int(&self, record: &dyn Record) -> Result<i64> {
        self.int_value(&Value::Record(record))
    }

    /// Evaluate against `record`; integer fields widen to `f64`.
    pub fn as_float(&self, record: &dyn Record) -> Result<f64> {
        self.float_value(&Value::Record(record))
    }

    pub fn bool_value(&self, context: &Value<'_>) -> Result<bool> {
        match self.evaluate(context)? {
            None => Ok(true),
            Some(Value::Boolean(b)) => Ok(b),
            Some(other) => Err(result_mismatch("boolean result", &other)),
        }
    }

    pub fn int_value(&self, context: &Value<'_>) -> Result<i64> {
        match self.evaluate(context)? {
            None => Ok(0),
            Some(Value::Number(n)) => Ok(n as i64),
            Some(Value::Integer(n)) => Ok(n),
            Some(other) => Err(result_mismatch("integer result", &other)),
        }
    }

    pub fn float_value(&self, context: &Value<'_>) -> Result<f64> {
        match self.evaluate(context)? {
            None => Ok(0.0),
            Some(Value::Number(n)) => Ok(n),
            Some(Value::Integer(n)) => Ok(n as f64),
            Some(other) => Err(result_mismatch("float result", &other)),
        }
    }
}

fn result_mismatch(expected: &'static str, found: &Value<'_>) -> Error {
    Error::TypeMismatch {
        expected,
        found: found.type_name(),
    }
}

impl FromStr for Rule {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Rule::compile(s)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Compile `rule` and evaluate it once as a boolean.
///
/// Prefer [`Rule::compile`] when the same rule runs against many records.
pub fn eval_bool(record: &dyn Record, rule: &str) -> Result<bool> {
    Rule::compile(rule)?.as_bool(record)
}

/// Compile `rule` and evaluate it once as an integer.
pub fn eval_int(record: &dyn Record, rule: &str) -> Result<i64> {
    Rule::compile(rule)?.as_int(record)
}

/// Compile `rule` and evaluate it once as a float.
pub fn eval_float(record: &dyn Record, rule: &str) -> Result<f64> {
    Rule::compile(rule)?.as_float(record)
}
