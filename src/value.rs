use std::{borrow::Cow, fmt};

use crate::{
    error::{Error, Result},
    record::Record,
};

/// A runtime value produced while evaluating a rule.
///
/// Values borrow strings and nested records from the record being evaluated,
/// so resolving `order.customer.tier` copies nothing but the final scalar.
///
/// # Numbers
///
/// Arithmetic works on `f64` only. Host integer fields are read as
/// [`Value::Integer`] so that a rule consisting of a bare integer field
/// projects back to the exact integer, but every operator coerces them to
/// `f64` first. Integers beyond 2^53 lose precision at that point.
///
/// # Examples
///
/// ```
/// use rulex::Value;
///
/// let seq = Value::Sequence(vec![Value::Integer(3), Value::Number(6.5)]);
/// assert_eq!(seq.type_name(), "sequence");
/// assert_eq!(Value::Integer(7).as_number(), Some(7.0));
/// assert_eq!(Value::from("gold").as_number(), None);
/// ```
#[derive(Clone)]
pub enum Value<'a> {
    /// Double precision number; the result of every arithmetic operation
    Number(f64),

    /// Integer read from a host field
    Integer(i64),

    Boolean(bool),

    String(Cow<'a, str>),

    /// Ordered list of values; elements may be of any kind
    Sequence(Vec<Value<'a>>),

    /// Nested record supporting field lookup
    Record(&'a dyn Record),
}

impl<'a> Value<'a> {
    /// Human-readable kind name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Integer(_) => "integer",
            Value::Boolean(_) => "boolean",
            Value::String(_) => "string",
            Value::Sequence(_) => "sequence",
            Value::Record(_) => "record",
        }
    }

    /// Numeric view of the value; both numeric kinds widen to `f64`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Integer(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Number(_) | Value::Integer(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Coerce to a number for arithmetic and comparison.
    pub fn to_number(&self) -> Result<f64> {
        self.as_number().ok_or(Error::TypeMismatch {
            expected: "number",
            found: self.type_name(),
        })
    }

    /// Require a boolean operand.
    pub fn to_bool(&self) -> Result<bool> {
        self.as_bool().ok_or(Error::TypeMismatch {
            expected: "boolean",
            found: self.type_name(),
        })
    }

    /// Detach the value from the record it was read from.
    ///
    /// Nested records cannot outlive their owner, so they have no owned form.
    pub fn into_owned(self) -> Option<Value<'static>> {
        match self {
            Value::Number(n) => Some(Value::Number(n)),
            Value::Integer(n) => Some(Value::Integer(n)),
            Value::Boolean(b) => Some(Value::Boolean(b)),
            Value::String(s) => Some(Value::String(Cow::Owned(s.into_owned()))),
            Value::Sequence(items) => items
                .into_iter()
                .map(Value::into_owned)
                .collect::<Option<Vec<_>>>()
                .map(Value::Sequence),
            Value::Record(_) => None,
        }
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Value::Integer(n) => f.debug_tuple("Integer").field(n).finish(),
            Value::Boolean(b) => f.debug_tuple("Boolean").field(b).finish(),
            Value::String(s) => f.debug_tuple("String").field(s).finish(),
            Value::Sequence(items) => f.debug_tuple("Sequence").field(items).finish(),
            Value::Record(_) => f.write_str("Record(..)"),
        }
    }
}

/// Structural equality; records compare by identity.
impl PartialEq for Value<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Sequence(a), Value::Sequence(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => std::ptr::addr_eq(*a, *b),
            _ => false,
        }
    }
}

impl From<f64> for Value<'_> {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value<'_> {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<bool> for Value<'_> {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(s: &'a str) -> Self {
        Value::String(Cow::Borrowed(s))
    }
}

impl From<String> for Value<'_> {
    fn from(s: String) -> Self {
        Value::String(Cow::Owned(s))
    }
}

impl<'a, T: Into<Value<'a>>> From<Vec<T>> for Value<'a> {
    fn from(items: Vec<T>) -> Self {
        Value::Sequence(items.into_iter().map(Into::into).collect())
    }
}
