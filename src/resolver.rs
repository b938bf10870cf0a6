//! Attribute and index resolution.

use crate::{
    error::{Error, Result},
    record::Record,
    value::Value,
};

/// Look up `name` on a record value.
///
/// Only [`Value::Record`] supports lookup; anything else is
/// [`Error::NotARecord`]. A record without the attribute is
/// [`Error::AttributeNotFound`].
pub fn resolve<'a>(context: &Value<'a>, name: &str) -> Result<Value<'a>> {
    match context {
        Value::Record(record) => {
            let record: &'a dyn Record = *record;
            record
                .attribute(name)
                .ok_or_else(|| Error::AttributeNotFound(name.to_string()))
        }
        other => Err(Error::NotARecord {
            name: name.to_string(),
            found: other.type_name(),
        }),
    }
}

/// Take element `index` of a sequence.
///
/// The index truncates toward zero. Negative, non-finite and past-the-end
/// indices are [`Error::IndexOutOfRange`].
pub fn resolve_index(value: Value<'_>, index: f64) -> Result<Value<'_>> {
    let items = match value {
        Value::Sequence(items) => items,
        other => {
            return Err(Error::NotASequence {
                found: other.type_name(),
            });
        }
    };

    let index = index.trunc();
    let len = items.len();
    if !index.is_finite() || index < 0.0 {
        return Err(Error::IndexOutOfRange { index, len });
    }
    items
        .into_iter()
        .nth(index as usize)
        .ok_or(Error::IndexOutOfRange { index, len })
}
