//! The seam between rules and host data.
//!
//! A rule resolves every identifier through [`Record::attribute`]. Host types
//! usually get their implementation from the [`record!`](crate::record!)
//! macro, which builds a [`FieldTable`] once per type:
//!
//! ```
//! use rulex::{record, Rule};
//!
//! struct Customer {
//!     tier: String,
//! }
//!
//! struct Order {
//!     total_cents: i64,
//!     customer: Customer,
//!     tags: Vec<String>,
//! }
//!
//! record!(Customer { tier });
//! // serialization alias "total", overridden for rules by "amount"
//! record!(Order { total_cents: "total" => "amount", customer, tags });
//!
//! let order = Order {
//!     total_cents: 12_500,
//!     customer: Customer { tier: "gold".into() },
//!     tags: vec!["vip".into()],
//! };
//!
//! let rule = Rule::compile(r#"amount > 10000 && customer.tier == "gold" && IN(tags, "vip")"#).unwrap();
//! assert!(rule.as_bool(&order).unwrap());
//! ```

use std::{borrow::Cow, collections::HashMap};

use crate::value::Value;

#[doc(hidden)]
pub use once_cell::sync::Lazy;

/// Named-attribute lookup on a host value.
///
/// Returning `None` means the record has no attribute of that name; the
/// evaluator reports it as [`Error::AttributeNotFound`](crate::Error::AttributeNotFound).
pub trait Record {
    fn attribute(&self, name: &str) -> Option<Value<'_>>;
}

impl<R: Record + ?Sized> Record for &R {
    fn attribute(&self, name: &str) -> Option<Value<'_>> {
        (**self).attribute(name)
    }
}

impl<'v> Record for HashMap<String, Value<'v>> {
    fn attribute(&self, name: &str) -> Option<Value<'_>> {
        self.get(name).cloned()
    }
}

/// Conversion of host field types into rule values.
pub trait ToValue {
    fn to_value(&self) -> Value<'_>;
}

macro_rules! integer_to_value {
    ($($ty:ty),*) => {
        $(
            impl ToValue for $ty {
                fn to_value(&self) -> Value<'_> {
                    Value::Integer(*self as i64)
                }
            }
        )*
    };
}

integer_to_value!(i8, i16, i32, i64, isize, u8, u16, u32);

macro_rules! wide_unsigned_to_value {
    ($($ty:ty),*) => {
        $(
            impl ToValue for $ty {
                fn to_value(&self) -> Value<'_> {
                    match i64::try_from(*self) {
                        Ok(n) => Value::Integer(n),
                        Err(_) => Value::Number(*self as f64),
                    }
                }
            }
        )*
    };
}

wide_unsigned_to_value!(u64, usize);

impl ToValue for f32 {
    fn to_value(&self) -> Value<'_> {
        Value::Number(f64::from(*self))
    }
}

impl ToValue for f64 {
    fn to_value(&self) -> Value<'_> {
        Value::Number(*self)
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value<'_> {
        Value::Boolean(*self)
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value<'_> {
        Value::String(Cow::Borrowed(self))
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value<'_> {
        Value::String(Cow::Borrowed(self.as_str()))
    }
}

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self) -> Value<'_> {
        Value::Sequence(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value<'_> {
        self.as_slice().to_value()
    }
}

impl<T: ToValue, const N: usize> ToValue for [T; N] {
    fn to_value(&self) -> Value<'_> {
        self.as_slice().to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }
}

impl ToValue for Value<'_> {
    fn to_value(&self) -> Value<'_> {
        self.clone()
    }
}

/// Reads one field of `T`.
pub type Getter<T> = for<'r> fn(&'r T) -> Value<'r>;

/// Declaration of one host field and the names it may be known by.
pub struct FieldSpec<T> {
    /// Rust field name; used when no alias is declared.
    pub name: &'static str,
    /// Default (serialization) alias.
    pub serde_alias: Option<&'static str>,
    /// Rule-specific alias; wins over `serde_alias`.
    pub rule_alias: Option<&'static str>,
    pub get: Getter<T>,
}

impl<T> FieldSpec<T> {
    /// The name rules use for this field.
    pub fn resolved_name(&self) -> &'static str {
        self.rule_alias.or(self.serde_alias).unwrap_or(self.name)
    }
}

/// Alias-resolved field lookup for one host type.
///
/// Each field is exposed under exactly one name: its rule alias if declared,
/// else its serialization alias, else its Rust name. When two fields resolve
/// to the same name the first declared keeps it.
pub struct FieldTable<T> {
    fields: Vec<FieldSpec<T>>,
    index: HashMap<&'static str, usize>,
}

impl<T> FieldTable<T> {
    pub fn new(fields: Vec<FieldSpec<T>>) -> Self {
        let mut index = HashMap::with_capacity(fields.len());
        for (i, field) in fields.iter().enumerate() {
            let name = field.resolved_name();
            if let Some(&first) = index.get(name) {
                let first: &FieldSpec<T> = &fields[first];
                tracing::debug!(
                    alias = name,
                    kept = first.name,
                    shadowed = field.name,
                    "duplicate rule alias; first declared field wins"
                );
                continue;
            }
            index.insert(name, i);
        }
        tracing::trace!(
            ty = std::any::type_name::<T>(),
            fields = index.len(),
            "built rule field table"
        );
        FieldTable { fields, index }
    }

    pub fn attribute<'r>(&self, record: &'r T, name: &str) -> Option<Value<'r>> {
        self.index.get(name).map(|&i| (self.fields[i].get)(record))
    }

    /// Names rules can use, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields
            .iter()
            .enumerate()
            .filter(|(i, field)| self.index.get(field.resolved_name()) == Some(i))
            .map(|(_, field)| field.resolved_name())
    }
}

/// Implement [`Record`] and [`ToValue`] for a struct.
///
/// Each field is listed as `field`, optionally followed by `: "serde_alias"`
/// and/or `=> "rule_alias"`. Field types must implement [`ToValue`]; structs
/// passed through this macro do, so records nest.
///
/// The alias table is built on first lookup and shared afterwards.
#[macro_export]
macro_rules! record {
    ($ty:ty { $($field:ident $(: $serde:literal)? $(=> $rule:literal)?),* $(,)? }) => {
        impl $crate::Record for $ty {
            fn attribute(&self, name: &str) -> ::std::option::Option<$crate::Value<'_>> {
                static FIELDS: $crate::record::Lazy<$crate::FieldTable<$ty>> =
                    $crate::record::Lazy::new(|| {
                        $crate::FieldTable::new(vec![
                            $(
                                $crate::FieldSpec {
                                    name: stringify!($field),
                                    serde_alias: $crate::__record_alias!($($serde)?),
                                    rule_alias: $crate::__record_alias!($($rule)?),
                                    get: {
                                        fn get(record: &$ty) -> $crate::Value<'_> {
                                            $crate::ToValue::to_value(&record.$field)
                                        }
                                        get
                                    },
                                },
                            )*
                        ])
                    });
                FIELDS.attribute(self, name)
            }
        }

        impl $crate::ToValue for $ty {
            fn to_value(&self) -> $crate::Value<'_> {
                $crate::Value::Record(self)
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __record_alias {
    () => {
        ::std::option::Option::None
    };
    ($alias:literal) => {
        ::std::option::Option::Some($alias)
    };
}
