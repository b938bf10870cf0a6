use std::borrow::Cow;

use crate::{
    ast::{BinOp, Expr},
    error::{Error, Result},
    parser::{MEMBERSHIP_ARITY, MEMBERSHIP_FUNCTION},
    resolver::{resolve, resolve_index},
    value::Value,
};

/// Evaluates an expression against a context.
///
/// Identifiers resolve against `context`, which is normally a
/// [`Value::Record`]. Evaluation never mutates the context and has no other
/// side effects, so the same expression can be evaluated concurrently.
///
/// Both operands of `&&` and `||` are always evaluated; an error on either
/// side fails the whole expression even when the other side would decide it.
///
/// Recursion follows the tree, one level per node depth. Parsed trees are
/// bounded by [`MAX_DEPTH`](crate::parser::MAX_DEPTH); hand-built ones are not.
///
/// # Examples
///
/// ```
/// use rulex::{evaluator::evaluate, parser::parse, Value};
/// use std::collections::HashMap;
///
/// let mut record = HashMap::new();
/// record.insert("a".to_string(), Value::Integer(10));
/// record.insert("b".to_string(), Value::Integer(8));
///
/// let expr = parse("a+b*b-a*b+(a+b)/(a-b)").unwrap();
/// let result = evaluate(&expr, &Value::Record(&record)).unwrap();
/// assert_eq!(result, Value::Number(3.0));
/// ```
pub fn evaluate<'a>(expr: &Expr, context: &Value<'a>) -> Result<Value<'a>> {
    match expr {
        Expr::Number(n) => Ok(Value::Number(*n)),
        Expr::String(s) => Ok(Value::String(Cow::Owned(s.clone()))),
        Expr::Identifier(name) => resolve(context, name),
        Expr::FieldAccess { object, field } => {
            let object = evaluate(object, context)?;
            resolve(&object, field)
        }
        Expr::Index { object, index } => {
            let index = evaluate(index, context)?.to_number()?;
            let object = evaluate(object, context)?;
            resolve_index(object, index)
        }
        Expr::Group(inner) => evaluate(inner, context),
        Expr::BinaryOp { op, left, right } => {
            let left_val = evaluate(left, context)?;
            let right_val = evaluate(right, context)?;
            apply_binop(*op, &left_val, &right_val)
        }
        Expr::Call { name, args } => eval_call(name, args, context),
    }
}

fn apply_binop<'a>(op: BinOp, left: &Value<'_>, right: &Value<'_>) -> Result<Value<'a>> {
    match op {
        BinOp::Add => numbers(left, right).map(|(a, b)| Value::Number(a + b)),
        BinOp::Subtract => numbers(left, right).map(|(a, b)| Value::Number(a - b)),
        BinOp::Multiply => numbers(left, right).map(|(a, b)| Value::Number(a * b)),
        BinOp::Divide => match numbers(left, right)? {
            (_, b) if b == 0.0 => Err(Error::DivisionByZero),
            (a, b) => Ok(Value::Number(a / b)),
        },
        BinOp::Equal => equals(left, right).map(Value::Boolean),
        BinOp::NotEqual => equals(left, right).map(|eq| Value::Boolean(!eq)),
        BinOp::LessThan => ordered(op, left, right).map(|(a, b)| Value::Boolean(a < b)),
        BinOp::GreaterThan => ordered(op, left, right).map(|(a, b)| Value::Boolean(a > b)),
        BinOp::LessEqual => ordered(op, left, right).map(|(a, b)| Value::Boolean(a <= b)),
        BinOp::GreaterEqual => ordered(op, left, right).map(|(a, b)| Value::Boolean(a >= b)),
        BinOp::And | BinOp::Or => {
            // check both sides before combining; `&&` on bool would skip the right
            let (a, b) = (left.to_bool()?, right.to_bool()?);
            Ok(Value::Boolean(if op == BinOp::And { a && b } else { a || b }))
        }
    }
}

fn numbers(left: &Value<'_>, right: &Value<'_>) -> Result<(f64, f64)> {
    Ok((left.to_number()?, right.to_number()?))
}

/// Two strings compare exactly; anything else compares as numbers.
fn equals(left: &Value<'_>, right: &Value<'_>) -> Result<bool> {
    match (left, right) {
        (Value::String(a), Value::String(b)) => Ok(a == b),
        _ => numbers(left, right).map(|(a, b)| a == b),
    }
}

/// Operands of `< > <= >=`. Strings have no ordering.
fn ordered(op: BinOp, left: &Value<'_>, right: &Value<'_>) -> Result<(f64, f64)> {
    match (left, right) {
        (Value::String(_), Value::String(_)) => Err(Error::UnsupportedOperator {
            op,
            operand: "string",
        }),
        _ => numbers(left, right),
    }
}

/// Calls are checked again here: the parser rejects anything but `IN/2`,
/// but an `Expr` can also be built by hand.
fn eval_call<'a>(name: &str, args: &[Expr], context: &Value<'a>) -> Result<Value<'a>> {
    if !name.eq_ignore_ascii_case(MEMBERSHIP_FUNCTION) {
        return Err(Error::UnsupportedFunction(name.to_string()));
    }
    let [sequence, key] = args else {
        return Err(Error::WrongArity {
            name: name.to_string(),
            expected: MEMBERSHIP_ARITY,
            found: args.len(),
        });
    };

    let sequence = evaluate(sequence, context)?;
    let key = evaluate(key, context)?;
    let items = match &sequence {
        Value::Sequence(items) => items,
        other => {
            return Err(Error::NotASequence {
                found: other.type_name(),
            });
        }
    };
    membership(items, &key).map(Value::Boolean)
}

/// `IN(sequence, key)`.
///
/// The first element fixes how the sequence is compared: numeric elements by
/// numeric equality against the key as a number, string elements by exact
/// equality against a string key. Every element must share that kind.
fn membership(items: &[Value<'_>], key: &Value<'_>) -> Result<bool> {
    let Some(first) = items.first() else {
        return Ok(false);
    };

    if first.is_numeric() {
        let key = key.to_number()?;
        let mut found = false;
        for item in items {
            found |= item.to_number()? == key;
        }
        return Ok(found);
    }

    if let Value::String(_) = first {
        let key = key.as_str().ok_or(Error::TypeMismatch {
            expected: "string",
            found: key.type_name(),
        })?;
        let mut found = false;
        for item in items {
            let item = item.as_str().ok_or(Error::TypeMismatch {
                expected: "string",
                found: item.type_name(),
            })?;
            found |= item == key;
        }
        return Ok(found);
    }

    Err(Error::TypeMismatch {
        expected: "sequence of numbers or strings",
        found: first.type_name(),
    })
}
