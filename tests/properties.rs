//! Property-based tests for compilation and evaluation.

use std::collections::HashMap;

use proptest::prelude::*;
use rulex::{Error, Rule, Value, eval_bool, eval_float, eval_int, parser};

/// Generate small arithmetic rules over the attributes `a` and `b`
fn arithmetic_rule_strategy() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        Just("a".to_string()),
        Just("b".to_string()),
        (0u32..100).prop_map(|n| n.to_string()),
    ];
    leaf.prop_recursive(4, 32, 2, |inner| {
        (
            inner.clone(),
            prop::sample::select(vec!["+", "-", "*", "/"]),
            inner,
        )
            .prop_map(|(l, op, r)| format!("({} {} {})", l, op, r))
    })
}

fn record(a: i64, b: i64) -> HashMap<String, Value<'static>> {
    let mut map = HashMap::new();
    map.insert("a".to_string(), Value::Integer(a));
    map.insert("b".to_string(), Value::Integer(b));
    map
}

proptest! {
    #[test]
    fn test_parsing_is_deterministic(rule in arithmetic_rule_strategy()) {
        prop_assert_eq!(parser::parse(&rule).unwrap(), parser::parse(&rule).unwrap());
    }

    #[test]
    fn test_evaluation_is_pure(rule in arithmetic_rule_strategy(), a in -1000i64..1000, b in -1000i64..1000) {
        let compiled = Rule::compile(&rule).unwrap();
        let first = compiled.as_float(&record(a, b));
        let second = compiled.as_float(&record(a, b));

        match (first, second) {
            (Ok(x), Ok(y)) => prop_assert!(x == y || (x.is_nan() && y.is_nan())),
            (Err(x), Err(y)) => prop_assert_eq!(x, y),
            (x, y) => prop_assert!(false, "diverged: {:?} vs {:?}", x, y),
        }
    }

    #[test]
    fn test_division_never_yields_infinity(rule in arithmetic_rule_strategy(), a in -1000i64..1000, b in -1000i64..1000) {
        match eval_float(&record(a, b), &rule) {
            Ok(n) => prop_assert!(n.is_finite()),
            Err(e) => prop_assert_eq!(e, Error::DivisionByZero),
        }
    }

    #[test]
    fn test_arithmetic_matches_f64(a in -1_000_000i64..1_000_000, b in -1_000_000i64..1_000_000) {
        let r = record(a, b);
        prop_assert_eq!(eval_float(&r, "a + b").unwrap(), a as f64 + b as f64);
        prop_assert_eq!(eval_float(&r, "a - b").unwrap(), a as f64 - b as f64);
        prop_assert_eq!(eval_float(&r, "a * b").unwrap(), a as f64 * b as f64);
        prop_assert_eq!(eval_int(&r, "a * b").unwrap(), (a as f64 * b as f64) as i64);
    }

    #[test]
    fn test_comparisons_match_integers(a in any::<i32>(), b in any::<i32>()) {
        let r = record(a.into(), b.into());
        prop_assert_eq!(eval_bool(&r, "a < b").unwrap(), a < b);
        prop_assert_eq!(eval_bool(&r, "a >= b").unwrap(), a >= b);
        prop_assert_eq!(eval_bool(&r, "a == b").unwrap(), a == b);
        prop_assert_eq!(eval_bool(&r, "a != b || a == b").unwrap(), true);
    }

    #[test]
    fn test_index_truncates(items in prop::collection::vec(any::<i32>(), 1..20), index in 0.0f64..20.0) {
        let mut map = HashMap::new();
        map.insert("y".to_string(), Value::from(items.iter().map(|&n| i64::from(n)).collect::<Vec<_>>()));
        map.insert("i".to_string(), Value::Number(index));

        let result = eval_int(&map, "y[i]");
        let slot = index.trunc() as usize;
        if slot < items.len() {
            prop_assert_eq!(result.unwrap(), i64::from(items[slot]));
        } else {
            let is_out_of_range = matches!(result, Err(Error::IndexOutOfRange { .. }));
            prop_assert!(is_out_of_range);
        }
    }

    #[test]
    fn test_membership_matches_contains(items in prop::collection::vec(0i64..50, 0..20), key in 0i64..50) {
        let mut map = HashMap::new();
        map.insert("y".to_string(), Value::from(items.clone()));
        map.insert("k".to_string(), Value::Integer(key));

        prop_assert_eq!(eval_bool(&map, "IN(y, k)").unwrap(), items.contains(&key));
    }

    #[test]
    fn test_empty_rule_ignores_record(a in any::<i64>(), b in any::<i64>()) {
        let rule = Rule::compile("").unwrap();
        prop_assert!(rule.as_bool(&record(a, b)).unwrap());
        prop_assert_eq!(rule.as_int(&record(a, b)).unwrap(), 0);
    }
}
