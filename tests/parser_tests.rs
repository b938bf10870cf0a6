// tests/parser_tests.rs

use rulex::ast::{BinOp, Expr, Token};
use rulex::lexer::{LexError, Lexer, Position};
use rulex::parser::{MAX_DEPTH, MAX_NESTING, ParseError, Parser, parse};

fn parse_rule(input: &str) -> Expr {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer).unwrap();
    parser.parse().unwrap()
}

fn ident(name: &str) -> Expr {
    Expr::Identifier(name.to_string())
}

fn num(n: f64) -> Expr {
    Expr::Number(n)
}

// ============================================================================
// Literals and Identifiers
// ============================================================================

#[test]
fn test_literals() {
    let test_cases = vec![
        ("42", num(42.0)),
        ("0.5", num(0.5)),
        (r#""gold""#, Expr::String("gold".to_string())),
        ("amount", ident("amount")),
        ("true", ident("true")),
    ];

    for (input, expected) in test_cases {
        assert_eq!(parse_rule(input), expected, "Failed for input: {}", input);
    }
}

#[test]
fn test_group_is_kept() {
    assert_eq!(
        parse_rule("((a))"),
        Expr::Group(Box::new(Expr::Group(Box::new(ident("a")))))
    );
}

// ============================================================================
// Precedence and Associativity
// ============================================================================

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    let expr = parse_rule("a + b * c");
    match expr {
        Expr::BinaryOp {
            op: BinOp::Add,
            left,
            right,
        } => {
            assert_eq!(*left, ident("a"));
            assert_eq!(
                *right,
                Expr::binary(BinOp::Multiply, ident("b"), ident("c"))
            );
        }
        _ => panic!("Expected Add at the root, got {:?}", expr),
    }
}

#[test]
fn test_left_associativity() {
    let test_cases = vec![
        (
            "a - b - c",
            Expr::binary(
                BinOp::Subtract,
                Expr::binary(BinOp::Subtract, ident("a"), ident("b")),
                ident("c"),
            ),
        ),
        (
            "a / b * c",
            Expr::binary(
                BinOp::Multiply,
                Expr::binary(BinOp::Divide, ident("a"), ident("b")),
                ident("c"),
            ),
        ),
        (
            "a < b < c",
            Expr::binary(
                BinOp::LessThan,
                Expr::binary(BinOp::LessThan, ident("a"), ident("b")),
                ident("c"),
            ),
        ),
        (
            "a == b != c",
            Expr::binary(
                BinOp::NotEqual,
                Expr::binary(BinOp::Equal, ident("a"), ident("b")),
                ident("c"),
            ),
        ),
    ];

    for (input, expected) in test_cases {
        assert_eq!(parse_rule(input), expected, "Failed for input: {}", input);
    }
}

#[test]
fn test_and_binds_tighter_than_or() {
    let expr = parse_rule("a>b && b<5 || a>8 && b<9");
    let expected = Expr::binary(
        BinOp::Or,
        Expr::binary(
            BinOp::And,
            Expr::binary(BinOp::GreaterThan, ident("a"), ident("b")),
            Expr::binary(BinOp::LessThan, ident("b"), num(5.0)),
        ),
        Expr::binary(
            BinOp::And,
            Expr::binary(BinOp::GreaterThan, ident("a"), num(8.0)),
            Expr::binary(BinOp::LessThan, ident("b"), num(9.0)),
        ),
    );
    assert_eq!(expr, expected);
}

#[test]
fn test_relational_binds_tighter_than_equality() {
    assert_eq!(
        parse_rule("a < b == c >= d"),
        Expr::binary(
            BinOp::Equal,
            Expr::binary(BinOp::LessThan, ident("a"), ident("b")),
            Expr::binary(BinOp::GreaterEqual, ident("c"), ident("d")),
        )
    );
}

#[test]
fn test_parentheses_override_precedence() {
    let expr = parse_rule("(a + b) * c");
    match expr {
        Expr::BinaryOp {
            op: BinOp::Multiply,
            left,
            ..
        } => assert!(matches!(*left, Expr::Group(_))),
        _ => panic!("Expected Multiply at the root, got {:?}", expr),
    }
}

// ============================================================================
// Field Access and Indexing
// ============================================================================

#[test]
fn test_field_access_chain() {
    assert_eq!(
        parse_rule("xy.abc.b"),
        Expr::FieldAccess {
            object: Box::new(Expr::FieldAccess {
                object: Box::new(ident("xy")),
                field: "abc".to_string(),
            }),
            field: "b".to_string(),
        }
    );
}

#[test]
fn test_index_with_expression() {
    let expr = parse_rule("xy.y[xy.abc.b/xy.x]");
    match expr {
        Expr::Index { object, index } => {
            assert_eq!(
                *object,
                Expr::FieldAccess {
                    object: Box::new(ident("xy")),
                    field: "y".to_string(),
                }
            );
            assert!(matches!(
                *index,
                Expr::BinaryOp {
                    op: BinOp::Divide,
                    ..
                }
            ));
        }
        _ => panic!("Expected Index, got {:?}", expr),
    }
}

#[test]
fn test_access_binds_tighter_than_arithmetic() {
    assert_eq!(
        parse_rule("y[1] - y[0]"),
        Expr::binary(
            BinOp::Subtract,
            Expr::Index {
                object: Box::new(ident("y")),
                index: Box::new(num(1.0)),
            },
            Expr::Index {
                object: Box::new(ident("y")),
                index: Box::new(num(0.0)),
            },
        )
    );
}

#[test]
fn test_field_after_index() {
    assert_eq!(
        parse_rule("items[0].price"),
        Expr::FieldAccess {
            object: Box::new(Expr::Index {
                object: Box::new(ident("items")),
                index: Box::new(num(0.0)),
            }),
            field: "price".to_string(),
        }
    );
}

// ============================================================================
// Membership
// ============================================================================

#[test]
fn test_membership_call() {
    for name in ["IN", "in", "In"] {
        let input = format!(r#"{}(z, "abc")"#, name);
        assert_eq!(
            parse_rule(&input),
            Expr::Call {
                name: name.to_string(),
                args: vec![ident("z"), Expr::String("abc".to_string())],
            },
            "Failed for input: {}",
            input
        );
    }
}

#[test]
fn test_membership_inside_logic() {
    let expr = parse_rule(r#"IN(tags, "vip") && amount > 100"#);
    match expr {
        Expr::BinaryOp {
            op: BinOp::And,
            left,
            ..
        } => assert!(matches!(*left, Expr::Call { .. })),
        _ => panic!("Expected And at the root, got {:?}", expr),
    }
}

#[test]
fn test_unsupported_function() {
    assert_eq!(
        parse("max(a, b)"),
        Err(ParseError::UnsupportedFunction {
            name: "max".to_string(),
            position: Position::new(0),
        })
    );
}

#[test]
fn test_membership_arity() {
    let test_cases = vec![("IN()", 0), ("IN(a)", 1), ("IN(a, b, c)", 3)];

    for (input, found) in test_cases {
        match parse(input) {
            Err(ParseError::WrongArity {
                expected, found: f, ..
            }) => {
                assert_eq!(expected, 2, "Failed for input: {}", input);
                assert_eq!(f, found, "Failed for input: {}", input);
            }
            other => panic!("Expected WrongArity for {}, got {:?}", input, other),
        }
    }
}

// ============================================================================
// Syntax Errors
// ============================================================================

#[test]
fn test_incomplete_rules() {
    let test_cases = vec!["a +", "a + b *", "(a + b", "xy.", "y[1", "IN(z, ", "&& a", ")"];

    for input in test_cases {
        assert!(parse(input).is_err(), "Expected error for input: {}", input);
    }
}

#[test]
fn test_unary_minus_is_not_supported() {
    assert_eq!(
        parse("-a"),
        Err(ParseError::UnexpectedToken {
            expected: "an expression",
            found: Token::Minus,
            position: Position::new(0),
        })
    );
}

#[test]
fn test_trailing_tokens() {
    let err = parse("a b").unwrap_err();
    assert_eq!(
        err,
        ParseError::UnexpectedToken {
            expected: "an operator or end of input",
            found: Token::Identifier("b".to_string()),
            position: Position::new(2),
        }
    );
    assert_eq!(
        err.to_string(),
        "expected an operator or end of input, found 'b' at position 2"
    );
}

#[test]
fn test_missing_operand_reports_end_of_input() {
    let err = parse("a +").unwrap_err();
    assert_eq!(err.position(), Position::new(3));
    assert_eq!(
        err.to_string(),
        "expected an expression, found 'end of input' at position 3"
    );
}

#[test]
fn test_field_name_required_after_dot() {
    assert!(matches!(
        parse("xy.1"),
        Err(ParseError::UnexpectedToken {
            expected: "a field name after '.'",
            ..
        })
    ));
}

#[test]
fn test_lex_errors_surface_through_parser() {
    assert_eq!(
        parse("a = b"),
        Err(ParseError::Lex(LexError::UnsupportedOperator {
            op: "=".to_string(),
            position: Position::new(2),
        }))
    );
}

#[test]
fn test_empty_input_is_a_parse_error() {
    assert!(matches!(
        parse(""),
        Err(ParseError::UnexpectedToken {
            found: Token::Eof,
            ..
        })
    ));
    assert!(parse("   ").is_err());
}

// ============================================================================
// Depth Limits
// ============================================================================

fn nested(open: &str, inner: &str, close: &str, levels: usize) -> String {
    format!("{}{}{}", open.repeat(levels), inner, close.repeat(levels))
}

#[test]
fn test_nesting_within_limit() {
    let input = nested("(", "1", ")", MAX_NESTING);
    assert!(parse(&input).is_ok());

    let input = nested("y[", "0", "]", MAX_NESTING);
    assert!(parse(&input).is_ok());
}

#[test]
fn test_deep_parentheses() {
    let input = nested("(", "1", ")", 1000);
    assert_eq!(
        parse(&input),
        Err(ParseError::TooDeep {
            limit: MAX_NESTING,
            position: Position::new(MAX_NESTING),
        })
    );
}

#[test]
fn test_deep_brackets_and_calls() {
    let test_cases = vec![
        nested("y[", "0", "]", 1000),
        nested("IN(z, ", "1", ")", 1000),
        nested("IN(", "z, 1", ")", 1000),
    ];

    for input in test_cases {
        assert!(
            matches!(parse(&input), Err(ParseError::TooDeep { limit, .. }) if limit == MAX_NESTING),
            "Expected TooDeep for input starting: {}",
            &input[..20]
        );
    }
}

#[test]
fn test_long_operator_chain() {
    // left-deep: the tree is as deep as the chain is long
    let input = vec!["a"; 20_000].join("+");
    assert_eq!(
        parse(&input),
        Err(ParseError::TooDeep {
            limit: MAX_DEPTH,
            position: Position::new(2 * MAX_DEPTH - 1),
        })
    );

    let input = vec!["a"; MAX_DEPTH].join(" || ");
    assert!(parse(&input).is_ok());
}

#[test]
fn test_depth_counts_across_groups() {
    // neither the chain nor the nesting is over its limit alone
    let chain = vec!["a"; 200].join("*");
    let input = nested("(", &chain, " + a)", 40);
    assert!(matches!(
        parse(&input),
        Err(ParseError::TooDeep { limit, .. }) if limit == MAX_DEPTH
    ));
}
