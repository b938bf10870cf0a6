//! Language reference printed by `rulex docs` and `rulex doc <category>`

use super::CliError;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Syntax,
    Operators,
    Errors,
}

impl DocCategory {
    /// Parse category name, accepting a few aliases
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "syntax" | "grammar" => Some(Self::Syntax),
            "operators" | "ops" | "in" => Some(Self::Operators),
            "errors" | "error" => Some(Self::Errors),
            _ => None,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"RULEX DOCUMENTATION

Rules are small expressions evaluated against a record: arithmetic,
comparisons, logic, field access, indexing and one membership function.

DOCUMENTATION CATEGORIES

  syntax            Literals, attribute names, field access and indexing
  operators         Arithmetic, comparison, logic, precedence and IN()
  errors            What can go wrong and what each error means

QUICK REFERENCE

  amount            Attribute of the record
  order.customer    Nested record field
  scores[1]         Sequence element (0-indexed)
  a + b * 2         Arithmetic
  a > b && c != 3   Comparison and logic
  IN(tags, "vip")   Membership

Run 'rulex doc <category>' for detailed documentation.
"#
}

/// Get documentation for a specific category
pub fn get_doc_category(name: &str) -> Result<&'static str, CliError> {
    match DocCategory::parse(name) {
        Some(DocCategory::Syntax) => Ok(SYNTAX_DOC),
        Some(DocCategory::Operators) => Ok(OPERATORS_DOC),
        Some(DocCategory::Errors) => Ok(ERRORS_DOC),
        None => Err(CliError::UnknownCategory(name.to_string())),
    }
}

const SYNTAX_DOC: &str = r#"SYNTAX

LITERALS
  42  0.5           Numbers (no sign, no exponent)
  "gold"            Strings, with escapes \n \t \r \" \\

ATTRIBUTES
  amount            Attribute of the record, by its rule alias
  order.customer    Field of a nested record
  scores[1]         Element of a sequence
  scores[n / 2]     Any expression can be an index; fractions truncate

The empty rule is allowed: it is true as a condition and 0 as a number.

EXAMPLES
  rulex check 'xy.y[1] - xy.y[xy.abc.b / xy.x]' \
    --input '{"xy": {"x": 10, "abc": {"b": 20}, "y": [3, 6, 9]}}'
  => -3.0
"#;

const OPERATORS_DOC: &str = r#"OPERATORS

PRECEDENCE (loosest first, all left-associative)
  ||
  &&
  ==  !=
  <  >  <=  >=
  +  -
  *  /

ARITHMETIC
  Operands must be numbers. Integers and floats mix freely; the result is
  always a float. Division by zero is an error.

COMPARISON
  Numbers support all six operators. Strings support only == and !=.
  Comparing a string with a number is an error.

LOGIC
  && and || need boolean operands. Both sides are always evaluated.

MEMBERSHIP
  IN(sequence, key)   true if key is an element of sequence
  in(sequence, key)   (the name is case-insensitive)

  Numeric sequences compare numerically, string sequences exactly.
  An empty sequence never contains anything.

There are no unary operators: write 0 - a, not -a.
"#;

const ERRORS_DOC: &str = r#"ERRORS

  syntax error          The rule text does not parse, or nests too deeply
  attribute not found   The record has no attribute by that name
  not a record          Field access on something other than a record
  not a sequence        Indexing or IN() on something other than a sequence
  index out of range    Negative index, or index past the end
  type mismatch         Wrong operand kind, or wrong result kind for --as
  division by zero      The right side of / evaluated to 0
  unsupported operator  Ordering (< > <= >=) between two strings
  unsupported function  A call to anything but IN
  wrong arity           IN() called with other than 2 arguments
"#;
