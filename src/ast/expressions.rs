use crate::ast::BinOp;

/// Abstract Syntax Tree node representing a parsed rule.
///
/// The AST is built once by the parser and then evaluated read-only against
/// any number of records.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    // Literals
    /// Numeric literal. Integer and float literals both end up here.
    ///
    /// # Example
    /// ```text
    /// 42
    /// 0.75
    /// ```
    Number(f64),

    /// String literal
    ///
    /// # Example
    /// ```text
    /// "gold"
    /// ```
    String(String),

    // References
    /// Attribute of the record the rule is evaluated against.
    ///
    /// # Example
    /// ```text
    /// amount
    /// ```
    Identifier(String),

    // Access
    /// Dotted field access on a nested record
    ///
    /// # Examples
    /// ```text
    /// order.customer
    /// order.customer.tier
    /// ```
    FieldAccess {
        object: Box<Expr>,
        field: String,
    },

    /// Index access on a sequence. The index is any expression.
    ///
    /// # Examples
    /// ```text
    /// scores[0]
    /// scores[count - 1]
    /// ```
    Index {
        object: Box<Expr>,
        index: Box<Expr>,
    },

    // Operations
    /// Binary operation (arithmetic, comparison, logical)
    BinaryOp {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Function call. `IN` (any case) is the only function.
    ///
    /// # Example
    /// ```text
    /// IN(tags, "vip")
    /// ```
    Call {
        name: String,
        args: Vec<Expr>,
    },

    /// Parenthesized expression, kept so the tree mirrors the source.
    Group(Box<Expr>),
}

impl Expr {
    pub fn binary(op: BinOp, left: Expr, right: Expr) -> Self {
        Expr::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}
