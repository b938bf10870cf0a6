use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    /// Floating-point literal
    ///
    /// # Examples
    /// ```text
    /// 3.14
    /// 0.5
    /// ```
    Float(f64),

    /// Integer literal (unsigned in source; there is no unary minus)
    ///
    /// # Examples
    /// ```text
    /// 42
    /// 0
    /// ```
    Integer(i64),

    /// String literal enclosed in double quotes
    ///
    /// # Examples
    /// ```text
    /// "gold"
    /// "line\n"
    /// ```
    String(String),

    /// Attribute name or function name
    ///
    /// Must start with letter or underscore, followed by letters, digits, or underscores.
    ///
    /// # Examples
    /// ```text
    /// amount
    /// order_total
    /// IN
    /// ```
    Identifier(String),

    // Arithmetic
    /// Addition
    Plus,
    /// Subtraction
    Minus,
    /// Multiplication
    Star,
    /// Division
    Slash,

    // Comparison
    /// Equality operator
    EqEq,
    /// Inequality operator
    NotEq,
    /// Less than
    Lt,
    /// Greater than
    Gt,
    /// Less than or equal
    LtEq,
    /// Greater than or equal
    GtEq,

    // Logical
    /// Logical AND
    ///
    /// # Examples
    /// ```text
    /// age >= 18 && verified == 1
    /// ```
    And,

    /// Logical OR
    ///
    /// # Examples
    /// ```text
    /// tier == "gold" || spend > 1000
    /// ```
    Or,

    // Delimiters
    /// Left parenthesis for grouping or function calls
    LParen,
    /// Right parenthesis
    RParen,
    /// Left bracket for index access
    LBracket,
    /// Right bracket
    RBracket,
    /// Dot for field access
    Dot,
    /// Comma for separating call arguments
    Comma,

    /// End of input
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Float(n) => write!(f, "{}", n),
            Token::Integer(n) => write!(f, "{}", n),
            Token::String(s) => write!(f, "{:?}", s),
            Token::Identifier(name) => f.write_str(name),
            Token::Plus => f.write_str("+"),
            Token::Minus => f.write_str("-"),
            Token::Star => f.write_str("*"),
            Token::Slash => f.write_str("/"),
            Token::EqEq => f.write_str("=="),
            Token::NotEq => f.write_str("!="),
            Token::Lt => f.write_str("<"),
            Token::Gt => f.write_str(">"),
            Token::LtEq => f.write_str("<="),
            Token::GtEq => f.write_str(">="),
            Token::And => f.write_str("&&"),
            Token::Or => f.write_str("||"),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
            Token::LBracket => f.write_str("["),
            Token::RBracket => f.write_str("]"),
            Token::Dot => f.write_str("."),
            Token::Comma => f.write_str(","),
            Token::Eof => f.write_str("end of input"),
        }
    }
}
