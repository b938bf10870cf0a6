use std::mem;

use thiserror::Error;

use crate::{
    ast::{BinOp, Expr, Token},
    lexer::{LexError, Lexer, Position},
};

/// Name of the membership function; matched case-insensitively.
pub const MEMBERSHIP_FUNCTION: &str = "in";

/// Number of arguments `IN` takes.
pub const MEMBERSHIP_ARITY: usize = 2;

/// Deepest expression tree the parser will build.
///
/// Evaluation and drop recurse once per level, so this bounds their stack use
/// for any rule text. Operator chains count too: `a+a+a` is three levels deep.
pub const MAX_DEPTH: usize = 256;

/// Most `(`, `[` and argument lists that may be open at once. Each costs
/// a full trip down the precedence ladder while parsing.
pub const MAX_NESTING: usize = 64;

/// Syntax errors. The parser stops at the first one.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("expected {expected}, found '{found}' at {position}")]
    UnexpectedToken {
        expected: &'static str,
        found: Token,
        position: Position,
    },

    #[error("unsupported function '{name}' at {position}")]
    UnsupportedFunction { name: String, position: Position },

    #[error("function '{name}' takes {expected} arguments, found {found} at {position}")]
    WrongArity {
        name: String,
        expected: usize,
        found: usize,
        position: Position,
    },

    /// Past [`MAX_NESTING`] open brackets or [`MAX_DEPTH`] tree levels.
    #[error("expression nested deeper than {limit} levels at {position}")]
    TooDeep { limit: usize, position: Position },
}

impl ParseError {
    pub fn position(&self) -> Position {
        match self {
            ParseError::Lex(e) => e.position(),
            ParseError::UnexpectedToken { position, .. }
            | ParseError::UnsupportedFunction { position, .. }
            | ParseError::WrongArity { position, .. }
            | ParseError::TooDeep { position, .. } => *position,
        }
    }
}

/// Parse a complete rule.
///
/// ```
/// use rulex::{parser, Expr};
///
/// let expr = parser::parse("(amount)").unwrap();
/// assert_eq!(expr, Expr::Group(Box::new(Expr::Identifier("amount".into()))));
/// ```
pub fn parse(input: &str) -> Result<Expr, ParseError> {
    Parser::new(Lexer::new(input))?.parse()
}

pub struct Parser {
    lexer: Lexer,
    current_token: Token,
    current_position: Position,
    /// Open `(`, `[` and argument lists around the current token
    nesting: usize,
}

/// A parsed subtree and its depth (a leaf is depth 1).
type Parsed = Result<(Expr, usize), ParseError>;

impl Parser {
    pub fn new(mut lexer: Lexer) -> Result<Self, ParseError> {
        let current_token = lexer.next_token()?;
        let current_position = lexer.token_start();
        Ok(Parser {
            lexer,
            current_token,
            current_position,
            nesting: 0,
        })
    }

    fn advance(&mut self) -> Result<(), ParseError> {
        self.current_token = self.lexer.next_token()?;
        self.current_position = self.lexer.token_start();
        Ok(())
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        ParseError::UnexpectedToken {
            expected,
            found: self.current_token.clone(),
            position: self.current_position,
        }
    }

    fn expect(&mut self, expected: Token, description: &'static str) -> Result<(), ParseError> {
        if !self.check(&expected) {
            return Err(self.unexpected(description));
        }
        self.advance()
    }

    fn check(&self, token: &Token) -> bool {
        mem::discriminant(&self.current_token) == mem::discriminant(token)
    }

    /// Called before recursing into a bracketed subexpression.
    fn enter(&mut self, position: Position) -> Result<(), ParseError> {
        if self.nesting >= MAX_NESTING {
            return Err(ParseError::TooDeep {
                limit: MAX_NESTING,
                position,
            });
        }
        self.nesting += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.nesting -= 1;
    }

    /// Parse primary expressions (atoms): literals, identifiers, calls, groups
    fn parse_primary(&mut self) -> Parsed {
        let position = self.current_position;
        match mem::replace(&mut self.current_token, Token::Eof) {
            Token::Float(n) => {
                self.advance()?;
                Ok((Expr::Number(n), 1))
            }
            Token::Integer(n) => {
                self.advance()?;
                Ok((Expr::Number(n as f64), 1))
            }
            Token::String(s) => {
                self.advance()?;
                Ok((Expr::String(s), 1))
            }
            Token::Identifier(name) => {
                self.advance()?;
                if self.check(&Token::LParen) {
                    self.parse_call(name, position)
                } else {
                    Ok((Expr::Identifier(name), 1))
                }
            }
            Token::LParen => {
                self.enter(position)?;
                self.advance()?;
                let (expr, depth) = self.parse_or()?;
                self.expect(Token::RParen, "')'")?;
                self.leave();
                Ok((Expr::Group(Box::new(expr)), deeper(depth, position)?))
            }
            token => {
                // put it back so the error reports what was actually found
                self.current_token = token;
                Err(self.unexpected("an expression"))
            }
        }
    }

    fn parse_call(&mut self, name: String, position: Position) -> Parsed {
        if !name.eq_ignore_ascii_case(MEMBERSHIP_FUNCTION) {
            return Err(ParseError::UnsupportedFunction { name, position });
        }

        self.enter(position)?;
        self.advance()?; // consume '('
        let mut args = vec![];
        let mut depth = 0;
        if !self.check(&Token::RParen) {
            loop {
                let (arg, arg_depth) = self.parse_or()?;
                args.push(arg);
                depth = depth.max(arg_depth);
                if !self.check(&Token::Comma) {
                    break;
                }
                self.advance()?;
            }
        }
        self.expect(Token::RParen, "',' or ')'")?;
        self.leave();

        if args.len() != MEMBERSHIP_ARITY {
            return Err(ParseError::WrongArity {
                name,
                expected: MEMBERSHIP_ARITY,
                found: args.len(),
                position,
            });
        }
        Ok((Expr::Call { name, args }, deeper(depth, position)?))
    }

    /// Parse postfix access: `.field` and `[index]`, chained left to right
    fn parse_access(&mut self) -> Parsed {
        let (mut expr, mut depth) = self.parse_primary()?;

        loop {
            let position = self.current_position;
            if self.check(&Token::LBracket) {
                self.enter(position)?;
                self.advance()?;
                let (index, index_depth) = self.parse_or()?;
                self.expect(Token::RBracket, "']'")?;
                self.leave();

                depth = deeper(depth.max(index_depth), position)?;
                expr = Expr::Index {
                    object: Box::new(expr),
                    index: Box::new(index),
                };
            } else if self.check(&Token::Dot) {
                self.advance()?;

                let field = match mem::replace(&mut self.current_token, Token::Eof) {
                    Token::Identifier(name) => name,
                    token => {
                        self.current_token = token;
                        return Err(self.unexpected("a field name after '.'"));
                    }
                };
                self.advance()?;

                depth = deeper(depth, position)?;
                expr = Expr::FieldAccess {
                    object: Box::new(expr),
                    field,
                };
            } else {
                break;
            }
        }
        Ok((expr, depth))
    }

    fn parse_multiplicative(&mut self) -> Parsed {
        let mut left = self.parse_access()?;

        loop {
            let op = match &self.current_token {
                Token::Star => BinOp::Multiply,
                Token::Slash => BinOp::Divide,
                _ => break,
            };

            let position = self.current_position;
            self.advance()?;
            let right = self.parse_access()?;
            left = binary(op, left, right, position)?;
        }
        Ok(left)
    }

    fn parse_additive(&mut self) -> Parsed {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = match &self.current_token {
                Token::Plus => BinOp::Add,
                Token::Minus => BinOp::Subtract,
                _ => break,
            };

            let position = self.current_position;
            self.advance()?;
            let right = self.parse_multiplicative()?;
            left = binary(op, left, right, position)?;
        }
        Ok(left)
    }

    fn parse_relational(&mut self) -> Parsed {
        let mut left = self.parse_additive()?;

        loop {
            let op = match &self.current_token {
                Token::Lt => BinOp::LessThan,
                Token::Gt => BinOp::GreaterThan,
                Token::LtEq => BinOp::LessEqual,
                Token::GtEq => BinOp::GreaterEqual,
                _ => break,
            };

            let position = self.current_position;
            self.advance()?;
            let right = self.parse_additive()?;
            left = binary(op, left, right, position)?;
        }
        Ok(left)
    }

    fn parse_equality(&mut self) -> Parsed {
        let mut left = self.parse_relational()?;

        loop {
            let op = match &self.current_token {
                Token::EqEq => BinOp::Equal,
                Token::NotEq => BinOp::NotEqual,
                _ => break,
            };

            let position = self.current_position;
            self.advance()?;
            let right = self.parse_relational()?;
            left = binary(op, left, right, position)?;
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Parsed {
        let mut left = self.parse_equality()?;

        while self.check(&Token::And) {
            let position = self.current_position;
            self.advance()?;
            let right = self.parse_equality()?;
            left = binary(BinOp::And, left, right, position)?;
        }
        Ok(left)
    }

    fn parse_or(&mut self) -> Parsed {
        let mut left = self.parse_and()?;

        while self.check(&Token::Or) {
            let position = self.current_position;
            self.advance()?;
            let right = self.parse_and()?;
            left = binary(BinOp::Or, left, right, position)?;
        }
        Ok(left)
    }

    pub fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_or().map(|(expr, _)| expr)
    }

    /// Parse the whole input as one expression; trailing tokens are an error.
    pub fn parse(&mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_expression()?;
        self.expect(Token::Eof, "an operator or end of input")?;
        Ok(expr)
    }
}

fn binary(op: BinOp, left: (Expr, usize), right: (Expr, usize), position: Position) -> Parsed {
    let depth = deeper(left.1.max(right.1), position)?;
    Ok((Expr::binary(op, left.0, right.0), depth))
}

/// Depth of a node over a child of depth `depth`.
fn deeper(depth: usize, position: Position) -> Result<usize, ParseError> {
    if depth >= MAX_DEPTH {
        return Err(ParseError::TooDeep {
            limit: MAX_DEPTH,
            position,
        });
    }
    Ok(depth + 1)
}
