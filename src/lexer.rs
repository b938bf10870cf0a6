use std::fmt;

use thiserror::Error;

use crate::ast::Token;

/// Character offset (0-based) into the rule text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Position {
    pub offset: usize,
}

impl Position {
    pub fn new(offset: usize) -> Self {
        Position { offset }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "position {}", self.offset)
    }
}

/// Errors raised while splitting rule text into tokens.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("unexpected character '{ch}' at {position}")]
    UnexpectedCharacter { ch: char, position: Position },

    /// `&`, `|`, `=` and `!` only exist as part of `&&`, `||`, `==` and `!=`.
    #[error("unsupported operator '{op}' at {position}")]
    UnsupportedOperator { op: String, position: Position },

    #[error("unterminated string starting at {position}")]
    UnterminatedString { position: Position },

    #[error("invalid escape sequence '\\{ch}' at {position}")]
    InvalidEscape { ch: char, position: Position },

    #[error("invalid number literal '{text}' at {position}")]
    InvalidNumber { text: String, position: Position },
}

impl LexError {
    pub fn position(&self) -> Position {
        match self {
            LexError::UnexpectedCharacter { position, .. }
            | LexError::UnsupportedOperator { position, .. }
            | LexError::UnterminatedString { position }
            | LexError::InvalidEscape { position, .. }
            | LexError::InvalidNumber { position, .. } => *position,
        }
    }
}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    token_start: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            token_start: 0,
        }
    }

    /// Start of the token most recently returned by [`Lexer::next_token`].
    pub fn token_start(&self) -> Position {
        Position::new(self.token_start)
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_alphanumeric() || ch == '_' {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    fn read_string(&mut self) -> Result<String, LexError> {
        let start = Position::new(self.position);
        let mut result = String::new();
        self.advance(); // opening quote

        while let Some(ch) = self.current_char() {
            match ch {
                '"' => {
                    self.advance();
                    return Ok(result);
                }
                '\\' => {
                    self.advance();
                    match self.current_char() {
                        Some('n') => result.push('\n'),
                        Some('t') => result.push('\t'),
                        Some('r') => result.push('\r'),
                        Some('"') => result.push('"'),
                        Some('\\') => result.push('\\'),
                        Some(ch) => {
                            return Err(LexError::InvalidEscape {
                                ch,
                                position: Position::new(self.position - 1),
                            });
                        }
                        None => return Err(LexError::UnterminatedString { position: start }),
                    }
                    self.advance();
                }
                _ => {
                    result.push(ch);
                    self.advance();
                }
            }
        }

        Err(LexError::UnterminatedString { position: start })
    }

    fn read_number(&mut self) -> Result<Token, LexError> {
        let mut number = String::new();
        let mut is_float = false;

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                number.push(ch);
                self.advance();
            } else if ch == '.'
                && !is_float
                && self.peek_char(1).is_some_and(|c| c.is_ascii_digit())
            {
                is_float = true;
                number.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let invalid = |text: String| LexError::InvalidNumber {
            text,
            position: Position::new(self.token_start),
        };
        if is_float {
            number.parse::<f64>().map(Token::Float).map_err(|_| invalid(number))
        } else {
            number.parse::<i64>().map(Token::Integer).map_err(|_| invalid(number))
        }
    }

    /// Consume `second` if it follows the current char, producing `pair`;
    /// otherwise the single char is an operator this language does not have.
    fn read_pair(&mut self, first: char, second: char, pair: Token) -> Result<Token, LexError> {
        if self.peek_char(1) == Some(second) {
            self.advance();
            self.advance();
            Ok(pair)
        } else {
            Err(LexError::UnsupportedOperator {
                op: first.to_string(),
                position: Position::new(self.position),
            })
        }
    }

    fn read_relational(&mut self, single: Token, with_eq: Token) -> Token {
        if self.peek_char(1) == Some('=') {
            self.advance();
            self.advance();
            with_eq
        } else {
            self.advance();
            single
        }
    }

    fn single(&mut self, token: Token) -> Token {
        self.advance();
        token
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();
        self.token_start = self.position;

        let ch = match self.current_char() {
            None => return Ok(Token::Eof),
            Some(ch) => ch,
        };

        let token = match ch {
            '+' => self.single(Token::Plus),
            '-' => self.single(Token::Minus),
            '*' => self.single(Token::Star),
            '/' => self.single(Token::Slash),
            '(' => self.single(Token::LParen),
            ')' => self.single(Token::RParen),
            '[' => self.single(Token::LBracket),
            ']' => self.single(Token::RBracket),
            '.' => self.single(Token::Dot),
            ',' => self.single(Token::Comma),
            '<' => self.read_relational(Token::Lt, Token::LtEq),
            '>' => self.read_relational(Token::Gt, Token::GtEq),
            '=' => self.read_pair('=', '=', Token::EqEq)?,
            '!' => self.read_pair('!', '=', Token::NotEq)?,
            '&' => self.read_pair('&', '&', Token::And)?,
            '|' => self.read_pair('|', '|', Token::Or)?,
            '"' => Token::String(self.read_string()?),
            c if c.is_alphabetic() || c == '_' => Token::Identifier(self.read_identifier()),
            c if c.is_ascii_digit() => self.read_number()?,
            ch => {
                return Err(LexError::UnexpectedCharacter {
                    ch,
                    position: Position::new(self.position),
                });
            }
        };
        Ok(token)
    }
}

#[test]
fn test_operators() {
    let mut lexer = Lexer::new("a+b <= c && d != \"x\"");
    assert_eq!(lexer.next_token().unwrap(), Token::Identifier("a".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::Plus);
    assert_eq!(lexer.next_token().unwrap(), Token::Identifier("b".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::LtEq);
    assert_eq!(lexer.next_token().unwrap(), Token::Identifier("c".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::And);
    assert_eq!(lexer.next_token().unwrap(), Token::Identifier("d".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::NotEq);
    assert_eq!(lexer.next_token().unwrap(), Token::String("x".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::Eof);
}

#[test]
fn test_token_start_tracks_last_token() {
    let mut lexer = Lexer::new("  ab   12");
    lexer.next_token().unwrap();
    assert_eq!(lexer.token_start(), Position::new(2));
    lexer.next_token().unwrap();
    assert_eq!(lexer.token_start(), Position::new(7));
    assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    assert_eq!(lexer.token_start(), Position::new(9));
}
