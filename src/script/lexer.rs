//! Scriptlet lexer
//!
//! Hand-rolled scanner producing a flat token stream. Newlines are
//! significant (statement separators) so the multi-line command buffer
//! evaluates the way it reads; all other whitespace is skipped. `#`
//! starts a comment running to end of line.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::error::{Error, Result};

/// Token kinds of the scriptlet language
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals and names
    Num(f64),
    Str(String),
    Ident(String),

    // Keywords
    True,
    False,
    Nil,
    And,
    Or,
    Not,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Assign,
    PlusAssign,
    MinusAssign,
    StarAssign,
    SlashAssign,
    EqEq,
    NotEq,
    Less,
    LessEq,
    Greater,
    GreaterEq,

    // Punctuation
    LParen,
    RParen,
    Comma,
    Dot,
    Semicolon,
    Newline,
    Eof,
}

/// A token with its source position (1-based)
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub column: usize,
}

static KEYWORDS: Lazy<HashMap<&'static str, TokenKind>> = Lazy::new(|| {
    HashMap::from([
        ("true", TokenKind::True),
        ("false", TokenKind::False),
        ("nil", TokenKind::Nil),
        ("and", TokenKind::And),
        ("or", TokenKind::Or),
        ("not", TokenKind::Not),
    ])
});

/// Scan source text into tokens.
///
/// Consecutive newlines collapse into one separator token. Any text is
/// accepted as input; only characters outside the language reject.
pub fn scan(source: &str) -> Result<Vec<Token>> {
    Scanner::new(source).run()
}

struct Scanner {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
    tokens: Vec<Token>,
}

impl Scanner {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Vec<Token>> {
        while let Some(c) = self.peek() {
            let (line, column) = (self.line, self.column);
            match c {
                ' ' | '\t' | '\r' => {
                    self.advance();
                }
                '\n' => {
                    self.advance();
                    // Collapse runs of blank lines into one separator
                    if !matches!(
                        self.tokens.last().map(|t| &t.kind),
                        Some(TokenKind::Newline) | None
                    ) {
                        self.push_at(TokenKind::Newline, line, column);
                    }
                }
                '#' => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                '(' => self.single(TokenKind::LParen),
                ')' => self.single(TokenKind::RParen),
                ',' => self.single(TokenKind::Comma),
                '.' => self.single(TokenKind::Dot),
                ';' => self.single(TokenKind::Semicolon),
                '+' => self.op_or_assign(TokenKind::Plus, TokenKind::PlusAssign),
                '-' => self.op_or_assign(TokenKind::Minus, TokenKind::MinusAssign),
                '*' => self.op_or_assign(TokenKind::Star, TokenKind::StarAssign),
                '/' => self.op_or_assign(TokenKind::Slash, TokenKind::SlashAssign),
                '%' => self.single(TokenKind::Percent),
                '=' => self.op_or_assign(TokenKind::Assign, TokenKind::EqEq),
                '<' => self.op_or_assign(TokenKind::Less, TokenKind::LessEq),
                '>' => self.op_or_assign(TokenKind::Greater, TokenKind::GreaterEq),
                '!' => {
                    self.advance();
                    if self.peek() == Some('=') {
                        self.advance();
                        self.push_at(TokenKind::NotEq, line, column);
                    } else {
                        return Err(Error::ScanFailed {
                            line,
                            column,
                            reason: "unexpected '!' (use 'not' or '!=')".to_string(),
                        });
                    }
                }
                '"' => self.string(line, column)?,
                c if c.is_ascii_digit() => self.number(line, column)?,
                c if c.is_alphabetic() || c == '_' => self.ident(line, column),
                other => {
                    return Err(Error::ScanFailed {
                        line,
                        column,
                        reason: format!("unexpected character '{}'", other),
                    });
                }
            }
        }

        let (line, column) = (self.line, self.column);
        self.push_at(TokenKind::Eof, line, column);
        Ok(self.tokens)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.chars.get(self.pos).copied();
        if let Some(c) = c {
            self.pos += 1;
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        c
    }

    fn push_at(&mut self, kind: TokenKind, line: usize, column: usize) {
        self.tokens.push(Token { kind, line, column });
    }

    fn single(&mut self, kind: TokenKind) {
        let (line, column) = (self.line, self.column);
        self.advance();
        self.push_at(kind, line, column);
    }

    /// One-character operator, or the two-character form when followed by '='
    fn op_or_assign(&mut self, bare: TokenKind, with_eq: TokenKind) {
        let (line, column) = (self.line, self.column);
        self.advance();
        if self.peek() == Some('=') {
            self.advance();
            self.push_at(with_eq, line, column);
        } else {
            self.push_at(bare, line, column);
        }
    }

    fn string(&mut self, line: usize, column: usize) -> Result<()> {
        self.advance(); // opening quote
        let mut text = String::new();
        loop {
            match self.advance() {
                None | Some('\n') => {
                    return Err(Error::ScanFailed {
                        line,
                        column,
                        reason: "unterminated string".to_string(),
                    });
                }
                Some('"') => break,
                Some('\\') => match self.advance() {
                    Some('n') => text.push('\n'),
                    Some('t') => text.push('\t'),
                    Some('"') => text.push('"'),
                    Some('\\') => text.push('\\'),
                    other => {
                        return Err(Error::ScanFailed {
                            line,
                            column,
                            reason: format!(
                                "unknown escape '\\{}'",
                                other.map(String::from).unwrap_or_default()
                            ),
                        });
                    }
                },
                Some(c) => text.push(c),
            }
        }
        self.push_at(TokenKind::Str(text), line, column);
        Ok(())
    }

    fn number(&mut self, line: usize, column: usize) -> Result<()> {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                text.push(c);
                self.advance();
            } else {
                break;
            }
        }
        // Fractional part, but not the attribute dot of `1 .foo` (digits must follow)
        if self.peek() == Some('.')
            && self
                .chars
                .get(self.pos + 1)
                .is_some_and(|c| c.is_ascii_digit())
        {
            text.push('.');
            self.advance();
            while let Some(c) = self.peek() {
                if c.is_ascii_digit() {
                    text.push(c);
                    self.advance();
                } else {
                    break;
                }
            }
        }
        let value: f64 = text.parse().map_err(|_| Error::ScanFailed {
            line,
            column,
            reason: format!("invalid number '{}'", text),
        })?;
        self.push_at(TokenKind::Num(value), line, column);
        Ok(())
    }

    fn ident(&mut self, line: usize, column: usize) {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                text.push(c);
                self.advance();
            } else {
                break;
            }
        }
        let kind = KEYWORDS
            .get(text.as_str())
            .cloned()
            .unwrap_or(TokenKind::Ident(text));
        self.push_at(kind, line, column);
    }
}
