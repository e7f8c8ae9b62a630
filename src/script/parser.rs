//! Scriptlet parser
//!
//! Recursive-descent parser over the lexer's token stream. Statements are
//! separated by newlines or semicolons; newlines inside parentheses are
//! ignored so long call argument lists can wrap.

use crate::error::{Error, Result};
use crate::script::lexer::{Token, TokenKind};

/// A parsed program: a sequence of statements
pub type Program = Vec<Stmt>;

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// Bare expression; its value becomes the evaluation result if last
    Expr(Expr),
    /// Assignment to a name or an attribute
    Assign {
        target: AssignTarget,
        op: AssignOp,
        value: Expr,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum AssignTarget {
    Name(String),
    Attr { base: Expr, name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Set,
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Nil,
    Bool(bool),
    Num(f64),
    Str(String),
    Name(String),
    Attr {
        base: Box<Expr>,
        name: String,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
        kwargs: Vec<(String, Expr)>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

/// Parse a token stream into a program
pub fn parse(tokens: Vec<Token>) -> Result<Program> {
    Parser::new(tokens).program()
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn program(mut self) -> Result<Program> {
        let mut stmts = Vec::new();
        self.skip_separators();
        while !self.check(&TokenKind::Eof) {
            stmts.push(self.statement()?);
            if !self.check(&TokenKind::Eof) {
                self.expect_separator()?;
                self.skip_separators();
            }
        }
        Ok(stmts)
    }

    fn statement(&mut self) -> Result<Stmt> {
        let expr = self.expression()?;

        let op = match self.peek_kind() {
            TokenKind::Assign => Some(AssignOp::Set),
            TokenKind::PlusAssign => Some(AssignOp::Add),
            TokenKind::MinusAssign => Some(AssignOp::Sub),
            TokenKind::StarAssign => Some(AssignOp::Mul),
            TokenKind::SlashAssign => Some(AssignOp::Div),
            _ => None,
        };

        let Some(op) = op else {
            return Ok(Stmt::Expr(expr));
        };
        let line = self.line();
        self.advance();

        let target = match expr {
            Expr::Name(name) => AssignTarget::Name(name),
            Expr::Attr { base, name } => AssignTarget::Attr { base: *base, name },
            other => {
                return Err(Error::ParseFailed {
                    line,
                    reason: format!("cannot assign to {}", describe(&other)),
                });
            }
        };
        let value = self.expression()?;
        Ok(Stmt::Assign { target, op, value })
    }

    fn expression(&mut self) -> Result<Expr> {
        self.or_expr()
    }

    fn or_expr(&mut self) -> Result<Expr> {
        let mut expr = self.and_expr()?;
        while self.eat(&TokenKind::Or) {
            let right = self.and_expr()?;
            expr = binary(BinaryOp::Or, expr, right);
        }
        Ok(expr)
    }

    fn and_expr(&mut self) -> Result<Expr> {
        let mut expr = self.equality()?;
        while self.eat(&TokenKind::And) {
            let right = self.equality()?;
            expr = binary(BinaryOp::And, expr, right);
        }
        Ok(expr)
    }

    fn equality(&mut self) -> Result<Expr> {
        let mut expr = self.comparison()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::EqEq => BinaryOp::Eq,
                TokenKind::NotEq => BinaryOp::Ne,
                _ => break,
            };
            self.advance();
            let right = self.comparison()?;
            expr = binary(op, expr, right);
        }
        Ok(expr)
    }

    fn comparison(&mut self) -> Result<Expr> {
        let mut expr = self.term()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Less => BinaryOp::Lt,
                TokenKind::LessEq => BinaryOp::Le,
                TokenKind::Greater => BinaryOp::Gt,
                TokenKind::GreaterEq => BinaryOp::Ge,
                _ => break,
            };
            self.advance();
            let right = self.term()?;
            expr = binary(op, expr, right);
        }
        Ok(expr)
    }

    fn term(&mut self) -> Result<Expr> {
        let mut expr = self.factor()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.factor()?;
            expr = binary(op, expr, right);
        }
        Ok(expr)
    }

    fn factor(&mut self) -> Result<Expr> {
        let mut expr = self.unary()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                TokenKind::Percent => BinaryOp::Rem,
                _ => break,
            };
            self.advance();
            let right = self.unary()?;
            expr = binary(op, expr, right);
        }
        Ok(expr)
    }

    fn unary(&mut self) -> Result<Expr> {
        if self.eat(&TokenKind::Minus) {
            let operand = self.unary()?;
            return Ok(Expr::Unary {
                op: UnaryOp::Neg,
                operand: Box::new(operand),
            });
        }
        if self.eat(&TokenKind::Not) {
            let operand = self.unary()?;
            return Ok(Expr::Unary {
                op: UnaryOp::Not,
                operand: Box::new(operand),
            });
        }
        self.postfix()
    }

    fn postfix(&mut self) -> Result<Expr> {
        let mut expr = self.primary()?;
        loop {
            if self.eat(&TokenKind::Dot) {
                let name = self.expect_ident("attribute name after '.'")?;
                expr = Expr::Attr {
                    base: Box::new(expr),
                    name,
                };
            } else if self.check(&TokenKind::LParen) {
                expr = self.call(expr)?;
            } else {
                break;
            }
        }
        Ok(expr)
    }

    fn call(&mut self, callee: Expr) -> Result<Expr> {
        self.advance(); // '('
        self.skip_newlines();

        let mut args = Vec::new();
        let mut kwargs: Vec<(String, Expr)> = Vec::new();

        if !self.check(&TokenKind::RParen) {
            loop {
                if let Some(keyword) = self.peek_kwarg_name() {
                    let line = self.line();
                    self.advance(); // ident
                    self.advance(); // '='
                    if kwargs.iter().any(|(k, _)| *k == keyword) {
                        return Err(Error::ParseFailed {
                            line,
                            reason: format!("duplicate keyword argument '{}'", keyword),
                        });
                    }
                    let value = self.expression()?;
                    kwargs.push((keyword, value));
                } else {
                    if !kwargs.is_empty() {
                        return Err(Error::ParseFailed {
                            line: self.line(),
                            reason: "positional argument after keyword argument".to_string(),
                        });
                    }
                    args.push(self.expression()?);
                }
                self.skip_newlines();
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
                self.skip_newlines();
            }
        }

        self.expect(&TokenKind::RParen, "')' to close argument list")?;
        Ok(Expr::Call {
            callee: Box::new(callee),
            args,
            kwargs,
        })
    }

    fn primary(&mut self) -> Result<Expr> {
        let token = self.peek().clone();
        match token.kind {
            TokenKind::Num(n) => {
                self.advance();
                Ok(Expr::Num(n))
            }
            TokenKind::Str(s) => {
                self.advance();
                Ok(Expr::Str(s))
            }
            TokenKind::True => {
                self.advance();
                Ok(Expr::Bool(true))
            }
            TokenKind::False => {
                self.advance();
                Ok(Expr::Bool(false))
            }
            TokenKind::Nil => {
                self.advance();
                Ok(Expr::Nil)
            }
            TokenKind::Ident(name) => {
                self.advance();
                Ok(Expr::Name(name))
            }
            TokenKind::LParen => {
                self.advance();
                self.skip_newlines();
                let expr = self.expression()?;
                self.skip_newlines();
                self.expect(&TokenKind::RParen, "')' to close group")?;
                Ok(expr)
            }
            other => Err(Error::ParseFailed {
                line: token.line,
                reason: format!("unexpected {}", token_name(&other)),
            }),
        }
    }

    // === token stream helpers ===

    fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek_kind(&self) -> &TokenKind {
        &self.peek().kind
    }

    fn line(&self) -> usize {
        self.peek().line
    }

    /// Lookahead for `ident =` (and not `ident ==`) at an argument position
    fn peek_kwarg_name(&self) -> Option<String> {
        let TokenKind::Ident(name) = self.peek_kind() else {
            return None;
        };
        match self.tokens.get(self.pos + 1).map(|t| &t.kind) {
            Some(TokenKind::Assign) => Some(name.clone()),
            _ => None,
        }
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
    }

    fn check(&self, kind: &TokenKind) -> bool {
        self.peek_kind() == kind
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind, what: &str) -> Result<()> {
        if self.eat(kind) {
            Ok(())
        } else {
            Err(Error::ParseFailed {
                line: self.line(),
                reason: format!("expected {}, found {}", what, token_name(self.peek_kind())),
            })
        }
    }

    fn expect_ident(&mut self, what: &str) -> Result<String> {
        if let TokenKind::Ident(name) = self.peek_kind() {
            let name = name.clone();
            self.advance();
            Ok(name)
        } else {
            Err(Error::ParseFailed {
                line: self.line(),
                reason: format!("expected {}, found {}", what, token_name(self.peek_kind())),
            })
        }
    }

    fn skip_newlines(&mut self) {
        while self.check(&TokenKind::Newline) {
            self.advance();
        }
    }

    fn skip_separators(&mut self) {
        while self.check(&TokenKind::Newline) || self.check(&TokenKind::Semicolon) {
            self.advance();
        }
    }

    fn expect_separator(&mut self) -> Result<()> {
        if self.check(&TokenKind::Newline) || self.check(&TokenKind::Semicolon) {
            self.advance();
            Ok(())
        } else {
            Err(Error::ParseFailed {
                line: self.line(),
                reason: format!(
                    "expected end of statement, found {}",
                    token_name(self.peek_kind())
                ),
            })
        }
    }
}

fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    Expr::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
    }
}

fn describe(expr: &Expr) -> &'static str {
    match expr {
        Expr::Call { .. } => "a call result",
        Expr::Binary { .. } | Expr::Unary { .. } => "an expression",
        _ => "a literal",
    }
}

fn token_name(kind: &TokenKind) -> String {
    match kind {
        TokenKind::Num(n) => format!("number {}", n),
        TokenKind::Str(_) => "string".to_string(),
        TokenKind::Ident(name) => format!("'{}'", name),
        TokenKind::Newline => "end of line".to_string(),
        TokenKind::Eof => "end of input".to_string(),
        other => format!("{:?}", other).to_lowercase(),
    }
}
