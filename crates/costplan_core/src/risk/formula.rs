//! Arithmetic formula parser and evaluator for Monte Carlo outcomes.
//!
//! The grammar covers what scenario formulas need: `+ - * / ^`, unary
//! minus, parentheses, numeric literals, and named variables. A formula is
//! parsed once into an [`Expr`] tree and evaluated once per trial against
//! the sampled variable values.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::FormulaError;

/// Parsed expression tree
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Variable(String),
    Neg(Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Parse a formula string
    pub fn parse(input: &str) -> Result<Expr, FormulaError> {
        let tokens = tokenize(input)?;
        if tokens.is_empty() {
            return Err(FormulaError::EmptyFormula);
        }
        let mut parser = Parser { tokens, pos: 0 };
        let expr = parser.expression()?;
        match parser.peek() {
            None => Ok(expr),
            Some(token) => Err(FormulaError::UnexpectedToken {
                position: token.position,
            }),
        }
    }

    /// Every variable name the expression references
    pub fn collect_variables<'a>(&'a self, out: &mut FxHashSet<&'a str>) {
        match self {
            Expr::Number(_) => {}
            Expr::Variable(name) => {
                out.insert(name.as_str());
            }
            Expr::Neg(inner) => inner.collect_variables(out),
            Expr::Add(a, b)
            | Expr::Sub(a, b)
            | Expr::Mul(a, b)
            | Expr::Div(a, b)
            | Expr::Pow(a, b) => {
                a.collect_variables(out);
                b.collect_variables(out);
            }
        }
    }

    /// Evaluate against a variable assignment.
    ///
    /// Division by zero and similar produce non-finite floats here; the
    /// simulation engine checks finiteness per trial, so intermediate
    /// infinities that cancel are not rejected prematurely.
    pub fn eval(&self, values: &FxHashMap<&str, f64>) -> Result<f64, FormulaError> {
        match self {
            Expr::Number(n) => Ok(*n),
            Expr::Variable(name) => values
                .get(name.as_str())
                .copied()
                .ok_or_else(|| FormulaError::UnknownVariable(name.clone())),
            Expr::Neg(inner) => Ok(-inner.eval(values)?),
            Expr::Add(a, b) => Ok(a.eval(values)? + b.eval(values)?),
            Expr::Sub(a, b) => Ok(a.eval(values)? - b.eval(values)?),
            Expr::Mul(a, b) => Ok(a.eval(values)? * b.eval(values)?),
            Expr::Div(a, b) => Ok(a.eval(values)? / b.eval(values)?),
            Expr::Pow(a, b) => Ok(a.eval(values)?.powf(b.eval(values)?)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum TokenKind {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LeftParen,
    RightParen,
}

#[derive(Debug, Clone, PartialEq)]
struct Token {
    kind: TokenKind,
    position: usize,
}

fn tokenize(input: &str) -> Result<Vec<Token>, FormulaError> {
    let mut tokens = Vec::new();
    let bytes: Vec<(usize, char)> = input.char_indices().collect();
    let mut i = 0;

    while i < bytes.len() {
        let (position, c) = bytes[i];
        match c {
            c if c.is_whitespace() => i += 1,
            '+' | '-' | '*' | '/' | '^' | '(' | ')' => {
                let kind = match c {
                    '+' => TokenKind::Plus,
                    '-' => TokenKind::Minus,
                    '*' => TokenKind::Star,
                    '/' => TokenKind::Slash,
                    '^' => TokenKind::Caret,
                    '(' => TokenKind::LeftParen,
                    _ => TokenKind::RightParen,
                };
                tokens.push(Token { kind, position });
                i += 1;
            }
            c if c.is_ascii_digit() || c == '.' => {
                let start = i;
                while i < bytes.len() && (bytes[i].1.is_ascii_digit() || bytes[i].1 == '.') {
                    i += 1;
                }
                let text: String = bytes[start..i].iter().map(|(_, ch)| ch).collect();
                let value = text.parse::<f64>().map_err(|_| {
                    FormulaError::UnexpectedCharacter {
                        position,
                        character: c,
                    }
                })?;
                tokens.push(Token {
                    kind: TokenKind::Number(value),
                    position,
                });
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let start = i;
                while i < bytes.len()
                    && (bytes[i].1.is_ascii_alphanumeric() || bytes[i].1 == '_')
                {
                    i += 1;
                }
                let name: String = bytes[start..i].iter().map(|(_, ch)| ch).collect();
                tokens.push(Token {
                    kind: TokenKind::Ident(name),
                    position,
                });
            }
            other => {
                return Err(FormulaError::UnexpectedCharacter {
                    position,
                    character: other,
                });
            }
        }
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek().is_some_and(|t| t.kind == *kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    // expression := term (('+' | '-') term)*
    fn expression(&mut self) -> Result<Expr, FormulaError> {
        let mut left = self.term()?;
        loop {
            if self.eat(&TokenKind::Plus) {
                left = Expr::Add(Box::new(left), Box::new(self.term()?));
            } else if self.eat(&TokenKind::Minus) {
                left = Expr::Sub(Box::new(left), Box::new(self.term()?));
            } else {
                return Ok(left);
            }
        }
    }

    // term := factor (('*' | '/') factor)*
    fn term(&mut self) -> Result<Expr, FormulaError> {
        let mut left = self.factor()?;
        loop {
            if self.eat(&TokenKind::Star) {
                left = Expr::Mul(Box::new(left), Box::new(self.factor()?));
            } else if self.eat(&TokenKind::Slash) {
                left = Expr::Div(Box::new(left), Box::new(self.factor()?));
            } else {
                return Ok(left);
            }
        }
    }

    // factor := '-' factor | power
    fn factor(&mut self) -> Result<Expr, FormulaError> {
        if self.eat(&TokenKind::Minus) {
            return Ok(Expr::Neg(Box::new(self.factor()?)));
        }
        self.power()
    }

    // power := atom ('^' factor)?   (right-associative)
    fn power(&mut self) -> Result<Expr, FormulaError> {
        let base = self.atom()?;
        if self.eat(&TokenKind::Caret) {
            let exponent = self.factor()?;
            return Ok(Expr::Pow(Box::new(base), Box::new(exponent)));
        }
        Ok(base)
    }

    fn atom(&mut self) -> Result<Expr, FormulaError> {
        let Some(token) = self.advance() else {
            return Err(FormulaError::UnexpectedEnd);
        };
        match token.kind {
            TokenKind::Number(value) => Ok(Expr::Number(value)),
            TokenKind::Ident(name) => Ok(Expr::Variable(name)),
            TokenKind::LeftParen => {
                let inner = self.expression()?;
                if self.eat(&TokenKind::RightParen) {
                    Ok(inner)
                } else {
                    match self.peek() {
                        Some(t) => Err(FormulaError::UnexpectedToken {
                            position: t.position,
                        }),
                        None => Err(FormulaError::UnexpectedEnd),
                    }
                }
            }
            _ => Err(FormulaError::UnexpectedToken {
                position: token.position,
            }),
        }
    }
}
