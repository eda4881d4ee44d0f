//! Arithmetic expressions for qubit indices, angles, loop bounds and
//! macro arguments.
//!
//! The grammar is the usual one: `+ -` bind looser than `* /`, both
//! left-associative, with unary signs, parentheses, decimal literals,
//! the constant `pi`, and `$name` variables looked up in an
//! [`Environment`].

use rustc_hash::FxHashMap;
use std::f64::consts::PI;

use crate::error::{ExprError, ExprResult};
use crate::lexer::{SpannedToken, Token, tokenize};

/// Variable bindings visible to an expression.
///
/// Names are stored with their `$` sigil.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    bindings: FxHashMap<String, f64>,
}

impl Environment {
    /// An environment with no bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an environment from name/value pairs.
    pub fn from_bindings<N: Into<String>>(bindings: impl IntoIterator<Item = (N, f64)>) -> Self {
        Self {
            bindings: bindings
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }

    /// Bind `name` to `value`, replacing any previous binding.
    pub fn bind(&mut self, name: impl Into<String>, value: f64) {
        self.bindings.insert(name.into(), value);
    }

    /// A copy of this environment with one extra binding.
    pub fn with(&self, name: impl Into<String>, value: f64) -> Self {
        let mut child = self.clone();
        child.bind(name, value);
        child
    }

    /// Look up a variable.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.bindings.get(name).copied()
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            BinOp::Add => left + right,
            BinOp::Sub => left - right,
            BinOp::Mul => left * right,
            BinOp::Div => left / right,
        }
    }
}

/// A parsed expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Decimal literal.
    Number(f64),
    /// The constant pi.
    Pi,
    /// A `$name` variable.
    Variable(String),
    /// Unary minus.
    Neg(Box<Expr>),
    /// Binary operation.
    BinOp {
        left: Box<Expr>,
        op: BinOp,
        right: Box<Expr>,
    },
}

impl Expr {
    /// Parse expression text.
    pub fn parse(text: &str) -> ExprResult<Self> {
        ExprParser::new(text)?.parse()
    }

    /// Evaluate against an environment.
    pub fn eval(&self, env: &Environment) -> ExprResult<f64> {
        let value = match self {
            Expr::Number(v) => *v,
            Expr::Pi => PI,
            Expr::Variable(name) => env
                .get(name)
                .ok_or_else(|| ExprError::UndefinedVariable(name.clone()))?,
            Expr::Neg(inner) => -inner.eval(env)?,
            Expr::BinOp { left, op, right } => op.apply(left.eval(env)?, right.eval(env)?),
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(ExprError::NonFinite)
        }
    }
}

/// Parse and evaluate `text` in one step.
pub fn evaluate(text: &str, env: &Environment) -> ExprResult<f64> {
    Expr::parse(text)?.eval(env)
}

/// Precedence-climbing parser over a token list.
struct ExprParser {
    tokens: Vec<SpannedToken>,
    pos: usize,
}

impl ExprParser {
    fn new(text: &str) -> ExprResult<Self> {
        let mut tokens = Vec::new();
        for result in tokenize(text) {
            match result {
                Ok(t) => tokens.push(t),
                Err((span, slice)) => {
                    return Err(ExprError::InvalidToken {
                        position: span.start,
                        token: slice,
                    });
                }
            }
        }
        Ok(Self { tokens, pos: 0 })
    }

    fn parse(mut self) -> ExprResult<Expr> {
        if self.tokens.is_empty() {
            return Err(ExprError::Empty);
        }
        let expr = self.parse_binary_expr(0)?;
        if let Some(token) = self.peek() {
            return Err(ExprError::UnexpectedToken {
                expected: "end of expression".into(),
                found: token.to_string(),
            });
        }
        Ok(expr)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|t| &t.token)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos)?.token.clone();
        self.pos += 1;
        Some(token)
    }

    fn consume(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: &Token) -> ExprResult<()> {
        let found = self
            .advance()
            .ok_or_else(|| ExprError::UnexpectedEnd(format!("'{expected}'")))?;
        if &found != expected {
            return Err(ExprError::UnexpectedToken {
                expected: format!("'{expected}'"),
                found: found.to_string(),
            });
        }
        Ok(())
    }

    /// Parse binary expression with precedence climbing.
    fn parse_binary_expr(&mut self, min_prec: u8) -> ExprResult<Expr> {
        let mut left = self.parse_unary_expr()?;

        while let Some(op) = self.peek_binary_op() {
            let prec = op_precedence(op);
            if prec < min_prec {
                break;
            }
            self.advance(); // consume operator

            let right = self.parse_binary_expr(prec + 1)?;
            left = Expr::BinOp {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_unary_expr(&mut self) -> ExprResult<Expr> {
        if self.consume(&Token::Minus) {
            let expr = self.parse_unary_expr()?;
            return Ok(Expr::Neg(Box::new(expr)));
        }
        if self.consume(&Token::Plus) {
            return self.parse_unary_expr();
        }
        self.parse_primary_expr()
    }

    fn parse_primary_expr(&mut self) -> ExprResult<Expr> {
        let token = self
            .advance()
            .ok_or_else(|| ExprError::UnexpectedEnd("operand".into()))?;

        match token {
            Token::Number(v) => Ok(Expr::Number(v)),
            Token::Pi => Ok(Expr::Pi),
            Token::Variable(name) => Ok(Expr::Variable(name)),
            Token::LParen => {
                let expr = self.parse_binary_expr(0)?;
                self.expect(&Token::RParen)?;
                Ok(expr)
            }
            other => Err(ExprError::UnexpectedToken {
                expected: "operand".into(),
                found: other.to_string(),
            }),
        }
    }

    fn peek_binary_op(&self) -> Option<BinOp> {
        match self.peek()? {
            Token::Plus => Some(BinOp::Add),
            Token::Minus => Some(BinOp::Sub),
            Token::Star => Some(BinOp::Mul),
            Token::Slash => Some(BinOp::Div),
            _ => None,
        }
    }
}

/// Get operator precedence.
fn op_precedence(op: BinOp) -> u8 {
    match op {
        BinOp::Add | BinOp::Sub => 1,
        BinOp::Mul | BinOp::Div => 2,
    }
}
