//! Error types for the quill language front end.

use thiserror::Error;

/// Errors raised while parsing or evaluating an arithmetic expression.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ExprError {
    /// The expression text is empty.
    #[error("Empty expression")]
    Empty,

    /// Lexer error (invalid token).
    #[error("Invalid token '{token}' at position {position}")]
    InvalidToken { position: usize, token: String },

    /// Unexpected token.
    #[error("Expected {expected}, found '{found}'")]
    UnexpectedToken { expected: String, found: String },

    /// Unexpected end of input.
    #[error("Unexpected end of expression: expected {0}")]
    UnexpectedEnd(String),

    /// A `$name` with no binding in the current environment.
    #[error("Undefined variable '{0}'")]
    UndefinedVariable(String),

    /// Division by zero or overflow.
    #[error("Expression does not evaluate to a finite number")]
    NonFinite,
}

/// Result type for expression operations.
pub type ExprResult<T> = Result<T, ExprError>;

/// Broad category of a [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Directive used in a disallowed nesting context.
    Scope,
    /// Bad or colliding definition name.
    Name,
    /// Wrong operand count, non-integer or out-of-range qubit, bad delimiter.
    Argument,
    /// Malformed arithmetic expression.
    Evaluation,
    /// Unrecognized directive or gate.
    Lookup,
}

/// Errors that can occur while interpreting a program.
///
/// Every variant carries the 1-based source line it was raised on.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// Directive used where the current scope forbids it.
    #[error("{message} (line {line})")]
    Scope { line: usize, message: String },

    /// Invalid definition name.
    #[error("{message} (line {line})")]
    Name { line: usize, message: String },

    /// Invalid operands.
    #[error("{message} (line {line})")]
    Argument { line: usize, message: String },

    /// Expression evaluation failed.
    #[error("Invalid expression: {source} (line {line})")]
    Evaluation {
        line: usize,
        #[source]
        source: ExprError,
    },

    /// First word of a line is neither a directive, a gate nor a definition.
    #[error("Symbol not found - '{symbol}' (line {line})")]
    UnknownSymbol { line: usize, symbol: String },
}

impl ParseError {
    pub(crate) fn scope(line: usize, message: impl Into<String>) -> Self {
        Self::Scope {
            line,
            message: message.into(),
        }
    }

    pub(crate) fn name(line: usize, message: impl Into<String>) -> Self {
        Self::Name {
            line,
            message: message.into(),
        }
    }

    pub(crate) fn argument(line: usize, message: impl Into<String>) -> Self {
        Self::Argument {
            line,
            message: message.into(),
        }
    }

    /// The 1-based source line the error was raised on.
    pub fn line(&self) -> usize {
        match self {
            Self::Scope { line, .. }
            | Self::Name { line, .. }
            | Self::Argument { line, .. }
            | Self::Evaluation { line, .. }
            | Self::UnknownSymbol { line, .. } => *line,
        }
    }

    /// The category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Scope { .. } => ErrorKind::Scope,
            Self::Name { .. } => ErrorKind::Name,
            Self::Argument { .. } => ErrorKind::Argument,
            Self::Evaluation { .. } => ErrorKind::Evaluation,
            Self::UnknownSymbol { .. } => ErrorKind::Lookup,
        }
    }
}

/// Result type for interpretation.
pub type ParseResult<T> = Result<T, ParseError>;
