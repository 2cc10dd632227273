//! Error types for the query lexer and parser.

use thiserror::Error;

/// A specialized Result type for query parsing operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors that reject a query before it is evaluated.
///
/// Every variant carries the byte offset in the source text. Parse errors
/// also carry the text of the token actually found (`EOF` at end of input).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    /// A character that cannot start any token.
    #[error("unexpected character '{character}' at position {position}")]
    Lex {
        /// The offending character.
        character: char,
        /// Byte offset of the character.
        position: usize,
    },

    /// A quoted word without its closing quote.
    #[error("unterminated quote at position {position}")]
    UnterminatedQuote {
        /// Byte offset of the opening quote.
        position: usize,
    },

    /// A field name was expected.
    #[error("expected field name at position {position}, got {found}")]
    ExpectedField {
        /// Byte offset of the token found instead.
        position: usize,
        /// The token found instead.
        found: String,
    },

    /// A comparison operator was expected after a field name.
    #[error("expected operator (:, >, <, =, !=) at position {position}, got {found}")]
    ExpectedOperator {
        /// Byte offset of the token found instead.
        position: usize,
        /// The token found instead.
        found: String,
    },

    /// A value was expected after an operator.
    #[error("expected value at position {position}, got {found}")]
    ExpectedValue {
        /// Byte offset of the token found instead.
        position: usize,
        /// The token found instead.
        found: String,
    },

    /// A closing parenthesis was expected.
    #[error("expected ) at position {position}, got {found}")]
    ExpectedCloseParen {
        /// Byte offset of the token found instead.
        position: usize,
        /// The token found instead.
        found: String,
    },

    /// Tokens remain after a complete expression.
    #[error("unexpected token at position {position}: {found}")]
    TrailingInput {
        /// Byte offset of the first leftover token.
        position: usize,
        /// The first leftover token.
        found: String,
    },

    /// The query nests deeper than [`MAX_DEPTH`](super::parser::MAX_DEPTH).
    #[error("query nested too deeply at position {position}")]
    TooDeep {
        /// Byte offset of the token that crossed the limit.
        position: usize,
    },
}

impl QueryError {
    /// Returns the byte offset the error points at.
    pub fn position(&self) -> usize {
        match self {
            QueryError::Lex { position, .. }
            | QueryError::UnterminatedQuote { position }
            | QueryError::ExpectedField { position, .. }
            | QueryError::ExpectedOperator { position, .. }
            | QueryError::ExpectedValue { position, .. }
            | QueryError::ExpectedCloseParen { position, .. }
            | QueryError::TrailingInput { position, .. }
            | QueryError::TooDeep { position } => *position,
        }
    }
}
