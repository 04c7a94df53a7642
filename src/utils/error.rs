//! Error handling for the Sigil front-end

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Front-end error
///
/// Lexical faults never appear here: the lexer recovers inline and embeds
/// them in the token stream as `ERROR` tokens. Everything below aborts its
/// stage at the first occurrence.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // ==================== Grammar Errors ====================

    #[error("Expected {expected}, got {got}")]
    SyntaxMismatch { expected: String, got: String },

    // ==================== Semantic Errors ====================

    #[error("Undeclared identifier: {name}")]
    UndeclaredIdentifier { name: String },

    #[error("Redeclared identifier: {name}")]
    RedeclaredIdentifier { name: String },

    #[error("Type mismatch: expected {expected}, got {got} in {context}")]
    TypeMismatch {
        expected: String,
        got: String,
        context: String,
    },

    #[error("Operator '{op}' requires integer operands, got {left} and {right}")]
    OperandTypeMismatch {
        op: String,
        left: String,
        right: String,
    },

    #[error("Malformed number literal: {lexeme}")]
    MalformedNumberLiteral { lexeme: String },

    // ==================== Postfix Conversion Errors ====================

    #[error("Unbalanced parentheses in expression")]
    UnbalancedParentheses,

    #[error("Unsupported token: {got}")]
    UnsupportedToken { got: String },
}
