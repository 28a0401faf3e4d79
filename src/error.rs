//! The single failure type of the front end.
//!
//! Both the scanner and the parser fail the same way: a [`SyntaxError`]
//! carrying the row and column of the offending input and a human-readable
//! message. There is no recovery mode and no warning class; the first
//! malformed character or grammar violation aborts the whole operation.

use thiserror::Error;

/// A fatal lexical or grammatical error.
///
/// The `Display` rendering is a compatibility contract: tooling built on top
/// of the front end matches on the literal
/// `Syntax error on row <R>, column <C>: <message>` shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Syntax error on row {row}, column {column}: {message}")]
pub struct SyntaxError {
    /// 1-based source row.
    pub row: usize,
    /// 1-based source column, counted in characters since the last newline.
    pub column: usize,
    pub message: String,
}

impl SyntaxError {
    pub fn new(row: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            row,
            column,
            message: message.into(),
        }
    }
}
