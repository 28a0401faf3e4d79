//! # Introduction
//!
//! `minic` is the front end for a small C-like language: a scanner that turns
//! raw source text into typed tokens, and a recursive-descent parser that
//! turns those tokens into an abstract syntax tree.
//!
//! ## Pipeline
//!
//! ```text
//! Source bytes → SourceReader → Scanner → Tokens → Parser → AST
//! ```
//!
//! 1. [`lexer::reader`] — adapts a forward-only byte stream into characters.
//! 2. [`lexer`] — a table-driven finite automaton producing one token per
//!    pull, with greedy look-ahead for multi-character operators, comments,
//!    and string literals.
//! 3. [`parser`] — one-token-look-ahead recursive descent over the token
//!    sequence, building a [`parser::ast::Program`].
//!
//! Scanning and parsing share a single failure mode, [`SyntaxError`], which
//! renders as `Syntax error on row <R>, column <C>: <message>`. The first
//! malformed character or grammar violation aborts the whole run; there is
//! no recovery and no partial result.
//!
//! ## Example
//!
//! ```
//! use minic::parser::ast::DeclKind;
//!
//! let program = minic::parse_str("int main(void) { return 0; }")?;
//! assert_eq!(program.declarations.len(), 1);
//! assert!(matches!(program.declarations[0].kind, DeclKind::Function { .. }));
//! # Ok::<(), minic::SyntaxError>(())
//! ```

pub mod error;
pub mod lexer;
pub mod parser;

pub use error::SyntaxError;
pub use lexer::Scanner;
pub use parser::Parser;

use parser::ast::Program;

/// Lex and parse an in-memory source string in one step.
pub fn parse_str(source: &str) -> Result<Program, SyntaxError> {
    let tokens = Scanner::from_str(source).lex_all()?;
    Parser::new(tokens).parse()
}
