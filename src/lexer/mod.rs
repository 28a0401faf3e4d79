//! Scanner (tokenizer) for the language's source text.
//!
//! Converts a raw character stream into [`Token`]s on demand:
//! - [`token`]: token kinds and payloads
//! - `dfa`: the automaton driving recognition
//! - [`reader`]: byte-stream adapter
//!
//! # Operation
//!
//! The scanner is a table-driven finite automaton. Each character is
//! classified into a small symbol alphabet and the automaton steps through
//! the transition table; a token is finalized when the automaton leaves the
//! token's last state for a non-greedy one. Greedy states (the second half of
//! `==`, `!=`, `<=`, `>=`, `++`, `--`, and the comment delimiters) extend the
//! token speculatively, which resolves the maximal-munch ambiguity: `!=` is
//! one token, never `!` followed by `=`.
//!
//! Whitespace loops in the start state without emitting anything. Comment and
//! string bodies accept every symbol until their closing delimiter. An
//! unrecognized character anywhere raises [`SyntaxError`] immediately with
//! its exact row and column.

pub mod reader;
pub mod token;

mod dfa;

use std::io::Read;
use std::sync::LazyLock;

use rustc_hash::FxHashMap;

use crate::error::SyntaxError;
use dfa::State;
pub use reader::SourceReader;
pub use token::{Token, TokenKind};

/// Reserved words of the language.
static KEYWORDS: LazyLock<FxHashMap<&'static str, TokenKind>> = LazyLock::new(|| {
    FxHashMap::from_iter([
        ("int", TokenKind::Int),
        ("void", TokenKind::Void),
        ("if", TokenKind::If),
        ("else", TokenKind::Else),
        ("for", TokenKind::For),
        ("while", TokenKind::While),
        ("return", TokenKind::Return),
    ])
});

/// Token kind emitted when a token ends in the given operator or punctuation
/// state.
static STATE_TOKENS: LazyLock<FxHashMap<State, TokenKind>> = LazyLock::new(|| {
    FxHashMap::from_iter([
        (State::Gt, TokenKind::Gt),
        (State::Gte, TokenKind::Gte),
        (State::Lt, TokenKind::Lt),
        (State::Lte, TokenKind::Lte),
        (State::Assign, TokenKind::Assign),
        (State::Eq, TokenKind::Eq),
        (State::Plus, TokenKind::Plus),
        (State::Increment, TokenKind::Increment),
        (State::Minus, TokenKind::Minus),
        (State::Decrement, TokenKind::Decrement),
        (State::Times, TokenKind::Times),
        (State::Divide, TokenKind::Divide),
        (State::Not, TokenKind::Not),
        (State::Neq, TokenKind::Neq),
        (State::Semi, TokenKind::Semi),
        (State::Comma, TokenKind::Comma),
        (State::LParen, TokenKind::LParen),
        (State::RParen, TokenKind::RParen),
        (State::LBrack, TokenKind::LBrack),
        (State::RBrack, TokenKind::RBrack),
        (State::LBrace, TokenKind::LBrace),
        (State::RBrace, TokenKind::RBrace),
    ])
});

/// Pull-based tokenizer over a character stream.
///
/// One scanner per source stream; construct a fresh one per file. The
/// automaton state, look-ahead character, and position are private: they
/// change only as tokens are pulled.
pub struct Scanner<R: Read> {
    source: SourceReader<R>,
    /// Current unconsumed character; `None` before the first read and after
    /// end of stream.
    look: Option<char>,
    /// Automaton state after transitioning on `look`.
    state: State,
    end_of_stream: bool,
    /// 1-based position of `look`.
    row: usize,
    column: usize,
}

impl<R: Read> Scanner<R> {
    pub fn new(source: SourceReader<R>) -> Self {
        Self {
            source,
            look: None,
            state: State::Start,
            end_of_stream: false,
            row: 1,
            column: 1,
        }
    }

    pub fn from_reader(reader: R) -> Self {
        Self::new(SourceReader::new(reader))
    }

    /// Scan the next token.
    ///
    /// Returns `Ok(None)` once the stream is exhausted. Fails with
    /// [`SyntaxError`] on an unrecognized character, a malformed integer
    /// literal, or an unterminated comment or string.
    pub fn next_token(&mut self) -> Result<Option<Token>, SyntaxError> {
        // Whitespace keeps the automaton in the start state; it also absorbs
        // the already-classified closing delimiter of a comment or string.
        while self.state == State::Start {
            if self.end_of_stream {
                return Ok(None);
            }
            self.advance()?;
        }

        let row = self.row;
        let column = self.column;
        let mut accepted = self.state;
        let mut lexeme = String::new();

        // Keep consuming until the automaton moves to a non-greedy state, so
        // a multi-character operator or delimiter is taken whole.
        loop {
            if self.state != accepted {
                if !dfa::is_greedy(self.state) {
                    break;
                }
                accepted = self.state;
            }
            match self.look {
                Some(ch) => {
                    lexeme.push(ch);
                    self.advance()?;
                }
                None => break,
            }
        }

        let kind = match accepted {
            State::IdOrKeyword => KEYWORDS
                .get(lexeme.as_str())
                .cloned()
                .unwrap_or_else(|| TokenKind::Id(lexeme)),
            State::Number => {
                let value = lexeme.parse::<i32>().map_err(|_| {
                    SyntaxError::new(row, column, format!("Invalid integer literal: {}", lexeme))
                })?;
                TokenKind::Integer(value)
            }
            State::Comment => {
                return Err(SyntaxError::new(row, column, "Unterminated comment"));
            }
            State::EndComment => {
                if self.end_of_stream {
                    return Err(SyntaxError::new(row, column, "Unterminated comment"));
                }
                // The lexeme holds `/*` + body + `*`; the closing `/` was the
                // transition out and is absorbed before the next token.
                TokenKind::Comment(lexeme[2..lexeme.len() - 1].to_string())
            }
            State::StringBody => {
                if self.end_of_stream {
                    return Err(SyntaxError::new(row, column, "Unterminated string"));
                }
                // The lexeme holds `"` + body; the closing quote was the
                // transition out.
                TokenKind::Str(lexeme[1..].to_string())
            }
            other => STATE_TOKENS.get(&other).cloned().ok_or_else(|| {
                SyntaxError::new(row, column, format!("Unexpected token {}", lexeme))
            })?,
        };

        Ok(Some(Token::new(kind, row, column)))
    }

    /// Scan the whole stream, materializing the ordered token sequence.
    ///
    /// Propagates the first [`SyntaxError`] encountered; no partial sequence
    /// is returned.
    pub fn lex_all(&mut self) -> Result<Vec<Token>, SyntaxError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Consume `look` and load the next character, stepping the automaton.
    ///
    /// Raises [`SyntaxError`] as soon as the new character has no valid
    /// transition from the current state.
    fn advance(&mut self) -> Result<(), SyntaxError> {
        if let Some(prev) = self.look.take() {
            if prev == '\n' {
                self.row += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }

        let next = self.source.next_char().map_err(|err| {
            SyntaxError::new(self.row, self.column, format!("Failed to read source: {}", err))
        })?;

        match next {
            Some(ch) => {
                let target = dfa::next_state(self.state, dfa::classify(ch));
                if target == State::Error {
                    return Err(SyntaxError::new(
                        self.row,
                        self.column,
                        format!("Unexpected token {}", ch),
                    ));
                }
                self.look = Some(ch);
                self.state = target;
            }
            None => {
                self.end_of_stream = true;
                self.state = State::Start;
            }
        }

        Ok(())
    }
}

impl<'a> Scanner<&'a [u8]> {
    /// Scan directly from an in-memory string.
    pub fn from_str(source: &'a str) -> Self {
        Self::from_reader(source.as_bytes())
    }
}
