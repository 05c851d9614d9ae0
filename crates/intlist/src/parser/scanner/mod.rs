//! Scanner: turns raw characters into a flat sequence of [`Token`]s.
//!
//! What it does
//! - Makes a single left-to-right pass over each fed chunk, one character at
//!   a time, with one bit of state: whether a number is being accumulated.
//! - A character that ends a number is classified itself in the same step, so
//!   `12]` yields `Number(12)` then `Close`.
//! - Tracks 1-based `line/column` so lexical errors can point at the input,
//!   and records where every token starts so syntax errors can too.
//!
//! Feeding contract
//! - By default each `consume` call is one complete line and a trailing
//!   number is flushed when the call returns.
//! - With [`ScannerOptions::numbers_span_feeds`] the digit buffer is carried
//!   into the next call and only [`Scanner::finish`] flushes it.
//!
//! Invariants
//! - Tokens are appended in input order and never revisited.
//! - After the first error the scanner is poisoned: every later call returns
//!   that same error and `finish` never hands out the partial sequence.

use alloc::{string::String, vec::Vec};
use core::{fmt, mem};

use super::LexicalError;
use crate::ScannerOptions;

/// One lexical unit of the list grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    /// A run of decimal digits.
    Number(u64),
    /// `[`
    Open,
    /// `]`
    Close,
    /// `,`
    Comma,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{n}"),
            Token::Open => f.write_str("["),
            Token::Close => f.write_str("]"),
            Token::Comma => f.write_str(","),
        }
    }
}

/// Where each token of a scanned sequence starts, and where the input ends.
///
/// Positions are 1-based `(line, column)` pairs. Index `i` belongs to the
/// `i`-th token, matching [`SyntaxError`](crate::SyntaxError) token indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceMap {
    starts: Vec<(usize, usize)>,
    end: (usize, usize),
}

impl SourceMap {
    /// Start of the token at `index`, if there is one.
    #[must_use]
    pub fn token(&self, index: usize) -> Option<(usize, usize)> {
        self.starts.get(index).copied()
    }

    /// Position just past the last character scanned.
    #[must_use]
    pub fn end(&self) -> (usize, usize) {
        self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexState {
    Default,
    Number,
}

/// Converts text into [`Token`]s across one or more `consume` calls.
///
/// # Examples
///
/// ```rust
/// use intlist::{Scanner, ScannerOptions, Token};
///
/// let mut scanner = Scanner::new(ScannerOptions::default());
/// scanner.consume("[1,\n").unwrap();
/// scanner.consume(" 23]\n").unwrap();
/// assert_eq!(
///     scanner.tokens(),
///     &[
///         Token::Open,
///         Token::Number(1),
///         Token::Comma,
///         Token::Number(23),
///         Token::Close
///     ]
/// );
/// ```
#[derive(Debug)]
pub struct Scanner {
    options: ScannerOptions,
    tokens: Vec<Token>,
    /// Start of each entry in `tokens`.
    starts: Vec<(usize, usize)>,

    lex_state: LexState,
    /// Digits of the number being read.
    digits: String,
    number_start: (usize, usize),

    line: usize,
    column: usize,

    error: Option<LexicalError>,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new(ScannerOptions::default())
    }
}

impl Scanner {
    /// Creates an empty scanner positioned at line 1, column 1.
    #[must_use]
    pub fn new(options: ScannerOptions) -> Self {
        Self {
            options,
            tokens: Vec::new(),
            starts: Vec::new(),
            lex_state: LexState::Default,
            digits: String::new(),
            number_start: (1, 1),
            line: 1,
            column: 1,
            error: None,
        }
    }

    /// Scans `text`, appending its tokens to the accumulated sequence.
    ///
    /// # Errors
    ///
    /// Returns [`LexicalError::UnexpectedCharacter`] for any character other
    /// than an ASCII digit, `[`, `]`, `,`, space, tab, carriage return or line
    /// feed, and [`LexicalError::NumberOverflow`] for a number above
    /// `u64::MAX`. Once an error is returned the scanner keeps returning it.
    pub fn consume(&mut self, text: &str) -> Result<(), LexicalError> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }

        for ch in text.chars() {
            if let Err(err) = self.step(ch) {
                return Err(self.fail(err));
            }
        }

        if !self.options.numbers_span_feeds {
            if let Err(err) = self.flush_number() {
                return Err(self.fail(err));
            }
        }

        Ok(())
    }

    /// The tokens produced so far.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Start position of each token produced so far, parallel to
    /// [`tokens`](Scanner::tokens).
    #[must_use]
    pub fn token_starts(&self) -> &[(usize, usize)] {
        &self.starts
    }

    /// Line and column (both 1-based) of the next character to be read.
    #[must_use]
    pub fn position(&self) -> (usize, usize) {
        (self.line, self.column)
    }

    /// Flushes a pending number and returns the complete token sequence.
    ///
    /// # Errors
    ///
    /// Returns the error that poisoned the scanner, or a
    /// [`LexicalError::NumberOverflow`] for the pending number.
    pub fn finish(self) -> Result<Vec<Token>, LexicalError> {
        self.finish_with_map().map(|(tokens, _)| tokens)
    }

    /// Like [`finish`](Scanner::finish), also returning where each token
    /// starts so syntax errors can be located with
    /// [`SyntaxError::locate`](crate::SyntaxError::locate).
    ///
    /// # Errors
    ///
    /// Same as [`finish`](Scanner::finish).
    pub fn finish_with_map(mut self) -> Result<(Vec<Token>, SourceMap), LexicalError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        if let Err(err) = self.flush_number() {
            return Err(self.fail(err));
        }

        tracing::debug!(tokens = self.tokens.len(), "scan finished");
        let map = SourceMap {
            starts: self.starts,
            end: (self.line, self.column),
        };
        Ok((self.tokens, map))
    }

    fn step(&mut self, ch: char) -> Result<(), LexicalError> {
        if self.lex_state == LexState::Number {
            if ch.is_ascii_digit() {
                self.digits.push(ch);
                self.advance(ch);
                return Ok(());
            }
            self.flush_number()?;
        }

        match ch {
            '[' => self.emit(Token::Open, (self.line, self.column)),
            ']' => self.emit(Token::Close, (self.line, self.column)),
            ',' => self.emit(Token::Comma, (self.line, self.column)),
            ' ' | '\t' | '\r' | '\n' => {}
            c if c.is_ascii_digit() => {
                self.lex_state = LexState::Number;
                self.digits.clear();
                self.digits.push(c);
                self.number_start = (self.line, self.column);
            }
            c => {
                return Err(LexicalError::UnexpectedCharacter {
                    ch: c,
                    line: self.line,
                    column: self.column,
                });
            }
        }

        self.advance(ch);
        Ok(())
    }

    fn flush_number(&mut self) -> Result<(), LexicalError> {
        if self.lex_state != LexState::Number {
            return Ok(());
        }
        self.lex_state = LexState::Default;

        let (line, column) = self.number_start;
        // A non-empty run of ASCII digits can only fail to parse by overflowing.
        let Ok(value) = self.digits.parse::<u64>() else {
            return Err(LexicalError::NumberOverflow {
                digits: mem::take(&mut self.digits),
                line,
                column,
            });
        };
        self.digits.clear();
        self.emit(Token::Number(value), (line, column));
        Ok(())
    }

    #[inline]
    fn emit(&mut self, token: Token, (line, column): (usize, usize)) {
        tracing::trace!(?token, line, column, "token");
        self.tokens.push(token);
        self.starts.push((line, column));
    }

    #[inline]
    fn advance(&mut self, ch: char) {
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    fn fail(&mut self, err: LexicalError) -> LexicalError {
        #[cfg(any(test, feature = "fuzzing"))]
        assert!(!self.options.panic_on_error, "{err}");
        tracing::debug!(%err, "scan failed");
        self.lex_state = LexState::Default;
        self.error = Some(err.clone());
        err
    }
}

#[cfg(test)]
mod tests;
