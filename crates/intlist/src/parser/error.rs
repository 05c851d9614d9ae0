use alloc::string::String;
use core::fmt::{self, Write};

use thiserror::Error;

use super::{
    ParseState,
    scanner::{SourceMap, Token},
};

/// The scanner met input it cannot turn into a token.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexicalError {
    /// A character outside the grammar's alphabet.
    #[error("unexpected symbol '{}' at {line}:{column}", printable(.ch))]
    UnexpectedCharacter {
        ch: char,
        line: usize,
        column: usize,
    },
    /// A digit run larger than `u64::MAX`.
    #[error("number {digits} at {line}:{column} does not fit in 64 bits")]
    NumberOverflow {
        digits: String,
        line: usize,
        column: usize,
    },
}

impl LexicalError {
    /// Line and column (both 1-based) where the offending input starts.
    #[must_use]
    pub fn position(&self) -> (usize, usize) {
        match self {
            Self::UnexpectedCharacter { line, column, .. }
            | Self::NumberOverflow { line, column, .. } => (*line, *column),
        }
    }
}

/// The parser met a token, or an end of tokens, its current state rejects.
///
/// The parser only sees tokens, so its errors carry a token index and no
/// input position until [`locate`](SyntaxError::locate) fills one in.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// A token the current state does not accept.
    #[error("unexpected token '{found}' at {}; expected {expected}", token_at(.index, .at))]
    UnexpectedToken {
        found: Token,
        /// Zero-based offset of `found` in the token sequence.
        index: usize,
        expected: ParseState,
        /// Line and column where `found` starts, once located.
        at: Option<(usize, usize)>,
    },
    /// The tokens ran out with brackets open or after a top-level `,`.
    #[error("unexpected end of tokens{}; expected {expected}", end_at(.at))]
    UnexpectedEnd {
        expected: ParseState,
        /// Brackets still open when the tokens ran out.
        depth: usize,
        /// End of the input, once located.
        at: Option<(usize, usize)>,
    },
}

impl SyntaxError {
    /// The parser state whose accepted token kinds were violated.
    #[must_use]
    pub fn expected(&self) -> ParseState {
        match self {
            Self::UnexpectedToken { expected, .. } | Self::UnexpectedEnd { expected, .. } => {
                *expected
            }
        }
    }

    /// Line and column of the error, if it has been located.
    #[must_use]
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            Self::UnexpectedToken { at, .. } | Self::UnexpectedEnd { at, .. } => *at,
        }
    }

    /// Attaches the input position from the scanner's [`SourceMap`]: the
    /// start of the offending token, or the end of input.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use intlist::{Parser, Scanner};
    ///
    /// let mut scanner = Scanner::default();
    /// scanner.consume("[1,\n").unwrap();
    /// scanner.consume(" ]\n").unwrap();
    /// let (tokens, map) = scanner.finish_with_map().unwrap();
    /// let err = Parser::new().parse(tokens).unwrap_err().locate(&map);
    /// assert_eq!(err.position(), Some((2, 2)));
    /// assert_eq!(
    ///     err.to_string(),
    ///     "unexpected token ']' at 2:2; expected number or '['"
    /// );
    /// ```
    #[must_use]
    pub fn locate(mut self, map: &SourceMap) -> Self {
        match &mut self {
            Self::UnexpectedToken { index, at, .. } => *at = map.token(*index),
            Self::UnexpectedEnd { at, .. } => *at = Some(map.end()),
        }
        self
    }
}

fn token_at(index: &usize, at: &Option<(usize, usize)>) -> TokenAt {
    TokenAt(*index, *at)
}

fn end_at(at: &Option<(usize, usize)>) -> EndAt {
    EndAt(*at)
}

/// `<line>:<column>` once located, `token <index>` before.
struct TokenAt(usize, Option<(usize, usize)>);

impl fmt::Display for TokenAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.1 {
            Some((line, column)) => write!(f, "{line}:{column}"),
            None => write!(f, "token {}", self.0),
        }
    }
}

/// ` at <line>:<column>` once located, nothing before.
struct EndAt(Option<(usize, usize)>);

impl fmt::Display for EndAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some((line, column)) => write!(f, " at {line}:{column}"),
            None => Ok(()),
        }
    }
}

fn printable(ch: &char) -> Printable {
    Printable(*ch)
}

/// Renders a character so that whitespace and control codes stay visible in a
/// one-line diagnostic.
struct Printable(char);

impl fmt::Display for Printable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            '\'' => f.write_str("\\'"),
            '\\' => f.write_str("\\\\"),
            '\n' => f.write_str("\\n"),
            '\r' => f.write_str("\\r"),
            '\t' => f.write_str("\\t"),
            '\0' => f.write_str("\\0"),
            c if c.is_control() || (c.is_whitespace() && !c.is_ascii_whitespace()) => {
                write!(f, "\\u{{{:04X}}}", c as u32)
            }
            c => f.write_char(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::{format, string::ToString};

    use super::*;

    #[test]
    fn printable_escapes_invisible_characters() {
        assert_eq!(format!("{}", Printable('a')), "a");
        assert_eq!(format!("{}", Printable('\'')), "\\'");
        assert_eq!(format!("{}", Printable('\u{7}')), "\\u{0007}");
        assert_eq!(format!("{}", Printable('\u{00A0}')), "\\u{00A0}");
        assert_eq!(format!("{}", Printable('é')), "é");
    }

    #[test]
    fn unlocated_errors_fall_back_to_token_index() {
        let err = SyntaxError::UnexpectedToken {
            found: Token::Comma,
            index: 3,
            expected: ParseState::ExpectNumberOrList,
            at: None,
        };
        assert_eq!(
            err.to_string(),
            "unexpected token ',' at token 3; expected number or '['"
        );
        let end = SyntaxError::UnexpectedEnd {
            expected: ParseState::ExpectDividerOrClose,
            depth: 1,
            at: None,
        };
        assert_eq!(end.to_string(), "unexpected end of tokens; expected ',' or ']'");
        assert_eq!(end.position(), None);
    }
}
