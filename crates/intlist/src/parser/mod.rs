//! The list parser.
//!
//! [`Parser`] consumes [`Token`]s one at a time and builds the tree bottom-up.
//! Nesting is tracked with an explicit stack of open frames instead of
//! recursion, so arbitrarily deep input only costs heap memory.
//!
//! # Examples
//!
//! ```rust
//! use intlist::{Parser, Token, Value};
//!
//! let mut parser = Parser::new();
//! for token in [Token::Open, Token::Number(1), Token::Close] {
//!     parser.push(token).unwrap();
//! }
//! assert_eq!(parser.finish().unwrap(), Value::List(vec![Value::Integer(1)]));
//! ```
#![allow(clippy::enum_glob_use)]

use alloc::vec::Vec;
use core::{fmt, mem};

use crate::{ParserOptions, value::Value};

mod error;
pub(crate) mod scanner;

pub use error::{LexicalError, SyntaxError};
use scanner::Token;

/// What the parser will accept next.
///
/// Each state is named after the token kinds that are valid in it; anything
/// else is a [`SyntaxError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseState {
    /// Start of input, or after a `,`: an element must follow.
    ExpectNumberOrList,
    /// Right after `[`: an element, or `]` for an empty list.
    ExpectNumberOrListOrClose,
    /// After a top-level element: only `,` (or the end of tokens).
    ExpectDivider,
    /// After an element inside brackets: `,` or `]`.
    ExpectDividerOrClose,
}

impl ParseState {
    /// Returns `true` if `token` is valid in this state.
    #[must_use]
    pub fn accepts(self, token: Token) -> bool {
        use ParseState::*;
        match token {
            Token::Number(_) | Token::Open => {
                matches!(self, ExpectNumberOrList | ExpectNumberOrListOrClose)
            }
            Token::Close => matches!(self, ExpectNumberOrListOrClose | ExpectDividerOrClose),
            Token::Comma => matches!(self, ExpectDivider | ExpectDividerOrClose),
        }
    }
}

impl fmt::Display for ParseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ParseState::ExpectNumberOrList => "number or '['",
            ParseState::ExpectNumberOrListOrClose => "number or '[' or ']'",
            ParseState::ExpectDivider => "','",
            ParseState::ExpectDividerOrClose => "',' or ']'",
        })
    }
}

/// Explicit-stack state machine that turns tokens into a [`Value`] tree.
///
/// A parser handles exactly one token sequence: feed it with [`push`] and
/// close it with [`finish`], or do both with [`parse`].
///
/// [`push`]: Parser::push
/// [`finish`]: Parser::finish
/// [`parse`]: Parser::parse
#[derive(Debug)]
pub struct Parser {
    #[cfg_attr(not(any(test, feature = "fuzzing")), allow(dead_code))]
    options: ParserOptions,
    state: ParseState,
    /// Elements of the innermost open list. With an empty stack this is the
    /// implicit root frame.
    current: Vec<Value>,
    /// Enclosing frames, outermost first. Its length is the nesting level.
    stack: Vec<Vec<Value>>,
    consumed: usize,
    error: Option<SyntaxError>,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    /// Creates a parser in [`ParseState::ExpectNumberOrList`] at level 0.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(ParserOptions::default())
    }

    /// Creates a parser with explicit options.
    #[must_use]
    pub fn with_options(options: ParserOptions) -> Self {
        Self {
            options,
            state: ParseState::ExpectNumberOrList,
            current: Vec::new(),
            stack: Vec::with_capacity(16),
            consumed: 0,
            error: None,
        }
    }

    /// Current expectation.
    #[must_use]
    pub fn state(&self) -> ParseState {
        self.state
    }

    /// Number of `[` not yet closed.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Consumes one token.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::UnexpectedToken`] if the current state does not
    /// accept `token`. The parser is then poisoned and returns the same error
    /// from every later call.
    pub fn push(&mut self, token: Token) -> Result<(), SyntaxError> {
        use ParseState::*;

        if let Some(err) = &self.error {
            return Err(err.clone());
        }

        let index = self.consumed;
        self.consumed += 1;
        tracing::trace!(state = ?self.state, ?token, depth = self.stack.len(), "step");

        match (self.state, token) {
            (ExpectNumberOrList | ExpectNumberOrListOrClose, Token::Number(n)) => {
                self.current.push(Value::Integer(n));
                self.state = self.after_value();
            }
            (ExpectNumberOrList | ExpectNumberOrListOrClose, Token::Open) => {
                self.stack.push(mem::take(&mut self.current));
                self.state = ExpectNumberOrListOrClose;
            }
            (ExpectNumberOrListOrClose | ExpectDividerOrClose, Token::Close)
                if !self.stack.is_empty() =>
            {
                self.close();
            }
            (ExpectDivider | ExpectDividerOrClose, Token::Comma) => {
                self.state = ExpectNumberOrList;
            }
            (expected, found) => {
                return Err(self.fail(SyntaxError::UnexpectedToken {
                    found,
                    index,
                    expected,
                    at: None,
                }));
            }
        }

        Ok(())
    }

    /// Ends the token sequence and returns the root list.
    ///
    /// If the top level holds a single list, that list is the root:
    /// `[1, 2]` gives `List[1, 2]`. Otherwise the top-level elements are
    /// wrapped in a list, so empty input gives `List[]` and `1, 2` gives
    /// `List[1, 2]`.
    ///
    /// # Errors
    ///
    /// Returns the error that poisoned the parser, or
    /// [`SyntaxError::UnexpectedEnd`] if a bracket is still open or the
    /// input ended right after a top-level `,`.
    pub fn finish(self) -> Result<Value, SyntaxError> {
        let mut elements = self.finish_elements()?;
        if elements.len() == 1 && elements[0].is_list() {
            Ok(elements.swap_remove(0))
        } else {
            Ok(Value::List(elements))
        }
    }

    /// Ends the token sequence and returns the top-level elements as they
    /// appeared, without choosing a root.
    ///
    /// # Errors
    ///
    /// Same as [`finish`](Parser::finish).
    pub fn finish_elements(mut self) -> Result<Vec<Value>, SyntaxError> {
        if let Some(err) = self.error {
            return Err(err);
        }

        let depth = self.stack.len();
        let dangling_divider =
            self.state == ParseState::ExpectNumberOrList && !self.current.is_empty();
        if depth > 0 || dangling_divider {
            return Err(self.fail(SyntaxError::UnexpectedEnd {
                expected: self.state,
                depth,
                at: None,
            }));
        }

        tracing::debug!(
            tokens = self.consumed,
            elements = self.current.len(),
            "parse finished"
        );
        Ok(self.current)
    }

    /// Pushes every token and finishes.
    ///
    /// # Errors
    ///
    /// The first error from [`push`](Parser::push) or
    /// [`finish`](Parser::finish).
    pub fn parse<I>(mut self, tokens: I) -> Result<Value, SyntaxError>
    where
        I: IntoIterator<Item = Token>,
    {
        for token in tokens {
            self.push(token)?;
        }
        self.finish()
    }

    fn close(&mut self) {
        if let Some(parent) = self.stack.pop() {
            let finished = mem::replace(&mut self.current, parent);
            self.current.push(Value::List(finished));
        }
        self.state = self.after_value();
    }

    fn after_value(&self) -> ParseState {
        if self.stack.is_empty() {
            ParseState::ExpectDivider
        } else {
            ParseState::ExpectDividerOrClose
        }
    }

    fn fail(&mut self, err: SyntaxError) -> SyntaxError {
        #[cfg(any(test, feature = "fuzzing"))]
        assert!(!self.options.panic_on_error, "{err}");
        tracing::debug!(%err, "parse failed");
        self.stack.clear();
        self.current.clear();
        self.error = Some(err.clone());
        err
    }
}
