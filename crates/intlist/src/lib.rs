//! A scanner and parser for nested lists of non-negative integers, such as
//! `[1, [2, 3], [4, [5]]]`.
//!
//! Text is fed to a [`Scanner`] line by line (or in arbitrary chunks), which
//! produces a flat sequence of [`Token`]s. A [`Parser`] then walks that
//! sequence with a four-state machine and an explicit stack of open lists,
//! so nesting depth is bounded by heap memory rather than by the call stack.
//!
//! ```rust
//! use intlist::Value;
//!
//! let tree = intlist::from_str("[1, [2, 3], 4]").unwrap();
//! assert_eq!(
//!     tree,
//!     Value::List(vec![
//!         Value::Integer(1),
//!         Value::List(vec![Value::Integer(2), Value::Integer(3)]),
//!         Value::Integer(4),
//!     ])
//! );
//! assert_eq!(tree.to_string(), "[1, [2, 3], 4]");
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod error;
mod options;
mod parser;
mod value;

#[cfg(test)]
mod tests;

use alloc::vec::Vec;

pub use error::Error;
pub use options::{ParserOptions, ScannerOptions};
pub use parser::{
    LexicalError, ParseState, Parser, SyntaxError,
    scanner::{Scanner, SourceMap, Token},
};
pub use value::Value;

/// Scans a complete text into tokens using the default (line) contract.
///
/// # Errors
///
/// Returns a [`LexicalError`] naming the first character that is not a digit,
/// bracket, comma or whitespace, or the first number that does not fit in a
/// `u64`.
pub fn scan(text: &str) -> Result<Vec<Token>, LexicalError> {
    let mut scanner = Scanner::new(ScannerOptions::default());
    scanner.consume(text)?;
    scanner.finish()
}

/// Parses an already scanned token sequence into its root list.
///
/// # Errors
///
/// Returns a [`SyntaxError`] for the first token the grammar does not accept
/// at its position, or for an end of tokens with unclosed brackets.
pub fn parse<I>(tokens: I) -> Result<Value, SyntaxError>
where
    I: IntoIterator<Item = Token>,
{
    Parser::new().parse(tokens)
}

/// Scans and parses `text` in one step.
///
/// Syntax errors are [located](SyntaxError::locate) in `text`.
///
/// # Errors
///
/// Returns [`Error::Lexical`] or [`Error::Syntax`] for the first problem found.
pub fn from_str(text: &str) -> Result<Value, Error> {
    let mut scanner = Scanner::new(ScannerOptions::default());
    scanner.consume(text)?;
    let (tokens, map) = scanner.finish_with_map()?;
    Ok(parse(tokens).map_err(|err| err.locate(&map))?)
}
