use thiserror::Error;

use crate::parser::{LexicalError, SyntaxError};

/// Either stage of the front end failing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An input character could not start or continue a token.
    #[error("lexical error: {0}")]
    Lexical(#[from] LexicalError),
    /// A token appeared where the grammar does not allow it.
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
}

impl Error {
    /// Returns `true` if the input failed while being split into tokens.
    #[must_use]
    pub fn is_lexical(&self) -> bool {
        matches!(self, Self::Lexical(_))
    }

    /// Returns `true` if the tokens did not form a valid list.
    #[must_use]
    pub fn is_syntax(&self) -> bool {
        matches!(self, Self::Syntax(_))
    }
}
