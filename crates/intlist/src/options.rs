/// Configuration options for the [`Scanner`](crate::Scanner).
///
/// # Examples
///
/// ```rust
/// use intlist::{Scanner, ScannerOptions, Token};
///
/// let mut scanner = Scanner::new(ScannerOptions {
///     numbers_span_feeds: true,
///     ..Default::default()
/// });
/// scanner.consume("[12").unwrap();
/// scanner.consume("34]").unwrap();
/// assert_eq!(
///     scanner.finish().unwrap(),
///     vec![Token::Open, Token::Number(1234), Token::Close]
/// );
/// ```
///
/// # Default
///
/// All options default to `false`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScannerOptions {
    /// Whether a number may continue from one `consume` call into the next.
    ///
    /// By default every call to [`Scanner::consume`](crate::Scanner::consume)
    /// is treated as one complete line: a number still being read when the
    /// call returns is emitted right away, so `"12"` followed by `"34"` yields
    /// two numbers.
    ///
    /// When `true`, the input is treated as one continuous stream cut into
    /// arbitrary chunks. The digit buffer survives between calls and the last
    /// number is only emitted by [`Scanner::finish`](crate::Scanner::finish)
    /// or by the next non-digit character.
    ///
    /// # Default
    ///
    /// `false`
    pub numbers_span_feeds: bool,

    #[cfg(any(test, feature = "fuzzing"))]
    /// Panic on errors instead of returning them.
    ///
    /// Enabled only in test builds to produce backtraces on failures.
    pub panic_on_error: bool,
}

/// Configuration options for the [`Parser`](crate::Parser).
///
/// Normal builds have nothing to configure; test and fuzzing builds add the
/// same debugging switch as [`ScannerOptions`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ParserOptions {
    #[cfg(any(test, feature = "fuzzing"))]
    /// Panic on errors instead of returning them.
    ///
    /// Enabled only in test builds to produce backtraces on failures.
    pub panic_on_error: bool,
}
