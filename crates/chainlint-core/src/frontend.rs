//! Language frontend trait.
//!
//! `Frontend` is the extension point for adding new languages. Implement it
//! to teach chainlint how to turn source text into a [`SourceFile`].

use crate::syntax::SourceFile;
use std::path::Path;

/// Error produced when source text cannot be lowered into a [`SourceFile`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at {line}:{column}")]
pub struct ParseError {
    /// Line of the first error (1-indexed).
    pub line: usize,
    /// Column of the first error (1-indexed).
    pub column: usize,
    /// Description of the failure.
    pub message: String,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            column,
            message: message.into(),
        }
    }
}

/// Trait for language-specific parsing.
pub trait Frontend: Send + Sync {
    /// Language identifier (e.g., `"go"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this frontend handles, without the dot (e.g., `&["go"]`).
    fn extensions(&self) -> &'static [&'static str];

    /// Parses source text into the syntax model.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the source contains syntax errors.
    fn parse(&self, source: &str) -> Result<SourceFile, ParseError>;

    /// Returns true if `path` has one of [`Self::extensions`].
    fn handles(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions().contains(&ext))
    }
}

/// Type alias for boxed Frontend trait objects.
pub type FrontendBox = Box<dyn Frontend>;
