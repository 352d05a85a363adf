//! Categorizer error types.

use tallybook_shared::AppError;
use thiserror::Error;

/// Errors raised while building or extending a rule table.
///
/// Categorizing a transaction never fails; only rule registration can.
#[derive(Debug, Error)]
pub enum CategorizeError {
    /// Category name is empty or whitespace.
    #[error("Category name must not be empty")]
    EmptyCategory,

    /// Pattern is empty or whitespace.
    #[error("Pattern for category '{category}' must not be empty")]
    EmptyPattern {
        /// Category the pattern was meant for.
        category: String,
    },

    /// Pattern is not a valid regular expression.
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The offending pattern source.
        pattern: String,
        /// Underlying regex error.
        #[source]
        source: regex::Error,
    },
}

impl From<CategorizeError> for AppError {
    fn from(err: CategorizeError) -> Self {
        Self::InvalidRule(err.to_string())
    }
}
