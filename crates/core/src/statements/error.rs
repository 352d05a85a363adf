//! Statement error types.

use tallybook_shared::AppError;
use tallybook_shared::types::TransactionId;
use thiserror::Error;

/// Errors that can occur during statement generation.
#[derive(Debug, Error)]
pub enum StatementError {
    /// A categorized transaction carries a date that is not `YYYY-MM-DD`.
    #[error("Invalid date '{date}' on transaction {transaction_id}")]
    InvalidDate {
        /// Offending transaction.
        transaction_id: TransactionId,
        /// The date as received.
        date: String,
    },

    /// The configured fiscal year has no calendar representation.
    #[error("Invalid fiscal year: {0}")]
    InvalidFiscalYear(i32),
}

impl From<StatementError> for AppError {
    fn from(err: StatementError) -> Self {
        match err {
            StatementError::InvalidDate { .. } => Self::Validation(err.to_string()),
            StatementError::InvalidFiscalYear(_) => Self::Configuration(err.to_string()),
        }
    }
}
