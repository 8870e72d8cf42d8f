use thiserror::Error;
use tracing::error;

/// Error types for the earnings ledger
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Error from the database operations
    #[error("Database error: {0}")]
    Database(sea_orm::DbErr),

    /// One or more raw inputs were present but out of range
    #[error(
        "Invalid input: {} must be a non-negative number below 1000000000 with at most 2 decimal places",
        .fields.join(", ")
    )]
    Validation {
        /// Names of the offending fields
        fields: Vec<&'static str>,
    },

    /// Error from a non-relational backing store
    #[error("Storage error: {0}")]
    Storage(String),
}

impl LedgerError {
    /// True when the caller sent bad input, as opposed to the store failing.
    pub fn is_validation(&self) -> bool {
        matches!(self, LedgerError::Validation { .. })
    }
}

impl From<sea_orm::DbErr> for LedgerError {
    fn from(err: sea_orm::DbErr) -> Self {
        error!(%err, "Earnings store database error");
        LedgerError::Database(err)
    }
}

/// Type alias for Result with LedgerError
pub type Result<T> = std::result::Result<T, LedgerError>;
