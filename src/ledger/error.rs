use thiserror::Error;

/// Domain outcomes of ledger operations. Every variant except `Storage` is an
/// expected, recoverable result the caller is supposed to branch on; `Storage`
/// wraps database failures and always rolls back the enclosing transaction.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("entity not found")]
    NotFound,

    #[error("amount must be a positive value with at most two decimal places")]
    InvalidAmount,

    #[error("stream is not active")]
    StreamNotActive,

    #[error("insufficient treasury funds")]
    InsufficientFunds,

    #[error("email already exists")]
    DuplicateIdentity,

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

impl LedgerError {
    /// Collapses unique-constraint violations into `DuplicateIdentity` so
    /// callers never have to inspect driver error codes.
    pub fn from_insert(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return LedgerError::DuplicateIdentity;
            }
        }
        LedgerError::Storage(err)
    }
}
