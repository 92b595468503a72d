//! Errors the ledger can report.
//!
//! - [`Validation`] malformed input, nothing was written.
//! - [`Forbidden`] the acting member does not belong to the group. Missing
//!   groups are reported the same way.
//! - [`NotFound`] the expense does not exist under the given group.
//! - [`Database`] a store failure. Inside a multi-row write the whole
//!   transaction has been rolled back before this is returned.
//!
//!  [`Validation`]: LedgerError::Validation
//!  [`Forbidden`]: LedgerError::Forbidden
//!  [`NotFound`]: LedgerError::NotFound
//!  [`Database`]: LedgerError::Database
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("\"{0}\" not found!")]
    NotFound(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl LedgerError {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Errors caused by the caller's input rather than by the store.
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, Self::Database(_))
    }
}

impl PartialEq for LedgerError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::Forbidden(a), Self::Forbidden(b)) => a == b,
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;
