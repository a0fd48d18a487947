use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::Direction;

/// Failure inside the storage backend. Distinct from [`LedgerError::NotFound`],
/// which is checked at the ledger level before the store is touched.
#[derive(Error, Debug)]
pub(crate) enum StoreError {
    #[error("storage failure: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Errors surfaced by ledger operations.
#[derive(Error, Debug)]
pub(crate) enum LedgerError {
    /// Amount was zero, negative, or otherwise not a usable magnitude.
    #[error("amount must be positive, got {0}")]
    InvalidAmount(Decimal),

    /// Category is not in the allowed set for the direction.
    #[error("unknown {direction} category: '{category}'")]
    UnknownCategory {
        direction: Direction,
        category: String,
    },

    /// Category label was blank.
    #[error("category must not be blank")]
    BlankCategory,

    /// No transaction with this id exists.
    #[error("no transaction with id {0}")]
    NotFound(i64),

    /// The storage backend failed; the in-memory balance is unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LedgerError {
    /// Input was rejected at the boundary; nothing was persisted.
    pub(crate) fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidAmount(_) | Self::UnknownCategory { .. } | Self::BlankCategory
        )
    }

    pub(crate) fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
