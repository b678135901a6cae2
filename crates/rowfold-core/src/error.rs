use crate::{collect::CollectError, compare::CompareError, key::KeySpecError};
use derive_more::Display;
use thiserror::Error as ThisError;

///
/// Error
///
/// Top-level failure returned by the sequence operations.
/// Every failure is fatal to the current call; nothing is retried internally.
///

#[derive(Debug, PartialEq, ThisError)]
pub enum Error {
    #[error("{0}")]
    KeySpec(#[from] KeySpecError),

    #[error("{0}")]
    Compare(#[from] CompareError),

    #[error("{0}")]
    Collect(#[from] CollectError),
}

impl Error {
    /// Stable classification of this failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::KeySpec(err) => err.kind(),
            Self::Compare(err) => err.kind(),
            Self::Collect(err) => err.kind(),
        }
    }
}

///
/// ErrorKind
///
/// Flat taxonomy over every error variant, for callers that branch on the
/// failure class rather than on the structured payload.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ErrorKind {
    MissingFieldName,
    InvalidOrderValue,
    InvalidKeyShape,
    DuplicateKeyName,
    MissingAttribute,
    TypeMismatch,
    UnsupportedComparisonType,
    InvalidKeyName,
    MissingKeyAttribute,
    UnsortedInput,
    GroupLimitExceeded,
}
