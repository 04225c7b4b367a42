//! Storage-specific error type wrapping sqlx errors.

use clinic_domain::error::{ClinicError, ConflictError};

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// Failed to run migrations.
    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl StorageError {
    /// Whether the statement was rejected by a foreign-key constraint.
    #[must_use]
    pub fn is_foreign_key_violation(&self) -> bool {
        match self {
            Self::Database(sqlx::Error::Database(err)) => err.is_foreign_key_violation(),
            _ => false,
        }
    }
}

impl From<StorageError> for ClinicError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}

/// Map a failed delete of a still-referenced row onto a domain conflict.
pub(crate) fn still_referenced(entity: &'static str, id: String) -> impl FnOnce(StorageError) -> ClinicError {
    move |err| {
        if err.is_foreign_key_violation() {
            ConflictError::StillReferenced { entity, id }.into()
        } else {
            err.into()
        }
    }
}
