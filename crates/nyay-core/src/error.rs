//! Error type shared by the store and the service layer.

use thiserror::Error;

/// All errors produced by nyay-core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A required input was missing or empty.
    #[error("bad request: {0}")]
    Validation(String),

    /// The caller referenced a resource that does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Credentials did not match.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Propagated from the SQLite store.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Embedded migrations failed to apply on connect.
    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// The stored password hash could not be parsed or produced.
    #[error("password hash error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    /// An unclassified internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// `true` for errors caused by the caller rather than by the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CoreError::Validation(_) | CoreError::NotFound(_) | CoreError::Unauthorized(_)
        )
    }
}
