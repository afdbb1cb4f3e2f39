//! Build errors for the picker builder.

use thiserror::Error;

/// Errors that can occur when building a picker configuration.
#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("Retention must keep at least one pick. Call .retention(n) with n > 0")]
    ZeroRetention,

    #[error("At least one save attempt is required. Call .max_save_attempts(n) with n > 0")]
    ZeroSaveAttempts,

    #[error("Session window must be longer than zero")]
    ZeroSessionWindow,

    #[error("Recent pick limit must be at least one")]
    ZeroRecentLimit,
}
