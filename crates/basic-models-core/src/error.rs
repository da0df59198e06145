//! Error types for the admin helpers.
//!
//! The helpers do no recovery of their own. Every failure, whether a store
//! rejection, a missing clone operation or a bad settings file, surfaces as a
//! [`BasicModelsError`] so the host admin can render it through its normal
//! error path. [`BasicModelsError::status_code`] gives that path an HTTP status.

use thiserror::Error;

/// The error type shared by all basic-models crates.
#[derive(Error, Debug)]
pub enum BasicModelsError {
    // ── Lookup ───────────────────────────────────────────────────────

    /// An action, object or table could not be found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A query expected exactly one object but found none.
    #[error("Object does not exist: {0}")]
    DoesNotExist(String),

    // ── Store ────────────────────────────────────────────────────────

    /// A generic store failure.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// A store integrity constraint was violated.
    #[error("Integrity error: {0}")]
    IntegrityError(String),

    // ── Configuration ────────────────────────────────────────────────

    /// A settings value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// A model admin was set up without something an operation needs.
    #[error("Improperly configured: {0}")]
    ImproperlyConfigured(String),

    // ── Data ─────────────────────────────────────────────────────────

    /// A value could not be converted to or from a record.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl BasicModelsError {
    /// Returns the HTTP status code the host should render this error with.
    ///
    /// - `NotFound`, `DoesNotExist` -> 404
    /// - `IntegrityError` -> 409
    /// - Everything else -> 500
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) | Self::DoesNotExist(_) => 404,
            Self::IntegrityError(_) => 409,
            Self::DatabaseError(_)
            | Self::ConfigurationError(_)
            | Self::ImproperlyConfigured(_)
            | Self::SerializationError(_)
            | Self::IoError(_) => 500,
        }
    }
}

impl From<serde_json::Error> for BasicModelsError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// A convenience type alias for `Result<T, BasicModelsError>`.
pub type BasicModelsResult<T> = Result<T, BasicModelsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(BasicModelsError::NotFound("x".into()).status_code(), 404);
        assert_eq!(BasicModelsError::DoesNotExist("x".into()).status_code(), 404);
        assert_eq!(BasicModelsError::IntegrityError("x".into()).status_code(), 409);
        assert_eq!(BasicModelsError::DatabaseError("x".into()).status_code(), 500);
        assert_eq!(
            BasicModelsError::ImproperlyConfigured("x".into()).status_code(),
            500
        );
        assert_eq!(
            BasicModelsError::ConfigurationError("x".into()).status_code(),
            500
        );
    }

    #[test]
    fn test_display() {
        let err = BasicModelsError::NotFound("Action 'frobnicate'".into());
        assert_eq!(err.to_string(), "Not found: Action 'frobnicate'");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: BasicModelsError = io_err.into();
        assert_eq!(err.status_code(), 500);
        assert!(err.to_string().contains("file missing"));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: BasicModelsError = json_err.into();
        assert!(matches!(err, BasicModelsError::SerializationError(_)));
    }
}
