//! Application-wide error types.

use thiserror::Error;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Resource not found, or owned by another user.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Report rendering error.
    #[error("Rendering error: {0}")]
    Rendering(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::Database(_) | Self::Rendering(_) => 500,
        }
    }

    /// Returns true if the error detail must stay in the server logs.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        self.status_code() >= 500
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(AppError::NotFound(String::new()).status_code(), 404);
        assert_eq!(AppError::Validation(String::new()).status_code(), 400);
        assert_eq!(AppError::Database(String::new()).status_code(), 500);
        assert_eq!(AppError::Rendering(String::new()).status_code(), 500);
    }

    #[test]
    fn test_internal_errors() {
        assert!(AppError::Database("connection reset".into()).is_internal());
        assert!(AppError::Rendering("bad amount".into()).is_internal());
        assert!(!AppError::Validation("missing".into()).is_internal());
        assert!(!AppError::NotFound("expense".into()).is_internal());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::Validation("msg".into()).to_string(),
            "Validation error: msg"
        );
        assert_eq!(
            AppError::Database("msg".into()).to_string(),
            "Database error: msg"
        );
        assert_eq!(
            AppError::Rendering("msg".into()).to_string(),
            "Rendering error: msg"
        );
    }
}
