//! Shared error types for the pointcut engine

use thiserror::Error;

/// Main error type for pointcut construction and verification.
///
/// Absence of a match is never an error: `matches` reports it as `None`.
#[derive(Debug, Error)]
pub enum Error {
    /// Named and unnamed arguments mixed on a single pointcut
    #[error("pointcut '{pointcut}' cannot mix named and unnamed arguments")]
    ArgumentStyle { pointcut: String },

    /// Arity or shape mismatch found by verification
    #[error("invalid arguments for pointcut '{pointcut}': {message}")]
    Verification { pointcut: String, message: String },

    /// Wrapped external errors
    #[error(transparent)]
    External(#[from] anyhow::Error),
}

impl Error {
    /// Create an argument-style conflict error for the named rule
    pub fn argument_style(pointcut: impl Into<String>) -> Self {
        Self::ArgumentStyle {
            pointcut: pointcut.into(),
        }
    }

    /// Create a verification error with a descriptive message
    pub fn verification(pointcut: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Verification {
            pointcut: pointcut.into(),
            message: message.into(),
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
