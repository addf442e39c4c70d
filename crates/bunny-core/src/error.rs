//! Unified error handling for Bunny Core.
//!
//! Wraps domain and application errors in one type with user-actionable
//! suggestions and a display category.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Bunny Core operations.
#[derive(Debug, Error, Clone)]
pub enum BunnyError {
    /// Domain rule violations (bad input, conflicting definitions).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Orchestration failures (I/O, missing stubs, install steps).
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl BunnyError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { .. } => vec![
                "Check bunny.toml and BUNNY_* environment variables".into(),
                "Try: bunny config list".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in Bunny".into(),
                "Please report this issue at: https://github.com/kisalay/bunny/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Conflict => ErrorCategory::Conflict,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Whether running the same command again might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Application(ApplicationError::StoreLockError))
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type BunnyResult<T> = Result<T, BunnyError>;

/// Extension trait for adding context to foreign errors.
pub trait Context<T> {
    fn context(self, msg: impl Into<String>) -> BunnyResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> BunnyResult<T> {
        self.map_err(|e| BunnyError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_follow_inner_errors() {
        let e: BunnyError = DomainError::InvalidField {
            input: "x".into(),
            reason: "bad".into(),
        }
        .into();
        assert_eq!(e.category(), ErrorCategory::Validation);

        let e: BunnyError = ApplicationError::TypeNotFound { id: "blog".into() }.into();
        assert_eq!(e.category(), ErrorCategory::NotFound);
        assert!(!e.suggestions().is_empty());

        assert_eq!(
            BunnyError::configuration("bad").category(),
            ErrorCategory::Configuration
        );
    }

    #[test]
    fn context_wraps_as_internal() {
        let r: Result<(), std::fmt::Error> = Err(std::fmt::Error);
        let e = r.context("formatting plan").unwrap_err();
        assert!(matches!(e, BunnyError::Internal { .. }));
        assert!(e.to_string().contains("formatting plan"));
    }
}
