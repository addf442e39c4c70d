// ============================================================================
// domain/error.rs - DOMAIN RULE VIOLATIONS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("invalid field definition '{input}': {reason}")]
    InvalidField { input: String, reason: String },

    #[error("invalid website type id '{id}': {reason}")]
    InvalidTypeId { id: String, reason: String },

    #[error("invalid stub name '{name}': {reason}")]
    InvalidStubName { name: String, reason: String },

    #[error("invalid model name '{name}': {reason}")]
    InvalidModelName { name: String, reason: String },

    #[error("invalid value '{value}' for {option} (expected one of: {expected})")]
    InvalidOption {
        option: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Path escapes the project root: {path}")]
    PathEscapesRoot { path: String },

    #[error("Duplicate path in plan: {path}")]
    DuplicatePath { path: String },

    // ========================================================================
    // Conflicts
    // ========================================================================
    #[error("custom website type '{id}' collides with an existing type")]
    DuplicateCustomType { id: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidField { .. } => vec![
                "Fields are written as name:type[:constraint]*, comma separated".into(),
                "Example: title:string, price:decimal:nullable, email:string:unique".into(),
            ],
            Self::InvalidTypeId { .. } => vec![
                "Use lowercase kebab-case ids such as 'pet-shop'".into(),
                "Try: bunny types".into(),
            ],
            Self::InvalidModelName { .. } => vec![
                "Model names start with a letter, e.g. 'Product' or 'BlogPost'".into(),
            ],
            Self::DuplicateCustomType { id } => vec![
                format!("'{id}' is already defined"),
                "Rename the entry under [custom_types] in bunny.toml".into(),
            ],
            Self::InvalidStubName { .. } => vec!["Try: bunny stubs".into()],
            Self::InvalidOption { option, expected, .. } => {
                vec![format!("Valid values for --{option}: {expected}")]
            }
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DuplicateCustomType { .. } => ErrorCategory::Conflict,
            Self::DuplicatePath { .. } => ErrorCategory::Internal,
            _ => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
    NotFound,
    Internal,
}
