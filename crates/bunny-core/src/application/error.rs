//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// No stub with this name (or any of its fallbacks) exists.
    #[error("Stub not found: {name}")]
    StubNotFound { name: String },

    /// A stub directory or file could not be loaded.
    #[error("Failed to load stubs from {path}: {reason}")]
    StubLoadFailed { path: PathBuf, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// A generator would overwrite an existing file.
    #[error("File already exists: {path}")]
    FileExists { path: PathBuf },

    #[error("Website type '{id}' not found")]
    TypeNotFound { id: String },

    #[error("Website type '{id}' is disabled in configuration")]
    TypeDisabled { id: String },

    /// The type's config file has not been published yet.
    #[error("Website type '{id}' is not installed")]
    TypeNotInstalled { id: String },

    #[error("Unknown setting '{key}' (known: {known})")]
    UnknownSetting { key: String, known: String },

    #[error("Migrations for '{type_id}' failed: {reason}")]
    MigrationFailed { type_id: String, reason: String },

    #[error("Seeding '{type_id}' failed: {reason}")]
    SeedFailed { type_id: String, reason: String },

    #[error("Could not update {path}: {reason}")]
    ConfigMergeFailed { path: PathBuf, reason: String },

    /// Store access failed (lock poisoned).
    #[error("Stub store lock poisoned")]
    StoreLockError,

    /// Validation failed (application-level, not domain).
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

impl ApplicationError {
    pub fn filesystem(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::FilesystemError {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::StubNotFound { .. } => vec![
                "Try: bunny stubs to see available stubs".into(),
                "Or point stubs.path in bunny.toml at a directory that has it".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::FileExists { path } => vec![
                format!("{} would be overwritten", path.display()),
                "Use --force to overwrite".into(),
                "Or --dry-run to preview what would be written".into(),
            ],
            Self::TypeNotFound { .. } => vec!["Try: bunny types".into()],
            Self::TypeDisabled { id } => vec![format!(
                "Enable it with `{} = true` under [types] in bunny.toml",
                id.replace('-', "_")
            )],
            Self::TypeNotInstalled { id } => vec![format!("Run: bunny install {id}")],
            Self::UnknownSetting { .. } => {
                vec!["Try: bunny configure <type> without --set to see every setting".into()]
            }
            Self::MigrationFailed { type_id, .. } | Self::SeedFailed { type_id, .. } => vec![
                "Earlier steps were not rolled back".into(),
                format!("Run: bunny uninstall {type_id} --force, then install again"),
            ],
            Self::ConfigMergeFailed { path, .. } => vec![
                format!("Check that {} is valid TOML", path.display()),
            ],
            Self::StoreLockError => vec!["Try again".into()],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::StubNotFound { .. }
            | Self::TypeNotFound { .. }
            | Self::TypeNotInstalled { .. } => {
                ErrorCategory::NotFound
            }
            Self::FileExists { .. } => ErrorCategory::Conflict,
            Self::TypeDisabled { .. } | Self::UnknownSetting { .. } | Self::ValidationFailed(_) => {
                ErrorCategory::Validation
            }
            Self::StubLoadFailed { .. } => ErrorCategory::Configuration,
            Self::FilesystemError { .. }
            | Self::MigrationFailed { .. }
            | Self::SeedFailed { .. }
            | Self::ConfigMergeFailed { .. }
            | Self::StoreLockError => ErrorCategory::Internal,
        }
    }
}
