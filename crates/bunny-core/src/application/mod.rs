//! Application layer for Bunny.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (GeneratorService, PlanWriter,
//!   WebsiteTypeService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. Rendering, naming and the type registry live in
//! `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    GeneratorService, InstallReport, InstallStep, ModelRequest, Overwrite, PlanWriter,
    ScaffoldOptions, SettingsReport, StepOutcome, UninstallReport, WebsiteTypeService,
    WriteReport,
};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, SchemaMigrator, SeedSink, StubStore};

pub use error::ApplicationError;
