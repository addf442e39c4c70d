//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "scaffold a model" or "install a website type".

pub mod generator_service;
pub mod plan_writer;
pub mod website_type_service;

pub use generator_service::{GeneratorService, ModelRequest, ScaffoldOptions, migration_timestamp};
pub use plan_writer::{Overwrite, PlanWriter, WriteReport};
pub use website_type_service::{
    ALL_TYPES, InstallReport, InstallStep, SettingsReport, StepOutcome, UninstallReport,
    WebsiteTypeService, current_settings, merge_lists, write_settings,
};
