//! Core domain layer for Bunny.
//!
//! Pure logic only: stub rendering, naming, field parsing, the website-type
//! registry, seed content and generation plans. All I/O goes through the
//! ports defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: domain logic is synchronous
//! - **No I/O**: no filesystem, database or process calls
//! - **Immutable values**: stubs, descriptors and plans are plain data

pub mod common;
pub mod error;
pub mod field;
pub mod fragments;
pub mod layout;
pub mod naming;
pub mod plan;
pub mod seed;
pub mod stub;
pub mod value_objects;
pub mod website_type;

pub use common::RelativePath;
pub use error::{DomainError, ErrorCategory};
pub use field::{FieldDefinition, ParsedFields, parse_fields, parse_fields_strict};
pub use layout::{TypeLayout, package_paths};
pub use plan::{GeneratedFile, GenerationPlan, WriteMode};
pub use seed::{SeedProfile, SeedRecord, default_records};
pub use stub::{Replacements, Stub, StubName, StubSource, markers, render};
pub use value_objects::{ApiStyle, FrontendFramework, NpmPackages, UiLibrary};
pub use website_type::{
    BUILTIN_TYPES, BuiltinType, DEFAULT_DEPENDENCIES, DEFAULT_FEATURES, DEFAULT_SETTINGS, TypeInfo,
    WebsiteTypeDescriptor, WebsiteTypeRegistry,
};
