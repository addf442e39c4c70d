//! Bunny Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Bunny
//! website scaffolder, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            bunny-cli (CLI)              │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (GeneratorService, WebsiteTypeService) │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Application Ports (Traits)       │
//! │ (Filesystem, StubStore, Migrator, Seed) │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      bunny-adapters (Infrastructure)    │
//! │ (LocalFilesystem, InMemoryStubStore...) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (render, WebsiteTypeRegistry, plans)    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bunny_core::prelude::*;
//!
//! // 1. Describe the model
//! let fields = parse_fields_strict("title:string,price:decimal:nullable")?;
//! let request = ModelRequest::new("ecommerce", "product", fields)?;
//!
//! // 2. Build a plan with an injected stub store
//! let plan = GeneratorService::new(stubs).scaffold_plan(&request, &ScaffoldOptions::default())?;
//!
//! // 3. Write it through an injected filesystem
//! PlanWriter::new(filesystem, "./my-site").apply(&plan, Overwrite::Refuse)?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GeneratorService, InstallReport, InstallStep, ModelRequest, Overwrite, PlanWriter,
        ScaffoldOptions, UninstallReport, WebsiteTypeService, WriteReport,
        ports::{Filesystem, SchemaMigrator, SeedSink, StubStore},
    };
    pub use crate::domain::{
        ApiStyle, FieldDefinition, FrontendFramework, GeneratedFile, GenerationPlan,
        RelativePath, Replacements, Stub, StubName, UiLibrary, WebsiteTypeDescriptor,
        WebsiteTypeRegistry, parse_fields, parse_fields_strict, render,
    };
    pub use crate::error::{BunnyError, BunnyResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
