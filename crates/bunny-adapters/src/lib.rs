//! Infrastructure adapters for Bunny.
//!
//! This crate implements the ports defined in `bunny-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod builtin_stubs;
pub mod filesystem;
pub mod migrator;
pub mod seeds;
pub mod stub_loader;
pub mod stub_store;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use migrator::LedgerMigrator;
pub use seeds::JsonSeedSink;
pub use stub_loader::FilesystemStubLoader;
pub use stub_store::InMemoryStubStore;
