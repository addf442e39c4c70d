//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `bunny-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::application::ApplicationError;
use crate::domain::{SeedRecord, Stub, StubName};
use crate::error::BunnyResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `bunny_adapters::filesystem::LocalFilesystem` (production)
/// - `bunny_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> BunnyResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> BunnyResult<()>;

    /// Append content to a file, creating it if missing.
    fn append_file(&self, path: &Path, content: &str) -> BunnyResult<()>;

    fn read_to_string(&self, path: &Path) -> BunnyResult<String>;

    /// Check if path exists (file or directory).
    fn exists(&self, path: &Path) -> bool;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> BunnyResult<()>;

    fn remove_file(&self, path: &Path) -> BunnyResult<()>;

    /// Files directly inside `dir`, sorted by name.
    fn list_files(&self, dir: &Path) -> BunnyResult<Vec<PathBuf>>;
}

/// Port for stub lookup.
///
/// Implemented by:
/// - `bunny_adapters::stub_store::InMemoryStubStore` (built-in stubs)
/// - `bunny_adapters::stub_loader::FilesystemStubLoader` (user stub directory)
#[cfg_attr(test, mockall::automock)]
pub trait StubStore: Send + Sync {
    /// Look up a stub; `Ok(None)` when the store has no such name.
    fn find(&self, name: &StubName) -> BunnyResult<Option<Stub>>;

    /// All stub names, sorted.
    fn list(&self) -> BunnyResult<Vec<StubName>>;

    /// Fetch a stub that must exist.
    fn get(&self, name: &StubName) -> BunnyResult<Stub> {
        self.find(name)?.ok_or_else(|| {
            ApplicationError::StubNotFound {
                name: name.to_string(),
            }
            .into()
        })
    }
}

/// Port for applying and rolling back a type's schema migrations.
#[cfg_attr(test, mockall::automock)]
pub trait SchemaMigrator: Send + Sync {
    /// Apply pending migrations found in `migrations_dir`; returns how many
    /// were applied.
    fn migrate(&self, type_id: &str, migrations_dir: &Path) -> BunnyResult<usize>;

    /// Roll back the most recent batch for `type_id`; returns how many
    /// migrations were rolled back.
    fn rollback(&self, type_id: &str, migrations_dir: &Path) -> BunnyResult<usize>;
}

/// Port for persisting seed records.
#[cfg_attr(test, mockall::automock)]
pub trait SeedSink: Send + Sync {
    /// Persist records for a type; returns how many were written.
    fn persist(&self, type_id: &str, records: &[SeedRecord]) -> BunnyResult<usize>;
}
