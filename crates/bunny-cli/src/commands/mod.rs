//! Command handlers, one module per subcommand.
//!
//! Handlers translate arguments into core calls and print results. Adapter
//! wiring shared by several commands lives here.

use std::path::Path;
use std::sync::Arc;

use bunny_adapters::{
    FilesystemStubLoader, InMemoryStubStore, JsonSeedSink, LedgerMigrator, LocalFilesystem,
};
use bunny_core::application::{Filesystem, StubStore, WebsiteTypeService};
use bunny_core::domain::WebsiteTypeRegistry;
use tracing::debug;

use crate::config::AppConfig;
use crate::error::{CliError, CliResult};

pub mod completions;
pub mod config;
pub mod configure;
pub mod generate;
pub mod init;
pub mod install;
pub mod make_type;
pub mod prompt;
pub mod stubs;
pub mod types;
pub mod uninstall;

/// Built-in stubs, overlaid with `stubs.path` when configured.
pub fn stub_store(config: &AppConfig, project_dir: &Path) -> CliResult<Arc<dyn StubStore>> {
    let store = match config.stubs_dir(project_dir) {
        Some(dir) => {
            debug!(dir = %dir.display(), "Layering stub overrides");
            FilesystemStubLoader::new(dir).layered_store()?
        }
        None => InMemoryStubStore::with_builtin()?,
    };
    Ok(Arc::new(store))
}

/// Type registry from config; bad `custom_types` entries are config errors.
pub fn registry(config: &AppConfig) -> CliResult<WebsiteTypeRegistry> {
    config
        .registry()
        .map_err(|e| CliError::config("Invalid [custom_types] entry", e))
}

/// Install/uninstall service over the local disk.
pub fn website_type_service(
    config: &AppConfig,
    project_dir: &Path,
) -> CliResult<WebsiteTypeService> {
    let filesystem: Arc<dyn Filesystem> = Arc::new(LocalFilesystem::new());
    let migrator = LedgerMigrator::for_project(filesystem.clone(), project_dir);
    let seeds = JsonSeedSink::for_project(filesystem.clone(), project_dir);
    Ok(WebsiteTypeService::new(
        registry(config)?,
        stub_store(config, project_dir)?,
        filesystem,
        Arc::new(migrator),
        Arc::new(seeds),
        project_dir,
    ))
}
