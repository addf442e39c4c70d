//! Install / uninstall sequencing for website types.
//!
//! Install runs four steps in a fixed order:
//!
//! 1. **Publish** the type's assets (config, migrations, views, lang)
//! 2. **Migrate** the published migrations
//! 3. **Seed** the type's default records
//! 4. **Configure**: merge features and dependencies into the per-type config
//!
//! Uninstall rolls the migrations back and deletes the published assets.
//!
//! A failing step is logged and its error returned. Steps that already ran
//! are not undone; running `uninstall` is the manual way back.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use toml_edit::{Array, DocumentMut, Item, TomlError, table, value};
use tracing::{error, info, instrument, warn};

use super::generator_service::GeneratorService;
use super::plan_writer::{Overwrite, PlanWriter, WriteReport};
use crate::application::{
    ApplicationError,
    ports::{Filesystem, SchemaMigrator, SeedSink, StubStore},
};
use crate::domain::{
    DEFAULT_SETTINGS, GenerationPlan, RelativePath, TypeLayout, WebsiteTypeDescriptor,
    WebsiteTypeRegistry, default_records, package_paths, website_type::normalize_type_id,
};
use crate::error::{BunnyError, BunnyResult};

/// One step of the install or uninstall sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallStep {
    Publish,
    Migrate,
    Seed,
    Configure,
    Rollback,
    Remove,
}

impl InstallStep {
    pub fn label(self) -> &'static str {
        match self {
            Self::Publish => "Publishing assets",
            Self::Migrate => "Running migrations",
            Self::Seed => "Seeding data",
            Self::Configure => "Updating configuration",
            Self::Rollback => "Rolling back migrations",
            Self::Remove => "Removing assets",
        }
    }
}

/// What happened in one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepOutcome {
    pub step: InstallStep,
    /// `true` when the step had nothing to do (missing directory or file).
    pub skipped: bool,
    pub detail: String,
    pub paths: Vec<RelativePath>,
}

impl StepOutcome {
    fn done(step: InstallStep, detail: impl Into<String>) -> Self {
        Self {
            step,
            skipped: false,
            detail: detail.into(),
            paths: Vec::new(),
        }
    }

    fn skipped(step: InstallStep, detail: impl Into<String>) -> Self {
        Self {
            skipped: true,
            ..Self::done(step, detail)
        }
    }

    fn with_paths(mut self, paths: Vec<RelativePath>) -> Self {
        self.paths = paths;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallReport {
    pub type_id: String,
    pub steps: Vec<StepOutcome>,
}

/// `type_id` of the report produced by [`WebsiteTypeService::uninstall_all`].
pub const ALL_TYPES: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UninstallReport {
    pub type_id: String,
    pub steps: Vec<StepOutcome>,
}

/// Settings of one installed type after reading or updating them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingsReport {
    pub type_id: String,
    pub path: RelativePath,
    pub settings: BTreeMap<String, bool>,
}

/// Installs and uninstalls website types in one project.
pub struct WebsiteTypeService {
    registry: WebsiteTypeRegistry,
    generator: GeneratorService,
    filesystem: Arc<dyn Filesystem>,
    migrator: Arc<dyn SchemaMigrator>,
    seeds: Arc<dyn SeedSink>,
    root: PathBuf,
}

impl WebsiteTypeService {
    pub fn new(
        registry: WebsiteTypeRegistry,
        stubs: Arc<dyn StubStore>,
        filesystem: Arc<dyn Filesystem>,
        migrator: Arc<dyn SchemaMigrator>,
        seeds: Arc<dyn SeedSink>,
        root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            registry,
            generator: GeneratorService::new(stubs),
            filesystem,
            migrator,
            seeds,
            root: root.into(),
        }
    }

    pub fn registry(&self) -> &WebsiteTypeRegistry {
        &self.registry
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Enabled descriptor for `id`, or the matching not-found / disabled error.
    pub fn resolve(&self, id: &str) -> BunnyResult<&WebsiteTypeDescriptor> {
        let id = normalize_type_id(id);
        if let Some(descriptor) = self.registry.get(&id) {
            return Ok(descriptor);
        }
        if self.registry.has_type(&id) {
            Err(ApplicationError::TypeDisabled { id }.into())
        } else {
            Err(ApplicationError::TypeNotFound { id }.into())
        }
    }

    /// Whether the type's config file is already present in the project.
    pub fn is_installed(&self, id: &str) -> BunnyResult<bool> {
        let layout = TypeLayout::new(id)?;
        Ok(self.filesystem.exists(&layout.config_file().under(&self.root)))
    }

    // -------------------------------------------------------------------------
    // Install
    // -------------------------------------------------------------------------

    /// Run publish, migrate, seed and configure for `id`.
    ///
    /// `on_step` is called before each step starts.
    #[instrument(skip(self, on_step), fields(root = %self.root.display()))]
    pub fn install(
        &self,
        id: &str,
        force: bool,
        mut on_step: impl FnMut(InstallStep),
    ) -> BunnyResult<InstallReport> {
        let descriptor = self.resolve(id)?;
        let layout = TypeLayout::new(&descriptor.id)?;
        let type_id = layout.type_id().to_owned();
        info!(type_id = %type_id, force, "Installing website type");

        let mut steps = Vec::new();

        on_step(InstallStep::Publish);
        let published = self
            .publish(descriptor, &layout, force)
            .inspect_err(|e| error!(type_id = %type_id, error = %e, "Publishing assets failed"))?;
        steps.push(
            StepOutcome::done(
                InstallStep::Publish,
                format!("{} files published", published.file_count()),
            )
            .with_paths(published.files().cloned().collect()),
        );

        on_step(InstallStep::Migrate);
        steps.push(self.migrate(&layout)?);

        on_step(InstallStep::Seed);
        steps.push(self.seed(&type_id)?);

        on_step(InstallStep::Configure);
        steps.push(self.merge_config(descriptor, &layout)?);

        info!(type_id = %type_id, "Website type installed");
        Ok(InstallReport { type_id, steps })
    }

    /// Publish the type's assets. Existing files are replaced, except an
    /// existing config file when `force` is off.
    fn publish(
        &self,
        descriptor: &WebsiteTypeDescriptor,
        layout: &TypeLayout,
        force: bool,
    ) -> BunnyResult<WriteReport> {
        let full = self.generator.type_assets_plan(descriptor)?;
        let config = layout.config_file();
        let keep_config = !force && self.filesystem.exists(&config.under(&self.root));
        if keep_config {
            warn!(path = %config, "Config already exists, leaving it untouched");
        }

        let mut plan = GenerationPlan::new();
        for dir in full.directories() {
            plan.add_directory(dir.clone());
        }
        for file in full.files() {
            if keep_config && file.path == config {
                continue;
            }
            plan.add_file(file.clone());
        }

        PlanWriter::new(self.filesystem.clone(), &self.root).apply(&plan, Overwrite::Replace)
    }

    fn migrate(&self, layout: &TypeLayout) -> BunnyResult<StepOutcome> {
        let type_id = layout.type_id();
        let dir = layout.migrations_dir().under(&self.root);
        if !self.filesystem.exists(&dir) {
            info!(type_id, "No migrations directory, skipping");
            return Ok(StepOutcome::skipped(InstallStep::Migrate, "no migrations"));
        }

        let applied = self
            .migrator
            .migrate(type_id, &dir)
            .map_err(|e| step_failed(type_id, InstallStep::Migrate, e))?;
        Ok(StepOutcome::done(
            InstallStep::Migrate,
            format!("{applied} migrations applied"),
        ))
    }

    fn seed(&self, type_id: &str) -> BunnyResult<StepOutcome> {
        let records = default_records(type_id);
        let written = self
            .seeds
            .persist(type_id, &records)
            .map_err(|e| step_failed(type_id, InstallStep::Seed, e))?;
        Ok(StepOutcome::done(
            InstallStep::Seed,
            format!("{written} records seeded"),
        ))
    }

    /// Set `features` and `dependencies` in the per-type config, keeping
    /// every other key.
    fn merge_config(
        &self,
        descriptor: &WebsiteTypeDescriptor,
        layout: &TypeLayout,
    ) -> BunnyResult<StepOutcome> {
        let config = layout.config_file();
        let path = config.under(&self.root);
        if !self.filesystem.exists(&path) {
            info!(path = %config, "No config file, skipping merge");
            return Ok(StepOutcome::skipped(InstallStep::Configure, "no config file"));
        }

        let type_id = layout.type_id();
        let failed = |e: &BunnyError| {
            error!(type_id, path = %config, error = %e, "Updating configuration failed");
        };
        let existing = self.filesystem.read_to_string(&path).inspect_err(&failed)?;
        let merged = merge_lists(&existing, &descriptor.features, &descriptor.dependencies)
            .map_err(|reason| config_edit_failed(&path, reason))
            .inspect_err(&failed)?;
        self.filesystem.write_file(&path, &merged).inspect_err(&failed)?;

        Ok(StepOutcome::done(
            InstallStep::Configure,
            format!(
                "{} features, {} dependencies",
                descriptor.features.len(),
                descriptor.dependencies.len()
            ),
        )
        .with_paths(vec![config]))
    }

    // -------------------------------------------------------------------------
    // Settings
    // -------------------------------------------------------------------------

    /// `[settings]` toggles of an installed type, with missing defaults
    /// filled in.
    pub fn settings(&self, id: &str) -> BunnyResult<SettingsReport> {
        let layout = self.installed_layout(id)?;
        let path = layout.config_file().under(&self.root);
        let document = self.filesystem.read_to_string(&path)?;
        let settings =
            current_settings(&document).map_err(|reason| config_edit_failed(&path, reason))?;
        Ok(SettingsReport {
            type_id: layout.type_id().to_owned(),
            path: layout.config_file(),
            settings,
        })
    }

    /// Apply `updates` to the `[settings]` table of an installed type.
    ///
    /// Only keys already known (defaults or present in the file) are
    /// accepted; every other key in the file is left as written.
    #[instrument(skip(self, updates), fields(root = %self.root.display()))]
    pub fn configure(
        &self,
        id: &str,
        updates: &BTreeMap<String, bool>,
    ) -> BunnyResult<SettingsReport> {
        let mut report = self.settings(id)?;
        for (key, enabled) in updates {
            if !report.settings.contains_key(key) {
                return Err(ApplicationError::UnknownSetting {
                    key: key.clone(),
                    known: report.settings.keys().cloned().collect::<Vec<_>>().join(", "),
                }
                .into());
            }
            report.settings.insert(key.clone(), *enabled);
        }

        let config = &report.path;
        let path = config.under(&self.root);
        let failed = |e: &BunnyError| {
            error!(
                type_id = %report.type_id,
                path = %config,
                error = %e,
                "Writing settings failed"
            );
        };
        let document = self.filesystem.read_to_string(&path).inspect_err(&failed)?;
        let updated = write_settings(&document, &report.settings)
            .map_err(|reason| config_edit_failed(&path, reason))
            .inspect_err(&failed)?;
        self.filesystem.write_file(&path, &updated).inspect_err(&failed)?;

        info!(type_id = %report.type_id, changed = updates.len(), "Settings updated");
        Ok(report)
    }

    /// Layout of an enabled type whose config file exists.
    fn installed_layout(&self, id: &str) -> BunnyResult<TypeLayout> {
        let descriptor = self.resolve(id)?;
        let layout = TypeLayout::new(&descriptor.id)?;
        if !self.filesystem.exists(&layout.config_file().under(&self.root)) {
            return Err(ApplicationError::TypeNotInstalled {
                id: layout.type_id().to_owned(),
            }
            .into());
        }
        Ok(layout)
    }

    // -------------------------------------------------------------------------
    // Uninstall
    // -------------------------------------------------------------------------

    /// Roll back the type's migrations and delete its published assets.
    ///
    /// Disabled types can still be uninstalled; seed data is left alone.
    #[instrument(skip(self, on_step), fields(root = %self.root.display()))]
    pub fn uninstall(
        &self,
        id: &str,
        mut on_step: impl FnMut(InstallStep),
    ) -> BunnyResult<UninstallReport> {
        let id = normalize_type_id(id);
        if !self.registry.has_type(&id) {
            return Err(ApplicationError::TypeNotFound { id }.into());
        }
        let layout = TypeLayout::new(&id)?;
        let type_id = layout.type_id().to_owned();
        info!(type_id = %type_id, "Uninstalling website type");

        let mut steps = Vec::new();

        on_step(InstallStep::Rollback);
        let dir = layout.migrations_dir().under(&self.root);
        if self.filesystem.exists(&dir) {
            let rolled_back = self
                .migrator
                .rollback(&type_id, &dir)
                .map_err(|e| step_failed(&type_id, InstallStep::Rollback, e))?;
            steps.push(StepOutcome::done(
                InstallStep::Rollback,
                format!("{rolled_back} migrations rolled back"),
            ));
        } else {
            steps.push(StepOutcome::skipped(InstallStep::Rollback, "no migrations"));
        }

        on_step(InstallStep::Remove);
        let config = layout.config_file();
        let mut removed = Vec::new();
        for asset in layout.asset_paths() {
            let path = asset.under(&self.root);
            if !self.filesystem.exists(&path) {
                continue;
            }
            let result = if asset == config {
                self.filesystem.remove_file(&path)
            } else {
                self.filesystem.remove_dir_all(&path)
            };
            result.inspect_err(|e| {
                error!(type_id = %type_id, path = %asset, error = %e, "Removing asset failed");
            })?;
            removed.push(asset);
        }
        let outcome = if removed.is_empty() {
            StepOutcome::skipped(InstallStep::Remove, "nothing to remove")
        } else {
            StepOutcome::done(InstallStep::Remove, format!("{} paths removed", removed.len()))
                .with_paths(removed)
        };
        steps.push(outcome);

        info!(type_id = %type_id, "Website type uninstalled");
        Ok(UninstallReport { type_id, steps })
    }

    /// Uninstall every type at once: roll back each type's migrations, then
    /// delete the whole `vendor/bunny` trees and `config/bunny`.
    #[instrument(skip(self, on_step), fields(root = %self.root.display()))]
    pub fn uninstall_all(
        &self,
        mut on_step: impl FnMut(InstallStep),
    ) -> BunnyResult<UninstallReport> {
        info!("Uninstalling every website type");
        let mut steps = Vec::new();

        on_step(InstallStep::Rollback);
        let mut rolled_back = 0;
        for descriptor in self.registry.list_all() {
            let layout = TypeLayout::new(&descriptor.id)?;
            let dir = layout.migrations_dir().under(&self.root);
            if !self.filesystem.exists(&dir) {
                continue;
            }
            rolled_back += self
                .migrator
                .rollback(layout.type_id(), &dir)
                .map_err(|e| step_failed(layout.type_id(), InstallStep::Rollback, e))?;
        }
        steps.push(if rolled_back == 0 {
            StepOutcome::skipped(InstallStep::Rollback, "no migrations")
        } else {
            StepOutcome::done(
                InstallStep::Rollback,
                format!("{rolled_back} migrations rolled back"),
            )
        });

        on_step(InstallStep::Remove);
        let mut removed = Vec::new();
        for dir in package_paths() {
            let path = dir.under(&self.root);
            if !self.filesystem.exists(&path) {
                continue;
            }
            self.filesystem.remove_dir_all(&path).inspect_err(|e| {
                error!(path = %dir, error = %e, "Removing package directory failed");
            })?;
            removed.push(dir);
        }
        steps.push(if removed.is_empty() {
            StepOutcome::skipped(InstallStep::Remove, "nothing to remove")
        } else {
            StepOutcome::done(InstallStep::Remove, format!("{} paths removed", removed.len()))
                .with_paths(removed)
        });

        info!("Every website type uninstalled");
        Ok(UninstallReport {
            type_id: ALL_TYPES.to_owned(),
            steps,
        })
    }
}

/// Wrap a port failure in the step's error and log it.
fn step_failed(type_id: &str, step: InstallStep, err: BunnyError) -> BunnyError {
    error!(type_id, step = ?step, error = %err, "Install step failed");
    let type_id = type_id.to_owned();
    let reason = err.to_string();
    match step {
        InstallStep::Seed => ApplicationError::SeedFailed { type_id, reason },
        _ => ApplicationError::MigrationFailed { type_id, reason },
    }
    .into()
}

fn config_edit_failed(path: &Path, reason: String) -> BunnyError {
    ApplicationError::ConfigMergeFailed {
        path: path.to_path_buf(),
        reason,
    }
    .into()
}

/// Replace the `features` and `dependencies` arrays in a TOML document.
/// Comments, key order and every other key are kept as written.
pub fn merge_lists(
    document: &str,
    features: &[String],
    dependencies: &[String],
) -> Result<String, String> {
    let mut doc: DocumentMut = document.parse().map_err(|e: TomlError| e.to_string())?;
    let to_array = |items: &[String]| value(items.iter().map(String::as_str).collect::<Array>());
    doc["features"] = to_array(features);
    doc["dependencies"] = to_array(dependencies);
    Ok(doc.to_string())
}

/// `[settings]` booleans from a per-type config, over [`DEFAULT_SETTINGS`].
/// Non-boolean entries are not toggles and are skipped.
pub fn current_settings(document: &str) -> Result<BTreeMap<String, bool>, String> {
    let doc: DocumentMut = document.parse().map_err(|e: TomlError| e.to_string())?;
    let mut settings: BTreeMap<String, bool> = DEFAULT_SETTINGS
        .iter()
        .map(|(key, on)| ((*key).to_owned(), *on))
        .collect();
    if let Some(section) = doc.get("settings").and_then(Item::as_table_like) {
        for (key, item) in section.iter() {
            if let Some(on) = item.as_bool() {
                settings.insert(key.to_owned(), on);
            }
        }
    }
    Ok(settings)
}

/// Write `settings` into the `[settings]` table, creating it if needed.
pub fn write_settings(
    document: &str,
    settings: &BTreeMap<String, bool>,
) -> Result<String, String> {
    let mut doc: DocumentMut = document.parse().map_err(|e: TomlError| e.to_string())?;
    let section = doc
        .entry("settings")
        .or_insert_with(table)
        .as_table_like_mut()
        .ok_or_else(|| "`settings` is not a table".to_owned())?;
    for (key, on) in settings {
        section.insert(key, value(*on));
    }
    Ok(doc.to_string())
}
