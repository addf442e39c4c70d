//! Schema migration adapter backed by a JSON ledger.
//!
//! Bunny does not talk to a database. Applying a type's migrations records
//! each migration file in `storage/bunny/migrations.json` as one batch, the
//! same bookkeeping a framework migrator keeps in its migrations table.
//! Rolling back removes the type's most recent batch. The host framework
//! runs the actual SQL.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use bunny_core::{
    application::{
        ApplicationError,
        ports::{Filesystem, SchemaMigrator},
    },
    error::BunnyResult,
};

/// Ledger location relative to the project root.
pub const LEDGER_PATH: &str = "storage/bunny/migrations.json";

/// Extension of migration files picked up from a migrations directory.
const MIGRATION_EXTENSION: &str = "php";

/// One `migrate` call's worth of applied migrations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationBatch {
    pub id: Uuid,
    pub type_id: String,
    pub applied_at: DateTime<Utc>,
    pub migrations: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationLedger {
    #[serde(default)]
    pub batches: Vec<MigrationBatch>,
}

impl MigrationLedger {
    /// Whether `migration` was applied for `type_id` in any batch.
    pub fn is_applied(&self, type_id: &str, migration: &str) -> bool {
        self.batches
            .iter()
            .filter(|b| b.type_id == type_id)
            .any(|b| b.migrations.iter().any(|m| m == migration))
    }

    /// Migrations applied for `type_id`, oldest first.
    pub fn applied(&self, type_id: &str) -> Vec<&str> {
        self.batches
            .iter()
            .filter(|b| b.type_id == type_id)
            .flat_map(|b| b.migrations.iter().map(String::as_str))
            .collect()
    }
}

/// [`SchemaMigrator`] that records applied migrations in a JSON ledger.
pub struct LedgerMigrator {
    filesystem: Arc<dyn Filesystem>,
    ledger_path: PathBuf,
}

impl LedgerMigrator {
    pub fn new(filesystem: Arc<dyn Filesystem>, ledger_path: impl Into<PathBuf>) -> Self {
        Self {
            filesystem,
            ledger_path: ledger_path.into(),
        }
    }

    /// Ledger at [`LEDGER_PATH`] under `root`.
    pub fn for_project(filesystem: Arc<dyn Filesystem>, root: &Path) -> Self {
        Self::new(filesystem, root.join(LEDGER_PATH))
    }

    pub fn ledger_path(&self) -> &Path {
        &self.ledger_path
    }

    pub fn load(&self) -> BunnyResult<MigrationLedger> {
        if !self.filesystem.exists(&self.ledger_path) {
            return Ok(MigrationLedger::default());
        }
        let raw = self.filesystem.read_to_string(&self.ledger_path)?;
        serde_json::from_str(&raw).map_err(|e| {
            ApplicationError::filesystem(&self.ledger_path, format!("corrupt ledger: {e}")).into()
        })
    }

    fn save(&self, ledger: &MigrationLedger) -> BunnyResult<()> {
        if let Some(parent) = self.ledger_path.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(ledger)
            .map_err(|e| ApplicationError::filesystem(&self.ledger_path, e))?;
        self.filesystem.write_file(&self.ledger_path, &json)
    }

    fn migration_files(&self, dir: &Path) -> BunnyResult<Vec<String>> {
        Ok(self
            .filesystem
            .list_files(dir)?
            .into_iter()
            .filter(|p| p.extension().and_then(|e| e.to_str()) == Some(MIGRATION_EXTENSION))
            .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect())
    }
}

impl SchemaMigrator for LedgerMigrator {
    #[instrument(skip(self), fields(ledger = %self.ledger_path.display()))]
    fn migrate(&self, type_id: &str, migrations_dir: &Path) -> BunnyResult<usize> {
        let mut ledger = self.load()?;
        let pending: Vec<String> = self
            .migration_files(migrations_dir)?
            .into_iter()
            .filter(|m| !ledger.is_applied(type_id, m))
            .collect();

        if pending.is_empty() {
            debug!(type_id, "Nothing to migrate");
            return Ok(0);
        }

        let count = pending.len();
        for migration in &pending {
            debug!(type_id, migration = %migration, "Migrating");
        }
        ledger.batches.push(MigrationBatch {
            id: Uuid::new_v4(),
            type_id: type_id.to_owned(),
            applied_at: Utc::now(),
            migrations: pending,
        });
        self.save(&ledger)?;

        info!(type_id, count, "Migrations applied");
        Ok(count)
    }

    #[instrument(skip(self, _migrations_dir), fields(ledger = %self.ledger_path.display()))]
    fn rollback(&self, type_id: &str, _migrations_dir: &Path) -> BunnyResult<usize> {
        let mut ledger = self.load()?;
        let Some(index) = ledger.batches.iter().rposition(|b| b.type_id == type_id) else {
            debug!(type_id, "Nothing to roll back");
            return Ok(0);
        };

        let batch = ledger.batches.remove(index);
        self.save(&ledger)?;

        info!(type_id, batch = %batch.id, count = batch.migrations.len(), "Rolled back");
        Ok(batch.migrations.len())
    }
}
