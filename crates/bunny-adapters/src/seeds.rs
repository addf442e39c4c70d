//! Seed sink writing records to per-type JSON files.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use bunny_core::{
    application::{
        ApplicationError,
        ports::{Filesystem, SeedSink},
    },
    domain::SeedRecord,
    error::BunnyResult,
};

/// Seed directory relative to the project root.
pub const SEEDS_DIR: &str = "storage/bunny/seeds";

/// Contents of `<type>.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedFile {
    #[serde(rename = "type")]
    pub type_id: String,
    pub seeded_at: DateTime<Utc>,
    pub records: Vec<SeedRecord>,
}

/// Writes `storage/bunny/seeds/<type>.json`, replacing earlier seeds for the
/// same type so reinstalling does not duplicate records.
pub struct JsonSeedSink {
    filesystem: Arc<dyn Filesystem>,
    dir: PathBuf,
}

impl JsonSeedSink {
    pub fn new(filesystem: Arc<dyn Filesystem>, dir: impl Into<PathBuf>) -> Self {
        Self {
            filesystem,
            dir: dir.into(),
        }
    }

    pub fn for_project(filesystem: Arc<dyn Filesystem>, root: &Path) -> Self {
        Self::new(filesystem, root.join(SEEDS_DIR))
    }

    pub fn path_for(&self, type_id: &str) -> PathBuf {
        self.dir.join(format!("{type_id}.json"))
    }

    /// Previously persisted seeds for a type, if any.
    pub fn read(&self, type_id: &str) -> BunnyResult<Option<SeedFile>> {
        let path = self.path_for(type_id);
        if !self.filesystem.exists(&path) {
            return Ok(None);
        }
        let raw = self.filesystem.read_to_string(&path)?;
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| seed_failed(type_id, e))
    }
}

impl SeedSink for JsonSeedSink {
    #[instrument(skip(self, records), fields(count = records.len()))]
    fn persist(&self, type_id: &str, records: &[SeedRecord]) -> BunnyResult<usize> {
        let file = SeedFile {
            type_id: type_id.to_owned(),
            seeded_at: Utc::now(),
            records: records.to_vec(),
        };
        let json = serde_json::to_string_pretty(&file).map_err(|e| seed_failed(type_id, e))?;

        self.filesystem.create_dir_all(&self.dir)?;
        let path = self.path_for(type_id);
        self.filesystem.write_file(&path, &json)?;

        info!(type_id, path = %path.display(), "Seed records written");
        Ok(records.len())
    }
}

fn seed_failed(type_id: &str, e: serde_json::Error) -> bunny_core::error::BunnyError {
    ApplicationError::SeedFailed {
        type_id: type_id.to_owned(),
        reason: e.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::MemoryFilesystem;
    use bunny_core::domain::default_records;

    #[test]
    fn persist_writes_json_and_replaces() {
        let fs = MemoryFilesystem::new();
        let sink = JsonSeedSink::for_project(Arc::new(fs.clone()), Path::new("/p"));

        let records = default_records("restaurant");
        assert_eq!(sink.persist("restaurant", &records).unwrap(), records.len());
        assert_eq!(sink.persist("restaurant", &records[..1]).unwrap(), 1);

        let saved = sink.read("restaurant").unwrap().unwrap();
        assert_eq!(saved.type_id, "restaurant");
        assert_eq!(saved.records.len(), 1);
        assert!(fs.read_file("/p/storage/bunny/seeds/restaurant.json").is_some());
    }

    #[test]
    fn read_missing_is_none() {
        let sink = JsonSeedSink::for_project(Arc::new(MemoryFilesystem::new()), Path::new("/p"));
        assert!(sink.read("blog").unwrap().is_none());
    }
}
