//! Filesystem-based stub loader.
//!
//! Walks a user stub directory and turns every `*.stub` file into a
//! [`Stub`] named after its path relative to the directory, so
//! `stubs/backend/controllers/portfolio.stub` becomes
//! `backend/controllers/portfolio`.
//!
//! # Directory layout expected
//!
//! ```text
//! stubs/
//! ├── common/
//! │   └── model.stub                  ← overrides the built-in common/model
//! ├── backend/
//! │   └── controllers/
//! │       └── portfolio.stub          ← site-specific controller
//! └── sites/
//!     └── portfolio/
//!         └── home.blade.stub         ← copied to resources/views/portfolio/
//! ```
//!
//! Files without the `.stub` extension are ignored. Loaded stubs are meant
//! to be layered over the built-ins with
//! [`InMemoryStubStore::extend`](crate::stub_store::InMemoryStubStore::extend).

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use bunny_core::{
    application::ApplicationError,
    domain::{Stub, StubName, stub::STUB_EXTENSION},
    error::BunnyResult,
};

use crate::stub_store::InMemoryStubStore;

/// Loads stubs from a directory tree.
pub struct FilesystemStubLoader {
    stubs_dir: PathBuf,
}

impl FilesystemStubLoader {
    /// The directory does not need to exist yet; [`load_all`](Self::load_all)
    /// fails if it is missing when called.
    pub fn new(stubs_dir: impl Into<PathBuf>) -> Self {
        Self {
            stubs_dir: stubs_dir.into(),
        }
    }

    pub fn stubs_dir(&self) -> &Path {
        &self.stubs_dir
    }

    /// Load every `*.stub` file below the directory.
    ///
    /// Unreadable files and files whose path is not a valid stub name are
    /// skipped with a `WARN` log rather than failing the whole batch.
    #[instrument(skip(self), fields(dir = %self.stubs_dir.display()))]
    pub fn load_all(&self) -> BunnyResult<Vec<Stub>> {
        if !self.stubs_dir.is_dir() {
            return Err(self.failed(&self.stubs_dir, "stub directory not found"));
        }

        let mut stubs = Vec::new();

        for entry in WalkDir::new(&self.stubs_dir).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| self.failed(&self.stubs_dir, e))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(STUB_EXTENSION) {
                continue;
            }

            match self.load_file(path) {
                Ok(stub) => {
                    debug!(stub = %stub.name(), "loaded stub");
                    stubs.push(stub);
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping stub file");
                }
            }
        }

        debug!(count = stubs.len(), "finished loading stubs");
        Ok(stubs)
    }

    /// Built-in stubs with this directory's stubs layered on top.
    pub fn layered_store(&self) -> BunnyResult<InMemoryStubStore> {
        let store = InMemoryStubStore::with_builtin()?;
        let replaced = store.extend(self.load_all()?)?;
        debug!(replaced, "user stubs layered over built-ins");
        Ok(store)
    }

    fn load_file(&self, path: &Path) -> BunnyResult<Stub> {
        let relative = path
            .strip_prefix(&self.stubs_dir)
            .map_err(|e| self.failed(path, e))?;
        let name = StubName::parse(&relative.to_string_lossy())?;
        let text = fs::read_to_string(path).map_err(|e| self.failed(path, e))?;
        Ok(Stub::new(name, text))
    }

    fn failed(&self, path: &Path, reason: impl ToString) -> bunny_core::error::BunnyError {
        ApplicationError::StubLoadFailed {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
        .into()
    }
}
