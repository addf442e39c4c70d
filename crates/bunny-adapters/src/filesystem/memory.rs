//! In-memory filesystem adapter for testing and `--dry-run` previews.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use bunny_core::{
    application::{ApplicationError, ports::Filesystem},
    error::BunnyResult,
};

/// In-memory filesystem. Clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
}

impl MemoryFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path.as_ref()).cloned()
    }

    /// Every file path, sorted.
    pub fn all_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn clear(&self) -> BunnyResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        inner.files.clear();
        inner.directories.clear();
        Ok(())
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> BunnyResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            inner.directories.insert(current.clone());
        }

        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> BunnyResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(
                    ApplicationError::filesystem(path, "Parent directory does not exist").into(),
                );
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn append_file(&self, path: &Path, content: &str) -> BunnyResult<()> {
        let existing = self.read_file(path).unwrap_or_default();
        self.write_file(path, &(existing + content))
    }

    fn read_to_string(&self, path: &Path) -> BunnyResult<String> {
        self.read_file(path)
            .ok_or_else(|| ApplicationError::filesystem(path, "No such file").into())
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn remove_dir_all(&self, path: &Path) -> BunnyResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        if !inner.directories.contains(path) {
            return Err(ApplicationError::filesystem(path, "No such directory").into());
        }
        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));

        Ok(())
    }

    fn remove_file(&self, path: &Path) -> BunnyResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner
            .files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| ApplicationError::filesystem(path, "No such file").into())
    }

    fn list_files(&self, dir: &Path) -> BunnyResult<Vec<PathBuf>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        if !inner.directories.contains(dir) {
            return Err(ApplicationError::filesystem(dir, "No such directory").into());
        }
        Ok(inner
            .files
            .keys()
            .filter(|p| p.parent() == Some(dir))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_requires_parent() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("/a/b.txt"), "x").is_err());

        fs.create_dir_all(Path::new("/a")).unwrap();
        fs.write_file(Path::new("/a/b.txt"), "x").unwrap();
        assert_eq!(fs.read_file("/a/b.txt").as_deref(), Some("x"));
        assert!(fs.exists(Path::new("/a")));
    }

    #[test]
    fn remove_dir_all_drops_nested_entries() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("/v/blog/partials")).unwrap();
        fs.write_file(Path::new("/v/blog/index.php"), "").unwrap();
        fs.write_file(Path::new("/v/blog/partials/nav.php"), "").unwrap();

        fs.remove_dir_all(Path::new("/v/blog")).unwrap();
        assert!(!fs.exists(Path::new("/v/blog/partials")));
        assert!(fs.all_files().is_empty());
        assert!(fs.exists(Path::new("/v")));
    }

    #[test]
    fn list_files_only_direct_children() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("/m/sub")).unwrap();
        fs.write_file(Path::new("/m/2.php"), "").unwrap();
        fs.write_file(Path::new("/m/1.php"), "").unwrap();
        fs.write_file(Path::new("/m/sub/3.php"), "").unwrap();

        assert_eq!(
            fs.list_files(Path::new("/m")).unwrap(),
            vec![PathBuf::from("/m/1.php"), PathBuf::from("/m/2.php")]
        );
    }

    #[test]
    fn clones_share_state() {
        let fs = MemoryFilesystem::new();
        let other = fs.clone();
        fs.create_dir_all(Path::new("/x")).unwrap();
        other.append_file(Path::new("/x/log"), "a").unwrap();
        other.append_file(Path::new("/x/log"), "b").unwrap();
        assert_eq!(fs.read_file("/x/log").as_deref(), Some("ab"));
    }
}
