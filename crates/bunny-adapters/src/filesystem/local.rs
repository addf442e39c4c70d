//! Local filesystem adapter using std::fs.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use bunny_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{BunnyError, BunnyResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> BunnyResult<()> {
        fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> BunnyResult<()> {
        fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn append_file(&self, path: &Path, content: &str) -> BunnyResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| map_io_error(path, e, "open file for appending"))?;
        file.write_all(content.as_bytes())
            .map_err(|e| map_io_error(path, e, "append to file"))
    }

    fn read_to_string(&self, path: &Path) -> BunnyResult<String> {
        fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn remove_dir_all(&self, path: &Path) -> BunnyResult<()> {
        fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }

    fn remove_file(&self, path: &Path) -> BunnyResult<()> {
        fs::remove_file(path).map_err(|e| map_io_error(path, e, "remove file"))
    }

    fn list_files(&self, dir: &Path) -> BunnyResult<Vec<PathBuf>> {
        let entries = fs::read_dir(dir).map_err(|e| map_io_error(dir, e, "read directory"))?;
        let mut files = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| map_io_error(dir, e, "read directory entry"))?.path();
            if path.is_file() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> BunnyError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {operation}: {e}"),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn append_creates_then_extends() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("web.php");
        let fs = LocalFilesystem::new();

        fs.append_file(&path, "<?php\n").unwrap();
        fs.append_file(&path, "Route::get('/');\n").unwrap();

        assert_eq!(
            fs.read_to_string(&path).unwrap(),
            "<?php\nRoute::get('/');\n"
        );
    }

    #[test]
    fn list_files_is_sorted_and_skips_dirs() {
        let temp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        fs.write_file(&temp.path().join("b.php"), "").unwrap();
        fs.write_file(&temp.path().join("a.php"), "").unwrap();
        fs.create_dir_all(&temp.path().join("nested")).unwrap();

        let names: Vec<_> = fs
            .list_files(temp.path())
            .unwrap()
            .iter()
            .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect();
        assert_eq!(names, vec!["a.php", "b.php"]);
    }

    #[test]
    fn errors_carry_the_path() {
        let fs = LocalFilesystem::new();
        let err = fs.read_to_string(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.txt"));
    }
}
