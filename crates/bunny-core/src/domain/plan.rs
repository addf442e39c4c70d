//! Generation plans: the pure output of every generator.
//!
//! A plan is an ordered list of directories and files with their rendered
//! content. Nothing touches the disk until a writer applies it.

use std::collections::HashSet;

use serde::Serialize;

use crate::domain::common::RelativePath;
use crate::domain::error::DomainError;
use crate::domain::stub::StubName;

/// How a file is materialised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Write a new file; refuses to clobber an existing one without force.
    Create,
    /// Append to a file, creating it if needed. Never conflicts.
    Append,
}

/// One file a generator wants written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    pub path: RelativePath,
    pub mode: WriteMode,
    pub content: String,
    /// Stub the content was rendered from, if any.
    pub stub: Option<StubName>,
    /// Markers left in the content because no value was supplied.
    pub unresolved: Vec<String>,
}

impl GeneratedFile {
    pub fn create(path: RelativePath, content: impl Into<String>) -> Self {
        Self {
            path,
            mode: WriteMode::Create,
            content: content.into(),
            stub: None,
            unresolved: Vec::new(),
        }
    }

    pub fn append(path: RelativePath, content: impl Into<String>) -> Self {
        Self {
            mode: WriteMode::Append,
            ..Self::create(path, content)
        }
    }

    pub fn from_stub(mut self, stub: StubName, unresolved: Vec<String>) -> Self {
        self.stub = Some(stub);
        self.unresolved = unresolved;
        self
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }
}

/// Ordered set of directories and files to materialise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationPlan {
    directories: Vec<RelativePath>,
    files: Vec<GeneratedFile>,
    /// Extra information for the user, e.g. packages to install.
    notes: Vec<String>,
}

impl GenerationPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_directory(&mut self, path: RelativePath) {
        if !self.directories.contains(&path) {
            self.directories.push(path);
        }
    }

    pub fn add_file(&mut self, file: GeneratedFile) {
        self.files.push(file);
    }

    pub fn add_note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    pub fn with_directory(mut self, path: RelativePath) -> Self {
        self.add_directory(path);
        self
    }

    pub fn with_file(mut self, file: GeneratedFile) -> Self {
        self.add_file(file);
        self
    }

    /// Append another plan's entries after this one's.
    pub fn extend(&mut self, other: GenerationPlan) {
        for dir in other.directories {
            self.add_directory(dir);
        }
        self.files.extend(other.files);
        self.notes.extend(other.notes);
    }

    /// Keep only the files `keep` accepts. Directories and notes stay.
    pub fn retain_files(&mut self, keep: impl FnMut(&GeneratedFile) -> bool) {
        self.files.retain(keep);
    }

    pub fn directories(&self) -> &[RelativePath] {
        &self.directories
    }

    pub fn files(&self) -> &[GeneratedFile] {
        &self.files
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    pub fn is_empty(&self) -> bool {
        self.directories.is_empty() && self.files.is_empty()
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Reject plans that create the same file twice.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut seen = HashSet::new();
        for file in self.files.iter().filter(|f| f.mode == WriteMode::Create) {
            if !seen.insert(&file.path) {
                return Err(DomainError::DuplicatePath {
                    path: file.path.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_in_order() {
        let plan = GenerationPlan::new()
            .with_directory(RelativePath::new("app/Models"))
            .with_file(GeneratedFile::create(RelativePath::new("app/Models/Post.php"), "<?php"))
            .with_file(GeneratedFile::append(RelativePath::new("routes/web.php"), "\nRoute"));

        assert_eq!(plan.directories().len(), 1);
        assert_eq!(plan.file_count(), 2);
        assert_eq!(plan.files()[1].mode, WriteMode::Append);
        assert!(plan.validate().is_ok());
    }

    #[test]
    fn duplicate_creates_are_rejected() {
        let plan = GenerationPlan::new()
            .with_file(GeneratedFile::create(RelativePath::new("a.php"), ""))
            .with_file(GeneratedFile::create(RelativePath::new("a.php"), ""));
        assert!(matches!(plan.validate(), Err(DomainError::DuplicatePath { .. })));
    }

    #[test]
    fn repeated_appends_are_fine() {
        let plan = GenerationPlan::new()
            .with_file(GeneratedFile::append(RelativePath::new("routes/web.php"), "a"))
            .with_file(GeneratedFile::append(RelativePath::new("routes/web.php"), "b"));
        assert!(plan.validate().is_ok());
    }

    #[test]
    fn extend_dedups_directories() {
        let mut a = GenerationPlan::new().with_directory(RelativePath::new("x"));
        let b = GenerationPlan::new()
            .with_directory(RelativePath::new("x"))
            .with_directory(RelativePath::new("y"));
        a.extend(b);
        assert_eq!(a.directories().len(), 2);
    }

    #[test]
    fn retain_files_keeps_directories() {
        let mut plan = GenerationPlan::new()
            .with_directory(RelativePath::new("resources/views/blog"))
            .with_file(GeneratedFile::create(RelativePath::new("a.php"), ""))
            .with_file(GeneratedFile::create(RelativePath::new("b.php"), ""));
        plan.retain_files(|f| f.path.as_path() != std::path::Path::new("a.php"));
        assert_eq!(plan.file_count(), 1);
        assert_eq!(plan.directories().len(), 1);
    }
}
