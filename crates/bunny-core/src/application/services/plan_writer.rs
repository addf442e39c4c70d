//! Materialises a [`GenerationPlan`] through the [`Filesystem`] port.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error, info, instrument};

use crate::application::{ApplicationError, ports::Filesystem};
use crate::domain::{GenerationPlan, RelativePath, WriteMode};
use crate::error::BunnyResult;

/// Overwrite policy for `Create` entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overwrite {
    /// Fail with `FileExists` when a target already exists.
    Refuse,
    /// Replace existing files.
    Replace,
}

impl Overwrite {
    pub fn from_force(force: bool) -> Self {
        if force { Self::Replace } else { Self::Refuse }
    }
}

/// What a plan application did, path by path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WriteReport {
    pub directories: Vec<RelativePath>,
    pub created: Vec<RelativePath>,
    pub overwritten: Vec<RelativePath>,
    pub appended: Vec<RelativePath>,
}

impl WriteReport {
    pub fn file_count(&self) -> usize {
        self.created.len() + self.overwritten.len() + self.appended.len()
    }

    /// Every file touched, in write order groups.
    pub fn files(&self) -> impl Iterator<Item = &RelativePath> {
        self.created
            .iter()
            .chain(self.overwritten.iter())
            .chain(self.appended.iter())
    }
}

/// Writes plans below a project root.
///
/// Entries are applied in plan order. The first failure stops the run;
/// files already written stay on disk.
pub struct PlanWriter {
    filesystem: Arc<dyn Filesystem>,
    root: PathBuf,
}

impl PlanWriter {
    pub fn new(filesystem: Arc<dyn Filesystem>, root: impl Into<PathBuf>) -> Self {
        Self {
            filesystem,
            root: root.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Paths of `Create` entries that already exist on disk.
    pub fn conflicts(&self, plan: &GenerationPlan) -> Vec<RelativePath> {
        plan.files()
            .iter()
            .filter(|f| f.mode == WriteMode::Create)
            .filter(|f| self.filesystem.exists(&f.path.under(&self.root)))
            .map(|f| f.path.clone())
            .collect()
    }

    #[instrument(skip_all, fields(root = %self.root.display(), files = plan.file_count()))]
    pub fn apply(&self, plan: &GenerationPlan, overwrite: Overwrite) -> BunnyResult<WriteReport> {
        plan.validate()?;
        let mut report = WriteReport::default();

        for dir in plan.directories() {
            let path = dir.under(&self.root);
            self.filesystem.create_dir_all(&path).inspect_err(|e| {
                error!(path = %path.display(), error = %e, "Failed to create directory");
            })?;
            report.directories.push(dir.clone());
        }

        for file in plan.files() {
            let path = file.path.under(&self.root);

            if let Some(parent) = path.parent() {
                self.filesystem.create_dir_all(parent)?;
            }

            match file.mode {
                WriteMode::Append => {
                    self.filesystem.append_file(&path, &file.content)?;
                    debug!(path = %file.path, "Appended");
                    report.appended.push(file.path.clone());
                }
                WriteMode::Create => {
                    let existed = self.filesystem.exists(&path);
                    if existed && overwrite == Overwrite::Refuse {
                        error!(path = %file.path, "Refusing to overwrite existing file");
                        return Err(ApplicationError::FileExists { path }.into());
                    }
                    self.filesystem.write_file(&path, &file.content)?;
                    debug!(path = %file.path, existed, "Wrote");
                    if existed {
                        report.overwritten.push(file.path.clone());
                    } else {
                        report.created.push(file.path.clone());
                    }
                }
            }
        }

        info!(
            created = report.created.len(),
            overwritten = report.overwritten.len(),
            appended = report.appended.len(),
            "Plan applied"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockFilesystem;
    use crate::domain::GeneratedFile;
    use crate::error::BunnyError;
    use mockall::predicate::*;

    fn plan() -> GenerationPlan {
        GenerationPlan::new()
            .with_file(GeneratedFile::create(RelativePath::new("app/Models/Post.php"), "model"))
            .with_file(GeneratedFile::append(RelativePath::new("routes/web.php"), "\nroute"))
    }

    #[test]
    fn writes_and_appends_under_root() {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_exists().returning(|_| false);
        fs.expect_write_file()
            .with(eq(Path::new("/proj/app/Models/Post.php")), eq("model"))
            .times(1)
            .returning(|_, _| Ok(()));
        fs.expect_append_file()
            .with(eq(Path::new("/proj/routes/web.php")), eq("\nroute"))
            .times(1)
            .returning(|_, _| Ok(()));

        let writer = PlanWriter::new(Arc::new(fs), "/proj");
        let report = writer.apply(&plan(), Overwrite::Refuse).unwrap();
        assert_eq!(report.created.len(), 1);
        assert_eq!(report.appended.len(), 1);
        assert_eq!(report.file_count(), 2);
    }

    #[test]
    fn refuses_existing_file_without_force() {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_exists().returning(|_| true);
        fs.expect_write_file().never();
        fs.expect_append_file().never();

        let writer = PlanWriter::new(Arc::new(fs), "/proj");
        let err = writer.apply(&plan(), Overwrite::Refuse).unwrap_err();
        assert!(matches!(
            err,
            BunnyError::Application(ApplicationError::FileExists { .. })
        ));
    }

    #[test]
    fn force_overwrites_and_reports_it() {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_exists().returning(|_| true);
        fs.expect_write_file().times(1).returning(|_, _| Ok(()));
        fs.expect_append_file().times(1).returning(|_, _| Ok(()));

        let writer = PlanWriter::new(Arc::new(fs), "/proj");
        let report = writer.apply(&plan(), Overwrite::Replace).unwrap();
        assert_eq!(report.overwritten.len(), 1);
        assert!(report.created.is_empty());
    }

    #[test]
    fn halts_at_first_failure_without_cleanup() {
        let plan = GenerationPlan::new()
            .with_file(GeneratedFile::create(RelativePath::new("a.php"), "a"))
            .with_file(GeneratedFile::create(RelativePath::new("b.php"), "b"))
            .with_file(GeneratedFile::create(RelativePath::new("c.php"), "c"));

        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_exists().returning(|_| false);
        fs.expect_write_file()
            .with(eq(Path::new("/p/a.php")), always())
            .times(1)
            .returning(|_, _| Ok(()));
        fs.expect_write_file()
            .with(eq(Path::new("/p/b.php")), always())
            .times(1)
            .returning(|p, _| Err(ApplicationError::filesystem(p, "disk full").into()));
        fs.expect_remove_file().never();
        fs.expect_remove_dir_all().never();

        let writer = PlanWriter::new(Arc::new(fs), "/p");
        assert!(writer.apply(&plan, Overwrite::Refuse).is_err());
    }
}
