use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::{Serialize, Serializer};

use crate::domain::error::DomainError;

/// A path relative to the project root.
///
/// Generated files are always addressed relative to the root the writer is
/// given, never absolutely and never escaping it with `..`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelativePath(PathBuf);

fn check(path: &Path) -> Result<(), DomainError> {
    if path.is_absolute() || path.has_root() {
        return Err(DomainError::AbsolutePathNotAllowed {
            path: path.display().to_string(),
        });
    }
    if path.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(DomainError::PathEscapesRoot {
            path: path.display().to_string(),
        });
    }
    Ok(())
}

impl RelativePath {
    /// Create a relative path from a known-good literal.
    ///
    /// # Panics
    /// Panics if the path is absolute or contains `..`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if let Err(e) = check(&path) {
            panic!("{e}");
        }
        Self(path)
    }

    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        check(&path)?;
        Ok(Self(path))
    }

    pub fn join(&self, segment: impl AsRef<Path>) -> Result<Self, DomainError> {
        let segment = segment.as_ref();
        check(segment)?;
        Ok(Self(self.0.join(segment)))
    }

    pub fn parent(&self) -> Option<RelativePath> {
        self.0
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| Self(p.to_path_buf()))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Resolve against a root directory.
    pub fn under(&self, root: &Path) -> PathBuf {
        root.join(&self.0)
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Always show forward slashes so plans print the same everywhere.
        let shown: Vec<_> = self
            .0
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect();
        f.write_str(&shown.join("/"))
    }
}

impl Serialize for RelativePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_relative() {
        let p = RelativePath::new("app/Models/Post.php");
        assert_eq!(p.as_path(), Path::new("app/Models/Post.php"));
        assert_eq!(p.to_string(), "app/Models/Post.php");
    }

    #[test]
    #[should_panic]
    fn new_rejects_absolute() {
        RelativePath::new("/etc/passwd");
    }

    #[test]
    fn try_new_rejects_absolute_and_parent() {
        assert!(matches!(
            RelativePath::try_new("/etc/passwd"),
            Err(DomainError::AbsolutePathNotAllowed { .. })
        ));
        assert!(matches!(
            RelativePath::try_new("views/../../secret"),
            Err(DomainError::PathEscapesRoot { .. })
        ));
    }

    #[test]
    fn join_and_parent() {
        let base = RelativePath::new("resources/views");
        let joined = base.join("portfolio/index.blade.php").unwrap();
        assert_eq!(joined.to_string(), "resources/views/portfolio/index.blade.php");
        assert_eq!(
            joined.parent().map(|p| p.to_string()),
            Some("resources/views/portfolio".to_string())
        );
        assert!(base.join("/abs").is_err());
        assert_eq!(RelativePath::new("file.txt").parent(), None);
    }

    #[test]
    fn under_root() {
        let p = RelativePath::new("routes/web.php");
        assert_eq!(p.under(Path::new("/srv/app")), PathBuf::from("/srv/app/routes/web.php"));
    }
}
