use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::debug;

use crate::{Error, Result};

const STAGING_PREFIX: &str = "selfup-staging-";

/// A private, uniquely named directory owned by one update attempt.
///
/// The directory and everything in it are removed when the value is dropped,
/// whichever way the attempt ends. [`StagingDir::close`] does the same but
/// reports removal failures.
#[derive(Debug)]
pub struct StagingDir {
    dir: TempDir,
}

impl StagingDir {
    /// Create a staging directory under the system temp directory.
    pub fn new() -> Result<Self> {
        Self::new_in(std::env::temp_dir())
    }

    pub fn new_in(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let dir = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempdir_in(root)
            .map_err(|source| Error::Staging {
                root: root.to_path_buf(),
                source,
            })?;
        debug!(staging = %dir.path().display(), "created staging directory");
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn close(self) -> Result<()> {
        let path: PathBuf = self.dir.path().to_path_buf();
        self.dir
            .close()
            .map_err(|source| Error::StagingCleanup { path, source })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn removed_on_drop() {
        let root = tempdir().unwrap();
        let path = {
            let staging = StagingDir::new_in(root.path()).unwrap();
            std::fs::create_dir_all(staging.path().join("linux-amd64")).unwrap();
            std::fs::write(staging.path().join("linux-amd64/myapp"), "data").unwrap();
            staging.path().to_path_buf()
        };
        assert!(!path.exists());
        assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 0);
    }

    #[test]
    fn close_removes_directory() {
        let root = tempdir().unwrap();
        let staging = StagingDir::new_in(root.path()).unwrap();
        let path = staging.path().to_path_buf();
        assert!(path.starts_with(root.path()));
        assert!(path.is_dir());

        staging.close().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn attempts_get_distinct_directories() {
        let root = tempdir().unwrap();
        let first = StagingDir::new_in(root.path()).unwrap();
        let second = StagingDir::new_in(root.path()).unwrap();
        assert_ne!(first.path(), second.path());
    }

    #[test]
    fn missing_root_is_a_staging_error() {
        let root = tempdir().unwrap();
        let file = root.path().join("not-a-dir");
        std::fs::write(&file, "x").unwrap();

        let err = StagingDir::new_in(&file).unwrap_err();
        assert!(matches!(err, Error::Staging { ref root, .. } if root == &file));
    }
}
