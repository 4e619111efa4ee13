use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to create staging directory in '{root}': {source}")]
    Staging { root: PathBuf, source: io::Error },

    #[error("failed to remove staging directory '{path}': {source}")]
    StagingCleanup { path: PathBuf, source: io::Error },

    #[error("failed to resolve symbolic link '{path}': {source}")]
    Resolve { path: PathBuf, source: io::Error },

    #[error("failed to back up '{path}' to '{backup}': {source}")]
    Backup {
        path: PathBuf,
        backup: PathBuf,
        source: io::Error,
    },

    #[error("failed to replace '{path}': {source}")]
    Swap { path: PathBuf, source: io::Error },

    #[error(
        "failed to replace '{path}': {source}; rollback failed for {}",
        list(.failures)
    )]
    RollbackFailed {
        path: PathBuf,
        source: io::Error,
        failures: Vec<RestoreFailure>,
    },
}

impl Error {
    pub fn is_rollback_failure(&self) -> bool {
        matches!(self, Self::RollbackFailed { .. })
    }
}

/// A destination that could not be returned to its pre-update state.
#[derive(Debug)]
pub struct RestoreFailure {
    pub destination: PathBuf,
    /// Backup that should have been moved back, if one was taken.
    pub backup: Option<PathBuf>,
    pub source: io::Error,
}

impl fmt::Display for RestoreFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.backup {
            Some(backup) => write!(
                f,
                "'{}' (backup kept at '{}'): {}",
                self.destination.display(),
                backup.display(),
                self.source
            ),
            None => write!(f, "'{}': {}", self.destination.display(), self.source),
        }
    }
}

fn list(failures: &[RestoreFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, Error>;
