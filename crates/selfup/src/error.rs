use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("failed to download archive: {0}")]
    Download(#[from] selfup_fetch::Error),

    #[error("failed to create staging directory: {0}")]
    Staging(#[source] selfup_fs::Error),

    #[error("failed to extract archive: {0}")]
    Extract(#[from] selfup_archive::Error),

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("failed to replace installed files: {0}")]
    Replace(#[source] selfup_fs::Error),

    #[error("invalid update configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to locate the running executable: {0}")]
    CurrentExe(#[source] io::Error),
}

/// Coarse classification of an [`UpdateError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Download,
    Staging,
    Extract,
    Validation,
    Replace,
    /// A swap failed and at least one file could not be restored.
    Rollback,
    Config,
    Environment,
}

impl UpdateError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Download(_) => ErrorKind::Download,
            Self::Staging(_) => ErrorKind::Staging,
            Self::Extract(_) => ErrorKind::Extract,
            Self::Validation(_) => ErrorKind::Validation,
            Self::Replace(err) if err.is_rollback_failure() => ErrorKind::Rollback,
            Self::Replace(_) => ErrorKind::Replace,
            Self::Config(_) => ErrorKind::Config,
            Self::CurrentExe(_) => ErrorKind::Environment,
        }
    }
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("executable '{name}' not found at '{path}'")]
    MissingExecutable { name: String, path: PathBuf },

    #[error("required file '{name}' not found at '{path}'")]
    MissingExtraFile { name: PathBuf, path: PathBuf },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid command name '{0}'")]
    InvalidCommandName(String),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("version must not be empty")]
    MissingVersion,

    #[error("version '{0}' has leading or trailing whitespace")]
    InvalidVersion(String),

    #[error(transparent)]
    InvalidFormat(#[from] selfup_archive::Error),

    #[error("extra file '{0}' must be a relative path inside the release directory")]
    InvalidExtraFile(PathBuf),

    #[error("extra file '{0}' is listed twice or names the executable")]
    DuplicateExtraFile(PathBuf),

    #[error("no install directory given and the running executable's directory is unknown")]
    MissingInstallDir,

    #[error("cannot detect host platform: {0}")]
    Platform(#[from] selfup_platform::Error),

    #[error("no fetch transport configured")]
    MissingFetcher,

    #[error("failed to build default transport: {0}")]
    Transport(#[source] selfup_fetch::BoxError),
}
