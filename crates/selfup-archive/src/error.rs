use std::io;
use std::path::PathBuf;

use crate::ArchiveFormat;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unsupported archive format: {0}")]
    UnsupportedFormat(String),

    #[error("zip-slip attack detected: entry '{entry}' resolves to '{resolved}'")]
    ZipSlip { entry: PathBuf, resolved: PathBuf },

    #[error("entry path is not valid: {source}")]
    InvalidPath { source: io::Error },

    #[error("{format} archive is corrupted: {source}")]
    Corrupted {
        format: ArchiveFormat,
        source: io::Error,
    },

    #[error("failed to read archive data: {source}")]
    Read { source: io::Error },

    #[error("failed to extract '{path}': {source}")]
    ExtractionFailed { path: PathBuf, source: io::Error },

    #[error("failed to create directory: {path}: {source}")]
    DirectoryCreationFailed { path: PathBuf, source: io::Error },
}

impl Error {
    pub(crate) fn corrupted<E>(format: ArchiveFormat, err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Corrupted {
            format,
            source: io::Error::new(io::ErrorKind::InvalidData, err),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
