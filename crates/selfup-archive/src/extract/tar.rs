use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;
use tar::EntryType;
use tracing::debug;

use super::{DEFAULT_DIR_MODE, DEFAULT_FILE_MODE, create_dir, write_file};
use crate::entry::{ArchiveReport, EntryKind, ExtractedEntry};
use crate::error::{Error, Result};
use crate::format::ArchiveFormat;
use crate::sanitize::sanitize_entry_path;

pub(super) fn extract<R: Read>(reader: R, destination: &Path) -> Result<ArchiveReport> {
    let mut archive = tar::Archive::new(GzDecoder::new(reader));
    let mut report = ArchiveReport::new(ArchiveFormat::TarGz);

    let entries = archive
        .entries()
        .map_err(|e| Error::corrupted(ArchiveFormat::TarGz, e))?;

    for entry in entries {
        let mut entry = entry.map_err(|e| Error::corrupted(ArchiveFormat::TarGz, e))?;

        let original_path = entry
            .path()
            .map_err(|source| Error::InvalidPath { source })?
            .into_owned();
        let target_path = sanitize_entry_path(&original_path, destination)?;

        let (entry_type, header_mode) = {
            let header = entry.header();
            (header.entry_type(), header.mode().ok())
        };

        let extracted = match entry_type {
            EntryType::Directory => {
                let mode = header_mode.unwrap_or(DEFAULT_DIR_MODE) & 0o7777;
                create_dir(&target_path, mode)?;
                ExtractedEntry {
                    original_path,
                    target_path,
                    size: 0,
                    mode,
                    kind: EntryKind::Directory,
                }
            }
            EntryType::Regular | EntryType::Continuous => {
                let mode = header_mode.unwrap_or(DEFAULT_FILE_MODE) & 0o7777;
                let size = write_file(&target_path, mode, &mut entry)?;
                ExtractedEntry {
                    original_path,
                    target_path,
                    size,
                    mode,
                    kind: EntryKind::File,
                }
            }
            other => {
                debug!(
                    entry = %original_path.display(),
                    entry_type = ?other,
                    "skipping non-file entry"
                );
                report.skipped += 1;
                continue;
            }
        };
        report.push(extracted);
    }

    Ok(report)
}
