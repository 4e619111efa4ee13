use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{DEFAULT_DIR_MODE, DEFAULT_FILE_MODE, create_dir, write_file};
use crate::entry::{ArchiveReport, EntryKind, ExtractedEntry};
use crate::error::{Error, Result};
use crate::format::ArchiveFormat;
use crate::sanitize::sanitize_entry_path;

const S_IFMT: u32 = 0o170000;
const S_IFLNK: u32 = 0o120000;

pub(super) fn extract<R: Read + Seek>(reader: R, destination: &Path) -> Result<ArchiveReport> {
    let mut archive = zip::ZipArchive::new(reader)
        .map_err(|e| Error::corrupted(ArchiveFormat::Zip, e))?;
    let mut report = ArchiveReport::new(ArchiveFormat::Zip);

    for index in 0..archive.len() {
        let mut file = archive
            .by_index(index)
            .map_err(|e| Error::corrupted(ArchiveFormat::Zip, e))?;

        // The raw name, not `enclosed_name`: unsafe names must fail the
        // extraction rather than be dropped.
        let original_path = PathBuf::from(file.name());
        let target_path = sanitize_entry_path(&original_path, destination)?;
        let unix_mode = file.unix_mode();

        if unix_mode.is_some_and(|mode| mode & S_IFMT == S_IFLNK) {
            debug!(entry = %original_path.display(), "skipping symlink entry");
            report.skipped += 1;
            continue;
        }

        let entry = if file.is_dir() {
            let mode = unix_mode.unwrap_or(DEFAULT_DIR_MODE) & 0o7777;
            create_dir(&target_path, mode)?;
            ExtractedEntry {
                original_path,
                target_path,
                size: 0,
                mode,
                kind: EntryKind::Directory,
            }
        } else {
            let mode = unix_mode.unwrap_or(DEFAULT_FILE_MODE) & 0o7777;
            let size = write_file(&target_path, mode, &mut file)?;
            ExtractedEntry {
                original_path,
                target_path,
                size,
                mode,
                kind: EntryKind::File,
            }
        };
        report.push(entry);
    }

    Ok(report)
}
