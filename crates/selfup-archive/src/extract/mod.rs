use std::fs;
use std::io::{self, Cursor, Read};
use std::path::Path;

use tracing::debug;

use crate::entry::ArchiveReport;
use crate::error::{Error, Result};
use crate::format::ArchiveFormat;

mod tar;
mod zip;

/// Mode applied to files whose entry carries no permission bits.
pub const DEFAULT_FILE_MODE: u32 = 0o644;
/// Mode applied to directories whose entry carries no permission bits, and to
/// every implicitly created parent directory.
pub const DEFAULT_DIR_MODE: u32 = 0o755;

const PERMISSION_BITS: u32 = 0o7777;

/// Read `reader` to the end and extract it into `destination`.
///
/// The whole stream is buffered first since zip needs to seek to its central
/// directory.
pub fn extract_from_reader<R: Read>(
    mut reader: R,
    format: ArchiveFormat,
    destination: &Path,
) -> Result<ArchiveReport> {
    let mut data = Vec::new();
    reader
        .read_to_end(&mut data)
        .map_err(|source| Error::Read { source })?;
    extract_bytes(&data, format, destination)
}

/// Extract an in-memory archive into `destination`.
///
/// Extraction stops at the first rejected or failing entry; whatever was
/// written before that stays in `destination`.
pub fn extract_bytes(data: &[u8], format: ArchiveFormat, destination: &Path) -> Result<ArchiveReport> {
    debug!(
        %format,
        bytes = data.len(),
        destination = %destination.display(),
        "extracting archive"
    );
    let report = match format {
        ArchiveFormat::Zip => zip::extract(Cursor::new(data), destination)?,
        ArchiveFormat::TarGz => tar::extract(data, destination)?,
    };
    debug!(
        entries = report.entry_count,
        bytes = report.total_bytes,
        skipped = report.skipped,
        "archive extracted"
    );
    Ok(report)
}

fn create_dir(path: &Path, mode: u32) -> Result<()> {
    create_dir_all(path)?;
    apply_mode(path, mode)
}

fn create_dir_all(path: &Path) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DEFAULT_DIR_MODE);
    }
    builder
        .create(path)
        .map_err(|source| Error::DirectoryCreationFailed {
            path: path.to_path_buf(),
            source,
        })
}

/// Create or truncate `path`, copy `content` into it and apply `mode`.
fn write_file<R: Read + ?Sized>(path: &Path, mode: u32, content: &mut R) -> Result<u64> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }

    let failed = |source: io::Error| Error::ExtractionFailed {
        path: path.to_path_buf(),
        source,
    };
    let mut file = fs::File::create(path).map_err(failed)?;
    let written = io::copy(content, &mut file).map_err(failed)?;
    drop(file);

    apply_mode(path, mode)?;
    Ok(written)
}

/// Set permission bits explicitly so the process umask does not apply.
fn apply_mode(path: &Path, mode: u32) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(mode & PERMISSION_BITS)).map_err(
            |source| Error::ExtractionFailed {
                path: path.to_path_buf(),
                source,
            },
        )?;
    }
    #[cfg(not(unix))]
    {
        let _ = (path, mode);
    }
    Ok(())
}
