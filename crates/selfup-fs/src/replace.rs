use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Replace `destination` with the content and permission bits of `source`.
///
/// The new content is written to a temporary sibling of `destination` and
/// renamed over it, so readers see either the old file or the new one.
pub fn replace_file(source: &Path, destination: &Path) -> io::Result<()> {
    let content = fs::read(source)?;
    let permissions = fs::metadata(source)?.permissions();

    let parent = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = tempfile::Builder::new()
        .prefix(".selfup-")
        .suffix(".tmp")
        .tempfile_in(parent)?;
    staged.write_all(&content)?;
    staged.as_file().sync_all()?;
    fs::set_permissions(staged.path(), permissions)?;

    staged.persist(destination).map_err(|err| err.error)?;
    Ok(())
}
