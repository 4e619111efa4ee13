use std::path::PathBuf;

use crate::ArchiveFormat;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

#[derive(Clone, Debug)]
pub struct ExtractedEntry {
    /// Name as stored in the archive.
    pub original_path: PathBuf,
    pub target_path: PathBuf,
    pub size: u64,
    /// Permission bits applied to `target_path`.
    pub mode: u32,
    pub kind: EntryKind,
}

impl ExtractedEntry {
    pub fn is_directory(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

#[derive(Clone, Debug)]
pub struct ArchiveReport {
    pub format: ArchiveFormat,
    pub entry_count: usize,
    pub total_bytes: u64,
    pub entries: Vec<ExtractedEntry>,
    /// Entries that were neither files nor directories.
    pub skipped: usize,
}

impl ArchiveReport {
    pub(crate) fn new(format: ArchiveFormat) -> Self {
        Self {
            format,
            entry_count: 0,
            total_bytes: 0,
            entries: Vec::new(),
            skipped: 0,
        }
    }

    pub(crate) fn push(&mut self, entry: ExtractedEntry) {
        self.entry_count += 1;
        self.total_bytes += entry.size;
        self.entries.push(entry);
    }

    pub fn files(&self) -> impl Iterator<Item = &ExtractedEntry> {
        self.entries.iter().filter(|e| e.kind == EntryKind::File)
    }
}
