use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{Error, RestoreFailure, Result};
use crate::replace::replace_file;

pub const BACKUP_SUFFIX: &str = ".backup";

/// One file swap: `source` takes the place of `destination`.
#[derive(Debug, Clone)]
pub struct Replacement {
    source: PathBuf,
    destination: PathBuf,
    backup: Option<PathBuf>,
}

impl Replacement {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            backup: None,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Backup taken of the previous destination, once the plan has run.
    pub fn backup(&self) -> Option<&Path> {
        self.backup.as_deref()
    }

    /// `{destination}.backup`
    pub fn backup_path(&self) -> PathBuf {
        let mut name: OsString = self.destination.as_os_str().to_owned();
        name.push(BACKUP_SUFFIX);
        PathBuf::from(name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReplaceReport {
    /// Destinations now holding the new content, in plan order.
    pub replaced: Vec<PathBuf>,
    /// Backups that could not be removed after the commit.
    pub leftover_backups: Vec<PathBuf>,
}

/// An ordered set of replacements applied as a unit.
///
/// Every existing destination is copied aside before the first swap. If a
/// swap fails, destinations are put back from those copies and files the
/// plan created are removed again.
///
/// Each destination appears once: pushing a destination that is already
/// planned (after lexical normalization) replaces its source in place. A
/// destination that is a symbolic link is resolved when the plan runs, so the
/// file it points to is replaced and the link itself is kept.
#[derive(Debug, Clone, Default)]
pub struct ReplacementPlan {
    records: Vec<Replacement>,
}

impl ReplacementPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(mut self, source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        self.push(source, destination);
        self
    }

    pub fn push(&mut self, source: impl Into<PathBuf>, destination: impl Into<PathBuf>) {
        let destination: PathBuf = destination.into().components().collect();
        self.insert(Replacement::new(source, destination));
    }

    fn insert(&mut self, record: Replacement) {
        match self
            .records
            .iter_mut()
            .find(|planned| planned.destination == record.destination)
        {
            Some(planned) => {
                debug!(
                    destination = %record.destination.display(),
                    "destination planned twice, keeping the later source"
                );
                planned.source = record.source;
            }
            None => self.records.push(record),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Replacement] {
        &self.records
    }

    pub fn execute(mut self) -> Result<ReplaceReport> {
        self.resolve_links()?;
        self.back_up()?;

        for index in 0..self.records.len() {
            let record = &self.records[index];
            debug!(
                source = %record.source.display(),
                destination = %record.destination.display(),
                "replacing file"
            );
            if let Err(source) = replace_file(&record.source, &record.destination) {
                return Err(self.roll_back(index, source));
            }
        }

        Ok(self.commit())
    }

    /// Point symlinked destinations at the files they link to.
    fn resolve_links(&mut self) -> Result<()> {
        let records = std::mem::take(&mut self.records);
        for mut record in records {
            let is_link = fs::symlink_metadata(&record.destination)
                .map(|meta| meta.file_type().is_symlink())
                .unwrap_or(false);
            if is_link {
                let resolved =
                    fs::canonicalize(&record.destination).map_err(|source| Error::Resolve {
                        path: record.destination.clone(),
                        source,
                    })?;
                debug!(
                    link = %record.destination.display(),
                    target = %resolved.display(),
                    "resolved symbolic link"
                );
                record.destination = resolved;
            }
            self.insert(record);
        }
        Ok(())
    }

    fn back_up(&mut self) -> Result<()> {
        for index in 0..self.records.len() {
            let destination = self.records[index].destination.clone();
            if !destination.exists() {
                continue;
            }

            let backup = self.records[index].backup_path();
            if let Err(source) = copy_backup(&destination, &backup) {
                self.discard_backups();
                return Err(Error::Backup {
                    path: destination,
                    backup,
                    source,
                });
            }
            debug!(
                destination = %destination.display(),
                backup = %backup.display(),
                "backed up"
            );
            self.records[index].backup = Some(backup);
        }
        Ok(())
    }

    /// Undo after the swap of record `failed` returned `source`.
    fn roll_back(&mut self, failed: usize, source: io::Error) -> Error {
        let path = self.records[failed].destination.clone();
        warn!(
            destination = %path.display(),
            error = %source,
            "replacement failed, rolling back"
        );

        let mut failures = Vec::new();
        for (index, record) in self.records.iter_mut().enumerate().rev() {
            match record.backup.take() {
                Some(backup) => {
                    if let Err(err) = fs::rename(&backup, &record.destination) {
                        failures.push(RestoreFailure {
                            destination: record.destination.clone(),
                            backup: Some(backup),
                            source: err,
                        });
                    }
                }
                // Swapped in by this plan with nothing there before.
                None if index < failed => {
                    if let Err(err) = fs::remove_file(&record.destination) {
                        if err.kind() != io::ErrorKind::NotFound {
                            failures.push(RestoreFailure {
                                destination: record.destination.clone(),
                                backup: None,
                                source: err,
                            });
                        }
                    }
                }
                None => {}
            }
        }

        if failures.is_empty() {
            info!(destination = %path.display(), "rollback complete");
            Error::Swap { path, source }
        } else {
            for failure in &failures {
                warn!(
                    destination = %failure.destination.display(),
                    error = %failure.source,
                    "could not restore file"
                );
            }
            Error::RollbackFailed {
                path,
                source,
                failures,
            }
        }
    }

    fn commit(mut self) -> ReplaceReport {
        let mut report = ReplaceReport::default();
        for record in &mut self.records {
            report.replaced.push(record.destination.clone());
            if let Some(backup) = record.backup.take() {
                if let Err(err) = fs::remove_file(&backup) {
                    warn!(backup = %backup.display(), error = %err, "failed to remove backup");
                    report.leftover_backups.push(backup);
                }
            }
        }
        report
    }

    fn discard_backups(&mut self) {
        for record in &mut self.records {
            if let Some(backup) = record.backup.take() {
                if let Err(err) = fs::remove_file(&backup) {
                    warn!(backup = %backup.display(), error = %err, "failed to remove backup");
                }
            }
        }
    }
}

/// Copy `path` to `backup`, content and permission bits.
fn copy_backup(path: &Path, backup: &Path) -> io::Result<()> {
    match fs::remove_file(backup) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    fs::copy(path, backup)?;
    Ok(())
}
