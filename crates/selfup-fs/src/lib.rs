//! Filesystem side of an update: private staging directories and
//! backup-guarded replacement of installed files.

mod error;
mod plan;
mod replace;
mod staging;

pub use error::{Error, RestoreFailure, Result};
pub use plan::{BACKUP_SUFFIX, ReplaceReport, Replacement, ReplacementPlan};
pub use replace::replace_file;
pub use staging::StagingDir;
