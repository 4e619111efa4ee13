//! Checks on an unpacked release before anything installed is touched.

use std::path::{Path, PathBuf};

use selfup_platform::Platform;

use crate::error::ValidationError;

/// Paths inside a staging directory that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedTree {
    /// `{staging}/{os}-{arch}`
    pub root: PathBuf,
    pub executable: PathBuf,
    /// `(relative path, staged path)` for every extra file, in configured order.
    pub extra_files: Vec<(PathBuf, PathBuf)>,
}

/// Confirm `{staging}/{os}-{arch}/` holds the command's executable and every
/// extra file.
pub fn validate_staged_tree(
    staging: &Path,
    platform: &Platform,
    command: &str,
    extra_files: &[PathBuf],
) -> Result<StagedTree, ValidationError> {
    let root = staging.join(platform.triple());

    let name = platform.executable_name(command);
    let executable = root.join(&name);
    if !executable.is_file() {
        return Err(ValidationError::MissingExecutable {
            name,
            path: executable,
        });
    }

    let extra_files = extra_files
        .iter()
        .map(|relative| {
            let staged = root.join(relative);
            if staged.is_file() {
                Ok((relative.clone(), staged))
            } else {
                Err(ValidationError::MissingExtraFile {
                    name: relative.clone(),
                    path: staged,
                })
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(StagedTree {
        root,
        executable,
        extra_files,
    })
}
