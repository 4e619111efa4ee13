use std::path::{Path, PathBuf};

use selfup_archive::extract_bytes;
use selfup_fetch::{Downloader, artifact_url};
use selfup_fs::{ReplaceReport, ReplacementPlan, StagingDir};
use tracing::{debug, info, warn};

use crate::config::UpdateConfig;
use crate::error::UpdateError;
use crate::validate::{StagedTree, validate_staged_tree};

/// Runs update attempts for one [`UpdateConfig`].
///
/// Each attempt is download, extract, validate, replace, notify; the first
/// failing stage ends the attempt. The staging directory is removed however
/// the attempt ends.
#[derive(Debug)]
pub struct Updater {
    config: UpdateConfig,
}

impl Updater {
    pub fn new(config: UpdateConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &UpdateConfig {
        &self.config
    }

    /// Replace the running executable.
    pub fn update_current_exe(&self) -> Result<ReplaceReport, UpdateError> {
        let target = std::env::current_exe().map_err(UpdateError::CurrentExe)?;
        self.attempt_update(target)
    }

    /// Replace `{install_dir}/{executable}`.
    pub fn update_installed(&self) -> Result<ReplaceReport, UpdateError> {
        let target = self.config.install_dir().join(self.config.executable_name());
        self.attempt_update(target)
    }

    /// Update `target` and, next to it, every configured extra file.
    pub fn attempt_update(&self, target: impl AsRef<Path>) -> Result<ReplaceReport, UpdateError> {
        let target = target.as_ref();
        let config = &self.config;
        info!(
            command = config.command_name(),
            version = config.version(),
            platform = %config.platform(),
            target = %target.display(),
            "starting update"
        );

        let archive = self.download()?;

        let staging = match config.staging_root() {
            Some(root) => StagingDir::new_in(root),
            None => StagingDir::new(),
        }
        .map_err(UpdateError::Staging)?;

        let report = self.install_from(&archive, &staging, target)?;

        if let Err(err) = staging.close() {
            warn!(error = %err, "failed to remove staging directory");
        }

        info!(
            target = %target.display(),
            replaced = report.replaced.len(),
            "update complete"
        );
        config.notify_success();
        Ok(report)
    }

    fn download(&self) -> Result<Vec<u8>, UpdateError> {
        let config = &self.config;
        let url = artifact_url(
            config.base_url(),
            config.command_name(),
            config.version(),
            &config.archive_name(),
        )?;
        info!(%url, "downloading update");
        Ok(Downloader::new(config.fetcher()).download_bytes(&url)?)
    }

    fn install_from(
        &self,
        archive: &[u8],
        staging: &StagingDir,
        target: &Path,
    ) -> Result<ReplaceReport, UpdateError> {
        let config = &self.config;

        info!(staging = %staging.path().display(), "extracting update");
        let extracted = extract_bytes(archive, config.archive_format(), staging.path())?;
        debug!(
            entries = extracted.entry_count,
            bytes = extracted.total_bytes,
            "extracted"
        );

        let tree = validate_staged_tree(
            staging.path(),
            config.platform(),
            config.command_name(),
            config.extra_files(),
        )?;

        let plan = replacement_plan(&tree, target);
        info!(
            target = %target.display(),
            files = plan.len(),
            "replacing installed files"
        );
        plan.execute().map_err(UpdateError::Replace)
    }
}

/// The executable first, then every extra file relative to the target's
/// directory.
fn replacement_plan(tree: &StagedTree, target: &Path) -> ReplacementPlan {
    let install_dir: PathBuf = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut plan = ReplacementPlan::new().replace(&tree.executable, target);
    for (relative, staged) in &tree.extra_files {
        plan.push(staged, install_dir.join(relative));
    }
    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_puts_executable_first() {
        let tree = StagedTree {
            root: PathBuf::from("/stage/linux-amd64"),
            executable: PathBuf::from("/stage/linux-amd64/myapp"),
            extra_files: vec![
                (
                    PathBuf::from("share/theme.css"),
                    PathBuf::from("/stage/linux-amd64/share/theme.css"),
                ),
                (
                    PathBuf::from("lib/libplugin.so"),
                    PathBuf::from("/stage/linux-amd64/lib/libplugin.so"),
                ),
            ],
        };

        let plan = replacement_plan(&tree, Path::new("/opt/myapp/bin/myapp"));
        let pairs: Vec<_> = plan
            .records()
            .iter()
            .map(|r| (r.source().to_path_buf(), r.destination().to_path_buf()))
            .collect();

        assert_eq!(
            pairs,
            vec![
                (
                    PathBuf::from("/stage/linux-amd64/myapp"),
                    PathBuf::from("/opt/myapp/bin/myapp")
                ),
                (
                    PathBuf::from("/stage/linux-amd64/share/theme.css"),
                    PathBuf::from("/opt/myapp/bin/share/theme.css")
                ),
                (
                    PathBuf::from("/stage/linux-amd64/lib/libplugin.so"),
                    PathBuf::from("/opt/myapp/bin/lib/libplugin.so")
                ),
            ]
        );
    }

    #[test]
    fn bare_target_name_installs_into_current_dir() {
        let tree = StagedTree {
            root: PathBuf::from("/stage/linux-amd64"),
            executable: PathBuf::from("/stage/linux-amd64/myapp"),
            extra_files: vec![(PathBuf::from("a.txt"), PathBuf::from("/stage/linux-amd64/a.txt"))],
        };
        let plan = replacement_plan(&tree, Path::new("myapp"));
        assert_eq!(plan.records()[1].destination(), Path::new("./a.txt"));
    }
}
