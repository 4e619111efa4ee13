use std::fmt;
use std::path::{Component, Path, PathBuf};

use selfup_archive::{ArchiveFormat, FormatSelector};
use selfup_fetch::{Fetch, Url};
use selfup_platform::Platform;

use crate::error::ConfigError;

type Callback = Box<dyn Fn() + Send + Sync>;

/// Validated, read-only settings for one update attempt.
///
/// Built with [`UpdateConfig::builder`].
pub struct UpdateConfig {
    command_name: String,
    base_url: Url,
    version: String,
    format: FormatSelector,
    install_dir: PathBuf,
    extra_files: Vec<PathBuf>,
    platform: Platform,
    staging_root: Option<PathBuf>,
    fetcher: Box<dyn Fetch>,
    on_success: Option<Callback>,
}

impl UpdateConfig {
    pub fn builder(
        command_name: impl Into<String>,
        base_url: impl Into<String>,
        version: impl Into<String>,
    ) -> UpdateConfigBuilder {
        UpdateConfigBuilder {
            command_name: command_name.into(),
            base_url: base_url.into(),
            version: version.into(),
            format: None,
            install_dir: None,
            extra_files: Vec::new(),
            platform: None,
            staging_root: None,
            fetcher: None,
            on_success: None,
        }
    }

    pub fn command_name(&self) -> &str {
        &self.command_name
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn format_selector(&self) -> FormatSelector {
        self.format
    }

    /// Format after resolving `auto` against the target platform.
    pub fn archive_format(&self) -> ArchiveFormat {
        self.platform.archive_format(self.format)
    }

    /// `{os}-{arch}.{ext}`
    pub fn archive_name(&self) -> String {
        self.platform.archive_name(self.archive_format())
    }

    pub fn executable_name(&self) -> String {
        self.platform.executable_name(&self.command_name)
    }

    pub fn install_dir(&self) -> &Path {
        &self.install_dir
    }

    pub fn extra_files(&self) -> &[PathBuf] {
        &self.extra_files
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    pub fn staging_root(&self) -> Option<&Path> {
        self.staging_root.as_deref()
    }

    pub fn fetcher(&self) -> &dyn Fetch {
        self.fetcher.as_ref()
    }

    pub(crate) fn notify_success(&self) {
        if let Some(callback) = &self.on_success {
            callback();
        }
    }
}

impl fmt::Debug for UpdateConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateConfig")
            .field("command_name", &self.command_name)
            .field("base_url", &self.base_url.as_str())
            .field("version", &self.version)
            .field("format", &self.format)
            .field("install_dir", &self.install_dir)
            .field("extra_files", &self.extra_files)
            .field("platform", &self.platform)
            .field("staging_root", &self.staging_root)
            .field("on_success", &self.on_success.is_some())
            .finish_non_exhaustive()
    }
}

/// Builder for [`UpdateConfig`]. Nothing is validated until [`build`].
///
/// [`build`]: UpdateConfigBuilder::build
#[must_use]
pub struct UpdateConfigBuilder {
    command_name: String,
    base_url: String,
    version: String,
    format: Option<String>,
    install_dir: Option<PathBuf>,
    extra_files: Vec<PathBuf>,
    platform: Option<Platform>,
    staging_root: Option<PathBuf>,
    fetcher: Option<Box<dyn Fetch>>,
    on_success: Option<Callback>,
}

impl UpdateConfigBuilder {
    /// `auto`, `zip` or `tar.gz`. Defaults to `auto`.
    pub fn archive_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Directory [`Updater::update_installed`] replaces the executable in.
    /// Defaults to the directory of the running executable.
    ///
    /// [`Updater::update_installed`]: crate::Updater::update_installed
    pub fn install_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.install_dir = Some(dir.into());
        self
    }

    /// A file shipped next to the executable, relative to the release
    /// directory. Replaced relative to the target executable's directory.
    pub fn extra_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.extra_files.push(path.into());
        self
    }

    pub fn extra_files<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.extra_files.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Target platform. Defaults to the host.
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Directory staging directories are created in. Defaults to the system
    /// temp directory.
    pub fn staging_root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.staging_root = Some(dir.into());
        self
    }

    pub fn fetcher(mut self, fetcher: impl Fetch + 'static) -> Self {
        self.fetcher = Some(Box::new(fetcher));
        self
    }

    /// Called once after every file was replaced.
    pub fn on_success(mut self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_success = Some(Box::new(callback));
        self
    }

    pub fn build(self) -> Result<UpdateConfig, ConfigError> {
        validate_command_name(&self.command_name)?;

        let base_url = Url::parse(&self.base_url).map_err(|err| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason: err.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidBaseUrl {
                url: self.base_url,
                reason: "URL cannot carry a path".to_string(),
            });
        }

        let version = self.version;
        if version.trim().is_empty() {
            return Err(ConfigError::MissingVersion);
        }
        if version.trim() != version {
            return Err(ConfigError::InvalidVersion(version));
        }

        let format = match self.format.as_deref() {
            Some(selector) => selector.parse::<FormatSelector>()?,
            None => FormatSelector::Auto,
        };

        let install_dir = match self.install_dir {
            Some(dir) => dir,
            None => current_exe_dir().ok_or(ConfigError::MissingInstallDir)?,
        };

        let platform = match self.platform {
            Some(platform) => platform,
            None => Platform::current()?,
        };

        let extra_files = normalize_extra_files(
            &self.extra_files,
            &platform.executable_name(&self.command_name),
        )?;

        let fetcher = match self.fetcher {
            Some(fetcher) => fetcher,
            None => default_fetcher()?,
        };

        Ok(UpdateConfig {
            command_name: self.command_name,
            base_url,
            version,
            format,
            install_dir,
            extra_files,
            platform,
            staging_root: self.staging_root,
            fetcher,
            on_success: self.on_success,
        })
    }
}

fn validate_command_name(name: &str) -> Result<(), ConfigError> {
    let valid = !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && !name.chars().any(char::is_whitespace);
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidCommandName(name.to_string()))
    }
}

/// Normalize every extra file and reject any that would share a destination
/// with another one or with the executable.
fn normalize_extra_files(paths: &[PathBuf], executable: &str) -> Result<Vec<PathBuf>, ConfigError> {
    let mut normalized: Vec<PathBuf> = Vec::with_capacity(paths.len());
    for path in paths {
        let relative = normalize_extra_file(path)?;
        if relative == Path::new(executable) || normalized.contains(&relative) {
            return Err(ConfigError::DuplicateExtraFile(path.clone()));
        }
        normalized.push(relative);
    }
    Ok(normalized)
}

/// Extra files must stay inside both the release directory and the install
/// directory. `.` components are dropped.
fn normalize_extra_file(path: &Path) -> Result<PathBuf, ConfigError> {
    let mut relative = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(ConfigError::InvalidExtraFile(path.to_path_buf()));
            }
        }
    }
    if relative.as_os_str().is_empty() {
        return Err(ConfigError::InvalidExtraFile(path.to_path_buf()));
    }
    Ok(relative)
}

fn current_exe_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
}

#[cfg(feature = "reqwest")]
fn default_fetcher() -> Result<Box<dyn Fetch>, ConfigError> {
    let fetcher =
        selfup_fetch::ReqwestFetcher::new().map_err(|err| ConfigError::Transport(Box::new(err)))?;
    Ok(Box::new(fetcher))
}

#[cfg(not(feature = "reqwest"))]
fn default_fetcher() -> Result<Box<dyn Fetch>, ConfigError> {
    Err(ConfigError::MissingFetcher)
}
