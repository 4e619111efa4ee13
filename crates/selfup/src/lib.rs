//! In-place self-update from versioned release archives.
//!
//! An update attempt downloads `{base}/{command}/{version}/{os}-{arch}.{ext}`,
//! unpacks it into a private staging directory, checks that the
//! `{os}-{arch}/` directory inside holds the executable and every configured
//! extra file, then swaps those files into place. Existing files are backed up
//! first and restored if any swap fails.
//!
//! ```no_run
//! use selfup::{UpdateConfig, Updater};
//!
//! # fn main() -> Result<(), selfup::UpdateError> {
//! let config = UpdateConfig::builder("myapp", "https://releases.example.com", "2.1.0")
//!     .extra_file("share/completions.bash")
//!     .on_success(|| println!("updated, restart to use the new version"))
//!     .build()?;
//! Updater::new(config).update_current_exe()?;
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod updater;
pub mod validate;

pub use config::{UpdateConfig, UpdateConfigBuilder};
pub use error::{ConfigError, ErrorKind, UpdateError, ValidationError};
pub use updater::Updater;
pub use validate::{StagedTree, validate_staged_tree};

pub use selfup_archive::{ArchiveFormat, FormatSelector};
pub use selfup_fetch::{BoxError, Fetch, FetchReader, Url, fetch_fn};
#[cfg(feature = "reqwest")]
pub use selfup_fetch::ReqwestFetcher;
pub use selfup_fs::ReplaceReport;
pub use selfup_platform::{Arch, Os, Platform, SharedLibrary, shared_library};
