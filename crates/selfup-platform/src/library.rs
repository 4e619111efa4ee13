//! Shared library naming for companion native libraries.

use selfup_archive::ArchiveFormat;

use crate::error::{Error, Result};
use crate::{Arch, Os};

/// File name and archive format of a platform-specific shared library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedLibrary {
    pub file_name: String,
    pub format: ArchiveFormat,
}

/// Resolve the shared library built from `stem` for `os`/`arch`.
///
/// Windows builds are only published for amd64 and macOS builds for amd64
/// and arm64; every other combination outside Linux is unsupported.
pub fn shared_library(stem: &str, os: Os, arch: Arch) -> Result<SharedLibrary> {
    match (os, arch) {
        (Os::Windows, Arch::X86_64) => Ok(SharedLibrary {
            file_name: format!("{stem}{arch}.dll"),
            format: ArchiveFormat::Zip,
        }),
        (Os::Darwin, Arch::X86_64 | Arch::Arm64) => Ok(SharedLibrary {
            file_name: format!("darwin{stem}{arch}.dylib"),
            format: ArchiveFormat::TarGz,
        }),
        (Os::Linux, _) => Ok(SharedLibrary {
            file_name: format!("lib{stem}.so"),
            format: ArchiveFormat::TarGz,
        }),
        (os, arch) => Err(Error::Unsupported { os, arch }),
    }
}
