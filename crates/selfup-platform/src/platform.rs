use std::fmt;
use std::str::FromStr;

use selfup_archive::{ArchiveFormat, FormatSelector};

use crate::error::{Error, Result};
use crate::{Arch, Os, arch, os};

/// An `{os}-{arch}` pair naming one family of release artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Platform {
    os: Os,
    arch: Arch,
}

impl Platform {
    pub const fn new(os: Os, arch: Arch) -> Self {
        Self { os, arch }
    }

    /// Platform of the running host.
    pub fn current() -> Result<Self> {
        Ok(Self::new(os::detect()?, arch::detect()?))
    }

    pub fn os(&self) -> Os {
        self.os
    }

    pub fn arch(&self) -> Arch {
        self.arch
    }

    /// `{os}-{arch}`, e.g. `linux-amd64`.
    ///
    /// This is also the name of the single top-level directory every release
    /// archive unpacks into.
    pub fn triple(&self) -> String {
        format!("{}-{}", self.os, self.arch)
    }

    /// Format used when the caller does not pick one: zip on Windows, gzip
    /// compressed tar everywhere else.
    pub fn default_archive_format(&self) -> ArchiveFormat {
        if self.os.is_windows() {
            ArchiveFormat::Zip
        } else {
            ArchiveFormat::TarGz
        }
    }

    pub fn archive_format(&self, selector: FormatSelector) -> ArchiveFormat {
        selector.resolve(self.default_archive_format())
    }

    /// `{os}-{arch}.{ext}`, e.g. `linux-amd64.tar.gz`.
    pub fn archive_name(&self, format: ArchiveFormat) -> String {
        format!("{}.{}", self.triple(), format.extension())
    }

    /// Name of the command's executable on this platform.
    pub fn executable_name(&self, command: &str) -> String {
        if self.os.is_windows() {
            format!("{command}.exe")
        } else {
            command.to_string()
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.os, self.arch)
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (os, arch) = s
            .split_once('-')
            .ok_or_else(|| Error::UnknownTriple(s.to_string()))?;
        Ok(Self::new(os.parse()?, arch.parse()?))
    }
}
