//! Architecture detection.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// CPU architectures release artifacts are published for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
    X86,
    X86_64,
    Arm,
    Arm64,
}

impl Arch {
    /// Token used in artifact names.
    pub fn as_str(self) -> &'static str {
        match self {
            Arch::X86 => "386",
            Arch::X86_64 => "amd64",
            Arch::Arm => "arm",
            Arch::Arm64 => "arm64",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Arch {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "386" | "x86" | "i386" | "i686" => Ok(Arch::X86),
            "amd64" | "x86_64" | "x64" => Ok(Arch::X86_64),
            "arm" | "armv6l" | "armv7" | "armv7l" => Ok(Arch::Arm),
            "arm64" | "aarch64" => Ok(Arch::Arm64),
            _ => Err(Error::UnknownArch(s.to_string())),
        }
    }
}

/// Architecture this binary was built for.
///
/// Not the kernel's: a 32-bit build on a 64-bit kernel must fetch 32-bit
/// artifacts.
pub fn detect() -> Result<Arch> {
    std::env::consts::ARCH.parse()
}
