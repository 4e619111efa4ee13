//! Operating system detection.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Operating systems release artifacts are published for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Os {
    Linux,
    Darwin,
    Windows,
    FreeBsd,
}

impl Os {
    /// Token used in artifact names.
    pub fn as_str(self) -> &'static str {
        match self {
            Os::Linux => "linux",
            Os::Darwin => "darwin",
            Os::Windows => "windows",
            Os::FreeBsd => "freebsd",
        }
    }

    pub fn is_windows(self) -> bool {
        self == Os::Windows
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Os {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "linux" => Ok(Os::Linux),
            "darwin" | "macos" | "osx" => Ok(Os::Darwin),
            "windows" => Ok(Os::Windows),
            "freebsd" => Ok(Os::FreeBsd),
            _ => Err(Error::UnknownOs(s.to_string())),
        }
    }
}

/// Detect the operating system this binary was built for.
pub fn detect() -> Result<Os> {
    std::env::consts::OS.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_tokens_and_aliases() {
        assert_eq!("linux".parse::<Os>().unwrap(), Os::Linux);
        assert_eq!("macos".parse::<Os>().unwrap(), Os::Darwin);
        assert_eq!("Darwin".parse::<Os>().unwrap(), Os::Darwin);
        assert_eq!("windows".parse::<Os>().unwrap(), Os::Windows);
        assert!(matches!("plan9".parse::<Os>(), Err(Error::UnknownOs(_))));
    }

    #[test]
    fn display_matches_artifact_token() {
        for os in [Os::Linux, Os::Darwin, Os::Windows, Os::FreeBsd] {
            assert_eq!(os.to_string().parse::<Os>().unwrap(), os);
        }
    }

    #[test]
    #[cfg(any(target_os = "linux", target_os = "macos", target_os = "windows"))]
    fn detects_build_target() {
        let os = detect().unwrap();
        assert_eq!(os.is_windows(), cfg!(windows));
    }
}
