use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Container formats release archives are published in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArchiveFormat {
    Zip,
    /// Gzip-compressed tar.
    TarGz,
}

impl ArchiveFormat {
    /// File extension, without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Zip => "zip",
            Self::TarGz => "tar.gz",
        }
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ArchiveFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "zip" => Ok(Self::Zip),
            "tar.gz" => Ok(Self::TarGz),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Format requested by configuration: a fixed format, or whatever the target
/// platform publishes by default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormatSelector {
    #[default]
    Auto,
    Fixed(ArchiveFormat),
}

impl FormatSelector {
    pub fn resolve(self, platform_default: ArchiveFormat) -> ArchiveFormat {
        match self {
            Self::Auto => platform_default,
            Self::Fixed(format) => format,
        }
    }
}

impl From<ArchiveFormat> for FormatSelector {
    fn from(format: ArchiveFormat) -> Self {
        Self::Fixed(format)
    }
}

impl FromStr for FormatSelector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "" | "auto" => Ok(Self::Auto),
            other => other.parse().map(Self::Fixed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_parsing() {
        assert_eq!("".parse::<FormatSelector>().unwrap(), FormatSelector::Auto);
        assert_eq!(
            "auto".parse::<FormatSelector>().unwrap(),
            FormatSelector::Auto
        );
        assert_eq!(
            "zip".parse::<FormatSelector>().unwrap(),
            FormatSelector::Fixed(ArchiveFormat::Zip)
        );
        assert_eq!(
            "tar.gz".parse::<FormatSelector>().unwrap(),
            FormatSelector::Fixed(ArchiveFormat::TarGz)
        );
        assert!(matches!(
            "rar".parse::<FormatSelector>(),
            Err(Error::UnsupportedFormat(s)) if s == "rar"
        ));
    }

    #[test]
    fn resolve_uses_default_only_for_auto() {
        assert_eq!(
            FormatSelector::Auto.resolve(ArchiveFormat::Zip),
            ArchiveFormat::Zip
        );
        assert_eq!(
            FormatSelector::from(ArchiveFormat::TarGz).resolve(ArchiveFormat::Zip),
            ArchiveFormat::TarGz
        );
    }
}
