use thiserror::Error;

use crate::{Arch, Os};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown architecture: {0}")]
    UnknownArch(String),

    #[error("unknown operating system: {0}")]
    UnknownOs(String),

    #[error("unknown platform triple: {0}")]
    UnknownTriple(String),

    #[error("unsupported architecture {arch} for {os}")]
    Unsupported { os: Os, arch: Arch },
}
