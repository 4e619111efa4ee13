//! Host platform detection and artifact naming.
//!
//! Release archives are published per `{os}-{arch}` triple (`linux-amd64`,
//! `darwin-arm64`, `windows-amd64`, ...). [`Platform`] derives every name the
//! update pipeline needs from that triple: the archive file name, the
//! top-level directory inside the archive and the executable name.

pub use arch::Arch;
pub use error::{Error, Result};
pub use library::{SharedLibrary, shared_library};
pub use os::Os;
pub use platform::Platform;

pub mod arch;
mod error;
mod library;
pub mod os;
mod platform;
