//! Archive extraction with path sanitization.
//!
//! # Architecture
//!
//! - `format.rs` - Supported formats and format selection
//! - `sanitize.rs` - Path sanitization (zip-slip prevention)
//! - `entry.rs` - Extraction report types
//! - `extract/` - Per-format implementations

pub use entry::{ArchiveReport, EntryKind, ExtractedEntry};
pub use error::{Error, Result};
pub use extract::{DEFAULT_DIR_MODE, DEFAULT_FILE_MODE, extract_bytes, extract_from_reader};
pub use format::{ArchiveFormat, FormatSelector};
pub use sanitize::sanitize_entry_path;

mod entry;
mod error;
pub mod extract;
mod format;
mod sanitize;
