//! Archive extraction through an external tool
//!
//! The pipeline only needs "extract this archive into that directory, tell
//! me whether it worked". [`ArchiveExtractor`] is that seam; [`CliUnrar`]
//! implements it by running the `unrar` binary.

mod unrar;

pub use unrar::{CliUnrar, UNRAR_FLAGS};

use crate::error::Result;
use std::path::Path;

/// Extracts a single archive into a destination directory
pub trait ArchiveExtractor {
    /// Extract `archive` into `destination`
    ///
    /// Blocks until the extraction is finished. Any failure (tool missing,
    /// nonzero exit, killed) is returned as an error; the caller decides how
    /// to account for it.
    fn extract(&self, archive: &Path, destination: &Path) -> Result<()>;

    /// Short name for log lines
    fn name(&self) -> &str;
}

/// True when the file's extension is exactly `rar` or `RAR`
///
/// Mixed case such as `.Rar` is deliberately not an extraction candidate.
pub fn is_rar_archive(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("rar") | Some("RAR")
    )
}
