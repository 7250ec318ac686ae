//! CLI-based RAR extraction using the external unrar binary

use super::ArchiveExtractor;
use crate::error::{Error, PostProcessError, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use tracing::debug;

/// Switches passed to unrar before the archive and destination
///
/// `e` extract without paths, `-idp` no progress indicator, `-ai` ignore
/// file attributes, `-o-` never overwrite existing files.
pub const UNRAR_FLAGS: [&str; 4] = ["e", "-idp", "-ai", "-o-"];

/// Extractor that runs the unrar executable once per archive
///
/// The child inherits stdout/stderr, so unrar's own messages land in the
/// host log next to ours.
///
/// # Examples
///
/// ```no_run
/// use extended_unrar::extraction::{ArchiveExtractor, CliUnrar};
/// use std::path::Path;
///
/// let unrar = CliUnrar::new("/usr/bin/unrar");
/// unrar.extract(Path::new("/downloads/Show/a.rar"), Path::new("/downloads/Show"))?;
/// # Ok::<(), extended_unrar::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct CliUnrar {
    binary_path: PathBuf,
}

impl CliUnrar {
    /// Create a handler with an explicit binary path or command name
    pub fn new(binary_path: impl Into<PathBuf>) -> Self {
        Self {
            binary_path: binary_path.into(),
        }
    }

    /// Resolve the binary for diagnostics
    ///
    /// Command names are looked up in PATH; explicit paths are checked for
    /// existence. `None` means launching will most likely fail.
    pub fn resolve(&self) -> Option<PathBuf> {
        if self.binary_path.components().count() > 1 {
            self.binary_path
                .is_file()
                .then(|| self.binary_path.clone())
        } else {
            which::which(&self.binary_path).ok()
        }
    }

    /// Build the command for one archive
    pub(crate) fn command(&self, archive: &Path, destination: &Path) -> Command {
        let mut cmd = Command::new(&self.binary_path);
        cmd.args(UNRAR_FLAGS)
            .arg(archive)
            .arg(destination)
            .stdin(Stdio::null());
        cmd
    }
}

impl ArchiveExtractor for CliUnrar {
    fn extract(&self, archive: &Path, destination: &Path) -> Result<()> {
        debug!(
            binary = ?self.binary_path,
            ?archive,
            ?destination,
            "running unrar"
        );

        let status = self
            .command(archive, destination)
            .status()
            .map_err(|e| Error::ExternalTool(format!("failed to execute unrar: {}", e)))?;

        check_status(archive, status)
    }

    fn name(&self) -> &str {
        "unrar"
    }
}

fn check_status(archive: &Path, status: ExitStatus) -> Result<()> {
    if status.success() {
        return Ok(());
    }

    let reason = match status.code() {
        Some(code) => format!("returncode {}", code),
        None => "terminated by signal".to_string(),
    };

    Err(PostProcessError::ExtractionFailed {
        archive: archive.to_path_buf(),
        reason,
    }
    .into())
}
