//! Download directory fixtures and a stand-in unrar executable

use std::fs;
use std::path::{Path, PathBuf};

/// Shell script standing in for unrar
///
/// Appends its arguments (one per line, followed by `--`) to the file named
/// by `FAKE_UNRAR_LOG`. Archives whose name contains "broken" fail with
/// exit code 3; every other archive "extracts" a marker file named after
/// the archive into the destination.
pub const FAKE_UNRAR_SCRIPT: &str = r#"#!/bin/sh
for arg in "$@"; do
    printf '%s\n' "$arg" >> "$FAKE_UNRAR_LOG"
done
printf -- '--\n' >> "$FAKE_UNRAR_LOG"
case "$(basename "$5")" in
    *broken*) exit 3 ;;
esac
: > "$6/$(basename "$5").extracted"
exit 0
"#;

/// Install the fake unrar into `dir` and return its path
#[cfg(unix)]
pub fn install_fake_unrar(dir: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("unrar");
    fs::write(&path, FAKE_UNRAR_SCRIPT).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

/// Create a file (and its parent directories) below `root`
pub fn touch(root: &Path, relative: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, b"rar volume").unwrap();
    path
}

/// One recorded unrar invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Arguments in order
    pub args: Vec<String>,
}

impl Invocation {
    /// The archive argument
    pub fn archive(&self) -> &str {
        &self.args[4]
    }
}

/// Parse the log written by the fake unrar
pub fn read_invocations(log: &Path) -> Vec<Invocation> {
    let Ok(content) = fs::read_to_string(log) else {
        return Vec::new();
    };

    let mut invocations = Vec::new();
    let mut current = Vec::new();
    for line in content.lines() {
        if line == "--" {
            invocations.push(Invocation {
                args: std::mem::take(&mut current),
            });
        } else {
            current.push(line.to_string());
        }
    }
    invocations
}
