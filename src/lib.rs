//! # extended-unrar
//!
//! NZBGet post-processing hook that finishes what the built-in unpacker
//! leaves behind: RAR archives nested inside a download.
//!
//! After NZBGet has unpacked a download, the hook walks the download
//! directory, runs `unrar` on every `.rar`/`.RAR` file it finds (extracting
//! flat into the download root) and, if anything was extracted, can delete
//! the old-style volume parts (`.r00`, `.r01`, ...) matched by a wildcard.
//!
//! ## Exit codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 93   | success |
//! | 94   | configuration error |
//! | 95   | nothing done, or finished with per-file failures |
//!
//! ## Library use
//!
//! ```no_run
//! use extended_unrar::{Config, extraction::CliUnrar, pipeline};
//!
//! let config = Config::from_env()?;
//! let unrar = CliUnrar::new(&config.unrar_path);
//! let outcome = pipeline::run(&config, &unrar);
//! std::process::exit(i32::from(outcome.exit_code()));
//! # Ok::<(), extended_unrar::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Leftover deletion
mod cleanup;
/// Configuration read from the host environment
pub mod config;
/// Error types
pub mod error;
/// Archive extraction through the external unrar tool
pub mod extraction;
/// Host-formatted log output
pub mod logging;
/// Wildcard matching for leftover parts
pub mod pattern;
/// Scan-extract-cleanup pipeline
pub mod pipeline;
/// Core types
pub mod types;

pub use config::{Config, TotalStatus};
pub use error::{Error, PostProcessError, Result};
pub use pattern::LeftoverPattern;
pub use types::{Outcome, RunReport, RunStatus};
