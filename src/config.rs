//! Configuration read from the NZBGet post-processing environment
//!
//! NZBGet hands everything to a post-processing script through environment
//! variables: `NZBOP_*` for global options, `NZBPO_*` for this script's own
//! options and `NZBPP_*` for the download being processed. [`Config`] reads
//! them once, validates every value and exposes typed fields.

use crate::error::{Error, Result};
use crate::pattern::LeftoverPattern;
use std::convert::Infallible;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

/// Environment variable names used by the host
pub mod keys {
    /// Only present on NZBGet v18.0 and later
    pub const EXTENSIONS: &str = "NZBOP_EXTENSIONS";
    /// Host-wide unrar command
    pub const UNRAR_CMD: &str = "NZBOP_UNRARCMD";
    /// Script option: unrar override
    pub const UNRAR_PATH: &str = "NZBPO_UNRARPATH";
    /// Script option: leftover wildcard
    pub const RAR_EXTENSIONS: &str = "NZBPO_RAREXTENSIONS";
    /// Script option: seconds to wait before scanning
    pub const WAIT_TIME: &str = "NZBPO_WAITTIME";
    /// Script option: delete leftovers after a successful extract
    pub const DELETE_LEFTOVER: &str = "NZBPO_DELETELEFTOVER";
    /// Host option: built-in unpack
    pub const UNPACK: &str = "NZBOP_UNPACK";
    /// Host option: delete archives after unpack
    pub const UNPACK_CLEANUP_DISK: &str = "NZBOP_UNPACKCLEANUPDISK";
    /// Overall status of the download
    pub const TOTAL_STATUS: &str = "NZBPP_TOTALSTATUS";
    /// Destination directory of the download
    pub const DIRECTORY: &str = "NZBPP_DIRECTORY";

    /// Options that must be configured for this script, in check order
    pub const SCRIPT_OPTIONS: [&str; 5] = [
        UNRAR_CMD,
        UNRAR_PATH,
        RAR_EXTENSIONS,
        WAIT_TIME,
        DELETE_LEFTOVER,
    ];
}

/// Overall download status reported by the host (`NZBPP_TOTALSTATUS`)
///
/// Values this crate does not know are kept verbatim; like every status
/// other than `SUCCESS` they only mean there is nothing to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TotalStatus {
    /// Download and built-in post-processing succeeded
    Success,
    /// Completed with warnings (e.g. unpack skipped, par check failed softly)
    Warning,
    /// Download or built-in post-processing failed
    Failure,
    /// Deleted by the user or by duplicate handling
    Deleted,
    /// Any other value, e.g. from a newer host
    Other(String),
}

impl TotalStatus {
    /// Name as the host spells it
    pub fn as_str(&self) -> &str {
        match self {
            TotalStatus::Success => "SUCCESS",
            TotalStatus::Warning => "WARNING",
            TotalStatus::Failure => "FAILURE",
            TotalStatus::Deleted => "DELETED",
            TotalStatus::Other(raw) => raw,
        }
    }
}

impl FromStr for TotalStatus {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "SUCCESS" => TotalStatus::Success,
            "WARNING" => TotalStatus::Warning,
            "FAILURE" => TotalStatus::Failure,
            "DELETED" => TotalStatus::Deleted,
            other => TotalStatus::Other(other.to_string()),
        })
    }
}

impl std::fmt::Display for TotalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated post-processing configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Path or command name of the unrar executable
    pub unrar_path: PathBuf,

    /// Whether `unrar_path` came from the host's `UnrarCmd` setting
    pub unrar_from_host: bool,

    /// Wildcard selecting leftover volume parts in each directory
    pub leftover_pattern: LeftoverPattern,

    /// Delay before scanning, honored only with host disk cleanup enabled
    pub wait_time: Duration,

    /// Delete leftover parts after at least one successful extraction
    pub delete_leftover: bool,

    /// Overall status of the download
    pub total_status: TotalStatus,

    /// Download directory to scan; also the extraction destination
    pub directory: PathBuf,

    /// Host deletes archives after its own unpack (`UnpackCleanupDisk`)
    pub unpack_cleanup_disk: bool,
}

impl Config {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup
    ///
    /// Checks follow the host's expectations in order: v18 marker, script
    /// options, unpack feature, then download parameters. The first problem
    /// found is returned.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if lookup(keys::EXTENSIONS).is_none() {
            return Err(Error::config(
                keys::EXTENSIONS,
                "this script requires NZBGet v18.0 or later",
            ));
        }

        let required = |key: &str| {
            lookup(key).ok_or_else(|| {
                Error::config(
                    key,
                    format!(
                        "option {} is missing in NZBGet configuration, please check script settings",
                        option_name(key)
                    ),
                )
            })
        };

        for key in keys::SCRIPT_OPTIONS {
            required(key)?;
        }

        if !parse_yes_no(keys::UNPACK, &required(keys::UNPACK)?)? {
            return Err(Error::config(
                keys::UNPACK,
                "you must enable option \"Unpack\" in NZBGet configuration",
            ));
        }

        let unrar_override = required(keys::UNRAR_PATH)?;
        let (unrar_path, unrar_from_host) = if unrar_override.trim().is_empty() {
            debug!("UnrarPath setting is blank, using NZBGet UnrarCmd setting");
            (PathBuf::from(required(keys::UNRAR_CMD)?), true)
        } else {
            (PathBuf::from(unrar_override), false)
        };

        let pattern = required(keys::RAR_EXTENSIONS)?;
        let leftover_pattern = if pattern.trim().is_empty() {
            LeftoverPattern::default()
        } else {
            LeftoverPattern::new(pattern.trim())
                .map_err(|e| Error::config(keys::RAR_EXTENSIONS, e.to_string()))?
        };

        let wait_time = parse_wait_time(&required(keys::WAIT_TIME)?)?;
        let delete_leftover = parse_yes_no(keys::DELETE_LEFTOVER, &required(keys::DELETE_LEFTOVER)?)?;

        let Ok(total_status) = required(keys::TOTAL_STATUS)?.parse::<TotalStatus>();

        let directory = PathBuf::from(required(keys::DIRECTORY)?);
        if directory.as_os_str().is_empty() {
            return Err(Error::config(keys::DIRECTORY, "download directory is empty"));
        }

        let unpack_cleanup_disk = parse_yes_no(
            keys::UNPACK_CLEANUP_DISK,
            &required(keys::UNPACK_CLEANUP_DISK)?,
        )?;

        Ok(Self {
            unrar_path,
            unrar_from_host,
            leftover_pattern,
            wait_time,
            delete_leftover,
            total_status,
            directory,
            unpack_cleanup_disk,
        })
    }

    /// Delay to apply before scanning, if any
    ///
    /// The wait gives the host time to finish its own `UnpackCleanupDisk`
    /// pass, so it only applies when that feature is on.
    pub fn wait_before_scan(&self) -> Option<Duration> {
        (self.unpack_cleanup_disk && !self.wait_time.is_zero()).then_some(self.wait_time)
    }
}

/// Option name as shown in the host's settings (prefix stripped)
fn option_name(key: &str) -> &str {
    key.strip_prefix("NZBOP_")
        .or_else(|| key.strip_prefix("NZBPO_"))
        .or_else(|| key.strip_prefix("NZBPP_"))
        .unwrap_or(key)
}

fn parse_yes_no(key: &str, value: &str) -> Result<bool> {
    match value.trim() {
        "yes" => Ok(true),
        "no" => Ok(false),
        other => Err(Error::config(
            key,
            format!("option {} must be yes or no, got {other:?}", option_name(key)),
        )),
    }
}

/// Longest accepted pre-scan wait, one day
pub const MAX_WAIT_TIME: Duration = Duration::from_secs(24 * 60 * 60);

/// Whole seconds; a fractional part is accepted and truncated
fn parse_wait_time(value: &str) -> Result<Duration> {
    let invalid = || {
        Error::config(
            keys::WAIT_TIME,
            format!("option WaitTime must be a number of seconds, got {value:?}"),
        )
    };

    let secs: f64 = value.trim().parse().map_err(|_| invalid())?;
    if !secs.is_finite() || secs < 0.0 {
        return Err(invalid());
    }
    if secs >= MAX_WAIT_TIME.as_secs_f64() + 1.0 {
        return Err(Error::config(
            keys::WAIT_TIME,
            format!(
                "option WaitTime must be at most {} seconds, got {value:?}",
                MAX_WAIT_TIME.as_secs()
            ),
        ));
    }
    Ok(Duration::from_secs(secs.trunc() as u64))
}
