//! Scan-extract-cleanup pipeline
//!
//! Walks the download directory top-down. In every directory the leftover
//! wildcard is applied to the entry names first, then each `.rar`/`.RAR`
//! file is handed to the extractor, one at a time. Extraction always
//! targets the download root. Once the walk is done, leftovers are deleted
//! if at least one extraction succeeded and deletion is enabled.
//!
//! Everything is sequential: an extraction may create files that later
//! parts of the walk have to see.

use crate::cleanup::delete_leftovers;
use crate::config::{Config, TotalStatus};
use crate::extraction::{ArchiveExtractor, is_rar_archive};
use crate::pattern::LeftoverPattern;
use crate::types::{Outcome, RunReport};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

/// Run the whole post-processing flow for one download
///
/// Checks the download status and directory, waits if the host is still
/// cleaning up, then processes the tree. Never exits the process.
pub fn run<E>(config: &Config, extractor: &E) -> Outcome
where
    E: ArchiveExtractor + ?Sized,
{
    if config.total_status != TotalStatus::Success {
        warn!(
            status = %config.total_status,
            "NZBGet download TOTALSTATUS is not SUCCESS, exiting"
        );
        return Outcome::NoAction;
    }

    if !config.directory.is_dir() {
        warn!(
            directory = ?config.directory,
            "destination directory does not exist, exiting"
        );
        return Outcome::NoAction;
    }

    if let Some(wait) = config.wait_before_scan() {
        debug!(
            seconds = wait.as_secs(),
            "sleeping to give NZBGet time to finish UnpackCleanupDisk action"
        );
        std::thread::sleep(wait);
    }

    let report = process(
        &config.directory,
        &config.leftover_pattern,
        config.delete_leftover,
        extractor,
    );

    let outcome = report.outcome();
    info!(
        extracted = report.extracted.len(),
        failed = report.failed_extractions.len(),
        deleted = report.deleted.len(),
        delete_failed = report.failed_deletions.len(),
        exit_code = outcome.exit_code(),
        "post-processing finished"
    );
    outcome
}

/// Scan `root`, extract archives into it and optionally delete leftovers
pub fn process<E>(
    root: &Path,
    pattern: &LeftoverPattern,
    delete_leftover: bool,
    extractor: &E,
) -> RunReport
where
    E: ArchiveExtractor + ?Sized,
{
    let mut report = RunReport::default();

    debug!(?root, %pattern, "searching for rar/RAR files");
    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "skipping unreadable path during scan");
                continue;
            }
        };

        if entry.file_type().is_dir() {
            process_directory(entry.path(), root, pattern, extractor, &mut report);
        }
    }

    if !report.extract_occurred() {
        debug!("nothing was extracted, leaving files in place");
    } else if delete_leftover {
        delete_leftovers(&mut report);
    } else {
        debug!(
            leftovers = report.leftovers.len(),
            "DeleteLeftover disabled, keeping leftover files"
        );
    }

    report
}

/// Handle the immediate contents of one directory
fn process_directory<E>(
    dir: &Path,
    root: &Path,
    pattern: &LeftoverPattern,
    extractor: &E,
    report: &mut RunReport,
) where
    E: ArchiveExtractor + ?Sized,
{
    let mut entries: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name()
    {
        match entry {
            Ok(entry) => entries.push(entry.into_path()),
            Err(e) => warn!(?dir, error = %e, "failed to list directory entry during scan"),
        }
    }

    report
        .leftovers
        .extend(entries.iter().filter(|p| pattern.matches_path(p)).cloned());

    for archive in entries.iter().filter(|p| is_rar_archive(p) && !p.is_dir()) {
        let name = archive
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        info!(archive = %name, "extracting");

        match extractor.extract(archive, root) {
            Ok(()) => {
                info!(archive = %name, tool = extractor.name(), "extract successful");
                report.extracted.push(archive.clone());
            }
            Err(e) => {
                error!(archive = %name, error = %e, "unable to extract");
                report.failed_extractions.push(archive.clone());
                report.status.degrade();
            }
        }
    }
}
