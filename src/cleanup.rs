//! Cleanup stage for removing leftover archive parts

use crate::error::{Error, PostProcessError, Result};
use crate::types::RunReport;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Delete every leftover in `report.leftovers`, in order
///
/// Each failure is logged and marks the run degraded; the remaining files
/// are still attempted.
pub(crate) fn delete_leftovers(report: &mut RunReport) {
    info!("deleting leftover rar files");
    report.cleanup_ran = true;

    let leftovers = std::mem::take(&mut report.leftovers);
    for file in &leftovers {
        info!(?file, "deleting");
        match remove_leftover(file) {
            Ok(()) => report.deleted.push(file.clone()),
            Err(e) => {
                error!(?file, error = %e, "unable to delete leftover");
                report.failed_deletions.push(file.clone());
                report.status.degrade();
            }
        }
    }
    report.leftovers = leftovers;

    info!(
        deleted = report.deleted.len(),
        failed = report.failed_deletions.len(),
        "cleanup complete"
    );
}

fn remove_leftover(path: &Path) -> Result<()> {
    std::fs::remove_file(path).map_err(|e| {
        Error::from(PostProcessError::DeleteFailed {
            path: PathBuf::from(path),
            reason: e.to_string(),
        })
    })
}
