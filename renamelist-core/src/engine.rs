//! Positional pairing of folder files with replacement names, and the
//! rename/undo passes built on it.
//!
//! File `i` of the listing gets name `i` of the name list plus its own
//! extension. Only `min(files, names)` pairs are produced. Every rename in a
//! pass is attempted even if earlier ones failed, and nothing is rolled back.

use crate::error::RenameError;
use crate::files::FolderListing;
use crate::history::{OperationLog, RenamePair};
use crate::manifest::{remove_manifest, write_manifest};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Split a file name into stem and extension, extension including its dot.
///
/// Leading dots never start an extension, so `.bashrc` has none, while
/// `archive.tar.gz` splits into `archive.tar` and `.gz`.
pub fn split_extension(name: &str) -> (&str, &str) {
    let leading_dots = name.len() - name.trim_start_matches('.').len();
    match name.rfind('.') {
        Some(index) if index > leading_dots => (&name[..index], &name[index..]),
        _ => (name, ""),
    }
}

/// The extension of a file name including its dot, or "" if it has none
pub fn extension_of(name: &str) -> &str {
    split_extension(name).1
}

/// Replacement name for `original`: the new base-name verbatim plus the original extension
pub fn new_name_for(original: &str, base_name: &str) -> String {
    format!("{}{}", base_name, extension_of(original))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedRename {
    pub index: usize,
    pub original_name: String,
    pub new_name: String,
}

/// What a rename pass would do, computed without touching the disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenamePlan {
    pub folder: PathBuf,
    pub pairs: Vec<PlannedRename>,
    /// Trailing files left alone because the name list ran out
    pub not_renamed: Vec<String>,
    /// Names past the end of the file list
    pub unused_names: usize,
}

impl RenamePlan {
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Pair `files[i]` with `names[i]` for every index both lists share
pub fn plan_renames(folder: &Path, files: &[String], names: &[String]) -> RenamePlan {
    let pairs = files
        .iter()
        .zip(names)
        .enumerate()
        .map(|(index, (file, name))| PlannedRename {
            index,
            original_name: file.clone(),
            new_name: new_name_for(file, name),
        })
        .collect::<Vec<_>>();

    let not_renamed = files.iter().skip(names.len()).cloned().collect();
    let unused_names = names.len().saturating_sub(files.len());

    RenamePlan {
        folder: folder.to_path_buf(),
        pairs,
        not_renamed,
        unused_names,
    }
}

/// One pair that could not be renamed (or restored)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairFailure {
    pub original_name: String,
    pub new_name: String,
    /// Error kind, e.g. `already_exists` or `not_found`
    pub kind: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenameReport {
    pub folder: PathBuf,
    pub succeeded: Vec<RenamePair>,
    pub failures: Vec<PairFailure>,
    pub not_renamed: Vec<String>,
    pub unused_names: usize,
    /// Manifest written for this pass, if any
    pub manifest: Option<PathBuf>,
    /// Problems after the renames themselves succeeded (log or manifest writes)
    pub warnings: Vec<String>,
}

impl RenameReport {
    pub fn success_count(&self) -> usize {
        self.succeeded.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    pub fn failure_messages(&self) -> Vec<String> {
        self.failures.iter().map(|f| f.message.clone()).collect()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UndoReport {
    pub folder: PathBuf,
    pub restored: Vec<RenamePair>,
    pub failures: Vec<PairFailure>,
    /// Whether the batch was taken off the log
    pub batch_removed: bool,
    pub manifest_removed: bool,
    pub warnings: Vec<String>,
}

impl UndoReport {
    pub fn success_count(&self) -> usize {
        self.restored.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    pub fn failure_messages(&self) -> Vec<String> {
        self.failures.iter().map(|f| f.message.clone()).collect()
    }
}

/// Execute a plan against the listing's folder.
///
/// Succeeded pairs are committed to the log as one batch and written to the
/// folder's manifest. Failures of either write end up in `warnings`.
pub fn apply_plan(
    plan: &RenamePlan,
    listing: &mut FolderListing,
    log: &mut OperationLog,
) -> RenameReport {
    let mut report = RenameReport {
        folder: listing.dir().to_path_buf(),
        not_renamed: plan.not_renamed.clone(),
        unused_names: plan.unused_names,
        ..Default::default()
    };

    for pair in &plan.pairs {
        match listing.rename(&pair.original_name, &pair.new_name) {
            Ok(()) => {
                report
                    .succeeded
                    .push(RenamePair::new(&pair.original_name, &pair.new_name));
            },
            Err(e) => {
                debug!(from = %pair.original_name, to = %pair.new_name, error = %e, "rename failed");
                report.failures.push(PairFailure {
                    original_name: pair.original_name.clone(),
                    new_name: pair.new_name.clone(),
                    kind: e.kind().to_string(),
                    message: format!(
                        "Error renaming '{}' to '{}': {}",
                        pair.original_name, pair.new_name, e
                    ),
                });
            },
        }
    }

    info!(
        folder = %report.folder.display(),
        succeeded = report.success_count(),
        failed = report.failure_count(),
        not_renamed = report.not_renamed.len(),
        "rename pass finished"
    );

    if report.succeeded.is_empty() {
        return report;
    }

    if let Err(e) = log.append(&report.folder, report.succeeded.clone()) {
        warn!(error = %e, "could not record rename batch");
        report
            .warnings
            .push(format!("Could not save rename history: {}", e));
    }

    match write_manifest(&report.folder, &report.succeeded) {
        Ok(path) => report.manifest = Some(path),
        Err(e) => {
            warn!(error = %e, "could not write rename manifest");
            report
                .warnings
                .push(format!("Could not write rename manifest: {}", e));
        },
    }

    report
}

/// Reverse the most recent batch in the log.
///
/// Returns `Ok(None)` when there is nothing to undo, and `NotFound` when the
/// batch's folder no longer exists. The batch is only popped if at least one
/// file was restored; a partially failed undo is not retried.
pub fn undo_last(
    log: &mut OperationLog,
    current: Option<&mut FolderListing>,
) -> Result<Option<UndoReport>, RenameError> {
    let Some(batch) = log.last().cloned() else {
        return Ok(None);
    };

    // Opening the listing doubles as the "folder still exists" check.
    let mut listing = FolderListing::open(&batch.folder_path, &[])?;

    let mut report = UndoReport {
        folder: batch.folder_path.clone(),
        ..Default::default()
    };

    for pair in &batch.operations {
        match listing.rename(&pair.new_name, &pair.original_name) {
            Ok(()) => report.restored.push(pair.clone()),
            Err(e) => {
                let message = if e.is_not_found() {
                    format!("File not found: '{}'", pair.new_name)
                } else {
                    format!(
                        "Error restoring '{}' to '{}': {}",
                        pair.new_name, pair.original_name, e
                    )
                };
                debug!(from = %pair.new_name, to = %pair.original_name, error = %e, "undo failed");
                report.failures.push(PairFailure {
                    original_name: pair.original_name.clone(),
                    new_name: pair.new_name.clone(),
                    kind: e.kind().to_string(),
                    message,
                });
            },
        }
    }

    info!(
        folder = %report.folder.display(),
        restored = report.success_count(),
        failed = report.failure_count(),
        "undo finished"
    );

    if report.restored.is_empty() {
        return Ok(Some(report));
    }

    report.batch_removed = true;
    if let Err(e) = log.pop_last() {
        warn!(error = %e, "could not save rename history after undo");
        report
            .warnings
            .push(format!("Could not save rename history: {}", e));
    }

    match remove_manifest(&report.folder) {
        Ok(removed) => report.manifest_removed = removed,
        Err(e) => {
            warn!(error = %e, "could not remove rename manifest");
            report
                .warnings
                .push(format!("Could not remove rename manifest: {}", e));
        },
    }

    if let Some(current) = current {
        if same_folder(current.dir(), &report.folder) {
            if let Err(e) = current.reload() {
                report
                    .warnings
                    .push(format!("Could not reload folder: {}", e));
            }
        }
    }

    Ok(Some(report))
}

fn same_folder(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
