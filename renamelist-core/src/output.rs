use crate::engine::{RenamePlan, RenameReport, UndoReport};
use crate::history::{RenameBatch, RenamePair};
use crate::preview::ContentPreview;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt::Write;
use std::path::PathBuf;

/// How many detailed messages a report lists before summarizing the rest
pub const MAX_LISTED_MESSAGES: usize = 10;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

/// Indented list of at most `limit` items, then "... and N more not shown"
pub fn format_capped_list(items: &[String], limit: usize) -> String {
    let mut output = String::new();
    for item in items.iter().take(limit) {
        writeln!(output, "  {}", item).unwrap();
    }
    if items.len() > limit {
        writeln!(output, "  ... and {} more not shown", items.len() - limit).unwrap();
    }
    output
}

/// Result of a plan operation
#[derive(Debug, Serialize, Deserialize)]
pub struct PlanResult {
    pub names_file: PathBuf,
    pub plan: RenamePlan,
    pub total_files: usize,
    pub total_names: usize,
}

/// Result of a rename operation
#[derive(Debug, Serialize, Deserialize)]
pub struct RenameResult {
    pub dry_run: bool,
    pub report: RenameReport,
}

/// Result of an undo operation; `report` is empty when there was nothing to undo
#[derive(Debug, Serialize, Deserialize)]
pub struct UndoResult {
    pub report: Option<UndoReport>,
}

/// Result of a status operation
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResult {
    pub history_path: PathBuf,
    pub history_count: usize,
    pub last_batch: Option<HistoryItem>,
}

/// Result of a history operation
#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResult {
    pub entries: Vec<HistoryItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryItem {
    pub timestamp: String,
    pub folder_path: PathBuf,
    pub renames: usize,
    pub operations: Vec<RenamePair>,
}

impl From<&RenameBatch> for HistoryItem {
    fn from(batch: &RenameBatch) -> Self {
        Self {
            timestamp: batch.timestamp.clone(),
            folder_path: batch.folder_path.clone(),
            renames: batch.operations.len(),
            operations: batch.operations.clone(),
        }
    }
}

/// Result of clearing the operation log
#[derive(Debug, Serialize, Deserialize)]
pub struct ClearResult {
    pub history_path: PathBuf,
    pub batches_removed: usize,
}

/// Result of a command on the name file
#[derive(Debug, Serialize, Deserialize)]
pub struct NamesResult {
    pub path: PathBuf,
    /// What changed, e.g. "Removed 2 names"; `None` for read-only commands
    pub message: Option<String>,
    /// Names shown, which is a subset of the list when filtering
    pub names: Vec<String>,
    pub total: usize,
}

/// Result of listing or reordering a folder
#[derive(Debug, Serialize, Deserialize)]
pub struct FilesResult {
    pub folder: PathBuf,
    pub extensions: Vec<String>,
    pub message: Option<String>,
    pub files: Vec<String>,
    pub total: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileAction {
    Renamed,
    Deleted,
    Located,
    Opened,
}

/// Result of a single-file command
#[derive(Debug, Serialize, Deserialize)]
pub struct FileActionResult {
    pub action: FileAction,
    pub folder: PathBuf,
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_name: Option<String>,
}

/// Result of a content preview
#[derive(Debug, Serialize)]
pub struct PreviewResult {
    pub path: PathBuf,
    pub preview: ContentPreview,
}

/// Result of a version command
#[derive(Debug, Serialize, Deserialize)]
pub struct VersionResult {
    pub name: String,
    pub version: String,
}

/// Trait for formatting output in different formats
pub trait OutputFormatter {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }
    fn format_json(&self) -> String;
    fn format_summary(&self) -> String;
}

impl OutputFormatter for PlanResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "plan",
            "names_file": self.names_file,
            "folder": self.plan.folder,
            "summary": {
                "files": self.total_files,
                "names": self.total_names,
                "renames": self.plan.pairs.len(),
                "not_renamed": self.plan.not_renamed.len(),
                "unused_names": self.plan.unused_names,
            },
            "plan": self.plan,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = format!(
            "{} files, {} names: {} would be renamed",
            self.total_files,
            self.total_names,
            self.plan.pairs.len()
        );

        if !self.plan.not_renamed.is_empty() {
            write!(output, ", {} left as they are", self.plan.not_renamed.len()).unwrap();
        }
        output.push('\n');

        if self.plan.unused_names > 0 {
            writeln!(output, "{} names have no file to go to", self.plan.unused_names).unwrap();
        }

        output
    }
}

impl OutputFormatter for RenameResult {
    fn format_json(&self) -> String {
        let report = &self.report;
        serde_json::to_string(&json!({
            "success": report.failures.is_empty(),
            "operation": "rename",
            "dry_run": self.dry_run,
            "folder": report.folder,
            "summary": {
                "renamed": report.success_count(),
                "failed": report.failure_count(),
                "not_renamed": report.not_renamed.len(),
                "unused_names": report.unused_names,
            },
            "renamed": report.succeeded,
            "failures": report.failures,
            "manifest": report.manifest,
            "warnings": report.warnings,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let report = &self.report;
        let mut output = String::new();

        if self.dry_run {
            writeln!(
                output,
                "Dry run: {} files would be renamed in {}",
                report.success_count(),
                report.folder.display()
            )
            .unwrap();
            return output;
        }

        if report.succeeded.is_empty() && report.failures.is_empty() {
            output.push_str("No files to rename\n");
            return output;
        }

        writeln!(output, "✓ Renamed {} files", report.success_count()).unwrap();

        if !report.failures.is_empty() {
            writeln!(
                output,
                "✗ Errors occurred with {} files:",
                report.failure_count()
            )
            .unwrap();
            output.push_str(&format_capped_list(
                &report.failure_messages(),
                MAX_LISTED_MESSAGES,
            ));
        }

        if !report.not_renamed.is_empty() {
            writeln!(
                output,
                "{} files were left as they are (no name left for them)",
                report.not_renamed.len()
            )
            .unwrap();
            output.push_str(&format_capped_list(&report.not_renamed, MAX_LISTED_MESSAGES));
        }

        for warning in &report.warnings {
            writeln!(output, "Warning: {}", warning).unwrap();
        }

        if let Some(manifest) = &report.manifest {
            writeln!(output, "Manifest: {}", manifest.display()).unwrap();
        }

        if !report.succeeded.is_empty() {
            output.push_str("Undo with: renamelist undo\n");
        }

        output
    }
}

impl OutputFormatter for UndoResult {
    fn format_json(&self) -> String {
        let Some(report) = &self.report else {
            return serde_json::to_string(&json!({
                "success": true,
                "operation": "undo",
                "undone": false,
            }))
            .unwrap_or_default();
        };

        serde_json::to_string(&json!({
            "success": report.failures.is_empty(),
            "operation": "undo",
            "undone": report.batch_removed,
            "folder": report.folder,
            "summary": {
                "restored": report.success_count(),
                "failed": report.failure_count(),
            },
            "restored": report.restored,
            "failures": report.failures,
            "manifest_removed": report.manifest_removed,
            "warnings": report.warnings,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let Some(report) = &self.report else {
            return "Nothing to undo\n".to_string();
        };

        let mut output = String::new();

        if report.success_count() > 0 {
            writeln!(
                output,
                "✓ Restored {} files in {}",
                report.success_count(),
                report.folder.display()
            )
            .unwrap();
        }

        if !report.failures.is_empty() {
            writeln!(
                output,
                "✗ Errors occurred with {} files:",
                report.failure_count()
            )
            .unwrap();
            output.push_str(&format_capped_list(
                &report.failure_messages(),
                MAX_LISTED_MESSAGES,
            ));
        }

        if !report.batch_removed {
            output.push_str("No files were restored; the batch stays in the history\n");
        }

        if report.manifest_removed {
            output.push_str("✓ Removed rename manifest\n");
        }

        for warning in &report.warnings {
            writeln!(output, "Warning: {}", warning).unwrap();
        }

        output
    }
}

impl OutputFormatter for StatusResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&self).unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();

        writeln!(output, "History: {}", self.history_path.display()).unwrap();
        writeln!(output, "History entries: {}", self.history_count).unwrap();

        match &self.last_batch {
            Some(batch) => {
                writeln!(
                    output,
                    "Last rename: {} files in {} at {}",
                    batch.renames,
                    batch.folder_path.display(),
                    batch.timestamp
                )
                .unwrap();
            },
            None => output.push_str("Nothing to undo\n"),
        }

        output
    }
}

impl OutputFormatter for HistoryResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "entries": self.entries
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        if self.entries.is_empty() {
            return "No history entries found".to_string();
        }

        let mut output = String::new();
        for (i, entry) in self.entries.iter().enumerate() {
            write!(
                output,
                "{} ({} renames) {}",
                entry.folder_path.display(),
                entry.renames,
                entry.timestamp
            )
            .unwrap();

            if i == 0 {
                output.push_str(" [LATEST]");
            }
            output.push('\n');
        }

        output
    }
}

impl OutputFormatter for ClearResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "clear_history",
            "history_path": self.history_path,
            "batches_removed": self.batches_removed,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        format!(
            "✓ Cleared {} history entries from {}\n",
            self.batches_removed,
            self.history_path.display()
        )
    }
}

fn numbered(items: &[String]) -> String {
    let width = items.len().to_string().len();
    let mut output = String::new();
    for (i, item) in items.iter().enumerate() {
        writeln!(output, "{:>width$}  {}", i + 1, item, width = width).unwrap();
    }
    output
}

impl OutputFormatter for NamesResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&self).unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();
        if let Some(message) = &self.message {
            writeln!(output, "✓ {}", message).unwrap();
        }
        output.push_str(&numbered(&self.names));
        if self.names.len() == self.total {
            writeln!(output, "{} names", self.total).unwrap();
        } else {
            writeln!(output, "{} of {} names", self.names.len(), self.total).unwrap();
        }
        output
    }
}

impl OutputFormatter for FilesResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&self).unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();
        if let Some(message) = &self.message {
            writeln!(output, "✓ {}", message).unwrap();
        }
        output.push_str(&numbered(&self.files));
        if self.files.len() == self.total {
            writeln!(output, "{} files in {}", self.total, self.folder.display()).unwrap();
        } else {
            writeln!(
                output,
                "{} of {} files in {}",
                self.files.len(),
                self.total,
                self.folder.display()
            )
            .unwrap();
        }
        output
    }
}

impl OutputFormatter for FileActionResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": self.action,
            "folder": self.folder,
            "file": self.file,
            "new_name": self.new_name,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        match (self.action, &self.new_name) {
            (FileAction::Renamed, Some(new_name)) => {
                format!("✓ Renamed '{}' to '{}'\n", self.file, new_name)
            },
            (FileAction::Renamed, None) => format!("✓ Renamed '{}'\n", self.file),
            (FileAction::Deleted, _) => format!("✓ Deleted '{}'\n", self.file),
            (FileAction::Located, _) => format!("Showing '{}' in the file manager\n", self.file),
            (FileAction::Opened, _) => format!("Opened '{}'\n", self.file),
        }
    }
}

impl OutputFormatter for PreviewResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&self).unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();
        match &self.preview {
            ContentPreview::Image {
                width,
                height,
                preview_width,
                preview_height,
                thumbnail,
            } => {
                writeln!(
                    output,
                    "Image {}x{} (preview {}x{})",
                    width, height, preview_width, preview_height
                )
                .unwrap();
                if let Some(thumbnail) = thumbnail {
                    writeln!(output, "Thumbnail: {}", thumbnail.display()).unwrap();
                }
            },
            ContentPreview::Document { size, note } => {
                writeln!(output, "PDF document, {} bytes", size).unwrap();
                writeln!(output, "{}", note).unwrap();
            },
            ContentPreview::Text {
                content,
                truncated,
                size,
            } => {
                output.push_str(content);
                if !content.ends_with('\n') {
                    output.push('\n');
                }
                if *truncated {
                    writeln!(output, "... (truncated, {} bytes total)", size).unwrap();
                }
            },
            ContentPreview::Unsupported { extension } => {
                if extension.is_empty() {
                    output.push_str("Preview not available for files without an extension\n");
                } else {
                    writeln!(output, "Preview not available for '{}' files", extension).unwrap();
                }
            },
        }
        output
    }
}

impl OutputFormatter for VersionResult {
    fn format_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        format!("{} {}", self.name, self.version)
    }
}
