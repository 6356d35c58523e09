use crate::history::OperationLog;
use crate::output::{ClearResult, HistoryItem, HistoryResult};
use anyhow::{Context, Result};
use std::path::Path;

/// History operation - returns structured data
pub fn history_operation(limit: Option<usize>, history_path: &Path) -> Result<HistoryResult> {
    let log = OperationLog::load(history_path);

    let entries = log
        .list_entries(limit)
        .into_iter()
        .map(HistoryItem::from)
        .collect();

    Ok(HistoryResult { entries })
}

/// Drop every batch from the log; nothing can be undone afterwards
pub fn clear_history_operation(history_path: &Path) -> Result<ClearResult> {
    let mut log = OperationLog::load(history_path);
    let batches_removed = log.len();

    log.clear()
        .with_context(|| format!("Failed to clear history at {}", history_path.display()))?;

    Ok(ClearResult {
        history_path: history_path.to_path_buf(),
        batches_removed,
    })
}
