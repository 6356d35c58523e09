use crate::history::OperationLog;
use crate::output::{HistoryItem, StatusResult};
use anyhow::Result;
use std::path::Path;

/// Status operation - returns structured data
pub fn status_operation(history_path: &Path) -> Result<StatusResult> {
    let log = OperationLog::load(history_path);

    Ok(StatusResult {
        history_path: history_path.to_path_buf(),
        history_count: log.len(),
        last_batch: log.last().map(HistoryItem::from),
    })
}
