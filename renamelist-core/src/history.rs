use crate::error::{RenameError, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const HISTORY_FILE_NAME: &str = "rename_history.json";

/// One file renamed by a pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenamePair {
    pub original_name: String,
    pub new_name: String,
}

impl RenamePair {
    pub fn new(original_name: impl Into<String>, new_name: impl Into<String>) -> Self {
        Self {
            original_name: original_name.into(),
            new_name: new_name.into(),
        }
    }
}

/// Represents a single rename pass in the operation log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameBatch {
    /// Local time the pass ran, RFC 3339
    pub timestamp: String,
    /// Folder the files live in
    pub folder_path: PathBuf,
    /// Renames that succeeded, in the order they were applied
    pub operations: Vec<RenamePair>,
}

/// Append-only log of rename passes, persisted as one JSON array.
///
/// Only the most recent batch can be popped; older ones stay on disk.
#[derive(Debug)]
pub struct OperationLog {
    path: PathBuf,
    batches: Vec<RenameBatch>,
}

/// Default log location: the per-user data directory, or `.renamelist/` when there is none
pub fn default_history_path() -> PathBuf {
    dirs::data_local_dir().map_or_else(
        || PathBuf::from(".renamelist").join(HISTORY_FILE_NAME),
        |dir| dir.join("renamelist").join(HISTORY_FILE_NAME),
    )
}

impl OperationLog {
    /// Load the log from `path`.
    ///
    /// A missing file gives an empty log. An unreadable or malformed file is
    /// logged and also gives an empty log, since losing undo history is not fatal.
    pub fn load(path: &Path) -> Self {
        let batches = if path.exists() {
            match read_batches(path) {
                Ok(batches) => batches,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "could not read rename history, starting empty");
                    Vec::new()
                },
            }
        } else {
            Vec::new()
        };

        debug!(path = %path.display(), batches = batches.len(), "loaded rename history");

        Self {
            path: path.to_path_buf(),
            batches,
        }
    }

    /// Save the whole log to disk
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| RenameError::io(parent, e))?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)
            .map_err(|e| RenameError::io(&self.path, e))?;

        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &self.batches)
            .map_err(|e| RenameError::io(&self.path, io::Error::other(e)))?;

        Ok(())
    }

    /// Record a new batch stamped with the current time, then persist
    pub fn append(&mut self, folder: &Path, pairs: Vec<RenamePair>) -> Result<&RenameBatch> {
        if pairs.is_empty() {
            return Err(RenameError::io(
                &self.path,
                io::Error::new(io::ErrorKind::InvalidInput, "a rename batch needs at least one pair"),
            ));
        }

        self.batches.push(RenameBatch {
            timestamp: chrono::Local::now().to_rfc3339(),
            folder_path: folder.to_path_buf(),
            operations: pairs,
        });
        self.save()?;

        Ok(&self.batches[self.batches.len() - 1])
    }

    /// Get the last batch
    pub fn last(&self) -> Option<&RenameBatch> {
        self.batches.last()
    }

    /// Remove the last batch and persist. Returns `None` when the log is empty.
    pub fn pop_last(&mut self) -> Result<Option<RenameBatch>> {
        let Some(batch) = self.batches.pop() else {
            return Ok(None);
        };
        self.save()?;
        Ok(Some(batch))
    }

    /// Get all batches, most recent first, optionally limited to N
    pub fn list_entries(&self, limit: Option<usize>) -> Vec<&RenameBatch> {
        let entries = self.batches.iter().rev();
        match limit {
            Some(limit) => entries.take(limit).collect(),
            None => entries.collect(),
        }
    }

    /// Drop every batch and persist
    pub fn clear(&mut self) -> Result<()> {
        self.batches.clear();
        self.save()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }
}

fn read_batches(path: &Path) -> std::result::Result<Vec<RenameBatch>, String> {
    let file = File::open(path).map_err(|e| e.to_string())?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn pairs(list: &[(&str, &str)]) -> Vec<RenamePair> {
        list.iter().map(|(a, b)| RenamePair::new(*a, *b)).collect()
    }

    #[test]
    fn test_missing_file_is_empty_log() {
        let temp_dir = TempDir::new().unwrap();
        let log = OperationLog::load(&temp_dir.path().join("history.json"));
        assert!(log.is_empty());
        assert!(log.last().is_none());
    }

    #[test]
    fn test_corrupt_file_resets_to_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("history.json");
        fs::write(&path, "{ not json").unwrap();

        let mut log = OperationLog::load(&path);
        assert!(log.is_empty());

        log.append(Path::new("/photos"), pairs(&[("a.jpg", "cat.jpg")]))
            .unwrap();
        let reloaded = OperationLog::load(&path);
        assert_eq!(reloaded.len(), 1);
    }

    #[test]
    fn test_append_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("history.json");

        let mut log = OperationLog::load(&path);
        log.append(
            Path::new("/photos"),
            pairs(&[("a.jpg", "cat.jpg"), ("b.jpg", "dog.jpg")]),
        )
        .unwrap();

        let loaded = OperationLog::load(&path);
        assert_eq!(loaded.len(), 1);
        let batch = loaded.last().unwrap();
        assert_eq!(batch.folder_path, PathBuf::from("/photos"));
        assert_eq!(batch.operations[1], RenamePair::new("b.jpg", "dog.jpg"));
        assert!(chrono::DateTime::parse_from_rfc3339(&batch.timestamp).is_ok());
    }

    #[test]
    fn test_json_shape() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("history.json");

        let mut log = OperationLog::load(&path);
        log.append(Path::new("/photos"), pairs(&[("a.jpg", "cat.jpg")]))
            .unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let first = &value.as_array().unwrap()[0];
        assert!(first["timestamp"].is_string());
        assert_eq!(first["folder_path"], "/photos");
        assert_eq!(first["operations"][0]["original_name"], "a.jpg");
        assert_eq!(first["operations"][0]["new_name"], "cat.jpg");
    }

    #[test]
    fn test_reads_log_written_elsewhere() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("history.json");
        fs::write(
            &path,
            r#"[{"timestamp": "2024-05-01T10:00:00.123456", "folder_path": "C:\\fotos",
                "operations": [{"original_name": "a.jpg", "new_name": "gato.jpg"}]}]"#,
        )
        .unwrap();

        let log = OperationLog::load(&path);
        assert_eq!(log.len(), 1);
        assert_eq!(log.last().unwrap().operations[0].new_name, "gato.jpg");
    }

    #[test]
    fn test_append_rejects_empty_batch() {
        let temp_dir = TempDir::new().unwrap();
        let mut log = OperationLog::load(&temp_dir.path().join("history.json"));
        assert!(log.append(Path::new("/photos"), vec![]).is_err());
        assert!(log.is_empty());
    }

    #[test]
    fn test_pop_last() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("history.json");

        let mut log = OperationLog::load(&path);
        log.append(Path::new("/one"), pairs(&[("a", "b")])).unwrap();
        log.append(Path::new("/two"), pairs(&[("c", "d")])).unwrap();

        let popped = log.pop_last().unwrap().unwrap();
        assert_eq!(popped.folder_path, PathBuf::from("/two"));

        let reloaded = OperationLog::load(&path);
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.last().unwrap().folder_path, PathBuf::from("/one"));

        log.pop_last().unwrap();
        assert!(log.pop_last().unwrap().is_none());
    }

    #[test]
    fn test_list_entries_with_limit() {
        let temp_dir = TempDir::new().unwrap();
        let mut log = OperationLog::load(&temp_dir.path().join("history.json"));
        for i in 0..5 {
            log.append(Path::new(&format!("/dir{}", i)), pairs(&[("a", "b")]))
                .unwrap();
        }

        assert_eq!(log.list_entries(None).len(), 5);
        let limited = log.list_entries(Some(3));
        assert_eq!(limited.len(), 3);
        assert_eq!(limited[0].folder_path, PathBuf::from("/dir4")); // Most recent first
    }

    #[test]
    fn test_clear() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("history.json");
        let mut log = OperationLog::load(&path);
        log.append(Path::new("/photos"), pairs(&[("a", "b")])).unwrap();

        log.clear().unwrap();
        assert!(OperationLog::load(&path).is_empty());
    }
}
