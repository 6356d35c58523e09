use crate::error::{RenameError, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_DELIMITER: char = ',';

/// Ordered list of replacement base-names, usually backed by a delimited text file.
///
/// Only the first field of every record is kept. Order is significant and
/// duplicates are allowed; they only become a problem when two renames target
/// the same file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameList {
    path: Option<PathBuf>,
    delimiter: char,
    names: Vec<String>,
}

impl NameList {
    /// Create an in-memory list with no backing file
    pub fn new(names: Vec<String>) -> Self {
        Self {
            path: None,
            delimiter: DEFAULT_DELIMITER,
            names,
        }
    }

    /// Load a name file and remember it for `reload` and `save`
    pub fn open(path: &Path, delimiter: char) -> Result<Self> {
        let names = load_names(path, delimiter)?;
        debug!(path = %path.display(), count = names.len(), "loaded name list");
        Ok(Self {
            path: Some(path.to_path_buf()),
            delimiter,
            names,
        })
    }

    /// Re-read the backing file, replacing the in-memory list wholesale
    pub fn reload(&mut self) -> Result<()> {
        let path = self.backing_path()?.to_path_buf();
        self.names = load_names(&path, self.delimiter)?;
        Ok(())
    }

    /// Overwrite the backing file with the current list
    pub fn save(&self) -> Result<()> {
        let path = self.backing_path()?;
        self.save_to(path)
    }

    /// Write the current list to `path`, one name per line
    pub fn save_to(&self, path: &Path) -> Result<()> {
        save_names(path, &self.names, self.delimiter)?;
        debug!(path = %path.display(), count = self.names.len(), "saved name list");
        Ok(())
    }

    fn backing_path(&self) -> Result<&Path> {
        self.path.as_deref().ok_or_else(|| {
            RenameError::io(
                PathBuf::new(),
                io::Error::new(io::ErrorKind::NotFound, "name list has no backing file"),
            )
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Remove the name at `index`. Returns false when out of range.
    pub fn remove_at(&mut self, index: usize) -> bool {
        if index < self.names.len() {
            self.names.remove(index);
            true
        } else {
            false
        }
    }

    /// Remove several rows at once, returning how many were removed.
    /// Out-of-range and duplicate indices are ignored.
    pub fn remove_many(&mut self, indices: &[usize]) -> usize {
        let mut sorted: Vec<usize> = indices.to_vec();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        sorted.dedup();

        sorted
            .into_iter()
            .filter(|&index| self.remove_at(index))
            .count()
    }

    /// Swap the names at `index` and `new_index`. Returns false when either is out of range.
    pub fn move_to(&mut self, index: usize, new_index: usize) -> bool {
        swap_entries(&mut self.names, index, new_index)
    }

    /// Case-insensitive containment filter. Does not modify the list.
    pub fn filter(&self, needle: &str) -> Vec<String> {
        filter_entries(&self.names, needle)
    }
}

/// Swap two entries of a list in place, bounds-checked
pub(crate) fn swap_entries(entries: &mut [String], a: usize, b: usize) -> bool {
    if a < entries.len() && b < entries.len() {
        entries.swap(a, b);
        true
    } else {
        false
    }
}

pub(crate) fn filter_entries(entries: &[String], needle: &str) -> Vec<String> {
    if needle.is_empty() {
        return entries.to_vec();
    }
    let needle = needle.to_lowercase();
    entries
        .iter()
        .filter(|entry| entry.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Read the first field of every non-blank record in a delimited text file
pub fn load_names(path: &Path, delimiter: char) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|e| RenameError::io(path, e))?;
    parse_names(&content, delimiter).map_err(|(line, message)| RenameError::Parse {
        path: path.to_path_buf(),
        line,
        message,
    })
}

/// Write one name per line, quoting names that would not survive a reload
pub fn save_names(path: &Path, names: &[String], delimiter: char) -> Result<()> {
    let mut content = String::new();
    for name in names {
        content.push_str(&quote_field(name, delimiter));
        content.push('\n');
    }
    fs::write(path, content).map_err(|e| RenameError::io(path, e))
}

/// Parse delimited text and keep the first field of each record.
///
/// Records whose first field is empty are skipped. On failure returns the
/// 1-based line where the offending quoted field started.
pub fn parse_names(
    content: &str,
    delimiter: char,
) -> std::result::Result<Vec<String>, (usize, String)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut names = Vec::new();
    let mut first_field = String::new();
    let mut field_index = 0usize;
    let mut in_quotes = false;
    let mut at_field_start = true;
    let mut line = 1usize;
    let mut quote_line = 0usize;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            let literal = match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    Some('"')
                },
                '"' => {
                    in_quotes = false;
                    None
                },
                '\n' => {
                    line += 1;
                    Some(c)
                },
                _ => Some(c),
            };
            if let Some(literal) = literal {
                if field_index == 0 {
                    first_field.push(literal);
                }
            }
            continue;
        }

        match c {
            '"' if at_field_start => {
                in_quotes = true;
                quote_line = line;
                at_field_start = false;
            },
            '\r' | '\n' => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                line += 1;
                if !first_field.is_empty() {
                    names.push(std::mem::take(&mut first_field));
                }
                field_index = 0;
                at_field_start = true;
            },
            c if c == delimiter => {
                field_index = field_index.saturating_add(1);
                at_field_start = true;
            },
            _ => {
                if field_index == 0 {
                    first_field.push(c);
                }
                at_field_start = false;
            },
        }
    }

    if in_quotes {
        return Err((quote_line, "unterminated quoted field".to_string()));
    }

    if !first_field.is_empty() {
        names.push(first_field);
    }

    Ok(names)
}

/// Quote a field for a delimited text file when it contains the delimiter, a quote or a line break
pub(crate) fn quote_field(value: &str, delimiter: char) -> String {
    let needs_quotes = value.contains(delimiter)
        || value.contains('"')
        || value.contains('\n')
        || value.contains('\r');

    if needs_quotes {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
