use crate::error::{RenameError, Result};
use crate::history::RenamePair;
use crate::names::quote_field;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Reserved name of the old→new audit file written into a renamed folder
pub const MANIFEST_FILE_NAME: &str = "renamed_files.csv";

/// Whether `name` would land on the manifest, counting case-insensitive filesystems
pub fn is_manifest_name(name: &str) -> bool {
    name.eq_ignore_ascii_case(MANIFEST_FILE_NAME)
}

pub fn manifest_path(dir: &Path) -> PathBuf {
    dir.join(MANIFEST_FILE_NAME)
}

/// Write the manifest for a rename pass, replacing any earlier one
pub fn write_manifest(dir: &Path, pairs: &[RenamePair]) -> Result<PathBuf> {
    let path = manifest_path(dir);

    let mut content = String::from("old_name,new_name\n");
    for pair in pairs {
        content.push_str(&quote_field(&pair.original_name, ','));
        content.push(',');
        content.push_str(&quote_field(&pair.new_name, ','));
        content.push('\n');
    }

    fs::write(&path, content).map_err(|e| RenameError::io(&path, e))?;
    Ok(path)
}

/// Delete the manifest if there is one. Returns whether a file was removed.
pub fn remove_manifest(dir: &Path) -> Result<bool> {
    let path = manifest_path(dir);
    match fs::remove_file(&path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(RenameError::io(&path, e)),
    }
}
