use crate::error::{RenameError, Result};
use crate::manifest::is_manifest_name;
use crate::names::{filter_entries, swap_entries};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;
use walkdir::WalkDir;

/// Turn a comma-separated extension filter ("jpg, .PNG,") into dotted, lowercase suffixes
pub fn parse_extensions(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|ext| !ext.is_empty())
        .map(normalize_extension)
        .collect()
}

fn normalize_extension(ext: &str) -> String {
    let ext = ext.to_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{}", ext)
    }
}

fn matches_extensions(file_name: &str, extensions: &[String]) -> bool {
    if extensions.is_empty() {
        return true;
    }
    let lower = file_name.to_lowercase();
    extensions.iter().any(|ext| lower.ends_with(ext.as_str()))
}

/// List the regular files directly inside `dir`, filtered and sorted by name.
///
/// Subdirectories and symlinks are skipped, as is the rename manifest.
pub fn list_files(dir: &Path, extensions: &[String]) -> Result<Vec<String>> {
    let extensions: Vec<String> = extensions.iter().map(|e| normalize_extension(e)).collect();

    let metadata = fs::metadata(dir).map_err(|e| map_io_error(dir, e))?;
    if !metadata.is_dir() {
        return Err(RenameError::io(
            dir,
            io::Error::new(io::ErrorKind::InvalidInput, "not a directory"),
        ));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
    {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            RenameError::io(path, io::Error::other(e.to_string()))
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            debug!(path = %entry.path().display(), "skipping non UTF-8 file name");
            continue;
        };

        if is_manifest_name(name) {
            continue;
        }

        if matches_extensions(name, &extensions) {
            files.push(name.to_string());
        }
    }

    files.sort();
    Ok(files)
}

fn map_io_error(path: &Path, error: io::Error) -> RenameError {
    if error.kind() == io::ErrorKind::NotFound {
        RenameError::NotFound(path.to_path_buf())
    } else {
        RenameError::io(path, error)
    }
}

/// A file name must name an immediate child of the folder
pub fn validate_file_name(name: &str) -> Result<()> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\')
        || name.contains('\0');

    if invalid {
        Err(RenameError::InvalidName(name.to_string()))
    } else {
        Ok(())
    }
}

/// Snapshot of the files in one folder, with the operations that act on them.
///
/// The snapshot is not kept in sync with the disk; call `reload` after
/// anything outside this listing changes the folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderListing {
    dir: PathBuf,
    extensions: Vec<String>,
    files: Vec<String>,
}

impl FolderListing {
    pub fn open(dir: &Path, extensions: &[String]) -> Result<Self> {
        let files = list_files(dir, extensions)?;
        debug!(dir = %dir.display(), count = files.len(), "listed folder");
        Ok(Self {
            dir: dir.to_path_buf(),
            extensions: extensions.iter().map(|e| normalize_extension(e)).collect(),
            files,
        })
    }

    /// Re-list the folder with the current extension filter
    pub fn reload(&mut self) -> Result<()> {
        self.files = list_files(&self.dir, &self.extensions)?;
        Ok(())
    }

    /// Replace the extension filter and re-list
    pub fn set_extensions(&mut self, extensions: &[String]) -> Result<()> {
        self.extensions = extensions.iter().map(|e| normalize_extension(e)).collect();
        self.reload()
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn path_of(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Rename `old_name` to `new_name` inside the folder. Never overwrites.
    pub fn rename(&mut self, old_name: &str, new_name: &str) -> Result<()> {
        validate_file_name(old_name)?;
        validate_file_name(new_name)?;
        // The next pass would write its manifest over the renamed file
        if is_manifest_name(new_name) {
            return Err(RenameError::InvalidName(new_name.to_string()));
        }

        let old_path = self.path_of(old_name);
        let new_path = self.path_of(new_name);

        if fs::symlink_metadata(&old_path).is_err() {
            return Err(RenameError::NotFound(old_path));
        }

        if old_name != new_name {
            // Case-only renames report the source itself as existing on
            // case-insensitive filesystems, so compare against the entry name.
            if fs::symlink_metadata(&new_path).is_ok()
                && !is_same_entry(&old_path, &new_path)
            {
                return Err(RenameError::AlreadyExists(new_path));
            }

            fs::rename(&old_path, &new_path).map_err(|e| map_io_error(&old_path, e))?;
        }

        debug!(from = old_name, to = new_name, "renamed");

        if let Some(entry) = self.files.iter_mut().find(|f| f.as_str() == old_name) {
            *entry = new_name.to_string();
        }
        Ok(())
    }

    /// Delete `name` from the folder and drop it from the listing
    pub fn delete(&mut self, name: &str) -> Result<()> {
        validate_file_name(name)?;
        let path = self.path_of(name);

        if fs::symlink_metadata(&path).is_err() {
            return Err(RenameError::NotFound(path));
        }

        fs::remove_file(&path).map_err(|e| map_io_error(&path, e))?;
        debug!(name, "deleted");

        self.files.retain(|f| f != name);
        Ok(())
    }

    /// Swap two entries of the in-memory listing. Returns false when either is out of range.
    pub fn move_to(&mut self, index: usize, new_index: usize) -> bool {
        swap_entries(&mut self.files, index, new_index)
    }

    /// Case-insensitive containment filter over the listing
    pub fn filter(&self, needle: &str) -> Vec<String> {
        filter_entries(&self.files, needle)
    }

    /// Reveal the file in the platform file manager
    pub fn locate(&self, name: &str) -> Result<()> {
        let path = self.existing_path(name)?;
        reveal_in_file_manager(&path)
    }

    /// Open the file with the application the OS associates with it
    pub fn open_with_default_app(&self, name: &str) -> Result<()> {
        let path = self.existing_path(name)?;
        open_with_default_app(&path)
    }

    fn existing_path(&self, name: &str) -> Result<PathBuf> {
        validate_file_name(name)?;
        let path = self.path_of(name);
        if path.exists() {
            Ok(path)
        } else {
            Err(RenameError::NotFound(path))
        }
    }
}

fn is_same_entry(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a_canon), Ok(b_canon)) => {
            let same_name = a.file_name().zip(b.file_name()).is_some_and(|(x, y)| {
                x.to_string_lossy()
                    .eq_ignore_ascii_case(&y.to_string_lossy())
            });
            a_canon == b_canon && same_name
        },
        _ => false,
    }
}

fn spawn(command: &mut Command, path: &Path) -> Result<()> {
    command
        .spawn()
        .map(|_| ())
        .map_err(|e| RenameError::io(path, e))
}

#[cfg(target_os = "windows")]
fn reveal_in_file_manager(path: &Path) -> Result<()> {
    let mut select = std::ffi::OsString::from("/select,");
    select.push(path.as_os_str());
    spawn(Command::new("explorer").arg(select), path)
}

#[cfg(target_os = "macos")]
fn reveal_in_file_manager(path: &Path) -> Result<()> {
    spawn(Command::new("open").arg("-R").arg(path), path)
}

#[cfg(all(not(target_os = "windows"), not(target_os = "macos")))]
fn reveal_in_file_manager(path: &Path) -> Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    spawn(Command::new("xdg-open").arg(parent), path)
}

#[cfg(target_os = "windows")]
fn open_with_default_app(path: &Path) -> Result<()> {
    spawn(Command::new("cmd").args(["/C", "start", ""]).arg(path), path)
}

#[cfg(target_os = "macos")]
fn open_with_default_app(path: &Path) -> Result<()> {
    spawn(Command::new("open").arg(path), path)
}

#[cfg(all(not(target_os = "windows"), not(target_os = "macos")))]
fn open_with_default_app(path: &Path) -> Result<()> {
    spawn(Command::new("xdg-open").arg(path), path)
}
