use crate::files::FolderListing;
use crate::output::{FileAction, FileActionResult, FilesResult};
use anyhow::{Context, Result};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilesAction {
    List,
    Filter(String),
}

fn open_folder(folder: &Path, extensions: &[String]) -> Result<FolderListing> {
    FolderListing::open(folder, extensions)
        .with_context(|| format!("Failed to list folder {}", folder.display()))
}

/// List a folder the way a rename pass would see it
pub fn files_operation(
    folder: &Path,
    extensions: &[String],
    action: FilesAction,
) -> Result<FilesResult> {
    let listing = open_folder(folder, extensions)?;

    let files = match action {
        FilesAction::List => listing.files().to_vec(),
        FilesAction::Filter(needle) => listing.filter(&needle),
    };

    Ok(FilesResult {
        folder: folder.to_path_buf(),
        extensions: listing.extensions().to_vec(),
        message: None,
        files,
        total: listing.len(),
    })
}

pub fn file_rename_operation(
    folder: &Path,
    old_name: &str,
    new_name: &str,
) -> Result<FileActionResult> {
    let mut listing = open_folder(folder, &[])?;
    listing
        .rename(old_name, new_name)
        .with_context(|| format!("Failed to rename '{}' to '{}'", old_name, new_name))?;

    Ok(FileActionResult {
        action: FileAction::Renamed,
        folder: folder.to_path_buf(),
        file: old_name.to_string(),
        new_name: Some(new_name.to_string()),
    })
}

pub fn file_delete_operation(folder: &Path, name: &str) -> Result<FileActionResult> {
    let mut listing = open_folder(folder, &[])?;
    listing
        .delete(name)
        .with_context(|| format!("Failed to delete '{}'", name))?;

    Ok(FileActionResult {
        action: FileAction::Deleted,
        folder: folder.to_path_buf(),
        file: name.to_string(),
        new_name: None,
    })
}

/// Reveal a file in the platform file manager
pub fn locate_operation(folder: &Path, name: &str) -> Result<FileActionResult> {
    let listing = open_folder(folder, &[])?;
    listing
        .locate(name)
        .with_context(|| format!("Failed to show '{}' in the file manager", name))?;

    Ok(FileActionResult {
        action: FileAction::Located,
        folder: folder.to_path_buf(),
        file: name.to_string(),
        new_name: None,
    })
}

/// Open a file with the application the platform associates with it
pub fn open_operation(folder: &Path, name: &str) -> Result<FileActionResult> {
    let listing = open_folder(folder, &[])?;
    listing
        .open_with_default_app(name)
        .with_context(|| format!("Failed to open '{}'", name))?;

    Ok(FileActionResult {
        action: FileAction::Opened,
        folder: folder.to_path_buf(),
        file: name.to_string(),
        new_name: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenameError;
    use std::fs;
    use tempfile::TempDir;

    fn folder(files: &[&str]) -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        for name in files {
            fs::write(temp_dir.path().join(name), "x").unwrap();
        }
        temp_dir
    }

    #[test]
    fn test_list_with_extension_filter() {
        let temp_dir = folder(&["b.PNG", "a.jpg", "notes.txt"]);
        let exts = vec![".jpg".to_string(), ".png".to_string()];

        let result = files_operation(temp_dir.path(), &exts, FilesAction::List).unwrap();
        assert_eq!(result.files, vec!["a.jpg".to_string(), "b.PNG".to_string()]);
        assert_eq!(result.total, 2);

        let filtered =
            files_operation(temp_dir.path(), &[], FilesAction::Filter("NOTE".into())).unwrap();
        assert_eq!(filtered.files, vec!["notes.txt".to_string()]);
        assert_eq!(filtered.total, 3);
    }

    #[test]
    fn test_file_rename_refuses_to_overwrite() {
        let temp_dir = folder(&["a.jpg", "cat.jpg"]);

        let err = file_rename_operation(temp_dir.path(), "a.jpg", "cat.jpg").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RenameError>(),
            Some(RenameError::AlreadyExists(_))
        ));
        assert!(temp_dir.path().join("a.jpg").exists());

        let result = file_rename_operation(temp_dir.path(), "a.jpg", "dog.jpg").unwrap();
        assert_eq!(result.new_name.as_deref(), Some("dog.jpg"));
        assert!(temp_dir.path().join("dog.jpg").exists());
    }

    #[test]
    fn test_file_delete() {
        let temp_dir = folder(&["a.jpg"]);
        file_delete_operation(temp_dir.path(), "a.jpg").unwrap();
        assert!(!temp_dir.path().join("a.jpg").exists());

        let err = file_delete_operation(temp_dir.path(), "a.jpg").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RenameError>(),
            Some(RenameError::NotFound(_))
        ));
    }

    #[test]
    fn test_locate_missing_file() {
        let temp_dir = folder(&[]);
        assert!(locate_operation(temp_dir.path(), "gone.jpg").is_err());
        assert!(open_operation(temp_dir.path(), "gone.jpg").is_err());
    }
}
