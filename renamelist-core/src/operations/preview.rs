use crate::output::PreviewResult;
use crate::preview::{preview_file, PreviewOptions};
use anyhow::{Context, Result};
use std::path::Path;

pub fn preview_operation(path: &Path, options: &PreviewOptions) -> Result<PreviewResult> {
    let preview = preview_file(path, options)
        .with_context(|| format!("Failed to preview {}", path.display()))?;

    Ok(PreviewResult {
        path: path.to_path_buf(),
        preview,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::PreviewKind;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_preview_operation() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.md");
        fs::write(&path, "# Notes\n").unwrap();

        let result = preview_operation(&path, &PreviewOptions::default()).unwrap();
        assert_eq!(result.preview.kind(), PreviewKind::Text);

        let missing = preview_operation(&temp_dir.path().join("gone.md"), &PreviewOptions::default());
        assert!(missing.is_err());
    }
}
