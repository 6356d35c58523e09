use crate::engine::{plan_renames, RenamePlan};
use crate::files::FolderListing;
use crate::names::NameList;
use crate::output::PlanResult;
use crate::preview::{render_plan_with_fixed_width, Preview};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// The two sources a rename pass pairs up
#[derive(Debug, Clone)]
pub struct RenameInputs {
    pub names_file: PathBuf,
    pub folder: PathBuf,
    pub extensions: Vec<String>,
    pub delimiter: char,
}

impl RenameInputs {
    /// Load both sources
    pub fn open(&self) -> Result<(NameList, FolderListing)> {
        let names = NameList::open(&self.names_file, self.delimiter).with_context(|| {
            format!("Failed to load names from {}", self.names_file.display())
        })?;
        let folder = FolderListing::open(&self.folder, &self.extensions)
            .with_context(|| format!("Failed to list folder {}", self.folder.display()))?;
        Ok((names, folder))
    }
}

pub(crate) fn build_plan(names: &NameList, folder: &FolderListing) -> RenamePlan {
    plan_renames(folder.dir(), folder.files(), names.names())
}

/// Plan operation - returns structured data plus the rendered preview, if one was asked for
pub fn plan_operation(
    inputs: &RenameInputs,
    preview_format: Option<Preview>,
    fixed_table_width: bool,
    use_color: bool,
) -> Result<(PlanResult, Option<String>)> {
    let (names, folder) = inputs.open()?;
    let plan = build_plan(&names, &folder);

    let preview = match preview_format {
        Some(Preview::None) | None => None,
        Some(format) => Some(render_plan_with_fixed_width(
            &plan,
            format,
            Some(use_color),
            fixed_table_width,
        )),
    };

    let result = PlanResult {
        names_file: inputs.names_file.clone(),
        total_files: folder.len(),
        total_names: names.len(),
        plan,
    };

    Ok((result, preview))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn inputs(temp_dir: &TempDir) -> RenameInputs {
        let names_file = temp_dir.path().join("names.csv");
        fs::write(&names_file, "cat,extra\ndog\n").unwrap();
        let folder = temp_dir.path().join("photos");
        fs::create_dir(&folder).unwrap();
        for name in ["a.jpg", "b.jpg", "c.txt"] {
            fs::write(folder.join(name), "x").unwrap();
        }
        RenameInputs {
            names_file,
            folder,
            extensions: vec![],
            delimiter: ',',
        }
    }

    #[test]
    fn test_plan_operation_does_not_touch_disk() {
        let temp_dir = TempDir::new().unwrap();
        let inputs = inputs(&temp_dir);

        let (result, preview) =
            plan_operation(&inputs, Some(Preview::Summary), true, false).unwrap();
        assert_eq!(result.total_files, 3);
        assert_eq!(result.total_names, 2);
        assert_eq!(result.plan.pairs.len(), 2);
        assert_eq!(result.plan.not_renamed, vec!["c.txt".to_string()]);
        assert!(preview.unwrap().contains("a.jpg -> cat.jpg"));

        assert!(inputs.folder.join("a.jpg").exists());
        assert!(!inputs.folder.join("cat.jpg").exists());
    }

    #[test]
    fn test_plan_operation_without_preview() {
        let temp_dir = TempDir::new().unwrap();
        let inputs = inputs(&temp_dir);
        let (_, preview) = plan_operation(&inputs, Some(Preview::None), false, false).unwrap();
        assert!(preview.is_none());
    }

    #[test]
    fn test_plan_operation_missing_folder() {
        let temp_dir = TempDir::new().unwrap();
        let mut inputs = inputs(&temp_dir);
        inputs.folder = temp_dir.path().join("missing");

        let err = plan_operation(&inputs, None, false, false).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to list folder"));
    }
}
