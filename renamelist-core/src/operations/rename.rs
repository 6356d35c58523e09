use super::plan::{build_plan, RenameInputs};
use crate::engine::{RenamePlan, RenameReport};
use crate::history::RenamePair;
use crate::output::RenameResult;
use crate::session::{Command, Event, Session};
use anyhow::{bail, Result};
use std::path::Path;

/// Rename every paired file in the folder and record the pass in the log at `history_path`.
///
/// With `dry_run` nothing is touched and `succeeded` lists what would be renamed.
/// When `confirmed` is given, the pass only runs if the folder and name list
/// still pair up exactly as in that plan.
pub fn rename_operation(
    inputs: &RenameInputs,
    dry_run: bool,
    confirmed: Option<&RenamePlan>,
    history_path: &Path,
) -> Result<RenameResult> {
    if dry_run {
        let (names, folder) = inputs.open()?;
        let plan = build_plan(&names, &folder);
        let report = RenameReport {
            folder: plan.folder.clone(),
            succeeded: plan
                .pairs
                .iter()
                .map(|p| RenamePair::new(&p.original_name, &p.new_name))
                .collect(),
            not_renamed: plan.not_renamed,
            unused_names: plan.unused_names,
            ..Default::default()
        };
        return Ok(RenameResult {
            dry_run,
            report,
        });
    }

    // Load both sources up front so a bad path fails before the log is touched.
    inputs.open()?;

    let mut session = Session::with_history(history_path);
    session.dispatch(Command::OpenNames {
        path: inputs.names_file.clone(),
        delimiter: inputs.delimiter,
    })?;
    session.dispatch(Command::OpenFolder {
        dir: inputs.folder.clone(),
        extensions: inputs.extensions.clone(),
    })?;

    if let Some(confirmed) = confirmed {
        if &session.plan()? != confirmed {
            bail!(
                "The folder or the name list changed after the preview; nothing was renamed. \
                 Run the command again to review the new pairing."
            );
        }
    }

    match session.dispatch(Command::RenameAll)? {
        Event::Renamed(report) => Ok(RenameResult {
            dry_run,
            report,
        }),
        other => bail!("Unexpected session event: {:?}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::OperationLog;
    use std::fs;
    use tempfile::TempDir;

    fn setup(names: &str, files: &[&str]) -> (TempDir, RenameInputs) {
        let temp_dir = TempDir::new().unwrap();
        let names_file = temp_dir.path().join("names.csv");
        fs::write(&names_file, names).unwrap();
        let folder = temp_dir.path().join("photos");
        fs::create_dir(&folder).unwrap();
        for name in files {
            fs::write(folder.join(name), name.as_bytes()).unwrap();
        }
        let inputs = RenameInputs {
            names_file,
            folder,
            extensions: vec![],
            delimiter: ',',
        };
        (temp_dir, inputs)
    }

    #[test]
    fn test_rename_operation() {
        let (temp_dir, inputs) = setup("cat\ndog\n", &["a.jpg", "b.jpg", "c.txt"]);
        let history = temp_dir.path().join("history.json");

        let result = rename_operation(&inputs, false, None, &history).unwrap();
        assert_eq!(result.report.success_count(), 2);
        assert_eq!(result.report.not_renamed, vec!["c.txt".to_string()]);
        assert_eq!(fs::read_to_string(inputs.folder.join("cat.jpg")).unwrap(), "a.jpg");
        assert_eq!(OperationLog::load(&history).len(), 1);
    }

    #[test]
    fn test_dry_run_changes_nothing() {
        let (temp_dir, inputs) = setup("cat\n", &["a.jpg"]);
        let history = temp_dir.path().join("history.json");

        let result = rename_operation(&inputs, true, None, &history).unwrap();
        assert!(result.dry_run);
        assert_eq!(result.report.succeeded, vec![RenamePair::new("a.jpg", "cat.jpg")]);
        assert!(inputs.folder.join("a.jpg").exists());
        assert!(!history.exists());
    }

    #[test]
    fn test_changed_folder_after_confirmation_renames_nothing() {
        let (temp_dir, inputs) = setup("cat\ndog\n", &["b.jpg", "c.jpg"]);
        let history = temp_dir.path().join("history.json");

        let (names, folder) = inputs.open().unwrap();
        let confirmed = build_plan(&names, &folder);
        fs::write(inputs.folder.join("a.jpg"), "a.jpg").unwrap();

        let err = rename_operation(&inputs, false, Some(&confirmed), &history).unwrap_err();
        assert!(err.to_string().contains("changed after the preview"));
        assert!(inputs.folder.join("a.jpg").exists());
        assert!(inputs.folder.join("b.jpg").exists());
        assert!(!history.exists());

        let (names, folder) = inputs.open().unwrap();
        let confirmed = build_plan(&names, &folder);
        let result = rename_operation(&inputs, false, Some(&confirmed), &history).unwrap();
        assert_eq!(result.report.success_count(), 2);
        assert!(inputs.folder.join("cat.jpg").exists());
    }

    #[test]
    fn test_missing_names_file_fails_early() {
        let (temp_dir, mut inputs) = setup("", &["a.jpg"]);
        inputs.names_file = temp_dir.path().join("missing.csv");
        let history = temp_dir.path().join("history.json");

        assert!(rename_operation(&inputs, false, None, &history).is_err());
        assert!(!history.exists());
    }
}
