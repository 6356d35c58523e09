use renamelist_core::{
    apply_plan, plan_renames, undo_last, FolderListing, OperationLog, RenamePair,
    MANIFEST_FILE_NAME,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn strings(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

fn create_folder(files: &[&str]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for name in files {
        // Each file holds its own original name so moves can be traced
        fs::write(temp_dir.path().join(name), name).unwrap();
    }
    temp_dir
}

fn rename_all(
    folder: &Path,
    names: &[&str],
    log: &mut OperationLog,
) -> renamelist_core::RenameReport {
    let mut listing = FolderListing::open(folder, &[]).unwrap();
    let plan = plan_renames(folder, listing.files(), &strings(names));
    apply_plan(&plan, &mut listing, log)
}

#[test]
fn test_more_files_than_names() {
    let folder = create_folder(&["a.jpg", "b.jpg", "c.txt"]);
    let history = TempDir::new().unwrap();
    let mut log = OperationLog::load(&history.path().join("history.json"));

    let report = rename_all(folder.path(), &["cat", "dog"], &mut log);

    assert_eq!(report.success_count(), 2);
    assert_eq!(report.failure_count(), 0);
    assert_eq!(report.not_renamed, strings(&["c.txt"]));

    assert_eq!(fs::read_to_string(folder.path().join("cat.jpg")).unwrap(), "a.jpg");
    assert_eq!(fs::read_to_string(folder.path().join("dog.jpg")).unwrap(), "b.jpg");
    assert_eq!(fs::read_to_string(folder.path().join("c.txt")).unwrap(), "c.txt");
    assert!(!folder.path().join("a.jpg").exists());

    let batch = log.last().unwrap();
    assert_eq!(
        batch.operations,
        vec![
            RenamePair::new("a.jpg", "cat.jpg"),
            RenamePair::new("b.jpg", "dog.jpg"),
        ]
    );
}

#[test]
fn test_duplicate_name_collides_and_is_not_recorded() {
    let folder = create_folder(&["a.jpg", "b.jpg", "c.jpg"]);
    let history = TempDir::new().unwrap();
    let mut log = OperationLog::load(&history.path().join("history.json"));

    let report = rename_all(folder.path(), &["cat", "dog", "cat"], &mut log);

    assert_eq!(report.success_count(), 2);
    assert_eq!(report.failure_count(), 1);
    assert_eq!(report.failures[0].kind, "already_exists");
    assert_eq!(report.failures[0].original_name, "c.jpg");
    assert!(report.failures[0]
        .message
        .starts_with("Error renaming 'c.jpg' to 'cat.jpg'"));

    // Never overwrites: cat.jpg still holds the first file
    assert_eq!(fs::read_to_string(folder.path().join("cat.jpg")).unwrap(), "a.jpg");
    assert!(folder.path().join("c.jpg").exists());

    assert_eq!(log.len(), 1);
    assert_eq!(log.last().unwrap().operations.len(), 2);
}

#[test]
fn test_empty_inputs_do_nothing() {
    let history = TempDir::new().unwrap();
    let mut log = OperationLog::load(&history.path().join("history.json"));

    let folder = create_folder(&["a.jpg"]);
    let report = rename_all(folder.path(), &[], &mut log);
    assert_eq!((report.success_count(), report.failure_count()), (0, 0));
    assert!(folder.path().join("a.jpg").exists());

    let empty_folder = create_folder(&[]);
    let report = rename_all(empty_folder.path(), &["cat"], &mut log);
    assert_eq!((report.success_count(), report.failure_count()), (0, 0));
    assert_eq!(report.unused_names, 1);

    assert!(log.is_empty());
    assert!(report.manifest.is_none());
    assert!(!empty_folder.path().join(MANIFEST_FILE_NAME).exists());
}

#[test]
fn test_manifest_holds_the_succeeded_pairs() {
    let folder = create_folder(&["a.jpg", "b.jpg", "c.jpg"]);
    let history = TempDir::new().unwrap();
    let mut log = OperationLog::load(&history.path().join("history.json"));

    let report = rename_all(folder.path(), &["cat", "dog", "cat"], &mut log);

    let manifest = report.manifest.unwrap();
    assert_eq!(manifest, folder.path().join(MANIFEST_FILE_NAME));
    assert_eq!(
        fs::read_to_string(&manifest).unwrap(),
        "old_name,new_name\na.jpg,cat.jpg\nb.jpg,dog.jpg\n"
    );

    // The manifest is never offered as a file to rename
    let listing = FolderListing::open(folder.path(), &[]).unwrap();
    assert!(!listing.files().contains(&MANIFEST_FILE_NAME.to_string()));
}

#[test]
fn test_extension_filter_limits_pairing() {
    let folder = create_folder(&["a.jpg", "b.txt", "c.PNG"]);
    let history = TempDir::new().unwrap();
    let mut log = OperationLog::load(&history.path().join("history.json"));

    let mut listing =
        FolderListing::open(folder.path(), &strings(&["jpg", ".png"])).unwrap();
    assert_eq!(listing.files(), strings(&["a.jpg", "c.PNG"]).as_slice());

    let plan = plan_renames(folder.path(), listing.files(), &strings(&["cat", "dog"]));
    let report = apply_plan(&plan, &mut listing, &mut log);

    assert_eq!(report.success_count(), 2);
    assert!(folder.path().join("dog.PNG").exists());
    assert!(folder.path().join("b.txt").exists());
}

#[test]
fn test_rename_to_same_name_is_a_success() {
    let folder = create_folder(&["cat.jpg"]);
    let history = TempDir::new().unwrap();
    let mut log = OperationLog::load(&history.path().join("history.json"));

    let report = rename_all(folder.path(), &["cat"], &mut log);

    assert_eq!(report.success_count(), 1);
    assert_eq!(report.failure_count(), 0);
    assert!(folder.path().join("cat.jpg").exists());
}

#[test]
fn test_name_matching_the_manifest_is_refused() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.csv"), "user data").unwrap();
    fs::write(temp_dir.path().join("b.csv"), "b.csv").unwrap();
    let history = TempDir::new().unwrap();
    let mut log = OperationLog::load(&history.path().join("history.json"));

    let report = rename_all(temp_dir.path(), &["renamed_files", "second"], &mut log);

    assert_eq!(report.success_count(), 1);
    assert_eq!(report.failure_count(), 1);
    assert_eq!(report.failures[0].original_name, "a.csv");
    assert_eq!(report.failures[0].kind, "invalid_name");
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("a.csv")).unwrap(),
        "user data"
    );
    assert_eq!(
        fs::read_to_string(temp_dir.path().join(MANIFEST_FILE_NAME)).unwrap(),
        "old_name,new_name\nb.csv,second.csv\n"
    );

    let undo = undo_last(&mut log, None).unwrap().unwrap();
    assert_eq!(undo.success_count(), 1);
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("a.csv")).unwrap(),
        "user data"
    );
    assert_eq!(fs::read_to_string(temp_dir.path().join("b.csv")).unwrap(), "b.csv");
    assert!(!temp_dir.path().join(MANIFEST_FILE_NAME).exists());
}
