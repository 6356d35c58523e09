use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

fn renamelist(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("renamelist").unwrap();
    cmd.current_dir(temp_dir.path())
        .env("RENAMELIST_HISTORY", temp_dir.path().join("history.json"))
        .env_remove("RENAMELIST_YES")
        .arg("--no-color");
    cmd
}

#[test]
fn test_names_list_and_filter() {
    let temp_dir = TempDir::new().unwrap();
    temp_dir
        .child("names.csv")
        .write_str("Cat,1\n\"Smith, John\",2\ncatfish,3\n")
        .unwrap();

    renamelist(&temp_dir)
        .args(["names", "list", "names.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2  Smith, John"))
        .stdout(predicate::str::contains("3 names"));

    renamelist(&temp_dir)
        .args(["names", "filter", "names.csv", "CAT"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1  Cat"))
        .stdout(predicate::str::contains("2  catfish"))
        .stdout(predicate::str::contains("2 of 3 names"));
}

#[test]
fn test_names_remove_and_move_write_back() {
    let temp_dir = TempDir::new().unwrap();
    let names = temp_dir.child("names.csv");
    names.write_str("cat\ndog\nemu\nfox\n").unwrap();

    renamelist(&temp_dir)
        .args(["names", "remove", "names.csv", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Removed 1 names"));
    names.assert("cat\nemu\nfox\n");

    renamelist(&temp_dir)
        .args(["names", "move", "names.csv", "1", "3"])
        .assert()
        .success();
    names.assert("fox\nemu\ncat\n");

    renamelist(&temp_dir)
        .args(["names", "move", "names.csv", "1", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("the list has 3 names"));
    names.assert("fox\nemu\ncat\n");
}

#[test]
fn test_names_custom_delimiter() {
    let temp_dir = TempDir::new().unwrap();
    temp_dir.child("names.txt").write_str("cat;x\ndog;y\n").unwrap();

    renamelist(&temp_dir)
        .args(["names", "list", "names.txt", "--delimiter", ";", "--output", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""names":["cat","dog"]"#));
}

#[test]
fn test_files_list_skips_directories() {
    let temp_dir = TempDir::new().unwrap();
    let photos = temp_dir.child("photos");
    photos.child("b.jpg").touch().unwrap();
    photos.child("a.JPG").touch().unwrap();
    photos.child("notes.txt").touch().unwrap();
    photos.child("nested").create_dir_all().unwrap();

    renamelist(&temp_dir)
        .args(["files", "list", "photos", "--ext", "jpg"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1  a.JPG"))
        .stdout(predicate::str::contains("2  b.jpg"))
        .stdout(predicate::str::contains("notes.txt").not())
        .stdout(predicate::str::contains("nested").not());
}

#[test]
fn test_files_rename_and_delete() {
    let temp_dir = TempDir::new().unwrap();
    let photos = temp_dir.child("photos");
    photos.child("a.jpg").write_str("a").unwrap();
    photos.child("b.jpg").write_str("b").unwrap();

    renamelist(&temp_dir)
        .args(["files", "rename", "photos", "a.jpg", "b.jpg", "-y"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
    photos.child("b.jpg").assert("b");

    renamelist(&temp_dir)
        .args(["files", "rename", "photos", "a.jpg", "cat.jpg", "-y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Renamed 'a.jpg' to 'cat.jpg'"));
    photos.child("cat.jpg").assert("a");

    renamelist(&temp_dir)
        .args(["files", "delete", "photos", "b.jpg"])
        .write_stdin("no\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Aborted."));
    photos.child("b.jpg").assert(predicate::path::exists());

    renamelist(&temp_dir)
        .args(["files", "delete", "photos", "b.jpg", "--yes"])
        .assert()
        .success();
    photos.child("b.jpg").assert(predicate::path::missing());
}

#[test]
fn test_preview_text_file() {
    let temp_dir = TempDir::new().unwrap();
    temp_dir.child("notes.txt").write_str("hello there\n").unwrap();

    renamelist(&temp_dir)
        .args(["preview", "notes.txt"])
        .assert()
        .success()
        .stdout("hello there\n");

    renamelist(&temp_dir)
        .args(["preview", "notes.txt", "--output", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""kind":"text""#));
}

#[test]
fn test_preview_unsupported_and_missing() {
    let temp_dir = TempDir::new().unwrap();
    temp_dir.child("movie.mkv").touch().unwrap();

    renamelist(&temp_dir)
        .args(["preview", "movie.mkv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Preview not available for '.mkv' files"));

    renamelist(&temp_dir)
        .args(["preview", "gone.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to preview"));
}

#[test]
fn test_config_supplies_defaults() {
    let temp_dir = TempDir::new().unwrap();
    temp_dir
        .child(".renamelist/config.toml")
        .write_str("[defaults]\nextensions = [\"png\"]\ndelimiter = \";\"\npreview_format = \"summary\"\n")
        .unwrap();
    temp_dir.child("names.csv").write_str("cat;x\n").unwrap();
    temp_dir.child("photos/a.jpg").touch().unwrap();
    temp_dir.child("photos/b.png").touch().unwrap();

    renamelist(&temp_dir)
        .args(["plan", "names.csv", "photos"])
        .assert()
        .success()
        .stdout(predicate::str::contains("b.png -> cat.png"))
        .stdout(predicate::str::contains("a.jpg").not());
}

#[test]
fn test_completions_command() {
    let temp_dir = TempDir::new().unwrap();

    renamelist(&temp_dir)
        .args(["completions", "bash", "--out-dir", "completions"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated completion file"));

    temp_dir
        .child("completions/renamelist.bash")
        .assert(predicate::path::exists());
}
