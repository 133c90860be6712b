use assert_cmd::Command;
use predicates::prelude::*;

fn shortlist(data_dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("shortlist").unwrap();
    cmd.env("SHORTLIST_DATA_DIR", data_dir);
    cmd.env("NO_COLOR", "1");
    cmd
}

#[test]
fn full_curation_workflow() {
    let temp_dir = tempfile::tempdir().unwrap();
    let data = temp_dir.path();

    shortlist(data)
        .args(["new", "Conference 2026"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Conference 2026"));

    shortlist(data)
        .args(["add-list", "talks"])
        .assert()
        .success();

    shortlist(data)
        .args(["add", "talks", "Zero-copy parsing", "Async traps", "Borrow checker"])
        .assert()
        .success();

    // Pick the second item, then insert the first at rank 1.
    shortlist(data).args(["pick", "talks", "2"]).assert().success();
    shortlist(data)
        .args(["pick", "talks", "1", "--at", "1"])
        .assert()
        .success();

    let output = shortlist(data).arg("show").output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let parsing = stdout.find("Zero-copy parsing").expect("rank 1 present");
    let traps = stdout.find("Async traps").expect("rank 2 present");
    assert!(parsing < traps, "picked order should be rank order:\n{}", stdout);

    // The input list shows which items are spoken for.
    shortlist(data)
        .arg("lists")
        .assert()
        .success()
        .stdout(predicates::str::contains("2/3 picked"));

    shortlist(data)
        .args(["tag-new", "keynote"])
        .assert()
        .success();
    shortlist(data)
        .args(["tag", "keynote", "1"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Tagged 1 entry"));

    shortlist(data)
        .arg("show")
        .assert()
        .success()
        .stdout(predicates::str::contains("#keynote"));

    shortlist(data)
        .arg("tags")
        .assert()
        .success()
        .stdout(predicates::str::contains("2 uses"));
}

#[test]
fn drop_frees_the_source_item() {
    let temp_dir = tempfile::tempdir().unwrap();
    let data = temp_dir.path();

    shortlist(data).args(["new", "P"]).assert().success();
    shortlist(data).args(["add-list", "pool"]).assert().success();
    shortlist(data).args(["add", "pool", "a", "b"]).assert().success();
    shortlist(data).args(["pick", "pool", "1"]).assert().success();
    shortlist(data).args(["pick", "pool", "2"]).assert().success();

    shortlist(data).args(["drop", "1"]).assert().success();

    // "b" closes the gap and sits at rank 1; "a" is pickable again.
    shortlist(data)
        .arg("show")
        .assert()
        .success()
        .stdout(predicates::str::contains("1. b"));
    shortlist(data)
        .arg("lists")
        .assert()
        .success()
        .stdout(predicates::str::contains("1/2 picked"));
}

#[test]
fn state_survives_process_restarts() {
    let temp_dir = tempfile::tempdir().unwrap();
    let data = temp_dir.path();

    shortlist(data).args(["new", "First"]).assert().success();
    shortlist(data).args(["add-list", "pool"]).assert().success();
    shortlist(data).args(["add", "pool", "kept"]).assert().success();

    shortlist(data).args(["new", "Second"]).assert().success();
    shortlist(data)
        .arg("projects")
        .assert()
        .success()
        .stdout(predicates::str::contains("First"))
        .stdout(predicates::str::contains("Second"));

    // Switch back; the item added in the first session is still there.
    shortlist(data).args(["use", "First"]).assert().success();
    shortlist(data)
        .arg("lists")
        .assert()
        .success()
        .stdout(predicates::str::contains("kept"));
}

#[test]
fn export_import_regenerates_ids() {
    let temp_dir = tempfile::tempdir().unwrap();
    let data = temp_dir.path();
    let archive_path = temp_dir.path().join("proj.json");

    shortlist(data).args(["new", "Orig"]).assert().success();
    shortlist(data).args(["add-list", "pool"]).assert().success();
    shortlist(data).args(["add", "pool", "x"]).assert().success();
    shortlist(data).args(["pick", "pool", "1"]).assert().success();

    shortlist(data)
        .args(["export", archive_path.to_str().unwrap()])
        .assert()
        .success();

    // Importing the archive twice must not collide: two distinct saved
    // projects with the same name.
    shortlist(data)
        .args(["import", archive_path.to_str().unwrap()])
        .assert()
        .success();
    shortlist(data)
        .args(["import", archive_path.to_str().unwrap()])
        .assert()
        .success();

    let output = shortlist(data).arg("projects").output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.matches("Orig").count(), 3, "{}", stdout);
}

#[test]
fn commands_without_a_project_fail_cleanly() {
    let temp_dir = tempfile::tempdir().unwrap();
    let data = temp_dir.path();

    shortlist(data)
        .arg("show")
        .assert()
        .failure()
        .stderr(predicates::str::contains("No active project"));
}
