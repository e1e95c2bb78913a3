//! Integration tests for the dirtreewalk binary

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn dirtreewalk(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_dirtreewalk"));
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

/// `<temp>/root/{a.txt, sub/b.txt}`
fn scenario() -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let root = temp.path().join("root");
    fs::create_dir_all(root.join("sub")).expect("Failed to create dirs");
    fs::write(root.join("a.txt"), "alpha").expect("Failed to write file");
    fs::write(root.join("sub/b.txt"), "beta").expect("Failed to write file");
    temp
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().expect("Failed to run dirtreewalk");
    assert!(output.status.success(), "dirtreewalk should succeed");
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_lists_scenario() {
    let temp = scenario();
    let stdout = stdout_of(dirtreewalk(temp.path()).arg("root"));

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3, "one line per entry: {stdout}");

    let fields = |name: &str| -> Vec<String> {
        lines
            .iter()
            .map(|l| l.split_whitespace().map(String::from).collect::<Vec<_>>())
            .find(|f| f[1] == name)
            .unwrap_or_else(|| panic!("{name} missing from {stdout}"))
    };

    let a_md5 = format!("{:x}", md5::compute("a.txt"));
    let b_md5 = format!("{:x}", md5::compute("b.txt"));
    assert_eq!(fields("sub"), vec!["<directory>", "sub", "sub"]);
    assert_eq!(fields("a.txt"), vec!["<file>", "a.txt", "a.txt", a_md5.as_str()]);
    assert_eq!(
        fields("b.txt"),
        vec!["<file>", "b.txt", "sub/b.txt", b_md5.as_str()]
    );

    let sub = lines.iter().position(|l| l.starts_with("<directory>")).unwrap();
    let b = lines.iter().position(|l| l.contains("sub/b.txt")).unwrap();
    assert!(sub < b, "directory line must precede its contents");
}

#[test]
fn test_column_layout() {
    let temp = scenario();
    let stdout = stdout_of(dirtreewalk(temp.path()).arg("root"));
    let dir_line = stdout
        .lines()
        .find(|l| l.starts_with("<directory>"))
        .unwrap();
    assert_eq!(dir_line, format!("{:<15} {:<40} {:<40}", "<directory>", "sub", "sub"));
}

#[test]
fn test_invalid_path_message() {
    let temp = TempDir::new().unwrap();
    dirtreewalk(temp.path())
        .arg("nope")
        .assert()
        .success()
        .stdout("You did not enter a valid path.\n");
}

#[test]
fn test_only_first_path_is_listed() {
    let temp = scenario();
    fs::create_dir(temp.path().join("other")).unwrap();
    fs::write(temp.path().join("other/c.txt"), "c").unwrap();

    dirtreewalk(temp.path())
        .args(["root", "other"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a.txt"))
        .stdout(predicate::str::contains("c.txt").not());
}

#[test]
fn test_all_lists_every_path() {
    let temp = scenario();
    fs::create_dir(temp.path().join("other")).unwrap();
    fs::write(temp.path().join("other/c.txt"), "c").unwrap();

    dirtreewalk(temp.path())
        .args(["--all", "root", "other"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a.txt"))
        .stdout(predicate::str::contains("c.txt"));
}

#[test]
fn test_requires_a_path() {
    let temp = TempDir::new().unwrap();
    dirtreewalk(temp.path()).assert().failure();
}

#[test]
fn test_file_root_fails() {
    let temp = scenario();
    dirtreewalk(temp.path())
        .arg("root/a.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Listing root/a.txt failed"));
}

#[test]
fn test_max_depth() {
    let temp = scenario();
    dirtreewalk(temp.path())
        .args(["--max-depth", "1", "root"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sub"))
        .stdout(predicate::str::contains("b.txt").not());
}

#[test]
fn test_json_format() {
    let temp = scenario();
    let stdout = stdout_of(dirtreewalk(temp.path()).args(["--format", "json", "root"]));

    let values: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).expect("each line is JSON"))
        .collect();
    assert_eq!(values.len(), 3);
    assert!(values.iter().all(|v| v["type"] == "entry"));

    let b = values.iter().find(|v| v["name"] == "b.txt").unwrap();
    assert_eq!(b["kind"], "file");
    assert_eq!(b["relative_path"], "sub/b.txt");
    assert_eq!(b["fingerprint"], format!("{:x}", md5::compute("b.txt")));
}

#[test]
fn test_summary_goes_to_stderr() {
    let temp = scenario();
    dirtreewalk(temp.path())
        .args(["--summary", "root"])
        .assert()
        .success()
        .stderr(predicate::str::contains("1 directories, 2 files, 0 links"))
        .stdout(predicate::str::contains("directories,").not());
}

#[cfg(unix)]
#[test]
fn test_symlink_flags() {
    use std::os::unix::fs::symlink;

    let temp = scenario();
    let root = temp.path().join("root");
    symlink(root.join("sub"), root.join("alias")).unwrap();

    dirtreewalk(temp.path())
        .arg("root")
        .assert()
        .success()
        .stdout(predicate::str::contains("alias/b.txt"))
        .stdout(predicate::str::contains("<link>").not());

    dirtreewalk(temp.path())
        .args(["--link-first", "root"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"(?m)^<link>\s+alias\s+alias").unwrap())
        .stdout(predicate::str::contains("alias/b.txt").not());
}
