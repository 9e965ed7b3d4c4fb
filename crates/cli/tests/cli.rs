use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

const TEST_SOURCE: &str = r#"describe('math', () => {
  test('adds (fast)', () => {
    expect(1 + 1).toBe(2);
  });
  test('subtracts', () => {
    expect(2 - 1).toBe(1);
  });
});
"#;

fn write_test_file(dir: &Path) -> std::path::PathBuf {
    let file = dir.join("math.test.js");
    std::fs::write(&file, TEST_SOURCE).unwrap();
    file
}

#[test]
fn locate_resolves_escaped_full_name() {
    let temp = tempfile::tempdir().unwrap();
    let file = write_test_file(temp.path());

    Command::cargo_bin("testlens")
        .unwrap()
        .args(["locate", file.to_str().unwrap(), "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("math adds \\(fast\\)"));
}

#[test]
fn locate_outside_any_test_means_whole_file() {
    let temp = tempfile::tempdir().unwrap();
    let file = write_test_file(temp.path());

    Command::cargo_bin("testlens")
        .unwrap()
        .args(["locate", file.to_str().unwrap(), "99"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(whole file)"));
}

#[test]
fn run_dry_run_prints_cd_and_command() {
    let temp = tempfile::tempdir().unwrap();
    let file = write_test_file(temp.path());

    Command::cargo_bin("testlens")
        .unwrap()
        .args([
            "--workspace",
            temp.path().to_str().unwrap(),
            "run",
            file.to_str().unwrap(),
            "--line",
            "5",
            "--dry-run",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("cd '")
                .and(predicate::str::contains("-t 'math subtracts'")),
        );
}

#[test]
fn file_dry_run_has_no_test_filter() {
    let temp = tempfile::tempdir().unwrap();
    let file = write_test_file(temp.path());

    Command::cargo_bin("testlens")
        .unwrap()
        .args([
            "--workspace",
            temp.path().to_str().unwrap(),
            "file",
            file.to_str().unwrap(),
            "--option",
            "--coverage",
            "--dry-run",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("math.test.js")
                .and(predicate::str::contains("--coverage"))
                .and(predicate::str::contains("-t").not()),
        );
}

#[test]
fn debug_prints_launch_configuration() {
    let temp = tempfile::tempdir().unwrap();
    let file = write_test_file(temp.path());

    Command::cargo_bin("testlens")
        .unwrap()
        .args([
            "--workspace",
            temp.path().to_str().unwrap(),
            "debug",
            file.to_str().unwrap(),
            "--line",
            "2",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("\"request\": \"launch\"")
                .and(predicate::str::contains("--runInBand"))
                .and(predicate::str::contains("internalConsoleOptions")),
        );
}

#[test]
fn lens_lists_action_groups() {
    let temp = tempfile::tempdir().unwrap();
    let file = write_test_file(temp.path());

    Command::cargo_bin("testlens")
        .unwrap()
        .args([
            "--workspace",
            temp.path().to_str().unwrap(),
            "lens",
            file.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Run | Debug")
                .and(predicate::str::contains("math subtracts")),
        );
}
