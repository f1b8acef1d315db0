use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn check(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("check").unwrap();
    cmd.current_dir(dir)
        .env_remove("TYPO_CHECK_MODEL")
        .arg("--no-color");
    cmd
}

fn train(dir: &Path, words: &str) {
    fs::write(dir.join("words.txt"), words).unwrap();
    check(dir)
        .args(["train", "--dictionary=words.txt", "--model-output=model.gz"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Training model using dictionary file"));
}

fn results(dir: &Path, name: &str) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(dir.join(name)).unwrap()).unwrap()
}

#[test]
fn test_single_file_report() {
    let dir = tempdir().unwrap();
    train(dir.path(), "the\ncat\nsat\n");
    fs::write(dir.path().join("input.txt"), "Teh cat sat").unwrap();

    check(dir.path())
        .args(["--model-path=model.gz", "input.txt"])
        .assert()
        .success();

    assert_eq!(
        results(dir.path(), "results.json"),
        serde_json::json!([{"wrong": "Teh", "correct": "the", "counts": 1}])
    );
}

#[test]
fn test_empty_file_writes_empty_array() {
    let dir = tempdir().unwrap();
    train(dir.path(), "the\ncat\n");
    fs::write(dir.path().join("empty.txt"), "").unwrap();

    check(dir.path())
        .args(["--model-path=model.gz", "empty.txt", "--target=out.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No typos found"));

    assert_eq!(fs::read_to_string(dir.path().join("out.json")).unwrap(), "[]");
}

#[test]
fn test_batch_merges_files() {
    let dir = tempdir().unwrap();
    train(dir.path(), "the\ncat\nsat\n");
    fs::create_dir(dir.path().join("docs")).unwrap();
    fs::write(dir.path().join("docs/one.txt"), "Teh cat").unwrap();
    fs::write(dir.path().join("docs/two.txt"), "sat Teh").unwrap();

    check(dir.path())
        .args(["batch", "--model-path=model.gz", "docs/*.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Running batch job on 2 files"));

    assert_eq!(
        results(dir.path(), "results.json"),
        serde_json::json!([{"wrong": "Teh", "correct": "the", "counts": 2}])
    );
}

#[test]
fn test_batch_reports_unreadable_files() {
    let dir = tempdir().unwrap();
    train(dir.path(), "the\ncat\n");
    fs::create_dir(dir.path().join("docs")).unwrap();
    fs::write(dir.path().join("docs/good.txt"), "Teh").unwrap();
    fs::write(dir.path().join("docs/bad.txt"), [0xff, 0xfe, 0xfd]).unwrap();

    check(dir.path())
        .args(["batch", "--model-path=model.gz", "docs/*.txt"])
        .assert()
        .success()
        .stderr(predicate::str::contains("could not be checked"))
        .stderr(predicate::str::contains("bad.txt"));

    assert_eq!(
        results(dir.path(), "results.json"),
        serde_json::json!([{"wrong": "Teh", "correct": "the", "counts": 1}])
    );
}

#[test]
fn test_threshold_flag() {
    let dir = tempdir().unwrap();
    train(dir.path(), "the\nworld\n");
    fs::write(dir.path().join("input.txt"), "wrold wrold teh").unwrap();

    check(dir.path())
        .args(["--model-path=model.gz", "input.txt", "--threshold=2"])
        .assert()
        .success();

    assert_eq!(
        results(dir.path(), "results.json"),
        serde_json::json!([{"wrong": "wrold", "correct": "world", "counts": 2}])
    );
}

#[test]
fn test_missing_file_fails() {
    let dir = tempdir().unwrap();
    train(dir.path(), "the\n");

    check(dir.path())
        .args(["--model-path=model.gz", "nope.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("path does not exist"));
}

#[test]
fn test_missing_model_fails() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("input.txt"), "Teh").unwrap();

    check(dir.path())
        .args(["--model-path=missing.gz", "input.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not load a valid model"));
}

#[test]
fn test_batch_without_matches_fails() {
    let dir = tempdir().unwrap();
    train(dir.path(), "the\n");

    check(dir.path())
        .args(["batch", "--model-path=model.gz", "docs/*.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("path does not exist"));
}

#[test]
fn test_model_path_from_env() {
    let dir = tempdir().unwrap();
    train(dir.path(), "the\ncat\n");
    fs::write(dir.path().join("input.txt"), "Teh").unwrap();

    check(dir.path())
        .env("TYPO_CHECK_MODEL", "model.gz")
        .arg("input.txt")
        .assert()
        .success();

    assert_eq!(
        results(dir.path(), "results.json"),
        serde_json::json!([{"wrong": "Teh", "correct": "the", "counts": 1}])
    );
}

#[test]
fn test_local_config_file() {
    let dir = tempdir().unwrap();
    train(dir.path(), "the\n");
    fs::write(dir.path().join(".typocheck.toml"), "target = \"from-config.json\"\n").unwrap();
    fs::write(dir.path().join("input.txt"), "teh").unwrap();

    check(dir.path())
        .args(["--model-path=model.gz", "input.txt"])
        .assert()
        .success();

    assert!(dir.path().join("from-config.json").exists());
    assert!(!dir.path().join("results.json").exists());
}

#[test]
fn test_no_file_given() {
    let dir = tempdir().unwrap();
    check(dir.path())
        .arg("--model-path=model.gz")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No file specified"));
}

#[test]
fn test_train_default_model_output() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("words.txt"), "the\ncat\n").unwrap();

    check(dir.path())
        .args(["train", "--dictionary=words.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("wordlist.txt"));
    assert!(dir.path().join("wordlist.txt").exists());

    fs::write(dir.path().join("input.txt"), "Teh").unwrap();
    check(dir.path())
        .args(["--model-path=wordlist.txt", "input.txt"])
        .assert()
        .success();

    assert_eq!(
        results(dir.path(), "results.json"),
        serde_json::json!([{"wrong": "Teh", "correct": "the", "counts": 1}])
    );
}

#[test]
fn test_quiet_silences_status_lines() {
    let dir = tempdir().unwrap();
    train(dir.path(), "the\ncat\n");
    fs::create_dir(dir.path().join("docs")).unwrap();
    fs::write(dir.path().join("docs/one.txt"), "Teh cat").unwrap();

    check(dir.path())
        .args(["-q", "batch", "--model-path=model.gz", "docs/*.txt"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(
        results(dir.path(), "results.json"),
        serde_json::json!([{"wrong": "Teh", "correct": "the", "counts": 1}])
    );
}
