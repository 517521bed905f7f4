//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn quizdrill() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("quizdrill").unwrap()
}

const TWO_QUESTION_BANK: &str = r#"{
  "questions": [
    {"id": "q1", "category": "geo", "type": "single",
     "text": "Capital of France?", "options": ["Berlin", "Paris"], "correct": "Paris"},
    {"id": "q2", "category": "math", "type": "single",
     "text": "2 + 2?", "options": ["3", "4"], "correct": "4"}
  ]
}"#;

fn write_bank(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("questions.json");
    std::fs::write(&path, TWO_QUESTION_BANK).unwrap();
    path
}

#[test]
fn help_output() {
    quizdrill()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Offline-capable quiz trainer"));
}

#[test]
fn version_output() {
    quizdrill()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("quizdrill"));
}

#[test]
fn validate_valid_bank() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(&dir);

    quizdrill()
        .arg("validate")
        .arg("--bank")
        .arg(&bank)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 questions"))
        .stdout(predicate::str::contains("Bank is valid"));
}

#[test]
fn validate_warns_on_duplicate_ids() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dupes.json");
    std::fs::write(
        &path,
        r#"{"questions": [
            {"id": "same", "text": "First?", "options": ["A"], "correct": "A"},
            {"id": "same", "text": "Second?", "options": ["B"], "correct": "B"}
        ]}"#,
    )
    .unwrap();

    quizdrill()
        .arg("validate")
        .arg("--bank")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("duplicate question id"))
        .stdout(predicate::str::contains("warning(s) found"));
}

#[test]
fn validate_reports_invalid_entry_count() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(
        &path,
        r#"{"questions": [
            {"id": "ok", "text": "Fine?", "options": ["A"], "correct": "A"},
            {"id": "broken", "options": ["A"]}
        ]}"#,
    )
    .unwrap();

    quizdrill()
        .arg("validate")
        .arg("--bank")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 of 2 question entries are invalid"));
}

#[test]
fn validate_nonexistent_file() {
    quizdrill()
        .arg("validate")
        .arg("--bank")
        .arg("no_such_bank.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    quizdrill()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created quizdrill.toml"))
        .stdout(predicate::str::contains("Created questions.json"));

    assert!(dir.path().join("quizdrill.toml").exists());
    assert!(dir.path().join("questions.json").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    quizdrill().current_dir(dir.path()).arg("init").assert().success();

    quizdrill()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn init_sample_bank_passes_validate() {
    let dir = TempDir::new().unwrap();

    quizdrill().current_dir(dir.path()).arg("init").assert().success();

    quizdrill()
        .current_dir(dir.path())
        .arg("validate")
        .arg("--bank")
        .arg("questions.json")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bank is valid"));
}

#[test]
fn run_scripted_session_to_completion() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(&dir);

    quizdrill()
        .current_dir(dir.path())
        .arg("run")
        .arg("--bank")
        .arg(&bank)
        .write_stdin("2\n2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Question 1/2"))
        .stdout(predicate::str::contains("Correct!"))
        .stdout(predicate::str::contains("Session summary"))
        .stdout(predicate::str::contains("Score: 2/2"));
}

#[test]
fn run_resumes_saved_progress() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(&dir);

    // Answer the first question, then quit.
    quizdrill()
        .current_dir(dir.path())
        .arg("run")
        .arg("--bank")
        .arg(&bank)
        .write_stdin("2\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Correct!"));

    // A fresh process resumes where the last one stopped.
    quizdrill()
        .current_dir(dir.path())
        .arg("run")
        .arg("--bank")
        .arg(&bank)
        .write_stdin("q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Resuming: 1 of 2 answered, score 1"));
}

#[test]
fn run_missing_bank_shows_error_panel() {
    let dir = TempDir::new().unwrap();

    quizdrill()
        .current_dir(dir.path())
        .arg("run")
        .arg("--bank")
        .arg("no_such_bank.json")
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("could not be found"))
        .stdout(predicate::str::contains("Retry loading?"));
}

#[test]
fn run_exports_session_report() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(&dir);
    let report = dir.path().join("report.json");

    quizdrill()
        .current_dir(dir.path())
        .arg("run")
        .arg("--bank")
        .arg(&bank)
        .arg("--export")
        .arg(&report)
        .write_stdin("2\n1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Report saved to"));

    let content = std::fs::read_to_string(&report).unwrap();
    assert!(content.contains("\"score\": 1"));
    assert!(content.contains("\"question_count\": 2"));
}

#[test]
fn stats_shows_category_breakdown() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(&dir);

    quizdrill()
        .current_dir(dir.path())
        .arg("run")
        .arg("--bank")
        .arg(&bank)
        .write_stdin("2\nq\n")
        .assert()
        .success();

    quizdrill()
        .current_dir(dir.path())
        .arg("stats")
        .arg("--bank")
        .arg(&bank)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 answered, score 1"))
        .stdout(predicate::str::contains("geo"))
        .stdout(predicate::str::contains("math"));
}

#[test]
fn reset_clears_saved_progress() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(&dir);

    quizdrill()
        .current_dir(dir.path())
        .arg("run")
        .arg("--bank")
        .arg(&bank)
        .write_stdin("2\nq\n")
        .assert()
        .success();

    quizdrill()
        .current_dir(dir.path())
        .arg("reset")
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved progress cleared"));

    quizdrill()
        .current_dir(dir.path())
        .arg("reset")
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved progress"));
}
