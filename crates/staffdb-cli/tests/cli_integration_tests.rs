//! CLI integration tests
//!
//! Drive the `staffdb` binary against a scratch database file.

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_cli(dir: &TempDir, db_path: &Path, args: &[&str]) -> Output {
    let cli_bin = env!("CARGO_BIN_EXE_staffdb");
    Command::new(cli_bin)
        .current_dir(dir.path())
        .args(args)
        .args(["--db", db_path.to_str().unwrap()])
        .env_remove("STAFFDB_PATH")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Initialised database with department 1 and employee 1
fn setup_seeded_db(dir: &TempDir) -> PathBuf {
    let db_path = dir.path().join("store.db");
    assert!(run_cli(dir, &db_path, &["init"]).status.success());
    assert!(run_cli(dir, &db_path, &["department", "add", "Payroll", "HQ"])
        .status
        .success());
    assert!(run_cli(
        dir,
        &db_path,
        &["employee", "add", "Lee", "Manager", "--department", "1"]
    )
    .status
    .success());
    db_path
}

#[test]
fn test_cli_init_creates_tables() {
    // Given: an empty directory
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("nested").join("store.db");

    // When: `staffdb init`
    let output = run_cli(&dir, &db_path, &["init"]);

    // Then: the file exists with all three tables
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let conn = Connection::open(&db_path).unwrap();
    let tables: Vec<String> = conn
        .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
        .unwrap()
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(tables, vec!["departments", "employees", "reviews"]);
}

#[test]
fn test_cli_review_add_and_list() {
    // Given: a seeded employee
    let dir = TempDir::new().unwrap();
    let db_path = setup_seeded_db(&dir);

    // When: a review is added and listed
    let added = run_cli(
        &dir,
        &db_path,
        &["review", "add", "2021", "Exceeded targets", "--employee", "1"],
    );
    let listed = run_cli(&dir, &db_path, &["review", "list"]);

    // Then: both succeed and the listing shows the new row
    assert!(added.status.success(), "stderr: {}", stderr(&added));
    assert!(stdout(&added).contains("Created"));
    assert!(listed.status.success());
    let out = stdout(&listed);
    assert!(out.contains("2021"));
    assert!(out.contains("Exceeded targets"));
}

#[test]
fn test_cli_review_list_json() {
    // Given: one stored review
    let dir = TempDir::new().unwrap();
    let db_path = setup_seeded_db(&dir);
    run_cli(&dir, &db_path, &["review", "add", "2022", "Steady", "--employee", "1"]);

    // When: listing with --json
    let output = run_cli(&dir, &db_path, &["review", "list", "--json"]);

    // Then: the output is a JSON array of review objects
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let items = value.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], 1);
    assert_eq!(items[0]["year"], 2022);
    assert_eq!(items[0]["summary"], "Steady");
    assert_eq!(items[0]["employee_id"], 1);
}

#[test]
fn test_cli_review_invalid_year_fails() {
    // Given: a seeded employee
    let dir = TempDir::new().unwrap();
    let db_path = setup_seeded_db(&dir);

    // When: a review with a year before 2000 is added
    let output = run_cli(&dir, &db_path, &["review", "add", "1999", "Old", "--employee", "1"]);

    // Then: exit code 1, the error code is reported, nothing is stored
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("ERR_INVALID_YEAR"));
    let conn = Connection::open(&db_path).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM reviews", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn test_cli_review_unknown_employee_fails() {
    // Given: a seeded database without employee 99
    let dir = TempDir::new().unwrap();
    let db_path = setup_seeded_db(&dir);

    // When: a review for employee 99 is added
    let output = run_cli(&dir, &db_path, &["review", "add", "2021", "Ghost", "--employee", "99"]);

    // Then: the dangling reference is rejected
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("ERR_DANGLING_REFERENCE"));
}

#[test]
fn test_cli_review_update_and_show() {
    // Given: one stored review
    let dir = TempDir::new().unwrap();
    let db_path = setup_seeded_db(&dir);
    run_cli(&dir, &db_path, &["review", "add", "2021", "Draft", "--employee", "1"]);

    // When: its summary and year are updated
    let updated = run_cli(
        &dir,
        &db_path,
        &["review", "update", "1", "--year", "2023", "--summary", "Final"],
    );
    let shown = run_cli(&dir, &db_path, &["review", "show", "1", "--raw"]);

    // Then: the stored row carries the new values
    assert!(updated.status.success(), "stderr: {}", stderr(&updated));
    assert!(stdout(&shown).contains("(1, 2023, \"Final\", 1)"));
}

#[test]
fn test_cli_review_update_rejects_empty_summary() {
    // Given: one stored review
    let dir = TempDir::new().unwrap();
    let db_path = setup_seeded_db(&dir);
    run_cli(&dir, &db_path, &["review", "add", "2021", "Kept", "--employee", "1"]);

    // When: the summary is set to the empty string
    let output = run_cli(&dir, &db_path, &["review", "update", "1", "--summary", ""]);

    // Then: the update fails and the row is untouched
    assert_eq!(output.status.code(), Some(1));
    let conn = Connection::open(&db_path).unwrap();
    let summary: String = conn
        .query_row("SELECT summary FROM reviews WHERE id = 1", [], |row| row.get(0))
        .unwrap();
    assert_eq!(summary, "Kept");
}

#[test]
fn test_cli_review_delete() {
    // Given: one stored review
    let dir = TempDir::new().unwrap();
    let db_path = setup_seeded_db(&dir);
    run_cli(&dir, &db_path, &["review", "add", "2021", "Gone soon", "--employee", "1"]);

    // When: it is deleted
    let deleted = run_cli(&dir, &db_path, &["review", "delete", "1"]);
    let shown = run_cli(&dir, &db_path, &["review", "show", "1"]);

    // Then: it can no longer be found
    assert!(deleted.status.success());
    assert!(stdout(&shown).contains("Review 1 not found"));
}

#[test]
fn test_cli_employee_reviews() {
    // Given: two reviews for employee 1
    let dir = TempDir::new().unwrap();
    let db_path = setup_seeded_db(&dir);
    run_cli(&dir, &db_path, &["review", "add", "2021", "First", "--employee", "1"]);
    run_cli(&dir, &db_path, &["review", "add", "2022", "Second", "--employee", "1"]);

    // When: listing the employee's reviews
    let output = run_cli(&dir, &db_path, &["employee", "reviews", "1"]);

    // Then: both are shown
    let out = stdout(&output);
    assert!(out.contains("First"));
    assert!(out.contains("Second"));
}

#[test]
fn test_cli_reset_drops_tables() {
    // Given: an initialised database
    let dir = TempDir::new().unwrap();
    let db_path = setup_seeded_db(&dir);

    // When: `staffdb reset`
    let output = run_cli(&dir, &db_path, &["reset"]);

    // Then: no tables remain
    assert!(output.status.success());
    let conn = Connection::open(&db_path).unwrap();
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(count, 0);
}
